//! String cryptography utilities.
//!
//! AES-256-GCM sealing for the saved session token, encoded as Base64 so the
//! session file stays plain text.

use crate::error::Error;
use aes_gcm::{
    Aes256Gcm,
    aead::{Aead, AeadCore, KeyInit, Nonce, OsRng},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

type Result<T, E = Error> = std::result::Result<T, E>;

const NONCE_LEN: usize = 12;

/// Built-in key used when no key is configured.
///
/// WARNING: this only keeps the token out of casual view; anyone with the
/// binary can recover it.
pub const DEFAULT_SESSION_KEY: &[u8; 32] = b"FerreMarketAdminSessionKey2026!!";

/// Encrypts `plain_text` with AES-256-GCM under `key`.
///
/// Output is Base64 of `[nonce (12 bytes)][ciphertext]`, with a fresh random
/// nonce per call.
pub fn encrypt(key: &[u8; 32], plain_text: &str) -> Result<String> {
    let cipher = Aes256Gcm::new(key.into());
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plain_text.as_bytes())
        .map_err(|e| Error::Invalid {
            message: format!("Encryption failed: {e}"),
        })?;

    let mut combined = nonce.to_vec();
    combined.extend_from_slice(&ciphertext);
    Ok(BASE64.encode(combined))
}

/// Reverses [`encrypt`]; fails on tampering or a different key
pub fn decrypt(key: &[u8; 32], cipher_text: &str) -> Result<String> {
    let data = BASE64.decode(cipher_text.trim()).map_err(|e| Error::Invalid {
        message: format!("Base64 decode failed: {e}"),
    })?;

    if data.len() < NONCE_LEN {
        return Err(Error::Invalid {
            message: "Ciphertext too short".to_string(),
        });
    }

    let cipher = Aes256Gcm::new(key.into());
    let (nonce_bytes, ciphertext) = data.split_at(NONCE_LEN);
    let nonce = Nonce::<Aes256Gcm>::from_slice(nonce_bytes);

    let plaintext_bytes = cipher.decrypt(nonce, ciphertext).map_err(|e| Error::Invalid {
        message: format!("Decryption failed: {e}"),
    })?;

    String::from_utf8(plaintext_bytes).map_err(|e| Error::Invalid {
        message: format!("UTF-8 decode failed: {e}"),
    })
}

/// Derive a 32-byte key from a configured secret.
///
/// Short secrets are repeated, long ones are folded with XOR.
pub fn session_key(secret: &str) -> [u8; 32] {
    if secret.is_empty() {
        return *DEFAULT_SESSION_KEY;
    }
    let mut key = *DEFAULT_SESSION_KEY;
    for (i, byte) in secret.bytes().cycle().take(secret.len().max(32)).enumerate() {
        key[i % 32] ^= byte;
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt() {
        let key = DEFAULT_SESSION_KEY;
        let encrypted = encrypt(key, "eyJhbGciOi.token").expect("Encryption failed");
        let decrypted = decrypt(key, &encrypted).expect("Decryption failed");
        assert_eq!(decrypted, "eyJhbGciOi.token");
    }

    #[test]
    fn test_encrypt_produces_different_ciphertext() {
        let key = DEFAULT_SESSION_KEY;
        let encrypted1 = encrypt(key, "test").expect("Encryption failed");
        let encrypted2 = encrypt(key, "test").expect("Encryption failed");
        assert_ne!(encrypted1, encrypted2);
    }

    #[test]
    fn test_wrong_key_is_rejected() {
        let encrypted = encrypt(DEFAULT_SESSION_KEY, "secreto").unwrap();
        assert!(decrypt(&session_key("otra"), &encrypted).is_err());
    }

    #[test]
    fn test_decrypt_invalid_input() {
        assert!(decrypt(DEFAULT_SESSION_KEY, "not_valid_base64!!!").is_err());
        assert!(decrypt(DEFAULT_SESSION_KEY, "AQIDBA==").is_err());
    }

    #[test]
    fn test_session_key_is_stable() {
        assert_eq!(session_key("abc"), session_key("abc"));
        assert_ne!(session_key("abc"), session_key("abd"));
        assert_eq!(&session_key(""), DEFAULT_SESSION_KEY);
    }
}
