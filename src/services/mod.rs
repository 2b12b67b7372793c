//! Service Layer
//!
//! Everything that talks to the outside: backend tables, the auth API and
//! the image storage function.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  EntityStore<T>        AuthClient          ObjectStorage     │
//! │  ├─ RestStore<T>       └─ SessionVault     ├─ ImageStorage   │
//! │  └─ MemoryStore<T>                         └─ MemoryStorage  │
//! └──────────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼ ServiceEvent (ServiceHub)
//! ┌──────────────────────────────────────────────────────────────┐
//! │                   State Layer (NoticeState)                   │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod auth;
pub mod demo;
mod events;
mod hub;
mod memory;
mod rest;
mod storage;
mod store;

pub use auth::*;
pub use events::*;
pub use hub::*;
pub use memory::*;
pub use rest::{RestClient, RestStore};
pub use storage::*;
pub use store::*;
