//! State - Page and Session State
//!
//! Plain state holders mutated by the feature controllers. Split by concern
//! so each page owns only its own collection.

pub mod list_state;
pub mod notice_state;
pub mod session_state;

pub use list_state::{ListState, LoadState};
pub use notice_state::{Notice, NoticeLevel, NoticeState};
pub use session_state::SessionState;
