//! Domain - Pure Data Structures
//!
//! Business records as stored by the backend. No I/O lives here.

pub mod client;
pub mod config;
pub mod entity;
pub mod product;
pub mod promotion;
pub mod sale;
pub mod session;
pub mod status;
pub mod user;

pub use client::{CLIENT_SEGMENTS, Client, ClientDraft};
pub use entity::{Entity, EntityId, Record};
pub use product::{Product, ProductDraft, StockLevel};
pub use promotion::{Promotion, PromotionDraft, PromotionStatus};
pub use sale::{Sale, SaleDraft, SaleItem};
pub use session::{Session, SessionUser};
pub use status::{DiscountKind, EntityStatus, PaymentMethod, Role, SaleStatus};
pub use user::{User, UserDraft};
