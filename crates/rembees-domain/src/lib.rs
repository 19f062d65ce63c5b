//! rembees-domain
//!
//! Pure domain models (Transaction, User, Theme, Category catalog).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod category;
pub mod common;
pub mod theme;
pub mod transaction;
pub mod user;

pub use category::*;
pub use common::*;
pub use theme::*;
pub use transaction::*;
pub use user::*;
