//! Domain models for the storefront.
//!
//! Catalog, cart, and order types live in `nutribook_core`; this module holds
//! the types that only make sense next to the database and the session.

pub mod flash;
pub mod session;
pub mod user;
pub mod visit;

pub use flash::{Flash, FlashLevel};
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
pub use visit::Visit;
