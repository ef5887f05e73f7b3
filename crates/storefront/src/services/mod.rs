//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Registration and password login
//! - `booking` - Slot availability and visit reservations
//! - `ledger` - JSON order ledger

pub mod auth;
pub mod booking;
pub mod ledger;

pub use auth::{AuthError, AuthService};
pub use booking::{BookingError, BookingOutcome, BookingService};
pub use ledger::{LedgerError, OrderLedger};
