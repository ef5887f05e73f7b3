//! Nutribook Core - Shared domain library.
//!
//! This crate provides the domain model used by the Nutribook components:
//! - `storefront` - Public shop and appointment booking site
//! - `cli` - Command-line tools for migrations and ledger inspection
//!
//! # Architecture
//!
//! The core crate contains only types and pure rules - no I/O, no database
//! access, no HTTP. Anything that touches storage lives in the storefront.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses
//! - [`catalog`] - The fixed product catalog
//! - [`cart`] - Session cart model and totaling
//! - [`order`] - Order ledger records
//! - [`schedule`] - Weekday opening hours and slot formatting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod order;
pub mod schedule;
pub mod types;

pub use cart::{Cart, CartItem};
pub use catalog::{Product, catalog, find_product};
pub use order::Order;
pub use schedule::{DATE_FORMAT, SlotError, candidate_hours, candidate_slots, format_slot, parse_date};
pub use types::*;
