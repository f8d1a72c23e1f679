//! Grasshopper Core - Shared domain library.
//!
//! This crate provides the types and business rules used by the storefront
//! service and the `gh-cli` tool:
//!
//! - [`types`] - Newtypes for money, catalog ids, e-mail, phone numbers and regions
//! - [`pricing`] - Sale pricing and sales tax
//! - [`shipping`] - Flat-rate table, weight brackets and UPS Ground zones
//! - [`promo`] - Discount kinds and discount arithmetic
//! - [`pickup`] - Local pickup radius check
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. Everything the storefront charges a
//! customer is computed here so it can be tested without the network.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod pickup;
pub mod pricing;
pub mod promo;
pub mod shipping;
pub mod types;

pub use types::*;
