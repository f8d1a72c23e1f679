//! Core types for The Grasshopper.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod money;
pub mod phone;
pub mod region;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use money::Cents;
pub use phone::{PhoneError, PhoneNumber};
pub use region::UsState;
pub use status::*;
