//! Outbound integrations besides Square and Claude.
//!
//! # Services
//!
//! - `gmail` - Gmail API delivery (OAuth2 refresh-token flow)
//! - `email` - Order e-mail templates and best-effort sending
//! - `netlify` - Newsletter form submissions for the admin export

pub mod email;
pub mod gmail;
pub mod netlify;

pub use email::{EmailLine, Mailer, OrderEmail, PickupRequestEmail, ShipTo};
pub use gmail::{GmailClient, GmailError, OutgoingEmail};
pub use netlify::{ExportedEmail, NetlifyClient, NetlifyError};
