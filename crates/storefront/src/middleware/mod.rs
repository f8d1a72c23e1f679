//! HTTP middleware stack for the storefront API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. CORS (single allowed origin, preflight answered here)
//! 3. `TraceLayer` (request span)
//! 4. Request ID (recorded in the span and Sentry scope)
//! 5. Rate limiting (governor) on payment and analysis routes

pub mod rate_limit;
pub mod request_id;

pub use rate_limit::{analysis_rate_limiter, json_rate_limit_response, payment_rate_limiter};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
