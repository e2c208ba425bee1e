//! # API Module
//!
//! HTTP endpoints served by the local callback server during `playbucket auth`.
//!
//! - [`callback`] - completes the OAuth 2.0 PKCE flow by exchanging the
//!   authorization code for a token and handing it to the waiting auth command
//! - [`health`] - reports status and version
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use playbucket::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
