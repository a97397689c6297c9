//! REST client for the EMA auth API.
//!
//! ```text
//! Flows (ema crate)
//!     ↕  AuthApi trait
//! HttpAuthApi  ← this crate: POST + JSON over reqwest
//!     ↕
//! Auth server  ← /api/auth/{login,update-password,register}
//! ```
//!
//! The [`AuthApi`] trait is the seam: flows are generic over it, and the
//! HTTP implementation is only one choice.
#![allow(async_fn_in_trait)]

mod api;
mod config;
mod error;
mod http;

pub use api::{AuthApi, LOGIN_PATH, REGISTER_PATH, UPDATE_PASSWORD_PATH};
pub use config::{API_TIMEOUT_ENV, API_URL_ENV, ClientConfig};
pub use error::ApiError;
pub use http::HttpAuthApi;
