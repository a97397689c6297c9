//! The auth API contract.

use std::sync::Arc;

use ema_protocol::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
    UpdatePasswordRequest, UpdatePasswordResponse,
};

use crate::ApiError;

/// Path of the login endpoint.
pub const LOGIN_PATH: &str = "/api/auth/login";

/// Path of the password-change endpoint.
pub const UPDATE_PASSWORD_PATH: &str = "/api/auth/update-password";

/// Path of the registration endpoint.
pub const REGISTER_PATH: &str = "/api/auth/register";

/// The three auth operations the portal needs from the server.
///
/// [`HttpAuthApi`](crate::HttpAuthApi) is the real implementation; flows
/// take any `AuthApi` so tests can substitute a scripted one.
///
/// Every method is a single POST. A non-2xx answer is
/// [`ApiError::Rejected`]; nothing is retried.
pub trait AuthApi: Send + Sync + 'static {
    /// `POST /api/auth/login`.
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;

    /// `POST /api/auth/update-password`.
    async fn update_password(
        &self,
        request: &UpdatePasswordRequest,
    ) -> Result<UpdatePasswordResponse, ApiError>;

    /// `POST /api/auth/register`.
    async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<RegisterResponse, ApiError>;
}

/// Lets a test keep a handle on its fake while the portal owns another.
impl<A: AuthApi> AuthApi for Arc<A> {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        (**self).login(request).await
    }

    async fn update_password(
        &self,
        request: &UpdatePasswordRequest,
    ) -> Result<UpdatePasswordResponse, ApiError> {
        (**self).update_password(request).await
    }

    async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<RegisterResponse, ApiError> {
        (**self).register(request).await
    }
}
