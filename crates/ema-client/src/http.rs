//! [`AuthApi`] over HTTP, using `reqwest`.

use ema_protocol::{
    ApiErrorBody, Codec, JsonCodec, LoginRequest, LoginResponse,
    RegisterRequest, RegisterResponse, UpdatePasswordRequest,
    UpdatePasswordResponse,
};
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::{LOGIN_PATH, REGISTER_PATH, UPDATE_PASSWORD_PATH};
use crate::{ApiError, AuthApi, ClientConfig};

/// Talks to the auth server over HTTP.
///
/// Bodies are JSON, encoded and decoded with [`JsonCodec`]. The
/// underlying `reqwest::Client` pools connections, so build one
/// `HttpAuthApi` and reuse it.
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    client: reqwest::Client,
    config: ClientConfig,
    codec: JsonCodec,
}

impl HttpAuthApi {
    /// Creates a client for the API described by `config`.
    ///
    /// # Errors
    /// [`ApiError::Transport`] if the HTTP client can't be built (e.g. the
    /// TLS backend fails to initialize).
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        tracing::debug!(base_url = %config.base_url, "auth api client ready");

        Ok(Self {
            client,
            config,
            codec: JsonCodec,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// POSTs `body` to `path` and decodes a 2xx answer as `Resp`.
    ///
    /// A non-2xx answer is decoded as [`ApiErrorBody`] on a best-effort
    /// basis: if that fails, the rejection simply carries no message.
    async fn post<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, ApiError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        let payload = self.codec.encode(body)?;

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .inspect_err(|e| tracing::warn!(path, error = %e, "request failed"))?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let body: ApiErrorBody = self.codec.decode(&bytes).unwrap_or_default();
            tracing::info!(
                path,
                status = status.as_u16(),
                code = body.code.as_deref().unwrap_or("-"),
                "request rejected"
            );
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: body.message,
                code: body.code,
            });
        }

        tracing::debug!(path, status = status.as_u16(), "request succeeded");
        Ok(self.codec.decode(&bytes)?)
    }
}

impl AuthApi for HttpAuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.post(LOGIN_PATH, request).await
    }

    async fn update_password(
        &self,
        request: &UpdatePasswordRequest,
    ) -> Result<UpdatePasswordResponse, ApiError> {
        self.post(UPDATE_PASSWORD_PATH, request).await
    }

    async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<RegisterResponse, ApiError> {
        self.post(REGISTER_PATH, request).await
    }
}
