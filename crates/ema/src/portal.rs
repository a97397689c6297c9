//! `Portal` builder and session handle.
//!
//! This is the entry point for the portal core. It ties together all the
//! layers: storage → session → auth API → UI ports. One `Portal` is built
//! at startup and handed (by reference) to every form and page.

use ema_client::{AuthApi, ClientConfig, HttpAuthApi};
use ema_session::{SessionConfig, SessionManager, SessionSnapshot};
use ema_storage::ScopedStorage;
use tokio::sync::Mutex;

use crate::ports::{LogNavigator, LogNotifier, Navigator, Notifier, Route};
use crate::{EmaError, PortalConfig};

/// Result of asking whether a page may be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Render the page.
    Allowed,

    /// The startup restore hasn't finished; show a spinner and ask again.
    Loading,

    /// Not logged in. The navigator has already been sent to `/login`.
    RedirectToLogin,
}

/// Builder for configuring and starting a [`Portal`].
///
/// # Example
///
/// ```rust,ignore
/// use ema::prelude::*;
///
/// let portal = Portal::builder()
///     .storage(ScopedStorage::in_memory())
///     .build(my_api, LogNavigator, LogNotifier);
/// ```
pub struct PortalBuilder {
    storage: Option<ScopedStorage>,
    session_config: SessionConfig,
    api_config: ClientConfig,
    defer_restore: bool,
}

impl PortalBuilder {
    /// Creates a new builder with in-memory storage and default settings.
    pub fn new() -> Self {
        Self {
            storage: None,
            session_config: SessionConfig::default(),
            api_config: ClientConfig::default(),
            defer_restore: false,
        }
    }

    /// Seeds a builder from a [`PortalConfig`], opening its storage.
    ///
    /// # Errors
    /// [`EmaError::Storage`] if the persistent scope can't be opened.
    pub fn from_config(config: &PortalConfig) -> Result<Self, EmaError> {
        Ok(Self {
            storage: Some(config.open_storage()?),
            session_config: config.session.clone(),
            api_config: config.api.clone(),
            defer_restore: false,
        })
    }

    /// Sets the storage scopes.
    pub fn storage(mut self, storage: ScopedStorage) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Sets the session configuration.
    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.session_config = config;
        self
    }

    /// Sets where [`build_http()`](Self::build_http) points its client.
    pub fn api_config(mut self, config: ClientConfig) -> Self {
        self.api_config = config;
        self
    }

    /// Leaves the session loading after `build`; the caller runs
    /// [`Portal::restore`] itself (e.g. once the first frame is on screen).
    pub fn defer_restore(mut self) -> Self {
        self.defer_restore = true;
        self
    }

    /// Builds the portal around `api` and restores any persisted session.
    ///
    /// Unless [`defer_restore()`](Self::defer_restore) was set, the
    /// returned portal has already run [`Portal::restore`], so its session
    /// is no longer loading.
    pub fn build<A, N, T>(self, api: A, navigator: N, notifier: T) -> Portal<A, N, T>
    where
        A: AuthApi,
        N: Navigator,
        T: Notifier,
    {
        let storage = self.storage.unwrap_or_default();
        let mut sessions = SessionManager::new(storage, self.session_config);
        if !self.defer_restore {
            sessions.restore();
        }

        Portal {
            sessions: Mutex::new(sessions),
            api,
            navigator,
            notifier,
        }
    }

    /// Builds the portal with an [`HttpAuthApi`] for the configured API.
    ///
    /// # Errors
    /// [`EmaError::Api`] if the HTTP client can't be built.
    pub fn build_http<N, T>(
        self,
        navigator: N,
        notifier: T,
    ) -> Result<Portal<HttpAuthApi, N, T>, EmaError>
    where
        N: Navigator,
        T: Notifier,
    {
        let api = HttpAuthApi::new(self.api_config.clone())?;
        Ok(self.build(api, navigator, notifier))
    }
}

impl Default for PortalBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The explicit session handle: one per running client.
///
/// Owns the [`SessionManager`] behind an async mutex, the auth API, and the
/// two UI ports. The mutex is only ever held for synchronous session calls,
/// never across a network request.
pub struct Portal<A = HttpAuthApi, N = LogNavigator, T = LogNotifier>
where
    A: AuthApi,
    N: Navigator,
    T: Notifier,
{
    sessions: Mutex<SessionManager>,
    api: A,
    navigator: N,
    notifier: T,
}

impl Portal {
    /// Creates a new builder.
    ///
    /// The builder isn't tied to this default parameterization;
    /// [`PortalBuilder::build`] picks the API and port types.
    pub fn builder() -> PortalBuilder {
        PortalBuilder::new()
    }
}

impl<A, N, T> Portal<A, N, T>
where
    A: AuthApi,
    N: Navigator,
    T: Notifier,
{
    /// A snapshot of the session for rendering.
    pub async fn session(&self) -> SessionSnapshot {
        self.sessions.lock().await.current_session()
    }

    /// The current auth token, for calls to other authenticated endpoints.
    pub async fn token(&self) -> Option<String> {
        self.sessions.lock().await.token().map(str::to_string)
    }

    /// Re-runs the startup check against storage.
    pub async fn restore(&self) {
        self.sessions.lock().await.restore();
    }

    /// Logs out and returns to the home page.
    pub async fn logout(&self) {
        self.sessions.lock().await.logout();
        self.navigator.navigate(Route::Home);
    }

    /// Decides whether `route` may be shown right now.
    ///
    /// Public routes are always allowed. Protected routes wait for the
    /// startup restore, then redirect anonymous users to `/login`.
    pub async fn guard(&self, route: Route) -> Access {
        if !route.requires_auth() {
            return Access::Allowed;
        }

        let snapshot = self.session().await;
        if snapshot.loading {
            return Access::Loading;
        }
        if !snapshot.is_authenticated {
            tracing::debug!(%route, "protected route without session, redirecting");
            self.navigator.navigate(Route::Login);
            return Access::RedirectToLogin;
        }
        Access::Allowed
    }

    /// Navigates to `route` unconditionally (menu links, login/register
    /// buttons).
    pub fn open(&self, route: Route) {
        self.navigator.navigate(route);
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn notifier(&self) -> &T {
        &self.notifier
    }

    /// Runs `f` with exclusive access to the session manager.
    ///
    /// `f` is synchronous, so the lock can't be held across an `.await`.
    pub async fn with_session<R>(&self, f: impl FnOnce(&mut SessionManager) -> R) -> R {
        let mut sessions = self.sessions.lock().await;
        f(&mut *sessions)
    }
}
