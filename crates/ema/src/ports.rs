//! Ports: the side effects the core asks the UI to perform.
//!
//! The core never routes or renders. When a flow wants the user somewhere
//! else it calls a [`Navigator`]; when it wants to tell them something it
//! calls a [`Notifier`]. The UI layer implements both.

use std::fmt;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Route
// ---------------------------------------------------------------------------

/// The pages the core knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    About,
    Profile,
    Settings,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Home,
        Route::Login,
        Route::Register,
        Route::About,
        Route::Profile,
        Route::Settings,
    ];

    /// The URL path of this route.
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::About => "/about",
            Route::Profile => "/profile",
            Route::Settings => "/settings",
        }
    }

    /// Looks a route up by path. Unknown paths return `None`.
    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|r| r.path() == path)
    }

    /// Pages that only make sense for a logged-in user.
    pub fn requires_auth(self) -> bool {
        matches!(self, Route::Profile | Route::Settings)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

// ---------------------------------------------------------------------------
// Navigator / Notifier
// ---------------------------------------------------------------------------

/// Moves the user to another page.
pub trait Navigator: Send + Sync + 'static {
    fn navigate(&self, route: Route);
}

/// Shows the user a blocking message (an alert, a toast...).
pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, message: &str);
}

impl<N: Navigator + ?Sized> Navigator for Arc<N> {
    fn navigate(&self, route: Route) {
        (**self).navigate(route)
    }
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify(&self, message: &str) {
        (**self).notify(message)
    }
}

/// A [`Navigator`] that only logs where it would go.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!(%route, "navigate");
    }
}

/// A [`Notifier`] that logs each message.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::info!(text = message, "notify");
    }
}
