//! # EMA portal core
//!
//! The client-side core of the EMA music school site: who is logged in,
//! how they log in, how parents register, and how a first-login account
//! trades its issued password for its own.
//!
//! The layers underneath are separate crates (storage, session, forms,
//! auth client). This crate wires them behind one [`Portal`] handle and
//! two UI ports, [`Navigator`] and [`Notifier`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ema::prelude::*;
//!
//! # async fn run() -> Result<(), EmaError> {
//! let config = PortalConfig::from_env()?;
//! let portal = PortalBuilder::from_config(&config)?.build_http(LogNavigator, LogNotifier)?;
//!
//! let mut login = LoginForm::new();
//! login.set_email("estudiante@ema.com");
//! login.set_password("password123");
//! login.submit(&portal).await;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod login;
pub mod messages;
mod password_reset;
mod portal;
mod ports;
mod register;
mod status;

pub use config::{CLEAR_OTHER_SCOPE_ENV, PERSISTENT_FILE, PortalConfig, STORAGE_DIR_ENV};
pub use error::EmaError;
pub use login::{LoginForm, LoginPhase};
pub use password_reset::{PasswordResetDialog, ResetOutcome};
pub use portal::{Access, Portal, PortalBuilder};
pub use ports::{LogNavigator, LogNotifier, Navigator, Notifier, Route};
pub use register::{RegisterOutcome, RegistrationForm};

pub use ema_client as client;
pub use ema_forms as forms;
pub use ema_protocol as protocol;
pub use ema_session as session;
pub use ema_storage as storage;

/// The types most applications need.
pub mod prelude {
    pub use crate::{
        Access, EmaError, LogNavigator, LogNotifier, LoginForm, LoginPhase,
        Navigator, Notifier, PasswordResetDialog, Portal, PortalBuilder,
        PortalConfig, RegisterOutcome, RegistrationForm, ResetOutcome, Route,
    };
    pub use ema_client::{AuthApi, ClientConfig, HttpAuthApi};
    pub use ema_forms::RegistrationField;
    pub use ema_protocol::{Role, User, UserId};
    pub use ema_session::{ScopePolicy, SessionConfig, SessionSnapshot};
    pub use ema_storage::{ScopedStorage, StorageScope};
}
