//! Integration tests for the portal: login, first-login reset,
//! registration, logout and route guarding, end to end.
//!
//! The auth server is a scripted `FakeApi`; navigation and notifications
//! are recorded so each test can assert exactly which side effects fired.

use std::sync::{Arc, Mutex};

use ema::client::ApiError;
use ema::messages;
use ema::prelude::*;
use ema::protocol::{
    LoginRequest, LoginResponse, ProtocolError, RegisterRequest, RegisterResponse,
    UpdatePasswordRequest, UpdatePasswordResponse,
};
use ema::session::SessionState;
use ema::storage::{MemoryStore, Store, TOKEN_KEY, USER_KEY};

// =========================================================================
// Fake auth API and recording ports
// =========================================================================

/// How the fake answers one endpoint.
#[derive(Clone)]
enum Reply<T> {
    Ok(T),
    Reject {
        status: u16,
        message: Option<&'static str>,
    },
    /// Stands in for a dropped connection or unreadable answer.
    Offline,
}

impl<T: Clone> Reply<T> {
    fn to_result(&self) -> Result<T, ApiError> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Reject { status, message } => Err(ApiError::Rejected {
                status: *status,
                message: message.map(str::to_string),
                code: None,
            }),
            Reply::Offline => Err(ApiError::Protocol(ProtocolError::InvalidMessage(
                "connection reset".into(),
            ))),
        }
    }
}

/// Samples some outside state each time an endpoint is called.
type CallObserver = Box<dyn Fn() -> bool + Send + Sync>;

struct FakeApi {
    observer: Mutex<Option<CallObserver>>,
    observed: Mutex<Vec<bool>>,

    login_reply: Mutex<Reply<LoginResponse>>,
    update_reply: Mutex<Reply<UpdatePasswordResponse>>,
    register_reply: Mutex<Reply<RegisterResponse>>,

    login_calls: Mutex<Vec<LoginRequest>>,
    update_calls: Mutex<Vec<UpdatePasswordRequest>>,
    register_calls: Mutex<Vec<RegisterRequest>>,
}

impl FakeApi {
    fn new() -> Self {
        Self {
            observer: Mutex::new(None),
            observed: Mutex::new(Vec::new()),
            login_reply: Mutex::new(Reply::Ok(login_ok(student()))),
            update_reply: Mutex::new(Reply::Ok(UpdatePasswordResponse {
                success: true,
                message: Some("Contraseña actualizada".into()),
            })),
            register_reply: Mutex::new(Reply::Ok(RegisterResponse {
                success: true,
                message: Some("Usuario registrado".into()),
            })),
            login_calls: Mutex::new(Vec::new()),
            update_calls: Mutex::new(Vec::new()),
            register_calls: Mutex::new(Vec::new()),
        }
    }

    fn answer_login(&self, reply: Reply<LoginResponse>) {
        *self.login_reply.lock().unwrap() = reply;
    }

    fn answer_update(&self, reply: Reply<UpdatePasswordResponse>) {
        *self.update_reply.lock().unwrap() = reply;
    }

    fn answer_register(&self, reply: Reply<RegisterResponse>) {
        *self.register_reply.lock().unwrap() = reply;
    }

    /// Runs `observer` inside every call and keeps what it returned.
    fn observe_calls(&self, observer: impl Fn() -> bool + Send + Sync + 'static) {
        *self.observer.lock().unwrap() = Some(Box::new(observer));
    }

    fn observed(&self) -> Vec<bool> {
        self.observed.lock().unwrap().clone()
    }

    fn record_observation(&self) {
        if let Some(observer) = self.observer.lock().unwrap().as_ref() {
            self.observed.lock().unwrap().push(observer());
        }
    }

    fn login_calls(&self) -> Vec<LoginRequest> {
        self.login_calls.lock().unwrap().clone()
    }

    fn update_calls(&self) -> Vec<UpdatePasswordRequest> {
        self.update_calls.lock().unwrap().clone()
    }

    fn register_calls(&self) -> Vec<RegisterRequest> {
        self.register_calls.lock().unwrap().clone()
    }
}

impl AuthApi for FakeApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.record_observation();
        self.login_calls.lock().unwrap().push(request.clone());
        self.login_reply.lock().unwrap().to_result()
    }

    async fn update_password(
        &self,
        request: &UpdatePasswordRequest,
    ) -> Result<UpdatePasswordResponse, ApiError> {
        self.record_observation();
        self.update_calls.lock().unwrap().push(request.clone());
        self.update_reply.lock().unwrap().to_result()
    }

    async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<RegisterResponse, ApiError> {
        self.record_observation();
        self.register_calls.lock().unwrap().push(request.clone());
        self.register_reply.lock().unwrap().to_result()
    }
}

#[derive(Default)]
struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

#[derive(Default)]
struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

// =========================================================================
// Fixtures
// =========================================================================

type TestPortal = Portal<Arc<FakeApi>, Arc<RecordingNavigator>, Arc<RecordingNotifier>>;

struct Harness {
    api: Arc<FakeApi>,
    nav: Arc<RecordingNavigator>,
    notes: Arc<RecordingNotifier>,
    persistent: Arc<MemoryStore>,
    session: Arc<MemoryStore>,
    portal: TestPortal,
}

fn harness_from(builder: PortalBuilder, persistent: Arc<MemoryStore>) -> Harness {
    let api = Arc::new(FakeApi::new());
    let nav = Arc::new(RecordingNavigator::default());
    let notes = Arc::new(RecordingNotifier::default());
    let session = Arc::new(MemoryStore::new());

    let portal = builder
        .storage(ScopedStorage::new(Arc::clone(&persistent), Arc::clone(&session)))
        .build(Arc::clone(&api), Arc::clone(&nav), Arc::clone(&notes));

    Harness {
        api,
        nav,
        notes,
        persistent,
        session,
        portal,
    }
}

fn harness() -> Harness {
    harness_from(Portal::builder(), Arc::new(MemoryStore::new()))
}

fn student() -> User {
    User {
        id: UserId(1),
        email: "estudiante@ema.com".into(),
        role: Role::Student,
        first_name: "María".into(),
        last_name: "González".into(),
        is_first_login: false,
    }
}

fn first_timer() -> User {
    User {
        id: UserId(2),
        email: "nuevo@ema.com".into(),
        role: Role::Student,
        first_name: "Carlos".into(),
        last_name: "Rodríguez".into(),
        is_first_login: true,
    }
}

fn login_ok(user: User) -> LoginResponse {
    LoginResponse {
        success: true,
        user,
        token: "jwt-token-example".into(),
    }
}

fn filled_login(email: &str, password: &str, remember: bool) -> LoginForm {
    let mut form = LoginForm::new();
    form.set_email(email);
    form.set_password(password);
    form.set_remember_me(remember);
    form
}

fn has_credentials(store: &MemoryStore) -> bool {
    store.get(TOKEN_KEY).unwrap().is_some() || store.get(USER_KEY).unwrap().is_some()
}

/// Logs `first_timer()` in and leaves the password dialog open.
async fn first_login(h: &Harness, remember: bool) -> LoginForm {
    h.api.answer_login(Reply::Ok(login_ok(first_timer())));
    let mut form = filled_login("nuevo@ema.com", "temporal1", remember);
    assert_eq!(form.submit(&h.portal).await, LoginPhase::AwaitingPasswordReset);
    form
}

fn fill_dialog(form: &mut LoginForm, current: &str, new: &str, confirm: &str) {
    let dialog = form.password_reset_mut().expect("dialog should be open");
    dialog.set_current(current);
    dialog.set_new(new);
    dialog.set_confirm(confirm);
}

fn filled_registration() -> RegistrationForm {
    use RegistrationField as F;

    let mut form = RegistrationForm::new();
    form.edit(F::FirstName, "Ana");
    form.edit(F::LastName, "López");
    form.edit(F::Prefix, "+502");
    form.edit(F::Phone, "55551234");
    form.edit(F::Email, "ana@ema.com");
    form.edit(F::Password, "clave123");
    form.edit(F::ConfirmPassword, "clave123");
    form
}

// =========================================================================
// Login
// =========================================================================

#[tokio::test]
async fn test_login_student_sends_exact_body_and_goes_home() {
    let h = harness();
    let mut form = filled_login("estudiante@ema.com", "password123", false);

    let phase = form.submit(&h.portal).await;

    assert_eq!(phase, LoginPhase::Authenticated);
    assert_eq!(
        h.api.login_calls(),
        vec![LoginRequest {
            email: "estudiante@ema.com".into(),
            password: "password123".into(),
        }]
    );
    assert_eq!(h.nav.routes(), vec![Route::Home]);

    let snap = h.portal.session().await;
    assert!(snap.is_authenticated);
    assert_eq!(snap.current_user, Some(student()));
    assert_eq!(form.error(), None);
}

#[tokio::test]
async fn test_login_phase_is_submitting_while_request_in_flight() {
    let h = harness();
    let mut form = filled_login("estudiante@ema.com", "password123", false);
    let phase = form.watch_phase();
    h.api.observe_calls(move || *phase.borrow() == LoginPhase::Submitting);

    form.submit(&h.portal).await;

    assert_eq!(h.api.observed(), vec![true]);
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn test_login_success_greets_user_by_name() {
    let h = harness();
    let mut form = filled_login("estudiante@ema.com", "password123", false);

    form.submit(&h.portal).await;

    assert_eq!(h.notes.messages(), vec!["Welcome, María González!".to_string()]);
}

#[tokio::test]
async fn test_login_empty_email_sends_nothing() {
    let h = harness();
    let mut form = filled_login("", "password123", false);

    let phase = form.submit(&h.portal).await;

    assert_eq!(phase, LoginPhase::Idle);
    assert_eq!(form.error(), Some("please complete all fields"));
    assert!(h.api.login_calls().is_empty());
    assert!(h.nav.routes().is_empty());
}

#[tokio::test]
async fn test_login_empty_password_sends_nothing() {
    let h = harness();
    let mut form = filled_login("estudiante@ema.com", "", true);

    form.submit(&h.portal).await;

    assert!(h.api.login_calls().is_empty());
    assert!(!h.portal.session().await.is_authenticated);
}

#[tokio::test]
async fn test_login_malformed_email_sends_nothing() {
    let h = harness();
    let mut form = filled_login("estudiante", "password123", false);

    let phase = form.submit(&h.portal).await;

    assert_eq!(phase, LoginPhase::Idle);
    assert_eq!(form.error(), Some("invalid email"));
    assert!(h.api.login_calls().is_empty());
}

#[tokio::test]
async fn test_login_remember_me_persists_only_in_persistent_scope() {
    let h = harness();
    let mut form = filled_login("estudiante@ema.com", "password123", true);

    form.submit(&h.portal).await;

    assert_eq!(
        h.persistent.get(TOKEN_KEY).unwrap().as_deref(),
        Some("jwt-token-example")
    );
    assert!(!has_credentials(&h.session));
}

#[tokio::test]
async fn test_login_without_remember_me_persists_only_in_session_scope() {
    let h = harness();
    let mut form = filled_login("estudiante@ema.com", "password123", false);

    form.submit(&h.portal).await;

    assert_eq!(
        h.session.get(TOKEN_KEY).unwrap().as_deref(),
        Some("jwt-token-example")
    );
    assert!(!has_credentials(&h.persistent));
    assert_eq!(h.portal.token().await.as_deref(), Some("jwt-token-example"));
}

#[tokio::test]
async fn test_login_rejected_shows_server_message_and_persists_nothing() {
    let h = harness();
    h.api.answer_login(Reply::Reject {
        status: 401,
        message: Some("Credenciales inválidas"),
    });
    let mut form = filled_login("estudiante@ema.com", "mala", true);

    let phase = form.submit(&h.portal).await;

    assert_eq!(phase, LoginPhase::Failed);
    assert_eq!(form.error(), Some("Credenciales inválidas"));
    assert!(!has_credentials(&h.persistent));
    assert!(!has_credentials(&h.session));
    assert!(h.nav.routes().is_empty());
    assert!(!h.portal.session().await.is_authenticated);
}

#[tokio::test]
async fn test_login_rejected_without_message_uses_fallback() {
    let h = harness();
    h.api.answer_login(Reply::Reject {
        status: 500,
        message: None,
    });
    let mut form = filled_login("estudiante@ema.com", "password123", false);

    form.submit(&h.portal).await;

    assert_eq!(form.error(), Some(messages::LOGIN_FAILED));
}

#[tokio::test]
async fn test_login_offline_shows_connection_error() {
    let h = harness();
    h.api.answer_login(Reply::Offline);
    let mut form = filled_login("estudiante@ema.com", "password123", false);

    let phase = form.submit(&h.portal).await;

    assert_eq!(phase, LoginPhase::Failed);
    assert_eq!(form.error(), Some("could not connect to the server"));
}

#[tokio::test]
async fn test_login_retry_after_failure_clears_error() {
    let h = harness();
    h.api.answer_login(Reply::Offline);
    let mut form = filled_login("estudiante@ema.com", "password123", false);
    form.submit(&h.portal).await;

    h.api.answer_login(Reply::Ok(login_ok(student())));
    let phase = form.submit(&h.portal).await;

    assert_eq!(phase, LoginPhase::Authenticated);
    assert_eq!(form.error(), None);
    assert_eq!(h.api.login_calls().len(), 2);
}

#[tokio::test]
async fn test_login_clear_other_scope_policy_drops_stale_record() {
    let persistent = Arc::new(MemoryStore::new());
    let h = harness_from(
        Portal::builder().session_config(SessionConfig {
            scope_policy: ScopePolicy::ClearOtherScope,
        }),
        persistent,
    );
    filled_login("estudiante@ema.com", "password123", true)
        .submit(&h.portal)
        .await;

    filled_login("estudiante@ema.com", "password123", false)
        .submit(&h.portal)
        .await;

    assert!(!has_credentials(&h.persistent));
    assert!(has_credentials(&h.session));
}

// =========================================================================
// First login / password reset
// =========================================================================

#[tokio::test]
async fn test_first_login_persists_and_opens_dialog_without_navigating() {
    let h = harness();

    let form = first_login(&h, false).await;

    assert!(form.password_reset().is_some());
    assert!(has_credentials(&h.session));
    assert!(h.nav.routes().is_empty());
    assert!(h.notes.messages().is_empty());
    h.portal
        .with_session(|s| assert!(s.state().is_pending_reset()))
        .await;
    assert!(h.portal.session().await.is_authenticated);
}

#[tokio::test]
async fn test_password_change_success_activates_session_and_goes_home() {
    let h = harness();
    let mut form = first_login(&h, true).await;
    fill_dialog(&mut form, "temporal1", "nuevaClave9", "nuevaClave9");

    let outcome = form.submit_password_change(&h.portal).await;

    assert_eq!(outcome, ResetOutcome::Completed);
    assert_eq!(form.phase(), LoginPhase::Authenticated);
    assert!(form.password_reset().is_none());
    assert_eq!(
        h.api.update_calls(),
        vec![UpdatePasswordRequest {
            user_id: UserId(2),
            current_password: "temporal1".into(),
            new_password: "nuevaClave9".into(),
        }]
    );
    assert_eq!(h.notes.messages(), vec![messages::PASSWORD_UPDATED.to_string()]);
    assert_eq!(h.nav.routes(), vec![Route::Home]);

    h.portal
        .with_session(|s| assert!(matches!(s.state(), SessionState::Active(_))))
        .await;
    let stored: User =
        serde_json::from_str(&h.persistent.get(USER_KEY).unwrap().unwrap()).unwrap();
    assert!(!stored.is_first_login);
}

#[tokio::test]
async fn test_password_change_short_password_sends_nothing() {
    let h = harness();
    let mut form = first_login(&h, false).await;
    fill_dialog(&mut form, "temporal1", "corta", "corta");

    let outcome = form.submit_password_change(&h.portal).await;

    assert_eq!(
        outcome,
        ResetOutcome::Invalid(ema::forms::ValidationError::NewPasswordTooShort)
    );
    let dialog = form.password_reset().expect("dialog stays open");
    assert_eq!(
        dialog.error().map(|e| e.to_string()).as_deref(),
        Some("new password must be at least 8 characters")
    );
    assert!(h.api.update_calls().is_empty());
}

#[tokio::test]
async fn test_password_change_rejected_alerts_and_keeps_dialog() {
    let h = harness();
    h.api.answer_update(Reply::Reject {
        status: 400,
        message: Some("La contraseña actual es incorrecta"),
    });
    let mut form = first_login(&h, false).await;
    fill_dialog(&mut form, "equivocada", "nuevaClave9", "nuevaClave9");

    let outcome = form.submit_password_change(&h.portal).await;

    assert_eq!(
        outcome,
        ResetOutcome::Rejected("La contraseña actual es incorrecta".into())
    );
    assert_eq!(
        h.notes.messages(),
        vec!["La contraseña actual es incorrecta".to_string()]
    );
    assert!(form.password_reset().is_some());
    assert_eq!(form.phase(), LoginPhase::AwaitingPasswordReset);
    h.portal
        .with_session(|s| assert!(s.state().is_pending_reset()))
        .await;
}

#[tokio::test]
async fn test_password_change_after_logout_sends_nothing() {
    let h = harness();
    let mut form = first_login(&h, false).await;
    fill_dialog(&mut form, "temporal1", "nuevaClave9", "nuevaClave9");
    h.portal.logout().await;

    let outcome = form.submit_password_change(&h.portal).await;

    assert_eq!(outcome, ResetOutcome::NoPendingSession);
    assert!(h.api.update_calls().is_empty());
}

#[tokio::test]
async fn test_close_password_reset_keeps_user_logged_in_and_pending() {
    let h = harness();
    let mut form = first_login(&h, false).await;

    form.close_password_reset();

    assert!(form.password_reset().is_none());
    assert!(h.portal.session().await.is_authenticated);
    h.portal
        .with_session(|s| assert!(s.state().is_pending_reset()))
        .await;
}

#[tokio::test]
async fn test_password_change_submitting_flag_set_only_during_request() {
    let h = harness();
    let mut form = first_login(&h, false).await;
    fill_dialog(&mut form, "temporal1", "nuevaClave9", "nuevaClave9");
    let dialog = form.password_reset().unwrap();
    let submitting = dialog.watch_submitting();
    let after = dialog.watch_submitting();
    h.api.observe_calls(move || *submitting.borrow());

    let outcome = form.submit_password_change(&h.portal).await;

    assert_eq!(outcome, ResetOutcome::Completed);
    assert_eq!(h.api.observed(), vec![true]);
    assert!(!*after.borrow());
}

#[tokio::test]
async fn test_open_password_reset_starts_blank() {
    let h = harness();
    let mut form = first_login(&h, false).await;
    fill_dialog(&mut form, "temporal1", "nuevaClave9", "");
    form.close_password_reset();

    form.open_password_reset();

    let dialog = form.password_reset().unwrap();
    assert_eq!(dialog.current(), "");
    assert_eq!(dialog.new_password(), "");
}

// =========================================================================
// Registration
// =========================================================================

#[tokio::test]
async fn test_register_valid_form_posts_parent_and_clears_fields() {
    let h = harness();
    let mut form = filled_registration();

    let outcome = form.submit(&h.portal).await;

    assert_eq!(outcome, RegisterOutcome::Registered);
    assert_eq!(
        h.api.register_calls(),
        vec![RegisterRequest {
            name: "Ana".into(),
            last_name: "López".into(),
            phone: "+50255551234".into(),
            email: "ana@ema.com".into(),
            password: "clave123".into(),
            role: Role::Parent,
        }]
    );
    assert_eq!(form.success_message(), Some("registration successful! welcome."));
    assert_eq!(form.value(RegistrationField::Email), "");
    assert!(!form.is_submitting());
    // Registering does not log anyone in.
    assert!(!h.portal.session().await.is_authenticated);
}

#[tokio::test]
async fn test_register_submitting_flag_set_only_during_request() {
    let h = harness();
    let mut form = filled_registration();
    let submitting = form.watch_submitting();
    h.api.observe_calls(move || *submitting.borrow());

    form.submit(&h.portal).await;

    assert_eq!(h.api.observed(), vec![true]);
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn test_register_prefix_without_plus_sends_nothing() {
    let h = harness();
    let mut form = filled_registration();
    form.edit(RegistrationField::Prefix, "502");

    let outcome = form.submit(&h.portal).await;

    assert_eq!(outcome, RegisterOutcome::Invalid);
    assert_eq!(
        form.error(RegistrationField::Prefix).map(|e| e.to_string()).as_deref(),
        Some("invalid prefix")
    );
    assert_eq!(form.errors().len(), 1);
    assert!(h.api.register_calls().is_empty());
}

#[tokio::test]
async fn test_register_mismatched_passwords_sends_nothing() {
    let h = harness();
    let mut form = filled_registration();
    form.edit(RegistrationField::Password, "clave123");
    form.edit(RegistrationField::ConfirmPassword, "otra123");

    let outcome = form.submit(&h.portal).await;

    assert_eq!(outcome, RegisterOutcome::Invalid);
    assert_eq!(
        form.error(RegistrationField::ConfirmPassword)
            .map(|e| e.to_string())
            .as_deref(),
        Some("passwords do not match")
    );
    assert!(h.api.register_calls().is_empty());
}

#[tokio::test]
async fn test_register_edit_clears_that_fields_error() {
    let h = harness();
    let mut form = filled_registration();
    form.edit(RegistrationField::Prefix, "502");
    form.edit(RegistrationField::Phone, "12");
    form.submit(&h.portal).await;

    form.edit(RegistrationField::Prefix, "+502");

    assert_eq!(form.error(RegistrationField::Prefix), None);
    assert!(form.error(RegistrationField::Phone).is_some());
}

#[tokio::test]
async fn test_register_email_taken_shows_exact_server_message() {
    let h = harness();
    h.api.answer_register(Reply::Reject {
        status: 409,
        message: Some("El correo ya está registrado"),
    });
    let mut form = filled_registration();

    let outcome = form.submit(&h.portal).await;

    assert_eq!(
        outcome,
        RegisterOutcome::Rejected("El correo ya está registrado".into())
    );
    assert_eq!(form.api_error(), Some("El correo ya está registrado"));
    assert_eq!(form.value(RegistrationField::Email), "ana@ema.com");
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn test_register_offline_shows_connection_error() {
    let h = harness();
    h.api.answer_register(Reply::Offline);
    let mut form = filled_registration();

    form.submit(&h.portal).await;

    assert_eq!(form.api_error(), Some(messages::CONNECTION_ERROR));
}

#[tokio::test]
async fn test_register_resubmit_clears_previous_status() {
    let h = harness();
    h.api.answer_register(Reply::Reject {
        status: 500,
        message: None,
    });
    let mut form = filled_registration();
    form.submit(&h.portal).await;
    assert_eq!(form.api_error(), Some(messages::UNKNOWN_ERROR));

    h.api.answer_register(Reply::Ok(RegisterResponse {
        success: true,
        message: None,
    }));
    form.submit(&h.portal).await;

    assert_eq!(form.api_error(), None);
    assert!(form.success_message().is_some());
}

// =========================================================================
// Restore, logout, guard
// =========================================================================

#[tokio::test]
async fn test_build_restores_remembered_session() {
    let persistent = Arc::new(MemoryStore::new());
    persistent.set(TOKEN_KEY, "jwt-token-example").unwrap();
    persistent
        .set(USER_KEY, &serde_json::to_string(&student()).unwrap())
        .unwrap();

    let h = harness_from(Portal::builder(), persistent);

    let snap = h.portal.session().await;
    assert!(snap.is_authenticated);
    assert!(!snap.loading);
    assert_eq!(snap.current_user, Some(student()));
}

#[tokio::test]
async fn test_build_with_corrupt_user_clears_storage() {
    let persistent = Arc::new(MemoryStore::new());
    persistent.set(TOKEN_KEY, "jwt-token-example").unwrap();
    persistent.set(USER_KEY, "{\"id\":").unwrap();

    let h = harness_from(Portal::builder(), persistent);

    assert!(!h.portal.session().await.is_authenticated);
    assert!(!has_credentials(&h.persistent));
}

#[tokio::test]
async fn test_logout_clears_both_scopes_and_goes_home() {
    let h = harness();
    filled_login("estudiante@ema.com", "password123", true)
        .submit(&h.portal)
        .await;
    filled_login("estudiante@ema.com", "password123", false)
        .submit(&h.portal)
        .await;

    h.portal.logout().await;
    h.portal.logout().await;

    assert!(!has_credentials(&h.persistent));
    assert!(!has_credentials(&h.session));
    assert!(!h.portal.session().await.is_authenticated);
    assert_eq!(h.nav.routes().last(), Some(&Route::Home));
}

#[tokio::test]
async fn test_guard_protected_route_while_loading_waits() {
    let h = harness_from(Portal::builder().defer_restore(), Arc::new(MemoryStore::new()));

    assert_eq!(h.portal.guard(Route::Profile).await, Access::Loading);
    assert!(h.nav.routes().is_empty());

    h.portal.restore().await;

    assert_eq!(h.portal.guard(Route::Profile).await, Access::RedirectToLogin);
}

#[tokio::test]
async fn test_guard_anonymous_on_settings_redirects_to_login() {
    let h = harness();

    let access = h.portal.guard(Route::Settings).await;

    assert_eq!(access, Access::RedirectToLogin);
    assert_eq!(h.nav.routes(), vec![Route::Login]);
}

#[tokio::test]
async fn test_guard_public_route_always_allowed() {
    let h = harness_from(Portal::builder().defer_restore(), Arc::new(MemoryStore::new()));

    assert_eq!(h.portal.guard(Route::About).await, Access::Allowed);
    assert_eq!(h.portal.guard(Route::Home).await, Access::Allowed);
}

#[tokio::test]
async fn test_guard_logged_in_user_allowed_on_profile() {
    let h = harness();
    filled_login("estudiante@ema.com", "password123", false)
        .submit(&h.portal)
        .await;

    assert_eq!(h.portal.guard(Route::Profile).await, Access::Allowed);
}

#[tokio::test]
async fn test_open_navigates_to_route() {
    let h = harness();

    h.portal.open(Route::Register);

    assert_eq!(h.nav.routes(), vec![Route::Register]);
}
