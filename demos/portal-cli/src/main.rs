//! A small command-line driver for the portal core.
//!
//! ```text
//! portal-cli status
//! portal-cli login <email> <password> [--remember]
//! portal-cli logout
//! portal-cli register <first> <last> <prefix> <phone> <email> <password>
//! portal-cli open <path>
//! ```
//!
//! Configuration comes from the environment (`EMA_API_URL`,
//! `EMA_STORAGE_DIR`, ...). Without `EMA_STORAGE_DIR` nothing survives
//! between runs. Set `RUST_LOG` to change verbosity.

use std::io::{self, BufRead, Write};

use ema::prelude::*;
use tracing_subscriber::EnvFilter;

type CliPortal = Portal<HttpAuthApi, LogNavigator, LogNotifier>;

const USAGE: &str = "usage: portal-cli <status | login <email> <password> [--remember] | logout | register <first> <last> <prefix> <phone> <email> <password> | open <path>>";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = PortalConfig::from_env()?;
    let portal = PortalBuilder::from_config(&config)?.build_http(LogNavigator, LogNotifier)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["status"] | [] => status(&portal).await,
        ["login", email, password, rest @ ..] => {
            let remember = rest.contains(&"--remember");
            login(&portal, email, password, remember).await?;
        }
        ["logout"] => portal.logout().await,
        ["register", first, last, prefix, phone, email, password] => {
            register(&portal, [first, last, prefix, phone, email, password]).await;
        }
        ["open", path] => match Route::from_path(path) {
            Some(route) => match portal.guard(route).await {
                Access::Allowed => portal.open(route),
                access => eprintln!("{path}: {access:?}"),
            },
            None => eprintln!("unknown route {path}"),
        },
        _ => eprintln!("{USAGE}"),
    }

    Ok(())
}

async fn status(portal: &CliPortal) {
    let snapshot = portal.session().await;
    match snapshot.current_user {
        Some(user) => println!("logged in as {} ({})", user.display_name(), user.role),
        None => println!("not logged in"),
    }
}

async fn login(
    portal: &CliPortal,
    email: &str,
    password: &str,
    remember: bool,
) -> io::Result<()> {
    let mut form = LoginForm::new();
    form.set_email(email);
    form.set_password(password);
    form.set_remember_me(remember);

    match form.submit(portal).await {
        LoginPhase::AwaitingPasswordReset => change_password(portal, &mut form).await?,
        LoginPhase::Authenticated => status(portal).await,
        _ => eprintln!("{}", form.error().unwrap_or("login failed")),
    }
    Ok(())
}

/// Keeps prompting until the new password is accepted or input ends.
async fn change_password(portal: &CliPortal, form: &mut LoginForm) -> io::Result<()> {
    println!("first login: choose a new password");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let Some(dialog) = form.password_reset_mut() else {
            return Ok(());
        };
        for (label, slot) in [("current", 0), ("new", 1), ("confirm", 2)] {
            print!("{label} password: ");
            io::stdout().flush()?;
            let Some(line) = lines.next() else {
                form.close_password_reset();
                return Ok(());
            };
            let line = line?;
            match slot {
                0 => dialog.set_current(line),
                1 => dialog.set_new(line),
                _ => dialog.set_confirm(line),
            }
        }

        match form.submit_password_change(portal).await {
            ResetOutcome::Completed | ResetOutcome::NoPendingSession => return Ok(()),
            ResetOutcome::Invalid(e) => eprintln!("{e}"),
            ResetOutcome::Rejected(message) => eprintln!("{message}"),
        }
    }
}

async fn register(portal: &CliPortal, values: [&&str; 6]) {
    use RegistrationField as F;

    let mut form = RegistrationForm::new();
    let fields = [F::FirstName, F::LastName, F::Prefix, F::Phone, F::Email, F::Password];
    for (field, value) in fields.into_iter().zip(values) {
        form.edit(field, *value);
    }
    form.edit(F::ConfirmPassword, *values[5]);

    match form.submit(portal).await {
        RegisterOutcome::Registered => {
            println!("{}", form.success_message().unwrap_or_default());
        }
        RegisterOutcome::Invalid => {
            for (field, error) in form.errors() {
                eprintln!("{field:?}: {error}");
            }
        }
        RegisterOutcome::Rejected(message) => eprintln!("{message}"),
    }
}
