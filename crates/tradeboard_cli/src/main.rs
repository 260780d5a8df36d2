//! `tradeboard` command-line front end.
//!
//! # Usage
//!
//! ```bash
//! tradeboard dashboard 2024
//! tradeboard products 2 arroz
//! ```
//!
//! Backends are read from `TRADEBOARD_API_URL` and `TRADEBOARD_FORECAST_URL`.
//! When `TRADEBOARD_USER` and `TRADEBOARD_PASSWORD` are set the session signs
//! in first.

#![expect(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "command-line output"
)]

use std::sync::Arc;
use tradeboard_cli::{Command, USAGE, execute};
use tradeboard_core::{ClientConfig, TracingSetup};
use tradeboard_views::{NotificationLog, Session};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args).unwrap_or_else(|err| {
        eprintln!("Error: {err}\n\n{USAGE}");
        std::process::exit(2);
    });

    match TracingSetup::from_env() {
        Ok(setup) => setup.init(),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }

    let clients = ClientConfig::from_env()
        .and_then(|config| config.connect())
        .unwrap_or_else(|err| {
            eprintln!("Error: {err}");
            std::process::exit(1);
        });

    let mut session = Session::new(clients.primary.clone());
    let credentials = (
        std::env::var("TRADEBOARD_USER"),
        std::env::var("TRADEBOARD_PASSWORD"),
    );
    if let (Ok(user), Ok(password)) = credentials {
        if !session.login(&user, &password).await {
            eprintln!("Error: login failed for {user}");
            std::process::exit(1);
        }
    } else if session.check().await.is_none() {
        tracing::info!("no active session, continuing without one");
    }
    if let Some(user) = session.user() {
        println!("Signed in as {}\n", user.display_name());
    }

    let notifications = Arc::new(NotificationLog::new());
    let output = execute(
        &command,
        clients.primary.clone(),
        clients.forecast.clone(),
        notifications,
    )
    .await;
    println!("{output}");
}
