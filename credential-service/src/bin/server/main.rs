use std::sync::Arc;

use credential_service::bootstrap::build_auth_service;
use credential_service::config::Config;
use credential_service::credentials::errors::AuthError;
use credential_service::credentials::models::AuthOutcome;
use credential_service::credentials::models::LoginCommand;
use credential_service::credentials::models::RegisterCommand;
use credential_service::credentials::ports::AuthServicePort;
use credential_service::repositories::InMemoryUserRepository;
use http::StatusCode;
use serde::Deserialize;
use serde_json::json;
use serde_json::Value;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// One request per input line, tagged by `action`.
///
/// `{"action":"register","username":"alice","email":"alice@example.com","password":"Passw0rd"}`
/// `{"action":"login","username":"alice","password":"Passw0rd"}`
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
enum Request {
    Register(RegisterCommand),
    Login(LoginCommand),
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // stdout carries responses, logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "credential_service=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(
        service = "credential-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    let user_repository = Arc::new(InMemoryUserRepository::new());
    let auth_service = build_auth_service(&config, Arc::clone(&user_repository))?;

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            signal.cancel();
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    tracing::info!(input = "stdin", "Accepting requests");

    loop {
        let line = tokio::select! {
            _ = shutdown.cancelled() => break,
            line = lines.next_line() => match line? {
                Some(line) => line,
                None => break,
            },
        };
        if line.trim().is_empty() {
            continue;
        }

        let result = match serde_json::from_str::<Request>(&line) {
            Ok(Request::Register(command)) => auth_service.register(command, &shutdown).await,
            Ok(Request::Login(command)) => auth_service.login(command, &shutdown).await,
            Err(e) => {
                tracing::warn!(error = %e, "Malformed request");
                write_line(&mut stdout, &malformed_request()).await?;
                continue;
            }
        };

        let response = match result {
            Ok(outcome) => render(&outcome),
            Err(AuthError::Cancelled) => break,
            // Already logged by the service
            Err(_) => internal_error(),
        };
        write_line(&mut stdout, &response).await?;
    }

    tracing::info!(users = user_repository.len().await, "Service stopped");

    Ok(())
}

fn render(outcome: &AuthOutcome) -> Value {
    json!({
        "status": outcome.status_code().as_u16(),
        "body": outcome,
    })
}

fn malformed_request() -> Value {
    json!({
        "status": StatusCode::BAD_REQUEST.as_u16(),
        "body": { "message": "Malformed request." },
    })
}

fn internal_error() -> Value {
    json!({
        "status": StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        "body": { "message": "An unexpected error occurred. Please try again later." },
    })
}

async fn write_line(stdout: &mut tokio::io::Stdout, value: &Value) -> Result<(), anyhow::Error> {
    let mut payload = serde_json::to_vec(value)?;
    payload.push(b'\n');
    stdout.write_all(&payload).await?;
    stdout.flush().await?;
    Ok(())
}
