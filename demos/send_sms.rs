use std::io;

use movider::{SendOutcome, SenderConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let recipient = std::env::var("RECIPIENT").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "RECIPIENT environment variable is required",
        )
    })?;

    let sender = SenderConfig::from_env()?.into_sender()?;

    match sender.send_message([recipient], "TEST 1234 QWERTY").await {
        Ok(SendOutcome::Sent(response)) => tracing::info!(
            remaining_balance = response.remaining_balance,
            total_sms = response.total_sms,
            "message sent"
        ),
        Ok(SendOutcome::Skipped { recipient }) => {
            tracing::info!(%recipient, "message skipped by allow-list")
        }
        Err(err) => tracing::error!(error = %err, "unable to send message"),
    }

    Ok(())
}
