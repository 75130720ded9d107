//! Typed Rust client for sending SMS through the Movider HTTP API.
//!
//! The crate is split into a domain layer of validated types (recipients,
//! text, allow-list), a transport layer for the form-encoded wire format, and a
//! small client layer that runs one HTTP exchange per send.
//!
//! ```rust,no_run
//! use movider::{Credentials, SendOutcome, Sender};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), movider::MoviderError> {
//!     let sender = Sender::new(Credentials::new("key", "secret"), ["639123456789"]);
//!     match sender.send_message(["09123456789"], "hello").await? {
//!         SendOutcome::Sent(resp) => println!("balance: {}", resp.remaining_balance),
//!         SendOutcome::Skipped { recipient } => println!("not sent to {recipient}"),
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod domain;
mod transport;

pub use client::{MOVIDER_API_URL, MoviderError, SEND_MESSAGE_PATH, Sender, SenderBuilder};
pub use config::{ConfigError, SenderConfig};
pub use domain::{
    AllowList, Credentials, MAX_PHONE_LENGTH, PhoneParseError, ProviderError, SendMessageRequest,
    SendMessageResponse, SendOutcome, ValidationError, normalize_phone_number,
    normalize_phone_numbers,
};
