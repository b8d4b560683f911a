//! Matrix protocol integration for the bot.
//!
//! The module is structured around [`MatrixClient`], which coordinates:
//! - **Login**: password login on first start, session restore afterwards
//! - **Session**: the saved login and sync token on disk
//! - **Sync**: auto-join, text messages and reactions delivered to callbacks
//!
//! # Examples
//!
//! ```no_run
//! use pubgbot::matrix::{MatrixClient, UserCredentials};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let credentials = UserCredentials {
//!     user_id: "@pubg:example.com".to_string(),
//!     password: "password".to_string(),
//! };
//!
//! let client = MatrixClient::new(&credentials, "./data/session").await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod login;
mod session;
mod sync;

pub use crate::matrix::client::MatrixClient;
pub use crate::matrix::sync::{IncomingMessage, IncomingReaction};

/// User credentials for a Matrix account
#[derive(Debug, Clone)]
pub struct UserCredentials {
    /// User ID of the matrix account
    pub user_id: String,
    /// Password of the matrix account
    pub password: String,
}
