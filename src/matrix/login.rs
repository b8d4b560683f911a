//! Matrix client creation and login.
//!
//! The first start logs in with the account password and saves the session.
//! Later starts restore the saved session, so the bot keeps a single device.
//! Rooms are not end-to-end encrypted: the bot only reads commands and posts
//! images, so no cross-signing or key backup is set up.

use log::{debug, info};
use matrix_sdk::{Client, ruma::OwnedUserId};

use crate::matrix::{UserCredentials, session::SessionStore};

const DEVICE_DISPLAY_NAME: &str = "pubgbot";

/// Builds a logged-in client.
///
/// # Arguments
///
/// * `credentials` - Account used for the first login
/// * `store` - Session directory holding the saved login and the SDK state
///
/// # Errors
///
/// Returns an error if the user id is invalid, the homeserver can't be
/// reached, the login is refused or the session can't be saved.
pub async fn connect(
    credentials: &UserCredentials,
    store: &SessionStore,
) -> Result<Client, anyhow::Error> {
    let user_id: OwnedUserId = credentials.user_id.clone().try_into()?;

    let client = Client::builder()
        .server_name(user_id.server_name())
        .sqlite_store(store.sqlite_path(), None)
        .build()
        .await?;
    debug!("matrix client created for {}", user_id.server_name());

    match store.login().await {
        Some(login) => {
            info!("restoring matrix session of {}", login.meta.user_id);
            client.restore_session(login).await?;
        }
        None => {
            info!("logging in as {}", user_id);
            client
                .matrix_auth()
                .login_username(&user_id, &credentials.password)
                .initial_device_display_name(DEVICE_DISPLAY_NAME)
                .send()
                .await?;

            let login = client
                .matrix_auth()
                .session()
                .ok_or_else(|| anyhow::anyhow!("no matrix session after login"))?;
            store.save_login(&login).await?;
        }
    }

    info!("matrix client ready");
    Ok(client)
}
