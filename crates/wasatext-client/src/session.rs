use tracing::{debug, info};

use wasatext_store::SESSION_KEY;
use wasatext_types::api::LoginRequest;
use wasatext_types::models::Session;

use crate::client::{ApiClient, ApiRequest};
use crate::error::{ApiError, ApiResult};

/// Key the logged-in username is stored under, next to the session id.
pub const USERNAME_KEY: &str = "username";

impl ApiClient {
    /// POST /session. The backend creates the user on first login. On success
    /// the session id is written to the store so later calls carry it.
    pub async fn login(&self, name: &str) -> ApiResult<Option<Session>> {
        let body = LoginRequest {
            name: name.to_string(),
        };
        let session: Option<Session> = self.send(ApiRequest::post(["session"]).json(&body)?).await?;

        if let Some(session) = &session {
            self.store()
                .set(SESSION_KEY, &session.session_id)
                .map_err(ApiError::Store)?;
            // StaticToken only holds the session id.
            if let Err(e) = self.store().set(USERNAME_KEY, &session.username) {
                debug!("Username not stored: {}", e);
            }
            info!("Logged in as {}", session.username);
        }

        Ok(session)
    }

    /// Forget the local session. The backend has no logout route.
    pub fn logout(&self) -> ApiResult<()> {
        self.store().remove(SESSION_KEY).map_err(ApiError::Store)?;
        self.store().remove(USERNAME_KEY).map_err(ApiError::Store)?;
        Ok(())
    }

    /// Username saved by the last [`login`](Self::login), if the store keeps it.
    pub fn current_username(&self) -> Option<String> {
        self.store().get(USERNAME_KEY)
    }
}
