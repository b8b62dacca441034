use super::request::{OutboundRequest, LOGIN_PATH, LOGOUT_PATH};
use super::{ApiClient, ApiError};
use crate::models::{LoginData, LoginRequest};

impl ApiClient {
    /// Exchange credentials for a token and user info
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<LoginData, ApiError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.send_json(OutboundRequest::post(LOGIN_PATH).json(&body)?)
            .await
    }

    /// Invalidate the server-side session
    pub async fn end_session(&self) -> Result<(), ApiError> {
        self.send(OutboundRequest::post(LOGOUT_PATH)).await?;
        Ok(())
    }
}
