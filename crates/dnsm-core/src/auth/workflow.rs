use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use super::{AuthError, CredentialStore};
use crate::api::{ApiClient, Effect, Notice};
use crate::models::{LoginData, RememberedLogin, RememberedUser};
use crate::router::{LANDING_ROUTE, LOGIN_ROUTE};

/// Shown for every failed login, whatever the cause
const LOGIN_FAILED_MESSAGE: &str = "Login failed, please check your username and password";

const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";

/// Login/logout orchestration on top of the API pipeline and the session.
#[derive(Clone)]
pub struct Auth {
    api: ApiClient,
    credentials: Arc<dyn CredentialStore>,
}

impl Auth {
    pub fn new(api: ApiClient, credentials: Arc<dyn CredentialStore>) -> Self {
        Self { api, credentials }
    }

    /// Log in and navigate to the landing route.
    ///
    /// With `remember` the credentials are kept for pre-filling the next
    /// login; without it any remembered credentials are forgotten.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        remember: bool,
    ) -> Result<LoginData, AuthError> {
        match self.try_login(username, password).await {
            Ok(data) => {
                self.remember(username, password, remember).await;
                self.api.notify(Notice::success(LOGIN_SUCCESS_MESSAGE));
                self.api.schedule(Effect::Navigate {
                    to: LANDING_ROUTE.to_string(),
                    after: Duration::ZERO,
                });
                info!(username = %username, "Login complete");
                Ok(data)
            }
            Err(e) => {
                error!(username = %username, error = %e, "Login failed");
                self.api.notify(Notice::error(LOGIN_FAILED_MESSAGE));
                Err(e)
            }
        }
    }

    async fn try_login(&self, username: &str, password: &str) -> Result<LoginData, AuthError> {
        let data = self.api.authenticate(username, password).await?;
        self.api
            .session()
            .write()
            .await
            .set_authenticated(data.token.clone(), data.user_info.clone())?;
        Ok(data)
    }

    async fn remember(&self, username: &str, password: &str, remember: bool) {
        let session = self.api.session().read().await;
        let store = session.store();
        let previous = store.get_remembered_user().map(|u| u.username);

        if remember {
            if let Err(e) = self.credentials.store(username, password) {
                warn!(error = %e, "Failed to remember password");
                return;
            }
            let user = RememberedUser {
                username: username.to_string(),
            };
            if let Err(e) = store.set_remembered_user(&user) {
                warn!(error = %e, "Failed to update remembered login");
            }
            if let Some(previous) = previous.filter(|p| p != username) {
                self.forget_password(&previous);
            }
        } else {
            if let Some(previous) = previous {
                self.forget_password(&previous);
            }
            if let Err(e) = store.remove_remembered_user() {
                warn!(error = %e, "Failed to update remembered login");
            }
        }
    }

    fn forget_password(&self, username: &str) {
        if let Err(e) = self.credentials.delete(username) {
            warn!(username = %username, error = %e, "Failed to forget password");
        }
    }

    /// Log out remotely (best-effort), then locally, then go to the login route.
    pub async fn logout(&self) {
        if let Err(e) = self.api.end_session().await {
            warn!(error = %e, "Remote logout failed, continuing with local logout");
        }
        self.api.session().write().await.logout();
        self.api.schedule(Effect::Navigate {
            to: LOGIN_ROUTE.to_string(),
            after: Duration::ZERO,
        });
        info!("Logout complete");
    }

    pub async fn is_logged_in(&self) -> bool {
        self.api.session().read().await.is_authenticated()
    }

    /// Credentials saved by an earlier `login(.., remember = true)`.
    /// `None` unless both the username and its keychain password are there.
    pub async fn remembered_login(&self) -> Option<RememberedLogin> {
        let username = self
            .api
            .session()
            .read()
            .await
            .store()
            .get_remembered_user()?
            .username;
        match self.credentials.get_password(&username) {
            Ok(Some(password)) => Some(RememberedLogin { username, password }),
            Ok(None) => {
                debug!(username = %username, "No remembered password in keychain");
                None
            }
            Err(e) => {
                warn!(username = %username, error = %e, "Failed to read remembered password");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::testing::Harness;
    use crate::api::request::{LOGIN_PATH, LOGOUT_PATH};
    use crate::api::response::Exchange;
    use crate::api::ApiError;
    use crate::auth::MemoryCredentials;
    use crate::models::UserInfo;

    const LOGIN_OK: &str =
        r#"{"code":200,"data":{"token":"T","userInfo":{"id":1,"username":"a"}},"message":"ok"}"#;

    #[tokio::test]
    async fn test_login_success() {
        let mut harness = Harness::new();
        harness.transport.reply(200, LOGIN_OK);
        let auth = Auth::new(harness.client.clone(), Arc::new(MemoryCredentials::new()));

        let data = auth.login("a", "pw", false).await.unwrap();
        assert_eq!(data.token, "T");

        let session = harness.client.session().read().await;
        assert_eq!(session.token(), Some("T"));
        assert_eq!(
            session.user_info(),
            Some(&UserInfo {
                id: 1,
                username: "a".to_string()
            })
        );
        drop(session);

        assert_eq!(harness.notifier.notices(), vec![Notice::success("Login successful")]);
        assert_eq!(
            harness.drain_effects(),
            vec![Effect::Navigate {
                to: "/admin/dns".to_string(),
                after: Duration::ZERO
            }]
        );

        let seen = harness.transport.seen();
        assert_eq!(seen[0].path, LOGIN_PATH);
        assert_eq!(seen[0].body.as_ref().unwrap()["username"], "a");
        assert_eq!(seen[0].body.as_ref().unwrap()["password"], "pw");
    }

    #[tokio::test]
    async fn test_login_transport_failure() {
        let mut harness = Harness::new();
        harness.transport.push(Exchange::Transport("refused".to_string()));
        let auth = Auth::new(harness.client.clone(), Arc::new(MemoryCredentials::new()));

        let result = auth.login("a", "pw", true).await;
        assert!(matches!(result, Err(AuthError::Api(ApiError::Transport(_)))));
        assert!(!auth.is_logged_in().await);
        assert_eq!(harness.notifier.notices(), vec![Notice::error(LOGIN_FAILED_MESSAGE)]);
        assert!(harness.drain_effects().is_empty());
        assert_eq!(auth.remembered_login().await, None);
    }

    #[tokio::test]
    async fn test_login_business_error_single_notice() {
        let harness = Harness::new();
        harness
            .transport
            .reply(200, r#"{"code":400,"data":null,"message":"bad password"}"#);
        let auth = Auth::new(harness.client.clone(), Arc::new(MemoryCredentials::new()));

        assert!(auth.login("a", "wrong", false).await.is_err());
        // Only the workflow's own message; the pipeline stays quiet for login
        assert_eq!(harness.notifier.notices().len(), 1);
    }

    #[tokio::test]
    async fn test_login_remember_round_trip() {
        let harness = Harness::new();
        harness.transport.reply(200, LOGIN_OK);
        harness.transport.reply(200, LOGIN_OK);
        let auth = Auth::new(harness.client.clone(), Arc::new(MemoryCredentials::new()));

        auth.login("a", "pw", true).await.unwrap();
        assert_eq!(
            auth.remembered_login().await,
            Some(RememberedLogin {
                username: "a".to_string(),
                password: "pw".to_string()
            })
        );

        auth.login("a", "pw", false).await.unwrap();
        assert_eq!(auth.remembered_login().await, None);
    }

    #[tokio::test]
    async fn test_remembered_password_stays_out_of_storage() {
        let harness = Harness::new();
        harness.transport.reply(200, LOGIN_OK);
        let credentials = Arc::new(MemoryCredentials::new());
        let auth = Auth::new(harness.client.clone(), credentials.clone());

        auth.login("a", "secret", true).await.unwrap();
        assert_eq!(credentials.get_password("a").unwrap().as_deref(), Some("secret"));
        assert_eq!(
            harness.store.get_remembered_user(),
            Some(RememberedUser {
                username: "a".to_string()
            })
        );
        assert_eq!(harness.store.get_token().as_deref(), Some("T"));
    }

    #[tokio::test]
    async fn test_remembering_another_user_replaces_previous() {
        let harness = Harness::new();
        harness.transport.reply(200, LOGIN_OK);
        harness.transport.reply(200, LOGIN_OK);
        let credentials = Arc::new(MemoryCredentials::new());
        let auth = Auth::new(harness.client.clone(), credentials.clone());

        auth.login("a", "pw-a", true).await.unwrap();
        auth.login("b", "pw-b", true).await.unwrap();

        assert_eq!(credentials.get_password("a").unwrap(), None);
        assert_eq!(credentials.len(), 1);
        assert_eq!(
            auth.remembered_login().await,
            Some(RememberedLogin {
                username: "b".to_string(),
                password: "pw-b".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_login_without_remember_forgets_password() {
        let harness = Harness::new();
        harness.transport.reply(200, LOGIN_OK);
        harness.transport.reply(200, LOGIN_OK);
        let credentials = Arc::new(MemoryCredentials::new());
        let auth = Auth::new(harness.client.clone(), credentials.clone());

        auth.login("a", "pw", true).await.unwrap();
        auth.login("a", "pw", false).await.unwrap();
        assert!(credentials.is_empty());
        assert_eq!(harness.store.get_remembered_user(), None);
    }

    #[tokio::test]
    async fn test_remembered_user_without_password_is_none() {
        let harness = Harness::new();
        harness
            .store
            .set_remembered_user(&RememberedUser {
                username: "a".to_string(),
            })
            .unwrap();
        let auth = Auth::new(harness.client.clone(), Arc::new(MemoryCredentials::new()));
        assert_eq!(auth.remembered_login().await, None);
    }

    #[tokio::test]
    async fn test_logout_proceeds_when_remote_fails() {
        let mut harness = Harness::authenticated().await;
        harness.transport.push(Exchange::Transport("refused".to_string()));
        let auth = Auth::new(harness.client.clone(), Arc::new(MemoryCredentials::new()));

        auth.logout().await;
        assert!(!auth.is_logged_in().await);
        assert_eq!(harness.store.get_token(), None);
        assert_eq!(harness.transport.seen()[0].path, LOGOUT_PATH);
        assert_eq!(harness.transport.seen()[0].bearer.as_deref(), Some("T"));
        assert_eq!(
            harness.drain_effects(),
            vec![Effect::Navigate {
                to: "/".to_string(),
                after: Duration::ZERO
            }]
        );
    }
}
