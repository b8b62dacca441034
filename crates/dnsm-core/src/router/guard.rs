use tracing::{debug, info};

use super::routes::{normalize, resolve, LOGIN_ROUTE, LOGOUT_ROUTE};
use crate::api::ApiClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(String),
}

/// Result of one guard evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Display title of the target route, applied whatever the decision
    pub title: String,
    pub decision: Decision,
}

/// Gate evaluated before every route transition. Keeps no state between
/// evaluations.
#[derive(Clone)]
pub struct NavigationGuard {
    api: ApiClient,
}

impl NavigationGuard {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn evaluate(&self, path: &str) -> Verdict {
        let path = normalize(path);
        let route = resolve(&path);
        let title = route.display_title().to_string();

        if path == LOGOUT_ROUTE {
            self.api.session().write().await.logout();
            // Best-effort: the local session is already gone
            if let Err(e) = self.api.end_session().await {
                debug!(error = %e, "Remote logout failed during navigation");
            }
            info!("Logged out via navigation");
            return Verdict {
                title,
                decision: Decision::Redirect(LOGIN_ROUTE.to_string()),
            };
        }

        if !route.requires_auth() {
            return Verdict {
                title,
                decision: Decision::Allow,
            };
        }

        if !self.api.session().read().await.is_authenticated() {
            debug!(path = %path, "Anonymous navigation to protected route");
            return Verdict {
                title,
                decision: Decision::Redirect(LOGIN_ROUTE.to_string()),
            };
        }

        Verdict {
            title,
            decision: Decision::Allow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::testing::Harness;
    use crate::api::request::LOGOUT_PATH;
    use crate::api::response::Exchange;

    #[tokio::test]
    async fn test_anonymous_protected_route_redirects() {
        let harness = Harness::new();
        let guard = NavigationGuard::new(harness.client.clone());

        let verdict = guard.evaluate("/admin/dns").await;
        assert_eq!(verdict.decision, Decision::Redirect("/".to_string()));
        assert_eq!(verdict.title, "Domain list");
    }

    #[tokio::test]
    async fn test_authenticated_protected_route_allowed() {
        let harness = Harness::authenticated().await;
        let guard = NavigationGuard::new(harness.client.clone());

        assert_eq!(guard.evaluate("/admin/dns").await.decision, Decision::Allow);
    }

    #[tokio::test]
    async fn test_public_routes_always_allowed() {
        let harness = Harness::new();
        let guard = NavigationGuard::new(harness.client.clone());

        for path in ["/", "/403", "/anything/else"] {
            assert_eq!(guard.evaluate(path).await.decision, Decision::Allow, "{}", path);
        }
    }

    #[tokio::test]
    async fn test_logout_route_tears_down_session() {
        let mut harness = Harness::authenticated().await;
        harness.transport.reply(200, r#"{"code":200,"data":null}"#);
        let guard = NavigationGuard::new(harness.client.clone());

        let verdict = guard.evaluate("/logout").await;
        assert_eq!(verdict.decision, Decision::Redirect("/".to_string()));
        assert!(!harness.client.session().read().await.is_authenticated());
        assert_eq!(harness.store.get_token(), None);

        // Remote logout was attempted without a credential
        let seen = harness.transport.seen();
        assert_eq!(seen[0].path, LOGOUT_PATH);
        assert_eq!(seen[0].bearer, None);
        assert!(harness.drain_effects().is_empty());
    }

    #[tokio::test]
    async fn test_logout_route_ignores_remote_failure() {
        let harness = Harness::new();
        harness.transport.push(Exchange::Transport("refused".to_string()));
        let guard = NavigationGuard::new(harness.client.clone());

        let verdict = guard.evaluate("/logout").await;
        assert_eq!(verdict.decision, Decision::Redirect("/".to_string()));
        assert!(harness.notifier.notices().is_empty());
    }
}
