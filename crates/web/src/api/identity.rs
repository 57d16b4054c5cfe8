// =============================================================================
// Lumen Web - Hosted Identity Client
// =============================================================================
// Email/password and Google sign-in against the Identity Toolkit REST API.
// The signed-in session is persisted in LocalStorage and fanned out to
// subscribers through a SessionHub.
// =============================================================================

use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};

use super::ApiClient;
use crate::auth::{popup, AuthError, IdentityProvider, Session, SessionHub, SignIn, Subscription};
use crate::config::HostedConfig;

/// LocalStorage key for the persisted session.
pub const SESSION_KEY: &str = "lumen.session";

/// What survives a page reload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct StoredSession {
    session: Session,
    id_token: String,
    refresh_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdpRequest<'a> {
    post_body: String,
    request_uri: &'a str,
    return_secure_token: bool,
    return_idp_credential: bool,
}

/// Shared shape of `accounts:signUp`, `accounts:signInWithPassword` and
/// `accounts:signInWithIdp` responses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    id_token: String,
    #[serde(default)]
    refresh_token: String,
}

impl AccountResponse {
    fn into_stored(self) -> StoredSession {
        StoredSession {
            session: Session {
                uid: self.local_id,
                email: self.email.filter(|e| !e.is_empty()),
                display_name: self.display_name.filter(|n| !n.is_empty()),
            },
            id_token: self.id_token,
            refresh_token: self.refresh_token,
        }
    }
}

/// Browser-side identity provider.
pub struct HostedIdentity {
    client: ApiClient,
    config: HostedConfig,
    hub: SessionHub,
}

impl HostedIdentity {
    pub fn new(config: HostedConfig) -> Self {
        Self {
            client: ApiClient::new(config.identity_url.clone()),
            config,
            hub: SessionHub::new(),
        }
    }

    /// Emit the persisted session (or its absence). This is the first
    /// session event after mount.
    pub fn restore(&self) {
        let stored = LocalStorage::get::<StoredSession>(SESSION_KEY).ok();
        match &stored {
            Some(s) => log::info!("Restored session for uid {}", s.session.uid),
            None => log::debug!("No stored session"),
        }
        self.hub.emit(stored.map(|s| s.session));
    }

    fn ensure_configured(&self) -> Result<(), AuthError> {
        if self.config.is_configured() {
            Ok(())
        } else {
            Err(AuthError::Configuration(
                "missing LUMEN_FIREBASE_API_KEY or LUMEN_FIREBASE_PROJECT_ID".to_string(),
            ))
        }
    }

    fn endpoint(&self, method: &str) -> String {
        format!(
            "/accounts:{}?key={}",
            method,
            urlencoding::encode(&self.config.api_key)
        )
    }

    async fn password_call(
        &self,
        method: &str,
        email: &str,
        password: &str,
    ) -> Result<SignIn, AuthError> {
        self.ensure_configured()?;
        let body = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        let response: AccountResponse = self.client.post(&self.endpoint(method), &body).await?;
        self.establish(response)
    }

    /// Persist the new session, then announce it.
    fn establish(&self, response: AccountResponse) -> Result<SignIn, AuthError> {
        let stored = response.into_stored();
        LocalStorage::set(SESSION_KEY, &stored).map_err(|e| AuthError::Storage(e.to_string()))?;

        self.hub.emit(Some(stored.session.clone()));
        Ok(SignIn {
            session: stored.session,
            id_token: stored.id_token,
        })
    }
}

impl IdentityProvider for HostedIdentity {
    async fn create_account(&self, email: &str, password: &str) -> Result<SignIn, AuthError> {
        self.password_call("signUp", email, password).await
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignIn, AuthError> {
        self.password_call("signInWithPassword", email, password).await
    }

    async fn sign_in_with_google(&self) -> Result<SignIn, AuthError> {
        self.ensure_configured()?;
        if self.config.google_client_id.is_empty() {
            return Err(AuthError::Configuration(
                "missing LUMEN_GOOGLE_CLIENT_ID".to_string(),
            ));
        }

        let google_token = popup::authorize_google(&self.config.google_client_id).await?;
        let request_uri = crate::utils::origin().unwrap_or_default();
        let body = IdpRequest {
            post_body: idp_post_body(&google_token),
            request_uri: &request_uri,
            return_secure_token: true,
            return_idp_credential: true,
        };
        let response: AccountResponse = self
            .client
            .post(&self.endpoint("signInWithIdp"), &body)
            .await?;
        self.establish(response)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        LocalStorage::raw()
            .remove_item(SESSION_KEY)
            .map_err(|e| AuthError::Storage(crate::utils::js_error_message(&e)))?;

        log::info!("Signed out");
        self.hub.emit(None);
        Ok(())
    }

    fn subscribe<F>(&self, on_change: F) -> Subscription
    where
        F: Fn(Option<&Session>) + Send + Sync + 'static,
    {
        self.hub.subscribe(on_change)
    }
}

fn idp_post_body(google_id_token: &str) -> String {
    format!(
        "id_token={}&providerId=google.com",
        urlencoding::encode(google_id_token)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_response_parses_sign_up() {
        let body = r#"{
            "kind": "identitytoolkit#SignupNewUserResponse",
            "idToken": "id-1",
            "email": "ada@example.com",
            "refreshToken": "refresh-1",
            "expiresIn": "3600",
            "localId": "u1"
        }"#;
        let stored = serde_json::from_str::<AccountResponse>(body)
            .unwrap()
            .into_stored();
        assert_eq!(stored.session.uid, "u1");
        assert_eq!(stored.session.email.as_deref(), Some("ada@example.com"));
        assert_eq!(stored.session.display_name, None);
        assert_eq!(stored.id_token, "id-1");
    }

    #[test]
    fn test_empty_display_name_is_absent() {
        let body = r#"{"localId":"g1","displayName":"","idToken":"t"}"#;
        let stored = serde_json::from_str::<AccountResponse>(body)
            .unwrap()
            .into_stored();
        assert_eq!(stored.session.display_name, None);
        assert_eq!(stored.refresh_token, "");
    }

    #[test]
    fn test_password_request_shape() {
        let body = PasswordRequest {
            email: "a@b.co",
            password: "pw",
            return_secure_token: true,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["returnSecureToken"], true);
        assert_eq!(json["email"], "a@b.co");
    }

    #[test]
    fn test_idp_post_body_encodes_token() {
        assert_eq!(
            idp_post_body("a.b+c"),
            "id_token=a.b%2Bc&providerId=google.com"
        );
    }

    #[test]
    fn test_stored_session_roundtrip_through_json() {
        let stored = StoredSession {
            session: Session {
                uid: "u1".to_string(),
                email: Some("a@b.co".to_string()),
                display_name: None,
            },
            id_token: "t".to_string(),
            refresh_token: "r".to_string(),
        };
        let text = serde_json::to_string(&stored).unwrap();
        assert_eq!(serde_json::from_str::<StoredSession>(&text).unwrap(), stored);
    }
}
