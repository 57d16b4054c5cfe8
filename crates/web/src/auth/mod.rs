// =============================================================================
// Lumen Web - Auth Bridge
// =============================================================================
// Table of Contents:
// 1. Submodules
// 2. Session & Profile Types
// 3. Error Types
// 4. Provider Traits
// 5. AuthBridge
// =============================================================================
//
// The bridge delegates every identity and storage operation to the hosted
// services behind two traits. The browser implementations live in
// `crate::api`; tests substitute in-memory fakes.

pub mod flows;
pub mod popup;
pub mod profile;
pub mod session;

pub use flows::{FormStatus, LoginForm, SignupForm, HOME_ROUTE, PASSWORD_MISMATCH};
pub use profile::{split_display_name, PasswordRequirements, Requirement};
pub use session::{SessionHub, Subscription};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::ApiError;

// -----------------------------------------------------------------------------
// 2. Session & Profile Types
// -----------------------------------------------------------------------------

/// Identity mirrored from the hosted provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

/// A completed sign-in: the session plus the bearer token that authorizes
/// the follow-up profile write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignIn {
    pub session: Session,
    pub id_token: String,
}

/// Names captured by the signup form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileName {
    pub first_name: String,
    pub last_name: String,
}

/// Document written to `users/{uid}`. Write-only from the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    /// ISO-8601 UTC timestamp with millisecond precision.
    pub created_at: String,
}

/// How a profile document is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteMode {
    /// Overwrite the whole document.
    Replace,
    /// Update only the fields present in the record.
    Merge,
}

// -----------------------------------------------------------------------------
// 3. Error Types
// -----------------------------------------------------------------------------

/// Errors surfaced by the auth flows.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    /// Caught locally before any provider call.
    #[error("{0}")]
    Validation(String),

    /// Message reported by the hosted provider, shown verbatim.
    #[error("{0}")]
    Provider(String),

    #[error("Popup closed by user")]
    PopupClosed,

    /// The account exists but its profile document could not be written.
    #[error("Your account was created, but saving your profile failed: {0}")]
    StorageWrite(String),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Sign-in is not configured: {0}")]
    Configuration(String),
}

impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        AuthError::Provider(err.provider_message())
    }
}

// -----------------------------------------------------------------------------
// 4. Provider Traits
// -----------------------------------------------------------------------------

/// Hosted identity service.
///
/// Implementations must emit on their session stream after every
/// successful sign-in and sign-out, and only after the operation succeeded.
#[allow(async_fn_in_trait)]
pub trait IdentityProvider {
    async fn create_account(&self, email: &str, password: &str) -> Result<SignIn, AuthError>;

    async fn sign_in_with_password(&self, email: &str, password: &str)
        -> Result<SignIn, AuthError>;

    /// Interactive OAuth popup.
    async fn sign_in_with_google(&self) -> Result<SignIn, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Register for session changes. The callback receives the current
    /// value immediately if one is known.
    fn subscribe<F>(&self, on_change: F) -> Subscription
    where
        F: Fn(Option<&Session>) + Send + Sync + 'static;
}

/// Hosted document store holding user profiles.
#[allow(async_fn_in_trait)]
pub trait ProfileStore {
    async fn write_profile(
        &self,
        id_token: &str,
        uid: &str,
        record: &UserProfileRecord,
        mode: WriteMode,
    ) -> Result<(), ApiError>;
}

// -----------------------------------------------------------------------------
// 5. AuthBridge
// -----------------------------------------------------------------------------

/// Translates form actions into provider calls and profile writes.
pub struct AuthBridge<I, S> {
    identity: I,
    profiles: S,
}

impl<I: IdentityProvider, S: ProfileStore> AuthBridge<I, S> {
    pub fn new(identity: I, profiles: S) -> Self {
        Self { identity, profiles }
    }

    pub fn identity(&self) -> &I {
        &self.identity
    }

    pub fn profiles(&self) -> &S {
        &self.profiles
    }

    /// Create an account and write its profile document.
    ///
    /// A failed profile write is reported as `StorageWrite`; the account
    /// itself is kept (there is no compensating delete).
    pub async fn sign_up_with_password(
        &self,
        email: &str,
        password: &str,
        name: &ProfileName,
    ) -> Result<Session, AuthError> {
        let sign_in = self.identity.create_account(email, password).await?;
        log::info!("Account created for uid {}", sign_in.session.uid);

        let record = UserProfileRecord {
            first_name: name.first_name.clone(),
            last_name: name.last_name.clone(),
            email: Some(email.to_string()),
            created_at: profile::now_iso8601(),
        };
        self.write(&sign_in, &record, WriteMode::Replace).await?;

        Ok(sign_in.session)
    }

    /// Google popup sign-in, then merge a profile derived from the
    /// provider's display name.
    pub async fn sign_up_with_google(&self) -> Result<Session, AuthError> {
        let sign_in = self.identity.sign_in_with_google().await?;

        let (first_name, last_name) =
            split_display_name(sign_in.session.display_name.as_deref().unwrap_or_default());
        let record = UserProfileRecord {
            first_name,
            last_name,
            email: sign_in.session.email.clone(),
            created_at: profile::now_iso8601(),
        };
        self.write(&sign_in, &record, WriteMode::Merge).await?;

        Ok(sign_in.session)
    }

    /// Google popup sign-in for a returning user. The profile document is
    /// left untouched.
    pub async fn sign_in_with_google(&self) -> Result<Session, AuthError> {
        let sign_in = self.identity.sign_in_with_google().await?;
        Ok(sign_in.session)
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let sign_in = self.identity.sign_in_with_password(email, password).await?;
        Ok(sign_in.session)
    }

    /// Sign out at the provider. Local session state follows the provider's
    /// session event, so nothing is cleared here if the call fails.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.identity.sign_out().await.map_err(|e| {
            log::error!("Sign-out failed: {}", e);
            e
        })
    }

    pub fn subscribe_to_session<F>(&self, on_change: F) -> Subscription
    where
        F: Fn(Option<&Session>) + Send + Sync + 'static,
    {
        self.identity.subscribe(on_change)
    }

    async fn write(
        &self,
        sign_in: &SignIn,
        record: &UserProfileRecord,
        mode: WriteMode,
    ) -> Result<(), AuthError> {
        self.profiles
            .write_profile(&sign_in.id_token, &sign_in.session.uid, record, mode)
            .await
            .map_err(|e| {
                log::error!(
                    "Profile write for uid {} failed after sign-in: {}",
                    sign_in.session.uid,
                    e
                );
                AuthError::StorageWrite(e.provider_message())
            })
    }
}

#[cfg(test)]
pub(crate) mod testing;
