// =============================================================================
// Lumen Web - Application State
// =============================================================================
// Table of Contents:
// 1. Auth State
// 2. Session Store
// 3. Form State
// 4. App State
// =============================================================================

use std::sync::Arc;

use leptos::prelude::*;

use crate::api::{HostedDocuments, HostedIdentity};
use crate::auth::{AuthBridge, FormStatus, IdentityProvider, Session, Subscription};
use crate::config::HostedConfig;

// -----------------------------------------------------------------------------
// 1. Auth State
// -----------------------------------------------------------------------------

/// Client-observed authentication state.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AuthState {
    /// Before the first session event.
    #[default]
    Unknown,
    Authenticated(Session),
    Anonymous,
}

impl AuthState {
    pub fn from_event(session: Option<&Session>) -> Self {
        match session {
            Some(session) => AuthState::Authenticated(session.clone()),
            None => AuthState::Anonymous,
        }
    }

    /// Check if user is authenticated.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// 2. Session Store
// -----------------------------------------------------------------------------

/// Reactive mirror of the provider's session. Written only by the
/// subscription installed in [`SessionStore::attach`].
#[derive(Clone, Copy)]
pub struct SessionStore {
    state: RwSignal<AuthState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(AuthState::Unknown),
        }
    }

    pub fn state(&self) -> ReadSignal<AuthState> {
        self.state.read_only()
    }

    pub fn attach<P: IdentityProvider>(&self, provider: &P) -> Subscription {
        let state = self.state;
        provider.subscribe(move |session| {
            // The signal may already be disposed if the owner is gone.
            let _ = state.try_set(AuthState::from_event(session));
        })
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// 3. Form State
// -----------------------------------------------------------------------------

/// Pending flag, banner error and inline mismatch message of one form.
#[derive(Clone, Copy)]
pub struct FormState {
    pub pending: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub mismatch: RwSignal<Option<String>>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            pending: RwSignal::new(false),
            error: RwSignal::new(None),
            mismatch: RwSignal::new(None),
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

// Flows may finish after the page is gone, so writes use `try_set`.
impl FormStatus for FormState {
    fn set_pending(&self, pending: bool) {
        let _ = self.pending.try_set(pending);
    }

    fn set_error(&self, error: Option<String>) {
        let _ = self.error.try_set(error);
    }

    fn set_mismatch(&self, message: Option<String>) {
        let _ = self.mismatch.try_set(message);
    }
}

// -----------------------------------------------------------------------------
// 4. App State
// -----------------------------------------------------------------------------

pub type HostedBridge = AuthBridge<HostedIdentity, HostedDocuments>;

/// Application state provided via Leptos context.
#[derive(Clone)]
pub struct AppState {
    pub session: SessionStore,
    pub auth: Arc<HostedBridge>,
}

impl AppState {
    pub fn new() -> Self {
        let config = HostedConfig::from_build_env();
        if !config.is_configured() {
            log::warn!("Hosted identity is not configured; sign-in will fail");
        }

        Self {
            session: SessionStore::new(),
            auth: Arc::new(AuthBridge::new(
                HostedIdentity::new(config.clone()),
                HostedDocuments::new(&config),
            )),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
