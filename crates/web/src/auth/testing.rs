//! In-memory provider and store used by the host tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

pub use futures::executor::block_on;

use super::{
    AuthError, IdentityProvider, ProfileStore, Session, SessionHub, SignIn, Subscription,
    UserProfileRecord, WriteMode,
};
use crate::api::ApiError;

#[derive(Default)]
pub struct FakeIdentity {
    hub: SessionHub,
    next_uid: Mutex<Option<String>>,
    failure: Mutex<Option<String>>,
    google: Mutex<Option<Session>>,
    popup_closed: Mutex<bool>,
    sign_out_failure: Mutex<Option<String>>,
    create_calls: AtomicUsize,
}

impl FakeIdentity {
    pub fn session(uid: &str) -> Session {
        Session {
            uid: uid.to_string(),
            email: None,
            display_name: None,
        }
    }

    pub fn hub(&self) -> &SessionHub {
        &self.hub
    }

    pub fn next_uid(&self, uid: &str) {
        *self.next_uid.lock() = Some(uid.to_string());
    }

    pub fn fail_next(&self, message: &str) {
        *self.failure.lock() = Some(message.to_string());
    }

    pub fn google_user(&self, uid: &str, display_name: Option<&str>, email: Option<&str>) {
        *self.google.lock() = Some(Session {
            uid: uid.to_string(),
            email: email.map(str::to_string),
            display_name: display_name.map(str::to_string),
        });
    }

    pub fn close_popup(&self) {
        *self.popup_closed.lock() = true;
    }

    pub fn fail_sign_out(&self, message: &str) {
        *self.sign_out_failure.lock() = Some(message.to_string());
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    fn complete(&self, session: Session) -> Result<SignIn, AuthError> {
        if let Some(message) = self.failure.lock().take() {
            return Err(AuthError::Provider(message));
        }
        self.hub.emit(Some(session.clone()));
        Ok(SignIn {
            id_token: format!("token-{}", session.uid),
            session,
        })
    }

    fn password_session(&self) -> Session {
        let uid = self
            .next_uid
            .lock()
            .take()
            .unwrap_or_else(|| "anonymous-uid".to_string());
        Self::session(&uid)
    }
}

impl IdentityProvider for FakeIdentity {
    async fn create_account(&self, _email: &str, _password: &str) -> Result<SignIn, AuthError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let session = self.password_session();
        self.complete(session)
    }

    async fn sign_in_with_password(
        &self,
        _email: &str,
        _password: &str,
    ) -> Result<SignIn, AuthError> {
        let session = self.password_session();
        self.complete(session)
    }

    async fn sign_in_with_google(&self) -> Result<SignIn, AuthError> {
        if *self.popup_closed.lock() {
            return Err(AuthError::PopupClosed);
        }
        let session = self
            .google
            .lock()
            .clone()
            .unwrap_or_else(|| Self::session("google-uid"));
        self.complete(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if let Some(message) = self.sign_out_failure.lock().take() {
            return Err(AuthError::Provider(message));
        }
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

#[derive(Default)]
pub struct FakeProfiles {
    writes: Mutex<Vec<(String, UserProfileRecord, WriteMode)>>,
    failure: Mutex<Option<String>>,
}

impl FakeProfiles {
    pub fn writes(&self) -> Vec<(String, UserProfileRecord, WriteMode)> {
        self.writes.lock().clone()
    }

    pub fn fail_writes(&self, message: &str) {
        *self.failure.lock() = Some(message.to_string());
    }
}

impl ProfileStore for FakeProfiles {
    async fn write_profile(
        &self,
        _id_token: &str,
        uid: &str,
        record: &UserProfileRecord,
        mode: WriteMode,
    ) -> Result<(), ApiError> {
        if let Some(message) = self.failure.lock().clone() {
            return Err(ApiError::Unauthorized(message));
        }
        self.writes
            .lock()
            .push((uid.to_string(), record.clone(), mode));
        Ok(())
    }
}
