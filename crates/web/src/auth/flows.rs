//! Form submission flows.
//!
//! Each flow raises the pending flag on entry and clears it through a drop
//! guard, so the form is re-enabled on every exit path. Errors land in the
//! banner; a successful flow navigates home exactly once.

use super::{AuthBridge, AuthError, IdentityProvider, ProfileName, ProfileStore};
use crate::utils::is_valid_email;

pub const PASSWORD_MISMATCH: &str = "Passwords do not match";
pub const HOME_ROUTE: &str = "/";

/// UI state a form exposes to the flows.
pub trait FormStatus {
    fn set_pending(&self, pending: bool);
    fn set_error(&self, error: Option<String>);
    /// Inline message under the confirm-password field.
    fn set_mismatch(&self, message: Option<String>);
}

struct Pending<'a, F: FormStatus + ?Sized>(&'a F);

impl<'a, F: FormStatus + ?Sized> Pending<'a, F> {
    fn raise(status: &'a F) -> Self {
        status.set_pending(true);
        Self(status)
    }
}

impl<F: FormStatus + ?Sized> Drop for Pending<'_, F> {
    fn drop(&mut self) {
        self.0.set_pending(false);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accepted_terms: bool,
}

impl SignupForm {
    pub fn passwords_match(&self) -> bool {
        self.password == self.confirm_password
    }

    fn name(&self) -> ProfileName {
        ProfileName {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

pub async fn submit_password_signup<I, S, St>(
    bridge: &AuthBridge<I, S>,
    form: &SignupForm,
    status: &St,
    navigate: impl Fn(&str),
) -> Result<(), AuthError>
where
    I: IdentityProvider,
    S: ProfileStore,
    St: FormStatus + ?Sized,
{
    status.set_error(None);

    if !form.passwords_match() {
        status.set_mismatch(Some(PASSWORD_MISMATCH.to_string()));
        return Err(AuthError::Validation(PASSWORD_MISMATCH.to_string()));
    }
    status.set_mismatch(None);

    if !is_valid_email(form.email.trim()) {
        let err = AuthError::Validation("Please enter a valid email address".to_string());
        status.set_error(Some(err.to_string()));
        return Err(err);
    }

    if !form.accepted_terms {
        let err = AuthError::Validation("Please accept the terms to continue".to_string());
        status.set_error(Some(err.to_string()));
        return Err(err);
    }

    let _pending = Pending::raise(status);
    match bridge
        .sign_up_with_password(form.email.trim(), &form.password, &form.name())
        .await
    {
        Ok(_) => {
            navigate(HOME_ROUTE);
            Ok(())
        }
        Err(e) => {
            log::error!("Signup error: {}", e);
            status.set_error(Some(e.to_string()));
            Err(e)
        }
    }
}

pub async fn submit_google_signup<I, S, St>(
    bridge: &AuthBridge<I, S>,
    status: &St,
    navigate: impl Fn(&str),
) -> Result<(), AuthError>
where
    I: IdentityProvider,
    S: ProfileStore,
    St: FormStatus + ?Sized,
{
    status.set_error(None);
    let _pending = Pending::raise(status);

    match bridge.sign_up_with_google().await {
        Ok(_) => {
            navigate(HOME_ROUTE);
            Ok(())
        }
        Err(e) => {
            log::error!("Google signup error: {}", e);
            status.set_error(Some(e.to_string()));
            Err(e)
        }
    }
}

/// Google sign-in from the login page; never writes a profile.
pub async fn submit_google_login<I, S, St>(
    bridge: &AuthBridge<I, S>,
    status: &St,
    navigate: impl Fn(&str),
) -> Result<(), AuthError>
where
    I: IdentityProvider,
    S: ProfileStore,
    St: FormStatus + ?Sized,
{
    status.set_error(None);
    let _pending = Pending::raise(status);

    match bridge.sign_in_with_google().await {
        Ok(_) => {
            navigate(HOME_ROUTE);
            Ok(())
        }
        Err(e) => {
            log::error!("Google login error: {}", e);
            status.set_error(Some(e.to_string()));
            Err(e)
        }
    }
}

pub async fn submit_login<I, S, St>(
    bridge: &AuthBridge<I, S>,
    form: &LoginForm,
    status: &St,
    navigate: impl Fn(&str),
) -> Result<(), AuthError>
where
    I: IdentityProvider,
    S: ProfileStore,
    St: FormStatus + ?Sized,
{
    status.set_error(None);

    if form.email.trim().is_empty() || form.password.is_empty() {
        let err = AuthError::Validation("Please enter your email and password".to_string());
        status.set_error(Some(err.to_string()));
        return Err(err);
    }

    let _pending = Pending::raise(status);
    match bridge
        .sign_in_with_password(form.email.trim(), &form.password)
        .await
    {
        Ok(_) => {
            navigate(HOME_ROUTE);
            Ok(())
        }
        Err(e) => {
            log::error!("Login error: {}", e);
            status.set_error(Some(e.to_string()));
            Err(e)
        }
    }
}

/// Sign out; on failure the error goes to the banner and the session is
/// left as the provider reports it.
pub async fn submit_sign_out<I, S, St>(
    bridge: &AuthBridge<I, S>,
    status: &St,
) -> Result<(), AuthError>
where
    I: IdentityProvider,
    S: ProfileStore,
    St: FormStatus + ?Sized,
{
    status.set_error(None);
    let _pending = Pending::raise(status);

    bridge.sign_out().await.map_err(|e| {
        status.set_error(Some(e.to_string()));
        e
    })
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::auth::testing::{block_on, FakeIdentity, FakeProfiles};
    use crate::auth::WriteMode;

    #[derive(Default)]
    struct RecordingStatus {
        pending: Cell<bool>,
        pending_history: RefCell<Vec<bool>>,
        error: RefCell<Option<String>>,
        mismatch: RefCell<Option<String>>,
    }

    impl FormStatus for RecordingStatus {
        fn set_pending(&self, pending: bool) {
            self.pending.set(pending);
            self.pending_history.borrow_mut().push(pending);
        }

        fn set_error(&self, error: Option<String>) {
            *self.error.borrow_mut() = error;
        }

        fn set_mismatch(&self, message: Option<String>) {
            *self.mismatch.borrow_mut() = message;
        }
    }

    fn bridge() -> AuthBridge<FakeIdentity, FakeProfiles> {
        AuthBridge::new(FakeIdentity::default(), FakeProfiles::default())
    }

    fn valid_form() -> SignupForm {
        SignupForm {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "Abc12345".to_string(),
            confirm_password: "Abc12345".to_string(),
            accepted_terms: true,
        }
    }

    #[test]
    fn test_mismatch_blocks_provider_call() {
        let bridge = bridge();
        let status = RecordingStatus::default();
        let navigations = RefCell::new(Vec::new());

        let form = SignupForm {
            confirm_password: "Abc1234".to_string(),
            ..valid_form()
        };
        let result = block_on(submit_password_signup(&bridge, &form, &status, |p| {
            navigations.borrow_mut().push(p.to_string())
        }));

        assert_eq!(
            result,
            Err(AuthError::Validation(PASSWORD_MISMATCH.to_string()))
        );
        assert_eq!(bridge.identity().create_calls(), 0);
        assert_eq!(status.mismatch.borrow().as_deref(), Some(PASSWORD_MISMATCH));
        assert!(navigations.borrow().is_empty());
        assert!(!status.pending.get());
    }

    #[test]
    fn test_signup_success_writes_and_navigates_once() {
        let bridge = bridge();
        bridge.identity().next_uid("u1");
        let status = RecordingStatus::default();
        let navigations = RefCell::new(Vec::new());

        block_on(submit_password_signup(&bridge, &valid_form(), &status, |p| {
            navigations.borrow_mut().push(p.to_string())
        }))
        .unwrap();

        let writes = bridge.profiles().writes();
        assert_eq!(writes.len(), 1);
        let (uid, record, mode) = &writes[0];
        assert_eq!(uid, "u1");
        assert_eq!(*mode, WriteMode::Replace);
        assert_eq!(record.first_name, "Ada");
        assert_eq!(record.last_name, "Lovelace");
        assert!(chrono::DateTime::parse_from_rfc3339(&record.created_at).is_ok());

        assert_eq!(*navigations.borrow(), vec!["/".to_string()]);
        assert_eq!(*status.pending_history.borrow(), vec![true, false]);
        assert!(status.error.borrow().is_none());
        assert!(status.mismatch.borrow().is_none());
    }

    #[test]
    fn test_provider_error_sets_banner_and_clears_pending() {
        let bridge = bridge();
        bridge.identity().fail_next("WEAK_PASSWORD : Password should be at least 6 characters");
        let status = RecordingStatus::default();
        let navigations = Cell::new(0);

        let result = block_on(submit_password_signup(&bridge, &valid_form(), &status, |_| {
            navigations.set(navigations.get() + 1)
        }));

        assert!(result.is_err());
        assert_eq!(
            status.error.borrow().as_deref(),
            Some("WEAK_PASSWORD : Password should be at least 6 characters")
        );
        assert_eq!(navigations.get(), 0);
        assert!(!status.pending.get());
    }

    #[test]
    fn test_terms_required() {
        let bridge = bridge();
        let status = RecordingStatus::default();
        let form = SignupForm {
            accepted_terms: false,
            ..valid_form()
        };

        let result = block_on(submit_password_signup(&bridge, &form, &status, |_| {}));
        assert!(matches!(result, Err(AuthError::Validation(_))));
        assert_eq!(bridge.identity().create_calls(), 0);
        assert!(status.error.borrow().is_some());
    }

    #[test]
    fn test_invalid_email_blocks_provider_call() {
        let bridge = bridge();
        let status = RecordingStatus::default();
        let form = SignupForm {
            email: "not-an-email".to_string(),
            ..valid_form()
        };

        assert!(block_on(submit_password_signup(&bridge, &form, &status, |_| {})).is_err());
        assert_eq!(bridge.identity().create_calls(), 0);
        assert_eq!(
            status.error.borrow().as_deref(),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn test_google_signup_splits_single_name() {
        let bridge = bridge();
        bridge.identity().google_user("g1", Some("Madonna"), Some("m@example.com"));
        let status = RecordingStatus::default();
        let navigations = Cell::new(0);

        block_on(submit_google_signup(&bridge, &status, |_| {
            navigations.set(navigations.get() + 1)
        }))
        .unwrap();

        let (_, record, mode) = &bridge.profiles().writes()[0];
        assert_eq!(*mode, WriteMode::Merge);
        assert_eq!(record.first_name, "Madonna");
        assert_eq!(record.last_name, "");
        assert_eq!(navigations.get(), 1);
        assert!(!status.pending.get());
    }

    #[test]
    fn test_google_popup_closed_is_reported() {
        let bridge = bridge();
        bridge.identity().close_popup();
        let status = RecordingStatus::default();

        let result = block_on(submit_google_signup(&bridge, &status, |_| {}));
        assert_eq!(result, Err(AuthError::PopupClosed));
        assert_eq!(status.error.borrow().as_deref(), Some("Popup closed by user"));
        assert!(bridge.profiles().writes().is_empty());
        assert!(!status.pending.get());
    }

    #[test]
    fn test_google_login_writes_no_profile() {
        let bridge = bridge();
        bridge.identity().google_user("g2", Some("Grace Hopper"), Some("g@example.com"));
        let status = RecordingStatus::default();
        let navigations = RefCell::new(Vec::new());

        block_on(submit_google_login(&bridge, &status, |p| {
            navigations.borrow_mut().push(p.to_string())
        }))
        .unwrap();

        assert!(bridge.profiles().writes().is_empty());
        assert_eq!(*navigations.borrow(), vec!["/".to_string()]);
        assert_eq!(*status.pending_history.borrow(), vec![true, false]);
        assert_eq!(
            bridge.identity().hub().current().flatten().map(|s| s.uid),
            Some("g2".to_string())
        );
    }

    #[test]
    fn test_google_signup_then_login_keeps_first_profile() {
        let bridge = bridge();
        bridge.identity().google_user("g3", Some("Grace Hopper"), None);
        let status = RecordingStatus::default();

        block_on(submit_google_signup(&bridge, &status, |_| {})).unwrap();
        let first = bridge.profiles().writes();
        assert_eq!(first.len(), 1);

        block_on(submit_google_login(&bridge, &status, |_| {})).unwrap();
        block_on(submit_google_login(&bridge, &status, |_| {})).unwrap();
        assert_eq!(bridge.profiles().writes(), first);
        assert_eq!(first[0].1.first_name, "Grace");
    }

    #[test]
    fn test_google_login_popup_closed() {
        let bridge = bridge();
        bridge.identity().close_popup();
        let status = RecordingStatus::default();

        let result = block_on(submit_google_login(&bridge, &status, |_| {}));
        assert_eq!(result, Err(AuthError::PopupClosed));
        assert_eq!(status.error.borrow().as_deref(), Some("Popup closed by user"));
        assert!(!status.pending.get());
    }

    #[test]
    fn test_login_requires_fields() {
        let bridge = bridge();
        let status = RecordingStatus::default();
        let form = LoginForm {
            email: "  ".to_string(),
            password: "secret".to_string(),
        };

        assert!(block_on(submit_login(&bridge, &form, &status, |_| {})).is_err());
        assert!(status.pending_history.borrow().is_empty());
    }

    #[test]
    fn test_login_success() {
        let bridge = bridge();
        bridge.identity().next_uid("u9");
        let status = RecordingStatus::default();
        let form = LoginForm {
            email: "a@b.co".to_string(),
            password: "Abcdef12".to_string(),
        };
        let navigations = RefCell::new(Vec::new());

        block_on(submit_login(&bridge, &form, &status, |p| {
            navigations.borrow_mut().push(p.to_string())
        }))
        .unwrap();

        assert_eq!(*navigations.borrow(), vec!["/".to_string()]);
        assert_eq!(
            bridge.identity().hub().current(),
            Some(Some(FakeIdentity::session("u9")))
        );
        // Login never writes a profile.
        assert!(bridge.profiles().writes().is_empty());
    }

    #[test]
    fn test_sign_out_failure_surfaces_error() {
        let bridge = bridge();
        bridge.identity().next_uid("u4");
        block_on(bridge.sign_in_with_password("a@b.co", "Abcdef12")).unwrap();
        bridge.identity().fail_sign_out("offline");
        let status = RecordingStatus::default();

        assert!(block_on(submit_sign_out(&bridge, &status)).is_err());
        assert_eq!(status.error.borrow().as_deref(), Some("offline"));
        assert!(!status.pending.get());
    }
}
