//! Google sign-in popup.
//!
//! The opener starts an implicit-flow authorization in a popup window. The
//! popup lands on [`CALLBACK_ROUTE`], which posts its URL fragment back to
//! the opener and closes itself. The opener polls `popup.closed` so a user
//! closing the window resolves as [`AuthError::PopupClosed`].

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::{select, Either};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{MessageEvent, Window};

use super::AuthError;
use crate::utils::{js_error_message, origin, window};

pub const CALLBACK_ROUTE: &str = "/auth/callback";

const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const MESSAGE_PREFIX: &str = "lumen-oauth:";
const POPUP_FEATURES: &str = "width=500,height=600,menubar=no,toolbar=no";
const POLL_MS: u32 = 500;

pub fn authorization_url(client_id: &str, redirect_uri: &str, nonce: &str) -> String {
    format!(
        "{}?client_id={}&redirect_uri={}&response_type=id_token&scope={}&nonce={}&state={}&prompt=select_account",
        AUTHORIZE_URL,
        urlencoding::encode(client_id),
        urlencoding::encode(redirect_uri),
        urlencoding::encode("openid email profile"),
        nonce,
        nonce,
    )
}

/// Extract the Google ID token from a callback fragment (`#id_token=...`).
pub fn parse_fragment(fragment: &str, expected_state: &str) -> Result<String, AuthError> {
    let mut id_token = None;
    let mut state = None;
    let mut error = None;
    let mut description = None;

    for pair in fragment.trim_start_matches('#').split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = urlencoding::decode(&value.replace('+', " "))
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| value.to_string());
        match key {
            "id_token" => id_token = Some(value),
            "state" => state = Some(value),
            "error" => error = Some(value),
            "error_description" => description = Some(value),
            _ => {}
        }
    }

    if let Some(error) = error {
        return Err(AuthError::Provider(description.unwrap_or(error)));
    }
    if state.as_deref() != Some(expected_state) {
        return Err(AuthError::Provider("OAuth state mismatch".to_string()));
    }
    id_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::Provider("No ID token in authorization response".to_string()))
}

/// Run the popup flow and return Google's ID token.
pub async fn authorize_google(client_id: &str) -> Result<String, AuthError> {
    let origin = origin().map_err(|e| AuthError::Provider(js_error_message(&e)))?;
    let nonce = uuid::Uuid::new_v4().simple().to_string();
    let url = authorization_url(client_id, &format!("{origin}{CALLBACK_ROUTE}"), &nonce);

    let popup = window()
        .open_with_url_and_target_and_features(&url, "lumen-google-signin", POPUP_FEATURES)
        .map_err(|e| AuthError::Provider(js_error_message(&e)))?
        .ok_or_else(|| AuthError::Provider("Popup blocked by the browser".to_string()))?;

    let (tx, mut rx) = oneshot::channel::<String>();
    let tx = Rc::new(RefCell::new(Some(tx)));
    let expected_origin = origin.clone();
    let listener = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
        if event.origin() != expected_origin {
            return;
        }
        let Some(data) = event.data().as_string() else {
            return;
        };
        if let Some(fragment) = data.strip_prefix(MESSAGE_PREFIX) {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(fragment.to_string());
            }
        }
    });
    window()
        .add_event_listener_with_callback("message", listener.as_ref().unchecked_ref())
        .map_err(|e| AuthError::Provider(js_error_message(&e)))?;

    let outcome = loop {
        let tick = TimeoutFuture::new(POLL_MS);
        futures::pin_mut!(tick);
        match select(&mut rx, tick).await {
            Either::Left((Ok(fragment), _)) => break parse_fragment(&fragment, &nonce),
            Either::Left((Err(_), _)) => break Err(AuthError::PopupClosed),
            Either::Right(_) => {
                if popup.closed().unwrap_or(true) {
                    // The message may still be queued behind the close.
                    TimeoutFuture::new(POLL_MS).await;
                    break match rx.try_recv() {
                        Ok(Some(fragment)) => parse_fragment(&fragment, &nonce),
                        _ => Err(AuthError::PopupClosed),
                    };
                }
            }
        }
    };

    let _ = window()
        .remove_event_listener_with_callback("message", listener.as_ref().unchecked_ref());
    let _ = popup.close();

    outcome
}

/// Called by the callback page inside the popup.
pub fn relay_to_opener() -> Result<(), JsValue> {
    let window = window();
    let opener = window.opener()?;
    if opener.is_null() || opener.is_undefined() {
        return Err(JsValue::from_str("No opener window"));
    }

    let hash = window.location().hash()?;
    let origin = window.location().origin()?;
    opener
        .unchecked_into::<Window>()
        .post_message(&JsValue::from_str(&format!("{MESSAGE_PREFIX}{hash}")), &origin)?;
    window.close()
}
