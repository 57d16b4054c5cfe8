// =============================================================================
// Lumen Web - OAuth Callback Page
// =============================================================================
// Loaded inside the Google sign-in popup. Hands the URL fragment to the
// opener window, which completes the sign-in.
// =============================================================================

use leptos::prelude::*;

use crate::auth::popup;
use crate::utils::js_error_message;

#[component]
pub fn AuthCallbackPage() -> impl IntoView {
    let failed = match popup::relay_to_opener() {
        Ok(()) => None,
        Err(e) => {
            let message = js_error_message(&e);
            log::warn!("Could not relay sign-in response: {}", message);
            Some(message)
        }
    };

    view! {
        <div class="page page-auth-callback">
            {match failed {
                None => view! { <p>"Completing sign-in…"</p> }.into_any(),
                Some(_) => view! {
                    <p>"Sign-in could not be completed in this window. You can close it and try again."</p>
                }.into_any(),
            }}
        </div>
    }
}
