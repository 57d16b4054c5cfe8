// =============================================================================
// Lumen Web - Navigation Bar
// =============================================================================
// Shows sign-in links to anonymous visitors and the account email with a
// sign-out button once a session is known.
// =============================================================================

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::flows::submit_sign_out;
use crate::components::{Button, ButtonVariant};
use crate::state::{AppState, AuthState, FormState};

/// Top navigation bar.
#[component]
pub fn Nav() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let auth = app_state.session.state();
    let form = FormState::new();

    let menu_open = RwSignal::new(false);

    let sign_out = {
        let bridge = app_state.auth.clone();
        Callback::new(move |_| {
            let bridge = bridge.clone();
            spawn_local(async move {
                let _ = submit_sign_out(&*bridge, &form).await;
            });
        })
    };

    view! {
        <nav class="nav">
            <a href="/" class="nav-logo">
                <span class="nav-logo-mark"></span>
                <span class="nav-logo-text">"Lumen"</span>
            </a>

            <div class="nav-links" class:open=move || menu_open.get()>
                <a href="/#features" class="nav-link" on:click=move |_| menu_open.set(false)>"Features"</a>
                <a href="/#community" class="nav-link" on:click=move |_| menu_open.set(false)>"Community"</a>
            </div>

            <div class="nav-actions">
                {move || match auth.get() {
                    AuthState::Unknown => ().into_any(),
                    AuthState::Anonymous => view! {
                        <a href="/login" class="btn btn-ghost">"Sign in"</a>
                        <a href="/signup" class="btn btn-primary">"Get started"</a>
                    }.into_any(),
                    AuthState::Authenticated(session) => view! {
                        <span class="nav-user">{session.email.unwrap_or(session.uid)}</span>
                        <Button
                            label="Sign out"
                            variant=ButtonVariant::Outline
                            loading=form.pending.into()
                            on_click=sign_out
                        />
                    }.into_any(),
                }}
                <button
                    type="button"
                    class="nav-menu-toggle"
                    aria-label="Toggle menu"
                    on:click=move |_| menu_open.update(|open| *open = !*open)
                >
                    "☰"
                </button>
            </div>
        </nav>
        <div class="nav-banner">
            {move || form.error.get().map(|message| view! {
                <div class="error-banner" role="alert">{message}</div>
            })}
        </div>
    }
}
