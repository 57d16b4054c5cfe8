// =============================================================================
// Lumen Web - Login Page
// =============================================================================

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;
use leptos_router::hooks::use_navigate;

use crate::auth::flows::{submit_google_login, submit_login};
use crate::auth::LoginForm;
use crate::components::{Button, Card, ErrorBanner, PasswordInput, SceneCanvas, TextInput};
use crate::pages::signup::GoogleMark;
use crate::state::{AppState, FormState};

/// Sign-in page.
#[component]
pub fn LoginPage() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let navigate = use_navigate();
    let form = FormState::new();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = Signal::derive(move || form.pending.get());

    let on_submit = {
        let bridge = app_state.auth.clone();
        let navigate = navigate.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if form.pending.get_untracked() {
                return;
            }

            let data = LoginForm {
                email: email.get_untracked(),
                password: password.get_untracked(),
            };
            let bridge = bridge.clone();
            let navigate = navigate.clone();
            spawn_local(async move {
                let _ = submit_login(&*bridge, &data, &form, |path| {
                    navigate(path, Default::default())
                })
                .await;
            });
        }
    };

    let on_google = {
        let bridge = app_state.auth.clone();
        move |_| {
            if form.pending.get_untracked() {
                return;
            }
            let bridge = bridge.clone();
            let navigate = navigate.clone();
            spawn_local(async move {
                let _ = submit_google_login(&*bridge, &form, |path| {
                    navigate(path, Default::default())
                })
                .await;
            });
        }
    };

    view! {
        <Title text="Sign in · Lumen" />
        <div class="page page-auth">
            <SceneCanvas preset="auth_background" class="auth-background" />

            <div class="auth-wrapper">
                <a href="/" class="auth-logo">"Lumen"</a>

                <Card title="Welcome back" subtitle="Sign in to continue" class="auth-card">
                    <ErrorBanner error=form.error />

                    <button
                        type="button"
                        class="btn btn-outline btn-full"
                        disabled=move || busy.get()
                        on:click=on_google
                    >
                        <GoogleMark />
                        "Continue with Google"
                    </button>

                    <div class="auth-divider">
                        <span>"Or continue with email"</span>
                    </div>

                    <form class="auth-form" on:submit=on_submit>
                        <TextInput
                            label="Email"
                            value=email
                            input_type="email"
                            placeholder="john@example.com"
                            autocomplete="email"
                            disabled=busy
                            required=true
                        />
                        <PasswordInput
                            label="Password"
                            value=password
                            placeholder="Your password"
                            autocomplete="current-password"
                            disabled=busy
                        />
                        <Button label="Sign In" submit=true full_width=true loading=busy />
                    </form>

                    <p class="auth-switch">
                        "Don't have an account? "
                        <a href="/signup" class="link">"Create one"</a>
                    </p>
                </Card>
            </div>
        </div>
    }
}
