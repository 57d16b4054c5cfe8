// =============================================================================
// Lumen Web - Signup Page
// =============================================================================
// Table of Contents:
// 1. Signup Page
// 2. Google Mark
// =============================================================================

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;
use leptos_router::hooks::use_navigate;

use crate::auth::flows::{submit_google_signup, submit_password_signup};
use crate::auth::{SignupForm, PASSWORD_MISMATCH};
use crate::components::{
    Button, Card, Checkbox, ErrorBanner, PasswordInput, RequirementList,
    SceneCanvas, TextInput,
};
use crate::state::{AppState, FormState};

// -----------------------------------------------------------------------------
// 1. Signup Page
// -----------------------------------------------------------------------------

/// Account creation page.
#[component]
pub fn SignupPage() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let navigate = use_navigate();
    let form = FormState::new();

    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let accepted_terms = RwSignal::new(false);

    let mismatched = Memo::new(move |_| {
        let confirm = confirm_password.get();
        !confirm.is_empty() && confirm != password.get()
    });
    let mismatch_message = Signal::derive(move || {
        if mismatched.get() {
            Some(PASSWORD_MISMATCH.to_string())
        } else {
            form.mismatch.get()
        }
    });
    let busy = Signal::derive(move || form.pending.get());

    let on_submit = {
        let bridge = app_state.auth.clone();
        let navigate = navigate.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if form.pending.get_untracked() {
                return;
            }

            let data = SignupForm {
                first_name: first_name.get_untracked(),
                last_name: last_name.get_untracked(),
                email: email.get_untracked(),
                password: password.get_untracked(),
                confirm_password: confirm_password.get_untracked(),
                accepted_terms: accepted_terms.get_untracked(),
            };
            let bridge = bridge.clone();
            let navigate = navigate.clone();
            spawn_local(async move {
                let _ = submit_password_signup(&*bridge, &data, &form, |path| {
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
                let _ = submit_google_signup(&*bridge, &form, |path| {
                    navigate(path, Default::default())
                })
                .await;
            });
        }
    };

    view! {
        <Title text="Create your account · Lumen" />
        <div class="page page-auth">
            <SceneCanvas preset="auth_background" class="auth-background" />

            <div class="auth-wrapper">
                <a href="/" class="auth-logo">"Lumen"</a>

                <Card
                    title="Create your account"
                    subtitle="Join thousands of developers building amazing apps"
                    class="auth-card"
                >
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
                        <div class="form-row">
                            <TextInput
                                label="First Name"
                                value=first_name
                                placeholder="John"
                                autocomplete="given-name"
                                disabled=busy
                                required=true
                            />
                            <TextInput
                                label="Last Name"
                                value=last_name
                                placeholder="Doe"
                                autocomplete="family-name"
                                disabled=busy
                                required=true
                            />
                        </div>

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
                            placeholder="Create a strong password"
                            autocomplete="new-password"
                            disabled=busy
                        />
                        <RequirementList password=password />

                        <PasswordInput
                            label="Confirm Password"
                            value=confirm_password
                            placeholder="Confirm your password"
                            autocomplete="new-password"
                            disabled=busy
                            message=mismatch_message
                        />

                        <Checkbox checked=accepted_terms required=true disabled=busy>
                            "I agree to the "
                            <a href="/terms" class="link">"Terms of Service"</a>
                            " and "
                            <a href="/privacy" class="link">"Privacy Policy"</a>
                        </Checkbox>

                        <Button
                            label="Create Account"
                            submit=true
                            full_width=true
                            loading=busy
                            disabled=Signal::derive(move || mismatched.get())
                        />
                    </form>

                    <p class="auth-switch">
                        "Already have an account? "
                        <a href="/login" class="link">"Sign in"</a>
                    </p>
                </Card>
            </div>
        </div>
    }
}

// -----------------------------------------------------------------------------
// 2. Google Mark
// -----------------------------------------------------------------------------

/// Multicolor Google "G".
#[component]
pub fn GoogleMark() -> impl IntoView {
    view! {
        <svg class="google-mark" viewBox="0 0 24 24" aria-hidden="true">
            <path fill="#4285F4" d="M22.56 12.25c0-.78-.07-1.53-.2-2.25H12v4.26h5.92c-.26 1.37-1.04 2.53-2.21 3.31v2.77h3.57c2.08-1.92 3.28-4.74 3.28-8.09z" />
            <path fill="#34A853" d="M12 23c2.97 0 5.46-.98 7.28-2.66l-3.57-2.77c-.98.66-2.23 1.06-3.71 1.06-2.86 0-5.29-1.93-6.16-4.53H2.18v2.84C3.99 20.53 7.7 23 12 23z" />
            <path fill="#FBBC05" d="M5.84 14.09c-.22-.66-.35-1.36-.35-2.09s.13-1.43.35-2.09V7.07H2.18C1.43 8.55 1 10.22 1 12s.43 3.45 1.18 4.93l2.85-2.22.81-.62z" />
            <path fill="#EA4335" d="M12 5.38c1.62 0 3.06.56 4.21 1.64l3.15-3.15C17.45 2.09 14.97 1 12 1 7.7 1 3.99 3.47 2.18 7.07l3.66 2.84c.87-2.6 3.3-4.53 6.16-4.53z" />
        </svg>
    }
}
