// =============================================================================
// Lumen Web - Main App Component
// =============================================================================
// Table of Contents:
// 1. Imports
// 2. App Component
// =============================================================================

use leptos::prelude::*;
use leptos_meta::provide_meta_context;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::pages::{
    auth_callback::AuthCallbackPage, home::HomePage, login::LoginPage,
    not_found::NotFoundPage, signup::SignupPage,
};
use crate::state::AppState;

// -----------------------------------------------------------------------------
// 2. App Component
// -----------------------------------------------------------------------------

/// Root application component with routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    let app_state = AppState::new();

    // Subscribe before restoring so the first session event is observed.
    let subscription = app_state.session.attach(app_state.auth.identity());
    app_state.auth.identity().restore();
    on_cleanup(move || subscription.unsubscribe());

    provide_context(app_state);

    view! {
        <Router>
            <Routes fallback=|| view! { <NotFoundPage /> }>
                <Route path=path!("/") view=HomePage />
                <Route path=path!("/signup") view=SignupPage />
                <Route path=path!("/login") view=LoginPage />
                <Route path=path!("/auth/callback") view=AuthCallbackPage />
            </Routes>
        </Router>
    }
}
