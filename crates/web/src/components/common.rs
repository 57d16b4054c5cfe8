// =============================================================================
// Lumen Web - Common UI Components
// =============================================================================
// Table of Contents:
// 1. Button
// 2. Card
// 3. Loading Indicator
// 4. Error Banner
// =============================================================================

use leptos::prelude::*;

// -----------------------------------------------------------------------------
// 1. Button
// -----------------------------------------------------------------------------

/// Button variant styles.
#[derive(Clone, Copy, Default, PartialEq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Outline,
}

impl ButtonVariant {
    fn class(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "btn btn-primary",
            ButtonVariant::Outline => "btn btn-outline",
        }
    }
}

/// Reusable button. While `loading` is true the button is disabled and
/// shows a spinner in place of its label.
#[component]
pub fn Button(
    #[prop(into)] label: String,
    #[prop(optional)] variant: ButtonVariant,
    #[prop(optional)] submit: bool,
    #[prop(optional)] full_width: bool,
    #[prop(optional)] disabled: Option<Signal<bool>>,
    #[prop(optional)] loading: Option<Signal<bool>>,
    #[prop(optional, into)] on_click: Option<Callback<()>>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    let is_loading = move || loading.map(|l| l.get()).unwrap_or(false);
    let is_disabled = move || disabled.map(|d| d.get()).unwrap_or(false) || is_loading();

    let handle_click = move |_| {
        if let Some(callback) = &on_click {
            callback.run(());
        }
    };

    view! {
        <button
            type=if submit { "submit" } else { "button" }
            class=variant.class()
            class:btn-full=full_width
            disabled=is_disabled
            on:click=handle_click
        >
            {children.map(|c| c())}
            {move || if is_loading() {
                view! { <InlineLoader /> }.into_any()
            } else {
                view! { <span>{label.clone()}</span> }.into_any()
            }}
        </button>
    }
}

// -----------------------------------------------------------------------------
// 2. Card
// -----------------------------------------------------------------------------

/// Card container component.
#[component]
pub fn Card(
    #[prop(optional, into)] title: Option<String>,
    #[prop(optional, into)] subtitle: Option<String>,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    view! {
        <div class=format!("card {}", class)>
            {(title.is_some() || subtitle.is_some()).then(|| view! {
                <div class="card-header">
                    {title.map(|t| view! { <h2 class="card-title">{t}</h2> })}
                    {subtitle.map(|s| view! { <p class="card-subtitle">{s}</p> })}
                </div>
            })}
            <div class="card-body">
                {children()}
            </div>
        </div>
    }
}

// -----------------------------------------------------------------------------
// 3. Loading Indicator
// -----------------------------------------------------------------------------

/// Inline loading indicator.
#[component]
pub fn InlineLoader() -> impl IntoView {
    view! {
        <span class="spinner-small" aria-label="Loading"></span>
    }
}

// -----------------------------------------------------------------------------
// 4. Error Banner
// -----------------------------------------------------------------------------

/// Dismissible banner bound to an error signal. Renders nothing while the
/// signal is `None`.
#[component]
pub fn ErrorBanner(error: RwSignal<Option<String>>) -> impl IntoView {
    move || {
        error.get().map(|message| view! {
            <div class="error-banner" role="alert">
                <span class="error-message">{message}</span>
                <button
                    type="button"
                    class="error-dismiss"
                    aria-label="Dismiss"
                    on:click=move |_| error.set(None)
                >
                    "✕"
                </button>
            </div>
        })
    }
}
