// =============================================================================
// Lumen Web - Form Components
// =============================================================================
// Table of Contents:
// 1. TextInput
// 2. PasswordInput
// 3. Checkbox
// 4. RequirementList
// =============================================================================

use leptos::prelude::*;

use crate::auth::PasswordRequirements;

// -----------------------------------------------------------------------------
// 1. TextInput
// -----------------------------------------------------------------------------

/// Text input field with label.
#[component]
pub fn TextInput(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(optional, into)] placeholder: String,
    #[prop(optional, into)] input_type: String,
    #[prop(optional, into)] autocomplete: String,
    #[prop(optional)] disabled: Option<Signal<bool>>,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    let input_type = if input_type.is_empty() { "text".to_string() } else { input_type };

    view! {
        <div class="form-field">
            <label class="form-label">
                {label}
                {required.then(|| view! { <span class="required">"*"</span> })}
            </label>
            <input
                type=input_type
                class="form-input"
                placeholder=placeholder
                autocomplete=autocomplete
                disabled=move || disabled.map(|d| d.get()).unwrap_or(false)
                required=required
                prop:value=move || value.get()
                on:input=move |e| {
                    value.set(event_target_value(&e));
                }
            />
        </div>
    }
}

// -----------------------------------------------------------------------------
// 2. PasswordInput
// -----------------------------------------------------------------------------

/// Password field with a show/hide toggle and an optional inline message.
#[component]
pub fn PasswordInput(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(optional, into)] placeholder: String,
    #[prop(optional, into)] autocomplete: String,
    #[prop(optional)] disabled: Option<Signal<bool>>,
    #[prop(optional)] message: Option<Signal<Option<String>>>,
) -> impl IntoView {
    let visible = RwSignal::new(false);
    let inline_message = move || message.and_then(|m| m.get());

    view! {
        <div class="form-field" class:has-error=move || inline_message().is_some()>
            <label class="form-label">
                {label}
                <span class="required">"*"</span>
            </label>
            <div class="password-field">
                <input
                    type=move || if visible.get() { "text" } else { "password" }
                    class="form-input"
                    placeholder=placeholder
                    autocomplete=autocomplete
                    disabled=move || disabled.map(|d| d.get()).unwrap_or(false)
                    required=true
                    prop:value=move || value.get()
                    on:input=move |e| {
                        value.set(event_target_value(&e));
                    }
                />
                <button
                    type="button"
                    class="password-toggle"
                    aria-label=move || if visible.get() { "Hide password" } else { "Show password" }
                    on:click=move |_| visible.update(|v| *v = !*v)
                >
                    {move || if visible.get() { "Hide" } else { "Show" }}
                </button>
            </div>
            {move || inline_message().map(|m| view! { <span class="form-error">{m}</span> })}
        </div>
    }
}

// -----------------------------------------------------------------------------
// 3. Checkbox
// -----------------------------------------------------------------------------

/// Checkbox input; the label is passed as children so it can hold links.
#[component]
pub fn Checkbox(
    checked: RwSignal<bool>,
    #[prop(optional)] required: bool,
    #[prop(optional)] disabled: Option<Signal<bool>>,
    children: Children,
) -> impl IntoView {
    view! {
        <label class="form-checkbox">
            <input
                type="checkbox"
                required=required
                disabled=move || disabled.map(|d| d.get()).unwrap_or(false)
                prop:checked=move || checked.get()
                on:change=move |e| {
                    checked.set(event_target_checked(&e));
                }
            />
            <span class="checkbox-label">{children()}</span>
        </label>
    }
}

// -----------------------------------------------------------------------------
// 4. RequirementList
// -----------------------------------------------------------------------------

/// Live password checklist. Hidden until something has been typed.
#[component]
pub fn RequirementList(password: RwSignal<String>) -> impl IntoView {
    let requirements = Memo::new(move |_| PasswordRequirements::evaluate(&password.get()));

    view! {
        <Show when=move || !password.get().is_empty()>
            <ul class="requirement-list">
                {move || {
                    requirements
                        .get()
                        .items()
                        .into_iter()
                        .map(|req| view! {
                            <li class="requirement" class:met=req.met>
                                <span class="requirement-icon">{if req.met { "✓" } else { "○" }}</span>
                                {req.label}
                            </li>
                        })
                        .collect_view()
                }}
            </ul>
        </Show>
    }
}
