// =============================================================================
// Lumen Web - Footer Component
// =============================================================================

use leptos::prelude::*;

/// Global footer shown on the landing page.
#[component]
pub fn Footer() -> impl IntoView {
    let year = chrono::Utc::now().format("%Y").to_string();

    view! {
        <footer class="footer">
            <div class="footer-main">
                <div class="footer-brand-col">
                    <a href="/" class="footer-logo">"Lumen"</a>
                    <p class="footer-tagline">"Build amazing web applications."</p>
                </div>

                <div class="footer-links-grid">
                    <div class="footer-link-col">
                        <h5 class="footer-col-title">"Product"</h5>
                        <a href="/#features">"Features"</a>
                        <a href="/signup">"Get started"</a>
                    </div>
                    <div class="footer-link-col">
                        <h5 class="footer-col-title">"Account"</h5>
                        <a href="/login">"Sign in"</a>
                        <a href="/signup">"Create account"</a>
                    </div>
                </div>
            </div>

            <div class="footer-bottom">
                <span>{format!("© {} Lumen. All rights reserved.", year)}</span>
            </div>
        </footer>
    }
}
