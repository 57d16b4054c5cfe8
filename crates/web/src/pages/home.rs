// =============================================================================
// Lumen Web - Landing Page
// =============================================================================
// Table of Contents:
// 1. Home Page
// 2. Feature Card
// =============================================================================

use leptos::prelude::*;
use leptos_meta::Title;

use crate::components::{Footer, Nav, SceneCanvas};

// -----------------------------------------------------------------------------
// 1. Home Page
// -----------------------------------------------------------------------------

struct Feature {
    title: &'static str,
    description: &'static str,
}

const FEATURES: [Feature; 3] = [
    Feature {
        title: "Enterprise Security",
        description: "Accounts and profiles are handled by a hosted identity platform with industry-standard protection.",
    },
    Feature {
        title: "Global Community",
        description: "Join thousands of developers shipping modern web applications every day.",
    },
    Feature {
        title: "Lightning Fast",
        description: "A compiled frontend that renders instantly and stays smooth on any device.",
    },
];

/// Landing page.
#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <Title text="Lumen · Build Amazing Web Applications" />
        <div class="page page-home">
            <Nav />

            <main class="hero">
                <SceneCanvas preset="hero" class="hero-background" />

                <div class="hero-grid">
                    <div class="hero-copy">
                        <div class="hero-badge">
                            <span class="hero-badge-dot"></span>
                            "Now in Beta · Join 50k+ developers"
                        </div>

                        <h1 class="hero-title">
                            "Build Amazing"
                            <span class="hero-title-accent">"Web Applications"</span>
                            <span class="hero-title-sub">"10x Faster Than Ever"</span>
                        </h1>

                        <p class="hero-description">
                            "Create powerful, scalable web applications with our modern development platform. "
                            "Ship faster, scale effortlessly, and delight your users with exceptional experiences."
                        </p>

                        <div class="hero-actions">
                            <a href="/signup" class="btn btn-primary btn-lg">"Get Started Free"</a>
                            <a href="#features" class="btn btn-outline btn-lg">"Learn More"</a>
                        </div>
                    </div>

                    <div class="hero-visual">
                        <SceneCanvas preset="side" class="side-scene" />
                    </div>
                </div>
            </main>

            <section id="features" class="features">
                <h2 class="section-title">"Everything you need to ship"</h2>
                <div class="features-grid">
                    {FEATURES
                        .iter()
                        .map(|f| view! { <FeatureCard title=f.title description=f.description /> })
                        .collect_view()}
                </div>
            </section>

            <section id="community" class="cta">
                <h2>"Ready to get started?"</h2>
                <p>"Create your free account in under a minute."</p>
                <a href="/signup" class="btn btn-primary btn-lg">"Create Account"</a>
            </section>

            <Footer />
        </div>
    }
}

// -----------------------------------------------------------------------------
// 2. Feature Card
// -----------------------------------------------------------------------------

#[component]
fn FeatureCard(title: &'static str, description: &'static str) -> impl IntoView {
    view! {
        <div class="feature-card">
            <h3 class="feature-title">{title}</h3>
            <p class="feature-description">{description}</p>
        </div>
    }
}
