// =============================================================================
// Lumen Web - UI Components
// =============================================================================
// Table of Contents:
// 1. Common Components
// 2. Form Components
// 3. Navigation & Footer
// 4. Scene Canvas
// =============================================================================

pub mod common;
pub mod footer;
pub mod forms;
pub mod nav;
pub mod scene_view;

pub use common::{Button, ButtonVariant, Card, ErrorBanner, InlineLoader};
pub use footer::Footer;
pub use forms::{Checkbox, PasswordInput, RequirementList, TextInput};
pub use nav::Nav;
pub use scene_view::SceneCanvas;
