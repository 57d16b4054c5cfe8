// =============================================================================
// Lumen Scene - Embedded Presets
// =============================================================================
// The three site backgrounds ship as RON documents compiled into the
// binary, so the web crate needs no asset fetch before the first frame.
// =============================================================================

use crate::compose::{compose, Scene, SceneConfig};
use crate::error::SceneError;

const HERO: &str = include_str!("../assets/scenes/hero.ron");
const SIDE: &str = include_str!("../assets/scenes/side.ron");
const AUTH_BACKGROUND: &str = include_str!("../assets/scenes/auth_background.ron");

/// Names accepted by [`config`] and [`load`].
pub const NAMES: [&str; 3] = ["hero", "side", "auth_background"];

/// Parse a RON scene document.
pub fn parse(source: &str) -> Result<SceneConfig, SceneError> {
    ron::from_str(source).map_err(|e| SceneError::Parse(e.to_string()))
}

/// Configuration of a named preset.
pub fn config(name: &str) -> Result<SceneConfig, SceneError> {
    let source = match name {
        "hero" => HERO,
        "side" => SIDE,
        "auth_background" => AUTH_BACKGROUND,
        other => return Err(SceneError::UnknownPreset(other.to_string())),
    };
    parse(source)
}

/// Compose a named preset with a freshly generated particle field.
pub fn load(name: &str) -> Result<Scene, SceneError> {
    compose(&config(name)?)
}
