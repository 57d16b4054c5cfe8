// =============================================================================
// Lumen Scene - Error Types
// =============================================================================

use thiserror::Error;

/// Configuration errors raised while composing a scene.
///
/// Every variant is produced at composition time; a composed `Scene` never
/// fails while frames are being evaluated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("unknown geometry kind `{0}` (expected sphere, box, torus or icosahedron)")]
    UnknownGeometry(String),

    #[error("unknown environment preset `{0}`")]
    UnknownEnvironment(String),

    #[error("unknown light kind `{0}` (expected ambient, directional or point)")]
    UnknownLight(String),

    #[error("unknown motion preset `{0}`")]
    UnknownMotion(String),

    #[error("invalid color `{0}` (expected #rgb or #rrggbb)")]
    InvalidColor(String),

    #[error("shape {index}: scale must be positive and finite, got {scale}")]
    InvalidScale { index: usize, scale: f32 },

    #[error("invalid material on shape {index}: {reason}")]
    InvalidMaterial { index: usize, reason: String },

    #[error("{field} is out of range: {value}")]
    InvalidValue { field: String, value: f32 },

    #[error("invalid particle field: {0}")]
    InvalidParticles(String),

    #[error("unknown scene preset `{0}`")]
    UnknownPreset(String),

    #[error("failed to parse scene config: {0}")]
    Parse(String),
}
