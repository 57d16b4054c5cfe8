//! # Lumen Scene
//!
//! Decorative 3D backgrounds for the Lumen site, described as data and
//! evaluated as pure functions of elapsed time.
//!
//! ## Table of Contents
//!
//! 1. **color** - `Rgb` hex parsing and CSS formatting
//! 2. **shape** - `ShapeDescriptor`, `GeometryKind`, `MaterialStyle`
//! 3. **particles** - Particle Field Generator (uniform cube, ring)
//! 4. **animate** - Per-Frame Animator (`Motion`, `FloatParams`, `Pose`)
//! 5. **compose** - Scene Composer (`SceneConfig` -> `Scene`)
//! 6. **camera** - pinhole projection used by 2D canvas hosts
//! 7. **presets** - embedded RON scenes (hero, side, auth_background)
//!
//! Nothing here holds a rendering handle. A host (the web crate's canvas
//! loop) asks `Scene::frame(elapsed)` for poses and draws them itself.

pub mod animate;
pub mod camera;
pub mod color;
pub mod compose;
pub mod error;
pub mod particles;
pub mod presets;
pub mod shape;

pub use animate::{animate, FloatParams, Motion, Pose, Term};
pub use camera::{Camera, Projected};
pub use color::Rgb;
pub use compose::{
    compose, compose_with_rng, Backdrop, ElementFrame, Environment, FloatingElement, Frame, Light,
    LightKind, Scene, SceneConfig,
};
pub use error::SceneError;
pub use particles::{
    generate, generate_field, Distribution, ParticleField, ParticlePoint, PointStyle,
    MAX_PARTICLES,
};
pub use shape::{GeometryKind, MaterialStyle, ShapeDescriptor};
