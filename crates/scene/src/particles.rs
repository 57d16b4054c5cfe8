//! # Particle Field Generator
//!
//! Fixed-size point clouds generated once per scene composition.
//!
//! ## Table of Contents
//!
//! 1. **ParticlePoint** - one coordinate triple
//! 2. **Distribution** - uniform cube or jittered ring
//! 3. **Generation** - `generate` / `generate_field`
//! 4. **ParticleField** - points plus draw style and spin rate

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::SceneError;

// ============================================================================
// ParticlePoint
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticlePoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl ParticlePoint {
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

// ============================================================================
// Distribution
// ============================================================================

/// How points are scattered.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Distribution {
    /// Each coordinate independently uniform over `[-half_extent, half_extent]`.
    UniformCube { half_extent: f32 },
    /// Points evenly spaced by angle around the Z axis. Radius is
    /// `base_radius + U[0,1) * radial_jitter`, depth is
    /// `(U[0,1) - 0.5) * depth_jitter`.
    Ring {
        base_radius: f32,
        radial_jitter: f32,
        depth_jitter: f32,
    },
}

impl Distribution {
    pub fn validate(&self) -> Result<(), SceneError> {
        let check = |name: &str, value: f32| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(SceneError::InvalidParticles(format!(
                    "{name} must be a non-negative number, got {value}"
                )))
            }
        };

        match *self {
            Distribution::UniformCube { half_extent } => check("half_extent", half_extent),
            Distribution::Ring {
                base_radius,
                radial_jitter,
                depth_jitter,
            } => {
                check("base_radius", base_radius)?;
                check("radial_jitter", radial_jitter)?;
                check("depth_jitter", depth_jitter)
            }
        }
    }
}

// ============================================================================
// Generation
// ============================================================================

/// Largest particle count a composed scene accepts.
pub const MAX_PARTICLES: usize = 100_000;

/// Generate exactly `count` points. Order is meaningful for the ring
/// distribution (point `i` sits at angle `i / count * 2π`).
pub fn generate<R: Rng + ?Sized>(
    count: usize,
    distribution: &Distribution,
    rng: &mut R,
) -> Vec<ParticlePoint> {
    let mut points = Vec::with_capacity(count.min(MAX_PARTICLES));

    match *distribution {
        Distribution::UniformCube { half_extent } => {
            let span = half_extent * 2.0;
            for _ in 0..count {
                points.push(ParticlePoint {
                    x: (rng.gen::<f32>() - 0.5) * span,
                    y: (rng.gen::<f32>() - 0.5) * span,
                    z: (rng.gen::<f32>() - 0.5) * span,
                });
            }
        }
        Distribution::Ring {
            base_radius,
            radial_jitter,
            depth_jitter,
        } => {
            for i in 0..count {
                let angle = (i as f32 / count as f32) * TAU;
                let radius = base_radius + rng.gen::<f32>() * radial_jitter;
                points.push(ParticlePoint {
                    x: angle.cos() * radius,
                    y: angle.sin() * radius,
                    z: (rng.gen::<f32>() - 0.5) * depth_jitter,
                });
            }
        }
    }

    points
}

/// Generate a field with default styling from a fresh thread-local RNG.
pub fn generate_field(count: usize, distribution: &Distribution) -> ParticleField {
    ParticleField {
        points: generate(count, distribution, &mut rand::thread_rng()),
        style: PointStyle::default(),
        spin: Vec3::ZERO,
    }
}

// ============================================================================
// ParticleField
// ============================================================================

/// Draw style shared by every point in a field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointStyle {
    /// World-space point size.
    pub size: f32,
    pub color: Rgb,
    pub opacity: f32,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            size: 0.02,
            color: Rgb::new(0x63, 0x66, 0xf1),
            opacity: 0.6,
        }
    }
}

/// A generated point cloud. The buffer is never mutated after generation;
/// motion is a whole-field rotation of `spin * elapsed` radians.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleField {
    pub points: Vec<ParticlePoint>,
    pub style: PointStyle,
    /// Rotation rate per axis, radians per second.
    pub spin: Vec3,
}

impl ParticleField {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Euler rotation (XYZ) of the whole field at `elapsed` seconds.
    pub fn rotation_at(&self, elapsed: f32) -> Vec3 {
        self.spin * elapsed
    }
}
