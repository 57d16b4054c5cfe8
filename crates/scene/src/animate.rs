//! # Per-Frame Animator
//!
//! Pure functions of elapsed time. Nothing here keeps a clock: the host
//! passes the elapsed seconds it measured, so pauses and resumes need no
//! bookkeeping and the same input always yields the same `Pose`.
//!
//! ## Table of Contents
//!
//! 1. **Term** - sine wave or linear spin contribution
//! 2. **Motion** - per-axis rotation/offset terms and named presets
//! 3. **FloatParams** - the gentle "floating" wrapper around each shape
//! 4. **animate** - combines both into a `Pose`

use glam::Vec3;

use crate::error::SceneError;

// ============================================================================
// Term
// ============================================================================

/// One additive contribution to a rotation or offset channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Term {
    /// `amplitude * sin(frequency * t + phase.dot(base_position))`
    Wave {
        amplitude: f32,
        frequency: f32,
        phase: Vec3,
    },
    /// `rate * t`
    Spin { rate: f32 },
}

impl Term {
    pub const fn wave(amplitude: f32, frequency: f32) -> Self {
        Term::Wave {
            amplitude,
            frequency,
            phase: Vec3::ZERO,
        }
    }

    pub const fn spin(rate: f32) -> Self {
        Term::Spin { rate }
    }

    /// Sample the term at `t` seconds for an element placed at `base`.
    pub fn eval(&self, t: f32, base: Vec3) -> f32 {
        match *self {
            Term::Wave {
                amplitude,
                frequency,
                phase,
            } => amplitude * (frequency * t + phase.dot(base)).sin(),
            Term::Spin { rate } => rate * t,
        }
    }
}

fn sum(terms: &[Term], t: f32, base: Vec3) -> f32 {
    terms.iter().map(|term| term.eval(t, base)).sum()
}

// ============================================================================
// Motion
// ============================================================================

/// Rotation and position-offset channels for one element, one term list per
/// axis.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Motion {
    pub rotation: [Vec<Term>; 3],
    pub offset: [Vec<Term>; 3],
}

impl Motion {
    pub const PRESETS: [&'static str; 6] =
        ["still", "drift", "orbit_spin", "bob", "wave_sway", "phased_bob"];

    /// No motion of its own; only the floating wrapper moves it.
    pub fn still() -> Self {
        Self::default()
    }

    /// Slow rocking with a vertical bob (landing-page geometry).
    pub fn drift() -> Self {
        Self {
            rotation: [vec![Term::wave(0.2, 0.5)], vec![Term::wave(0.3, 0.3)], vec![]],
            offset: [vec![], vec![Term::wave(0.2, 0.4)], vec![]],
        }
    }

    /// Continuous spin on X and Y (large accent spheres).
    pub fn orbit_spin() -> Self {
        Self {
            rotation: [vec![Term::spin(0.2)], vec![Term::spin(0.1)], vec![]],
            offset: Default::default(),
        }
    }

    /// Softer rocking with a deeper bob (auth background orbs).
    pub fn bob() -> Self {
        Self {
            rotation: [vec![Term::wave(0.2, 0.3)], vec![Term::wave(0.3, 0.2)], vec![]],
            offset: [vec![], vec![Term::wave(0.3, 0.5)], vec![]],
        }
    }

    /// Roll around Z while swaying sideways (wireframe tori).
    pub fn wave_sway() -> Self {
        Self {
            rotation: [vec![], vec![], vec![Term::spin(0.1)]],
            offset: [vec![Term::wave(0.5, 0.2)], vec![], vec![]],
        }
    }

    /// Like `drift`, but the bob is phase-shifted by the element's X
    /// position so neighbours do not move in lockstep.
    pub fn phased_bob() -> Self {
        Self {
            rotation: [vec![Term::wave(0.3, 0.5)], vec![Term::wave(0.4, 0.3)], vec![]],
            offset: [
                vec![],
                vec![Term::Wave {
                    amplitude: 0.3,
                    frequency: 0.4,
                    phase: Vec3::X,
                }],
                vec![],
            ],
        }
    }

    /// Look up a named preset.
    pub fn preset(name: &str) -> Result<Self, SceneError> {
        match name.trim() {
            "still" => Ok(Self::still()),
            "drift" => Ok(Self::drift()),
            "orbit_spin" => Ok(Self::orbit_spin()),
            "bob" => Ok(Self::bob()),
            "wave_sway" => Ok(Self::wave_sway()),
            "phased_bob" => Ok(Self::phased_bob()),
            other => Err(SceneError::UnknownMotion(other.to_string())),
        }
    }

    fn rotation_at(&self, t: f32, base: Vec3) -> Vec3 {
        Vec3::new(
            sum(&self.rotation[0], t, base),
            sum(&self.rotation[1], t, base),
            sum(&self.rotation[2], t, base),
        )
    }

    fn offset_at(&self, t: f32, base: Vec3) -> Vec3 {
        Vec3::new(
            sum(&self.offset[0], t, base),
            sum(&self.offset[1], t, base),
            sum(&self.offset[2], t, base),
        )
    }
}

// ============================================================================
// FloatParams
// ============================================================================

/// Parameters of the floating wrapper every decorative element sits in.
///
/// With `u = (t + seed) / 4 * speed`:
/// rotation = (cos u / 8, sin u / 8, sin u / 20) * rotation_intensity,
/// vertical offset = sin u / 10 * float_intensity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatParams {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
}

impl Default for FloatParams {
    fn default() -> Self {
        Self {
            speed: 1.0,
            rotation_intensity: 1.0,
            float_intensity: 1.0,
        }
    }
}

impl FloatParams {
    /// Disabled wrapper.
    pub const NONE: FloatParams = FloatParams {
        speed: 0.0,
        rotation_intensity: 0.0,
        float_intensity: 0.0,
    };

    /// Time offset derived from the base position so sibling wrappers start
    /// at different points of their cycle.
    pub fn seed(base: Vec3) -> f32 {
        base.dot(Vec3::new(12.9898, 78.233, 37.719)).rem_euclid(1000.0)
    }

    fn pose(&self, t: f32, base: Vec3) -> Pose {
        let u = (t + Self::seed(base)) / 4.0 * self.speed;
        let (sin, cos) = u.sin_cos();
        Pose {
            rotation: Vec3::new(cos / 8.0, sin / 8.0, sin / 20.0) * self.rotation_intensity,
            offset: Vec3::new(0.0, sin / 10.0 * self.float_intensity, 0.0),
        }
    }
}

// ============================================================================
// animate
// ============================================================================

/// Presentation transform of one element for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    /// Euler angles (XYZ), radians.
    pub rotation: Vec3,
    /// Added to the element's base position.
    pub offset: Vec3,
}

impl Pose {
    pub fn position(&self, base: Vec3) -> Vec3 {
        base + self.offset
    }
}

/// Compute the pose of an element at `elapsed` seconds.
///
/// The floating wrapper and the element's own motion are combined by
/// summing angles and offsets; the angles involved are small enough that
/// this matches nesting the two rotations closely.
pub fn animate(elapsed: f32, base: Vec3, motion: &Motion, float: &FloatParams) -> Pose {
    let wrapper = float.pose(elapsed, base);
    Pose {
        rotation: wrapper.rotation + motion.rotation_at(elapsed, base),
        offset: wrapper.offset + motion.offset_at(elapsed, base),
    }
}
