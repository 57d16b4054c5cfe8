// =============================================================================
// Lumen Scene - Scene Composer
// =============================================================================
// Table of Contents:
// 1. Config Types (RON / serde)
// 2. Environment & Lights
// 3. Scene
// 4. Composition
// =============================================================================

use std::str::FromStr;

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::animate::{animate, FloatParams, Motion, Pose};
use crate::color::Rgb;
use crate::error::SceneError;
use crate::particles::{generate, Distribution, ParticleField, PointStyle, MAX_PARTICLES};
use crate::shape::{GeometryKind, MaterialStyle, ShapeDescriptor};

// -----------------------------------------------------------------------------
// 1. Config Types
// -----------------------------------------------------------------------------

/// Declarative description of a scene, usually loaded from RON.
///
/// Names (environment, light kind, geometry, motion) stay plain strings
/// here and are resolved by [`compose`], so a typo is reported as a
/// `SceneError` naming the bad value rather than as a parse position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub environment: String,
    #[serde(default)]
    pub lights: Vec<LightConfig>,
    #[serde(default)]
    pub particles: Option<ParticleConfig>,
    #[serde(default)]
    pub shapes: Vec<ShapeConfig>,
    #[serde(default)]
    pub backdrop: Option<BackdropConfig>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightConfig {
    pub kind: String,
    #[serde(default)]
    pub position: [f32; 3],
    pub intensity: f32,
    #[serde(default = "white")]
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticleConfig {
    pub count: usize,
    pub distribution: Distribution,
    #[serde(default)]
    pub style: PointStyleConfig,
    /// Radians per second around X, Y and Z.
    #[serde(default)]
    pub spin: [f32; 3],
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointStyleConfig {
    pub size: f32,
    pub color: String,
    pub opacity: f32,
}

impl Default for PointStyleConfig {
    fn default() -> Self {
        let style = PointStyle::default();
        Self {
            size: style.size,
            color: style.color.to_string(),
            opacity: style.opacity,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeConfig {
    pub position: [f32; 3],
    pub color: String,
    #[serde(default = "one")]
    pub scale: f32,
    pub geometry: String,
    #[serde(default)]
    pub material: MaterialStyle,
    #[serde(default = "still")]
    pub motion: String,
    #[serde(default)]
    pub float: FloatConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatConfig {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
}

impl Default for FloatConfig {
    fn default() -> Self {
        let params = FloatParams::default();
        Self {
            speed: params.speed,
            rotation_intensity: params.rotation_intensity,
            float_intensity: params.float_intensity,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackdropConfig {
    pub position: [f32; 3],
    pub size: [f32; 2],
    pub color: String,
    #[serde(default = "one")]
    pub opacity: f32,
}

fn white() -> String {
    Rgb::WHITE.to_string()
}

fn one() -> f32 {
    1.0
}

fn still() -> String {
    "still".to_string()
}

// -----------------------------------------------------------------------------
// 2. Environment & Lights
// -----------------------------------------------------------------------------

/// Image-based lighting preset. Hosts without environment maps use
/// [`Environment::sky`] as a background gradient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Environment {
    Dawn,
    Night,
    City,
    Sunset,
    Studio,
}

impl Environment {
    /// Top and bottom colors of the fallback sky gradient.
    pub fn sky(&self) -> (Rgb, Rgb) {
        match self {
            Environment::Dawn => (Rgb::new(0xf8, 0xfa, 0xfc), Rgb::new(0xe0, 0xe7, 0xff)),
            Environment::Night => (Rgb::new(0x0f, 0x17, 0x2a), Rgb::new(0x1e, 0x1b, 0x4b)),
            Environment::City => (Rgb::new(0xf1, 0xf5, 0xf9), Rgb::new(0xdb, 0xea, 0xfe)),
            Environment::Sunset => (Rgb::new(0xfd, 0xe6, 0x8a), Rgb::new(0xf4, 0x72, 0xb6)),
            Environment::Studio => (Rgb::new(0xff, 0xff, 0xff), Rgb::new(0xe2, 0xe8, 0xf0)),
        }
    }
}

impl FromStr for Environment {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dawn" => Ok(Environment::Dawn),
            "night" => Ok(Environment::Night),
            "city" => Ok(Environment::City),
            "sunset" => Ok(Environment::Sunset),
            "studio" => Ok(Environment::Studio),
            _ => Err(SceneError::UnknownEnvironment(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LightKind {
    Ambient,
    Directional,
    Point,
}

impl FromStr for LightKind {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ambient" => Ok(LightKind::Ambient),
            "directional" => Ok(LightKind::Directional),
            "point" => Ok(LightKind::Point),
            _ => Err(SceneError::UnknownLight(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    /// Ignored for ambient lights.
    pub position: Vec3,
    pub intensity: f32,
    pub color: Rgb,
}

/// Flat plane behind everything else.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Backdrop {
    pub position: Vec3,
    pub size: Vec2,
    pub color: Rgb,
    pub opacity: f32,
}

// -----------------------------------------------------------------------------
// 3. Scene
// -----------------------------------------------------------------------------

/// A shape inside its floating wrapper.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatingElement {
    pub shape: ShapeDescriptor,
    pub motion: Motion,
    pub float: FloatParams,
}

impl FloatingElement {
    pub fn pose_at(&self, elapsed: f32) -> Pose {
        animate(elapsed, self.shape.position, &self.motion, &self.float)
    }
}

/// A composed, immutable scene. Element count and order are fixed for its
/// whole lifetime.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    environment: Environment,
    lights: Vec<Light>,
    particles: Option<ParticleField>,
    elements: Vec<FloatingElement>,
    backdrop: Option<Backdrop>,
}

/// Pose of one element for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementFrame<'a> {
    pub shape: &'a ShapeDescriptor,
    pub pose: Pose,
}

impl ElementFrame<'_> {
    pub fn position(&self) -> Vec3 {
        self.pose.position(self.shape.position)
    }
}

/// Everything a host needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame<'a> {
    pub elapsed: f32,
    pub particle_rotation: Vec3,
    /// Same order as the scene's elements.
    pub elements: Vec<ElementFrame<'a>>,
}

impl Scene {
    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn particles(&self) -> Option<&ParticleField> {
        self.particles.as_ref()
    }

    pub fn elements(&self) -> &[FloatingElement] {
        &self.elements
    }

    pub fn backdrop(&self) -> Option<&Backdrop> {
        self.backdrop.as_ref()
    }

    /// Evaluate every animated element at `elapsed` seconds.
    pub fn frame(&self, elapsed: f32) -> Frame<'_> {
        Frame {
            elapsed,
            particle_rotation: self
                .particles
                .as_ref()
                .map(|field| field.rotation_at(elapsed))
                .unwrap_or(Vec3::ZERO),
            elements: self
                .elements
                .iter()
                .map(|element| ElementFrame {
                    shape: &element.shape,
                    pose: element.pose_at(elapsed),
                })
                .collect(),
        }
    }
}

// -----------------------------------------------------------------------------
// 4. Composition
// -----------------------------------------------------------------------------

/// Compose a scene, generating its particle field from the thread RNG.
pub fn compose(config: &SceneConfig) -> Result<Scene, SceneError> {
    compose_with_rng(config, &mut rand::thread_rng())
}

/// Compose a scene with an explicit random source for the particle field.
pub fn compose_with_rng<R: Rng + ?Sized>(
    config: &SceneConfig,
    rng: &mut R,
) -> Result<Scene, SceneError> {
    let environment: Environment = config.environment.parse()?;

    let lights = config
        .lights
        .iter()
        .enumerate()
        .map(|(index, light)| {
            let field = |name: &str| format!("light {index} {name}");
            finite_all(&field("position"), &light.position)?;
            if !(light.intensity.is_finite() && light.intensity >= 0.0) {
                return Err(SceneError::InvalidValue {
                    field: field("intensity"),
                    value: light.intensity,
                });
            }
            Ok(Light {
                kind: light.kind.parse()?,
                position: Vec3::from_array(light.position),
                intensity: light.intensity,
                color: light.color.parse()?,
            })
        })
        .collect::<Result<Vec<_>, SceneError>>()?;

    let elements = config
        .shapes
        .iter()
        .enumerate()
        .map(|(index, shape)| compose_shape(index, shape))
        .collect::<Result<Vec<_>, SceneError>>()?;

    let particles = match &config.particles {
        Some(particles) => Some(compose_particles(particles, rng)?),
        None => None,
    };

    let backdrop = match &config.backdrop {
        Some(backdrop) => Some(compose_backdrop(backdrop)?),
        None => None,
    };


    log::debug!(
        "composed {:?} scene: {} lights, {} elements, {} particles",
        environment,
        lights.len(),
        elements.len(),
        particles.as_ref().map_or(0, ParticleField::len),
    );

    Ok(Scene {
        environment,
        lights,
        particles,
        elements,
        backdrop,
    })
}

fn compose_shape(index: usize, config: &ShapeConfig) -> Result<FloatingElement, SceneError> {
    let geometry: GeometryKind = config.geometry.parse().map_err(|err| {
        log::warn!("shape {index}: {err}");
        err
    })?;

    if !(config.scale.is_finite() && config.scale > 0.0) {
        return Err(SceneError::InvalidScale {
            index,
            scale: config.scale,
        });
    }
    config.material.validate(index)?;
    finite_all(&format!("shape {index} position"), &config.position)?;
    finite_all(
        &format!("shape {index} float"),
        &[
            config.float.speed,
            config.float.rotation_intensity,
            config.float.float_intensity,
        ],
    )?;

    Ok(FloatingElement {
        shape: ShapeDescriptor {
            position: Vec3::from_array(config.position),
            color: config.color.parse()?,
            scale: config.scale,
            geometry,
            material: config.material,
        },
        motion: Motion::preset(&config.motion)?,
        float: FloatParams {
            speed: config.float.speed,
            rotation_intensity: config.float.rotation_intensity,
            float_intensity: config.float.float_intensity,
        },
    })
}

fn compose_particles<R: Rng + ?Sized>(
    config: &ParticleConfig,
    rng: &mut R,
) -> Result<ParticleField, SceneError> {
    if config.count > MAX_PARTICLES {
        return Err(SceneError::InvalidParticles(format!(
            "count {} exceeds the limit of {MAX_PARTICLES}",
            config.count
        )));
    }
    config.distribution.validate()?;
    finite_all("particle spin", &config.spin)?;
    if !(config.style.size.is_finite() && config.style.size > 0.0) {
        return Err(SceneError::InvalidParticles(format!(
            "point size must be positive, got {}",
            config.style.size
        )));
    }

    Ok(ParticleField {
        points: generate(config.count, &config.distribution, rng),
        style: PointStyle {
            size: config.style.size,
            color: config.style.color.parse()?,
            opacity: config.style.opacity.clamp(0.0, 1.0),
        },
        spin: Vec3::from_array(config.spin),
    })
}

fn compose_backdrop(config: &BackdropConfig) -> Result<Backdrop, SceneError> {
    finite_all("backdrop position", &config.position)?;
    if let Some(&bad) = config.size.iter().find(|v| !(v.is_finite() && **v > 0.0)) {
        return Err(SceneError::InvalidValue {
            field: "backdrop size".to_string(),
            value: bad,
        });
    }

    Ok(Backdrop {
        position: Vec3::from_array(config.position),
        size: Vec2::from_array(config.size),
        color: config.color.parse()?,
        opacity: config.opacity.clamp(0.0, 1.0),
    })
}

/// First non-finite component, if any, becomes an `InvalidValue` naming `field`.
fn finite_all(field: &str, values: &[f32]) -> Result<(), SceneError> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(&value) => Err(SceneError::InvalidValue {
            field: field.to_string(),
            value,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn shape(geometry: &str, position: [f32; 3]) -> ShapeConfig {
        ShapeConfig {
            position,
            color: "#3b82f6".to_string(),
            scale: 0.8,
            geometry: geometry.to_string(),
            material: MaterialStyle::default(),
            motion: "drift".to_string(),
            float: FloatConfig::default(),
        }
    }

    fn config() -> SceneConfig {
        SceneConfig {
            environment: "dawn".to_string(),
            lights: vec![LightConfig {
                kind: "point".to_string(),
                position: [-10.0, -10.0, -5.0],
                intensity: 0.5,
                color: "#6366f1".to_string(),
            }],
            particles: Some(ParticleConfig {
                count: 50,
                distribution: Distribution::UniformCube { half_extent: 10.0 },
                style: PointStyleConfig::default(),
                spin: [0.05, 0.02, 0.0],
            }),
            shapes: vec![shape("sphere", [-4.0, 2.0, -2.0]), shape("torus", [4.0, -1.0, -3.0])],
            backdrop: None,
        }
    }

    #[test]
    fn test_compose_preserves_order_and_count() {
        let scene = compose_with_rng(&config(), &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(scene.environment(), Environment::Dawn);
        assert_eq!(scene.lights().len(), 1);
        assert_eq!(scene.lights()[0].kind, LightKind::Point);
        assert_eq!(scene.particles().map(ParticleField::len), Some(50));

        let kinds: Vec<_> = scene.elements().iter().map(|e| e.shape.geometry).collect();
        assert_eq!(kinds, vec![GeometryKind::Sphere, GeometryKind::Torus]);
    }

    #[test]
    fn test_unknown_geometry_fails_at_composition() {
        let mut bad = config();
        bad.shapes.push(shape("dodecahedron", [0.0, 0.0, 0.0]));
        assert_eq!(
            compose(&bad),
            Err(SceneError::UnknownGeometry("dodecahedron".to_string()))
        );
    }

    #[test]
    fn test_other_config_errors() {
        let mut bad = config();
        bad.environment = "forest".to_string();
        assert!(matches!(compose(&bad), Err(SceneError::UnknownEnvironment(_))));

        let mut bad = config();
        bad.lights[0].kind = "spot".to_string();
        assert!(matches!(compose(&bad), Err(SceneError::UnknownLight(_))));

        let mut bad = config();
        bad.shapes[1].scale = 0.0;
        assert_eq!(
            compose(&bad),
            Err(SceneError::InvalidScale { index: 1, scale: 0.0 })
        );

        let mut bad = config();
        bad.shapes[0].color = "blue".to_string();
        assert!(matches!(compose(&bad), Err(SceneError::InvalidColor(_))));

        let mut bad = config();
        bad.shapes[0].motion = "spiral".to_string();
        assert!(matches!(compose(&bad), Err(SceneError::UnknownMotion(_))));
    }

    #[test]
    fn test_frame_does_not_touch_descriptors() {
        let scene = compose_with_rng(&config(), &mut StdRng::seed_from_u64(2)).unwrap();
        let before = scene.clone();

        for t in [0.0, 1.0, 2.5, 60.0] {
            let frame = scene.frame(t);
            assert_eq!(frame.elements.len(), 2);
            for (element, framed) in scene.elements().iter().zip(&frame.elements) {
                assert!(std::ptr::eq(&element.shape, framed.shape));
            }
        }
        assert_eq!(scene, before);
    }

    #[test]
    fn test_frame_is_repeatable() {
        let scene = compose_with_rng(&config(), &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(scene.frame(12.5), scene.frame(12.5));
    }

    #[test]
    fn test_particle_rotation_follows_spin() {
        let mut cfg = config();
        if let Some(particles) = cfg.particles.as_mut() {
            particles.spin = [0.5, 0.25, 0.0];
        }
        let scene = compose_with_rng(&cfg, &mut StdRng::seed_from_u64(4)).unwrap();
        assert_eq!(scene.frame(2.0).particle_rotation, Vec3::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn test_empty_scene() {
        let scene = compose(&SceneConfig {
            environment: "night".to_string(),
            lights: vec![],
            particles: None,
            shapes: vec![],
            backdrop: None,
        })
        .unwrap();
        let frame = scene.frame(1.0);
        assert!(frame.elements.is_empty());
        assert_eq!(frame.particle_rotation, Vec3::ZERO);
    }

    #[test]
    fn test_non_finite_numbers_rejected() {
        let mut bad = config();
        bad.shapes[0].position = [f32::NAN, 0.0, 0.0];
        assert!(matches!(
            compose(&bad),
            Err(SceneError::InvalidValue { ref field, .. }) if field == "shape 0 position"
        ));

        let mut bad = config();
        bad.shapes[1].float.speed = f32::INFINITY;
        assert!(matches!(
            compose(&bad),
            Err(SceneError::InvalidValue { ref field, .. }) if field == "shape 1 float"
        ));

        let mut bad = config();
        bad.lights[0].position = [0.0, f32::NEG_INFINITY, 0.0];
        assert_eq!(
            compose(&bad),
            Err(SceneError::InvalidValue {
                field: "light 0 position".to_string(),
                value: f32::NEG_INFINITY,
            })
        );

        let mut bad = config();
        if let Some(particles) = bad.particles.as_mut() {
            particles.spin = [0.0, f32::NAN, 0.0];
        }
        assert!(matches!(
            compose(&bad),
            Err(SceneError::InvalidValue { ref field, .. }) if field == "particle spin"
        ));
    }

    #[test]
    fn test_light_intensity_must_be_non_negative() {
        let mut bad = config();
        bad.lights[0].intensity = -0.5;
        assert_eq!(
            compose(&bad),
            Err(SceneError::InvalidValue {
                field: "light 0 intensity".to_string(),
                value: -0.5,
            })
        );

        let mut bad = config();
        bad.lights[0].intensity = f32::NAN;
        assert!(matches!(compose(&bad), Err(SceneError::InvalidValue { .. })));

        let mut dark = config();
        dark.lights[0].intensity = 0.0;
        assert!(compose(&dark).is_ok());
    }

    #[test]
    fn test_backdrop_checked() {
        let backdrop = BackdropConfig {
            position: [0.0, 0.0, -10.0],
            size: [20.0, 20.0],
            color: "#f8fafc".to_string(),
            opacity: 1.0,
        };

        let mut ok = config();
        ok.backdrop = Some(backdrop.clone());
        let scene = compose(&ok).unwrap();
        assert_eq!(scene.backdrop().map(|b| b.size), Some(Vec2::new(20.0, 20.0)));

        let mut bad = config();
        bad.backdrop = Some(BackdropConfig {
            size: [20.0, f32::INFINITY],
            ..backdrop.clone()
        });
        assert_eq!(
            compose(&bad),
            Err(SceneError::InvalidValue {
                field: "backdrop size".to_string(),
                value: f32::INFINITY,
            })
        );

        let mut bad = config();
        bad.backdrop = Some(BackdropConfig {
            position: [f32::NAN, 0.0, 0.0],
            ..backdrop
        });
        assert!(matches!(
            compose(&bad),
            Err(SceneError::InvalidValue { ref field, .. }) if field == "backdrop position"
        ));
    }

    #[test]
    fn test_oversized_particle_count_rejected() {
        for count in [MAX_PARTICLES + 1, usize::MAX] {
            let mut bad = config();
            if let Some(particles) = bad.particles.as_mut() {
                particles.count = count;
            }
            assert!(matches!(compose(&bad), Err(SceneError::InvalidParticles(_))));
        }

        let mut ok = config();
        if let Some(particles) = ok.particles.as_mut() {
            particles.count = MAX_PARTICLES;
        }
        let scene = compose_with_rng(&ok, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(scene.particles().map(ParticleField::len), Some(MAX_PARTICLES));
    }
}
