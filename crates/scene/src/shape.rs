// =============================================================================
// Lumen Scene - Shape Descriptors
// =============================================================================
// Table of Contents:
// 1. GeometryKind
// 2. MaterialStyle
// 3. ShapeDescriptor
// =============================================================================

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::SceneError;

// -----------------------------------------------------------------------------
// 1. GeometryKind
// -----------------------------------------------------------------------------

/// Primitive mesh a decorative element is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    /// Unit-radius sphere.
    Sphere,
    /// Cube with an edge of 1.5 units.
    Box,
    /// Ring with major radius 1 and tube radius 0.4.
    Torus,
    /// Low-poly unit icosahedron.
    Icosahedron,
}

impl GeometryKind {
    /// Radius of the bounding sphere at scale 1, used for depth sorting and
    /// sizing by 2D hosts.
    pub fn bounding_radius(&self) -> f32 {
        match self {
            GeometryKind::Sphere | GeometryKind::Icosahedron => 1.0,
            GeometryKind::Box => 0.75 * 3f32.sqrt(),
            GeometryKind::Torus => 1.4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GeometryKind::Sphere => "sphere",
            GeometryKind::Box => "box",
            GeometryKind::Torus => "torus",
            GeometryKind::Icosahedron => "icosahedron",
        }
    }
}

impl FromStr for GeometryKind {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sphere" => Ok(GeometryKind::Sphere),
            "box" => Ok(GeometryKind::Box),
            "torus" => Ok(GeometryKind::Torus),
            "icosahedron" => Ok(GeometryKind::Icosahedron),
            _ => Err(SceneError::UnknownGeometry(s.to_string())),
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// -----------------------------------------------------------------------------
// 2. MaterialStyle
// -----------------------------------------------------------------------------

/// Surface look of a shape. `distort` is the amplitude of the wobbly
/// surface effect; hosts that cannot displace vertices may ignore it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialStyle {
    pub opacity: f32,
    pub distort: f32,
    pub wireframe: bool,
}

impl Default for MaterialStyle {
    fn default() -> Self {
        Self {
            opacity: 0.8,
            distort: 0.3,
            wireframe: false,
        }
    }
}

impl MaterialStyle {
    pub(crate) fn validate(&self, index: usize) -> Result<(), SceneError> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(SceneError::InvalidMaterial {
                index,
                reason: format!("opacity {} is outside [0, 1]", self.opacity),
            });
        }
        if !self.distort.is_finite() || self.distort < 0.0 {
            return Err(SceneError::InvalidMaterial {
                index,
                reason: format!("distort {} must be a non-negative number", self.distort),
            });
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// 3. ShapeDescriptor
// -----------------------------------------------------------------------------

/// One decorative element. Immutable once composed; per-frame motion is
/// reported separately as a `Pose` and never written back here.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeDescriptor {
    pub position: Vec3,
    pub color: Rgb,
    pub scale: f32,
    pub geometry: GeometryKind,
    pub material: MaterialStyle,
}

impl ShapeDescriptor {
    /// World-space bounding radius at this descriptor's scale.
    pub fn radius(&self) -> f32 {
        self.geometry.bounding_radius() * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_names_round_trip() {
        for kind in [
            GeometryKind::Sphere,
            GeometryKind::Box,
            GeometryKind::Torus,
            GeometryKind::Icosahedron,
        ] {
            assert_eq!(kind.name().parse::<GeometryKind>().unwrap(), kind);
        }
        assert_eq!(" Torus ".parse::<GeometryKind>().unwrap(), GeometryKind::Torus);
    }

    #[test]
    fn test_unknown_geometry() {
        assert_eq!(
            "pyramid".parse::<GeometryKind>(),
            Err(SceneError::UnknownGeometry("pyramid".to_string()))
        );
    }

    #[test]
    fn test_material_validation() {
        assert!(MaterialStyle::default().validate(0).is_ok());

        let too_opaque = MaterialStyle { opacity: 1.5, ..Default::default() };
        assert!(matches!(
            too_opaque.validate(3),
            Err(SceneError::InvalidMaterial { index: 3, .. })
        ));

        let negative = MaterialStyle { distort: -0.1, ..Default::default() };
        assert!(negative.validate(0).is_err());
    }

    #[test]
    fn test_radius_follows_scale() {
        let shape = ShapeDescriptor {
            position: Vec3::ZERO,
            color: Rgb::WHITE,
            scale: 2.0,
            geometry: GeometryKind::Sphere,
            material: MaterialStyle::default(),
        };
        assert_eq!(shape.radius(), 2.0);
    }
}
