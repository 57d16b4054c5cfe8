// =============================================================================
// Lumen Scene - Camera Projection
// =============================================================================
// Pinhole camera on the +Z axis looking toward -Z, matching the default
// three.js viewer (eye at z = 5, 75° vertical field of view).
// =============================================================================

use glam::{EulerRot, Quat, Vec2, Vec3};

/// Perspective camera for 2D hosts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Distance of the eye from the origin along +Z.
    pub eye_distance: f32,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    /// Points closer than this to the eye are culled.
    pub near: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye_distance: 5.0,
            fov_y: 75.0,
            near: 0.1,
        }
    }
}

/// A world point mapped to viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub screen: Vec2,
    /// Pixels per world unit at this depth.
    pub scale: f32,
    /// Distance from the eye along the view axis.
    pub depth: f32,
}

impl Camera {
    fn focal_length(&self, viewport: Vec2) -> f32 {
        (viewport.y * 0.5) / (self.fov_y.to_radians() * 0.5).tan()
    }

    /// Project `point` into a viewport of `viewport` pixels (origin at the
    /// top-left, +Y down). Returns `None` behind the near plane.
    pub fn project(&self, point: Vec3, viewport: Vec2) -> Option<Projected> {
        let depth = self.eye_distance - point.z;
        if depth < self.near {
            return None;
        }

        let scale = self.focal_length(viewport) / depth;
        Some(Projected {
            screen: Vec2::new(
                viewport.x * 0.5 + point.x * scale,
                viewport.y * 0.5 - point.y * scale,
            ),
            scale,
            depth,
        })
    }
}

/// Rotate `point` about the origin by XYZ Euler angles (radians).
pub fn rotate(point: Vec3, euler: Vec3) -> Vec3 {
    Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z) * point
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_origin_projects_to_center() {
        let p = Camera::default().project(Vec3::ZERO, VIEWPORT).unwrap();
        assert_eq!(p.screen, Vec2::new(400.0, 300.0));
        assert_eq!(p.depth, 5.0);
    }

    #[test]
    fn test_farther_points_shrink() {
        let camera = Camera::default();
        let near = camera.project(Vec3::new(1.0, 1.0, 0.0), VIEWPORT).unwrap();
        let far = camera.project(Vec3::new(1.0, 1.0, -10.0), VIEWPORT).unwrap();
        assert!(far.scale < near.scale);
        assert!(far.screen.x < near.screen.x);
        // +Y in world is up on screen.
        assert!(near.screen.y < 300.0);
    }

    #[test]
    fn test_behind_camera_is_culled() {
        let camera = Camera::default();
        assert!(camera.project(Vec3::new(0.0, 0.0, 5.0), VIEWPORT).is_none());
        assert!(camera.project(Vec3::new(0.0, 0.0, 10.0), VIEWPORT).is_none());
    }

    #[test]
    fn test_rotate_about_z() {
        let r = rotate(Vec3::X, Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2));
        assert!((r - Vec3::Y).length() < 1e-5);
    }
}
