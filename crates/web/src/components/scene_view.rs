// =============================================================================
// Lumen Web - Scene Canvas
// =============================================================================
// Table of Contents:
// 1. SceneCanvas Component
// 2. Animation Loop
// 3. Painter
// =============================================================================
//
// Hosts a composed scene preset in a bounded <canvas>. The loop supplies
// elapsed seconds since mount; all motion comes from `Scene::frame`.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use glam::{Vec2, Vec3};
use leptos::html::Canvas;
use leptos::prelude::*;
use lumen_scene::{camera, Camera, GeometryKind, Scene};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::utils::{js_error_message, now_ms, window};

// -----------------------------------------------------------------------------
// 1. SceneCanvas Component
// -----------------------------------------------------------------------------

/// Canvas running the named scene preset until unmounted.
#[component]
pub fn SceneCanvas(
    /// Preset name, e.g. `"hero"`.
    #[prop(into)]
    preset: String,
    #[prop(optional, into)] class: String,
) -> impl IntoView {
    let canvas_ref = NodeRef::<Canvas>::new();
    let stop = Arc::new(AtomicBool::new(false));

    let scene = match lumen_scene::presets::load(&preset) {
        Ok(scene) => {
            log::debug!("Mounted scene '{}' with {} elements", preset, scene.elements().len());
            Some(Rc::new(scene))
        }
        Err(e) => {
            log::error!("Failed to compose scene '{}': {}", preset, e);
            None
        }
    };

    {
        let stop = stop.clone();
        Effect::new(move |_| {
            let (Some(canvas), Some(scene)) = (canvas_ref.get(), scene.clone()) else {
                return;
            };
            if let Err(e) = start_loop(canvas, scene, stop.clone()) {
                log::error!("Scene loop failed to start: {}", js_error_message(&e));
            }
        });
    }

    // The pending frame still fires once, sees the flag and frees the loop.
    on_cleanup(move || stop.store(true, Ordering::Release));

    view! {
        <canvas node_ref=canvas_ref class=format!("scene-canvas {}", class) aria-hidden="true"></canvas>
    }
}

// -----------------------------------------------------------------------------
// 2. Animation Loop
// -----------------------------------------------------------------------------

fn start_loop(
    canvas: HtmlCanvasElement,
    scene: Rc<Scene>,
    stop: Arc<AtomicBool>,
) -> Result<(), JsValue> {
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    let painter = Painter::new(ctx);
    let start = now_ms();

    // The closure reschedules itself through this slot.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::new(move || {
        if !keep_running(&stop, &f) {
            return;
        }

        let viewport = fit_canvas(&canvas);
        let elapsed = ((now_ms() - start) / 1000.0) as f32;
        painter.paint(&scene, elapsed, viewport);

        let scheduled = f
            .borrow()
            .as_ref()
            .map(|cb| window().request_animation_frame(cb.as_ref().unchecked_ref()));
        if let Some(Err(e)) = scheduled {
            log::warn!("requestAnimationFrame failed: {}", js_error_message(&e));
            let _ = f.borrow_mut().take();
        }
    }));

    if let Some(cb) = g.borrow().as_ref() {
        window().request_animation_frame(cb.as_ref().unchecked_ref())?;
    }
    Ok(())
}

/// Checked at the top of every frame. Once `stop` is set the slot is
/// emptied, dropping the callback and the slot clone it captured.
fn keep_running<T>(stop: &AtomicBool, slot: &RefCell<Option<T>>) -> bool {
    if stop.load(Ordering::Acquire) {
        let _ = slot.borrow_mut().take();
        return false;
    }
    true
}

/// Match the backing store to the displayed size.
fn fit_canvas(canvas: &HtmlCanvasElement) -> Vec2 {
    let ratio = window().device_pixel_ratio().max(1.0);
    let width = (canvas.client_width().max(1) as f64 * ratio) as u32;
    let height = (canvas.client_height().max(1) as f64 * ratio) as u32;
    if canvas.width() != width || canvas.height() != height {
        canvas.set_width(width);
        canvas.set_height(height);
    }
    Vec2::new(width as f32, height as f32)
}

// -----------------------------------------------------------------------------
// 3. Painter
// -----------------------------------------------------------------------------

struct Painter {
    ctx: CanvasRenderingContext2d,
    camera: Camera,
}

struct Sprite {
    center: Vec2,
    radius: f64,
    depth: f32,
    rotation: Vec3,
    geometry: GeometryKind,
    fill: String,
    stroke: String,
    opacity: f64,
    wireframe: bool,
    wobble: f64,
}

impl Painter {
    fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            camera: Camera::default(),
        }
    }

    fn paint(&self, scene: &Scene, elapsed: f32, viewport: Vec2) {
        let frame = scene.frame(elapsed);
        let ctx = &self.ctx;
        let (w, h) = (viewport.x as f64, viewport.y as f64);

        ctx.set_global_alpha(1.0);
        ctx.clear_rect(0.0, 0.0, w, h);
        let (top, bottom) = scene.environment().sky();
        let sky = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
        let _ = sky.add_color_stop(0.0, &top.css(1.0));
        let _ = sky.add_color_stop(1.0, &bottom.css(1.0));
        ctx.set_fill_style_canvas_gradient(&sky);
        ctx.fill_rect(0.0, 0.0, w, h);

        if let Some(backdrop) = scene.backdrop() {
            let half = backdrop.size * 0.5;
            let corners = [
                backdrop.position + Vec3::new(-half.x, half.y, 0.0),
                backdrop.position + Vec3::new(half.x, -half.y, 0.0),
            ];
            if let (Some(a), Some(b)) = (
                self.camera.project(corners[0], viewport),
                self.camera.project(corners[1], viewport),
            ) {
                ctx.set_fill_style_str(&backdrop.color.css(backdrop.opacity));
                ctx.fill_rect(
                    a.screen.x as f64,
                    a.screen.y as f64,
                    (b.screen.x - a.screen.x) as f64,
                    (b.screen.y - a.screen.y) as f64,
                );
            }
        }

        if let Some(field) = scene.particles() {
            ctx.set_fill_style_str(&field.style.color.css(field.style.opacity));
            for point in &field.points {
                let world = camera::rotate(point.to_vec3(), frame.particle_rotation);
                if let Some(p) = self.camera.project(world, viewport) {
                    let size = (field.style.size * p.scale).max(1.0) as f64;
                    ctx.fill_rect(
                        p.screen.x as f64 - size * 0.5,
                        p.screen.y as f64 - size * 0.5,
                        size,
                        size,
                    );
                }
            }
        }

        let light = light_factor(scene);
        let mut sprites: Vec<Sprite> = frame
            .elements
            .iter()
            .filter_map(|element| {
                let p = self.camera.project(element.position(), viewport)?;
                let shape = element.shape;
                let color = shape.color.mix(lumen_scene::Rgb::WHITE, light);
                Some(Sprite {
                    center: p.screen,
                    radius: (shape.radius() * p.scale) as f64,
                    depth: p.depth,
                    rotation: element.pose.rotation,
                    geometry: shape.geometry,
                    fill: color.css(shape.material.opacity),
                    stroke: shape.color.css(shape.material.opacity.max(0.4)),
                    opacity: shape.material.opacity as f64,
                    wireframe: shape.material.wireframe,
                    wobble: 1.0 + (shape.material.distort * 0.08 * (elapsed * 2.0).sin()) as f64,
                })
            })
            .collect();

        // Far to near.
        sprites.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        for sprite in &sprites {
            self.draw(sprite);
        }
    }

    fn draw(&self, s: &Sprite) {
        let ctx = &self.ctx;
        let (x, y) = (s.center.x as f64, s.center.y as f64);
        let r = s.radius * s.wobble;

        ctx.begin_path();
        match s.geometry {
            GeometryKind::Sphere => {
                let _ = ctx.arc(x, y, r, 0.0, TAU);
            }
            GeometryKind::Torus => {
                let squash = (s.rotation.x.cos().abs() as f64).max(0.15);
                let _ = ctx.ellipse(x, y, r, r * squash, s.rotation.z as f64, 0.0, TAU);
            }
            GeometryKind::Box | GeometryKind::Icosahedron => {
                let outline = polygon(s.geometry, s.rotation.z, r as f32);
                for (i, v) in outline.iter().enumerate() {
                    let (px, py) = (x + v.x as f64, y + v.y as f64);
                    if i == 0 {
                        ctx.move_to(px, py);
                    } else {
                        ctx.line_to(px, py);
                    }
                }
                ctx.close_path();
            }
        }

        if s.wireframe {
            ctx.set_line_width((r * 0.04).max(1.0));
            ctx.set_stroke_style_str(&s.stroke);
            ctx.stroke();
        } else {
            ctx.set_fill_style_str(&s.fill);
            ctx.fill();
            ctx.set_global_alpha(s.opacity * 0.5);
            ctx.set_line_width(1.0);
            ctx.set_stroke_style_str(&s.stroke);
            ctx.stroke();
            ctx.set_global_alpha(1.0);
        }
    }
}

/// How far shape colors are lifted toward white by the scene's lights.
fn light_factor(scene: &Scene) -> f32 {
    let total: f32 = scene.lights().iter().map(|l| l.intensity).sum();
    (total * 0.08).clamp(0.0, 0.35)
}

/// Screen-space outline for polygonal geometry, centered on the origin.
fn polygon(geometry: GeometryKind, spin: f32, radius: f32) -> Vec<Vec2> {
    let sides = match geometry {
        GeometryKind::Box => 4,
        _ => 6,
    };
    (0..sides)
        .map(|i| {
            let angle = spin + i as f32 / sides as f32 * std::f32::consts::TAU;
            Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    type Slot = Rc<RefCell<Option<Box<dyn FnMut()>>>>;

    #[test]
    fn test_stop_releases_self_referencing_callback() {
        let slot: Slot = Rc::new(RefCell::new(None));
        let captured = slot.clone();
        *slot.borrow_mut() = Some(Box::new(move || {
            let _ = captured.borrow();
        }));
        let weak = Rc::downgrade(&slot);
        let stop = AtomicBool::new(false);

        assert!(keep_running(&stop, &slot));
        assert!(slot.borrow().is_some());
        assert_eq!(Rc::strong_count(&slot), 2);

        stop.store(true, Ordering::Release);
        assert!(!keep_running(&stop, &slot));
        assert!(slot.borrow().is_none());
        assert_eq!(Rc::strong_count(&slot), 1);

        drop(slot);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_polygon_sides() {
        assert_eq!(polygon(GeometryKind::Box, 0.0, 1.0).len(), 4);
        assert_eq!(polygon(GeometryKind::Icosahedron, 0.0, 1.0).len(), 6);
    }

    #[test]
    fn test_polygon_vertices_on_radius() {
        for v in polygon(GeometryKind::Icosahedron, 0.7, 12.0) {
            assert!((v.length() - 12.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_light_factor_bounded() {
        for name in lumen_scene::presets::NAMES {
            let scene = lumen_scene::presets::load(name).unwrap();
            let factor = light_factor(&scene);
            assert!((0.0..=0.35).contains(&factor));
        }
    }
}
