//! Orbit camera controls with inertial damping.
//!
//! Dragging with the left button orbits the camera around `target`, the right
//! button pans, the middle button and the wheel dolly in and out. Input only
//! accumulates pending motion; [`OrbitControls::update`] applies it to the
//! camera once per frame. With damping enabled each update applies
//! `damping_factor` of the pending motion and keeps the rest, so the camera
//! glides to a stop after the pointer is released.

use std::f32::consts::PI;

use cgmath::{InnerSpace, Point3, Vector2, Vector3};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

use crate::{camera::PerspectiveCamera, config::ControlsConfig};

// Keeps the polar angle away from the poles, where look_at degenerates.
const POLAR_EPS: f32 = 1e-6;
const MOTION_EPS: f32 = 1e-8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragAction {
    Rotate,
    Pan,
    Dolly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MouseButtonState {
    #[default]
    None,
    Pressed(DragAction),
}

#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Point3<f32>,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    // pending spherical motion (azimuth, polar)
    theta_delta: f32,
    phi_delta: f32,
    // pending pan in screen pixels
    pan_delta: Vector2<f32>,
    scale: f32,
    pressed: MouseButtonState,
    cursor: Option<Vector2<f32>>,
    viewport_height: f32,
}

impl OrbitControls {
    pub fn new(target: Point3<f32>) -> Self {
        Self::from_config(&ControlsConfig::default(), target)
    }

    pub fn from_config(config: &ControlsConfig, target: Point3<f32>) -> Self {
        Self {
            target,
            enable_damping: config.enable_damping,
            damping_factor: config.damping_factor.clamp(0.0, 1.0),
            rotate_speed: config.rotate_speed,
            zoom_speed: config.zoom_speed,
            pan_speed: config.pan_speed,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            theta_delta: 0.0,
            phi_delta: 0.0,
            pan_delta: Vector2::new(0.0, 0.0),
            scale: 1.0,
            pressed: MouseButtonState::None,
            cursor: None,
            viewport_height: 1.0,
        }
    }

    /// Pointer motion is scaled relative to the viewport height.
    pub fn set_viewport_height(&mut self, height: u32) {
        self.viewport_height = height.max(1) as f32;
    }

    pub fn pressed(&self) -> MouseButtonState {
        self.pressed
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.theta_delta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.phi_delta -= angle;
    }

    /// Moves the camera towards the target by one wheel notch.
    pub fn dolly_in(&mut self) {
        self.scale *= self.zoom_scale();
    }

    pub fn dolly_out(&mut self) {
        self.scale /= self.zoom_scale();
    }

    /// Queues a pan by a pointer movement of `dx`, `dy` pixels.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.pan_delta += Vector2::new(dx, dy) * self.pan_speed;
    }

    fn zoom_scale(&self) -> f32 {
        0.95f32.powf(self.zoom_speed)
    }

    pub fn pointer_down(&mut self, action: DragAction) {
        self.pressed = MouseButtonState::Pressed(action);
    }

    pub fn pointer_up(&mut self) {
        self.pressed = MouseButtonState::None;
    }

    /// Cursor moved to (`x`, `y`) in window pixels.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let position = Vector2::new(x, y);
        let last = self.cursor.replace(position);
        let Some(last) = last else { return };
        let delta = position - last;
        match self.pressed {
            MouseButtonState::Pressed(DragAction::Rotate) => {
                let per_pixel = 2.0 * PI * self.rotate_speed / self.viewport_height;
                self.rotate_left(delta.x * per_pixel);
                self.rotate_up(delta.y * per_pixel);
            }
            MouseButtonState::Pressed(DragAction::Pan) => self.pan(delta.x, delta.y),
            MouseButtonState::Pressed(DragAction::Dolly) => {
                if delta.y > 0.0 {
                    self.dolly_out();
                } else if delta.y < 0.0 {
                    self.dolly_in();
                }
            }
            MouseButtonState::None => (),
        }
    }

    /// Positive `delta` scrolls up, which zooms in.
    pub fn wheel(&mut self, delta: f32) {
        if delta > 0.0 {
            self.dolly_in();
        } else if delta < 0.0 {
            self.dolly_out();
        }
    }

    /// Feeds a winit window event. Returns true if the event was consumed.
    pub fn handle_window_events(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                let action = match button {
                    MouseButton::Left => DragAction::Rotate,
                    MouseButton::Right => DragAction::Pan,
                    MouseButton::Middle => DragAction::Dolly,
                    _ => return false,
                };
                match state {
                    ElementState::Pressed => self.pointer_down(action),
                    ElementState::Released => self.pointer_up(),
                }
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer_move(position.x as f32, position.y as f32);
                self.pressed != MouseButtonState::None
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.pointer_up();
                false
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                };
                self.wheel(amount);
                true
            }
            _ => false,
        }
    }

    /// Applies pending motion to `camera` and makes it look at the target.
    ///
    /// Returns true if the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let previous_position = camera.position;
        let previous_target = self.target;

        let offset = camera.position - self.target;
        let radius = offset.magnitude();
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };

        let fraction = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };
        theta += self.theta_delta * fraction;
        phi += self.phi_delta * fraction;
        // The limits are public fields and may be inverted, which `clamp` panics on.
        phi = phi
            .max(self.min_polar_angle)
            .min(self.max_polar_angle)
            .clamp(POLAR_EPS, PI - POLAR_EPS);

        let new_radius = (radius * self.scale)
            .max(self.min_distance)
            .min(self.max_distance);

        let pan = self.pan_delta * fraction;
        if pan.magnitude2() > 0.0 {
            self.target += self.pan_offset(camera, radius, pan);
        }

        let sin_phi = phi.sin();
        let offset = Vector3::new(
            new_radius * sin_phi * theta.sin(),
            new_radius * phi.cos(),
            new_radius * sin_phi * theta.cos(),
        );
        camera.position = self.target + offset;
        camera.target = self.target;

        if self.enable_damping {
            let keep = 1.0 - self.damping_factor;
            self.theta_delta *= keep;
            self.phi_delta *= keep;
            self.pan_delta *= keep;
        } else {
            self.theta_delta = 0.0;
            self.phi_delta = 0.0;
            self.pan_delta = Vector2::new(0.0, 0.0);
        }
        self.scale = 1.0;

        (camera.position - previous_position).magnitude2() > MOTION_EPS
            || (self.target - previous_target).magnitude2() > MOTION_EPS
    }

    /// World space offset for a screen space pan, so that the point under the
    /// cursor at the target's depth follows the cursor.
    fn pan_offset(
        &self,
        camera: &PerspectiveCamera,
        distance: f32,
        pixels: Vector2<f32>,
    ) -> Vector3<f32> {
        let forward = camera.target - camera.position;
        if forward.magnitude2() <= MOTION_EPS {
            return Vector3::new(0.0, 0.0, 0.0);
        }
        let forward = forward.normalize();
        let right = forward.cross(camera.up).normalize();
        let up = right.cross(forward);
        let half_fov = cgmath::Rad::from(camera.fovy).0 / 2.0;
        let target_distance = distance * half_fov.tan();
        let per_pixel = 2.0 * target_distance / self.viewport_height;
        right * (-pixels.x * per_pixel) + up * (pixels.y * per_pixel)
    }
}
