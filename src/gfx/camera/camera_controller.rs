use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseButton, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
};

use super::orbit_camera::OrbitCamera;

pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    /// Shift-drag pans the target when set; otherwise shift-drag orbits like a plain drag
    pub pan_enabled: bool,
    is_shift_held: bool,
    is_mouse_pressed: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.01,
            pan_enabled: true,
            is_shift_held: false,
            is_mouse_pressed: false,
        }
    }

    pub fn with_pan(mut self, enabled: bool) -> Self {
        self.pan_enabled = enabled;
        self
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.is_mouse_pressed = state == ElementState::Pressed;
        }
    }

    /// Applies raw device input to the camera. Returns true if it moved.
    pub fn process_events(&mut self, event: &DeviceEvent, camera: &mut OrbitCamera) -> bool {
        match event {
            DeviceEvent::MouseWheel { delta } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32
                    }
                };
                camera.add_distance(scroll_amount * self.zoom_speed);
                true
            }
            DeviceEvent::MouseMotion { delta } if self.is_mouse_pressed => {
                if self.is_panning() {
                    camera.pan((
                        -delta.0 as f32 * self.pan_speed,
                        delta.1 as f32 * self.pan_speed,
                    ));
                } else {
                    camera.add_yaw(-delta.0 as f32 * self.rotate_speed);
                    camera.add_pitch(delta.1 as f32 * self.rotate_speed);
                }
                true
            }
            _ => false,
        }
    }

    pub fn process_keyed_events(&mut self, event: &KeyEvent, camera: &mut OrbitCamera) {
        match event {
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::ShiftLeft | KeyCode::ShiftRight),
                state,
                ..
            } => {
                let was_shift_held = self.is_shift_held;
                self.is_shift_held = *state == ElementState::Pressed;
                if was_shift_held != self.is_shift_held {
                    log::trace!("Shift state changed: {}", self.is_shift_held);
                }
            }
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::KeyC),
                state: ElementState::Pressed,
                ..
            } if self.is_shift_held => {
                log::info!("Resetting camera to default position");
                camera.reset_to_default();
            }
            _ => (),
        }
    }

    /// Returns true if currently panning
    pub fn is_panning(&self) -> bool {
        self.pan_enabled && self.is_mouse_pressed && self.is_shift_held
    }

    /// Returns true if currently rotating
    pub fn is_rotating(&self) -> bool {
        self.is_mouse_pressed && !self.is_panning()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(10.0, 0.2, 0.0, Vector3::new(0.0, 0.0, 0.0), 1.0)
    }

    #[test]
    fn test_motion_ignored_without_button() {
        let mut controller = CameraController::new(0.01, 0.5);
        let mut camera = camera();
        let moved = controller.process_events(&DeviceEvent::MouseMotion { delta: (10.0, 0.0) }, &mut camera);
        assert!(!moved);
        assert_eq!(camera.yaw, 0.0);
    }

    #[test]
    fn test_drag_orbits() {
        let mut controller = CameraController::new(0.01, 0.5);
        let mut camera = camera();
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(controller.is_rotating());
        assert!(controller.process_events(&DeviceEvent::MouseMotion { delta: (10.0, 0.0) }, &mut camera));
        assert!((camera.yaw + 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_pan_disabled_keeps_target() {
        let mut controller = CameraController::new(0.01, 0.5).with_pan(false);
        let mut camera = camera();
        controller.is_shift_held = true;
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(!controller.is_panning());

        controller.process_events(&DeviceEvent::MouseMotion { delta: (5.0, 5.0) }, &mut camera);
        assert_eq!(camera.target, Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_pan_enabled_moves_target() {
        let mut controller = CameraController::new(0.01, 0.5);
        let mut camera = camera();
        controller.is_shift_held = true;
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(controller.is_panning());

        controller.process_events(&DeviceEvent::MouseMotion { delta: (5.0, 0.0) }, &mut camera);
        assert_ne!(camera.target, Vector3::new(0.0, 0.0, 0.0));
    }
}
