use std::{sync::Arc, time::Instant};

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    clock::{
        time::until_next_second, ClockAnimator, ScheduledTask, SceneBuilder, SceneObjects,
        TimeSample,
    },
    config::ClockConfig,
    error::EngineError,
    gfx::{
        debug::DebugHelpers,
        rendering::{EngineSettings, RenderEngine},
        scene::{Light, Scene},
    },
};

/// The clock application: owns the event loop and everything it drives
pub struct ClockApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

/// State shared by the redraw and tick callbacks
struct AppState {
    config: ClockConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    scene: Scene,
    objects: SceneObjects,
    animator: ClockAnimator,
    schedule: ScheduledTask,
    debug_helpers: Option<DebugHelpers>,
    error: Option<EngineError>,
}

/// The clock scene as it stands before the first frame
pub struct ClockScene {
    pub scene: Scene,
    pub objects: SceneObjects,
    pub animator: ClockAnimator,
    pub debug_helpers: Option<DebugHelpers>,
}

impl ClockScene {
    /// Builds every object and turns the hands to `now`
    pub fn new(config: &ClockConfig, now: TimeSample) -> Self {
        let builder = SceneBuilder::new().with_shadow_map_size(config.shadow_map_size);
        let aspect = config.width.max(1) as f32 / config.height.max(1) as f32;
        let mut scene = Scene::new(builder.camera_manager(aspect));
        let objects = builder.build_scene(&mut scene);

        let animator = ClockAnimator::new(objects.hands, config.hour_mode);
        animator.tick(&mut scene, now);

        let debug_helpers = if config.debug {
            DebugHelpers::new(&mut scene, objects.spot_light)
        } else {
            None
        };

        log::info!(
            "Clock ready at {now}: {} objects, hour mode {:?}, debug helpers {}",
            scene.statistics().object_count,
            config.hour_mode,
            if debug_helpers.is_some() { "on" } else { "off" },
        );

        Self {
            scene,
            objects,
            animator,
            debug_helpers,
        }
    }
}

impl ClockApp {
    /// Builds the scene and shows the current time; the window opens in [`run`](Self::run)
    pub fn new(config: ClockConfig) -> Result<Self, EngineError> {
        let event_loop = EventLoop::new()?;

        let now = chrono::Local::now();
        let ClockScene {
            scene,
            objects,
            animator,
            debug_helpers,
        } = ClockScene::new(&config, TimeSample::from_timelike(&now));

        // First update lands on the next wall-clock second
        let schedule = ScheduledTask::with_first_deadline(
            config.tick_interval(),
            Instant::now() + until_next_second(&now),
        );

        Ok(Self {
            event_loop,
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                scene,
                objects,
                animator,
                schedule,
                debug_helpers,
                error: None,
            },
        })
    }

    /// Runs until the window closes. Errors that stopped the loop are returned.
    pub fn run(mut self) -> Result<(), EngineError> {
        self.event_loop.set_control_flow(ControlFlow::Poll);
        self.event_loop.run_app(&mut self.app_state)?;

        match self.app_state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: EngineError) {
        log::error!("{err}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn create_window_and_engine(
        &mut self,
        event_loop: &ActiveEventLoop,
    ) -> Result<(), EngineError> {
        let window = Arc::new(
            event_loop.create_window(
                WindowAttributes::default()
                    .with_title("Haggis Clock")
                    .with_inner_size(LogicalSize::new(self.config.width, self.config.height)),
            )?,
        );

        let PhysicalSize { width, height } = window.inner_size();
        let settings = EngineSettings {
            width,
            height,
            ..self.config.engine_settings()
        };

        let renderer = pollster::block_on(RenderEngine::new(window.clone(), settings))?;
        self.scene.camera_manager.resize(width, height);

        if let Some(spot) = self
            .scene
            .light(self.objects.spot_light)
            .and_then(Light::as_spot)
        {
            let (surface_width, surface_height) = renderer.surface_size();
            log::info!(
                "Surface {}x{}, shadow map {}x{}",
                surface_width,
                surface_height,
                spot.shadow.map_size,
                spot.shadow.map_size
            );
        }

        self.window = Some(window);
        self.render_engine = Some(renderer);
        Ok(())
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state == ElementState::Pressed
            && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
        {
            event_loop.exit();
            return;
        }
        self.scene.camera_manager.process_keyboard_event(event);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };

        if let Some(helpers) = &self.debug_helpers {
            helpers.update(&mut self.scene);
        }

        if let Err(err) = render_engine.render_frame(&mut self.scene) {
            self.fail(event_loop, err);
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.create_window_and_engine(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::MouseInput { state, button, .. } => {
                self.scene
                    .camera_manager
                    .process_mouse_button(button, state);
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene.camera_manager.resize(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if self.window.is_none() {
            return;
        }
        self.scene.camera_manager.process_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.schedule.poll(Instant::now()) {
            self.animator
                .tick(&mut self.scene, TimeSample::now_local());
        }

        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{hand_angles, HourMode, REFERENCE_ANGLE};
    use cgmath::Rad;

    fn hand_rotations(clock: &ClockScene) -> [f32; 3] {
        let hands = clock.objects.hands;
        [hands.hour, hands.minute, hands.second]
            .map(|id| clock.scene.object(id).map_or(f32::NAN, |o| o.rotation().z))
    }

    #[test]
    fn test_hands_show_time_before_first_frame() {
        let now = TimeSample::new(4, 20, 33).unwrap();
        let clock = ClockScene::new(&ClockConfig::default(), now);

        let expected = hand_angles(now, HourMode::Creep);
        assert_eq!(
            hand_rotations(&clock),
            [expected.hour.0, expected.minute.0, expected.second.0]
        );
        for rotation in hand_rotations(&clock) {
            assert_ne!(Rad(rotation), REFERENCE_ANGLE);
        }
    }

    #[test]
    fn test_hour_mode_from_config() {
        let config = ClockConfig {
            hour_mode: HourMode::Stepped,
            ..Default::default()
        };
        let now = TimeSample::new(6, 30, 0).unwrap();
        let clock = ClockScene::new(&config, now);

        assert_eq!(clock.animator.mode(), HourMode::Stepped);
        assert_eq!(hand_rotations(&clock)[0], hand_angles(now, HourMode::Stepped).hour.0);
    }

    #[test]
    fn test_debug_helpers_only_when_asked() {
        let now = TimeSample::default();
        let plain = ClockScene::new(&ClockConfig::default(), now);
        assert!(plain.debug_helpers.is_none());

        let config = ClockConfig {
            debug: true,
            ..Default::default()
        };
        let debug = ClockScene::new(&config, now);
        assert!(debug.debug_helpers.is_some());
        assert_eq!(
            debug.scene.statistics().object_count,
            plain.scene.statistics().object_count + 2
        );
    }

    #[test]
    fn test_shadow_map_size_from_config() {
        let config = ClockConfig {
            shadow_map_size: 1024,
            ..Default::default()
        };
        let clock = ClockScene::new(&config, TimeSample::default());
        let size = clock
            .scene
            .light(clock.objects.spot_light)
            .and_then(Light::as_spot)
            .map(|spot| spot.shadow.map_size);
        assert_eq!(size, Some(1024));
    }
}
