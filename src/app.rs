use glam::Vec3;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowId},
};

use crate::camera::{Camera, CameraMovement};
use crate::core::{Button, Controller, FrameClock, WinitController};
use crate::renderer::Renderer;
use crate::scene::SceneConfig;

const WINDOW_TITLE: &str = "Room Viewer";
const FPS_UPDATE_INTERVAL: f32 = 1.0;

/// Top-level application state driving the winit event loop: owns the
/// window, the renderer, the camera, and the per-frame input/timing state.
pub struct App {
    scene: SceneConfig,
    window_size: (u32, u32),
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    camera: Camera,
    controller: WinitController,
    clock: FrameClock,
    frame_count: u32,
    fps_update_timer: f32,
}

impl App {
    pub fn new(scene: SceneConfig, width: u32, height: u32) -> Self {
        let camera = Camera::new(Vec3::from_array(scene.camera_position));
        Self {
            scene,
            window_size: (width, height),
            window: None,
            renderer: None,
            camera,
            controller: WinitController::new(),
            clock: FrameClock::new(),
            frame_count: 0,
            fps_update_timer: 0.0,
        }
    }

    /// Apply one frame's worth of buffered input to the camera, scaled by
    /// the frame delta, then clear the per-frame deltas.
    fn update_camera(&mut self, delta: f32) {
        if self.controller.is_down(Button::KeyW) {
            self.camera.process_keyboard(CameraMovement::Forward, delta);
        }
        if self.controller.is_down(Button::KeyS) {
            self.camera.process_keyboard(CameraMovement::Backward, delta);
        }
        if self.controller.is_down(Button::KeyA) {
            self.camera.process_keyboard(CameraMovement::Left, delta);
        }
        if self.controller.is_down(Button::KeyD) {
            self.camera.process_keyboard(CameraMovement::Right, delta);
        }

        let (dx, dy) = self.controller.cursor_delta();
        if dx != 0.0 || dy != 0.0 {
            self.camera.process_mouse_movement(dx, dy, true);
        }

        let scroll = self.controller.scroll_delta();
        if scroll != 0.0 {
            self.camera.process_mouse_scroll(scroll);
        }

        self.controller.reset_deltas();
    }

    fn update_fps(&mut self, delta: f32) {
        self.frame_count += 1;
        self.fps_update_timer += delta;

        if self.fps_update_timer >= FPS_UPDATE_INTERVAL {
            let fps = self.frame_count as f32 / self.fps_update_timer;
            log::debug!("FPS: {fps:.1}");
            self.frame_count = 0;
            self.fps_update_timer = 0.0;
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let delta = self.clock.tick();
        self.update_fps(delta);
        self.update_camera(delta);

        let Some(renderer) = &mut self.renderer else {
            return;
        };
        match renderer.render(&self.camera) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = renderer.size();
                renderer.resize(size);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("frame skipped: {e}"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let (width, height) = self.window_size;
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title(WINDOW_TITLE)
                    .with_inner_size(winit::dpi::LogicalSize::new(width, height)),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("failed to create window: {e}");
                    event_loop.exit();
                    return;
                }
            };

            // Mouse-look UX: hide the cursor and keep it inside the window.
            // Not every platform supports grabbing; the viewer still works
            // without it.
            window.set_cursor_visible(false);
            if let Err(e) = window
                .set_cursor_grab(CursorGrabMode::Confined)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
            {
                log::warn!("cursor grab unavailable: {e}");
            }

            let renderer = match pollster::block_on(Renderer::new(window.clone(), &self.scene)) {
                Ok(r) => r,
                Err(e) => {
                    log::error!("failed to initialize renderer: {e:#}");
                    event_loop.exit();
                    return;
                }
            };

            self.window = Some(window);
            self.renderer = Some(renderer);
            // Setup can take a while; do not let it bleed into the first
            // frame's movement delta.
            self.clock.reset();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            other => self.controller.process_event(&other),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
