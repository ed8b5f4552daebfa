//! Standalone viewer window backed by winit.
//!
//! ```no_run
//! # use meshview::Viewer;
//! Viewer::builder()
//!     .with_model("assets/models/teapot.obj")
//!     .with_environment("assets/env/studio.hdr")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::{path::PathBuf, sync::Arc, time::Instant};

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    error::ViewerError, options::Options, util::render_loop::StopReason,
    InputEvent, MouseButton, ViewerEngine,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    model: Option<PathBuf>,
    environment: Option<PathBuf>,
    options: Option<Options>,
    title: String,
    frame_limit: Option<u64>,
}

impl ViewerBuilder {
    /// Create a builder with sensible defaults (title "meshview", nothing
    /// loaded, default options, no frame limit).
    fn new() -> Self {
        Self {
            model: None,
            environment: None,
            options: None,
            title: "meshview".into(),
            frame_limit: None,
        }
    }

    /// Set the model file (`.obj`, `.gltf` or `.glb`).
    #[must_use]
    pub fn with_model(mut self, path: impl Into<PathBuf>) -> Self {
        self.model = Some(path.into());
        self
    }

    /// Set the equirectangular environment map.
    #[must_use]
    pub fn with_environment(mut self, path: impl Into<PathBuf>) -> Self {
        self.environment = Some(path.into());
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Close the window after `frames` presented frames.
    #[must_use]
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            model: self.model,
            environment: self.environment,
            options: self.options.unwrap_or_default(),
            title: self.title,
            frame_limit: self.frame_limit,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays one model.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    model: Option<PathBuf>,
    environment: Option<PathBuf>,
    options: Options,
    title: String,
    frame_limit: Option<u64>,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until a stop
    /// condition fires and returns it.
    ///
    /// # Errors
    ///
    /// [`ViewerError::Viewer`] if the event loop cannot be created, or the
    /// error that prevented the window or engine from starting.
    pub fn run(self) -> Result<StopReason, ViewerError> {
        let event_loop = EventLoop::new()
            .map_err(|e| ViewerError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            startup_error: None,
            stop_reason: None,
            viewer: self,
        };
        event_loop
            .run_app(&mut app)
            .map_err(|e| ViewerError::Viewer(e.to_string()))?;

        if let Some(e) = app.startup_error {
            return Err(e);
        }
        Ok(app.stop_reason.unwrap_or(StopReason::WindowClosed))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<ViewerEngine>,
    startup_error: Option<ViewerError>,
    stop_reason: Option<StopReason>,
    viewer: Viewer,
}

/// Surface size for a window, never zero.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: ViewerError) {
        log::error!("{error}");
        self.startup_error = Some(error);
        event_loop.exit();
    }

    fn start_engine(&self, window: Arc<Window>) -> Result<ViewerEngine, ViewerError> {
        let size = viewport_size(window.inner_size());
        let mut engine = pollster::block_on(ViewerEngine::new(
            window,
            size,
            self.viewer.options.clone(),
        ))?;
        engine.set_frame_limit(self.viewer.frame_limit);
        if let Some(path) = &self.viewer.model {
            engine.load_model(path.clone())?;
        }
        if let Some(path) = &self.viewer.environment {
            engine.load_environment(path.clone())?;
        }
        Ok(engine)
    }

    /// Exit the event loop once the engine has stopped.
    fn exit_if_stopped(&mut self, event_loop: &ActiveEventLoop) {
        let Some(engine) = &self.engine else {
            return;
        };
        if self.stop_reason.is_some() {
            return;
        }
        if let Some(reason) = engine.render_loop.stop_reason() {
            self.stop_reason = Some(reason);
            event_loop.exit();
        }
    }

    fn redraw(&mut self) {
        let Some(engine) = &mut self.engine else {
            return;
        };
        match engine.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                match &self.window {
                    Some(w) => {
                        let (vp_w, vp_h) = viewport_size(w.inner_size());
                        engine.resize(vp_w, vp_h);
                    }
                    None => engine.context.reconfigure(),
                }
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory");
                engine.render_loop.stop(StopReason::SurfaceDestroyed);
            }
            Err(e) => {
                log::warn!("render error: {e:?}");
            }
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.viewer.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 800));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fail(event_loop, ViewerError::Viewer(e.to_string()));
                return;
            }
        };

        match self.start_engine(window.clone()) {
            Ok(engine) => {
                window.request_redraw();
                self.window = Some(window);
                self.engine = Some(engine);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if self.window.is_none() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                if let Some(engine) = &mut self.engine {
                    engine.render_loop.stop(StopReason::WindowClosed);
                }
            }

            WindowEvent::Destroyed => {
                if let Some(engine) = &mut self.engine {
                    engine.render_loop.stop(StopReason::SurfaceDestroyed);
                }
            }

            WindowEvent::Resized(size) => {
                let (vp_w, vp_h) = viewport_size(size);
                if let Some(engine) = &mut self.engine {
                    engine.resize(vp_w, vp_h);
                }
            }

            WindowEvent::RedrawRequested => {
                self.redraw();
            }

            WindowEvent::MouseInput { button, state, .. } => {
                let pressed = state == ElementState::Pressed;
                if let Some(engine) = &mut self.engine {
                    let _ = engine.handle_input(InputEvent::MouseButton {
                        button: MouseButton::from(button),
                        pressed,
                    });
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(engine) = &mut self.engine {
                    let _ = engine.handle_input(InputEvent::CursorMoved {
                        x: position.x as f32,
                        y: position.y as f32,
                    });
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll_delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                if let Some(engine) = &mut self.engine {
                    let _ = engine.handle_input(InputEvent::Scroll {
                        delta: scroll_delta,
                    });
                }
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                if let Some(engine) = &mut self.engine {
                    let _ = engine.handle_input(InputEvent::ModifiersChanged {
                        shift: modifiers.state().shift_key(),
                    });
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                if let Some(engine) = &mut self.engine {
                    let _ = engine.handle_key(&format!("{code:?}"));
                }
            }

            _ => (),
        }

        self.exit_if_stopped(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_if_stopped(event_loop);
        let (Some(window), Some(engine)) = (&self.window, &self.engine) else {
            return;
        };
        let wait = engine.render_loop.timing().time_until_next();
        if wait.is_zero() {
            event_loop.set_control_flow(ControlFlow::Poll);
            window.request_redraw();
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + wait));
        }
    }
}
