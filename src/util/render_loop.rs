//! Explicit frame scheduler with well-defined stop conditions.
//!
//! The window event loop asks [`RenderLoop::begin_frame`] whether to draw,
//! calls [`RenderLoop::end_frame`] after presenting, and exits once
//! [`RenderLoop::is_running`] turns false.

use std::fmt;

use super::frame_timing::FrameTiming;

/// Why the render loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The user closed the window.
    WindowClosed,
    /// The window or its surface went away.
    SurfaceDestroyed,
    /// The configured number of frames was presented.
    FrameLimit,
    /// A `Quit` command was executed.
    Quit,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::WindowClosed => "window closed",
            Self::SurfaceDestroyed => "surface destroyed",
            Self::FrameLimit => "frame limit reached",
            Self::Quit => "quit requested",
        })
    }
}

/// Frame scheduler: pacing, frame counting and stop state.
#[derive(Debug, Clone)]
pub struct RenderLoop {
    timing: FrameTiming,
    frame_limit: Option<u64>,
    frames: u64,
    stopped: Option<StopReason>,
}

impl RenderLoop {
    /// Loop paced to `target_fps` (0 = unlimited) that stops after
    /// `frame_limit` presented frames, if given.
    #[must_use]
    pub fn new(target_fps: u32, frame_limit: Option<u64>) -> Self {
        let mut render_loop = Self {
            timing: FrameTiming::new(target_fps),
            frame_limit,
            frames: 0,
            stopped: None,
        };
        if frame_limit == Some(0) {
            render_loop.stop(StopReason::FrameLimit);
        }
        render_loop
    }

    /// Whether a frame should be drawn now: the loop is running and the
    /// pacing interval has elapsed.
    #[must_use]
    pub fn begin_frame(&self) -> bool {
        self.is_running() && self.timing.should_render()
    }

    /// Record a presented frame. Stops the loop when the frame limit is
    /// reached.
    pub fn end_frame(&mut self) {
        self.frames += 1;
        self.timing.end_frame();
        if self.frame_limit.is_some_and(|limit| self.frames >= limit) {
            self.stop(StopReason::FrameLimit);
        }
    }

    /// Stop the loop. The first reason wins.
    pub fn stop(&mut self, reason: StopReason) {
        if self.stopped.is_none() {
            log::info!("render loop stopping after {} frames: {reason}", self.frames);
            self.stopped = Some(reason);
        }
    }

    /// `false` once any stop condition has fired.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.stopped.is_none()
    }

    /// Why the loop stopped, if it has.
    #[must_use]
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stopped
    }

    /// Frames presented so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Pacing and FPS statistics.
    #[must_use]
    pub fn timing(&self) -> &FrameTiming {
        &self.timing
    }

    /// Change the FPS cap (0 = unlimited).
    pub fn set_target_fps(&mut self, target_fps: u32) {
        self.timing.set_target_fps(target_fps);
    }
}
