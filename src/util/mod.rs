//! Frame pacing and the render-loop scheduler.

/// FPS limiter and smoothed FPS readout.
pub mod frame_timing;
/// Explicit frame scheduler with stop conditions.
pub mod render_loop;
