//! Camera system for single-model viewing.
//!
//! Provides the perspective camera, an orbit controller, frustum culling,
//! and zoom-to-fit framing.

/// Orbit camera controller managing rotation, pan, zoom, and GPU resources.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
/// Zoom-to-fit pose computation.
pub mod framing;
/// View frustum extraction and intersection tests.
pub mod frustum;
