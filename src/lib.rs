// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints. Cargo.toml
// mirrors it in [workspace.lints] so tests and benches share the levels.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Single-scene 3D model viewer built on wgpu.
//!
//! meshview loads one model (Wavefront OBJ or glTF), an optional
//! equirectangular HDR environment for image-based lighting, and frames the
//! camera so the model exactly fills the view.
//!
//! # Key entry points
//!
//! - [`camera::framing`] - zoom-to-fit pose computation
//! - [`engine::ViewerEngine`] - the application context owning every
//!   subsystem
//! - [`scene::Scene`] - the single model, light, and environment
//! - [`options::Options`] - runtime configuration (camera, lighting,
//!   display, key bindings)
//!
//! # Architecture
//!
//! Asset loads run on background threads ([`scene::loader::AssetLoader`])
//! and are polled once per frame. A completed model load is uploaded to the
//! GPU and immediately framed with
//! [`camera::framing::CameraFramer::frame_object`]. The render loop is an
//! explicit scheduler ([`util::render_loop::RenderLoop`]) that stops on
//! window close, surface loss, a frame limit, or a quit command.

pub mod camera;
#[cfg(feature = "binary")]
pub mod cli;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use camera::framing::{CameraFramer, CameraPose, FramingError, ViewAxis};
pub use engine::{FramingChoice, ViewerCommand, ViewerEngine};
pub use error::ViewerError;
pub use input::{InputEvent, InputProcessor, KeyBindings, MouseButton};
pub use options::Options;
pub use scene::bounds::{Bounded, BoundingBox};
pub use scene::Scene;
pub use util::render_loop::{RenderLoop, StopReason};
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
