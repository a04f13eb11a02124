// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
// Documentation
#![warn(missing_docs)]
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
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::str_to_string)]
// Unused / redundant code
#![warn(unused_results)]
#![warn(unused_qualifications)]
// Graphics code casts between pixel sizes and floats all the time
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
// Graphics math frequently compares against exact constants
#![allow(clippy::float_cmp)]
#![allow(clippy::module_name_repetitions)]

//! Minimal real-time mesh viewer built on wgpu.
//!
//! orbview loads a single Wavefront OBJ mesh, shades it with a Blinn-Phong
//! shader, and lets you orbit around it with the mouse. An egui debug panel
//! exposes the camera and lighting parameters for live tuning.
//!
//! # Key entry points
//!
//! - [`Viewer`] - the windowed application
//! - [`camera::OrbitCamera`] - pitch/yaw/distance camera with wrap and clamp
//!   rules
//! - [`input::InputController`] - pointer drag state machine and key
//!   bindings
//! - [`options::Options`] - TOML-backed configuration
//!
//! # Architecture
//!
//! A single [`state::ViewerState`] holds the camera, display toggles and
//! model parameters. Window events flow through the
//! [`input::InputController`]; once per frame the [`gui::DebugPanel`] edits a
//! snapshot of the state, the edits are applied back, and the
//! [`render::FrameRenderer`] draws overlays, the model and the panel.

pub mod camera;
pub mod error;
pub mod gpu;
pub mod gui;
pub mod input;
pub mod options;
pub mod render;
pub mod scene;
pub mod screenshot;
pub mod state;
pub mod util;
pub mod viewer;

pub use error::ViewerError;
pub use viewer::Viewer;
