//! Small helpers that don't belong to a single subsystem.

/// Exponential-moving-average FPS for the debug panel.
pub mod frame_timing;
