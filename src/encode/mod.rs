//! Encoding sinks.
//!
//! Sinks consume rendered frames in step order and are used by the animation assembler.

/// Animated GIF output.
pub mod gif;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
