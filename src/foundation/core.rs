use crate::foundation::error::{Diff2GifError, Diff2GifResult};

pub use kurbo::{Point, Rect, Vec2};

/// 0-based simulation step, one per rendered frame.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct StepIndex(pub u64);

impl std::fmt::Display for StepIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Largest edge accepted by the raster backend (`vello_cpu` pixmaps are `u16`-sized).
    pub const MAX_DIM: u32 = u16::MAX as u32;

    /// Create a validated canvas.
    pub fn new(width: u32, height: u32) -> Diff2GifResult<Self> {
        let c = Self { width, height };
        c.validate()?;
        Ok(c)
    }

    pub(crate) fn validate(self) -> Diff2GifResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Diff2GifError::config("canvas width/height must be non-zero"));
        }
        if self.width > Self::MAX_DIM || self.height > Self::MAX_DIM {
            return Err(Diff2GifError::config(format!(
                "canvas too large: {}x{} (max {}x{})",
                self.width,
                self.height,
                Self::MAX_DIM,
                Self::MAX_DIM
            )));
        }
        Ok(())
    }

    /// Canvas bounds as a rect anchored at the origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

impl Default for Canvas {
    fn default() -> Self {
        // 6.4in x 4.8in at 100 dpi.
        Self {
            width: 640,
            height: 480,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
