use std::time::Duration;

use crate::foundation::core::StepIndex;
use crate::foundation::error::Diff2GifResult;
use crate::render::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Display time of every frame.
    pub frame_delay: Duration,
}

/// Sink contract for consuming rendered frames in step order.
///
/// `push_frame` is called with strictly increasing [`StepIndex`] values.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> Diff2GifResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: StepIndex, frame: &FrameRGBA) -> Diff2GifResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> Diff2GifResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(StepIndex, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(StepIndex, FrameRGBA)] {
        &self.frames
    }

    /// Return `true` once `end` was called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> Diff2GifResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: StepIndex, frame: &FrameRGBA) -> Diff2GifResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> Diff2GifResult<()> {
        self.ended = true;
        Ok(())
    }
}
