use std::fs::File;
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::StepIndex;
use crate::foundation::error::{Diff2GifError, Diff2GifResult};
use crate::render::FrameRGBA;
use crate::render::cpu::unpremultiply_rgba8_in_place;

/// Options for [`GifSink`].
#[derive(Clone, Debug)]
pub struct GifSinkOpts {
    /// Output GIF path.
    pub out_path: PathBuf,
    /// Loop forever instead of playing once.
    pub looping: bool,
    /// Palette quantization speed, `1` (best) to `30` (fastest).
    pub speed: i32,
}

impl GifSinkOpts {
    /// Looping GIF at `out_path` with the default quantization speed.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            looping: true,
            speed: 10,
        }
    }
}

/// Sink that encodes frames into an animated GIF.
///
/// GIF stores delays in centiseconds, so the frame delay is truncated to 10ms steps.
pub struct GifSink {
    opts: GifSinkOpts,
    encoder: Option<GifEncoder<File>>,
    file: Option<File>,
    cfg: Option<SinkConfig>,
    last_idx: Option<StepIndex>,
    frames_written: u64,
}

impl GifSink {
    /// Create a sink; nothing is written until `begin`.
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            file: None,
            cfg: None,
            last_idx: None,
            frames_written: 0,
        }
    }

    /// Frames encoded so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> Diff2GifResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(Diff2GifError::config(
                "gif sink width/height must be non-zero",
            ));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(Diff2GifError::config(format!(
                "gif frames are limited to {0}x{0} pixels",
                u16::MAX
            )));
        }
        if !(1..=30).contains(&self.opts.speed) {
            return Err(Diff2GifError::config("gif speed must be within 1..=30"));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        let file = File::create(&self.opts.out_path).map_err(|e| {
            Diff2GifError::resource(format!(
                "failed to create '{}': {e}",
                self.opts.out_path.display()
            ))
        })?;
        let handle = file
            .try_clone()
            .map_err(|e| Diff2GifError::resource(format!("failed to clone gif handle: {e}")))?;

        let mut encoder = GifEncoder::new_with_speed(file, self.opts.speed);
        let repeat = if self.opts.looping {
            Repeat::Infinite
        } else {
            Repeat::Finite(0)
        };
        encoder
            .set_repeat(repeat)
            .map_err(|e| Diff2GifError::encode(format!("set gif repeat: {e}")))?;

        self.encoder = Some(encoder);
        self.file = Some(handle);
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.frames_written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: StepIndex, frame: &FrameRGBA) -> Diff2GifResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| Diff2GifError::encode("gif sink not started"))?;
        if let Some(last) = self.last_idx
            && idx <= last
        {
            return Err(Diff2GifError::encode(format!(
                "frames must be pushed in increasing step order ({idx} after {last})"
            )));
        }
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(Diff2GifError::encode(format!(
                "frame {idx} is {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        let mut data = frame.data.clone();
        if frame.premultiplied {
            unpremultiply_rgba8_in_place(&mut data);
        }
        let buf = image::RgbaImage::from_raw(frame.width, frame.height, data)
            .ok_or_else(|| Diff2GifError::encode(format!("frame {idx} byte len mismatch")))?;
        let gif_frame = image::Frame::from_parts(
            buf,
            0,
            0,
            image::Delay::from_saturating_duration(cfg.frame_delay),
        );

        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| Diff2GifError::encode("gif sink already finished"))?;
        encoder
            .encode_frame(gif_frame)
            .map_err(|e| Diff2GifError::resource(format!("encode gif frame {idx}: {e}")))?;

        self.last_idx = Some(idx);
        self.frames_written += 1;
        Ok(())
    }

    fn end(&mut self) -> Diff2GifResult<()> {
        // Dropping the encoder writes the GIF trailer.
        drop(self.encoder.take());
        if let Some(file) = self.file.take() {
            file.sync_all().map_err(|e| {
                Diff2GifError::resource(format!(
                    "failed to flush '{}': {e}",
                    self.opts.out_path.display()
                ))
            })?;
        }
        self.cfg = None;
        Ok(())
    }
}

fn ensure_parent_dir(path: &Path) -> Diff2GifResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            Diff2GifError::resource(format!(
                "failed to create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
