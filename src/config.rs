use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::color::{DEFAULT_EDGE_COLOR, EDGE_KEY};
use crate::foundation::color::Rgba8;
use crate::foundation::core::Canvas;
use crate::foundation::error::{Diff2GifError, Diff2GifResult};
use crate::model::StateValue;

/// Colour tables for both model kinds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// `status label -> colour` for categorical models, plus the reserved `"edges"` entry.
    pub colors: BTreeMap<String, Rgba8>,
    /// Gradient stops for continuous models (at least two).
    pub gradient: Vec<Rgba8>,
}

impl Default for ColorConfig {
    fn default() -> Self {
        let colors = [
            ("Susceptible", Rgba8::rgb(0x37, 0x7e, 0xb8)),
            ("Infected", Rgba8::rgb(0xe4, 0x1a, 0x1c)),
            ("Removed", Rgba8::rgb(0x4d, 0xaf, 0x4a)),
            (EDGE_KEY, DEFAULT_EDGE_COLOR),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v))
        .collect();
        Self {
            colors,
            gradient: vec![Rgba8::rgb(0x37, 0x7e, 0xb8), Rgba8::rgb(0xe4, 0x1a, 0x1c)],
        }
    }
}

/// Drawing knobs for one frame.
///
/// Sizes follow plotting conventions: `edge_width` is in points and `node_size` is a marker
/// area in points², both converted to pixels through `dpi`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Output size in pixels.
    pub canvas: Canvas,
    /// Pixels per inch used for point conversions.
    pub dpi: f64,
    /// Node and edge opacity.
    pub alpha: f64,
    /// Edge line width in points.
    pub edge_width: f64,
    /// Node marker area in points².
    pub node_size: f64,
    /// Draw node ids next to nodes.
    pub with_labels: bool,
    /// Draw a "Network state at t=..." title.
    pub show_title: bool,
    /// Draw the categorical legend.
    pub show_legend: bool,
    /// Frame background.
    pub background: Rgba8,
    /// Text size in points.
    pub font_size: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            dpi: 100.0,
            alpha: 0.8,
            edge_width: 0.1,
            node_size: 90.0,
            with_labels: false,
            show_title: true,
            show_legend: true,
            background: Rgba8::rgb(255, 255, 255),
            font_size: 10.0,
        }
    }
}

impl RenderStyle {
    /// Convert points to pixels.
    pub fn pt_to_px(&self, pt: f64) -> f64 {
        pt * self.dpi / 72.0
    }

    /// Node disc radius in pixels.
    pub fn node_radius_px(&self) -> f64 {
        self.pt_to_px(self.node_size.sqrt() / 2.0)
    }

    pub(crate) fn validate(&self) -> Diff2GifResult<()> {
        self.canvas.validate()?;
        if !self.dpi.is_finite() || self.dpi <= 0.0 {
            return Err(Diff2GifError::config("dpi must be finite and > 0"));
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(Diff2GifError::config("alpha must be within [0, 1]"));
        }
        if !self.edge_width.is_finite() || self.edge_width < 0.0 {
            return Err(Diff2GifError::config("edge_width must be finite and >= 0"));
        }
        if !self.node_size.is_finite() || self.node_size < 0.0 {
            return Err(Diff2GifError::config("node_size must be finite and >= 0"));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(Diff2GifError::config("font_size must be finite and > 0"));
        }
        Ok(())
    }
}

/// Everything the pipeline needs besides the graph and the model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Colour tables.
    #[serde(flatten)]
    pub colors: ColorConfig,
    /// Drawing knobs.
    pub style: RenderStyle,
    /// Seconds each frame is displayed.
    pub frame_duration: f64,
    /// State given to every node before the first snapshot. `None` requires each node to be
    /// reported by a snapshot before it is drawn.
    pub baseline_status: Option<StateValue>,
    /// Parent directory for per-run frame directories. `None` uses the system temp dir.
    pub work_dir: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            colors: ColorConfig::default(),
            style: RenderStyle::default(),
            frame_duration: 0.2,
            baseline_status: None,
            work_dir: None,
        }
    }
}

impl PipelineConfig {
    /// Parse from a JSON value; missing fields take their defaults.
    pub fn from_json_value(v: serde_json::Value) -> Diff2GifResult<Self> {
        serde_json::from_value(v).map_err(|e| Diff2GifError::serde(e.to_string()))
    }

    pub(crate) fn validate(&self) -> Diff2GifResult<()> {
        self.style.validate()?;
        validate_frame_duration(self.frame_duration)?;
        Ok(())
    }
}

/// Longest delay a GIF frame can carry: a `u16` count of centiseconds.
pub const MAX_FRAME_DURATION_SECS: f64 = u16::MAX as f64 / 100.0;

/// Validate `secs` and return it as whole centiseconds, rounded to nearest.
pub(crate) fn validate_frame_duration(secs: f64) -> Diff2GifResult<u16> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(Diff2GifError::config(format!(
            "frame duration must be finite and >= 0, got {secs}"
        )));
    }
    let cs = (secs * 100.0).round();
    if cs > f64::from(u16::MAX) {
        return Err(Diff2GifError::config(format!(
            "frame duration {secs}s exceeds the GIF maximum of {MAX_FRAME_DURATION_SECS}s"
        )));
    }
    Ok(cs as u16)
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
