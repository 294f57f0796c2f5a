use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use crate::color::ColorPolicy;
use crate::config::RenderStyle;
use crate::foundation::core::StepIndex;
use crate::foundation::error::Diff2GifResult;
use crate::graph::Graph;
use crate::graph::layout::Layout;
use crate::model::status::StatusTracker;
use crate::model::{Snapshot, StateValue};
use crate::render::FrameRGBA;
use crate::render::cpu::paint_plan;
use crate::render::plan::{FramePlan, SceneGeometry, compile_frame};
use crate::render::text::TextRasterizer;

/// Draws one frame per simulation step.
///
/// Owns the cumulative status map for one run, so steps must be fed in order.
#[derive(Debug)]
pub struct FrameRenderer {
    graph: Arc<Graph>,
    geometry: SceneGeometry,
    policy: ColorPolicy,
    style: RenderStyle,
    tracker: StatusTracker,
    text: TextRasterizer,
    out_dir: PathBuf,
}

impl FrameRenderer {
    /// Create a renderer writing frame files into `out_dir`.
    ///
    /// With a `baseline`, every node starts in that state; it must be colourable by `policy`.
    pub fn new(
        graph: Arc<Graph>,
        layout: &Layout,
        policy: ColorPolicy,
        style: RenderStyle,
        baseline: Option<&StateValue>,
        text: TextRasterizer,
        out_dir: impl Into<PathBuf>,
    ) -> Diff2GifResult<Self> {
        style.validate()?;
        let geometry = SceneGeometry::new(&graph, layout, policy.legend(), &style)?;
        let tracker = match baseline {
            Some(b) => {
                policy.color_for(b)?;
                StatusTracker::with_baseline(b, graph.nodes())
            }
            None => StatusTracker::new(),
        };
        Ok(Self {
            graph,
            geometry,
            policy,
            style,
            tracker,
            text,
            out_dir: out_dir.into(),
        })
    }

    /// Merge `snapshot` and compile the draw list for `step`.
    pub fn plan(&mut self, step: StepIndex, snapshot: &Snapshot) -> Diff2GifResult<FramePlan> {
        self.tracker.update(snapshot);
        compile_frame(
            &self.graph,
            &self.geometry,
            &self.policy,
            &self.style,
            step,
            &self.tracker,
        )
    }

    /// Merge `snapshot` and rasterize the frame for `step` in memory.
    pub fn draw(&mut self, step: StepIndex, snapshot: &Snapshot) -> Diff2GifResult<FrameRGBA> {
        let plan = self.plan(step, snapshot)?;
        let overlay = self.text.rasterize(plan.canvas, &plan.texts)?;
        paint_plan(&plan, overlay.as_deref())
    }

    /// Merge `snapshot`, rasterize the frame for `step` and write it as a PNG.
    #[tracing::instrument(skip(self, snapshot), fields(changed = snapshot.status.len()))]
    pub fn render(&mut self, step: StepIndex, snapshot: &Snapshot) -> Diff2GifResult<PathBuf> {
        let frame = self.draw(step, snapshot)?;
        let path = self.frame_path(step);
        write_png(&path, &frame)?;
        tracing::debug!(path = %path.display(), "wrote frame");
        Ok(path)
    }

    /// File a step's frame is written to.
    pub fn frame_path(&self, step: StepIndex) -> PathBuf {
        self.out_dir.join(format!("t_{:05}.png", step.0))
    }

    /// Cumulative node states so far.
    pub fn tracker(&self) -> &StatusTracker {
        &self.tracker
    }

    /// Node centres in pixels, graph order.
    pub fn node_positions(&self) -> &[crate::foundation::core::Point] {
        &self.geometry.positions
    }
}

/// Write a straight-alpha frame as a PNG.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> Diff2GifResult<()> {
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
