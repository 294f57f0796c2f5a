use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::color::ColorPolicy;
use crate::config::{PipelineConfig, validate_frame_duration};
use crate::encode::gif::{GifSink, GifSinkOpts};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, Point, StepIndex};
use crate::foundation::error::{Diff2GifError, Diff2GifResult};
use crate::graph::Graph;
use crate::graph::layout::Layout;
use crate::model::{DiffusionModel, ModelKind, Snapshot};
use crate::pipeline::store::FrameStore;
use crate::render::FrameRGBA;
use crate::render::frame::FrameRenderer;
use crate::render::text::TextRasterizer;

/// Summary of one [`AnimationAssembler::build`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildStats {
    /// Frames in the written animation.
    pub frames: u64,
    /// Seconds each frame is displayed, as stored in the GIF (whole centiseconds).
    pub frame_duration: f64,
}

/// Turns a diffusion run over a network into an animated GIF.
///
/// The model is run once at construction; every [`build`](Self::build) replays the same
/// snapshots from an empty status map.
#[derive(Debug)]
pub struct AnimationAssembler {
    graph: Arc<Graph>,
    layout: Layout,
    kind: ModelKind,
    policy: ColorPolicy,
    config: PipelineConfig,
    snapshots: Vec<Snapshot>,
    text: TextRasterizer,
}

impl AnimationAssembler {
    /// Run `iterations` steps of `model` over `graph`.
    ///
    /// Without a `layout`, a force-directed layout is computed once here. Fails if the model was
    /// never given an initial status.
    #[tracing::instrument(skip(graph, layout, model, config), fields(nodes = graph.node_count()))]
    pub fn new(
        graph: &Graph,
        layout: Option<Layout>,
        model: &mut dyn DiffusionModel,
        iterations: usize,
        config: PipelineConfig,
    ) -> Diff2GifResult<Self> {
        config.validate()?;
        if model.initial_status().is_none() {
            return Err(Diff2GifError::config(
                "the model has no initial status; configure one before building an animation",
            ));
        }

        let kind = model.kind();
        let policy = ColorPolicy::for_model(kind, &model.available_statuses(), &config.colors)?;
        if let Some(baseline) = &config.baseline_status {
            policy.color_for(baseline)?;
        }

        let layout = match layout {
            Some(l) => {
                l.check_covers(graph)?;
                l
            }
            None => Layout::force_directed(graph),
        };

        let snapshots = model.iteration_bunch(iterations)?;
        tracing::debug!(snapshots = snapshots.len(), ?kind, "model run complete");

        Ok(Self {
            graph: Arc::new(graph.clone()),
            layout,
            kind,
            policy,
            config,
            snapshots,
            text: TextRasterizer::system(),
        })
    }

    /// Replace the text rasterizer (e.g. [`TextRasterizer::empty`] to skip fonts).
    pub fn with_text(mut self, text: TextRasterizer) -> Self {
        self.text = text;
        self
    }

    /// Snapshots produced by the model, one per frame.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Layout used for every frame.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Kind of the model the snapshots came from.
    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// Active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Render every snapshot and write a looping GIF to `output_path`.
    ///
    /// The extension must be `.gif`. Intermediate frames live in a per-run directory that is
    /// removed whether or not the build succeeds.
    #[tracing::instrument(skip(self, output_path), fields(out = %output_path.as_ref().display()))]
    pub fn build(
        &self,
        output_path: impl AsRef<Path>,
        frame_duration: f64,
    ) -> Diff2GifResult<BuildStats> {
        let out = output_path.as_ref();
        check_gif_extension(out)?;
        let delay = frame_delay(frame_duration)?;
        if self.snapshots.is_empty() {
            return Err(Diff2GifError::config(
                "no snapshots to render; an animation needs at least one frame",
            ));
        }

        let mut store = FrameStore::create(self.config.work_dir.as_deref())?;
        let res = self.render_frames(&mut store).and_then(|_| {
            let mut sink = GifSink::new(GifSinkOpts::new(out));
            encode_frames(&store, &mut sink, self.config.style.canvas, delay)
        });
        store.clean();
        let frames = res?;

        tracing::info!(frames, out = %out.display(), "animation written");
        Ok(BuildStats {
            frames,
            frame_duration: delay.as_secs_f64(),
        })
    }

    /// Same as [`build`](Self::build) with the configured `frame_duration`.
    pub fn build_with_config_duration(
        &self,
        output_path: impl AsRef<Path>,
    ) -> Diff2GifResult<BuildStats> {
        self.build(output_path, self.config.frame_duration)
    }

    /// Render the frame for `step` in memory without touching the filesystem.
    pub fn render_frame(&self, step: usize) -> Diff2GifResult<FrameRGBA> {
        let Some(target) = self.snapshots.get(step) else {
            return Err(Diff2GifError::config(format!(
                "step {step} is out of range; {} snapshots available",
                self.snapshots.len()
            )));
        };
        let mut renderer = self.renderer(PathBuf::new())?;
        for (i, snap) in self.snapshots[..step].iter().enumerate() {
            renderer.plan(StepIndex(i as u64), snap)?;
        }
        renderer.draw(StepIndex(step as u64), target)
    }

    /// Pixel centre of every node, in graph order.
    pub fn node_positions(&self) -> Diff2GifResult<Vec<Point>> {
        Ok(self.renderer(PathBuf::new())?.node_positions().to_vec())
    }

    fn renderer(&self, out_dir: PathBuf) -> Diff2GifResult<FrameRenderer> {
        FrameRenderer::new(
            Arc::clone(&self.graph),
            &self.layout,
            self.policy.clone(),
            self.config.style.clone(),
            self.config.baseline_status.as_ref(),
            self.text.clone(),
            out_dir,
        )
    }

    fn render_frames(&self, store: &mut FrameStore) -> Diff2GifResult<()> {
        let mut renderer = self.renderer(store.dir().to_path_buf())?;
        for (i, snap) in self.snapshots.iter().enumerate() {
            let path = renderer.render(StepIndex(i as u64), snap)?;
            store.record(path);
        }
        Ok(())
    }
}

fn encode_frames(
    store: &FrameStore,
    sink: &mut dyn FrameSink,
    canvas: Canvas,
    frame_delay: Duration,
) -> Diff2GifResult<u64> {
    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        frame_delay,
    })?;
    let mut count = 0u64;
    for (i, path) in store.frames().iter().enumerate() {
        let img = image::open(path)
            .map_err(|e| {
                Diff2GifError::resource(format!("failed to read frame '{}': {e}", path.display()))
            })?
            .to_rgba8();
        let frame = FrameRGBA {
            width: img.width(),
            height: img.height(),
            data: img.into_raw(),
            premultiplied: false,
        };
        sink.push_frame(StepIndex(i as u64), &frame)?;
        count += 1;
    }
    sink.end()?;
    Ok(count)
}

/// The delay GIF can actually store: `secs` rounded to whole centiseconds.
fn frame_delay(secs: f64) -> Diff2GifResult<Duration> {
    let cs = validate_frame_duration(secs)?;
    Ok(Duration::from_millis(u64::from(cs) * 10))
}

fn check_gif_extension(path: &Path) -> Diff2GifResult<()> {
    let is_gif = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gif"));
    if !is_gif {
        return Err(Diff2GifError::config(format!(
            "unsupported output '{}': only .gif animations are written",
            path.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/assembler.rs"]
mod tests;
