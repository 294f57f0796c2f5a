//! diff2gif renders diffusion processes running over a network into animated GIFs.
//!
//! A run is described by a [`Graph`], an optional fixed [`Layout`], a configured
//! [`DiffusionModel`] and a [`PipelineConfig`]:
//!
//! - [`AnimationAssembler::new`] runs the model and fixes the layout
//! - [`AnimationAssembler::build`] renders one frame per step and writes the GIF
//! - [`Job`] bundles all inputs in one JSON document for the `diff2gif` binary
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod color;
/// Pipeline configuration.
pub mod config;
/// Frame sinks.
pub mod encode;
pub(crate) mod graph;
pub(crate) mod job;
pub(crate) mod model;
pub(crate) mod pipeline;
pub(crate) mod render;

pub use crate::foundation::color::Rgba8;
pub use crate::foundation::core::{Canvas, Point, Rect, StepIndex, Vec2};
pub use crate::foundation::error::{Diff2GifError, Diff2GifResult};

pub use crate::color::{ColorPolicy, DiscretePalette, Gradient, LegendEntry};
pub use crate::config::{ColorConfig, PipelineConfig, RenderStyle};
pub use crate::encode::gif::{GifSink, GifSinkOpts};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::graph::Graph;
pub use crate::graph::layout::Layout;
pub use crate::job::Job;
pub use crate::model::status::StatusTracker;
pub use crate::model::{
    DiffusionModel, ModelKind, NodeId, RecordedModel, Snapshot, StateValue, StatusMap,
};
pub use crate::pipeline::assembler::{AnimationAssembler, BuildStats};
pub use crate::pipeline::store::FrameStore;
pub use crate::render::FrameRGBA;
pub use crate::render::frame::{FrameRenderer, write_png};
pub use crate::render::text::TextRasterizer;
