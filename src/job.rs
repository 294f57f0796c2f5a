use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::foundation::error::{Diff2GifError, Diff2GifResult};
use crate::graph::Graph;
use crate::graph::layout::Layout;
use crate::model::RecordedModel;
use crate::pipeline::assembler::AnimationAssembler;

/// A self-contained render request: network, recorded run and configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Job {
    /// Network the model ran on.
    pub graph: Graph,
    /// Fixed node positions; a force-directed layout is computed when absent.
    #[serde(default)]
    pub layout: Option<Layout>,
    /// Recorded model run.
    pub model: RecordedModel,
    /// Number of iterations to render; all recorded iterations when absent.
    #[serde(default)]
    pub iterations: Option<usize>,
    /// Pipeline configuration.
    #[serde(default)]
    pub config: PipelineConfig,
}

impl Job {
    /// Read a job from a JSON file.
    pub fn from_path(path: &Path) -> Diff2GifResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read job '{}'", path.display()))?;
        Self::from_json_slice(&bytes)
    }

    /// Parse a job from JSON bytes.
    pub fn from_json_slice(bytes: &[u8]) -> Diff2GifResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| Diff2GifError::serde(e.to_string()))
    }

    /// Run the model and prepare an assembler.
    pub fn into_assembler(mut self) -> Diff2GifResult<AnimationAssembler> {
        let n = self.iterations.unwrap_or(self.model.iterations.len());
        AnimationAssembler::new(&self.graph, self.layout, &mut self.model, n, self.config)
    }
}

#[cfg(test)]
#[path = "../tests/unit/job.rs"]
mod tests;
