//! Diffusion model contract consumed by the pipeline.
//!
//! The simulation itself lives outside this crate. A model only has to report its kind, its
//! state alphabet (categorical models), whether it has been given an initial status, and a
//! sequence of per-step delta snapshots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{Diff2GifError, Diff2GifResult};

pub(crate) mod status;

/// Node identifier as reported by the simulator.
pub type NodeId = String;

/// Per-node states keyed by node id.
pub type StatusMap = BTreeMap<NodeId, StateValue>;

/// How a model's node states are interpreted for colouring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Finite state alphabet (epidemic-style), coloured by discrete lookup.
    Categorical,
    /// Scalar state in `[0, 1]` (opinion-style), coloured by gradient interpolation.
    Continuous,
}

/// One node state.
///
/// JSON integers decode as [`StateValue::Int`], other numbers as [`StateValue::Scalar`] and
/// strings as [`StateValue::Code`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    /// Integral state code (categorical simulators number their states).
    Int(i64),
    /// Scalar state (continuous models).
    Scalar(f64),
    /// Named state code.
    Code(String),
}

impl StateValue {
    /// Lookup key for discrete colour tables.
    ///
    /// Integral codes use their decimal form so `1` and `"1"` address the same entry.
    pub fn code_key(&self) -> Diff2GifResult<String> {
        match self {
            Self::Int(n) => Ok(n.to_string()),
            Self::Code(s) => Ok(s.clone()),
            Self::Scalar(v) => Err(Diff2GifError::config(format!(
                "scalar state {v} cannot be used as a categorical state code"
            ))),
        }
    }

    /// Scalar value for gradient colouring.
    pub fn scalar(&self) -> Diff2GifResult<f64> {
        match self {
            Self::Int(n) => Ok(*n as f64),
            Self::Scalar(v) => Ok(*v),
            Self::Code(s) => Err(Diff2GifError::config(format!(
                "state code \"{s}\" is not a scalar"
            ))),
        }
    }
}

impl From<&str> for StateValue {
    fn from(s: &str) -> Self {
        Self::Code(s.to_owned())
    }
}

impl From<i64> for StateValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for StateValue {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

/// One simulation step: the nodes whose state changed since the previous step.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Simulator iteration number.
    #[serde(default)]
    pub iteration: u64,
    /// Delta of node states.
    #[serde(default)]
    pub status: StatusMap,
}

impl Snapshot {
    /// Build a snapshot from `(node, state)` pairs.
    pub fn new<K, V>(iteration: u64, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<NodeId>,
        V: Into<StateValue>,
    {
        Self {
            iteration,
            status: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Contract implemented by diffusion simulators.
pub trait DiffusionModel {
    /// Declared state interpretation.
    fn kind(&self) -> ModelKind;

    /// State alphabet as `label -> code`. Empty for continuous models.
    fn available_statuses(&self) -> BTreeMap<String, StateValue>;

    /// Initial node states, or `None` if the model has not been configured yet.
    fn initial_status(&self) -> Option<&StatusMap>;

    /// Run `n` iterations and return one snapshot per iteration, in order.
    fn iteration_bunch(&mut self, n: usize) -> Diff2GifResult<Vec<Snapshot>>;
}

/// A model that replays iterations recorded by an external simulator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordedModel {
    /// State interpretation.
    pub kind: ModelKind,
    /// State alphabet as `label -> code`.
    #[serde(default)]
    pub statuses: BTreeMap<String, StateValue>,
    /// Initial node states; the pipeline refuses models without one.
    #[serde(default)]
    pub initial_status: Option<StatusMap>,
    /// Recorded iterations, in order.
    #[serde(default)]
    pub iterations: Vec<Snapshot>,
}

impl RecordedModel {
    /// Create an empty, unconfigured model.
    pub fn new(kind: ModelKind) -> Self {
        Self {
            kind,
            statuses: BTreeMap::new(),
            initial_status: None,
            iterations: Vec::new(),
        }
    }

    /// Declare one state of the alphabet.
    pub fn with_status(mut self, label: impl Into<String>, code: impl Into<StateValue>) -> Self {
        self.statuses.insert(label.into(), code.into());
        self
    }

    /// Configure the initial node states.
    pub fn set_initial_status(&mut self, status: StatusMap) {
        self.initial_status = Some(status);
    }

    /// Append one recorded iteration; its `iteration` number is assigned sequentially.
    pub fn push_iteration(&mut self, status: StatusMap) {
        let iteration = self.iterations.len() as u64;
        self.iterations.push(Snapshot { iteration, status });
    }

    /// Parse from a JSON value.
    pub fn from_json_value(v: serde_json::Value) -> Diff2GifResult<Self> {
        serde_json::from_value(v).map_err(|e| Diff2GifError::serde(e.to_string()))
    }
}

impl DiffusionModel for RecordedModel {
    fn kind(&self) -> ModelKind {
        self.kind
    }

    fn available_statuses(&self) -> BTreeMap<String, StateValue> {
        self.statuses.clone()
    }

    fn initial_status(&self) -> Option<&StatusMap> {
        self.initial_status.as_ref()
    }

    fn iteration_bunch(&mut self, n: usize) -> Diff2GifResult<Vec<Snapshot>> {
        if n > self.iterations.len() {
            return Err(Diff2GifError::config(format!(
                "requested {n} iterations but only {} were recorded",
                self.iterations.len()
            )));
        }
        Ok(self.iterations[..n].to_vec())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/model.rs"]
mod tests;
