//! State-to-colour policies.
//!
//! One renderer serves both model kinds: categorical models resolve colours through a
//! [`DiscretePalette`], continuous models through a [`Gradient`].

use std::collections::BTreeMap;

use crate::config::ColorConfig;
use crate::foundation::color::Rgba8;
use crate::foundation::error::{Diff2GifError, Diff2GifResult};
use crate::model::{ModelKind, StateValue};

/// Key of the reserved edge colour entry in colour tables.
pub const EDGE_KEY: &str = "edges";

/// Neutral gray used for edges when the colour table has no [`EDGE_KEY`] entry.
pub const DEFAULT_EDGE_COLOR: Rgba8 = Rgba8::rgb(0x99, 0x99, 0x99);

/// Colour of one categorical state, as shown in the legend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegendEntry {
    /// Human-readable state name.
    pub label: String,
    /// State code as produced by the simulator.
    pub code: String,
    /// Display colour.
    pub color: Rgba8,
}

/// Discrete `state code -> colour` table.
#[derive(Clone, Debug, PartialEq)]
pub struct DiscretePalette {
    by_code: BTreeMap<String, usize>,
    entries: Vec<LegendEntry>,
    edge: Rgba8,
}

impl DiscretePalette {
    /// Join a model's `label -> code` alphabet with a `label -> colour` table.
    ///
    /// Every label must have a colour. The edge entry falls back to [`DEFAULT_EDGE_COLOR`].
    pub fn new(
        statuses: &BTreeMap<String, StateValue>,
        colors: &BTreeMap<String, Rgba8>,
    ) -> Diff2GifResult<Self> {
        if statuses.is_empty() {
            return Err(Diff2GifError::config(
                "categorical model declares no statuses",
            ));
        }

        let mut entries = Vec::with_capacity(statuses.len());
        for (label, code) in statuses {
            let color = colors.get(label).copied().ok_or_else(|| {
                Diff2GifError::config(format!("no color configured for status \"{label}\""))
            })?;
            entries.push(LegendEntry {
                label: label.clone(),
                code: code.code_key()?,
                color,
            });
        }
        entries.sort_by(|a, b| code_order(&a.code, &b.code));

        let mut by_code = BTreeMap::new();
        for (i, e) in entries.iter().enumerate() {
            if by_code.insert(e.code.clone(), i).is_some() {
                return Err(Diff2GifError::config(format!(
                    "status code \"{}\" is declared more than once",
                    e.code
                )));
            }
        }

        Ok(Self {
            by_code,
            entries,
            edge: colors.get(EDGE_KEY).copied().unwrap_or(DEFAULT_EDGE_COLOR),
        })
    }

    /// Colour for a state code. Unknown codes are a configuration error.
    pub fn lookup(&self, state: &StateValue) -> Diff2GifResult<Rgba8> {
        let key = state.code_key()?;
        self.by_code
            .get(&key)
            .map(|&i| self.entries[i].color)
            .ok_or_else(|| {
                Diff2GifError::config(format!(
                    "status code \"{key}\" has no entry in the color table"
                ))
            })
    }

    /// Legend entries in ascending code order.
    pub fn legend(&self) -> &[LegendEntry] {
        &self.entries
    }
}

/// Piecewise-linear colour ramp over `[0, 1]` with evenly spaced stops.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gradient {
    stops: Vec<Rgba8>,
}

impl Gradient {
    /// Create a gradient; at least two stops are required.
    pub fn new(stops: Vec<Rgba8>) -> Diff2GifResult<Self> {
        if stops.len() < 2 {
            return Err(Diff2GifError::config(format!(
                "gradient needs at least 2 color stops, got {}",
                stops.len()
            )));
        }
        Ok(Self { stops })
    }

    /// Colour at `v`. Values outside `[0, 1]` (or non-finite) are a configuration error.
    pub fn color_at(&self, v: f64) -> Diff2GifResult<Rgba8> {
        if !v.is_finite() || !(0.0..=1.0).contains(&v) {
            return Err(Diff2GifError::config(format!(
                "scalar state {v} is outside [0, 1]"
            )));
        }
        let segments = self.stops.len() - 1;
        let pos = v * segments as f64;
        let band = (pos.floor() as usize).min(segments - 1);
        let local = pos - band as f64;
        Ok(self.stops[band].lerp(self.stops[band + 1], local))
    }

    /// Gradient stops in order.
    pub fn stops(&self) -> &[Rgba8] {
        &self.stops
    }
}

/// Colour resolution strategy, fixed once per pipeline from the model kind.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorPolicy {
    /// Categorical lookup.
    Discrete(DiscretePalette),
    /// Continuous interpolation, plus the edge colour.
    Gradient {
        /// Node colour ramp.
        ramp: Gradient,
        /// Edge colour.
        edge: Rgba8,
    },
}

impl ColorPolicy {
    /// Build the policy matching `kind`.
    pub fn for_model(
        kind: ModelKind,
        statuses: &BTreeMap<String, StateValue>,
        cfg: &ColorConfig,
    ) -> Diff2GifResult<Self> {
        match kind {
            ModelKind::Categorical => Ok(Self::Discrete(DiscretePalette::new(
                statuses,
                &cfg.colors,
            )?)),
            ModelKind::Continuous => Ok(Self::Gradient {
                ramp: Gradient::new(cfg.gradient.clone())?,
                edge: cfg
                    .colors
                    .get(EDGE_KEY)
                    .copied()
                    .unwrap_or(DEFAULT_EDGE_COLOR),
            }),
        }
    }

    /// Colour for one node state.
    pub fn color_for(&self, state: &StateValue) -> Diff2GifResult<Rgba8> {
        match self {
            Self::Discrete(p) => p.lookup(state),
            Self::Gradient { ramp, .. } => ramp.color_at(state.scalar()?),
        }
    }

    /// Edge colour.
    pub fn edge_color(&self) -> Rgba8 {
        match self {
            Self::Discrete(p) => p.edge,
            Self::Gradient { edge, .. } => *edge,
        }
    }

    /// Legend entries; empty for gradients.
    pub fn legend(&self) -> &[LegendEntry] {
        match self {
            Self::Discrete(p) => p.legend(),
            Self::Gradient { .. } => &[],
        }
    }
}

// Numeric codes sort numerically, ahead of named codes.
fn code_order(a: &str, b: &str) -> std::cmp::Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/policy.rs"]
mod tests;
