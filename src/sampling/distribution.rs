//! Immutable parameter distributions created at configuration time.

use crate::{
    foundation::error::{OverlayError, OverlayResult},
    sampling::stream::RandomStream,
};

/// A configuration-time value object that produces `count` samples from a stream.
pub trait Distribution {
    /// Sampled value type.
    type Value;

    /// Draw `count` values, consuming `stream` in order.
    fn sample(&self, count: usize, stream: &mut RandomStream) -> Vec<Self::Value>;

    /// Draw a single value.
    fn sample_one(&self, stream: &mut RandomStream) -> Self::Value
    where
        Self::Value: Default,
    {
        self.sample(1, stream).pop().unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// Integer-valued parameter.
///
/// JSON forms: `3` (constant), `[1, 4]` (uniform over the inclusive range),
/// `{"choice": [1, 2, 8]}` (uniform choice).
pub enum DiscreteParam {
    /// Always the same value; consumes no draws.
    Constant(i64),
    /// Uniform over `[lo, hi]`.
    Uniform(i64, i64),
    /// Uniform choice among the listed values.
    Choice {
        /// Candidate values.
        choice: Vec<i64>,
    },
}

impl DiscreteParam {
    /// Check the parameter is well formed; `name` prefixes the error message.
    pub fn validate(&self, name: &str) -> OverlayResult<()> {
        match self {
            Self::Constant(_) => Ok(()),
            Self::Uniform(lo, hi) => {
                if lo > hi {
                    return Err(OverlayError::configuration(format!(
                        "{name} range is inverted: [{lo}, {hi}]"
                    )));
                }
                Ok(())
            }
            Self::Choice { choice } => {
                if choice.is_empty() {
                    return Err(OverlayError::configuration(format!(
                        "{name} choice list must be non-empty"
                    )));
                }
                Ok(())
            }
        }
    }

    /// Smallest value this parameter can produce.
    pub fn lower_bound(&self) -> i64 {
        match self {
            Self::Constant(v) => *v,
            Self::Uniform(lo, _) => *lo,
            Self::Choice { choice } => choice.iter().copied().min().unwrap_or(0),
        }
    }

    /// Largest value this parameter can produce.
    pub fn upper_bound(&self) -> i64 {
        match self {
            Self::Constant(v) => *v,
            Self::Uniform(_, hi) => *hi,
            Self::Choice { choice } => choice.iter().copied().max().unwrap_or(0),
        }
    }
}

impl Distribution for DiscreteParam {
    type Value = i64;

    fn sample(&self, count: usize, stream: &mut RandomStream) -> Vec<i64> {
        match self {
            Self::Constant(v) => vec![*v; count],
            Self::Uniform(lo, hi) => (0..count).map(|_| stream.int_inclusive(*lo, *hi)).collect(),
            Self::Choice { choice } => (0..count)
                .map(|_| choice[stream.index(choice.len())])
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// Real-valued parameter.
///
/// JSON forms: `0.7` (constant), `[0.5, 0.9]` (uniform over `[lo, hi)`),
/// `{"choice": [0.5, 1.0]}` (uniform choice).
pub enum ContinuousParam {
    /// Always the same value; consumes no draws.
    Constant(f64),
    /// Uniform over `[lo, hi)`; `lo == hi` is allowed.
    Uniform(f64, f64),
    /// Uniform choice among the listed values.
    Choice {
        /// Candidate values.
        choice: Vec<f64>,
    },
}

impl ContinuousParam {
    /// Check the parameter is finite and well formed.
    pub fn validate(&self, name: &str) -> OverlayResult<()> {
        let finite = |v: f64| -> OverlayResult<()> {
            if v.is_finite() {
                Ok(())
            } else {
                Err(OverlayError::configuration(format!(
                    "{name} values must be finite"
                )))
            }
        };
        match self {
            Self::Constant(v) => finite(*v),
            Self::Uniform(lo, hi) => {
                finite(*lo)?;
                finite(*hi)?;
                if lo > hi {
                    return Err(OverlayError::configuration(format!(
                        "{name} range is inverted: [{lo}, {hi}]"
                    )));
                }
                Ok(())
            }
            Self::Choice { choice } => {
                if choice.is_empty() {
                    return Err(OverlayError::configuration(format!(
                        "{name} choice list must be non-empty"
                    )));
                }
                choice.iter().try_for_each(|&v| finite(v))
            }
        }
    }

    /// Smallest value this parameter can produce.
    pub fn lower_bound(&self) -> f64 {
        match self {
            Self::Constant(v) => *v,
            Self::Uniform(lo, _) => *lo,
            Self::Choice { choice } => choice.iter().copied().fold(f64::INFINITY, f64::min),
        }
    }

    /// Largest value this parameter can produce.
    pub fn upper_bound(&self) -> f64 {
        match self {
            Self::Constant(v) => *v,
            Self::Uniform(_, hi) => *hi,
            Self::Choice { choice } => choice.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

impl Distribution for ContinuousParam {
    type Value = f64;

    fn sample(&self, count: usize, stream: &mut RandomStream) -> Vec<f64> {
        match self {
            Self::Constant(v) => vec![*v; count],
            Self::Uniform(lo, hi) => (0..count).map(|_| stream.uniform_f64(*lo, *hi)).collect(),
            Self::Choice { choice } => (0..count)
                .map(|_| choice[stream.index(choice.len())])
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A pair of independent per-axis parameters.
pub struct AxisPair<P> {
    /// Horizontal component.
    pub x: P,
    /// Vertical component.
    pub y: P,
}

#[cfg(test)]
#[path = "../../tests/unit/sampling/distribution.rs"]
mod tests;
