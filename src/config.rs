//! Generation parameters and their validation.
//!
//! A `GenerationConfig` is a plain value. The control boundary owns a copy,
//! validates every change before accepting it and hands the accepted value
//! to the generator and the graph builder.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_GEOM_LIMIT: usize = 1_000_000;

/// Largest point field a config may ask for (`grid_size()^2`). An angle
/// step of about 0.36 degrees reaches it; the graph scans are quadratic in
/// this count.
pub const MAX_POINTS: usize = 1 << 20;

/// Rule deciding which point pairs become edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionMode {
    /// Every ordered pair closer than the threshold, self-pairs included.
    #[serde(rename = "dist", alias = "distance_threshold")]
    DistanceThreshold,
    /// One edge per point, to the last other point within the threshold.
    #[serde(rename = "closest", alias = "closest_within_threshold")]
    ClosestWithinThreshold,
    /// One edge per point, to its nearest other point regardless of distance.
    #[serde(rename = "nearest", alias = "closest_unconditional")]
    ClosestUnconditional,
}

impl ConnectionMode {
    pub const ALL: [Self; 3] = [
        Self::DistanceThreshold,
        Self::ClosestWithinThreshold,
        Self::ClosestUnconditional,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DistanceThreshold => "dist",
            Self::ClosestWithinThreshold => "closest",
            Self::ClosestUnconditional => "nearest",
        }
    }
}

impl fmt::Display for ConnectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConnectionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dist" | "distance_threshold" => Ok(Self::DistanceThreshold),
            "closest" | "closest_within_threshold" => Ok(Self::ClosestWithinThreshold),
            "nearest" | "closest_unconditional" => Ok(Self::ClosestUnconditional),
            other => Err(Error::ConfigParse(format!(
                "unknown connection mode `{other}` (expected dist, closest or nearest)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Grid increment in degrees for both angles.
    pub angle_step: f64,
    /// Upper bound of the angular jitter in degrees.
    pub randomize_angle: f64,
    /// Radius jitter as a fraction of the sphere radius.
    pub randomize_radius: f64,
    pub connection_threshold: f64,
    pub mode: ConnectionMode,
    /// Regenerate the point field on every change instead of reusing it.
    pub regenerate_on_change: bool,
    /// Cap on flattened edge entries (two per edge).
    pub geom_limit: usize,
    /// Seed for the jitter source; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            angle_step: 10.0,
            randomize_angle: 5.0,
            randomize_radius: 0.0,
            connection_threshold: 0.5,
            mode: ConnectionMode::ClosestWithinThreshold,
            regenerate_on_change: true,
            geom_limit: DEFAULT_GEOM_LIMIT,
            seed: None,
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> Error {
    Error::InvalidConfig {
        field,
        reason: reason.into(),
    }
}

/// Reads a control-panel value as JSON, falling back to a bare string so
/// `set mode dist` works without quotes.
fn parse_value(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw.trim())
        .unwrap_or_else(|_| serde_json::Value::String(raw.trim().to_owned()))
}

impl GenerationConfig {
    /// Number of grid rows (and columns): `floor(360 / angle_step)`.
    #[must_use]
    pub fn grid_size(&self) -> usize {
        (360.0 / self.angle_step).floor() as usize
    }

    /// Rejects non-positive steps, steps so fine the grid exceeds
    /// [`MAX_POINTS`], negative jitter or threshold, and non-finite values.
    pub fn validate(&self) -> Result<()> {
        if !self.angle_step.is_finite() || self.angle_step <= 0.0 {
            return Err(invalid(
                "angle_step",
                format!("must be a positive number of degrees, got {}", self.angle_step),
            ));
        }
        let points = self.grid_size().checked_mul(self.grid_size());
        if points.is_none_or(|points| points > MAX_POINTS) {
            return Err(invalid(
                "angle_step",
                format!(
                    "{} degrees gives a {n}x{n} grid, more than {MAX_POINTS} points",
                    self.angle_step,
                    n = self.grid_size()
                ),
            ));
        }
        let non_negative = [
            ("randomize_angle", self.randomize_angle),
            ("randomize_radius", self.randomize_radius),
            ("connection_threshold", self.connection_threshold),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(
                    field,
                    format!("must be a finite value >= 0, got {value}"),
                ));
            }
        }
        Ok(())
    }

    /// Parses and validates a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns a copy with one field replaced, as a control panel would
    /// set it. `value` is read as JSON (`2.5`, `true`, `null`) or else as a
    /// bare string (`dist`). The copy is validated; `self` is left untouched.
    pub fn with_field(&self, field: &str, value: &str) -> Result<Self> {
        let mut document = serde_json::to_value(self)?;
        let slot = document
            .get_mut(field)
            .ok_or_else(|| Error::ConfigParse(format!("unknown field `{field}`")))?;
        *slot = parse_value(value);
        let next: Self = serde_json::from_value(document)
            .map_err(|err| Error::ConfigParse(format!("{field}: {err}")))?;
        next.validate()?;
        Ok(next)
    }
}
