//! Field configuration.
//!
//! Every knob of the particle field lives here. The browser binding accepts the
//! same struct as JSON (camelCase keys, every key optional):
//!
//! ```json
//! { "particleCount": 80, "connectionThreshold": 120, "seed": 7 }
//! ```

use serde::Deserialize;

use crate::color::Color;
use crate::error::FieldError;

pub const DEFAULT_PARTICLE_COUNT: usize = 50;
pub const DEFAULT_CONNECTION_THRESHOLD: f64 = 100.0;
/// Hex `20`, roughly 12.5% opacity.
pub const DEFAULT_EDGE_ALPHA: u8 = 0x20;
pub const DEFAULT_LINE_WIDTH: f64 = 0.5;
pub const DEFAULT_PALETTE: [&str; 4] = ["#3b82f6", "#8b5cf6", "#06b6d4", "#10b981"];

/// Half-open sampling interval `[min, max)`. `min == max` yields a constant.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Range {
        Range { min, max }
    }

    /// Maps a unit sample `t` in [0, 1) onto the range.
    pub fn lerp(&self, t: f64) -> f64 {
        t * (self.max - self.min) + self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn check(&self, name: &str) -> Result<(), FieldError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(FieldError::InvalidConfig(format!("{} must be finite", name)));
        }
        if self.min > self.max {
            return Err(FieldError::InvalidConfig(format!(
                "{} has min {} above max {}",
                name, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// What happens to the current generation when the viewport changes size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResizePolicy {
    /// Discard every particle and spawn a fresh generation.
    Regenerate,
    /// Keep particle identity, scale positions to the new viewport.
    Rescale,
}

impl Default for ResizePolicy {
    fn default() -> Self {
        ResizePolicy::Regenerate
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConnectionStrategy {
    /// O(n^2) scan over every unordered pair.
    AllPairs,
    /// Buckets particles into threshold-sized cells first.
    SpatialGrid,
}

impl Default for ConnectionStrategy {
    fn default() -> Self {
        ConnectionStrategy::AllPairs
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    pub particle_count: usize,
    /// Disc radius in px.
    pub size_range: Range,
    /// Per-axis velocity in px/tick.
    pub speed_range: Range,
    pub opacity_range: Range,
    pub palette: Vec<String>,
    pub connection_threshold: f64,
    pub edge_alpha: u8,
    pub line_width: f64,
    pub resize_policy: ResizePolicy,
    pub connection_strategy: ConnectionStrategy,
    /// Fixed rng seed. Unset means every generation is seeded from entropy.
    pub seed: Option<u64>,
    pub profile_frames: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            particle_count: DEFAULT_PARTICLE_COUNT,
            size_range: Range::new(1.0, 4.0),
            speed_range: Range::new(-0.25, 0.25),
            opacity_range: Range::new(0.2, 0.7),
            palette: DEFAULT_PALETTE.iter().map(|c| (*c).to_owned()).collect(),
            connection_threshold: DEFAULT_CONNECTION_THRESHOLD,
            edge_alpha: DEFAULT_EDGE_ALPHA,
            line_width: DEFAULT_LINE_WIDTH,
            resize_policy: ResizePolicy::default(),
            connection_strategy: ConnectionStrategy::default(),
            seed: None,
            profile_frames: false,
        }
    }
}

impl FieldConfig {
    /// Parses and validates a JSON config. An empty string means all defaults.
    pub fn from_json(json: &str) -> Result<FieldConfig, FieldError> {
        if json.trim().is_empty() {
            return Ok(FieldConfig::default());
        }
        let config: FieldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        self.size_range.check("sizeRange")?;
        self.speed_range.check("speedRange")?;
        self.opacity_range.check("opacityRange")?;
        if self.size_range.min < 0.0 {
            return Err(FieldError::InvalidConfig("sizeRange must not be negative".into()));
        }
        if self.opacity_range.min < 0.0 || self.opacity_range.max > 1.0 {
            return Err(FieldError::InvalidConfig("opacityRange must lie within [0, 1]".into()));
        }
        if !(self.connection_threshold.is_finite() && self.connection_threshold > 0.0) {
            return Err(FieldError::InvalidConfig(
                "connectionThreshold must be a positive number".into(),
            ));
        }
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return Err(FieldError::InvalidConfig("lineWidth must be a positive number".into()));
        }
        self.parse_palette().map(|_| ())
    }

    /// Palette as parsed colors. Fails on an empty palette or a bad entry.
    pub fn parse_palette(&self) -> Result<Vec<Color>, FieldError> {
        if self.palette.is_empty() {
            return Err(FieldError::InvalidConfig("palette must not be empty".into()));
        }
        self.palette.iter().map(|c| Color::from_hex(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_table() {
        let config = FieldConfig::default();
        assert_eq!(config.particle_count, 50);
        assert_eq!(config.size_range, Range::new(1.0, 4.0));
        assert_eq!(config.speed_range, Range::new(-0.25, 0.25));
        assert_eq!(config.opacity_range, Range::new(0.2, 0.7));
        assert_eq!(config.palette.len(), 4);
        assert_eq!(config.connection_threshold, 100.0);
        assert_eq!(config.edge_alpha, 0x20);
        assert_eq!(config.line_width, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = FieldConfig::from_json(
            r#"{ "particleCount": 12, "resizePolicy": "rescale", "seed": 9 }"#,
        )
        .unwrap();
        assert_eq!(config.particle_count, 12);
        assert_eq!(config.resize_policy, ResizePolicy::Rescale);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.connection_threshold, 100.0);
        assert_eq!(config.connection_strategy, ConnectionStrategy::AllPairs);
    }

    #[test]
    fn empty_json_is_default() {
        assert_eq!(FieldConfig::from_json("  ").unwrap(), FieldConfig::default());
    }

    #[test]
    fn rejects_bad_values() {
        let bad = [
            r#"{ "palette": [] }"#,
            r##"{ "palette": ["#zzzzzz"] }"##,
            r#"{ "sizeRange": { "min": 4, "max": 1 } }"#,
            r#"{ "opacityRange": { "min": 0.5, "max": 1.5 } }"#,
            r#"{ "connectionThreshold": 0 }"#,
            r#"{ "lineWidth": -1 }"#,
        ];
        for json in bad.iter() {
            assert!(FieldConfig::from_json(json).is_err(), "accepted {}", json);
        }
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        match FieldConfig::from_json("{ particleCount: ") {
            Err(FieldError::Config(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn range_lerp_spans_interval() {
        let range = Range::new(-0.25, 0.25);
        assert_eq!(range.lerp(0.0), -0.25);
        assert_eq!(range.lerp(0.5), 0.0);
        assert!(range.contains(0.1));
        assert!(!range.contains(0.3));
    }
}
