use crate::constants::*;
use crate::error::MazeError;
use serde::{Deserialize, Serialize};

/// Tunable dimensions and streaming limits for a maze.
///
/// Every field has a default, so a RON file only needs to name what it changes:
///
/// ```ron
/// (max_loaded_chunks: 20, prune_horizon: Some(6))
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    pub hallway_length: f32,
    pub hallway_width: f32,
    pub junction_size: f32,
    /// Loaded-chunk budget. Chunks near the observer may push past it.
    pub max_loaded_chunks: usize,
    /// Hops from the current chunk that are kept loaded. Chunks closer than
    /// this are also expanded.
    pub streaming_horizon: u32,
    pub locator_margin: f32,
    pub wall_margin: f32,
    /// Drop graph records further than this many hops from every loaded chunk.
    /// `None` keeps all records forever.
    pub prune_horizon: Option<u32>,
    pub debug_overlays: bool,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            hallway_length: HALLWAY_LENGTH,
            hallway_width: HALLWAY_WIDTH,
            junction_size: JUNCTION_SIZE,
            max_loaded_chunks: MAX_LOADED_CHUNKS,
            streaming_horizon: STREAMING_HORIZON,
            locator_margin: LOCATOR_MARGIN,
            wall_margin: WALL_MARGIN,
            prune_horizon: None,
            debug_overlays: false,
        }
    }
}

impl MazeConfig {
    /// Parse a config from RON text and validate it.
    pub fn from_ron_str(ron_str: &str) -> Result<Self, MazeError> {
        let options = ron::Options::default();
        let config: MazeConfig = options
            .from_str(ron_str)
            .map_err(|e| MazeError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, MazeError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| MazeError::ConfigParse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), MazeError> {
        let dims = [
            ("hallway_length", self.hallway_length),
            ("hallway_width", self.hallway_width),
            ("junction_size", self.junction_size),
        ];
        for (name, value) in dims {
            if !value.is_finite() || value <= 0.0 {
                return Err(MazeError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.max_loaded_chunks == 0 {
            return Err(MazeError::InvalidConfig(
                "max_loaded_chunks must be at least 1".into(),
            ));
        }
        if self.streaming_horizon == 0 {
            return Err(MazeError::InvalidConfig(
                "streaming_horizon must be at least 1".into(),
            ));
        }
        if self.locator_margin < 0.0 {
            return Err(MazeError::InvalidConfig(format!(
                "locator_margin must not be negative, got {}",
                self.locator_margin
            )));
        }
        if self.wall_margin < 0.0 || self.wall_margin >= self.hallway_width / 2.0 {
            return Err(MazeError::InvalidConfig(format!(
                "wall_margin {} must be in [0, {})",
                self.wall_margin,
                self.hallway_width / 2.0
            )));
        }
        Ok(())
    }

    pub fn half_hallway_length(&self) -> f32 {
        self.hallway_length / 2.0
    }

    pub fn half_hallway_width(&self) -> f32 {
        self.hallway_width / 2.0
    }

    pub fn half_junction_size(&self) -> f32 {
        self.junction_size / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(MazeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let config = MazeConfig::from_ron_str("(max_loaded_chunks: 20)").expect("parses");
        assert_eq!(config.max_loaded_chunks, 20);
        assert_eq!(config.hallway_length, HALLWAY_LENGTH);
        assert_eq!(config.prune_horizon, None);
    }

    #[test]
    fn test_prune_horizon_option() {
        let config = MazeConfig::from_ron_str("(prune_horizon: Some(5))").expect("parses");
        assert_eq!(config.prune_horizon, Some(5));
    }

    #[test]
    fn test_malformed_ron_is_parse_error() {
        let err = MazeConfig::from_ron_str("(max_loaded_chunks: )").unwrap_err();
        assert!(matches!(err, MazeError::ConfigParse(_)));
    }

    #[test]
    fn test_zero_budget_rejected() {
        let err = MazeConfig::from_ron_str("(max_loaded_chunks: 0)").unwrap_err();
        assert!(matches!(err, MazeError::InvalidConfig(_)));
    }

    #[test]
    fn test_wall_margin_must_leave_walkable_strip() {
        let config = MazeConfig {
            wall_margin: HALLWAY_WIDTH,
            ..MazeConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(MazeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_negative_dimension_rejected() {
        let config = MazeConfig {
            junction_size: -1.0,
            ..MazeConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ron_round_trip_of_custom_config() {
        let config = MazeConfig {
            max_loaded_chunks: 30,
            prune_horizon: Some(8),
            debug_overlays: true,
            ..MazeConfig::default()
        };
        let text = config.to_ron_string().expect("serializes");
        let back = MazeConfig::from_ron_str(&text).expect("parses");
        assert_eq!(back, config);
    }
}
