use crate::algorithms::food::DEFAULT_MARGIN;
use crate::algorithms::segment_chain::{ChainParams, FollowMode};
use crate::algorithms::shading::Shading;
use serde::{Deserialize, Serialize};
use serpent_core::error::{SerpentError, SerpentResult};
use serpent_core::RuntimeParams;

/// Tunables for one game
///
/// Every field has a default, and unknown keys are ignored, so partial
/// YAML/JSON documents deserialize fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Pixels the head travels per tick
    pub speed: f64,
    pub segment_radius: f64,
    pub food_radius: f64,
    /// Radians per tick while a turn is held
    pub turn_rate: f64,
    /// Fraction of each dimension kept free of food on every side
    pub food_margin: f64,
    pub follow_mode: FollowMode,
    pub shading: Shading,
    /// Place the first food of every run randomly instead of at (w/4, h/2)
    pub randomize_start_food: bool,
    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            speed: 4.0,
            segment_radius: 10.0,
            food_radius: 5.0,
            turn_rate: 0.1,
            food_margin: DEFAULT_MARGIN,
            follow_mode: FollowMode::Spring,
            shading: Shading::SineWave,
            randomize_start_food: false,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Read every known key from `params`, keeping defaults for the rest
    ///
    /// Values of the wrong type are treated as absent.
    pub fn from_params(params: &RuntimeParams) -> Self {
        let defaults = Self::default();
        Self {
            speed: params.get_f64("speed", defaults.speed),
            segment_radius: params.get_f64("segment_radius", defaults.segment_radius),
            food_radius: params.get_f64("food_radius", defaults.food_radius),
            turn_rate: params.get_f64("turn_rate", defaults.turn_rate),
            food_margin: params.get_f64("food_margin", defaults.food_margin),
            follow_mode: params.get_or("follow_mode", defaults.follow_mode),
            shading: params.get_or("shading", defaults.shading),
            randomize_start_food: params
                .get_bool("randomize_start_food", defaults.randomize_start_food),
            seed: params.get("seed"),
        }
    }

    /// Reject values the physics cannot work with
    pub fn validate(&self) -> SerpentResult<()> {
        positive("speed", self.speed)?;
        positive("segment_radius", self.segment_radius)?;
        positive("food_radius", self.food_radius)?;
        positive("turn_rate", self.turn_rate)?;

        if !self.food_margin.is_finite() || !(0.0..0.5).contains(&self.food_margin) {
            return Err(SerpentError::config(format!(
                "food_margin must be in [0, 0.5), got {}",
                self.food_margin
            )));
        }
        Ok(())
    }

    pub fn chain_params(&self) -> ChainParams {
        ChainParams::new(self.speed, self.segment_radius).with_follow_mode(self.follow_mode)
    }
}

fn positive(name: &str, value: f64) -> SerpentResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SerpentError::config(format!(
            "{} must be a positive number, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chain_params().dead_zone(), 19.0);
    }

    #[test]
    fn test_rejects_bad_numbers() {
        let bad = [
            GameConfig { speed: 0.0, ..Default::default() },
            GameConfig { segment_radius: -1.0, ..Default::default() },
            GameConfig { food_radius: f64::NAN, ..Default::default() },
            GameConfig { turn_rate: f64::INFINITY, ..Default::default() },
            GameConfig { food_margin: 0.5, ..Default::default() },
            GameConfig { food_margin: -0.01, ..Default::default() },
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(SerpentError::Config(_))),
                "{:?} should be rejected",
                config
            );
        }
    }

    #[test]
    fn test_zero_margin_is_allowed() {
        let config = GameConfig {
            food_margin: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config: GameConfig =
            serde_yaml::from_str("speed: 6.5\nfollow_mode: rigid\nunknown_option: 3\n").unwrap();
        assert_eq!(config.speed, 6.5);
        assert_eq!(config.follow_mode, FollowMode::Rigid);
        assert_eq!(config.segment_radius, 10.0);
        assert_eq!(config.shading, Shading::SineWave);
    }

    #[test]
    fn test_from_params() {
        let params = RuntimeParams::empty();
        params.set("speed", 3.0).unwrap();
        params.set("shading", "gradient").unwrap();
        params.set("follow_mode", "sideways").unwrap();
        params.set("seed", 42u64).unwrap();

        let config = GameConfig::from_params(&params);
        assert_eq!(config.speed, 3.0);
        assert_eq!(config.shading, Shading::Gradient);
        // Unrecognised value falls back
        assert_eq!(config.follow_mode, FollowMode::Spring);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.turn_rate, 0.1);
    }

    #[test]
    fn test_from_yaml_params_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "turn_rate: 0.25\nshading: solid\nrandomize_start_food: true").unwrap();

        let params = RuntimeParams::from_file(file.path()).unwrap();
        let config = GameConfig::from_params(&params);
        assert_eq!(config.turn_rate, 0.25);
        assert_eq!(config.shading, Shading::Solid);
        assert!(config.randomize_start_food);
        assert_eq!(config.speed, 4.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_runtime_defaults_match() {
        let config = GameConfig::from_params(&RuntimeParams::with_defaults());
        assert_eq!(config, GameConfig::default());
    }
}
