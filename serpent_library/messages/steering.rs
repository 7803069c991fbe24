use serde::{Deserialize, Serialize};
use serpent_core::core::LogSummary;
use std::fmt;

/// Turn input for the snake's head
///
/// A start command holds the turn until a `TurnStop` arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SteerCommand {
    TurnLeftStart,
    TurnRightStart,
    TurnStop,
}

impl SteerCommand {
    /// Heading change per tick this command asks for
    pub fn turn(self, turn_rate: f64) -> f64 {
        match self {
            SteerCommand::TurnLeftStart => -turn_rate,
            SteerCommand::TurnRightStart => turn_rate,
            SteerCommand::TurnStop => 0.0,
        }
    }
}

impl fmt::Display for SteerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SteerCommand::TurnLeftStart => "turn-left-start",
            SteerCommand::TurnRightStart => "turn-right-start",
            SteerCommand::TurnStop => "turn-stop",
        };
        f.write_str(name)
    }
}

impl LogSummary for SteerCommand {
    fn log_summary(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_sign() {
        assert_eq!(SteerCommand::TurnLeftStart.turn(0.1), -0.1);
        assert_eq!(SteerCommand::TurnRightStart.turn(0.1), 0.1);
        assert_eq!(SteerCommand::TurnStop.turn(0.1), 0.0);
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_string(&SteerCommand::TurnLeftStart).unwrap();
        assert_eq!(json, "\"turn-left-start\"");
        assert_eq!(SteerCommand::TurnStop.to_string(), "turn-stop");
    }
}
