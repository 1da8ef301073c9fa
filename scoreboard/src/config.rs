//! Engine configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};
use shared::{DisplaySlot, LegacySerializer, MarkupSerializer, PlainSerializer, TextSerializer};

/// Serialized form used to measure and split lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextFormat {
    #[default]
    Markup,
    Legacy,
    Plain,
}

impl TextFormat {
    pub fn serializer(&self) -> Box<dyn TextSerializer> {
        match self {
            TextFormat::Markup => Box::new(MarkupSerializer),
            TextFormat::Legacy => Box::new(LegacySerializer::default()),
            TextFormat::Plain => Box::new(PlainSerializer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Name of the objective holding the scoreboard body
    pub objective_name: String,
    /// Line teams are named `<prefix><score>`
    pub line_team_prefix: String,
    pub display_slot: DisplaySlot,
    pub text_format: TextFormat,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            objective_name: "sidebar".to_string(),
            line_team_prefix: "line".to_string(),
            display_slot: DisplaySlot::Sidebar,
            text_format: TextFormat::Markup,
        }
    }
}

impl BoardConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn line_team_name(&self, score: usize) -> String {
        format!("{}{}", self.line_team_prefix, score)
    }

    /// Whether `name` is one of this engine's line teams (`<prefix><digits>`)
    pub fn is_line_team(&self, name: &str) -> bool {
        name.strip_prefix(self.line_team_prefix.as_str())
            .map(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = BoardConfig::from_json("{}").unwrap();
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn test_partial_json_overrides() {
        let config =
            BoardConfig::from_json(r#"{"text_format": "legacy", "display_slot": "player_list"}"#)
                .unwrap();

        assert_eq!(config.text_format, TextFormat::Legacy);
        assert_eq!(config.display_slot, DisplaySlot::PlayerList);
        assert_eq!(config.objective_name, "sidebar");
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(BoardConfig::from_json(r#"{"text_format": "html"}"#).is_err());
    }

    #[test]
    fn test_line_team_names() {
        let config = BoardConfig::default();

        assert_eq!(config.line_team_name(3), "line3");
        assert!(config.is_line_team("line3"));
        assert!(config.is_line_team("line12"));
        assert!(!config.is_line_team("line"));
        assert!(!config.is_line_team("lineup"));
        assert!(!config.is_line_team("discipline"));
    }
}
