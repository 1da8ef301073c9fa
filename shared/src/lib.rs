//! Host-independent vocabulary shared by the scoreboard engine and its hosts.
//!
//! Holds the identifiers, colors and slots the engine talks about, the hard
//! format limits imposed by the client display, and the rich-text value plus
//! the serializers used to measure and split it.

pub mod text;

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub use text::{LegacySerializer, MarkupSerializer, PlainSerializer, Span, Text, TextSerializer};

/// Longest team name the client accepts
pub const MAX_TEAM_NAME_LENGTH: usize = 16;
/// Longest serialized line a sidebar row can hold (prefix + suffix)
pub const MAX_LINE_LENGTH: usize = 128;
/// Serialized lines longer than this are split into prefix and suffix
pub const LINE_SPLIT_LENGTH: usize = 64;

/// Stable identifier of a connected viewer (game session key)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewerId(Uuid);

impl ViewerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ViewerId {
    fn default() -> Self {
        Self::new()
    }
}

/// Hyphenated form, used as the team entry of viewers that cannot be resolved.
impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// The sixteen named colors of the client palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    #[default]
    White,
}

impl TeamColor {
    pub const ALL: [TeamColor; 16] = [
        TeamColor::Black,
        TeamColor::DarkBlue,
        TeamColor::DarkGreen,
        TeamColor::DarkAqua,
        TeamColor::DarkRed,
        TeamColor::DarkPurple,
        TeamColor::Gold,
        TeamColor::Gray,
        TeamColor::DarkGray,
        TeamColor::Blue,
        TeamColor::Green,
        TeamColor::Aqua,
        TeamColor::Red,
        TeamColor::LightPurple,
        TeamColor::Yellow,
        TeamColor::White,
    ];

    /// Legacy format code (`0`-`9`, `a`-`f`)
    pub fn code(&self) -> char {
        let index = Self::ALL.iter().position(|c| c == self).unwrap_or(15);
        char::from_digit(index as u32, 16).unwrap_or('f')
    }

    pub fn from_code(code: char) -> Option<Self> {
        let index = code.to_digit(16)?;
        Self::ALL.get(index as usize).copied()
    }

    /// Tag name used by the markup serializer
    pub fn tag(&self) -> &'static str {
        match self {
            TeamColor::Black => "black",
            TeamColor::DarkBlue => "dark_blue",
            TeamColor::DarkGreen => "dark_green",
            TeamColor::DarkAqua => "dark_aqua",
            TeamColor::DarkRed => "dark_red",
            TeamColor::DarkPurple => "dark_purple",
            TeamColor::Gold => "gold",
            TeamColor::Gray => "gray",
            TeamColor::DarkGray => "dark_gray",
            TeamColor::Blue => "blue",
            TeamColor::Green => "green",
            TeamColor::Aqua => "aqua",
            TeamColor::Red => "red",
            TeamColor::LightPurple => "light_purple",
            TeamColor::Yellow => "yellow",
            TeamColor::White => "white",
        }
    }
}

/// Where an objective is shown on the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplaySlot {
    #[default]
    Sidebar,
    PlayerList,
    BelowName,
}
