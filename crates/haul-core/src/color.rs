//! The fixed palette trucks and parcels are painted from.
//!
//! Colors matter to scoring: a truck delivering a parcel of its own color
//! earns the on-color multiplier.  Board specs refer to colors by their
//! snake-case label (`"sea_blue"`), see [`Color::as_str`].

use std::str::FromStr;

use crate::CoreError;

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Color {
    MidRed,
    MidPink,
    MidPurpleBlue,
    SeaBlue,
    MidGreen,
    MidYellow,
    BrightRed,
    BrightPurple,
    Turquoise,
    BrightGreen,
    DarkNavy,
    BrightOrange,
    DarkPurple,
}

impl Color {
    /// Every palette entry, in palette order.
    pub const ALL: [Color; 13] = [
        Color::MidRed,
        Color::MidPink,
        Color::MidPurpleBlue,
        Color::SeaBlue,
        Color::MidGreen,
        Color::MidYellow,
        Color::BrightRed,
        Color::BrightPurple,
        Color::Turquoise,
        Color::BrightGreen,
        Color::DarkNavy,
        Color::BrightOrange,
        Color::DarkPurple,
    ];

    /// Label used in board specs and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Color::MidRed        => "mid_red",
            Color::MidPink       => "mid_pink",
            Color::MidPurpleBlue => "mid_purple_blue",
            Color::SeaBlue       => "sea_blue",
            Color::MidGreen      => "mid_green",
            Color::MidYellow     => "mid_yellow",
            Color::BrightRed     => "bright_red",
            Color::BrightPurple  => "bright_purple",
            Color::Turquoise     => "turquoise",
            Color::BrightGreen   => "bright_green",
            Color::DarkNavy      => "dark_navy",
            Color::BrightOrange  => "bright_orange",
            Color::DarkPurple    => "dark_purple",
        }
    }

    /// `(r, g, b)` components for renderers.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::MidRed        => (198, 0, 0),
            Color::MidPink       => (198, 0, 144),
            Color::MidPurpleBlue => (102, 0, 198),
            Color::SeaBlue       => (0, 113, 198),
            Color::MidGreen      => (0, 198, 107),
            Color::MidYellow     => (198, 196, 0),
            Color::BrightRed     => (255, 79, 79),
            Color::BrightPurple  => (251, 79, 255),
            Color::Turquoise     => (79, 220, 255),
            Color::BrightGreen   => (79, 255, 168),
            Color::DarkNavy      => (12, 3, 79),
            Color::BrightOrange  => (255, 178, 79),
            Color::DarkPurple    => (109, 43, 140),
        }
    }
}

impl FromStr for Color {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CoreError::Parse(format!("unknown color {s:?}")))
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}
