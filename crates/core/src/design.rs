//! Jersey design parameters: colors, pattern selection, and lettering.
//!
//! These are pure UI state; nothing here persists until the user explicitly
//! saves a design or attaches one to an order.

use serde::{Deserialize, Serialize};

/// Maximum player name length.
pub const MAX_PLAYER_NAME: usize = 15;
/// Maximum team name length.
pub const MAX_TEAM_NAME: usize = 20;
/// Maximum player number digits.
pub const MAX_NUMBER_DIGITS: usize = 2;

/// Errors parsing design parameters.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DesignError {
    #[error("color must be a #rrggbb hex string, got {0:?}")]
    InvalidColor(String),
    #[error("unknown pattern: {0}")]
    UnknownPattern(String),
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` hex string.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::InvalidColor`] for anything that is not a
    /// 7-character `#`-prefixed hex triplet.
    pub fn parse(s: &str) -> Result<Self, DesignError> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| DesignError::InvalidColor(s.to_owned()))?;
        if hex.len() != 6 {
            return Err(DesignError::InvalidColor(s.to_owned()));
        }
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .ok_or_else(|| DesignError::InvalidColor(s.to_owned()))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Format as a `#rrggbb` hex string.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::str::FromStr for Rgb {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// The twelve fixed pattern recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Pattern {
    #[default]
    Solid,
    VerticalStripes,
    HorizontalStripes,
    DiagonalStripes,
    Checkered,
    Gradient,
    SidePanels,
    Chevron,
    Diamond,
    Split,
    Wave,
    Geometric,
}

impl Pattern {
    /// All recipes, in designer display order.
    pub const ALL: [Self; 12] = [
        Self::Solid,
        Self::VerticalStripes,
        Self::HorizontalStripes,
        Self::DiagonalStripes,
        Self::Checkered,
        Self::Gradient,
        Self::SidePanels,
        Self::Chevron,
        Self::Diamond,
        Self::Split,
        Self::Wave,
        Self::Geometric,
    ];

    /// The kebab-case identifier used in forms and on the wire.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::VerticalStripes => "vertical-stripes",
            Self::HorizontalStripes => "horizontal-stripes",
            Self::DiagonalStripes => "diagonal-stripes",
            Self::Checkered => "checkered",
            Self::Gradient => "gradient",
            Self::SidePanels => "side-panels",
            Self::Chevron => "chevron",
            Self::Diamond => "diamond",
            Self::Split => "split",
            Self::Wave => "wave",
            Self::Geometric => "geometric",
        }
    }

    /// Human-readable name for the designer palette.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Solid => "Solid",
            Self::VerticalStripes => "Vertical Stripes",
            Self::HorizontalStripes => "Horizontal Stripes",
            Self::DiagonalStripes => "Diagonal Stripes",
            Self::Checkered => "Checkered",
            Self::Gradient => "Gradient",
            Self::SidePanels => "Side Panels",
            Self::Chevron => "Chevron",
            Self::Diamond => "Diamond",
            Self::Split => "Split",
            Self::Wave => "Wave",
            Self::Geometric => "Geometric",
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for Pattern {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.id() == s)
            .ok_or_else(|| DesignError::UnknownPattern(s.to_owned()))
    }
}

/// Which side of the jersey is being viewed or exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewSide {
    #[default]
    Front,
    Back,
}

impl std::fmt::Display for ViewSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Front => write!(f, "front"),
            Self::Back => write!(f, "back"),
        }
    }
}

impl std::str::FromStr for ViewSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "front" => Ok(Self::Front),
            "back" => Ok(Self::Back),
            _ => Err(format!("invalid view side: {s}")),
        }
    }
}

/// A complete set of jersey customization parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JerseyDesign {
    pub primary_color: Rgb,
    pub secondary_color: Rgb,
    pub text_color: Rgb,
    pub pattern: Pattern,
    pub player_name: String,
    pub player_number: String,
    pub team_name: String,
    pub view: ViewSide,
    /// Optional uploaded logo, stored as a backend file reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

impl Default for JerseyDesign {
    fn default() -> Self {
        Self {
            primary_color: Rgb::new(0x1e, 0x40, 0xaf),
            secondary_color: Rgb::new(0xff, 0xff, 0xff),
            text_color: Rgb::new(0xff, 0xff, 0xff),
            pattern: Pattern::Solid,
            player_name: "PLAYER".to_string(),
            player_number: "10".to_string(),
            team_name: "TEAM NAME".to_string(),
            view: ViewSide::Front,
            logo_url: None,
        }
    }
}

impl JerseyDesign {
    /// Set the player name, uppercased and capped at 15 characters.
    pub fn set_player_name(&mut self, name: &str) {
        self.player_name = normalize_text(name, MAX_PLAYER_NAME);
    }

    /// Set the team name, uppercased and capped at 20 characters.
    pub fn set_team_name(&mut self, name: &str) {
        self.team_name = normalize_text(name, MAX_TEAM_NAME);
    }

    /// Set the player number, digits only, capped at 2 digits (0-99).
    pub fn set_player_number(&mut self, number: &str) {
        self.player_number = number
            .chars()
            .filter(char::is_ascii_digit)
            .take(MAX_NUMBER_DIGITS)
            .collect();
    }
}

/// Uppercase and truncate lettering input to `max` characters.
fn normalize_text(input: &str, max: usize) -> String {
    input.trim().to_uppercase().chars().take(max).collect()
}

/// A named color template shown in the designer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTemplate {
    pub name: &'static str,
    pub primary: Rgb,
    pub secondary: Rgb,
}

/// The six stock color templates.
pub const COLOR_TEMPLATES: [ColorTemplate; 6] = [
    ColorTemplate {
        name: "Classic Stripes",
        primary: Rgb::new(0x1e, 0x40, 0xaf),
        secondary: Rgb::new(0xff, 0xff, 0xff),
    },
    ColorTemplate {
        name: "Bold Red",
        primary: Rgb::new(0xdc, 0x26, 0x26),
        secondary: Rgb::new(0xff, 0xff, 0xff),
    },
    ColorTemplate {
        name: "Forest Green",
        primary: Rgb::new(0x16, 0xa3, 0x4a),
        secondary: Rgb::new(0xff, 0xff, 0xff),
    },
    ColorTemplate {
        name: "Black & Gold",
        primary: Rgb::new(0x00, 0x00, 0x00),
        secondary: Rgb::new(0xfb, 0xbf, 0x24),
    },
    ColorTemplate {
        name: "Royal Purple",
        primary: Rgb::new(0x7c, 0x3a, 0xed),
        secondary: Rgb::new(0xff, 0xff, 0xff),
    },
    ColorTemplate {
        name: "Navy Blue",
        primary: Rgb::new(0x1e, 0x3a, 0x8a),
        secondary: Rgb::new(0x60, 0xa5, 0xfa),
    },
];
