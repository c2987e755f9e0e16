use std::str::FromStr;

use crate::foundation::error::BoothError;

/// Capture layouts offered to the user, as `rows x cols` grids.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutType {
    Single,
    #[serde(rename = "vertical-4")]
    Vertical4,
    #[serde(rename = "horizontal-4")]
    Horizontal4,
    #[default]
    #[serde(rename = "grid-2x2")]
    Grid2x2,
    #[serde(rename = "grid-3x3")]
    Grid3x3,
    TopBottom,
    LeftRight,
}

/// Static description of one layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct LayoutConfig {
    #[serde(rename = "type")]
    pub layout_type: LayoutType,
    pub rows: u32,
    pub cols: u32,
    pub total_slots: u32,
    pub name: &'static str,
    pub description: &'static str,
}

const fn layout(
    layout_type: LayoutType,
    rows: u32,
    cols: u32,
    name: &'static str,
    description: &'static str,
) -> LayoutConfig {
    LayoutConfig {
        layout_type,
        rows,
        cols,
        total_slots: rows * cols,
        name,
        description,
    }
}

pub static LAYOUT_CONFIGS: [LayoutConfig; 7] = [
    layout(LayoutType::Single, 1, 1, "Single", "One photo"),
    layout(LayoutType::Vertical4, 4, 1, "Photo Strip", "Four photos stacked vertically"),
    layout(LayoutType::Horizontal4, 1, 4, "Wide Strip", "Four photos side by side"),
    layout(LayoutType::Grid2x2, 2, 2, "2x2 Grid", "Four photos in a square grid"),
    layout(LayoutType::Grid3x3, 3, 3, "3x3 Grid", "Nine photos in a square grid"),
    layout(LayoutType::TopBottom, 2, 1, "Top & Bottom", "Two photos stacked"),
    layout(LayoutType::LeftRight, 1, 2, "Side by Side", "Two photos next to each other"),
];

impl LayoutType {
    pub const ALL: [LayoutType; 7] = [
        Self::Single,
        Self::Vertical4,
        Self::Horizontal4,
        Self::Grid2x2,
        Self::Grid3x3,
        Self::TopBottom,
        Self::LeftRight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Vertical4 => "vertical-4",
            Self::Horizontal4 => "horizontal-4",
            Self::Grid2x2 => "grid-2x2",
            Self::Grid3x3 => "grid-3x3",
            Self::TopBottom => "top-bottom",
            Self::LeftRight => "left-right",
        }
    }

    pub fn config(self) -> &'static LayoutConfig {
        match self {
            Self::Single => &LAYOUT_CONFIGS[0],
            Self::Vertical4 => &LAYOUT_CONFIGS[1],
            Self::Horizontal4 => &LAYOUT_CONFIGS[2],
            Self::Grid2x2 => &LAYOUT_CONFIGS[3],
            Self::Grid3x3 => &LAYOUT_CONFIGS[4],
            Self::TopBottom => &LAYOUT_CONFIGS[5],
            Self::LeftRight => &LAYOUT_CONFIGS[6],
        }
    }
}

impl std::fmt::Display for LayoutType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutType {
    type Err = BoothError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == key)
            .ok_or_else(|| BoothError::validation(format!("unknown layout '{s}'")))
    }
}

/// Layout compatibility tag attached to uploaded custom frames.
///
/// Kept apart from [`LayoutType`]: the two sets evolved independently and `2x3` has no capture
/// layout counterpart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FrameCompatTag {
    #[serde(rename = "1x4")]
    Strip1x4,
    #[serde(rename = "2x3")]
    Grid2x3,
    #[serde(rename = "2x2")]
    Grid2x2,
}

impl FrameCompatTag {
    pub const ALL: [FrameCompatTag; 3] = [Self::Strip1x4, Self::Grid2x3, Self::Grid2x2];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strip1x4 => "1x4",
            Self::Grid2x3 => "2x3",
            Self::Grid2x2 => "2x2",
        }
    }
}

impl std::fmt::Display for FrameCompatTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrameCompatTag {
    type Err = BoothError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == key)
            .ok_or_else(|| BoothError::validation(format!("unknown frame layout tag '{s}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/config.rs"]
mod tests;
