//! Cosmetic standup themes, cycled on every shuffle, plus the fixed UI
//! palette used for chrome that does not follow the standup theme.

use ratatui::style::Color;

/// One cosmetic bundle: header background, emoji and display label.
#[derive(Debug, Clone, Copy)]
pub struct StandupTheme {
    pub bg: Color,
    pub emoji: &'static str,
    pub label: &'static str,
}

const THEMES: &[StandupTheme] = &[
    StandupTheme { bg: Color::Rgb(0, 0, 0), emoji: "🔥", label: "Fire" },
    StandupTheme { bg: Color::Rgb(6, 78, 59), emoji: "🌲", label: "Forest" },
    StandupTheme { bg: Color::Rgb(76, 5, 25), emoji: "🎯", label: "Target" },
    StandupTheme { bg: Color::Rgb(88, 28, 135), emoji: "🔮", label: "Magic" },
    StandupTheme { bg: Color::Rgb(146, 64, 14), emoji: "🍯", label: "Honey" },
    StandupTheme { bg: Color::Rgb(22, 78, 99), emoji: "🌊", label: "Ocean" },
    StandupTheme { bg: Color::Rgb(133, 77, 14), emoji: "🌟", label: "Star" },
    StandupTheme { bg: Color::Rgb(49, 46, 129), emoji: "🌌", label: "Galaxy" },
    StandupTheme { bg: Color::Rgb(19, 78, 74), emoji: "🪴", label: "Garden" },
    StandupTheme { bg: Color::Rgb(124, 45, 18), emoji: "🎃", label: "Autumn" },
    StandupTheme { bg: Color::Rgb(30, 58, 138), emoji: "🌠", label: "Night" },
    StandupTheme { bg: Color::Rgb(54, 83, 20), emoji: "🍀", label: "Luck" },
    StandupTheme { bg: Color::Rgb(112, 26, 117), emoji: "🎆", label: "Festival" },
];

pub fn count() -> usize {
    THEMES.len()
}

/// Wrapping lookup; any index maps into the table.
pub fn get(index: usize) -> &'static StandupTheme {
    &THEMES[index % THEMES.len()]
}

/// UI chrome colors (Catppuccin-inspired), independent of the cycling
/// standup theme.
#[derive(Debug, Clone)]
pub struct Palette {
    pub accent: Color,      // Active borders, highlights
    pub danger: Color,      // Delete/clear hints
    pub success: Color,     // Confirmations
    pub warning: Color,     // Status messages
    pub text: Color,        // Primary text
    pub text_dim: Color,    // Hints, counts
    pub bg_selected: Color, // Selection background
    pub inactive: Color,    // Inactive borders
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(250, 179, 135),
            danger: Color::Rgb(243, 139, 168),
            success: Color::Rgb(166, 218, 149),
            warning: Color::Rgb(250, 179, 135),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            bg_selected: Color::Rgb(69, 71, 90),
            inactive: Color::Rgb(88, 91, 112),
        }
    }
}
