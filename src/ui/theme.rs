use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub page_bg: String,
    pub ink: String,
    pub ink_dim: String,
    pub page_border: String,
    pub accent: String,
    pub header_bg: String,
    pub header_fg: String,
    pub row_bg: String,
    pub row_hover_bg: String,
    pub track: String,
    pub thumb: String,
    pub thumb_active: String,
    pub icon: String,
    pub tooltip_bg: String,
    pub tooltip_fg: String,
    pub warning: String,
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        // Try user themes dir
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("golembook")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                match toml::from_str::<Theme>(&content) {
                    Ok(theme) => return Some(theme),
                    Err(err) => tracing::warn!(
                        path = %user_theme_path.display(),
                        "ignoring invalid theme: {err}"
                    ),
                }
            }
        }

        // Try bundled themes
        let filename = format!("{name}.toml");
        if let Some(file) = ThemeAssets::get(&filename) {
            if let Ok(content) = std::str::from_utf8(file.data.as_ref()) {
                if let Ok(theme) = toml::from_str::<Theme>(content) {
                    return Some(theme);
                }
            }
        }

        None
    }

    pub fn available_themes() -> Vec<String> {
        ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("parchment").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#2b2118".to_string(),
            fg: "#e8dcc4".to_string(),
            page_bg: "#f3e9d2".to_string(),
            ink: "#3b2f23".to_string(),
            ink_dim: "#8a7a62".to_string(),
            page_border: "#7a5c3a".to_string(),
            accent: "#9c2f2f".to_string(),
            header_bg: "#4a3623".to_string(),
            header_fg: "#f3e9d2".to_string(),
            row_bg: "#e6d8b8".to_string(),
            row_hover_bg: "#d6c397".to_string(),
            track: "#cbb892".to_string(),
            thumb: "#7a5c3a".to_string(),
            thumb_active: "#9c2f2f".to_string(),
            icon: "#2f5d7a".to_string(),
            tooltip_bg: "#3b2f23".to_string(),
            tooltip_fg: "#f3e9d2".to_string(),
            warning: "#c77d1a".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn page_bg(&self) -> Color { Self::parse_color(&self.page_bg) }
    pub fn ink(&self) -> Color { Self::parse_color(&self.ink) }
    pub fn ink_dim(&self) -> Color { Self::parse_color(&self.ink_dim) }
    pub fn page_border(&self) -> Color { Self::parse_color(&self.page_border) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn row_bg(&self) -> Color { Self::parse_color(&self.row_bg) }
    pub fn row_hover_bg(&self) -> Color { Self::parse_color(&self.row_hover_bg) }
    pub fn track(&self) -> Color { Self::parse_color(&self.track) }
    pub fn thumb(&self) -> Color { Self::parse_color(&self.thumb) }
    pub fn thumb_active(&self) -> Color { Self::parse_color(&self.thumb_active) }
    pub fn icon(&self) -> Color { Self::parse_color(&self.icon) }
    pub fn tooltip_bg(&self) -> Color { Self::parse_color(&self.tooltip_bg) }
    pub fn tooltip_fg(&self) -> Color { Self::parse_color(&self.tooltip_fg) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
}
