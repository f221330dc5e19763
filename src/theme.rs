use std::fmt;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// All semantic color slots of the HTML report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,

    // General
    pub accent: Rgb,
    pub secondary: Rgb,
    pub text: Rgb,
    pub text_muted: Rgb,
    pub surface: Rgb,
    pub border: Rgb,

    // Diff
    pub diff_add_bg: Rgb,
    pub diff_del_bg: Rgb,
    pub diff_add_fg: Rgb,
    pub diff_del_fg: Rgb,
    pub diff_context_fg: Rgb,
    pub diff_hunk_header_fg: Rgb,
    pub collapsed_bg: Rgb,

    // Stats
    pub success: Rgb,
    pub error: Rgb,
}

pub const DEFAULT_THEME: &str = "github-light";

pub const THEME_NAMES: &[&str] = &[
    "github-light",
    "one-dark",
    "github-dark",
    "dracula",
    "catppuccin-mocha",
    "tokyo-night",
    "solarized-dark",
];

impl Theme {
    /// Unknown names fall back to the default theme.
    pub fn from_name(name: &str) -> Self {
        match name {
            "one-dark" => one_dark(),
            "github-dark" => github_dark(),
            "dracula" => dracula(),
            "catppuccin-mocha" => catppuccin_mocha(),
            "tokyo-night" => tokyo_night(),
            "solarized-dark" => solarized_dark(),
            _ => github_light(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME)
    }
}

pub fn parse_hex_color(hex: &str) -> Option<Rgb> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Rgb(r, g, b))
}

// ── Serde-compatible override struct ──────────────────────────────

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ThemeOverrides {
    pub accent: Option<String>,
    pub secondary: Option<String>,
    pub text: Option<String>,
    pub text_muted: Option<String>,
    pub surface: Option<String>,
    pub border: Option<String>,
    pub diff_add_bg: Option<String>,
    pub diff_del_bg: Option<String>,
    pub diff_add_fg: Option<String>,
    pub diff_del_fg: Option<String>,
    pub diff_context_fg: Option<String>,
    pub diff_hunk_header_fg: Option<String>,
    pub collapsed_bg: Option<String>,
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Invalid hex values are ignored.
pub fn apply_overrides(theme: &mut Theme, overrides: &ThemeOverrides) {
    macro_rules! apply {
        ($field:ident) => {
            if let Some(ref hex) = overrides.$field {
                if let Some(c) = parse_hex_color(hex) {
                    theme.$field = c;
                }
            }
        };
    }
    apply!(accent);
    apply!(secondary);
    apply!(text);
    apply!(text_muted);
    apply!(surface);
    apply!(border);
    apply!(diff_add_bg);
    apply!(diff_del_bg);
    apply!(diff_add_fg);
    apply!(diff_del_fg);
    apply!(diff_context_fg);
    apply!(diff_hunk_header_fg);
    apply!(collapsed_bg);
    apply!(success);
    apply!(error);
}

// ── Built-in themes ──────────────────────────────────────────────

fn github_light() -> Theme {
    Theme {
        name: "github-light".to_string(),
        accent: Rgb(9, 105, 218),
        secondary: Rgb(130, 80, 223),
        text: Rgb(31, 35, 40),
        text_muted: Rgb(101, 109, 118),
        surface: Rgb(255, 255, 255),
        border: Rgb(208, 215, 222),
        diff_add_bg: Rgb(218, 251, 225),
        diff_del_bg: Rgb(255, 235, 233),
        diff_add_fg: Rgb(17, 99, 41),
        diff_del_fg: Rgb(130, 7, 30),
        diff_context_fg: Rgb(31, 35, 40),
        diff_hunk_header_fg: Rgb(101, 109, 118),
        collapsed_bg: Rgb(246, 248, 250),
        success: Rgb(26, 127, 55),
        error: Rgb(207, 34, 46),
    }
}

fn one_dark() -> Theme {
    Theme {
        name: "one-dark".to_string(),
        accent: Rgb(86, 182, 194),
        secondary: Rgb(198, 120, 221),
        text: Rgb(220, 223, 228),
        text_muted: Rgb(92, 99, 112),
        surface: Rgb(30, 30, 30),
        border: Rgb(40, 40, 50),
        diff_add_bg: Rgb(0, 30, 0),
        diff_del_bg: Rgb(40, 0, 0),
        diff_add_fg: Rgb(152, 195, 121),
        diff_del_fg: Rgb(224, 108, 117),
        diff_context_fg: Rgb(171, 178, 191),
        diff_hunk_header_fg: Rgb(198, 120, 221),
        collapsed_bg: Rgb(20, 20, 20),
        success: Rgb(152, 195, 121),
        error: Rgb(224, 108, 117),
    }
}

fn github_dark() -> Theme {
    Theme {
        name: "github-dark".to_string(),
        accent: Rgb(88, 166, 255),
        secondary: Rgb(188, 140, 255),
        text: Rgb(230, 237, 243),
        text_muted: Rgb(125, 133, 144),
        surface: Rgb(22, 27, 34),
        border: Rgb(38, 50, 72),
        diff_add_bg: Rgb(18, 40, 24),
        diff_del_bg: Rgb(50, 18, 18),
        diff_add_fg: Rgb(63, 185, 80),
        diff_del_fg: Rgb(248, 81, 73),
        diff_context_fg: Rgb(230, 237, 243),
        diff_hunk_header_fg: Rgb(188, 140, 255),
        collapsed_bg: Rgb(13, 17, 23),
        success: Rgb(63, 185, 80),
        error: Rgb(248, 81, 73),
    }
}

fn dracula() -> Theme {
    Theme {
        name: "dracula".to_string(),
        accent: Rgb(139, 233, 253),
        secondary: Rgb(255, 121, 198),
        text: Rgb(248, 248, 242),
        text_muted: Rgb(98, 114, 164),
        surface: Rgb(40, 42, 54),
        border: Rgb(68, 71, 90),
        diff_add_bg: Rgb(15, 40, 15),
        diff_del_bg: Rgb(45, 10, 10),
        diff_add_fg: Rgb(80, 250, 123),
        diff_del_fg: Rgb(255, 85, 85),
        diff_context_fg: Rgb(248, 248, 242),
        diff_hunk_header_fg: Rgb(255, 121, 198),
        collapsed_bg: Rgb(30, 31, 40),
        success: Rgb(80, 250, 123),
        error: Rgb(255, 85, 85),
    }
}

fn catppuccin_mocha() -> Theme {
    Theme {
        name: "catppuccin-mocha".to_string(),
        accent: Rgb(137, 180, 250),
        secondary: Rgb(245, 194, 231),
        text: Rgb(205, 214, 244),
        text_muted: Rgb(108, 112, 134),
        surface: Rgb(30, 30, 46),
        border: Rgb(49, 50, 68),
        diff_add_bg: Rgb(10, 35, 20),
        diff_del_bg: Rgb(45, 10, 15),
        diff_add_fg: Rgb(166, 227, 161),
        diff_del_fg: Rgb(243, 139, 168),
        diff_context_fg: Rgb(205, 214, 244),
        diff_hunk_header_fg: Rgb(245, 194, 231),
        collapsed_bg: Rgb(24, 24, 37),
        success: Rgb(166, 227, 161),
        error: Rgb(243, 139, 168),
    }
}

fn tokyo_night() -> Theme {
    Theme {
        name: "tokyo-night".to_string(),
        accent: Rgb(122, 162, 247),
        secondary: Rgb(187, 154, 247),
        text: Rgb(192, 202, 245),
        text_muted: Rgb(86, 95, 137),
        surface: Rgb(26, 27, 38),
        border: Rgb(41, 46, 66),
        diff_add_bg: Rgb(10, 35, 15),
        diff_del_bg: Rgb(45, 10, 15),
        diff_add_fg: Rgb(158, 206, 106),
        diff_del_fg: Rgb(247, 118, 142),
        diff_context_fg: Rgb(192, 202, 245),
        diff_hunk_header_fg: Rgb(187, 154, 247),
        collapsed_bg: Rgb(20, 22, 30),
        success: Rgb(158, 206, 106),
        error: Rgb(247, 118, 142),
    }
}

fn solarized_dark() -> Theme {
    Theme {
        name: "solarized-dark".to_string(),
        accent: Rgb(38, 139, 210),
        secondary: Rgb(211, 54, 130),
        text: Rgb(147, 161, 161),
        text_muted: Rgb(88, 110, 117),
        surface: Rgb(0, 34, 43),
        border: Rgb(7, 54, 66),
        diff_add_bg: Rgb(0, 30, 10),
        diff_del_bg: Rgb(40, 5, 5),
        diff_add_fg: Rgb(133, 153, 0),
        diff_del_fg: Rgb(220, 50, 47),
        diff_context_fg: Rgb(147, 161, 161),
        diff_hunk_header_fg: Rgb(211, 54, 130),
        collapsed_bg: Rgb(0, 26, 33),
        success: Rgb(133, 153, 0),
        error: Rgb(220, 50, 47),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_name_resolves() {
        for name in THEME_NAMES {
            assert_eq!(Theme::from_name(name).name, *name);
        }
    }

    #[test]
    fn test_unknown_name_falls_back() {
        assert_eq!(Theme::from_name("neon").name, DEFAULT_THEME);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#0969da"), Some(Rgb(9, 105, 218)));
        assert_eq!(parse_hex_color("ffffff"), Some(Rgb(255, 255, 255)));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn test_rgb_display_is_css_hex() {
        assert_eq!(Rgb(9, 105, 218).to_string(), "#0969da");
    }

    #[test]
    fn test_overrides_skip_invalid_values() {
        let mut theme = Theme::default();
        let overrides = ThemeOverrides {
            accent: Some("#112233".to_string()),
            error: Some("red".to_string()),
            ..Default::default()
        };
        apply_overrides(&mut theme, &overrides);
        assert_eq!(theme.accent, Rgb(0x11, 0x22, 0x33));
        assert_eq!(theme.error, Theme::default().error);
    }
}
