use anyhow::{Result, anyhow};
use ratatui::style::Color;

/// Colors used by the split view. Defaults match the classic dark palette;
/// individual entries can be overridden from the command line.
#[derive(Debug, Clone)]
pub struct Theme {
    pub added_bg: Color,
    pub removed_bg: Color,
    /// Background for the changed sub-spans within an added line.
    pub added_emphasis_bg: Color,
    /// Background for the changed sub-spans within a removed line.
    pub removed_emphasis_bg: Color,
    /// Background for the empty half of a one-sided row.
    pub filler_bg: Color,
    pub hunk_bg: Color,
    pub hunk_fg: Color,
    pub line_number_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            added_bg: Color::Rgb(0, 100, 0),
            removed_bg: Color::Rgb(139, 0, 0),
            added_emphasis_bg: Color::Rgb(0, 160, 0),
            removed_emphasis_bg: Color::Rgb(200, 40, 40),
            filler_bg: Color::Rgb(40, 40, 40),
            hunk_bg: Color::Blue,
            hunk_fg: Color::White,
            line_number_fg: Color::DarkGray,
        }
    }
}

/// Parses a `#rrggbb` hex color override.
pub fn parse_color(value: &str) -> Result<Color> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(anyhow!("invalid color '{value}', expected #rrggbb"));
    }

    let r = u8::from_str_radix(&hex[0..2], 16)?;
    let g = u8::from_str_radix(&hex[2..4], 16)?;
    let b = u8::from_str_radix(&hex[4..6], 16)?;
    Ok(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#008b00").unwrap(), Color::Rgb(0, 139, 0));
        assert_eq!(parse_color("8b0000").unwrap(), Color::Rgb(139, 0, 0));
        assert!(parse_color("#fff").is_err());
        assert!(parse_color("not-a-color").is_err());
    }
}
