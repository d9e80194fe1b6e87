//! Color schemes for the interactive browser.
//!
//! Bars are painted with a gradient keyed on their fill ratio, so the
//! heaviest entries of a directory stand out at a glance.

use ratatui::style::Color;

/// Color scheme for the browser.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    /// Color for directories
    pub dirs: Color,
    /// Color for counted files
    pub counted_files: Color,
    /// Color for files whose extension is not counted
    pub uncounted_files: Color,

    /// Color for the selected row
    pub selected: Color,
    /// Gradient for the LOC and Token bars, lightest load first
    pub bar_gradient: Vec<Color>,
    /// Unfilled part of a bar
    pub bar_empty: Color,

    // Text colors
    pub text: Color,
    pub text_dim: Color,
    pub border: Color,

    // Header colors
    pub header_fg: Color,
    pub header_bg: Color,
    pub accent: Color,
    pub path_fg: Color,
    pub hint_fg: Color,
    pub key_fg: Color,
    pub metrics_fg: Color,
    pub warning_fg: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl ColorScheme {
    /// High-contrast theme for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            dirs: Color::Rgb(100, 149, 237), // Cornflower blue
            counted_files: Color::Rgb(152, 195, 121), // Soft green
            uncounted_files: Color::Rgb(136, 136, 136), // Medium gray

            selected: Color::Rgb(255, 215, 0), // Gold highlight
            bar_gradient: vec![
                Color::Rgb(46, 204, 113),  // Emerald green
                Color::Rgb(155, 225, 93),  // Yellow-green
                Color::Rgb(241, 196, 15),  // Sunflower yellow
                Color::Rgb(243, 156, 18),  // Orange
                Color::Rgb(231, 76, 60),   // Alizarin red
            ],
            bar_empty: Color::Rgb(68, 71, 90),

            text: Color::Rgb(248, 248, 242), // Off-white
            text_dim: Color::Rgb(136, 136, 136),
            border: Color::Rgb(98, 114, 164), // Muted purple-blue

            header_fg: Color::Rgb(248, 248, 242),
            header_bg: Color::Rgb(40, 42, 54),
            accent: Color::Rgb(189, 147, 249), // Purple accent
            path_fg: Color::Rgb(139, 233, 253), // Cyan for paths
            hint_fg: Color::Rgb(98, 114, 164),
            key_fg: Color::Rgb(255, 184, 108), // Orange for keys
            metrics_fg: Color::Rgb(80, 250, 123), // Green for totals
            warning_fg: Color::Rgb(255, 184, 108),
        }
    }

    /// Darker, saturated colors that stay readable on light backgrounds.
    pub fn light() -> Self {
        Self {
            dirs: Color::Rgb(30, 80, 180), // Deep blue
            counted_files: Color::Rgb(34, 139, 34), // Forest green
            uncounted_files: Color::Rgb(105, 105, 105), // Dim gray

            selected: Color::Rgb(0, 100, 200), // Strong blue
            bar_gradient: vec![
                Color::Rgb(22, 160, 90),   // Dark emerald
                Color::Rgb(120, 180, 70),  // Olive green
                Color::Rgb(200, 160, 0),   // Dark gold
                Color::Rgb(200, 120, 0),   // Dark orange
                Color::Rgb(180, 50, 50),   // Dark red
            ],
            bar_empty: Color::Rgb(210, 210, 220),

            text: Color::Rgb(30, 30, 30), // Near black
            text_dim: Color::Rgb(100, 100, 100),
            border: Color::Rgb(80, 80, 120),

            header_fg: Color::Rgb(30, 30, 30),
            header_bg: Color::Rgb(230, 230, 235),
            accent: Color::Rgb(100, 60, 180), // Deep purple accent
            path_fg: Color::Rgb(0, 100, 150),
            hint_fg: Color::Rgb(120, 120, 140),
            key_fg: Color::Rgb(180, 100, 50), // Brown for keys
            metrics_fg: Color::Rgb(22, 130, 80),
            warning_fg: Color::Rgb(180, 100, 50),
        }
    }

    /// No colors at all; selection relies on reverse video.
    pub fn monochrome() -> Self {
        Self {
            dirs: Color::Reset,
            counted_files: Color::Reset,
            uncounted_files: Color::Reset,
            selected: Color::Reset,
            bar_gradient: vec![Color::Reset],
            bar_empty: Color::Reset,
            text: Color::Reset,
            text_dim: Color::Reset,
            border: Color::Reset,
            header_fg: Color::Reset,
            header_bg: Color::Reset,
            accent: Color::Reset,
            path_fg: Color::Reset,
            hint_fg: Color::Reset,
            key_fg: Color::Reset,
            metrics_fg: Color::Reset,
            warning_fg: Color::Reset,
        }
    }

    /// Pick a scheme by its command-line name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "default" | "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    /// Bar color for a bar filled `filled` out of `width` cells.
    pub fn bar_color(&self, filled: usize, width: usize) -> Color {
        if self.bar_gradient.is_empty() {
            return self.text;
        }
        if width == 0 {
            return self.bar_gradient[0];
        }

        let ratio = (filled as f64 / width as f64).clamp(0.0, 1.0);
        let max_index = self.bar_gradient.len() - 1;
        let position = ratio * max_index as f64;
        let index = (position as usize).min(max_index);

        if index >= max_index {
            return self.bar_gradient[max_index];
        }

        let frac = position - index as f64;
        Self::interpolate_colors(self.bar_gradient[index], self.bar_gradient[index + 1], frac)
    }

    /// Interpolates between two RGB colors.
    fn interpolate_colors(c1: Color, c2: Color, t: f64) -> Color {
        match (c1, c2) {
            (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => Color::Rgb(
                Self::lerp(r1, r2, t),
                Self::lerp(g1, g2, t),
                Self::lerp(b1, b2, t),
            ),
            _ => c1,
        }
    }

    fn lerp(a: u8, b: u8, t: f64) -> u8 {
        let result = a as f64 + (b as f64 - a as f64) * t;
        result.round().clamp(0.0, 255.0) as u8
    }
}
