//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::config::ThemeMode;

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Score-based colors (traffic light pattern, high score is good)
    pub score_high: Color,
    pub score_mid: Color,
    pub score_low: Color,

    // Score bar
    pub bar_empty: Color,

    // Table colors
    pub row_alt_bg: Color,
    pub index_color: Color,
    pub header_style: Style,
    pub row_selected: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,

    // Filter panel
    pub panel_border: Color,
    pub field_label: Color,
    pub field_focused: Style,
    pub field_editing: Style,
    pub field_active: Color,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_key: Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            score_high: Color::Green,
            score_mid: Color::Yellow,
            score_low: Color::Red,
            bar_empty: Color::DarkGray,
            row_alt_bg: Color::Indexed(235),
            index_color: Color::DarkGray,
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            panel_border: Color::Indexed(238),
            field_label: Color::Gray,
            field_focused: Style::new().fg(Color::Cyan).bold(),
            field_editing: Style::new().fg(Color::Black).bg(Color::Cyan),
            field_active: Color::Yellow,
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_key: Color::Cyan,
        }
    }

    pub fn light() -> Self {
        Self {
            score_high: Color::Rgb(0, 128, 0),
            score_mid: Color::Rgb(170, 110, 0),
            score_low: Color::Rgb(180, 0, 0),
            bar_empty: Color::Indexed(250),
            row_alt_bg: Color::Indexed(254),
            index_color: Color::Indexed(244),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Indexed(240),
            title_color: Color::Blue,
            panel_border: Color::Indexed(250),
            field_label: Color::Indexed(240),
            field_focused: Style::new().fg(Color::Blue).bold(),
            field_editing: Style::new().fg(Color::White).bg(Color::Blue),
            field_active: Color::Rgb(170, 110, 0),
            status_bar_bg: Color::Indexed(253),
            status_key_color: Color::Blue,
            flash_success: Color::Rgb(0, 128, 0),
            flash_error: Color::Rgb(180, 0, 0),
            popup_border: Color::Blue,
            popup_key: Color::Blue,
        }
    }

    /// Color for a score in `[0, 1]`
    pub fn score_color(&self, score: f64) -> Color {
        if score >= 0.7 {
            self.score_high
        } else if score >= 0.4 {
            self.score_mid
        } else {
            self.score_low
        }
    }
}

/// Pick the palette; `auto` asks the terminal for its background luminance
/// and falls back to dark when it cannot tell.
pub fn resolve_theme(mode: ThemeMode) -> ThemeColors {
    match mode {
        ThemeMode::Dark => ThemeColors::dark(),
        ThemeMode::Light => ThemeColors::light(),
        ThemeMode::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => ThemeColors::light(),
            _ => ThemeColors::dark(),
        },
    }
}
