use ratatui::style::{Color, Modifier, Style};

/// Parse a `#rrggbb` activity color; anything else renders gray
pub fn hex_to_color(hex: &str) -> Color {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Color::Gray;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::Gray,
    }
}

/// Default text style
pub fn default_style(dark: bool) -> Style {
    if dark {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Black)
    }
}

/// Background for the whole screen
pub fn background_style(dark: bool) -> Style {
    if dark {
        Style::default().bg(Color::Black).fg(Color::White)
    } else {
        Style::default().bg(Color::White).fg(Color::Black)
    }
}

/// Selected row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Currently playing activity
pub fn running_style() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}

/// Paused badge style
pub fn paused_style() -> Style {
    Style::default().fg(Color::Yellow)
}

/// Pending activity badge style
pub fn idle_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style(dark: bool) -> Style {
    if dark {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Modal background style
pub fn modal_bg_style(dark: bool) -> Style {
    if dark {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    } else {
        Style::default().bg(Color::Gray).fg(Color::Black)
    }
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Progress gauge style
pub fn gauge_style() -> Style {
    Style::default().fg(Color::Green).bg(Color::DarkGray)
}

/// Status line notices (import results and errors)
pub fn notice_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Completed activity style
pub fn done_style() -> Style {
    Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// Clock face ticks and numerals
pub fn face_color(dark: bool) -> Color {
    if dark {
        Color::Gray
    } else {
        Color::DarkGray
    }
}

/// Hour and minute hands
pub fn hand_color(dark: bool) -> Color {
    if dark {
        Color::White
    } else {
        Color::Black
    }
}
