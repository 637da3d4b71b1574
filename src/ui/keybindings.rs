use crate::domain::SessionMode;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, mode: SessionMode, area: Rect) {
    let hints = match mode {
        SessionMode::Planning => Line::from(vec![
            Span::raw(" ↑/↓ select   "),
            Span::raw("Shift+↑/↓ reorder   "),
            Span::raw("Space start   "),
            Span::raw("a/A add   "),
            Span::raw("b break   "),
            Span::raw("e edit   "),
            Span::raw("v/V select   "),
            Span::raw("x delete   "),
            Span::raw("p presets   "),
            Span::raw("w save   "),
            Span::raw("i import   "),
            Span::raw("o settings   "),
            Span::raw("t theme   "),
            Span::raw("q quit"),
        ]),
        SessionMode::Running => Line::from(vec![
            Span::raw(" Space pause/resume   "),
            Span::raw("n skip   "),
            Span::raw("r reset   "),
            Span::raw("p presets   "),
            Span::raw("o settings   "),
            Span::raw("t theme   "),
            Span::raw("q quit"),
        ]),
        SessionMode::Summary => Line::from(vec![
            Span::raw(" Enter/r plan again   "),
            Span::raw("p presets   "),
            Span::raw("q quit"),
        ]),
    };

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
