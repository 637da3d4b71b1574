//! Analog clock with the remaining plan laid over it as colored wedges.

use crate::app::AppState;
use crate::domain::{compute_dial, format_minutes, Dial};
use crate::ui::styles::{border_style, face_color, hand_color, hex_to_color, title_style};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::canvas::{Canvas, Context, Line as CanvasLine, Points},
    widgets::{Block, Borders},
    Frame,
};

const FACE_RADIUS: f64 = 1.0;
const WEDGE_RADIUS: f64 = 0.82;
const NUMERAL_RADIUS: f64 = 0.9;
/// Angular step between radial strokes when filling a wedge, in degrees
const FILL_STEP_DEGREES: f64 = 1.0;

/// Point at `radius` along an angle measured clockwise from 12 o'clock
fn polar(degrees: f64, radius: f64) -> (f64, f64) {
    let radians = degrees.to_radians();
    (radius * radians.sin(), radius * radians.cos())
}

/// Canvas x bounds that keep the face round in cells roughly twice as tall as wide
fn x_extent(area: Rect) -> f64 {
    let height = area.height.max(1) as f64;
    let width = area.width.max(1) as f64;
    1.1 * width / (2.0 * height)
}

/// Radial strokes covering `[start, end)` degrees
fn wedge_strokes(start_degrees: f64, end_degrees: f64) -> Vec<(f64, f64)> {
    let mut strokes = Vec::new();
    let mut angle = start_degrees;
    while angle < end_degrees {
        strokes.push(polar(angle, WEDGE_RADIUS));
        angle += FILL_STEP_DEGREES;
    }
    strokes.push(polar(end_degrees, WEDGE_RADIUS));
    strokes
}

fn draw_face(ctx: &mut Context, dark: bool) {
    let color = face_color(dark);

    let rim: Vec<(f64, f64)> = (0..360).map(|d| polar(d as f64, FACE_RADIUS)).collect();
    ctx.draw(&Points { coords: &rim, color });

    for minute in 0..60 {
        let angle = minute as f64 * 6.0;
        let inner = if minute % 5 == 0 { 0.88 } else { 0.95 };
        let (x1, y1) = polar(angle, inner);
        let (x2, y2) = polar(angle, FACE_RADIUS);
        ctx.draw(&CanvasLine { x1, y1, x2, y2, color });
    }

    for hour in 1..=12 {
        let (x, y) = polar(hour as f64 * 30.0, NUMERAL_RADIUS - 0.12);
        ctx.print(x, y, Span::styled(hour.to_string(), Style::default().fg(color)));
    }
}

fn draw_wedges(ctx: &mut Context, dial: &Dial) {
    for wedge in &dial.wedges {
        let color = hex_to_color(&wedge.color);
        for (x2, y2) in wedge_strokes(wedge.start_degrees(), wedge.end_degrees()) {
            ctx.draw(&CanvasLine { x1: 0.0, y1: 0.0, x2, y2, color });
        }
    }
}

fn draw_hands(ctx: &mut Context, dial: &Dial, dark: bool) {
    let hands = [
        (dial.hands.hour, 0.5, hand_color(dark)),
        (dial.hands.minute, 0.75, hand_color(dark)),
        (dial.hands.second, 0.85, Color::Red),
    ];
    for (angle, length, color) in hands {
        let (x2, y2) = polar(angle, length);
        ctx.draw(&CanvasLine { x1: 0.0, y1: 0.0, x2, y2, color });
    }
}

/// Render the visual clock pane
pub fn render_clock_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let dark = app.settings.dark_mode;
    let dial = compute_dial(
        app.activities(),
        app.session.current_index(),
        app.session.is_ticking(),
        app.now.time(),
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(dark))
        .title(Span::styled(
            format!(
                " {} · {} left ",
                app.now.format("%H:%M:%S"),
                format_minutes(dial.total_minutes().ceil() as u32)
            ),
            title_style(),
        ));

    let x = x_extent(block.inner(area));
    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([-x, x])
        .y_bounds([-1.1, 1.1])
        .paint(|ctx| {
            draw_wedges(ctx, &dial);
            ctx.layer();
            draw_face(ctx, dark);
            draw_hands(ctx, &dial, dark);
        });

    f.render_widget(canvas, area);
}
