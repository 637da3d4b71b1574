use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub list_area: Rect,
    pub clock_area: Rect,
    pub now_area: Rect,
    pub stats_area: Rect,
    pub insights_area: Rect,
    pub status_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Main area: List (55%) | Clock (45%)
/// - Bottom area: Now playing | Stats | Insights
/// - Status line (1 row)
pub fn create_layout(area: Rect) -> MainLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Keybindings bar
            Constraint::Min(10),    // List + clock
            Constraint::Length(8),  // Bottom panes
            Constraint::Length(1),  // Status line
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(vertical[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(40),
        ])
        .split(vertical[2]);

    MainLayout {
        keybindings_area: vertical[0],
        list_area: top[0],
        clock_area: top[1],
        now_area: bottom[0],
        stats_area: bottom[1],
        insights_area: bottom[2],
        status_area: vertical[3],
    }
}

/// Create centered modal area
pub fn create_modal_area(area: Rect) -> Rect {
    create_modal_area_with_height(area, 16)
}

/// Centered modal with a fixed height, clipped to the screen
pub fn create_modal_area_with_height(area: Rect, height: u16) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout() {
        let area = Rect::new(0, 0, 120, 40);
        let layout = create_layout(area);

        assert_eq!(layout.keybindings_area.height, 1);
        assert_eq!(layout.status_area.height, 1);
        assert!(layout.list_area.height >= 10);
        assert_eq!(layout.list_area.height, layout.clock_area.height);
        assert_eq!(layout.now_area.height, 8);
        assert!(layout.insights_area.width > layout.stats_area.width);
    }

    #[test]
    fn test_create_modal_area() {
        let area = Rect::new(0, 0, 100, 50);
        let modal = create_modal_area(area);

        assert!(modal.width < area.width);
        assert!(modal.height < area.height);
        assert_eq!(modal.height, 16);
    }
}
