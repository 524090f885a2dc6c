// Modal UI components.
// Error dialog drawn over a list screen until it is dismissed.

use ratatui::{prelude::*, widgets::*};

/// Draw an error modal on top of the current view.
pub fn draw_error_modal(frame: &mut Frame, message: &str) {
    let area = frame.area();

    let modal_width = 60.min(area.width);
    let modal_height = 9.min(area.height);
    let modal_x = (area.width.saturating_sub(modal_width)) / 2;
    let modal_y = (area.height.saturating_sub(modal_height)) / 2;

    let modal_area = Rect::new(modal_x, modal_y, modal_width, modal_height);

    // Clear the area behind the modal
    frame.render_widget(Clear, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(2)])
        .split(modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Error ")
        .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));

    let body = Paragraph::new(message)
        .block(block)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White));
    frame.render_widget(body, chunks[0]);

    let instructions = Line::from(vec![
        Span::styled(" r", Style::default().fg(Color::Yellow)),
        Span::styled(" = Retry  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" = Dismiss ", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(
        Paragraph::new(instructions).alignment(Alignment::Center),
        chunks[1],
    );
}
