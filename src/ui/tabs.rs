// Header bar listing the two list styles.
// Highlights whichever one the navigation stack currently passes through.

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, HOME_ENTRIES};
use crate::state::Route;

/// The list style the user is inside, if any.
fn active_mode(app: &App) -> Option<usize> {
    app.nav
        .breadcrumbs()
        .iter()
        .find_map(|node| HOME_ENTRIES.iter().position(|route| *route == node.route))
}

/// Draw the header at the top of the screen.
pub fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let active = active_mode(app);

    let titles: Vec<Line> = HOME_ENTRIES
        .iter()
        .enumerate()
        .map(|(i, route)| {
            let style = if Some(i) == active {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(route.title(), style))
        })
        .collect();

    // On the home screen nothing is selected, so the highlight is turned off.
    let highlight = if active.is_some() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let tabs_widget = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" postdeck · {} ", Route::Home.title()))
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .select(active.unwrap_or(0))
        .highlight_style(highlight)
        .divider(Span::raw(" │ "));

    frame.render_widget(tabs_widget, area);
}
