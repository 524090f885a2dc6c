// UI module for rendering the TUI.
// Contains the header, breadcrumbs, list screens, detail view and overlays.

mod breadcrumb;
mod list;
mod modal;
mod tabs;

use ratatui::layout::Margin;
use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Screen};
use crate::state::{LoadingState, PostDetail};

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Length(2), // Breadcrumb
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    tabs::draw_tabs(frame, app, chunks[0]);

    let loaded_at = match &app.screen {
        Screen::Infinite(screen) => screen.last_loaded_at(),
        Screen::Pagination(screen) => screen.last_loaded_at(),
        _ => None,
    };
    breadcrumb::draw_breadcrumb(frame, &app.nav.breadcrumbs(), chunks[1], loaded_at);

    draw_content(frame, app, chunks[2]);
    draw_status_bar(frame, app, chunks[3]);

    let error = match &app.screen {
        Screen::Infinite(screen) => screen.error(),
        Screen::Pagination(screen) => screen.error(),
        _ => None,
    };
    if let Some(message) = error {
        modal::draw_error_modal(frame, message);
    }

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Draw the main content area for the live screen.
fn draw_content(frame: &mut Frame, app: &mut App, area: Rect) {
    match &mut app.screen {
        Screen::Home(menu) => list::render_home_menu(frame, menu, area),
        Screen::Infinite(screen) => {
            let footer = list::infinite_footer(
                screen.posts().len(),
                screen.total(),
                screen.is_loading(),
                screen.has_more(),
            );
            let phase = screen.phase().clone();
            list::render_post_list(frame, &mut screen.list, &phase, "Infinite Scroll", footer, area);
        }
        Screen::Pagination(screen) => {
            let footer = match screen.page_input() {
                Some(input) => list::page_prompt(input, screen.total_pages()),
                None => list::pagination_bar(&screen.page_numbers(), screen.current_page()),
            };
            let title = format!(
                "Page {} of {} · {} posts",
                screen.current_page(),
                screen.total_pages(),
                screen.total()
            );
            let phase = screen.phase().clone();
            list::render_post_list(frame, &mut screen.list, &phase, &title, footer, area);
        }
        Screen::Detail(detail) => draw_detail(frame, detail, area),
    }
}

/// Draw a single post with its image preview.
fn draw_detail(frame: &mut Frame, detail: &PostDetail, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Post #{} ", detail.post_id()));

    let post = match &detail.state {
        LoadingState::Idle | LoadingState::Loading => {
            frame.render_widget(block, area);
            list::render_loading(frame, inner(area), "Loading post");
            return;
        }
        LoadingState::Error(e) => {
            frame.render_widget(block, area);
            list::render_error(frame, inner(area), e);
            return;
        }
        LoadingState::Loaded(post) => post,
    };

    let image = match &detail.image {
        LoadingState::Idle => Span::styled("not requested", Style::default().fg(Color::DarkGray)),
        LoadingState::Loading => Span::styled("⏳ loading...", Style::default().fg(Color::Yellow)),
        LoadingState::Loaded(preview) => Span::styled(
            format!("{}×{} px", preview.width, preview.height),
            Style::default().fg(Color::Green),
        ),
        LoadingState::Error(e) => Span::styled(format!("❌ {}", e), Style::default().fg(Color::Red)),
    };

    let lines = vec![
        Line::from(Span::styled(
            post.title.as_str(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(post.description.as_str()),
        Line::from(""),
        Line::from(vec![
            Span::styled("Image  ", Style::default().fg(Color::DarkGray)),
            Span::raw(post.image_url.as_str()),
        ]),
        Line::from(vec![Span::styled("       ", Style::default()), image]),
    ];

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn inner(area: Rect) -> Rect {
    area.inner(Margin {
        horizontal: 1,
        vertical: 1,
    })
}

/// Draw the status bar with keybinding hints.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut hints = vec![
        Span::raw(" ↑↓ "),
        Span::styled("Navigate", Style::default().fg(Color::DarkGray)),
        Span::raw("  ↵ "),
        Span::styled("Open", Style::default().fg(Color::DarkGray)),
    ];
    if matches!(app.screen, Screen::Pagination(_)) {
        hints.push(Span::raw("  ←→ "));
        hints.push(Span::styled("Page", Style::default().fg(Color::DarkGray)));
        hints.push(Span::raw("  Home/End "));
        hints.push(Span::styled("First/Last", Style::default().fg(Color::DarkGray)));
        hints.push(Span::raw("  g "));
        hints.push(Span::styled("Go to", Style::default().fg(Color::DarkGray)));
    }
    hints.extend([
        Span::raw("  Esc "),
        Span::styled("Back", Style::default().fg(Color::DarkGray)),
        Span::raw("  r "),
        Span::styled("Retry", Style::default().fg(Color::DarkGray)),
        Span::raw("  ? "),
        Span::styled("Help", Style::default().fg(Color::DarkGray)),
        Span::raw("  q "),
        Span::styled("Quit", Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    // Create a centered popup
    let popup_width = 50.min(area.width);
    let popup_height = 16.min(area.height);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let key = |k: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(k, Style::default().fg(Color::Cyan)),
            Span::raw(what),
        ])
    };

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        key("  ↑/↓ or j/k    ", "Move selection"),
        key("  Enter         ", "Open list / open post"),
        key("  ←/→ or p/n    ", "Previous / next page"),
        key("  Home/End      ", "First / last page"),
        key("  g or 0-9      ", "Go to page"),
        key("  Esc           ", "Dismiss error / go back"),
        key("  r             ", "Retry last load"),
        key("  ?             ", "Show this help"),
        key("  q             ", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help_paragraph = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
    );

    frame.render_widget(help_paragraph, popup_area);
}
