// List rendering for posts and the home menu.
// Provides styled list views with loading and empty states plus the page bar.

use ratatui::{prelude::*, widgets::*};

use crate::app::{HOME_ENTRIES, HomeMenu};
use crate::state::{FeedPhase, PageToken, PostList};

/// Render a loading indicator.
pub fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(text, area);
}

/// Render an error message.
pub fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let text = Paragraph::new(format!("❌ {}", error))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red));
    frame.render_widget(text, area);
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(text, area);
}

fn highlighted(list: List<'_>) -> List<'_> {
    list.highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("> ")
}

/// Render the home menu.
pub fn render_home_menu(frame: &mut Frame, menu: &mut HomeMenu, area: Rect) {
    let items: Vec<ListItem> = HOME_ENTRIES
        .iter()
        .map(|route| ListItem::new(Span::styled(route.title(), Style::default().fg(Color::Cyan))))
        .collect();

    let list_widget =
        highlighted(List::new(items).block(Block::default().borders(Borders::ALL).title(" Lists ")));
    frame.render_stateful_widget(list_widget, area, &mut menu.list_state);
}

/// Render loaded posts. `footer` is drawn as the bottom title of the block.
pub fn render_post_list(
    frame: &mut Frame,
    list: &mut PostList,
    phase: &FeedPhase,
    title: &str,
    footer: Line<'_>,
    area: Rect,
) {
    if list.is_empty() {
        match phase {
            FeedPhase::Loading => render_loading(frame, area, "Loading posts"),
            FeedPhase::Failed(e) => render_error(frame, area, e),
            FeedPhase::Idle | FeedPhase::Loaded => {
                render_empty(frame, area, "No posts. Press r to reload")
            }
        }
        return;
    }

    let items: Vec<ListItem> = list
        .posts
        .iter()
        .map(|post| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>5} ", post.id), Style::default().fg(Color::DarkGray)),
                Span::styled(&post.title, Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("  {}", post.description),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .title_bottom(footer);
    frame.render_stateful_widget(highlighted(List::new(items).block(block)), area, &mut list.list_state);
}

/// Footer for the infinite list: how much is loaded and what comes next.
pub fn infinite_footer(loaded: usize, total: u64, loading: bool, has_more: bool) -> Line<'static> {
    let status = if loading {
        Span::styled(" ⏳ loading more ", Style::default().fg(Color::Yellow))
    } else if has_more {
        Span::styled(" ↓ more below ", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(" end of list ", Style::default().fg(Color::DarkGray))
    };
    Line::from(vec![
        Span::styled(format!(" {}/{} ", loaded, total), Style::default().fg(Color::White)),
        status,
    ])
}

/// Page bar for numbered pagination.
pub fn pagination_bar(tokens: &[PageToken], current: u32) -> Line<'static> {
    let mut spans = vec![Span::styled(" ◀ ", Style::default().fg(Color::DarkGray))];
    for token in tokens {
        match token {
            PageToken::Page(page) if *page == current => spans.push(Span::styled(
                format!("[{}]", page),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            PageToken::Page(page) => spans.push(Span::raw(format!(" {} ", page))),
            PageToken::Ellipsis => {
                spans.push(Span::styled(" … ", Style::default().fg(Color::DarkGray)))
            }
        }
    }
    spans.push(Span::styled(" ▶ ", Style::default().fg(Color::DarkGray)));
    Line::from(spans)
}

/// Go-to-page prompt shown in place of the page bar while typing.
pub fn page_prompt(input: &str, total_pages: u32) -> Line<'static> {
    Line::from(vec![
        Span::styled(" Go to page: ", Style::default().fg(Color::Cyan)),
        Span::styled(input.to_string(), Style::default().fg(Color::White)),
        Span::styled("█", Style::default().fg(Color::Yellow)),
        Span::styled(
            format!(" (1-{}) ", total_pages),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::page_window;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_pagination_bar_marks_current_page() {
        let line = pagination_bar(&page_window(5, 10), 5);
        assert_eq!(text(&line), " ◀  1  …  4 [5] 6  …  10  ▶ ");
    }

    #[test]
    fn test_infinite_footer() {
        assert_eq!(text(&infinite_footer(20, 100, false, true)), " 20/100  ↓ more below ");
        assert_eq!(text(&infinite_footer(40, 100, true, true)), " 40/100  ⏳ loading more ");
        assert_eq!(text(&infinite_footer(5, 5, false, false)), " 5/5  end of list ");
    }

    #[test]
    fn test_page_prompt() {
        assert_eq!(text(&page_prompt("7", 10)), " Go to page: 7█ (1-10) ");
        assert_eq!(text(&page_prompt("", 3)), " Go to page: █ (1-3) ");
    }
}
