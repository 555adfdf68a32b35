use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::domain::{Article, Category};
use crate::tui::app::{InputMode, TuiApp};

pub fn render(frame: &mut Frame, app: &mut TuiApp, colors: &ColorConfig) {
    let base = Style::default()
        .bg(app.theme.background())
        .fg(app.theme.foreground());
    frame.render_widget(Block::default().style(base), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(10),   // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(30)])
        .split(chunks[1]);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search
            Constraint::Length(4), // Date range
            Constraint::Min(9),    // Categories
        ])
        .split(body[0]);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(55), // Headlines
            Constraint::Min(6),         // Detail
            Constraint::Length(1),      // Pagination
        ])
        .split(body[1]);

    render_header(frame, app, chunks[0], colors);
    render_search(frame, app, sidebar[0], colors);
    render_date_range(frame, app, sidebar[1], colors);
    render_categories(frame, app, sidebar[2], colors);
    render_articles(frame, app, main[0], colors);
    render_detail(frame, app, main[1], colors);
    render_pagination(frame, app, main[2], colors);
    render_status_bar(frame, app, chunks[2], colors);
}

fn bordered(title: String, active: bool, colors: &ColorConfig) -> Block<'static> {
    let border = if active {
        colors.accent
    } else {
        colors.inactive_border
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

fn render_header(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let saved = app.controller.favorites().len();
    let line = Line::from(vec![
        Span::styled(
            " newsdesk ",
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} theme · ♥ {} saved", app.theme.name(), saved),
            Style::default().fg(colors.muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_search(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let active = app.input_mode == InputMode::Search;
    let text = if app.search_input.is_empty() && !active {
        Span::styled("Search articles...", Style::default().fg(colors.muted))
    } else if active {
        Span::raw(format!("{}_", app.search_input))
    } else {
        Span::raw(app.search_input.clone())
    };

    let paragraph = Paragraph::new(Line::from(text)).block(bordered(
        " Search ".to_string(),
        active,
        colors,
    ));
    frame.render_widget(paragraph, area);
}

fn render_date_range(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let field = |label: &str, value: &str, editing: bool| {
        let shown = if editing {
            format!("{}_", app.edit_buffer)
        } else if value.is_empty() {
            "any".to_string()
        } else {
            value.to_string()
        };
        let style = if editing {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(format!("{:<6}", label), Style::default().fg(colors.muted)),
            Span::styled(shown, style),
        ])
    };

    let from_editing = app.input_mode == InputMode::DateFrom;
    let to_editing = app.input_mode == InputMode::DateTo;
    let lines = vec![
        field("From", &app.date_from_input, from_editing),
        field("To", &app.date_to_input, to_editing),
    ];

    let paragraph = Paragraph::new(lines).block(bordered(
        " Dates ".to_string(),
        from_editing || to_editing,
        colors,
    ));
    frame.render_widget(paragraph, area);
}

fn render_categories(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let active = app.controller.window().category;
    let items: Vec<ListItem> = Category::ALL
        .iter()
        .map(|category| {
            if *category == active {
                ListItem::new(format!("> {}", category)).style(
                    Style::default()
                        .fg(colors.accent)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ListItem::new(format!("  {}", category))
            }
        })
        .collect();

    let list = List::new(items).block(bordered(" Categories ".to_string(), false, colors));
    frame.render_widget(list, area);
}

fn render_articles(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    let view = app.controller.view();

    let title = if view.loading {
        format!(" Headlines · {} (loading...) ", view.category)
    } else {
        format!(
            " Headlines · {} ({} shown) ",
            view.category,
            view.articles.len()
        )
    };
    let block = bordered(title, app.input_mode == InputMode::Normal, colors);

    if view.articles.is_empty() {
        let message = if view.loading {
            "Loading..."
        } else if view.criteria.is_empty() {
            "No articles"
        } else {
            "No articles on this page match the current filters"
        };
        let paragraph = Paragraph::new(Span::styled(message, Style::default().fg(colors.muted)))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = view
        .articles
        .iter()
        .map(|article| {
            let heart = if view.is_favorite(article) {
                Span::styled("♥ ", Style::default().fg(colors.favorite))
            } else {
                Span::styled("♡ ", Style::default().fg(colors.muted))
            };
            let date = Span::styled(
                format!("{:<13}", short_date(article)),
                Style::default().fg(colors.muted),
            );
            ListItem::new(Line::from(vec![
                heart,
                date,
                Span::raw(article.display_title().to_string()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(colors.selection_bg)
                .fg(colors.selection_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_detail(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let Some(article) = app.selected_article() else {
        let block = bordered(" Article ".to_string(), false, colors);
        frame.render_widget(Paragraph::new("No article selected").block(block), area);
        return;
    };

    let lines = detail_lines(&article, colors);

    let title = if app.controller.is_favorite(&article) {
        " Article ♥ "
    } else {
        " Article "
    };
    let paragraph = Paragraph::new(Text::from(lines))
        .block(bordered(title.to_string(), false, colors))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn detail_lines(article: &Article, colors: &ColorConfig) -> Vec<Line<'static>> {
    let muted = Style::default().fg(colors.muted);
    let mut lines = vec![
        Line::from(Span::styled(
            article.display_title().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} · {}", article.display_author(), long_date(article)),
            muted,
        )),
    ];
    if let Some(name) = article.source.as_ref().and_then(|s| s.name.as_deref()) {
        lines.push(Line::from(Span::styled(name.to_string(), muted)));
    }
    lines.push(Line::from(""));
    if let Some(description) = &article.description {
        lines.push(Line::from(description.clone()));
        lines.push(Line::from(""));
    }
    if let Some(url) = &article.url {
        lines.push(Line::from(Span::styled(
            url.clone(),
            Style::default().fg(colors.link),
        )));
    }
    if let Some(image) = &article.url_to_image {
        lines.push(Line::from(Span::styled(format!("Image: {}", image), muted)));
    }
    lines
}

fn render_pagination(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let view = app.controller.view();
    let enabled = |on: bool| {
        if on {
            Style::default().fg(colors.accent)
        } else {
            Style::default().fg(colors.muted).add_modifier(Modifier::DIM)
        }
    };

    let line = Line::from(vec![
        Span::styled("< Previous", enabled(view.has_prev())),
        Span::raw(if view.loading && view.total_pages == 0 {
            format!("   Page {} of …   ", view.page)
        } else {
            format!("   Page {} of {}   ", view.page, view.total_pages)
        }),
        Span::styled("Next >", enabled(view.has_next())),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let view = app.controller.view();
    let style = Style::default().fg(colors.status_fg).bg(colors.status_bg);

    let (status, style) = match app.input_mode {
        InputMode::Search => (
            "Type to search · Enter: apply · Esc: clear".to_string(),
            style,
        ),
        InputMode::DateFrom | InputMode::DateTo => (
            "YYYY-MM-DD (empty for any) · Enter: apply · Esc: cancel".to_string(),
            style,
        ),
        InputMode::Normal => {
            if let Some(error) = view.error {
                (
                    format!("Error: {} · R: retry", error),
                    style.fg(colors.error),
                )
            } else if let Some(ref msg) = app.status_message {
                (msg.clone(), style)
            } else if view.loading {
                ("Loading headlines...".to_string(), style)
            } else {
                (
                    "j/k:Nav  n/p:Page  Tab:Category  s:Save  o:Open  /:Search  f/t:Dates  x:Clear  T:Theme  q:Quit"
                        .to_string(),
                    style,
                )
            }
        }
    };

    frame.render_widget(Paragraph::new(status).style(style), area);
}

fn short_date(article: &Article) -> String {
    article
        .published()
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

fn long_date(article: &Article) -> String {
    article
        .published()
        .map(|d| d.format("%b %-d, %Y %H:%M").to_string())
        .unwrap_or_else(|| "undated".to_string())
}
