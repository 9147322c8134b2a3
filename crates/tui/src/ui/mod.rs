pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, ListMode, Section};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();

    // Main layout: info bar, tabs, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(frame.area());

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.section, &theme);

    match state.section {
        Section::People => screens::people::render(frame, layout[2], state, &theme),
        Section::Categories => screens::categories::render(frame, layout[2], state, &theme),
        Section::Transactions => screens::transactions::render(frame, layout[2], state, &theme),
        Section::ByPerson => screens::reports::render(
            frame,
            layout[2],
            "Totals by person",
            &state.report_people,
            &theme,
        ),
        Section::ByCategory => screens::reports::render(
            frame,
            layout[2],
            "Totals by category",
            &state.report_categories,
            &theme,
        ),
    }

    render_bottom_bar(frame, layout[3], state, &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let refresh = state
        .last_refresh
        .map(|at| at.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());

    let line = Line::from(vec![
        Span::styled("API", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Refresh", Style::default().fg(theme.dim)),
        Span::raw(format!(": {refresh}")),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = vec![
        Span::styled("1-5", Style::default().fg(theme.accent)),
        Span::raw(" tabs"),
        Span::styled("  │  ", Style::default().fg(theme.border)),
    ];
    parts.extend(context_hints(state, theme));
    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("q", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" quit"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

fn context_hints(state: &AppState, theme: &Theme) -> Vec<Span<'static>> {
    let list_hints = |theme: &Theme| {
        vec![
            Span::styled("r", Style::default().fg(theme.accent)),
            Span::raw(" refresh  "),
            Span::styled("c", Style::default().fg(theme.accent)),
            Span::raw(" create  "),
            Span::styled("e", Style::default().fg(theme.accent)),
            Span::raw(" edit  "),
            Span::styled("d", Style::default().fg(theme.accent)),
            Span::raw(" delete"),
        ]
    };
    let form_hints = |theme: &Theme| {
        vec![
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" save  "),
            Span::styled("Tab", Style::default().fg(theme.accent)),
            Span::raw(" next  "),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(" cancel"),
        ]
    };

    match state.section {
        Section::People => match state.people.mode {
            ListMode::List => list_hints(theme),
            ListMode::Form => form_hints(theme),
        },
        Section::Categories => match state.categories.mode {
            ListMode::List => list_hints(theme),
            ListMode::Form => form_hints(theme),
        },
        Section::Transactions => vec![
            Span::styled("Tab", Style::default().fg(theme.accent)),
            Span::raw(" field  "),
            Span::styled("↑/↓", Style::default().fg(theme.accent)),
            Span::raw(" change  "),
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" save  "),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(" clear"),
        ],
        Section::ByPerson | Section::ByCategory => vec![
            Span::styled("r", Style::default().fg(theme.accent)),
            Span::raw(" refresh"),
        ],
    }
}
