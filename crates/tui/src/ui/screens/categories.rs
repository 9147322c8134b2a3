use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{AppState, CategoriesState, CategoryField, ListMode},
    ui::{components::form::input_line, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let categories = &state.categories;
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_header(frame, layout[0], categories, theme);
    match categories.mode {
        ListMode::List => render_list(frame, layout[1], categories, theme),
        ListMode::Form => render_form(frame, layout[1], categories, theme),
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, categories: &CategoriesState, theme: &Theme) {
    let mut line = vec![
        Span::styled("Registered", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}", categories.items.len())),
    ];
    if let Some(err) = &categories.error {
        line.push(Span::raw("   "));
        line.push(Span::styled(err.clone(), Style::default().fg(theme.error)));
    }

    let block = Block::default().borders(Borders::ALL).title("Categories");
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, categories: &CategoriesState, theme: &Theme) {
    if categories.loading {
        frame.render_widget(Paragraph::new("Loading categories..."), area);
        return;
    }
    if categories.items.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No categories registered.",
                Style::default().fg(theme.dim),
            )),
            area,
        );
        return;
    }

    let items = categories
        .items
        .iter()
        .map(|category| {
            let text = format!(
                "{:>4}  {:<40} {:<8}",
                category.id,
                category.description,
                category.purpose.label()
            );
            ListItem::new(Line::from(text))
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(categories.selected));

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_form(frame: &mut Frame<'_>, area: Rect, categories: &CategoriesState, theme: &Theme) {
    let title = if categories.editing_id.is_some() {
        "Edit category"
    } else {
        "New category"
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .margin(1)
        .split(inner);

    let form = &categories.form;
    frame.render_widget(
        Paragraph::new(input_line(
            "Description",
            &form.description,
            form.focus == CategoryField::Description,
            theme,
        )),
        rows[0],
    );

    // Purpose is a pick, not a text field; ↑/↓ cycles it while focused.
    let purpose_focused = form.focus == CategoryField::Purpose;
    let purpose_style = if purpose_focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };
    let mut purpose = vec![
        Span::styled(format!("{:<12}", "Purpose"), Style::default().fg(theme.dim)),
        Span::styled(form.purpose.label().to_string(), purpose_style),
    ];
    if purpose_focused {
        purpose.push(Span::styled("  ↑/↓", Style::default().fg(theme.dim)));
    }
    frame.render_widget(Paragraph::new(Line::from(purpose)), rows[1]);
}
