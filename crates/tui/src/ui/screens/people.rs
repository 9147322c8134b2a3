use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{AppState, ListMode, PeopleState, PersonField},
    ui::{components::form::input_line, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let people = &state.people;
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_header(frame, layout[0], people, theme);
    match people.mode {
        ListMode::List => render_list(frame, layout[1], people, theme),
        ListMode::Form => render_form(frame, layout[1], people, theme),
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, people: &PeopleState, theme: &Theme) {
    let mut line = vec![
        Span::styled("Registered", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}", people.items.len())),
    ];
    if let Some(err) = &people.error {
        line.push(Span::raw("   "));
        line.push(Span::styled(err.clone(), Style::default().fg(theme.error)));
    }

    let block = Block::default().borders(Borders::ALL).title("People");
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, people: &PeopleState, theme: &Theme) {
    if people.loading {
        frame.render_widget(Paragraph::new("Loading people..."), area);
        return;
    }
    if people.items.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No people registered.",
                Style::default().fg(theme.dim),
            )),
            area,
        );
        return;
    }

    let items = people
        .items
        .iter()
        .map(|person| {
            let text = format!("{:>4}  {:<32} {:>3}", person.id, person.name, person.age);
            ListItem::new(Line::from(text))
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(people.selected));

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

fn render_form(frame: &mut Frame<'_>, area: Rect, people: &PeopleState, theme: &Theme) {
    let title = if people.editing_id.is_some() {
        "Edit person"
    } else {
        "New person"
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .margin(1)
        .split(inner);

    let form = &people.form;
    frame.render_widget(
        Paragraph::new(input_line(
            "Name",
            &form.name,
            form.focus == PersonField::Name,
            theme,
        )),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(input_line(
            "Age",
            &form.age,
            form.focus == PersonField::Age,
            theme,
        )),
        rows[1],
    );
}
