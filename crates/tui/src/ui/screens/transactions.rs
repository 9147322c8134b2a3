use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use engine::eligible_categories;

use crate::{
    app::{AppState, TransactionField},
    ui::{
        components::{form::input_line, money::format_brl},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(0)])
        .split(area);

    render_form(frame, layout[0], state, theme);
    render_list(frame, layout[1], state, theme);
}

fn render_form(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let transactions = &state.transactions;
    let form = &transactions.form;

    let block = Block::default().borders(Borders::ALL).title("New transaction");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Description
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Kind
            Constraint::Length(1), // Category
            Constraint::Length(1), // Person
            Constraint::Length(1), // Error line
        ])
        .margin(1)
        .split(inner);

    frame.render_widget(
        Paragraph::new(input_line(
            "Description",
            &form.description,
            form.focus == TransactionField::Description,
            theme,
        )),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(input_line(
            "Amount",
            &form.amount,
            form.focus == TransactionField::Amount,
            theme,
        )),
        rows[1],
    );

    frame.render_widget(
        Paragraph::new(pick_line(
            "Kind",
            form.kind.label(),
            form.focus == TransactionField::Kind,
            theme,
        )),
        rows[2],
    );

    let category_label = form
        .category_id
        .and_then(|id| {
            state
                .categories
                .items
                .iter()
                .find(|category| category.id == id)
        })
        .map(|category| category.description.clone())
        .unwrap_or_else(|| "select category".to_string());
    frame.render_widget(
        Paragraph::new(pick_line(
            "Category",
            &category_label,
            form.focus == TransactionField::Category,
            theme,
        )),
        rows[3],
    );

    let person_label = form
        .person_id
        .and_then(|id| state.people.items.iter().find(|person| person.id == id))
        .map(|person| {
            if person.income_blocked() {
                format!("{} (minor)", person.name)
            } else {
                person.name.clone()
            }
        })
        .unwrap_or_else(|| "select person".to_string());
    frame.render_widget(
        Paragraph::new(pick_line(
            "Person",
            &person_label,
            form.focus == TransactionField::Person,
            theme,
        )),
        rows[4],
    );

    if let Some(err) = &transactions.error {
        frame.render_widget(
            Paragraph::new(Span::styled(err.clone(), Style::default().fg(theme.error))),
            rows[5],
        );
    } else {
        let eligible = eligible_categories(form.kind, &state.categories.items).len();
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("{eligible} categories eligible for {}", form.kind.label()),
                Style::default().fg(theme.dim),
            )),
            rows[5],
        );
    }
}

fn pick_line(label: &str, value: &str, focused: bool, theme: &Theme) -> Line<'static> {
    let style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };
    let mut parts = vec![
        Span::styled(format!("{label:<12}"), Style::default().fg(theme.dim)),
        Span::styled(value.to_string(), style),
    ];
    if focused {
        parts.push(Span::styled("  ↑/↓", Style::default().fg(theme.dim)));
    }
    Line::from(parts)
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let transactions = &state.transactions;
    if transactions.loading {
        frame.render_widget(Paragraph::new("Loading transactions..."), area);
        return;
    }
    if transactions.items.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No transactions registered.",
                Style::default().fg(theme.dim),
            ))
            .block(Block::default().borders(Borders::ALL)),
            area,
        );
        return;
    }

    let items = transactions
        .items
        .iter()
        .map(|tx| {
            let category = state
                .categories
                .items
                .iter()
                .find(|category| category.id == tx.category_id)
                .map(|category| category.description.clone())
                .unwrap_or_else(|| format!("#{}", tx.category_id));
            let person = state
                .people
                .items
                .iter()
                .find(|person| person.id == tx.person_id)
                .map(|person| person.name.clone())
                .unwrap_or_else(|| format!("#{}", tx.person_id));

            let text = format!(
                "{:>4}  {:<28} {:>14}  {:<8} {:<20} {:<20}",
                tx.id,
                tx.description,
                format_brl(tx.amount),
                tx.kind.label(),
                category,
                person,
            );
            ListItem::new(Line::from(text))
        })
        .collect::<Vec<_>>();

    let list = List::new(items).block(Block::default().borders(Borders::ALL));
    frame.render_widget(list, area);
}
