use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::{
    app::ReportState,
    ui::{
        components::money::{format_brl, styled_balance},
        theme::Theme,
    },
};

pub fn render(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &'static str,
    report: &ReportState,
    theme: &Theme,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Rows
            Constraint::Length(3), // Grand totals
        ])
        .split(area);

    render_header(frame, layout[0], title, report, theme);
    render_rows(frame, layout[1], report, theme);
    render_totals(frame, layout[2], report, theme);
}

fn render_header(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &'static str,
    report: &ReportState,
    theme: &Theme,
) {
    let mut line = vec![
        Span::styled("Rows", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}", report.report.rows.len())),
    ];
    if let Some(err) = &report.error {
        line.push(Span::raw("   "));
        line.push(Span::styled(err.clone(), Style::default().fg(theme.error)));
    }

    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn render_rows(frame: &mut Frame<'_>, area: Rect, report: &ReportState, theme: &Theme) {
    if report.loading {
        frame.render_widget(Paragraph::new("Loading report..."), area);
        return;
    }
    if report.report.rows.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Nothing to report yet.",
                Style::default().fg(theme.dim),
            )),
            area,
        );
        return;
    }

    let items = report
        .report
        .rows
        .iter()
        .map(|row| {
            let line = Line::from(vec![
                Span::raw(format!("{:<32}", row.label)),
                Span::styled(
                    format!("{:>14}", format_brl(row.total_income)),
                    Style::default().fg(theme.positive),
                ),
                Span::styled(
                    format!("{:>14}", format_brl(row.total_expense)),
                    Style::default().fg(theme.negative),
                ),
                Span::raw("  "),
                styled_balance(row.balance, theme),
            ]);
            ListItem::new(line)
        })
        .collect::<Vec<_>>();

    let list = List::new(items).block(Block::default().borders(Borders::ALL));
    frame.render_widget(list, area);
}

fn render_totals(frame: &mut Frame<'_>, area: Rect, report: &ReportState, theme: &Theme) {
    let totals = &report.report.totals;
    let line = Line::from(vec![
        Span::styled("Income", Style::default().fg(theme.dim)),
        Span::styled(
            format!(" {}   ", format_brl(totals.total_income)),
            Style::default().fg(theme.positive),
        ),
        Span::styled("Expense", Style::default().fg(theme.dim)),
        Span::styled(
            format!(" {}   ", format_brl(totals.total_expense)),
            Style::default().fg(theme.negative),
        ),
        Span::styled("Net balance", Style::default().fg(theme.dim)),
        Span::raw(" "),
        styled_balance(totals.net_balance, theme).patch_style(Style::default().add_modifier(Modifier::BOLD)),
    ]);

    let block = Block::default().borders(Borders::ALL).title("Grand totals");
    frame.render_widget(Paragraph::new(line).block(block), area);
}
