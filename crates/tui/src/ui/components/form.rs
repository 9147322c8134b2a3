use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::ui::theme::Theme;

/// One labeled form row; the focused field shows a cursor bar after its
/// value.
#[must_use]
pub fn input_line(label: &str, value: &str, focused: bool, theme: &Theme) -> Line<'static> {
    let cursor = if focused { "│" } else { "" };
    let style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };

    Line::from(vec![
        Span::styled(format!("{label:<12}"), Style::default().fg(theme.dim)),
        Span::styled(format!("{value}{cursor}"), style),
    ])
}
