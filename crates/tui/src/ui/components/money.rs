use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// Formats an amount the way the store displays it: `R$ 1234,56`.
#[must_use]
pub fn format_brl(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs()).replace('.', ",");
    if amount < 0.0 {
        format!("-R$ {formatted}")
    } else {
        format!("R$ {formatted}")
    }
}

/// Creates a styled span for a balance-like amount with semantic coloring:
/// positive green, negative red, zero neutral.
#[must_use]
pub fn styled_balance(amount: f64, theme: &Theme) -> Span<'static> {
    let color = if amount > 0.0 {
        theme.positive
    } else if amount < 0.0 {
        theme.negative
    } else {
        theme.text
    };
    Span::styled(format_brl(amount), Style::default().fg(color))
}
