use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{app::Section, ui::theme::Theme};

pub fn render_tabs(frame: &mut Frame<'_>, area: Rect, current: Section, theme: &Theme) {
    let mut parts: Vec<Span<'static>> = Vec::new();
    for (index, section) in Section::ALL.iter().enumerate() {
        let style = if *section == current {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim)
        };
        parts.push(Span::styled(
            format!("{} {}", index + 1, section.label()),
            style,
        ));
        parts.push(Span::raw("   "));
    }

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
