use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::Theme;
use crate::renderer::StatusLine;

/// Draws the one-line status bar above the board.
pub fn render_status_line(frame: &mut Frame<'_>, area: Rect, status: StatusLine, theme: &Theme) {
    let text = fit_to_width(&status_text(status), usize::from(area.width));

    frame.render_widget(
        Paragraph::new(Line::from(text))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
        area,
    );
}

#[must_use]
pub fn status_text(status: StatusLine) -> String {
    match status {
        StatusLine::Blank => String::new(),
        StatusLine::Score {
            level,
            record,
            score,
        } => format!(
            "Max level {} score: {record},  Score: {score}",
            level.number()
        ),
        StatusLine::RecordsTitle => "Level Records".to_owned(),
    }
}

/// Truncates `text` so it occupies at most `width` terminal columns.
#[must_use]
pub fn fit_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_owned();
    }

    let mut used = 0;
    text.chars()
        .take_while(|ch| {
            used += ch.width().unwrap_or(0);
            used <= width
        })
        .collect()
}
