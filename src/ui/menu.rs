use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::collision::DeathReason;
use crate::config::Theme;
use crate::records::LevelRecords;

/// Draws the "how to start" guide shown before the first game.
pub fn render_play_guide(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let popup = centered_popup(area, 80, 50);
    frame.render_widget(Clear, popup);

    let [title_row, body_row] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(3)]).areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.title)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    frame.render_widget(
        Paragraph::new(guide_lines(true))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.text))
            .block(Block::bordered().title(" start ")),
        body_row,
    );
}

/// Draws the game-over popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    reason: Option<DeathReason>,
    theme: &Theme,
) {
    let popup = centered_popup(area, 80, 60);
    frame.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from("Game over!"),
        Line::from(death_cause(reason)),
        Line::from(""),
    ];
    lines.extend(guide_lines(true));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.text))
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

/// Draws the per-level records table.
pub fn render_records_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    records: &LevelRecords,
    theme: &Theme,
) {
    let popup = centered_popup(area, 80, 70);
    frame.render_widget(Clear, popup);

    let mut lines: Vec<Line<'_>> = records
        .iter()
        .map(|(level, record)| Line::from(format!("Level {} record: {record}", level.number())))
        .collect();
    lines.push(Line::from(""));
    lines.extend(guide_lines(false));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.text))
            .block(Block::bordered().title(" records ")),
        popup,
    );
}

fn death_cause(reason: Option<DeathReason>) -> &'static str {
    match reason {
        Some(DeathReason::WallCollision) => "Cause: hit wall",
        Some(DeathReason::ObstacleCollision) => "Cause: hit obstacle",
        Some(DeathReason::SelfCollision) => "Cause: hit yourself",
        None => "Cause: no room left for food",
    }
}

fn guide_lines(offer_records: bool) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from("Press key '1'-'5' to start the"),
        Line::from("corresponding level"),
    ];

    if offer_records {
        lines.push(Line::from("OR"));
        lines.push(Line::from("Press key 's' to show level records"));
    }

    lines.push(Line::from(""));
    lines.push(Line::from("[Q]/[Esc] Quit"));
    lines
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
