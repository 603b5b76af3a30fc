use std::collections::BTreeMap;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::collision::DeathReason;
use crate::config::{CELL_COLUMNS, GLYPH_FOOD, GLYPH_OBSTACLE, GLYPH_SNAKE, GridSize, Theme};
use crate::food::FoodCategory;
use crate::level::Level;
use crate::records::LevelRecords;
use crate::snake::Position;
use crate::ui::hud::render_status_line;
use crate::ui::menu::{render_game_over_menu, render_play_guide, render_records_menu};

/// Opaque handle to a drawn snake segment.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SegmentHandle(u64);

/// Drawing surface the game core reports its mutations to.
///
/// The core never reads anything back except the handles returned by
/// [`Renderer::draw_snake_segment`].
pub trait Renderer {
    fn draw_snake_segment(&mut self, position: Position) -> SegmentHandle;
    fn remove_snake_segment(&mut self, handle: SegmentHandle);
    fn draw_food(&mut self, position: Position, category: FoodCategory);
    fn remove_food(&mut self);
    fn draw_obstacle(&mut self, position: Position);
    /// Removes every entity and any message overlay.
    fn clear_all(&mut self);
    /// `reason` is `None` when the session ended without a collision.
    fn show_game_over_message(&mut self, reason: Option<DeathReason>);
    fn show_records_table(&mut self, records: &LevelRecords);
    fn update_status_line(&mut self, level: Level, record: u32, score: u32);
}

/// Popup drawn above the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Overlay {
    PlayGuide,
    GameOver(Option<DeathReason>),
    Records(LevelRecords),
}

/// Text of the line above the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StatusLine {
    Blank,
    Score { level: Level, record: u32, score: u32 },
    RecordsTitle,
}

/// Retained picture of everything the core asked to draw.
///
/// [`render`] turns it into a ratatui frame; tests inspect it directly.
#[derive(Debug, Clone)]
pub struct Scene {
    segments: BTreeMap<SegmentHandle, Position>,
    next_handle: u64,
    food: Option<(Position, FoodCategory)>,
    obstacles: Vec<Position>,
    overlay: Option<Overlay>,
    status_line: StatusLine,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates an empty board showing the play guide.
    #[must_use]
    pub fn new() -> Self {
        Self {
            segments: BTreeMap::new(),
            next_handle: 0,
            food: None,
            obstacles: Vec::new(),
            overlay: Some(Overlay::PlayGuide),
            status_line: StatusLine::Blank,
        }
    }

    /// Drawn snake cells, oldest drawing first.
    pub fn snake_cells(&self) -> impl Iterator<Item = &Position> {
        self.segments.values()
    }

    #[must_use]
    pub fn snake_cell_count(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn food(&self) -> Option<(Position, FoodCategory)> {
        self.food
    }

    #[must_use]
    pub fn obstacles(&self) -> &[Position] {
        &self.obstacles
    }

    #[must_use]
    pub fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }

    #[must_use]
    pub fn status_line(&self) -> StatusLine {
        self.status_line
    }
}

impl Renderer for Scene {
    fn draw_snake_segment(&mut self, position: Position) -> SegmentHandle {
        let handle = SegmentHandle(self.next_handle);
        self.next_handle += 1;
        self.segments.insert(handle, position);
        handle
    }

    fn remove_snake_segment(&mut self, handle: SegmentHandle) {
        self.segments.remove(&handle);
    }

    fn draw_food(&mut self, position: Position, category: FoodCategory) {
        self.food = Some((position, category));
    }

    fn remove_food(&mut self) {
        self.food = None;
    }

    fn draw_obstacle(&mut self, position: Position) {
        self.obstacles.push(position);
    }

    fn clear_all(&mut self) {
        self.segments.clear();
        self.food = None;
        self.obstacles.clear();
        self.overlay = None;
    }

    fn show_game_over_message(&mut self, reason: Option<DeathReason>) {
        self.overlay = Some(Overlay::GameOver(reason));
    }

    fn show_records_table(&mut self, records: &LevelRecords) {
        self.overlay = Some(Overlay::Records(*records));
        self.status_line = StatusLine::RecordsTitle;
    }

    fn update_status_line(&mut self, level: Level, record: u32, score: u32) {
        self.status_line = StatusLine::Score {
            level,
            record,
            score,
        };
    }
}

/// Renders the full game frame from the retained scene.
pub fn render(frame: &mut Frame<'_>, scene: &Scene, bounds: GridSize, theme: &Theme) {
    let [status_area, play_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(frame.area());

    render_status_line(frame, status_area, scene.status_line(), theme);

    let board_area = board_rect(play_area, bounds);
    let block = Block::bordered()
        .border_style(Style::new().fg(theme.border_fg))
        .style(Style::new().bg(theme.play_bg));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    for obstacle in scene.obstacles() {
        draw_cell(frame, inner, bounds, *obstacle, GLYPH_OBSTACLE, Style::new().fg(theme.obstacle));
    }

    if let Some((position, category)) = scene.food() {
        let style = Style::new()
            .fg(food_color(category, theme))
            .add_modifier(Modifier::BOLD);
        draw_cell(frame, inner, bounds, position, GLYPH_FOOD, style);
    }

    for segment in scene.snake_cells() {
        draw_cell(frame, inner, bounds, *segment, GLYPH_SNAKE, Style::new().fg(theme.snake));
    }

    match scene.overlay() {
        Some(Overlay::PlayGuide) => render_play_guide(frame, board_area, theme),
        Some(Overlay::GameOver(reason)) => render_game_over_menu(frame, board_area, reason, theme),
        Some(Overlay::Records(records)) => render_records_menu(frame, board_area, &records, theme),
        None => {}
    }
}

fn food_color(category: FoodCategory, theme: &Theme) -> ratatui::style::Color {
    match category {
        FoodCategory::Neutral => theme.food_neutral,
        FoodCategory::Slow => theme.food_slow,
        FoodCategory::Fast => theme.food_fast,
        FoodCategory::VerySlow => theme.food_very_slow,
        FoodCategory::VeryFast => theme.food_very_fast,
    }
}

/// Centers a bordered board of `bounds` cells inside `area`.
fn board_rect(area: Rect, bounds: GridSize) -> Rect {
    let width = bounds
        .width
        .saturating_mul(CELL_COLUMNS)
        .saturating_add(2)
        .min(area.width);
    let height = bounds.height.saturating_add(2).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_cell(
    frame: &mut Frame<'_>,
    inner: Rect,
    bounds: GridSize,
    position: Position,
    glyph: &str,
    style: Style,
) {
    let Some((x, y)) = logical_to_terminal(inner, bounds, position) else {
        return;
    };

    frame.buffer_mut().set_string(x, y, glyph, style);
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::{Overlay, Renderer, Scene, StatusLine, logical_to_terminal};
    use crate::config::GridSize;
    use crate::food::FoodCategory;
    use crate::level::Level;
    use crate::records::LevelRecords;
    use crate::snake::Position;

    const BOUNDS: GridSize = GridSize {
        width: 4,
        height: 3,
    };

    #[test]
    fn new_scene_shows_play_guide() {
        let scene = Scene::new();
        assert_eq!(scene.overlay(), Some(Overlay::PlayGuide));
        assert_eq!(scene.status_line(), StatusLine::Blank);
    }

    #[test]
    fn segment_handles_remove_only_their_own_cell() {
        let mut scene = Scene::new();
        let first = scene.draw_snake_segment(Position::ORIGIN);
        let _second = scene.draw_snake_segment(Position::ORIGIN);

        scene.remove_snake_segment(first);

        assert_eq!(scene.snake_cell_count(), 1);
    }

    #[test]
    fn clear_all_wipes_entities_and_overlay_but_keeps_status() {
        let mut scene = Scene::new();
        scene.draw_snake_segment(Position::ORIGIN);
        scene.draw_obstacle(Position { x: 1, y: 1 });
        scene.draw_food(Position { x: 2, y: 2 }, FoodCategory::Fast);
        scene.update_status_line(Level::Two, 3, 1);

        scene.clear_all();

        assert_eq!(scene.snake_cell_count(), 0);
        assert!(scene.obstacles().is_empty());
        assert!(scene.food().is_none());
        assert!(scene.overlay().is_none());
        assert_eq!(
            scene.status_line(),
            StatusLine::Score {
                level: Level::Two,
                record: 3,
                score: 1
            }
        );
    }

    #[test]
    fn records_table_sets_overlay_and_title() {
        let mut scene = Scene::new();
        let mut records = LevelRecords::new();
        records.submit(Level::One, 2);

        scene.show_records_table(&records);

        assert_eq!(scene.overlay(), Some(Overlay::Records(records)));
        assert_eq!(scene.status_line(), StatusLine::RecordsTitle);
    }

    #[test]
    fn cells_map_to_two_terminal_columns() {
        let inner = Rect::new(1, 1, 8, 3);

        assert_eq!(logical_to_terminal(inner, BOUNDS, Position { x: 0, y: 0 }), Some((1, 1)));
        assert_eq!(logical_to_terminal(inner, BOUNDS, Position { x: 3, y: 2 }), Some((7, 3)));
        assert_eq!(logical_to_terminal(inner, BOUNDS, Position { x: 4, y: 0 }), None);
        assert_eq!(logical_to_terminal(inner, BOUNDS, Position { x: -1, y: 0 }), None);
    }
}
