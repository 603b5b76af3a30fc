use rand::Rng;

use crate::config::GridSize;
use crate::snake::Position;

/// Static blocked cells of one session.
///
/// Cells may repeat: initial placement does not check obstacles against each
/// other.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ObstacleSet {
    cells: Vec<Position>,
}

impl ObstacleSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scatters `count` obstacles over the board, leaving column 0 free so the
    /// snake's spawn column stays open.
    #[must_use]
    pub fn scatter<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, count: usize) -> Self {
        let max_x = i32::from(bounds.width) - 1;
        let max_y = i32::from(bounds.height) - 1;

        let cells = (0..count)
            .map(|_| Position {
                x: rng.gen_range(1..=max_x),
                y: rng.gen_range(0..=max_y),
            })
            .collect();

        Self { cells }
    }

    /// Appends one obstacle cell.
    pub fn push(&mut self, position: Position) {
        self.cells.push(position);
    }

    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.cells.contains(&position)
    }

    /// Number of placed obstacles, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.cells.iter()
    }
}

impl FromIterator<Position> for ObstacleSet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::ObstacleSet;
    use crate::config::GridSize;
    use crate::snake::Position;

    #[test]
    fn scatter_places_requested_count_inside_board_away_from_column_zero() {
        let mut rng = StdRng::seed_from_u64(11);
        let bounds = GridSize {
            width: 6,
            height: 5,
        };

        let obstacles = ObstacleSet::scatter(&mut rng, bounds, 40);

        assert_eq!(obstacles.len(), 40);
        for cell in obstacles.iter() {
            assert!(cell.is_within_bounds(bounds));
            assert!(cell.x >= 1);
        }
    }

    #[test]
    fn scatter_with_zero_count_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let obstacles = ObstacleSet::scatter(
            &mut rng,
            GridSize {
                width: 10,
                height: 10,
            },
            0,
        );

        assert!(obstacles.is_empty());
    }

    #[test]
    fn duplicates_are_kept() {
        let cell = Position { x: 2, y: 2 };
        let obstacles: ObstacleSet = [cell, cell].into_iter().collect();

        assert_eq!(obstacles.len(), 2);
        assert!(obstacles.contains(cell));
    }
}
