use crate::config::LEVEL_COUNT;
use crate::level::Level;

/// Best score reached on each level during this process.
///
/// Records only ever go up. Nothing is written to disk.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct LevelRecords {
    best: [u32; LEVEL_COUNT],
}

impl LevelRecords {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, level: Level) -> u32 {
        self.best[level.index()]
    }

    /// Raises the record for `level` when `score` beats it.
    ///
    /// Returns true when a new record was set.
    pub fn submit(&mut self, level: Level, score: u32) -> bool {
        let best = &mut self.best[level.index()];
        if score > *best {
            *best = score;
            true
        } else {
            false
        }
    }

    /// Iterates over `(level, record)` pairs in level order.
    pub fn iter(&self) -> impl Iterator<Item = (Level, u32)> + '_ {
        Level::ALL.into_iter().map(|level| (level, self.get(level)))
    }
}

#[cfg(test)]
mod tests {
    use super::LevelRecords;
    use crate::level::Level;

    #[test]
    fn records_start_at_zero() {
        let records = LevelRecords::new();
        assert!(records.iter().all(|(_, record)| record == 0));
    }

    #[test]
    fn records_never_decrease() {
        let mut records = LevelRecords::new();

        assert!(records.submit(Level::Two, 4));
        assert!(!records.submit(Level::Two, 3));
        assert!(!records.submit(Level::Two, 4));
        assert!(records.submit(Level::Two, 5));

        assert_eq!(records.get(Level::Two), 5);
        assert_eq!(records.get(Level::One), 0);
    }

    #[test]
    fn iteration_covers_every_level_in_order() {
        let mut records = LevelRecords::new();
        records.submit(Level::Five, 9);

        let listed: Vec<_> = records.iter().collect();

        assert_eq!(listed.len(), 5);
        assert_eq!(listed[0], (Level::One, 0));
        assert_eq!(listed[4], (Level::Five, 9));
    }
}
