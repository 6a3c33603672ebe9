/*!
The trail of literals valued during a solve, in order, split into levels.

Level zero contains literals valued without any decision.
Each decision opens a fresh level, beginning with the decision itself.

The trail also records how far [BCP](crate::procedures::bcp) has progressed, as every literal before the mark has had its consequences examined.
*/

use crate::{db::LevelIndex, structures::literal::CLiteral};

#[derive(Default)]
pub struct Trail {
    /// The valued literals, in order.
    pub literals: Vec<CLiteral>,

    /// The index of the first literal of each level above zero.
    pub level_starts: Vec<usize>,

    /// The index of the first literal which has not been propagated.
    pub propagated: usize,
}

impl Trail {
    /// The current level.
    pub fn level(&self) -> LevelIndex {
        self.level_starts.len() as LevelIndex
    }

    /// Opens a fresh level.
    pub fn open_level(&mut self) {
        self.level_starts.push(self.literals.len());
    }

    /// Pushes `literal` on the current level.
    pub fn push(&mut self, literal: CLiteral) {
        self.literals.push(literal);
    }

    /// The next literal to propagate, if any, advancing the mark.
    pub fn next_to_propagate(&mut self) -> Option<CLiteral> {
        let literal = self.literals.get(self.propagated).copied()?;
        self.propagated += 1;
        Some(literal)
    }

    /// Removes and returns all literals above `level`, closing the levels.
    pub fn truncate_to(&mut self, level: LevelIndex) -> Vec<CLiteral> {
        let level = level as usize;
        if level >= self.level_starts.len() {
            return Vec::default();
        }
        let start = self.level_starts[level];
        self.level_starts.truncate(level);
        let removed = self.literals.split_off(start);
        self.propagated = self.propagated.min(self.literals.len());
        removed
    }

    /// The decisions made, in order.
    pub fn decisions(&self) -> impl Iterator<Item = CLiteral> + '_ {
        self.level_starts.iter().map(|start| self.literals[*start])
    }
}
