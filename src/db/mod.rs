/*!
Databases for holding information relevant to a solve.

- [The atom database](crate::db::atom)
  + Details of atoms, such as the current valuation, the level and reason of each value, and activity.
- [The clause database](crate::db::clause)
  + Clauses of the formula, and clauses learnt during a solve, with watch lists.
- [The trail](crate::db::trail)
  + The order in which atoms were valued, split into levels.
*/

pub mod atom;
pub mod clause;
pub mod trail;

slotmap::new_key_type! {
    /// The key to a clause stored in the [clause database](crate::db::clause).
    pub struct ClauseKey;
}

/// The index of a level on the trail.
pub type LevelIndex = u32;
