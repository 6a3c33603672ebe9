/*!
Targets for the [log] macros of the library.

Each part of the library logs to its own target, so logs may be filtered by part.
For example, with the cli, `RUST_LOG=ground=debug,transform=trace` shows the universes tried by first-order checks and the encoding of propositional formulas, and nothing of the SAT core.
*/

/// The target names.
pub mod targets {
    /// Logs related to [BCP](crate::procedures::bcp)
    pub const PROPAGATION: &str = "propagation";

    /// Logs related to [analysis](crate::procedures::analysis)
    pub const ANALYSIS: &str = "analysis";

    /// Logs related to clause deletion
    pub const REDUCTION: &str = "reduction";

    /// Logs related to the [clause database](crate::db::clause)
    pub const CLAUSE_DB: &str = "clause_db";

    /// Logs related to a valuation
    pub const VALUATION: &str = "valuation";

    /// Logs related to [backjumping](crate::procedures::backjump)
    pub const BACKJUMP: &str = "backjump";

    /// Logs related to preprocessing
    pub const PREPROCESSING: &str = "preprocessing";

    /// Logs related to [encoding](crate::encode) formulas as clauses
    pub const ENCODE: &str = "encode";

    /// Logs related to [grounding](crate::first_order::ground) first-order formulas
    pub const GROUND: &str = "ground";

    /// Logs related to [transformations](crate::propositional::transform) of propositional formulas
    pub const TRANSFORM: &str = "transform";
}
