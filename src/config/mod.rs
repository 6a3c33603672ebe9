/*!
Configuration of a context, and of the transformations and solvers built on a context.

All configuration is contained within a [Config] struct, and each configurable value is a [ConfigOption] which records the bounds within which the value may be set.

Configuration is in two parts:
- Options for the solve procedure of a [context](crate::context), e.g. decay of atom activity, restarts, and time limits.
- Options for the layers built on a context, e.g. the bound on clauses produced by distribution, or the size of finite domains tried when searching for a first-order model.
*/

mod config_option;
pub use config_option::ConfigOption;

use crate::generic::luby::LubyRepresentation;

/// Representation for the activity of atoms and clauses.
pub type Activity = f64;

/// Representation for the probability of choosing `true`.
pub type PolarityLean = f64;

/// Representation for the probability of making a random decision.
pub type RandomDecisionBias = f64;

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// The initial amount by which the activity of an atom is bumped.
    pub atom_bump: ConfigOption<Activity>,

    /// The factor by which atom activity decays, applied by inflating the bump after each conflict.
    pub atom_decay: ConfigOption<Activity>,

    /// The factor by which clause activity decays.
    pub clause_decay: ConfigOption<Activity>,

    /// The `u` value to multiply the luby sequence by when determining whether to perform a restart.
    pub luby_u: ConfigOption<LubyRepresentation>,

    /// The probability of assigning positive polarity to a atom when freely choosing a atom.
    pub polarity_lean: ConfigOption<PolarityLean>,

    /// The probability of choosing an atom at random, rather than by activity.
    pub random_decision_bias: ConfigOption<RandomDecisionBias>,

    /// Default to the last set value of a atom when choosing a value for the atom, otherwise decide with specified probability.
    pub phase_saving: ConfigOption<bool>,

    /// Before a solve, find atoms which occur with a unique polarity and decide these before any other atom.
    pub preprocessing: ConfigOption<bool>,

    /// Permit (scheduled) restarts.
    pub restart: ConfigOption<bool>,

    /// Permit learnt clauses to be forgotten at restarts.
    pub reduction: ConfigOption<bool>,

    /// The time limit for a solve, where zero is no limit.
    pub time_limit: ConfigOption<std::time::Duration>,

    /// The most clauses (or terms) distribution may produce when converting to a normal form.
    pub cnf_clause_limit: ConfigOption<usize>,

    /// The most atoms a formula may contain for truth-table minimisation, unless forced.
    pub simplify_atom_limit: ConfigOption<usize>,

    /// The largest universe tried for an uninterpreted sort when searching for a first-order model.
    pub domain_limit: ConfigOption<usize>,

    /// The width, in bits, of an integer symbol.
    pub int_width: ConfigOption<usize>,

    /// The most models returned by a model enumeration.
    pub model_limit: ConfigOption<usize>,
}

impl Default for Config {
    /// The default context is (roughly) configured to provide quick, deterministic, results on small formulas.
    fn default() -> Self {
        Config {
            atom_bump: ConfigOption {
                name: "atom_bump",
                min: Activity::MIN_POSITIVE,
                max: (2.0 as Activity).powi(256),
                value: 1.0,
            },

            atom_decay: ConfigOption {
                name: "atom_decay",
                min: 0.5,
                max: 1.0,
                value: 0.95,
            },

            clause_decay: ConfigOption {
                name: "clause_decay",
                min: 0.5,
                max: 1.0,
                value: 0.999,
            },

            luby_u: ConfigOption {
                name: "luby",
                min: 1,
                max: LubyRepresentation::MAX,
                value: 128,
            },

            polarity_lean: ConfigOption {
                name: "polarity_lean",
                min: 0.0,
                max: 1.0,
                value: 0.0,
            },

            random_decision_bias: ConfigOption {
                name: "random_decision_bias",
                min: 0.0,
                max: 1.0,
                value: 0.0,
            },

            phase_saving: ConfigOption {
                name: "phase_saving",
                min: false,
                max: true,
                value: true,
            },

            preprocessing: ConfigOption {
                name: "preprocessing",
                min: false,
                max: true,
                value: false,
            },

            restart: ConfigOption {
                name: "restart",
                min: false,
                max: true,
                value: true,
            },

            reduction: ConfigOption {
                name: "reduction",
                min: false,
                max: true,
                value: true,
            },

            time_limit: ConfigOption {
                name: "time_limit",
                min: std::time::Duration::from_secs(0),
                max: std::time::Duration::MAX,
                value: std::time::Duration::from_secs(0),
            },

            cnf_clause_limit: ConfigOption {
                name: "cnf_limit",
                min: 1,
                max: usize::MAX,
                value: 4096,
            },

            simplify_atom_limit: ConfigOption {
                name: "simplify_limit",
                min: 0,
                max: 16,
                value: 8,
            },

            domain_limit: ConfigOption {
                name: "domain_limit",
                min: 1,
                max: 32,
                value: 4,
            },

            int_width: ConfigOption {
                name: "int_width",
                min: 2,
                max: 32,
                value: 16,
            },

            model_limit: ConfigOption {
                name: "model_limit",
                min: 1,
                max: usize::MAX,
                value: 256,
            },
        }
    }
}

impl Config {
    /// The time limit of a solve, if some limit is set.
    pub fn time_limit(&self) -> Option<std::time::Duration> {
        match self.time_limit.value.is_zero() {
            true => None,
            false => Some(self.time_limit.value),
        }
    }
}
