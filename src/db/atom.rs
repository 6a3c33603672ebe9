/*!
A database of 'atom related' things, accessed via fields on an [AtomDB] struct.

Things include:
- A current (often partial) [valuation](crate::structures::valuation) and the previous value of each atom (for phase saving).
- The level at which each atom was valued, and the clause (if any) from which the value was propagated.
- An [IndexHeap] recording the activity of atoms, where any atom without a value is 'active' on the heap.
- Internal and external name maps, for reading and writing atoms.
*/

use std::collections::HashMap;

use crate::{
    config::{Activity, Config},
    db::{ClauseKey, LevelIndex},
    generic::index_heap::IndexHeap,
    misc::log::targets::{self},
    structures::{
        atom::{Atom, ATOM_MAX, TOP_ATOM},
        literal::{CLiteral, Literal},
        valuation::CValuation,
    },
    types::err::AtomDBError,
};

/// The atom database.
pub struct AtomDB {
    /// A current (often partial) valuation.
    valuation: CValuation,

    /// The previous value of each atom (or some randomised value).
    previous_valuation: Vec<bool>,

    /// The level at which each atom was valued, if valued.
    levels: Vec<Option<LevelIndex>>,

    /// The clause from which the value of each atom was propagated, if any.
    reasons: Vec<Option<ClauseKey>>,

    /// The activity of each atom, with atoms without a value active on the heap.
    activity_heap: IndexHeap<Activity>,

    /// The amount to bump the activity of an atom by, inflated after each conflict.
    bump: Activity,

    /// The factor by which activity decays.
    decay: Activity,

    /// External names, indexed by atom.
    external: Vec<Option<String>>,

    /// Atoms, indexed by external name.
    internal: HashMap<String, Atom>,
}

impl AtomDB {
    /// A new [AtomDB] with local configuration options derived from `config`.
    ///
    /// The database always contains the top atom, valued true.
    pub fn new(config: &Config) -> Self {
        let mut db = AtomDB {
            valuation: Vec::default(),
            previous_valuation: Vec::default(),
            levels: Vec::default(),
            reasons: Vec::default(),
            activity_heap: IndexHeap::default(),
            bump: config.atom_bump.value,
            decay: config.atom_decay.value,
            external: Vec::default(),
            internal: HashMap::default(),
        };
        let the_top = db.fresh_atom(true);
        debug_assert_eq!(the_top, Ok(TOP_ATOM));
        db.set_value(CLiteral::TOP, 0, None);
        db
    }

    /// A count of atoms in the [AtomDB].
    pub fn count(&self) -> usize {
        self.valuation.len()
    }

    /// The current valuation.
    pub fn valuation(&self) -> &CValuation {
        &self.valuation
    }

    /// A fresh atom, with a note of the previous value to use if phase saving.
    pub fn fresh_atom(&mut self, previous_value: bool) -> Result<Atom, AtomDBError> {
        let atom = match Atom::try_from(self.valuation.len()) {
            Ok(atom) if atom <= ATOM_MAX => atom,
            _ => return Err(AtomDBError::AtomsExhausted),
        };

        self.valuation.push(None);
        self.previous_valuation.push(previous_value);
        self.levels.push(None);
        self.reasons.push(None);
        self.external.push(None);
        self.activity_heap.add(atom as usize, 0.0);
        self.activity_heap.activate(atom as usize);

        Ok(atom)
    }

    /// The atom with the external name `name`, if one exists.
    pub fn atom_of(&self, name: &str) -> Option<Atom> {
        self.internal.get(name).copied()
    }

    /// The external name of `atom`, if one was given.
    pub fn name_of(&self, atom: Atom) -> Option<&str> {
        self.external.get(atom as usize).and_then(|name| name.as_deref())
    }

    /// Notes `name` as the external name of `atom`.
    pub fn name_atom(&mut self, atom: Atom, name: &str) {
        if let Some(slot) = self.external.get_mut(atom as usize) {
            *slot = Some(name.to_string());
            self.internal.insert(name.to_string(), atom);
        }
    }

    /// The value of `atom` on the current valuation.
    pub fn value_of(&self, atom: Atom) -> Option<bool> {
        self.valuation.get(atom as usize).copied().flatten()
    }

    /// The value of `literal` on the current valuation, i.e. the value of the atom of `literal` adjusted for polarity.
    pub fn literal_value(&self, literal: CLiteral) -> Option<bool> {
        self.value_of(literal.atom())
            .map(|value| value == literal.polarity())
    }

    /// The previous value of `atom`.
    pub fn previous_value_of(&self, atom: Atom) -> bool {
        self.previous_valuation[atom as usize]
    }

    /// The level at which `atom` was valued.
    pub fn level_of(&self, atom: Atom) -> Option<LevelIndex> {
        self.levels[atom as usize]
    }

    /// The clause from which the value of `atom` was propagated, if any.
    pub fn reason_of(&self, atom: Atom) -> Option<ClauseKey> {
        self.reasons[atom as usize]
    }

    /// Sets the atom of `literal` to the polarity of `literal`, noting the level and reason.
    ///
    /// The atom is removed from the activity heap lazily, when popped during a decision.
    pub fn set_value(&mut self, literal: CLiteral, level: LevelIndex, reason: Option<ClauseKey>) {
        let atom = literal.atom() as usize;
        log::trace!(target: targets::VALUATION, "Set {literal} at level {level}");
        self.valuation[atom] = Some(literal.polarity());
        self.levels[atom] = Some(level);
        self.reasons[atom] = reason;
    }

    /// Clears the value of `atom`, saving the value as the previous value and reactivating the atom on the heap.
    pub fn drop_value(&mut self, atom: Atom) {
        let index = atom as usize;
        if let Some(value) = self.valuation[index] {
            self.previous_valuation[index] = value;
        }
        self.valuation[index] = None;
        self.levels[index] = None;
        self.reasons[index] = None;
        self.activity_heap.activate(index);
    }

    /// Bumps the activity of `atom`, rescaling all activity if required.
    pub fn bump_activity(&mut self, atom: Atom) {
        /// The activity at which all activities are scaled down.
        const RESCALE_LIMIT: Activity = 1e100;

        let bump = self.bump;
        self.activity_heap
            .apply_to_index(atom as usize, |activity| activity + bump);

        if *self.activity_heap.value_at(atom as usize) > RESCALE_LIMIT {
            log::debug!(target: targets::VALUATION, "Rescaling atom activity");
            self.activity_heap
                .apply_to_all(|activity| activity * RESCALE_LIMIT.recip());
            self.bump *= RESCALE_LIMIT.recip();
        }
    }

    /// Decays the activity of all atoms, by inflating the bump applied to future atoms.
    pub fn decay_activity(&mut self) {
        self.bump *= self.decay.recip();
    }

    /// The activity of `atom`.
    pub fn activity_of(&self, atom: Atom) -> Activity {
        *self.activity_heap.value_at(atom as usize)
    }

    /// Pops the most active atom off the activity heap, whether or not the atom has a value.
    pub fn heap_pop_most_active(&mut self) -> Option<Atom> {
        self.activity_heap.pop_max().map(|index| index as Atom)
    }
}

impl AtomDB {
    /// A string of the valuation, as a sequence of literals using external names where available.
    pub fn valuation_string(&self) -> String {
        self.valuation
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(atom, value)| {
                value.map(|v| {
                    let name = match self.name_of(atom as Atom) {
                        Some(name) => name.to_string(),
                        None => atom.to_string(),
                    };
                    match v {
                        true => name,
                        false => format!("-{name}"),
                    }
                })
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
