/*!
(The internal representation of) an atom (aka. a 'variable').

Broadly, atoms are things with a name to which assigning a (boolean) value (true or false) is of interest.
- 'Internal' atoms are used internal to a context.
- 'External' atoms are names used during interaction with a context, e.g. `p` in a clause read from a string, or `12` in a DIMACS file.

Each internal atom is a u32 *u* such that either:
- *u* is 0, or:
- *u - 1* is an atom.

That is, the atoms of a context are [0..*m*) for some *m*, and atoms may be used as indices.

The atom `0` is fixed internally with a value of true, and so literals of atom `0` stand for the constants true and false.
This is convenient when [encoding](crate::encode) formulas, as constants need no special treatment in a clause.
*/

/// An atom, aka. a 'variable'.
pub type Atom = u32;

/// The atom fixed with a value of true.
pub const TOP_ATOM: Atom = 0;

/// The maximum instance of an atom.
pub const ATOM_MAX: Atom = i32::MAX.unsigned_abs();
