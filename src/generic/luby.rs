/*!
An iterator to generate the luby sequence, used to schedule restarts.

See <https://oeis.org/A182105> for details on the luby sequence.

The implementation tracks a counter and the most recent element, and doubles the element until the element matches the lowest set bit of the counter.
*/

/// Representation used for numbers in a luby sequence.
pub type LubyRepresentation = u32;

/// Foundation of the iterator.
pub struct Luby {
    counter: LubyRepresentation,
    element: LubyRepresentation,
}

// The default iterator sits on the first element of the sequence.
impl Default for Luby {
    fn default() -> Self {
        let mut luby = Luby::fresh();
        luby.next();
        luby
    }
}

impl Iterator for Luby {
    type Item = LubyRepresentation;

    fn next(&mut self) -> Option<Self::Item> {
        if self.counter & self.counter.wrapping_neg() == self.element {
            self.counter = self.counter.checked_add(1)?;
            self.element = 1;
        } else {
            self.element = self.element.checked_add(self.element)?;
        }

        Some(self.element)
    }
}

impl Luby {
    /// An iterator positioned before the first element of the sequence.
    pub fn fresh() -> Self {
        Luby {
            counter: 0,
            element: 0,
        }
    }

    /// The current element of the sequence.
    pub fn current(&self) -> LubyRepresentation {
        self.element
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // https://oeis.org/A182105
    const LUBY_SLICE: &[LubyRepresentation] = &[
        1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8,
        16, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4,
        8, 16, 32,
    ];

    #[test]
    fn luby() {
        let mut l = Luby::fresh();
        for known_value in LUBY_SLICE {
            assert_eq!(l.next(), Some(*known_value));
            assert_eq!(l.current(), *known_value);
        }
    }

    #[test]
    fn default_is_first() {
        assert_eq!(Luby::default().current(), 1);
    }
}
