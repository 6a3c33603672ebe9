/*!
Two's complement bit vectors, as literals.

A [BitVector] is a little-endian sequence of literals, with the sign bit last.
Constants are bit vectors of [TOP](CLiteral::TOP) and [BOTTOM](CLiteral::BOTTOM) literals, and so arithmetic on constants folds to constants without any clause being added.

Arithmetic is exact, as the width of a result is wide enough for any result:
- A sum or difference is one bit wider than the widest argument.
- A product is as wide as the widths of the arguments combined.
- A negation is one bit wider than the argument.

So, comparisons are made on exact values, and there is no overflow to account for.

```rust
# use otter_logic::context::Context;
# use otter_logic::reports::Report;
let mut the_context = Context::default();
let x = the_context.bv_fresh(4).unwrap();
let nine = the_context.bv_const(9);
let zero = the_context.bv_const(0);

let square = the_context.bv_mul(&x, &x).unwrap();
let is_nine = the_context.bv_eq(&square, &nine).unwrap();
let is_positive = the_context.bv_lt(&zero, &x).unwrap();
assert!(the_context.assert_literal(is_nine).is_ok());
assert!(the_context.assert_literal(is_positive).is_ok());

assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
assert_eq!(the_context.bv_value(&x), 3);
```
*/

use crate::{
    context::GenericContext,
    structures::literal::{CLiteral, Literal},
    types::err::ErrorKind,
};

/// A little-endian two's complement bit vector, with the sign bit last.
pub type BitVector = Vec<CLiteral>;

/// The literal of a constant bit.
fn constant(bit: bool) -> CLiteral {
    match bit {
        true => CLiteral::TOP,
        false => CLiteral::BOTTOM,
    }
}

/// `bits` extended to `width` by copies of the sign bit.
///
/// If `bits` is at least `width` wide, `bits` is returned unchanged.
pub fn sign_extend(bits: &[CLiteral], width: usize) -> BitVector {
    let mut extended = bits.to_vec();
    let sign = bits.last().copied().unwrap_or(CLiteral::BOTTOM);
    while extended.len() < width {
        extended.push(sign);
    }
    extended
}

/// The least width of a bit vector able to represent `value`.
pub fn width_of(value: i64) -> usize {
    let magnitude = match value < 0 {
        true => !value,
        false => value,
    };
    (64 - magnitude.leading_zeros() as usize) + 1
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// The bit vector of the constant `value`, of least width.
    pub fn bv_const(&self, value: i64) -> BitVector {
        (0..width_of(value))
            .map(|index| constant((value >> index.min(63)) & 1 == 1))
            .collect()
    }

    /// A bit vector of `width` fresh atoms.
    pub fn bv_fresh(&mut self, width: usize) -> Result<BitVector, ErrorKind> {
        let mut bits = BitVector::with_capacity(width);
        for _ in 0..width {
            bits.push(self.fresh_literal()?);
        }
        Ok(bits)
    }

    /// The exact sum of `a` and `b`.
    pub fn bv_add(&mut self, a: &[CLiteral], b: &[CLiteral]) -> Result<BitVector, ErrorKind> {
        let width = a.len().max(b.len()) + 1;
        self.bv_add_modular(&sign_extend(a, width), &sign_extend(b, width), CLiteral::BOTTOM)
    }

    /// The sum of `a`, `b`, and `carry`, modulo the width of `a` and `b`.
    fn bv_add_modular(
        &mut self,
        a: &[CLiteral],
        b: &[CLiteral],
        mut carry: CLiteral,
    ) -> Result<BitVector, ErrorKind> {
        let mut sum = BitVector::with_capacity(a.len());
        for (x, y) in a.iter().zip(b) {
            let half = self.xor_gate(*x, *y)?;
            sum.push(self.xor_gate(half, carry)?);
            let both = self.and_gate(&[*x, *y])?;
            let carried = self.and_gate(&[half, carry])?;
            carry = self.or_gate(&[both, carried])?;
        }
        Ok(sum)
    }

    /// The exact negation of `a`.
    pub fn bv_neg(&mut self, a: &[CLiteral]) -> Result<BitVector, ErrorKind> {
        let inverted = sign_extend(a, a.len() + 1)
            .into_iter()
            .map(|bit| -bit)
            .collect::<Vec<_>>();
        let zero = vec![CLiteral::BOTTOM; inverted.len()];
        self.bv_add_modular(&inverted, &zero, CLiteral::TOP)
    }

    /// The exact difference of `a` and `b`.
    pub fn bv_sub(&mut self, a: &[CLiteral], b: &[CLiteral]) -> Result<BitVector, ErrorKind> {
        let width = a.len().max(b.len()) + 1;
        let inverted = sign_extend(b, width)
            .into_iter()
            .map(|bit| -bit)
            .collect::<Vec<_>>();
        self.bv_add_modular(&sign_extend(a, width), &inverted, CLiteral::TOP)
    }

    /// The exact product of `a` and `b`, by shifting and adding.
    pub fn bv_mul(&mut self, a: &[CLiteral], b: &[CLiteral]) -> Result<BitVector, ErrorKind> {
        let width = a.len() + b.len();
        let a = sign_extend(a, width);
        let b = sign_extend(b, width);

        let mut product = vec![CLiteral::BOTTOM; width];
        for (shift, b_bit) in b.iter().enumerate() {
            if *b_bit == CLiteral::BOTTOM {
                continue;
            }
            let mut partial = vec![CLiteral::BOTTOM; shift];
            for a_bit in a.iter().take(width - shift) {
                partial.push(self.and_gate(&[*a_bit, *b_bit])?);
            }
            product = self.bv_add_modular(&product, &partial, CLiteral::BOTTOM)?;
        }
        Ok(product)
    }

    /// A literal equivalent to `a` and `b` being equal.
    pub fn bv_eq(&mut self, a: &[CLiteral], b: &[CLiteral]) -> Result<CLiteral, ErrorKind> {
        let width = a.len().max(b.len());
        let a = sign_extend(a, width);
        let b = sign_extend(b, width);

        let mut bits = Vec::with_capacity(width);
        for (x, y) in a.iter().zip(&b) {
            bits.push(self.iff_gate(*x, *y)?);
        }
        self.and_gate(&bits)
    }

    /// A literal equivalent to `a` being (strictly) less than `b`, from the sign of the difference.
    pub fn bv_lt(&mut self, a: &[CLiteral], b: &[CLiteral]) -> Result<CLiteral, ErrorKind> {
        let difference = self.bv_sub(a, b)?;
        Ok(difference.last().copied().unwrap_or(CLiteral::BOTTOM))
    }

    /// A literal equivalent to `a` being less than or equal to `b`.
    pub fn bv_le(&mut self, a: &[CLiteral], b: &[CLiteral]) -> Result<CLiteral, ErrorKind> {
        Ok(-self.bv_lt(b, a)?)
    }

    /// The bit vector equal to `then` if `condition` holds, and `otherwise` if not.
    pub fn bv_ite(
        &mut self,
        condition: CLiteral,
        then: &[CLiteral],
        otherwise: &[CLiteral],
    ) -> Result<BitVector, ErrorKind> {
        let width = then.len().max(otherwise.len());
        let then = sign_extend(then, width);
        let otherwise = sign_extend(otherwise, width);

        let mut bits = BitVector::with_capacity(width);
        for (t, e) in then.iter().zip(&otherwise) {
            bits.push(self.ite_gate(condition, *t, *e)?);
        }
        Ok(bits)
    }

    /// The value of `bits` on the current valuation, with any bit without a value read as false.
    ///
    /// Bits beyond the sixty-fourth are read as copies of the sign bit.
    pub fn bv_value(&self, bits: &[CLiteral]) -> i64 {
        let bit_value =
            |literal: &CLiteral| self.atom_db.literal_value(*literal).unwrap_or(false);

        let Some(sign) = bits.last() else {
            return 0;
        };
        let mut value: i64 = match bit_value(sign) {
            true => -1,
            false => 0,
        };
        for (index, bit) in bits.iter().enumerate().take(bits.len() - 1).take(63) {
            let mask = 1_i64 << index;
            match bit_value(bit) {
                true => value |= mask,
                false => value &= !mask,
            }
        }
        value
    }
}

/// The value of a constant bit vector, if every bit is constant.
pub fn constant_value(bits: &[CLiteral]) -> Option<i64> {
    let sign = bits.last()?;
    if !bits.iter().all(|bit| bit.is_constant()) {
        return None;
    }
    let mut value: i64 = match sign.polarity() {
        true => -1,
        false => 0,
    };
    for (index, bit) in bits.iter().enumerate().take(bits.len() - 1).take(63) {
        let mask = 1_i64 << index;
        match bit.polarity() {
            true => value |= mask,
            false => value &= !mask,
        }
    }
    Some(value)
}

#[cfg(test)]
mod bit_tests {
    use crate::{context::Context, reports::Report};

    use super::*;

    #[test]
    fn widths() {
        assert_eq!(width_of(0), 1);
        assert_eq!(width_of(-1), 1);
        assert_eq!(width_of(1), 2);
        assert_eq!(width_of(-2), 2);
        assert_eq!(width_of(10), 5);
        assert_eq!(width_of(-16), 5);
    }

    #[test]
    fn constant_arithmetic_folds() {
        let mut the_context = Context::default();

        for (a, b) in [(3, 4), (-7, 2), (0, -1), (12, -30), (-8, -8)] {
            let a_bits = the_context.bv_const(a);
            let b_bits = the_context.bv_const(b);

            let sum = the_context.bv_add(&a_bits, &b_bits).unwrap();
            let difference = the_context.bv_sub(&a_bits, &b_bits).unwrap();
            let product = the_context.bv_mul(&a_bits, &b_bits).unwrap();
            let negation = the_context.bv_neg(&a_bits).unwrap();
            let less = the_context.bv_lt(&a_bits, &b_bits).unwrap();
            let equal = the_context.bv_eq(&a_bits, &a_bits).unwrap();

            assert_eq!(constant_value(&sum), Some(a + b));
            assert_eq!(constant_value(&difference), Some(a - b));
            assert_eq!(constant_value(&product), Some(a * b));
            assert_eq!(constant_value(&negation), Some(-a));
            assert_eq!(less == CLiteral::TOP, a < b);
            assert_eq!(equal, CLiteral::TOP);
        }

        assert_eq!(the_context.atom_count(), 0);
    }

    #[test]
    fn sum_with_bounds() {
        let mut the_context = Context::default();
        let x = the_context.bv_fresh(8).unwrap();
        let y = the_context.bv_fresh(8).unwrap();
        let zero = the_context.bv_const(0);
        let ten = the_context.bv_const(10);

        let sum = the_context.bv_add(&x, &y).unwrap();
        let constraints = [
            the_context.bv_eq(&sum, &ten).unwrap(),
            the_context.bv_lt(&y, &x).unwrap(),
            the_context.bv_lt(&zero, &x).unwrap(),
            the_context.bv_lt(&zero, &y).unwrap(),
        ];
        for constraint in constraints {
            assert!(the_context.assert_literal(constraint).is_ok());
        }

        assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
        let x_value = the_context.bv_value(&x);
        let y_value = the_context.bv_value(&y);
        assert_eq!(x_value + y_value, 10);
        assert!(x_value > y_value && y_value > 0);
    }

    #[test]
    fn negative_square_is_impossible() {
        let mut the_context = Context::default();
        let x = the_context.bv_fresh(6).unwrap();
        let zero = the_context.bv_const(0);

        let square = the_context.bv_mul(&x, &x).unwrap();
        let negative = the_context.bv_lt(&square, &zero).unwrap();
        assert!(the_context.assert_literal(negative).is_ok());

        assert_eq!(the_context.solve(), Ok(Report::Unsatisfiable));
    }
}
