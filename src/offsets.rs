use std::num::NonZeroUsize;

use num_bigint::BigUint;

use crate::template::{residue, Line};

/// Absolute indices of the numeric lines of the current chunk.
///
/// Kept positionally: offset `k` is `base + relative[k]`, so advancing only
/// touches the base. While the whole chunk fits in a `u64` the base is
/// mirrored in `fast` and numbers are formatted with `itoap`.
#[derive(Debug, Clone)]
pub struct Offsets {
    relative: Vec<u64>,
    base: BigUint,
    step: BigUint,
    span: u64,
    fast: Option<u64>,
}

impl Offsets {
    pub fn new(chunk: NonZeroUsize) -> Self {
        Self::starting_at(chunk, BigUint::ZERO, BigUint::from(chunk.get()))
    }

    /// Offsets of a chunk that begins at index `first` and moves forward by
    /// `step` indices on every [`advance`](Self::advance).
    pub fn starting_at(chunk: NonZeroUsize, first: BigUint, step: BigUint) -> Self {
        let phase = residue(&first);
        let span = chunk.get() as u64;
        let relative = (0..span)
            .filter(|i| Line::at(phase + i) == Line::Number)
            .collect();

        Offsets {
            relative,
            fast: fast_base(&first, span),
            base: first,
            step,
            span,
        }
    }

    pub fn len(&self) -> usize {
        self.relative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relative.is_empty()
    }

    pub fn base(&self) -> &BigUint {
        &self.base
    }

    pub fn advance(&mut self) {
        self.base += &self.step;
        self.fast = fast_base(&self.base, self.span);
    }

    pub fn values(&self) -> impl Iterator<Item = BigUint> + '_ {
        self.relative.iter().map(move |&r| &self.base + r)
    }

    /// Writes offset `k` in decimal, without a newline.
    pub fn write_value(&self, k: usize, buf: &mut Vec<u8>) {
        let relative = self.relative[k];
        match self.fast {
            Some(base) => {
                itoap::write_to_vec(buf, base + relative);
            }
            None => {
                let value = &self.base + relative;
                buf.extend_from_slice(value.to_str_radix(10).as_bytes());
            }
        }
    }
}

fn fast_base(base: &BigUint, span: u64) -> Option<u64> {
    u64::try_from(base)
        .ok()
        .filter(|b| b.checked_add(span).is_some())
}
