//! Per-chunk output pattern.
//!
//! A template holds the text of one chunk with the numbers cut out. It is
//! stored as the literal runs between placeholders, so rendering alternates
//! between copying a run and writing one offset.

use std::num::NonZeroUsize;

use num_bigint::BigUint;

use crate::offsets::Offsets;

pub const FIZZ: &str = "Fizz";
pub const BUZZ: &str = "Buzz";
pub const FIZZBUZZ: &str = "FizzBuzz";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Word(&'static str),
    Number,
}

impl Line {
    pub fn at(index: u64) -> Self {
        if index % 15 == 0 {
            Line::Word(FIZZBUZZ)
        } else if index % 3 == 0 {
            Line::Word(FIZZ)
        } else if index % 5 == 0 {
            Line::Word(BUZZ)
        } else {
            Line::Number
        }
    }
}

/// `n mod 15`, which is all the line pattern depends on.
pub(crate) fn residue(n: &BigUint) -> u64 {
    (n % 15u32).iter_u64_digits().next().unwrap_or(0)
}

#[derive(Debug, Clone)]
pub struct Template {
    chunk: NonZeroUsize,
    phase: u64,
    literals: Vec<Vec<u8>>,
}

impl Template {
    /// Template for a chunk whose first line is index 0.
    pub fn new(chunk: NonZeroUsize) -> Self {
        Self::starting_at(chunk, &BigUint::ZERO)
    }

    /// Template for a chunk whose first line is index `first`.
    pub fn starting_at(chunk: NonZeroUsize, first: &BigUint) -> Self {
        let phase = residue(first);
        let mut literals = Vec::new();
        let mut run = Vec::new();

        for i in 0..chunk.get() as u64 {
            match Line::at(phase + i) {
                Line::Word(word) => {
                    run.extend_from_slice(word.as_bytes());
                    run.push(b'\n');
                }
                Line::Number => {
                    literals.push(std::mem::take(&mut run));
                    run.push(b'\n');
                }
            }
        }
        literals.push(run);

        Template {
            chunk,
            phase,
            literals,
        }
    }

    pub fn chunk(&self) -> NonZeroUsize {
        self.chunk
    }

    pub fn placeholders(&self) -> usize {
        self.literals.len() - 1
    }

    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        (0..self.chunk.get() as u64).map(move |i| Line::at(self.phase + i))
    }

    /// Bytes of literal text, newlines included.
    pub fn literal_len(&self) -> usize {
        self.literals.iter().map(Vec::len).sum()
    }

    /// Appends the chunk to `buf`, writing offset `k` at placeholder `k`.
    pub fn render(&self, offsets: &Offsets, buf: &mut Vec<u8>) {
        debug_assert_eq!(offsets.len(), self.placeholders());

        buf.extend_from_slice(&self.literals[0]);
        for (k, literal) in self.literals[1..].iter().enumerate() {
            offsets.write_value(k, buf);
            buf.extend_from_slice(literal);
        }
    }
}
