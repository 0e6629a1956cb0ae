use std::io::Write;
use std::num::NonZeroUsize;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::Result;
use crate::offsets::Offsets;
use crate::template::Template;

/// Digits reserved per number when sizing the chunk buffer.
const NUMBER_WIDTH_HINT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub chunks: BigUint,
    pub lines: BigUint,
}

#[derive(Debug, Clone)]
struct Frame {
    template: Template,
    offsets: Offsets,
}

/// Writes FizzBuzz in whole chunks.
///
/// One frame is built per phase of the chunk cycle: when `chunk` is a
/// multiple of 15 there is a single frame, otherwise consecutive chunks
/// start at different residues mod 15 and each residue gets its own
/// template. Frames are used round-robin.
#[derive(Debug, Clone)]
pub struct Emitter {
    chunk: NonZeroUsize,
    frames: Vec<Frame>,
    next: usize,
    buf: Vec<u8>,
}

impl Emitter {
    pub fn new(chunk: NonZeroUsize) -> Self {
        Self::starting_at(chunk, BigUint::ZERO)
    }

    /// Emitter whose first line is index `first`.
    pub fn starting_at(chunk: NonZeroUsize, first: BigUint) -> Self {
        let cycle = cycle_len(chunk);
        let step = BigUint::from(chunk.get()) * cycle;

        let frames: Vec<Frame> = (0..cycle)
            .map(|j| {
                let start = &first + BigUint::from(chunk.get()) * j;
                Frame {
                    template: Template::starting_at(chunk, &start),
                    offsets: Offsets::starting_at(chunk, start, step.clone()),
                }
            })
            .collect();

        let capacity = frames
            .iter()
            .map(|f| f.template.literal_len() + f.template.placeholders() * NUMBER_WIDTH_HINT)
            .max()
            .unwrap_or_default();

        Emitter {
            chunk,
            frames,
            next: 0,
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn chunk(&self) -> NonZeroUsize {
        self.chunk
    }

    /// Number of whole chunks needed to cover `length` lines.
    pub fn iterations(chunk: NonZeroUsize, length: &BigUint) -> BigUint {
        (length + (chunk.get() - 1)) / chunk.get()
    }

    /// Renders and writes the next chunk, then advances its offsets.
    pub fn emit_chunk<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let frame = &mut self.frames[self.next];

        self.buf.clear();
        frame.template.render(&frame.offsets, &mut self.buf);
        out.write_all(&self.buf)?;

        frame.offsets.advance();
        self.next = (self.next + 1) % self.frames.len();
        Ok(())
    }

    pub fn run<W: Write>(&mut self, length: &BigUint, out: &mut W) -> Result<Summary> {
        let iterations = Self::iterations(self.chunk, length);
        tracing::debug!(
            chunk = self.chunk.get(),
            cycle = self.frames.len(),
            %iterations,
            "emitting"
        );

        let mut chunks = BigUint::zero();
        while chunks < iterations {
            self.emit_chunk(out)?;
            chunks += 1u32;
        }
        out.flush()?;

        let lines = &chunks * self.chunk.get();
        tracing::debug!(%chunks, %lines, "done");
        Ok(Summary { chunks, lines })
    }
}

/// Smallest `k` such that `k * chunk` is a multiple of 15.
fn cycle_len(chunk: NonZeroUsize) -> usize {
    let r = chunk.get() % 15;
    (1..=15).find(|k| (r * k) % 15 == 0).unwrap_or(15)
}

/// Writes lines `0..` to `out` in whole chunks of `chunk` lines until at
/// least `length` lines have been written.
pub fn fizzbuzz<W: Write>(chunk: NonZeroUsize, length: &BigUint, out: &mut W) -> Result<Summary> {
    Emitter::new(chunk).run(length, out)
}
