//! Naive FizzBuzz, one number at a time.
//!
//! Used to check the chunked output, both in tests and by `fizz-tester`.

use std::io::{self, Read};

use crate::template::{Line, BUZZ, FIZZ, FIZZBUZZ};

const REFILL: usize = 64 * 1024;

pub fn write_line(n: u64, buf: &mut Vec<u8>) {
    let fizz = n % 3 == 0;
    let buzz = n % 5 == 0;

    if fizz && buzz {
        buf.extend_from_slice(FIZZBUZZ.as_bytes());
    } else if fizz {
        buf.extend_from_slice(FIZZ.as_bytes());
    } else if buzz {
        buf.extend_from_slice(BUZZ.as_bytes());
    } else {
        itoap::write_to_vec(buf, n);
    }
    buf.push(b'\n');
}

/// Lines for the indices in `range`, concatenated.
pub fn lines(range: std::ops::Range<u64>) -> Vec<u8> {
    let mut buf = Vec::new();
    for n in range {
        write_line(n, &mut buf);
    }
    buf
}

/// Endless reference output starting at a given index.
#[derive(Debug)]
pub struct Reference {
    next: u64,
    pending: Vec<u8>,
    pos: usize,
}

impl Reference {
    pub fn starting_at(first: u64) -> Self {
        Reference {
            next: first,
            pending: Vec::with_capacity(REFILL + 32),
            pos: 0,
        }
    }

    fn refill(&mut self) {
        self.pending.clear();
        self.pos = 0;
        while self.pending.len() < REFILL {
            write_line(self.next, &mut self.pending);
            self.next += 1;
        }
    }
}

impl Read for Reference {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if self.pos == self.pending.len() {
            self.refill();
        }
        let available = &self.pending[self.pos..];
        let n = available.len().min(out.len());
        out[..n].copy_from_slice(&available[..n]);
        self.pos += n;
        Ok(n)
    }
}
