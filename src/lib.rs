//! FizzBuzz for very large upper bounds.
//!
//! Instead of deciding Fizz/Buzz per number, one chunk of output is turned
//! into a [`Template`] once, and every iteration only substitutes the current
//! [`Offsets`] into it before writing the whole chunk at once.
//!
//! ```
//! use std::num::NonZeroUsize;
//! use num_bigint::BigUint;
//!
//! let mut out = Vec::new();
//! chunked_fizzbuzz::fizzbuzz(NonZeroUsize::new(15).unwrap(), &BigUint::from(15u32), &mut out).unwrap();
//! assert!(out.starts_with(b"FizzBuzz\n1\n2\nFizz\n"));
//! ```

pub mod count;
pub mod emit;
pub mod error;
pub mod offsets;
pub mod reference;
pub mod sink;
pub mod template;

pub use emit::{fizzbuzz, Emitter, Summary};
pub use error::{Error, Result};
pub use offsets::Offsets;
pub use template::{Line, Template};
