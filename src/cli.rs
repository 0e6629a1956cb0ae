use std::num::NonZeroUsize;

use chunked_fizzbuzz::count::{parse_chunk, parse_length};
use clap::Parser;
use num_bigint::BigUint;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Lines per chunk
    #[arg(default_value = "6000", value_parser = parse_chunk)]
    pub chunk: NonZeroUsize,
    /// Lines to cover, rounded up to whole chunks (`1e100` and `10^100` work)
    #[arg(default_value = "1e100", value_parser = parse_length)]
    pub length: BigUint,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["fizzbuzz"]).unwrap();
        assert_eq!(cli.chunk.get(), 6000);
        assert_eq!(cli.length, BigUint::from(10u32).pow(100));
    }

    #[test]
    fn positional_arguments() {
        let cli = Cli::try_parse_from(["fizzbuzz", "6", "18"]).unwrap();
        assert_eq!(cli.chunk.get(), 6);
        assert_eq!(cli.length, BigUint::from(18u32));
    }

    #[test]
    fn zero_chunk_is_a_usage_error() {
        assert!(Cli::try_parse_from(["fizzbuzz", "0", "18"]).is_err());
    }

    #[test]
    fn oversized_chunk_is_a_usage_error() {
        assert!(Cli::try_parse_from(["fizzbuzz", "9223372036854775808", "1"]).is_err());
    }

    #[test]
    fn command_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
