use std::io::{self, Write};
use std::os::fd::AsFd;

use nix::unistd;

/// Standard output without `std`'s line buffer and lock.
///
/// Every chunk is already one contiguous buffer, so it goes straight to
/// `write(2)` on descriptor 1. Short writes and `EINTR` are left to
/// [`Write::write_all`].
#[derive(Debug)]
pub struct Stdout {
    fd: io::Stdout,
}

impl Stdout {
    pub fn new() -> Self {
        Stdout { fd: io::stdout() }
    }
}

impl Default for Stdout {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for Stdout {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(unistd::write(self.fd.as_fd(), buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
