use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid length `{input}`: {reason}")]
    InvalidLength { input: String, reason: &'static str },
    #[error("chunk size must be a positive integer no larger than 16777216, got `{0}`")]
    InvalidChunk(String),
    #[error("error while writing output: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True when the reader on the other end of stdout went away.
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == io::ErrorKind::BrokenPipe)
    }
}
