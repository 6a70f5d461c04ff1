use std::fmt;

#[derive(Debug)]
pub enum Error {
    EngineNotFound(String),
    EngineFailed(String),
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EngineNotFound(detail) => {
                write!(f, "no usable conversion engine: {detail}")
            }
            Error::EngineFailed(detail) => write!(f, "conversion engine failed: {detail}"),
            Error::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
