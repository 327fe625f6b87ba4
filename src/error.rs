use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// The plan description could not be deserialized.
    InvalidPlan(String),
    /// A generation step was requested before its upstream sections exist.
    MissingInput {
        section: &'static str,
        requires: Vec<&'static str>,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::InvalidPlan(msg) => write!(f, "invalid plan: {msg}"),
            Error::MissingInput { section, requires } => write!(
                f,
                "cannot generate {section}: missing required content for {}",
                requires.join(", ")
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
