//! Central error types for the serializer.
//!
//! Three checked failure kinds plus wrapped I/O errors; recovery
//! transformations (PI `?>`-splitting, comment `--`-padding) are NOT errors.

use core::fmt;

/// All failure kinds surfaced by this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// An entity-definition resource could not be located or parsed.
    /// Surfaced at construction time ([`crate::CharInfo::from_resource`]).
    ResourceLoad {
        /// Der angefragte Resource-Name.
        resource: String,
        /// Was schiefging (leer wenn nicht verfuegbar).
        detail: String,
    },
    /// The declared output encoding has no available byte encoder.
    /// Surfaced at sink-configuration time; callers may catch and retry
    /// with UTF-8.
    UnsupportedEncoding(String),
    /// Malformed UTF-16 input: a high surrogate with no following low
    /// surrogate, or an out-of-range low surrogate. Fatal for the current
    /// document — output correctness cannot be guaranteed past this point.
    InvalidSurrogate {
        /// Die High-Surrogate-Einheit.
        high: u16,
        /// Die folgende Einheit (None wenn der Input hier endete).
        low: Option<u16>,
    },
    /// A qualified-name string could not be parsed (Clark notation or
    /// `prefix:local`).
    InvalidQName(String),
    /// An I/O error from the underlying sink. Propagated, never retried.
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourceLoad { resource, detail } => {
                if detail.is_empty() {
                    write!(f, "entity resource '{resource}' could not be loaded")
                } else {
                    write!(f, "entity resource '{resource}' could not be loaded: {detail}")
                }
            }
            Self::UnsupportedEncoding(name) => {
                write!(f, "encoding '{name}' is not supported")
            }
            Self::InvalidSurrogate { high, low } => match low {
                Some(low) => write!(
                    f,
                    "invalid UTF-16 surrogate pair detected: {high:X} {low:X}"
                ),
                None => write!(f, "invalid UTF-16 surrogate detected: {high:X} ?"),
            },
            Self::InvalidQName(s) => write!(f, "invalid qualified name '{s}'"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl Error {
    /// Erstellt einen `ResourceLoad` Fehler mit Kontext.
    pub fn resource_load(resource: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::ResourceLoad {
            resource: resource.into(),
            detail: detail.into(),
        }
    }
}

/// A convenience `Result` type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
