//! The error type for canvas operations.

use std::fmt;

/// Which of the three resource maps a lookup went to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    Gradient,
    Pattern,
    Image,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ResourceKind::Gradient => "gradient",
            ResourceKind::Pattern => "pattern",
            ResourceKind::Image => "image",
        };
        f.write_str(name)
    }
}

/// An error that can occur while running a canvas command.
///
/// The error surface here is deliberately small: argument validation lives
/// with the host, so the failures that remain are named resources that were
/// never created, images whose load has not completed, enumerated words
/// outside their menu set, and whatever the drawing surface itself reports.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A registry lookup under a name that was never created.
    #[error("no {kind} named {name:?}")]
    MissingResource { kind: ResourceKind, name: String },
    /// An image whose asynchronous load has not completed.
    #[error("image {0:?} has not finished loading")]
    ImageNotReady(String),
    /// An enumerated parameter word outside its menu set.
    #[error("unknown {what} {word:?}")]
    UnknownWord { what: &'static str, word: String },
    /// An error reported by the drawing surface.
    #[error("surface error: {0}")]
    Backend(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub(crate) fn missing(kind: ResourceKind, name: &str) -> Error {
        Error::MissingResource {
            kind,
            name: name.to_owned(),
        }
    }

    pub(crate) fn unknown_word(what: &'static str, word: &str) -> Error {
        Error::UnknownWord {
            what,
            word: word.to_owned(),
        }
    }
}
