// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Provides an error type for this crate.

use std::convert::From;
use std::error::Error as StdError;

/// Our main error type.
#[derive(Debug)]
pub enum Error {
    /// Error from rxml, when a name or a text is not valid XML or an item can't be encoded.
    XmlError(rxml::Error),

    /// An error from the destination the document is written to.
    Io(std::io::Error),

    /// An error which is returned when a node has an empty name.
    MissingName,

    /// An error which is returned when a feed is built from an empty list of nodes.
    EmptyFeed,

    /// An error which is returned when the sink is driven out of order, for example an
    /// attribute after the element head has been closed.
    WriterState(&'static str),
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::XmlError(e) => Some(e),
            Error::Io(e) => Some(e),
            Error::MissingName => None,
            Error::EmptyFeed => None,
            Error::WriterState(_) => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::XmlError(e) => write!(fmt, "XML error: {}", e),
            Error::Io(e) => write!(fmt, "I/O error: {}", e),
            Error::MissingName => write!(fmt, "a node is missing its element name"),
            Error::EmptyFeed => write!(fmt, "the feed doesn't contain a root node"),
            Error::WriterState(msg) => write!(fmt, "writer used out of order: {}", msg),
        }
    }
}

impl From<rxml::Error> for Error {
    fn from(err: rxml::Error) -> Error {
        Error::XmlError(err)
    }
}

impl From<rxml::error::XmlError> for Error {
    fn from(err: rxml::error::XmlError) -> Error {
        Error::XmlError(err.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

/// Our simplified Result type.
pub type Result<T> = ::std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_keep_their_source() {
        let err = Error::from(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "pipe closed",
        ));
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "I/O error: pipe closed");
        assert!(err.source().is_some());
    }

    #[test]
    fn structural_errors_have_no_source() {
        assert!(Error::MissingName.source().is_none());
        assert_eq!(
            Error::EmptyFeed.to_string(),
            "the feed doesn't contain a root node"
        );
    }
}
