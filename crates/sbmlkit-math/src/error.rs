//! Error types for sbmlkit-math.

use thiserror::Error;

use crate::node_type::NodeType;

/// Failures raised by formula trees and the formula parser.
///
/// Typed accessors never fall back to a sentinel value: calling one
/// against an incompatible node reports [`Error::WrongNodeKind`], and
/// child-index operations outside bounds report
/// [`Error::IndexOutOfRange`]. Parse failures carry the byte offset of
/// the offending token.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    #[error("{accessor} is not defined for a {actual} node")]
    WrongNodeKind {
        accessor: &'static str,
        actual: NodeType,
    },

    #[error("child index {index} out of range for {length} children")]
    IndexOutOfRange { index: usize, length: usize },

    #[error("formula parse error at offset {position}: {message}")]
    FormulaParse { message: String, position: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
