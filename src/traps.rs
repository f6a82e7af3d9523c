use crate::Error;

/// A guest-visible fault raised by a table instruction.
#[derive(onlyerror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trap {
    /// Out-of-bounds access to a table.
    #[error("out of bounds table access")]
    TableOutOfBounds,
    /// Indirect call to a null table entry.
    #[error("accessed uninitialized table element")]
    IndirectCallToNull,
    /// Indirect call through an element that is not a function.
    #[error("indirect call signature mismatch")]
    BadSignature,
}

impl Trap {
    /// Maps a table error onto the trap the guest observes.
    ///
    /// Returns `None` for errors that are reported as instruction results
    /// (failed growth) or never happen during execution (construction and
    /// type conversion failures).
    pub fn from_table_error(err: &Error) -> Option<Self> {
        match err {
            Error::OutOfBounds { .. } => Some(Trap::TableOutOfBounds),
            Error::CapacityExceeded { .. }
            | Error::AllocationFailed { .. }
            | Error::InvalidLimits { .. }
            | Error::Unsupported(_) => None,
        }
    }
}
