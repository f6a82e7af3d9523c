use alloc::string::String;

#[derive(onlyerror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An access touched elements outside of `[0, size)`.
    ///
    /// `boundary` is the last valid index of the table (or source sequence)
    /// that was checked, or `0` if it is empty.
    #[error("out of bounds table access: offset {offset}, length {length}, boundary {boundary}")]
    OutOfBounds {
        offset: u32,
        length: u32,
        boundary: u32,
    },
    /// Growing the table by `requested` elements would exceed its ceiling.
    ///
    /// This is an expected outcome of `table.grow`, not a trap.
    #[error("cannot grow table of size {size} by {requested} elements, ceiling is {ceiling}")]
    CapacityExceeded {
        requested: u32,
        size: u32,
        ceiling: u32,
    },
    /// The host could not reserve storage for `requested` more elements.
    #[error("failed to allocate storage for {requested} table elements")]
    AllocationFailed { requested: u32 },
    /// The declared maximum is smaller than the declared minimum.
    #[error("invalid table limits: maximum {max} is smaller than minimum {min}")]
    InvalidLimits { min: u32, max: u32 },
    /// The table type uses a feature that is not supported.
    #[error("Feature used by the WebAssembly code is not supported: {0}")]
    Unsupported(String),
}

macro_rules! wasm_unsupported {
    ($($arg:tt)*) => { $crate::Error::Unsupported(alloc::format!($($arg)*)) }
}

pub(crate) use wasm_unsupported;
