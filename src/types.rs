use crate::errors::wasm_unsupported;
use crate::TABLE_MAX_ELEMENTS;
use core::fmt;
use wasmparser::{AbstractHeapType, HeapType};

/// The kind of reference a table holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefType {
    /// `funcref`, function references used by `call_indirect`.
    Func,
    /// `externref`, opaque handles to host objects.
    Extern,
}

impl fmt::Display for RefType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RefType::Func => write!(f, "funcref"),
            RefType::Extern => write!(f, "externref"),
        }
    }
}

/// Size limits of a table, in elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limits {
    /// The initial number of elements.
    pub min: u32,
    /// The maximum number of elements the table may grow to, if any.
    pub max: Option<u32>,
}

impl Limits {
    pub const fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// The largest size a table with these limits may reach.
    pub fn ceiling(&self) -> u32 {
        self.max.unwrap_or(TABLE_MAX_ELEMENTS)
    }

    /// Returns whether a table with these limits can be supplied where
    /// `expected` is declared, e.g. when linking a table import.
    ///
    /// The actual minimum must be at least the expected one, and if a maximum
    /// is expected, the actual maximum must exist and be no larger.
    pub fn matches(&self, expected: &Limits) -> bool {
        if self.min < expected.min {
            return false;
        }
        match (self.max, expected.max) {
            (_, None) => true,
            (Some(actual), Some(expected)) => actual <= expected,
            (None, Some(_)) => false,
        }
    }
}

impl fmt::Display for Limits {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "{{min {}, max {max}}}", self.min),
            None => write!(f, "{{min {}}}", self.min),
        }
    }
}

/// The declared type of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableType {
    pub element_type: RefType,
    pub limits: Limits,
}

impl TableType {
    pub const fn new(element_type: RefType, limits: Limits) -> Self {
        Self {
            element_type,
            limits,
        }
    }

    /// Import matching: same element type and matching limits.
    pub fn matches(&self, expected: &TableType) -> bool {
        self.element_type == expected.element_type && self.limits.matches(&expected.limits)
    }
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(table {} {})", self.limits, self.element_type)
    }
}

impl TryFrom<wasmparser::RefType> for RefType {
    type Error = crate::Error;

    fn try_from(ty: wasmparser::RefType) -> crate::Result<Self> {
        // fresh and grown slots hold null
        if !ty.is_nullable() {
            tracing::warn!("non-nullable table element type {ty:?}");
            return Err(wasm_unsupported!("non-nullable table element type {ty:?}"));
        }

        // concrete indices would need the module's type section to resolve
        match ty.heap_type() {
            HeapType::Abstract {
                shared: false,
                ty: AbstractHeapType::Func,
            } => Ok(RefType::Func),
            HeapType::Abstract {
                shared: false,
                ty: AbstractHeapType::Extern,
            } => Ok(RefType::Extern),
            other => {
                tracing::warn!("unsupported table element type {other:?}");
                Err(wasm_unsupported!("table element type {other:?}"))
            }
        }
    }
}

impl TryFrom<wasmparser::TableType> for TableType {
    type Error = crate::Error;

    fn try_from(ty: wasmparser::TableType) -> crate::Result<Self> {
        if ty.table64 {
            tracing::warn!("64-bit tables are not supported");
            return Err(wasm_unsupported!("64-bit table"));
        }
        if ty.shared {
            tracing::warn!("shared tables are not supported");
            return Err(wasm_unsupported!("shared table"));
        }

        let min = u32::try_from(ty.initial)
            .map_err(|_| wasm_unsupported!("table minimum {} exceeds u32", ty.initial))?;
        let max = ty
            .maximum
            .map(|max| {
                u32::try_from(max).map_err(|_| wasm_unsupported!("table maximum {max} exceeds u32"))
            })
            .transpose()?;

        Ok(TableType::new(
            RefType::try_from(ty.element_type)?,
            Limits::new(min, max),
        ))
    }
}
