use crate::utils::enum_accessors;
use crate::indices::{ExternIndex, FuncIndex};
use crate::types::RefType;
use core::fmt;

/// A reference value stored in a table slot.
///
/// References are opaque to the table: it copies them around but never looks
/// behind them. Whatever a reference denotes is owned by the embedder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Ref {
    /// The null reference. Fresh table slots hold this.
    #[default]
    Null,
    /// A function reference.
    Func(FuncIndex),
    /// An external reference.
    Extern(ExternIndex),
}

impl Ref {
    /// Is this a null reference?
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Is this a non-null reference?
    #[inline]
    pub fn is_non_null(&self) -> bool {
        !self.is_null()
    }

    /// Whether this reference may be stored in a table of type `ty`.
    ///
    /// The null reference fits every table.
    pub fn matches_ty(&self, ty: RefType) -> bool {
        match self {
            Self::Null => true,
            Self::Func(_) => ty == RefType::Func,
            Self::Extern(_) => ty == RefType::Extern,
        }
    }

    enum_accessors! {
        e
        (Func(FuncIndex) as_func unwrap_func *e)
        (Extern(ExternIndex) as_extern unwrap_extern *e)
    }
}

impl From<FuncIndex> for Ref {
    #[inline]
    fn from(index: FuncIndex) -> Self {
        Self::Func(index)
    }
}

impl From<ExternIndex> for Ref {
    #[inline]
    fn from(index: ExternIndex) -> Self {
        Self::Extern(index)
    }
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "ref.null"),
            Self::Func(index) => write!(f, "ref.func {}", index.as_u32()),
            Self::Extern(index) => write!(f, "ref.extern {}", index.as_u32()),
        }
    }
}
