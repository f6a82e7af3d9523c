use cranelift_entity::entity_impl;

/// The index of a function a [`Ref::Func`](crate::Ref::Func) points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FuncIndex(u32);
entity_impl!(FuncIndex);

/// A host-owned handle to an external object.
///
/// The table only stores these, the object behind it is owned and kept alive
/// by the embedder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExternIndex(u32);
entity_impl!(ExternIndex);
