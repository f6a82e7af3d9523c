//! The `table.*` instruction family and `call_indirect` resolution.
//!
//! Each function implements one instruction on top of [`Table`]. Accesses
//! outside the table trap with [`Trap::TableOutOfBounds`]. `table.grow` never
//! traps; it reports failure as `-1`.

use crate::indices::FuncIndex;
use crate::table::Table;
use crate::traps::Trap;
use crate::values::Ref;
use crate::Error;

/// `table.size`
pub fn table_size(table: &Table) -> u32 {
    table.size()
}

/// `table.grow`: returns the previous size, or `-1` if the table can't grow.
///
/// The result is the raw `i32` operand pushed on the value stack, sizes above
/// `i32::MAX` come out negative just like in the guest's view.
pub fn table_grow(table: &mut Table, delta: u32, init: Ref) -> i32 {
    debug_assert!(init.matches_ty(table.element_type()));

    match table.grow(delta, init) {
        Ok(old_size) => i32::from_ne_bytes(old_size.to_ne_bytes()),
        Err(err) => {
            tracing::trace!("table.grow failed: {err}");
            -1
        }
    }
}

/// `table.get`
///
/// # Errors
///
/// Traps if `index` is out of bounds.
pub fn table_get(table: &Table, index: u32) -> Result<Ref, Trap> {
    table.get(index).map_err(trap)
}

/// `table.set`
///
/// # Errors
///
/// Traps if `index` is out of bounds.
pub fn table_set(table: &mut Table, index: u32, value: Ref) -> Result<(), Trap> {
    debug_assert!(value.matches_ty(table.element_type()));
    table.set(index, value).map_err(trap)
}

/// `table.fill`
///
/// # Errors
///
/// Traps if `offset..offset + length` is out of bounds.
pub fn table_fill(table: &mut Table, offset: u32, value: Ref, length: u32) -> Result<(), Trap> {
    debug_assert!(value.matches_ty(table.element_type()));
    table.fill(value, offset, length).map_err(trap)
}

/// `table.copy` between two distinct tables.
///
/// # Errors
///
/// Traps if either range is out of bounds.
pub fn table_copy(
    dst: &mut Table,
    src: &Table,
    dst_offset: u32,
    src_offset: u32,
    length: u32,
) -> Result<(), Trap> {
    debug_assert_eq!(dst.element_type(), src.element_type());

    // validate the source against its own size so the reported boundary
    // belongs to the source table
    let elements = src.read_slice(src_offset, length).map_err(trap)?;
    dst.write_slice(elements, dst_offset, 0, length)
        .map_err(trap)
}

/// `table.copy` where source and destination are the same table.
///
/// # Errors
///
/// Traps if either range is out of bounds.
pub fn table_copy_within(table: &mut Table, dst: u32, src: u32, length: u32) -> Result<(), Trap> {
    table.copy_within(dst, src, length).map_err(trap)
}

/// `table.init` from the (already evaluated) elements of a passive segment.
///
/// A dropped segment is passed as an empty slice.
///
/// # Errors
///
/// Traps if either range is out of bounds.
pub fn table_init(
    table: &mut Table,
    segment: &[Ref],
    dst: u32,
    src: u32,
    length: u32,
) -> Result<(), Trap> {
    table.write_slice(segment, dst, src, length).map_err(trap)
}

/// Resolves the callee of a `call_indirect` through `table`.
///
/// Signature checking is left to the caller, which knows the expected type of
/// the returned function.
///
/// # Errors
///
/// Traps if `index` is out of bounds, the element is null or it is not a
/// function reference.
pub fn resolve_indirect(table: &Table, index: u32) -> Result<FuncIndex, Trap> {
    match table.get(index).map_err(trap)? {
        Ref::Func(func) => Ok(func),
        Ref::Null => Err(Trap::IndirectCallToNull),
        Ref::Extern(_) => Err(Trap::BadSignature),
    }
}

/// Only bounds errors can come out of the accessors used above.
fn trap(err: Error) -> Trap {
    debug_assert!(
        matches!(err, Error::OutOfBounds { .. }),
        "unexpected table error during execution: {err}"
    );
    Trap::TableOutOfBounds
}
