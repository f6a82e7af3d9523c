use crate::types::{Limits, RefType, TableType};
use crate::values::Ref;
use crate::{Error, Result};
use alloc::vec::Vec;
use core::ops::Range;

/// A table instance.
///
/// Holds the declared [`TableType`] and a vector of references whose length is
/// the current size. The size starts at `limits.min`, only ever grows and never
/// exceeds `limits.max`.
#[derive(Debug, Clone)]
pub struct Table {
    ty: TableType,
    elements: Vec<Ref>,
}

impl Table {
    /// Creates a table of `ty.limits.min` null elements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLimits`] if the maximum is smaller than the
    /// minimum and [`Error::AllocationFailed`] if the initial elements can't be
    /// allocated.
    pub fn new(ty: TableType) -> Result<Self> {
        let Limits { min, max } = ty.limits;
        if let Some(max) = max.filter(|max| *max < min) {
            return Err(Error::InvalidLimits { min, max });
        }

        let mut elements = Vec::new();
        elements
            .try_reserve_exact(to_usize(min))
            .map_err(|_| Error::AllocationFailed { requested: min })?;
        elements.resize(to_usize(min), Ref::Null);

        tracing::trace!("created table {ty}");
        Ok(Self { ty, elements })
    }

    /// The declared type of this table.
    pub fn ty(&self) -> &TableType {
        &self.ty
    }

    pub fn element_type(&self) -> RefType {
        self.ty.element_type
    }

    /// The current number of elements.
    pub fn size(&self) -> u32 {
        // `grow` never goes past `TABLE_MAX_ELEMENTS`
        u32::try_from(self.elements.len()).unwrap_or(u32::MAX)
    }

    pub fn has_max(&self) -> bool {
        self.ty.limits.max.is_some()
    }

    /// The current committed minimum, i.e. the current size.
    ///
    /// The declared minimum is available through [`Table::ty`].
    pub fn min(&self) -> u32 {
        self.size()
    }

    pub fn max(&self) -> Option<u32> {
        self.ty.limits.max
    }

    /// The last valid index, or `0` for an empty table.
    ///
    /// Only used to describe out-of-bounds accesses.
    pub fn boundary_index(&self) -> u32 {
        self.size().saturating_sub(1)
    }

    /// Returns whether `offset..offset + length` lies within the table.
    pub fn in_bounds(&self, offset: u32, length: u32) -> bool {
        offset
            .checked_add(length)
            .is_some_and(|end| end <= self.size())
    }

    /// Grows the table by `delta` elements initialized to `init`, returning
    /// the previous size.
    ///
    /// Growing by zero always succeeds. On failure the table is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] if the new size would exceed the
    /// declared maximum (or [`TABLE_MAX_ELEMENTS`](crate::TABLE_MAX_ELEMENTS)
    /// if there is none) and [`Error::AllocationFailed`] if the host refuses
    /// the allocation.
    pub fn grow(&mut self, delta: u32, init: Ref) -> Result<u32> {
        let size = self.size();
        let ceiling = self.ty.limits.ceiling();

        if delta > ceiling.saturating_sub(size) {
            tracing::debug!(size, delta, ceiling, "table growth exceeds ceiling");
            return Err(Error::CapacityExceeded {
                requested: delta,
                size,
                ceiling,
            });
        }
        if delta == 0 {
            return Ok(size);
        }

        // amortized, repeated small grows must not reallocate every time
        self.elements
            .try_reserve(to_usize(delta))
            .map_err(|_| Error::AllocationFailed { requested: delta })?;
        // cannot overflow, `delta <= ceiling - size`
        let new_len = to_usize(size + delta);
        self.elements.resize(new_len, init);

        tracing::trace!(size, delta, "grew table");
        Ok(size)
    }

    /// Returns the elements in `offset..offset + length`.
    ///
    /// The returned slice borrows the table, so it can't be held across any
    /// call that mutates it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the range is not within the table.
    pub fn read_slice(&self, offset: u32, length: u32) -> Result<&[Ref]> {
        let range = self.checked_range(offset, length)?;
        Ok(&self.elements[range])
    }

    /// Copies `source[source_start..source_start + length]` into
    /// `offset..offset + length` of this table.
    ///
    /// Backs `table.copy` between distinct tables and `table.init` from an
    /// element segment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if either range is out of bounds. A bad
    /// destination range reports this table's boundary, a bad source range
    /// reports the boundary of `source`.
    pub fn write_slice(
        &mut self,
        source: &[Ref],
        offset: u32,
        source_start: u32,
        length: u32,
    ) -> Result<()> {
        let dst = self.checked_range(offset, length)?;
        let src = source_range(source, source_start, length)?;

        self.elements[dst].copy_from_slice(&source[src]);
        Ok(())
    }

    /// Copies `length` elements from `src` to `dst` within this table.
    ///
    /// The ranges may overlap, the copy behaves like `memmove`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if either range is out of bounds.
    pub fn copy_within(&mut self, dst: u32, src: u32, length: u32) -> Result<()> {
        let dst = self.checked_range(dst, length)?;
        let src = self.checked_range(src, length)?;

        self.elements.copy_within(src, dst.start);
        Ok(())
    }

    /// Sets every element in `offset..offset + length` to `value`.
    ///
    /// A zero `length` is a no-op for any `offset` up to and including the
    /// current size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the range is not within the table.
    pub fn fill(&mut self, value: Ref, offset: u32, length: u32) -> Result<()> {
        let range = self.checked_range(offset, length)?;
        self.elements[range].fill(value);
        Ok(())
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `index >= size`.
    pub fn get(&self, index: u32) -> Result<Ref> {
        self.elements
            .get(to_usize(index))
            .copied()
            .ok_or_else(|| self.out_of_bounds(index, 1))
    }

    /// Sets the element at `index` to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `index >= size`.
    pub fn set(&mut self, index: u32, value: Ref) -> Result<()> {
        if index >= self.size() {
            return Err(self.out_of_bounds(index, 1));
        }
        self.elements[to_usize(index)] = value;
        Ok(())
    }

    fn checked_range(&self, offset: u32, length: u32) -> Result<Range<usize>> {
        if self.in_bounds(offset, length) {
            let start = to_usize(offset);
            Ok(start..start + to_usize(length))
        } else {
            Err(self.out_of_bounds(offset, length))
        }
    }

    fn out_of_bounds(&self, offset: u32, length: u32) -> Error {
        let boundary = self.boundary_index();
        tracing::debug!(offset, length, boundary, "out of bounds table access");
        Error::OutOfBounds {
            offset,
            length,
            boundary,
        }
    }
}

fn source_range(source: &[Ref], start: u32, length: u32) -> Result<Range<usize>> {
    let start_usize = to_usize(start);
    match start_usize.checked_add(to_usize(length)) {
        Some(end) if end <= source.len() => Ok(start_usize..end),
        _ => {
            let boundary = u32::try_from(source.len())
                .unwrap_or(u32::MAX)
                .saturating_sub(1);
            tracing::debug!(
                offset = start,
                length,
                boundary,
                "out of bounds table source access"
            );
            Err(Error::OutOfBounds {
                offset: start,
                length,
                boundary,
            })
        }
    }
}

#[inline]
fn to_usize(n: u32) -> usize {
    // usize is at least 32 bits on every target we support
    usize::try_from(n).unwrap_or(usize::MAX)
}
