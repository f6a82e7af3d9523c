use reftable::{Error, ExternIndex, FuncIndex, Limits, Ref, RefType, Table, TableType};

fn func(n: u32) -> Ref {
    Ref::Func(FuncIndex::from_u32(n))
}

fn funcref_table(min: u32, max: Option<u32>) -> Table {
    Table::new(TableType::new(RefType::Func, Limits::new(min, max))).unwrap()
}

fn oob(offset: u32, length: u32, boundary: u32) -> Error {
    Error::OutOfBounds {
        offset,
        length,
        boundary,
    }
}

#[test_log::test]
fn grow_up_to_max() {
    let mut table = funcref_table(2, Some(4));

    assert_eq!(table.grow(2, Ref::Null).unwrap(), 2);
    assert_eq!(table.size(), 4);

    assert_eq!(
        table.grow(1, Ref::Null),
        Err(Error::CapacityExceeded {
            requested: 1,
            size: 4,
            ceiling: 4
        })
    );
    assert_eq!(table.size(), 4);
}

#[test_log::test]
fn grow_by_zero_is_a_noop() {
    let mut table = funcref_table(3, Some(3));
    assert_eq!(table.grow(0, func(1)).unwrap(), 3);
    assert_eq!(table.size(), 3);
    assert_eq!(table.read_slice(0, 3).unwrap(), &[Ref::Null; 3]);
}

#[test_log::test]
fn grow_fills_new_slots() {
    let mut table = funcref_table(1, None);
    table.set(0, func(9)).unwrap();

    let old = table.size();
    table.grow(3, func(4)).unwrap();
    assert_eq!(table.size(), old + 3);
    assert_eq!(table.read_slice(0, 4).unwrap(), &[func(9), func(4), func(4), func(4)]);

    table.grow(2, Ref::default()).unwrap();
    assert_eq!(table.read_slice(4, 2).unwrap(), &[Ref::Null, Ref::Null]);
}

#[test_log::test]
fn size_is_monotonic() {
    let mut table = funcref_table(1, Some(6));
    let mut last = table.size();

    let mut check = |table: &Table| {
        assert!(table.size() >= last);
        assert!(table.size() <= 6);
        last = table.size();
    };

    table.grow(2, Ref::Null).unwrap();
    check(&table);
    let _ = table.grow(10, Ref::Null);
    check(&table);
    let _ = table.fill(func(1), 0, 100);
    check(&table);
    table.fill(func(1), 0, 3).unwrap();
    check(&table);
    let _ = table.set(5, func(2));
    check(&table);
    table.grow(3, Ref::Null).unwrap();
    check(&table);
    let _ = table.grow(1, Ref::Null);
    check(&table);
}

#[test_log::test]
fn out_of_bounds_reports_boundary() {
    let mut table = funcref_table(4, None);

    assert_eq!(table.get(10), Err(oob(10, 1, 3)));
    assert_eq!(table.set(4, func(0)), Err(oob(4, 1, 3)));
    assert_eq!(table.read_slice(3, 2), Err(oob(3, 2, 3)));
    assert_eq!(table.fill(func(0), 1, 4), Err(oob(1, 4, 3)));
    assert_eq!(table.write_slice(&[func(0); 8], 2, 0, 3), Err(oob(2, 3, 3)));
    assert_eq!(table.read_slice(u32::MAX, 2), Err(oob(u32::MAX, 2, 3)));

    let empty = funcref_table(0, None);
    assert_eq!(empty.get(0), Err(oob(0, 1, 0)));
    assert_eq!(empty.read_slice(0, 1), Err(oob(0, 1, 0)));
}

#[test_log::test]
fn last_index_is_accessible() {
    let mut table = funcref_table(4, None);
    let last = table.size() - 1;

    table.set(last, func(3)).unwrap();
    assert_eq!(table.get(last).unwrap(), func(3));

    assert!(table.get(table.size()).is_err());
    assert!(table.set(table.size(), func(3)).is_err());
}

#[test_log::test]
fn failed_operations_do_not_mutate() {
    let mut table = funcref_table(3, None);
    table.fill(func(1), 0, 3).unwrap();

    assert!(table.fill(func(2), 1, 3).is_err());
    assert!(table.write_slice(&[func(2); 2], 2, 0, 2).is_err());
    assert!(table.write_slice(&[func(2); 2], 0, 1, 2).is_err());
    assert_eq!(table.read_slice(0, 3).unwrap(), &[func(1); 3]);
}

#[test_log::test]
fn fill_with_zero_length_at_end() {
    let mut table = funcref_table(4, None);
    table.fill(func(1), table.size(), 0).unwrap();
    assert_eq!(table.read_slice(0, 4).unwrap(), &[Ref::Null; 4]);

    // one past the end is still out of bounds
    assert_eq!(table.fill(func(1), 5, 0), Err(oob(5, 0, 3)));
}

#[test_log::test]
fn fill_then_read() {
    let mut table = funcref_table(4, None);
    let v = func(42);

    table.fill(v, 0, 2).unwrap();
    assert_eq!(table.read_slice(0, 2).unwrap(), &[v, v]);
    assert_eq!(table.read_slice(2, 2).unwrap(), &[Ref::Null, Ref::Null]);
}

#[test_log::test]
fn write_slice_from_source() {
    let mut table = funcref_table(4, None);
    let old0 = func(100);
    let old3 = func(103);
    table.set(0, old0).unwrap();
    table.set(3, old3).unwrap();

    let (a, b, c) = (func(1), func(2), func(3));
    table.write_slice(&[a, b, c], 1, 1, 2).unwrap();

    assert_eq!(table.read_slice(0, 4).unwrap(), &[old0, b, c, old3]);
}

#[test_log::test]
fn write_slice_reports_source_boundary() {
    let mut table = funcref_table(8, None);
    let source = [func(1), func(2), func(3)];

    // destination range is fine, source range is not
    assert_eq!(table.write_slice(&source, 0, 2, 2), Err(oob(2, 2, 2)));
    assert_eq!(table.write_slice(&[], 0, 0, 1), Err(oob(0, 1, 0)));

    // destination is checked first
    assert_eq!(table.write_slice(&source, 7, 2, 2), Err(oob(7, 2, 7)));
}

#[test_log::test]
fn queries() {
    let mut table = Table::new(TableType::new(RefType::Extern, Limits::new(2, Some(5)))).unwrap();
    assert_eq!(table.element_type(), RefType::Extern);
    assert!(table.has_max());
    assert_eq!(table.max(), Some(5));
    assert_eq!(table.min(), 2);

    table.grow(1, Ref::Extern(ExternIndex::from_u32(0))).unwrap();
    // the committed minimum follows the current size, the declared one stays
    assert_eq!(table.min(), 3);
    assert_eq!(table.ty().limits.min, 2);
    assert_eq!(table.boundary_index(), 2);

    let unbounded = funcref_table(0, None);
    assert!(!unbounded.has_max());
    assert_eq!(unbounded.max(), None);
}

#[test_log::test]
fn read_slice_is_a_view() -> anyhow::Result<()> {
    let mut table = funcref_table(4, None);
    table.fill(func(5), 1, 2)?;

    let view = table.read_slice(1, 2)?;
    assert_eq!(view.len(), 2);
    assert!(view.iter().all(|r| *r == func(5)));

    assert!(table.read_slice(4, 0)?.is_empty());
    Ok(())
}
