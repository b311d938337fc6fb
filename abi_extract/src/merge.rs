use crate::error::{DuplicateFunctionError, Result};
use crate::inspector::Inspector;
use abi_types::{AbiEntry, MergedAbi};
use tracing::debug;

/// Inspect each facet in order and merge their ABIs into one.
///
/// Stops at the first failed inspection or function-name collision; nothing
/// is returned for `name` in that case.
pub fn merge<I, S>(name: &str, units: &[S], inspector: &I) -> Result<MergedAbi>
where
    I: Inspector + ?Sized,
    S: AsRef<str>,
{
    let mut merged = MergedAbi::new(name);
    for unit in units {
        let unit = unit.as_ref();
        let entries = inspector.inspect(unit)?;
        append_unit(&mut merged, unit, entries)?;
    }
    Ok(merged)
}

/// Merge already-inspected entry lists, given as `(unit, entries)` pairs in
/// facet order.
pub fn merge_entries<U, E>(name: &str, units: U) -> Result<MergedAbi>
where
    U: IntoIterator<Item = (String, E)>,
    E: IntoIterator<Item = AbiEntry>,
{
    let mut merged = MergedAbi::new(name);
    for (unit, entries) in units {
        append_unit(&mut merged, &unit, entries)?;
    }
    Ok(merged)
}

fn append_unit<E>(merged: &mut MergedAbi, unit: &str, entries: E) -> Result<()>
where
    E: IntoIterator<Item = AbiEntry>,
{
    let before = merged.len();
    for entry in entries {
        if entry.is_selectors_marker() {
            continue;
        }

        merged.push(unit, entry).map_err(|collision| DuplicateFunctionError {
            contract: merged.name().to_string(),
            name: collision.name,
            first_unit: collision.first_unit,
            second_unit: unit.to_string(),
        })?;
    }

    debug!(
        contract = merged.name(),
        unit,
        added = merged.len() - before,
        "merged unit"
    );
    Ok(())
}
