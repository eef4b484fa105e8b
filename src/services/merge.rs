//! Merging fetched records into persisted collections
//!
//! Stored records always win: a fetched record whose id is already present
//! is dropped, never used to update the stored one. The only in-place change
//! a merge makes is the one-time attendee backfill on appointments.

use std::collections::{HashMap, HashSet};

use crate::models::{AppointmentRecord, Record};

/// Counts reported back to the caller of a merge or import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Records appended to the collection
    pub added: usize,
    /// Stored appointments that received their attendee list
    pub backfilled: usize,
}

/// Result of merging a batch into a collection
#[derive(Debug, Clone)]
pub struct Merged<R> {
    /// The collection to persist: stored records first, then the new ones
    pub records: Vec<R>,
    /// Number of new records at the end of `records`
    pub added: usize,
    /// Positions of stored records changed in place
    pub backfilled: Vec<usize>,
}

impl<R> Merged<R> {
    /// The records this merge appended
    pub fn added_records(&self) -> &[R] {
        &self.records[self.records.len() - self.added..]
    }

    pub fn report(&self) -> MergeReport {
        MergeReport {
            added: self.added,
            backfilled: self.backfilled.len(),
        }
    }
}

/// Append the incoming records whose id is not stored yet
///
/// A new id appearing more than once in `incoming` is appended only the
/// first time.
pub fn append_new<R: Record>(existing: Vec<R>, incoming: Vec<R>) -> Merged<R> {
    let mut seen: HashSet<String> = existing.iter().map(|r| r.id().to_string()).collect();

    let new_records: Vec<R> = incoming
        .into_iter()
        .filter(|r| seen.insert(r.id().to_string()))
        .collect();

    let added = new_records.len();
    let mut records = existing;
    records.extend(new_records);

    Merged {
        records,
        added,
        backfilled: Vec::new(),
    }
}

/// Give every stored appointment lacking attendees the list from the fetch
///
/// The first fetched record with the same id supplies the list; with no
/// match the list is set empty. Records that already have a list, even an
/// empty one, are not touched. Returns the positions that were filled.
pub fn backfill_attendees(
    existing: &mut [AppointmentRecord],
    fetched: &[AppointmentRecord],
) -> Vec<usize> {
    let mut by_id: HashMap<&str, &AppointmentRecord> = HashMap::new();
    for record in fetched {
        by_id.entry(record.id.as_str()).or_insert(record);
    }

    let mut filled = Vec::new();
    for (index, record) in existing.iter_mut().enumerate() {
        if !record.needs_attendees() {
            continue;
        }

        let attendees = by_id
            .get(record.id.as_str())
            .and_then(|fetched| fetched.attendees.clone())
            .unwrap_or_default();
        record.attendees = Some(attendees);
        filled.push(index);
    }

    filled
}

/// Merge a fetched appointment batch into the stored collection
///
/// Backfills stored records first, then appends the fetched records with new
/// ids.
pub fn merge_appointments(
    mut existing: Vec<AppointmentRecord>,
    fetched: Vec<AppointmentRecord>,
) -> Merged<AppointmentRecord> {
    let backfilled = backfill_attendees(&mut existing, &fetched);
    let mut merged = append_new(existing, fetched);
    merged.backfilled = backfilled;
    merged
}
