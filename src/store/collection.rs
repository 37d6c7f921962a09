//! Mutex-guarded keyed collection shared by every entity kind.
//!
//! Each collection owns its own lock; no store operation touches two
//! collections, so there is no lock ordering to worry about.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mutex, recovering from poisoning.
pub(crate) fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Slot<T> {
    seq: u64,
    created_at: DateTime<Utc>,
    record: T,
}

struct Inner<T> {
    records: HashMap<String, Slot<T>>,
    next_seq: u64,
    last_stamp: Option<DateTime<Utc>>,
}

impl<T: Clone> Inner<T> {
    fn push(&mut self, build: impl FnOnce(String, DateTime<Utc>) -> T) -> T {
        let mut id = uuid::Uuid::new_v4().to_string();
        while self.records.contains_key(&id) {
            id = uuid::Uuid::new_v4().to_string();
        }

        let now = Utc::now();
        let created_at = match self.last_stamp {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_stamp = Some(created_at);

        let seq = self.next_seq;
        self.next_seq += 1;

        let record = build(id.clone(), created_at);
        self.records.insert(
            id,
            Slot {
                seq,
                created_at,
                record: record.clone(),
            },
        );
        record
    }
}

pub(crate) struct Collection<T> {
    inner: Mutex<Inner<T>>,
}

impl<T: Clone> Collection<T> {
    pub(crate) fn new() -> Self {
        Collection {
            inner: Mutex::new(Inner {
                records: HashMap::new(),
                next_seq: 0,
                last_stamp: None,
            }),
        }
    }

    /// Insert a record built from a fresh id and creation stamp. The stamp is
    /// never earlier than the previous insert into this collection.
    pub(crate) fn insert(&self, build: impl FnOnce(String, DateTime<Utc>) -> T) -> T {
        let mut inner = lock_or_recover(&self.inner);
        inner.push(build)
    }

    /// Like [`Collection::insert`], unless `conflicts` matches a stored record
    /// (checked under the same lock), in which case nothing is inserted.
    pub(crate) fn insert_with(
        &self,
        conflicts: impl Fn(&T) -> bool,
        build: impl FnOnce(String, DateTime<Utc>) -> T,
    ) -> Option<T> {
        let mut inner = lock_or_recover(&self.inner);
        if inner.records.values().any(|slot| conflicts(&slot.record)) {
            return None;
        }
        Some(inner.push(build))
    }

    /// All records, newest first. Records stamped in the same instant keep
    /// reverse insertion order.
    pub(crate) fn list(&self) -> Vec<T> {
        let inner = lock_or_recover(&self.inner);
        let mut slots: Vec<&Slot<T>> = inner.records.values().collect();
        slots.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.seq.cmp(&a.seq))
        });
        slots.into_iter().map(|slot| slot.record.clone()).collect()
    }

    pub(crate) fn get(&self, id: &str) -> Option<T> {
        let inner = lock_or_recover(&self.inner);
        inner.records.get(id).map(|slot| slot.record.clone())
    }

    pub(crate) fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        let inner = lock_or_recover(&self.inner);
        inner
            .records
            .values()
            .find(|slot| predicate(&slot.record))
            .map(|slot| slot.record.clone())
    }

    /// Apply `change` to the record with `id` and return the updated copy.
    pub(crate) fn update(&self, id: &str, change: impl FnOnce(&mut T)) -> Option<T> {
        let mut inner = lock_or_recover(&self.inner);
        let slot = inner.records.get_mut(id)?;
        change(&mut slot.record);
        Some(slot.record.clone())
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        lock_or_recover(&self.inner).records.len()
    }
}
