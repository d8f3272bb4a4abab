// Copyright 2025 the Billviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Versioned event list used as pipeline input.

use core::sync::atomic::{AtomicU64, Ordering};

use crate::model::Event;

static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(1);

/// Returns a process-unique table id.
pub(crate) fn next_table_id() -> u64 {
    NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed)
}

/// Identity of a table's contents: which table, at which version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TableStamp {
    /// Process-unique table id. Clones get a fresh id.
    pub id: u64,
    /// Version within that table.
    pub version: u64,
}

/// An owned, versioned list of events.
///
/// The [`TableStamp`] is the identity chart views memoize on: the version starts at `1` and is
/// bumped every time the contents change, and every table (including clones) has its own id, so
/// two equal stamps always describe the same rows.
#[derive(Debug)]
pub struct EventTable {
    id: u64,
    version: u64,
    events: Vec<Event>,
}

impl EventTable {
    /// Create a table holding `events` at version `1`.
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            id: next_table_id(),
            version: 1,
            events,
        }
    }

    /// Returns the current version.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns the table id and version.
    pub fn stamp(&self) -> TableStamp {
        TableStamp {
            id: self.id,
            version: self.version,
        }
    }

    /// Returns the events in their original order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns the number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if the table holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Replaces the events and bumps the version.
    pub fn replace(&mut self, events: Vec<Event>) {
        self.events = events;
        self.bump();
    }

    /// Appends events and bumps the version.
    pub fn extend(&mut self, events: impl IntoIterator<Item = Event>) {
        self.events.extend(events);
        self.bump();
    }

    /// Bumps the version without changing the rows.
    pub fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

impl Clone for EventTable {
    fn clone(&self) -> Self {
        Self {
            id: next_table_id(),
            version: self.version,
            events: self.events.clone(),
        }
    }
}

impl Default for EventTable {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<Event>> for EventTable {
    fn from(events: Vec<Event>) -> Self {
        Self::new(events)
    }
}
