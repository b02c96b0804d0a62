//! The assignment store: single owner of the in-memory collection.
//!
//! Every mutation writes the full collection through the persistence
//! adapter and, for add/delete, emits a user-facing notification. The
//! persisted copy is a pure serialization of this store's state; nothing
//! else writes to it.

use tracing::warn;

use crate::notify::NotificationSink;
use crate::storage::Storage;
use crate::types::{Assignment, AssignmentDraft};

pub struct AssignmentStore {
    assignments: Vec<Assignment>,
    storage: Storage,
    sink: Box<dyn NotificationSink + Send + Sync>,
}

impl AssignmentStore {
    /// Hydrate a store from the backing storage.
    ///
    /// Malformed persisted data is treated as an empty collection rather
    /// than an error: the UI must stay usable even when the stored payload
    /// cannot be parsed. The recovery is surfaced through the sink.
    pub fn open(storage: Storage, sink: Box<dyn NotificationSink + Send + Sync>) -> Self {
        let assignments = match storage.load() {
            Ok(assignments) => assignments,
            Err(e) => {
                warn!(error = %e, "Could not load saved assignments, starting empty");
                sink.notify(
                    "Assignments could not be loaded",
                    "Saved data was unreadable. Starting with an empty list.",
                );
                Vec::new()
            }
        };

        Self {
            assignments,
            storage,
            sink,
        }
    }

    /// Create an assignment from the draft and append it to the collection.
    ///
    /// Returns the created assignment, with its generated id.
    pub fn add(&mut self, draft: AssignmentDraft) -> Assignment {
        let assignment = Assignment::from_draft(draft);
        self.assignments.push(assignment.clone());
        self.persist();
        self.sink.notify(
            "Assignment added",
            &format!("{} has been added to your homework list.", assignment.name),
        );
        assignment
    }

    /// Flip the completion flag of the assignment with the given id.
    ///
    /// An unknown id is a silent no-op and returns false: the UI may hold a
    /// stale reference to an assignment deleted moments earlier.
    pub fn toggle_complete(&mut self, id: &str) -> bool {
        match self.assignments.iter_mut().find(|a| a.id == id) {
            Some(assignment) => {
                assignment.completed = !assignment.completed;
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Remove the assignment with the given id.
    ///
    /// An unknown id is a silent no-op and returns false.
    pub fn remove(&mut self, id: &str) -> bool {
        let idx = match self.assignments.iter().position(|a| a.id == id) {
            Some(idx) => idx,
            None => return false,
        };

        self.assignments.remove(idx);
        self.persist();
        self.sink
            .notify("Assignment deleted", "The assignment has been removed.");
        true
    }

    /// Current collection, in insertion order.
    ///
    /// Display order is computed separately; see [`crate::view`].
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Write the current collection through the persistence adapter.
    ///
    /// A failed write is logged and surfaced as a notification only; the
    /// in-memory state is already updated and the UI must stay responsive.
    fn persist(&self) {
        if let Err(e) = self.storage.save(&self.assignments) {
            warn!(error = %e, "Failed to persist assignments");
            self.sink.notify(
                "Saving failed",
                "Your latest change could not be written to the local store.",
            );
        }
    }
}
