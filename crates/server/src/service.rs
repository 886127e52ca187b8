// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Record service.
//!
//! Orchestrates the record store and the severity advisor. The store sits
//! behind an async mutex; each operation holds the guard only while its
//! statements run and releases it when the guard drops.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use bt_core::{
    Bug, BugStats, BugUpdate, Database, Error, NewBug, Priority, Result, SeverityAdvisor, Status,
};

/// Shared service state containing the database and advisor.
#[derive(Clone)]
pub struct BugService {
    inner: Arc<BugServiceInner>,
}

struct BugServiceInner {
    /// The record store (one connection, serialized access).
    db: Mutex<Database>,
    /// Consulted once per creation.
    advisor: Arc<dyn SeverityAdvisor>,
}

impl BugService {
    /// Creates a service over an opened database and an advisor.
    pub fn new(db: Database, advisor: Arc<dyn SeverityAdvisor>) -> Self {
        BugService {
            inner: Arc::new(BugServiceInner {
                db: Mutex::new(db),
                advisor,
            }),
        }
    }

    /// Create a bug with status `open` and an advisor-suggested severity.
    ///
    /// The advisor runs before the store is locked.
    pub async fn create(&self, new: NewBug) -> Result<Bug> {
        let severity = self
            .inner
            .advisor
            .suggest(&new.title, &new.description)
            .await;

        let db = self.inner.db.lock().await;
        let bug = db.insert_bug(&new, Some(severity))?;
        info!(
            "created bug {} ({}, {}, suggested {severity})",
            bug.id, bug.priority, bug.bug_type
        );
        Ok(bug)
    }

    /// Get a bug by ID.
    pub async fn get(&self, id: i64) -> Result<Bug> {
        let db = self.inner.db.lock().await;
        db.get_bug(id)?.ok_or(Error::BugNotFound(id))
    }

    /// List bugs matching the optional filters, newest first.
    pub async fn list(&self, status: Option<Status>, priority: Option<Priority>) -> Result<Vec<Bug>> {
        let db = self.inner.db.lock().await;
        db.list_bugs(status, priority)
    }

    /// Apply a partial update. Never consults the advisor.
    pub async fn update(&self, id: i64, update: BugUpdate) -> Result<Bug> {
        let mut db = self.inner.db.lock().await;
        let bug = db
            .apply_partial_update(id, &update)?
            .ok_or(Error::BugNotFound(id))?;
        info!("updated bug {}", bug.id);
        Ok(bug)
    }

    /// Delete a bug.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let db = self.inner.db.lock().await;
        if !db.delete_bug(id)? {
            return Err(Error::BugNotFound(id));
        }
        info!("deleted bug {id}");
        Ok(())
    }

    /// Grouped counts per status, priority, bug type, and sprint.
    pub async fn stats(&self) -> Result<BugStats> {
        let db = self.inner.db.lock().await;
        db.aggregate_counts()
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
