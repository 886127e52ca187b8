// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use async_trait::async_trait;
use bt_core::{BugType, Severity};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Advisor that answers a fixed label and counts how often it was asked.
struct CountingAdvisor {
    answer: Severity,
    calls: AtomicUsize,
}

#[async_trait]
impl SeverityAdvisor for CountingAdvisor {
    async fn suggest(&self, _title: &str, _description: &str) -> Severity {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

fn service(answer: Severity) -> (BugService, Arc<CountingAdvisor>) {
    let advisor = Arc::new(CountingAdvisor {
        answer,
        calls: AtomicUsize::new(0),
    });
    let db = Database::open_in_memory().unwrap();
    (BugService::new(db, advisor.clone()), advisor)
}

fn crash_on_save() -> NewBug {
    NewBug {
        title: "Crash on save".to_string(),
        description: "App crashes when saving a file larger than 1GB".to_string(),
        priority: Priority::High,
        bug_type: BugType::Crash,
        sprint: None,
    }
}

#[tokio::test]
async fn create_defaults_status_and_records_advice() {
    let (svc, advisor) = service(Severity::High);

    let bug = svc.create(crash_on_save()).await.unwrap();

    assert_eq!(bug.status, Status::Open);
    assert_eq!(bug.ai_suggested_severity, Some(Severity::High));
    assert_eq!(advisor.calls.load(Ordering::SeqCst), 1);
    assert_eq!(svc.get(bug.id).await.unwrap(), bug);
}

#[tokio::test]
async fn update_never_consults_advisor() {
    let (svc, advisor) = service(Severity::Low);
    let bug = svc.create(crash_on_save()).await.unwrap();

    let update = BugUpdate {
        title: Some("Crash on save of huge files".to_string()),
        description: Some("Now with more detail".to_string()),
        ..Default::default()
    };
    let updated = svc.update(bug.id, update).await.unwrap();

    assert_eq!(advisor.calls.load(Ordering::SeqCst), 1);
    assert_eq!(updated.ai_suggested_severity, Some(Severity::Low));
    assert_eq!(updated.title, "Crash on save of huge files");
}

#[tokio::test]
async fn update_status_only_keeps_other_fields() {
    let (svc, _) = service(Severity::Medium);
    let bug = svc.create(crash_on_save()).await.unwrap();

    let update = BugUpdate {
        status: Some(Status::Fixed),
        ..Default::default()
    };
    let updated = svc.update(bug.id, update).await.unwrap();

    assert_eq!(updated.status, Status::Fixed);
    assert_eq!(updated.priority, bug.priority);
    assert_eq!(updated.title, bug.title);
    assert_eq!(updated.description, bug.description);
    assert!(updated.updated_at > bug.updated_at);
}

#[tokio::test]
async fn any_status_can_follow_any_other() {
    let (svc, _) = service(Severity::Medium);
    let bug = svc.create(crash_on_save()).await.unwrap();

    for status in [Status::Closed, Status::Open, Status::Fixed, Status::InProgress, Status::Open] {
        let update = BugUpdate {
            status: Some(status),
            ..Default::default()
        };
        assert_eq!(svc.update(bug.id, update).await.unwrap().status, status);
    }
}

#[tokio::test]
async fn missing_ids_are_not_found() {
    let (svc, _) = service(Severity::Medium);

    assert!(matches!(svc.get(999_999).await, Err(Error::BugNotFound(999_999))));
    assert!(matches!(
        svc.update(7, BugUpdate::default()).await,
        Err(Error::BugNotFound(7))
    ));
    assert!(matches!(svc.delete(7).await, Err(Error::BugNotFound(7))));
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let (svc, _) = service(Severity::Medium);
    let bug = svc.create(crash_on_save()).await.unwrap();

    svc.delete(bug.id).await.unwrap();

    assert!(matches!(svc.get(bug.id).await, Err(Error::BugNotFound(_))));
    assert!(matches!(svc.delete(bug.id).await, Err(Error::BugNotFound(_))));
}

#[tokio::test]
async fn list_and_stats_pass_through() {
    let (svc, _) = service(Severity::Medium);
    let first = svc.create(crash_on_save()).await.unwrap();
    let mut sprinted = crash_on_save();
    sprinted.priority = Priority::Low;
    sprinted.sprint = Some("Sprint-1".to_string());
    let second = svc.create(sprinted).await.unwrap();

    let all = svc.list(None, None).await.unwrap();
    assert_eq!(
        all.iter().map(|b| b.id).collect::<Vec<_>>(),
        vec![second.id, first.id]
    );

    let low = svc.list(None, Some(Priority::Low)).await.unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].id, second.id);

    let stats = svc.stats().await.unwrap();
    assert_eq!(stats.status.get("open"), Some(&2));
    assert_eq!(stats.sprint.get("Sprint-1"), Some(&1));
    assert_eq!(stats.sprint.len(), 1);
}

#[tokio::test]
async fn concurrent_creates_get_distinct_ids() {
    let (svc, advisor) = service(Severity::Medium);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let svc = svc.clone();
            tokio::spawn(async move { svc.create(crash_on_save()).await.unwrap().id })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 8);
    assert_eq!(advisor.calls.load(Ordering::SeqCst), 8);
}
