//! In-memory clone job registry.
//!
//! One record per requested clone, mutated only through the store so a job
//! always moves processing -> completed or processing -> error, never back.
//! Results live until deleted; a restart clears them.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use sitemirror_core::CloneArtifact;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Processing,
    Completed,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CloneJob {
    pub clone_id: Uuid,
    pub status: JobStatus,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<CloneArtifact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Default)]
pub struct JobStore {
    jobs: RwLock<HashMap<Uuid, CloneJob>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new processing job and return its id.
    pub async fn insert(&self, url: &str) -> Uuid {
        let clone_id = Uuid::new_v4();
        let job = CloneJob {
            clone_id,
            status: JobStatus::Processing,
            url: url.to_string(),
            created_at: Utc::now(),
            completed_at: None,
            artifact: None,
            error: None,
        };
        self.jobs.write().await.insert(clone_id, job);
        clone_id
    }

    pub async fn complete(&self, clone_id: Uuid, artifact: CloneArtifact) {
        if let Some(job) = self.jobs.write().await.get_mut(&clone_id) {
            job.status = JobStatus::Completed;
            job.completed_at = Some(Utc::now());
            job.artifact = Some(artifact);
        }
    }

    pub async fn fail(&self, clone_id: Uuid, error: String) {
        if let Some(job) = self.jobs.write().await.get_mut(&clone_id) {
            job.status = JobStatus::Error;
            job.completed_at = Some(Utc::now());
            job.error = Some(error);
        }
    }

    pub async fn get(&self, clone_id: Uuid) -> Option<CloneJob> {
        self.jobs.read().await.get(&clone_id).cloned()
    }

    pub async fn delete(&self, clone_id: Uuid) -> bool {
        self.jobs.write().await.remove(&clone_id).is_some()
    }

    pub async fn list(&self) -> Vec<CloneJob> {
        let mut jobs: Vec<CloneJob> = self.jobs.read().await.values().cloned().collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        jobs
    }

    pub async fn active_count(&self) -> usize {
        self.jobs
            .read()
            .await
            .values()
            .filter(|job| job.status == JobStatus::Processing)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitemirror_core::CloneMetadata;

    fn artifact() -> CloneArtifact {
        CloneArtifact {
            html: "<html></html>".into(),
            css: String::new(),
            javascript: String::new(),
            metadata: CloneMetadata {
                original_url: "https://example.com".into(),
                title: "Example".into(),
                generated_with: "gemini-2.0-flash".into(),
                has_animations: false,
                has_scripts: false,
                responsive_design: false,
                truncated: false,
            },
        }
    }

    #[tokio::test]
    async fn job_lifecycle_processing_to_completed() {
        let store = JobStore::new();
        let id = store.insert("https://example.com").await;

        let job = store.get(id).await.unwrap();
        assert_eq!(job.status, JobStatus::Processing);
        assert!(job.completed_at.is_none());

        store.complete(id, artifact()).await;
        let job = store.get(id).await.unwrap();
        assert_eq!(job.status, JobStatus::Completed);
        assert!(job.completed_at.is_some());
        assert!(job.artifact.is_some());
        assert!(job.error.is_none());
    }

    #[tokio::test]
    async fn job_lifecycle_processing_to_error() {
        let store = JobStore::new();
        let id = store.insert("https://example.com").await;

        store.fail(id, "Navigation failed: HTTP 404".into()).await;
        let job = store.get(id).await.unwrap();
        assert_eq!(job.status, JobStatus::Error);
        assert_eq!(job.error.as_deref(), Some("Navigation failed: HTTP 404"));
        assert!(job.artifact.is_none());
    }

    #[tokio::test]
    async fn delete_removes_job() {
        let store = JobStore::new();
        let id = store.insert("https://example.com").await;
        assert!(store.delete(id).await);
        assert!(!store.delete(id).await);
        assert!(store.get(id).await.is_none());
    }

    #[tokio::test]
    async fn active_count_tracks_processing_only() {
        let store = JobStore::new();
        let a = store.insert("https://a.example").await;
        let _b = store.insert("https://b.example").await;
        assert_eq!(store.active_count().await, 2);

        store.complete(a, artifact()).await;
        assert_eq!(store.active_count().await, 1);
    }

    #[tokio::test]
    async fn list_newest_first() {
        let store = JobStore::new();
        let first = store.insert("https://first.example").await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = store.insert("https://second.example").await;

        let jobs = store.list().await;
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].clone_id, second);
        assert_eq!(jobs[1].clone_id, first);
    }
}
