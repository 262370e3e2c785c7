use async_trait::async_trait;

use crate::{
    api::{ApiClient, ApiResult},
    error::log_error,
    storage::{LocalStorage, StorageResult},
    video::{TrackerUpdate, VideoProgressTracker},
};

/// Receives the sync requests a tracker produces.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    async fn sync_video(&self, video_id: &str, percentage: f64) -> ApiResult<()>;
}

/// Sends video progress to the API as part of one module's progress.
#[derive(Debug, Clone)]
pub struct ModuleProgressSink {
    client: ApiClient,
    module_id: String,
}

impl ModuleProgressSink {
    pub fn new(client: ApiClient, module_id: &str) -> Self {
        Self {
            client,
            module_id: module_id.to_string(),
        }
    }
}

#[async_trait]
impl ProgressSink for ModuleProgressSink {
    async fn sync_video(&self, video_id: &str, percentage: f64) -> ApiResult<()> {
        self.client
            .progress()
            .sync_video(&self.module_id, video_id, percentage)
            .await
    }
}

/// A tracker wired to a sink. Local state always wins: a failed sync is logged and dropped,
/// the next boundary tries again with the newer value.
#[derive(Debug)]
pub struct TrackedVideo<S: LocalStorage, K: ProgressSink> {
    tracker: VideoProgressTracker<S>,
    sink: K,
}

impl<S: LocalStorage, K: ProgressSink> TrackedVideo<S, K> {
    pub fn new(tracker: VideoProgressTracker<S>, sink: K) -> Self {
        Self { tracker, sink }
    }

    pub fn tracker(&self) -> &VideoProgressTracker<S> {
        &self.tracker
    }

    pub async fn report(&mut self, percentage: f64) -> StorageResult<TrackerUpdate> {
        let update = self.tracker.update(percentage)?;
        self.forward(&update).await;
        Ok(update)
    }

    pub async fn report_playback(&mut self, current_time: f64, duration: f64) -> StorageResult<TrackerUpdate> {
        let update = self.tracker.update_playback(current_time, duration)?;
        self.forward(&update).await;
        Ok(update)
    }

    async fn forward(&self, update: &TrackerUpdate) {
        let Some(sync) = update.sync else {
            return;
        };

        tracing::debug!(
            video_id = self.tracker.video_id(),
            bucket = sync.bucket,
            "syncing video progress"
        );
        if let Err(e) = self
            .sink
            .sync_video(self.tracker.video_id(), sync.percentage)
            .await
        {
            log_error(&e);
        }
    }
}
