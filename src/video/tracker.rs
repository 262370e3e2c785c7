use crate::storage::{LocalStorage, StorageResult};

/// Smallest change in percent that is worth storing.
pub const DEBOUNCE_DELTA: f64 = 0.5;

const SYNC_BUCKET: f64 = 10.0;
const MAX_BUCKET: u8 = 10;

pub fn progress_key(video_id: &str, student_id: &str) -> String {
    format!("video-progress-{video_id}-{student_id}")
}

pub fn completed_key(video_id: &str, student_id: &str) -> String {
    format!("video-completed-{video_id}-{student_id}")
}

/// Percentage watched for a playback position, clamped to `0..=100`.
///
/// `None` when the duration is not known yet (zero, negative, NaN or infinite).
pub fn percent_from_playback(current_time: f64, duration: f64) -> Option<f64> {
    if !duration.is_finite() || duration <= 0.0 || !current_time.is_finite() {
        return None;
    }

    Some((100.0 * current_time / duration).clamp(0.0, 100.0))
}

fn bucket_of(percentage: f64) -> u8 {
    ((percentage / SYNC_BUCKET).floor() as u8).min(MAX_BUCKET)
}

/// A 10% boundary was crossed; the server should hear about it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncRequest {
    /// Highest boundary crossed, `0..=10` in tens of percent.
    pub bucket: u8,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrackerUpdate {
    pub accepted: bool,
    pub completed_now: bool,
    pub sync: Option<SyncRequest>,
}

type ProgressCallback = Box<dyn FnMut(f64) + Send>;
type CompleteCallback = Box<dyn FnMut() + Send>;

/// Tracks how much of one video one student has watched.
///
/// The last accepted percentage and the completion flag live in storage under
/// [`progress_key`] and [`completed_key`], so a new tracker for the same pair picks up where the
/// previous one stopped and never reports completion twice.
pub struct VideoProgressTracker<S: LocalStorage> {
    video_id: String,
    student_id: String,
    storage: S,
    progress: f64,
    completed: bool,
    synced_bucket: u8,
    on_progress: Option<ProgressCallback>,
    on_complete: Option<CompleteCallback>,
}

impl<S: LocalStorage> std::fmt::Debug for VideoProgressTracker<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoProgressTracker")
            .field("video_id", &self.video_id)
            .field("student_id", &self.student_id)
            .field("progress", &self.progress)
            .field("completed", &self.completed)
            .field("synced_bucket", &self.synced_bucket)
            .finish_non_exhaustive()
    }
}

impl<S: LocalStorage> VideoProgressTracker<S> {
    /// Restores the stored state for `(video_id, student_id)`.
    pub fn new(video_id: &str, student_id: &str, storage: S) -> StorageResult<Self> {
        let stored = storage.get_item(&progress_key(video_id, student_id))?;
        let progress = match stored.as_deref().map(str::parse::<f64>) {
            Some(Ok(value)) if value.is_finite() => value.clamp(0.0, 100.0),
            Some(_) => {
                tracing::warn!(video_id, "ignoring unreadable stored video progress");
                0.0
            }
            None => 0.0,
        };

        let completed = storage
            .get_item(&completed_key(video_id, student_id))?
            .is_some_and(|flag| flag == "true");

        Ok(Self {
            video_id: video_id.to_string(),
            student_id: student_id.to_string(),
            storage,
            progress,
            completed,
            synced_bucket: bucket_of(progress),
            on_progress: None,
            on_complete: None,
        })
    }

    pub fn with_on_progress<F>(mut self, f: F) -> Self
    where
        F: FnMut(f64) + Send + 'static,
    {
        self.on_progress = Some(Box::new(f));
        self
    }

    pub fn with_on_complete<F>(mut self, f: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Feeds one percentage, typically from a media `timeupdate` event.
    ///
    /// Changes under [`DEBOUNCE_DELTA`] are dropped, except the first 100 which always gets
    /// through so the completion latch cannot be skipped. Sync requests come from bucket
    /// crossings, so jumping over a boundary still reports it and rewinding never does.
    #[tracing::instrument(level = "trace", skip(self), fields(video_id = %self.video_id))]
    pub fn update(&mut self, percentage: f64) -> StorageResult<TrackerUpdate> {
        if !percentage.is_finite() {
            return Ok(TrackerUpdate::default());
        }

        let value = percentage.clamp(0.0, 100.0);
        let completing = value >= 100.0 && !self.completed;
        if (value - self.progress).abs() < DEBOUNCE_DELTA && !completing {
            return Ok(TrackerUpdate::default());
        }

        self.storage.set_item(
            &progress_key(&self.video_id, &self.student_id),
            &value.to_string(),
        )?;
        self.progress = value;

        if let Some(on_progress) = self.on_progress.as_mut() {
            on_progress(value);
        }

        let mut update = TrackerUpdate {
            accepted: true,
            ..Default::default()
        };

        if completing {
            self.storage
                .set_item(&completed_key(&self.video_id, &self.student_id), "true")?;
            self.completed = true;
            update.completed_now = true;
            tracing::debug!("video completed");

            if let Some(on_complete) = self.on_complete.as_mut() {
                on_complete();
            }
        }

        let bucket = bucket_of(value);
        if bucket > self.synced_bucket {
            self.synced_bucket = bucket;
            update.sync = Some(SyncRequest {
                bucket,
                percentage: value,
            });
        }

        Ok(update)
    }

    pub fn update_playback(&mut self, current_time: f64, duration: f64) -> StorageResult<TrackerUpdate> {
        match percent_from_playback(current_time, duration) {
            Some(percentage) => self.update(percentage),
            None => Ok(TrackerUpdate::default()),
        }
    }

    /// Forgets everything stored for this pair, completion included.
    pub fn reset(&mut self) -> StorageResult<()> {
        self.storage
            .remove_item(&progress_key(&self.video_id, &self.student_id))?;
        self.storage
            .remove_item(&completed_key(&self.video_id, &self.student_id))?;
        self.progress = 0.0;
        self.completed = false;
        self.synced_bucket = 0;
        Ok(())
    }
}
