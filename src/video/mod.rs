//! Client-side video progress tracking.

mod tracker;
pub use tracker::{
    DEBOUNCE_DELTA, SyncRequest, TrackerUpdate, VideoProgressTracker, completed_key,
    percent_from_playback, progress_key,
};

mod sync;
pub use sync::{ModuleProgressSink, ProgressSink, TrackedVideo};
