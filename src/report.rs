//! Final result record of one analysis run. The shape is an internal
//! contract and must stay stable for downstream consumers.

use serde_derive::Serialize;

use crate::stats::{self, SpeedStats};
use crate::track::{Segment, Track};
use crate::tracker::TrackerConfig;

/// Statistics pooled over every track of a run.
#[derive(Serialize, Debug, Clone, Default)]
pub struct RunSummary {
    pub pixel_speed_stats: Option<SpeedStats>,
    pub physical_speed_stats: Option<SpeedStats>,
}

/// Per-track slice of the report.
#[derive(Serialize, Debug, Clone)]
pub struct TrackReport {
    pub id: u64,
    pub class_id: i32,
    pub class_name: String,
    pub sample_count: usize,
    pub speed_px_stats: Option<SpeedStats>,
    pub speed_physical_stats: Option<SpeedStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<Segment>>,
}

impl From<&Track> for TrackReport {
    fn from(t: &Track) -> Self {
        Self {
            id: t.id,
            class_id: t.class,
            class_name: t.class_name.clone(),
            sample_count: t.sample_count(),
            speed_px_stats: stats::summarize(&t.speed_px),
            speed_physical_stats: stats::summarize(&t.speed_physical),
            segments: t.logs_segments().then(|| t.segments.clone()),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct SpeedReport {
    pub video: String,
    pub fps: f32,
    pub pixel_size: f32,
    pub max_distance: f32,
    pub max_age: u32,
    pub summary: RunSummary,
    pub tracks: Vec<TrackReport>,
}

impl SpeedReport {
    /// Assembles the run record from every track the manager retained.
    pub fn new(video: impl Into<String>, fps: f32, config: &TrackerConfig, tracks: &[Track]) -> Self {
        let pixel: Vec<f32> = tracks.iter().flat_map(|t| t.speed_px.iter().copied()).collect();
        let physical: Vec<f32> = tracks
            .iter()
            .flat_map(|t| t.speed_physical.iter().copied())
            .collect();

        Self {
            video: video.into(),
            fps,
            pixel_size: config.pixel_size,
            max_distance: config.max_distance,
            max_age: config.max_age,
            summary: RunSummary {
                pixel_speed_stats: stats::summarize(&pixel),
                physical_speed_stats: stats::summarize(&physical),
            },
            tracks: tracks.iter().map(Into::into).collect(),
        }
    }
}
