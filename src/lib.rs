pub mod detection;
pub mod detector;
pub mod error;
pub mod frame;
pub mod matching;
pub mod report;
pub mod stats;
pub mod tracker;

mod track;

pub use detection::Detection;
pub use detector::{Detector, VideoSource};
pub use error::Error;
pub use frame::Frame;
pub use report::{RunSummary, SpeedReport, TrackReport};
pub use stats::SpeedStats;
pub use track::{Segment, Track, TrackState};
pub use tracker::{TrackManager, TrackerConfig};

use std::sync::Mutex;

use tracing::warn;

/// Substitute frame rate when the source reports none; speed stays
/// computable, only less accurate.
pub const DEFAULT_FPS: f32 = 30.0;

/// Run-level entry point: one detector, one configuration, any number of
/// sequential analysis runs.
///
/// The detector sits behind a mutex because the underlying compute context
/// does not tolerate concurrent inference; a second `run` against the same
/// analyzer blocks until the first completes.
pub struct SpeedAnalyzer<D> {
    detector: Mutex<D>,
    config: TrackerConfig,
}

impl<D: Detector> SpeedAnalyzer<D> {
    pub fn new(detector: D, config: TrackerConfig) -> Self {
        Self {
            detector: Mutex::new(detector),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Consumes `source` frame by frame and returns the speed report.
    ///
    /// Detector and decode failures abort the run; there is no partial
    /// recovery and no cancellation of a run already in flight.
    pub fn run<S>(&self, source: &mut S) -> Result<SpeedReport, Error>
    where
        S: VideoSource<Frame = D::Frame>,
    {
        let mut detector = self
            .detector
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let fps = match source.fps() {
            Some(fps) if fps.is_finite() && fps > 0.0 => fps,
            _ => {
                warn!("source reports no usable fps, assuming {DEFAULT_FPS}");
                DEFAULT_FPS
            }
        };

        let mut manager = TrackManager::new(
            self.config.clone(),
            detector.class_names().to_vec(),
            fps,
        );

        let mut index: u64 = 0;
        while let Some(frame) = source.next_frame()? {
            let detections = detector.detect(&frame)?;
            manager.step(&Frame::new(index, detections));
            index += 1;
        }

        let tracks = manager.finish();
        Ok(SpeedReport::new(source.path(), fps, &self.config, &tracks))
    }
}
