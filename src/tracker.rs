//! Per-frame track lifecycle: match existing tracks against the frame's
//! detections, update the matched ones, age the rest, spawn tracks for
//! leftover detections and close tracks that stayed unmatched too long.

use tracing::debug;

use crate::detection::Detection;
use crate::frame::Frame;
use crate::matching::{self, Assignment};
use crate::track::Track;

/// Immutable parameters of one analysis run.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Association gate in pixels; pairs farther apart are never matched.
    pub max_distance: f32,
    /// Frames a track may stay unmatched before it is closed.
    pub max_age: u32,
    /// Physical length of one pixel; 1.0 reports pixel units only.
    pub pixel_size: f32,
    /// Class ids allowed into tracking, `None` for all.
    pub class_filter: Option<Vec<i32>>,
    /// Keep a per-update segment log on every track.
    pub emit_segments: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_distance: 80.0,
            max_age: 5,
            pixel_size: 1.0,
            class_filter: None,
            emit_segments: false,
        }
    }
}

/// Owns every track of one run and drives the frame-by-frame lifecycle.
///
/// Frames must be fed strictly in stream order: the association gate assumes
/// temporal continuity between consecutive frames. Closed tracks are retained
/// for the final report, never deleted. The id counter lives here, scoped to
/// the run.
pub struct TrackManager {
    config: TrackerConfig,
    class_names: Vec<String>,
    fps: f32,
    live: Vec<Track>,
    closed: Vec<Track>,
    next_id: u64,
}

impl TrackManager {
    pub fn new(config: TrackerConfig, class_names: Vec<String>, fps: f32) -> Self {
        Self {
            config,
            class_names,
            fps,
            live: Vec::new(),
            closed: Vec::new(),
            next_id: 0,
        }
    }

    /// Runs the full lifecycle pass for one frame.
    pub fn step(&mut self, frame: &Frame) {
        let detections = self.filtered(frame);

        let Assignment {
            matched,
            unmatched_tracks,
            unmatched_detections,
        } = if self.live.is_empty() || detections.is_empty() {
            Assignment {
                matched: Vec::new(),
                unmatched_tracks: (0..self.live.len()).collect(),
                unmatched_detections: (0..detections.len()).collect(),
            }
        } else {
            let costs = matching::cost_matrix(&self.live, &detections);
            matching::solve(&costs, self.config.max_distance)
        };

        debug!(
            frame = frame.index,
            matched = matched.len(),
            aged = unmatched_tracks.len(),
            spawned = unmatched_detections.len(),
            "frame associated"
        );

        for (t, d) in matched {
            self.live[t].update(
                frame.index,
                detections[d].center(),
                self.fps,
                self.config.pixel_size,
            );
        }

        for t in unmatched_tracks {
            self.live[t].age();
        }

        for d in unmatched_detections {
            self.spawn(frame.index, &detections[d]);
        }

        let max_age = self.config.max_age;
        for mut track in std::mem::take(&mut self.live) {
            if track.time_since_update > max_age {
                track.close();
                self.closed.push(track);
            } else {
                self.live.push(track);
            }
        }
    }

    /// Ends the run: every still-live track is closed and the whole run's
    /// tracks are returned ordered by identity.
    pub fn finish(mut self) -> Vec<Track> {
        for mut track in std::mem::take(&mut self.live) {
            track.close();
            self.closed.push(track);
        }

        let mut tracks = self.closed;
        tracks.sort_by_key(|t| t.id);
        tracks
    }

    #[inline]
    pub fn live(&self) -> &[Track] {
        &self.live
    }

    #[inline]
    pub fn closed(&self) -> &[Track] {
        &self.closed
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    fn filtered(&self, frame: &Frame) -> Vec<Detection> {
        match &self.config.class_filter {
            Some(classes) => frame
                .iter()
                .filter(|d| classes.contains(&d.class))
                .copied()
                .collect(),
            None => frame.detections.to_vec(),
        }
    }

    fn spawn(&mut self, frame_idx: u64, det: &Detection) {
        let class_name = usize::try_from(det.class)
            .ok()
            .and_then(|idx| self.class_names.get(idx))
            .cloned()
            .unwrap_or_else(|| det.class.to_string());

        self.live.push(Track::new(
            self.next_id,
            det.class,
            class_name,
            frame_idx,
            det.center(),
            self.config.emit_segments,
        ));
        self.next_id += 1;
    }
}
