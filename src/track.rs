use nalgebra as na;
use serde_derive::{Deserialize, Serialize};

/// Lifecycle state of a track. `Closed` is terminal: the history stays
/// readable for reporting but the track never receives another update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackState {
    Active,
    Stale,
    Closed,
}

/// One per-update speed record, kept only when segment logging is enabled.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start_frame: u64,
    pub end_frame: u64,
    pub speed_px_per_s: f32,
    pub speed_physical_per_s: f32,
}

/// Persistent state of one tracked object.
///
/// Identity and classification are fixed at creation; the speed histories are
/// append-only and ordered by frame index, with the pixel and physical
/// sequences always of equal length.
#[derive(Debug, Clone)]
pub struct Track {
    pub id: u64,
    pub class: i32,
    pub class_name: String,
    pub last_frame: u64,
    pub last_center: na::Point2<f32>,
    pub speed_px: Vec<f32>,
    pub speed_physical: Vec<f32>,
    pub segments: Vec<Segment>,
    pub time_since_update: u32,
    emit_segments: bool,
    closed: bool,
}

impl Track {
    pub fn new(
        id: u64,
        class: i32,
        class_name: String,
        frame_idx: u64,
        center: na::Point2<f32>,
        emit_segments: bool,
    ) -> Self {
        Self {
            id,
            class,
            class_name,
            last_frame: frame_idx,
            last_center: center,
            speed_px: Vec::new(),
            speed_physical: Vec::new(),
            segments: Vec::new(),
            time_since_update: 0,
            emit_segments,
            closed: false,
        }
    }

    /// Folds a matched detection center into the track.
    ///
    /// The frame delta is clamped to a floor of 1: a duplicate or out-of-order
    /// frame index misestimates speed slightly instead of zeroing the divisor.
    pub fn update(&mut self, frame_idx: u64, center: na::Point2<f32>, fps: f32, pixel_size: f32) {
        let dt = frame_idx.saturating_sub(self.last_frame).max(1) as f32;
        let distance = na::distance(&self.last_center, &center);
        let speed_px = distance * fps / dt;
        let speed_physical = speed_px * pixel_size;

        if self.emit_segments {
            self.segments.push(Segment {
                start_frame: self.last_frame,
                end_frame: frame_idx,
                speed_px_per_s: speed_px,
                speed_physical_per_s: speed_physical,
            });
        }

        self.speed_px.push(speed_px);
        self.speed_physical.push(speed_physical);
        self.last_frame = frame_idx;
        self.last_center = center;
        self.time_since_update = 0;
    }

    /// Marks one frame that passed without a matching detection.
    #[inline]
    pub fn age(&mut self) {
        self.time_since_update += 1;
    }

    /// Terminal transition; idempotent.
    #[inline]
    pub fn close(&mut self) {
        self.closed = true;
    }

    #[inline]
    pub fn state(&self) -> TrackState {
        if self.closed {
            TrackState::Closed
        } else if self.time_since_update == 0 {
            TrackState::Active
        } else {
            TrackState::Stale
        }
    }

    #[inline]
    pub fn sample_count(&self) -> usize {
        self.speed_px.len()
    }

    #[inline]
    pub fn logs_segments(&self) -> bool {
        self.emit_segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track_at(x: f32, y: f32, emit_segments: bool) -> Track {
        Track::new(0, 1, "cell".into(), 0, na::Point2::new(x, y), emit_segments)
    }

    #[test]
    fn update_computes_pixel_and_physical_speed() {
        let mut track = track_at(0.0, 0.0, false);

        // 20 px in one frame at 30 fps, 0.5 units per px
        track.update(1, na::Point2::new(20.0, 0.0), 30.0, 0.5);

        assert_eq!(track.speed_px, vec![600.0]);
        assert_eq!(track.speed_physical, vec![300.0]);
        assert_eq!(track.last_frame, 1);
        assert_eq!(track.last_center, na::Point2::new(20.0, 0.0));
    }

    #[test]
    fn frame_gap_divides_speed() {
        let mut track = track_at(0.0, 0.0, false);

        // same displacement over 4 frames
        track.update(4, na::Point2::new(20.0, 0.0), 30.0, 1.0);

        assert_eq!(track.speed_px, vec![150.0]);
    }

    #[test]
    fn duplicate_frame_index_clamps_delta() {
        let mut track = track_at(0.0, 0.0, false);
        track.update(0, na::Point2::new(10.0, 0.0), 30.0, 1.0);

        assert_eq!(track.speed_px, vec![300.0]);

        // out-of-order index does not panic or divide by zero either
        track.update(5, na::Point2::new(20.0, 0.0), 30.0, 1.0);
        track.update(3, na::Point2::new(30.0, 0.0), 30.0, 1.0);
        assert_eq!(track.speed_px.len(), 3);
        assert!(track.speed_px.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn segments_record_frame_span() {
        let mut track = track_at(0.0, 0.0, true);
        track.update(2, na::Point2::new(6.0, 8.0), 10.0, 2.0);

        assert_eq!(track.segments.len(), 1);
        let seg = track.segments[0];
        assert_eq!(seg.start_frame, 0);
        assert_eq!(seg.end_frame, 2);
        assert_eq!(seg.speed_px_per_s, 50.0);
        assert_eq!(seg.speed_physical_per_s, 100.0);
    }

    #[test]
    fn segments_stay_empty_when_disabled() {
        let mut track = track_at(0.0, 0.0, false);
        track.update(1, na::Point2::new(5.0, 0.0), 30.0, 1.0);

        assert!(track.segments.is_empty());
        assert_eq!(track.sample_count(), 1);
    }

    #[test]
    fn state_follows_staleness() {
        let mut track = track_at(0.0, 0.0, false);
        assert_eq!(track.state(), TrackState::Active);

        track.age();
        assert_eq!(track.time_since_update, 1);
        assert_eq!(track.state(), TrackState::Stale);

        track.update(2, na::Point2::new(1.0, 0.0), 30.0, 1.0);
        assert_eq!(track.time_since_update, 0);
        assert_eq!(track.state(), TrackState::Active);

        track.close();
        assert_eq!(track.state(), TrackState::Closed);
    }

    #[test]
    fn histories_stay_parallel() {
        let mut track = track_at(0.0, 0.0, false);
        for i in 1..=5 {
            track.update(i, na::Point2::new(i as f32 * 3.0, 0.0), 25.0, 0.25);
        }

        assert_eq!(track.speed_px.len(), track.speed_physical.len());
        for (px, phys) in track.speed_px.iter().zip(&track.speed_physical) {
            assert!((phys - px * 0.25).abs() < 1e-4);
        }
    }
}
