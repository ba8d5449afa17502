use crate::detection::Detection;
use crate::error::Error;

/// Per-frame object detector.
///
/// Implementations own the inference backend; the tracking side only sees
/// the boxes that come out of it. Running two detections concurrently
/// against one backend is not supported, which is why [`crate::SpeedAnalyzer`]
/// serializes whole runs.
pub trait Detector {
    /// Decoded frame type shared with the [`VideoSource`] feeding this detector.
    type Frame;

    /// Detects every object in a single frame.
    fn detect(&mut self, frame: &Self::Frame) -> Result<Vec<Detection>, Error>;

    /// Class label table, indexed by class id.
    fn class_names(&self) -> &[String];
}

/// Ordered, finite sequence of decoded video frames.
pub trait VideoSource {
    type Frame;

    /// Nominal frame rate, if the container reports one.
    fn fps(&self) -> Option<f32>;

    /// Next frame in stream order, `None` once the source is exhausted.
    fn next_frame(&mut self) -> Result<Option<Self::Frame>, Error>;

    /// Identifier of the stream, echoed into the final report.
    fn path(&self) -> &str;
}
