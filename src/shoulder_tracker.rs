//! Shoulder bar-path overlay.
//!
//! Traces where the shoulders travel over the session. The deadlift annotator
//! only invokes it once the lifter has reached the bottom position, so the
//! path starts with the first pull.

use crate::{
    canvas::Canvas,
    config::ShoulderTrackConfig,
    landmarks::{BodyLandmark, LandmarkSet, PixelPoint, RawPose},
    processor::VideoProcessor,
    Result,
};
use std::collections::VecDeque;

/// Records shoulder positions and draws their path
pub struct ShoulderTracker {
    config: ShoulderTrackConfig,
    path: VecDeque<PixelPoint>,
}

impl ShoulderTracker {
    #[must_use]
    pub fn new(config: ShoulderTrackConfig) -> Self {
        let capacity = config.max_points;
        Self {
            config,
            path: VecDeque::with_capacity(capacity),
        }
    }

    /// Positions recorded so far, oldest first
    pub fn path(&self) -> impl Iterator<Item = &PixelPoint> {
        self.path.iter()
    }

    fn record(&mut self, point: PixelPoint) {
        if self.path.len() >= self.config.max_points {
            self.path.pop_front();
        }
        self.path.push_back(point);
    }
}

/// Midpoint of both shoulders, or whichever shoulder was detected
#[must_use]
pub fn shoulder_position(landmarks: &LandmarkSet) -> Option<PixelPoint> {
    match (
        landmarks.get(BodyLandmark::LeftShoulder),
        landmarks.get(BodyLandmark::RightShoulder),
    ) {
        (Some(l), Some(r)) => Some(PixelPoint::new((l.x + r.x) / 2, (l.y + r.y) / 2)),
        (one, other) => one.or(other),
    }
}

impl VideoProcessor for ShoulderTracker {
    fn draw(&mut self, canvas: &mut dyn Canvas, landmarks: &LandmarkSet, _pose: &RawPose) -> Result<()> {
        if let Some(point) = shoulder_position(landmarks) {
            self.record(point);
        }

        let color = self.config.color;
        for (from, to) in self.path.iter().zip(self.path.iter().skip(1)) {
            canvas.line(*from, *to, color, self.config.thickness)?;
        }
        if let Some(latest) = self.path.back() {
            canvas.filled_circle(*latest, self.config.marker_radius, color)?;
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "shoulder_track"
    }
}
