//! Deadlift frame annotator.
//!
//! Each frame runs the same fixed sequence:
//!
//! 1. stabilize the heels,
//! 2. draw the skeleton (minus heel bones once the heels are stabilized),
//! 3. draw the stabilized heels,
//! 4. run the secondary overlay once the lift has started,
//! 5. advance the rep counter,
//! 6. render the rep and state labels.
//!
//! Missing landmarks only skip the drawing that needs them.

use crate::{
    canvas::Canvas,
    config::DrawingConfig,
    landmarks::{BodyLandmark, LandmarkSet, PixelPoint, RawPose, BONE_CONNECTIONS},
    processor::{RepSummary, VideoProcessor},
    rep_counter::{RepCounter, RepState},
    stabilizer::HeelStabilizer,
    utils::safe_cast::f64_to_i32,
    Result,
};
use log::debug;

/// Per-session deadlift processor
pub struct DeadliftAnnotator {
    counter: RepCounter,
    stabilizer: HeelStabilizer,
    drawing: DrawingConfig,
    overlay: Box<dyn VideoProcessor>,
}

impl DeadliftAnnotator {
    /// Create an annotator for one video
    ///
    /// `overlay` is drawn on every frame after the first bottom position.
    #[must_use]
    pub fn new(angle_threshold: f64, drawing: DrawingConfig, overlay: Box<dyn VideoProcessor>) -> Self {
        Self {
            counter: RepCounter::new(angle_threshold),
            stabilizer: HeelStabilizer::new(),
            drawing,
            overlay,
        }
    }

    #[must_use]
    pub fn state(&self) -> RepState {
        self.counter.state()
    }

    #[must_use]
    pub fn rep_count(&self) -> u32 {
        self.counter.count()
    }

    #[must_use]
    pub fn stabilizer(&self) -> &HeelStabilizer {
        &self.stabilizer
    }

    fn draw_skeleton(&self, canvas: &mut dyn Canvas, landmarks: &LandmarkSet) -> Result<()> {
        let skip_heels = self.stabilizer.suppress_heel_connections();
        for (start, end) in BONE_CONNECTIONS {
            if skip_heels && (start.is_heel() || end.is_heel()) {
                continue;
            }
            match (landmarks.get(start), landmarks.get(end)) {
                (Some(a), Some(b)) => canvas.line(a, b, self.drawing.line_color, self.drawing.line_thickness)?,
                _ => debug!("Skipping bone {start:?} -> {end:?}: landmark missing"),
            }
        }
        Ok(())
    }

    fn draw_stabilized_heels(&self, canvas: &mut dyn Canvas, landmarks: &LandmarkSet) -> Result<()> {
        let Some(heels) = self.stabilizer.heels() else {
            return Ok(());
        };
        if self.counter.state() != RepState::Up && self.counter.count() == 0 {
            return Ok(());
        }

        let sides = [
            (BodyLandmark::LeftKnee, heels.left),
            (BodyLandmark::RightKnee, heels.right),
        ];
        for (knee, heel) in sides {
            if let Some(knee) = landmarks.get(knee) {
                canvas.line(knee, heel, self.drawing.line_color, self.drawing.line_thickness)?;
            }
        }
        for (_, heel) in sides {
            canvas.filled_circle(heel, self.drawing.heel_marker_radius, self.drawing.heel_marker_color)?;
        }
        Ok(())
    }

    fn render_labels(&self, canvas: &mut dyn Canvas) -> Result<()> {
        let style = self.drawing.label_style();
        let rep_text = format!("Rep: {}", self.counter.count());
        let state_text = format!("State: {}", self.counter.state());

        let (_, rep_height) = canvas.text_size(&rep_text, &style)?;
        let (_, state_height) = canvas.text_size(&state_text, &style)?;
        let (_, frame_height) = canvas.size();

        let top = f64_to_i32(f64::from(frame_height) * self.drawing.label_top_fraction)?;
        let rep_y = top + rep_height;
        let state_y = rep_y + state_height + self.drawing.label_line_spacing;

        let x = self.drawing.label_margin_x;
        canvas.text(&rep_text, PixelPoint::new(x, rep_y), &style)?;
        canvas.text(&state_text, PixelPoint::new(x, state_y), &style)?;
        Ok(())
    }
}

impl VideoProcessor for DeadliftAnnotator {
    fn draw(&mut self, canvas: &mut dyn Canvas, landmarks: &LandmarkSet, pose: &RawPose) -> Result<()> {
        let state = self.counter.state();
        let stabilized = self.stabilizer.stabilize(landmarks, pose, state);

        self.draw_skeleton(canvas, &stabilized)?;
        self.draw_stabilized_heels(canvas, &stabilized)?;

        if state != RepState::Pending {
            self.overlay.draw(canvas, &stabilized, pose)?;
        }

        self.counter.update_from_landmarks(&stabilized);
        self.render_labels(canvas)
    }

    fn name(&self) -> &str {
        "dl"
    }

    fn rep_summary(&self) -> Option<RepSummary> {
        Some(RepSummary {
            reps: self.counter.count(),
            state: self.counter.state(),
        })
    }
}
