//! Repetition counting for two-phase (down/up) lifts.
//!
//! The machine is driven by the hip angle on each side of the body, measured
//! between shoulder, hip and knee. A small angle means the lifter is bent over
//! at the bottom of the lift; a large one means they are standing. Both sides
//! must agree before any transition happens, so one noisy limb cannot move the
//! machine on its own.
//!
//! A rep is counted only when the lifter returns to the bottom after having
//! reached the top.

use crate::{
    geometry::angle_between_points,
    landmarks::{BodyLandmark, LandmarkSet},
};
use log::{debug, info};
use std::fmt;

/// Phase of the lift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RepState {
    /// No bottom position seen yet
    #[default]
    Pending,
    /// At or returning to the bottom
    Down,
    /// Standing at the top
    Up,
}

impl RepState {
    /// Lowercase label used on screen and in summaries
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Down => "down",
            Self::Up => "up",
        }
    }
}

impl fmt::Display for RepState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Left and right hip angles for one frame, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HipAngles {
    pub left: f64,
    pub right: f64,
}

impl HipAngles {
    #[must_use]
    pub const fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    /// Measure both hip angles from a frame's landmarks.
    ///
    /// Returns `None` if any shoulder, hip or knee is missing, or if a side's
    /// geometry is degenerate.
    #[must_use]
    pub fn from_landmarks(landmarks: &LandmarkSet) -> Option<Self> {
        let left = side_angle(
            landmarks,
            BodyLandmark::LeftShoulder,
            BodyLandmark::LeftHip,
            BodyLandmark::LeftKnee,
        )?;
        let right = side_angle(
            landmarks,
            BodyLandmark::RightShoulder,
            BodyLandmark::RightHip,
            BodyLandmark::RightKnee,
        )?;
        Some(Self { left, right })
    }

    fn both_below(&self, threshold: f64) -> bool {
        self.left < threshold && self.right < threshold
    }

    fn both_above(&self, threshold: f64) -> bool {
        self.left > threshold && self.right > threshold
    }
}

fn side_angle(
    landmarks: &LandmarkSet,
    shoulder: BodyLandmark,
    hip: BodyLandmark,
    knee: BodyLandmark,
) -> Option<f64> {
    let (s, h, k) = (landmarks.get(shoulder)?, landmarks.get(hip)?, landmarks.get(knee)?);
    match angle_between_points(&s, &h, &k) {
        Ok(angle) => Some(angle),
        Err(e) => {
            debug!("No {hip:?} angle this frame: {e}");
            None
        }
    }
}

/// Next state for one frame's readings, and whether that step completed a rep
#[must_use]
pub fn transition(state: RepState, angles: HipAngles, threshold: f64) -> (RepState, bool) {
    match state {
        RepState::Pending if angles.both_below(threshold) => (RepState::Down, false),
        RepState::Down if angles.both_above(threshold) => (RepState::Up, false),
        RepState::Up if angles.both_below(threshold) => (RepState::Down, true),
        held => (held, false),
    }
}

/// Per-session rep state and count
#[derive(Debug, Clone)]
pub struct RepCounter {
    state: RepState,
    count: u32,
    threshold: f64,
}

impl RepCounter {
    /// Create a counter in the `Pending` state
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            state: RepState::Pending,
            count: 0,
            threshold,
        }
    }

    /// Feed one frame's angles and return the resulting state
    pub fn update(&mut self, angles: HipAngles) -> RepState {
        let (next, completed) = transition(self.state, angles, self.threshold);
        if next != self.state {
            debug!(
                "Rep state {} -> {} (left {:.1}, right {:.1})",
                self.state, next, angles.left, angles.right
            );
        }
        if completed {
            self.count += 1;
            info!("Rep {} completed", self.count);
        }
        self.state = next;
        next
    }

    /// Feed one frame's landmarks; the state holds when no angle can be measured
    pub fn update_from_landmarks(&mut self, landmarks: &LandmarkSet) -> RepState {
        match HipAngles::from_landmarks(landmarks) {
            Some(angles) => self.update(angles),
            None => self.state,
        }
    }

    #[must_use]
    pub fn state(&self) -> RepState {
        self.state
    }

    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for RepCounter {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_ANGLE_THRESHOLD)
    }
}
