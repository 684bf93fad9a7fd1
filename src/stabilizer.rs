//! Heel stabilization.
//!
//! Pose estimators jitter badly around the feet, which are small, often
//! occluded by the bar and plates, and barely move during a deadlift. While the
//! lifter stands at the top of the lift the heels are usually clearest, so the
//! stabilizer keeps the most confident heel pair seen in that phase and pins
//! both heels to it for every later frame.

use crate::{
    landmarks::{BodyLandmark, LandmarkSet, PixelPoint, RawPose},
    rep_counter::RepState,
};
use log::debug;
use std::borrow::Cow;

/// A frozen heel pair and the confidence that justified it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilizedHeels {
    pub left: PixelPoint,
    pub right: PixelPoint,
    /// Mean visibility of the two heels when the pair was captured
    pub confidence: f32,
}

/// Keeps the best heel pair observed in the `Up` phase for the whole session
#[derive(Debug, Clone, Default)]
pub struct HeelStabilizer {
    stored: Option<StabilizedHeels>,
}

impl HeelStabilizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consider this frame's heels as a new stabilized pair.
    ///
    /// Only frames in the `Up` phase are candidates. The first candidate is
    /// always taken; later ones must have a strictly higher mean visibility.
    /// Returns `true` if the stored pair was replaced.
    pub fn observe(&mut self, landmarks: &LandmarkSet, pose: &RawPose, state: RepState) -> bool {
        if state != RepState::Up {
            return false;
        }

        let (Some(left), Some(right)) = (
            landmarks.get(BodyLandmark::LeftHeel),
            landmarks.get(BodyLandmark::RightHeel),
        ) else {
            return false;
        };
        let (Some(left_vis), Some(right_vis)) = (
            pose.visibility(BodyLandmark::LeftHeel),
            pose.visibility(BodyLandmark::RightHeel),
        ) else {
            return false;
        };

        let confidence = (left_vis + right_vis) / 2.0;
        let better = self.stored.map_or(true, |heels| confidence > heels.confidence);
        if better {
            debug!("Stabilized heels at {left:?} / {right:?} (confidence {confidence:.3})");
            self.stored = Some(StabilizedHeels {
                left,
                right,
                confidence,
            });
        }
        better
    }

    /// Pin the heels of `landmarks` to the stored pair, if there is one
    #[must_use]
    pub fn apply<'a>(&self, landmarks: &'a LandmarkSet) -> Cow<'a, LandmarkSet> {
        match self.stored {
            Some(heels) => {
                let mut pinned = *landmarks;
                pinned.insert(BodyLandmark::LeftHeel, heels.left);
                pinned.insert(BodyLandmark::RightHeel, heels.right);
                Cow::Owned(pinned)
            }
            None => Cow::Borrowed(landmarks),
        }
    }

    /// [`observe`](Self::observe) then [`apply`](Self::apply)
    pub fn stabilize<'a>(
        &mut self,
        landmarks: &'a LandmarkSet,
        pose: &RawPose,
        state: RepState,
    ) -> Cow<'a, LandmarkSet> {
        self.observe(landmarks, pose, state);
        self.apply(landmarks)
    }

    /// Whether heel bones should be left out of the regular skeleton pass
    #[must_use]
    pub fn suppress_heel_connections(&self) -> bool {
        self.stored.is_some()
    }

    #[must_use]
    pub fn heels(&self) -> Option<&StabilizedHeels> {
        self.stored.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::PoseLandmark;

    fn pose_with_heel_visibility(left: f32, right: f32) -> RawPose {
        let mut landmarks = vec![PoseLandmark::default(); 33];
        landmarks[BodyLandmark::LeftHeel.mediapipe_index()].visibility = left;
        landmarks[BodyLandmark::RightHeel.mediapipe_index()].visibility = right;
        RawPose::new(landmarks)
    }

    fn heels_at(left: (i32, i32), right: (i32, i32)) -> LandmarkSet {
        [
            (BodyLandmark::LeftHeel, PixelPoint::new(left.0, left.1)),
            (BodyLandmark::RightHeel, PixelPoint::new(right.0, right.1)),
            (BodyLandmark::LeftKnee, PixelPoint::new(10, 10)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_ignores_non_up_phases() {
        let mut stabilizer = HeelStabilizer::new();
        let landmarks = heels_at((1, 1), (2, 2));
        let pose = pose_with_heel_visibility(0.9, 0.9);

        assert!(!stabilizer.observe(&landmarks, &pose, RepState::Pending));
        assert!(!stabilizer.observe(&landmarks, &pose, RepState::Down));
        assert!(!stabilizer.suppress_heel_connections());
        assert!(matches!(stabilizer.apply(&landmarks), Cow::Borrowed(_)));
    }

    #[test]
    fn test_first_up_frame_is_stored_even_with_zero_confidence() {
        let mut stabilizer = HeelStabilizer::new();
        let pose = pose_with_heel_visibility(0.0, 0.0);

        assert!(stabilizer.observe(&heels_at((1, 1), (2, 2)), &pose, RepState::Up));
        assert!(stabilizer.suppress_heel_connections());
        assert_eq!(stabilizer.heels().map(|h| h.confidence), Some(0.0));
    }

    #[test]
    fn test_replacement_requires_strictly_higher_confidence() {
        let mut stabilizer = HeelStabilizer::new();
        stabilizer.observe(&heels_at((1, 1), (2, 2)), &pose_with_heel_visibility(0.6, 0.8), RepState::Up);

        // Equal mean (0.7) keeps the original pair
        assert!(!stabilizer.observe(&heels_at((5, 5), (6, 6)), &pose_with_heel_visibility(0.7, 0.7), RepState::Up));
        assert_eq!(stabilizer.heels().map(|h| h.left), Some(PixelPoint::new(1, 1)));

        // Higher mean replaces position and confidence together
        assert!(stabilizer.observe(&heels_at((7, 7), (8, 8)), &pose_with_heel_visibility(0.9, 0.8), RepState::Up));
        let heels = stabilizer.heels().copied().unwrap();
        assert_eq!(heels.left, PixelPoint::new(7, 7));
        assert_eq!(heels.right, PixelPoint::new(8, 8));
        assert!((heels.confidence - 0.85).abs() < 1e-6);
    }

    #[test]
    fn test_apply_pins_heels_without_touching_input() {
        let mut stabilizer = HeelStabilizer::new();
        stabilizer.observe(&heels_at((1, 1), (2, 2)), &pose_with_heel_visibility(0.9, 0.9), RepState::Up);

        let live = heels_at((40, 41), (50, 51));
        let pinned = stabilizer.apply(&live);

        assert_eq!(pinned.get(BodyLandmark::LeftHeel), Some(PixelPoint::new(1, 1)));
        assert_eq!(pinned.get(BodyLandmark::RightHeel), Some(PixelPoint::new(2, 2)));
        assert_eq!(pinned.get(BodyLandmark::LeftKnee), Some(PixelPoint::new(10, 10)));
        assert_eq!(live.get(BodyLandmark::LeftHeel), Some(PixelPoint::new(40, 41)));
    }

    #[test]
    fn test_missing_heel_is_not_a_candidate() {
        let mut stabilizer = HeelStabilizer::new();
        let mut landmarks = heels_at((1, 1), (2, 2));
        landmarks.remove(BodyLandmark::RightHeel);

        assert!(!stabilizer.observe(&landmarks, &pose_with_heel_visibility(0.9, 0.9), RepState::Up));
        assert!(!stabilizer.observe(&heels_at((1, 1), (2, 2)), &RawPose::empty(), RepState::Up));
        assert!(stabilizer.heels().is_none());
    }

    #[test]
    fn test_pinned_heels_fill_missing_entries() {
        let mut stabilizer = HeelStabilizer::new();
        stabilizer.observe(&heels_at((1, 1), (2, 2)), &pose_with_heel_visibility(0.9, 0.9), RepState::Up);

        let empty = LandmarkSet::new();
        let pinned = stabilizer.apply(&empty);
        assert_eq!(pinned.len(), 2);
    }
}
