//! Body landmarks: the internal point enumeration, raw pose observations and
//! per-frame pixel landmark sets.
//!
//! The pose collaborator speaks MediaPipe's 33-point indexing. Everything past
//! [`LandmarkSet::from_pose`] uses [`BodyLandmark`] instead, so the rest of the
//! crate never depends on the collaborator's numbering.

use crate::{geometry::Coordinates, utils::safe_cast::f64_to_i32};
use log::debug;
use serde::{Deserialize, Serialize};

/// Named body points used by the deadlift analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyLandmark {
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftHeel,
    RightHeel,
}

impl BodyLandmark {
    /// Number of named landmarks
    pub const COUNT: usize = 14;

    /// Every landmark, in slot order
    pub const ALL: [BodyLandmark; Self::COUNT] = [
        Self::LeftEar,
        Self::RightEar,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftHeel,
        Self::RightHeel,
    ];

    /// Index of this landmark in a MediaPipe pose
    #[must_use]
    pub const fn mediapipe_index(self) -> usize {
        match self {
            Self::LeftEar => 7,
            Self::RightEar => 8,
            Self::LeftShoulder => 11,
            Self::RightShoulder => 12,
            Self::LeftElbow => 13,
            Self::RightElbow => 14,
            Self::LeftWrist => 15,
            Self::RightWrist => 16,
            Self::LeftHip => 23,
            Self::RightHip => 24,
            Self::LeftKnee => 25,
            Self::RightKnee => 26,
            Self::LeftHeel => 29,
            Self::RightHeel => 30,
        }
    }

    /// Inverse of [`BodyLandmark::mediapipe_index`]
    #[must_use]
    pub fn from_mediapipe_index(index: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|lm| lm.mediapipe_index() == index)
    }

    /// Whether this is one of the two heel points
    #[must_use]
    pub const fn is_heel(self) -> bool {
        matches!(self, Self::LeftHeel | Self::RightHeel)
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

/// Skeleton drawn over the lifter, as pairs of landmarks
pub const BONE_CONNECTIONS: [(BodyLandmark, BodyLandmark); 15] = [
    (BodyLandmark::LeftKnee, BodyLandmark::LeftHip),
    (BodyLandmark::RightKnee, BodyLandmark::RightHip),
    (BodyLandmark::LeftHeel, BodyLandmark::LeftKnee),
    (BodyLandmark::RightHeel, BodyLandmark::RightKnee),
    (BodyLandmark::LeftHip, BodyLandmark::RightHip),
    (BodyLandmark::LeftHip, BodyLandmark::LeftShoulder),
    (BodyLandmark::RightHip, BodyLandmark::RightShoulder),
    (BodyLandmark::LeftShoulder, BodyLandmark::RightShoulder),
    (BodyLandmark::LeftShoulder, BodyLandmark::LeftElbow),
    (BodyLandmark::LeftShoulder, BodyLandmark::LeftEar),
    (BodyLandmark::LeftElbow, BodyLandmark::LeftWrist),
    (BodyLandmark::RightShoulder, BodyLandmark::RightElbow),
    (BodyLandmark::RightShoulder, BodyLandmark::RightEar),
    (BodyLandmark::LeftEar, BodyLandmark::RightEar),
    (BodyLandmark::RightElbow, BodyLandmark::RightWrist),
];

/// Integer pixel position in a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Coordinates for PixelPoint {
    fn x(&self) -> f64 {
        f64::from(self.x)
    }

    fn y(&self) -> f64 {
        f64::from(self.y)
    }
}

impl From<PixelPoint> for opencv::core::Point {
    fn from(p: PixelPoint) -> Self {
        opencv::core::Point::new(p.x, p.y)
    }
}

/// One landmark as reported by the pose collaborator
///
/// `x` and `y` are normalized to the frame size; `z` is relative depth.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseLandmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default)]
    pub visibility: f32,
}

impl Coordinates for PoseLandmark {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

/// Raw pose output for one frame, in the collaborator's own indexing
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPose {
    landmarks: Vec<PoseLandmark>,
}

impl RawPose {
    #[must_use]
    pub fn new(landmarks: Vec<PoseLandmark>) -> Self {
        Self { landmarks }
    }

    /// A pose with no detected landmarks
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    #[must_use]
    pub fn get(&self, landmark: BodyLandmark) -> Option<&PoseLandmark> {
        self.landmarks.get(landmark.mediapipe_index())
    }

    /// Visibility score of a named landmark, if the collaborator reported it
    #[must_use]
    pub fn visibility(&self, landmark: BodyLandmark) -> Option<f32> {
        self.get(landmark).map(|lm| lm.visibility)
    }

    pub fn landmarks(&self) -> &[PoseLandmark] {
        &self.landmarks
    }
}

/// Pixel positions of the named landmarks detected in one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LandmarkSet {
    points: [Option<PixelPoint>; BodyLandmark::COUNT],
}

impl LandmarkSet {
    /// An empty set (no landmark detected)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adapt a raw pose into pixel coordinates for a `width` x `height` frame.
    ///
    /// Landmarks the pose does not report, or whose coordinates cannot be
    /// represented as pixels, are left absent.
    #[must_use]
    pub fn from_pose(pose: &RawPose, width: i32, height: i32) -> Self {
        let mut set = Self::new();
        for landmark in BodyLandmark::ALL {
            let Some(raw) = pose.get(landmark) else {
                continue;
            };
            match (
                f64_to_i32(raw.x * f64::from(width)),
                f64_to_i32(raw.y * f64::from(height)),
            ) {
                (Ok(x), Ok(y)) => set.insert(landmark, PixelPoint::new(x, y)),
                _ => debug!("Dropping {landmark:?}: ({}, {}) is not a pixel position", raw.x, raw.y),
            }
        }
        set
    }

    #[must_use]
    pub fn get(&self, landmark: BodyLandmark) -> Option<PixelPoint> {
        self.points[landmark.slot()]
    }

    pub fn insert(&mut self, landmark: BodyLandmark, point: PixelPoint) {
        self.points[landmark.slot()] = Some(point);
    }

    pub fn remove(&mut self, landmark: BodyLandmark) -> Option<PixelPoint> {
        self.points[landmark.slot()].take()
    }

    #[must_use]
    pub fn contains(&self, landmark: BodyLandmark) -> bool {
        self.get(landmark).is_some()
    }

    /// Number of detected landmarks
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.iter().flatten().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Detected landmarks with their positions
    pub fn iter(&self) -> impl Iterator<Item = (BodyLandmark, PixelPoint)> + '_ {
        BodyLandmark::ALL
            .into_iter()
            .filter_map(|lm| self.get(lm).map(|p| (lm, p)))
    }
}

impl FromIterator<(BodyLandmark, PixelPoint)> for LandmarkSet {
    fn from_iter<I: IntoIterator<Item = (BodyLandmark, PixelPoint)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (landmark, point) in iter {
            set.insert(landmark, point);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NUM_POSE_LANDMARKS;

    fn full_pose() -> RawPose {
        RawPose::new(
            (0..NUM_POSE_LANDMARKS)
                .map(|i| PoseLandmark {
                    x: i as f64 / 100.0,
                    y: 0.5,
                    z: 0.0,
                    visibility: 0.9,
                })
                .collect(),
        )
    }

    #[test]
    fn test_mediapipe_index_round_trip() {
        for landmark in BodyLandmark::ALL {
            assert_eq!(BodyLandmark::from_mediapipe_index(landmark.mediapipe_index()), Some(landmark));
        }
        assert_eq!(BodyLandmark::from_mediapipe_index(0), None);
    }

    #[test]
    fn test_slots_follow_all_order() {
        for (i, landmark) in BodyLandmark::ALL.into_iter().enumerate() {
            assert_eq!(landmark.slot(), i);
        }
    }

    #[test]
    fn test_from_pose_scales_to_pixels() {
        let set = LandmarkSet::from_pose(&full_pose(), 200, 100);
        assert_eq!(set.len(), BodyLandmark::COUNT);
        // Left hip is index 23 -> x = 0.23 * 200
        assert_eq!(set.get(BodyLandmark::LeftHip), Some(PixelPoint::new(46, 50)));
    }

    #[test]
    fn test_from_pose_short_pose_leaves_gaps() {
        let mut landmarks = full_pose().landmarks().to_vec();
        landmarks.truncate(25);
        let set = LandmarkSet::from_pose(&RawPose::new(landmarks), 100, 100);

        assert!(set.contains(BodyLandmark::LeftHip));
        assert!(!set.contains(BodyLandmark::RightKnee));
        assert!(!set.contains(BodyLandmark::LeftHeel));
    }

    #[test]
    fn test_from_pose_drops_non_finite() {
        let mut landmarks = full_pose().landmarks().to_vec();
        landmarks[BodyLandmark::LeftKnee.mediapipe_index()].x = f64::NAN;
        let set = LandmarkSet::from_pose(&RawPose::new(landmarks), 100, 100);

        assert!(!set.contains(BodyLandmark::LeftKnee));
        assert!(set.contains(BodyLandmark::RightKnee));
    }

    #[test]
    fn test_visibility_lookup() {
        let pose = full_pose();
        assert_eq!(pose.visibility(BodyLandmark::RightHeel), Some(0.9));
        assert_eq!(RawPose::empty().visibility(BodyLandmark::RightHeel), None);
    }

    #[test]
    fn test_heel_connections() {
        let heel_bones = BONE_CONNECTIONS
            .iter()
            .filter(|(a, b)| a.is_heel() || b.is_heel())
            .count();
        assert_eq!(heel_bones, 2);
    }
}
