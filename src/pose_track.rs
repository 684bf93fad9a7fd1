//! Pose input.
//!
//! Pose estimation runs outside this crate. Its per-frame output is stored as
//! a JSON Lines pose track: one object per frame,
//!
//! ```json
//! {"frame": 0, "landmarks": [{"x": 0.41, "y": 0.22, "z": -0.1, "visibility": 0.98}, ...]}
//! ```
//!
//! with landmarks in MediaPipe's 33-point order and coordinates normalized to
//! the frame size. Frames with no detected pose are simply absent.

use crate::{constants::NUM_POSE_LANDMARKS, landmarks::RawPose, Error, Result};
use log::{info, warn};
use opencv::core::Mat;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

/// Source of per-frame poses
pub trait PoseEstimator {
    /// Pose for frame number `frame_index`, or `None` if no body was found
    fn estimate(&mut self, frame: &Mat, frame_index: usize) -> Result<Option<RawPose>>;
}

/// One line of a pose track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseFrame {
    pub frame: usize,
    pub landmarks: RawPose,
}

/// Pre-computed poses for a whole video, keyed by frame index
#[derive(Debug, Clone, Default)]
pub struct PoseTrack {
    frames: BTreeMap<usize, RawPose>,
}

impl PoseTrack {
    /// Load a JSON Lines pose track
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a line is not a valid
    /// pose frame, or a frame index appears twice.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading pose track: {}", path.display());
        let track = Self::from_reader(BufReader::new(File::open(path)?))?;
        info!("Pose track has {} frames with a pose", track.len());
        Ok(track)
    }

    /// Parse a JSON Lines pose track from any reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut frames = BTreeMap::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let entry: PoseFrame = serde_json::from_str(&line)
                .map_err(|e| Error::PoseTrack(format!("line {}: {e}", line_no + 1)))?;

            if entry.landmarks.len() != NUM_POSE_LANDMARKS {
                warn!(
                    "Frame {} has {} landmarks, expected {}",
                    entry.frame,
                    entry.landmarks.len(),
                    NUM_POSE_LANDMARKS
                );
            }
            if frames.insert(entry.frame, entry.landmarks).is_some() {
                return Err(Error::PoseTrack(format!(
                    "line {}: frame {} appears more than once",
                    line_no + 1,
                    entry.frame
                )));
            }
        }
        Ok(Self { frames })
    }

    /// Default pose track location for a video: `<dir>/<stem><suffix>`
    ///
    /// `dir` defaults to the video's own directory.
    #[must_use]
    pub fn path_for(video: &Path, dir: Option<&Path>, suffix: &str) -> PathBuf {
        let stem = video.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
        let dir = dir
            .map(Path::to_path_buf)
            .or_else(|| video.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        dir.join(format!("{stem}{suffix}"))
    }

    #[must_use]
    pub fn get(&self, frame_index: usize) -> Option<&RawPose> {
        self.frames.get(&frame_index)
    }

    /// Number of frames with a pose
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FromIterator<PoseFrame> for PoseTrack {
    fn from_iter<I: IntoIterator<Item = PoseFrame>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().map(|f| (f.frame, f.landmarks)).collect(),
        }
    }
}

impl PoseEstimator for PoseTrack {
    fn estimate(&mut self, _frame: &Mat, frame_index: usize) -> Result<Option<RawPose>> {
        Ok(self.frames.get(&frame_index).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TWO_FRAMES: &str = r#"{"frame": 0, "landmarks": [{"x": 0.5, "y": 0.25, "z": 0.0, "visibility": 0.9}]}

{"frame": 3, "landmarks": [{"x": 0.1, "y": 0.2}]}
"#;

    #[test]
    fn test_from_reader() {
        let track = PoseTrack::from_reader(Cursor::new(TWO_FRAMES)).unwrap();
        assert_eq!(track.len(), 2);
        assert_eq!(track.get(0).unwrap().landmarks()[0].visibility, 0.9);
        assert!(track.get(1).is_none());
        // Missing depth and visibility default to zero
        assert_eq!(track.get(3).unwrap().landmarks()[0].visibility, 0.0);
    }

    #[test]
    fn test_bad_line_reports_line_number() {
        let err = PoseTrack::from_reader(Cursor::new("{\"frame\": 0, \"landmarks\": []}\nnot json\n")).unwrap_err();
        match err {
            Error::PoseTrack(msg) => assert!(msg.starts_with("line 2")),
            other => panic!("Expected PoseTrack error, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_frame_rejected() {
        let input = "{\"frame\": 1, \"landmarks\": []}\n{\"frame\": 1, \"landmarks\": []}\n";
        assert!(matches!(PoseTrack::from_reader(Cursor::new(input)), Err(Error::PoseTrack(_))));
    }

    #[test]
    fn test_path_for() {
        let video = Path::new("data/raw/pull.mp4");
        assert_eq!(
            PoseTrack::path_for(video, None, ".poses.jsonl"),
            PathBuf::from("data/raw/pull.poses.jsonl")
        );
        assert_eq!(
            PoseTrack::path_for(video, Some(Path::new("poses")), ".poses.jsonl"),
            PathBuf::from("poses/pull.poses.jsonl")
        );
    }

    #[test]
    fn test_estimate_by_frame_index() {
        let mut track = PoseTrack::from_reader(Cursor::new(TWO_FRAMES)).unwrap();
        let frame = Mat::default();
        assert!(track.estimate(&frame, 0).unwrap().is_some());
        assert!(track.estimate(&frame, 2).unwrap().is_none());
    }
}
