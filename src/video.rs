//! Video pipeline: read frames, attach poses, annotate, write.

use crate::{
    config::VideoConfig,
    landmarks::{LandmarkSet, RawPose},
    pose_track::PoseEstimator,
    processor::{RepSummary, VideoProcessor},
    utils::safe_cast::f64_to_extent,
    Error, Result,
};
use log::{debug, info};
use opencv::{
    core::{Mat, Size},
    prelude::*,
    videoio::{self, VideoCapture, VideoWriter, CAP_PROP_FPS, CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Outcome of processing one video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoSummary {
    /// Frames read from the input
    pub frames: usize,
    /// Frames for which the pose source returned a pose
    pub frames_with_pose: usize,
    /// Final rep totals, for rep-counting processors
    pub reps: Option<RepSummary>,
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| Error::InvalidInput(format!("Path is not valid UTF-8: {}", path.display())))
}

/// Annotate every frame of `input` with `processor` and write the result to `output`
///
/// Frames without a pose are still passed to the processor, with an empty
/// landmark set, so persistent overlays stay on screen.
///
/// # Errors
///
/// Returns an error if either container cannot be opened, or if pose lookup,
/// drawing or writing fails for any frame.
pub fn process_video(
    input: &Path,
    output: &Path,
    estimator: &mut dyn PoseEstimator,
    processor: &mut dyn VideoProcessor,
    config: &VideoConfig,
) -> Result<VideoSummary> {
    info!("Opening video file: {}", input.display());
    let mut capture = VideoCapture::from_file(path_str(input)?, videoio::CAP_ANY)?;
    if !capture.is_opened()? {
        return Err(Error::Video(format!("Could not open {}", input.display())));
    }

    let reported_fps = capture.get(CAP_PROP_FPS)?;
    let fps = if reported_fps.is_finite() && reported_fps > 0.0 {
        reported_fps
    } else {
        info!("No frame rate reported, assuming {} FPS", config.fallback_fps);
        config.fallback_fps
    };
    let width = f64_to_extent(capture.get(CAP_PROP_FRAME_WIDTH)?)?;
    let height = f64_to_extent(capture.get(CAP_PROP_FRAME_HEIGHT)?)?;
    info!("Video: {width}x{height} @ {fps:.2} FPS");

    let [c1, c2, c3, c4] = config.fourcc_chars()?;
    let fourcc = VideoWriter::fourcc(c1, c2, c3, c4)?;
    let mut writer = VideoWriter::new(path_str(output)?, fourcc, fps, Size::new(width, height), true)?;
    if !writer.is_opened()? {
        return Err(Error::Video(format!("Could not open {} for writing", output.display())));
    }

    let mut summary = VideoSummary {
        frames: 0,
        frames_with_pose: 0,
        reps: None,
    };
    let mut frame = Mat::default();
    loop {
        if !capture.read(&mut frame)? || frame.empty() {
            info!("End of video file reached");
            break;
        }

        let pose = estimator.estimate(&frame, summary.frames)?;
        let (landmarks, pose) = match pose {
            Some(pose) => {
                summary.frames_with_pose += 1;
                (LandmarkSet::from_pose(&pose, frame.cols(), frame.rows()), pose)
            }
            None => {
                debug!("No pose for frame {}", summary.frames);
                (LandmarkSet::new(), RawPose::empty())
            }
        };

        processor.draw(&mut frame, &landmarks, &pose)?;
        writer.write(&frame)?;
        summary.frames += 1;
    }

    writer.release()?;
    summary.reps = processor.rep_summary();
    info!(
        "Wrote {} ({} frames, {} with pose)",
        output.display(),
        summary.frames,
        summary.frames_with_pose
    );
    Ok(summary)
}
