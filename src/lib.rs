//! Deadlift video analysis library.
//!
//! Overlays a skeleton, a shoulder path and a rep counter on deadlift videos,
//! driven by per-frame body poses from an external pose estimator:
//! - `OpenCV` for video I/O and drawing
//! - A three-phase rep state machine fed by left and right hip angles
//! - Heel stabilization that freezes the most confident heel pair seen at the top of the lift
//!
//! The per-frame sequence is:
//! 1. Adapt the raw pose to pixel landmarks
//! 2. Pin the heels to the stabilized pair
//! 3. Draw the skeleton, stabilized heels and shoulder path
//! 4. Advance the rep counter and render the labels
//!
//! # Examples
//!
//! ## Counting reps from hip angles
//!
//! ```
//! use deadlift_analysis::rep_counter::{HipAngles, RepCounter, RepState};
//!
//! let mut counter = RepCounter::new(100.0);
//! for (left, right) in [(70.0, 70.0), (130.0, 130.0), (70.0, 70.0)] {
//!     counter.update(HipAngles::new(left, right));
//! }
//! assert_eq!(counter.state(), RepState::Down);
//! assert_eq!(counter.count(), 1);
//! ```
//!
//! ## Annotating a video
//!
//! ```no_run
//! use deadlift_analysis::{
//!     config::Config,
//!     pose_track::PoseTrack,
//!     processor::{create_processor, ProcessorType},
//!     video::process_video,
//! };
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let mut poses = PoseTrack::from_file("data/raw/pull.poses.jsonl")?;
//! let mut processor = create_processor(ProcessorType::Deadlift, &config);
//!
//! let summary = process_video(
//!     Path::new("data/raw/pull.mp4"),
//!     Path::new("data/processed/pull_dl.mp4"),
//!     &mut poses,
//!     processor.as_mut(),
//!     &config.video,
//! )?;
//! if let Some(reps) = summary.reps {
//!     println!("{} reps", reps.reps);
//! }
//! # Ok(())
//! # }
//! ```

/// Joint angle computation
pub mod geometry;

/// Body landmark enumeration, raw poses and pixel landmark sets
pub mod landmarks;

/// Rep state machine
pub mod rep_counter;

/// Heel stabilization
pub mod stabilizer;

/// Drawing surface abstraction
pub mod canvas;

/// Frame processor trait and processor selection
pub mod processor;

/// Deadlift frame annotator
pub mod annotator;

/// Shoulder path overlay
pub mod shoulder_tracker;

/// Pose input from pre-computed pose tracks
pub mod pose_track;

/// Video read/annotate/write pipeline
pub mod video;

/// Numeric helpers
pub mod utils;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
