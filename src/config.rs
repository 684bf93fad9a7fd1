//! Configuration management for the deadlift analysis application

use crate::{
    canvas::{Color, TextStyle},
    constants::{
        DEFAULT_ANGLE_THRESHOLD, DEFAULT_FONT_SCALE, DEFAULT_FOURCC, DEFAULT_FPS, DEFAULT_HEEL_MARKER_COLOR,
        DEFAULT_HEEL_MARKER_RADIUS, DEFAULT_LINE_COLOR, DEFAULT_LINE_THICKNESS, DEFAULT_POSE_TRACK_SUFFIX,
        DEFAULT_SHOULDER_MARKER_RADIUS, DEFAULT_SHOULDER_PATH_COLOR, DEFAULT_SHOULDER_PATH_LENGTH,
        DEFAULT_SHOULDER_PATH_THICKNESS, DEFAULT_TEXT_COLOR, DEFAULT_TEXT_THICKNESS, LABEL_LINE_SPACING,
        LABEL_MARGIN_X, LABEL_TOP_FRACTION,
    },
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rep counting parameters
    pub rep_counter: RepCounterConfig,

    /// Skeleton and label drawing
    pub drawing: DrawingConfig,

    /// Shoulder path overlay
    pub shoulder_track: ShoulderTrackConfig,

    /// Video input/output
    pub video: VideoConfig,
}

/// Rep counting parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepCounterConfig {
    /// Hip angle (degrees) separating bottom from top
    pub angle_threshold: f64,
}

/// Skeleton and label drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingConfig {
    /// Bone line color (BGR)
    pub line_color: Color,

    /// Bone line thickness
    pub line_thickness: i32,

    /// Stabilized heel marker color (BGR)
    pub heel_marker_color: Color,

    /// Stabilized heel marker radius
    pub heel_marker_radius: i32,

    /// Label text color (BGR)
    pub text_color: Color,

    /// Label font scale
    pub font_scale: f64,

    /// Label stroke thickness
    pub text_thickness: i32,

    /// Left margin of the labels in pixels
    pub label_margin_x: i32,

    /// Offset of the first label from the top, as a fraction of frame height
    pub label_top_fraction: f64,

    /// Vertical gap between the two labels in pixels
    pub label_line_spacing: i32,
}

/// Shoulder path overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShoulderTrackConfig {
    /// Path color (BGR)
    pub color: Color,

    /// Path line thickness
    pub thickness: i32,

    /// Radius of the marker on the latest position
    pub marker_radius: i32,

    /// Maximum number of positions kept in the path
    pub max_points: usize,
}

/// Video input/output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Directory for annotated videos
    pub output_dir: PathBuf,

    /// Four-character codec code of the output container
    pub fourcc: String,

    /// Frame rate used when the input does not report one
    pub fallback_fps: f64,

    /// Suffix appended to a video's stem to locate its pose track
    pub pose_track_suffix: String,
}

impl Default for RepCounterConfig {
    fn default() -> Self {
        Self {
            angle_threshold: DEFAULT_ANGLE_THRESHOLD,
        }
    }
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            line_color: DEFAULT_LINE_COLOR.into(),
            line_thickness: DEFAULT_LINE_THICKNESS,
            heel_marker_color: DEFAULT_HEEL_MARKER_COLOR.into(),
            heel_marker_radius: DEFAULT_HEEL_MARKER_RADIUS,
            text_color: DEFAULT_TEXT_COLOR.into(),
            font_scale: DEFAULT_FONT_SCALE,
            text_thickness: DEFAULT_TEXT_THICKNESS,
            label_margin_x: LABEL_MARGIN_X,
            label_top_fraction: LABEL_TOP_FRACTION,
            label_line_spacing: LABEL_LINE_SPACING,
        }
    }
}

impl Default for ShoulderTrackConfig {
    fn default() -> Self {
        Self {
            color: DEFAULT_SHOULDER_PATH_COLOR.into(),
            thickness: DEFAULT_SHOULDER_PATH_THICKNESS,
            marker_radius: DEFAULT_SHOULDER_MARKER_RADIUS,
            max_points: DEFAULT_SHOULDER_PATH_LENGTH,
        }
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("data/processed"),
            fourcc: DEFAULT_FOURCC.to_string(),
            fallback_fps: DEFAULT_FPS,
            pose_track_suffix: DEFAULT_POSE_TRACK_SUFFIX.to_string(),
        }
    }
}

impl DrawingConfig {
    /// Text style for the rep and state labels
    #[must_use]
    pub fn label_style(&self) -> TextStyle {
        TextStyle {
            color: self.text_color,
            font_scale: self.font_scale,
            thickness: self.text_thickness,
        }
    }
}

impl VideoConfig {
    /// FourCC code split into the four characters `VideoWriter::fourcc` expects
    ///
    /// # Errors
    ///
    /// Returns an error unless the code is exactly four ASCII characters
    pub fn fourcc_chars(&self) -> Result<[char; 4]> {
        let chars: Vec<char> = self.fourcc.chars().collect();
        match chars.as_slice() {
            &[a, b, c, d] if chars.iter().all(char::is_ascii) => Ok([a, b, c, d]),
            _ => Err(Error::ConfigError(format!(
                "FourCC must be four ASCII characters, got {:?}",
                self.fourcc
            ))),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let threshold = self.rep_counter.angle_threshold;
        if !(threshold > 0.0 && threshold < 180.0) {
            return Err(Error::ConfigError(format!(
                "Angle threshold must be strictly between 0 and 180 degrees, got {threshold}"
            )));
        }

        let drawing = &self.drawing;
        if drawing.line_thickness <= 0 || drawing.text_thickness <= 0 {
            return Err(Error::ConfigError("Line and text thickness must be positive".to_string()));
        }
        if drawing.heel_marker_radius <= 0 {
            return Err(Error::ConfigError("Heel marker radius must be positive".to_string()));
        }
        if drawing.font_scale <= 0.0 {
            return Err(Error::ConfigError("Font scale must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&drawing.label_top_fraction) {
            return Err(Error::ConfigError(
                "Label top fraction must be between 0.0 and 1.0".to_string(),
            ));
        }

        if self.shoulder_track.thickness <= 0 || self.shoulder_track.marker_radius <= 0 {
            return Err(Error::ConfigError(
                "Shoulder track thickness and marker radius must be positive".to_string(),
            ));
        }
        if self.shoulder_track.max_points == 0 {
            return Err(Error::ConfigError(
                "Shoulder track must keep at least one point".to_string(),
            ));
        }

        if !(self.video.fallback_fps.is_finite() && self.video.fallback_fps > 0.0) {
            return Err(Error::ConfigError("Fallback FPS must be greater than 0".to_string()));
        }
        self.video.fourcc_chars()?;
        if self.video.pose_track_suffix.is_empty() {
            return Err(Error::ConfigError("Pose track suffix must not be empty".to_string()));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Deadlift Analysis Configuration

# Rep counting
rep_counter:
  angle_threshold: 100.0

# Skeleton and labels (colors are BGR)
drawing:
  line_color: [0, 255, 0]
  line_thickness: 2
  heel_marker_color: [0, 0, 255]
  heel_marker_radius: 5
  text_color: [255, 255, 255]
  font_scale: 1.5
  text_thickness: 2
  label_margin_x: 10
  label_top_fraction: 0.05
  label_line_spacing: 20

# Shoulder path overlay
shoulder_track:
  color: [255, 0, 0]
  thickness: 2
  marker_radius: 4
  max_points: 300

# Video input/output
video:
  output_dir: "data/processed"
  fourcc: "mp4v"
  fallback_fps: 30.0
  pose_track_suffix: ".poses.jsonl"
"#;
