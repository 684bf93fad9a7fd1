//! Constants used throughout the application

/// Hip angle (degrees) separating the bottom and top of a deadlift
pub const DEFAULT_ANGLE_THRESHOLD: f64 = 100.0;

/// Number of landmarks in a MediaPipe pose
pub const NUM_POSE_LANDMARKS: usize = 33;

/// Default frames per second assumption
pub const DEFAULT_FPS: f64 = 30.0;

/// Default output video codec
pub const DEFAULT_FOURCC: &str = "mp4v";

/// Default suffix appended to a video stem to find its pose track
pub const DEFAULT_POSE_TRACK_SUFFIX: &str = ".poses.jsonl";

/// Skeleton line defaults (BGR)
pub const DEFAULT_LINE_COLOR: [u8; 3] = [0, 255, 0];
pub const DEFAULT_LINE_THICKNESS: i32 = 2;

/// Stabilized heel marker defaults (BGR)
pub const DEFAULT_HEEL_MARKER_COLOR: [u8; 3] = [0, 0, 255];
pub const DEFAULT_HEEL_MARKER_RADIUS: i32 = 5;

/// Label text defaults
pub const DEFAULT_TEXT_COLOR: [u8; 3] = [255, 255, 255];
pub const DEFAULT_FONT_SCALE: f64 = 1.5;
pub const DEFAULT_TEXT_THICKNESS: i32 = 2;

/// Label layout: left margin, top offset as a fraction of frame height, gap between lines
pub const LABEL_MARGIN_X: i32 = 10;
pub const LABEL_TOP_FRACTION: f64 = 0.05;
pub const LABEL_LINE_SPACING: i32 = 20;

/// Shoulder path defaults (BGR)
pub const DEFAULT_SHOULDER_PATH_COLOR: [u8; 3] = [255, 0, 0];
pub const DEFAULT_SHOULDER_PATH_THICKNESS: i32 = 2;
pub const DEFAULT_SHOULDER_MARKER_RADIUS: i32 = 4;
pub const DEFAULT_SHOULDER_PATH_LENGTH: usize = 300;

/// Numeric precision epsilon
pub const EPSILON: f64 = 1e-10;
