//! Batch application: every input video through every selected processor.

use crate::{
    config::Config,
    error::Result,
    pose_track::PoseTrack,
    processor::{create_processor, ProcessorType},
    video::{process_video, VideoSummary},
    Error,
};
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Videos to analyze
    pub inputs: Vec<PathBuf>,
    /// Processors to run on each video
    pub processors: Vec<ProcessorType>,
    /// Directory holding pose tracks (defaults to each video's directory)
    pub pose_dir: Option<PathBuf>,
    /// Write a YAML summary next to each output video
    pub write_summary: bool,
    /// Tunables loaded from file or defaults
    pub settings: Config,
}

/// One finished (input, processor) run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub processor: String,
    #[serde(flatten)]
    pub summary: VideoSummary,
}

/// Main application struct
pub struct DeadliftApp {
    config: AppConfig,
}

impl DeadliftApp {
    /// Create the application, validating its configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or nothing was selected to run.
    pub fn new(config: AppConfig) -> Result<Self> {
        info!("Initializing Deadlift Analysis application");
        config.settings.validate()?;
        if config.inputs.is_empty() {
            return Err(Error::InvalidInput("No input videos given".to_string()));
        }
        if config.processors.is_empty() {
            return Err(Error::InvalidInput("No processor types given".to_string()));
        }
        Ok(Self { config })
    }

    /// Output video path: `<output_dir>/<stem>_<processor>.mp4`
    #[must_use]
    pub fn output_path(output_dir: &Path, input: &Path, processor: ProcessorType) -> PathBuf {
        let stem = input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
        output_dir.join(format!("{stem}_{processor}.mp4"))
    }

    /// Summary path written beside an output video
    #[must_use]
    pub fn summary_path(output: &Path) -> PathBuf {
        output.with_extension("summary.yaml")
    }

    /// Process every input with every processor, in order
    pub fn run(&self) -> Result<Vec<RunReport>> {
        let settings = &self.config.settings;
        let output_dir = &settings.video.output_dir;
        std::fs::create_dir_all(output_dir)?;

        let mut reports = Vec::new();
        for input in &self.config.inputs {
            let track_path = PoseTrack::path_for(
                input,
                self.config.pose_dir.as_deref(),
                &settings.video.pose_track_suffix,
            );
            let track = PoseTrack::from_file(&track_path)?;

            for &kind in &self.config.processors {
                let output = Self::output_path(output_dir, input, kind);
                info!("Running {} on {} -> {}", kind, input.display(), output.display());

                let mut estimator = track.clone();
                let mut processor = create_processor(kind, settings);
                let summary = process_video(input, &output, &mut estimator, processor.as_mut(), &settings.video)?;

                if let Some(reps) = summary.reps {
                    info!("{}: {} reps, final state {}", input.display(), reps.reps, reps.state);
                }

                let report = RunReport {
                    input: input.clone(),
                    output: output.clone(),
                    processor: kind.to_string(),
                    summary,
                };
                if self.config.write_summary {
                    write_summary(&Self::summary_path(&output), &report)?;
                }
                reports.push(report);
            }
        }

        info!("Application finished: {} runs", reports.len());
        Ok(reports)
    }
}

fn write_summary(path: &Path, report: &RunReport) -> Result<()> {
    let content = serde_yaml::to_string(report)
        .map_err(|e| Error::ConfigError(format!("Failed to serialize summary: {e}")))?;
    std::fs::write(path, content)?;
    info!("Summary written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{processor::RepSummary, rep_counter::RepState};

    fn app_config() -> AppConfig {
        AppConfig {
            inputs: vec![PathBuf::from("clip.mp4")],
            processors: vec![ProcessorType::Deadlift],
            pose_dir: None,
            write_summary: false,
            settings: Config::default(),
        }
    }

    #[test]
    fn test_output_path() {
        let out = DeadliftApp::output_path(Path::new("out"), Path::new("data/raw/heavy.mov"), ProcessorType::Deadlift);
        assert_eq!(out, PathBuf::from("out/heavy_dl.mp4"));
        assert_eq!(DeadliftApp::summary_path(&out), PathBuf::from("out/heavy_dl.summary.yaml"));
    }

    #[test]
    fn test_new_rejects_empty_selection() {
        let mut config = app_config();
        config.processors.clear();
        assert!(matches!(DeadliftApp::new(config), Err(Error::InvalidInput(_))));

        let mut config = app_config();
        config.inputs.clear();
        assert!(DeadliftApp::new(config).is_err());
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        let mut config = app_config();
        config.settings.rep_counter.angle_threshold = -1.0;
        assert!(matches!(DeadliftApp::new(config), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_missing_pose_track_fails_before_processing() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = app_config();
        config.inputs = vec![dir.path().join("absent.mp4")];
        config.settings.video.output_dir = dir.path().join("out");

        let app = DeadliftApp::new(config).unwrap();
        assert!(matches!(app.run(), Err(Error::Io(_))));
    }

    #[test]
    fn test_report_serialization() {
        let dir = tempfile::tempdir().unwrap();
        let report = RunReport {
            input: PathBuf::from("clip.mp4"),
            output: PathBuf::from("out/clip_dl.mp4"),
            processor: "dl".to_string(),
            summary: VideoSummary {
                frames: 120,
                frames_with_pose: 118,
                reps: Some(RepSummary { reps: 4, state: RepState::Down }),
            },
        };
        let path = dir.path().join("clip_dl.summary.yaml");
        write_summary(&path, &report).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("frames: 120"));
        assert!(content.contains("reps: 4"));
        assert!(content.contains("state: down"));
    }
}
