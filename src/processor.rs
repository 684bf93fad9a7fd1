//! Frame processors and processor selection.

use crate::{
    annotator::DeadliftAnnotator,
    canvas::Canvas,
    config::Config,
    landmarks::{LandmarkSet, RawPose},
    rep_counter::RepState,
    shoulder_tracker::ShoulderTracker,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Something that annotates a frame given that frame's pose
pub trait VideoProcessor {
    /// Draw onto `canvas` using the frame's pixel landmarks and raw pose
    fn draw(&mut self, canvas: &mut dyn Canvas, landmarks: &LandmarkSet, pose: &RawPose) -> Result<()>;

    /// Processor name
    fn name(&self) -> &str;

    /// Rep totals so far, for processors that count reps
    fn rep_summary(&self) -> Option<RepSummary> {
        None
    }
}

/// Rep count and phase at a point in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepSummary {
    pub reps: u32,
    #[serde(with = "rep_state_name")]
    pub state: RepState,
}

mod rep_state_name {
    use crate::rep_counter::RepState;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(state: &RepState, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(state.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RepState, D::Error> {
        let name = String::deserialize(deserializer)?;
        match name.as_str() {
            "pending" => Ok(RepState::Pending),
            "down" => Ok(RepState::Down),
            "up" => Ok(RepState::Up),
            other => Err(D::Error::custom(format!("unknown rep state {other:?}"))),
        }
    }
}

/// Processors selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ProcessorType {
    /// Deadlift skeleton, heel stabilization, rep counting and shoulder path
    #[value(name = "dl")]
    Deadlift,
    /// Shoulder path only
    #[value(name = "shoulder_track")]
    ShoulderTrack,
}

impl ProcessorType {
    /// Name used on the command line and in output file names
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deadlift => "dl",
            Self::ShoulderTrack => "shoulder_track",
        }
    }
}

impl fmt::Display for ProcessorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessorType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dl" => Ok(Self::Deadlift),
            "shoulder_track" => Ok(Self::ShoulderTrack),
            _ => Err(Error::UnknownProcessor(s.to_string())),
        }
    }
}

/// Build a fresh processor session
#[must_use]
pub fn create_processor(kind: ProcessorType, config: &Config) -> Box<dyn VideoProcessor> {
    let shoulder_tracker = || ShoulderTracker::new(config.shoulder_track.clone());
    match kind {
        ProcessorType::Deadlift => Box::new(DeadliftAnnotator::new(
            config.rep_counter.angle_threshold,
            config.drawing.clone(),
            Box::new(shoulder_tracker()),
        )),
        ProcessorType::ShoulderTrack => Box::new(shoulder_tracker()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processor_type_parsing() {
        assert_eq!("dl".parse::<ProcessorType>().unwrap(), ProcessorType::Deadlift);
        assert_eq!("shoulder_track".parse::<ProcessorType>().unwrap(), ProcessorType::ShoulderTrack);
        assert!(matches!("emoji".parse::<ProcessorType>(), Err(Error::UnknownProcessor(name)) if name == "emoji"));
    }

    #[test]
    fn test_create_processor() {
        let config = Config::default();
        let deadlift = create_processor(ProcessorType::Deadlift, &config);
        assert_eq!(deadlift.name(), "dl");
        assert_eq!(
            deadlift.rep_summary(),
            Some(RepSummary { reps: 0, state: RepState::Pending })
        );

        let shoulder = create_processor(ProcessorType::ShoulderTrack, &config);
        assert_eq!(shoulder.name(), "shoulder_track");
        assert_eq!(shoulder.rep_summary(), None);
    }

    #[test]
    fn test_rep_summary_serializes_state_name() {
        let summary = RepSummary { reps: 3, state: RepState::Up };
        let yaml = serde_yaml::to_string(&summary).unwrap();
        assert!(yaml.contains("state: up"));
        assert_eq!(serde_yaml::from_str::<RepSummary>(&yaml).unwrap(), summary);
    }
}
