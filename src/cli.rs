//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::SetupError;
use crate::params::{
    AnalysisConfig, BinSelection, EngineKind, RecordingConfig, SampleDomain, WindowType,
};

/// Capture length and optional pause window, measured from start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunTiming {
    pub duration: Duration,
    pub pause_window: Option<(Duration, Duration)>,
}

/// Where frames come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Tone,
    Microphone,
}

/// What the magnitudes drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    Bars,
    Cubes,
    Waveform,
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "cubescope")]
#[command(about = "Live spectrum visualizer driven by a recursive FFT", long_about = None)]
pub struct Args {
    /// Sample source: tone (default), mic
    #[arg(long, value_name = "SOURCE", default_value = "tone")]
    pub source: String,

    /// Frequency of the synthetic tone (Hz)
    #[arg(long, value_name = "HZ", default_value = "440")]
    pub tone_hz: f64,

    /// Bytes handed to the transform: time (default), frequency
    #[arg(long, value_name = "DOMAIN", default_value = "time")]
    pub domain: String,

    /// Transform implementation: recursive (default), planned
    #[arg(long, value_name = "ENGINE", default_value = "recursive")]
    pub engine: String,

    /// Visualization: bars (default), cubes, waveform
    #[arg(long, value_name = "SINK", default_value = "bars")]
    pub sink: String,

    /// Analyser window size; each frame carries half of it
    #[arg(long, value_name = "SAMPLES", default_value = "2048")]
    pub fft_size: usize,

    /// Tick interval (milliseconds)
    #[arg(long, value_name = "MS", default_value = "16")]
    pub frame_interval: u64,

    /// How long to capture (seconds)
    #[arg(long, value_name = "SECONDS", default_value = "5")]
    pub duration: f32,

    /// Pause capture this many seconds in
    #[arg(long, value_name = "SECONDS")]
    pub pause_at: Option<f32>,

    /// Length of the pause (seconds)
    #[arg(long, value_name = "SECONDS", default_value = "1")]
    pub pause_for: f32,

    /// Record captured audio to a WAV file in this directory
    #[arg(long, value_name = "DIR")]
    pub record: Option<PathBuf>,

    /// Apply a Hann window before the transform
    #[arg(long)]
    pub hann: bool,

    /// Forward all N bins instead of the N/2 below Nyquist
    #[arg(long)]
    pub full_spectrum: bool,

    /// Print the visualization every N rendered frames
    #[arg(long, value_name = "FRAMES", default_value = "15")]
    pub print_every: u64,
}

impl Args {
    pub fn parse_source(&self) -> SourceKind {
        match self.source.to_lowercase().as_str() {
            "tone" => SourceKind::Tone,
            "mic" | "microphone" => SourceKind::Microphone,
            other => {
                log::warn!("Unknown source '{}', using tone", other);
                SourceKind::Tone
            }
        }
    }

    pub fn parse_sink(&self) -> SinkKind {
        match self.sink.to_lowercase().as_str() {
            "bars" => SinkKind::Bars,
            "cubes" => SinkKind::Cubes,
            "waveform" => SinkKind::Waveform,
            other => {
                log::warn!("Unknown sink '{}', using bars", other);
                SinkKind::Bars
            }
        }
    }

    pub fn parse_domain(&self) -> SampleDomain {
        match self.domain.to_lowercase().as_str() {
            "time" => SampleDomain::TimeDomain,
            "frequency" | "freq" => SampleDomain::Frequency,
            other => {
                log::warn!("Unknown domain '{}', using time", other);
                SampleDomain::TimeDomain
            }
        }
    }

    pub fn parse_engine(&self) -> EngineKind {
        match self.engine.to_lowercase().as_str() {
            "recursive" => EngineKind::Recursive,
            "planned" | "rustfft" => EngineKind::Planned,
            other => {
                log::warn!("Unknown engine '{}', using recursive", other);
                EngineKind::Recursive
            }
        }
    }

    /// Analysis configuration from the flags (not yet validated)
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            fft_size: self.fft_size,
            frame_interval_ms: self.frame_interval,
            domain: self.parse_domain(),
            engine: self.parse_engine(),
            window: if self.hann {
                WindowType::Hann
            } else {
                WindowType::Rect
            },
            bins: if self.full_spectrum {
                BinSelection::Full
            } else {
                BinSelection::Half
            },
            ..AnalysisConfig::default()
        }
    }

    /// Capture timing from the flags; negative times count as zero
    pub fn run_timing(&self) -> Result<RunTiming, SetupError> {
        let duration = seconds("--duration", self.duration)?;
        let pause_window = match self.pause_at {
            Some(at) => {
                let from = seconds("--pause-at", at)?;
                let until = from
                    .checked_add(seconds("--pause-for", self.pause_for)?)
                    .ok_or_else(|| {
                        SetupError::InvalidConfig("Pause window is out of range".to_string())
                    })?;
                Some((from, until))
            }
            None => None,
        };
        Ok(RunTiming {
            duration,
            pause_window,
        })
    }

    /// Create recording configuration if recording mode is enabled
    pub fn recording_config(&self) -> Option<RecordingConfig> {
        self.record.as_ref().map(|dir| RecordingConfig::new(dir))
    }
}

fn seconds(flag: &str, value: f32) -> Result<Duration, SetupError> {
    Duration::try_from_secs_f32(value.max(0.0)).map_err(|e| {
        SetupError::InvalidConfig(format!("{} {} is not a usable time: {}", flag, value, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["cubescope"]);
        assert_eq!(args.parse_source(), SourceKind::Tone);
        assert_eq!(args.parse_sink(), SinkKind::Bars);

        let config = args.analysis_config();
        assert_eq!(config.fft_size, 2048);
        assert_eq!(config.domain, SampleDomain::TimeDomain);
        assert_eq!(config.engine, EngineKind::Recursive);
        assert!(args.recording_config().is_none());
    }

    #[test]
    fn test_flags_map_to_config() {
        let args = Args::parse_from([
            "cubescope",
            "--domain",
            "frequency",
            "--engine",
            "planned",
            "--sink",
            "cubes",
            "--hann",
            "--full-spectrum",
            "--record",
            "out",
        ]);
        let config = args.analysis_config();
        assert_eq!(config.domain, SampleDomain::Frequency);
        assert_eq!(config.engine, EngineKind::Planned);
        assert_eq!(config.window, WindowType::Hann);
        assert_eq!(config.bins, BinSelection::Full);
        assert_eq!(args.parse_sink(), SinkKind::Cubes);
        assert_eq!(
            args.recording_config().unwrap().audio_path(),
            PathBuf::from("out").join("capture.wav")
        );
    }

    #[test]
    fn test_unknown_values_fall_back() {
        let args = Args::parse_from(["cubescope", "--sink", "hologram", "--engine", "dft"]);
        assert_eq!(args.parse_sink(), SinkKind::Bars);
        assert_eq!(args.parse_engine(), EngineKind::Recursive);
    }

    #[test]
    fn test_run_timing() {
        let args = Args::parse_from(["cubescope", "--duration", "2.5", "--pause-at", "1"]);
        let timing = args.run_timing().unwrap();
        assert_eq!(timing.duration, Duration::from_millis(2500));
        assert_eq!(
            timing.pause_window,
            Some((Duration::from_secs(1), Duration::from_secs(2)))
        );

        let args = Args::parse_from(["cubescope", "--duration=-3"]);
        assert_eq!(args.run_timing().unwrap().duration, Duration::ZERO);
        assert!(args.run_timing().unwrap().pause_window.is_none());
    }

    #[test]
    fn test_run_timing_rejects_unrepresentable_times() {
        let args = Args::parse_from(["cubescope", "--duration", "inf"]);
        assert!(matches!(
            args.run_timing(),
            Err(SetupError::InvalidConfig(_))
        ));

        let args = Args::parse_from(["cubescope", "--pause-at", "1e30"]);
        assert!(args.run_timing().is_err());
    }
}
