//! Cubescope - live spectrum visualizer
//!
//! Captures a tone or the microphone, runs every frame through the recursive
//! FFT and drives a bar meter, a cube grid or a waveform path.

use anyhow::Result;
use clap::Parser;
use std::thread;
use std::time::{Duration, Instant};

use cubescope::audio::{Analyser, CaptureTap, SampleSource, ToneSource, WavRecorder};
use cubescope::cli::{Args, RunTiming, SinkKind, SourceKind};
use cubescope::frame_loop::{CaptureState, FrameLoop, TickOutcome};
use cubescope::params::{
    AnalyserConfig, AnalysisConfig, CanvasConfig, CubeGridLayout, DepthMapping, RecordingConfig,
};
use cubescope::visual::{BarMeter, CubeGrid, VisualSink, WaveformPath};

/// Longest sleep between state checks of the driver loop
const POLL_SLICE: Duration = Duration::from_millis(5);

/// Bar meter width (characters)
const METER_COLUMNS: usize = 64;

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let analysis = args.analysis_config();
    analysis.validate()?;
    args.run_timing()?;

    println!("Cubescope - live spectrum visualizer");
    println!(
        "{} samples per frame, {} bins, every {} ms\n",
        analysis.frame_len(),
        analysis.bin_count(),
        analysis.frame_interval_ms
    );

    let source = build_source(&args, &analysis)?;
    let bins = analysis.bin_count();

    match args.parse_sink() {
        SinkKind::Bars => {
            let meter = BarMeter::new(bins, METER_COLUMNS);
            run(analysis, source, meter, &args, BarMeter::render)
        }
        SinkKind::Cubes => {
            let layout = CubeGridLayout::for_cell_count(bins);
            let grid = CubeGrid::new(layout, DepthMapping::default())?;
            run(analysis, source, grid, &args, describe_cubes)
        }
        SinkKind::Waveform => {
            let path = WaveformPath::new(bins, CanvasConfig::default());
            run(analysis, source, path, &args, describe_waveform)
        }
    }
}

fn build_source(args: &Args, analysis: &AnalysisConfig) -> Result<Box<dyn SampleSource>> {
    let analyser = Analyser::new(AnalyserConfig {
        fft_size: analysis.fft_size,
        ..AnalyserConfig::default()
    })?;
    let recording = args.recording_config();

    match args.parse_source() {
        SourceKind::Tone => {
            let mut tap = CaptureTap::new(analyser);
            if let Some(recording) = &recording {
                tap = tap.with_recorder(WavRecorder::create(
                    recording,
                    analysis.sample_rate_hz as u32,
                )?);
            }
            Ok(Box::new(ToneSource::new(analysis, tap, args.tone_hz, 0.8)))
        }
        SourceKind::Microphone => microphone(analysis, analyser, recording),
    }
}

#[cfg(feature = "capture")]
fn microphone(
    analysis: &AnalysisConfig,
    analyser: Analyser,
    recording: Option<RecordingConfig>,
) -> Result<Box<dyn SampleSource>> {
    Ok(Box::new(cubescope::audio::MicrophoneSource::new(
        analysis, analyser, recording,
    )))
}

#[cfg(not(feature = "capture"))]
fn microphone(
    _analysis: &AnalysisConfig,
    _analyser: Analyser,
    _recording: Option<RecordingConfig>,
) -> Result<Box<dyn SampleSource>> {
    anyhow::bail!("microphone input needs a build with `--features capture`")
}

/// Drive the loop from a sleep-paced clock until the duration elapses
fn run<V: VisualSink>(
    analysis: AnalysisConfig,
    source: Box<dyn SampleSource>,
    sink: V,
    args: &Args,
    describe: impl Fn(&V) -> String,
) -> Result<()> {
    let mut frame_loop = FrameLoop::new(analysis, source, sink)?;
    frame_loop.start()?;

    let started = Instant::now();
    let RunTiming {
        duration,
        pause_window,
    } = args.run_timing()?;
    let print_every = args.print_every.max(1);

    while started.elapsed() < duration {
        if let Some((from, until)) = pause_window {
            let elapsed = started.elapsed();
            match frame_loop.state() {
                CaptureState::Capturing if elapsed >= from && elapsed < until => {
                    frame_loop.pause()?
                }
                CaptureState::Paused if elapsed >= until => frame_loop.resume()?,
                _ => {}
            }
        }

        let now = Instant::now();
        match frame_loop.next_due() {
            Some(due) if due > now => thread::sleep((due - now).min(POLL_SLICE)),
            Some(_) => {
                if let Some(TickOutcome::Rendered) = frame_loop.poll(now) {
                    if frame_loop.stats().frames_rendered % print_every == 0 {
                        println!("{}", describe(frame_loop.sink()));
                    }
                }
            }
            None => thread::sleep(POLL_SLICE),
        }
    }

    if let Some(path) = frame_loop.stop()? {
        println!("\nRecording saved to {}", path.display());
    }

    let stats = frame_loop.stats();
    println!(
        "\n{} frames rendered, {} failed, {} cancelled",
        stats.frames_rendered, stats.failed_ticks, stats.cancelled_ticks
    );
    Ok(())
}

fn describe_cubes(grid: &CubeGrid) -> String {
    let (index, deepest) = grid
        .cubes()
        .iter()
        .enumerate()
        .fold((0, f32::MIN), |best, (i, cube)| {
            if cube.depth_scale > best.1 {
                (i, cube.depth_scale)
            } else {
                best
            }
        });
    let mean = grid.cubes().iter().map(|c| c.depth_scale).sum::<f32>() / grid.cell_count() as f32;
    format!("deepest cube #{:<4} depth {:>7.3}   mean depth {:>7.3}", index, deepest, mean)
}

fn describe_waveform(path: &WaveformPath) -> String {
    let points = &path.points()[..path.cell_count()];
    let peak = points.iter().fold(f32::MIN, |acc, p| acc.max(p.y));
    let floor = points.iter().fold(f32::MAX, |acc, p| acc.min(p.y));
    format!("{} vertices, y range {:.1} .. {:.1}", points.len(), floor, peak)
}
