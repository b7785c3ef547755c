//! Cubescope library - spectral analysis kernel and frame loop for
//! audio-reactive visualizations

pub mod audio;
pub mod cli;
pub mod error;
pub mod frame_loop;
pub mod params;
pub mod spectrum;
pub mod visual;
