//! Canvas polyline with one vertex per bin.
//!
//! Vertices take magnitudes straight from the frame loop, so a silent frame
//! and the resting path both lie along `y = 0`.

use glam::Vec2;

use super::VisualSink;
use crate::params::CanvasConfig;

/// Polyline across the canvas, closed on the center line at the right edge
pub struct WaveformPath {
    canvas: CanvasConfig,
    /// `cells` driven vertices followed by the fixed closing point
    points: Vec<Vec2>,
}

impl WaveformPath {
    pub fn new(cells: usize, canvas: CanvasConfig) -> Self {
        let mut path = Self {
            points: vec![Vec2::ZERO; cells + 1],
            canvas,
        };
        path.rest();
        path
    }

    /// All points in drawing order, closing point included
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    fn slice_width(&self) -> f32 {
        self.canvas.width / self.cell_count().max(1) as f32
    }

    fn set_heights(&mut self, mut height_of: impl FnMut(usize) -> f32) {
        let slice_width = self.slice_width();
        let cells = self.cell_count();
        for (i, point) in self.points.iter_mut().take(cells).enumerate() {
            *point = Vec2::new(i as f32 * slice_width, height_of(i));
        }
        self.points[cells] = Vec2::new(self.canvas.width, self.canvas.height / 2.0);
    }
}

impl VisualSink for WaveformPath {
    fn cell_count(&self) -> usize {
        self.points.len() - 1
    }

    /// `y = value / 128 * height / 2`, so 128 sits on the center line
    fn update(&mut self, magnitudes: &[f64]) {
        let half_height = self.canvas.height / 2.0;
        self.set_heights(|i| {
            let v = magnitudes.get(i).copied().unwrap_or(0.0) / 128.0;
            v as f32 * half_height
        });
    }

    fn rest(&mut self) {
        self.set_heights(|_| 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_span_canvas() {
        let canvas = CanvasConfig {
            width: 400.0,
            height: 100.0,
        };
        let mut path = WaveformPath::new(4, canvas);
        assert_eq!(path.cell_count(), 4);
        assert_eq!(path.points().len(), 5);

        path.update(&[0.0, 128.0, 256.0, 64.0]);
        assert_eq!(
            path.points(),
            &[
                Vec2::new(0.0, 0.0),
                Vec2::new(100.0, 50.0),
                Vec2::new(200.0, 100.0),
                Vec2::new(300.0, 25.0),
                Vec2::new(400.0, 50.0),
            ]
        );
    }

    #[test]
    fn test_rest_matches_silent_frame() {
        let mut silent = WaveformPath::new(8, CanvasConfig::default());
        silent.update(&[0.0; 8]);

        let mut path = WaveformPath::new(8, CanvasConfig::default());
        assert_eq!(path.points(), silent.points());

        path.update(&[255.0; 8]);
        path.rest();
        assert_eq!(path.points(), silent.points());
        assert!(path.points()[..8].iter().all(|p| p.y == 0.0));
    }
}
