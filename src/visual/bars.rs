//! Terminal bar graph.

use super::VisualSink;

const LEVELS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Bins averaged into a fixed number of block-character columns
pub struct BarMeter {
    levels: Vec<f64>,
    columns: usize,
}

impl BarMeter {
    pub fn new(cells: usize, columns: usize) -> Self {
        Self {
            levels: vec![0.0; cells],
            columns: columns.clamp(1, cells.max(1)),
        }
    }

    /// One line of `columns` characters, full block at magnitude 255
    pub fn render(&self) -> String {
        if self.levels.is_empty() {
            return String::new();
        }
        let chunk = self.levels.len().div_ceil(self.columns);
        self.levels
            .chunks(chunk)
            .map(|bins| {
                let mean = bins.iter().sum::<f64>() / bins.len() as f64;
                let level = (mean / 255.0 * (LEVELS.len() - 1) as f64).round();
                LEVELS[level.clamp(0.0, (LEVELS.len() - 1) as f64) as usize]
            })
            .collect()
    }
}

impl VisualSink for BarMeter {
    fn cell_count(&self) -> usize {
        self.levels.len()
    }

    fn update(&mut self, magnitudes: &[f64]) {
        for (level, &magnitude) in self.levels.iter_mut().zip(magnitudes) {
            *level = magnitude;
        }
    }

    fn rest(&mut self) {
        self.levels.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_groups_bins() {
        let mut meter = BarMeter::new(8, 4);
        meter.update(&[0.0, 0.0, 255.0, 255.0, 127.5, 127.5, 300.0, 300.0]);
        assert_eq!(meter.render(), " █▄█");

        meter.rest();
        assert_eq!(meter.render(), "    ");
    }
}
