//! Visualization parameters: magnitude mapping, cube grid layout and canvas size.

use crate::error::SetupError;

/// Mapping from byte-scale magnitude to cube depth scale
#[derive(Debug, Clone)]
pub struct DepthMapping {
    /// Depth gain K (depth units per full-scale magnitude)
    /// Formula: scale = max(magnitude / 255 * K, min_scale)
    pub depth_gain: f32,

    /// Smallest depth scale a cube may take, keeps silent cells visible
    pub min_scale: f32,
}

impl Default for DepthMapping {
    fn default() -> Self {
        Self {
            depth_gain: 10.0,
            min_scale: 0.1,
        }
    }
}

impl DepthMapping {
    /// Depth scale for one magnitude value
    pub fn scale(&self, magnitude: f64) -> f32 {
        ((magnitude / 255.0) as f32 * self.depth_gain).max(self.min_scale)
    }
}

/// Cube grid layout on the XY plane (depth grows along Z)
#[derive(Debug, Clone)]
pub struct CubeGridLayout {
    /// Cubes per row (X axis)
    pub columns: usize,

    /// Rows of cubes (Y axis)
    pub rows: usize,

    /// Distance between neighbouring cube centers (world units)
    pub spacing: f32,

    /// Edge length of an unscaled cube (world units)
    pub cube_size: f32,
}

impl Default for CubeGridLayout {
    fn default() -> Self {
        // 32 × 16 = 512 cells, one per bin of the default half spectrum
        Self {
            columns: 32,
            rows: 16,
            spacing: 1.2,
            cube_size: 1.0,
        }
    }
}

impl CubeGridLayout {
    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }

    /// Smallest layout holding `cells` cubes, as square as the count allows
    pub fn for_cell_count(cells: usize) -> Self {
        let mut columns = (cells as f64).sqrt().ceil() as usize;
        while columns > 1 && cells % columns != 0 {
            columns += 1;
        }
        let columns = columns.max(1);
        Self {
            columns,
            rows: cells / columns,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), SetupError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(SetupError::InvalidConfig(format!(
                "Cube grid must have at least one cell, got {}x{}",
                self.columns, self.rows
            )));
        }
        if self.spacing <= 0.0 || self.cube_size <= 0.0 {
            return Err(SetupError::InvalidConfig(
                "Cube spacing and size must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// 2D canvas the waveform path is drawn on
#[derive(Debug, Clone)]
pub struct CanvasConfig {
    /// Canvas width (pixels)
    pub width: f32,

    /// Canvas height (pixels)
    pub height: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 200.0,
        }
    }
}
