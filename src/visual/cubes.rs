//! Grid of cubes whose depth follows the magnitude of one bin each.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

use super::VisualSink;
use crate::error::SetupError;
use crate::params::{CubeGridLayout, DepthMapping};

/// Per-instance data for a host renderer (column-major model matrix)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CubeInstance {
    pub model: [[f32; 4]; 4],
}

/// One cell of the grid
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cube {
    /// Center of the cube's front face (world units)
    pub position: Vec3,
    /// Z scale applied to the unit cube
    pub depth_scale: f32,
}

/// Bar-graph wall of cubes on the XY plane, depth along +Z
pub struct CubeGrid {
    cubes: Vec<Cube>,
    layout: CubeGridLayout,
    mapping: DepthMapping,
}

impl CubeGrid {
    /// Lay out `columns × rows` cubes centered on the origin, row-major from
    /// the bottom-left, bin 0 first
    pub fn new(layout: CubeGridLayout, mapping: DepthMapping) -> Result<Self, SetupError> {
        layout.validate()?;

        let x_offset = (layout.columns as f32 - 1.0) * layout.spacing / 2.0;
        let y_offset = (layout.rows as f32 - 1.0) * layout.spacing / 2.0;

        let mut cubes = Vec::with_capacity(layout.cell_count());
        for row in 0..layout.rows {
            for column in 0..layout.columns {
                cubes.push(Cube {
                    position: Vec3::new(
                        column as f32 * layout.spacing - x_offset,
                        row as f32 * layout.spacing - y_offset,
                        0.0,
                    ),
                    depth_scale: mapping.min_scale,
                });
            }
        }

        Ok(Self {
            cubes,
            layout,
            mapping,
        })
    }

    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }

    /// Model matrices for instanced drawing of a unit cube
    pub fn instances(&self) -> Vec<CubeInstance> {
        let size = self.layout.cube_size;
        self.cubes
            .iter()
            .map(|cube| {
                let depth = size * cube.depth_scale;
                // Grow backwards from the front face
                let center = cube.position + Vec3::new(0.0, 0.0, depth / 2.0);
                let model = Mat4::from_scale_rotation_translation(
                    Vec3::new(size, size, depth),
                    Quat::IDENTITY,
                    center,
                );
                CubeInstance {
                    model: model.to_cols_array_2d(),
                }
            })
            .collect()
    }
}

impl VisualSink for CubeGrid {
    fn cell_count(&self) -> usize {
        self.cubes.len()
    }

    fn update(&mut self, magnitudes: &[f64]) {
        for (cube, &magnitude) in self.cubes.iter_mut().zip(magnitudes) {
            cube.depth_scale = self.mapping.scale(magnitude);
        }
    }

    fn rest(&mut self) {
        for cube in &mut self.cubes {
            cube.depth_scale = self.mapping.min_scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_grid() -> CubeGrid {
        let layout = CubeGridLayout {
            columns: 4,
            rows: 2,
            spacing: 2.0,
            cube_size: 1.0,
        };
        CubeGrid::new(layout, DepthMapping::default()).unwrap()
    }

    #[test]
    fn test_grid_creation() {
        let grid = small_grid();
        assert_eq!(grid.cell_count(), 8);

        // Centered on the origin
        let sum: Vec3 = grid.cubes().iter().map(|c| c.position).sum();
        assert!(sum.length() < 1e-5);

        assert_eq!(grid.cubes()[0].position, Vec3::new(-3.0, -1.0, 0.0));
        assert_eq!(grid.cubes()[7].position, Vec3::new(3.0, 1.0, 0.0));

        // Front faces share the XY plane
        assert!(grid.cubes().iter().all(|c| c.position.z == 0.0));
    }

    #[test]
    fn test_update_scales_depth() {
        let mut grid = small_grid();
        let mapping = DepthMapping::default();

        grid.update(&[0.0, 255.0, 127.5, 25.5, 0.0, 0.0, 0.0, 510.0]);

        assert_eq!(grid.cubes()[0].depth_scale, mapping.min_scale);
        assert!((grid.cubes()[1].depth_scale - 10.0).abs() < 1e-5);
        assert!((grid.cubes()[2].depth_scale - 5.0).abs() < 1e-5);
        assert!((grid.cubes()[3].depth_scale - 1.0).abs() < 1e-5);
        // No upper clamp
        assert!((grid.cubes()[7].depth_scale - 20.0).abs() < 1e-5);

        grid.rest();
        assert!(grid
            .cubes()
            .iter()
            .all(|c| c.depth_scale == mapping.min_scale));
    }

    #[test]
    fn test_instances_follow_depth() {
        let mut grid = small_grid();
        grid.update(&[255.0; 8]);

        let instances = grid.instances();
        assert_eq!(instances.len(), 8);

        let model = Mat4::from_cols_array_2d(&instances[0].model);
        let (scale, _, translation) = model.to_scale_rotation_translation();
        assert!((scale.z - 10.0).abs() < 1e-4);
        assert!((translation.z - 5.0).abs() < 1e-4);

        // Depth only stretches along Z
        assert!((scale.x - 1.0).abs() < 1e-4);
        assert!((scale.y - 1.0).abs() < 1e-4);
        assert_eq!(translation.truncate(), grid.cubes()[0].position.truncate());

        // Pod data can be handed to a GPU buffer as raw bytes
        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        assert_eq!(bytes.len(), 8 * 64);
    }

    #[test]
    fn test_empty_layout_rejected() {
        let layout = CubeGridLayout {
            columns: 0,
            ..CubeGridLayout::default()
        };
        assert!(CubeGrid::new(layout, DepthMapping::default()).is_err());
    }
}
