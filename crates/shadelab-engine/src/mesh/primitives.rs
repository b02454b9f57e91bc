//! Small fixed meshes used by the demos.

use crate::paint::Color;

use super::streams::VertexStreams;

/// Owned mesh data with optional streams.
///
/// An empty stream vector means "absent", not "zero-length".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 4]>,
    pub tex_coords: Vec<[f32; 2]>,
    pub indices: Vec<u16>,
}

impl MeshData {
    pub fn streams(&self) -> VertexStreams<'_> {
        let mut streams = VertexStreams::new(&self.positions);
        if !self.normals.is_empty() {
            streams = streams.with_normals(&self.normals);
        }
        if !self.colors.is_empty() {
            streams = streams.with_colors(&self.colors);
        }
        if !self.tex_coords.is_empty() {
            streams = streams.with_tex_coords(&self.tex_coords);
        }
        streams
    }

    /// Sets every vertex to `color`.
    pub fn with_uniform_color(mut self, color: Color) -> Self {
        self.colors = vec![color.to_array(); self.positions.len()];
        self
    }
}

/// Square in the XY plane, side 1, centred at the origin (two triangles).
pub fn unit_square() -> MeshData {
    MeshData {
        positions: vec![
            [-0.5, 0.5, 0.0],
            [-0.5, -0.5, 0.0],
            [0.5, -0.5, 0.0],
            [0.5, 0.5, 0.0],
        ],
        indices: vec![0, 1, 2, 0, 2, 3],
        ..Default::default()
    }
}

/// Cube with side 1 centred at the origin; corners are shared (positions only).
pub fn unit_cube() -> MeshData {
    let positions = vec![
        [-0.5, -0.5, 0.5],
        [0.5, -0.5, 0.5],
        [0.5, 0.5, 0.5],
        [-0.5, 0.5, 0.5],
        [-0.5, -0.5, -0.5],
        [0.5, -0.5, -0.5],
        [0.5, 0.5, -0.5],
        [-0.5, 0.5, -0.5],
    ];

    #[rustfmt::skip]
    let indices = vec![
        0, 1, 2,  0, 2, 3, // +Z
        5, 4, 7,  5, 7, 6, // -Z
        3, 2, 6,  3, 6, 7, // +Y
        4, 5, 1,  4, 1, 0, // -Y
        1, 5, 6,  1, 6, 2, // +X
        4, 0, 3,  4, 3, 7, // -X
    ];

    MeshData { positions, indices, ..Default::default() }
}

/// X (red) and Y (green) axes through the origin as a line list.
pub fn axes(half_length: f32) -> MeshData {
    let l = half_length;
    MeshData {
        positions: vec![[-l, 0.0, 0.0], [l, 0.0, 0.0], [0.0, -l, 0.0], [0.0, l, 0.0]],
        colors: vec![
            Color::RED.to_array(),
            Color::RED.to_array(),
            Color::GREEN.to_array(),
            Color::GREEN.to_array(),
        ],
        indices: vec![0, 1, 2, 3],
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Attribute;

    fn indices_in_range(mesh: &MeshData) -> bool {
        mesh.indices.iter().all(|&i| (i as usize) < mesh.positions.len())
    }

    #[test]
    fn square_is_two_triangles() {
        let sq = unit_square();
        assert_eq!(sq.positions.len(), 4);
        assert_eq!(sq.indices.len(), 6);
        assert!(indices_in_range(&sq));
    }

    #[test]
    fn cube_has_twelve_triangles() {
        let cube = unit_cube();
        assert_eq!(cube.positions.len(), 8);
        assert_eq!(cube.indices.len(), 36);
        assert!(indices_in_range(&cube));
        assert!(cube.positions.iter().flatten().all(|c| c.abs() == 0.5));
    }

    #[test]
    fn axes_are_two_colored_segments() {
        let ax = axes(1.0);
        assert_eq!(ax.indices, vec![0, 1, 2, 3]);
        assert_eq!(ax.colors[0], Color::RED.to_array());
        assert_eq!(ax.colors[3], Color::GREEN.to_array());
    }

    #[test]
    fn empty_streams_are_absent() {
        let sq = unit_square();
        let streams = sq.streams();
        assert_eq!(streams.len_of(Attribute::Normal), None);
        assert_eq!(streams.len_of(Attribute::Color), None);

        let tinted = unit_square().with_uniform_color(Color::CYAN);
        assert_eq!(tinted.streams().len_of(Attribute::Color), Some(4));
        assert!(tinted.streams().validate().is_ok());
    }
}
