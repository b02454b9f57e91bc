use std::f32::consts::TAU;

use glam::Vec3;

use crate::error::Error;
use crate::paint::Color;
use crate::shading::ShadingMode;

use super::streams::VertexStreams;

/// Base circle radius.
pub const CONE_RADIUS: f32 = 0.5;

/// Tip of the cone.
pub const CONE_APEX: Vec3 = Vec3::new(0.0, 0.5, 0.0);

/// Height of the base circle.
pub const CONE_BASE_Y: f32 = -0.5;

/// Color applied to every vertex when the caller does not supply one.
pub const DEFAULT_CONE_COLOR: Color = Color::rgba(0.8, 0.8, 0.8, 1.0);

/// Fewest segments that still enclose a volume.
pub const MIN_CONE_SEGMENTS: u32 = 3;

/// Most segments whose `3 * segments` vertices stay addressable by `u16` indices.
pub const MAX_CONE_SEGMENTS: u32 = (u16::MAX as u32 + 1) / 3;

/// Texture coordinates repeated for every triangle (apex, base0, base1).
const TRIANGLE_TEX_COORDS: [[f32; 2]; 3] = [[0.5, 1.0], [0.0, 0.0], [1.0, 0.0]];

/// Unit cone (height 1, radius 0.5, centred at the origin) without a bottom cap.
///
/// Every segment is its own triangle: vertices are never shared, so each one
/// can carry the normal of its face. Two normal sets are computed up front:
///
/// - **face normals**: the cross product of the triangle edges, repeated on all
///   three corners (flat shading)
/// - **vertex normals**: the analytic radial direction of each vertex, with
///   `+Y` at the apex (smooth shading)
///
/// The vertex set does not average neighbouring faces. On a right circular
/// cone the radial direction is what an average would converge to, and it
/// keeps each vertex independent of the triangle topology.
///
/// `active_normals` holds a copy of whichever set is selected. Switching only
/// copies; nothing is recomputed and the cached sets never change.
#[derive(Debug, Clone)]
pub struct ConeMesh {
    segments: u32,
    positions: Vec<[f32; 3]>,
    face_normals: Vec<[f32; 3]>,
    vertex_normals: Vec<[f32; 3]>,
    active_normals: Vec<[f32; 3]>,
    colors: Vec<[f32; 4]>,
    tex_coords: Vec<[f32; 2]>,
    indices: Vec<u16>,
    shading: ShadingMode,
    normals_dirty: bool,
}

impl ConeMesh {
    /// Builds a cone with `segments` triangles in the default color.
    pub fn new(segments: u32) -> Result<Self, Error> {
        Self::with_color(segments, DEFAULT_CONE_COLOR)
    }

    /// Builds a cone with `segments` triangles, every vertex colored `color`.
    ///
    /// Fails with `Error::InvalidParameter` when `segments` is below
    /// [`MIN_CONE_SEGMENTS`] or above [`MAX_CONE_SEGMENTS`].
    pub fn with_color(segments: u32, color: Color) -> Result<Self, Error> {
        if segments < MIN_CONE_SEGMENTS {
            return Err(Error::invalid(
                "segments",
                format!("must be at least {MIN_CONE_SEGMENTS}, got {segments}"),
            ));
        }
        if segments > MAX_CONE_SEGMENTS {
            return Err(Error::invalid(
                "segments",
                format!("must be at most {MAX_CONE_SEGMENTS} for u16 indices, got {segments}"),
            ));
        }

        let vertex_count = 3 * segments as usize;
        let mut positions = Vec::with_capacity(vertex_count);
        let mut face_normals = Vec::with_capacity(vertex_count);
        let mut tex_coords = Vec::with_capacity(vertex_count);

        let step = TAU / segments as f32;
        for i in 0..segments {
            let base0 = base_point(i as f32 * step);
            let base1 = base_point((i + 1) as f32 * step);

            let normal = face_normal(CONE_APEX, base0, base1).to_array();

            positions.extend([CONE_APEX.to_array(), base0.to_array(), base1.to_array()]);
            face_normals.extend([normal; 3]);
            tex_coords.extend(TRIANGLE_TEX_COORDS);
        }

        let vertex_normals: Vec<[f32; 3]> = positions
            .iter()
            .map(|&p| radial_vertex_normal(Vec3::from_array(p)).to_array())
            .collect();

        // `segments <= MAX_CONE_SEGMENTS` keeps every index below `u16::MAX`.
        let indices: Vec<u16> = (0..vertex_count as u16).collect();

        log::debug!("generated cone mesh: {segments} segments, {vertex_count} vertices");

        Ok(Self {
            segments,
            active_normals: face_normals.clone(),
            positions,
            face_normals,
            vertex_normals,
            colors: vec![color.to_array(); vertex_count],
            tex_coords,
            indices,
            shading: ShadingMode::Flat,
            normals_dirty: false,
        })
    }

    #[inline]
    pub fn segments(&self) -> u32 {
        self.segments
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    #[inline]
    pub fn face_normals(&self) -> &[[f32; 3]] {
        &self.face_normals
    }

    #[inline]
    pub fn vertex_normals(&self) -> &[[f32; 3]] {
        &self.vertex_normals
    }

    /// The normal set that the GPU copy should mirror.
    #[inline]
    pub fn active_normals(&self) -> &[[f32; 3]] {
        &self.active_normals
    }

    #[inline]
    pub fn colors(&self) -> &[[f32; 4]] {
        &self.colors
    }

    #[inline]
    pub fn tex_coords(&self) -> &[[f32; 2]] {
        &self.tex_coords
    }

    #[inline]
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    #[inline]
    pub fn shading(&self) -> ShadingMode {
        self.shading
    }

    /// True when `active_normals` changed since the last upload.
    #[inline]
    pub fn normals_dirty(&self) -> bool {
        self.normals_dirty
    }

    pub(crate) fn mark_normals_uploaded(&mut self) {
        self.normals_dirty = false;
    }

    /// Selects the flat (per-face) normal set.
    pub fn use_face_normals(&mut self) {
        self.set_shading(ShadingMode::Flat);
    }

    /// Selects the smooth (per-vertex) normal set.
    pub fn use_vertex_normals(&mut self) {
        self.set_shading(ShadingMode::Smooth);
    }

    /// Copies the cached set for `mode` into `active_normals` and marks the
    /// GPU copy dirty.
    pub fn set_shading(&mut self, mode: ShadingMode) {
        let source = match mode {
            ShadingMode::Flat => &self.face_normals,
            ShadingMode::Smooth => &self.vertex_normals,
        };
        self.active_normals.copy_from_slice(source);
        self.shading = mode;
        self.normals_dirty = true;
    }

    /// All four streams, with the active normal set.
    pub fn streams(&self) -> VertexStreams<'_> {
        VertexStreams::new(&self.positions)
            .with_normals(&self.active_normals)
            .with_colors(&self.colors)
            .with_tex_coords(&self.tex_coords)
    }
}

#[inline]
fn base_point(angle: f32) -> Vec3 {
    Vec3::new(CONE_RADIUS * angle.cos(), CONE_BASE_Y, CONE_RADIUS * angle.sin())
}

/// Outward normal of the side triangle `(apex, base0, base1)`.
///
/// Edges are crossed as `(base1 - apex) × (base0 - apex)`, which points away
/// from the axis for counter-clockwise base angles. A degenerate triangle
/// falls back to `+Y`.
pub fn face_normal(apex: Vec3, base0: Vec3, base1: Vec3) -> Vec3 {
    (base1 - apex)
        .cross(base0 - apex)
        .try_normalize()
        .unwrap_or(Vec3::Y)
}

/// Analytic smooth-shading normal for a single cone vertex.
///
/// - above the origin (the apex): `+Y`
/// - otherwise: the horizontal direction `(x, 0, z)` away from the axis
/// - on the axis itself: `(0, ±1, 0)` following the sign of `y` (zero counts
///   as negative)
pub fn radial_vertex_normal(p: Vec3) -> Vec3 {
    if p.y > 0.0 {
        return Vec3::Y;
    }

    // y <= 0 here, so the on-axis case always resolves downwards.
    Vec3::new(p.x, 0.0, p.z).try_normalize().unwrap_or(Vec3::NEG_Y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_unit(n: [f32; 3]) {
        let len = Vec3::from_array(n).length();
        assert!((len - 1.0).abs() < EPS, "normal {n:?} has length {len}");
    }

    fn approx(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b).all(|(x, y)| (x - y).abs() < EPS)
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn sizes_scale_with_segments() {
        for segments in [3, 4, 7, 32, 100] {
            let cone = ConeMesh::new(segments).unwrap();
            let n = segments as usize;
            assert_eq!(cone.positions().as_flattened().len(), 9 * n);
            assert_eq!(cone.face_normals().len(), 3 * n);
            assert_eq!(cone.vertex_normals().len(), 3 * n);
            assert_eq!(cone.active_normals().len(), 3 * n);
            assert_eq!(cone.colors().len(), 3 * n);
            assert_eq!(cone.tex_coords().len(), 3 * n);
            assert_eq!(cone.indices().len(), 3 * n);
        }
    }

    #[test]
    fn indices_are_identity_order() {
        let cone = ConeMesh::new(9).unwrap();
        let expected: Vec<u16> = (0..27).collect();
        assert_eq!(cone.indices(), expected.as_slice());
    }

    #[test]
    fn rejects_too_few_segments() {
        for segments in [0, 1, 2] {
            let err = ConeMesh::new(segments).unwrap_err();
            assert!(
                matches!(err, Error::InvalidParameter { name: "segments", .. }),
                "segments = {segments}"
            );
        }
    }

    #[test]
    fn rejects_segments_beyond_u16_indices() {
        assert!(ConeMesh::new(MAX_CONE_SEGMENTS).is_ok());
        let err = ConeMesh::new(MAX_CONE_SEGMENTS + 1).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "segments", .. }));
    }

    #[test]
    fn largest_cone_ends_at_last_u16_index() {
        let cone = ConeMesh::new(MAX_CONE_SEGMENTS).unwrap();
        assert_eq!(cone.indices().last().copied(), Some(u16::MAX - 1));
    }

    #[test]
    fn four_segments_hit_the_quarter_angles() {
        let cone = ConeMesh::new(4).unwrap();
        assert_eq!(cone.vertex_count(), 12);
        assert_eq!(cone.indices(), &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);

        let expected_base = [
            [0.5, -0.5, 0.0],
            [0.0, -0.5, 0.5],
            [-0.5, -0.5, 0.0],
            [0.0, -0.5, -0.5],
        ];

        for (tri, corners) in cone.positions().chunks_exact(3).enumerate() {
            assert_eq!(corners[0], [0.0, 0.5, 0.0], "apex of triangle {tri}");
            assert!(approx(corners[1], expected_base[tri]), "base0 of triangle {tri}: {:?}", corners[1]);
            assert!(
                approx(corners[2], expected_base[(tri + 1) % 4]),
                "base1 of triangle {tri}: {:?}",
                corners[2]
            );
        }
    }

    #[test]
    fn default_and_custom_colors() {
        let cone = ConeMesh::new(5).unwrap();
        assert!(cone.colors().iter().all(|&c| c == [0.8, 0.8, 0.8, 1.0]));

        let tinted = ConeMesh::with_color(5, Color::rgba(1.0, 0.5, 0.31, 1.0)).unwrap();
        assert!(tinted.colors().iter().all(|&c| c == [1.0, 0.5, 0.31, 1.0]));
    }

    #[test]
    fn tex_coords_repeat_per_triangle() {
        let cone = ConeMesh::new(6).unwrap();
        for corners in cone.tex_coords().chunks_exact(3) {
            assert_eq!(corners, &TRIANGLE_TEX_COORDS);
        }
    }

    // ── face normals ──────────────────────────────────────────────────────

    #[test]
    fn face_normals_identical_within_triangle_and_unit() {
        let cone = ConeMesh::new(32).unwrap();
        for corners in cone.face_normals().chunks_exact(3) {
            assert_eq!(corners[0].map(f32::to_bits), corners[1].map(f32::to_bits));
            assert_eq!(corners[0].map(f32::to_bits), corners[2].map(f32::to_bits));
            assert_unit(corners[0]);
        }
    }

    #[test]
    fn face_normal_points_outward_and_up() {
        let apex = Vec3::new(0.0, 0.5, 0.0);
        let base0 = Vec3::new(0.5, -0.5, 0.0);
        let base1 = Vec3::new(0.0, -0.5, 0.5);
        let n = face_normal(apex, base0, base1);

        assert!((n.length() - 1.0).abs() < EPS);
        assert!(n.y > 0.0);
        // Away from the axis: towards the triangle's own base midpoint.
        let mid = (base0 + base1) * 0.5;
        assert!(Vec3::new(mid.x, 0.0, mid.z).dot(n) > 0.0);
        // (0.5, 0.25, 0.5) normalized.
        assert!(approx(n.to_array(), [2.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0]));
    }

    #[test]
    fn face_normals_all_point_outward() {
        let cone = ConeMesh::new(17).unwrap();
        for (corners, normals) in cone.positions().chunks_exact(3).zip(cone.face_normals().chunks_exact(3)) {
            let mid = (Vec3::from_array(corners[1]) + Vec3::from_array(corners[2])) * 0.5;
            let n = Vec3::from_array(normals[0]);
            assert!(Vec3::new(mid.x, 0.0, mid.z).dot(n) > 0.0);
            assert!(n.y > 0.0);
        }
    }

    #[test]
    fn degenerate_face_falls_back_to_up() {
        let p = Vec3::new(0.1, 0.2, 0.3);
        assert_eq!(face_normal(p, p, p), Vec3::Y);
    }

    // ── vertex normals ────────────────────────────────────────────────────

    #[test]
    fn apex_vertex_normal_is_up() {
        let cone = ConeMesh::new(12).unwrap();
        for (p, n) in cone.positions().iter().zip(cone.vertex_normals()) {
            if p[1] > 0.0 {
                assert_eq!(*n, [0.0, 1.0, 0.0]);
            }
        }
    }

    #[test]
    fn base_vertex_normals_are_radial_unit() {
        let cone = ConeMesh::new(12).unwrap();
        for (p, n) in cone.positions().iter().zip(cone.vertex_normals()) {
            assert_unit(*n);
            if p[1] <= 0.0 {
                assert_eq!(n[1], 0.0);
                let radial = Vec3::new(p[0], 0.0, p[2]).normalize();
                assert!(approx(*n, radial.to_array()));
            }
        }
    }

    #[test]
    fn axis_vertex_normal_resolves_to_exact_vertical() {
        assert_eq!(radial_vertex_normal(Vec3::new(0.0, -0.5, 0.0)), Vec3::NEG_Y);
        assert_eq!(radial_vertex_normal(Vec3::new(0.0, 0.0, 0.0)), Vec3::NEG_Y);
        assert_eq!(radial_vertex_normal(Vec3::new(0.0, 0.5, 0.0)), Vec3::Y);
    }

    // ── switching ─────────────────────────────────────────────────────────

    #[test]
    fn starts_flat_and_clean() {
        let cone = ConeMesh::new(8).unwrap();
        assert_eq!(cone.shading(), ShadingMode::Flat);
        assert_eq!(cone.active_normals(), cone.face_normals());
        assert!(!cone.normals_dirty());
    }

    #[test]
    fn switching_copies_the_selected_set() {
        let mut cone = ConeMesh::new(8).unwrap();
        cone.use_vertex_normals();
        assert_eq!(cone.shading(), ShadingMode::Smooth);
        assert_eq!(cone.active_normals(), cone.vertex_normals());
        assert!(cone.normals_dirty());

        cone.mark_normals_uploaded();
        assert!(!cone.normals_dirty());
    }

    #[test]
    fn flat_smooth_flat_round_trip_is_bit_identical() {
        let mut cone = ConeMesh::new(32).unwrap();
        let original = cone.active_normals().to_vec();
        let faces = cone.face_normals().to_vec();
        let verts = cone.vertex_normals().to_vec();

        cone.use_face_normals();
        cone.use_vertex_normals();
        cone.use_face_normals();

        let bits = |v: &[[f32; 3]]| v.iter().map(|n| n.map(f32::to_bits)).collect::<Vec<_>>();
        assert_eq!(bits(cone.active_normals()), bits(&original));
        assert_eq!(bits(cone.face_normals()), bits(&faces));
        assert_eq!(bits(cone.vertex_normals()), bits(&verts));
    }

    #[test]
    fn streams_expose_active_normals() {
        let mut cone = ConeMesh::new(5).unwrap();
        cone.set_shading(ShadingMode::Smooth);
        let streams = cone.streams();
        assert_eq!(streams.normals, Some(cone.vertex_normals()));
        assert!(streams.validate().is_ok());
    }
}
