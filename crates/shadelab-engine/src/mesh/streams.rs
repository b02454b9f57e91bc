use std::ops::Range;

use crate::error::Error;

/// Per-vertex attribute kinds understood by the render backend.
///
/// Each kind has a fixed shader location, so a program can consume any subset
/// of a mesh's streams.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Attribute {
    Position,
    Normal,
    Color,
    TexCoord,
}

impl Attribute {
    /// Region order inside a packed vertex buffer.
    pub const ALL: [Attribute; 4] = [
        Attribute::Position,
        Attribute::Normal,
        Attribute::Color,
        Attribute::TexCoord,
    ];

    #[inline]
    pub const fn location(self) -> u32 {
        match self {
            Attribute::Position => 0,
            Attribute::Normal => 1,
            Attribute::Color => 2,
            Attribute::TexCoord => 3,
        }
    }

    #[inline]
    pub const fn components(self) -> u64 {
        match self {
            Attribute::Position | Attribute::Normal => 3,
            Attribute::Color => 4,
            Attribute::TexCoord => 2,
        }
    }

    /// Bytes per vertex for this attribute (tightly packed `f32`s).
    #[inline]
    pub const fn byte_stride(self) -> u64 {
        self.components() * std::mem::size_of::<f32>() as u64
    }

    #[inline]
    const fn slot(self) -> usize {
        self.location() as usize
    }
}

/// Borrowed, non-interleaved vertex data.
///
/// `positions` is mandatory; the other streams are optional but, when present,
/// must have exactly one entry per position.
#[derive(Debug, Copy, Clone)]
pub struct VertexStreams<'a> {
    pub positions: &'a [[f32; 3]],
    pub normals: Option<&'a [[f32; 3]]>,
    pub colors: Option<&'a [[f32; 4]]>,
    pub tex_coords: Option<&'a [[f32; 2]]>,
}

impl<'a> VertexStreams<'a> {
    pub fn new(positions: &'a [[f32; 3]]) -> Self {
        Self {
            positions,
            normals: None,
            colors: None,
            tex_coords: None,
        }
    }

    pub fn with_normals(mut self, normals: &'a [[f32; 3]]) -> Self {
        self.normals = Some(normals);
        self
    }

    pub fn with_colors(mut self, colors: &'a [[f32; 4]]) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn with_tex_coords(mut self, tex_coords: &'a [[f32; 2]]) -> Self {
        self.tex_coords = Some(tex_coords);
        self
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of entries in the stream for `attr`, if present.
    pub fn len_of(&self, attr: Attribute) -> Option<usize> {
        match attr {
            Attribute::Position => Some(self.positions.len()),
            Attribute::Normal => self.normals.map(<[_]>::len),
            Attribute::Color => self.colors.map(<[_]>::len),
            Attribute::TexCoord => self.tex_coords.map(<[_]>::len),
        }
    }

    /// Raw bytes of the stream for `attr`, if present.
    pub fn bytes(&self, attr: Attribute) -> Option<&'a [u8]> {
        match attr {
            Attribute::Position => Some(bytemuck::cast_slice(self.positions)),
            Attribute::Normal => self.normals.map(bytemuck::cast_slice),
            Attribute::Color => self.colors.map(bytemuck::cast_slice),
            Attribute::TexCoord => self.tex_coords.map(bytemuck::cast_slice),
        }
    }

    /// Checks that the streams describe a non-empty, consistently sized mesh.
    pub fn validate(&self) -> Result<(), Error> {
        let count = self.vertex_count();
        if count == 0 {
            return Err(Error::invalid("positions", "mesh has no vertices"));
        }

        for attr in Attribute::ALL {
            if let Some(len) = self.len_of(attr)
                && len != count
            {
                return Err(Error::invalid(
                    "streams",
                    format!("{attr:?} stream has {len} entries, expected {count}"),
                ));
            }
        }

        Ok(())
    }

    /// Computes where each present stream lands inside one packed buffer.
    pub fn region_layout(&self) -> RegionLayout {
        let mut layout = RegionLayout::default();
        let mut offset = 0u64;

        for attr in Attribute::ALL {
            let Some(len) = self.len_of(attr) else { continue };
            let size = len as u64 * attr.byte_stride();
            layout.regions[attr.slot()] = Some(offset..offset + size);
            offset += size;
        }

        layout.total_size = offset;
        layout
    }
}

/// Byte ranges of the attribute regions inside a packed vertex buffer.
///
/// Regions follow `Attribute::ALL` order: positions, normals, colors, tex
/// coords. Absent streams take no space.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct RegionLayout {
    regions: [Option<Range<u64>>; 4],
    total_size: u64,
}

impl RegionLayout {
    #[inline]
    pub fn region(&self, attr: Attribute) -> Option<Range<u64>> {
        self.regions[attr.slot()].clone()
    }

    #[inline]
    pub fn contains(&self, attr: Attribute) -> bool {
        self.regions[attr.slot()].is_some()
    }

    #[inline]
    pub fn total_size(&self) -> u64 {
        self.total_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRI: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
    const NORMALS: [[f32; 3]; 3] = [[0.0, 0.0, 1.0]; 3];
    const COLORS: [[f32; 4]; 3] = [[1.0; 4]; 3];
    const UVS: [[f32; 2]; 3] = [[0.0; 2]; 3];

    #[test]
    fn regions_are_contiguous_in_attribute_order() {
        let streams = VertexStreams::new(&TRI)
            .with_normals(&NORMALS)
            .with_colors(&COLORS)
            .with_tex_coords(&UVS);
        let layout = streams.region_layout();

        assert_eq!(layout.region(Attribute::Position), Some(0..36));
        assert_eq!(layout.region(Attribute::Normal), Some(36..72));
        assert_eq!(layout.region(Attribute::Color), Some(72..120));
        assert_eq!(layout.region(Attribute::TexCoord), Some(120..144));
        assert_eq!(layout.total_size(), 144);
    }

    #[test]
    fn normal_region_starts_after_positions() {
        let streams = VertexStreams::new(&TRI).with_normals(&NORMALS);
        let layout = streams.region_layout();
        let positions_size = std::mem::size_of_val(&TRI) as u64;
        assert_eq!(layout.region(Attribute::Normal).map(|r| r.start), Some(positions_size));
    }

    #[test]
    fn absent_streams_take_no_space() {
        let streams = VertexStreams::new(&TRI).with_colors(&COLORS);
        let layout = streams.region_layout();

        assert!(!layout.contains(Attribute::Normal));
        assert_eq!(layout.region(Attribute::Color), Some(36..84));
        assert_eq!(layout.total_size(), 84);
    }

    #[test]
    fn validate_rejects_mismatched_lengths() {
        let short = [[0.0f32; 3]; 2];
        let err = VertexStreams::new(&TRI).with_normals(&short).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "streams", .. }));
    }

    #[test]
    fn validate_rejects_empty_mesh() {
        let err = VertexStreams::new(&[]).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "positions", .. }));
    }

    #[test]
    fn bytes_match_region_sizes() {
        let streams = VertexStreams::new(&TRI).with_tex_coords(&UVS);
        let layout = streams.region_layout();
        for attr in Attribute::ALL {
            let bytes = streams.bytes(attr).map(<[u8]>::len);
            let region = layout.region(attr).map(|r| (r.end - r.start) as usize);
            assert_eq!(bytes, region, "{attr:?}");
        }
    }
}
