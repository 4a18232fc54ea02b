use std::mem::size_of;

use super::Geometry;

/// Which normal set a [`BufferGeometry`] currently holds in its active
/// normal buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NormalSet {
    /// One normal per facet, replicated across the facet's vertices.
    Flat,
    /// Smoothed per-vertex normals.
    Smooth,
}

/// Shape of a triangular polygon 3D mesh with compiled buffer data.
///
/// Both shading-normal variants are kept resident so that switching between
/// flat and smooth shading is a buffer copy, not a regeneration.
pub struct BufferGeometry {
    /// Position attribute buffer. Every consecutive triplet specifies the
    /// position of a vertex relative to the geometry's origin.
    pub position: Vec<f32>,
    /// Active normal attribute buffer: the set that gets uploaded. Holds a
    /// copy of either [`face_normal`](Self::face_normal) or
    /// [`vertex_normal`](Self::vertex_normal).
    pub normal: Vec<f32>,
    /// Flat per-facet normals, identical across each facet's vertices.
    pub face_normal: Vec<f32>,
    /// Smoothed per-vertex normals.
    pub vertex_normal: Vec<f32>,
    /// Color attribute buffer. Every consecutive quadruple specifies the RGBA
    /// color of the corresponding vertex in [`position`](Self::position).
    pub color: Vec<f32>,
    /// UV attribute buffer. Every consecutive pair of numbers specifies the
    /// UV coordinates of the corresponding vertex in [`position`](Self::position).
    pub uv: Vec<f32>,
    /// List of indices. Every consecutive triplet defines a triangle formed
    /// by the vertices at the specified indices.
    pub indices: Vec<u16>,
    active_normal_set: NormalSet,
}

impl BufferGeometry {
    /// Creates a 3D geometry from the given geometry builder. The flat normal
    /// set starts out active.
    ///
    /// Geometries without a smoothed normal set fall back to the flat set;
    /// geometries without indices fall back to sequential indexing.
    pub fn from_geometry<G: Geometry>(geometry: &G) -> Self {
        let (position, face_normal, color, uv) = geometry.vertices();
        let vertex_normal = geometry
            .smooth_normals()
            .unwrap_or_else(|| face_normal.clone());
        let indices = geometry
            .indices()
            .unwrap_or_else(|| (0..(position.len() / 3) as u16).collect());

        Self {
            position,
            normal: face_normal.clone(),
            face_normal,
            vertex_normal,
            color,
            uv,
            indices,
            active_normal_set: NormalSet::Flat,
        }
    }

    /// Number of vertices across all attribute buffers.
    pub fn vertex_count(&self) -> usize {
        self.position.len() / 3
    }

    /// Number of indices to draw.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// The normal set currently held in [`normal`](Self::normal).
    pub fn active_normal_set(&self) -> NormalSet {
        self.active_normal_set
    }

    /// Copies the flat per-facet normal set into the active normal buffer.
    pub fn use_flat_shading(&mut self) {
        self.normal.copy_from_slice(&self.face_normal);
        self.active_normal_set = NormalSet::Flat;
    }

    /// Copies the smoothed per-vertex normal set into the active normal
    /// buffer.
    pub fn use_smooth_shading(&mut self) {
        self.normal.copy_from_slice(&self.vertex_normal);
        self.active_normal_set = NormalSet::Smooth;
    }

    /// Size in bytes of the position section of the packed buffer.
    pub fn position_bytes(&self) -> u64 {
        (self.position.len() * size_of::<f32>()) as u64
    }

    /// Size in bytes of the normal section of the packed buffer.
    pub fn normal_bytes(&self) -> u64 {
        (self.normal.len() * size_of::<f32>()) as u64
    }

    /// Size in bytes of the color section of the packed buffer.
    pub fn color_bytes(&self) -> u64 {
        (self.color.len() * size_of::<f32>()) as u64
    }

    /// Size in bytes of the UV section of the packed buffer.
    pub fn uv_bytes(&self) -> u64 {
        (self.uv.len() * size_of::<f32>()) as u64
    }

    /// Byte offset of the normal section inside the packed buffer.
    pub fn normal_offset(&self) -> u64 {
        self.position_bytes()
    }

    /// Byte offset of the color section inside the packed buffer.
    pub fn color_offset(&self) -> u64 {
        self.position_bytes() + self.normal_bytes()
    }

    /// Byte offset of the UV section inside the packed buffer.
    pub fn uv_offset(&self) -> u64 {
        self.color_offset() + self.color_bytes()
    }

    /// Total size in bytes of the packed buffer.
    pub fn packed_bytes(&self) -> u64 {
        self.uv_offset() + self.uv_bytes()
    }

    /// Packs the attribute buffers into one contiguous byte region laid out
    /// `position ++ normal ++ color ++ uv`, each section densely packed
    /// (structure of arrays, not interleaved per vertex).
    ///
    /// The normal section sits at [`normal_offset`](Self::normal_offset) and
    /// can be overwritten on its own without touching the other three.
    pub fn pack(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.packed_bytes() as usize);
        bytes.extend_from_slice(bytemuck::cast_slice(&self.position));
        bytes.extend_from_slice(bytemuck::cast_slice(&self.normal));
        bytes.extend_from_slice(bytemuck::cast_slice(&self.color));
        bytes.extend_from_slice(bytemuck::cast_slice(&self.uv));
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometries::ConeGeometry;

    fn cone_geometry(segments: u32) -> BufferGeometry {
        BufferGeometry::from_geometry(&ConeGeometry::new(
            segments,
            ConeGeometry::DEFAULT_COLOR,
        ))
    }

    fn bits(buffer: &[f32]) -> Vec<u32> {
        buffer.iter().map(|v| v.to_bits()).collect()
    }

    #[test]
    fn test_from_geometry_starts_flat() {
        let geometry = cone_geometry(8);

        assert_eq!(geometry.active_normal_set(), NormalSet::Flat);
        assert_eq!(bits(&geometry.normal), bits(&geometry.face_normal));
        assert_eq!(geometry.vertex_count(), 24);
        assert_eq!(geometry.index_count(), 24);
    }

    #[test]
    fn test_attribute_buffers_agree_on_vertex_count() {
        let geometry = cone_geometry(5);
        let vertex_count = geometry.vertex_count();

        assert_eq!(geometry.normal.len(), vertex_count * 3);
        assert_eq!(geometry.face_normal.len(), vertex_count * 3);
        assert_eq!(geometry.vertex_normal.len(), vertex_count * 3);
        assert_eq!(geometry.color.len(), vertex_count * 4);
        assert_eq!(geometry.uv.len(), vertex_count * 2);
    }

    #[test]
    fn test_indices_stay_in_range() {
        let geometry = cone_geometry(7);
        let vertex_count = geometry.vertex_count() as u16;

        assert!(geometry.indices.iter().all(|i| *i < vertex_count));
    }

    #[test]
    fn test_toggle_switches_active_set() {
        let mut geometry = cone_geometry(8);

        geometry.use_smooth_shading();
        assert_eq!(geometry.active_normal_set(), NormalSet::Smooth);
        assert_eq!(bits(&geometry.normal), bits(&geometry.vertex_normal));

        geometry.use_flat_shading();
        assert_eq!(geometry.active_normal_set(), NormalSet::Flat);
        assert_eq!(bits(&geometry.normal), bits(&geometry.face_normal));
    }

    #[test]
    fn test_toggle_is_idempotent() {
        let mut geometry = cone_geometry(8);

        geometry.use_flat_shading();
        let once = bits(&geometry.normal);
        geometry.use_flat_shading();

        assert_eq!(bits(&geometry.normal), once);
    }

    #[test]
    fn test_toggle_round_trip_restores_flat_normals() {
        let mut geometry = cone_geometry(8);
        let original = bits(&geometry.normal);

        geometry.use_smooth_shading();
        geometry.use_flat_shading();

        assert_eq!(bits(&geometry.normal), original);
    }

    #[test]
    fn test_packed_layout_offsets() {
        let geometry = cone_geometry(4);
        let packed = geometry.pack();

        assert_eq!(packed.len() as u64, geometry.packed_bytes());
        assert_eq!(geometry.normal_offset(), geometry.position_bytes());
        assert_eq!(
            geometry.color_offset(),
            geometry.position_bytes() + geometry.normal_bytes()
        );
        assert_eq!(
            geometry.uv_offset(),
            geometry.color_offset() + geometry.color_bytes()
        );

        let normal_section =
            &packed[geometry.normal_offset() as usize..geometry.color_offset() as usize];
        assert_eq!(normal_section, bytemuck::cast_slice::<f32, u8>(&geometry.normal));
    }

    #[test]
    fn test_toggle_changes_only_normal_section() {
        let mut geometry = cone_geometry(4);
        let flat_packed = geometry.pack();

        geometry.use_smooth_shading();
        let smooth_packed = geometry.pack();

        let normal_start = geometry.normal_offset() as usize;
        let normal_end = geometry.color_offset() as usize;

        assert_eq!(flat_packed[..normal_start], smooth_packed[..normal_start]);
        assert_eq!(flat_packed[normal_end..], smooth_packed[normal_end..]);
        assert_eq!(
            &smooth_packed[normal_start..normal_end],
            bytemuck::cast_slice::<f32, u8>(&geometry.vertex_normal)
        );
    }
}
