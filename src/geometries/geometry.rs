/// Generator of common geometry buffers such as vertices and indices. Should be
/// implemented on all geometry parameter structs.
///
/// There is an emphasis on the word "generator": the methods will create new
/// arrays of data every time they are invoked. To store the data, use
/// [`BufferGeometry::from_geometry`](super::BufferGeometry::from_geometry).
pub trait Geometry {
    /// Generates the vertices for this geometry. The return value is a tuple of
    /// the position buffer, the normal buffer, the color buffer, and the UV
    /// buffer in that order. The normal buffer holds flat per-facet normals.
    fn vertices(&self) -> (Vec<f32>, Vec<f32>, Vec<f32>, Vec<f32>);
    /// Generates the indices for this geometry if supported, otherwise returns
    /// [`None`](std::option::Option::None).
    fn indices(&self) -> Option<Vec<u16>>;
    /// Generates the smoothed per-vertex normal buffer for this geometry if it
    /// has one, otherwise returns [`None`](std::option::Option::None).
    fn smooth_normals(&self) -> Option<Vec<f32>> {
        None
    }
}
