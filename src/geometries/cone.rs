use std::f32::consts::PI;

use glam::Vec3;

use super::Geometry;

/// Parameters of a unit cone approximated by flat triangular facets.
///
/// The cone is an open surface of revolution: `segments` side facets around
/// the y axis, no base cap. Every facet owns its 3 vertices, so the facets
/// stay flat without any vertex splitting and the index buffer is the trivial
/// sequence `0..3 * segments`.
pub struct ConeGeometry {
    /// Number of facets around the circumference. `0` yields empty buffers;
    /// counts below 3 yield a degenerate surface of defined layout but
    /// undefined geometric quality.
    pub segments: u32,
    /// RGBA color broadcast to every vertex.
    pub color: [f32; 4],
}

impl Default for ConeGeometry {
    /// Returns a 32-facet cone in the default color.
    fn default() -> Self {
        Self {
            segments: 32,
            color: Self::DEFAULT_COLOR,
        }
    }
}

impl ConeGeometry {
    /// Base radius of the cone.
    pub const RADIUS: f32 = 0.5;
    /// Half of the cone's height. The apex sits at `(0, HALF_HEIGHT, 0)` and
    /// the base rim at `y = -HALF_HEIGHT`.
    pub const HALF_HEIGHT: f32 = 0.5;
    /// Default vertex color: opaque light gray.
    pub const DEFAULT_COLOR: [f32; 4] = [0.8, 0.8, 0.8, 1.0];

    /// Creates cone parameters with the given facet count and vertex color.
    pub fn new(segments: u32, color: [f32; 4]) -> Self {
        Self { segments, color }
    }

    /// Flat normal of facet `i`, from the two rim directions with a unit
    /// y-drop. These are exactly the apex-to-rim edge vectors of the facet.
    ///
    /// A degenerate facet yields the zero vector rather than NaN.
    fn facet_normal(&self, i: u32) -> Vec3 {
        let angle_step = 2.0 * PI / self.segments as f32;
        let angle0 = i as f32 * angle_step;
        let angle1 = (i + 1) as f32 * angle_step;

        let a = Vec3::new(
            Self::RADIUS * angle1.cos(),
            -1.0,
            Self::RADIUS * angle1.sin(),
        );
        let b = Vec3::new(
            Self::RADIUS * angle0.cos(),
            -1.0,
            Self::RADIUS * angle0.sin(),
        );

        a.cross(b).normalize_or_zero()
    }
}

impl Geometry for ConeGeometry {
    fn vertices(&self) -> (Vec<f32>, Vec<f32>, Vec<f32>, Vec<f32>) {
        let vertex_count = (self.segments * 3) as usize;
        let mut position = Vec::with_capacity(vertex_count * 3);
        let mut normal = Vec::with_capacity(vertex_count * 3);
        let mut color = Vec::with_capacity(vertex_count * 4);
        let mut uv = Vec::with_capacity(vertex_count * 2);

        let angle_step = 2.0 * PI / self.segments as f32;

        for i in 0..self.segments {
            let angle0 = i as f32 * angle_step;
            let angle1 = (i + 1) as f32 * angle_step;

            let x0_bot = Self::RADIUS * angle0.cos();
            let z0_bot = Self::RADIUS * angle0.sin();
            let x1_bot = Self::RADIUS * angle1.cos();
            let z1_bot = Self::RADIUS * angle1.sin();

            // Facet vertex order, CCW seen from outside: apex, bot1, bot0.
            position.extend_from_slice(&[
                0.0,
                Self::HALF_HEIGHT,
                0.0,
                x1_bot,
                -Self::HALF_HEIGHT,
                z1_bot,
                x0_bot,
                -Self::HALF_HEIGHT,
                z0_bot,
            ]);

            // One flat normal per facet, replicated across its 3 vertices.
            let n = self.facet_normal(i);
            for _ in 0..3 {
                normal.extend_from_slice(&n.to_array());
            }

            for _ in 0..3 {
                color.extend_from_slice(&self.color);
            }

            // Cone-unwrap mapping: u follows the angle, v runs from the rim
            // (0) up to the apex (1).
            let u0 = i as f32 / self.segments as f32;
            let u1 = (i + 1) as f32 / self.segments as f32;
            uv.extend_from_slice(&[u0, 1.0, u1, 0.0, u0, 0.0]);
        }

        (position, normal, color, uv)
    }

    fn indices(&self) -> Option<Vec<u16>> {
        // Vertices are not shared between facets, so indexing is sequential.
        // Counts that overflow 16 bits are rejected at the mesh level.
        Some((0..self.segments * 3).map(|i| i as u16).collect())
    }

    fn smooth_normals(&self) -> Option<Vec<f32>> {
        let segments = self.segments;
        let mut smoothed = Vec::with_capacity((segments * 9) as usize);

        for i in 0..segments {
            let n = self.facet_normal(i);
            let next = self.facet_normal((i + 1) % segments);
            let prev = self.facet_normal((i + segments - 1) % segments);

            // The apex points straight up; each rim vertex averages its
            // facet's flat normal with the adjacent facet's on that side,
            // wrapping around at the seam. A zero-length average yields the
            // zero vector rather than NaN.
            smoothed.extend_from_slice(&[0.0, 1.0, 0.0]);
            smoothed.extend_from_slice(&((n + next) / 2.0).normalize_or_zero().to_array());
            smoothed.extend_from_slice(&((n + prev) / 2.0).normalize_or_zero().to_array());
        }

        Some(smoothed)
    }
}
