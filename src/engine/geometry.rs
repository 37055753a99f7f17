use std::collections::HashMap;

use glam::Vec3;

const PHI: f32 = 1.618_034;

/// Highest subdivision level; detail 5 already yields 720 faces
pub const MAX_DETAIL: u32 = 5;

const ICOSAHEDRON_VERTICES: [[f32; 3]; 12] = [
    [-1.0, PHI, 0.0],
    [1.0, PHI, 0.0],
    [-1.0, -PHI, 0.0],
    [1.0, -PHI, 0.0],
    [0.0, -1.0, PHI],
    [0.0, 1.0, PHI],
    [0.0, -1.0, -PHI],
    [0.0, 1.0, -PHI],
    [PHI, 0.0, -1.0],
    [PHI, 0.0, 1.0],
    [-PHI, 0.0, -1.0],
    [-PHI, 0.0, 1.0],
];

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Indexed triangle mesh on a sphere, with its unique edge list for wireframe drawing
#[derive(Debug, Clone, PartialEq)]
pub struct PolyhedronGeometry {
    pub radius: f32,
    pub detail: u32,
    vertices: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    edges: Vec<[u32; 2]>,
}

impl PolyhedronGeometry {
    /// Icosahedron whose faces are split into (detail + 1)^2 triangles each,
    /// every vertex pushed out to `radius`. `detail` is capped at [`MAX_DETAIL`].
    pub fn icosahedron(radius: f32, detail: u32) -> Self {
        let detail = detail.min(MAX_DETAIL);
        let base: Vec<Vec3> = ICOSAHEDRON_VERTICES.iter().map(|v| Vec3::from_array(*v)).collect();
        let mut builder = Builder::default();

        for face in ICOSAHEDRON_FACES {
            builder.subdivide(base[face[0]], base[face[1]], base[face[2]], detail, radius);
        }

        builder.finish(radius, detail)
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    pub fn edges(&self) -> &[[u32; 2]] {
        &self.edges
    }
}

#[derive(Default)]
struct Builder {
    vertices: Vec<Vec3>,
    lookup: HashMap<[i32; 3], u32>,
    triangles: Vec<[u32; 3]>,
}

impl Builder {
    /// Shared vertices along face seams are merged by quantized position
    fn vertex(&mut self, v: Vec3, radius: f32) -> u32 {
        let v = v.normalize() * radius;
        let key = [
            (v.x * 1e4).round() as i32,
            (v.y * 1e4).round() as i32,
            (v.z * 1e4).round() as i32,
        ];
        if let Some(&index) = self.lookup.get(&key) {
            return index;
        }
        let index = self.vertices.len() as u32;
        self.vertices.push(v);
        self.lookup.insert(key, index);
        index
    }

    fn subdivide(&mut self, a: Vec3, b: Vec3, c: Vec3, detail: u32, radius: f32) {
        let cols = (detail + 1) as usize;

        // grid[i][j]: row i walks from edge a-b toward c, j walks across the row
        let mut grid: Vec<Vec<u32>> = Vec::with_capacity(cols + 1);
        for i in 0..=cols {
            let t = i as f32 / cols as f32;
            let row_start = a.lerp(c, t);
            let row_end = b.lerp(c, t);
            let rows = cols - i;
            let row = (0..=rows)
                .map(|j| {
                    let p = if rows == 0 { row_start } else { row_start.lerp(row_end, j as f32 / rows as f32) };
                    self.vertex(p, radius)
                })
                .collect();
            grid.push(row);
        }

        for i in 0..cols {
            let span = 2 * (cols - i) - 1;
            for j in 0..span {
                let k = j / 2;
                let tri = if j % 2 == 0 {
                    [grid[i][k + 1], grid[i + 1][k], grid[i][k]]
                } else {
                    [grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]
                };
                self.triangles.push(tri);
            }
        }
    }

    fn finish(self, radius: f32, detail: u32) -> PolyhedronGeometry {
        let mut edges: Vec<[u32; 2]> = self
            .triangles
            .iter()
            .flat_map(|t| [[t[0], t[1]], [t[1], t[2]], [t[2], t[0]]])
            .map(|[a, b]| if a < b { [a, b] } else { [b, a] })
            .collect();
        edges.sort_unstable();
        edges.dedup();

        PolyhedronGeometry {
            radius,
            detail,
            vertices: self.vertices,
            triangles: self.triangles,
            edges,
        }
    }
}
