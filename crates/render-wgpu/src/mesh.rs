use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use scenekit_common::Color;
use scenekit_scene::Geometry;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Triangle list ready for upload. Front faces wind counter-clockwise.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Tessellate a geometry descriptor.
pub fn tessellate(geometry: &Geometry) -> MeshData {
    match *geometry {
        Geometry::Box {
            width,
            height,
            depth,
        } => box_mesh(width, height, depth),
        Geometry::Icosahedron { radius, detail } => icosahedron_mesh(radius, detail),
    }
}

/// Axis-aligned box centred on the origin, one quad per face.
pub fn box_mesh(width: f32, height: f32, depth: f32) -> MeshData {
    let x = width * 0.5;
    let y = height * 0.5;
    let z = depth * 0.5;
    let v = |position: [f32; 3], normal: [f32; 3]| Vertex { position, normal };
    #[rustfmt::skip]
    let vertices = vec![
        // +Z face
        v([-x, -y,  z], [0.0, 0.0, 1.0]),
        v([ x, -y,  z], [0.0, 0.0, 1.0]),
        v([ x,  y,  z], [0.0, 0.0, 1.0]),
        v([-x,  y,  z], [0.0, 0.0, 1.0]),
        // -Z face
        v([ x, -y, -z], [0.0, 0.0, -1.0]),
        v([-x, -y, -z], [0.0, 0.0, -1.0]),
        v([-x,  y, -z], [0.0, 0.0, -1.0]),
        v([ x,  y, -z], [0.0, 0.0, -1.0]),
        // +X face
        v([ x, -y,  z], [1.0, 0.0, 0.0]),
        v([ x, -y, -z], [1.0, 0.0, 0.0]),
        v([ x,  y, -z], [1.0, 0.0, 0.0]),
        v([ x,  y,  z], [1.0, 0.0, 0.0]),
        // -X face
        v([-x, -y, -z], [-1.0, 0.0, 0.0]),
        v([-x, -y,  z], [-1.0, 0.0, 0.0]),
        v([-x,  y,  z], [-1.0, 0.0, 0.0]),
        v([-x,  y, -z], [-1.0, 0.0, 0.0]),
        // +Y face
        v([-x,  y,  z], [0.0, 1.0, 0.0]),
        v([ x,  y,  z], [0.0, 1.0, 0.0]),
        v([ x,  y, -z], [0.0, 1.0, 0.0]),
        v([-x,  y, -z], [0.0, 1.0, 0.0]),
        // -Y face
        v([-x, -y, -z], [0.0, -1.0, 0.0]),
        v([ x, -y, -z], [0.0, -1.0, 0.0]),
        v([ x, -y,  z], [0.0, -1.0, 0.0]),
        v([-x, -y,  z], [0.0, -1.0, 0.0]),
    ];
    let indices = (0..6u32)
        .flat_map(|face| {
            let b = face * 4;
            [b, b + 1, b + 2, b + 2, b + 3, b]
        })
        .collect();
    MeshData { vertices, indices }
}

const PHI: f32 = 1.618_034;

#[rustfmt::skip]
const ICOSAHEDRON_VERTICES: [[f32; 3]; 12] = [
    [-1.0,  PHI,  0.0], [ 1.0,  PHI,  0.0], [-1.0, -PHI,  0.0], [ 1.0, -PHI,  0.0],
    [ 0.0, -1.0,  PHI], [ 0.0,  1.0,  PHI], [ 0.0, -1.0, -PHI], [ 0.0,  1.0, -PHI],
    [ PHI,  0.0, -1.0], [ PHI,  0.0,  1.0], [-PHI,  0.0, -1.0], [-PHI,  0.0,  1.0],
];

#[rustfmt::skip]
const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
    [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
    [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
    [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
];

/// Icosphere: each icosahedron face is split into `(detail + 1)^2` triangles
/// and every vertex pushed out to `radius`.
///
/// Detail 0 keeps faceted normals; higher detail uses smooth radial normals.
pub fn icosahedron_mesh(radius: f32, detail: u32) -> MeshData {
    let cols = detail as usize + 1;
    let mut triangles: Vec<[Vec3; 3]> = Vec::with_capacity(20 * cols * cols);

    for face in ICOSAHEDRON_FACES {
        let [a, b, c] = face.map(|i| Vec3::from(ICOSAHEDRON_VERTICES[i]));
        subdivide_face(a, b, c, cols, &mut triangles);
    }

    let mut mesh = MeshData {
        vertices: Vec::with_capacity(triangles.len() * 3),
        indices: (0..(triangles.len() * 3) as u32).collect(),
    };
    for tri in triangles {
        let tri = tri.map(|p| p.normalize() * radius);
        let flat = (tri[1] - tri[0]).cross(tri[2] - tri[0]).normalize_or_zero();
        for p in tri {
            let normal = if detail == 0 { flat } else { p.normalize_or_zero() };
            mesh.vertices.push(Vertex {
                position: p.to_array(),
                normal: normal.to_array(),
            });
        }
    }
    mesh
}

fn subdivide_face(a: Vec3, b: Vec3, c: Vec3, cols: usize, out: &mut Vec<[Vec3; 3]>) {
    // grid[i][j]: row i runs from the a-c edge to the b-c edge.
    let mut grid: Vec<Vec<Vec3>> = Vec::with_capacity(cols + 1);
    for i in 0..=cols {
        let t = i as f32 / cols as f32;
        let aj = a.lerp(c, t);
        let bj = b.lerp(c, t);
        let rows = cols - i;
        let row = (0..=rows)
            .map(|j| {
                if rows == 0 {
                    aj
                } else {
                    aj.lerp(bj, j as f32 / rows as f32)
                }
            })
            .collect();
        grid.push(row);
    }

    for i in 0..cols {
        for j in 0..2 * (cols - i) - 1 {
            let k = j / 2;
            if j % 2 == 0 {
                out.push([grid[i][k + 1], grid[i + 1][k], grid[i][k]]);
            } else {
                out.push([grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]);
            }
        }
    }
}

/// Red, green and blue segments along +X, +Y and +Z, transformed by `world`.
pub fn axes_lines(size: f32, world: Mat4) -> Vec<LineVertex> {
    let axes = [
        (Vec3::X, [1.0, 0.0, 0.0, 1.0]),
        (Vec3::Y, [0.0, 1.0, 0.0, 1.0]),
        (Vec3::Z, [0.0, 0.0, 1.0, 1.0]),
    ];
    let origin = world.transform_point3(Vec3::ZERO).to_array();
    axes.into_iter()
        .flat_map(|(axis, color)| {
            [
                LineVertex {
                    position: origin,
                    color,
                },
                LineVertex {
                    position: world.transform_point3(axis * size).to_array(),
                    color,
                },
            ]
        })
        .collect()
}

/// Wireframe octahedron shaded from `sky` at the top to `ground` at the
/// bottom, transformed by `world`.
pub fn hemisphere_helper_lines(size: f32, sky: Color, ground: Color, world: Mat4) -> Vec<LineVertex> {
    let top = Vec3::Y * size;
    let bottom = -Vec3::Y * size;
    let ring = [Vec3::X, Vec3::Z, -Vec3::X, -Vec3::Z].map(|d| d * size);

    let sky = sky.scaled(1.0, 1.0);
    let ground = ground.scaled(1.0, 1.0);
    let mid = std::array::from_fn(|i| (sky[i] + ground[i]) * 0.5);

    let vertex = |p: Vec3, color: [f32; 4]| LineVertex {
        position: world.transform_point3(p).to_array(),
        color,
    };

    let mut lines = Vec::with_capacity(24);
    for (i, &p) in ring.iter().enumerate() {
        let next = ring[(i + 1) % ring.len()];
        lines.extend([vertex(p, mid), vertex(next, mid)]);
        lines.extend([vertex(top, sky), vertex(p, mid)]);
        lines.extend([vertex(bottom, ground), vertex(p, mid)]);
    }
    lines
}
