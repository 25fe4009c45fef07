use bytemuck::{Pod, Zeroable};
use surfplot_geometry::{GridSample, Lattice};
use surfplot_math::{DMat4, Point3};
use surfplot_mesh::SurfaceMesh;

use crate::camera::OrbitCamera;
use crate::lighting::Lighting;

/// Vertex with f32 data packed for GPU.
///
/// Layout: position at byte 0, texcoord at 12, normal at 20; 32 bytes total.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub texcoord: [f32; 2],
    pub normal: [f32; 3],
}

impl GpuVertex {
    pub fn from_sample(sample: &GridSample) -> Self {
        let p = sample.position.as_vec3();
        let t = sample.texcoord.as_vec2();
        let n = sample.normal.as_vec3();
        Self {
            position: p.to_array(),
            texcoord: t.to_array(),
            normal: n.to_array(),
        }
    }
}

/// GPU-ready buffers of one graph.
#[derive(Debug, Clone, Default)]
pub struct RenderBuffers {
    /// One vertex per lattice sample, indexed by the strip and grid buffers.
    pub vertices: Vec<GpuVertex>,
    /// Triangle strip, primitive restart enabled.
    pub strip: Vec<u32>,
    /// Line strip, primitive restart enabled.
    pub grid: Vec<u32>,
    /// Line list of normal segments.
    pub normal_lines: Vec<[f32; 3]>,
}

impl RenderBuffers {
    pub fn new(lattice: &Lattice, mesh: &SurfaceMesh) -> Self {
        Self {
            vertices: lattice.samples().iter().map(GpuVertex::from_sample).collect(),
            strip: mesh.strip.clone(),
            grid: mesh.grid.clone(),
            normal_lines: mesh.normal_lines.iter().map(point_to_f32).collect(),
        }
    }

    pub fn from_graph(graph: &crate::scene::Graph) -> Self {
        Self::new(graph.lattice(), graph.mesh())
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn strip_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.strip)
    }

    pub fn grid_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.grid)
    }

    pub fn normal_line_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normal_lines)
    }
}

fn point_to_f32(p: &Point3) -> [f32; 3] {
    p.as_vec3().to_array()
}

/// Uniform buffer for camera matrices, column-major.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniforms {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub view_projection: [[f32; 4]; 4],
    pub eye_position: [f32; 4],
}

impl CameraUniforms {
    pub fn from_camera(camera: &OrbitCamera) -> Self {
        let eye = camera.eye().as_vec3();
        Self {
            view: matrix_to_f32(camera.view_matrix()),
            projection: matrix_to_f32(camera.projection_matrix()),
            view_projection: matrix_to_f32(camera.view_projection()),
            eye_position: eye.extend(1.0).to_array(),
        }
    }
}

/// Uniform buffer for the scene light.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LightUniforms {
    pub direction: [f32; 4],
    /// Ambient, diffuse, specular, shininess.
    pub terms: [f32; 4],
}

impl LightUniforms {
    pub fn from_lighting(lighting: &Lighting) -> Self {
        Self {
            direction: lighting.direction.as_vec3().extend(0.0).to_array(),
            terms: [
                lighting.ambient,
                lighting.diffuse,
                lighting.specular,
                lighting.shininess,
            ],
        }
    }
}

fn matrix_to_f32(mat: DMat4) -> [[f32; 4]; 4] {
    mat.as_mat4().to_cols_array_2d()
}

#[cfg(test)]
mod tests {
    use super::*;
    use surfplot_math::{DVec3, Point2, Vector3};

    fn lattice() -> Lattice {
        let sample = |x: f64, y: f64| GridSample {
            position: DVec3::new(x, y, 0.0),
            texcoord: Point2::new(x, y),
            normal: Vector3::Z,
            defined: true,
        };
        Lattice::new(
            2,
            2,
            vec![
                sample(0.0, 1.0),
                sample(1.0, 1.0),
                sample(0.0, 0.0),
                sample(1.0, 0.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_gpu_vertex_layout() {
        assert_eq!(std::mem::size_of::<GpuVertex>(), 32);
        let v = GpuVertex {
            position: [1.0, 2.0, 3.0],
            texcoord: [4.0, 5.0],
            normal: [6.0, 7.0, 8.0],
        };
        let floats: [f32; 8] = bytemuck::cast(v);
        assert_eq!(floats, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn test_from_sample() {
        let sample = GridSample {
            position: DVec3::new(1.0, 2.0, 3.0),
            texcoord: Point2::new(0.25, 0.5),
            normal: Vector3::Y,
            defined: true,
        };
        let v = GpuVertex::from_sample(&sample);
        assert_eq!(v.position, [1.0, 2.0, 3.0]);
        assert_eq!(v.texcoord, [0.25, 0.5]);
        assert_eq!(v.normal, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_buffer_byte_sizes() {
        let lattice = lattice();
        let mesh = SurfaceMesh::build(&lattice);
        let buffers = RenderBuffers::new(&lattice, &mesh);
        assert_eq!(buffers.vertices.len(), 4);
        assert_eq!(buffers.vertex_bytes().len(), 4 * 32);
        assert_eq!(buffers.strip_bytes().len(), mesh.strip.len() * 4);
        assert_eq!(buffers.grid_bytes().len(), mesh.grid.len() * 4);
        assert_eq!(buffers.normal_line_bytes().len(), 8 * 12);
    }

    #[test]
    fn test_camera_uniforms() {
        let camera = OrbitCamera::default();
        let uniforms = CameraUniforms::from_camera(&camera);
        let eye = camera.eye();
        assert!((uniforms.eye_position[0] - eye.x as f32).abs() < 1e-6);
        assert!((uniforms.eye_position[2] - eye.z as f32).abs() < 1e-6);
        assert_eq!(uniforms.eye_position[3], 1.0);
        // Column 3, row 3 of an affine view matrix.
        assert!((uniforms.view[3][3] - 1.0).abs() < 1e-6);
        assert!((uniforms.projection[2][3] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_light_uniforms() {
        let light = Lighting::default();
        let uniforms = LightUniforms::from_lighting(&light);
        assert_eq!(uniforms.direction[3], 0.0);
        assert_eq!(uniforms.terms, [0.3, 0.7, 0.4, 32.0]);
    }
}
