//! Triangle-mesh models loaded from Wavefront OBJ or glTF 2.0.

use std::fmt;
use std::path::Path;

use glam::{Mat3, Mat4, Vec3};

use super::bounds::{Bounded, BoundingBox};

/// Base colour used when the source file defines no material.
pub const DEFAULT_BASE_COLOR: [f32; 4] = [0.8, 0.8, 0.8, 1.0];

/// Interleaved vertex as uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Unit normal.
    pub normal: [f32; 3],
}

impl Vertex {
    /// Vertex buffer layout matching `mesh.wgsl` locations 0 and 1.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// One indexed triangle list with a flat base colour.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Name from the source file (may be empty).
    pub name: String,
    /// Vertices in world space (node transforms already applied).
    pub vertices: Vec<Vertex>,
    /// Triangle indices, three per face.
    pub indices: Vec<u32>,
    /// Linear RGBA base colour.
    pub base_color: [f32; 4],
}

impl Mesh {
    /// Build a mesh from positions and indices, generating normals when
    /// `normals` is `None` or does not match the position count.
    #[must_use]
    pub fn from_parts(
        name: impl Into<String>,
        positions: &[Vec3],
        normals: Option<&[Vec3]>,
        indices: Vec<u32>,
        base_color: [f32; 4],
    ) -> Self {
        let generated;
        let normals = match normals {
            Some(n) if n.len() == positions.len() => n,
            _ => {
                generated = generate_normals(positions, &indices);
                &generated
            }
        };
        let vertices = positions
            .iter()
            .zip(normals)
            .map(|(p, n)| Vertex {
                position: p.to_array(),
                normal: n.normalize_or(Vec3::Y).to_array(),
            })
            .collect();
        Self {
            name: name.into(),
            vertices,
            indices,
            base_color,
        }
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Drop triangles that reference missing vertices, and any trailing
    /// partial triangle.
    fn sanitize(&mut self) {
        let n = self.vertices.len() as u32;
        let valid: Vec<u32> = self
            .indices
            .chunks_exact(3)
            .filter(|tri| tri.iter().all(|&i| i < n))
            .flatten()
            .copied()
            .collect();
        if valid.len() != self.indices.len() {
            log::warn!(
                "mesh '{}': dropped {} invalid indices",
                self.name,
                self.indices.len() - valid.len()
            );
        }
        self.indices = valid;
    }
}

impl Bounded for Mesh {
    fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(
            self.vertices.iter().map(|v| Vec3::from_array(v.position)),
        )
    }
}

/// Area-weighted per-vertex normals.
#[must_use]
pub fn generate_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        // Unnormalized cross product weights by triangle area.
        let face = (positions[b] - positions[a])
            .cross(positions[c] - positions[a]);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }
    normals
        .into_iter()
        .map(|n| n.normalize_or(Vec3::Y))
        .collect()
}

/// Errors produced while loading a model file.
#[derive(Debug)]
pub enum ModelError {
    /// File extension is not `.obj`, `.gltf` or `.glb`.
    UnsupportedFormat(String),
    /// Wavefront OBJ parse failure.
    Obj(tobj::LoadError),
    /// glTF import failure.
    Gltf(gltf::Error),
    /// The file parsed but contained no triangles.
    Empty,
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat(ext) => {
                write!(f, "unsupported model format '{ext}'")
            }
            Self::Obj(e) => write!(f, "OBJ load failed: {e}"),
            Self::Gltf(e) => write!(f, "glTF load failed: {e}"),
            Self::Empty => write!(f, "model contains no triangles"),
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Obj(e) => Some(e),
            Self::Gltf(e) => Some(e),
            _ => None,
        }
    }
}

/// A loaded model: every triangle mesh from one file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    /// Meshes with at least one triangle.
    pub meshes: Vec<Mesh>,
}

impl Model {
    /// Wrap meshes, dropping empty ones.
    ///
    /// # Errors
    ///
    /// [`ModelError::Empty`] if no mesh has a triangle.
    pub fn from_meshes(meshes: Vec<Mesh>) -> Result<Self, ModelError> {
        let meshes: Vec<Mesh> = meshes
            .into_iter()
            .map(|mut m| {
                m.sanitize();
                m
            })
            .filter(|m| m.triangle_count() > 0)
            .collect();
        if meshes.is_empty() {
            return Err(ModelError::Empty);
        }
        Ok(Self { meshes })
    }

    /// Load a model, choosing the parser from the file extension.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] for unknown extensions, parse failures, or
    /// files without triangles.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let model = match ext.as_str() {
            "obj" => Self::load_obj(path)?,
            "gltf" | "glb" => Self::load_gltf(path)?,
            _ => return Err(ModelError::UnsupportedFormat(ext)),
        };
        log::info!(
            "loaded {}: {} meshes, {} triangles",
            path.display(),
            model.meshes.len(),
            model.triangle_count()
        );
        Ok(model)
    }

    fn load_obj(path: &Path) -> Result<Self, ModelError> {
        let (models, materials) = tobj::load_obj(path, &tobj::GPU_LOAD_OPTIONS)
            .map_err(ModelError::Obj)?;
        let materials = materials.unwrap_or_else(|e| {
            log::warn!("{}: material library not loaded: {e}", path.display());
            Vec::new()
        });

        let meshes = models
            .into_iter()
            .map(|m| {
                let positions: Vec<Vec3> = m
                    .mesh
                    .positions
                    .chunks_exact(3)
                    .map(Vec3::from_slice)
                    .collect();
                let normals: Vec<Vec3> = m
                    .mesh
                    .normals
                    .chunks_exact(3)
                    .map(Vec3::from_slice)
                    .collect();
                let base_color = m
                    .mesh
                    .material_id
                    .and_then(|id| materials.get(id))
                    .and_then(|mat| mat.diffuse)
                    .map_or(DEFAULT_BASE_COLOR, |[r, g, b]| [r, g, b, 1.0]);
                Mesh::from_parts(
                    m.name,
                    &positions,
                    Some(&normals),
                    m.mesh.indices,
                    base_color,
                )
            })
            .collect();
        Self::from_meshes(meshes)
    }

    fn load_gltf(path: &Path) -> Result<Self, ModelError> {
        let (document, buffers, _images) = gltf::import(path).map_err(ModelError::Gltf)?;

        let mut meshes = Vec::new();
        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next());
        match scene {
            Some(scene) => {
                for node in scene.nodes() {
                    collect_gltf_node(&node, Mat4::IDENTITY, &buffers, &mut meshes);
                }
            }
            // No scene: take meshes at their authored coordinates.
            None => {
                for mesh in document.meshes() {
                    push_gltf_mesh(&mesh, Mat4::IDENTITY, &buffers, &mut meshes);
                }
            }
        }
        Self::from_meshes(meshes)
    }

    /// Total triangles across meshes.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(Mesh::triangle_count).sum()
    }
}

impl Bounded for Model {
    fn bounding_box(&self) -> Option<BoundingBox> {
        self.meshes
            .iter()
            .filter_map(Bounded::bounding_box)
            .reduce(BoundingBox::union)
    }
}

fn collect_gltf_node(
    node: &gltf::Node<'_>,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut Vec<Mesh>,
) {
    let transform = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        push_gltf_mesh(&mesh, transform, buffers, out);
    }
    for child in node.children() {
        collect_gltf_node(&child, transform, buffers, out);
    }
}

fn push_gltf_mesh(
    mesh: &gltf::Mesh<'_>,
    transform: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut Vec<Mesh>,
) {
    let normal_matrix = Mat3::from_mat4(transform).inverse().transpose();
    let name = mesh.name().unwrap_or_default();

    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            log::debug!("skipping non-triangle primitive in mesh '{name}'");
            continue;
        }
        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
        let Some(positions) = reader.read_positions() else {
            continue;
        };
        let positions: Vec<Vec3> = positions
            .map(|p| transform.transform_point3(Vec3::from(p)))
            .collect();
        let normals: Option<Vec<Vec3>> = reader.read_normals().map(|n| {
            n.map(|n| normal_matrix * Vec3::from(n)).collect()
        });
        let indices: Vec<u32> = reader.read_indices().map_or_else(
            || (0..positions.len() as u32).collect(),
            |i| i.into_u32().collect(),
        );
        let base_color = primitive
            .material()
            .pbr_metallic_roughness()
            .base_color_factor();

        out.push(Mesh::from_parts(
            name,
            &positions,
            normals.as_deref(),
            indices,
            base_color,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Mesh {
        Mesh::from_parts(
            "quad",
            &[
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            None,
            vec![0, 1, 2, 0, 2, 3],
            DEFAULT_BASE_COLOR,
        )
    }

    #[test]
    fn generated_normals_face_plus_z() {
        for v in quad().vertices {
            assert_eq!(v.normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn mismatched_normals_are_regenerated() {
        let m = Mesh::from_parts(
            "tri",
            &[Vec3::ZERO, Vec3::X, Vec3::Y],
            Some(&[Vec3::X]),
            vec![0, 1, 2],
            DEFAULT_BASE_COLOR,
        );
        assert_eq!(m.vertices[0].normal, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn out_of_range_indices_are_dropped() {
        let mut m = quad();
        m.indices.extend([0, 1, 99, 2]);
        let model = Model::from_meshes(vec![m]).unwrap();
        assert_eq!(model.meshes[0].indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn empty_model_is_an_error() {
        let empty = Mesh::from_parts("e", &[], None, Vec::new(), DEFAULT_BASE_COLOR);
        assert!(matches!(Model::from_meshes(vec![empty]), Err(ModelError::Empty)));
    }

    #[test]
    fn model_bounds_cover_all_meshes() {
        let mut far = quad();
        for v in &mut far.vertices {
            v.position[2] += 5.0;
        }
        let model = Model::from_meshes(vec![quad(), far]).unwrap();
        let b = model.bounding_box().unwrap();
        assert_eq!(b.min, Vec3::ZERO);
        assert_eq!(b.max, Vec3::new(1.0, 1.0, 5.0));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = Model::load(Path::new("model.fbx")).unwrap_err();
        assert!(matches!(err, ModelError::UnsupportedFormat(ref e) if e == "fbx"));
    }

    #[test]
    fn loads_obj_from_disk() {
        let dir = std::env::temp_dir().join("meshview-model-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tri.obj");
        std::fs::write(
            &path,
            "o tri\nv 0 0 0\nv 2 0 0\nv 0 2 0\nf 1 2 3\n",
        )
        .unwrap();
        let model = Model::load(&path).unwrap();
        assert_eq!(model.triangle_count(), 1);
        let b = model.bounding_box().unwrap();
        assert_eq!(b.max, Vec3::new(2.0, 2.0, 0.0));
        assert_eq!(model.meshes[0].base_color, DEFAULT_BASE_COLOR);
    }
}
