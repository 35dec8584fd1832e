use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use std::path::Path;

use crate::types::ModelVertex;

/// Base color of the placeholder mesh substituted for missing models.
pub const PLACEHOLDER_COLOR: [f32; 4] = [1.0, 0.0, 1.0, 1.0];

/// Decoded RGBA8 texture pixels.
#[derive(Debug, Clone)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// One drawable chunk of a model: geometry plus its material.
#[derive(Debug, Clone)]
pub struct Primitive {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
    pub base_color: [f32; 4],
    pub texture: Option<TextureData>,
}

/// CPU-side model data, ready for GPU upload.
#[derive(Debug, Clone)]
pub struct MeshData {
    pub primitives: Vec<Primitive>,
}

impl MeshData {
    /// Magenta unit cube standing in for a model that failed to load.
    pub fn placeholder() -> Self {
        // (normal, u axis, v axis) per face.
        const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ];
        const CORNERS: [(f32, f32, [f32; 2]); 4] = [
            (-0.5, -0.5, [0.0, 1.0]),
            (0.5, -0.5, [1.0, 1.0]),
            (0.5, 0.5, [1.0, 0.0]),
            (-0.5, 0.5, [0.0, 0.0]),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, u_axis, v_axis) in FACES {
            let n = Vec3::from_array(normal);
            let u = Vec3::from_array(u_axis);
            let v = Vec3::from_array(v_axis);
            let base = vertices.len() as u32;
            for (du, dv, tex_coords) in CORNERS {
                let position = n * 0.5 + u * du + v * dv;
                vertices.push(ModelVertex {
                    position: position.to_array(),
                    normal,
                    tex_coords,
                });
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self {
            primitives: vec![Primitive {
                vertices,
                indices,
                base_color: PLACEHOLDER_COLOR,
                texture: None,
            }],
        }
    }
}

/// Loads a glTF file into mesh data, flattening the node hierarchy into
/// world-space primitives.
pub fn load_model(path: impl AsRef<Path>) -> Result<MeshData> {
    let path = path.as_ref();
    let (document, buffers, images) =
        gltf::import(path).with_context(|| format!("failed to load glTF file {path:?}"))?;

    log::info!(
        "loaded {:?}: {} nodes, {} meshes, {} images",
        path,
        document.nodes().count(),
        document.meshes().count(),
        images.len()
    );

    let mut primitives = Vec::new();
    for scene in document.scenes() {
        for node in scene.nodes() {
            process_node(&node, &buffers, &images, &Mat4::IDENTITY, &mut primitives)?;
        }
    }

    if primitives.is_empty() {
        log::warn!("no geometry found in {path:?}, substituting placeholder");
        return Ok(MeshData::placeholder());
    }

    Ok(MeshData { primitives })
}

/// Recursively walks the node hierarchy, accumulating transforms.
fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    images: &[gltf::image::Data],
    parent_transform: &Mat4,
    primitives: &mut Vec<Primitive>,
) -> Result<()> {
    let local_transform = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global_transform = *parent_transform * local_transform;

    if let Some(mesh) = node.mesh() {
        process_mesh(&mesh, buffers, images, &global_transform, primitives)?;
    }

    for child in node.children() {
        process_node(&child, buffers, images, &global_transform, primitives)?;
    }

    Ok(())
}

fn process_mesh(
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    images: &[gltf::image::Data],
    transform: &Mat4,
    primitives: &mut Vec<Primitive>,
) -> Result<()> {
    for primitive in mesh.primitives() {
        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let positions: Vec<Vec3> = reader
            .read_positions()
            .context("mesh primitive has no positions")?
            .map(|pos| transform.transform_point3(Vec3::from_array(pos)))
            .collect();

        if positions.is_empty() {
            continue;
        }

        let normals: Vec<Vec3> = match reader.read_normals() {
            Some(normals) => normals
                .map(|n| {
                    transform
                        .transform_vector3(Vec3::from_array(n))
                        .normalize_or_zero()
                })
                .collect(),
            None => vec![Vec3::Z; positions.len()],
        };

        let tex_coords: Vec<[f32; 2]> = match reader.read_tex_coords(0) {
            Some(coords) => coords.into_f32().collect(),
            None => vec![[0.0, 0.0]; positions.len()],
        };

        let vertices: Vec<ModelVertex> = positions
            .iter()
            .zip(&normals)
            .zip(&tex_coords)
            .map(|((position, normal), tex_coords)| ModelVertex {
                position: position.to_array(),
                normal: normal.to_array(),
                tex_coords: *tex_coords,
            })
            .collect();

        let indices: Vec<u32> = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..vertices.len() as u32).collect(),
        };

        let material = primitive.material().pbr_metallic_roughness();
        let base_color = material.base_color_factor();
        let texture = material
            .base_color_texture()
            .and_then(|info| convert_image(&images[info.texture().source().index()]));

        primitives.push(Primitive {
            vertices,
            indices,
            base_color,
            texture,
        });
    }

    Ok(())
}

/// Converts a decoded glTF image to RGBA8, the only format the renderer
/// uploads.
fn convert_image(data: &gltf::image::Data) -> Option<TextureData> {
    use gltf::image::Format;

    let pixels = match data.format {
        Format::R8G8B8A8 => data.pixels.clone(),
        Format::R8G8B8 => data
            .pixels
            .chunks_exact(3)
            .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 255])
            .collect(),
        Format::R8 => data
            .pixels
            .iter()
            .flat_map(|&r| [r, r, r, 255])
            .collect(),
        other => {
            log::warn!("unsupported texture format {other:?}, using material color");
            return None;
        }
    };

    Some(TextureData {
        width: data.width,
        height: data.height,
        pixels,
    })
}
