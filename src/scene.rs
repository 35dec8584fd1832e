use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// A single axis-angle rotation step in an object's transform chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisRotation {
    pub axis: [f32; 3],
    pub degrees: f32,
}

impl AxisRotation {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_axis_angle(
            Vec3::from_array(self.axis).normalize(),
            self.degrees.to_radians(),
        )
    }
}

/// One static object placement: which model to draw and where.
///
/// The model matrix composes translation, then the rotations in listed
/// order, then scale - the same chain the transforms were authored in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub model: PathBuf,
    #[serde(default)]
    pub translation: [f32; 3],
    #[serde(default)]
    pub rotations: Vec<AxisRotation>,
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl SceneObject {
    pub fn model_matrix(&self) -> Mat4 {
        let mut matrix = Mat4::from_translation(Vec3::from_array(self.translation));
        for rotation in &self.rotations {
            matrix *= rotation.matrix();
        }
        matrix * Mat4::from_scale(Vec3::from_array(self.scale))
    }
}

/// Skybox cubemap faces in +X, -X, +Y, -Y, +Z, -Z order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkyboxConfig {
    pub faces: [PathBuf; 6],
}

/// Complete scene description: camera start, skybox, and the fixed object
/// placements drawn every frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default = "default_camera_position")]
    pub camera_position: [f32; 3],
    pub skybox: SkyboxConfig,
    pub objects: Vec<SceneObject>,
}

fn default_camera_position() -> [f32; 3] {
    [0.0, 0.0, 3.0]
}

impl SceneConfig {
    /// Load a scene description from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("failed to open scene file {path:?}"))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse scene file {path:?}"))
    }

    /// The built-in bedroom scene: a furnished room enclosed by a
    /// wood-and-flower cubemap.
    pub fn bedroom() -> Self {
        fn object(
            name: &str,
            translation: [f32; 3],
            rotations: &[([f32; 3], f32)],
            scale: f32,
        ) -> SceneObject {
            SceneObject {
                name: name.to_string(),
                model: PathBuf::from(format!("assets/models/{name}.glb")),
                translation,
                rotations: rotations
                    .iter()
                    .map(|&(axis, degrees)| AxisRotation { axis, degrees })
                    .collect(),
                scale: [scale, scale, scale],
            }
        }

        const Y: [f32; 3] = [0.0, 1.0, 0.0];
        const X: [f32; 3] = [1.0, 0.0, 0.0];

        Self {
            camera_position: default_camera_position(),
            skybox: SkyboxConfig {
                faces: [
                    PathBuf::from("assets/textures/flower.jpg"),
                    PathBuf::from("assets/textures/flower.jpg"),
                    PathBuf::from("assets/textures/wood.png"),
                    PathBuf::from("assets/textures/wood.png"),
                    PathBuf::from("assets/textures/flower.jpg"),
                    PathBuf::from("assets/textures/flower.jpg"),
                ],
            },
            objects: vec![
                object("bed", [-0.56, -0.73, -0.29], &[], 0.4),
                object(
                    "chair",
                    [0.4, -1.0, 0.4],
                    &[(Y, 90.0), (X, -90.0)],
                    0.0055,
                ),
                object("girl", [0.0, -1.0, 0.0], &[], 0.007),
                object("bedside", [-0.15, -1.0, -1.0], &[], 0.01),
                object("clock", [0.0, 0.5, -1.0], &[(Y, -90.0)], 0.3),
                object("table", [0.85, -1.0, 0.55], &[(Y, -90.0)], 0.014),
                object("door", [0.7, -1.05, -1.0], &[(Y, 180.0)], 0.1),
                object("imac", [0.9, -0.485, 0.4], &[(Y, -90.0)], 1.0),
                object("keyboard", [0.66, -0.515, 0.22], &[(Y, -90.0)], 1.0),
                object("mouse", [0.75, -0.555, 0.55], &[(Y, -90.0)], 1.0),
                object("light", [0.0, 0.68, 0.0], &[], 0.002),
                object("lamp", [0.08, -0.628, -0.8], &[], 0.15),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_matrix_composes_translate_rotate_scale() {
        let object = SceneObject {
            name: "test".to_string(),
            model: PathBuf::from("test.glb"),
            translation: [1.0, 2.0, 3.0],
            rotations: vec![AxisRotation {
                axis: [0.0, 1.0, 0.0],
                degrees: 90.0,
            }],
            scale: [2.0, 2.0, 2.0],
        };

        let expected = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0))
            * Mat4::from_axis_angle(Vec3::Y, 90.0_f32.to_radians())
            * Mat4::from_scale(Vec3::splat(2.0));

        assert_eq!(object.model_matrix(), expected);
    }

    #[test]
    fn rotations_apply_in_listed_order() {
        let object = SceneObject {
            name: "test".to_string(),
            model: PathBuf::from("test.glb"),
            translation: [0.0, 0.0, 0.0],
            rotations: vec![
                AxisRotation {
                    axis: [0.0, 1.0, 0.0],
                    degrees: 90.0,
                },
                AxisRotation {
                    axis: [1.0, 0.0, 0.0],
                    degrees: -90.0,
                },
            ],
            scale: [1.0, 1.0, 1.0],
        };

        let expected = Mat4::from_axis_angle(Vec3::Y, 90.0_f32.to_radians())
            * Mat4::from_axis_angle(Vec3::X, -90.0_f32.to_radians());

        let matrix = object.model_matrix();
        let diff =
            (matrix.transform_point3(Vec3::X) - expected.transform_point3(Vec3::X)).length();
        assert!(diff < 1e-6);
    }

    #[test]
    fn missing_fields_take_identity_defaults() {
        let object: SceneObject =
            serde_json::from_str(r#"{"name": "bare", "model": "bare.glb"}"#).unwrap();

        assert_eq!(object.translation, [0.0, 0.0, 0.0]);
        assert!(object.rotations.is_empty());
        assert_eq!(object.scale, [1.0, 1.0, 1.0]);
        assert_eq!(object.model_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn scene_round_trips_through_json() {
        let scene = SceneConfig::bedroom();
        let json = serde_json::to_string(&scene).unwrap();
        let parsed: SceneConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.objects.len(), scene.objects.len());
        for (a, b) in scene.objects.iter().zip(&parsed.objects) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.model_matrix(), b.model_matrix());
        }
    }

    #[test]
    fn bedroom_scene_matches_authored_layout() {
        let scene = SceneConfig::bedroom();

        assert_eq!(scene.objects.len(), 12);
        assert_eq!(scene.camera_position, [0.0, 0.0, 3.0]);

        let bed = &scene.objects[0];
        assert_eq!(bed.name, "bed");
        assert_eq!(bed.translation, [-0.56, -0.73, -0.29]);
        assert_eq!(bed.scale, [0.4, 0.4, 0.4]);

        let chair = &scene.objects[1];
        assert_eq!(chair.rotations.len(), 2);
        assert_eq!(chair.rotations[0].degrees, 90.0);
        assert_eq!(chair.rotations[1].degrees, -90.0);

        // Top and bottom faces use the wood texture, the rest the flowers.
        let faces = &scene.skybox.faces;
        assert!(faces[2].to_string_lossy().contains("wood"));
        assert!(faces[3].to_string_lossy().contains("wood"));
        assert!(faces[0].to_string_lossy().contains("flower"));
        assert!(faces[5].to_string_lossy().contains("flower"));
    }
}
