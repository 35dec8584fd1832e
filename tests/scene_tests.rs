use glam::{Mat4, Vec3};
use room_viewer::SceneConfig;

#[cfg(test)]
mod scene_tests {
    use super::*;

    #[test]
    fn test_builtin_scene_has_the_full_room() {
        let scene = SceneConfig::bedroom();

        let names: Vec<&str> = scene.objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "bed", "chair", "girl", "bedside", "clock", "table", "door", "imac",
                "keyboard", "mouse", "light", "lamp",
            ]
        );
    }

    #[test]
    fn test_every_placement_yields_an_invertible_matrix() {
        let scene = SceneConfig::bedroom();

        for object in &scene.objects {
            let matrix = object.model_matrix();
            assert!(
                matrix.determinant().abs() > 1e-12,
                "{} has a degenerate transform",
                object.name
            );
        }
    }

    #[test]
    fn test_translation_column_matches_authored_position() {
        let scene = SceneConfig::bedroom();

        for object in &scene.objects {
            let matrix = object.model_matrix();
            let placed = matrix.transform_point3(Vec3::ZERO);
            let expected = Vec3::from_array(object.translation);
            assert!(
                (placed - expected).length() < 1e-6,
                "{} origin lands at {:?}, expected {:?}",
                object.name,
                placed,
                expected
            );
        }
    }

    #[test]
    fn test_uniform_scale_preserves_shape() {
        let scene = SceneConfig::bedroom();
        let chair = scene
            .objects
            .iter()
            .find(|o| o.name == "chair")
            .expect("chair placement");

        let matrix = chair.model_matrix();
        let x = matrix.transform_vector3(Vec3::X).length();
        let y = matrix.transform_vector3(Vec3::Y).length();
        let z = matrix.transform_vector3(Vec3::Z).length();

        assert!((x - 0.0055).abs() < 1e-6);
        assert!((x - y).abs() < 1e-6);
        assert!((x - z).abs() < 1e-6);
    }

    #[test]
    fn test_scene_file_round_trip() {
        let scene = SceneConfig::bedroom();

        let dir = std::env::temp_dir();
        let path = dir.join("room_viewer_scene_roundtrip.json");
        std::fs::write(&path, serde_json::to_string_pretty(&scene).unwrap()).unwrap();

        let loaded = SceneConfig::from_path(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.camera_position, scene.camera_position);
        assert_eq!(loaded.objects.len(), scene.objects.len());
        for (a, b) in scene.objects.iter().zip(&loaded.objects) {
            assert_eq!(a.model_matrix(), b.model_matrix());
        }
    }

    #[test]
    fn test_missing_scene_file_reports_the_path() {
        let result = SceneConfig::from_path("no/such/scene.json");

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("no/such/scene.json"));
    }

    #[test]
    fn test_malformed_scene_file_is_rejected() {
        let dir = std::env::temp_dir();
        let path = dir.join("room_viewer_scene_malformed.json");
        std::fs::write(&path, "{\"objects\": 7}").unwrap();

        let result = SceneConfig::from_path(&path);
        std::fs::remove_file(&path).ok();

        assert!(result.is_err());
    }

    #[test]
    fn test_minimal_scene_parses_with_defaults() {
        let json = r#"{
            "skybox": {
                "faces": ["px.png", "nx.png", "py.png", "ny.png", "pz.png", "nz.png"]
            },
            "objects": [
                {"name": "thing", "model": "thing.glb"}
            ]
        }"#;

        let scene: SceneConfig = serde_json::from_str(json).unwrap();

        assert_eq!(scene.camera_position, [0.0, 0.0, 3.0]);
        assert_eq!(scene.objects.len(), 1);
        assert_eq!(scene.objects[0].model_matrix(), Mat4::IDENTITY);
    }
}
