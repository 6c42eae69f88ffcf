use scene_viewer::{
    config::{LightSetting, ViewerConfig, default_intensity},
    data_structures::light::LightSlot,
};

#[test]
fn should_default_every_section() {
    let config = ViewerConfig::default();

    assert_eq!(config.window.canvas_id, "webgl");
    assert_eq!(config.window.clear_colour, [0.0, 0.0, 0.0, 1.0]);
    assert_eq!(config.camera.fov_degrees, 75.0);
    assert_eq!(config.camera.near, 0.1);
    assert_eq!(config.camera.far, 100.0);
    assert_eq!(config.camera.position, [1.0, 1.0, 2.0]);
    assert!(config.controls.enable_damping);
    assert_eq!(config.controls.damping_factor, 0.05);
    assert_eq!(config.animation.spin_y, 0.1);
    assert_eq!(config.animation.spin_x, 0.15);
    for slot in LightSlot::ALL {
        let setting = config.lights.setting(slot);
        assert!(setting.enabled);
        assert_eq!(setting.intensity, default_intensity(slot));
    }
}

#[test]
fn should_accept_empty_toml() {
    let config = ViewerConfig::from_toml("").expect("empty config is valid");

    assert_eq!(config, ViewerConfig::default());
}

#[test]
fn should_merge_partial_toml_with_defaults() {
    let config = ViewerConfig::from_toml(
        r#"
        [window]
        title = "lights"

        [camera]
        fov_degrees = 60.0

        [lights.point]
        intensity = 20.0

        [lights.rect_area]
        enabled = false
        "#,
    )
    .expect("valid config");

    assert_eq!(config.window.title, "lights");
    assert_eq!(config.window.width, ViewerConfig::default().window.width);
    assert_eq!(config.camera.fov_degrees, 60.0);
    assert_eq!(config.camera.far, 100.0);

    let point = config.lights.setting(LightSlot::Point);
    assert!(point.enabled);
    assert_eq!(point.intensity, 20.0);

    let rect_area = config.lights.setting(LightSlot::RectArea);
    assert!(!rect_area.enabled);
    assert_eq!(rect_area.intensity, 6.0);

    assert_eq!(config.lights.spot, LightSetting::default());
}

#[test]
fn should_reject_malformed_toml() {
    assert!(ViewerConfig::from_toml("[camera]\nfov_degrees = \"wide\"").is_err());
}

#[test]
fn should_reject_inverted_distance_limits() {
    let error = ViewerConfig::from_toml("[controls]\nmin_distance = 10.0\nmax_distance = 5.0\n")
        .expect_err("min above max");

    assert!(format!("{:#}", error).contains("max_distance"));
}

#[test]
fn should_reject_nan_distance_limits() {
    assert!(ViewerConfig::from_toml("[controls]\nmin_distance = nan\n").is_err());
    assert!(ViewerConfig::from_toml("[controls]\nmax_distance = nan\n").is_err());
}

#[test]
fn should_reject_negative_min_distance() {
    assert!(ViewerConfig::from_toml("[controls]\nmin_distance = -1.0\n").is_err());
}

#[test]
fn should_accept_unbounded_max_distance() {
    let config = ViewerConfig::from_toml("[controls]\nmin_distance = 2.0\nmax_distance = inf\n")
        .expect("infinite max is valid");

    assert_eq!(config.controls.max_distance, f32::INFINITY);
}

#[test]
fn should_validate_config_files_on_load() {
    let path = std::env::temp_dir().join(format!(
        "scene-viewer-inverted-{}.toml",
        std::process::id()
    ));
    std::fs::write(&path, "[controls]\nmin_distance = 3.0\nmax_distance = 1.0\n")
        .expect("temp file is writable");

    let config = ViewerConfig::load(&path);
    std::fs::remove_file(&path).ok();

    assert!(config.is_err());
}

#[test]
fn should_report_missing_file() {
    let error = ViewerConfig::load("/nonexistent/scene-viewer.toml").expect_err("missing file");

    assert!(format!("{:#}", error).contains("scene-viewer.toml"));
}

#[test]
fn should_load_config_file() {
    let path =
        std::env::temp_dir().join(format!("scene-viewer-config-{}.toml", std::process::id()));
    std::fs::write(&path, "[animation]\nspin_y = 0.5\n").expect("temp file is writable");

    let config = ViewerConfig::load(&path);
    std::fs::remove_file(&path).ok();

    assert_eq!(config.expect("valid file").animation.spin_y, 0.5);
}

#[test]
fn should_survive_toml_round_trip() {
    let mut config = ViewerConfig::default();
    config.controls.max_distance = 50.0;
    config.lights.hemisphere.enabled = false;

    let text = config.to_toml().expect("serialisable");
    assert_eq!(ViewerConfig::from_toml(&text).expect("parsable"), config);
}
