mod common;

use approx::assert_abs_diff_eq;
use scene_viewer::{
    data_structures::light::{Light, LightKind, LightSlot, srgb_hex},
    data_structures::scene_graph::Scene,
    pipelines::light::{
        GpuLight, KIND_AMBIENT, KIND_DIRECTIONAL, KIND_HEMISPHERE, KIND_POINT, KIND_RECT_AREA,
        KIND_SPOT, LightUniform, MAX_LIGHTS,
    },
};

use crate::common::test_utils::default_context;

#[test]
fn should_match_shader_layout() {
    assert_eq!(std::mem::size_of::<GpuLight>(), 80);
    assert_eq!(std::mem::size_of::<LightUniform>(), 80 * MAX_LIGHTS + 16);
}

#[test]
fn should_pack_lights_in_scene_order() {
    let ctx = default_context();
    let uniform = LightUniform::from_scene(&ctx.scene);

    assert_eq!(uniform.count, 6);
    let kinds: Vec<u32> = uniform.lights[..6].iter().map(|l| l.kind).collect();
    assert_eq!(
        kinds,
        vec![
            KIND_AMBIENT,
            KIND_HEMISPHERE,
            KIND_DIRECTIONAL,
            KIND_POINT,
            KIND_RECT_AREA,
            KIND_SPOT
        ]
    );
    let intensities: Vec<f32> = uniform.lights[..6].iter().map(|l| l.intensity).collect();
    assert_eq!(intensities, vec![1.5, 0.9, 0.9, 50.0, 6.0, 4.5]);
}

#[test]
fn should_reflect_intensity_edits() {
    let mut ctx = default_context();
    ctx.panel.set_by_label(&mut ctx.scene, "directional", 2.25);

    let uniform = LightUniform::from_scene(&ctx.scene);

    assert_eq!(uniform.lights[2].intensity, 2.25);
}

#[test]
fn should_point_directional_light_at_target() {
    let ctx = default_context();
    let id = ctx.rig.id(LightSlot::Directional).expect("installed");
    let light = GpuLight::from(ctx.scene.light(id).expect("light"));

    let len = (1.0f32 + 0.25 * 0.25).sqrt();
    assert_abs_diff_eq!(light.direction[0], -1.0 / len, epsilon = 1e-6);
    assert_abs_diff_eq!(light.direction[1], -0.25 / len, epsilon = 1e-6);
    assert_abs_diff_eq!(light.direction[2], 0.0, epsilon = 1e-6);
}

#[test]
fn should_encode_spot_cone() {
    let ctx = default_context();
    let id = ctx.rig.id(LightSlot::Spot).expect("installed");
    let light = GpuLight::from(ctx.scene.light(id).expect("light"));

    let angle = std::f32::consts::PI * 0.1;
    assert_abs_diff_eq!(light.cone_cos, angle.cos(), epsilon = 1e-6);
    assert_abs_diff_eq!(light.penumbra_cos, (angle * 0.75).cos(), epsilon = 1e-6);
    assert!(light.penumbra_cos > light.cone_cos);
    assert_eq!(light.distance, 10.0);
    assert_eq!(light.decay, 1.0);
    assert_eq!(light.position, [0.0, 2.0, 3.0]);
}

#[test]
fn should_pass_hemisphere_colours() {
    let ctx = default_context();
    let id = ctx.rig.id(LightSlot::Hemisphere).expect("installed");
    let light = GpuLight::from(ctx.scene.light(id).expect("light"));

    for (actual, expected) in light.color.iter().zip([1.0f32, 0.0, 0.0]) {
        assert_abs_diff_eq!(*actual, expected, epsilon = 1e-6);
    }
    for (actual, expected) in light.ground_color.iter().zip([0.0f32, 0.0, 1.0]) {
        assert_abs_diff_eq!(*actual, expected, epsilon = 1e-6);
    }
    assert_eq!(light.direction, [0.0, 1.0, 0.0]);
}

#[test]
fn should_clamp_negative_intensity() {
    let mut light = Light::new("test", srgb_hex(0xffffff), 1.0, LightKind::Ambient);

    assert_eq!(light.set_intensity(-2.0), 0.0);
    assert_eq!(light.intensity(), 0.0);
    assert_eq!(light.set_intensity(f32::NAN), 0.0);
}

#[test]
fn should_drop_lights_beyond_capacity() {
    let mut scene = Scene::new();
    for i in 0..MAX_LIGHTS + 2 {
        scene.add_light(Light::new(
            "ambient",
            srgb_hex(0xffffff),
            i as f32,
            LightKind::Ambient,
        ));
    }

    let uniform = LightUniform::from_scene(&scene);

    assert_eq!(uniform.count as usize, MAX_LIGHTS);
    assert_eq!(uniform.lights[MAX_LIGHTS - 1].intensity, (MAX_LIGHTS - 1) as f32);
}
