mod common;

use approx::assert_abs_diff_eq;
use scene_viewer::{
    config::ViewerConfig,
    data_structures::light::LightSlot,
    flow::SceneContext,
    panel::{ControlRange, DebugPanel},
};

use crate::common::test_utils::default_context;

#[test]
fn should_bind_one_control_per_light() {
    let ctx = default_context();
    let labels: Vec<_> = ctx.panel.controls().iter().map(|c| c.label.as_str()).collect();

    assert_eq!(
        labels,
        vec!["ambient", "hemisphere", "directional", "point", "rect area", "spot"]
    );
    let point = ctx.panel.find("point").expect("point control");
    assert_eq!(
        ctx.panel.control(point).map(|c| c.range),
        Some(ControlRange::new(0.0, 100.0, 0.1))
    );
    assert_eq!(ctx.panel.value(&ctx.scene, point), Some(50.0));
}

#[test]
fn should_clamp_to_control_max() {
    let mut ctx = default_context();
    let ambient = ctx.panel.find("ambient").expect("ambient control");

    let stored = ctx.panel.set(&mut ctx.scene, ambient, 5.0);

    assert_eq!(stored, Some(3.0));
    let light = ctx.rig.id(LightSlot::Ambient).expect("ambient installed");
    assert_eq!(ctx.scene.light(light).map(|l| l.intensity()), Some(3.0));
}

#[test]
fn should_clamp_negative_values_to_zero() {
    let mut ctx = default_context();

    assert_eq!(ctx.panel.set_by_label(&mut ctx.scene, "spot", -4.0), Some(0.0));
    assert_eq!(ctx.panel.set_by_label(&mut ctx.scene, "spot", f32::NAN), Some(0.0));
}

#[test]
fn should_ignore_unknown_labels() {
    let mut ctx = default_context();

    assert_eq!(ctx.panel.set_by_label(&mut ctx.scene, "sun", 1.0), None);
}

#[test]
fn should_nudge_by_step() {
    let mut ctx = default_context();
    let rect = ctx.panel.find("rect area").expect("rect area control");

    let up = ctx.panel.nudge(&mut ctx.scene, rect, 10).expect("nudged");
    assert_abs_diff_eq!(up, 6.1, epsilon = 1e-4);

    let down = ctx.panel.nudge(&mut ctx.scene, rect, -1_000).expect("nudged");
    assert_eq!(down, 0.0);
}

#[test]
fn should_cycle_selection() {
    let mut ctx = default_context();
    let first = ctx.panel.selected();

    ctx.panel.select_previous();
    assert_eq!(ctx.panel.selected(), ctx.panel.find("spot"));

    ctx.panel.select_next();
    assert_eq!(ctx.panel.selected(), first);

    ctx.panel.select_next();
    assert_eq!(ctx.panel.selected(), ctx.panel.find("hemisphere"));
}

#[test]
fn should_summarise_selected_control() {
    let mut ctx = default_context();

    assert_eq!(
        ctx.panel.summary(&ctx.scene),
        "[1/6] ambient: 1.500 (0..3)"
    );

    ctx.panel.toggle_visibility();
    assert!(!ctx.panel.is_visible());
    assert_eq!(ctx.panel.summary(&ctx.scene), "");
}

#[test]
fn should_skip_disabled_lights() {
    let config = ViewerConfig::from_toml(
        "[lights.hemisphere]\nenabled = false\n[lights.spot]\nenabled = false\n",
    )
    .expect("valid config");
    let ctx = SceneContext::new(&config, 800, 600, 1.0);

    assert_eq!(ctx.rig.len(), 4);
    assert_eq!(ctx.panel.controls().len(), 4);
    assert_eq!(ctx.panel.find("spot"), None);
    assert_eq!(ctx.scene.lights().count(), 4);
}

#[test]
fn should_normalise_bound_ranges() {
    let mut ctx = default_context();
    let light = ctx.rig.id(LightSlot::Point).expect("point installed");
    let mut panel = DebugPanel::new();

    let id = panel.bind(light, "reversed", ControlRange::new(10.0, 0.0, 0.0));
    let range = panel.control(id).expect("bound").range;

    assert_eq!(range, ControlRange::new(0.0, 10.0, 0.1));
    assert_eq!(panel.set(&mut ctx.scene, id, 50.0), Some(10.0));
}

#[test]
fn should_replace_nan_bounds() {
    let mut ctx = default_context();
    let light = ctx.rig.id(LightSlot::Point).expect("point installed");
    let mut panel = DebugPanel::new();

    let id = panel.bind(light, "nan", ControlRange::new(f32::NAN, 1.0, 0.1));
    assert_eq!(panel.control(id).map(|c| c.range), Some(ControlRange::new(0.0, 1.0, 0.1)));
    assert_eq!(panel.set(&mut ctx.scene, id, 0.5), Some(0.5));

    let id = panel.bind(light, "nan max", ControlRange::new(0.0, f32::NAN, f32::NAN));
    assert_eq!(panel.control(id).map(|c| c.range), Some(ControlRange::new(0.0, 1.0, 0.01)));
    assert_eq!(panel.set(&mut ctx.scene, id, 4.0), Some(1.0));
}

#[test]
fn should_clamp_with_unordered_public_bounds() {
    let range = ControlRange::new(5.0, 1.0, 0.1);

    assert_eq!(range.clamp(3.0), 1.0);
    assert_eq!(ControlRange::new(f32::NAN, 2.0, 0.1).clamp(3.0), 2.0);
}

#[test]
fn should_target_the_rig_lights() {
    let ctx = default_context();

    for ((slot, light), control) in ctx.rig.iter().zip(ctx.panel.controls()) {
        assert_eq!(control.target(), light);
        assert_eq!(control.label, slot.label());
    }
}

#[test]
fn should_clamp_configured_intensity_to_panel_range() {
    let config = ViewerConfig::from_toml(
        "[lights.ambient]\nintensity = 50.0\n[lights.spot]\nintensity = -1.0\n",
    )
    .expect("valid config");
    let mut ctx = SceneContext::new(&config, 800, 600, 1.0);
    let ambient = ctx.panel.find("ambient").expect("ambient control");
    let spot = ctx.panel.find("spot").expect("spot control");

    assert_eq!(ctx.panel.value(&ctx.scene, ambient), Some(3.0));
    assert_eq!(ctx.panel.value(&ctx.scene, spot), Some(0.0));
    assert_abs_diff_eq!(
        ctx.panel.nudge(&mut ctx.scene, ambient, -1).expect("nudged"),
        2.999,
        epsilon = 1e-6
    );
}
