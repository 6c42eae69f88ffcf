mod common;

use approx::assert_abs_diff_eq;
use scene_viewer::{
    config::ViewerConfig,
    data_structures::scene_graph::MeshId,
    flow::{FrameLoop, LoopState, SceneContext},
};

use crate::common::test_utils::{
    CountingScheduler, ManualClock, RecordingRenderer, default_context,
};

fn rotation(ctx: &SceneContext, id: MeshId) -> (f32, f32, f32) {
    let rotation = ctx.scene.mesh(id).expect("mesh exists").transform.rotation;
    (rotation.x, rotation.y, rotation.z)
}

#[test]
fn should_start_idle_and_run_after_first_frame() {
    let mut ctx = default_context();
    let mut renderer = RecordingRenderer::new();
    let mut scheduler = CountingScheduler::default();
    let mut frame_loop = FrameLoop::new(ManualClock::at(0.0));

    assert_eq!(frame_loop.state(), LoopState::Idle);
    frame_loop
        .frame(&mut ctx, &mut renderer, &mut scheduler)
        .expect("frame renders");

    assert_eq!(frame_loop.state(), LoopState::Running);
    assert_eq!(frame_loop.frames(), 1);
    assert_eq!(renderer.frames.len(), 1);
    assert_eq!(scheduler.requests, 1);
}

#[test]
fn should_not_rotate_at_time_zero() {
    let mut ctx = default_context();
    let mut frame_loop = FrameLoop::new(ManualClock::at(0.0));
    frame_loop
        .frame(&mut ctx, &mut RecordingRenderer::new(), &mut CountingScheduler::default())
        .expect("frame renders");

    for id in ctx.objects.rotating() {
        assert_eq!(rotation(&ctx, id), (0.0, 0.0, 0.0));
    }
}

#[test]
fn should_rotate_objects_from_elapsed_time() {
    let mut ctx = default_context();
    let mut frame_loop = FrameLoop::new(ManualClock::at(10.0));
    frame_loop
        .frame(&mut ctx, &mut RecordingRenderer::new(), &mut CountingScheduler::default())
        .expect("frame renders");

    let (x, y, z) = rotation(&ctx, ctx.objects.cube);
    assert_abs_diff_eq!(y, 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(x, 1.5, epsilon = 1e-6);
    assert_eq!(z, 0.0);
    for id in [ctx.objects.sphere, ctx.objects.torus] {
        assert_eq!(rotation(&ctx, id), rotation(&ctx, ctx.objects.cube));
    }
}

#[test]
fn should_overwrite_rotation_instead_of_accumulating() {
    let mut ctx = default_context();
    let mut renderer = RecordingRenderer::new();
    let mut scheduler = CountingScheduler::default();
    let mut frame_loop = FrameLoop::new(ManualClock::at(2.0));

    for _ in 0..5 {
        frame_loop
            .frame(&mut ctx, &mut renderer, &mut scheduler)
            .expect("frame renders");
    }

    let (x, y, _) = rotation(&ctx, ctx.objects.sphere);
    assert_abs_diff_eq!(y, 0.2, epsilon = 1e-6);
    assert_abs_diff_eq!(x, 0.3, epsilon = 1e-6);
    assert_eq!(scheduler.requests, 5);
}

#[test]
fn should_keep_ground_plane_still() {
    let mut ctx = default_context();
    let before = rotation(&ctx, ctx.objects.plane);
    let mut frame_loop = FrameLoop::new(ManualClock::at(42.0));
    frame_loop
        .frame(&mut ctx, &mut RecordingRenderer::new(), &mut CountingScheduler::default())
        .expect("frame renders");

    assert_eq!(rotation(&ctx, ctx.objects.plane), before);
    assert_abs_diff_eq!(before.0, -std::f32::consts::FRAC_PI_2, epsilon = 1e-6);
}

#[test]
fn should_use_configured_spin_speeds() {
    let config =
        ViewerConfig::from_toml("[animation]\nspin_y = 1.0\nspin_x = 0.0\n").expect("valid");
    let mut ctx = SceneContext::new(&config, 800, 600, 1.0);
    let mut frame_loop = FrameLoop::new(ManualClock::at(3.0));
    frame_loop
        .frame(&mut ctx, &mut RecordingRenderer::new(), &mut CountingScheduler::default())
        .expect("frame renders");

    let (x, y, _) = rotation(&ctx, ctx.objects.torus);
    assert_abs_diff_eq!(y, 3.0, epsilon = 1e-6);
    assert_eq!(x, 0.0);
}

#[test]
fn should_propagate_render_failure_without_rescheduling() {
    let mut ctx = default_context();
    let mut renderer = RecordingRenderer::failing();
    let mut scheduler = CountingScheduler::default();
    let mut frame_loop = FrameLoop::new(ManualClock::at(1.0));

    let result = frame_loop.frame(&mut ctx, &mut renderer, &mut scheduler);

    let error = result.expect_err("render failure is returned");
    assert!(format!("{:#}", error).contains("device lost"));
    assert_eq!(scheduler.requests, 0);
    assert_eq!(frame_loop.frames(), 0);
}

#[test]
fn should_render_panel_edits_on_next_frame() {
    let mut ctx = default_context();
    let mut renderer = RecordingRenderer::new();
    let mut scheduler = CountingScheduler::default();
    let mut frame_loop = FrameLoop::new(ManualClock::at(0.5));

    frame_loop
        .frame(&mut ctx, &mut renderer, &mut scheduler)
        .expect("frame renders");
    ctx.panel.set_by_label(&mut ctx.scene, "point", 12.5);
    frame_loop
        .frame(&mut ctx, &mut renderer, &mut scheduler)
        .expect("frame renders");

    assert_eq!(renderer.frames[0].light_intensities[3], 50.0);
    assert_eq!(renderer.frames[1].light_intensities[3], 12.5);
}
