use cloth_core::{
    Body, BodyId, ClothConfig, ClothError, ClothMesh, Integrator, SceneConfig, Scene, Setup,
    SphereCollider,
};
use glam::Vec3;

fn five_by_five() -> ClothMesh {
    let config = ClothConfig {
        knots_per_side: 5,
        knot_spacing: 1.0,
        ..ClothConfig::default()
    };
    let mut mesh = ClothMesh::new(config, Vec3::ZERO).unwrap();
    mesh.apply_setup(Setup::Corners).unwrap();
    mesh
}

fn center_y(scene: &Scene, id: BodyId) -> f32 {
    scene.cloth(id).unwrap().knot(12).unwrap().position().y
}

#[test]
fn test_corner_pinned_cloth_sags_and_stays_bounded() {
    let mut scene = Scene::new(SceneConfig::default()).unwrap();
    scene.set_acceleration(Vec3::new(0.0, -9.82, 0.0));
    let id = scene.add_cloth(five_by_five());
    scene.set_dt(0.001).unwrap();

    let mut previous = center_y(&scene, id);
    for step in 0..100 {
        scene.set_time(step as f32 * 0.001);
        scene.step();
        let y = center_y(&scene, id);
        assert!(y < previous, "center rose at sub-step {step}: {previous} -> {y}");
        previous = y;
    }

    for _ in 0..3000 {
        scene.step();
    }
    let y = center_y(&scene, id);
    assert!(y.is_finite());
    assert!(y < -1.0 && y > -3.0, "sagging cloth should settle, center at {y}");
    for knot in scene.cloth(id).unwrap().knots() {
        assert!(knot.position().is_finite() && knot.velocity().is_finite());
    }
}

#[test]
fn test_cloth_rests_on_sphere() {
    let mut scene = Scene::new(SceneConfig::default()).unwrap();
    let id = scene.add_cloth(five_by_five());
    scene.add_sphere(SphereCollider::new(1.0, Vec3::new(0.0, -1.5, 0.0)).unwrap());

    for frame in 0..120 {
        scene.advance_frame(frame as f32 / 60.0, 1.0 / 60.0);
    }

    let y = center_y(&scene, id);
    assert!((y + 0.5).abs() < 0.02, "center should rest on the sphere top, got {y}");
}

#[test]
fn test_collision_runs_before_integration() {
    let mut scene = Scene::new(SceneConfig {
        gravity: Vec3::ZERO,
        ..SceneConfig::default()
    })
    .unwrap();
    let id = scene.add_cloth(five_by_five());
    let sphere = SphereCollider::new(0.5, Vec3::new(0.0, 0.2, 0.0)).unwrap();
    scene.add_sphere(sphere);
    scene.set_dt(1e-4).unwrap();

    scene.step();

    let p = scene.cloth(id).unwrap().knot(12).unwrap().position();
    assert!(
        ((p - sphere.position()).length() - 0.5).abs() < 1e-3,
        "center knot should have been pushed to the surface, at {p}"
    );
}

#[test]
fn test_advance_frame_splits_dt_over_substeps() {
    let mut scene = Scene::new(SceneConfig {
        substeps: 10,
        ..SceneConfig::default()
    })
    .unwrap();
    scene.advance_frame(2.0, 0.5);
    assert!((scene.dt() - 0.05).abs() < 1e-7);
    assert_eq!(scene.time(), 2.0);
}

#[test]
fn test_integrators_agree_for_small_steps() {
    let run = |integrator: Integrator| {
        let mut scene = Scene::new(SceneConfig {
            integrator,
            ..SceneConfig::default()
        })
        .unwrap();
        let id = scene.add_cloth(five_by_five());
        for frame in 0..30 {
            scene.advance_frame(frame as f32 / 60.0, 1.0 / 60.0);
        }
        center_y(&scene, id)
    };
    let rk4 = run(Integrator::RungeKutta4);
    let euler = run(Integrator::Euler);
    assert!(rk4 < 0.0 && euler < 0.0);
    assert!((rk4 - euler).abs() < 0.05, "rk4 = {rk4}, euler = {euler}");
}

#[test]
fn test_reset_restores_cloth_and_sphere() {
    let mut scene = Scene::new(SceneConfig::default()).unwrap();
    let cloth = scene.add_cloth(five_by_five());
    let start = SphereCollider::new(0.5, Vec3::new(0.0, -3.0, 0.0))
        .unwrap()
        .with_velocity(Vec3::new(0.0, 1.0, 0.0));
    let sphere = scene.add_sphere(start);
    let layout = scene.cloth(cloth).unwrap().positions();

    for frame in 0..10 {
        scene.advance_frame(frame as f32 / 60.0, 1.0 / 60.0);
    }
    assert_ne!(scene.cloth(cloth).unwrap().positions(), layout);

    scene.reset();
    assert_eq!(scene.cloth(cloth).unwrap().positions(), layout);
    let Body::Sphere(s) = scene.body(sphere).unwrap() else {
        panic!("body {sphere:?} should be a sphere");
    };
    assert_eq!(s.position(), start.position());
}

#[test]
fn test_body_capabilities_and_lookup_errors() {
    let mut scene = Scene::new(SceneConfig::default()).unwrap();
    let cloth = scene.add_cloth(five_by_five());
    let sphere = scene.add_sphere(SphereCollider::new(1.0, Vec3::ZERO).unwrap());

    let bodies = scene.bodies();
    assert!(bodies[cloth.0].is_steppable() && !bodies[cloth.0].is_collidable());
    assert!(bodies[sphere.0].is_collidable() && !bodies[sphere.0].is_steppable());

    assert_eq!(scene.cloth(sphere).unwrap_err(), ClothError::NotACloth(1));
    assert_eq!(scene.sphere_mut(cloth).unwrap_err(), ClothError::NotACollider(0));
    assert_eq!(scene.cloth(BodyId(7)).unwrap_err(), ClothError::BodyNotFound(7));
}

#[test]
fn test_zero_substeps_rejected() {
    let config = SceneConfig {
        substeps: 0,
        ..SceneConfig::default()
    };
    assert_eq!(Scene::new(config).err(), Some(ClothError::InvalidSubsteps));
    let mut scene = Scene::new(SceneConfig::default()).unwrap();
    assert!(scene.set_substeps(0).is_err());
}

#[test]
fn test_cloths_with_different_tuning_coexist() {
    let mut scene = Scene::new(SceneConfig::default()).unwrap();
    let soft = scene.add_cloth(five_by_five());
    let stiff_config = ClothConfig {
        knots_per_side: 5,
        knot_spacing: 1.0,
        adjacent: cloth_core::SpringParams::new(50.0, 3.0),
        diagonal: cloth_core::SpringParams::new(50.0, 3.0),
        flex: cloth_core::SpringParams::new(50.0, 3.0),
        ..ClothConfig::default()
    };
    let mut stiff_mesh = ClothMesh::new(stiff_config, Vec3::ZERO).unwrap();
    stiff_mesh.apply_setup(Setup::Corners).unwrap();
    let stiff = scene.add_cloth(stiff_mesh);

    for frame in 0..60 {
        scene.advance_frame(frame as f32 / 60.0, 1.0 / 60.0);
    }

    assert!(
        center_y(&scene, stiff) > center_y(&scene, soft),
        "stiffer cloth should sag less"
    );
}

#[test]
fn test_bad_frame_time_is_skipped() {
    let mut scene = Scene::new(SceneConfig::default()).unwrap();
    let id = scene.add_cloth(five_by_five());
    let before = scene.cloth(id).unwrap().positions();

    scene.advance_frame(0.0, f32::NAN);
    scene.advance_frame(0.0, -1.0 / 60.0);

    assert_eq!(scene.cloth(id).unwrap().positions(), before);
}

#[test]
fn test_bad_sub_step_size_is_rejected() {
    let mut scene = Scene::new(SceneConfig::default()).unwrap();
    let id = scene.add_cloth(five_by_five());
    scene.set_dt(0.001).unwrap();

    assert!(matches!(scene.set_dt(f32::NAN), Err(ClothError::InvalidTimeStep(dt)) if dt.is_nan()));
    assert_eq!(scene.set_dt(f32::INFINITY), Err(ClothError::InvalidTimeStep(f32::INFINITY)));
    assert_eq!(scene.set_dt(-0.001), Err(ClothError::InvalidTimeStep(-0.001)));
    assert_eq!(scene.dt(), 0.001, "rejected sizes must keep the previous sub-step");

    for _ in 0..10 {
        scene.step();
    }
    for knot in scene.cloth(id).unwrap().knots() {
        assert!(knot.position().is_finite(), "knot {} at {}", knot.index(), knot.position());
    }
}

#[test]
fn test_scene_debug_lists_bodies() {
    let mut scene = Scene::new(SceneConfig::default()).unwrap();
    scene.add_cloth(five_by_five());
    scene.add_sphere(SphereCollider::new(1.0, Vec3::ZERO).unwrap());

    let text = format!("{scene:?}");
    assert!(text.contains("Cloth(") && text.contains("Sphere("), "{text}");
}
