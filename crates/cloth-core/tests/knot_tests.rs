use cloth_core::{ClothConfig, ClothError, ClothMesh, Knot};
use glam::Vec3;

const GRAVITY: Vec3 = Vec3::new(0.0, -9.82, 0.0);

#[test]
fn test_integrate_force_converts_and_decays() {
    let mut knot = Knot::new(0, Vec3::ZERO).with_mass(2.0, 0.5).unwrap();
    knot.add_force(Vec3::new(4.0, 0.0, 0.0));

    knot.integrate_force(0.1);

    assert!((knot.velocity() - Vec3::new(0.2, 0.0, 0.0)).length() < 1e-6);
    assert_eq!(
        knot.force(),
        Vec3::new(2.0, 0.0, 0.0),
        "residual force should decay by force_damping"
    );
    assert_eq!(knot.position(), Vec3::ZERO, "force integration must not move the knot");
}

#[test]
fn test_integrate_velocity_free_fall() {
    let mut knot = Knot::new(0, Vec3::new(0.0, 10.0, 0.0));
    let dt = 0.01;

    knot.integrate_velocity(GRAVITY, dt);

    let expected_y = 10.0 + 0.5 * GRAVITY.y * dt * dt;
    assert!((knot.position().y - expected_y).abs() < 1e-6, "y = {}", knot.position().y);
    assert!((knot.velocity().y - GRAVITY.y * dt).abs() < 1e-6);
}

#[test]
fn test_apply_g_only_changes_velocity() {
    let mut knot = Knot::new(0, Vec3::ONE);
    knot.apply_g(GRAVITY, 0.5);
    assert_eq!(knot.position(), Vec3::ONE);
    assert!((knot.velocity() - GRAVITY * 0.5).length() < 1e-6);
}

#[test]
fn test_static_knot_ignores_every_integration() {
    let start = Vec3::new(1.0, 2.0, 3.0);
    let mut knot = Knot::new(0, start);
    knot.set_static();
    knot.add_force(Vec3::new(100.0, 0.0, 0.0));

    for _ in 0..50 {
        knot.integrate_force(0.01);
        knot.integrate_velocity(GRAVITY, 0.01);
        knot.apply_g(GRAVITY, 0.01);
        knot.integrate_euler(GRAVITY, 0.01);
    }

    assert_eq!(knot.position(), start);
    assert_eq!(knot.velocity(), Vec3::ZERO);
}

#[test]
fn test_reset_is_idempotent() {
    let start = Vec3::new(0.0, 5.0, 0.0);
    let mut knot = Knot::new(3, start);
    knot.add_force(Vec3::X);
    knot.integrate_force(0.1);
    knot.integrate_velocity(GRAVITY, 0.1);

    knot.reset();
    let once = (knot.position(), knot.velocity(), knot.force());
    knot.reset();
    let twice = (knot.position(), knot.velocity(), knot.force());

    assert_eq!(once, twice);
    assert_eq!(once, (start, Vec3::ZERO, Vec3::ZERO));
}

#[test]
fn test_place_updates_reset_target() {
    let mut knot = Knot::new(0, Vec3::ZERO);
    knot.place(Vec3::new(2.0, 0.0, 0.0));
    knot.set_position(Vec3::new(9.0, 9.0, 9.0));
    knot.reset();
    assert_eq!(knot.position(), Vec3::new(2.0, 0.0, 0.0));
    assert_eq!(knot.initial_position(), Vec3::new(2.0, 0.0, 0.0));
}

#[test]
fn test_pinned_knot_in_mesh_stays_put() {
    let config = ClothConfig {
        knots_per_side: 5,
        knot_spacing: 1.0,
        ..ClothConfig::default()
    };
    let mut mesh = ClothMesh::new(config, Vec3::ZERO).unwrap();
    mesh.set_static(12).unwrap();
    mesh.set_wind_force(Vec3::new(0.0, 0.0, 0.3));
    let pinned = mesh.knot(12).unwrap().position();
    let corner_start = mesh.knot(0).unwrap().position();

    for step in 0..200 {
        mesh.apply_spring_force(step as f32 * 0.001, 0.001);
        mesh.integrate_velocity(GRAVITY, 0.001);
    }

    let knot = mesh.knot(12).unwrap();
    assert_eq!(knot.position(), pinned);
    assert_eq!(knot.velocity(), Vec3::ZERO);
    assert!(
        mesh.knot(0).unwrap().position().y < corner_start.y - 0.05,
        "free knots should have fallen"
    );
}

#[test]
fn test_with_mass_rejects_bad_tuning() {
    assert_eq!(
        Knot::new(0, Vec3::ZERO).with_mass(0.0, 0.95).err(),
        Some(ClothError::InvalidMass(0.0))
    );
    assert_eq!(
        Knot::new(0, Vec3::ZERO).with_mass(1.0, 1.5).err(),
        Some(ClothError::InvalidForceDamping(1.5))
    );
}
