// Host-side tests for picking and the input vector.

use glam::{Vec2, Vec3};
use nn_twin::core::input::InputState;
use nn_twin::core::layout::{node_position, Layer};
use nn_twin::core::pick::{pick_nearest, pointer_inside, pointer_ndc, ray_sphere, Ray};

#[test]
fn ray_sphere_intersection_basic() {
    // Ray from origin pointing in +Z direction
    let ray_origin = Vec3::ZERO;
    let ray_dir = Vec3::new(0.0, 0.0, 1.0);

    // Sphere at (0, 0, 5) with radius 2
    let center = Vec3::new(0.0, 0.0, 5.0);
    let radius = 2.0;

    let t = ray_sphere(ray_origin, ray_dir, center, radius).unwrap();
    assert!((t - 3.0).abs() < 1e-5);
}

#[test]
fn ray_sphere_intersection_miss() {
    let ray_origin = Vec3::ZERO;
    let ray_dir = Vec3::new(1.0, 0.0, 0.0);
    let center = Vec3::new(0.0, 0.0, 5.0);

    assert!(ray_sphere(ray_origin, ray_dir, center, 2.0).is_none());
}

#[test]
fn ray_sphere_intersection_tangent() {
    // Ray grazes the edge of the sphere
    let ray_origin = Vec3::ZERO;
    let ray_dir = Vec3::new(0.0, 0.0, 1.0);
    let center = Vec3::new(2.0, 0.0, 5.0);

    let t = ray_sphere(ray_origin, ray_dir, center, 2.0).unwrap();
    assert!(t > 0.0);
}

#[test]
fn ray_sphere_behind_origin_misses() {
    let ray_origin = Vec3::ZERO;
    let ray_dir = Vec3::new(0.0, 0.0, 1.0);
    let center = Vec3::new(0.0, 0.0, -5.0);

    assert!(ray_sphere(ray_origin, ray_dir, center, 1.0).is_none());
}

#[test]
fn pick_nearest_prefers_closest_hit() {
    let ray = Ray {
        origin: Vec3::ZERO,
        dir: Vec3::Z,
    };
    let centers = [
        (0, Vec3::new(0.0, 0.0, 9.0)),
        (1, Vec3::new(0.0, 0.0, 3.0)),
        (2, Vec3::new(5.0, 0.0, 1.0)),
    ];
    assert_eq!(pick_nearest(&ray, centers, 0.5), Some(1));
    assert_eq!(pick_nearest(&ray, [(2, Vec3::new(5.0, 0.0, 1.0))], 0.5), None);
    assert_eq!(pick_nearest(&ray, std::iter::empty(), 0.5), None);
}

#[test]
fn pick_nearest_over_input_grid() {
    let centers: Vec<(usize, Vec3)> = (0..25)
        .map(|i| (i, node_position(Layer::Input, i, 25)))
        .collect();
    for target in [0, 7, 12, 24] {
        let p = centers[target].1;
        // shoot along +X through the cell's center
        let ray = Ray {
            origin: Vec3::new(-10.0, p.y, p.z),
            dir: Vec3::X,
        };
        assert_eq!(pick_nearest(&ray, centers.iter().copied(), 0.2), Some(target));
    }
}

#[test]
fn pointer_ndc_maps_corners() {
    assert_eq!(pointer_ndc(50.0, 25.0, 100.0, 50.0), Some(Vec2::ZERO));
    assert_eq!(pointer_ndc(0.0, 0.0, 100.0, 50.0), Some(Vec2::new(-1.0, 1.0)));
    assert_eq!(pointer_ndc(100.0, 50.0, 100.0, 50.0), Some(Vec2::new(1.0, -1.0)));
    assert_eq!(pointer_ndc(10.0, 10.0, 0.0, 50.0), None);
    assert_eq!(pointer_ndc(10.0, 10.0, 100.0, 0.0), None);
}

#[test]
fn pointer_inside_checks_element_bounds() {
    assert!(pointer_inside(0.0, 0.0, 100.0, 50.0));
    assert!(pointer_inside(100.0, 50.0, 100.0, 50.0));
    assert!(pointer_inside(40.0, 20.0, 100.0, 50.0));
    assert!(!pointer_inside(-1.0, 20.0, 100.0, 50.0));
    assert!(!pointer_inside(40.0, 50.5, 100.0, 50.0));
    assert!(!pointer_inside(140.0, 20.0, 100.0, 50.0));
}

#[test]
fn toggle_is_an_involution() {
    let mut input = InputState::new(25);
    for i in [0, 3, 24] {
        let before = input.values()[i];
        assert!(input.toggle(i));
        assert_eq!(input.values()[i], 1.0);
        assert!(input.toggle(i));
        assert_eq!(input.values()[i], before);
    }
    assert!(!input.toggle(25));
}

#[test]
fn toggle_snaps_partial_values_to_zero() {
    let mut input = InputState::new(4);
    input.draw(2, 0.3);
    input.toggle(2);
    assert_eq!(input.values()[2], 0.0);
}

#[test]
fn draw_is_monotonic_and_clamps_at_one() {
    let mut input = InputState::new(25);
    let mut prev = 0.0;
    for step in 1..=7 {
        assert!(input.draw(5, 0.15));
        let v = input.values()[5];
        assert!(v >= prev);
        if step < 7 {
            assert!(v < 1.0);
        }
        prev = v;
    }
    assert_eq!(input.values()[5], 1.0);

    for _ in 0..5 {
        assert!(!input.draw(5, 0.15));
        assert_eq!(input.values()[5], 1.0);
    }
    assert!(!input.draw(99, 0.15));
}

#[test]
fn drag_flag_and_reset() {
    let mut input = InputState::new(25);
    assert!(!input.is_drawing());
    input.begin_draw();
    assert!(input.is_drawing());
    input.draw(0, 0.5);
    input.toggle(1);

    input.reset();
    assert!(!input.is_drawing());
    assert_eq!(input.len(), 25);
    assert!(input.values().iter().all(|&v| v == 0.0));

    input.begin_draw();
    input.end_draw();
    assert!(!input.is_drawing());
}
