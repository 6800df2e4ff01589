// Host-side tests for the visual encoding curves and tables.

use nn_twin::core::config::InteractionPolicy;
use nn_twin::core::constants::*;
use nn_twin::core::encode::*;

fn gamma_grid() -> impl Iterator<Item = f32> {
    (0..=35).map(|i| GAMMA_MIN + i as f32 * GAMMA_STEP)
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn gamma_correct_is_strictly_monotonic_in_gamma() {
    for step in 1..20 {
        let n = step as f32 * 0.05;
        let mut prev = gamma_correct(n, GAMMA_MIN);
        for g in gamma_grid().skip(1) {
            let cur = gamma_correct(n, g);
            assert!(cur > prev, "n={} g={}: {} !> {}", n, g, cur, prev);
            prev = cur;
        }
    }
}

#[test]
fn gamma_correct_fixes_endpoints() {
    for g in gamma_grid() {
        assert_eq!(gamma_correct(0.0, g), 0.0);
        assert_eq!(gamma_correct(1.0, g), 1.0);
        // out-of-range input is clamped first
        assert_eq!(gamma_correct(1.5, g), 1.0);
    }
    assert!(approx(gamma_correct(0.25, 2.0), 0.5));
    assert!(approx(gamma_correct(0.4, 1.0), 0.4));
}

#[test]
fn tiny_activations_are_neutral_for_every_gamma() {
    for g in gamma_grid() {
        for a in [0.0, 1e-6, 0.0005, -0.0009, 0.000_999] {
            assert_eq!(edge_appearance(a, g), EdgeAppearance::NEUTRAL, "a={} g={}", a, g);
        }
        assert_eq!(edge_appearance(f32::NAN, g), EdgeAppearance::NEUTRAL);
        assert_eq!(edge_appearance(f32::INFINITY, g), EdgeAppearance::NEUTRAL);
    }
}

#[test]
fn edge_hue_follows_sign() {
    assert_eq!(edge_appearance(0.5, DEFAULT_GAMMA).color, EDGE_POSITIVE_COLOR);
    assert_eq!(edge_appearance(0.001, DEFAULT_GAMMA).color, EDGE_POSITIVE_COLOR);
    assert_eq!(edge_appearance(-0.5, DEFAULT_GAMMA).color, EDGE_NEGATIVE_COLOR);
    // magnitude, not sign, drives the rest
    let pos = edge_appearance(0.7, DEFAULT_GAMMA);
    let neg = edge_appearance(-0.7, DEFAULT_GAMMA);
    assert_eq!(pos.opacity, neg.opacity);
    assert_eq!(pos.thickness, neg.thickness);
}

#[test]
fn edge_magnitude_is_clamped_at_ceiling() {
    for g in gamma_grid() {
        let at = edge_appearance(EDGE_MAGNITUDE_CEILING, g);
        let over = edge_appearance(EDGE_MAGNITUDE_CEILING * 10.0, g);
        assert_eq!(at, over);
        assert!(approx(at.opacity, EDGE_OPACITY_BASE + EDGE_OPACITY_SPAN));
        assert!(approx(at.thickness, EDGE_THICKNESS_BASE + EDGE_THICKNESS_SPAN));
    }
}

#[test]
fn edge_opacity_and_thickness_stay_in_range() {
    for g in gamma_grid() {
        for i in 1..=40 {
            let a = i as f32 * 0.07;
            let look = edge_appearance(a, g);
            assert!(look.opacity >= EDGE_OPACITY_BASE);
            assert!(look.opacity <= EDGE_OPACITY_BASE + EDGE_OPACITY_SPAN + 1e-6);
            assert!(look.thickness >= EDGE_THICKNESS_BASE);
            assert!(look.thickness <= EDGE_THICKNESS_BASE + EDGE_THICKNESS_SPAN + 1e-6);
        }
    }
}

#[test]
fn higher_gamma_brightens_weak_edges() {
    let low = edge_appearance(0.1, 1.0);
    let high = edge_appearance(0.1, 3.0);
    assert!(high.opacity > low.opacity);
    assert!(high.thickness > low.thickness);
}

#[test]
fn node_intensities() {
    assert_eq!(input_intensity(1.0, InteractionPolicy::Draw), 1.0);
    assert!(approx(input_intensity(1.0, InteractionPolicy::Toggle), TOGGLE_INPUT_SCALE));
    assert!(approx(hidden_intensity(-0.5), 0.4));
    assert!(approx(hidden_intensity(0.5), 0.4));
    assert!(approx(output_intensity(1.0), ACTIVATION_INTENSITY_SCALE));
}

#[test]
fn digit_table_lights_expected_segment_counts() {
    let counts: Vec<usize> = DIGIT_SEGMENTS
        .iter()
        .map(|row| row.iter().filter(|&&on| on).count())
        .collect();
    assert_eq!(counts, vec![6, 2, 5, 5, 4, 5, 6, 3, 7, 6]);
    // 0 and 8 differ only in the middle bar
    assert!(!DIGIT_SEGMENTS[0][6]);
    assert!(DIGIT_SEGMENTS[8][6]);
    // 1 is the two right-hand bars
    assert_eq!(
        DIGIT_SEGMENTS[1],
        [false, true, true, false, false, false, false]
    );
}

#[test]
fn lit_segments_scale_with_probability() {
    let bright = segment_appearance(8, 0, 0.9);
    assert_eq!(bright.color, SEGMENT_BRIGHT_COLOR);
    assert!(approx(bright.intensity, 0.9 * SEGMENT_ON_GAIN));

    let dim = segment_appearance(8, 0, 0.3);
    assert_eq!(dim.color, SEGMENT_DIM_COLOR);
    assert!(approx(dim.intensity, 0.3 * SEGMENT_ON_GAIN));

    let floor = segment_appearance(8, 0, 0.01);
    assert_eq!(floor.intensity, SEGMENT_ON_FLOOR);
}

#[test]
fn unlit_segments_stay_dark() {
    for p in [0.0, 0.5, 1.0] {
        let off = segment_appearance(1, 0, p);
        assert_eq!(off.intensity, SEGMENT_OFF_INTENSITY);
        assert_eq!(off.color, SEGMENT_OFF_COLOR);
    }
    // unknown digit or segment is unlit
    assert_eq!(segment_appearance(10, 0, 1.0).intensity, SEGMENT_OFF_INTENSITY);
    assert_eq!(segment_appearance(8, 7, 1.0).intensity, SEGMENT_OFF_INTENSITY);
}
