//! Tests for the three connection modes and the edge cap.

use nalgebra::Vector3;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sphere_web::{ConnectionMode, DEFAULT_GEOM_LIMIT, GenerationConfig, Point, build, build_with, generate};

fn p(x: f64, y: f64, z: f64) -> Point {
    Vector3::new(x, y, z)
}

/// `n` distinct points spaced 1.0 apart along x.
fn line(n: usize) -> Vec<Point> {
    (0..n).map(|i| p(i as f64, 0.0, 0.0)).collect()
}

fn grid(angle_step: f64) -> Vec<Point> {
    let config = GenerationConfig {
        angle_step,
        randomize_angle: 0.0,
        randomize_radius: 0.0,
        ..GenerationConfig::default()
    };
    generate(&config, &mut StdRng::seed_from_u64(0))
}

#[test]
fn empty_field_yields_empty_list() {
    for mode in ConnectionMode::ALL {
        let edges = build(&[], 1.0, mode, DEFAULT_GEOM_LIMIT);
        assert!(edges.is_empty(), "{mode}");
        assert!(!edges.limit_reached());
    }
}

#[test]
fn dist_zero_threshold_connects_nothing() {
    let edges = build(&line(5), 0.0, ConnectionMode::DistanceThreshold, DEFAULT_GEOM_LIMIT);
    assert!(edges.is_empty());
}

#[test]
fn dist_small_threshold_gives_one_self_edge_per_point() {
    let points = line(6);
    let edges = build(&points, 0.01, ConnectionMode::DistanceThreshold, DEFAULT_GEOM_LIMIT);
    assert_eq!(edges.len(), 6);
    assert_eq!(edges.flattened_len(), 12);
    for (edge, point) in edges.edges().iter().zip(&points) {
        assert_eq!(edge, &(*point, *point));
    }
}

#[test]
fn dist_emits_ordered_pairs_including_self() {
    let a = p(0.0, 0.0, 0.0);
    let b = p(0.5, 0.0, 0.0);
    let c = p(5.0, 0.0, 0.0);
    let edges = build(&[a, b, c], 1.0, ConnectionMode::DistanceThreshold, DEFAULT_GEOM_LIMIT);
    assert_eq!(edges.edges(), &[(a, a), (a, b), (b, a), (b, b), (c, c)]);
}

#[test]
fn dist_on_quarter_turn_grid() {
    // 16 points: both poles are hit four times each and the four equator
    // positions twice each, so coincident points connect as well.
    let points = grid(90.0);
    assert_eq!(points.len(), 16);
    let edges = build(&points, 0.01, ConnectionMode::DistanceThreshold, DEFAULT_GEOM_LIMIT);
    assert_eq!(edges.len(), 4 * 4 + 4 * 4 + 4 * (2 * 2));
    assert_eq!(edges.flattened_len(), 96);
}

#[test]
fn closest_picks_last_qualifying_not_nearest() {
    let a = p(0.0, 0.0, 0.0);
    let near = p(0.1, 0.0, 0.0);
    let far = p(1.0, 0.0, 0.0);
    let edges = build(&[a, near, far], 2.0, ConnectionMode::ClosestWithinThreshold, DEFAULT_GEOM_LIMIT);
    assert_eq!(edges.edges()[0], (a, far));
    assert_eq!(edges.edges()[1], (near, far));
    assert_eq!(edges.edges()[2], (far, near));
}

#[test]
fn closest_falls_back_to_self() {
    let a = p(0.0, 0.0, 0.0);
    let b = p(10.0, 0.0, 0.0);
    let edges = build(&[a, b], 1.0, ConnectionMode::ClosestWithinThreshold, DEFAULT_GEOM_LIMIT);
    assert_eq!(edges.edges(), &[(a, a), (b, b)]);
}

#[test]
fn closest_skips_coincident_points() {
    let a = p(1.0, 1.0, 1.0);
    let edges = build(&[a, a], 1.0, ConnectionMode::ClosestWithinThreshold, DEFAULT_GEOM_LIMIT);
    assert_eq!(edges.edges(), &[(a, a), (a, a)]);
}

#[test]
fn closest_with_threshold_beyond_diameter_never_self_pairs() {
    let points = grid(30.0);
    let edges = build(&points, 4.5, ConnectionMode::ClosestWithinThreshold, DEFAULT_GEOM_LIMIT);
    assert_eq!(edges.len(), points.len());
    assert!(edges.edges().iter().all(|(a, b)| a != b));
}

#[test]
fn nearest_pairs_two_points_with_each_other() {
    let a = p(0.0, 2.0, 0.0);
    let b = p(0.0, -2.0, 0.0);
    for threshold in [0.0, 100.0] {
        let edges = build(&[a, b], threshold, ConnectionMode::ClosestUnconditional, DEFAULT_GEOM_LIMIT);
        assert_eq!(edges.edges(), &[(a, b), (b, a)]);
    }
}

#[test]
fn nearest_keeps_first_of_equal_candidates() {
    let origin = p(0.0, 0.0, 0.0);
    let right = p(1.0, 0.0, 0.0);
    let left = p(-1.0, 0.0, 0.0);
    let edges = build(&[origin, right, left], 0.0, ConnectionMode::ClosestUnconditional, DEFAULT_GEOM_LIMIT);
    assert_eq!(edges.edges()[0], (origin, right));
    assert_eq!(edges.edges()[1], (right, origin));
    assert_eq!(edges.edges()[2], (left, origin));
}

#[test]
fn nearest_alone_pairs_with_self() {
    let a = p(0.0, 0.0, 2.0);
    let edges = build(&[a], 0.0, ConnectionMode::ClosestUnconditional, DEFAULT_GEOM_LIMIT);
    assert_eq!(edges.edges(), &[(a, a)]);
}

#[test]
fn cap_stops_the_whole_dist_build() {
    let points = line(10);
    // Every pair is within reach: 100 edges uncapped.
    let full = build(&points, 100.0, ConnectionMode::DistanceThreshold, DEFAULT_GEOM_LIMIT);
    assert_eq!(full.len(), 100);
    assert!(!full.limit_reached());

    let capped = build(&points, 100.0, ConnectionMode::DistanceThreshold, 15);
    assert!(capped.limit_reached());
    assert_eq!(capped.flattened_len(), 16);
    assert_eq!(capped.edges(), &full.edges()[..8]);

    // Limit past the first row: the cut lands mid-scan of the second point.
    let capped = build(&points, 100.0, ConnectionMode::DistanceThreshold, 25);
    assert_eq!(capped.flattened_len(), 26);
    assert_eq!(capped.edges().last(), Some(&(points[1], points[2])));
}

#[test]
fn cap_applies_to_single_edge_modes() {
    let points = line(10);
    for mode in [ConnectionMode::ClosestWithinThreshold, ConnectionMode::ClosestUnconditional] {
        let capped = build(&points, 3.0, mode, 5);
        assert_eq!(capped.flattened_len(), 6, "{mode}");
        assert!(capped.limit_reached());

        let exact = build(&points, 3.0, mode, 20);
        assert_eq!(exact.len(), 10, "{mode}");
        assert!(!exact.limit_reached());
    }
}

#[test]
fn limit_reached_on_the_last_edge_drops_nothing() {
    let points = line(10);
    let full = build(&points, 3.0, ConnectionMode::ClosestWithinThreshold, DEFAULT_GEOM_LIMIT);
    let edges = build(&points, 3.0, ConnectionMode::ClosestWithinThreshold, 19);
    assert!(edges.limit_reached());
    assert_eq!(edges.edges(), full.edges());
}

#[test]
fn zero_limit_keeps_one_edge() {
    let edges = build(&line(3), 5.0, ConnectionMode::DistanceThreshold, 0);
    assert_eq!(edges.len(), 1);
    assert!(edges.limit_reached());
}

#[test]
fn flattened_alternates_endpoints() {
    let a = p(0.0, 0.0, 0.0);
    let b = p(0.5, 0.0, 0.0);
    let edges = build(&[a, b], 1.0, ConnectionMode::ClosestWithinThreshold, DEFAULT_GEOM_LIMIT);
    assert_eq!(edges.flattened(), vec![a, b, b, a]);
}

#[test]
fn build_with_reads_the_config() {
    let points = line(4);
    let config = GenerationConfig {
        connection_threshold: 1.5,
        mode: ConnectionMode::DistanceThreshold,
        geom_limit: 7,
        ..GenerationConfig::default()
    };
    let edges = build_with(&points, &config);
    assert_eq!(edges, build(&points, 1.5, ConnectionMode::DistanceThreshold, 7));
    assert_eq!(edges.flattened_len(), 8);
}
