//! Tests for hill generation, expansion and the cached terrain.

use glam::DVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tanks_core::error::ConfigError;

use crate::config::TerrainConfig;
use crate::hills::Hills;
use crate::keypoints::generate_key_points;
use crate::polyline::{closed_outline, expand_hills, height_at};

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

// ---- Config ----

#[test]
fn test_default_config_is_valid() {
    assert_eq!(TerrainConfig::default().validate(), Ok(()));
}

#[test]
fn test_validate_rejects_bad_parameters() {
    let few = TerrainConfig {
        min_key_points: 2,
        ..Default::default()
    };
    assert_eq!(few.validate(), Err(ConfigError::TooFewKeyPoints(2)));

    let negative = TerrainConfig {
        range_dy: -1.0,
        ..Default::default()
    };
    assert!(matches!(
        negative.validate(),
        Err(ConfigError::Negative { field: "range_dy", .. })
    ));

    let zero_dx = TerrainConfig {
        min_dx: 0.0,
        ..Default::default()
    };
    assert!(matches!(
        zero_dx.validate(),
        Err(ConfigError::NotPositive { field: "min_dx", .. })
    ));

    let empty_band = TerrainConfig {
        padding_top: 200.0,
        padding_bottom: 200.0,
        ..Default::default()
    };
    assert!(matches!(
        empty_band.validate(),
        Err(ConfigError::EmptyBand { .. })
    ));

    // Center is 200, band is (20, 380): a 180 step can't fit.
    let unreachable = TerrainConfig {
        min_dy: 180.0,
        ..Default::default()
    };
    assert!(matches!(
        unreachable.validate(),
        Err(ConfigError::UnreachableHeight { .. })
    ));
}

// ---- Key points ----

#[test]
fn test_key_points_same_seed_identical() {
    let config = TerrainConfig::default();
    let a = generate_key_points(&config, &mut rng(7));
    let b = generate_key_points(&config, &mut rng(7));
    assert_eq!(a, b);
}

#[test]
fn test_key_points_different_seeds_differ() {
    let config = TerrainConfig::default();
    let a = generate_key_points(&config, &mut rng(1));
    let b = generate_key_points(&config, &mut rng(2));
    assert_ne!(a, b);
}

#[test]
fn test_key_points_layout() {
    let config = TerrainConfig::default();
    let points = generate_key_points(&config, &mut rng(42));

    // min_key_points, the floor point and the flat run-out.
    assert_eq!(points.len(), config.min_key_points + 2);
    assert_eq!(points[0], DVec2::new(-config.min_dx, config.lead_in_y));
    assert_eq!(points[1], DVec2::new(0.0, config.height / 2.0));

    for pair in points.windows(2) {
        assert!(pair[1].x > pair[0].x, "x must strictly increase: {pair:?}");
    }

    let top = config.height - config.padding_top;
    for p in &points[1..] {
        assert!(
            p.y > config.padding_bottom && p.y < top,
            "{p:?} outside the vertical band"
        );
    }
}

#[test]
fn test_key_points_steps_within_ranges() {
    let config = TerrainConfig::default();
    let points = generate_key_points(&config, &mut rng(99));

    // Random steps start after the flat lead-in (points[1] -> points[2]).
    for pair in points[2..config.min_key_points].windows(2) {
        let dx = pair[1].x - pair[0].x;
        let dy = (pair[1].y - pair[0].y).abs();
        assert!(dx >= config.min_dx - 1e-9 && dx <= config.min_dx + config.range_dx + 1e-9);
        assert!(dy >= config.min_dy - 1e-9 && dy <= config.min_dy + config.range_dy + 1e-9);
    }
}

#[test]
fn test_key_points_alternate_direction() {
    let config = TerrainConfig::default();
    let points = generate_key_points(&config, &mut rng(5));
    let steps: Vec<f64> = points[2..config.min_key_points]
        .windows(2)
        .map(|p| p[1].y - p[0].y)
        .collect();
    for pair in steps.windows(2) {
        assert!(pair[0] * pair[1] < 0.0, "consecutive steps share a sign: {pair:?}");
    }
}

#[test]
fn test_flat_begin_and_end() {
    let config = TerrainConfig::default();
    let points = generate_key_points(&config, &mut rng(3));

    assert_eq!(points[2].y, points[1].y);
    assert_eq!(points[2].x - points[1].x, config.begin);

    let n = points.len();
    let floor = config.min_dy + config.padding_bottom;
    assert_eq!(points[n - 2].y, floor);
    assert_eq!(points[n - 1].y, floor);
    assert!((points[n - 1].x - points[n - 2].x - config.end).abs() < 1e-9);
}

#[test]
fn test_no_begin_no_end() {
    let config = TerrainConfig {
        begin: 0.0,
        end: 0.0,
        ..Default::default()
    };
    let points = generate_key_points(&config, &mut rng(3));
    assert_eq!(points.len(), config.min_key_points + 1);
    assert_ne!(points[2].y, points[1].y);
}

// ---- Expansion ----

#[test]
fn test_expand_single_hill() {
    let keys = [DVec2::new(0.0, 100.0), DVec2::new(100.0, 0.0)];
    let boundary = expand_hills(&keys, 10.0);

    assert_eq!(boundary.len(), 11);
    assert_eq!(boundary[0], keys[0]);
    assert_eq!(boundary[10], keys[1]);
    // Half-way down the cosine is the midpoint height.
    assert!((boundary[5].x - 50.0).abs() < 1e-9);
    assert!((boundary[5].y - 50.0).abs() < 1e-9);
    // Cosine shape: flat near the crest.
    assert!(boundary[1].y > 95.0);
}

#[test]
fn test_expand_short_span_gets_one_segment() {
    let keys = [DVec2::new(0.0, 10.0), DVec2::new(4.0, 20.0)];
    assert_eq!(expand_hills(&keys, 10.0), keys.to_vec());
}

#[test]
fn test_expand_passes_through_key_points() {
    let config = TerrainConfig::default();
    let keys = generate_key_points(&config, &mut rng(11));
    let boundary = expand_hills(&keys, config.segment_width);

    assert_eq!(boundary.first(), keys.first());
    assert_eq!(boundary.last(), keys.last());
    for key in &keys {
        assert!(boundary.contains(key), "{key:?} missing from boundary");
    }
    for pair in boundary.windows(2) {
        assert!(pair[1].x > pair[0].x);
    }
}

#[test]
fn test_height_at_and_outline() {
    let boundary = [
        DVec2::new(0.0, 10.0),
        DVec2::new(10.0, 30.0),
        DVec2::new(20.0, 30.0),
    ];
    assert_eq!(height_at(&boundary, 0.0), Some(10.0));
    assert_eq!(height_at(&boundary, 5.0), Some(20.0));
    assert_eq!(height_at(&boundary, 15.0), Some(30.0));
    assert_eq!(height_at(&boundary, -1.0), None);
    assert_eq!(height_at(&boundary, 21.0), None);

    let outline = closed_outline(&boundary);
    assert_eq!(outline.len(), 5);
    assert_eq!(outline[0], DVec2::new(0.0, 0.0));
    assert_eq!(outline[4], DVec2::new(20.0, 0.0));
}

// ---- Hills cache ----

#[test]
fn test_hills_lazy_generation() {
    let mut hills = Hills::new(TerrainConfig::default()).unwrap();
    assert!(!hills.is_generated());
    assert!(hills.key_points().is_empty());
    assert_eq!(hills.width(), 0.0);

    hills.ensure_generated(&mut rng(42));
    assert!(hills.is_generated());
    assert_eq!(hills.width(), hills.key_points().last().unwrap().x);

    // Cached: another rng does not change anything.
    let before = hills.key_points().to_vec();
    hills.ensure_generated(&mut rng(777));
    assert_eq!(hills.key_points(), before.as_slice());
}

#[test]
fn test_hills_setter_invalidates_cache() {
    let mut hills = Hills::new(TerrainConfig::default()).unwrap();
    hills.ensure_generated(&mut rng(42));

    hills.set_min_key_points(20).unwrap();
    assert!(!hills.is_generated());

    hills.ensure_generated(&mut rng(42));
    assert_eq!(hills.key_points().len(), 22);
}

#[test]
fn test_hills_same_value_keeps_cache() {
    let mut hills = Hills::new(TerrainConfig::default()).unwrap();
    hills.ensure_generated(&mut rng(42));
    hills.set_min_dx(TerrainConfig::default().min_dx).unwrap();
    assert!(hills.is_generated());
}

#[test]
fn test_hills_rejected_setter_keeps_state() {
    let mut hills = Hills::new(TerrainConfig::default()).unwrap();
    hills.ensure_generated(&mut rng(42));
    let before = hills.key_points().to_vec();

    assert_eq!(
        hills.set_min_key_points(1),
        Err(ConfigError::TooFewKeyPoints(1))
    );
    assert!(hills.set_padding_bottom(-5.0).is_err());

    assert_eq!(hills.config(), &TerrainConfig::default());
    assert!(hills.is_generated());
    assert_eq!(hills.key_points(), before.as_slice());
}

#[test]
fn test_hills_new_rejects_invalid() {
    let config = TerrainConfig {
        min_key_points: 0,
        ..Default::default()
    };
    assert!(Hills::new(config).is_err());
}

#[test]
fn test_hills_height_at_key_points() {
    let mut hills = Hills::new(TerrainConfig::default()).unwrap();
    hills.generate(&mut rng(8));
    for key in hills.key_points().to_vec() {
        let h = hills.height_at(key.x).unwrap();
        assert!((h - key.y).abs() < 1e-6, "{key:?} vs {h}");
    }
    assert_eq!(hills.height_at(hills.width() + 1.0), None);
}
