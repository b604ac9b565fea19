mod common;

use approx::assert_relative_eq;
use common::{fixture, value};
use vfx_keyframes_core::{Config, Decompiler, IdAllocator, KeyframeError, KeyframeRecord, ValueKind};

#[test]
fn rgb_components_share_time_points() {
    let v = value("rgb-scenario");
    let tl = v.timeline();
    assert!(v.is_animated());
    assert!(!v.looping());
    assert!(v.interpolate());
    assert_eq!(tl.component_count(), 3);
    for ch in &tl.channels {
        assert_eq!(ch.times().collect::<Vec<_>>(), vec![0.0, 0.5]);
    }
    let values: Vec<Vec<f32>> = tl.channels.iter().map(|c| c.values().collect()).collect();
    assert_eq!(values[0], vec![1.0, 0.0]);
    // G had no record: constant at both points
    assert_eq!(values[1], vec![1.0, 1.0]);
    // B only had a keyframe at 0: held forward
    assert_eq!(values[2], vec![1.0, 1.0]);
    assert!(!tl.channels[1].animated);
    assert!(tl.channels[2].animated);
}

#[test]
fn every_fixture_is_synchronized_and_sorted() {
    for name in vfx_test_fixtures::records::keys() {
        let v = value(&name);
        let tl = v.timeline();
        tl.verify().unwrap_or_else(|e| panic!("{name}: {e}"));
        let times = tl.times();
        assert!(times.windows(2).all(|w| w[0] < w[1]), "{name}: unsorted {times:?}");
        for ch in &tl.channels {
            assert_eq!(ch.times().collect::<Vec<_>>(), times, "{name}");
        }
    }
}

#[test]
fn mixed_loop_pads_looping_component_to_floor() {
    let v = value("mixed-loop");
    let tl = v.timeline();
    assert!(!v.looping());

    let times = tl.times();
    // 20-unit loop padded out to max(101, 30) = 101 units: last frame 100
    assert_eq!(times.last().copied(), Some(100.0));
    assert!(times.last().unwrap() + 1.0 >= 101.0);

    let looped = &tl.channels[0];
    let at = |t: f32| looped.keyframes[tl.index_of_time(t).unwrap()].value;
    assert_eq!(at(20.0), 0.0);
    assert_eq!(at(39.0), 1.0);
    assert_eq!(at(100.0), 0.0);

    // non-looping component interpolates up to its last key then holds
    let plain = &tl.channels[1];
    let at = |t: f32| plain.keyframes[tl.index_of_time(t).unwrap()].value;
    assert_relative_eq!(at(20.0), 2.0 + 2.0 * 20.0 / 29.0, epsilon = 1e-5);
    assert_eq!(at(29.0), 4.0);
    assert_eq!(at(100.0), 4.0);
}

#[test]
fn loop_floor_follows_config() {
    let f = fixture("mixed-loop");
    let cfg = Config {
        lifetime_floor: 40,
        ..Config::default()
    };
    let out = Decompiler::new(cfg)
        .decompile(&f.kind, &f.constants, &f.records, &mut IdAllocator::new())
        .unwrap();
    assert_eq!(out.timeline.times().last().copied(), Some(39.0));
}

#[test]
fn all_looping_components_keep_their_keys() {
    let v = value("uv-scroll-synced");
    assert!(v.looping());
    assert!(!v.interpolate());
    assert_eq!(v.timeline().times(), vec![0.0, 0.25, 1.0]);
}

#[test]
fn frame_gaps_are_filled_per_component() {
    let v = value("extrude-frames");
    let tl = v.timeline();
    assert_eq!(tl.times(), vec![0.0, 4.0, 8.0]);
    let rows: Vec<Vec<f32>> = (0..tl.len()).map(|i| tl.row(i).unwrap().values).collect();
    assert_eq!(rows[0], vec![0.0, 2.0, 0.0]);
    assert_eq!(rows[1], vec![4.0, 2.0, 0.0]);
    assert_eq!(rows[2], vec![8.0, 2.0, 0.0]);
}

#[test]
fn empty_records_fall_back_to_constants() {
    let kind = ValueKind::color(1);
    let records = vec![
        Some(KeyframeRecord::default()),
        None,
        Some(KeyframeRecord::new(Vec::<(u16, f32)>::new())),
    ];
    let out = Decompiler::default()
        .decompile(&kind, &[0.1, 0.2, 0.3], &records, &mut IdAllocator::new())
        .unwrap();
    assert!(!out.is_animated);
    assert_eq!(out.timeline.len(), 1);
    assert_eq!(out.timeline.row(0).unwrap().values, vec![0.1, 0.2, 0.3]);
}

#[test]
fn shape_mismatch_fails_fast() {
    let f = fixture("rgb-scenario");
    let err = Decompiler::default()
        .decompile(&f.kind, &f.constants, &f.records[..2], &mut IdAllocator::new())
        .unwrap_err();
    assert!(matches!(err, KeyframeError::ComponentCountMismatch { .. }));
    assert!(!err.is_internal_fault());
}
