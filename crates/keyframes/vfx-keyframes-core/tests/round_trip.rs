mod common;

use common::{fixture, value};
use vfx_keyframes_core::{Config, DiskKeyframe, KeyframeRecord, KeyframedValue};

fn recompile(
    f: &common::RecordFixture,
    records: &[Option<KeyframeRecord>],
) -> Vec<Option<KeyframeRecord>> {
    KeyframedValue::from_records(f.kind.clone(), &f.constants, records, Config::default())
        .unwrap()
        .compile_keyframes()
        .unwrap()
}

#[test]
fn synchronized_records_round_trip_exactly() {
    let f = fixture("uv-scroll-synced");
    let compiled = value("uv-scroll-synced").compile_keyframes().unwrap();
    assert_eq!(compiled, f.records);
}

#[test]
fn constant_components_are_dropped_on_compile() {
    let f = fixture("rgb-scenario");
    let compiled = value("rgb-scenario").compile_keyframes().unwrap();
    assert_eq!(compiled[0], f.records[0]);
    assert_eq!(compiled[1], None);
    // B's only keyframe equals its constant
    assert_eq!(compiled[2], None);
}

#[test]
fn halved_scale_and_duplicates_survive_compile() {
    let compiled = value("scale-halved").compile_keyframes().unwrap();
    let rec = compiled[0].as_ref().unwrap();
    assert_eq!((rec.parameter, rec.component), (2, 0));
    assert_eq!(
        rec.keyframes,
        vec![
            DiskKeyframe::new(0, 0.5),
            DiskKeyframe::new(40, 2.0),
            DiskKeyframe::new(100, 0.5),
        ]
    );
}

#[test]
fn second_round_trip_is_idempotent() {
    for name in vfx_test_fixtures::records::keys() {
        let f = fixture(&name);
        let first = recompile(&f, &f.records);
        let second = recompile(&f, &first);
        assert_eq!(first, second, "{name}");
    }
}

#[test]
fn compile_leaves_timeline_untouched() {
    let v = value("extrude-frames");
    let before = v.timeline().clone();
    let compiled = v.compile_keyframes().unwrap();
    assert_eq!(v.timeline(), &before);

    let rec = compiled[1].as_ref().unwrap();
    assert_eq!(rec.keyframes.len(), 3);
    assert!(rec.keyframes.iter().all(|k| k.value == 2.0));
    assert!(compiled[2].is_none());
}

#[test]
fn edited_value_compiles_new_keyframes() {
    let mut v = value("rgb-scenario");
    let id = v.timeline().ids()[1];
    v.set_keyframe_values(id, &[0.0, 0.5, 1.0]).unwrap();
    v.add_keyframe(1.0, &[0.0, 0.0, 1.0]).unwrap();

    let compiled = v.compile_keyframes().unwrap();
    let g = compiled[1].as_ref().unwrap();
    assert_eq!(
        g.keyframes,
        vec![
            DiskKeyframe::new(0, 1.0),
            DiskKeyframe::new(50, 0.5),
            DiskKeyframe::new(100, 0.0),
        ]
    );
    assert!(compiled[2].is_none());
}
