#![allow(dead_code)]
use serde::Deserialize;
use vfx_keyframes_core::{Config, KeyframeRecord, KeyframedValue, ValueKind};

#[derive(Debug, Deserialize)]
pub struct RecordFixture {
    pub kind: ValueKind,
    pub constants: Vec<f32>,
    pub records: Vec<Option<KeyframeRecord>>,
}

pub fn fixture(name: &str) -> RecordFixture {
    vfx_test_fixtures::records::load(name).expect("fixture should load")
}

pub fn value(name: &str) -> KeyframedValue {
    let f = fixture(name);
    KeyframedValue::from_records(f.kind, &f.constants, &f.records, Config::default())
        .expect("decompile should succeed")
}
