//! Keyframe channel synchronization for particle/trail effect parameters.
//!
//! The container format stores each scalar component of a value as its own
//! keyframe record, with independent times and loop flags. Editors want one
//! timeline where every component shares the same time points. This crate
//! converts between the two:
//!
//! - [`Decompiler`]: records -> [`SynchronizedTimeline`] (dedupe, loop
//!   reconciliation, gap filling)
//! - [`Compiler`]: timeline -> minimal sparse records
//! - [`KeyframedValue`]: the editing surface; every mutation returns a
//!   [`ReversibleEdit`] for the caller's undo stack.

pub mod channel;
pub mod compile;
pub mod config;
pub mod decompile;
pub mod edit;
pub mod error;
pub mod ids;
pub mod interp;
pub mod keyframed_value;
mod loop_expand;
pub mod record;
pub mod scratch;
pub mod timeline;
pub mod value;

// Re-exports for consumers (editor and container serializer)
pub use channel::{Channel, Keyframe};
pub use compile::{CompileFlags, Compiler};
pub use config::Config;
pub use decompile::{Decompiled, Decompiler};
pub use edit::ReversibleEdit;
pub use error::KeyframeError;
pub use ids::{IdAllocator, KeyframeId};
pub use keyframed_value::{KeyframeRef, KeyframedValue};
pub use record::{parse_records_json, DiskKeyframe, KeyframeRecord};
pub use scratch::SampleScratch;
pub use timeline::{Row, SynchronizedTimeline};
pub use value::{Magnitude, Shape, TimeDomain, ValueKind};

pub type Result<T> = core::result::Result<T, KeyframeError>;
