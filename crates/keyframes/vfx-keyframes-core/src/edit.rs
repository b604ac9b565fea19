//! Reversible edit descriptors.
//!
//! Every mutation of a [`crate::KeyframedValue`] returns one of these. The
//! engine never talks to an undo stack; callers record the descriptor and
//! replay `edit.inverse()` through `KeyframedValue::apply_edit` to undo.

use serde::{Deserialize, Serialize};

use crate::ids::KeyframeId;
use crate::timeline::Row;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum ReversibleEdit {
    InsertKeyframe(Row),
    RemoveKeyframe(Row),
    SetValues {
        id: KeyframeId,
        old: Vec<f32>,
        new: Vec<f32>,
    },
    MoveKeyframe {
        id: KeyframeId,
        from: f32,
        to: f32,
    },
    SetAnimated {
        old: bool,
        new: bool,
    },
    SetInterpolate {
        old: bool,
        new: bool,
    },
    SetLoop {
        old: bool,
        new: bool,
    },
    SetConstants {
        old: Vec<f32>,
        new: Vec<f32>,
    },
    /// Applied in order; inverted in reverse order.
    Composite(Vec<ReversibleEdit>),
}

impl ReversibleEdit {
    /// The descriptor that undoes this one.
    pub fn inverse(&self) -> Self {
        match self {
            Self::InsertKeyframe(row) => Self::RemoveKeyframe(row.clone()),
            Self::RemoveKeyframe(row) => Self::InsertKeyframe(row.clone()),
            Self::SetValues { id, old, new } => Self::SetValues {
                id: *id,
                old: new.clone(),
                new: old.clone(),
            },
            Self::MoveKeyframe { id, from, to } => Self::MoveKeyframe {
                id: *id,
                from: *to,
                to: *from,
            },
            Self::SetAnimated { old, new } => Self::SetAnimated {
                old: *new,
                new: *old,
            },
            Self::SetInterpolate { old, new } => Self::SetInterpolate {
                old: *new,
                new: *old,
            },
            Self::SetLoop { old, new } => Self::SetLoop {
                old: *new,
                new: *old,
            },
            Self::SetConstants { old, new } => Self::SetConstants {
                old: new.clone(),
                new: old.clone(),
            },
            Self::Composite(edits) => Self::Composite(edits.iter().rev().map(Self::inverse).collect()),
        }
    }
}
