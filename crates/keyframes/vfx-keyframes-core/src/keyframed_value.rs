//! The logical multi-component keyframed value owned by an editing session.

use crate::channel::Channel;
use crate::compile::{CompileFlags, Compiler};
use crate::config::Config;
use crate::decompile::Decompiler;
use crate::edit::ReversibleEdit;
use crate::error::KeyframeError;
use crate::ids::{IdAllocator, KeyframeId};
use crate::record::KeyframeRecord;
use crate::timeline::{Row, SynchronizedTimeline};
use crate::value::ValueKind;

/// Addresses one row for removal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyframeRef {
    Id(KeyframeId),
    Time(f32),
}

impl From<KeyframeId> for KeyframeRef {
    fn from(id: KeyframeId) -> Self {
        Self::Id(id)
    }
}

impl From<f32> for KeyframeRef {
    fn from(time: f32) -> Self {
        Self::Time(time)
    }
}

#[derive(Clone, Debug)]
pub struct KeyframedValue {
    kind: ValueKind,
    cfg: Config,
    constants: Vec<f32>,
    timeline: SynchronizedTimeline,
    interpolate: bool,
    looping: bool,
    is_animated: bool,
    ids: IdAllocator,
}

impl KeyframedValue {
    /// A freshly authored, non-animated value holding `constants`.
    pub fn new(kind: ValueKind, constants: &[f32], cfg: Config) -> Result<Self, KeyframeError> {
        check_len("constants", &kind, constants)?;
        let mut ids = IdAllocator::new();
        let id = ids.alloc();
        let timeline = SynchronizedTimeline::new(
            constants.iter().map(|&c| Channel::constant(id, c)).collect(),
        );
        Ok(Self {
            kind,
            cfg,
            constants: constants.to_vec(),
            timeline,
            interpolate: true,
            looping: false,
            is_animated: false,
            ids,
        })
    }

    /// Build a value straight from parsed records.
    pub fn from_records(
        kind: ValueKind,
        constants: &[f32],
        records: &[Option<KeyframeRecord>],
        cfg: Config,
    ) -> Result<Self, KeyframeError> {
        let mut value = Self::new(kind, constants, cfg)?;
        value.decompile_keyframes(records)?;
        Ok(value)
    }

    /// Replace the timeline with the synchronized form of `records`.
    pub fn decompile_keyframes(
        &mut self,
        records: &[Option<KeyframeRecord>],
    ) -> Result<(), KeyframeError> {
        let out = Decompiler::new(self.cfg.clone()).decompile(
            &self.kind,
            &self.constants,
            records,
            &mut self.ids,
        )?;
        self.timeline = out.timeline;
        self.interpolate = out.interpolate;
        self.looping = out.looping;
        self.is_animated = out.is_animated;
        Ok(())
    }

    pub fn compile_keyframes(&self) -> Result<Vec<Option<KeyframeRecord>>, KeyframeError> {
        Compiler::new(self.cfg.clone()).compile(
            &self.kind,
            &self.constants,
            &self.timeline,
            CompileFlags {
                is_animated: self.is_animated,
                looping: self.looping,
                interpolate: self.interpolate,
            },
        )
    }

    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn constants(&self) -> &[f32] {
        &self.constants
    }

    pub fn timeline(&self) -> &SynchronizedTimeline {
        &self.timeline
    }

    #[inline]
    pub fn is_animated(&self) -> bool {
        self.is_animated
    }

    #[inline]
    pub fn interpolate(&self) -> bool {
        self.interpolate
    }

    #[inline]
    pub fn looping(&self) -> bool {
        self.looping
    }

    #[inline]
    pub fn component_count(&self) -> usize {
        self.kind.component_count()
    }

    // ---------- sampling ----------

    /// Value at editor time `time`. Unanimated values return their constants.
    pub fn get_interpolated_value(&self, time: f32) -> Vec<f32> {
        let mut out = vec![0.0; self.component_count()];
        self.fill(time, &mut out);
        out
    }

    /// Same as [`Self::get_interpolated_value`], into a caller buffer.
    pub fn sample_into(&self, time: f32, out: &mut [f32]) -> Result<(), KeyframeError> {
        check_len("sample buffer", &self.kind, out)?;
        self.fill(time, out);
        Ok(())
    }

    /// `out.len()` must equal the component count.
    pub(crate) fn fill(&self, time: f32, out: &mut [f32]) {
        if !self.is_animated || self.timeline.is_empty() {
            out.copy_from_slice(&self.constants);
            return;
        }
        self.timeline.sample_into(time, self.interpolate, out);
    }

    /// Mean of the constant and every keyframe value, per component.
    ///
    /// With `include_white_black_or_zero == false`, color values skip samples
    /// that are pure white or pure black, and other kinds skip zero samples.
    /// A component left with no samples reports its constant.
    pub fn get_average_value(&self, include_white_black_or_zero: bool) -> Vec<f32> {
        let mut samples: Vec<Vec<f32>> = vec![self.constants.clone()];
        if self.is_animated {
            samples.extend(
                (0..self.timeline.len())
                    .filter_map(|i| self.timeline.row(i))
                    .map(|r| r.values),
            );
        }

        let color = self.kind.is_color();
        if !include_white_black_or_zero && color {
            samples.retain(|s| !(s.iter().all(|&v| v == 1.0) || s.iter().all(|&v| v == 0.0)));
        }

        (0..self.component_count())
            .map(|i| {
                let (sum, count) = samples
                    .iter()
                    .map(|s| s[i])
                    .filter(|&v| include_white_black_or_zero || color || v != 0.0)
                    .fold((0.0f32, 0usize), |(sum, n), v| (sum + v, n + 1));
                if count == 0 {
                    self.constants[i]
                } else {
                    sum / count as f32
                }
            })
            .collect()
    }

    // ---------- editing ----------

    /// Add a row at `time`, or overwrite the values of the row already there.
    pub fn add_keyframe(
        &mut self,
        time: f32,
        values: &[f32],
    ) -> Result<ReversibleEdit, KeyframeError> {
        check_len("keyframe values", &self.kind, values)?;
        let time = self.check_time(time)?;

        let edit = match self.timeline.index_of_time(time).and_then(|i| self.timeline.row(i)) {
            Some(row) => ReversibleEdit::SetValues {
                id: row.id,
                old: row.values,
                new: values.to_vec(),
            },
            None => ReversibleEdit::InsertKeyframe(Row {
                id: self.ids.alloc(),
                time,
                values: values.to_vec(),
            }),
        };
        let edit = self.with_animated(edit);
        self.apply_edit(&edit)?;
        Ok(edit)
    }

    pub fn remove_keyframe(
        &mut self,
        target: impl Into<KeyframeRef>,
    ) -> Result<ReversibleEdit, KeyframeError> {
        let index = self.resolve(target.into())?;
        let row = self
            .timeline
            .row(index)
            .ok_or_else(|| not_found(format!("row {index}")))?;
        let edit = ReversibleEdit::RemoveKeyframe(row);
        self.apply_edit(&edit)?;
        Ok(edit)
    }

    pub fn set_keyframe_values(
        &mut self,
        id: KeyframeId,
        values: &[f32],
    ) -> Result<ReversibleEdit, KeyframeError> {
        check_len("keyframe values", &self.kind, values)?;
        let index = self.resolve(KeyframeRef::Id(id))?;
        let old = self
            .timeline
            .row(index)
            .map(|r| r.values)
            .ok_or_else(|| not_found(format!("{id:?}")))?;
        let edit = self.with_animated(ReversibleEdit::SetValues {
            id,
            old,
            new: values.to_vec(),
        });
        self.apply_edit(&edit)?;
        Ok(edit)
    }

    pub fn move_keyframe(
        &mut self,
        id: KeyframeId,
        time: f32,
    ) -> Result<ReversibleEdit, KeyframeError> {
        let time = self.check_time(time)?;
        let index = self.resolve(KeyframeRef::Id(id))?;
        let from = self.timeline.times()[index];
        let edit = ReversibleEdit::MoveKeyframe { id, from, to: time };
        self.apply_edit(&edit)?;
        Ok(edit)
    }

    pub fn set_interpolate(&mut self, interpolate: bool) -> ReversibleEdit {
        let edit = ReversibleEdit::SetInterpolate {
            old: self.interpolate,
            new: interpolate,
        };
        self.interpolate = interpolate;
        edit
    }

    pub fn set_loop(&mut self, looping: bool) -> ReversibleEdit {
        let edit = ReversibleEdit::SetLoop {
            old: self.looping,
            new: looping,
        };
        self.looping = looping;
        edit
    }

    /// On an unanimated value the seeded rows follow the new constants, so a
    /// later `add_keyframe` starts from them.
    pub fn set_constants(&mut self, constants: &[f32]) -> Result<ReversibleEdit, KeyframeError> {
        check_len("constants", &self.kind, constants)?;
        let set = ReversibleEdit::SetConstants {
            old: self.constants.clone(),
            new: constants.to_vec(),
        };
        let edit = if self.is_animated {
            set
        } else {
            let rows = (0..self.timeline.len())
                .filter_map(|i| self.timeline.row(i))
                .map(|row| ReversibleEdit::SetValues {
                    id: row.id,
                    old: row.values,
                    new: constants.to_vec(),
                });
            ReversibleEdit::Composite(std::iter::once(set).chain(rows).collect())
        };
        self.apply_edit(&edit)?;
        Ok(edit)
    }

    /// Replay a descriptor. Undo is `apply_edit(&edit.inverse())`.
    pub fn apply_edit(&mut self, edit: &ReversibleEdit) -> Result<(), KeyframeError> {
        match edit {
            ReversibleEdit::InsertKeyframe(row) => {
                check_len("keyframe values", &self.kind, &row.values)?;
                self.ids.reserve(row.id);
                self.timeline.upsert_row(row);
            }
            ReversibleEdit::RemoveKeyframe(row) => {
                let index = self.resolve(KeyframeRef::Id(row.id))?;
                self.timeline.remove_row(index);
            }
            ReversibleEdit::SetValues { id, new, .. } => {
                check_len("keyframe values", &self.kind, new)?;
                let index = self.resolve(KeyframeRef::Id(*id))?;
                self.timeline.set_row_values(index, new);
            }
            ReversibleEdit::MoveKeyframe { id, to, .. } => {
                let index = self.resolve(KeyframeRef::Id(*id))?;
                if let Some(existing) = self.timeline.index_of_time(*to) {
                    if existing != index {
                        return Err(KeyframeError::TimeOccupied {
                            time: *to,
                            existing: self.timeline.ids()[existing],
                        });
                    }
                    return Ok(());
                }
                if let Some(mut row) = self.timeline.remove_row(index) {
                    row.time = *to;
                    self.timeline.upsert_row(&row);
                }
            }
            ReversibleEdit::SetAnimated { new, .. } => self.is_animated = *new,
            ReversibleEdit::SetInterpolate { new, .. } => self.interpolate = *new,
            ReversibleEdit::SetLoop { new, .. } => self.looping = *new,
            ReversibleEdit::SetConstants { new, .. } => {
                check_len("constants", &self.kind, new)?;
                self.constants.clone_from(new);
                for (ch, &c) in self.timeline.channels.iter_mut().zip(new) {
                    ch.constant = c;
                }
            }
            ReversibleEdit::Composite(edits) => {
                // all or nothing
                let snapshot = self.clone();
                for e in edits {
                    if let Err(err) = self.apply_edit(e) {
                        *self = snapshot;
                        return Err(err);
                    }
                }
            }
        }
        Ok(())
    }

    fn with_animated(&self, edit: ReversibleEdit) -> ReversibleEdit {
        if self.is_animated {
            edit
        } else {
            ReversibleEdit::Composite(vec![
                ReversibleEdit::SetAnimated {
                    old: false,
                    new: true,
                },
                edit,
            ])
        }
    }

    fn resolve(&self, target: KeyframeRef) -> Result<usize, KeyframeError> {
        match target {
            KeyframeRef::Id(id) => self
                .timeline
                .index_of_id(id)
                .ok_or_else(|| not_found(format!("{id:?}"))),
            KeyframeRef::Time(time) => self
                .timeline
                .index_of_time(time)
                .ok_or_else(|| not_found(format!("time {time}"))),
        }
    }

    /// Validates and normalizes `-0.0` to `0.0`.
    fn check_time(&self, time: f32) -> Result<f32, KeyframeError> {
        if !time.is_finite() {
            return Err(KeyframeError::InvalidTime { time });
        }
        let (start, end) = self.kind.editor_time_range();
        if time < start || time > end {
            return Err(KeyframeError::TimeOutOfRange { time, start, end });
        }
        Ok(time + 0.0)
    }
}

fn check_len(what: &str, kind: &ValueKind, values: &[f32]) -> Result<(), KeyframeError> {
    let expected = kind.component_count();
    if values.len() != expected {
        return Err(KeyframeError::count_mismatch(what, expected, values.len()));
    }
    Ok(())
}

fn not_found(target: String) -> KeyframeError {
    KeyframeError::KeyframeNotFound { target }
}
