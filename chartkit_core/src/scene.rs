// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The retained scene: layers of keyed marks.

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::diff::MarkDiff;
use crate::mark::{Mark, MarkId, MarkPayload};
use crate::reconcile::reconcile;

/// Identifies a layer. Layers paint in ascending id order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u32);

/// The marks encoded from one datum of a join.
///
/// Most data produce a single mark; axis ticks produce a rule and a label.
pub type MarkGroup = SmallVec<[Mark; 2]>;

/// Layer attributes (an SVG `<g>` element).
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    /// Class attribute of the group.
    pub class: Cow<'static, str>,
    /// Translation applied to every mark in the layer.
    pub offset: Vec2,
}

impl Layer {
    /// Creates a layer with the given class and no translation.
    pub fn new(class: impl Into<Cow<'static, str>>) -> Self {
        Self {
            class: class.into(),
            offset: Vec2::ZERO,
        }
    }

    /// Sets the translation.
    pub fn with_offset(mut self, offset: impl Into<Vec2>) -> Self {
        self.offset = offset.into();
        self
    }
}

/// Key for positional joins.
pub fn index_key(index: usize) -> u64 {
    index as u64
}

/// Key for joins keyed by a numeric value.
///
/// `0.0` and `-0.0` share a key.
pub fn value_key(value: f64) -> u64 {
    if value == 0.0 { 0 } else { value.to_bits() }
}

#[derive(Clone, Debug)]
struct Bound {
    key: u64,
    marks: SmallVec<[MarkId; 2]>,
}

#[derive(Clone, Debug)]
struct LayerState {
    layer: Layer,
    bound: Vec<Bound>,
}

/// A retained set of marks grouped into layers.
///
/// Marks enter a layer through [`Scene::join`], which reconciles a data sequence against the
/// previously bound sequence and returns the resulting [`MarkDiff`]s.
#[derive(Debug, Default)]
pub struct Scene {
    layers: HashMap<LayerId, LayerState>,
    marks: HashMap<MarkId, (LayerId, Mark)>,
    next_id: u64,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the layer if it does not exist, otherwise updates its attributes.
    ///
    /// Returns `true` if the layer was created.
    pub fn ensure_layer(&mut self, id: LayerId, layer: Layer) -> bool {
        match self.layers.get_mut(&id) {
            Some(state) => {
                state.layer = layer;
                false
            }
            None => {
                self.layers.insert(
                    id,
                    LayerState {
                        layer,
                        bound: Vec::new(),
                    },
                );
                true
            }
        }
    }

    /// Returns the attributes of a layer.
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(&id).map(|s| &s.layer)
    }

    /// Returns all layers in paint order.
    pub fn layers(&self) -> Vec<(LayerId, &Layer)> {
        let mut out: Vec<_> = self.layers.iter().map(|(id, s)| (*id, &s.layer)).collect();
        out.sort_by_key(|(id, _)| *id);
        out
    }

    /// Binds `data` to the marks of `layer`.
    ///
    /// Items are matched to the previous binding with `key_fn` (see [`crate::reconcile`]).
    /// `encode` is called once per bound item, for entering and updating items alike, and
    /// returns the marks for that item. Matched marks keep their [`MarkId`]; an update diff is
    /// only emitted when the re-encoded mark differs.
    ///
    /// Diffs are ordered exits first, then updates and entries in data order.
    ///
    /// Panics if `layer` has not been created with [`Scene::ensure_layer`].
    pub fn join<T>(
        &mut self,
        layer: LayerId,
        data: &[T],
        key_fn: impl FnMut(usize, &T) -> u64,
        mut encode: impl FnMut(usize, &T) -> MarkGroup,
    ) -> Vec<MarkDiff> {
        let previous = core::mem::take(
            &mut self
                .layers
                .get_mut(&layer)
                .expect("join on a layer that was never created")
                .bound,
        );
        let previous_keys: Vec<u64> = previous.iter().map(|b| b.key).collect();
        let rec = reconcile(&previous_keys, data, key_fn);

        let mut diffs = Vec::new();
        for exited in &rec.exited {
            for id in &previous[exited.previous_index].marks {
                self.remove_mark(*id, &mut diffs);
            }
        }

        // Slot per new item: `Some(previous_index)` re-binds, `None` enters.
        let mut slots: Vec<(u64, Option<usize>)> = alloc::vec![(0, None); data.len()];
        for u in &rec.updated {
            slots[u.index] = (u.key, Some(u.previous_index));
        }
        for e in &rec.entered {
            slots[e.index] = (e.key, None);
        }

        let mut bound = Vec::with_capacity(data.len());
        for (index, (item, (key, previous_index))) in data.iter().zip(slots).enumerate() {
            let group = encode(index, item);
            let reuse: &[MarkId] = match previous_index {
                Some(p) => &previous[p].marks,
                None => &[],
            };
            let mut ids = SmallVec::with_capacity(group.len());
            let mut group = group.into_iter();
            for &id in reuse {
                match group.next() {
                    Some(mark) => {
                        self.update_mark(id, layer, mark, &mut diffs);
                        ids.push(id);
                    }
                    None => self.remove_mark(id, &mut diffs),
                }
            }
            for mark in group {
                ids.push(self.insert_mark(layer, mark, &mut diffs));
            }
            bound.push(Bound { key, marks: ids });
        }

        log::trace!(
            "join {layer:?}: {} entered, {} updated, {} exited, {} diffs",
            rec.entered.len(),
            rec.updated.len(),
            rec.exited.len(),
            diffs.len()
        );

        if let Some(state) = self.layers.get_mut(&layer) {
            state.bound = bound;
        }
        diffs
    }

    /// Binds a single datum to `layer` (one element of its kind ever exists).
    pub fn join_one(&mut self, layer: LayerId, encode: impl FnOnce() -> MarkGroup) -> Vec<MarkDiff> {
        let mut encode = Some(encode);
        self.join(layer, &[()], |_, _| 0, |_, _| {
            encode.take().map(|f| f()).unwrap_or_default()
        })
    }

    /// Removes every mark of `layer`, keeping the layer itself.
    pub fn clear_layer(&mut self, layer: LayerId) -> Vec<MarkDiff> {
        let Some(state) = self.layers.get_mut(&layer) else {
            return Vec::new();
        };
        let bound = core::mem::take(&mut state.bound);
        let mut diffs = Vec::new();
        for b in bound {
            for id in b.marks {
                self.remove_mark(id, &mut diffs);
            }
        }
        diffs
    }

    /// Returns a mark by id.
    pub fn mark(&self, id: MarkId) -> Option<&Mark> {
        self.marks.get(&id).map(|(_, m)| m)
    }

    /// Total number of marks across layers.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if the scene has no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Number of data items currently bound to `layer`.
    pub fn bound_len(&self, layer: LayerId) -> usize {
        self.layers.get(&layer).map_or(0, |s| s.bound.len())
    }

    /// Marks of `layer` in data order.
    pub fn layer_marks(&self, layer: LayerId) -> Vec<(MarkId, &Mark)> {
        let Some(state) = self.layers.get(&layer) else {
            return Vec::new();
        };
        state
            .bound
            .iter()
            .flat_map(|b| b.marks.iter())
            .filter_map(|id| self.mark(*id).map(|m| (*id, m)))
            .collect()
    }

    /// Marks across all layers carrying `class`, in layer then data order.
    pub fn marks_with_class(&self, class: &str) -> Vec<(MarkId, &Mark)> {
        self.layers()
            .into_iter()
            .flat_map(|(id, _)| self.layer_marks(id))
            .filter(|(_, m)| m.has_class(class))
            .collect()
    }

    /// Returns the datum index of the topmost rect mark of `layer` containing `point`.
    ///
    /// `point` is in scene coordinates (the layer offset is applied).
    pub fn hit_test(&self, layer: LayerId, point: Point) -> Option<usize> {
        let state = self.layers.get(&layer)?;
        let local = point - state.layer.offset;
        self.layer_marks(layer)
            .into_iter()
            .rev()
            .find_map(|(_, mark)| match &mark.payload {
                MarkPayload::Rect(r) if r.rect.abs().contains(local) => mark.datum,
                _ => None,
            })
    }

    fn insert_mark(&mut self, layer: LayerId, mark: Mark, diffs: &mut Vec<MarkDiff>) -> MarkId {
        self.next_id += 1;
        let id = MarkId(self.next_id);
        diffs.push(MarkDiff::Enter {
            id,
            layer,
            kind: mark.kind(),
            new: Box::new(mark.clone()),
        });
        self.marks.insert(id, (layer, mark));
        id
    }

    fn update_mark(&mut self, id: MarkId, layer: LayerId, mark: Mark, diffs: &mut Vec<MarkDiff>) {
        let kind = mark.kind();
        match self.marks.insert(id, (layer, mark.clone())) {
            Some((_, old)) if old == mark => {}
            Some((_, old)) => diffs.push(MarkDiff::Update {
                id,
                layer,
                kind,
                old: Box::new(old),
                new: Box::new(mark),
            }),
            None => diffs.push(MarkDiff::Enter {
                id,
                layer,
                kind,
                new: Box::new(mark),
            }),
        }
    }

    fn remove_mark(&mut self, id: MarkId, diffs: &mut Vec<MarkDiff>) {
        if let Some((layer, old)) = self.marks.remove(&id) {
            diffs.push(MarkDiff::Exit {
                id,
                layer,
                kind: old.kind(),
                old: Box::new(old),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use kurbo::Point;
    use smallvec::smallvec;

    use super::*;

    const CELLS: LayerId = LayerId(1);

    fn cell(i: usize, w: f64) -> MarkGroup {
        smallvec![
            Mark::builder()
                .rect()
                .class("chart-cell")
                .datum(i)
                .x(i as f64 * 10.0)
                .w(w)
                .h(10.0)
                .build()
        ]
    }

    fn scene() -> Scene {
        let mut scene = Scene::new();
        assert!(scene.ensure_layer(CELLS, Layer::new("cells")), "fresh layer");
        scene
    }

    #[test]
    fn rejoining_identical_data_emits_no_diffs() {
        let mut scene = scene();
        let data = vec![1, 2, 3];
        let first = scene.join(CELLS, &data, |i, _| index_key(i), |i, _| cell(i, 10.0));
        assert_eq!(first.len(), 3, "three enters");
        assert!(first.iter().all(MarkDiff::is_enter), "first join only enters");

        let second = scene.join(CELLS, &data, |i, _| index_key(i), |i, _| cell(i, 10.0));
        assert!(second.is_empty(), "unchanged marks produce no diffs");
        assert_eq!(scene.len(), 3, "mark count is stable");
    }

    #[test]
    fn changed_attributes_update_in_place() {
        let mut scene = scene();
        let data = vec![1, 2];
        let first = scene.join(CELLS, &data, |i, _| index_key(i), |i, _| cell(i, 10.0));
        let ids: Vec<MarkId> = first.iter().map(MarkDiff::id).collect();

        let second = scene.join(CELLS, &data, |i, _| index_key(i), |i, _| cell(i, 5.0));
        assert_eq!(second.len(), 2, "both cells changed width");
        assert!(second.iter().all(MarkDiff::is_update), "cells are updated, not rebuilt");
        let updated: Vec<MarkId> = second.iter().map(MarkDiff::id).collect();
        assert_eq!(ids, updated, "ids are retained across updates");
    }

    #[test]
    fn shrinking_data_removes_stale_marks() {
        let mut scene = scene();
        scene.join(CELLS, &[0; 5], |i, _| index_key(i), |i, _| cell(i, 10.0));
        let diffs = scene.join(CELLS, &[0; 2], |i, _| index_key(i), |i, _| cell(i, 10.0));
        assert_eq!(diffs.iter().filter(|d| d.is_exit()).count(), 3, "three exits");
        assert_eq!(scene.bound_len(CELLS), 2, "two data bound");
        assert_eq!(scene.layer_marks(CELLS).len(), 2, "two marks left");
    }

    #[test]
    fn group_size_changes_enter_and_exit_members() {
        let mut scene = scene();
        scene.join(CELLS, &[()], |_, _| 0, |i, _| {
            let mut g = cell(i, 1.0);
            g.push(Mark::builder().text().content("label").build());
            g
        });
        assert_eq!(scene.len(), 2, "rect and label");
        let diffs = scene.join(CELLS, &[()], |_, _| 0, |i, _| cell(i, 1.0));
        assert_eq!(diffs.len(), 1, "the label exits");
        assert!(diffs[0].is_exit(), "surplus member is removed");
    }

    #[test]
    fn clear_layer_removes_everything() {
        let mut scene = scene();
        scene.join(CELLS, &[0; 4], |i, _| index_key(i), |i, _| cell(i, 10.0));
        let diffs = scene.clear_layer(CELLS);
        assert_eq!(diffs.len(), 4, "every mark exits");
        assert!(scene.is_empty(), "scene is empty");
        assert!(scene.layer(CELLS).is_some(), "layer survives clearing");
    }

    #[test]
    fn hit_test_applies_layer_offset() {
        let mut scene = Scene::new();
        scene.ensure_layer(CELLS, Layer::new("cells").with_offset((100.0, 50.0)));
        scene.join(CELLS, &[0; 3], |i, _| index_key(i), |i, _| cell(i, 10.0));
        assert_eq!(scene.hit_test(CELLS, Point::new(125.0, 55.0)), Some(2));
        assert_eq!(scene.hit_test(CELLS, Point::new(5.0, 5.0)), None);
    }

    #[test]
    fn value_keys_fold_signed_zero() {
        assert_eq!(value_key(0.0), value_key(-0.0));
        assert_ne!(value_key(1.0), value_key(2.0));
    }
}
