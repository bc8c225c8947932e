//! Drawing surface seam between the layers and whatever presents a frame.

use std::collections::BTreeMap;

use bevy::{math::Vec2, prelude::Resource};
use serde::Serialize;

use crate::color::Paint;

/// Draw group owned by exactly one layer. Declaration order is stacking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerTag {
    Background,
    PressureLines,
    EnergyWisps,
    Particles,
    StressFragments,
    StoneCore,
    StressPatterns,
    Sparkles,
    FloatingText,
}

impl LayerTag {
    pub const STACKING: [LayerTag; 9] = [
        LayerTag::Background,
        LayerTag::PressureLines,
        LayerTag::EnergyWisps,
        LayerTag::Particles,
        LayerTag::StressFragments,
        LayerTag::StoneCore,
        LayerTag::StressPatterns,
        LayerTag::Sparkles,
        LayerTag::FloatingText,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FontSpec {
    pub size: u16,
    pub bold: bool,
}

impl FontSpec {
    pub const fn regular(size: u16) -> Self {
        Self { size, bold: false }
    }

    pub const fn bold(size: u16) -> Self {
        Self { size, bold: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Polyline {
        points: Vec<Vec2>,
        paint: Paint,
        width: f32,
        smooth: bool,
    },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        paint: Paint,
    },
    Text {
        position: Vec2,
        text: String,
        paint: Paint,
        font: FontSpec,
    },
}

/// Minimal retained-mode canvas the layers draw into.
///
/// Every layer clears its own tag and redraws it in full each tick.
pub trait DrawSurface {
    fn clear(&mut self, tag: LayerTag);

    fn draw_polyline(
        &mut self,
        tag: LayerTag,
        points: Vec<Vec2>,
        paint: Paint,
        width: f32,
        smooth: bool,
    );

    fn draw_ellipse(&mut self, tag: LayerTag, center: Vec2, radii: Vec2, paint: Paint);

    fn draw_text(&mut self, tag: LayerTag, position: Vec2, text: String, paint: Paint, font: FontSpec);

    fn draw_line(&mut self, tag: LayerTag, from: Vec2, to: Vec2, paint: Paint, width: f32) {
        self.draw_polyline(tag, vec![from, to], paint, width, false);
    }

    fn draw_circle(&mut self, tag: LayerTag, center: Vec2, radius: f32, paint: Paint) {
        self.draw_ellipse(tag, center, Vec2::splat(radius), paint);
    }
}

/// The composed frame: primitives grouped by tag, in stacking order.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayList {
    groups: BTreeMap<LayerTag, Vec<Primitive>>,
}

impl DisplayList {
    pub fn group(&self, tag: LayerTag) -> &[Primitive] {
        self.groups.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self, tag: LayerTag) -> usize {
        self.group(tag).len()
    }

    pub fn total(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// All primitives, bottom layer first.
    pub fn iter(&self) -> impl Iterator<Item = (LayerTag, &Primitive)> + '_ {
        self.groups
            .iter()
            .flat_map(|(tag, primitives)| primitives.iter().map(move |primitive| (*tag, primitive)))
    }

    fn push(&mut self, tag: LayerTag, primitive: Primitive) {
        self.groups.entry(tag).or_default().push(primitive);
    }
}

impl DrawSurface for DisplayList {
    fn clear(&mut self, tag: LayerTag) {
        if let Some(group) = self.groups.get_mut(&tag) {
            group.clear();
        }
    }

    fn draw_polyline(
        &mut self,
        tag: LayerTag,
        points: Vec<Vec2>,
        paint: Paint,
        width: f32,
        smooth: bool,
    ) {
        self.push(
            tag,
            Primitive::Polyline {
                points,
                paint,
                width,
                smooth,
            },
        );
    }

    fn draw_ellipse(&mut self, tag: LayerTag, center: Vec2, radii: Vec2, paint: Paint) {
        self.push(
            tag,
            Primitive::Ellipse {
                center,
                radii,
                paint,
            },
        );
    }

    fn draw_text(&mut self, tag: LayerTag, position: Vec2, text: String, paint: Paint, font: FontSpec) {
        self.push(
            tag,
            Primitive::Text {
                position,
                text,
                paint,
                font,
            },
        );
    }
}
