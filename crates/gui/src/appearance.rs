//! Severity → colour mapping and per-part material overrides.
//!
//! A part's original material is captured once when the model loads and kept
//! behind an `Arc`, possibly shared with other parts. It is never written to.
//! Painting a part derives an owned copy with only the colour replaced, so
//! two parts can never end up sharing a mutable material.

use std::sync::Arc;

use shared::Severity;

use crate::scene::SceneGraph;

/// Surface parameters of one mesh part
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Linear RGB
    pub base_color: [f32; 3],
    pub roughness: f32,
    pub metallic: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: [0.85, 0.78, 0.72],
            roughness: 0.8,
            metallic: 0.0,
        }
    }
}

/// Which material a part currently displays
#[derive(Clone, Debug, PartialEq)]
pub enum Appearance {
    /// The shared original, untouched
    Original,
    /// A private copy of the original with the colour replaced
    Override(Material),
}

/// Original material plus the derived override for one part
#[derive(Clone, Debug)]
pub struct PartAppearance {
    original: Arc<Material>,
    active: Appearance,
}

impl PartAppearance {
    pub fn new(original: Arc<Material>) -> Self {
        Self {
            original,
            active: Appearance::Original,
        }
    }

    /// The material captured at load time
    pub fn original(&self) -> &Arc<Material> {
        &self.original
    }

    pub fn active(&self) -> &Appearance {
        &self.active
    }

    /// Material to draw with
    pub fn effective(&self) -> &Material {
        match &self.active {
            Appearance::Original => &self.original,
            Appearance::Override(material) => material,
        }
    }

    pub fn is_overridden(&self) -> bool {
        matches!(self.active, Appearance::Override(_))
    }
}

/// Fixed colour ramp. `None` for [`Severity::None`]: keep the original look.
pub fn severity_color(severity: Severity) -> Option<[f32; 3]> {
    match severity {
        Severity::None => None,
        Severity::Weak => Some([1.0, 0.72, 0.62]),
        Severity::Medium => Some([0.95, 0.38, 0.28]),
        Severity::Strong => Some([0.72, 0.06, 0.06]),
    }
}

/// Same ramp as an egui colour, for legends and calendar markers.
pub fn severity_color32(severity: Severity) -> Option<egui::Color32> {
    severity_color(severity).map(|[r, g, b]| {
        egui::Color32::from_rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
    })
}

/// Point a part at the appearance for `severity`.
pub fn apply(part: &mut PartAppearance, severity: Severity) {
    part.active = match severity_color(severity) {
        None => Appearance::Original,
        Some(color) => Appearance::Override(Material {
            base_color: color,
            ..(*part.original).clone()
        }),
    };
}

/// Repaint every body part from a severity lookup (one date's snapshot).
pub fn sync_all<F>(scene: &mut SceneGraph, lookup: F)
where
    F: Fn(&str) -> Severity,
{
    for node in scene.parts_mut() {
        let severity = lookup(&node.name);
        apply(&mut node.appearance, severity);
    }
}
