use std::collections::HashMap;

use glam::{Vec2, Vec3};
use log::debug;

use super::record::{Ordinal, Registry, SceneRecord};
use crate::config::SceneConfig;
use crate::host::{ElementId, Page};
use crate::math::Rect;

/// Interactive values for one of the two pointer states
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverStyle {
    pub mesh_opacity: f32,
    pub particle_opacity: f32,
    pub rotation_speed: f32,
    pub mesh_scale: f32,
}

impl HoverStyle {
    pub fn rest(config: &SceneConfig) -> Self {
        Self {
            mesh_opacity: config.mesh.rest_opacity,
            particle_opacity: config.particles.rest_opacity,
            rotation_speed: config.motion.rest_speed,
            mesh_scale: 1.0,
        }
    }

    pub fn hover(config: &SceneConfig) -> Self {
        Self {
            mesh_opacity: config.mesh.hover_opacity,
            particle_opacity: config.particles.hover_opacity,
            rotation_speed: config.motion.hover_speed,
            mesh_scale: config.mesh.hover_scale,
        }
    }
}

/// Set hover state and apply the matching style to a record
pub fn apply_hover(record: &mut SceneRecord, hover: bool, style: &HoverStyle) {
    record.hover = hover;
    record.rotation_speed = style.rotation_speed;
    if let Some(mesh) = record.mesh_mut() {
        mesh.material.opacity = style.mesh_opacity;
        mesh.transform.scale = Vec3::splat(style.mesh_scale);
    }
    if let Some(particles) = record.particles_mut() {
        particles.material.opacity = style.particle_opacity;
    }
}

/// Tilt the mesh toward the pointer. Absolute: replaces the x/y rotation.
/// Ignored unless hovering or when the card has no area.
pub fn apply_tilt(record: &mut SceneRecord, card: &Rect, pointer: Vec2, factor: f32) {
    if !record.hover {
        return;
    }
    let Some(offset) = card.normalized_offset(pointer) else {
        return;
    };
    if let Some(mesh) = record.mesh_mut() {
        mesh.transform.rotation.x = offset.y * factor;
        mesh.transform.rotation.y = offset.x * factor;
    }
}

/// Routes pointer events on cards to the records bound beneath them
#[derive(Debug, Clone)]
pub struct InteractionBinder {
    card_class: String,
    rest: HoverStyle,
    hover: HoverStyle,
    tilt_factor: f32,
    bindings: HashMap<ElementId, Vec<Ordinal>>,
}

impl InteractionBinder {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            card_class: config.card_class.clone(),
            rest: HoverStyle::rest(config),
            hover: HoverStyle::hover(config),
            tilt_factor: config.motion.tilt_factor,
            bindings: HashMap::new(),
        }
    }

    /// Bind `ordinal` to the card enclosing `container`, if there is one
    pub fn bind(&mut self, page: &dyn Page, container: ElementId, ordinal: Ordinal) -> Option<ElementId> {
        let Some(card) = page.closest(container, &self.card_class) else {
            debug!("container {container} has no card ancestor; interaction skipped");
            return None;
        };
        self.bindings.entry(card).or_default().push(ordinal);
        Some(card)
    }

    /// Ordinals bound to `card`
    pub fn bound(&self, card: ElementId) -> &[Ordinal] {
        self.bindings.get(&card).map_or(&[], Vec::as_slice)
    }

    pub fn is_bound(&self, ordinal: Ordinal) -> bool {
        self.bindings.values().any(|o| o.contains(&ordinal))
    }

    pub fn pointer_enter(&self, registry: &mut Registry, card: ElementId) {
        for ordinal in self.bound(card) {
            if let Some(record) = registry.get_mut(*ordinal) {
                apply_hover(record, true, &self.hover);
            }
        }
    }

    pub fn pointer_leave(&self, registry: &mut Registry, card: ElementId) {
        for ordinal in self.bound(card) {
            if let Some(record) = registry.get_mut(*ordinal) {
                apply_hover(record, false, &self.rest);
            }
        }
    }

    /// `card_rect` is the card's bounding box at the time of the event
    pub fn pointer_move(&self, registry: &mut Registry, card: ElementId, card_rect: &Rect, pointer: Vec2) {
        for ordinal in self.bound(card) {
            if let Some(record) = registry.get_mut(*ordinal) {
                apply_tilt(record, card_rect, pointer, self.tilt_factor);
            }
        }
    }
}
