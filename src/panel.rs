//! Debug panel: numeric controls bound to light intensities.
//!
//! Every control is an explicit, clamped setter on one light of the scene.
//! The panel holds light ids rather than references, so edits go through
//! [`Light::set_intensity`](crate::data_structures::light::Light::set_intensity)
//! and take effect on the next drawn frame.
//!
//! Presentation is keyboard driven: `Tab`/`Shift+Tab` cycle the selected
//! control, `ArrowUp`/`ArrowDown` move it by one step, `PageUp`/`PageDown` by
//! ten, and `H` hides or shows the panel. The selected control is rendered
//! as a single line by [`DebugPanel::summary`].

use winit::{
    event::{ElementState, WindowEvent},
    keyboard::{Key, NamedKey},
};

use crate::data_structures::{
    light::{LightRig, LightSlot},
    scene_graph::{LightId, Scene},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ControlRange {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    /// Clamps into `[min, max]`; NaN maps to `min`.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.min
        } else {
            // Fields are public, so the bounds may be unordered or NaN here.
            value.max(self.min).min(self.max)
        }
    }

    /// Default slider range for a light slot.
    pub fn for_slot(slot: LightSlot) -> Self {
        match slot {
            LightSlot::Ambient | LightSlot::Hemisphere | LightSlot::Directional => {
                Self::new(0.0, 3.0, 0.001)
            }
            LightSlot::Point => Self::new(0.0, 100.0, 0.1),
            LightSlot::RectArea | LightSlot::Spot => Self::new(0.0, 20.0, 0.01),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ControlId(usize);

#[derive(Clone, Debug, PartialEq)]
pub struct Control {
    pub label: String,
    pub range: ControlRange,
    target: LightId,
}

impl Control {
    pub fn target(&self) -> LightId {
        self.target
    }
}

#[derive(Debug)]
pub struct DebugPanel {
    controls: Vec<Control>,
    selected: usize,
    visible: bool,
    shift: bool,
}

impl Default for DebugPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugPanel {
    pub fn new() -> Self {
        Self {
            controls: Vec::new(),
            selected: 0,
            visible: true,
            shift: false,
        }
    }

    /// A panel with one intensity control per installed light.
    pub fn for_rig(rig: &LightRig) -> Self {
        let mut panel = Self::new();
        for (slot, id) in rig.iter() {
            panel.bind(id, slot.label(), ControlRange::for_slot(slot));
        }
        panel
    }

    /// Min and max are swapped if given in the wrong order and a NaN bound is
    /// replaced by 0 (min) or 1 (max). A step that is not a positive number
    /// falls back to 1% of the range.
    pub fn bind(&mut self, target: LightId, label: &str, range: ControlRange) -> ControlId {
        if range.min.is_nan() || range.max.is_nan() {
            log::warn!("Control {:?} has a NaN bound, using [0, 1] instead", label);
        }
        let range = ControlRange::new(
            if range.min.is_nan() { 0.0 } else { range.min },
            if range.max.is_nan() { 1.0 } else { range.max },
            range.step,
        );
        let (min, max) = if range.min <= range.max {
            (range.min, range.max)
        } else {
            (range.max, range.min)
        };
        let step = if range.step > 0.0 && range.step.is_finite() {
            range.step
        } else {
            (max - min) / 100.0
        };
        self.controls.push(Control {
            label: label.to_string(),
            range: ControlRange::new(min, max, step),
            target,
        });
        ControlId(self.controls.len() - 1)
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn control(&self, id: ControlId) -> Option<&Control> {
        self.controls.get(id.0)
    }

    pub fn find(&self, label: &str) -> Option<ControlId> {
        self.controls
            .iter()
            .position(|c| c.label == label)
            .map(ControlId)
    }

    pub fn value(&self, scene: &Scene, id: ControlId) -> Option<f32> {
        let control = self.controls.get(id.0)?;
        scene.light(control.target).map(|light| light.intensity())
    }

    /// Writes `value`, clamped to the control's range, to the bound light.
    /// Returns the stored value, or `None` for an unknown control or light.
    pub fn set(&self, scene: &mut Scene, id: ControlId, value: f32) -> Option<f32> {
        let control = self.controls.get(id.0)?;
        let light = scene.light_mut(control.target)?;
        let stored = light.set_intensity(control.range.clamp(value));
        log::info!("{} intensity set to {:.3}", control.label, stored);
        Some(stored)
    }

    pub fn set_by_label(&self, scene: &mut Scene, label: &str, value: f32) -> Option<f32> {
        match self.find(label) {
            Some(id) => self.set(scene, id, value),
            None => {
                log::warn!("No panel control labelled {:?}", label);
                None
            }
        }
    }

    /// Moves the control by `steps` increments of its step size.
    pub fn nudge(&self, scene: &mut Scene, id: ControlId, steps: i32) -> Option<f32> {
        let current = self.value(scene, id)?;
        let step = self.controls[id.0].range.step;
        self.set(scene, id, current + steps as f32 * step)
    }

    pub fn selected(&self) -> Option<ControlId> {
        if self.controls.is_empty() {
            None
        } else {
            Some(ControlId(self.selected))
        }
    }

    pub fn select_next(&mut self) {
        if !self.controls.is_empty() {
            self.selected = (self.selected + 1) % self.controls.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.controls.is_empty() {
            self.selected = (self.selected + self.controls.len() - 1) % self.controls.len();
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
    }

    /// One line describing the selected control, empty while hidden.
    pub fn summary(&self, scene: &Scene) -> String {
        if !self.visible {
            return String::new();
        }
        let Some(id) = self.selected() else {
            return String::new();
        };
        let control = &self.controls[id.0];
        let value = self.value(scene, id).unwrap_or(f32::NAN);
        format!(
            "[{}/{}] {}: {:.3} ({}..{})",
            id.0 + 1,
            self.controls.len(),
            control.label,
            value,
            control.range.min,
            control.range.max
        )
    }

    /// Feeds a winit window event. Returns true if the panel changed.
    pub fn handle_window_events(&mut self, scene: &mut Scene, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.shift = modifiers.state().shift_key();
                false
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                self.handle_key(scene, &event.logical_key)
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, scene: &mut Scene, key: &Key) -> bool {
        if let Key::Character(c) = key {
            if c.as_str().eq_ignore_ascii_case("h") {
                self.toggle_visibility();
                return true;
            }
            return false;
        }
        if !self.visible {
            return false;
        }
        let Some(id) = self.selected() else {
            return false;
        };
        match key {
            Key::Named(NamedKey::Tab) => {
                if self.shift {
                    self.select_previous();
                } else {
                    self.select_next();
                }
                true
            }
            Key::Named(NamedKey::ArrowUp) => self.nudge(scene, id, 1).is_some(),
            Key::Named(NamedKey::ArrowDown) => self.nudge(scene, id, -1).is_some(),
            Key::Named(NamedKey::PageUp) => self.nudge(scene, id, 10).is_some(),
            Key::Named(NamedKey::PageDown) => self.nudge(scene, id, -10).is_some(),
            _ => false,
        }
    }
}
