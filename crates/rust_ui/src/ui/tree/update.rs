//! Per-frame update pass

use crate::events::ControlEvent;
use crate::foundation::collections::ControlId;
use crate::foundation::math::Rect;
use crate::ui::measure::MeasureVector;
use crate::ui::widgets::{ControlKind, ControlType};

use super::ControlTree;

impl ControlTree {
    /// Advance the clock, fit the root to `screen` and update every control
    pub fn update(&mut self, dt: f32, screen: Rect) {
        self.clock.tick(dt);
        let root = self.root();
        if let Some(control) = self.get_mut(root) {
            control.size = MeasureVector::pixels(screen.width, screen.height);
        }
        self.update_control(root, dt);
    }

    /// Update a control, then its internal children, topmost internal children and public children
    pub(crate) fn update_control(&mut self, id: ControlId, dt: f32) {
        if !self.contains(id) {
            return;
        }
        self.pre_frame_updates(id);

        let targeted = self.is_targeted(id);
        if let Some(control) = self.get_mut(id) {
            let timer = control.interacted_timer.get();
            if timer > 0.0 {
                control.interacted_timer.set(timer - dt);
            }
        }

        self.fire(id, ControlEvent::BeforeUpdate);

        if let Some(control) = self.get_mut(id) {
            if control.drag.handle_position.is_some() && !targeted {
                control.drag.handle_position = None;
            }
        }

        self.update_self(id, dt);

        let Some(control) = self.get(id) else {
            return;
        };
        let internal = control.internal_children.clone();
        let top_most = control.internal_children_top_most.clone();
        for child in internal.into_iter().chain(top_most) {
            self.update_control(child, dt);
        }

        self.lock_children(id);
        let mut index = 0;
        while let Some(child) = self.child_at(id, index) {
            self.update_control(child, dt);
            index += 1;
        }
        self.unlock_children(id);

        self.fire(id, ControlEvent::AfterUpdate);
    }

    /// State interpolation and kind-specific logic
    fn update_self(&mut self, id: ControlId, dt: f32) {
        let state = self.state(id);
        let Some(control) = self.get_mut(id) else {
            return;
        };

        if control.style_sheet.interpolates_states() {
            let speed = control.style_sheet.interpolate_states_speed.unwrap_or(0.0);
            let transition = &mut control.transition;
            if state == transition.last {
                if transition.progress < 1.0 {
                    transition.progress = (transition.progress + dt * speed).min(1.0);
                }
            } else {
                transition.progress = 0.0;
                transition.previous = transition.last;
                transition.last = state;
            }
        }

        match control.control_type() {
            ControlType::Panel => self.update_panel(id, dt),
            ControlType::Slider | ControlType::ProgressBar => self.update_slider(id, dt),
            ControlType::Custom(_) => {
                let frame = control.frame(state);
                if let ControlKind::Custom(behavior) = &mut control.kind {
                    behavior.update(&frame, dt);
                }
            }
            ControlType::Generic => {}
        }
    }
}
