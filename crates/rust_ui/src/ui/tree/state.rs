//! Control state resolution
//!
//! State is derived, never stored: it is computed from the control's flags,
//! its ancestors, the targeted control and the press timer, then memoized
//! until the next update clears the frame caches.

use crate::foundation::collections::ControlId;
use crate::foundation::math::{Point, Sides};
use crate::ui::style::{FromStyleValue, StyleProperty};
use crate::ui::widgets::{ControlKind, ControlState, DraggableMode};

use super::ControlTree;

impl ControlTree {
    /// True if the control or one of its ancestors is locked
    pub fn is_currently_locked(&self, id: ControlId) -> bool {
        let Some(control) = self.get(id) else {
            return false;
        };
        if let Some(cached) = control.cache.locked.get() {
            return cached;
        }
        let locked = control.locked || control.parent.is_some_and(|parent| self.is_currently_locked(parent));
        control.cache.locked.set(Some(locked));
        locked
    }

    /// True if the control or one of its ancestors is disabled
    pub fn is_currently_disabled(&self, id: ControlId) -> bool {
        let Some(control) = self.get(id) else {
            return false;
        };
        if let Some(cached) = control.cache.disabled.get() {
            return cached;
        }
        let disabled = !control.enabled || control.parent.is_some_and(|parent| self.is_currently_disabled(parent));
        control.cache.disabled.set(Some(disabled));
        disabled
    }

    /// True if the control and all of its ancestors are visible
    pub fn is_currently_visible(&self, id: ControlId) -> bool {
        let Some(control) = self.get(id) else {
            return false;
        };
        if let Some(cached) = control.cache.visible.get() {
            return cached;
        }
        let visible = control.visible && control.parent.map_or(true, |parent| self.is_currently_visible(parent));
        control.cache.visible.set(Some(visible));
        visible
    }

    /// True if the control is the targeted control
    pub fn is_targeted(&self, id: ControlId) -> bool {
        self.targeted() == Some(id)
    }

    /// True if the control is targeted and the left button was down during its last interaction
    pub fn is_being_pressed(&self, id: ControlId) -> bool {
        self.get(id)
            .is_some_and(|control| control.was_mouse_down_last_interaction && self.is_targeted(id))
    }

    /// Current state of a control.
    ///
    /// Precedence: locked state, copied state, press timer, memoized value,
    /// locked, disabled, pressed, targeted, idle.
    pub fn state(&self, id: ControlId) -> ControlState {
        let Some(control) = self.get(id) else {
            return ControlState::Default;
        };

        if let Some(locked_state) = control.locked_state {
            control.cache.state.set(Some(locked_state));
            return locked_state;
        }
        if let Some(source) = control.copy_state_from.filter(|source| *source != id) {
            let state = self.state(source);
            control.cache.state.set(Some(state));
            return state;
        }
        if control.interacted_timer.get() > 0.0 {
            control.cache.state.set(Some(ControlState::Interacted));
            return ControlState::Interacted;
        }
        if let Some(cached) = control.cache.state.get() {
            return cached;
        }

        let checked = control.checked;
        let state = if self.is_currently_locked(id) {
            if checked {
                ControlState::Checked
            } else {
                ControlState::Default
            }
        } else if self.is_currently_disabled(id) {
            if checked {
                ControlState::DisabledChecked
            } else {
                ControlState::Disabled
            }
        } else if self.is_being_pressed(id) {
            if control.interacted_timer.get() <= 0.0 {
                control.interacted_timer.set(self.time_to_lock_interactive_state);
            }
            ControlState::Interacted
        } else if self.is_targeted(id) {
            if checked {
                ControlState::TargetedChecked
            } else {
                ControlState::Targeted
            }
        } else if checked {
            ControlState::Checked
        } else {
            ControlState::Default
        };
        control.cache.state.set(Some(state));
        state
    }

    /// Whether the control reacts to the pointer
    pub fn is_interactable(&self, id: ControlId) -> bool {
        let Some(control) = self.get(id) else {
            return false;
        };
        if let Some(target) = control.transfer_interactions_to.filter(|target| *target != id) {
            return self.is_interactable(target);
        }
        control.interactable.unwrap_or_else(|| control.kind.interactable())
    }

    /// Whether the control (or an ancestor) wins hit tests over regular controls
    pub fn top_most_interactions(&self, id: ControlId) -> bool {
        self.get(id).is_some_and(|control| {
            control.top_most_interactions || control.parent.is_some_and(|parent| self.top_most_interactions(parent))
        })
    }

    /// Whether the focus stays on this control while the left button is held
    pub fn lock_focus_while_mouse_down(&self, id: ControlId) -> bool {
        self.get(id).is_some_and(|control| {
            control.draggable_mode != DraggableMode::NotDraggable || matches!(control.kind, ControlKind::Slider(_))
        })
    }

    /// Whether the control may take the focus while the button is held elsewhere
    pub fn can_get_focus_while_mouse_is_down(&self, id: ControlId) -> bool {
        self.get(id)
            .and_then(|control| control.transfer_interactions_to)
            .filter(|target| *target != id)
            .map_or(true, |target| self.can_get_focus_while_mouse_is_down(target))
    }

    /// Style property of a control in its current state, overrides included
    pub fn style_property<T: FromStyleValue>(&self, id: ControlId, property: StyleProperty, fallback: T) -> T {
        let Some(control) = self.get(id) else {
            return fallback;
        };
        let state = self.state(id);
        control
            .style_sheet
            .get_property(property, state, fallback, Some(&control.override_styles))
    }

    /// Spacing before the control in auto-flow layouts
    pub fn margin_before(&self, id: ControlId) -> Point {
        self.style_property(id, StyleProperty::MarginBefore, Point::zeros())
    }

    /// Spacing after the control in auto-flow layouts
    pub fn margin_after(&self, id: ControlId) -> Point {
        self.style_property(id, StyleProperty::MarginAfter, Point::zeros())
    }

    /// Growth of the bounding rect around the computed rect
    pub fn extra_size(&self, id: ControlId) -> Sides {
        self.style_property(id, StyleProperty::ExtraSize, Sides::ZERO)
    }

    /// Inset of the internal rect inside the bounding rect
    pub fn padding(&self, id: ControlId) -> Sides {
        self.style_property(id, StyleProperty::Padding, Sides::ZERO)
    }

    /// Clear frame caches and apply queued child mutations
    pub(crate) fn pre_frame_updates(&mut self, id: ControlId) {
        if let Some(control) = self.get(id) {
            control.cache.clear();
        }
        self.flush_children(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::ui::widgets::Control;

    fn tree_with_child() -> (ControlTree, ControlId, ControlId) {
        let mut tree = ControlTree::new();
        let root = tree.root();
        let parent = tree.insert(Control::generic(Rc::default()));
        let child = tree.insert(Control::generic(Rc::default()));
        tree.add_child(root, parent).unwrap();
        tree.add_child(parent, child).unwrap();
        (tree, parent, child)
    }

    fn clear_caches(tree: &mut ControlTree) {
        let root = tree.root();
        tree.walk(root, |tree, id| {
            tree.pre_frame_updates(id);
            true
        });
    }

    #[test]
    fn test_default_and_targeted() {
        let (mut tree, _, child) = tree_with_child();
        assert_eq!(tree.state(child), ControlState::Default);
        tree.set_targeted(Some(child));
        clear_caches(&mut tree);
        assert_eq!(tree.state(child), ControlState::Targeted);
        tree.set_checked(child, true).unwrap();
        assert_eq!(tree.state(child), ControlState::TargetedChecked);
    }

    #[test]
    fn test_locked_ancestor_never_targeted_or_interacted() {
        let (mut tree, parent, child) = tree_with_child();
        tree[parent].locked = true;
        tree.set_targeted(Some(child));
        tree[child].was_mouse_down_last_interaction = true;
        assert_eq!(tree.state(child), ControlState::Default);
        assert!(tree.is_currently_locked(child));
        assert!(tree[child].interacted_timer.get() <= 0.0);
    }

    #[test]
    fn test_disabled_reports_disabled_checked() {
        let (mut tree, parent, child) = tree_with_child();
        tree[parent].enabled = false;
        tree.set_checked(child, true).unwrap();
        tree.set_targeted(Some(child));
        tree[child].was_mouse_down_last_interaction = true;
        assert_eq!(tree.state(child), ControlState::DisabledChecked);
    }

    #[test]
    fn test_press_starts_timer() {
        let (mut tree, _, child) = tree_with_child();
        tree.set_targeted(Some(child));
        tree[child].was_mouse_down_last_interaction = true;
        assert_eq!(tree.state(child), ControlState::Interacted);
        assert!(tree[child].interacted_timer.get() > 0.0);

        // released and no longer targeted, the timer still holds the state
        tree[child].was_mouse_down_last_interaction = false;
        tree.set_targeted(None);
        clear_caches(&mut tree);
        assert_eq!(tree.state(child), ControlState::Interacted);
    }

    #[test]
    fn test_locked_state_and_copy_state() {
        let (mut tree, parent, child) = tree_with_child();
        tree[parent].locked_state = Some(ControlState::Checked);
        tree[child].copy_state_from = Some(parent);
        assert_eq!(tree.state(child), ControlState::Checked);
    }

    #[test]
    fn test_caches_hold_until_cleared() {
        let (mut tree, parent, child) = tree_with_child();
        assert!(tree.is_currently_visible(child));
        tree[parent].visible = false;
        assert!(tree.is_currently_visible(child));
        clear_caches(&mut tree);
        assert!(!tree.is_currently_visible(child));
    }

    #[test]
    fn test_interactable_follows_transfer_target() {
        let (mut tree, parent, child) = tree_with_child();
        assert!(!tree.is_interactable(child));
        tree[parent].interactable = Some(true);
        tree[child].transfer_interactions_to = Some(parent);
        assert!(tree.is_interactable(child));
    }

    #[test]
    fn test_top_most_is_inherited() {
        let (mut tree, parent, child) = tree_with_child();
        tree[parent].top_most_interactions = true;
        assert!(tree.top_most_interactions(child));
        assert!(!tree.top_most_interactions(tree.root()));
    }
}
