//! Hit-testing, focus arbitration and interaction dispatch
//!
//! Hit tests use the rects from the previous draw, so a control that moves
//! this frame changes targeting from the next frame on.

use crate::events::ControlEvent;
use crate::foundation::collections::ControlId;
use crate::foundation::math::Point;
use crate::input::InputState;
use crate::ui::widgets::{ControlType, DraggableMode};

use super::ControlTree;

impl ControlTree {
    /// Inclusive point test against the last visible (or bounding) rect,
    /// grown by the control's extra interaction margin
    pub fn is_pointed_on(&self, id: ControlId, point: Point, use_visible_rect: bool) -> bool {
        self.get(id).is_some_and(|control| {
            let rect = if use_visible_rect {
                control.last_visible_bounding_rect
            } else {
                control.last_bounding_rect
            };
            rect.contains_with_margin(point, control.extra_margin_for_interactions)
        })
    }

    /// Pick the targeted control and dispatch this frame's input to it
    pub fn process_input(&mut self, input: &InputState) {
        let left_down = input.left_mouse_down();
        let keep_target = self.targeted().is_some_and(|target| {
            let focus_locked = self.get(target).is_some_and(|control| control.lock_focus_on_self)
                && self.is_currently_visible(target)
                && !self.is_currently_locked(target)
                && !self.is_currently_disabled(target);
            focus_locked || (left_down && self.lock_focus_while_mouse_down(target))
        });
        if !keep_target {
            let target = self.find_target(input.mouse_position(), left_down);
            self.set_targeted(target);
        }

        if let Some(mut target) = self.targeted() {
            if let Some(redirect) = self
                .get(target)
                .and_then(|control| control.transfer_interactions_to)
                .filter(|redirect| self.contains(*redirect))
            {
                target = redirect;
                self.set_targeted(Some(target));
            }
            if !self.is_currently_locked(target) && !self.is_currently_disabled(target) {
                self.do_interactions(target, input);
            }
        }

        let root = self.root();
        self.walk(root, |tree, id| {
            if tree.is_interactable(id) {
                tree.post_update(id);
            }
            true
        });
    }

    /// Last visible control under `point` in walk order; topmost controls are tested after all others
    pub fn find_target(&mut self, point: Point, left_down: bool) -> Option<ControlId> {
        let mut target = None;
        let mut top_most = Vec::new();
        let root = self.root();
        self.walk(root, |tree, id| {
            let Some(control) = tree.get(id) else {
                return true;
            };
            // locked and disabled controls still block the ones below them
            if control.ignore_interactions {
                return true;
            }
            if left_down && !tree.can_get_focus_while_mouse_is_down(id) {
                return true;
            }
            if tree.top_most_interactions(id) {
                top_most.push(id);
                return true;
            }
            if tree.is_currently_visible(id) && tree.is_pointed_on(id, point, true) {
                target = Some(id);
            }
            true
        });
        for id in top_most {
            if self.is_currently_visible(id) && self.is_pointed_on(id, point, true) {
                target = Some(id);
            }
        }
        target
    }

    /// Apply input to the targeted control: wheel, events, dragging and slider values
    pub(crate) fn do_interactions(&mut self, id: ControlId, input: &InputState) {
        let Some(control) = self.get_mut(id) else {
            return;
        };
        control.was_mouse_down_last_interaction = input.left_mouse_down();

        let wheel = input.mouse_wheel_change();
        if wheel != 0 {
            self.perform_mouse_wheel_scroll(id, wheel);
        }

        let fired = [
            (self.is_targeted(id), ControlEvent::WhileMouseHover),
            (wheel < 0, ControlEvent::OnMouseWheelScrollUp),
            (wheel > 0, ControlEvent::OnMouseWheelScrollDown),
            (input.left_mouse_down(), ControlEvent::OnLeftMouseDown),
            (input.left_mouse_pressed_now(), ControlEvent::OnLeftMousePressed),
            (input.left_mouse_released_now(), ControlEvent::OnLeftMouseReleased),
            (input.right_mouse_down(), ControlEvent::OnRightMouseDown),
            (input.right_mouse_pressed_now(), ControlEvent::OnRightMousePressed),
            (input.right_mouse_released_now(), ControlEvent::OnRightMouseReleased),
        ];
        for (condition, event) in fired {
            if condition {
                self.fire(id, event);
            }
        }

        self.drag(id, input);

        if input.left_mouse_down() && self.get(id).is_some_and(|control| control.control_type() == ControlType::Slider) {
            self.set_slider_value_from_pointer(id, input.mouse_position());
        }
    }

    /// Route a wheel delta: sliders consume it, panels hand it to a visible
    /// scrollbar, everything else passes it to the parent
    pub(crate) fn perform_mouse_wheel_scroll(&mut self, id: ControlId, delta: i32) {
        let Some(control) = self.get(id) else {
            return;
        };
        match control.control_type() {
            ControlType::Slider | ControlType::ProgressBar => self.slider_wheel_scroll(id, delta),
            ControlType::Panel if self.panel_wheel_target(id).is_some() => {
                if let Some(scrollbar) = self.panel_wheel_target(id) {
                    self.slider_wheel_scroll(scrollbar, delta);
                }
            }
            _ => {
                if let Some(parent) = control.parent {
                    self.perform_mouse_wheel_scroll(parent, delta);
                }
            }
        }
    }

    fn drag(&mut self, id: ControlId, input: &InputState) {
        let Some(control) = self.get(id) else {
            return;
        };
        let mode = control.draggable_mode;
        if mode == DraggableMode::NotDraggable {
            return;
        }
        if !input.left_mouse_down() {
            if let Some(control) = self.get_mut(id) {
                control.drag.handle_position = None;
            }
            return;
        }

        let mouse = input.mouse_position();
        let size = control.last_bounding_rect.size();
        // dragged positions exclude extra size, the last bounding rect includes it
        let extra = self.extra_size(id);
        let inset = Point::new(extra.left, extra.top);
        let parent_rect = control
            .parent
            .and_then(|parent| self.get(parent))
            .map(|parent| parent.last_internal_bounding_rect);
        let bring_to_front = control.bring_to_front_if_dragged;

        if control.drag.handle_position.is_some() {
            let mut position = mouse + control.drag.handle_offset;
            let confine_to = match (mode, parent_rect) {
                (DraggableMode::DraggableConfinedToParent, Some(rect)) => Some(rect),
                (DraggableMode::DraggableConfinedToParent | DraggableMode::DraggableConfinedToScreen, _) => {
                    Some(input.screen_bounds)
                }
                _ => None,
            };
            if let Some(bounds) = confine_to {
                let mut corner = position - inset;
                corner.x = corner.x.max(bounds.left());
                corner.y = corner.y.max(bounds.top());
                if corner.x + size.x > bounds.right() {
                    corner.x = bounds.right() - size.x;
                }
                if corner.y + size.y > bounds.bottom() {
                    corner.y = bounds.bottom() - size.y;
                }
                position = corner + inset;
            }
            let offset_from_parent = match parent_rect {
                Some(rect) if mode != DraggableMode::Draggable => Some(position - rect.origin()),
                _ => None,
            };
            if let Some(control) = self.get_mut(id) {
                control.drag.dragged_position = Some(position);
                control.drag.offset_from_parent = offset_from_parent;
            }
        } else if input.left_mouse_pressed_now() {
            let origin = control.last_bounding_rect.origin() + inset;
            if let Some(control) = self.get_mut(id) {
                control.drag.handle_position = Some(mouse);
                control.drag.handle_offset = origin - mouse;
            }
            if bring_to_front && self.get(id).is_some_and(|control| control.parent.is_some()) {
                if let Err(err) = self.bring_to_front(id) {
                    log::warn!("Dragged control not brought to front: {err}");
                }
            }
        }
    }

    /// Apply child mutations queued during interactions
    pub(crate) fn post_update(&mut self, id: ControlId) {
        self.flush_children(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::foundation::math::{Rect, Sides};
    use crate::input::MouseButtons;
    use crate::testing::{frame_input, RecordingRenderer};
    use crate::ui::measure::MeasureVector;
    use crate::ui::widgets::{Anchor, Control, ControlState, Orientation};

    const SCREEN: Rect = Rect::new(0, 0, 800, 600);

    fn add_at(tree: &mut ControlTree, parent: ControlId, x: i32, y: i32, w: i32, h: i32) -> ControlId {
        let id = tree.insert(
            Control::generic(Rc::default())
                .with_anchor(Anchor::TopLeft)
                .with_offset(MeasureVector::pixels(x, y))
                .with_size(MeasureVector::pixels(w, h)),
        );
        tree.add_child(parent, id).unwrap();
        id
    }

    fn settle(tree: &mut ControlTree, renderer: &mut RecordingRenderer) {
        tree.update(0.016, SCREEN);
        tree.draw(renderer);
    }

    #[test]
    fn test_last_pointed_control_wins() {
        let mut renderer = RecordingRenderer::new(800, 600);
        let mut tree = ControlTree::new();
        let root = tree.root();
        let below = add_at(&mut tree, root, 0, 0, 100, 100);
        let above = add_at(&mut tree, root, 50, 50, 100, 100);
        settle(&mut tree, &mut renderer);

        assert_eq!(tree.find_target(Point::new(75, 75), false), Some(above));
        assert_eq!(tree.find_target(Point::new(10, 10), false), Some(below));
        assert_eq!(tree.find_target(Point::new(700, 500), false), Some(root));
    }

    #[test]
    fn test_click_through_and_topmost() {
        let mut renderer = RecordingRenderer::new(800, 600);
        let mut tree = ControlTree::new();
        let root = tree.root();
        let top = add_at(&mut tree, root, 0, 0, 100, 100);
        tree[top].top_most_interactions = true;
        let later = add_at(&mut tree, root, 0, 0, 100, 100);
        let ghost = add_at(&mut tree, root, 0, 0, 100, 100);
        tree[ghost].ignore_interactions = true;
        settle(&mut tree, &mut renderer);

        assert_eq!(tree.find_target(Point::new(50, 50), false), Some(top));
        tree[top].top_most_interactions = false;
        assert_eq!(tree.find_target(Point::new(50, 50), false), Some(later));
    }

    #[test]
    fn test_extra_margin_extends_hit_area() {
        let mut renderer = RecordingRenderer::new(800, 600);
        let mut tree = ControlTree::new();
        let root = tree.root();
        let id = add_at(&mut tree, root, 100, 100, 10, 10);
        settle(&mut tree, &mut renderer);
        assert!(!tree.is_pointed_on(id, Point::new(95, 100), true));
        tree[id].extra_margin_for_interactions = Sides::uniform(5);
        assert!(tree.is_pointed_on(id, Point::new(95, 100), true));
        assert!(tree.is_pointed_on(id, Point::new(110, 110), false));
    }

    #[test]
    fn test_events_follow_button_edges() {
        let mut renderer = RecordingRenderer::new(800, 600);
        let mut tree = ControlTree::new();
        let root = tree.root();
        let id = add_at(&mut tree, root, 0, 0, 100, 100);
        let log = Rc::new(RefCell::new(Vec::new()));
        for event in [
            ControlEvent::OnLeftMousePressed,
            ControlEvent::OnLeftMouseReleased,
            ControlEvent::OnMouseWheelScrollUp,
            ControlEvent::OnRightMouseDown,
        ] {
            let log = log.clone();
            tree[id].events.on(event, move |_, _| log.borrow_mut().push(event));
        }
        settle(&mut tree, &mut renderer);

        let at = Point::new(10, 10);
        tree.process_input(&frame_input(MouseButtons::empty(), MouseButtons::LEFT, at, 0));
        tree.update(0.016, SCREEN);
        assert_eq!(tree.state(id), ControlState::Interacted);
        tree.process_input(&frame_input(MouseButtons::LEFT, MouseButtons::empty(), at, -1));
        tree.process_input(&frame_input(MouseButtons::empty(), MouseButtons::RIGHT, at, 0));
        assert_eq!(
            *log.borrow(),
            vec![
                ControlEvent::OnLeftMousePressed,
                ControlEvent::OnMouseWheelScrollUp,
                ControlEvent::OnLeftMouseReleased,
                ControlEvent::OnRightMouseDown,
            ]
        );
    }

    #[test]
    fn test_locked_target_gets_no_events() {
        let mut renderer = RecordingRenderer::new(800, 600);
        let mut tree = ControlTree::new();
        let root = tree.root();
        let id = add_at(&mut tree, root, 0, 0, 100, 100);
        tree[id].locked = true;
        let clicked = Rc::new(RefCell::new(0));
        let counter = clicked.clone();
        tree[id].events.on_click(move |_, _| *counter.borrow_mut() += 1);
        settle(&mut tree, &mut renderer);

        let at = Point::new(10, 10);
        tree.process_input(&frame_input(MouseButtons::LEFT, MouseButtons::empty(), at, 0));
        assert_eq!(tree.targeted(), Some(id));
        assert_eq!(*clicked.borrow(), 0);
    }

    #[test]
    fn test_transfer_retargets_to_slider() {
        let mut renderer = RecordingRenderer::new(800, 600);
        let mut tree = ControlTree::new();
        let root = tree.root();
        let slider = tree.create_slider(Orientation::Horizontal, Rc::default(), Rc::default());
        tree.add_child(root, slider).unwrap();
        settle(&mut tree, &mut renderer);
        settle(&mut tree, &mut renderer);

        let handle = tree[slider].as_slider().unwrap().handle();
        let handle_rect = tree[handle].last_bounding_rect();
        let at = Point::new(handle_rect.x + 2, handle_rect.y + 2);
        assert_eq!(tree.find_target(at, false), Some(handle));
        tree.process_input(&frame_input(MouseButtons::empty(), MouseButtons::empty(), at, 0));
        assert_eq!(tree.targeted(), Some(slider));
    }

    #[test]
    fn test_wheel_bubbles_to_panel_scrollbar() {
        let mut renderer = RecordingRenderer::new(800, 600);
        let mut tree = ControlTree::new();
        let root = tree.root();
        let panel = tree.create_panel(root, Rc::default()).unwrap();
        let scrollbar = tree
            .create_vertical_scrollbar(panel, Rc::default(), Rc::default(), false)
            .unwrap();
        tree.set_slider_range(scrollbar, 0, 10).unwrap();
        let child = tree.insert(Control::generic(Rc::default()).with_size(MeasureVector::pixels(50, 50)));
        tree.add_child(panel, child).unwrap();

        tree.perform_mouse_wheel_scroll(child, -2);
        // scrollbar steps are negative so wheel up scrolls back toward zero
        assert_eq!(tree.slider_value(scrollbar), Some(2));

        tree[scrollbar].visible = false;
        tree.perform_mouse_wheel_scroll(child, -2);
        assert_eq!(tree.slider_value(scrollbar), Some(2));
    }

    #[test]
    fn test_drag_confined_to_parent() {
        let mut renderer = RecordingRenderer::new(800, 600);
        let mut tree = ControlTree::new();
        let root = tree.root();
        let parent = add_at(&mut tree, root, 100, 100, 200, 200);
        let id = add_at(&mut tree, parent, 0, 0, 50, 50);
        tree[id].draggable_mode = DraggableMode::DraggableConfinedToParent;
        settle(&mut tree, &mut renderer);

        tree.process_input(&frame_input(MouseButtons::empty(), MouseButtons::LEFT, Point::new(110, 110), 0));
        assert_eq!(tree.targeted(), Some(id));
        assert_eq!(tree[id].drag.handle_offset, Point::new(-10, -10));

        // pointer leaves the control: focus stays locked while the button is held
        tree.process_input(&frame_input(MouseButtons::LEFT, MouseButtons::LEFT, Point::new(790, 20), 0));
        assert_eq!(tree.targeted(), Some(id));
        assert_eq!(tree[id].dragged_position(), Some(Point::new(250, 100)));
        assert_eq!(tree[id].offset_from_parent(), Some(Point::new(150, 0)));

        settle(&mut tree, &mut renderer);
        assert_eq!(tree[id].last_bounding_rect(), Rect::new(250, 100, 50, 50));

        tree.process_input(&frame_input(MouseButtons::LEFT, MouseButtons::empty(), Point::new(790, 20), 0));
        tree.update(0.016, SCREEN);
        assert!(!tree[id].is_being_dragged());
        assert!(tree[id].was_dragged());
    }

    #[test]
    fn test_confined_drag_accounts_for_extra_size() {
        let mut renderer = RecordingRenderer::new(800, 600);
        let mut tree = ControlTree::new();
        let root = tree.root();
        let parent = add_at(&mut tree, root, 100, 100, 200, 200);
        let id = add_at(&mut tree, parent, 20, 20, 50, 50);
        tree[id].override_styles.extra_size = Some(Sides::uniform(5));
        tree[id].draggable_mode = DraggableMode::DraggableConfinedToParent;
        settle(&mut tree, &mut renderer);
        assert_eq!(tree[id].last_bounding_rect(), Rect::new(115, 115, 60, 60));

        // pressing without moving keeps the control in place
        tree.process_input(&frame_input(MouseButtons::empty(), MouseButtons::LEFT, Point::new(130, 130), 0));
        tree.process_input(&frame_input(MouseButtons::LEFT, MouseButtons::LEFT, Point::new(130, 130), 0));
        settle(&mut tree, &mut renderer);
        assert_eq!(tree[id].last_bounding_rect(), Rect::new(115, 115, 60, 60));

        for target in [Point::new(0, 0), Point::new(790, 590), Point::new(0, 590)] {
            tree.process_input(&frame_input(MouseButtons::LEFT, MouseButtons::LEFT, target, 0));
            settle(&mut tree, &mut renderer);
            let bounds = tree[parent].last_internal_bounding_rect();
            let rect = tree[id].last_bounding_rect();
            assert!(bounds.contains_rect(&rect), "{rect:?} escapes {bounds:?}");
        }
        assert_eq!(tree[id].last_bounding_rect(), Rect::new(100, 240, 60, 60));
    }

    #[test]
    fn test_free_drag_has_no_parent_offset() {
        let mut renderer = RecordingRenderer::new(800, 600);
        let mut tree = ControlTree::new();
        let root = tree.root();
        let id = add_at(&mut tree, root, 0, 0, 50, 50);
        tree[id].draggable_mode = DraggableMode::Draggable;
        settle(&mut tree, &mut renderer);

        tree.process_input(&frame_input(MouseButtons::empty(), MouseButtons::LEFT, Point::new(5, 5), 0));
        tree.process_input(&frame_input(MouseButtons::LEFT, MouseButtons::LEFT, Point::new(900, 700), 0));
        assert_eq!(tree[id].dragged_position(), Some(Point::new(895, 695)));
        assert_eq!(tree[id].offset_from_parent(), None);
    }

    #[test]
    fn test_drag_brings_to_front() {
        let mut renderer = RecordingRenderer::new(800, 600);
        let mut tree = ControlTree::new();
        let root = tree.root();
        let first = add_at(&mut tree, root, 0, 0, 50, 50);
        let second = add_at(&mut tree, root, 100, 0, 50, 50);
        tree[first].draggable_mode = DraggableMode::Draggable;
        settle(&mut tree, &mut renderer);

        tree.process_input(&frame_input(MouseButtons::empty(), MouseButtons::LEFT, Point::new(5, 5), 0));
        assert_eq!(tree[root].children(), &[second, first]);
    }
}
