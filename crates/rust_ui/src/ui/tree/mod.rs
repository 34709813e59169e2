//! Control tree
//!
//! Owns every control in a slotmap arena. Parents own their children through
//! id lists; `Control::parent` is a plain back-reference id. The tree drives
//! state resolution, layout, drawing, updates and interactions.
//!
//! Key principles:
//! - Public child lists are [`crate::foundation::collections::DeferredList`]s locked while traversed, so
//!   callbacks fired mid-traversal may add or remove children safely
//! - Structural misuse returns [`TreeError`]; frame-time work never fails
//! - Stale ids are tolerated during traversal (a destroyed control is skipped)

mod debug;
mod draw;
mod interaction;
mod layout;
mod state;
mod update;

use std::ops::{Index, IndexMut};
use std::rc::Rc;

use thiserror::Error;

pub use draw::DrawResult;

use crate::events::{ControlEvent, ControlEvents};
use crate::foundation::collections::{ControlArena, ControlId};
use crate::foundation::math::Rect;
use crate::foundation::time::FrameClock;
use crate::ui::backend::Renderer;
use crate::ui::style::StyleSheet;
use crate::ui::widgets::{Control, ControlKind, ControlType, PanelData};

/// Structural misuse of the tree
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The id does not refer to a live control
    #[error("control {0:?} does not exist in this tree")]
    MissingControl(ControlId),

    /// Re-parenting without removing first
    #[error("control {child:?} already has parent {parent:?}, remove it first")]
    AlreadyHasParent {
        /// Control being added
        child: ControlId,
        /// Its current parent
        parent: ControlId,
    },

    /// The control is not among the parent's public children
    #[error("control {child:?} is not a child of {parent:?}")]
    NotAChild {
        /// Claimed parent
        parent: ControlId,
        /// Control being removed or reordered
        child: ControlId,
    },

    /// The control is not among the parent's internal children
    #[error("control {child:?} is not an internal child of {parent:?}")]
    NotAnInternalChild {
        /// Claimed parent
        parent: ControlId,
        /// Control being removed
        child: ControlId,
    },

    /// A control cannot become a descendant of itself
    #[error("adding {child:?} under {parent:?} would create a cycle")]
    WouldCreateCycle {
        /// Claimed parent
        parent: ControlId,
        /// Control being added
        child: ControlId,
    },

    /// Panel-only operation on another kind
    #[error("control {0:?} is not a panel")]
    NotAPanel(ControlId),

    /// Slider-only operation on another kind
    #[error("control {0:?} is not a slider or progress bar")]
    NotASlider(ControlId),

    /// The root cannot be detached or destroyed
    #[error("the root control cannot be removed or destroyed")]
    IsRoot,
}

/// One-shot callback run after the whole tree drew
pub type PostDrawAction = Box<dyn FnOnce(&mut ControlTree, &mut dyn Renderer)>;

/// Arena of controls plus per-frame interaction state
pub struct ControlTree {
    controls: ControlArena<Control>,
    root: ControlId,
    targeted: Option<ControlId>,
    /// Handlers fired for every control after its own handlers
    pub global_events: ControlEvents,
    /// Seconds a pressed control keeps reporting `Interacted`
    pub time_to_lock_interactive_state: f32,
    pub(crate) clock: FrameClock,
    pub(crate) scissor_stack: Vec<Rect>,
    post_draw_actions: Vec<PostDrawAction>,
}

impl ControlTree {
    /// Create a tree holding only the root panel
    pub fn new() -> Self {
        Self::with_root_style(Rc::default())
    }

    /// Create a tree whose root panel uses `style_sheet`
    pub fn with_root_style(style_sheet: Rc<StyleSheet>) -> Self {
        let mut controls = ControlArena::<Control>::with_key();
        let root = controls.insert(
            Control::new(ControlKind::Panel(PanelData::default()), style_sheet).with_identifier("Root"),
        );
        Self {
            controls,
            root,
            targeted: None,
            global_events: ControlEvents::new(),
            time_to_lock_interactive_state: 0.1,
            clock: FrameClock::new(),
            scissor_stack: Vec::new(),
            post_draw_actions: Vec::new(),
        }
    }

    /// Root panel, always present
    pub const fn root(&self) -> ControlId {
        self.root
    }

    /// Control currently under the pointer or holding the focus
    pub const fn targeted(&self) -> Option<ControlId> {
        self.targeted
    }

    pub(crate) fn set_targeted(&mut self, targeted: Option<ControlId>) {
        if targeted != self.targeted {
            log::trace!("Targeted control changed: {:?} -> {:?}", self.targeted, targeted);
            self.targeted = targeted;
        }
    }

    /// Seconds accumulated by updates
    pub const fn elapsed_time(&self) -> f64 {
        self.clock.elapsed()
    }

    /// Delta of the last update
    pub const fn last_delta_time(&self) -> f32 {
        self.clock.last_delta()
    }

    /// Move a detached control into the arena
    pub fn insert(&mut self, control: Control) -> ControlId {
        self.controls.insert(control)
    }

    /// Borrow a control
    pub fn get(&self, id: ControlId) -> Option<&Control> {
        self.controls.get(id)
    }

    /// Mutably borrow a control
    pub fn get_mut(&mut self, id: ControlId) -> Option<&mut Control> {
        self.controls.get_mut(id)
    }

    /// True if `id` refers to a live control
    pub fn contains(&self, id: ControlId) -> bool {
        self.controls.contains_key(id)
    }

    /// Number of live controls, detached ones included
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Always false: the root is never freed
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    fn control(&self, id: ControlId) -> Result<&Control, TreeError> {
        self.controls.get(id).ok_or(TreeError::MissingControl(id))
    }

    fn control_mut(&mut self, id: ControlId) -> Result<&mut Control, TreeError> {
        self.controls.get_mut(id).ok_or(TreeError::MissingControl(id))
    }

    /// True if `ancestor` is `id` or one of its parents
    pub fn is_ancestor_or_self(&self, ancestor: ControlId, id: ControlId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.controls.get(node).and_then(|control| control.parent);
        }
        false
    }

    fn check_attachable(&self, parent: ControlId, child: ControlId) -> Result<(), TreeError> {
        self.control(parent)?;
        let control = self.control(child)?;
        if let Some(existing) = control.parent {
            return Err(TreeError::AlreadyHasParent { child, parent: existing });
        }
        if child == self.root || self.is_ancestor_or_self(child, parent) {
            return Err(TreeError::WouldCreateCycle { parent, child });
        }
        Ok(())
    }

    fn attach(&mut self, parent: ControlId, child: ControlId) {
        if let Some(control) = self.controls.get_mut(child) {
            control.parent = Some(parent);
            control.first_draw_call = true;
            control.cache.clear();
        }
    }

    /// Append `child` to the public children of `parent`
    pub fn add_child(&mut self, parent: ControlId, child: ControlId) -> Result<(), TreeError> {
        self.add_child_at(parent, child, None, false)
    }

    /// Insert `child` at `index` (clamped, `None` appends).
    ///
    /// While the parent's children are being traversed the insertion is
    /// queued unless `force` is set.
    pub fn add_child_at(
        &mut self,
        parent: ControlId,
        child: ControlId,
        index: Option<usize>,
        force: bool,
    ) -> Result<(), TreeError> {
        self.check_attachable(parent, child)?;
        self.control_mut(parent)?.children.add(child, index, force);
        self.attach(parent, child);
        Ok(())
    }

    /// Detach `child` from the public children of `parent`
    pub fn remove_child(&mut self, parent: ControlId, child: ControlId) -> Result<(), TreeError> {
        self.remove_child_with(parent, child, false)
    }

    /// Detach `child`; queued while traversed unless `force` is set.
    ///
    /// The control stays alive in the arena and can be re-attached.
    pub fn remove_child_with(&mut self, parent: ControlId, child: ControlId, force: bool) -> Result<(), TreeError> {
        let is_child = self.control(child)?.parent == Some(parent)
            && self.control(parent)?.children.contains_or_pending(child);
        if !is_child {
            return Err(TreeError::NotAChild { parent, child });
        }
        self.control_mut(parent)?.children.remove(child, force);
        let control = self.control_mut(child)?;
        control.parent = None;
        control.cache.clear();
        Ok(())
    }

    /// Attach a built-in sub-part
    pub fn add_internal_child(&mut self, parent: ControlId, child: ControlId, top_most: bool) -> Result<(), TreeError> {
        self.check_attachable(parent, child)?;
        let control = self.control_mut(parent)?;
        if top_most {
            control.internal_children_top_most.push(child);
        } else {
            control.internal_children.push(child);
        }
        self.attach(parent, child);
        Ok(())
    }

    /// Detach a built-in sub-part
    pub fn remove_internal_child(&mut self, parent: ControlId, child: ControlId) -> Result<(), TreeError> {
        let control = self.control_mut(parent)?;
        let before = control.internal_children.len() + control.internal_children_top_most.len();
        control.internal_children.retain(|id| *id != child);
        control.internal_children_top_most.retain(|id| *id != child);
        if control.internal_children.len() + control.internal_children_top_most.len() == before {
            return Err(TreeError::NotAnInternalChild { parent, child });
        }
        if let Some(control) = self.controls.get_mut(child) {
            control.parent = None;
        }
        Ok(())
    }

    /// Detach from the parent, if any
    pub fn remove_self(&mut self, id: ControlId) -> Result<(), TreeError> {
        if id == self.root {
            return Err(TreeError::IsRoot);
        }
        match self.control(id)?.parent {
            Some(parent) => self.remove_child(parent, id),
            None => Ok(()),
        }
    }

    /// Move to the end of the parent's children (drawn last, on top)
    pub fn bring_to_front(&mut self, id: ControlId) -> Result<(), TreeError> {
        let Some(parent) = self.control(id)?.parent else {
            return Ok(());
        };
        let children = &self.control(parent)?.children;
        if children.last() == Some(id) && !children.has_pending() {
            return Ok(());
        }
        self.remove_child(parent, id)?;
        self.add_child(parent, id)
    }

    /// Move to the start of the parent's children (drawn first)
    pub fn push_to_back(&mut self, id: ControlId) -> Result<(), TreeError> {
        let Some(parent) = self.control(id)?.parent else {
            return Ok(());
        };
        let children = &self.control(parent)?.children;
        if children.first() == Some(id) && !children.has_pending() {
            return Ok(());
        }
        self.remove_child(parent, id)?;
        self.add_child_at(parent, id, Some(0), false)
    }

    /// Detach `id` and free it together with its whole subtree
    pub fn destroy(&mut self, id: ControlId) -> Result<(), TreeError> {
        if id == self.root {
            return Err(TreeError::IsRoot);
        }
        let parent = self.control(id)?.parent;
        match parent {
            Some(parent) if control_is_internal(self, parent, id) => self.remove_internal_child(parent, id)?,
            Some(parent) => self.remove_child(parent, id)?,
            None => {}
        }

        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            let Some(control) = self.controls.remove(next) else {
                continue;
            };
            pending.extend(control.children.all_including_pending());
            pending.extend(control.internal_children.iter().copied());
            pending.extend(control.internal_children_top_most.iter().copied());
            if self.targeted == Some(next) {
                self.targeted = None;
            }
        }
        Ok(())
    }

    pub(crate) fn child_at(&self, parent: ControlId, index: usize) -> Option<ControlId> {
        self.controls.get(parent).and_then(|control| control.children.get(index))
    }

    pub(crate) fn lock_children(&mut self, id: ControlId) {
        if let Some(control) = self.controls.get_mut(id) {
            control.children.lock();
        }
    }

    pub(crate) fn unlock_children(&mut self, id: ControlId) {
        if let Some(control) = self.controls.get_mut(id) {
            control.children.unlock();
        }
    }

    pub(crate) fn flush_children(&mut self, id: ControlId) {
        if let Some(control) = self.controls.get_mut(id) {
            if !control.children.is_locked() {
                control.children.flush();
            }
        }
    }

    /// Pre-order walk from `start`.
    ///
    /// Panels, sliders and progress bars also visit their internal children
    /// (regular ones before the public children, topmost ones last). Return
    /// false from `callback` to stop; the walk then returns false too.
    pub fn walk(&mut self, start: ControlId, mut callback: impl FnMut(&mut Self, ControlId) -> bool) -> bool {
        self.walk_inner(start, &mut callback)
    }

    fn walk_inner(&mut self, id: ControlId, callback: &mut dyn FnMut(&mut Self, ControlId) -> bool) -> bool {
        if !callback(self, id) {
            return false;
        }
        let Some(control) = self.controls.get(id) else {
            return true;
        };
        let walks_internal = control.kind.walks_internal_children();
        let internal = if walks_internal { control.internal_children.clone() } else { Vec::new() };
        for child in internal {
            if !self.walk_inner(child, callback) {
                return false;
            }
        }

        self.lock_children(id);
        let mut keep_going = true;
        let mut index = 0;
        while let Some(child) = self.child_at(id, index) {
            if !self.walk_inner(child, callback) {
                keep_going = false;
                break;
            }
            index += 1;
        }
        self.unlock_children(id);
        if !keep_going {
            return false;
        }

        if walks_internal {
            let top_most = self
                .controls
                .get(id)
                .map(|control| control.internal_children_top_most.clone())
                .unwrap_or_default();
            for child in top_most {
                if !self.walk_inner(child, callback) {
                    return false;
                }
            }
        }
        true
    }

    /// Visit the direct public children of `id`; stops when `callback` returns false
    pub fn iterate_children(&mut self, id: ControlId, mut callback: impl FnMut(&mut Self, ControlId) -> bool) {
        self.lock_children(id);
        let mut index = 0;
        while let Some(child) = self.child_at(id, index) {
            if !callback(self, child) {
                break;
            }
            index += 1;
        }
        self.unlock_children(id);
    }

    /// Depth-first search from `start` (internal children included like [`Self::walk`])
    pub fn find_from(&self, start: ControlId, predicate: &dyn Fn(&Control) -> bool) -> Option<ControlId> {
        let control = self.controls.get(start)?;
        if predicate(control) {
            return Some(start);
        }
        let walks_internal = control.kind.walks_internal_children();
        let internal: &[ControlId] = if walks_internal { &control.internal_children } else { &[] };
        let top_most: &[ControlId] = if walks_internal { &control.internal_children_top_most } else { &[] };
        internal
            .iter()
            .chain(control.children.as_slice())
            .chain(top_most)
            .find_map(|child| self.find_from(*child, predicate))
    }

    /// First control with `identifier`, searching from the root
    pub fn find(&self, identifier: &str) -> Option<ControlId> {
        self.find_from(self.root, &|control| control.identifier.as_deref() == Some(identifier))
    }

    /// First control with `identifier` and exactly the given type
    pub fn find_of_type(&self, identifier: &str, control_type: ControlType) -> Option<ControlId> {
        self.find_from(self.root, &|control| {
            control.identifier.as_deref() == Some(identifier) && control.control_type() == control_type
        })
    }

    /// Fire `event` for `id`: its own handlers first, then the global ones
    pub fn fire(&mut self, id: ControlId, event: ControlEvent) {
        if let Some(mut handlers) = self.controls.get_mut(id).and_then(|control| control.events.take(event)) {
            for handler in &mut handlers {
                handler(self, id);
            }
            if let Some(control) = self.controls.get_mut(id) {
                control.events.restore(event, handlers);
            }
        }
        if let Some(mut handlers) = self.global_events.take(event) {
            for handler in &mut handlers {
                handler(self, id);
            }
            self.global_events.restore(event, handlers);
        }
    }

    /// Set the checked flag, firing `OnChecked` / `OnUnchecked` on change
    pub fn set_checked(&mut self, id: ControlId, checked: bool) -> Result<(), TreeError> {
        let control = self.control_mut(id)?;
        if control.checked == checked {
            return Ok(());
        }
        control.checked = checked;
        control.cache.clear();
        self.fire(
            id,
            if checked {
                ControlEvent::OnChecked
            } else {
                ControlEvent::OnUnchecked
            },
        );
        Ok(())
    }

    /// Queue a callback to run once after the whole tree drew this frame
    pub fn run_after_drawing_controls(&mut self, action: impl FnOnce(&mut Self, &mut dyn Renderer) + 'static) {
        self.post_draw_actions.push(Box::new(action));
    }

    pub(crate) fn run_post_draw_actions(&mut self, renderer: &mut dyn Renderer) {
        while !self.post_draw_actions.is_empty() {
            for action in std::mem::take(&mut self.post_draw_actions) {
                action(self, renderer);
            }
        }
    }

    /// Create a control of `kind` and append it to `parent`
    pub fn create(
        &mut self,
        parent: ControlId,
        kind: ControlKind,
        style_sheet: Rc<StyleSheet>,
    ) -> Result<ControlId, TreeError> {
        self.control(parent)?;
        let id = self.insert(Control::new(kind, style_sheet));
        self.add_child(parent, id)?;
        Ok(id)
    }
}

fn control_is_internal(tree: &ControlTree, parent: ControlId, id: ControlId) -> bool {
    tree.controls.get(parent).is_some_and(|control| {
        control.internal_children.contains(&id) || control.internal_children_top_most.contains(&id)
    })
}

impl Default for ControlTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<ControlId> for ControlTree {
    type Output = Control;

    fn index(&self, id: ControlId) -> &Control {
        &self.controls[id]
    }
}

impl IndexMut<ControlId> for ControlTree {
    fn index_mut(&mut self, id: ControlId) -> &mut Control {
        &mut self.controls[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn generic(tree: &mut ControlTree) -> ControlId {
        tree.insert(Control::generic(Rc::default()))
    }

    #[test]
    fn test_add_and_remove_child() {
        let mut tree = ControlTree::new();
        let root = tree.root();
        let child = generic(&mut tree);
        tree.add_child(root, child).unwrap();
        assert_eq!(tree[child].parent(), Some(root));
        assert_eq!(tree[root].children(), &[child]);

        tree.remove_child(root, child).unwrap();
        assert_eq!(tree[child].parent(), None);
        assert!(tree[root].children().is_empty());
        assert!(tree.contains(child));
    }

    #[test]
    fn test_reparenting_requires_removal() {
        let mut tree = ControlTree::new();
        let root = tree.root();
        let a = generic(&mut tree);
        let b = generic(&mut tree);
        tree.add_child(root, a).unwrap();
        tree.add_child(root, b).unwrap();
        assert_eq!(
            tree.add_child(b, a),
            Err(TreeError::AlreadyHasParent { child: a, parent: root })
        );
        assert_eq!(tree.remove_child(b, a), Err(TreeError::NotAChild { parent: b, child: a }));
    }

    #[test]
    fn test_cycles_are_rejected() {
        let mut tree = ControlTree::new();
        let root = tree.root();
        let a = generic(&mut tree);
        let b = generic(&mut tree);
        tree.add_child(root, a).unwrap();
        tree.add_child(a, b).unwrap();
        tree.remove_child(root, a).unwrap();
        assert_eq!(tree.add_child(b, a), Err(TreeError::WouldCreateCycle { parent: b, child: a }));
        assert_eq!(tree.destroy(root), Err(TreeError::IsRoot));
    }

    #[test]
    fn test_bring_to_front_and_push_to_back() {
        let mut tree = ControlTree::new();
        let root = tree.root();
        let ids: Vec<_> = (0..3).map(|_| generic(&mut tree)).collect();
        for id in &ids {
            tree.add_child(root, *id).unwrap();
        }
        tree.bring_to_front(ids[0]).unwrap();
        assert_eq!(tree[root].children(), &[ids[1], ids[2], ids[0]]);
        tree.push_to_back(ids[2]).unwrap();
        assert_eq!(tree[root].children(), &[ids[2], ids[1], ids[0]]);
        // already in place
        tree.push_to_back(ids[2]).unwrap();
        assert_eq!(tree[root].children(), &[ids[2], ids[1], ids[0]]);
    }

    #[test]
    fn test_destroy_frees_subtree() {
        let mut tree = ControlTree::new();
        let root = tree.root();
        let parent = generic(&mut tree);
        let child = generic(&mut tree);
        let grandchild = generic(&mut tree);
        tree.add_child(root, parent).unwrap();
        tree.add_child(parent, child).unwrap();
        tree.add_child(child, grandchild).unwrap();

        tree.destroy(parent).unwrap();
        assert!(!tree.contains(parent));
        assert!(!tree.contains(child));
        assert!(!tree.contains(grandchild));
        assert!(tree[root].children().is_empty());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_mutation_during_walk_is_deferred() {
        let mut tree = ControlTree::new();
        let root = tree.root();
        let first = generic(&mut tree);
        tree.add_child(root, first).unwrap();

        let mut visited = Vec::new();
        tree.walk(root, |tree, id| {
            visited.push(id);
            if id == first {
                let extra = tree.insert(Control::generic(Rc::default()));
                tree.add_child(root, extra).unwrap();
                tree.remove_child(root, first).unwrap();
            }
            true
        });
        assert_eq!(visited, vec![root, first]);
        assert_eq!(tree[root].children(), &[first]);

        tree.flush_children(root);
        assert_eq!(tree[root].children().len(), 1);
        assert_ne!(tree[root].children()[0], first);
    }

    #[test]
    fn test_walk_stops_early() {
        let mut tree = ControlTree::new();
        let root = tree.root();
        let ids: Vec<_> = (0..3).map(|_| generic(&mut tree)).collect();
        for id in &ids {
            tree.add_child(root, *id).unwrap();
        }
        let mut count = 0;
        let finished = tree.walk(root, |_, id| {
            count += 1;
            id != ids[1]
        });
        assert!(!finished);
        assert_eq!(count, 3);
        assert!(!tree[root].children.is_locked());
    }

    #[test]
    fn test_find_by_identifier_and_type() {
        let mut tree = ControlTree::new();
        let root = tree.root();
        let panel = tree.insert(Control::new(ControlKind::Panel(PanelData::default()), Rc::default()).with_identifier("x"));
        let inner = tree.insert(Control::generic(Rc::default()).with_identifier("x"));
        tree.add_child(root, panel).unwrap();
        tree.add_child(panel, inner).unwrap();

        assert_eq!(tree.find("x"), Some(panel));
        assert_eq!(tree.find_of_type("x", ControlType::Generic), Some(inner));
        assert_eq!(tree.find_of_type("x", ControlType::Slider), None);
        assert_eq!(tree.find("Root"), Some(root));
    }

    #[test]
    fn test_control_handlers_fire_before_global() {
        let mut tree = ControlTree::new();
        let root = tree.root();
        let order = Rc::new(RefCell::new(Vec::new()));

        let log = Rc::clone(&order);
        tree.global_events.on(ControlEvent::OnChecked, move |_, _| log.borrow_mut().push("global"));
        let log = Rc::clone(&order);
        tree[root].events.on(ControlEvent::OnChecked, move |_, _| log.borrow_mut().push("control"));

        tree.set_checked(root, true).unwrap();
        tree.set_checked(root, true).unwrap();
        assert_eq!(*order.borrow(), vec!["control", "global"]);
        assert!(tree[root].is_checked());
    }

    #[test]
    fn test_post_draw_actions_run_once() {
        let mut tree = ControlTree::new();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        tree.run_after_drawing_controls(move |_, _| *counter.borrow_mut() += 1);
        let mut renderer = crate::testing::RecordingRenderer::new(800, 600);
        tree.run_post_draw_actions(&mut renderer);
        tree.run_post_draw_actions(&mut renderer);
        assert_eq!(*calls.borrow(), 1);
    }
}
