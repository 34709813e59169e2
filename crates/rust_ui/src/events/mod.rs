//! Control event callbacks
//!
//! Key principles:
//! - Events are identified by [`ControlEvent`], handlers registered per event
//! - Several handlers may listen to the same event, called in registration order
//! - Handlers get the whole [`ControlTree`] so they can restructure it; changes
//!   to child lists under traversal are queued by the tree itself

use std::collections::HashMap;
use std::fmt;

use crate::foundation::collections::ControlId;
use crate::ui::ControlTree;

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlEvent {
    /// A value-holding control changed value
    OnValueChanged,
    /// A checkable control became checked
    OnChecked,
    /// A checkable control became unchecked
    OnUnchecked,
    /// Before the control draws
    BeforeDraw,
    /// After the control and its children drew
    AfterDraw,
    /// Before the control updates
    BeforeUpdate,
    /// After the control and its children updated
    AfterUpdate,
    /// Mouse wheel moved with a negative delta
    OnMouseWheelScrollUp,
    /// Mouse wheel moved with a positive delta
    OnMouseWheelScrollDown,
    /// Left button held over the control
    OnLeftMouseDown,
    /// Left button went down this frame
    OnLeftMousePressed,
    /// Left button went up this frame
    OnLeftMouseReleased,
    /// Right button held over the control
    OnRightMouseDown,
    /// Right button went down this frame
    OnRightMousePressed,
    /// Right button went up this frame
    OnRightMouseReleased,
    /// Pointer is over the control
    WhileMouseHover,
}

impl ControlEvent {
    /// Alias of [`ControlEvent::OnLeftMouseReleased`]
    pub const ON_CLICK: Self = Self::OnLeftMouseReleased;
}

/// Handler signature: the tree and the control the event fired for
pub type ControlCallback = Box<dyn FnMut(&mut ControlTree, ControlId)>;

/// Handlers registered on a control (or globally on the tree)
#[derive(Default)]
pub struct ControlEvents {
    handlers: HashMap<ControlEvent, Vec<ControlCallback>>,
}

impl ControlEvents {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler
    pub fn on(&mut self, event: ControlEvent, callback: impl FnMut(&mut ControlTree, ControlId) + 'static) {
        self.handlers.entry(event).or_default().push(Box::new(callback));
    }

    /// Register a click handler
    pub fn on_click(&mut self, callback: impl FnMut(&mut ControlTree, ControlId) + 'static) {
        self.on(ControlEvent::ON_CLICK, callback);
    }

    /// Drop every handler of `event`
    pub fn clear(&mut self, event: ControlEvent) {
        self.handlers.remove(&event);
    }

    /// True if at least one handler listens to `event`
    pub fn has(&self, event: ControlEvent) -> bool {
        self.handlers.get(&event).is_some_and(|list| !list.is_empty())
    }

    /// Detach the handlers of `event` so they can be called with the tree borrowed mutably
    pub(crate) fn take(&mut self, event: ControlEvent) -> Option<Vec<ControlCallback>> {
        self.handlers.remove(&event)
    }

    /// Reattach handlers taken by [`ControlEvents::take`], keeping any
    /// handler registered while they were detached after them
    pub(crate) fn restore(&mut self, event: ControlEvent, mut taken: Vec<ControlCallback>) {
        if let Some(added) = self.handlers.remove(&event) {
            taken.extend(added);
        }
        self.handlers.insert(event, taken);
    }
}

impl fmt::Debug for ControlEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut events: Vec<_> = self
            .handlers
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(event, list)| (*event, list.len()))
            .collect();
        events.sort_by_key(|(event, _)| format!("{event:?}"));
        f.debug_struct("ControlEvents").field("handlers", &events).finish()
    }
}
