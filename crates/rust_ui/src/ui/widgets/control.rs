//! Control: the node type stored in a [`crate::ui::ControlTree`]
//!
//! A control is plain data. Everything that needs to look at parents,
//! siblings or children (state, layout, drawing, interactions) lives on
//! the tree, which owns every control in an arena.

use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use super::core::{Anchor, ControlState, DraggableMode, OverflowMode};
use super::panel::PanelData;
use super::slider::SliderData;
use crate::events::ControlEvents;
use crate::foundation::collections::{ControlId, DeferredList};
use crate::foundation::math::{Color, Point, Rect, Sides};
use crate::ui::backend::Renderer;
use crate::ui::measure::MeasureVector;
use crate::ui::style::{CursorProperties, StyleSheet, StyleSheetState};

/// Overrides the tint colour a control draws with
pub type ColorAnimator = Box<dyn Fn(&Control, Color) -> Color>;

/// What a custom behavior can see when it updates or draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlFrame {
    /// Resolved state this frame
    pub state: ControlState,
    /// Last bounding rect (extra size included)
    pub bounding_rect: Rect,
    /// Last internal rect (padding removed)
    pub internal_rect: Rect,
}

/// Hooks for control types defined outside this crate
pub trait ControlBehavior {
    /// Name reported by [`ControlType::Custom`]
    fn type_name(&self) -> &'static str;

    /// Size used when the stylesheet has no default
    fn default_size(&self) -> MeasureVector {
        MeasureVector::percents(100.0, 100.0)
    }

    /// Anchor used when the stylesheet has no default
    fn default_anchor(&self) -> Anchor {
        Anchor::AutoLTR
    }

    /// Whether the control reacts to the pointer by default
    fn interactable(&self) -> bool {
        false
    }

    /// Per-frame logic
    fn update(&mut self, _frame: &ControlFrame, _dt: f32) {}

    /// Extra drawing after the fill textures
    fn draw(&mut self, _renderer: &mut dyn Renderer, _frame: &ControlFrame) {}
}

/// Built-in control types plus the custom escape hatch
pub enum ControlKind {
    /// Plain rectangle
    Generic,
    /// Container with an optional vertical scrollbar
    Panel(PanelData),
    /// Value picker with a draggable handle
    Slider(SliderData),
    /// Non-interactive slider whose handle is a fill bar
    ProgressBar(SliderData),
    /// User-defined behavior
    Custom(Box<dyn ControlBehavior>),
}

impl ControlKind {
    /// Type tag
    pub fn control_type(&self) -> ControlType {
        match self {
            Self::Generic => ControlType::Generic,
            Self::Panel(_) => ControlType::Panel,
            Self::Slider(_) => ControlType::Slider,
            Self::ProgressBar(_) => ControlType::ProgressBar,
            Self::Custom(behavior) => ControlType::Custom(behavior.type_name()),
        }
    }

    /// Size when the stylesheet has no default
    pub fn default_size(&self) -> MeasureVector {
        match self {
            Self::Generic => MeasureVector::percents(100.0, 100.0),
            Self::Panel(_) => MeasureVector::pixels(400, 400),
            Self::Slider(data) | Self::ProgressBar(data) => data.default_size(),
            Self::Custom(behavior) => behavior.default_size(),
        }
    }

    /// Anchor when the stylesheet has no default
    pub fn default_anchor(&self) -> Anchor {
        match self {
            Self::Custom(behavior) => behavior.default_anchor(),
            _ => Anchor::AutoLTR,
        }
    }

    /// Interactable unless overridden on the control
    pub fn interactable(&self) -> bool {
        match self {
            Self::Slider(_) => true,
            Self::Custom(behavior) => behavior.interactable(),
            _ => false,
        }
    }

    /// True for kinds whose internal children take part in tree walks
    pub(crate) const fn walks_internal_children(&self) -> bool {
        matches!(self, Self::Panel(_) | Self::Slider(_) | Self::ProgressBar(_))
    }
}

impl fmt::Debug for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => f.write_str("Generic"),
            Self::Panel(data) => f.debug_tuple("Panel").field(data).finish(),
            Self::Slider(data) => f.debug_tuple("Slider").field(data).finish(),
            Self::ProgressBar(data) => f.debug_tuple("ProgressBar").field(data).finish(),
            Self::Custom(behavior) => f.debug_tuple("Custom").field(&behavior.type_name()).finish(),
        }
    }
}

/// Type tag used by type-filtered searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlType {
    /// [`ControlKind::Generic`]
    Generic,
    /// [`ControlKind::Panel`]
    Panel,
    /// [`ControlKind::Slider`]
    Slider,
    /// [`ControlKind::ProgressBar`]
    ProgressBar,
    /// [`ControlKind::Custom`] with its type name
    Custom(&'static str),
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct DragState {
    pub dragged_position: Option<Point>,
    pub handle_position: Option<Point>,
    pub offset_from_parent: Option<Point>,
    pub handle_offset: Point,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct StateTransition {
    pub progress: f32,
    pub last: ControlState,
    pub previous: ControlState,
}

impl Default for StateTransition {
    fn default() -> Self {
        Self {
            progress: 1.0,
            last: ControlState::Default,
            previous: ControlState::Default,
        }
    }
}

/// Values memoized until the next tree update
#[derive(Debug, Default)]
pub(crate) struct FrameCache {
    pub state: Cell<Option<ControlState>>,
    pub locked: Cell<Option<bool>>,
    pub disabled: Cell<Option<bool>>,
    pub visible: Cell<Option<bool>>,
}

impl FrameCache {
    pub fn clear(&self) {
        self.state.set(None);
        self.locked.set(None);
        self.disabled.set(None);
        self.visible.set(None);
    }
}

/// A node of the UI tree
pub struct Control {
    /// Name used by identifier searches
    pub identifier: Option<String>,
    /// Arbitrary host data
    pub user_data: Option<Box<dyn Any>>,
    /// Positioning rule
    pub anchor: Anchor,
    /// Offset from the anchor point
    pub offset: MeasureVector,
    /// Requested size
    pub size: MeasureVector,
    /// Disabled controls (and their subtrees) ignore input and draw disabled
    pub enabled: bool,
    /// Hidden controls (and their subtrees) neither draw nor interact
    pub visible: bool,
    /// Locked controls (and their subtrees) ignore input but draw normally
    pub locked: bool,
    /// Never becomes the targeted control
    pub ignore_interactions: bool,
    /// Width follows the children after each draw
    pub auto_width: bool,
    /// Height follows the children after each draw
    pub auto_height: bool,
    /// Clip children to the internal rect
    pub overflow_mode: OverflowMode,
    /// Pointer dragging
    pub draggable_mode: DraggableMode,
    /// Move to the end of the parent's children when a drag starts
    pub bring_to_front_if_dragged: bool,
    /// Cursor shown while targeted, overriding the system cursors
    pub cursor_style: Option<CursorProperties>,
    /// Shared stylesheet
    pub style_sheet: Rc<StyleSheet>,
    /// Per-control property overrides, consulted first
    pub override_styles: StyleSheetState,
    /// Tint colour filter
    pub color_animator: Option<ColorAnimator>,
    /// Grows the hit-test rect
    pub extra_margin_for_interactions: Sides,
    /// Stay put when the parent scrolls
    pub ignore_scroll_offset: bool,
    /// Count as the previous sibling in auto-flow layouts
    pub include_in_internal_auto_anchor_calculation: bool,
    /// Report the state of another control
    pub copy_state_from: Option<ControlId>,
    /// Forward interactions to another control when targeted
    pub transfer_interactions_to: Option<ControlId>,
    /// Fixed state, wins over everything
    pub locked_state: Option<ControlState>,
    /// Draw the stylesheet fill texture and background
    pub draw_fill_texture: bool,
    /// Win hit tests against non-topmost controls (inherited by children)
    pub top_most_interactions: bool,
    /// Keep the focus until hidden, locked or disabled
    pub lock_focus_on_self: bool,
    /// Override of the kind's default interactivity
    pub interactable: Option<bool>,
    /// Event handlers
    pub events: ControlEvents,

    pub(crate) kind: ControlKind,
    pub(crate) parent: Option<ControlId>,
    pub(crate) children: DeferredList<ControlId>,
    pub(crate) internal_children: Vec<ControlId>,
    pub(crate) internal_children_top_most: Vec<ControlId>,
    pub(crate) checked: bool,
    pub(crate) last_bounding_rect: Rect,
    pub(crate) last_internal_bounding_rect: Rect,
    pub(crate) last_visible_bounding_rect: Rect,
    pub(crate) drag: DragState,
    pub(crate) first_draw_call: bool,
    pub(crate) was_mouse_down_last_interaction: bool,
    pub(crate) interacted_timer: Cell<f32>,
    pub(crate) cache: FrameCache,
    pub(crate) transition: StateTransition,
}

impl Control {
    /// Create a control of the given kind.
    ///
    /// Size and anchor come from the stylesheet defaults, falling back to the
    /// kind's own defaults.
    pub fn new(kind: ControlKind, style_sheet: Rc<StyleSheet>) -> Self {
        let mut size = kind.default_size();
        if let Some(width) = style_sheet.default_width {
            size.x = width;
        }
        if let Some(height) = style_sheet.default_height {
            size.y = height;
        }
        let anchor = style_sheet.default_anchor.unwrap_or_else(|| kind.default_anchor());

        Self {
            identifier: None,
            user_data: None,
            anchor,
            offset: MeasureVector::default(),
            size,
            enabled: true,
            visible: true,
            locked: false,
            ignore_interactions: false,
            auto_width: false,
            auto_height: false,
            overflow_mode: OverflowMode::AllowOverflow,
            draggable_mode: DraggableMode::NotDraggable,
            bring_to_front_if_dragged: true,
            cursor_style: None,
            style_sheet,
            override_styles: StyleSheetState::default(),
            color_animator: None,
            extra_margin_for_interactions: Sides::ZERO,
            ignore_scroll_offset: false,
            include_in_internal_auto_anchor_calculation: true,
            copy_state_from: None,
            transfer_interactions_to: None,
            locked_state: None,
            draw_fill_texture: true,
            top_most_interactions: false,
            lock_focus_on_self: false,
            interactable: None,
            events: ControlEvents::new(),
            kind,
            parent: None,
            children: DeferredList::new(),
            internal_children: Vec::new(),
            internal_children_top_most: Vec::new(),
            checked: false,
            last_bounding_rect: Rect::default(),
            last_internal_bounding_rect: Rect::default(),
            last_visible_bounding_rect: Rect::default(),
            drag: DragState::default(),
            first_draw_call: true,
            was_mouse_down_last_interaction: false,
            interacted_timer: Cell::new(0.0),
            cache: FrameCache::default(),
            transition: StateTransition::default(),
        }
    }

    /// Plain control
    pub fn generic(style_sheet: Rc<StyleSheet>) -> Self {
        Self::new(ControlKind::Generic, style_sheet)
    }

    /// Control with custom behavior
    pub fn custom(behavior: impl ControlBehavior + 'static, style_sheet: Rc<StyleSheet>) -> Self {
        Self::new(ControlKind::Custom(Box::new(behavior)), style_sheet)
    }

    /// Set the identifier
    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Set the anchor
    #[must_use]
    pub const fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the size
    #[must_use]
    pub const fn with_size(mut self, size: MeasureVector) -> Self {
        self.size = size;
        self
    }

    /// Set the offset
    #[must_use]
    pub const fn with_offset(mut self, offset: MeasureVector) -> Self {
        self.offset = offset;
        self
    }

    /// Parent control, `None` for detached controls and the root
    pub const fn parent(&self) -> Option<ControlId> {
        self.parent
    }

    /// Public children in draw order (queued mutations not applied yet)
    pub fn children(&self) -> &[ControlId] {
        self.children.as_slice()
    }

    /// Internal children drawn before the public children
    pub fn internal_children(&self) -> &[ControlId] {
        &self.internal_children
    }

    /// Internal children drawn and hit-tested last
    pub fn internal_children_top_most(&self) -> &[ControlId] {
        &self.internal_children_top_most
    }

    /// Control kind
    pub const fn kind(&self) -> &ControlKind {
        &self.kind
    }

    /// Mutable control kind
    pub fn kind_mut(&mut self) -> &mut ControlKind {
        &mut self.kind
    }

    /// Type tag
    pub fn control_type(&self) -> ControlType {
        self.kind.control_type()
    }

    /// Panel data, if this is a panel
    pub const fn as_panel(&self) -> Option<&PanelData> {
        match &self.kind {
            ControlKind::Panel(data) => Some(data),
            _ => None,
        }
    }

    /// Mutable panel data, if this is a panel
    pub fn as_panel_mut(&mut self) -> Option<&mut PanelData> {
        match &mut self.kind {
            ControlKind::Panel(data) => Some(data),
            _ => None,
        }
    }

    /// Slider data, for sliders and progress bars
    pub const fn as_slider(&self) -> Option<&SliderData> {
        match &self.kind {
            ControlKind::Slider(data) | ControlKind::ProgressBar(data) => Some(data),
            _ => None,
        }
    }

    pub(crate) fn as_slider_mut(&mut self) -> Option<&mut SliderData> {
        match &mut self.kind {
            ControlKind::Slider(data) | ControlKind::ProgressBar(data) => Some(data),
            _ => None,
        }
    }

    /// Checked flag; change it through [`crate::ui::ControlTree::set_checked`]
    pub const fn is_checked(&self) -> bool {
        self.checked
    }

    /// Bounding rect from the last draw
    pub const fn last_bounding_rect(&self) -> Rect {
        self.last_bounding_rect
    }

    /// Internal rect from the last draw
    pub const fn last_internal_bounding_rect(&self) -> Rect {
        self.last_internal_bounding_rect
    }

    /// Bounding rect clipped by the scissor active during the last draw
    pub const fn last_visible_bounding_rect(&self) -> Rect {
        self.last_visible_bounding_rect
    }

    /// Absolute position set by dragging
    pub const fn dragged_position(&self) -> Option<Point> {
        self.drag.dragged_position
    }

    /// Position relative to the parent's internal rect set by confined dragging
    pub const fn offset_from_parent(&self) -> Option<Point> {
        self.drag.offset_from_parent
    }

    /// True while a drag is in progress
    pub const fn is_being_dragged(&self) -> bool {
        self.drag.handle_position.is_some()
    }

    /// True once moved by dragging
    pub const fn was_dragged(&self) -> bool {
        self.drag.dragged_position.is_some()
    }

    /// Forget any drag position so the anchor applies again
    pub fn reset_drag(&mut self) {
        self.drag = DragState::default();
    }

    pub(crate) const fn frame(&self, state: ControlState) -> ControlFrame {
        ControlFrame {
            state,
            bounding_rect: self.last_bounding_rect,
            internal_rect: self.last_internal_bounding_rect,
        }
    }
}

impl fmt::Debug for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control")
            .field("identifier", &self.identifier)
            .field("kind", &self.kind)
            .field("anchor", &self.anchor)
            .field("offset", &self.offset)
            .field("size", &self.size)
            .field("parent", &self.parent)
            .field("children", &self.children.as_slice())
            .field("last_bounding_rect", &self.last_bounding_rect)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::measure::Measurement;

    #[test]
    fn test_defaults_come_from_kind() {
        let control = Control::generic(Rc::default());
        assert_eq!(control.size, MeasureVector::percents(100.0, 100.0));
        assert_eq!(control.anchor, Anchor::AutoLTR);
        assert!(control.enabled && control.visible);
        assert!(control.bring_to_front_if_dragged);
        assert!(control.include_in_internal_auto_anchor_calculation);
        assert!(control.draw_fill_texture);
    }

    #[test]
    fn test_stylesheet_defaults_win() {
        let sheet = StyleSheet {
            default_width: Some(Measurement::pixels(120)),
            default_anchor: Some(Anchor::Center),
            ..StyleSheet::default()
        };
        let control = Control::new(ControlKind::Panel(PanelData::default()), Rc::new(sheet));
        assert_eq!(control.size.x, Measurement::pixels(120));
        assert_eq!(control.size.y, Measurement::pixels(400));
        assert_eq!(control.anchor, Anchor::Center);
    }

    struct Badge;

    impl ControlBehavior for Badge {
        fn type_name(&self) -> &'static str {
            "Badge"
        }

        fn interactable(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_custom_kind_reports_behavior() {
        let control = Control::custom(Badge, Rc::default());
        assert_eq!(control.control_type(), ControlType::Custom("Badge"));
        assert!(control.kind().interactable());
    }
}
