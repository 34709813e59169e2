//! Core control enums shared by layout, state and interaction code

use serde::{Deserialize, Serialize};

/// Rule positioning a control inside its parent's internal rect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum Anchor {
    /// Top-left corner
    TopLeft,
    /// Top edge, centered horizontally
    TopCenter,
    /// Top-right corner
    TopRight,
    /// Left edge, centered vertically
    CenterLeft,
    /// Center of parent
    Center,
    /// Right edge, centered vertically
    CenterRight,
    /// Bottom-left corner
    BottomLeft,
    /// Bottom edge, centered horizontally
    BottomCenter,
    /// Bottom-right corner
    BottomRight,
    /// Block flow below the previous sibling, aligned left
    #[default]
    AutoLTR,
    /// Block flow below the previous sibling, aligned right
    AutoRTL,
    /// Block flow below the previous sibling, centered
    AutoCenter,
    /// Inline flow right of the previous sibling, wrapping to the next row
    AutoInlineLTR,
    /// Inline flow left of the previous sibling, wrapping to the next row
    AutoInlineRTL,
    /// Inline flow right of the previous sibling, rows starting centered
    AutoInlineCenter,
}

impl Anchor {
    /// True for the six auto-flow anchors
    pub const fn is_auto(self) -> bool {
        matches!(
            self,
            Self::AutoLTR
                | Self::AutoRTL
                | Self::AutoCenter
                | Self::AutoInlineLTR
                | Self::AutoInlineRTL
                | Self::AutoInlineCenter
        )
    }

    /// Signed direction applied to the resolved offset so that a positive
    /// offset always moves inward from the anchor edge
    pub const fn offset_factor(self) -> (i32, i32) {
        match self {
            Self::TopRight | Self::CenterRight | Self::AutoRTL | Self::AutoInlineRTL => (-1, 1),
            Self::BottomLeft | Self::BottomCenter => (1, -1),
            Self::BottomRight => (-1, -1),
            _ => (1, 1),
        }
    }

    /// True for anchors hugging the parent's left edge
    pub const fn is_left_edge(self) -> bool {
        matches!(self, Self::TopLeft | Self::CenterLeft | Self::BottomLeft)
    }

    /// True for anchors hugging the parent's right edge
    pub const fn is_right_edge(self) -> bool {
        matches!(self, Self::TopRight | Self::CenterRight | Self::BottomRight)
    }
}

/// How a control may be dragged by the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum DraggableMode {
    /// Never dragged
    #[default]
    NotDraggable,
    /// Free dragging
    Draggable,
    /// Dragging kept inside the screen bounds
    DraggableConfinedToScreen,
    /// Dragging kept inside the parent's internal rect
    DraggableConfinedToParent,
}

/// Whether children may render outside a control's internal rect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum OverflowMode {
    /// Children render freely
    #[default]
    AllowOverflow,
    /// Children are clipped with a scissor region
    HideOverflow,
}

/// Visual / interaction state of a control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum ControlState {
    /// Idle
    #[default]
    Default,
    /// Pointer is over the control
    Targeted,
    /// Control is being pressed
    Interacted,
    /// Control or an ancestor is disabled
    Disabled,
    /// Disabled while checked
    DisabledChecked,
    /// Checked (toggled on)
    Checked,
    /// Pointer is over the checked control
    TargetedChecked,
}

impl ControlState {
    /// State whose style properties are consulted when this state has none
    pub const fn fallback(self) -> Option<Self> {
        match self {
            Self::TargetedChecked => Some(Self::Checked),
            Self::DisabledChecked => Some(Self::Disabled),
            _ => None,
        }
    }
}

/// Slider / progress bar axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Left to right
    #[default]
    Horizontal,
    /// Top to bottom
    Vertical,
}
