//! Bounding rect calculation
//!
//! A control's rect is a pure function of its anchor, size, offset, margins,
//! the parent's internal rect and the older sibling's last draw result.

use crate::foundation::collections::ControlId;
use crate::foundation::math::{Point, Rect};
use crate::ui::widgets::Anchor;

use super::{ControlTree, DrawResult};

impl ControlTree {
    /// Control before this one in its parent's public children
    pub fn control_before(&self, id: ControlId) -> Option<ControlId> {
        let parent = self.get(id)?.parent?;
        let children = self.get(parent)?.children();
        let index = children.iter().position(|child| *child == id)?;
        index.checked_sub(1).and_then(|before| children.get(before).copied())
    }

    /// Size in pixels against the parent's internal rect, stylesheet minimums applied
    pub fn calculate_bounding_rect_size(&self, id: ControlId, parent_internal: Rect) -> Point {
        let Some(control) = self.get(id) else {
            return Point::zeros();
        };
        let size = control.size.to_pixels(parent_internal.size());
        Point::new(
            size.x.max(control.style_sheet.min_width.unwrap_or(0)),
            size.y.max(control.style_sheet.min_height.unwrap_or(0)),
        )
    }

    /// Rect of a control before extra size and padding are applied
    pub fn calculate_bounding_rect(&self, id: ControlId, parent: &DrawResult, sibling: Option<&DrawResult>) -> Rect {
        let Some(control) = self.get(id) else {
            return Rect::default();
        };
        let parent_rect = parent.internal_bounding_rect;
        let anchor = control.anchor;

        let mut margin = self.margin_before(id);
        if anchor.is_auto() {
            if let Some(older) = self.control_before(id) {
                if self.get(older).is_some_and(|older| !older.was_dragged()) {
                    margin += self.margin_after(older);
                }
            }
        }

        let size = self.calculate_bounding_rect_size(id, parent_rect);
        let mut rect = Rect::new(0, 0, size.x, size.y);

        let Some(dragged) = control.drag.dragged_position else {
            let chained = sibling.filter(|sibling| !sibling.was_dragged).map(|sibling| sibling.bounding_rect);
            let (x, y) = anchored_position(anchor, parent_rect, size, margin, chained);
            let offset = control.offset.to_pixels(parent_rect.size());
            let (factor_x, factor_y) = anchor.offset_factor();
            rect.x = x + factor_x * offset.x;
            rect.y = y + factor_y * offset.y;
            return rect;
        };

        match (control.drag.offset_from_parent, control.parent.and_then(|parent| self.get(parent))) {
            (Some(offset), Some(parent)) => {
                let origin = parent.last_internal_bounding_rect.origin() + offset;
                rect.x = origin.x;
                rect.y = origin.y;
            }
            _ => {
                rect.x = dragged.x;
                rect.y = dragged.y;
            }
        }
        rect
    }
}

/// Top-left corner of a rect of `size` placed by `anchor`
fn anchored_position(anchor: Anchor, parent: Rect, size: Point, margin: Point, sibling: Option<Rect>) -> (i32, i32) {
    let center_x = parent.x + parent.width / 2 - size.x / 2;
    let center_y = parent.y + parent.height / 2 - size.y / 2;
    let right = parent.right() - size.x;
    let bottom = parent.bottom() - size.y;
    let below_sibling = sibling.map_or(parent.y, |sibling| sibling.bottom() + margin.y);

    match anchor {
        Anchor::TopLeft => (parent.x, parent.y),
        Anchor::TopCenter => (center_x, parent.y),
        Anchor::TopRight => (right, parent.y),
        Anchor::CenterLeft => (parent.x, center_y),
        Anchor::Center => (center_x, center_y),
        Anchor::CenterRight => (right, center_y),
        Anchor::BottomLeft => (parent.x, bottom),
        Anchor::BottomCenter => (center_x, bottom),
        Anchor::BottomRight => (right, bottom),
        Anchor::AutoLTR => (parent.x, below_sibling),
        Anchor::AutoRTL => (right, below_sibling),
        Anchor::AutoCenter => (center_x, below_sibling),
        Anchor::AutoInlineLTR => inline_position(parent, size, margin, sibling, parent.x, true),
        Anchor::AutoInlineCenter => inline_position(parent, size, margin, sibling, center_x, true),
        Anchor::AutoInlineRTL => inline_position(parent, size, margin, sibling, right, false),
    }
}

/// Inline flow: continue the sibling's row, or wrap to `row_start` on the next row
fn inline_position(
    parent: Rect,
    size: Point,
    margin: Point,
    sibling: Option<Rect>,
    row_start: i32,
    left_to_right: bool,
) -> (i32, i32) {
    let Some(sibling) = sibling else {
        return (row_start, parent.y);
    };
    let x = if left_to_right {
        sibling.right() + margin.x
    } else {
        sibling.left() - size.x - margin.x
    };
    let overflows = if left_to_right {
        x + size.x > parent.right()
    } else {
        x < parent.left()
    };
    if overflows {
        (row_start, sibling.y + sibling.height + margin.y)
    } else {
        (x, sibling.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::foundation::math::Sides;
    use crate::ui::measure::MeasureVector;
    use crate::ui::style::{StyleSheet, StyleSheetState};
    use crate::ui::widgets::Control;

    fn parent_result(rect: Rect) -> DrawResult {
        DrawResult {
            bounding_rect: rect,
            internal_bounding_rect: rect,
            ..DrawResult::default()
        }
    }

    fn sized(tree: &mut ControlTree, anchor: Anchor, width: i32, height: i32) -> ControlId {
        let id = tree.insert(
            Control::generic(Rc::default())
                .with_anchor(anchor)
                .with_size(MeasureVector::pixels(width, height)),
        );
        let root = tree.root();
        tree.add_child(root, id).unwrap();
        id
    }

    #[test]
    fn test_fixed_anchors() {
        let mut tree = ControlTree::new();
        let parent = parent_result(Rect::new(10, 20, 200, 100));
        let cases = [
            (Anchor::TopLeft, (10, 20)),
            (Anchor::TopCenter, (85, 20)),
            (Anchor::TopRight, (160, 20)),
            (Anchor::CenterLeft, (10, 55)),
            (Anchor::Center, (85, 55)),
            (Anchor::CenterRight, (160, 55)),
            (Anchor::BottomLeft, (10, 90)),
            (Anchor::BottomCenter, (85, 90)),
            (Anchor::BottomRight, (160, 90)),
        ];
        for (anchor, (x, y)) in cases {
            let id = sized(&mut tree, anchor, 50, 30);
            let rect = tree.calculate_bounding_rect(id, &parent, None);
            assert_eq!((rect.x, rect.y), (x, y), "{anchor:?}");
            assert_eq!((rect.width, rect.height), (50, 30));
        }
    }

    #[test]
    fn test_offset_points_inward() {
        let mut tree = ControlTree::new();
        let parent = parent_result(Rect::new(0, 0, 200, 100));
        let id = sized(&mut tree, Anchor::BottomRight, 50, 30);
        tree[id].offset = MeasureVector::pixels(5, 7);
        let rect = tree.calculate_bounding_rect(id, &parent, None);
        assert_eq!((rect.x, rect.y), (145, 63));
    }

    #[test]
    fn test_percent_size_and_minimums() {
        let mut tree = ControlTree::new();
        let parent = parent_result(Rect::new(0, 0, 200, 100));
        let sheet = StyleSheet {
            min_height: Some(80),
            ..StyleSheet::default()
        };
        let id = tree.insert(Control::generic(Rc::new(sheet)).with_size(MeasureVector::percents(50.0, 50.0)));
        let root = tree.root();
        tree.add_child(root, id).unwrap();
        let rect = tree.calculate_bounding_rect(id, &parent, None);
        assert_eq!((rect.width, rect.height), (100, 80));
    }

    #[test]
    fn test_auto_flow_chains_with_margins() {
        let mut tree = ControlTree::new();
        let parent = parent_result(Rect::new(0, 0, 200, 200));
        let sheet = Rc::new(StyleSheet {
            default: StyleSheetState {
                margin_after: Some(Point::new(0, 4)),
                margin_before: Some(Point::new(0, 6)),
                ..StyleSheetState::default()
            },
            ..StyleSheet::default()
        });
        let root = tree.root();
        let first = tree.insert(Control::generic(sheet.clone()).with_size(MeasureVector::pixels(50, 20)));
        let second = tree.insert(Control::generic(sheet).with_size(MeasureVector::pixels(50, 20)));
        tree.add_child(root, first).unwrap();
        tree.add_child(root, second).unwrap();

        let first_rect = tree.calculate_bounding_rect(first, &parent, None);
        assert_eq!(first_rect, Rect::new(0, 0, 50, 20));
        let sibling = parent_result(first_rect);
        let second_rect = tree.calculate_bounding_rect(second, &parent, Some(&sibling));
        assert_eq!(second_rect, Rect::new(0, 30, 50, 20));
    }

    #[test]
    fn test_inline_wraps_to_next_row() {
        let mut tree = ControlTree::new();
        let parent = parent_result(Rect::new(0, 0, 100, 100));
        let id = sized(&mut tree, Anchor::AutoInlineLTR, 40, 20);

        let sibling = parent_result(Rect::new(0, 0, 40, 20));
        let rect = tree.calculate_bounding_rect(id, &parent, Some(&sibling));
        assert_eq!((rect.x, rect.y), (40, 0));

        let sibling = parent_result(Rect::new(40, 0, 40, 20));
        let rect = tree.calculate_bounding_rect(id, &parent, Some(&sibling));
        assert_eq!((rect.x, rect.y), (0, 20));
    }

    #[test]
    fn test_inline_rtl_and_center_rows() {
        let mut tree = ControlTree::new();
        let parent = parent_result(Rect::new(0, 0, 100, 100));
        let rtl = sized(&mut tree, Anchor::AutoInlineRTL, 40, 20);
        assert_eq!(tree.calculate_bounding_rect(rtl, &parent, None).x, 60);
        let sibling = parent_result(Rect::new(20, 0, 40, 20));
        let rect = tree.calculate_bounding_rect(rtl, &parent, Some(&sibling));
        assert_eq!((rect.x, rect.y), (60, 20));

        let center = sized(&mut tree, Anchor::AutoInlineCenter, 40, 20);
        assert_eq!(tree.calculate_bounding_rect(center, &parent, None).x, 30);
    }

    #[test]
    fn test_dragged_sibling_breaks_chain() {
        let mut tree = ControlTree::new();
        let parent = parent_result(Rect::new(0, 0, 100, 100));
        let id = sized(&mut tree, Anchor::AutoLTR, 40, 20);
        let sibling = DrawResult {
            was_dragged: true,
            ..parent_result(Rect::new(0, 50, 40, 20))
        };
        let rect = tree.calculate_bounding_rect(id, &parent, Some(&sibling));
        assert_eq!(rect.y, 0);
    }

    #[test]
    fn test_dragged_position_wins() {
        let mut tree = ControlTree::new();
        let parent = parent_result(Rect::new(0, 0, 100, 100));
        let id = sized(&mut tree, Anchor::Center, 40, 20);
        tree[id].drag.dragged_position = Some(Point::new(7, 9));
        let rect = tree.calculate_bounding_rect(id, &parent, None);
        assert_eq!((rect.x, rect.y), (7, 9));

        let root = tree.root();
        tree[root].last_internal_bounding_rect = Rect::new(100, 100, 10, 10);
        tree[id].drag.offset_from_parent = Some(Point::new(3, 4));
        let rect = tree.calculate_bounding_rect(id, &parent, None);
        assert_eq!((rect.x, rect.y), (103, 104));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let mut tree = ControlTree::new();
        let parent = parent_result(Rect::new(3, 5, 321, 123));
        let id = sized(&mut tree, Anchor::AutoCenter, 41, 17);
        tree[id].extra_margin_for_interactions = Sides::uniform(2);
        let a = tree.calculate_bounding_rect(id, &parent, None);
        let b = tree.calculate_bounding_rect(id, &parent, None);
        assert_eq!(a, b);
    }
}
