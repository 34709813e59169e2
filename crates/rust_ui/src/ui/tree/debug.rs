//! Debug overlay: colour-coded rects, margins, anchors and drag handles

use crate::foundation::collections::ControlId;
use crate::foundation::math::{utils, Color, Point, Rect};
use crate::ui::backend::Renderer;
use crate::ui::widgets::Anchor;

use super::ControlTree;

const LOCKED_FILL: Color = Color::rgba(255, 0, 50, 65);
const DISABLED_FILL: Color = Color::rgba(255, 0, 255, 65);
const INTERACTABLE_FILL: Color = Color::rgba(0, 255, 0, 50);
const CLICK_THROUGH_FILL: Color = Color::rgba(10, 0, 175, 50);
const PASSIVE_FILL: Color = Color::rgba(0, 155, 0, 50);
const MARGIN_COLOR: Color = Color::rgba(255, 255, 0, 100);
const ANCHOR_COLOR: Color = Color::rgba(255, 0, 0, 200);
const DRAG_HANDLE_COLOR: Color = Color::rgba(255, 255, 0, 255);
const MARKER_SIZE: i32 = 12;
const MARGIN_THICKNESS: i32 = 8;

impl ControlTree {
    /// Draw the debug overlay for `id`, and its public children if `recursive`
    pub fn debug_draw(&mut self, id: ControlId, recursive: bool, renderer: &mut dyn Renderer) {
        let Some(control) = self.get(id) else {
            return;
        };
        if !control.visible {
            return;
        }
        let bounding = control.last_bounding_rect;
        let internal = control.last_internal_bounding_rect;
        let anchor = control.anchor;
        let handle = control.drag.handle_position;
        let interactable = self.is_interactable(id);
        let solid = interactable && !control.ignore_interactions;

        let fill = if self.is_currently_locked(id) {
            LOCKED_FILL
        } else if self.is_currently_disabled(id) {
            DISABLED_FILL
        } else if self.is_targeted(id) {
            self.targeted_debug_fill()
        } else if interactable {
            INTERACTABLE_FILL
        } else if control.ignore_interactions {
            CLICK_THROUGH_FILL
        } else {
            PASSIVE_FILL
        };

        renderer.draw_rectangle(internal, fill);
        if solid {
            renderer.draw_rectangle(bounding, fill);
        }

        let before = self.margin_before(id);
        let after = self.margin_after(id);
        let mid_x = bounding.x + bounding.width / 2 - MARGIN_THICKNESS / 2;
        let mid_y = bounding.y + bounding.height / 2 - MARGIN_THICKNESS / 2;
        if before.x > 0 {
            renderer.draw_rectangle(
                Rect::new(bounding.x - before.x, mid_y, before.x, MARGIN_THICKNESS),
                MARGIN_COLOR,
            );
        }
        if before.y > 0 {
            renderer.draw_rectangle(
                Rect::new(mid_x, bounding.y - before.y, MARGIN_THICKNESS, before.y),
                MARGIN_COLOR,
            );
        }
        if after.x > 0 {
            renderer.draw_rectangle(Rect::new(bounding.right(), mid_y, after.x, MARGIN_THICKNESS), MARGIN_COLOR);
        }
        if after.y > 0 {
            renderer.draw_rectangle(Rect::new(mid_x, bounding.bottom(), MARGIN_THICKNESS, after.y), MARGIN_COLOR);
        }

        if let Some(point) = anchor_marker(anchor, bounding) {
            renderer.draw_rectangle(marker(point), ANCHOR_COLOR);
        }

        if recursive {
            self.iterate_children(id, |tree, child| {
                tree.debug_draw(child, true, renderer);
                true
            });
        }

        if let Some(point) = handle {
            renderer.draw_rectangle(marker(point), DRAG_HANDLE_COLOR);
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn targeted_debug_fill(&self) -> Color {
        let pulse = utils::clamp(100.0 + 155.0 * (self.elapsed_time() * 5.0).sin(), 0.0, 255.0) as u8;
        Color::rgba(255 - pulse, 255, pulse, 50)
    }
}

/// Point on the bounding rect that a fixed anchor refers to
fn anchor_marker(anchor: Anchor, rect: Rect) -> Option<Point> {
    let (x, y) = match anchor {
        Anchor::TopLeft => (rect.left(), rect.top()),
        Anchor::TopCenter => (rect.left() + rect.width / 2, rect.top()),
        Anchor::TopRight => (rect.right(), rect.top()),
        Anchor::CenterLeft => (rect.left(), rect.top() + rect.height / 2),
        Anchor::Center => (rect.left() + rect.width / 2, rect.top() + rect.height / 2),
        Anchor::CenterRight => (rect.right(), rect.top() + rect.height / 2),
        Anchor::BottomLeft => (rect.left(), rect.bottom()),
        Anchor::BottomCenter => (rect.left() + rect.width / 2, rect.bottom()),
        Anchor::BottomRight => (rect.right(), rect.bottom()),
        _ => return None,
    };
    Some(Point::new(x, y))
}

fn marker(point: Point) -> Rect {
    Rect::new(
        point.x - MARKER_SIZE / 2,
        point.y - MARKER_SIZE / 2,
        MARKER_SIZE,
        MARKER_SIZE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::testing::RecordingRenderer;
    use crate::ui::measure::MeasureVector;
    use crate::ui::widgets::Control;

    #[test]
    fn test_overlay_colours_and_anchor_marker() {
        let mut renderer = RecordingRenderer::new(800, 600);
        let mut tree = ControlTree::new();
        let root = tree.root();
        tree[root].size = MeasureVector::pixels(800, 600);
        let locked = tree.insert(
            Control::generic(Rc::default())
                .with_anchor(Anchor::TopLeft)
                .with_size(MeasureVector::pixels(10, 10)),
        );
        tree.add_child(root, locked).unwrap();
        tree[locked].locked = true;
        tree.draw(&mut renderer);
        renderer.clear();

        tree.debug_draw(root, true, &mut renderer);
        assert!(renderer
            .rectangles
            .contains(&(Rect::new(0, 0, 10, 10), LOCKED_FILL)));
        assert!(renderer
            .rectangles
            .contains(&(Rect::new(-6, -6, 12, 12), ANCHOR_COLOR)));
    }

    #[test]
    fn test_auto_anchors_have_no_marker() {
        assert_eq!(anchor_marker(Anchor::AutoLTR, Rect::new(0, 0, 10, 10)), None);
        assert_eq!(
            anchor_marker(Anchor::BottomRight, Rect::new(0, 0, 10, 10)),
            Some(Point::new(10, 10))
        );
    }
}
