//! Drawing pass
//!
//! Draws a control, then its internal children, public children and topmost
//! internal children, threading each draw result to the next sibling. The
//! first draw of a control runs two dry passes under a 1x1 scissor so that
//! auto-flow and auto-size geometry is settled before anything is visible.

use crate::events::ControlEvent;
use crate::foundation::collections::ControlId;
use crate::foundation::math::{Color, Point, Rect, Sides};
use crate::ui::backend::Renderer;
use crate::ui::style::{StretchedTexture, StyleProperty};
use crate::ui::widgets::{ControlFrame, ControlKind, ControlState, OverflowMode};

use super::ControlTree;

/// Scissor region used to suppress output during dry runs
const DRY_RUN_SCISSOR: Rect = Rect::new(0, 0, 1, 1);

/// Growth applied to the internal rect when clipping overflow
const OVERFLOW_SCISSOR_MARGIN: i32 = 2;

/// Geometry produced by drawing a control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawResult {
    /// Bounding rect, extra size included
    pub bounding_rect: Rect,
    /// Bounding rect minus padding
    pub internal_bounding_rect: Rect,
    /// Scroll offset applied to the control's children
    pub scroll_offset: Point,
    /// True if the control sits at a dragged position
    pub was_dragged: bool,
}

impl DrawResult {
    /// Result covering `rect`, used to seed the root
    pub fn covering(rect: Rect) -> Self {
        Self {
            bounding_rect: rect,
            internal_bounding_rect: rect,
            ..Self::default()
        }
    }
}

impl ControlTree {
    /// Draw the whole tree against the renderer's screen bounds, then run post-draw actions
    pub fn draw(&mut self, renderer: &mut dyn Renderer) {
        self.scissor_stack.clear();
        renderer.clear_scissor_region();
        let seed = DrawResult::covering(renderer.screen_bounds());
        let root = self.root();
        self.draw_control(root, &seed, None, false, renderer);
        self.run_post_draw_actions(renderer);
    }

    /// Draw a control and its subtree
    pub(crate) fn draw_control(
        &mut self,
        id: ControlId,
        parent: &DrawResult,
        sibling: Option<&DrawResult>,
        dry_run: bool,
        renderer: &mut dyn Renderer,
    ) -> DrawResult {
        let Some(control) = self.get_mut(id) else {
            return DrawResult::default();
        };
        if !control.visible {
            return DrawResult::default();
        }
        if control.first_draw_call && !dry_run {
            control.first_draw_call = false;
            self.draw_control(id, parent, sibling, true, renderer);
            self.draw_control(id, parent, sibling, true, renderer);
        }
        self.fire(id, ControlEvent::BeforeDraw);

        let scissor_before = renderer.scissor_region();
        if dry_run {
            renderer.set_scissor_region(DRY_RUN_SCISSOR);
        }

        let mut self_rect = self.draw_self(id, parent, sibling, renderer);

        let Some(control) = self.get_mut(id) else {
            restore_scissor(renderer, scissor_before);
            return self_rect;
        };
        control.last_bounding_rect = self_rect.bounding_rect;
        control.last_internal_bounding_rect = self_rect.internal_bounding_rect;
        control.last_visible_bounding_rect =
            scissor_before.map_or(self_rect.bounding_rect, |region| self_rect.bounding_rect.intersection(&region));
        let hide_overflow = !dry_run && control.overflow_mode == OverflowMode::HideOverflow;
        let (auto_width, auto_height) = (control.auto_width, control.auto_height);
        let internal_children = control.internal_children.clone();
        let top_most_children = control.internal_children_top_most.clone();

        let mut pushed_scissor = false;
        if hide_overflow {
            let mut region = self_rect.internal_bounding_rect.inflated(OVERFLOW_SCISSOR_MARGIN);
            if let Some(current) = renderer.scissor_region() {
                self.scissor_stack.push(current);
                pushed_scissor = true;
                region = region.intersection(&current);
            }
            renderer.set_scissor_region(region);
        }

        self.draw_internal_children(&internal_children, &self_rect, Some(true), dry_run, renderer);

        let scrolled = self.scrolled_rect(id, &self_rect);
        self_rect.scroll_offset = scrolled.scroll_offset;
        self.draw_internal_children(&internal_children, &scrolled, Some(false), dry_run, renderer);

        let mut max_size = Point::zeros();
        let mut sibling_result: Option<DrawResult> = None;
        self.lock_children(id);
        let mut index = 0;
        while let Some(child) = self.child_at(id, index) {
            index += 1;
            let Some(child_control) = self.get(child) else {
                continue;
            };
            if !child_control.visible {
                continue;
            }
            let base = if child_control.ignore_scroll_offset { self_rect } else { scrolled };
            let result = self.draw_control(child, &base, sibling_result.as_ref(), dry_run, renderer);
            sibling_result = Some(result);
            self.panel_post_drawing_child(id, &result);

            if auto_width || auto_height {
                let margin = self.margin_after(child);
                let bounding = self_rect.bounding_rect;
                let internal = self_rect.internal_bounding_rect;
                if auto_width {
                    max_size.x = max_size
                        .x
                        .max(margin.x + result.bounding_rect.right() - bounding.left() + (bounding.width - internal.width) / 2);
                }
                if auto_height {
                    max_size.y = max_size
                        .y
                        .max(margin.y + result.bounding_rect.bottom() - bounding.top() + (bounding.height - internal.height) / 2);
                }
            }
        }
        self.unlock_children(id);

        self.draw_internal_children(&top_most_children, &self_rect, None, dry_run, renderer);

        if dry_run {
            restore_scissor(renderer, scissor_before);
        }
        if hide_overflow {
            let previous = if pushed_scissor { self.scissor_stack.pop() } else { None };
            restore_scissor(renderer, previous);
        }

        if let Some(control) = self.get_mut(id) {
            if auto_width {
                control.size.x.set_pixels(max_size.x);
            }
            if auto_height {
                control.size.y.set_pixels(max_size.y);
            }
        }

        self.fire(id, ControlEvent::AfterDraw);
        self_rect
    }

    /// Draw internal children; `scroll_filter` selects by `ignore_scroll_offset`
    fn draw_internal_children(
        &mut self,
        children: &[ControlId],
        base: &DrawResult,
        scroll_filter: Option<bool>,
        dry_run: bool,
        renderer: &mut dyn Renderer,
    ) {
        let mut sibling: Option<DrawResult> = None;
        for &child in children {
            let Some(control) = self.get(child) else {
                continue;
            };
            if !control.visible || scroll_filter.is_some_and(|ignore| control.ignore_scroll_offset != ignore) {
                continue;
            }
            let include = control.include_in_internal_auto_anchor_calculation;
            let result = self.draw_control(child, base, sibling.as_ref(), dry_run, renderer);
            if include {
                sibling = Some(result);
            }
        }
    }

    /// Result used to place scrolled children: offset applied, scrollbar space reserved
    fn scrolled_rect(&self, id: ControlId, self_rect: &DrawResult) -> DrawResult {
        let offset = self.panel_scroll_offset(id);
        let padding = self.panel_scroll_padding(id);
        let mut scrolled = *self_rect;
        scrolled.scroll_offset = offset;
        scrolled.bounding_rect = scrolled.bounding_rect.translated(offset);
        scrolled.internal_bounding_rect = scrolled.internal_bounding_rect.translated(offset).shrunk(padding);
        scrolled
    }

    /// Compute own geometry and draw fill, custom content and outline
    fn draw_self(
        &mut self,
        id: ControlId,
        parent: &DrawResult,
        sibling: Option<&DrawResult>,
        renderer: &mut dyn Renderer,
    ) -> DrawResult {
        let rect = self.calculate_bounding_rect(id, parent, sibling);
        let bounding_rect = rect.expanded(self.extra_size(id));
        let internal_bounding_rect = bounding_rect.shrunk(self.padding(id));

        self.draw_fill_textures(id, bounding_rect, renderer);

        let state = self.state(id);
        let was_dragged = self.get(id).is_some_and(|control| control.was_dragged());
        if let Some(control) = self.get_mut(id) {
            if let ControlKind::Custom(behavior) = &mut control.kind {
                let frame = ControlFrame {
                    state,
                    bounding_rect,
                    internal_rect: internal_bounding_rect,
                };
                behavior.draw(renderer, &frame);
            }
        }

        self.draw_box_outline(id, bounding_rect, renderer);

        DrawResult {
            bounding_rect,
            internal_bounding_rect,
            scroll_offset: Point::zeros(),
            was_dragged,
        }
    }

    fn draw_box_outline(&self, id: ControlId, rect: Rect, renderer: &mut dyn Renderer) {
        let width: Sides = self.style_property(id, StyleProperty::BoxOutlineWidth, Sides::ZERO);
        if !width.any_positive() {
            return;
        }
        let color = self.style_property(id, StyleProperty::BoxOutlineColor, Color::WHITE);
        if color.a == 0 {
            return;
        }
        let offset = self.style_property(id, StyleProperty::BoxOutlineOffset, Point::zeros());
        let left = offset.x + rect.left() - width.left;
        let full_width = rect.width + width.left + width.right;
        if width.top > 0 {
            renderer.draw_rectangle(Rect::new(left, offset.y + rect.top() - width.top, full_width, width.top), color);
        }
        if width.bottom > 0 {
            renderer.draw_rectangle(Rect::new(left, offset.y + rect.bottom(), full_width, width.bottom), color);
        }
        if width.left > 0 {
            renderer.draw_rectangle(Rect::new(left, offset.y + rect.top(), width.left, rect.height), color);
        }
        if width.right > 0 {
            renderer.draw_rectangle(
                Rect::new(offset.x + rect.right(), offset.y + rect.top(), width.right, rect.height),
                color,
            );
        }
    }

    fn draw_fill_textures(&self, id: ControlId, rect: Rect, renderer: &mut dyn Renderer) {
        let Some(control) = self.get(id) else {
            return;
        };
        if !control.draw_fill_texture {
            return;
        }
        let state = self.state(id);
        let transition = control.transition;
        if control.style_sheet.interpolates_states() && transition.progress < 1.0 {
            // fade in when the control appears, cross-fade on a real change
            if transition.previous == state && state == ControlState::Default {
                self.draw_state_fill(id, state, rect, transition.progress, renderer);
            } else {
                self.draw_state_fill(id, transition.previous, rect, 1.0, renderer);
                self.draw_state_fill(id, state, rect, transition.progress, renderer);
            }
        } else {
            self.draw_state_fill(id, state, rect, 1.0, renderer);
        }
    }

    fn draw_state_fill(&self, id: ControlId, state: ControlState, rect: Rect, alpha: f32, renderer: &mut dyn Renderer) {
        let Some(control) = self.get(id) else {
            return;
        };
        let sheet = &control.style_sheet;
        let overrides = Some(&control.override_styles);
        let mut tint = sheet.get_property(StyleProperty::TintColor, state, Color::WHITE, overrides);
        let mut background = sheet.get_property(StyleProperty::BackgroundColor, state, Color::TRANSPARENT, overrides);
        if let Some(animator) = &control.color_animator {
            tint = animator(control, tint);
        }
        if alpha < 1.0 {
            tint = tint.scale_alpha(alpha);
            background = background.scale_alpha(alpha);
        }

        if background.a > 0 {
            renderer.draw_rectangle(rect, background);
        }
        if tint.a == 0 {
            return;
        }
        let effect: Option<String> = sheet.get_property(StyleProperty::EffectIdentifier, state, None, overrides);
        let texture: Option<StretchedTexture> = sheet.get_property(StyleProperty::FillTexture, state, None, overrides);
        if let Some(texture) = texture {
            renderer.draw_texture(effect.as_deref(), &texture.texture_id, rect, texture.source_rect, tint);
        }
    }
}

fn restore_scissor(renderer: &mut dyn Renderer, region: Option<Rect>) {
    match region {
        Some(region) => renderer.set_scissor_region(region),
        None => renderer.clear_scissor_region(),
    }
}
