//! Panel: container with an optional vertical scrollbar
//!
//! The scrollbar is a topmost internal [`super::ControlKind::Slider`]. Its
//! negated value becomes the vertical scroll offset of the panel's children,
//! smoothed over time when `interpolate_scrollbar_offset` is set. With
//! auto-max enabled the panel measures how far its children overshoot its
//! internal rect while drawing and feeds that into the scrollbar's maximum
//! on the next update.

use std::rc::Rc;

use super::core::{Anchor, Orientation};
use super::Control;
use crate::foundation::collections::ControlId;
use crate::foundation::math::{utils, Point, Sides};
use crate::ui::style::StyleSheet;
use crate::ui::tree::{ControlTree, DrawResult, TreeError};

/// Scrollbar state of a panel
#[derive(Debug, Clone, PartialEq)]
pub struct PanelData {
    /// Smooth the scroll offset toward the scrollbar value
    pub interpolate_scrollbar_offset: bool,
    /// Smoothing speed
    pub scrollbar_interpolation_speed: f32,
    pub(crate) vertical_scrollbar: Option<ControlId>,
    pub(crate) scrollbar_offset: f32,
    pub(crate) auto_set_scrollbar_max: bool,
    pub(crate) max_height_for_scrollbar: i32,
}

impl Default for PanelData {
    fn default() -> Self {
        Self {
            interpolate_scrollbar_offset: true,
            scrollbar_interpolation_speed: 10.0,
            vertical_scrollbar: None,
            scrollbar_offset: 0.0,
            auto_set_scrollbar_max: false,
            max_height_for_scrollbar: 1,
        }
    }
}

impl PanelData {
    /// Scrollbar slider, if created
    pub const fn vertical_scrollbar(&self) -> Option<ControlId> {
        self.vertical_scrollbar
    }

    /// Current (possibly smoothed) vertical scroll offset
    pub const fn scrollbar_offset(&self) -> f32 {
        self.scrollbar_offset
    }

    /// Largest child overshoot measured so far
    pub const fn max_height_for_scrollbar(&self) -> i32 {
        self.max_height_for_scrollbar
    }
}

impl ControlTree {
    /// Create a panel and append it to `parent`
    pub fn create_panel(&mut self, parent: ControlId, style_sheet: Rc<StyleSheet>) -> Result<ControlId, TreeError> {
        self.create(parent, super::ControlKind::Panel(PanelData::default()), style_sheet)
    }

    fn panel_data(&self, id: ControlId) -> Result<&PanelData, TreeError> {
        self.get(id)
            .ok_or(TreeError::MissingControl(id))?
            .as_panel()
            .ok_or(TreeError::NotAPanel(id))
    }

    /// Scrollbar of a panel
    pub fn vertical_scrollbar(&self, panel: ControlId) -> Option<ControlId> {
        self.get(panel)
            .and_then(Control::as_panel)
            .and_then(PanelData::vertical_scrollbar)
    }

    /// Give `panel` a vertical scrollbar, replacing an existing one.
    ///
    /// The scrollbar is anchored top-right, stays off the auto-flow chain,
    /// ignores the scroll offset and starts at value 0 with max 0.
    pub fn create_vertical_scrollbar(
        &mut self,
        panel: ControlId,
        style_sheet: Rc<StyleSheet>,
        handle_style_sheet: Rc<StyleSheet>,
        auto_set_scrollbar_max: bool,
    ) -> Result<ControlId, TreeError> {
        self.panel_data(panel)?;
        self.remove_vertical_scrollbar(panel)?;

        let scrollbar = self.create_slider(Orientation::Vertical, style_sheet, handle_style_sheet);
        self.set_slider_range(scrollbar, 0, 0)?;
        if let Some(control) = self.get_mut(scrollbar) {
            control.anchor = Anchor::TopRight;
            control.include_in_internal_auto_anchor_calculation = false;
            control.ignore_scroll_offset = true;
            if let Some(data) = control.as_slider_mut() {
                data.flipped_direction = true;
                data.mouse_wheel_step = -1;
            }
        }
        self.add_internal_child(panel, scrollbar, true)?;
        if let Some(data) = self.get_mut(panel).and_then(Control::as_panel_mut) {
            data.vertical_scrollbar = Some(scrollbar);
            data.auto_set_scrollbar_max = auto_set_scrollbar_max;
        }
        log::debug!("Created vertical scrollbar {scrollbar:?} for panel {panel:?}");
        Ok(scrollbar)
    }

    /// Destroy the panel's scrollbar, if any
    pub fn remove_vertical_scrollbar(&mut self, panel: ControlId) -> Result<(), TreeError> {
        let Some(scrollbar) = self.panel_data(panel)?.vertical_scrollbar else {
            return Ok(());
        };
        if let Some(data) = self.get_mut(panel).and_then(Control::as_panel_mut) {
            data.vertical_scrollbar = None;
            data.scrollbar_offset = 0.0;
        }
        if self.contains(scrollbar) {
            self.destroy(scrollbar)?;
        }
        Ok(())
    }

    /// Scroll a panel (or a slider) to its end
    pub fn scroll_to_end(&mut self, id: ControlId) -> Result<(), TreeError> {
        let control = self.get(id).ok_or(TreeError::MissingControl(id))?;
        if let Some(data) = control.as_panel() {
            return match data.vertical_scrollbar {
                Some(scrollbar) => self.slider_scroll_to_end(scrollbar),
                None => Ok(()),
            };
        }
        self.slider_scroll_to_end(id)
    }

    /// Scrollbar that should take wheel input for this panel
    pub(crate) fn panel_wheel_target(&self, id: ControlId) -> Option<ControlId> {
        self.vertical_scrollbar(id)
            .filter(|scrollbar| self.get(*scrollbar).is_some_and(|control| control.visible))
    }

    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn update_panel(&mut self, id: ControlId, dt: f32) {
        let Ok(data) = self.panel_data(id) else {
            return;
        };
        let Some(scrollbar) = data.vertical_scrollbar else {
            return;
        };
        let auto_max = data.auto_set_scrollbar_max;
        let max_height = data.max_height_for_scrollbar;
        let interpolate = data.interpolate_scrollbar_offset;
        let speed = data.scrollbar_interpolation_speed;
        let offset = data.scrollbar_offset;
        if !self.is_currently_visible(id) {
            return;
        }

        if auto_max && max_height > 1 {
            if let Err(err) = self.set_slider_max(scrollbar, max_height) {
                log::warn!("Scrollbar {scrollbar:?} max not updated: {err}");
            }
            if let Some(control) = self.get_mut(scrollbar) {
                control.enabled = true;
                if let Some(slider) = control.as_slider_mut() {
                    slider.mouse_wheel_step = -utils::clamp(max_height / 10, 1, 100);
                }
            }
        }

        let target = -(self.slider_value(scrollbar).unwrap_or(0) as f32);
        let offset = if interpolate {
            utils::lerp(offset, target, dt * speed)
        } else {
            target
        };
        if let Some(data) = self.get_mut(id).and_then(Control::as_panel_mut) {
            data.scrollbar_offset = offset;
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn panel_scroll_offset(&self, id: ControlId) -> Point {
        match self.get(id).and_then(Control::as_panel) {
            Some(data) if data.vertical_scrollbar.is_some() => Point::new(0, data.scrollbar_offset as i32),
            _ => Point::zeros(),
        }
    }

    pub(crate) fn panel_scroll_padding(&self, id: ControlId) -> Sides {
        let Some(scrollbar) = self.panel_wheel_target(id) else {
            return Sides::ZERO;
        };
        let Some(control) = self.get(scrollbar) else {
            return Sides::ZERO;
        };
        let width = control.last_bounding_rect.width;
        if control.anchor.is_left_edge() {
            Sides::new(width + self.margin_after(scrollbar).x, 0, 0, 0)
        } else if control.anchor.is_right_edge() {
            Sides::new(0, width + self.margin_before(scrollbar).x, 0, 0)
        } else {
            Sides::ZERO
        }
    }

    pub(crate) fn panel_post_drawing_child(&mut self, id: ControlId, result: &DrawResult) {
        let Some(control) = self.get_mut(id) else {
            return;
        };
        let internal = control.last_internal_bounding_rect;
        if let Some(data) = control.as_panel_mut() {
            if data.auto_set_scrollbar_max && data.vertical_scrollbar.is_some() {
                data.max_height_for_scrollbar = data
                    .max_height_for_scrollbar
                    .max(result.bounding_rect.bottom() - internal.top() - internal.height);
            }
        }
    }
}
