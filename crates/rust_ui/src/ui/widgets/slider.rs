//! Slider: integer value picker backed by a draggable handle
//!
//! Sliders are also the scrollbars of panels. The handle is an internal
//! child that mirrors the slider's state and forwards its interactions to
//! the slider.

use std::rc::Rc;

use super::control::{Control, ControlKind};
use super::core::{Anchor, Orientation};
use crate::events::ControlEvent;
use crate::foundation::collections::ControlId;
use crate::foundation::math::{utils, Point};
use crate::ui::measure::{MeasureUnit, MeasureVector, Measurement};
use crate::ui::style::StyleSheet;
use crate::ui::tree::{ControlTree, TreeError};

/// Default thickness of sliders and handles, in pixels
const DEFAULT_THICKNESS: i32 = 24;

/// Value state shared by sliders and progress bars
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliderData {
    /// Axis of the slider
    pub orientation: Orientation,
    /// Reverse the mapping between value and handle position
    pub flipped_direction: bool,
    /// Value change per wheel tick
    pub mouse_wheel_step: i32,
    pub(crate) handle: ControlId,
    pub(crate) value: i32,
    pub(crate) min_value: i32,
    pub(crate) max_value: i32,
}

impl SliderData {
    pub(crate) const fn new(orientation: Orientation, handle: ControlId) -> Self {
        Self {
            orientation,
            flipped_direction: false,
            mouse_wheel_step: 1,
            handle,
            value: 0,
            min_value: 0,
            max_value: 10,
        }
    }

    /// Handle (or fill) control
    pub const fn handle(&self) -> ControlId {
        self.handle
    }

    /// Current value
    pub const fn value(&self) -> i32 {
        self.value
    }

    /// Lower bound
    pub const fn min_value(&self) -> i32 {
        self.min_value
    }

    /// Upper bound
    pub const fn max_value(&self) -> i32 {
        self.max_value
    }

    /// `max - min`
    pub const fn value_range(&self) -> i32 {
        self.max_value - self.min_value
    }

    /// Value mapped to 0..=1, 0 for an empty range
    #[allow(clippy::cast_precision_loss)]
    pub fn value_percent(&self) -> f32 {
        let range = self.value_range();
        if range <= 0 {
            0.0
        } else {
            (self.value - self.min_value) as f32 / range as f32
        }
    }

    pub(crate) fn default_size(&self) -> MeasureVector {
        match self.orientation {
            Orientation::Horizontal => MeasureVector {
                x: Measurement::percents(100.0),
                y: Measurement::pixels(DEFAULT_THICKNESS),
            },
            Orientation::Vertical => MeasureVector {
                x: Measurement::pixels(DEFAULT_THICKNESS),
                y: Measurement::percents(100.0),
            },
        }
    }
}

/// Step a measurement toward `target`, keeping `unit`
fn approach(current: Measurement, target: f32, factor: f32, unit: MeasureUnit) -> Measurement {
    let start = if current.unit == unit { current.value } else { target };
    Measurement {
        value: utils::lerp(start, target, factor),
        unit,
    }
}

impl ControlTree {
    /// Create a detached slider with its handle
    pub fn create_slider(
        &mut self,
        orientation: Orientation,
        style_sheet: Rc<StyleSheet>,
        handle_style_sheet: Rc<StyleSheet>,
    ) -> ControlId {
        self.create_slider_kind(orientation, style_sheet, handle_style_sheet, false)
    }

    pub(crate) fn create_slider_kind(
        &mut self,
        orientation: Orientation,
        style_sheet: Rc<StyleSheet>,
        handle_style_sheet: Rc<StyleSheet>,
        progress_bar: bool,
    ) -> ControlId {
        let mut handle = Control::generic(Rc::clone(&handle_style_sheet));
        let cross_default = |declared: Option<Measurement>| declared.unwrap_or_else(|| Measurement::percents(100.0));
        if progress_bar {
            handle.size = match orientation {
                Orientation::Horizontal => MeasureVector {
                    x: Measurement::percents(0.0),
                    y: cross_default(handle_style_sheet.default_height),
                },
                Orientation::Vertical => MeasureVector {
                    x: cross_default(handle_style_sheet.default_width),
                    y: Measurement::percents(0.0),
                },
            };
            handle.ignore_interactions = true;
        } else {
            handle.size = MeasureVector {
                x: handle_style_sheet
                    .default_width
                    .unwrap_or_else(|| Measurement::pixels(DEFAULT_THICKNESS)),
                y: handle_style_sheet
                    .default_height
                    .unwrap_or_else(|| Measurement::pixels(DEFAULT_THICKNESS)),
            };
        }
        handle.anchor = handle_style_sheet
            .default_anchor
            .or(if progress_bar { style_sheet.default_anchor } else { None })
            .unwrap_or(match orientation {
                Orientation::Horizontal => Anchor::CenterLeft,
                Orientation::Vertical => Anchor::TopCenter,
            });
        let handle = self.insert(handle);

        let data = SliderData::new(orientation, handle);
        let mut slider = Control::new(
            if progress_bar {
                ControlKind::ProgressBar(data)
            } else {
                ControlKind::Slider(data)
            },
            style_sheet,
        );
        slider.ignore_interactions = progress_bar;
        let slider = self.insert(slider);

        if let Some(handle) = self.get_mut(handle) {
            handle.copy_state_from = Some(slider);
            handle.transfer_interactions_to = Some(slider);
            handle.parent = Some(slider);
        }
        if let Some(control) = self.get_mut(slider) {
            control.internal_children.push(handle);
        }
        slider
    }

    fn slider(&self, id: ControlId) -> Result<&SliderData, TreeError> {
        self.get(id)
            .ok_or(TreeError::MissingControl(id))?
            .as_slider()
            .ok_or(TreeError::NotASlider(id))
    }

    /// Current value of a slider or progress bar
    pub fn slider_value(&self, id: ControlId) -> Option<i32> {
        self.get(id).and_then(Control::as_slider).map(SliderData::value)
    }

    /// Set the value (clamped to the range). Fires `OnValueChanged` on change.
    pub fn set_slider_value(&mut self, id: ControlId, value: i32) -> Result<(), TreeError> {
        let data = self.slider(id)?;
        let value = utils::clamp(value, data.min_value, data.max_value);
        if value == data.value {
            return Ok(());
        }
        if let Some(data) = self.get_mut(id).and_then(Control::as_slider_mut) {
            data.value = value;
        }
        self.fire(id, ControlEvent::OnValueChanged);
        Ok(())
    }

    /// Set the range; `max` below `min` collapses to `min`. The value is re-clamped.
    pub fn set_slider_range(&mut self, id: ControlId, min: i32, max: i32) -> Result<(), TreeError> {
        let value = self.slider(id)?.value;
        if let Some(data) = self.get_mut(id).and_then(Control::as_slider_mut) {
            data.min_value = min;
            data.max_value = max.max(min);
        }
        self.set_slider_value(id, value)
    }

    /// Set the upper bound, keeping the lower one
    pub fn set_slider_max(&mut self, id: ControlId, max: i32) -> Result<(), TreeError> {
        let min = self.slider(id)?.min_value;
        self.set_slider_range(id, min, max)
    }

    /// Jump to the maximum value
    pub fn slider_scroll_to_end(&mut self, id: ControlId) -> Result<(), TreeError> {
        let max = self.slider(id)?.max_value;
        self.set_slider_value(id, max)
    }

    pub(crate) fn slider_wheel_scroll(&mut self, id: ControlId, delta: i32) {
        if self.is_currently_disabled(id) || self.is_currently_locked(id) {
            return;
        }
        if let Ok(data) = self.slider(id) {
            let value = data.value + delta * data.mouse_wheel_step;
            if let Err(err) = self.set_slider_value(id, value) {
                log::warn!("Wheel scroll on slider {id:?} failed: {err}");
            }
        }
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub(crate) fn set_slider_value_from_pointer(&mut self, id: ControlId, point: Point) {
        let Some(control) = self.get(id) else {
            return;
        };
        let Some(data) = control.as_slider() else {
            return;
        };
        let rect = control.last_internal_bounding_rect;
        let handle = self
            .get(data.handle)
            .map(Control::last_bounding_rect)
            .unwrap_or_default();

        let relative = match data.orientation {
            Orientation::Horizontal => {
                let track = (rect.width - handle.width).max(1);
                let position = (point.x - rect.x - handle.width / 2) as f32 / track as f32;
                if data.flipped_direction {
                    1.0 - position
                } else {
                    position
                }
            }
            Orientation::Vertical => {
                let track = (rect.height - handle.height).max(1);
                let position = (point.y - rect.y - handle.height / 2) as f32 / track as f32;
                if data.flipped_direction {
                    position
                } else {
                    1.0 - position
                }
            }
        };
        let relative = utils::clamp(relative, 0.0, 1.0);
        let value = data.min_value + (relative * data.value_range() as f32).round() as i32;
        if let Err(err) = self.set_slider_value(id, value) {
            log::warn!("Pointer value on slider {id:?} failed: {err}");
        }
    }

    /// Move the handle (or resize the fill) to match the value
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn update_slider(&mut self, id: ControlId, dt: f32) {
        let Some(control) = self.get(id) else {
            return;
        };
        let Some(data) = control.as_slider() else {
            return;
        };
        let progress_bar = matches!(control.kind, ControlKind::ProgressBar(_));
        let ignore_interactions = control.ignore_interactions;
        let speed = control.style_sheet.interpolate_offsets_speed.unwrap_or(0.0);
        let factor = if speed > 0.0 { (dt * speed).min(1.0) } else { 1.0 };
        let rect = control.last_internal_bounding_rect;
        let percent = data.value_percent();
        let orientation = data.orientation;
        let flipped = data.flipped_direction;
        let handle_id = data.handle;

        let Some(handle) = self.get_mut(handle_id) else {
            return;
        };
        if progress_bar {
            handle.ignore_interactions = ignore_interactions;
            let target = percent * 100.0;
            match orientation {
                Orientation::Horizontal => {
                    handle.size.x = approach(handle.size.x, target, factor, MeasureUnit::PercentOfParent);
                }
                Orientation::Vertical => {
                    handle.size.y = approach(handle.size.y, target, factor, MeasureUnit::PercentOfParent);
                }
            }
            return;
        }

        let handle_rect = handle.last_bounding_rect;
        match orientation {
            Orientation::Horizontal => {
                let position = if flipped { 1.0 - percent } else { percent };
                let target = position * (rect.width - handle_rect.width).max(0) as f32;
                handle.offset.x = approach(handle.offset.x, target, factor, MeasureUnit::Pixels);
            }
            Orientation::Vertical => {
                let position = if flipped { percent } else { 1.0 - percent };
                let target = position * (rect.height - handle_rect.height).max(0) as f32;
                handle.offset.y = approach(handle.offset.y, target, factor, MeasureUnit::Pixels);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::cell::RefCell;

    #[test]
    fn test_value_is_clamped_and_fires_on_change() {
        let mut tree = ControlTree::new();
        let slider = tree.create_slider(Orientation::Horizontal, Rc::default(), Rc::default());
        let changes = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&changes);
        tree[slider]
            .events
            .on(ControlEvent::OnValueChanged, move |_, _| *counter.borrow_mut() += 1);

        tree.set_slider_value(slider, 50).unwrap();
        assert_eq!(tree.slider_value(slider), Some(10));
        tree.set_slider_value(slider, 10).unwrap();
        assert_eq!(*changes.borrow(), 1);

        tree.set_slider_max(slider, 4).unwrap();
        assert_eq!(tree.slider_value(slider), Some(4));
        assert_eq!(*changes.borrow(), 2);
    }

    #[test]
    fn test_value_percent() {
        let mut tree = ControlTree::new();
        let slider = tree.create_slider(Orientation::Horizontal, Rc::default(), Rc::default());
        tree.set_slider_range(slider, 10, 20).unwrap();
        tree.set_slider_value(slider, 15).unwrap();
        let data = tree[slider].as_slider().unwrap();
        assert_relative_eq!(data.value_percent(), 0.5);
        assert_eq!(data.value_range(), 10);
    }

    #[test]
    fn test_handle_mirrors_slider() {
        let mut tree = ControlTree::new();
        let slider = tree.create_slider(Orientation::Vertical, Rc::default(), Rc::default());
        let handle = tree[slider].as_slider().unwrap().handle();
        assert_eq!(tree[handle].copy_state_from, Some(slider));
        assert_eq!(tree[handle].transfer_interactions_to, Some(slider));
        assert_eq!(tree[handle].anchor, Anchor::TopCenter);
        assert_eq!(tree[handle].parent(), Some(slider));
        assert_eq!(tree[slider].internal_children(), &[handle]);
    }

    #[test]
    fn test_wheel_scroll_uses_step_and_respects_disabled() {
        let mut tree = ControlTree::new();
        let root = tree.root();
        let slider = tree.create_slider(Orientation::Horizontal, Rc::default(), Rc::default());
        tree.add_child(root, slider).unwrap();
        if let Some(data) = tree[slider].as_slider_mut() {
            data.mouse_wheel_step = 2;
        }
        tree.slider_wheel_scroll(slider, 2);
        assert_eq!(tree.slider_value(slider), Some(4));

        tree[slider].enabled = false;
        tree[slider].cache.clear();
        tree.slider_wheel_scroll(slider, 2);
        assert_eq!(tree.slider_value(slider), Some(4));
    }

    #[test]
    fn test_handle_offset_tracks_value() {
        let mut tree = ControlTree::new();
        let slider = tree.create_slider(Orientation::Horizontal, Rc::default(), Rc::default());
        let handle = tree[slider].as_slider().unwrap().handle();
        tree[slider].last_internal_bounding_rect = crate::foundation::math::Rect::new(0, 0, 124, 24);
        tree[handle].last_bounding_rect = crate::foundation::math::Rect::new(0, 0, 24, 24);
        tree.set_slider_value(slider, 5).unwrap();
        tree.update_slider(slider, 0.016);
        assert_eq!(tree[handle].offset.x.value_in_pixels(0), 50);
    }

    #[test]
    fn test_pointer_sets_value() {
        let mut tree = ControlTree::new();
        let slider = tree.create_slider(Orientation::Horizontal, Rc::default(), Rc::default());
        let handle = tree[slider].as_slider().unwrap().handle();
        tree[slider].last_internal_bounding_rect = crate::foundation::math::Rect::new(100, 0, 124, 24);
        tree[handle].last_bounding_rect = crate::foundation::math::Rect::new(100, 0, 24, 24);
        // track of 100 px starting at 112
        tree.set_slider_value_from_pointer(slider, Point::new(212, 10));
        assert_eq!(tree.slider_value(slider), Some(10));
        tree.set_slider_value_from_pointer(slider, Point::new(162, 10));
        assert_eq!(tree.slider_value(slider), Some(5));
        tree.set_slider_value_from_pointer(slider, Point::new(0, 10));
        assert_eq!(tree.slider_value(slider), Some(0));
    }
}
