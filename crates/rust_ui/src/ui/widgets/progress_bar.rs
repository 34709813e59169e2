//! Progress bar: a slider that fills instead of moving a handle
//!
//! Progress bars ignore interactions by default. Clear
//! `ignore_interactions` on the bar to let users change the value like a
//! slider; the fill follows the bar's setting every update.

use std::rc::Rc;

use super::core::Orientation;
use crate::foundation::collections::ControlId;
use crate::ui::style::StyleSheet;
use crate::ui::tree::ControlTree;

impl ControlTree {
    /// Create a detached progress bar with its fill
    pub fn create_progress_bar(
        &mut self,
        orientation: Orientation,
        style_sheet: Rc<StyleSheet>,
        fill_style_sheet: Rc<StyleSheet>,
    ) -> ControlId {
        self.create_slider_kind(orientation, style_sheet, fill_style_sheet, true)
    }

    /// Fill control of a progress bar
    pub fn progress_bar_fill(&self, id: ControlId) -> Option<ControlId> {
        self.get(id)
            .filter(|control| matches!(control.kind, super::ControlKind::ProgressBar(_)))
            .and_then(|control| control.as_slider())
            .map(super::SliderData::handle)
    }
}
