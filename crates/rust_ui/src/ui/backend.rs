//! UI Render Backend Trait
//!
//! Defines the interface between the UI system and the host renderer.
//! Keeps the control tree independent of any graphics API.

use crate::foundation::math::{Color, Point, Rect};

/// Backend-agnostic drawing interface implemented by the host application
pub trait Renderer {
    /// Screen rectangle in UI coordinates
    fn screen_bounds(&self) -> Rect;

    /// Fill a rectangle with a solid colour
    fn draw_rectangle(&mut self, rect: Rect, color: Color);

    /// Draw a region of a texture stretched over `dest`
    ///
    /// # Arguments
    /// * `effect` - Optional shader / effect identifier from the stylesheet
    /// * `texture_id` - Texture identifier from the stylesheet
    /// * `dest` - Destination rectangle on screen
    /// * `source` - Source rectangle inside the texture
    /// * `color` - Tint colour
    fn draw_texture(&mut self, effect: Option<&str>, texture_id: &str, dest: Rect, source: Rect, color: Color);

    /// Restrict subsequent drawing to `region`
    fn set_scissor_region(&mut self, region: Rect);

    /// Current scissor region, `None` when unrestricted
    fn scissor_region(&self) -> Option<Rect>;

    /// Remove any scissor region
    fn clear_scissor_region(&mut self);

    /// Size of `text` rendered with the given font and scale
    fn measure_text(&self, _text: &str, _font_id: Option<&str>, _scale: f32) -> Point {
        Point::zeros()
    }

    /// Called before the tree draws
    fn start_frame(&mut self) {}

    /// Called after the tree and post-draw actions drew
    fn end_frame(&mut self) {}
}
