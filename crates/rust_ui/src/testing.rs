//! Test doubles for the renderer and input seams

use std::collections::VecDeque;

use crate::foundation::math::{Color, Point, Rect};
use crate::input::{
    CurrentInputState, InputProvider, InputState, MouseButton, MouseButtons, TextInputCommand, TextInputKey,
    TextInputRepeater,
};
use crate::ui::backend::Renderer;

/// One recorded texture draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureDraw {
    pub effect: Option<String>,
    pub texture_id: String,
    pub dest: Rect,
    pub source: Rect,
    pub color: Color,
}

/// Renderer that records every call
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub screen: Rect,
    pub rectangles: Vec<(Rect, Color)>,
    pub textures: Vec<TextureDraw>,
    pub scissor: Option<Rect>,
    pub scissor_log: Vec<Option<Rect>>,
    pub frames_started: u32,
    pub frames_ended: u32,
}

impl RecordingRenderer {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            screen: Rect::new(0, 0, width, height),
            ..Self::default()
        }
    }

    /// Forget recorded draws, keep the scissor state
    pub fn clear(&mut self) {
        self.rectangles.clear();
        self.textures.clear();
        self.scissor_log.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn screen_bounds(&self) -> Rect {
        self.screen
    }

    fn draw_rectangle(&mut self, rect: Rect, color: Color) {
        self.rectangles.push((rect, color));
    }

    fn draw_texture(&mut self, effect: Option<&str>, texture_id: &str, dest: Rect, source: Rect, color: Color) {
        self.textures.push(TextureDraw {
            effect: effect.map(str::to_owned),
            texture_id: texture_id.to_owned(),
            dest,
            source,
            color,
        });
    }

    fn set_scissor_region(&mut self, region: Rect) {
        self.scissor = Some(region);
        self.scissor_log.push(Some(region));
    }

    fn scissor_region(&self) -> Option<Rect> {
        self.scissor
    }

    fn clear_scissor_region(&mut self) {
        self.scissor = None;
        self.scissor_log.push(None);
    }

    fn measure_text(&self, text: &str, _font_id: Option<&str>, scale: f32) -> Point {
        #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
        let width = (text.chars().count() as f32 * 8.0 * scale) as i32;
        #[allow(clippy::cast_possible_truncation)]
        let height = (16.0 * scale) as i32;
        Point::new(width, height)
    }

    fn start_frame(&mut self) {
        self.frames_started += 1;
    }

    fn end_frame(&mut self) {
        self.frames_ended += 1;
    }
}

/// Simulated milliseconds per scripted frame
pub const FRAME_MS: i64 = 20;

/// Input provider replaying queued frames; the last frame repeats once the queue drains.
/// Held text keys go through a [`TextInputRepeater`] on a simulated clock.
#[derive(Debug)]
pub struct ScriptedInput {
    frames: VecDeque<(CurrentInputState, Vec<TextInputKey>)>,
    current: CurrentInputState,
    held_keys: Vec<TextInputKey>,
    repeater: TextInputRepeater,
    clock_ms: i64,
}

impl Default for ScriptedInput {
    fn default() -> Self {
        Self {
            frames: VecDeque::new(),
            current: CurrentInputState::default(),
            held_keys: Vec::new(),
            repeater: TextInputRepeater::new(),
            clock_ms: 1_000_000,
        }
    }
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a frame with the pointer at `position`
    pub fn push(&mut self, position: Point, buttons: MouseButtons, wheel: i32) -> &mut Self {
        self.push_frame(position, buttons, wheel, Vec::new())
    }

    /// Queue `frames` frames holding `keys` with the pointer at `position`
    pub fn hold_keys(&mut self, position: Point, keys: &[TextInputKey], frames: usize) -> &mut Self {
        for _ in 0..frames {
            self.push_frame(position, MouseButtons::empty(), 0, keys.to_vec());
        }
        self
    }

    /// Queue a press followed by a release at `position`
    pub fn click(&mut self, position: Point) -> &mut Self {
        self.push(position, MouseButtons::LEFT, 0).push(position, MouseButtons::empty(), 0)
    }

    fn push_frame(&mut self, position: Point, buttons: MouseButtons, wheel: i32, keys: Vec<TextInputKey>) -> &mut Self {
        let state = CurrentInputState {
            mouse_position: position,
            buttons,
            mouse_wheel_change: wheel,
            text_input_commands: Vec::new(),
        };
        self.frames.push_back((state, keys));
        self
    }
}

impl InputProvider for ScriptedInput {
    fn mouse_position(&self) -> Point {
        self.current.mouse_position
    }

    fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.current.is_down(button)
    }

    fn mouse_wheel_change(&self) -> i32 {
        self.current.mouse_wheel_change
    }

    fn text_input_commands(&mut self) -> Vec<TextInputCommand> {
        self.clock_ms += FRAME_MS;
        let held = &self.held_keys;
        self.repeater.poll(self.clock_ms, false, |key| held.contains(&key))
    }

    fn snapshot(&mut self) -> CurrentInputState {
        if let Some((next, keys)) = self.frames.pop_front() {
            self.current = next;
            self.held_keys = keys;
        } else {
            self.current.mouse_wheel_change = 0;
        }
        self.current.text_input_commands = self.text_input_commands();
        self.current.clone()
    }
}

/// Input state for a single frame transition
pub fn frame_input(previous: MouseButtons, current: MouseButtons, position: Point, wheel: i32) -> InputState {
    InputState {
        previous: CurrentInputState {
            mouse_position: position,
            buttons: previous,
            ..CurrentInputState::default()
        },
        current: CurrentInputState {
            mouse_position: position,
            buttons: current,
            mouse_wheel_change: wheel,
            text_input_commands: Vec::new(),
        },
        screen_bounds: Rect::new(0, 0, 800, 600),
    }
}
