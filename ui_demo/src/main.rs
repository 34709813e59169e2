//! Headless UI demo
//!
//! Builds a small settings window (draggable panel, scrolled list, volume
//! slider, loading bar) plus a HUD owner, then replays a scripted pointer
//! session against a renderer that only counts what it is asked to draw.

use std::collections::VecDeque;

use rust_ui::foundation::logging;
use rust_ui::prelude::*;
use rust_ui::ui::{Measurement, PanelData};

const SCREEN_WIDTH: i32 = 1280;
const SCREEN_HEIGHT: i32 = 720;
const FRAME_TIME: f32 = 1.0 / 60.0;

/// Renderer that records draw statistics instead of drawing
#[derive(Debug, Default)]
struct HeadlessRenderer {
    rectangles: usize,
    textures: usize,
    scissor: Option<Rect>,
    scissor_changes: usize,
    frames: usize,
}

impl Renderer for HeadlessRenderer {
    fn screen_bounds(&self) -> Rect {
        Rect::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    fn draw_rectangle(&mut self, _rect: Rect, _color: Color) {
        self.rectangles += 1;
    }

    fn draw_texture(&mut self, _effect: Option<&str>, _texture_id: &str, _dest: Rect, _source: Rect, _color: Color) {
        self.textures += 1;
    }

    fn set_scissor_region(&mut self, region: Rect) {
        self.scissor = Some(region);
        self.scissor_changes += 1;
    }

    fn scissor_region(&self) -> Option<Rect> {
        self.scissor
    }

    fn clear_scissor_region(&mut self) {
        self.scissor = None;
    }

    fn end_frame(&mut self) {
        self.frames += 1;
    }
}

/// Pointer script: each step holds a position and button set for some frames
struct ScriptedPointer {
    steps: VecDeque<(Point, MouseButtons, i32, u32)>,
    current: CurrentInputState,
}

impl ScriptedPointer {
    fn new() -> Self {
        Self {
            steps: VecDeque::new(),
            current: CurrentInputState::default(),
        }
    }

    fn then(mut self, position: Point, buttons: MouseButtons, wheel: i32, frames: u32) -> Self {
        self.steps.push_back((position, buttons, wheel, frames));
        self
    }

    fn is_done(&self) -> bool {
        self.steps.is_empty()
    }
}

impl InputProvider for ScriptedPointer {
    fn mouse_position(&self) -> Point {
        self.current.mouse_position
    }

    fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.current.is_down(button)
    }

    fn mouse_wheel_change(&self) -> i32 {
        self.current.mouse_wheel_change
    }

    fn snapshot(&mut self) -> CurrentInputState {
        if let Some((position, buttons, wheel, frames)) = self.steps.front_mut() {
            self.current.mouse_position = *position;
            self.current.buttons = *buttons;
            self.current.mouse_wheel_change = *wheel;
            *frames = frames.saturating_sub(1);
            if *frames == 0 {
                self.steps.pop_front();
            }
        }
        self.current.clone()
    }
}

/// Settings window owner
struct SettingsWindow {
    volume: Option<ControlId>,
    loading: Option<ControlId>,
}

impl HasGui for SettingsWindow {
    fn gui_owner_name(&self) -> &str {
        "SettingsWindow"
    }

    fn create_ui(&mut self, ui: &mut UiSystem) -> Result<(), UiError> {
        let sheet = ui.default_stylesheet(DefaultStyleKey::Panels);
        let window = ui.add(
            Control::new(ControlKind::Panel(PanelData::default()), sheet)
                .with_identifier("settings")
                .with_anchor(Anchor::Center)
                .with_size(MeasureVector::pixels(480, 360)),
            None,
        )?;
        ui.tree_mut()[window].draggable_mode = DraggableMode::DraggableConfinedToScreen;
        ui.tree_mut()[window].overflow_mode = OverflowMode::HideOverflow;
        ui.create_vertical_scrollbar(window, true)?;

        for index in 0..12 {
            let mut row = Control::generic(ui.default_stylesheet(DefaultStyleKey::ListItems))
                .with_identifier(format!("row-{index}"))
                .with_size(MeasureVector {
                    x: Measurement::percents(100.0),
                    y: Measurement::pixels(40),
                });
            row.interactable = Some(true);
            let row = ui.tree_mut().insert(row);
            ui.tree_mut().add_child(window, row)?;
            ui.tree_mut()[row].events.on_click(move |tree, id| {
                let checked = !tree[id].is_checked();
                if tree.set_checked(id, checked).is_ok() {
                    log::info!("Row {index} checked: {checked}");
                }
            });
        }

        let volume = ui.create_slider(window, Orientation::Horizontal)?;
        ui.tree_mut().set_slider_range(volume, 0, 100)?;
        ui.tree_mut().set_slider_value(volume, 50)?;
        ui.tree_mut()[volume].events.on(ControlEvent::OnValueChanged, |tree, id| {
            log::info!("Volume: {:?}", tree.slider_value(id));
        });
        self.volume = Some(volume);

        let loading = ui.create_progress_bar(window, Orientation::Horizontal)?;
        ui.tree_mut().set_slider_range(loading, 0, 100)?;
        self.loading = Some(loading);
        Ok(())
    }
}

/// Heads-up display owner
struct Hud;

impl HasGui for Hud {
    fn gui_owner_name(&self) -> &str {
        "Hud"
    }

    fn create_ui(&mut self, ui: &mut UiSystem) -> Result<(), UiError> {
        let mut score = Control::generic(ui.default_stylesheet(DefaultStyleKey::Labels))
            .with_identifier("score")
            .with_anchor(Anchor::TopRight)
            .with_size(MeasureVector::pixels(200, 32));
        score.ignore_interactions = true;
        ui.add(score, None)?;
        Ok(())
    }
}

fn create_ui_system() -> UiSystem {
    let config = UiConfig::load_from_file("ui_demo/ui.toml").unwrap_or_else(|err| {
        if !err.is_not_found() {
            log::warn!("Ignoring ui.toml: {err}");
        }
        UiConfig::default()
    });
    match UiSystem::init(config.clone()) {
        Ok(ui) => ui,
        Err(err) => {
            log::warn!("Theme unavailable ({err}), running unstyled");
            UiSystem::new(config)
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_default("info");
    log::info!("Starting headless UI demo");

    let mut ui = create_ui_system();
    if let Ok(themes) = ui.theme_folders() {
        log::info!("Available themes: {themes:?}");
    }

    let mut settings = SettingsWindow {
        volume: None,
        loading: None,
    };
    let mut hud = Hud;
    ui.attach_owner(&mut settings)?;
    ui.attach_owner(&mut hud)?;
    log::info!("Owners: {:?}", ui.root_owners());

    let centre = Point::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2);
    let title = Point::new(centre.x, centre.y - 170);
    let mut pointer = ScriptedPointer::new()
        .then(centre, MouseButtons::empty(), 0, 10)
        .then(centre, MouseButtons::LEFT, 0, 2)
        .then(centre, MouseButtons::empty(), 0, 10)
        .then(centre, MouseButtons::empty(), 1, 1)
        .then(centre, MouseButtons::empty(), 0, 30)
        .then(title, MouseButtons::empty(), 0, 5)
        .then(title, MouseButtons::LEFT, 0, 2)
        .then(Point::new(title.x - 200, title.y + 40), MouseButtons::LEFT, 0, 20)
        .then(Point::new(title.x - 200, title.y + 40), MouseButtons::empty(), 0, 20);

    let mut renderer = HeadlessRenderer::default();
    let mut progress = 0;
    while !pointer.is_done() {
        ui.update(FRAME_TIME, &renderer, &mut pointer);
        if let Some(loading) = settings.loading {
            progress = (progress + 1).min(100);
            ui.tree_mut().set_slider_value(loading, progress)?;
        }
        ui.draw(&mut renderer);
    }

    if let Some(window) = ui.find("settings") {
        let control = &ui.tree()[window];
        log::info!(
            "Settings window at {:?}, dragged to {:?}",
            control.last_bounding_rect(),
            control.dragged_position()
        );
    }
    if let Some(volume) = settings.volume {
        log::info!("Final volume: {:?}", ui.tree().slider_value(volume));
    }
    log::info!(
        "Drew {} frames: {} rectangles, {} textures, {} scissor changes, elapsed {:.2}s",
        renderer.frames,
        renderer.rectangles,
        renderer.textures,
        renderer.scissor_changes,
        ui.elapsed_time()
    );

    hud.clear(&mut ui)?;
    settings.clear(&mut ui)?;
    log::info!("Demo finished, {} controls left", ui.tree().len());
    Ok(())
}
