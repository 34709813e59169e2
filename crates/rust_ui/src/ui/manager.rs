//! UI System
//!
//! Central context that owns the control tree, the active theme and the
//! input snapshots, and drives the per-frame update and draw passes.
//!
//! Frame order:
//! 1. [`UiSystem::update`]: fit the root to the screen, update every
//!    control, pick the targeted control and dispatch input to it
//! 2. [`UiSystem::draw`]: lay out and draw the tree, run post-draw actions,
//!    draw the debug overlay and the cursor

use std::path::PathBuf;
use std::rc::Rc;

use crate::config::UiConfig;
use crate::foundation::collections::ControlId;
use crate::foundation::math::{Point, Rect};
use crate::input::{CurrentInputState, InputProvider, InputState};
use crate::ui::backend::Renderer;
use crate::ui::style::{CursorProperties, DefaultStyleKey, DefaultStylesheets, StyleSheet, SystemStyleSheet};
use crate::ui::theme::{self, Theme, ThemeError};
use crate::ui::tree::{ControlTree, TreeError};
use crate::ui::widgets::{Control, ControlType, Orientation};

/// Callback run after a theme finished loading
pub type ThemeChangedCallback = Box<dyn FnMut(&mut UiSystem)>;

/// Process-wide UI context
pub struct UiSystem {
    config: UiConfig,
    tree: ControlTree,
    system_style: SystemStyleSheet,
    stylesheets: DefaultStylesheets,
    active_theme: Option<PathBuf>,
    previous_input: CurrentInputState,
    current_input: CurrentInputState,
    screen_bounds: Rect,
    pub(crate) owner_stack: Vec<String>,
    on_theme_changed: Vec<ThemeChangedCallback>,
}

impl UiSystem {
    /// Create a system without a theme: empty stylesheets, default system style
    pub fn new(config: UiConfig) -> Self {
        let system_style = SystemStyleSheet::default();
        let mut tree = ControlTree::new();
        tree.time_to_lock_interactive_state = system_style.time_to_lock_interactive_state;
        Self {
            config,
            tree,
            system_style,
            stylesheets: DefaultStylesheets::new(),
            active_theme: None,
            previous_input: CurrentInputState::default(),
            current_input: CurrentInputState::default(),
            screen_bounds: Rect::default(),
            owner_stack: Vec::new(),
            on_theme_changed: Vec::new(),
        }
    }

    /// Create a system and load the theme named by `config`
    pub fn init(config: UiConfig) -> Result<Self, ThemeError> {
        let theme = Theme::load(config.active_theme_folder())?;
        Ok(Self::from_theme(config, theme))
    }

    /// Create a system around an already loaded theme
    pub fn from_theme(config: UiConfig, theme: Theme) -> Self {
        let mut system = Self::new(config);
        system.apply_theme(theme);
        log::info!("UI system initialized");
        system
    }

    /// Replace the tree and stylesheets with the theme `name` from the base folder.
    ///
    /// On failure the current tree and theme stay active.
    pub fn load_theme(&mut self, name: &str) -> Result<(), ThemeError> {
        let theme = Theme::load(self.config.theme_base_folder.join(name))?;
        self.config.theme_name = name.to_string();
        self.apply_theme(theme);

        let mut callbacks = std::mem::take(&mut self.on_theme_changed);
        for callback in &mut callbacks {
            callback(self);
        }
        callbacks.append(&mut self.on_theme_changed);
        self.on_theme_changed = callbacks;
        Ok(())
    }

    fn apply_theme(&mut self, theme: Theme) {
        let mut tree = ControlTree::new();
        tree.global_events = std::mem::take(&mut self.tree.global_events);
        tree.clock = self.tree.clock;
        tree.time_to_lock_interactive_state = theme.system.time_to_lock_interactive_state;

        self.tree = tree;
        self.system_style = theme.system;
        self.stylesheets = theme.stylesheets;
        self.active_theme = Some(theme.folder);
        log::info!("Active UI theme: {}", theme.name);
    }

    /// Register a callback run after every successful [`Self::load_theme`]
    pub fn on_theme_changed(&mut self, callback: impl FnMut(&mut Self) + 'static) {
        self.on_theme_changed.push(Box::new(callback));
    }

    /// Advance one simulation frame
    pub fn update(&mut self, delta_time: f32, renderer: &dyn Renderer, input: &mut dyn InputProvider) {
        self.screen_bounds = renderer.screen_bounds();
        let snapshot = input.snapshot();
        self.previous_input = std::mem::replace(&mut self.current_input, snapshot);

        self.tree.update(delta_time, self.screen_bounds);
        let state = self.input_state();
        self.tree.process_input(&state);
    }

    /// Draw one render frame
    pub fn draw(&mut self, renderer: &mut dyn Renderer) {
        renderer.start_frame();
        self.tree.draw(renderer);
        if self.config.debug_draw {
            let root = self.tree.root();
            self.tree.debug_draw(root, true, renderer);
        }
        self.draw_cursor(renderer);
        renderer.end_frame();
    }

    /// Cursor for the current pointer position and targeted control
    pub fn active_cursor(&self) -> Option<&CursorProperties> {
        let style = &self.system_style;
        let default = style.cursor_default.as_ref();
        let position = self.current_input.mouse_position;
        let Some(target) = self
            .tree
            .targeted()
            .filter(|target| self.tree.is_pointed_on(*target, position, true))
        else {
            return default;
        };

        if let Some(cursor) = self.tree.get(target).and_then(|control| control.cursor_style.as_ref()) {
            Some(cursor)
        } else if self.tree.is_currently_disabled(target) {
            style.cursor_disabled.as_ref().or(default)
        } else if self.tree.is_currently_locked(target) {
            style.cursor_locked.as_ref().or(default)
        } else if self.tree.is_interactable(target) {
            style.cursor_interactable.as_ref().or(default)
        } else {
            default
        }
    }

    /// Draw the active cursor at the pointer, if cursors are shown
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn draw_cursor(&self, renderer: &mut dyn Renderer) {
        if !self.config.show_cursor {
            return;
        }
        let Some(cursor) = self.active_cursor() else {
            return;
        };
        let position = self.current_input.mouse_position;
        let scale = cursor.scale * self.system_style.cursor_scale;
        let source = cursor.source_rect;
        let dest = Rect::new(
            position.x + (cursor.offset.x as f32 * scale) as i32,
            position.y + (cursor.offset.y as f32 * scale) as i32,
            (source.width as f32 * scale) as i32,
            (source.height as f32 * scale) as i32,
        );
        renderer.draw_texture(None, &cursor.texture_id, dest, source, cursor.fill_color);
    }

    /// Add a control under the owner `owner`, else the current owner, else the root
    pub fn add(&mut self, control: Control, owner: Option<&str>) -> Result<ControlId, TreeError> {
        let parent = owner
            .and_then(|name| self.find_root_owner(name))
            .or_else(|| self.current_owner().and_then(|name| self.find_root_owner(name)))
            .unwrap_or_else(|| self.tree.root());
        let id = self.tree.insert(control);
        if let Err(err) = self.tree.add_child(parent, id) {
            self.tree.destroy(id)?;
            return Err(err);
        }
        Ok(id)
    }

    /// Destroy every child of the root
    pub fn clear(&mut self) -> Result<(), TreeError> {
        let root = self.tree.root();
        for child in self.tree[root].children().to_vec() {
            self.tree.destroy(child)?;
        }
        Ok(())
    }

    /// First control with `identifier`
    pub fn find(&self, identifier: &str) -> Option<ControlId> {
        self.tree.find(identifier)
    }

    /// First control with `identifier` of exactly `control_type`
    pub fn find_of_type(&self, identifier: &str, control_type: ControlType) -> Option<ControlId> {
        self.tree.find_of_type(identifier, control_type)
    }

    /// Default stylesheet for `key`; an empty sheet if the theme has none
    pub fn default_stylesheet(&self, key: DefaultStyleKey) -> Rc<StyleSheet> {
        self.stylesheets.get(key).unwrap_or_else(|| {
            log::warn!("Theme has no default stylesheet for '{key}', using an empty one");
            Rc::default()
        })
    }

    /// Panel using the theme's `Panels` stylesheet
    pub fn create_panel(&mut self, parent: ControlId) -> Result<ControlId, TreeError> {
        let sheet = self.default_stylesheet(DefaultStyleKey::Panels);
        self.tree.create_panel(parent, sheet)
    }

    /// Vertical scrollbar using the theme's scrollbar stylesheets
    pub fn create_vertical_scrollbar(&mut self, panel: ControlId, auto_set_max: bool) -> Result<ControlId, TreeError> {
        let sheet = self.default_stylesheet(DefaultStyleKey::VerticalScrollbars);
        let handle = self.default_stylesheet(DefaultStyleKey::VerticalScrollbarsHandle);
        self.tree.create_vertical_scrollbar(panel, sheet, handle, auto_set_max)
    }

    /// Slider using the theme's slider stylesheets for `orientation`
    pub fn create_slider(&mut self, parent: ControlId, orientation: Orientation) -> Result<ControlId, TreeError> {
        let (sheet, handle) = match orientation {
            Orientation::Horizontal => (DefaultStyleKey::HorizontalSliders, DefaultStyleKey::HorizontalSlidersHandle),
            Orientation::Vertical => (DefaultStyleKey::VerticalSliders, DefaultStyleKey::VerticalSlidersHandle),
        };
        let (sheet, handle) = (self.default_stylesheet(sheet), self.default_stylesheet(handle));
        let id = self.tree.create_slider(orientation, sheet, handle);
        self.attach_created(parent, id)
    }

    /// Progress bar using the theme's progress bar stylesheets for `orientation`
    pub fn create_progress_bar(&mut self, parent: ControlId, orientation: Orientation) -> Result<ControlId, TreeError> {
        let (sheet, fill) = match orientation {
            Orientation::Horizontal => (
                DefaultStyleKey::HorizontalProgressBars,
                DefaultStyleKey::HorizontalProgressBarsFill,
            ),
            Orientation::Vertical => (DefaultStyleKey::VerticalProgressBars, DefaultStyleKey::VerticalProgressBarsFill),
        };
        let (sheet, fill) = (self.default_stylesheet(sheet), self.default_stylesheet(fill));
        let id = self.tree.create_progress_bar(orientation, sheet, fill);
        self.attach_created(parent, id)
    }

    fn attach_created(&mut self, parent: ControlId, id: ControlId) -> Result<ControlId, TreeError> {
        if let Err(err) = self.tree.add_child(parent, id) {
            self.tree.destroy(id)?;
            return Err(err);
        }
        Ok(id)
    }

    /// Names of the themes available under the base folder
    pub fn theme_folders(&self) -> Result<Vec<String>, ThemeError> {
        theme::theme_folders(&self.config.theme_base_folder)
    }

    /// Name of the loaded theme folder
    pub fn theme_active_name(&self) -> Option<String> {
        self.active_theme
            .as_ref()
            .and_then(|folder| folder.file_name())
            .map(|name| name.to_string_lossy().into_owned())
    }

    /// Settings
    pub const fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Control tree
    pub const fn tree(&self) -> &ControlTree {
        &self.tree
    }

    /// Mutable control tree
    pub fn tree_mut(&mut self) -> &mut ControlTree {
        &mut self.tree
    }

    /// Root panel
    pub const fn root(&self) -> ControlId {
        self.tree.root()
    }

    /// Control under the pointer or holding the focus
    pub const fn targeted(&self) -> Option<ControlId> {
        self.tree.targeted()
    }

    /// Theme-wide settings
    pub const fn system_style(&self) -> &SystemStyleSheet {
        &self.system_style
    }

    /// Default stylesheets of the theme
    pub const fn stylesheets(&self) -> &DefaultStylesheets {
        &self.stylesheets
    }

    /// Global text scale of the theme
    pub const fn text_scale(&self) -> f32 {
        self.system_style.text_scale
    }

    /// Seconds of simulated time
    pub const fn elapsed_time(&self) -> f64 {
        self.tree.elapsed_time()
    }

    /// Delta of the last update
    pub const fn last_delta_time(&self) -> f32 {
        self.tree.last_delta_time()
    }

    /// Whether [`Self::draw`] renders the cursor
    pub const fn show_cursor(&self) -> bool {
        self.config.show_cursor
    }

    /// Show or hide the cursor
    pub fn set_show_cursor(&mut self, show: bool) {
        self.config.show_cursor = show;
    }

    /// Whether [`Self::draw`] renders the debug overlay
    pub const fn debug_draw(&self) -> bool {
        self.config.debug_draw
    }

    /// Enable or disable the debug overlay
    pub fn set_debug_draw(&mut self, enabled: bool) {
        self.config.debug_draw = enabled;
    }

    /// Snapshot of this frame
    pub const fn current_input(&self) -> &CurrentInputState {
        &self.current_input
    }

    /// Snapshot of the previous frame
    pub const fn previous_input(&self) -> &CurrentInputState {
        &self.previous_input
    }

    /// Both snapshots plus the screen bounds
    pub fn input_state(&self) -> InputState {
        InputState {
            previous: self.previous_input.clone(),
            current: self.current_input.clone(),
            screen_bounds: self.screen_bounds,
        }
    }

    /// Pointer position of this frame
    pub const fn mouse_position(&self) -> Point {
        self.current_input.mouse_position
    }

    /// Screen bounds seen by the last update
    pub const fn screen_bounds(&self) -> Rect {
        self.screen_bounds
    }

    /// Queue a one-shot action run after the tree drew
    pub fn run_after_drawing_controls(&mut self, action: impl FnOnce(&mut ControlTree, &mut dyn Renderer) + 'static) {
        self.tree.run_after_drawing_controls(action);
    }
}
