//! GUI owners
//!
//! Game objects that build their own interface implement [`HasGui`]. Each
//! owner gets a full-screen, click-through panel under the root identified
//! `Owner:<name>`; controls added while the owner is on the owner stack land
//! in that panel.

use crate::error::UiError;
use crate::foundation::collections::ControlId;
use crate::ui::measure::MeasureVector;
use crate::ui::tree::TreeError;
use crate::ui::widgets::{Anchor, Control, ControlKind, ControlType, PanelData};

use super::UiSystem;

/// Identifier prefix of owner panels
pub const OWNER_PREFIX: &str = "Owner";

/// Something that owns a part of the interface
pub trait HasGui {
    /// Name identifying the owner panel
    fn gui_owner_name(&self) -> &str;

    /// Add controls; [`UiSystem::add`] targets this owner's panel meanwhile
    fn create_ui(&mut self, ui: &mut UiSystem) -> Result<(), UiError>;

    /// Enable or disable the owner's panel
    fn enable(&mut self, ui: &mut UiSystem, enable: bool) {
        if let Some(panel) = ui.find_root_owner(self.gui_owner_name()) {
            ui.tree_mut()[panel].enabled = enable;
        }
    }

    /// Show or hide the owner's panel
    fn visible(&mut self, ui: &mut UiSystem, visible: bool) {
        if let Some(panel) = ui.find_root_owner(self.gui_owner_name()) {
            ui.tree_mut()[panel].visible = visible;
        }
    }

    /// Destroy the owner's panel and everything in it
    fn clear(&mut self, ui: &mut UiSystem) -> Result<(), UiError> {
        ui.remove_owner(self.gui_owner_name())?;
        Ok(())
    }
}

/// Identifier of the owner panel for `name`
pub fn owner_identifier(name: &str) -> String {
    format!("{OWNER_PREFIX}:{name}")
}

impl UiSystem {
    /// Create the owner panel for `owner`, push it, run `create_ui`, pop it
    pub fn attach_owner(&mut self, owner: &mut dyn HasGui) -> Result<ControlId, UiError> {
        let name = owner.gui_owner_name().to_string();
        let panel = self.owner_panel(&name)?;
        self.push_owner(name);
        let result = owner.create_ui(self);
        self.pop_owner();
        result?;
        Ok(panel)
    }

    /// Owner panel for `name`, created under the root if missing
    pub fn owner_panel(&mut self, name: &str) -> Result<ControlId, TreeError> {
        if let Some(panel) = self.find_root_owner(name) {
            return Ok(panel);
        }
        let mut control = Control::new(ControlKind::Panel(PanelData::default()), std::rc::Rc::default())
            .with_identifier(owner_identifier(name))
            .with_anchor(Anchor::TopLeft)
            .with_size(MeasureVector::percents(100.0, 100.0));
        control.ignore_interactions = true;
        control.draw_fill_texture = false;

        let root = self.tree().root();
        let panel = self.tree_mut().insert(control);
        self.tree_mut().add_child(root, panel)?;
        log::debug!("Created owner panel '{}' ({panel:?})", owner_identifier(name));
        Ok(panel)
    }

    /// Make `name` the current owner
    pub fn push_owner(&mut self, name: impl Into<String>) {
        self.owner_stack.push(name.into());
    }

    /// Leave the current owner scope
    pub fn pop_owner(&mut self) -> Option<String> {
        self.owner_stack.pop()
    }

    /// Name on top of the owner stack
    pub fn current_owner(&self) -> Option<&str> {
        self.owner_stack.last().map(String::as_str)
    }

    /// Panel among the root's children whose identifier ends with `:<name>`
    pub fn find_root_owner(&self, name: &str) -> Option<ControlId> {
        if name.is_empty() {
            return None;
        }
        let tree = self.tree();
        tree[tree.root()].children().iter().copied().find(|child| {
            tree.get(*child).is_some_and(|control| {
                control.control_type() == ControlType::Panel
                    && control
                        .identifier
                        .as_deref()
                        .and_then(|identifier| identifier.rsplit(':').next())
                        == Some(name)
            })
        })
    }

    /// Names of every owner panel under the root, in child order
    pub fn root_owners(&self) -> Vec<String> {
        let tree = self.tree();
        tree[tree.root()]
            .children()
            .iter()
            .filter_map(|child| tree.get(*child)?.identifier.as_deref())
            .filter_map(|identifier| identifier.split_once(':'))
            .filter(|(prefix, _)| *prefix == OWNER_PREFIX)
            .map(|(_, name)| name.to_string())
            .collect()
    }

    /// Destroy the owner panel of `name`; false if there was none
    pub fn remove_owner(&mut self, name: &str) -> Result<bool, TreeError> {
        let Some(panel) = self.find_root_owner(name) else {
            return Ok(false);
        };
        self.tree_mut().destroy(panel)?;
        log::debug!("Removed owner panel '{}'", owner_identifier(name));
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiConfig;

    struct Hud {
        created: Option<ControlId>,
    }

    impl HasGui for Hud {
        fn gui_owner_name(&self) -> &str {
            "Hud"
        }

        fn create_ui(&mut self, ui: &mut UiSystem) -> Result<(), UiError> {
            let label = Control::generic(std::rc::Rc::default()).with_identifier("score");
            self.created = Some(ui.add(label, None)?);
            Ok(())
        }
    }

    #[test]
    fn test_owner_scope_routes_added_controls() {
        let mut ui = UiSystem::new(UiConfig::default());
        let mut hud = Hud { created: None };
        let panel = ui.attach_owner(&mut hud).unwrap();

        let score = hud.created.unwrap();
        assert_eq!(ui.tree()[score].parent(), Some(panel));
        assert_eq!(ui.tree()[panel].identifier.as_deref(), Some("Owner:Hud"));
        assert_eq!(ui.find_root_owner("Hud"), Some(panel));
        assert_eq!(ui.current_owner(), None);
        assert_eq!(ui.root_owners(), vec!["Hud".to_string()]);

        // Outside the scope, controls go to the root
        let loose = ui.add(Control::generic(std::rc::Rc::default()), None).unwrap();
        assert_eq!(ui.tree()[loose].parent(), Some(ui.tree().root()));
        // Explicit owner wins
        let routed = ui.add(Control::generic(std::rc::Rc::default()), Some("Hud")).unwrap();
        assert_eq!(ui.tree()[routed].parent(), Some(panel));
    }

    #[test]
    fn test_enable_visible_and_clear() {
        let mut ui = UiSystem::new(UiConfig::default());
        let mut hud = Hud { created: None };
        let panel = ui.attach_owner(&mut hud).unwrap();

        hud.enable(&mut ui, false);
        hud.visible(&mut ui, false);
        assert!(!ui.tree()[panel].enabled);
        assert!(!ui.tree()[panel].visible);

        hud.clear(&mut ui).unwrap();
        assert!(!ui.tree().contains(panel));
        assert!(!ui.tree().contains(hud.created.unwrap()));
        assert!(ui.root_owners().is_empty());
        assert!(!ui.remove_owner("Hud").unwrap());
    }

    #[test]
    fn test_owner_panel_is_reused() {
        let mut ui = UiSystem::new(UiConfig::default());
        let first = ui.owner_panel("Menu").unwrap();
        let second = ui.owner_panel("Menu").unwrap();
        assert_eq!(first, second);
        assert_eq!(ui.find_root_owner(""), None);
    }
}
