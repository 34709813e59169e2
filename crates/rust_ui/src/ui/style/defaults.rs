//! Registry of per-control-type default stylesheets

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use super::StyleSheet;

macro_rules! default_style_keys {
    ($($key:ident),* $(,)?) => {
        /// Control-style key naming one default stylesheet of a theme
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum DefaultStyleKey {
            $(
                #[allow(missing_docs)]
                $key,
            )*
        }

        impl DefaultStyleKey {
            /// Every key, in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$key),*];

            /// Name used in theme files
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$key => stringify!($key),)*
                }
            }
        }

        impl FromStr for DefaultStyleKey {
            type Err = UnknownStyleKey;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($key) => Ok(Self::$key),)*
                    _ => Err(UnknownStyleKey(s.to_string())),
                }
            }
        }
    };
}

default_style_keys! {
    Panels,
    MessageBoxPanels,
    MessageBoxParagraphs,
    MessageBoxTitles,
    MessageBoxButtons,
    MessageBoxBackdrop,
    Paragraphs,
    Titles,
    Labels,
    Buttons,
    HorizontalLines,
    VerticalLines,
    CheckBoxes,
    RadioButtons,
    HorizontalSliders,
    HorizontalSlidersHandle,
    VerticalSliders,
    VerticalSlidersHandle,
    HorizontalColorSliders,
    HorizontalColorSlidersHandle,
    VerticalColorSliders,
    VerticalColorSlidersHandle,
    ListPanels,
    ListItems,
    DropDownPanels,
    DropDownItems,
    DropDownIcon,
    VerticalScrollbars,
    VerticalScrollbarsHandle,
    TextInput,
    NumericTextInput,
    NumericTextInputButton,
    HorizontalProgressBars,
    HorizontalProgressBarsFill,
    VerticalProgressBars,
    VerticalProgressBarsFill,
    ColorPickers,
    ColorPickersHandle,
}

impl fmt::Display for DefaultStyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A theme referenced a control-style key that does not exist
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("control key '{0}' is not a known default stylesheet key")]
pub struct UnknownStyleKey(pub String);

/// Default stylesheets of the active theme, shared by every control created with them
#[derive(Debug, Clone, Default)]
pub struct DefaultStylesheets {
    sheets: HashMap<DefaultStyleKey, Rc<StyleSheet>>,
}

impl DefaultStylesheets {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Stylesheet for `key`
    pub fn get(&self, key: DefaultStyleKey) -> Option<Rc<StyleSheet>> {
        self.sheets.get(&key).cloned()
    }

    /// Stylesheet for `key`, else for `fallback`
    pub fn get_or(&self, key: DefaultStyleKey, fallback: DefaultStyleKey) -> Option<Rc<StyleSheet>> {
        self.get(key).or_else(|| self.get(fallback))
    }

    /// Register or replace a stylesheet
    pub fn insert(&mut self, key: DefaultStyleKey, sheet: StyleSheet) {
        self.sheets.insert(key, Rc::new(sheet));
    }

    /// Number of registered sheets
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// True if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Drop every sheet
    pub fn clear(&mut self) {
        self.sheets.clear();
    }
}
