//! Stylesheets
//!
//! A [`StyleSheet`] answers "what is property P for a control in state S",
//! trying, in order:
//! 1. the control's own override layer
//! 2. the stylesheet bucket for S
//! 3. the bucket for S's fallback state (`TargetedChecked` -> `Checked`, ...)
//! 4. the stylesheet's `default` bucket
//! 5. the caller-supplied fallback value
//!
//! Properties are keyed by the [`StyleProperty`] enum; there is no lookup by
//! reflected field name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::foundation::math::{Color, Point, Rect, Sides};
use crate::ui::measure::Measurement;
use crate::ui::widgets::core::{Anchor, ControlState};

mod defaults;
mod system;

pub use defaults::{DefaultStyleKey, DefaultStylesheets, UnknownStyleKey};
pub use system::{CursorProperties, SystemStyleSheet};

/// Style property key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    /// Spacing before the control in auto-flow layouts
    MarginBefore,
    /// Spacing after the control in auto-flow layouts
    MarginAfter,
    /// Extra size added around the bounding rect
    ExtraSize,
    /// Space between bounding rect and internal rect
    Padding,
    /// Tint applied to fill textures
    TintColor,
    /// Solid background colour
    BackgroundColor,
    /// Outline thickness per side
    BoxOutlineWidth,
    /// Outline colour
    BoxOutlineColor,
    /// Outline displacement
    BoxOutlineOffset,
    /// Texture stretched over the bounding rect
    FillTexture,
    /// Renderer effect to draw textures with
    EffectIdentifier,
}

/// Texture region stretched over a destination rect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StretchedTexture {
    /// Renderer texture identifier
    pub texture_id: String,
    /// Source region inside the texture
    pub source_rect: Rect,
}

/// A resolved property value
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// Point value (margins, offsets)
    Point(Point),
    /// Per-side value (padding, extra size, outline width)
    Sides(Sides),
    /// Colour value
    Color(Color),
    /// Texture value
    Texture(StretchedTexture),
    /// Free text (effect identifiers)
    Text(String),
}

/// Conversion from a [`StyleValue`] into a concrete property type
pub trait FromStyleValue: Sized {
    /// Extract `Self`, or `None` on a type mismatch
    fn from_style_value(value: StyleValue) -> Option<Self>;
}

impl FromStyleValue for Point {
    fn from_style_value(value: StyleValue) -> Option<Self> {
        match value {
            StyleValue::Point(p) => Some(p),
            _ => None,
        }
    }
}

impl FromStyleValue for Sides {
    fn from_style_value(value: StyleValue) -> Option<Self> {
        match value {
            StyleValue::Sides(s) => Some(s),
            _ => None,
        }
    }
}

impl FromStyleValue for Color {
    fn from_style_value(value: StyleValue) -> Option<Self> {
        match value {
            StyleValue::Color(c) => Some(c),
            _ => None,
        }
    }
}

impl FromStyleValue for StretchedTexture {
    fn from_style_value(value: StyleValue) -> Option<Self> {
        match value {
            StyleValue::Texture(t) => Some(t),
            _ => None,
        }
    }
}

impl FromStyleValue for String {
    fn from_style_value(value: StyleValue) -> Option<Self> {
        match value {
            StyleValue::Text(t) => Some(t),
            _ => None,
        }
    }
}

impl<T: FromStyleValue> FromStyleValue for Option<T> {
    fn from_style_value(value: StyleValue) -> Option<Self> {
        T::from_style_value(value).map(Some)
    }
}

/// Property values for one control state. Unset fields defer to the next layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSheetState {
    /// See [`StyleProperty::MarginBefore`]
    pub margin_before: Option<Point>,
    /// See [`StyleProperty::MarginAfter`]
    pub margin_after: Option<Point>,
    /// See [`StyleProperty::ExtraSize`]
    pub extra_size: Option<Sides>,
    /// See [`StyleProperty::Padding`]
    pub padding: Option<Sides>,
    /// See [`StyleProperty::TintColor`]
    pub tint_color: Option<Color>,
    /// See [`StyleProperty::BackgroundColor`]
    pub background_color: Option<Color>,
    /// See [`StyleProperty::BoxOutlineWidth`]
    pub box_outline_width: Option<Sides>,
    /// See [`StyleProperty::BoxOutlineColor`]
    pub box_outline_color: Option<Color>,
    /// See [`StyleProperty::BoxOutlineOffset`]
    pub box_outline_offset: Option<Point>,
    /// See [`StyleProperty::FillTexture`]
    pub fill_texture: Option<StretchedTexture>,
    /// See [`StyleProperty::EffectIdentifier`]
    pub effect_identifier: Option<String>,
}

impl StyleSheetState {
    /// Value of `property` in this layer, if set
    pub fn get(&self, property: StyleProperty) -> Option<StyleValue> {
        match property {
            StyleProperty::MarginBefore => self.margin_before.map(StyleValue::Point),
            StyleProperty::MarginAfter => self.margin_after.map(StyleValue::Point),
            StyleProperty::ExtraSize => self.extra_size.map(StyleValue::Sides),
            StyleProperty::Padding => self.padding.map(StyleValue::Sides),
            StyleProperty::TintColor => self.tint_color.map(StyleValue::Color),
            StyleProperty::BackgroundColor => self.background_color.map(StyleValue::Color),
            StyleProperty::BoxOutlineWidth => self.box_outline_width.map(StyleValue::Sides),
            StyleProperty::BoxOutlineColor => self.box_outline_color.map(StyleValue::Color),
            StyleProperty::BoxOutlineOffset => self.box_outline_offset.map(StyleValue::Point),
            StyleProperty::FillTexture => self.fill_texture.clone().map(StyleValue::Texture),
            StyleProperty::EffectIdentifier => self.effect_identifier.clone().map(StyleValue::Text),
        }
    }
}

/// Per-state property table plus control-type defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSheet {
    /// Default width for controls using this sheet
    pub default_width: Option<Measurement>,
    /// Default height for controls using this sheet
    pub default_height: Option<Measurement>,
    /// Default anchor for controls using this sheet
    pub default_anchor: Option<Anchor>,
    /// Minimum width in pixels
    pub min_width: Option<i32>,
    /// Minimum height in pixels
    pub min_height: Option<i32>,
    /// State blend speed; zero or unset disables blending
    pub interpolate_states_speed: Option<f32>,
    /// Handle / fill interpolation speed; zero or unset disables it
    pub interpolate_offsets_speed: Option<f32>,
    /// Properties shared by every state
    pub default: StyleSheetState,
    /// `Targeted` overrides
    pub targeted: Option<StyleSheetState>,
    /// `Interacted` overrides
    pub interacted: Option<StyleSheetState>,
    /// `Disabled` overrides
    pub disabled: Option<StyleSheetState>,
    /// `DisabledChecked` overrides
    pub disabled_checked: Option<StyleSheetState>,
    /// `Checked` overrides
    pub checked: Option<StyleSheetState>,
    /// `TargetedChecked` overrides
    pub targeted_checked: Option<StyleSheetState>,
    /// Designer-authored free-form hints
    pub custom: BTreeMap<String, String>,
}

impl Config for StyleSheet {}

impl StyleSheet {
    /// The bucket holding overrides for `state`, if any
    pub const fn state_bucket(&self, state: ControlState) -> Option<&StyleSheetState> {
        match state {
            ControlState::Default => None,
            ControlState::Targeted => self.targeted.as_ref(),
            ControlState::Interacted => self.interacted.as_ref(),
            ControlState::Disabled => self.disabled.as_ref(),
            ControlState::DisabledChecked => self.disabled_checked.as_ref(),
            ControlState::Checked => self.checked.as_ref(),
            ControlState::TargetedChecked => self.targeted_checked.as_ref(),
        }
    }

    /// Unconverted lookup through every layer
    pub fn get_value(
        &self,
        property: StyleProperty,
        state: ControlState,
        overrides: Option<&StyleSheetState>,
    ) -> Option<StyleValue> {
        if let Some(value) = overrides.and_then(|layer| layer.get(property)) {
            return Some(value);
        }
        if let Some(value) = self.state_bucket(state).and_then(|bucket| bucket.get(property)) {
            return Some(value);
        }
        if let Some(value) = state
            .fallback()
            .and_then(|fallback| self.state_bucket(fallback))
            .and_then(|bucket| bucket.get(property))
        {
            return Some(value);
        }
        self.default.get(property)
    }

    /// Typed lookup; type mismatches and missing values yield `fallback`
    pub fn get_property<T: FromStyleValue>(
        &self,
        property: StyleProperty,
        state: ControlState,
        fallback: T,
        overrides: Option<&StyleSheetState>,
    ) -> T {
        self.get_value(property, state, overrides)
            .and_then(T::from_style_value)
            .unwrap_or(fallback)
    }

    /// Numeric custom hint (e.g. a priority). Missing or malformed values read as 0.
    pub fn custom_i32(&self, name: &str) -> i32 {
        match self.custom.get(name) {
            None => 0,
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::debug!("Custom style property '{name}' is not a number: '{raw}', using 0");
                0
            }),
        }
    }

    /// True if states should blend over time
    pub fn interpolates_states(&self) -> bool {
        self.interpolate_states_speed.unwrap_or(0.0) > 0.0
    }
}
