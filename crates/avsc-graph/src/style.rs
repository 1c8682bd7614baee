// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Presentation policy baked into the transform: glyphs, colors, font sizes.

use serde::{Deserialize, Serialize};

/// Smallest font size any node gets.
pub const MIN_FONT_SIZE: u32 = 16;
/// Font size of the root; fields shrink from here.
pub const MAX_FONT_SIZE: u32 = 26;
/// Font shrink per nesting level.
pub const FONT_SIZE_STEP: u32 = 3;
/// Font color of the root node.
pub const ROOT_FONT_COLOR: &str = "red";
/// Separator between title lines.
pub const LINE_BREAK: &str = "<br/>";

/// Type names the decoration tables know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// `record`
    Record,
    /// `array`
    Array,
    /// `map`
    Map,
    /// `enum`
    Enum,
    /// `string`
    String,
    /// `int`
    Int,
    /// `long`
    Long,
    /// `double`
    Double,
    /// `boolean`
    Boolean,
    /// Anything else, including no type at all.
    Other,
}

impl TypeTag {
    /// Map a resolved type name to its tag.
    pub fn of(type_name: Option<&str>) -> Self {
        match type_name {
            Some("record") => Self::Record,
            Some("array") => Self::Array,
            Some("map") => Self::Map,
            Some("enum") => Self::Enum,
            Some("string") => Self::String,
            Some("int") => Self::Int,
            Some("long") => Self::Long,
            Some("double") => Self::Double,
            Some("boolean") => Self::Boolean,
            _ => Self::Other,
        }
    }

    /// Wrap `name` in this type's glyphs.
    pub fn decorate(self, name: &str) -> String {
        let (open, close) = match self {
            Self::Record => ("<", ">"),
            Self::Array => ("[", "]"),
            Self::Map => ("{", "}"),
            Self::Enum => (":", ":"),
            Self::String => ("_", "_"),
            Self::Int | Self::Long => ("#", "#"),
            Self::Double => ("~", "~"),
            Self::Boolean => ("!", "!"),
            Self::Other => return name.to_owned(),
        };
        format!("{open}{name}{close}")
    }
}

/// Font colors per type category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// `string`
    pub string: String,
    /// `int`, `long`, `double`
    pub numeric: String,
    /// `boolean`
    pub boolean: String,
    /// `array`, `map`, `enum`, `record`
    pub composite: String,
    /// Everything else.
    pub fallback: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            string: "blue".into(),
            numeric: "green".into(),
            boolean: "maroon".into(),
            composite: "purple".into(),
            fallback: "black".into(),
        }
    }
}

/// Style knobs applied while building nodes. Defaults reproduce the fixed tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylePolicy {
    /// Floor for field font sizes.
    pub min_font_size: u32,
    /// Root font size and ceiling for fields.
    pub max_font_size: u32,
    /// Shrink per level.
    pub font_size_step: u32,
    /// Root node font color.
    pub root_font_color: String,
    /// Field font colors.
    pub palette: Palette,
}

impl Default for StylePolicy {
    fn default() -> Self {
        Self {
            min_font_size: MIN_FONT_SIZE,
            max_font_size: MAX_FONT_SIZE,
            font_size_step: FONT_SIZE_STEP,
            root_font_color: ROOT_FONT_COLOR.into(),
            palette: Palette::default(),
        }
    }
}

impl StylePolicy {
    /// `max(min, max - step * level)`.
    pub fn font_size(&self, level: u32) -> u32 {
        self.max_font_size
            .saturating_sub(self.font_size_step.saturating_mul(level))
            .max(self.min_font_size)
    }

    /// Font color for a type.
    pub fn color_for(&self, tag: TypeTag) -> &str {
        let palette = &self.palette;
        match tag {
            TypeTag::String => &palette.string,
            TypeTag::Int | TypeTag::Long | TypeTag::Double => &palette.numeric,
            TypeTag::Boolean => &palette.boolean,
            TypeTag::Array | TypeTag::Map | TypeTag::Enum | TypeTag::Record => {
                &palette.composite
            }
            TypeTag::Other => &palette.fallback,
        }
    }
}
