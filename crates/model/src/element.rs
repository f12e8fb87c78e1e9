//! Element-level snapshot types: ids, kinds, styles, and placement.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, stable element identifier. Unique within one snapshot.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Discriminator for what an element is. Never used for inheritance; the
/// engine treats all kinds uniformly and `Other` keeps the tag extensible
/// for hosts with custom element libraries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    Text,
    Image,
    Shape,
    Container,
    Embed,
    Other(String),
}

impl ElementKind {
    /// The tag as the host surface names it.
    pub fn as_tag(&self) -> &str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Image => "image",
            ElementKind::Shape => "shape",
            ElementKind::Container => "container",
            ElementKind::Embed => "embed",
            ElementKind::Other(tag) => tag.as_str(),
        }
    }
}

/// Style-property mapping: unique keys, insertion order irrelevant.
/// A `BTreeMap` keeps serialization deterministic so snapshots compare
/// and export byte-stably.
pub type StyleMap = BTreeMap<String, String>;

/// Placement of an element in canvas-local units.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// All coordinates finite and extents non-negative.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

/// One node of the document tree within a snapshot.
///
/// `content` is an opaque serialized payload owned by the renderer's domain;
/// the engine never parses it, only stores and compares it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementRecord {
    /// Stable identifier, unique within the snapshot.
    pub id: ElementId,
    /// What the element is (text, image, ...).
    pub kind: ElementKind,
    /// Opaque serialized content blob (markup/text).
    pub content: String,
    /// Style properties (name -> value).
    pub style_props: StyleMap,
    /// Canvas placement.
    pub position: Position,
    /// Ancillary string metadata (visibility flags, custom data).
    pub attributes: StyleMap,
}

impl ElementRecord {
    /// Rough memory footprint in bytes, for history budgeting diagnostics.
    pub fn estimated_size(&self) -> usize {
        let mut size = std::mem::size_of::<Self>();
        size += self.id.0.len();
        if let ElementKind::Other(tag) = &self.kind {
            size += tag.len();
        }
        size += self.content.len();
        for (k, v) in &self.style_props {
            size += k.len() + v.len();
        }
        for (k, v) in &self.attributes {
            size += k.len() + v.len();
        }
        size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_validity() {
        assert!(Position::new(0.0, 0.0, 10.0, 20.0).is_valid());
        assert!(Position::new(-5.0, -5.0, 0.0, 0.0).is_valid());
        assert!(!Position::new(f64::NAN, 0.0, 1.0, 1.0).is_valid());
        assert!(!Position::new(0.0, f64::INFINITY, 1.0, 1.0).is_valid());
        assert!(!Position::new(0.0, 0.0, -1.0, 1.0).is_valid());
        assert!(!Position::new(0.0, 0.0, 1.0, -0.5).is_valid());
    }

    #[test]
    fn kind_tags() {
        assert_eq!(ElementKind::Text.as_tag(), "text");
        assert_eq!(ElementKind::Container.as_tag(), "container");
        assert_eq!(ElementKind::Other("sticker".into()).as_tag(), "sticker");
    }

    #[test]
    fn element_id_display_and_eq() {
        let id = ElementId::new("el-1");
        assert_eq!(id.to_string(), "el-1");
        assert_eq!(id, ElementId::from("el-1"));
    }

    #[test]
    fn estimated_size_grows_with_content() {
        let small = ElementRecord {
            id: ElementId::new("a"),
            kind: ElementKind::Text,
            content: String::new(),
            style_props: StyleMap::new(),
            position: Position::default(),
            attributes: StyleMap::new(),
        };
        let mut big = small.clone();
        big.content = "x".repeat(1024);
        assert!(big.estimated_size() > small.estimated_size());
    }
}
