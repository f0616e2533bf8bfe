//! The render-ready descriptor.
//!
//! Everything a template needs to emit a responsive `<picture>` element for
//! one image, assembled by [`Engine::describe`](crate::engine::Engine::describe)
//! and immutable from then on. Serializes with the exact field names the
//! output surface promises (`objectFit`, source `type`), so it can be handed
//! to client-side code as JSON unchanged.

use crate::source::Focus;
use serde::Serialize;

/// One `<source>` entry: a MIME type and its srcset attribute string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceEntry {
    /// `image/<format>` tag, e.g. `image/webp`.
    #[serde(rename = "type")]
    pub mime: String,
    pub srcset: String,
}

/// The assembled output for one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    /// Canonical display width, post ratio-resolution.
    pub width: u32,
    /// Canonical display height, post ratio-resolution.
    pub height: u32,
    /// Primary image URL at the canonical dimensions.
    pub url: String,
    pub alt: String,
    pub filename: String,
    /// Inline placeholder data URI. Never empty.
    pub placeholder: String,
    /// Per-format sources, in configured format order.
    pub sources: Vec<SourceEntry>,
    pub focus: Focus,
    pub object_fit: String,
}

impl Descriptor {
    /// Serialize for a client-side bridge.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> Descriptor {
        Descriptor {
            width: 1600,
            height: 900,
            url: "/media/mock-1600x900.jpg".into(),
            alt: "mock.jpg".into(),
            filename: "mock.jpg".into(),
            placeholder: "data:image/svg+xml,x".into(),
            sources: vec![SourceEntry {
                mime: "image/webp".into(),
                srcset: "/media/mock-400x225.webp 400w".into(),
            }],
            focus: Focus::default(),
            object_fit: "cover".into(),
        }
    }

    #[test]
    fn serializes_field_exact_surface() {
        let json: serde_json::Value =
            serde_json::from_str(&descriptor().to_json().unwrap()).unwrap();

        assert_eq!(json["width"], 1600);
        assert_eq!(json["height"], 900);
        assert_eq!(json["url"], "/media/mock-1600x900.jpg");
        assert_eq!(json["alt"], "mock.jpg");
        assert_eq!(json["filename"], "mock.jpg");
        assert_eq!(json["placeholder"], "data:image/svg+xml,x");
        assert_eq!(json["focus"], "center");
        assert_eq!(json["objectFit"], "cover");
        assert_eq!(json["sources"][0]["type"], "image/webp");
        assert_eq!(json["sources"][0]["srcset"], "/media/mock-400x225.webp 400w");
    }

    #[test]
    fn percent_focus_serializes_as_object() {
        let mut d = descriptor();
        d.focus = Focus::Percent { x: 25.0, y: 75.0 };
        let json: serde_json::Value = serde_json::from_str(&d.to_json().unwrap()).unwrap();
        assert_eq!(json["focus"]["x"], 25.0);
        assert_eq!(json["focus"]["y"], 75.0);
    }
}
