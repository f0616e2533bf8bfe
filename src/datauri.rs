//! Data-URI encoding for placeholders.
//!
//! Two encodings are produced here:
//!
//! - **Binary**: `data:<mime>;base64,...` for raw thumbnail bytes and PNG
//!   bitmaps.
//! - **SVG**: `data:image/svg+xml,...` with the markup minified and
//!   percent-encoded. Slashes, colons, equals signs, semicolons, and commas
//!   stay literal: they are safe inside a `data:` URI body, and keeping them
//!   unescaped makes the string materially shorter without breaking
//!   decodability.
//!
//! The SVG wrappers themselves (Gaussian-blur `<image>` wrapper, neutral-gray
//! fallback rectangle) are rendered with maud.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use maud::html;

/// Encode raw bytes as a base64 `data:` URI.
pub fn base64_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Encode an SVG document as a percent-encoded `data:` URI.
pub fn svg_data_uri(svg: &str) -> String {
    format!("data:image/svg+xml,{}", percent_encode(&minify(svg)))
}

/// Wrap a bitmap URI in an SVG `<image>` with a Gaussian blur filter.
///
/// `opaque` adds an alpha-discretizing step to the filter so the blur does
/// not feather the edges of fully opaque images into transparency. Images
/// with real alpha skip it, since discretizing would dull their edges.
pub fn blurred_svg_uri(
    bitmap_uri: &str,
    width: u32,
    height: u32,
    std_deviation: f32,
    opaque: bool,
) -> String {
    let svg = html! {
        svg xmlns="http://www.w3.org/2000/svg"
            width=(width)
            height=(height)
            viewBox=(format!("0 0 {width} {height}"))
        {
            filter id="b" color-interpolation-filters="sRGB" {
                feGaussianBlur stdDeviation=(std_deviation) {}
                @if opaque {
                    feComponentTransfer {
                        feFuncA type="discrete" tableValues="1 1" {}
                    }
                }
            }
            image filter="url(#b)" x="0" y="0" width="100%" height="100%"
                preserveAspectRatio="none" href=(bitmap_uri) {}
        }
    };
    svg_data_uri(&svg.into_string())
}

/// The ultimate placeholder fallback: a neutral-gray rectangle.
pub fn gray_rect_uri(width: u32, height: u32) -> String {
    let svg = html! {
        svg xmlns="http://www.w3.org/2000/svg"
            width=(width)
            height=(height)
            viewBox=(format!("0 0 {width} {height}"))
        {
            rect width="100%" height="100%" fill="#cccccc" {}
        }
    };
    svg_data_uri(&svg.into_string())
}

/// Collapse whitespace runs to single spaces and close up `"> <"` seams.
fn minify(svg: &str) -> String {
    let mut collapsed = String::with_capacity(svg.len());
    let mut in_whitespace = false;
    for c in svg.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                collapsed.push(' ');
            }
            in_whitespace = true;
        } else {
            collapsed.push(c);
            in_whitespace = false;
        }
    }
    collapsed.trim().replace("> <", "><")
}

/// Percent-encode for a `data:` URI body.
///
/// Unreserved characters plus `/`, `:`, `=`, `;`, and `,` pass through; they
/// are all legal in a URI body, and nested bitmap URIs stay readable.
/// Everything else is escaped byte-wise.
fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' | b':'
            | b'=' | b';' | b',' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
