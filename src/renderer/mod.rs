//! Browser presentation
//!
//! Mirrors scene entities onto absolutely positioned DOM elements. Pointer
//! events never reach the mirrored elements; the container receives them and
//! the scene hit-tests.

#[cfg(target_arch = "wasm32")]
pub mod dom;

#[cfg(target_arch = "wasm32")]
pub use dom::DomRenderer;

use glam::Vec2;

use crate::sim::{Entity, TextStyle};

/// CSS `transform` placing an element's origin point on its `left`/`top`
pub fn transform_css(entity: &Entity) -> String {
    format!(
        "translate({}%, {}%) scale({})",
        -entity.origin.x * 100.0,
        -entity.origin.y * 100.0,
        entity.scale
    )
}

/// CSS `transform-origin` matching the entity's origin
pub fn transform_origin_css(origin: Vec2) -> String {
    format!("{}% {}%", origin.x * 100.0, origin.y * 100.0)
}

/// Inline CSS declarations for a text style
pub fn text_style_css(style: &TextStyle) -> Vec<(&'static str, String)> {
    let mut props = vec![
        ("font-family", "sans-serif".to_string()),
        ("font-size", format!("{}px", style.font_size)),
        ("color", style.fill.clone()),
        (
            "font-weight",
            if style.bold { "bold" } else { "normal" }.to_string(),
        ),
        ("text-align", style.align.as_css().to_string()),
    ];
    match style.word_wrap_width {
        Some(width) => {
            props.push(("white-space", "pre-wrap".to_string()));
            props.push(("width", format!("{}px", width)));
        }
        None => props.push(("white-space", "pre".to_string())),
    }
    props
}

/// Map a client-space point inside a rect onto world coordinates
pub fn client_to_world(client: Vec2, rect_origin: Vec2, rect_size: Vec2, world: Vec2) -> Vec2 {
    if rect_size.x <= 0.0 || rect_size.y <= 0.0 {
        return client - rect_origin;
    }
    (client - rect_origin) * world / rect_size
}
