//! DOM renderer
//!
//! One element per scene entity, created on first sight and updated in place
//! every frame. Style writes are skipped when the value has not changed.

use std::collections::HashMap;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, HtmlImageElement};

use super::{text_style_css, transform_css, transform_origin_css};
use crate::sim::{Entity, EntityId, EntityKind, Scene};

/// A mirrored entity and the values last written to it
struct Node {
    el: HtmlElement,
    styles: HashMap<&'static str, String>,
    text: Option<String>,
}

impl Node {
    fn set_style(&mut self, prop: &'static str, value: String) {
        if self.styles.get(prop) == Some(&value) {
            return;
        }
        if let Err(e) = self.el.style().set_property(prop, &value) {
            log::warn!("Failed to set {}: {:?}", prop, e);
            return;
        }
        self.styles.insert(prop, value);
    }

    fn set_text(&mut self, text: &str) {
        if self.text.as_deref() == Some(text) {
            return;
        }
        self.el.set_text_content(Some(text));
        self.text = Some(text.to_string());
    }
}

pub struct DomRenderer {
    document: Document,
    container: HtmlElement,
    nodes: HashMap<EntityId, Node>,
    cursor: Option<String>,
}

impl DomRenderer {
    /// Take over `container` as the playfield for `scene`
    pub fn new(document: Document, container: HtmlElement, scene: &Scene) -> Self {
        let world = scene.world();
        let style = container.style();
        let props = [
            ("position", "relative".to_string()),
            ("overflow", "hidden".to_string()),
            ("width", format!("{}px", world.x)),
            ("height", format!("{}px", world.y)),
            ("background-color", scene.background_color().to_string()),
            ("user-select", "none".to_string()),
            ("touch-action", "none".to_string()),
        ];
        for (prop, value) in props {
            if let Err(e) = style.set_property(prop, &value) {
                log::warn!("Failed to style container ({}): {:?}", prop, e);
            }
        }

        Self {
            document,
            container,
            nodes: HashMap::new(),
            cursor: None,
        }
    }

    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    /// Bring the DOM in line with the scene
    pub fn sync(&mut self, scene: &Scene) {
        if scene.cursor() != self.cursor.as_deref() {
            if let Some(cursor) = scene.cursor() {
                let _ = self.container.style().set_property("cursor", cursor);
            }
            self.cursor = scene.cursor().map(str::to_string);
        }

        for entity in scene.entities() {
            if !self.nodes.contains_key(&entity.id) {
                match self.create_node(scene, entity) {
                    Ok(node) => {
                        self.nodes.insert(entity.id, node);
                    }
                    Err(e) => {
                        log::warn!("Failed to create element for {:?}: {:?}", entity.id, e);
                        continue;
                    }
                }
            }
            if let Some(node) = self.nodes.get_mut(&entity.id) {
                update_node(node, entity);
            }
        }

        // Drop elements whose entities are gone
        self.nodes.retain(|id, node| {
            let alive = scene.entity(*id).is_some();
            if !alive {
                node.el.remove();
            }
            alive
        });
    }

    fn create_node(&self, scene: &Scene, entity: &Entity) -> Result<Node, JsValue> {
        let el: HtmlElement = match &entity.kind {
            EntityKind::Image { texture } => {
                let img: HtmlImageElement = self.document.create_element("img")?.dyn_into()?;
                match scene.texture(texture) {
                    Some(t) => img.set_src(&t.url),
                    None => log::warn!("No texture '{}' for {:?}", texture, entity.id),
                }
                img.set_draggable(false);
                img.into()
            }
            EntityKind::Text { style, .. } => {
                let div: HtmlElement = self.document.create_element("div")?.dyn_into()?;
                let css = div.style();
                for (prop, value) in text_style_css(style) {
                    css.set_property(prop, &value)?;
                }
                div
            }
        };

        let css = el.style();
        css.set_property("position", "absolute")?;
        css.set_property("pointer-events", "none")?;
        self.container.append_child(&el)?;

        Ok(Node {
            el,
            styles: HashMap::new(),
            text: None,
        })
    }
}

fn update_node(node: &mut Node, entity: &Entity) {
    node.set_style("left", format!("{}px", entity.pos.x));
    node.set_style("top", format!("{}px", entity.pos.y));
    node.set_style("transform", transform_css(entity));
    node.set_style("transform-origin", transform_origin_css(entity.origin));
    node.set_style(
        "display",
        if entity.visible { "block" } else { "none" }.to_string(),
    );
    if let Some(text) = entity.text() {
        node.set_text(text);
    }
}
