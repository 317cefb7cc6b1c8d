//! web-sys backend

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

use super::{Element, Page};

impl Element for web_sys::Element {
    type Error = JsValue;

    fn set_class(&self, class: &str, on: bool) -> Result<(), JsValue> {
        self.class_list().toggle_with_force(class, on)?;
        Ok(())
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn append_new(&self, tag: &str, class: &str) -> Result<Self, JsValue> {
        let document = self
            .owner_document()
            .ok_or_else(|| js_sys::Error::new("element is not attached to a document"))?;
        let child = document.create_element(tag)?;
        child.set_class_name(class);
        self.append_child(&child)?;
        Ok(child)
    }

    fn set_style(&self, property: &str, value: &str) -> Result<(), JsValue> {
        let html = self
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| js_sys::Error::new("inline styles need an HTML element"))?;
        html.style().set_property(property, value)
    }
}

impl Page for Document {
    type Element = web_sys::Element;

    fn select_all(&self, selector: &str) -> Vec<web_sys::Element> {
        let Ok(list) = self.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .collect()
    }

    fn select(&self, selector: &str) -> Option<web_sys::Element> {
        self.query_selector(selector).ok().flatten()
    }
}
