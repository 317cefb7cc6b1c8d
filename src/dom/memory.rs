//! In-memory element tree
//!
//! Enough of the DOM to drive the effects without a browser: tags, ids,
//! classes, inline styles and children. Selectors support the simple form
//! `tag#id.class.class` (every part optional).

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::rc::Rc;

use super::{Element, Page};

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    style: BTreeMap<String, String>,
    children: Vec<MemoryElement>,
}

/// Shared handle to an in-memory element
#[derive(Debug, Clone)]
pub struct MemoryElement(Rc<RefCell<NodeData>>);

impl MemoryElement {
    pub fn new(tag: &str) -> Self {
        Self(Rc::new(RefCell::new(NodeData {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        })))
    }

    /// Builder: add a class
    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Builder: set the id
    pub fn with_id(self, id: &str) -> Self {
        self.0.borrow_mut().id = Some(id.to_string());
        self
    }

    /// Append an existing element as the last child
    pub fn append(&self, child: &MemoryElement) {
        self.0.borrow_mut().children.push(child.clone());
    }

    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    pub fn id(&self) -> Option<String> {
        self.0.borrow().id.clone()
    }

    pub fn classes(&self) -> Vec<String> {
        self.0.borrow().classes.clone()
    }

    pub fn children(&self) -> Vec<MemoryElement> {
        self.0.borrow().children.clone()
    }

    /// Inline style value for a property
    pub fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().style.get(property).cloned()
    }

    /// Whether both handles point at the same node
    pub fn ptr_eq(&self, other: &MemoryElement) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// This element and every descendant, in document order
    pub fn descendants(&self) -> Vec<MemoryElement> {
        let mut out = Vec::new();
        let mut stack = vec![self.clone()];
        while let Some(node) = stack.pop() {
            // Push children reversed so the first child is visited next
            stack.extend(node.children().into_iter().rev());
            out.push(node);
        }
        out
    }

    /// Check against a simple selector (`tag#id.class...`)
    pub fn matches(&self, selector: &str) -> bool {
        let Some(parsed) = SimpleSelector::parse(selector) else {
            return false;
        };
        let node = self.0.borrow();
        if parsed.tag.is_some_and(|t| !t.eq_ignore_ascii_case(&node.tag)) {
            return false;
        }
        if parsed.id.is_some_and(|id| node.id.as_deref() != Some(id)) {
            return false;
        }
        parsed
            .classes
            .iter()
            .all(|c| node.classes.iter().any(|have| have == c))
    }

    fn add_class(&self, class: &str) {
        let mut node = self.0.borrow_mut();
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.retain(|c| c != class);
    }
}

impl Element for MemoryElement {
    type Error = Infallible;

    fn set_class(&self, class: &str, on: bool) -> Result<(), Self::Error> {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
        Ok(())
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    fn append_new(&self, tag: &str, class: &str) -> Result<Self, Self::Error> {
        let child = MemoryElement::new(tag).with_class(class);
        self.append(&child);
        Ok(child)
    }

    fn set_style(&self, property: &str, value: &str) -> Result<(), Self::Error> {
        self.0
            .borrow_mut()
            .style
            .insert(property.to_string(), value.to_string());
        Ok(())
    }
}

/// Parsed `tag#id.class.class` selector
struct SimpleSelector<'a> {
    tag: Option<&'a str>,
    id: Option<&'a str>,
    classes: Vec<&'a str>,
}

impl<'a> SimpleSelector<'a> {
    fn parse(selector: &'a str) -> Option<Self> {
        let selector = selector.trim();
        if selector.is_empty() || selector.contains(char::is_whitespace) {
            return None;
        }

        let mut parsed = SimpleSelector {
            tag: None,
            id: None,
            classes: Vec::new(),
        };

        // Split into segments, each starting at '.' or '#'
        let mut start = 0;
        let bytes = selector.as_bytes();
        for i in 1..=bytes.len() {
            if i < bytes.len() && bytes[i] != b'.' && bytes[i] != b'#' {
                continue;
            }
            let segment = &selector[start..i];
            match segment.as_bytes()[0] {
                b'.' => parsed.classes.push(&segment[1..]),
                b'#' => parsed.id = Some(&segment[1..]),
                _ => parsed.tag = Some(segment),
            }
            start = i;
        }

        let has_empty = parsed.classes.iter().any(|c| c.is_empty()) || parsed.id == Some("");
        if has_empty { None } else { Some(parsed) }
    }
}

/// A document backed by a [`MemoryElement`] tree rooted at `<body>`
#[derive(Debug, Clone)]
pub struct MemoryPage {
    body: MemoryElement,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    pub fn new() -> Self {
        Self {
            body: MemoryElement::new("body"),
        }
    }

    pub fn body(&self) -> &MemoryElement {
        &self.body
    }

    /// Landing page markup: a `.hero-section` holding a phrase with `words`
    /// as `.rotating-word` spans. Without `with_hero` the words sit in a
    /// plain header instead.
    pub fn landing(words: &[&str], with_hero: bool) -> Self {
        let page = Self::new();
        let section = if with_hero {
            MemoryElement::new("section").with_class("hero-section")
        } else {
            MemoryElement::new("header")
        };
        let title = MemoryElement::new("h1").with_class("hero-title");
        for word in words {
            let span = MemoryElement::new("span")
                .with_class("rotating-word")
                .with_id(&word.to_ascii_lowercase());
            title.append(&span);
        }
        section.append(&title);
        page.body.append(&section);
        page
    }
}

impl Page for MemoryPage {
    type Element = MemoryElement;

    fn select_all(&self, selector: &str) -> Vec<MemoryElement> {
        self.body
            .descendants()
            .into_iter()
            .filter(|el| el.matches(selector))
            .collect()
    }

    fn select(&self, selector: &str) -> Option<MemoryElement> {
        self.body
            .descendants()
            .into_iter()
            .find(|el| el.matches(selector))
    }
}
