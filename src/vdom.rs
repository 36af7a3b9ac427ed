//! Immutable view trees.
//!
//! Components never mutate a tree, they build a new one for every change. Elements are created
//! hyperscript-style from a selector (`div(".labeled-slider")`, `h("input#weight")`).

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
pub enum VNode {
    Element(Element),
    Text(String)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, AttrValue>,
    pub children: Vec<VNode>
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Number(f64),
    Bool(bool)
}

/// Simple selector: optional tag, optional `#id`, any number of `.class`es.
///
/// An empty selector matches every element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>
}

/// The parts of an element selectors look at.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementMeta {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>
}

/// Create an element from a selector like `"input#weight.slider"`. The tag defaults to `div`.
pub fn h(selector: &str) -> Element {
    let selector = Selector::parse(selector);
    Element {
        tag: selector.tag.unwrap_or_else(|| "div".to_string()),
        id: selector.id,
        classes: selector.classes,
        attrs: BTreeMap::new(),
        children: Vec::new()
    }
}

pub fn div(selector: &str) -> Element {
    h(&format!("div{}", selector))
}

pub fn span(selector: &str) -> Element {
    h(&format!("span{}", selector))
}

pub fn input(selector: &str) -> Element {
    h(&format!("input{}", selector))
}

pub fn button(selector: &str) -> Element {
    h(&format!("button{}", selector))
}

pub fn p(selector: &str) -> Element {
    h(&format!("p{}", selector))
}

pub fn h2(selector: &str) -> Element {
    h(&format!("h2{}", selector))
}

pub fn text(text: impl Into<String>) -> VNode {
    VNode::Text(text.into())
}

impl Element {
    pub fn attr(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
        self
    }

    pub fn child(mut self, child: impl Into<VNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I: IntoIterator<Item=VNode>>(mut self, children: I) -> Self {
        self.children.extend(children);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn get_attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    /// All text in this element, concatenated.
    pub fn text_content(&self) -> String {
        self.children.iter().map(VNode::text_content).collect()
    }

    pub fn meta(&self) -> ElementMeta {
        ElementMeta {
            tag: self.tag.clone(),
            id: self.id.clone(),
            classes: self.classes.clone()
        }
    }

    /// Every element in this tree, depth-first, parents before children.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut result = vec![self];
        for child in &self.children {
            if let VNode::Element(child) = child {
                result.extend(child.descendants());
            }
        }
        result
    }

    /// Find the first element (depth-first) matching the last of `chain`, whose ancestors match
    /// the rest of `chain` in order, like a CSS descendant selector.
    ///
    /// Returns the path from this element down to the match, both included.
    pub fn find_path(&self, chain: &[Selector]) -> Option<Vec<&Element>> {
        let (target, ancestors) = chain.split_last()?;
        let mut path = Vec::new();
        self.find_path_rec(target, ancestors, &mut path)
    }

    fn find_path_rec<'a>(&'a self, target: &Selector, ancestors: &[Selector], path: &mut Vec<&'a Element>) -> Option<Vec<&'a Element>> {
        path.push(self);
        if target.matches(self) && matches_in_order(ancestors, &path[..path.len() - 1]) {
            return Some(path.clone());
        }
        for child in &self.children {
            if let VNode::Element(child) = child {
                if let Some(found) = child.find_path_rec(target, ancestors, path) {
                    return Some(found);
                }
            }
        }
        path.pop();
        None
    }
}

/// Whether `selectors` match a subsequence of `path`, in order.
fn matches_in_order(selectors: &[Selector], path: &[&Element]) -> bool {
    let mut selectors = selectors.iter().peekable();
    for element in path {
        if selectors.peek().map_or(false, |selector| selector.matches(element)) {
            selectors.next();
        }
    }
    selectors.peek().is_none()
}

impl VNode {
    /// All text in this tree, concatenated.
    pub fn text_content(&self) -> String {
        match self {
            VNode::Text(text) => text.clone(),
            VNode::Element(element) => element.text_content()
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            VNode::Element(element) => Some(element),
            VNode::Text(_) => None
        }
    }

    /// Add `class` to the root element. Text nodes are returned as is.
    pub fn with_class(self, class: &str) -> VNode {
        match self {
            VNode::Element(element) => VNode::Element(element.class(class)),
            text => text
        }
    }

    /// First element matching `selector`, depth-first.
    pub fn find(&self, selector: &str) -> Option<&Element> {
        let selector = Selector::parse(selector);
        self.as_element()?.descendants().into_iter().find(|element| selector.matches(element))
    }
}

impl Selector {
    pub fn parse(selector: &str) -> Selector {
        let mut result = Selector::default();
        let mut rest = selector.trim();
        let tag_end = rest.find(&['#', '.'][..]).unwrap_or(rest.len());
        if tag_end > 0 {
            result.tag = Some(rest[..tag_end].to_string());
        }
        rest = &rest[tag_end..];
        while let Some(marker) = rest.chars().next() {
            let end = rest[1..].find(&['#', '.'][..]).map_or(rest.len(), |end| end + 1);
            let name = rest[1..end].to_string();
            if !name.is_empty() {
                match marker {
                    '#' => result.id = Some(name),
                    _ => result.classes.push(name)
                }
            }
            rest = &rest[end..];
        }
        result
    }

    /// Parse a descendant chain like `".weight .slider"`.
    pub fn parse_chain(chain: &str) -> Vec<Selector> {
        chain.split_whitespace().map(Selector::parse).collect()
    }

    pub fn matches(&self, element: &Element) -> bool {
        self.matches_parts(&element.tag, element.id.as_deref(), &element.classes)
    }

    pub fn matches_meta(&self, meta: &ElementMeta) -> bool {
        self.matches_parts(&meta.tag, meta.id.as_deref(), &meta.classes)
    }

    fn matches_parts(&self, tag: &str, id: Option<&str>, classes: &[String]) -> bool {
        self.tag.as_deref().map_or(true, |t| t == tag) &&
            self.id.as_deref().map_or(true, |i| Some(i) == id) &&
            self.classes.iter().all(|class| classes.contains(class))
    }
}

impl From<Element> for VNode {
    fn from(element: Element) -> Self {
        VNode::Element(element)
    }
}

impl From<&str> for VNode {
    fn from(text: &str) -> Self {
        VNode::Text(text.to_string())
    }
}

impl From<String> for VNode {
    fn from(text: String) -> Self {
        VNode::Text(text)
    }
}

impl From<&str> for AttrValue {
    fn from(text: &str) -> Self {
        AttrValue::Text(text.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(text: String) -> Self {
        AttrValue::Text(text)
    }
}

impl From<f64> for AttrValue {
    fn from(number: f64) -> Self {
        AttrValue::Number(number)
    }
}

impl From<bool> for AttrValue {
    fn from(flag: bool) -> Self {
        AttrValue::Bool(flag)
    }
}

impl Display for AttrValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AttrValue::Text(text) => write!(f, "{}", escape(text)),
            AttrValue::Number(number) => write!(f, "{}", number),
            AttrValue::Bool(flag) => write!(f, "{}", flag)
        }
    }
}

const VOID_TAGS: [&str; 4] = ["input", "br", "hr", "img"];

/// Renders as HTML.
impl Display for VNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VNode::Text(text) => write!(f, "{}", escape(text)),
            VNode::Element(element) => write!(f, "{}", element)
        }
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}", self.tag)?;
        if let Some(id) = &self.id {
            write!(f, " id=\"{}\"", escape(id))?;
        }
        if !self.classes.is_empty() {
            write!(f, " class=\"{}\"", escape(&self.classes.join(" ")))?;
        }
        for (name, value) in &self.attrs {
            write!(f, " {}=\"{}\"", name, value)?;
        }
        write!(f, ">")?;
        if VOID_TAGS.contains(&self.tag.as_str()) {
            return Ok(());
        }
        for child in &self.children {
            write!(f, "{}", child)?;
        }
        write!(f, "</{}>", self.tag)
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
