use crate::graph::FlowGraph;
use crate::stream::Stream;
use crate::uid::next_scope_number;
use crate::vdom::{ElementMeta, Selector};

/// A raw user event, as delivered by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct DomEvent {
    /// `"input"`, `"change"`, `"click"`, ...
    pub kind: String,
    /// Elements from the root of the rendered tree down to the target, both included.
    pub path: Vec<ElementMeta>,
    pub value: EventValue
}

/// What the event target reports.
#[derive(Debug, Clone, PartialEq)]
pub enum EventValue {
    None,
    Number(f64),
    Checked(bool),
    Text(String)
}

/// Name of an isolation boundary. Rendered as a class on the isolated component's root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope(String);

/// Every event the renderer delivers, narrowed to the scopes the component was isolated in.
///
/// Components get one of these as input and pick the events they care about with
/// [DomSource::select].
#[derive(Debug, Clone)]
pub struct DomSource {
    events: Stream<DomEvent>,
    scopes: Vec<Scope>
}

/// Elements matching a selector within a [DomSource].
#[derive(Debug, Clone)]
pub struct DomSelection {
    source: DomSource,
    selector: Selector
}

impl DomEvent {
    pub fn new(kind: &str, path: Vec<ElementMeta>, value: EventValue) -> Self {
        DomEvent {
            kind: kind.to_string(),
            path,
            value
        }
    }

    pub fn target(&self) -> Option<&ElementMeta> {
        self.path.last()
    }
}

impl EventValue {
    /// The number the target reports. Text which parses as a number counts (range inputs
    /// report text). NaN and infinities don't.
    pub fn as_number(&self) -> Option<f64> {
        let number = match self {
            EventValue::Number(number) => Some(*number),
            EventValue::Text(text) => text.trim().parse::<f64>().ok(),
            _ => None
        };
        number.filter(|number| number.is_finite())
    }

    pub fn as_checked(&self) -> Option<bool> {
        match self {
            EventValue::Checked(checked) => Some(*checked),
            _ => None
        }
    }
}

impl Scope {
    pub fn new(name: impl Into<String>) -> Self {
        Scope(name.into())
    }

    /// A scope with a name no other fresh scope on this thread has.
    pub fn fresh() -> Self {
        Scope(format!("{}", next_scope_number()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// The class marking the scope's root element
    pub fn class_name(&self) -> String {
        format!("$scope-{}", self.0)
    }

    /// A selector matching the scope's root element
    pub fn selector(&self) -> String {
        format!(".{}", self.class_name())
    }
}

impl DomSource {
    pub fn new(events: Stream<DomEvent>) -> Self {
        DomSource {
            events,
            scopes: Vec::new()
        }
    }

    pub fn select(&self, selector: &str) -> DomSelection {
        DomSelection {
            source: self.clone(),
            selector: Selector::parse(selector)
        }
    }

    /// The same events, narrowed further to those inside `scope`.
    pub fn isolate(&self, scope: &Scope) -> DomSource {
        let mut scopes = self.scopes.clone();
        scopes.push(scope.clone());
        DomSource {
            events: self.events,
            scopes
        }
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    /// The part of `path` this source can see: from the innermost scope root down, or `None` if
    /// the event isn't inside every scope (in order).
    fn visible<'a>(&self, path: &'a [ElementMeta]) -> Option<&'a [ElementMeta]> {
        let mut start = 0;
        for scope in &self.scopes {
            let class = scope.class_name();
            let offset = path[start..].iter().position(|meta| meta.classes.contains(&class))?;
            start += offset;
        }
        Some(&path[start..])
    }
}

impl DomSelection {
    /// Events of `kind` whose target is, or is inside, an element matching the selector.
    pub fn events(&self, g: &FlowGraph, kind: &str) -> Stream<DomEvent> {
        let source = self.source.clone();
        let selector = self.selector.clone();
        let kind = kind.to_string();
        self.source.events.filter(g, move |event| {
            event.kind == kind && source.visible(&event.path).map_or(false, |visible| {
                visible.iter().any(|meta| selector.matches_meta(meta))
            })
        })
    }
}
