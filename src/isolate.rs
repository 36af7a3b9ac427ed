//! Scoping components so sibling instances don't see each other's events.
//!
//! A component doesn't isolate itself. Whoever composes it wraps it with [isolate] (or
//! [isolate_with]), which re-roots the component's [DomSource] to its scope and marks the root of
//! every view it renders with the scope's class. The component's own code stays unaware.

use log::debug;
use crate::dom::{DomSource, Scope};
use crate::graph::FlowGraph;
use crate::stream::Stream;
use crate::vdom::VNode;

/// Component inputs which can be narrowed to a scope.
pub trait IsolateSources {
    fn isolate_sources(self, scope: &Scope) -> Self;
}

/// Component outputs which can be marked as belonging to a scope.
pub trait IsolateSinks {
    fn isolate_sinks(self, g: &FlowGraph, scope: &Scope) -> Self;
}

impl IsolateSources for DomSource {
    fn isolate_sources(self, scope: &Scope) -> Self {
        self.isolate(scope)
    }
}

impl IsolateSinks for Stream<VNode> {
    fn isolate_sinks(self, g: &FlowGraph, scope: &Scope) -> Self {
        let class = scope.class_name();
        self.map(g, move |view| view.clone().with_class(&class))
    }
}

/// Wrap `component` in a fresh scope.
pub fn isolate<So, Si, F>(component: F) -> impl FnOnce(&FlowGraph, So) -> Si
where So: IsolateSources, Si: IsolateSinks, F: FnOnce(&FlowGraph, So) -> Si {
    isolate_with(component, Scope::fresh())
}

/// Wrap `component` in `scope`.
pub fn isolate_with<So, Si, F>(component: F, scope: Scope) -> impl FnOnce(&FlowGraph, So) -> Si
where So: IsolateSources, Si: IsolateSinks, F: FnOnce(&FlowGraph, So) -> Si {
    move |g, sources| {
        debug!("isolate: scope {}", scope.name());
        let sinks = component(g, sources.isolate_sources(&scope));
        sinks.isolate_sinks(g, &scope)
    }
}
