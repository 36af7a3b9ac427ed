use log::debug;
use thiserror::Error;
use crate::dom::{DomEvent, DomSource, EventValue};
use crate::error::StreamError;
use crate::graph::FlowGraph;
use crate::observer::Observer;
use crate::stream::{Source, Stream};
use crate::vdom::{Selector, VNode};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DriverError {
    #[error("nothing has been rendered yet")]
    NothingRendered,
    #[error("no rendered element matches `{0}`")]
    NoMatch(String),
    #[error("view stream failed: {0}")]
    Stream(#[from] StreamError)
}

/// In-memory renderer: keeps the latest view a component rendered and turns user actions on it
/// into [DomEvent]s for the component's [DomSource].
#[derive(Debug)]
pub struct DomDriver {
    events: Source<DomEvent>,
    view: Option<Observer<VNode>>
}

/// Run `main` against a new [DomDriver], like a browser would: `main` gets the driver's events,
/// the driver gets `main`'s views.
pub fn run<F: FnOnce(&FlowGraph, DomSource) -> Stream<VNode>>(g: &FlowGraph, main: F) -> DomDriver {
    let mut driver = DomDriver::new(g);
    let view = main(g, driver.dom_source());
    driver.attach(g, view);
    driver
}

impl DomDriver {
    pub fn new(g: &FlowGraph) -> Self {
        DomDriver {
            events: g.new_source(),
            view: None
        }
    }

    pub fn dom_source(&self) -> DomSource {
        DomSource::new(self.events.stream())
    }

    /// Render `view` from now on. Only the latest view is kept.
    pub fn attach(&mut self, g: &FlowGraph, view: Stream<VNode>) {
        self.view = Some(view.observe_latest(g));
    }

    /// The latest rendered view
    pub fn current(&self) -> Option<VNode> {
        self.view.as_ref().and_then(Observer::latest)
    }

    /// The latest rendered view as HTML
    pub fn html(&self) -> Option<String> {
        self.current().map(|view| view.to_string())
    }

    /// How many views were rendered
    pub fn render_count(&self) -> usize {
        self.view.as_ref().map_or(0, Observer::count)
    }

    /// The error the view stream failed with, if it did
    pub fn error(&self) -> Option<StreamError> {
        self.view.as_ref().and_then(Observer::error)
    }

    /// Fire a `kind` event at the first element of the current view matching `selectors`, a
    /// descendant chain like `".weight input"`. The event is delivered on the next flush.
    pub fn dispatch(&self, g: &FlowGraph, selectors: &str, kind: &str, value: EventValue) -> Result<(), DriverError> {
        if let Some(error) = self.error() {
            return Err(error.into());
        }
        let view = self.current().ok_or(DriverError::NothingRendered)?;
        let root = view.as_element().ok_or_else(|| DriverError::NoMatch(selectors.to_string()))?;
        let path = root.find_path(&Selector::parse_chain(selectors))
            .ok_or_else(|| DriverError::NoMatch(selectors.to_string()))?;
        debug!("dispatch: {} on `{}` ({:?})", kind, selectors, value);
        let path = path.into_iter().map(|element| element.meta()).collect();
        self.events.push(g, DomEvent::new(kind, path, value));
        Ok(())
    }

    /// Set a range input's value.
    pub fn input(&self, g: &FlowGraph, selectors: &str, value: f64) -> Result<(), DriverError> {
        self.dispatch(g, selectors, "input", EventValue::Number(value))
    }

    pub fn click(&self, g: &FlowGraph, selectors: &str) -> Result<(), DriverError> {
        self.dispatch(g, selectors, "click", EventValue::None)
    }

    /// Check or uncheck a checkbox.
    pub fn change(&self, g: &FlowGraph, selectors: &str, checked: bool) -> Result<(), DriverError> {
        self.dispatch(g, selectors, "change", EventValue::Checked(checked))
    }
}
