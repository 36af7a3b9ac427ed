//! Reactive components built from streams.
//!
//! A component is a function from input streams ("sources": DOM events, configuration) to output
//! streams ("sinks": rendered views, values other components consume). Nothing is mutated: each
//! change produces a new view.
//!
//! All streams live in a [FlowGraph]. You build the graph with a shared reference, push values
//! into [Source]s, and call [FlowGraph::flush] (which requires a mutable reference) to deliver
//! them. Each delivery visits the graph in creation order, so a node always runs after
//! everything it depends on.
//!
//! ```
//! use rx_widgets::FlowGraph;
//!
//! let mut g = FlowGraph::new();
//! let clicks = g.new_source::<i32>();
//! let total = clicks.stream().start_with(&g, [0]).scan(&g, 0, |total, n| total + n);
//! let seen = total.observe(&g);
//!
//! clicks.push(&g, 2);
//! clicks.push(&g, 3);
//! g.flush();
//! assert_eq!(seen.values(), vec![0, 2, 5]);
//! ```
//!
//! Components see DOM events through a [DomSource], and can be wrapped with [isolate] so that
//! sibling instances rendered into the same container don't see each other's events. The
//! [DomDriver] stands in for a browser: it keeps the latest view and fires events at it.

pub(crate) mod misc;
pub(crate) mod uid;
pub(crate) mod graph;
pub(crate) mod stream;
pub(crate) mod combine;
pub(crate) mod observer;
pub(crate) mod error;
pub mod vdom;
pub(crate) mod dom;
pub(crate) mod isolate;
pub(crate) mod driver;
pub mod components;
pub mod config;

pub use graph::*;
pub use stream::*;
pub use observer::*;
pub use error::*;
pub use dom::*;
pub use isolate::*;
pub use driver::*;
pub use vdom::VNode;
