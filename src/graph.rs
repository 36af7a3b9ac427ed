use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt::{Debug, Formatter};
use log::{debug, trace, warn};
use crate::error::{StreamError, Terminal};
use crate::misc::slice_split3::SliceSplit3;
use crate::stream::{Source, Stream};
use crate::uid::GraphUid;

/// The centralized structure which contains every stream of a program.
///
/// Streams are nodes in a directed-acyclic-graph. A node can only take input from nodes
/// created before it, so the graph is acyclic by construction. At the top of the graph are
/// [Source]s, which you push values into; every other node is an operator which reacts to
/// its inputs.
///
/// Pushing into a [Source] doesn't propagate anything yet: the value is queued until
/// [FlowGraph::flush], which requires a mutable reference. Each queued value then gets its own
/// *tick*, so two pushes are two separate deliveries downstream.
///
/// ## Implementation
///
/// Internally this is a vector of nodes in creation order. A tick iterates through each node
/// and calls [NodeTrait::recompute] with a slice of the nodes before it. The node runs its
/// operator if one of its inputs emitted, completed or failed during this tick, then holds its
/// own output until the tick ends, when [NodeTrait::post_recompute] clears it.
///
/// Nodes which were added since the last flush also run on their first tick even without input.
/// This is when they are "subscribed", and is when [FlowGraph::of] and [Stream::start_with] emit.
///
/// The graph and handles have an ID so that you can't use one handle on another graph, however
/// this is only checked in debug builds.
pub struct FlowGraph {
    nodes: RefCell<Vec<Box<dyn NodeTrait>>>,
    pending: RefCell<VecDeque<(usize, Box<dyn Any>)>>,
    started: usize,
    id: GraphUid
}

/// What a node sees while it recomputes: the outputs its inputs produced this tick.
pub struct Tick<'a> {
    before: &'a [Box<dyn NodeTrait>],
    index: usize,
    starting: bool,
    event_target: Option<usize>,
    payload: &'a Cell<Option<Box<dyn Any>>>,
    id: GraphUid
}

/// Collects what a node produces during one tick.
pub struct Emit<T> {
    values: Vec<T>,
    terminal: Option<Terminal>
}

/// What a [Source] delivers on its tick.
pub(crate) enum Signal<T> {
    Next(T),
    Complete,
    Error(StreamError)
}

pub(crate) trait NodeTrait {
    fn recompute(&mut self, tick: &Tick<'_>);
    fn post_recompute(&mut self);

    /// Emitted, completed or failed during this tick
    fn is_active(&self) -> bool;
    /// Failed during this tick
    fn error_now(&self) -> Option<&StreamError>;
    /// Completed during this tick
    fn completed_now(&self) -> bool;
    /// Completed or failed, now or in an earlier tick
    fn is_done(&self) -> bool;

    fn label(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
}

pub(crate) struct NodeImpl<T> {
    label: &'static str,
    inputs: Vec<usize>,
    observes_errors: bool,
    compute: Box<dyn FnMut(&Tick<'_>, &mut Emit<T>)>,
    out: Emit<T>,
    terminal: Option<Terminal>,
    terminated_now: bool
}

impl FlowGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        FlowGraph {
            nodes: RefCell::new(Vec::new()),
            pending: RefCell::new(VecDeque::new()),
            started: 0,
            id: GraphUid::next()
        }
    }

    /// Create a [Source] in this graph, which you push values into.
    pub fn new_source<T: 'static>(&self) -> Source<T> {
        let stream = self.new_node("source", Vec::new(), |tick, out| {
            match tick.take_event::<T>() {
                None => {}
                Some(Signal::Next(value)) => out.emit(value),
                Some(Signal::Complete) => out.complete(),
                Some(Signal::Error(error)) => out.fail(error)
            }
        });
        Source::new(stream)
    }

    /// Create a stream which emits `values` when it is first flushed, then completes.
    pub fn of<T: 'static, I: IntoIterator<Item=T>>(&self, values: I) -> Stream<T> {
        let mut values = Some(values.into_iter().collect::<Vec<_>>());
        self.new_node("of", Vec::new(), move |tick, out| {
            if tick.starting() {
                for value in values.take().into_iter().flatten() {
                    out.emit(value);
                }
                out.complete();
            }
        })
    }

    /// Create a stream which never emits nor completes.
    pub fn never<T: 'static>(&self) -> Stream<T> {
        self.new_node("never", Vec::new(), |_, _| {})
    }

    /// Create a node computed from `inputs` by `compute`.
    ///
    /// `compute` runs whenever one of `inputs` is active in a tick, plus once on the node's first
    /// tick. If an input fails, the node fails with the same error instead and `compute` isn't run.
    /// After the node completes or fails `compute` is never run again.
    pub fn new_node<T: 'static, F: FnMut(&Tick<'_>, &mut Emit<T>) + 'static>(&self, label: &'static str, inputs: Vec<usize>, compute: F) -> Stream<T> {
        self.push_node(label, inputs, false, compute)
    }

    /// Like [FlowGraph::new_node], but `compute` also runs when an input fails, and can see the
    /// error through [Tick::error]. For nodes at the edge of the graph which report failures.
    pub fn new_observing_node<T: 'static, F: FnMut(&Tick<'_>, &mut Emit<T>) + 'static>(&self, label: &'static str, inputs: Vec<usize>, compute: F) -> Stream<T> {
        self.push_node(label, inputs, true, compute)
    }

    fn push_node<T: 'static, F: FnMut(&Tick<'_>, &mut Emit<T>) + 'static>(&self, label: &'static str, inputs: Vec<usize>, observes_errors: bool, compute: F) -> Stream<T> {
        let index = self.next_index();
        debug_assert!(inputs.iter().all(|input| *input < index), "FlowGraph::new_node: input refers to a future node (not a DAG?)");
        let node = NodeImpl {
            label,
            inputs,
            observes_errors,
            compute: Box::new(compute),
            out: Emit::new(),
            terminal: None,
            terminated_now: false
        };
        self.nodes.borrow_mut().push(Box::new(node));
        Stream::new(index, self.id)
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of pushed values waiting for [FlowGraph::flush]
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Start new nodes and deliver every queued value, one tick per value, in push order.
    pub fn flush(&mut self) {
        debug!("flush: {} nodes, {} pending", self.len(), self.pending());
        if self.started < self.nodes.get_mut().len() {
            self.tick(None);
        }
        while let Some(event) = self.pending.get_mut().pop_front() {
            self.tick(Some(event));
        }
    }

    fn tick(&mut self, event: Option<(usize, Box<dyn Any>)>) {
        let starting_from = self.started;
        let event_target = event.as_ref().map(|(target, _)| *target);
        let payload = Cell::new(event.map(|(_, payload)| payload));
        let id = self.id;
        trace!("tick: event_target={:?} starting_from={}", event_target, starting_from);

        let nodes = self.nodes.get_mut();
        nodes.for_each_split3_mut(|index, before, current, _after| {
            let tick = Tick {
                before,
                index,
                starting: index >= starting_from,
                event_target,
                payload: &payload,
                id
            };
            current.recompute(&tick);
        });
        if payload.take().is_some() {
            warn!("tick: event for node {:?} was not consumed", event_target);
        }

        for node in nodes.iter_mut() {
            node.post_recompute();
        }
        self.started = nodes.len();
    }

    pub(crate) fn enqueue(&self, target: usize, payload: Box<dyn Any>) {
        self.pending.borrow_mut().push_back((target, payload));
    }

    pub(crate) fn id(&self) -> GraphUid {
        self.id
    }

    fn next_index(&self) -> usize {
        self.nodes.borrow().len()
    }
}

impl Default for FlowGraph {
    fn default() -> Self {
        FlowGraph::new()
    }
}

impl Debug for FlowGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowGraph")
            .field("nodes", &self.nodes.borrow().iter().map(|node| node.label()).collect::<Vec<_>>())
            .field("pending", &self.pending.borrow().len())
            .field("started", &self.started)
            .finish_non_exhaustive()
    }
}

impl<'a> Tick<'a> {
    /// Values `stream` emitted during this tick, in order.
    pub fn values<T: 'static>(&self, stream: Stream<T>) -> &'a [T] {
        &self.node(stream).out.values
    }

    /// Whether `stream` completed (not failed) during this tick.
    pub fn completed<T: 'static>(&self, stream: Stream<T>) -> bool {
        self.input(stream.index()).completed_now()
    }

    /// Whether `stream` has completed or failed, during this tick or before.
    pub fn is_done<T: 'static>(&self, stream: Stream<T>) -> bool {
        self.input(stream.index()).is_done()
    }

    /// The error `stream` failed with during this tick.
    pub fn error<T: 'static>(&self, stream: Stream<T>) -> Option<&'a StreamError> {
        self.input(stream.index()).error_now()
    }

    /// Whether this is the node's first tick.
    pub fn starting(&self) -> bool {
        self.starting
    }

    fn take_event<T: 'static>(&self) -> Option<Signal<T>> {
        if self.event_target != Some(self.index) {
            return None;
        }
        let payload = self.payload.take()?;
        match payload.downcast::<Signal<T>>() {
            Ok(signal) => Some(*signal),
            Err(_) => {
                warn!("tick: event for node {} has the wrong type, dropped", self.index);
                None
            }
        }
    }

    fn is_event_target(&self) -> bool {
        self.event_target == Some(self.index)
    }

    fn input(&self, index: usize) -> &'a dyn NodeTrait {
        debug_assert!(index < self.before.len(), "Tick::input: node reads a future node (not a DAG?)");
        self.before[index].as_ref()
    }

    fn node<T: 'static>(&self, stream: Stream<T>) -> &'a NodeImpl<T> {
        debug_assert!(stream.graph_id() == self.id, "Tick::node: stream is from a different graph");
        self.input(stream.index())
            .as_any()
            .downcast_ref::<NodeImpl<T>>()
            .expect("Stream handle is corrupt: node has a different type")
    }
}

impl<T> Emit<T> {
    fn new() -> Self {
        Emit {
            values: Vec::new(),
            terminal: None
        }
    }

    /// Deliver a value downstream. Ignored once the node completed or failed.
    pub fn emit(&mut self, value: T) {
        if self.terminal.is_none() {
            self.values.push(value);
        }
    }

    /// Deliver several values downstream, in order.
    pub fn extend<I: IntoIterator<Item=T>>(&mut self, values: I) {
        for value in values {
            self.emit(value);
        }
    }

    /// End the stream after the values emitted so far.
    pub fn complete(&mut self) {
        if self.terminal.is_none() {
            self.terminal = Some(Terminal::Complete);
        }
    }

    /// End the stream with an error.
    pub fn fail(&mut self, error: StreamError) {
        if self.terminal.is_none() {
            self.terminal = Some(Terminal::Error(error));
        }
    }
}

impl<T: 'static> NodeTrait for NodeImpl<T> {
    fn recompute(&mut self, tick: &Tick<'_>) {
        if self.terminal.is_some() {
            return;
        }

        let inputs = self.inputs.iter().map(|index| tick.input(*index));
        let input_error = inputs.clone().find_map(|input| input.error_now());
        if let (Some(error), false) = (input_error, self.observes_errors) {
            trace!("node {} ({}): input failed: {}", tick.index, self.label, error);
            self.out.fail(error.clone());
        } else if tick.starting() || tick.is_event_target() || inputs.clone().any(|input| input.is_active()) {
            (self.compute)(tick, &mut self.out);
        }

        if let Some(terminal) = self.out.terminal.take() {
            trace!("node {} ({}): {:?}", tick.index, self.label, terminal);
            self.terminal = Some(terminal);
            self.terminated_now = true;
        }
    }

    fn post_recompute(&mut self) {
        self.out.values.clear();
        self.terminated_now = false;
    }

    fn is_active(&self) -> bool {
        !self.out.values.is_empty() || self.terminated_now
    }

    fn error_now(&self) -> Option<&StreamError> {
        match &self.terminal {
            Some(terminal) if self.terminated_now => terminal.error(),
            _ => None
        }
    }

    fn completed_now(&self) -> bool {
        self.terminated_now && self.terminal == Some(Terminal::Complete)
    }

    fn is_done(&self) -> bool {
        self.terminal.is_some()
    }

    fn label(&self) -> &'static str {
        self.label
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T> Debug for NodeImpl<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeImpl")
            .field("label", &self.label)
            .field("inputs", &self.inputs)
            .field("out.values.len()", &self.out.values.len())
            .field("terminal", &self.terminal)
            .finish_non_exhaustive()
    }
}
