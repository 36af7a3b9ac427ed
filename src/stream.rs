use std::collections::VecDeque;
use std::fmt::Debug;
use std::marker::PhantomData;
use derivative::Derivative;
use crate::error::StreamError;
use crate::graph::{FlowGraph, Signal};
use crate::observer::Observer;
use crate::uid::GraphUid;

/// Index into the [FlowGraph] which gives you a stream of values.
///
/// Handles are cheap to copy. To build on a stream you need a shared reference to the graph, and
/// to see its values you [Stream::observe] it and [FlowGraph::flush].
#[derive(Derivative)]
#[derivative(Debug(bound = ""), Clone(bound = ""), Copy(bound = ""), PartialEq(bound = ""), Eq(bound = ""))]
pub struct Stream<T> {
    index: usize,
    graph_id: GraphUid,
    #[derivative(Debug = "ignore")]
    phantom: PhantomData<fn() -> T>
}

/// Index into the [FlowGraph] which gives you a stream you can push values into.
#[derive(Derivative)]
#[derivative(Debug(bound = ""), Clone(bound = ""), Copy(bound = ""), PartialEq(bound = ""), Eq(bound = ""))]
pub struct Source<T>(Stream<T>);

impl<T: 'static> Source<T> {
    pub(crate) fn new(stream: Stream<T>) -> Self {
        Source(stream)
    }

    /// The stream of pushed values
    pub fn stream(self) -> Stream<T> {
        self.0
    }

    /// Queue a value. It is delivered on [FlowGraph::flush].
    pub fn push(self, g: &FlowGraph, value: T) {
        self.send(g, Signal::Next(value));
    }

    /// Queue the end of the stream.
    pub fn complete(self, g: &FlowGraph) {
        self.send(g, Signal::Complete);
    }

    /// Queue a failure, which ends the stream and everything downstream.
    pub fn fail(self, g: &FlowGraph, error: StreamError) {
        self.send(g, Signal::Error(error));
    }

    fn send(self, g: &FlowGraph, signal: Signal<T>) {
        debug_assert!(self.0.graph_id == g.id(), "Source::send: different graph");
        g.enqueue(self.0.index, Box::new(signal));
    }
}

impl<T> Stream<T> {
    pub(crate) fn new(index: usize, graph_id: GraphUid) -> Self {
        Stream {
            index,
            graph_id,
            phantom: PhantomData
        }
    }

    pub(crate) fn index(self) -> usize {
        self.index
    }

    pub(crate) fn graph_id(self) -> GraphUid {
        self.graph_id
    }
}

impl<T: 'static> Stream<T> {
    /// Transform each value.
    pub fn map<U: 'static, F: FnMut(&T) -> U + 'static>(self, g: &FlowGraph, mut f: F) -> Stream<U> {
        g.new_node("map", vec![self.index], move |tick, out| {
            for value in tick.values(self) {
                out.emit(f(value));
            }
            if tick.completed(self) {
                out.complete();
            }
        })
    }

    /// Transform each value, failing the stream on the first `Err`.
    pub fn try_map<U: 'static, F: FnMut(&T) -> Result<U, StreamError> + 'static>(self, g: &FlowGraph, mut f: F) -> Stream<U> {
        g.new_node("try_map", vec![self.index], move |tick, out| {
            for value in tick.values(self) {
                match f(value) {
                    Ok(value) => out.emit(value),
                    Err(error) => {
                        out.fail(error);
                        return;
                    }
                }
            }
            if tick.completed(self) {
                out.complete();
            }
        })
    }

    /// Keep only the values which satisfy `predicate`.
    pub fn filter<F: FnMut(&T) -> bool + 'static>(self, g: &FlowGraph, mut predicate: F) -> Stream<T> where T: Clone {
        g.new_node("filter", vec![self.index], move |tick, out| {
            for value in tick.values(self) {
                if predicate(value) {
                    out.emit(value.clone());
                }
            }
            if tick.completed(self) {
                out.complete();
            }
        })
    }

    /// Transform each value, dropping the ones `f` maps to `None`.
    pub fn filter_map<U: 'static, F: FnMut(&T) -> Option<U> + 'static>(self, g: &FlowGraph, mut f: F) -> Stream<U> {
        g.new_node("filter_map", vec![self.index], move |tick, out| {
            for value in tick.values(self) {
                if let Some(value) = f(value) {
                    out.emit(value);
                }
            }
            if tick.completed(self) {
                out.complete();
            }
        })
    }

    /// Emit the running accumulation of values, starting from `init` (which is not emitted itself).
    pub fn scan<U: Clone + 'static, F: FnMut(&U, &T) -> U + 'static>(self, g: &FlowGraph, init: U, mut f: F) -> Stream<U> {
        let mut acc = init;
        g.new_node("scan", vec![self.index], move |tick, out| {
            for value in tick.values(self) {
                acc = f(&acc, value);
                out.emit(acc.clone());
            }
            if tick.completed(self) {
                out.complete();
            }
        })
    }

    /// Emit `values` when subscribed, then forward this stream.
    pub fn start_with<I: IntoIterator<Item=T>>(self, g: &FlowGraph, values: I) -> Stream<T> where T: Clone {
        let mut prefix = Some(values.into_iter().collect::<Vec<_>>());
        g.new_node("start_with", vec![self.index], move |tick, out| {
            if let Some(prefix) = prefix.take() {
                for value in prefix {
                    out.emit(value);
                }
            }
            for value in tick.values(self) {
                out.emit(value.clone());
            }
            if tick.completed(self) {
                out.complete();
            }
        })
    }

    /// Forward the first `count` values, then complete.
    pub fn take(self, g: &FlowGraph, count: usize) -> Stream<T> where T: Clone {
        let mut remaining = count;
        g.new_node("take", vec![self.index], move |tick, out| {
            for value in tick.values(self) {
                if remaining == 0 {
                    break;
                }
                remaining -= 1;
                out.emit(value.clone());
            }
            if remaining == 0 || tick.completed(self) {
                out.complete();
            }
        })
    }

    /// Forward the first value, then complete.
    pub fn first(self, g: &FlowGraph) -> Stream<T> where T: Clone {
        self.take(g, 1)
    }

    /// Forward this stream until it completes, then `next`.
    ///
    /// Values `next` emits before this stream completes are not lost: they are buffered and
    /// delivered, in order, right after completion. So everything from this stream always comes
    /// before anything from `next`, regardless of which arrived first.
    pub fn concat(self, g: &FlowGraph, next: Stream<T>) -> Stream<T> where T: Clone {
        let mut buffer = VecDeque::new();
        let mut next_done = false;
        g.new_node("concat", vec![self.index, next.index], move |tick, out| {
            let first_done = tick.is_done(self);
            for value in tick.values(self) {
                out.emit(value.clone());
            }
            for value in tick.values(next) {
                buffer.push_back(value.clone());
            }
            next_done |= tick.is_done(next);
            if first_done {
                out.extend(buffer.drain(..));
                if next_done {
                    out.complete();
                }
            }
        })
    }

    /// Forward values from both streams as they arrive. Completes when both complete.
    pub fn merge(self, g: &FlowGraph, other: Stream<T>) -> Stream<T> where T: Clone {
        g.new_node("merge", vec![self.index, other.index], move |tick, out| {
            for value in tick.values(self) {
                out.emit(value.clone());
            }
            for value in tick.values(other) {
                out.emit(value.clone());
            }
            if tick.is_done(self) && tick.is_done(other) {
                out.complete();
            }
        })
    }

    /// Run `f` on every value, for side-effects.
    pub fn for_each<F: FnMut(&T) + 'static>(self, g: &FlowGraph, mut f: F) {
        g.new_node::<(), _>("for_each", vec![self.index], move |tick, _| {
            for value in tick.values(self) {
                f(value);
            }
        });
    }

    /// Record every value and how the stream ends.
    pub fn observe(self, g: &FlowGraph) -> Observer<T> where T: Clone + Debug {
        self.observe_with(g, Observer::new(true))
    }

    /// Record how many values the stream delivered, the last one, and how the stream ends.
    pub fn observe_latest(self, g: &FlowGraph) -> Observer<T> where T: Clone + Debug {
        self.observe_with(g, Observer::new(false))
    }

    fn observe_with(self, g: &FlowGraph, observer: Observer<T>) -> Observer<T> where T: Clone + Debug {
        let recorder = observer.clone();
        g.new_observing_node::<(), _>("observe", vec![self.index], move |tick, out| {
            recorder.record(tick.values(self));
            if let Some(error) = tick.error(self) {
                recorder.fail(error.clone());
                out.complete();
            } else if tick.completed(self) {
                recorder.complete();
                out.complete();
            }
        });
        observer
    }
}
