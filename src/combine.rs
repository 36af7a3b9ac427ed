use crate::graph::FlowGraph;
use crate::stream::Stream;

/// Latest-value combinations end once every input ended, or as soon as an input ends without
/// ever emitting, since nothing can be combined with it anymore.
///
/// Takes `(is_done, has_value)` for each input.
fn latest_done(inputs: &[(bool, bool)]) -> bool {
    inputs.iter().all(|(is_done, _)| *is_done) ||
        inputs.iter().any(|(is_done, has_value)| *is_done && !*has_value)
}

impl FlowGraph {
    // region combine_latest boilerplate

    /// Whenever either input emits, emit `combine` of the latest value from each.
    ///
    /// Nothing is emitted until both inputs emitted at least once. Values are combined one at
    /// a time, so if both inputs emit during the same tick there are two outputs, the first
    /// pairing `a`'s new value with `b`'s old one.
    pub fn combine_latest2<A: Clone + 'static, B: Clone + 'static, T: 'static, F: FnMut(&A, &B) -> T + 'static>(&self, a: Stream<A>, b: Stream<B>, mut combine: F) -> Stream<T> {
        let mut latest: (Option<A>, Option<B>) = (None, None);
        self.new_node("combine_latest2", vec![a.index(), b.index()], move |tick, out| {
            for value in tick.values(a) {
                latest.0 = Some(value.clone());
                if let (Some(a), Some(b)) = &latest {
                    out.emit(combine(a, b));
                }
            }
            for value in tick.values(b) {
                latest.1 = Some(value.clone());
                if let (Some(a), Some(b)) = &latest {
                    out.emit(combine(a, b));
                }
            }
            if latest_done(&[(tick.is_done(a), latest.0.is_some()), (tick.is_done(b), latest.1.is_some())]) {
                out.complete();
            }
        })
    }

    /// Whenever any input emits, emit `combine` of the latest value from each.
    /// Nothing is emitted until every input emitted at least once.
    pub fn combine_latest3<A: Clone + 'static, B: Clone + 'static, C: Clone + 'static, T: 'static, F: FnMut(&A, &B, &C) -> T + 'static>(&self, a: Stream<A>, b: Stream<B>, c: Stream<C>, mut combine: F) -> Stream<T> {
        let mut latest: (Option<A>, Option<B>, Option<C>) = (None, None, None);
        self.new_node("combine_latest3", vec![a.index(), b.index(), c.index()], move |tick, out| {
            for value in tick.values(a) {
                latest.0 = Some(value.clone());
                if let (Some(a), Some(b), Some(c)) = &latest {
                    out.emit(combine(a, b, c));
                }
            }
            for value in tick.values(b) {
                latest.1 = Some(value.clone());
                if let (Some(a), Some(b), Some(c)) = &latest {
                    out.emit(combine(a, b, c));
                }
            }
            for value in tick.values(c) {
                latest.2 = Some(value.clone());
                if let (Some(a), Some(b), Some(c)) = &latest {
                    out.emit(combine(a, b, c));
                }
            }
            if latest_done(&[
                (tick.is_done(a), latest.0.is_some()),
                (tick.is_done(b), latest.1.is_some()),
                (tick.is_done(c), latest.2.is_some())
            ]) {
                out.complete();
            }
        })
    }

    /// Whenever any input emits, emit `combine` of the latest value from each.
    /// Nothing is emitted until every input emitted at least once.
    pub fn combine_latest4<A: Clone + 'static, B: Clone + 'static, C: Clone + 'static, D: Clone + 'static, T: 'static, F: FnMut(&A, &B, &C, &D) -> T + 'static>(&self, a: Stream<A>, b: Stream<B>, c: Stream<C>, d: Stream<D>, mut combine: F) -> Stream<T> {
        let mut latest: (Option<A>, Option<B>, Option<C>, Option<D>) = (None, None, None, None);
        self.new_node("combine_latest4", vec![a.index(), b.index(), c.index(), d.index()], move |tick, out| {
            for value in tick.values(a) {
                latest.0 = Some(value.clone());
                if let (Some(a), Some(b), Some(c), Some(d)) = &latest {
                    out.emit(combine(a, b, c, d));
                }
            }
            for value in tick.values(b) {
                latest.1 = Some(value.clone());
                if let (Some(a), Some(b), Some(c), Some(d)) = &latest {
                    out.emit(combine(a, b, c, d));
                }
            }
            for value in tick.values(c) {
                latest.2 = Some(value.clone());
                if let (Some(a), Some(b), Some(c), Some(d)) = &latest {
                    out.emit(combine(a, b, c, d));
                }
            }
            for value in tick.values(d) {
                latest.3 = Some(value.clone());
                if let (Some(a), Some(b), Some(c), Some(d)) = &latest {
                    out.emit(combine(a, b, c, d));
                }
            }
            if latest_done(&[
                (tick.is_done(a), latest.0.is_some()),
                (tick.is_done(b), latest.1.is_some()),
                (tick.is_done(c), latest.2.is_some()),
                (tick.is_done(d), latest.3.is_some())
            ]) {
                out.complete();
            }
        })
    }

    // endregion

    /// Combine any number of same-typed inputs: whenever one emits, emit the latest value of
    /// every input, in input order. Nothing is emitted until every input emitted at least once.
    ///
    /// With no inputs this never emits and completes right away.
    pub fn combine_latest_all<T: Clone + 'static>(&self, inputs: Vec<Stream<T>>) -> Stream<Vec<T>> {
        let mut latest: Vec<Option<T>> = vec![None; inputs.len()];
        let indices = inputs.iter().map(|input| input.index()).collect();
        self.new_node("combine_latest_all", indices, move |tick, out| {
            for (position, input) in inputs.iter().enumerate() {
                for value in tick.values(*input) {
                    latest[position] = Some(value.clone());
                    if let Some(all) = latest.iter().cloned().collect::<Option<Vec<_>>>() {
                        out.emit(all);
                    }
                }
            }
            let states = inputs.iter()
                .zip(latest.iter())
                .map(|(input, value)| (tick.is_done(*input), value.is_some()))
                .collect::<Vec<_>>();
            if latest_done(&states) {
                out.complete();
            }
        })
    }
}

impl<T: 'static> Stream<T> {
    /// Whenever this stream emits, emit `combine` of its value and the latest value of `other`.
    ///
    /// Unlike [FlowGraph::combine_latest2], `other` emitting alone doesn't produce anything, and
    /// values from this stream before `other` has a value are dropped.
    pub fn with_latest_from<U: Clone + 'static, R: 'static, F: FnMut(&T, &U) -> R + 'static>(self, g: &FlowGraph, other: Stream<U>, mut combine: F) -> Stream<R> {
        let mut latest: Option<U> = None;
        g.new_node("with_latest_from", vec![self.index(), other.index()], move |tick, out| {
            // `other` first, so a value which arrives in the same tick is already latest
            if let Some(value) = tick.values(other).last() {
                latest = Some(value.clone());
            }
            if let Some(latest) = &latest {
                for value in tick.values(self) {
                    out.emit(combine(value, latest));
                }
            }
            if tick.is_done(self) || (tick.is_done(other) && latest.is_none()) {
                out.complete();
            }
        })
    }
}
