use crate::dom::DomSource;
use crate::graph::FlowGraph;
use crate::stream::Stream;
use crate::vdom::{button, div, p, VNode};

pub fn counter(g: &FlowGraph, dom: DomSource) -> Stream<VNode> {
    let decrement = dom.select(".decrement").events(g, "click").map(g, |_| -1);
    let increment = dom.select(".increment").events(g, "click").map(g, |_| 1);

    let count = decrement.merge(g, increment)
        .start_with(g, [0])
        .scan(g, 0, |count, delta| count + delta);

    count.map(g, |count| {
        div("").children([
            button(".decrement").child("Decrement").into(),
            button(".increment").child("Increment").into(),
            p("").child(format!("Counter: {}", count)).into()
        ]).into()
    })
}
