use crate::dom::DomSource;
use crate::graph::FlowGraph;
use crate::stream::Stream;
use crate::vdom::{div, input, p, VNode};

/// A checkbox and whether it's on.
pub fn toggle(g: &FlowGraph, dom: DomSource) -> Stream<VNode> {
    dom.select("input")
        .events(g, "change")
        .filter_map(g, |event| event.value.as_checked())
        .start_with(g, [false])
        .map(g, |toggled| {
            div("").children([
                input("").attr("type", "checkbox").into(),
                "Toggle me".into(),
                p("").child(if *toggled { "on" } else { "off" }).into()
            ]).into()
        })
}
