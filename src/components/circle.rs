use crate::components::labeled_slider::{labeled_slider, Props, SliderSources};
use crate::dom::DomSource;
use crate::graph::FlowGraph;
use crate::stream::Stream;
use crate::vdom::{div, VNode};

/// A radius slider and a circle of that radius.
pub fn circle(g: &FlowGraph, dom: DomSource, props: Props) -> Stream<VNode> {
    let slider = labeled_slider(g, SliderSources { dom, props: g.of([props]) });

    slider.dom.with_latest_from(g, slider.value, |slider_view, value| {
        div("").children([
            slider_view.clone(),
            render_circle(*value)
        ]).into()
    })
}

fn render_circle(size: f64) -> VNode {
    let style = format!(
        "background-color: #58D3D8; width: {size}px; height: {size}px; border-radius: {}px",
        size * 0.5
    );
    div(".circle").attr("style", style).into()
}
