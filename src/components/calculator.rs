//! BMI calculator as a single component, split into intent, model and view.

use crate::components::bmi::calculate_bmi;
use crate::dom::DomSource;
use crate::graph::FlowGraph;
use crate::stream::Stream;
use crate::vdom::{div, h2, input, VNode};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiState {
    pub weight: f64,
    pub height: f64,
    pub bmi: f64
}

struct Actions {
    change_weight: Stream<f64>,
    change_height: Stream<f64>
}

pub fn bmi_calculator(g: &FlowGraph, dom: DomSource) -> Stream<VNode> {
    let actions = intent(g, &dom);
    let state = model(g, actions);
    view(g, state)
}

fn intent(g: &FlowGraph, dom: &DomSource) -> Actions {
    Actions {
        change_weight: dom.select("#weight")
            .events(g, "input")
            .filter_map(g, |event| event.value.as_number()),
        change_height: dom.select("#height")
            .events(g, "input")
            .filter_map(g, |event| event.value.as_number())
    }
}

fn model(g: &FlowGraph, actions: Actions) -> Stream<BmiState> {
    g.combine_latest2(
        actions.change_weight.start_with(g, [70.0]),
        actions.change_height.start_with(g, [170.0]),
        |weight, height| BmiState {
            weight: *weight,
            height: *height,
            bmi: calculate_bmi(*weight, *height)
        }
    )
}

fn view(g: &FlowGraph, state: Stream<BmiState>) -> Stream<VNode> {
    state.map(g, |state| {
        div("").children([
            render_weight_slider(state.weight),
            render_height_slider(state.height),
            h2("").child(format!("BMI is {}", state.bmi)).into()
        ]).into()
    })
}

fn render_weight_slider(weight: f64) -> VNode {
    div("").children([
        format!("Weight {} kg", weight).into(),
        input("#weight").attr("type", "range").attr("min", 40.0).attr("max", 140.0).attr("value", weight).into()
    ]).into()
}

fn render_height_slider(height: f64) -> VNode {
    div("").children([
        format!("Height {} cm", height).into(),
        input("#height").attr("type", "range").attr("min", 140.0).attr("max", 210.0).attr("value", height).into()
    ]).into()
}
