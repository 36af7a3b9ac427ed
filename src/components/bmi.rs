use crate::components::labeled_slider::{labeled_slider, Props, SliderSources};
use crate::dom::{DomSource, Scope};
use crate::graph::FlowGraph;
use crate::isolate::isolate_with;
use crate::stream::Stream;
use crate::vdom::{div, h2, VNode};

pub struct BmiSinks {
    pub dom: Stream<VNode>,
    pub bmi: Stream<f64>,
    /// Scope the weight slider was isolated in, to address its events
    pub weight_scope: Scope,
    /// Scope the height slider was isolated in
    pub height_scope: Scope
}

/// Body mass index, rounded to the nearest integer. `height` is in centimeters.
pub fn calculate_bmi(weight: f64, height: f64) -> f64 {
    let height_meters = height * 0.01;
    (weight / (height_meters * height_meters)).round()
}

/// Weight and height sliders with the BMI they give, using the default slider props.
pub fn bmi_component(g: &FlowGraph, dom: DomSource) -> BmiSinks {
    bmi_component_with(g, dom, Props::weight(), Props::height())
}

/// Weight and height sliders with the BMI they give.
///
/// Each slider is isolated in a fresh scope, so input on one never moves the other, nor the
/// sliders of another BMI component rendered into the same container.
///
/// The view is a latest-value combination of both slider views and the BMI. Moving a slider
/// therefore renders twice in the same tick: first the new slider view next to the previous BMI,
/// then the new BMI.
pub fn bmi_component_with(g: &FlowGraph, dom: DomSource, weight_props: Props, height_props: Props) -> BmiSinks {
    let weight_scope = Scope::fresh();
    let height_scope = Scope::fresh();
    let weight_sources = SliderSources { dom: dom.clone(), props: g.of([weight_props]) };
    let height_sources = SliderSources { dom, props: g.of([height_props]) };

    let weight_slider = isolate_with(labeled_slider, weight_scope.clone())(g, weight_sources);
    let height_slider = isolate_with(labeled_slider, height_scope.clone())(g, height_sources);

    let bmi = g.combine_latest2(weight_slider.value, height_slider.value, |weight, height| {
        calculate_bmi(*weight, *height)
    });

    let dom = g.combine_latest3(weight_slider.dom, height_slider.dom, bmi, |weight_view, height_view, bmi| {
        div("").children([
            weight_view.clone(),
            height_view.clone(),
            h2("").child(format!("BMI is {}", bmi)).into()
        ]).into()
    });

    BmiSinks { dom, bmi, weight_scope, height_scope }
}
