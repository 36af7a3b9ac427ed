//! A range input with a label showing its value, reusable anywhere a number is picked.
//!
//! The slider's value starts at `Props::initial` of the *first* props delivered, then follows
//! the user's input. Later props re-render the label and bounds but never reset the value.

use serde::{Deserialize, Serialize};
use crate::dom::DomSource;
use crate::graph::FlowGraph;
use crate::isolate::{IsolateSinks, IsolateSources};
use crate::stream::Stream;
use crate::vdom::{div, input, span, VNode};

/// Configuration of a slider instance.
///
/// Nothing checks that `min <= initial <= max` here; see [crate::config] for where loaded props
/// are validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Props {
    pub label: String,
    #[serde(default)]
    pub unit: String,
    pub min: f64,
    pub max: f64,
    pub initial: f64
}

pub struct SliderSources {
    pub dom: DomSource,
    pub props: Stream<Props>
}

pub struct SliderSinks {
    pub dom: Stream<VNode>,
    pub value: Stream<f64>
}

impl Props {
    pub fn new(label: &str, unit: &str, min: f64, max: f64, initial: f64) -> Self {
        Props {
            label: label.to_string(),
            unit: unit.to_string(),
            min,
            max,
            initial
        }
    }

    pub fn weight() -> Self {
        Props::new("Weight", "kg", 40.0, 150.0, 70.0)
    }

    pub fn height() -> Self {
        Props::new("Height", "cm", 140.0, 210.0, 170.0)
    }

    pub fn radius() -> Self {
        Props::new("Radius", "", 10.0, 100.0, 30.0)
    }
}

pub fn labeled_slider(g: &FlowGraph, sources: SliderSources) -> SliderSinks {
    let initial_value = sources.props
        .map(g, |props| props.initial)
        .first(g);
    let new_value = sources.dom
        .select(".slider")
        .events(g, "input")
        .filter_map(g, |event| event.value.as_number());
    let value = initial_value.concat(g, new_value);

    let dom = g.combine_latest2(sources.props, value, render_slider);

    SliderSinks { dom, value }
}

pub fn render_slider(props: &Props, value: &f64) -> VNode {
    div(".labeled-slider").children([
        span(".label").child(format!("{} {} {}", props.label, value, props.unit)).into(),
        input(".slider")
            .attr("type", "range")
            .attr("min", props.min)
            .attr("max", props.max)
            .attr("value", *value)
            .into()
    ]).into()
}

impl IsolateSources for SliderSources {
    fn isolate_sources(self, scope: &crate::dom::Scope) -> Self {
        SliderSources {
            dom: self.dom.isolate(scope),
            props: self.props
        }
    }
}

impl IsolateSinks for SliderSinks {
    fn isolate_sinks(self, g: &FlowGraph, scope: &crate::dom::Scope) -> Self {
        SliderSinks {
            dom: self.dom.isolate_sinks(g, scope),
            value: self.value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vdom::AttrValue;

    #[test]
    fn test_render_slider_label() {
        let view = render_slider(&Props::weight(), &70.0);
        assert_eq!(view.find(".label").map(|label| label.text_content()), Some("Weight 70 kg".to_string()));
        let slider = view.find("input.slider").unwrap();
        assert_eq!(slider.get_attr("min"), Some(&AttrValue::Number(40.0)));
        assert_eq!(slider.get_attr("max"), Some(&AttrValue::Number(150.0)));
        assert_eq!(slider.get_attr("value"), Some(&AttrValue::Number(70.0)));
    }

    #[test]
    fn test_render_fractional_value() {
        let view = render_slider(&Props::new("Mass", "t", 0.0, 1.0, 0.5), &0.25);
        assert_eq!(view.text_content(), "Mass 0.25 t");
    }
}
