//! Property tests for delivery order.
//!
//! Uses proptest to verify:
//! 1. Concat ordering: the seed always comes first, and live values keep their order
//! 2. Latest values: combine_latest always sees the latest value of every input
//! 3. Slider history: the value stream is the initial value followed by every input
//! 4. Isolation: input on one BMI slider never reaches the other

use proptest::prelude::*;
use rx_widgets::*;
use rx_widgets::components::*;

// ── Strategies (proptest) ────────────────────────────────────────────

/// A value plus whether to flush right after pushing it
fn arb_live() -> impl Strategy<Value = Vec<(i32, bool)>> {
    prop::collection::vec((any::<i32>(), any::<bool>()), 0..20)
}

fn arb_weight() -> impl Strategy<Value = f64> {
    (40u32..=150).prop_map(f64::from)
}

fn arb_height() -> impl Strategy<Value = f64> {
    (140u32..=210).prop_map(f64::from)
}

/// Which slider (`true` = weight) and what to set it to
fn arb_bmi_input() -> impl Strategy<Value = (bool, f64)> {
    prop_oneof![
        arb_weight().prop_map(|weight| (true, weight)),
        arb_height().prop_map(|height| (false, height))
    ]
}

// ── 1. Concat Ordering ───────────────────────────────────────────────

proptest! {
    #[test]
    fn seed_precedes_live(live in arb_live(), seed in any::<i32>(), seed_at in 0usize..=20) {
        let mut g = FlowGraph::new();
        let seed_source = g.new_source::<i32>();
        let live_source = g.new_source::<i32>();
        let seen = seed_source.stream().first(&g).concat(&g, live_source.stream()).observe(&g);

        let seed_at = seed_at.min(live.len());
        for (i, (value, flush)) in live.iter().enumerate() {
            if i == seed_at {
                seed_source.push(&g, seed);
            }
            live_source.push(&g, *value);
            if *flush {
                g.flush();
            }
        }
        if seed_at == live.len() {
            seed_source.push(&g, seed);
        }
        g.flush();

        let mut expected = vec![seed];
        expected.extend(live.iter().map(|(value, _)| *value));
        prop_assert_eq!(seen.values(), expected);
    }
}

// ── 2. Latest Values ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn combine_sees_latest(pushes in prop::collection::vec((any::<bool>(), -1000i64..1000), 1..30)) {
        let mut g = FlowGraph::new();
        let a = g.new_source::<i64>();
        let b = g.new_source::<i64>();
        let seen = g.combine_latest2(a.stream(), b.stream(), |a, b| (*a, *b)).observe(&g);

        let (mut last_a, mut last_b) = (None, None);
        for (to_a, value) in pushes {
            if to_a {
                a.push(&g, value);
                last_a = Some(value);
            } else {
                b.push(&g, value);
                last_b = Some(value);
            }
            g.flush();
            match (last_a, last_b) {
                (Some(last_a), Some(last_b)) => {
                    prop_assert_eq!(seen.latest(), Some((last_a, last_b)));
                }
                _ => {
                    prop_assert_eq!(seen.count(), 0);
                }
            }
        }
    }
}

// ── 3. Slider History ────────────────────────────────────────────────

proptest! {
    #[test]
    fn slider_value_history(inputs in prop::collection::vec(arb_weight(), 0..10)) {
        let mut g = FlowGraph::new();
        let mut value = None;
        let driver = run(&g, |g, dom| {
            let sinks = labeled_slider(g, SliderSources { dom, props: g.of([Props::weight()]) });
            value = Some(sinks.value.observe(g));
            sinks.dom
        });
        let value = value.unwrap();
        g.flush();

        for input in &inputs {
            driver.input(&g, ".slider", *input).unwrap();
            g.flush();
        }

        let mut expected = vec![70.0];
        expected.extend(inputs.iter().copied());
        let last = *expected.last().unwrap();
        prop_assert_eq!(value.values(), expected);
        let label = driver.current().unwrap().find(".label").unwrap().text_content();
        prop_assert_eq!(label, format!("Weight {} kg", last));
    }
}

// ── 4. Isolation ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn bmi_sliders_stay_isolated(inputs in prop::collection::vec(arb_bmi_input(), 0..12)) {
        let mut g = FlowGraph::new();
        let mut outputs = None;
        let driver = run(&g, |g, dom| {
            let sinks = bmi_component(g, dom);
            outputs = Some((sinks.bmi.observe(g), sinks.weight_scope, sinks.height_scope));
            sinks.dom
        });
        let (bmi, weight_scope, height_scope) = outputs.unwrap();
        g.flush();

        let (mut weight, mut height) = (70.0, 170.0);
        for (is_weight, value) in inputs {
            let scope = if is_weight { &weight_scope } else { &height_scope };
            driver.input(&g, &format!("{} .slider", scope.selector()), value).unwrap();
            g.flush();
            if is_weight {
                weight = value;
            } else {
                height = value;
            }

            let view = driver.current().unwrap();
            let weight_view = view.find(&weight_scope.selector()).unwrap();
            let height_view = view.find(&height_scope.selector()).unwrap();
            prop_assert_eq!(
                VNode::from(weight_view.clone()).find(".label").unwrap().text_content(),
                format!("Weight {} kg", weight)
            );
            prop_assert_eq!(
                VNode::from(height_view.clone()).find(".label").unwrap().text_content(),
                format!("Height {} cm", height)
            );
            prop_assert_eq!(bmi.latest(), Some(calculate_bmi(weight, height)));
        }
    }
}
