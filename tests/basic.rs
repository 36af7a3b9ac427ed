use rx_widgets::*;
use test_log::test;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[test]
fn test_source_map() {
    let mut g = FlowGraph::new();
    let source = g.new_source::<i32>();
    let doubled = source.stream().map(&g, |x| x * 2);
    let seen = doubled.observe(&g);

    source.push(&g, 1);
    assert_eq!(seen.values(), Vec::<i32>::new());
    assert_eq!(g.pending(), 1);
    g.flush();
    assert_eq!(seen.values(), vec![2]);
    assert_eq!(g.pending(), 0);

    source.push(&g, 2);
    source.push(&g, 4);
    g.flush();
    assert_eq!(seen.values(), vec![2, 4, 8]);
    assert!(!seen.is_complete());

    source.complete(&g);
    g.flush();
    assert!(seen.is_complete());
}

#[test]
fn test_side_effect() {
    let side_effect = Rc::new(Cell::new(1));
    let side_effect_ref = side_effect.clone();

    let mut g = FlowGraph::new();
    let source = g.new_source::<i32>();
    source.stream().for_each(&g, move |x| {
        side_effect_ref.set(side_effect_ref.get() + x);
    });
    g.flush();
    assert_eq!(side_effect.get(), 1);

    source.push(&g, 2);
    assert_eq!(side_effect.get(), 1);
    g.flush();
    assert_eq!(side_effect.get(), 3);

    source.push(&g, 4);
    g.flush();
    assert_eq!(side_effect.get(), 7);
}

#[test]
fn test_of_and_start_with() {
    let mut g = FlowGraph::new();
    let of = g.of(["a", "b"]);
    let source = g.new_source::<&str>();
    let started = source.stream().start_with(&g, ["start"]);
    let seen_of = of.observe(&g);
    let seen_started = started.observe(&g);

    source.push(&g, "live");
    g.flush();
    assert_eq!(seen_of.values(), vec!["a", "b"]);
    assert!(seen_of.is_complete());
    assert_eq!(seen_started.values(), vec!["start", "live"]);
}

#[test]
fn test_filter_scan() {
    let mut g = FlowGraph::new();
    let source = g.new_source::<i32>();
    let evens = source.stream().filter(&g, |x| x % 2 == 0);
    let sums = evens.scan(&g, 0, |sum, x| sum + x);
    let seen = sums.observe(&g);

    for x in 1..=6 {
        source.push(&g, x);
    }
    g.flush();
    assert_eq!(seen.values(), vec![2, 6, 12]);
}

#[test]
fn test_take_completes() {
    let mut g = FlowGraph::new();
    let source = g.new_source::<i32>();
    let first = source.stream().first(&g);
    let seen = first.observe(&g);

    source.push(&g, 7);
    source.push(&g, 8);
    g.flush();
    assert_eq!(seen.values(), vec![7]);
    assert!(seen.is_complete());
}

#[test]
fn test_concat_buffers_until_first_completes() {
    let mut g = FlowGraph::new();
    let seed = g.new_source::<i32>();
    let live = g.new_source::<i32>();
    let values = seed.stream().first(&g).concat(&g, live.stream());
    let seen = values.observe(&g);

    // live arrives before the seed
    live.push(&g, 40);
    live.push(&g, 55);
    g.flush();
    assert_eq!(seen.values(), Vec::<i32>::new());

    seed.push(&g, 30);
    g.flush();
    assert_eq!(seen.values(), vec![30, 40, 55]);

    live.push(&g, 60);
    seed.push(&g, 99);
    g.flush();
    assert_eq!(seen.values(), vec![30, 40, 55, 60]);
}

#[test]
fn test_merge() {
    let mut g = FlowGraph::new();
    let a = g.new_source::<i32>();
    let b = g.new_source::<i32>();
    let merged = a.stream().merge(&g, b.stream());
    let seen = merged.observe(&g);

    a.push(&g, 1);
    b.push(&g, 2);
    a.push(&g, 3);
    a.complete(&g);
    g.flush();
    assert_eq!(seen.values(), vec![1, 2, 3]);
    assert!(!seen.is_complete());

    b.complete(&g);
    g.flush();
    assert!(seen.is_complete());
}

#[test]
fn test_combine_latest() {
    let mut g = FlowGraph::new();
    let weight = g.new_source::<f64>();
    let height = g.new_source::<f64>();
    let bmi = g.combine_latest2(weight.stream(), height.stream(), |weight, height| {
        (weight / (height / 100.0).powi(2)).round()
    });
    let seen = bmi.observe(&g);

    weight.push(&g, 70.0);
    g.flush();
    // nothing until both have a value
    assert_eq!(seen.values(), Vec::<f64>::new());

    weight.push(&g, 80.0);
    height.push(&g, 170.0);
    g.flush();
    assert_eq!(seen.values(), vec![28.0]);

    weight.push(&g, 70.0);
    g.flush();
    assert_eq!(seen.values(), vec![28.0, 24.0]);
}

#[test]
fn test_combine_latest3_same_tick() {
    let mut g = FlowGraph::new();
    let source = g.new_source::<i32>();
    let a = source.stream().map(&g, |x| x + 1);
    let b = source.stream().map(&g, |x| x * 10);
    let c = g.of(["c"]);
    let combined = g.combine_latest3(a, b, c, |a, b, c| format!("{}-{}-{}", a, b, c));
    let seen = combined.observe(&g);

    source.push(&g, 1);
    g.flush();
    // a emitted but not b when the first combination was tried
    assert_eq!(seen.values(), vec!["2-10-c".to_string()]);

    source.push(&g, 2);
    g.flush();
    assert_eq!(seen.values(), vec!["2-10-c".to_string(), "3-10-c".to_string(), "3-20-c".to_string()]);
}

#[test]
fn test_combine_latest4() {
    let mut g = FlowGraph::new();
    let a = g.new_source::<i32>();
    let b = g.new_source::<i32>();
    let c = g.new_source::<&str>();
    let d = g.of([0.5]);
    let combined = g.combine_latest4(a.stream(), b.stream(), c.stream(), d, |a, b, c, d| {
        format!("{}{}{}", a + b, c, d)
    });
    let seen = combined.observe(&g);

    a.push(&g, 1);
    b.push(&g, 2);
    g.flush();
    assert_eq!(seen.values(), Vec::<String>::new());

    c.push(&g, "x");
    b.push(&g, 5);
    g.flush();
    assert_eq!(seen.values(), vec!["3x0.5".to_string(), "6x0.5".to_string()]);

    a.complete(&g);
    b.complete(&g);
    c.complete(&g);
    g.flush();
    // `d` already completed on its first flush
    assert!(seen.is_complete());
}

#[test]
fn test_combine_latest_all() {
    let mut g = FlowGraph::new();
    let sources = (0..3).map(|_| g.new_source::<i32>()).collect::<Vec<_>>();
    let combined = g.combine_latest_all(sources.iter().map(|source| source.stream()).collect());
    let seen = combined.observe(&g);

    sources[0].push(&g, 1);
    sources[1].push(&g, 2);
    sources[2].push(&g, 3);
    sources[1].push(&g, 5);
    g.flush();
    assert_eq!(seen.values(), vec![vec![1, 2, 3], vec![1, 5, 3]]);

    for source in &sources {
        source.complete(&g);
    }
    g.flush();
    assert!(seen.is_complete());
}

#[test]
fn test_combine_latest_completes_without_value() {
    let mut g = FlowGraph::new();
    let a = g.new_source::<i32>();
    let b = g.new_source::<i32>();
    let combined = g.combine_latest2(a.stream(), b.stream(), |a, b| a + b);
    let seen = combined.observe(&g);

    a.push(&g, 1);
    b.complete(&g);
    g.flush();
    assert_eq!(seen.values(), Vec::<i32>::new());
    assert!(seen.is_complete());
}

#[test]
fn test_with_latest_from() {
    let mut g = FlowGraph::new();
    let main = g.new_source::<&str>();
    let other = g.new_source::<i32>();
    let combined = main.stream().with_latest_from(&g, other.stream(), |main, other| format!("{}{}", main, other));
    let seen = combined.observe(&g);

    main.push(&g, "dropped");
    other.push(&g, 1);
    other.push(&g, 2);
    main.push(&g, "a");
    g.flush();
    assert_eq!(seen.values(), vec!["a2".to_string()]);
}

#[test]
fn test_errors_propagate() {
    let mut g = FlowGraph::new();
    let source = g.new_source::<i32>();
    let checked = source.stream().try_map(&g, |x| {
        if *x < 0 {
            Err(StreamError::Operator(format!("negative: {}", x)))
        } else {
            Ok(*x)
        }
    });
    let downstream = checked.map(&g, |x| x + 1);
    let seen = downstream.observe(&g);

    source.push(&g, 1);
    source.push(&g, -1);
    source.push(&g, 2);
    g.flush();
    assert_eq!(seen.values(), vec![2]);
    assert_eq!(seen.error(), Some(StreamError::Operator("negative: -1".to_string())));
    assert!(!seen.is_complete());
}

#[test]
fn test_source_failure() {
    let mut g = FlowGraph::new();
    let source = g.new_source::<i32>();
    let other = g.of([1]);
    let combined = g.combine_latest2(source.stream(), other, |a, b| a + b);
    let seen = combined.observe(&g);

    source.fail(&g, StreamError::Render("boom".to_string()));
    g.flush();
    assert_eq!(seen.error(), Some(StreamError::Render("boom".to_string())));
}

#[test]
fn test_nodes_added_after_flush_start() {
    let mut g = FlowGraph::new();
    let source = g.new_source::<i32>();
    let early = source.stream().start_with(&g, [0]).observe(&g);
    source.push(&g, 1);
    g.flush();
    assert_eq!(early.values(), vec![0, 1]);

    // subscribing later only sees what's delivered from then on, after its own prefix
    let late = source.stream().start_with(&g, [10]).observe(&g);
    source.push(&g, 2);
    g.flush();
    assert_eq!(early.values(), vec![0, 1, 2]);
    assert_eq!(late.values(), vec![10, 2]);
}

#[test]
fn test_observe_latest() {
    let mut g = FlowGraph::new();
    let source = g.new_source::<i32>();
    let all = source.stream().observe(&g);
    let latest = source.stream().observe_latest(&g);

    for x in 0..100 {
        source.push(&g, x);
    }
    g.flush();
    assert_eq!(all.count(), 100);
    assert_eq!(latest.count(), 100);
    assert_eq!(latest.values(), vec![99]);
    assert_eq!(latest.latest(), Some(99));

    source.push(&g, 100);
    source.complete(&g);
    g.flush();
    assert_eq!(latest.values(), vec![100]);
    assert_eq!(latest.count(), 101);
    assert!(latest.is_complete());
}

#[test]
fn stream_like() {
    let stream = Rc::new(RefCell::new(Vec::new()));
    let stream_ref = stream.clone();
    let input1 = vec![1, 2, 3];
    let input2 = vec![0.5, 0.4, 0.8];

    let mut g = FlowGraph::new();
    let var1 = g.new_source::<i32>();
    let var2 = g.new_source::<f64>();
    let sum = g.combine_latest2(var1.stream(), var2.stream(), |a, b| *a as f64 + *b);

    sum.for_each(&g, move |sum| {
        stream_ref.borrow_mut().push(*sum);
    });

    var1.push(&g, 0);
    var2.push(&g, 0.0);
    g.flush();
    assert_eq!(&*stream.borrow(), &vec![0.0]);
    for (a, b) in input1.iter().zip(input2.iter()) {
        var1.push(&g, *a);
        var2.push(&g, *b);
        g.flush();
    }
    assert_eq!(&*stream.borrow(), &vec![0.0, 1.0, 1.5, 2.5, 2.4, 3.4, 3.8]);
}
