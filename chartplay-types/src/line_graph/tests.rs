use super::*;

const EPS: f64 = 1e-9;

fn sample_graph() -> LineGraph {
    let mut graph = LineGraph::new(0.0);
    graph.insert(0, 1.0);
    graph.insert(1000, 2.0);
    graph.insert_point(2000, GraphPoint::slam(2.0, 0.0));
    graph.insert(3000, 1.0);
    graph
}

#[test]
fn empty_graph_uses_default() {
    let graph = LineGraph::new(0.5);
    assert!((graph.value_at(-100) - 0.5).abs() < EPS);
    assert!((graph.value_at(12345) - 0.5).abs() < EPS);
    assert!((graph.integrate(0, 100) - 50.0).abs() < EPS);
}

#[test]
fn empty_zero_default_integrates_to_zero() {
    let graph = LineGraph::new(0.0);
    assert_eq!(graph.integrate(0, 1000), 0.0);
}

#[test]
fn value_after_scalar_insert() {
    let mut graph = LineGraph::default();
    graph.insert(500, 0.75);
    assert!((graph.value_at(500) - 0.75).abs() < EPS);
}

#[test]
fn value_at_slam_key_is_pre_value() {
    let mut graph = LineGraph::default();
    graph.insert_str(500, "0.25;0.75");
    assert!((graph.value_at(500) - 0.25).abs() < EPS);
    assert!((graph.value_at(501) - 0.75).abs() < EPS);
}

#[test]
fn interpolation_between_points() {
    let graph = sample_graph();
    assert!((graph.value_at(500) - 1.5).abs() < EPS);
    assert!((graph.value_at(1500) - 2.0).abs() < EPS);
    // After the slam the segment runs from the post value
    assert!((graph.value_at(2500) - 0.5).abs() < EPS);
}

#[test]
fn flat_outside_points() {
    let graph = sample_graph();
    assert!((graph.value_at(-1000) - 1.0).abs() < EPS);
    assert!((graph.value_at(10_000) - 1.0).abs() < EPS);
}

#[test]
fn insert_existing_key_overwrites_post_only() {
    let mut graph = LineGraph::default();
    graph.insert(100, 1.0);
    graph.insert(100, 3.0);
    assert_eq!(graph.len(), 1);
    let point = graph.point_at(100).unwrap();
    assert!((point.pre - 1.0).abs() < EPS);
    assert!((point.post - 3.0).abs() < EPS);
    assert!(point.is_slam());
}

#[test]
fn insert_str_ignores_garbage() {
    let mut graph = LineGraph::default();
    graph.insert(0, 1.0);
    graph.insert_str(100, "abc");
    graph.insert_str(200, "1.0;xyz");
    graph.insert_str(0, "");
    assert_eq!(graph.len(), 1);
    assert!((graph.point_at(0).unwrap().post - 1.0).abs() < EPS);
}

#[test]
fn graph_point_from_str() {
    assert_eq!("1.5".parse::<GraphPoint>(), Ok(GraphPoint::new(1.5)));
    assert_eq!(
        "-1; 2".parse::<GraphPoint>(),
        Ok(GraphPoint::slam(-1.0, 2.0))
    );
    assert!("".parse::<GraphPoint>().is_err());
}

#[test]
fn extend_on_empty_inserts_default() {
    let mut graph = LineGraph::new(0.3);
    assert!((graph.extend(100) - 0.3).abs() < EPS);
    assert_eq!(graph.len(), 1);
    assert!(graph.point_at(100).is_some());
}

#[test]
fn extend_before_first_point_does_not_insert() {
    let mut graph = LineGraph::default();
    graph.insert_point(100, GraphPoint::slam(0.2, 0.8));
    assert!((graph.extend(50) - 0.2).abs() < EPS);
    assert!((graph.extend(100) - 0.2).abs() < EPS);
    assert_eq!(graph.len(), 1);
}

#[test]
fn extend_keeps_shape() {
    let mut graph = LineGraph::default();
    graph.insert_point(0, GraphPoint::slam(0.0, 1.0));
    graph.insert(1000, 1.0);
    graph.insert(2000, 3.0);

    let before = graph.integrate(0, 3000);
    assert!((graph.extend(500) - 1.0).abs() < EPS);
    assert!((graph.extend(2500) - 3.0).abs() < EPS);
    assert_eq!(graph.len(), 5);
    assert!((graph.integrate(0, 3000) - before).abs() < EPS);
}

#[test]
fn integrate_single_trapezoid() {
    let mut graph = LineGraph::new(0.0);
    graph.insert(0, 1.0);
    graph.insert(1000, 2.0);
    assert!((graph.integrate(0, 1000) - 1500.0).abs() < EPS);
}

#[test]
fn integrate_inside_one_segment() {
    let mut graph = LineGraph::new(0.0);
    graph.insert(0, 0.0);
    graph.insert(1000, 1000.0);
    // Line y = x over [250, 750]
    assert!((graph.integrate(250, 750) - 250_000.0).abs() < 1e-6);
}

#[test]
fn integrate_flat_regions() {
    let graph = sample_graph();
    assert!((graph.integrate(-500, 0) - 500.0).abs() < EPS);
    assert!((graph.integrate(3000, 3500) - 500.0).abs() < EPS);
    assert!((graph.integrate(4000, 5000) - 1000.0).abs() < EPS);
    assert!((graph.integrate(-2000, -1000) - 1000.0).abs() < EPS);
}

#[test]
fn integrate_across_slam() {
    let graph = sample_graph();
    // 500 + 1500 + 2000 + 500 + 500
    assert!((graph.integrate(-500, 3500) - 5000.0).abs() < EPS);
}

#[test]
fn integrate_is_additive() {
    let graph = sample_graph();
    let cuts = [-700, -1, 0, 1, 333, 1000, 1999, 2000, 2001, 2750, 3000, 3900];
    for &begin in &cuts {
        for &mid in &cuts {
            for &end in &cuts {
                if !(begin < mid && mid < end) {
                    continue;
                }
                let whole = graph.integrate(begin, end);
                let parts = graph.integrate(begin, mid) + graph.integrate(mid, end);
                assert!(
                    (whole - parts).abs() < 1e-6,
                    "[{}, {}, {}]: {} != {}",
                    begin,
                    mid,
                    end,
                    whole,
                    parts
                );
            }
        }
    }
}

#[test]
fn integrate_order_independent() {
    let graph = sample_graph();
    assert_eq!(graph.integrate(250, 2750), graph.integrate(2750, 250));
    assert_eq!(graph.integrate(1234, 1234), 0.0);
}

#[test]
fn string_value_at_slam_and_plain() {
    let mut graph = LineGraph::default();
    graph.insert(0, 1.5);
    graph.insert_point(100, GraphPoint::slam(0.25, -1.0));
    graph.insert(200, 2.0);
    assert_eq!(graph.string_value_at(0), "1.5");
    assert_eq!(graph.string_value_at(100), "0.25;-1");
    assert_eq!(graph.string_value_at(200), "2");
    assert_eq!(graph.string_value_at(50), "");
}

#[test]
fn upper_bound_skips_to_next_point() {
    let graph = sample_graph();
    assert_eq!(graph.upper_bound(-1).map(|(t, _)| t), Some(0));
    assert_eq!(graph.upper_bound(0).map(|(t, _)| t), Some(1000));
    assert_eq!(graph.upper_bound(3000), None);
}

#[test]
fn serde_roundtrip() {
    let graph = sample_graph();
    let json = serde_json::to_string(&graph).expect("serialize graph");
    let back: LineGraph = serde_json::from_str(&json).expect("deserialize graph");
    assert_eq!(graph, back);
}
