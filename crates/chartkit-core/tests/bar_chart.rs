// File: crates/chartkit-core/tests/bar_chart.rs
// Purpose: Bar chart lifecycle: setup, rescale, enter/update/exit of bars, axis redraw
// and the handling of missing values.

use chartkit_core::scale::Scale;
use chartkit_core::{BarChart, ChartConfig, ChartError, JoinKey, Page, Shape, StateRecord, Surface};

fn rec(state: &str, percent: f64) -> StateRecord {
    StateRecord { state: state.to_string(), percent }
}

fn page() -> Page {
    Page::new("test").with_host("#chart")
}

fn states(n: usize) -> Vec<StateRecord> {
    (0..n).map(|i| rec(&format!("S{i}"), 0.3 + i as f64 * 0.05)).collect()
}

fn chart_with(data: Vec<StateRecord>, join: JoinKey) -> BarChart<StateRecord> {
    let cfg = ChartConfig::new("#chart").with_join_key(join);
    BarChart::new(cfg, data, &page()).expect("host exists")
}

fn tick_labels(surface: &Surface, axis_class: &str) -> Vec<String> {
    let group = surface.select_class(surface.root(), axis_class)[0];
    surface
        .select_class(group, "tick")
        .into_iter()
        .flat_map(|t| surface.children(t).to_vec())
        .filter_map(|id| match &surface.node(id)?.shape {
            Shape::Text { content, .. } => Some(content.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn construct_builds_structure_without_bars() {
    let chart = chart_with(states(3), JoinKey::Index);
    assert_eq!(chart.inner_size(), (900.0, 430.0));
    assert!(chart.bars().is_empty());
    let s = chart.surface();
    assert_eq!(s.select_class(s.root(), "x-axis").len(), 1);
    assert_eq!(s.select_class(s.root(), "y-axis").len(), 1);
    assert_eq!(s.select_class(s.root(), "axis-label").len(), 1);

    // the y title is the only text child of the y axis group, rotated onto the left edge
    let y_axis = s.select_class(s.root(), "y-axis")[0];
    let titles: Vec<_> = s
        .children(y_axis)
        .iter()
        .filter_map(|id| s.node(*id))
        .filter(|n| matches!(&n.shape, Shape::Text { content, .. } if content == "Percent Drinking"))
        .collect();
    assert_eq!(titles.len(), 1);
    assert!(titles[0].classes.is_empty());
    assert_eq!(titles[0].transform.rotate, -90.0);
}

#[test]
fn missing_host_is_an_error() {
    let cfg = ChartConfig::new("#nowhere");
    let err = BarChart::new(cfg, states(2), &page()).err().expect("should fail");
    assert!(matches!(err, ChartError::HostNotFound(ref s) if s == "#nowhere"));
}

#[test]
fn update_sets_domains_and_bar_geometry() {
    let mut chart = chart_with(vec![rec("A", 0.2), rec("B", 0.8), rec("C", 0.5)], JoinKey::Index);
    let report = chart.update(None);
    assert_eq!((report.entered, report.updated, report.exited), (3, 0, 0));
    assert!(report.invalid.is_empty());

    assert_eq!(*chart.y_scale().domain(), (0.0, 0.8));
    assert_eq!(chart.x_scale().domain(), &vec!["A".to_string(), "B".to_string(), "C".to_string()]);

    let bars = chart.bars();
    assert_eq!(bars.len(), 3);
    let (_, tallest) = bars[1];
    assert!(tallest.y.abs() < 1e-9);
    assert!((tallest.height - 430.0).abs() < 1e-9);
    for ((_, r), d) in bars.iter().zip(chart.data()) {
        let x = chart.x_scale().map(&d.state).unwrap();
        assert_eq!(r.x, x);
        assert_eq!(r.width, chart.x_scale().bandwidth());
        let y = chart.y_scale().map(&d.percent).unwrap();
        assert!((r.y - y).abs() < 1e-9);
        assert!((r.bottom() - 430.0).abs() < 1e-9);
    }
}

#[test]
fn render_redraws_axes() {
    let mut chart = chart_with(vec![rec("Ohio", 0.5), rec("Iowa", 0.7)], JoinKey::Index);
    chart.update(None);
    assert_eq!(tick_labels(chart.surface(), "x-axis"), vec!["Ohio", "Iowa"]);
    let y_labels = tick_labels(chart.surface(), "y-axis");
    assert_eq!(y_labels.first().map(String::as_str), Some("0.00"));
    assert_eq!(y_labels.last().map(String::as_str), Some("0.70"));

    chart.update(Some(vec![rec("Utah", 0.1)]));
    assert_eq!(tick_labels(chart.surface(), "x-axis"), vec!["Utah"]);
}

#[test]
fn render_is_idempotent() {
    let mut chart = chart_with(states(6), JoinKey::Index);
    chart.update(None);
    let before = chart.bars();
    let report = chart.render();
    assert_eq!((report.entered, report.updated, report.exited), (0, 6, 0));
    assert_eq!(chart.bars(), before);
}

#[test]
fn shrinking_keeps_leading_bars() {
    let mut chart = chart_with(states(8), JoinKey::Index);
    chart.update(None);
    let ids: Vec<_> = chart.bars().into_iter().map(|(id, _)| id).collect();

    let report = chart.update(Some(states(5)));
    assert_eq!((report.entered, report.updated, report.exited), (0, 5, 3));
    let kept: Vec<_> = chart.bars().into_iter().map(|(id, _)| id).collect();
    assert_eq!(kept, ids[..5].to_vec());
}

#[test]
fn category_join_follows_names() {
    let mut chart = chart_with(vec![rec("A", 10.0), rec("B", 20.0)], JoinKey::Category);
    chart.update(None);
    let b_id = chart.bars()[1].0;

    let report = chart.update(Some(vec![rec("B", 5.0), rec("C", 15.0)]));
    assert_eq!((report.entered, report.updated, report.exited), (1, 1, 1));
    let bars = chart.bars();
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].0, b_id);
    assert_eq!(*chart.y_scale().domain(), (0.0, 15.0));
}

#[test]
fn index_join_reuses_bars_across_datasets() {
    let mut chart = chart_with(vec![rec("A", 10.0), rec("B", 20.0)], JoinKey::Index);
    chart.update(None);
    let report = chart.update(Some(vec![rec("B", 5.0), rec("C", 15.0)]));
    assert_eq!((report.entered, report.updated, report.exited), (0, 2, 0));
}

#[test]
fn missing_value_is_clamped_and_flagged() {
    let mut chart = chart_with(vec![rec("A", 0.4), rec("B", f64::NAN), rec("C", 0.6)], JoinKey::Index);
    let report = chart.update(None);
    assert_eq!(report.invalid, vec![1]);
    assert_eq!(*chart.y_scale().domain(), (0.0, 0.6));
    let (_, b) = chart.bars()[1];
    assert_eq!(b.height, 0.0);
    assert_eq!(b.y, 430.0);
}

#[test]
fn negative_value_is_clamped_and_flagged() {
    let mut chart = chart_with(vec![rec("A", -0.4), rec("B", 0.6)], JoinKey::Index);
    let report = chart.update(None);
    assert_eq!(report.invalid, vec![0]);
    assert_eq!(chart.bars()[0].1.height, 0.0);
}

#[test]
fn empty_dataset_renders_no_bars() {
    let mut chart = chart_with(states(4), JoinKey::Index);
    chart.update(None);
    let report = chart.update(Some(Vec::new()));
    assert_eq!(report.exited, 4);
    assert!(chart.bars().is_empty());
    assert_eq!(*chart.y_scale().domain(), (0.0, 0.0));
}

#[test]
fn bars_transition_with_stagger() {
    let mut chart = chart_with(states(4), JoinKey::Index);
    chart.update(None);
    let s = chart.surface();
    assert_eq!(s.transition_end_ms(), 3.0 * 5.0 + 500.0);

    // entering bars start with zero height
    let start = s.frame_at(0.0);
    for id in start.select_class(start.root(), "bar") {
        match start.node(id).map(|n| &n.shape) {
            Some(Shape::Rect(r)) => assert_eq!(r.height, 0.0),
            other => panic!("unexpected bar shape {other:?}"),
        }
    }
    let end = s.frame_at(10_000.0);
    let settled: Vec<_> = end
        .select_class(end.root(), "bar")
        .into_iter()
        .filter_map(|id| match end.node(id)?.shape {
            Shape::Rect(r) => Some(r),
            _ => None,
        })
        .collect();
    let finals: Vec<_> = chart.bars().into_iter().map(|(_, r)| r).collect();
    assert_eq!(settled, finals);
}

#[test]
fn second_initialize_duplicates_structure() {
    let mut chart = chart_with(states(3), JoinKey::Index);
    chart.update(None);
    chart.initialize();
    let s = chart.surface();
    assert_eq!(s.select_class(s.root(), "x-axis").len(), 2);

    chart.update(None);
    // the fresh copy gets its own bars; the old ones stay behind
    assert_eq!(chart.bars().len(), 3);
    let s = chart.surface();
    assert_eq!(s.select_class(s.root(), "bar").len(), 6);
}

#[test]
fn mount_places_surface_in_host() {
    let mut p = page();
    let mut chart = BarChart::new(ChartConfig::new("#chart"), states(2), &p).unwrap();
    chart.update(None);
    chart.mount(&mut p).unwrap();
    let host = p.resolve("chart").unwrap();
    assert_eq!(host.surfaces().count(), 1);
    assert_eq!(p.surfaces().count(), 1);
}

#[test]
fn two_bars_share_width_and_scale_height() {
    let mut chart = chart_with(vec![rec("A", 10.0), rec("B", 20.0)], JoinKey::Index);
    chart.update(None);
    let bars = chart.bars();
    assert_eq!(bars.len(), 2);
    let (a, b) = (bars[0].1, bars[1].1);
    assert_eq!(a.width, b.width);
    assert!((b.height - 2.0 * a.height).abs() < 1e-9);
    assert!((b.height - 430.0).abs() < 1e-9);
    assert!(a.x < b.x);
}

#[test]
fn clear_children_empties_a_group() {
    let mut chart = chart_with(states(4), JoinKey::Index);
    chart.update(None);
    let mut s = chart.surface().clone();
    let g = chart.chart_group();
    assert!(!s.children(g).is_empty());
    s.clear_children(g);
    assert!(s.children(g).is_empty());
    assert!(s.select_class(s.root(), "bar").is_empty());
    assert!(s.node(g).is_some());
}

#[test]
fn all_negative_values_stay_on_the_baseline() {
    let mut chart = chart_with(vec![rec("A", -5.0), rec("B", -2.0)], JoinKey::Index);
    let report = chart.update(None);
    assert_eq!(report.invalid, vec![0, 1]);
    for (_, r) in chart.bars() {
        assert_eq!(r.height, 0.0);
        assert_eq!(r.y, 430.0);
    }
}

#[test]
fn all_zero_values_draw_flat_bars() {
    let mut chart = chart_with(vec![rec("A", 0.0), rec("B", 0.0)], JoinKey::Index);
    let report = chart.update(None);
    assert!(report.invalid.is_empty());
    assert_eq!(*chart.y_scale().domain(), (0.0, 0.0));
    for (_, r) in chart.bars() {
        assert_eq!(r.height, 0.0);
        assert_eq!(r.y, 430.0);
    }

    chart.update(Some(vec![rec("A", 0.0), rec("B", 4.0)]));
    let bars = chart.bars();
    assert_eq!(bars[0].1.height, 0.0);
    assert!((bars[1].1.height - 430.0).abs() < 1e-9);
}

#[test]
fn repeated_updates_reuse_node_storage() {
    let mut chart = chart_with(states(5), JoinKey::Index);
    chart.update(None);
    let capacity = chart.surface().capacity();
    let live = chart.surface().len();
    for _ in 0..1000 {
        chart.update(None);
    }
    let s = chart.surface();
    assert_eq!(s.len(), live);
    assert_eq!(s.capacity(), capacity);
    let mut highest = 0;
    s.visit(s.root(), &mut |n| highest = highest.max(n.id.index()));
    assert!(highest < capacity);
}

#[test]
fn shrink_and_domain_hold_across_sizes() {
    for n in 0..=12 {
        for m in 0..=12 {
            let mut chart = chart_with(states(n), JoinKey::Index);
            chart.update(None);
            let ids: Vec<_> = chart.bars().into_iter().map(|(id, _)| id).collect();

            let next = states(m);
            let report = chart.update(Some(next.clone()));
            assert_eq!(report.entered, m.saturating_sub(n), "{n} -> {m}");
            assert_eq!(report.updated, n.min(m), "{n} -> {m}");
            assert_eq!(report.exited, n.saturating_sub(m), "{n} -> {m}");

            let bars = chart.bars();
            assert_eq!(bars.len(), m);
            let kept: Vec<_> = bars.iter().take(n.min(m)).map(|(id, _)| *id).collect();
            assert_eq!(kept, ids[..n.min(m)].to_vec(), "{n} -> {m}");

            let categories: Vec<String> = next.iter().map(|r| r.state.clone()).collect();
            assert_eq!(chart.x_scale().domain(), &categories);
            let top = next.iter().map(|r| r.percent).fold(0.0, f64::max);
            assert_eq!(chart.y_scale().domain().1, top);
        }
    }
}
