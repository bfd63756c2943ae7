use proptest::prelude::*;
use telechart::api::{ChartEngine, ChartEngineConfig, CursorEvent, WorkerMessage};
use telechart::core::{
    ChartData, ChartFlags, HandleAllocator, IndexRange, SeriesInput, SeriesKind, Viewport,
};
use telechart::interaction::{CanvasOffset, locate};
use telechart::render::NullRenderer;

proptest! {
    #[test]
    fn locating_a_data_value_returns_its_index(
        gaps in proptest::collection::vec(0.001f64..1_000.0, 1..300),
        start in -1e6f64..1e6,
        pick in 0usize..300,
    ) {
        let mut x = Vec::with_capacity(gaps.len() + 1);
        x.push(start);
        for gap in &gaps {
            let next = x[x.len() - 1] + gap;
            x.push(next);
        }
        let index = pick % x.len();
        let all = IndexRange::new(0, x.len() - 1);
        prop_assert_eq!(locate(&x, x[index], all), Some(index));
    }

    #[test]
    fn located_index_is_a_nearest_neighbour(
        len in 2usize..200,
        cursor in -10.0f64..210.0,
    ) {
        let x: Vec<f64> = (0..len).map(|i| i as f64).collect();
        let all = IndexRange::new(0, len - 1);
        let index = locate(&x, cursor, all).expect("index");
        let best = x
            .iter()
            .map(|value| (value - cursor).abs())
            .fold(f64::INFINITY, f64::min);
        prop_assert!(((x[index] - cursor).abs() - best).abs() <= 1e-9);
    }
}

#[test]
fn exact_midpoint_resolves_to_lower_index() {
    let x = [0.0, 10.0, 20.0];
    let all = IndexRange::new(0, 2);
    assert_eq!(locate(&x, 5.0, all), Some(0));
    assert_eq!(locate(&x, 15.0, all), Some(1));
    assert_eq!(locate(&x, 15.000_001, all), Some(2));
}

fn engine() -> ChartEngine<NullRenderer> {
    let handles = HandleAllocator::new();
    let x: Vec<f64> = (0..100).map(f64::from).collect();
    let a: Vec<f64> = (0..100).map(|i| f64::from(i % 10)).collect();
    let b: Vec<f64> = (0..100).map(|i| 50.0 - f64::from(i % 10)).collect();
    let data = ChartData::from_columns(
        x,
        vec![
            SeriesInput::new("a", SeriesKind::Line, a).with_name("Alpha"),
            SeriesInput::new("b", SeriesKind::Line, b).with_name("Beta"),
        ],
        ChartFlags::default(),
        &handles,
    )
    .expect("data");
    let config = ChartEngineConfig::new(Viewport::new(500, 300), Viewport::new(500, 60))
        .with_cursor_exit_delay_ms(300.0);
    ChartEngine::new(NullRenderer::default(), data, config).expect("engine")
}

#[test]
fn pointer_over_plot_emits_tooltip_values() {
    let mut engine = engine();
    let offset = CanvasOffset {
        left: 10.0,
        top: 20.0,
    };
    engine.on_pointer_move(260.0, 120.0, offset);
    assert!(engine.cursor_visible());
    let index = engine.cursor_index().expect("index");
    assert!(engine.main_range_indexes().expect("range").contains(index));

    let events = engine.drain_cursor_events();
    assert_eq!(events.len(), 1);
    let CursorEvent::Moved { values, x, .. } = &events[0] else {
        panic!("expected a move event");
    };
    assert_eq!(*x, index as f64);
    assert_eq!(values.len(), 2);
    assert_eq!(values[0].name, "Alpha");
    assert_eq!(values[1].value, 50.0 - (index % 10) as f64);

    // Same index again: no duplicate notification.
    engine.on_pointer_move(260.2, 121.0, offset);
    assert!(engine.drain_cursor_events().is_empty());

    let message = WorkerMessage::from(events[0].clone());
    let json = message.to_json().expect("json");
    assert!(json.starts_with(r#"{"type":"TOOLTIP""#));
    assert_eq!(WorkerMessage::from_json(&json).expect("decode"), message);
}

#[test]
fn leaving_hides_cursor_after_delay() {
    let mut engine = engine();
    engine.on_pointer_move(250.0, 100.0, CanvasOffset::default());
    engine.drain_cursor_events();

    engine.on_pointer_leave(false);
    engine.tick(200.0);
    assert!(engine.cursor_visible());
    assert!(engine.drain_cursor_events().is_empty());

    engine.tick(150.0);
    assert!(!engine.cursor_visible());
    assert_eq!(engine.drain_cursor_events(), vec![CursorEvent::Hidden]);
}

#[test]
fn pointer_below_plot_counts_as_leave() {
    let mut engine = engine();
    engine.on_pointer_move(250.0, 100.0, CanvasOffset::default());
    // The x-axis strip sits below the plot.
    engine.on_pointer_move(250.0, 295.0, CanvasOffset::default());
    assert!(engine.cursor_visible());
    engine.tick(400.0);
    assert!(!engine.cursor_visible());
}

#[test]
fn forced_leave_hides_immediately() {
    let mut engine = engine();
    engine.on_pointer_move(250.0, 100.0, CanvasOffset::default());
    engine.on_pointer_leave(true);
    assert!(!engine.cursor_visible());
    assert_eq!(engine.cursor_index(), None);
}
