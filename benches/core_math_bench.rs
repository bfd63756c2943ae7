use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use telechart::api::{ChartEngine, ChartEngineConfig, ThemeTable};
use telechart::core::{
    ChartData, ChartFlags, ChartRole, Extrema, GroupingTuning, HandleAllocator, IndexRange,
    PointGrouper, SeriesInput, SeriesKind, StackSums, Viewport,
};
use telechart::render::NullRenderer;

const POINTS: usize = 100_000;

fn x_axis() -> Vec<f64> {
    (0..POINTS).map(|i| i as f64 * 60_000.0).collect()
}

fn wave(phase: f64) -> Vec<f64> {
    (0..POINTS)
        .map(|i| 500.0 + ((i as f64) / 300.0 + phase).sin() * 400.0)
        .collect()
}

fn bench_grouping_plan_100k(c: &mut Criterion) {
    let x = x_axis();
    let grouper = PointGrouper::new(GroupingTuning::default());
    let range = IndexRange::new(0, POINTS - 1);
    let pixel_x = (x[POINTS - 1] - x[0]) / 1_600.0;

    c.bench_function("grouping_plan_100k", |b| {
        b.iter(|| {
            let _ = grouper.plan(
                black_box(&x),
                black_box(range),
                black_box(pixel_x),
                ChartRole::Main,
            );
        })
    });
}

fn bench_extrema_scan_100k(c: &mut Criterion) {
    let values = wave(0.0);
    let range = IndexRange::new(0, POINTS - 1);

    c.bench_function("extrema_scan_100k", |b| {
        b.iter(|| {
            let _ = Extrema::scan(black_box(&values), black_box(range));
        })
    });
}

fn bench_stack_sums_refresh_100k(c: &mut Criterion) {
    let columns = [wave(0.0), wave(1.0), wave(2.0)];
    let mut sums = StackSums::new(POINTS);

    c.bench_function("stack_sums_refresh_100k", |b| {
        b.iter(|| {
            sums.refresh(columns.iter().map(|column| (&column[..], black_box(0.5))));
        })
    });
}

fn bench_full_frame_100k(c: &mut Criterion) {
    let handles = HandleAllocator::new();
    let data = ChartData::from_columns(
        x_axis(),
        vec![
            SeriesInput::new("y0", SeriesKind::Line, wave(0.0)),
            SeriesInput::new("y1", SeriesKind::Line, wave(1.5)),
        ],
        ChartFlags::default(),
        &handles,
    )
    .expect("bench data");
    let config = ChartEngineConfig::new(Viewport::new(1600, 600), Viewport::new(1600, 80));
    let mut engine = ChartEngine::new(NullRenderer::default(), data, config).expect("engine init");
    let (domain_min, domain_max) = engine.navigator_view().range();
    engine
        .navigator_set_window(domain_min, domain_max)
        .expect("full window");
    engine.tick(1_000.0);

    c.bench_function("full_frame_100k", |b| {
        b.iter(|| {
            // A theme change repaints every surface of both views.
            engine.set_theme(ThemeTable::new());
            engine.tick(0.0);
            engine.render().expect("render");
        })
    });
}

criterion_group!(
    benches,
    bench_grouping_plan_100k,
    bench_extrema_scan_100k,
    bench_stack_sums_refresh_100k,
    bench_full_frame_100k
);
criterion_main!(benches);
