use approx::assert_relative_eq;
use telechart::api::{ChartEngine, ChartEngineConfig, ColorRole, ThemeTable};
use telechart::core::{
    ChartData, ChartFlags, ChartRole, Extrema, HandleAllocator, SeriesInput, SeriesKind, Viewport,
};
use telechart::render::{CanvasLayerKind, Color, NullRenderer, SurfaceId};
use telechart::{ChartError, ChartResult};

fn config() -> ChartEngineConfig {
    ChartEngineConfig::new(Viewport::new(500, 300), Viewport::new(500, 60))
}

fn line_data() -> ChartData {
    let handles = HandleAllocator::new();
    let x: Vec<f64> = (0..1000).map(f64::from).collect();
    let low: Vec<f64> = (0..1000).map(|i| f64::from(i % 20)).collect();
    let high: Vec<f64> = (0..1000).map(|i| 200.0 + f64::from(i % 30)).collect();
    ChartData::from_columns(
        x,
        vec![
            SeriesInput::new("low", SeriesKind::Line, low),
            SeriesInput::new("high", SeriesKind::Line, high),
        ],
        ChartFlags::default(),
        &handles,
    )
    .expect("data")
}

fn settle<R: telechart::render::Renderer>(engine: &mut ChartEngine<R>) {
    for _ in 0..60 {
        engine.tick(16.0);
    }
}

#[test]
fn engine_starts_on_last_quarter_of_domain() {
    let engine = ChartEngine::new(NullRenderer::default(), line_data(), config()).expect("engine");
    let (from, to) = engine.main_range();
    assert_relative_eq!(from, 999.0 - 999.0 * 0.25);
    assert_eq!(to, 999.0);
    assert_eq!(engine.navigator_window(), (from, to));
    assert_eq!(engine.navigator_view().range(), (0.0, 999.0));
    assert!(!engine.y_axis_values().is_empty());
}

#[test]
fn invalid_config_is_rejected() {
    let result = ChartEngine::new(
        NullRenderer::default(),
        line_data(),
        config().with_padding_pixels(f64::NAN),
    );
    assert!(matches!(result, Err(ChartError::InvalidData(_))));

    let result = ChartEngine::new(
        NullRenderer::default(),
        line_data(),
        ChartEngineConfig::new(Viewport::new(0, 300), Viewport::new(500, 60)),
    );
    assert!(matches!(result, Err(ChartError::InvalidViewport { .. })));
}

#[test]
fn visibility_round_trip_restores_extrema() {
    let mut engine =
        ChartEngine::new(NullRenderer::default(), line_data(), config()).expect("engine");
    let high = engine.data().series_by_label("high").expect("series").id;
    settle(&mut engine);

    let before_local = engine
        .main_view()
        .series_state(high)
        .and_then(|state| state.local_extrema());
    let before_chart = engine.main_extrema().expect("extrema");
    assert_eq!(before_chart, Extrema::new(0.0, 229.0));
    let global = engine.global_extrema();
    assert!(global.is_some());

    assert!(!engine.toggle_series_visibility(high).expect("toggle"));
    settle(&mut engine);
    assert_eq!(engine.global_extrema(), global);
    assert_eq!(engine.series_opacity(high), Some(0.0));
    assert_eq!(engine.navigator_series_opacity(high), Some(0.0));
    assert_eq!(engine.main_extrema(), Some(Extrema::new(0.0, 19.0)));

    assert!(engine.toggle_series_visibility(high).expect("toggle"));
    settle(&mut engine);
    assert_eq!(engine.series_opacity(high), Some(1.0));
    assert_eq!(engine.navigator_series_opacity(high), Some(1.0));
    let after_local = engine
        .main_view()
        .series_state(high)
        .and_then(|state| state.local_extrema());
    assert_eq!(after_local, before_local);
    assert_eq!(engine.main_extrema(), Some(before_chart));
}

#[test]
fn hiding_every_series_keeps_previous_scale() {
    let mut engine =
        ChartEngine::new(NullRenderer::default(), line_data(), config()).expect("engine");
    let ids: Vec<_> = engine.data().series().iter().map(|column| column.id).collect();
    settle(&mut engine);

    for id in &ids {
        engine.set_series_visibility(*id, false).expect("hide");
    }
    settle(&mut engine);
    // Only "high" was left when the last series went away.
    assert_eq!(engine.main_target_extrema(), Some(Extrema::new(200.0, 229.0)));
    assert_eq!(engine.main_extrema(), Some(Extrema::new(200.0, 229.0)));
}

#[test]
fn unknown_series_is_an_error() {
    let mut engine =
        ChartEngine::new(NullRenderer::default(), line_data(), config()).expect("engine");
    let stranger = HandleAllocator::new();
    for _ in 0..10 {
        stranger.next_series();
    }
    let unknown = stranger.next_series();
    assert!(matches!(
        engine.toggle_series_visibility(unknown),
        Err(ChartError::UnknownSeries { .. })
    ));
}

#[test]
fn render_sends_only_dirty_surfaces() {
    let mut engine =
        ChartEngine::new(NullRenderer::default(), line_data(), config()).expect("engine");
    engine.render().expect("first render");
    assert_eq!(engine.renderer().frames_rendered, 1);
    assert_eq!(engine.renderer().last_surfaces.len(), 6);

    engine.tick(1_000.0);
    engine.render().expect("settle render");
    let rendered = engine.renderer().frames_rendered;

    engine.tick(16.0);
    engine.render().expect("idle render");
    assert_eq!(engine.renderer().frames_rendered, rendered);

    engine.on_pointer_move(250.0, 100.0, Default::default());
    engine.render().expect("cursor render");
    assert_eq!(
        engine.renderer().last_surfaces,
        vec![SurfaceId::new(ChartRole::Main, CanvasLayerKind::Cursor)]
    );
    let frame = engine.renderer().last_frame.as_ref().expect("frame");
    assert_eq!(frame.surfaces[0].lines.len(), 1);
    assert_eq!(frame.surfaces[0].circles.len(), 2);
}

#[test]
fn navigator_overlay_masks_outside_window() {
    let mut engine =
        ChartEngine::new(NullRenderer::default(), line_data(), config()).expect("engine");
    engine.navigator_set_window(250.0, 500.0).expect("window");
    engine.tick(0.0);
    engine.render().expect("render");

    let frame = engine.renderer().last_frame.as_ref().expect("frame");
    let overlay = frame
        .surface(SurfaceId::new(ChartRole::Navigator, CanvasLayerKind::Cursor))
        .expect("overlay");
    let masks: Vec<_> = overlay.rects.iter().filter(|rect| rect.height > 0.0).collect();
    assert!(masks.len() >= 2);
    assert_relative_eq!(overlay.rects[0].width, 250.0 / 999.0 * 500.0, epsilon = 1e-9);
}

#[test]
fn theme_change_repaints_everything_with_new_colors() {
    let mut engine =
        ChartEngine::new(NullRenderer::default(), line_data(), config()).expect("engine");
    engine.tick(1_000.0);
    engine.render().expect("render");

    let theme = ThemeTable::from_hex_entries([(ColorRole::Background, "#101010")]).expect("theme");
    engine.set_theme(theme);
    engine.tick(0.0);
    engine.render().expect("render");

    assert_eq!(engine.renderer().last_surfaces.len(), 6);
    let frame = engine.renderer().last_frame.as_ref().expect("frame");
    let axis = frame
        .surface(SurfaceId::new(ChartRole::Main, CanvasLayerKind::Axis))
        .expect("axis");
    let background = Color::from_hex("#101010").expect("color");
    assert_eq!(axis.clear_color, Some(background));
}

#[test]
fn zoom_and_pan_are_mirrored_to_navigator() -> ChartResult<()> {
    let mut engine = ChartEngine::new(NullRenderer::default(), line_data(), config())?;
    let (from, to) = engine.main_range();
    let span = to - from;

    engine.zoom_main_at(250.0, 2.0)?;
    let (zoom_from, zoom_to) = engine.main_range();
    assert_relative_eq!(zoom_to - zoom_from, span / 2.0, epsilon = 1e-9);
    engine.tick(0.0);
    let (window_from, window_to) = engine.navigator_window();
    assert_relative_eq!(window_from, zoom_from, epsilon = 1e-9);
    assert_relative_eq!(window_to, zoom_to, epsilon = 1e-9);

    engine.pan_main_by_pixels(1e9)?;
    let (pan_from, pan_to) = engine.main_range();
    assert_relative_eq!(pan_to, 999.0, epsilon = 1e-9);
    assert_relative_eq!(pan_to - pan_from, span / 2.0, epsilon = 1e-9);

    engine.zoom_main_at(250.0, 1e9)?;
    let (tight_from, tight_to) = engine.main_range();
    assert_relative_eq!(tight_to - tight_from, 2.0, epsilon = 1e-9);

    assert!(engine.zoom_main_at(250.0, 0.0).is_err());
    assert!(engine.pan_main_by_pixels(f64::INFINITY).is_err());
    Ok(())
}

#[test]
fn stacked_bars_scale_to_stacked_totals() {
    let handles = HandleAllocator::new();
    let x: Vec<f64> = (0..200).map(f64::from).collect();
    let data = ChartData::from_columns(
        x,
        vec![
            SeriesInput::new("a", SeriesKind::Bar, vec![3.0; 200]),
            SeriesInput::new("b", SeriesKind::Bar, vec![4.0; 200]),
        ],
        ChartFlags {
            stacked: true,
            ..ChartFlags::default()
        },
        &handles,
    )
    .expect("data");
    let b = data.series()[1].id;
    let mut engine = ChartEngine::new(NullRenderer::default(), data, config()).expect("engine");
    assert_eq!(engine.main_target_extrema(), Some(Extrema::new(0.0, 7.0)));

    engine.set_series_visibility(b, false).expect("hide");
    settle(&mut engine);
    assert_eq!(engine.main_target_extrema(), Some(Extrema::new(0.0, 3.0)));
    engine.render().expect("render");
}

#[test]
fn percentage_chart_uses_fixed_scale() {
    let handles = HandleAllocator::new();
    let x: Vec<f64> = (0..50).map(f64::from).collect();
    let data = ChartData::from_columns(
        x,
        vec![
            SeriesInput::new("a", SeriesKind::PercentageArea, vec![1.0; 50]),
            SeriesInput::new("b", SeriesKind::PercentageArea, vec![3.0; 50]),
        ],
        ChartFlags {
            stacked: true,
            percentage: true,
            ..ChartFlags::default()
        },
        &handles,
    )
    .expect("data");
    let mut engine = ChartEngine::new(NullRenderer::default(), data, config()).expect("engine");
    assert_eq!(engine.main_target_extrema(), Some(Extrema::new(0.0, 100.0)));
    engine.render().expect("render");
    assert!(engine.renderer().last_path_count >= 2);
}

#[test]
fn independent_y_scaling_keeps_one_scale_per_series() {
    let handles = HandleAllocator::new();
    let x: Vec<f64> = (0..300).map(f64::from).collect();
    let data = ChartData::from_columns(
        x,
        vec![
            SeriesInput::new(
                "small",
                SeriesKind::Line,
                (0..300).map(|i| f64::from(i % 5)).collect(),
            ),
            SeriesInput::new(
                "large",
                SeriesKind::Line,
                (0..300).map(|i| 1_000.0 + f64::from(i % 50) * 100.0).collect(),
            ),
        ],
        ChartFlags {
            y_scaled: true,
            ..ChartFlags::default()
        },
        &handles,
    )
    .expect("data");
    let mut engine = ChartEngine::new(NullRenderer::default(), data, config()).expect("engine");
    settle(&mut engine);

    let view = engine.main_view();
    assert_eq!(view.y_labels().len(), 2);
    let states = view.series_states();
    assert_eq!(states[0].extrema().current(), Some(Extrema::new(0.0, 4.0)));
    assert_eq!(states[1].extrema().current(), Some(Extrema::new(1_000.0, 5_900.0)));
    assert!(view.y_labels()[1].shown_values().iter().all(|v| *v >= 1_000.0));
    engine.render().expect("render");
}

#[test]
fn resize_rescales_and_hides_cursor() -> ChartResult<()> {
    let mut engine = ChartEngine::new(NullRenderer::default(), line_data(), config())?;
    let before = engine.main_pixel_x();
    engine.on_pointer_move(250.0, 100.0, Default::default());
    engine.resize(Viewport::new(1000, 300), Viewport::new(1000, 60))?;
    assert!(engine.main_pixel_x() < before);
    assert!(!engine.cursor_visible());
    assert!(engine.resize(Viewport::new(1000, 0), Viewport::new(1000, 60)).is_err());
    engine.tick(16.0);
    engine.render()?;
    Ok(())
}

#[test]
fn exhausted_label_pool_drops_extra_ticks() {
    let config = config().with_label_pool_capacity(2);
    let mut engine =
        ChartEngine::new(NullRenderer::default(), line_data(), config).expect("engine");
    settle(&mut engine);
    let values = engine.y_axis_values();
    assert!(!values.is_empty());
    assert!(values.len() <= 2);
    assert_eq!(engine.main_view().y_labels()[0].allocated(), 2);
    engine.render().expect("render");
}
