use dash_charts::Page;
use dash_charts::chart::{
    AxisState, ChartContext, ChartSpec, ChartView, Dataset, Gesture, InteractionProfile,
    PanZoomOptions, RenderSurface, SvgSurface, WheelState,
};
use dash_charts::models::TimeSeries;
use dash_charts::viz::MetricKind;
use dash_charts::viz_style::DatasetStyle;

fn daily_view() -> ChartView {
    let labels: Vec<String> = (1..=9).map(|d| format!("2024-03-0{d}")).collect();
    let values = (0..9).map(|i| (i * i) as f64).collect();
    let spec = ChartSpec::for_metric(
        "downloads_per_day_chart",
        MetricKind::Cumulative,
        "Downloads per day",
        vec![Dataset::new(
            "Downloads",
            TimeSeries::new(labels, values).unwrap(),
            DatasetStyle::palette(0),
        )],
        InteractionProfile::PanZoom(PanZoomOptions::detailed_daily()),
    )
    .unwrap();
    let page = Page::from_ids([
        "downloads_per_day_chart",
        "downloads_per_day_chart_reset",
        "downloads_per_day_chart_toggle_zoom",
    ])
    .unwrap();
    let ctx = ChartContext::bind(&page, "downloads_per_day_chart", true, |id| {
        SvgSurface::new(id, 400, 240)
    })
    .unwrap();
    ChartView::new(spec, ctx).unwrap()
}

#[test]
fn toggling_twice_restores_wheel_flag_and_window() {
    let mut view = daily_view();
    let before = view.window();
    assert!(view.toggle_wheel_zoom().unwrap());
    assert!(view.surface().wheel_zoom());
    assert!(!view.toggle_wheel_zoom().unwrap());
    assert!(!view.surface().wheel_zoom());
    assert_eq!(view.window(), before);
    assert_eq!(
        view.interaction().unwrap().wheel_state(),
        WheelState::Off
    );
}

#[test]
fn wheel_zoom_then_reset_twice() {
    let mut view = daily_view();
    let default = view.window();

    // Wheel is ignored while the toggle is off.
    let notch = Gesture::Wheel {
        delta: 3.0,
        anchor: 0.5,
    };
    assert!(!view.handle(notch).unwrap());

    view.toggle_wheel_zoom().unwrap();
    assert!(view.handle(notch).unwrap());
    assert_eq!(view.axis_state(), AxisState::Transformed);
    assert!(view.window().x_span() < default.x_span());
    assert_eq!(view.surface().window(), Some(view.window()));

    view.reset_zoom().unwrap();
    assert_eq!(view.window(), default);
    assert_eq!(view.axis_state(), AxisState::Default);
    // Reset keeps the wheel flag.
    assert!(view.wheel_zoom_enabled());

    let draws = view.surface().draw_count();
    view.reset_zoom().unwrap();
    assert_eq!(view.window(), default);
    assert_eq!(view.surface().draw_count(), draws);
}

#[test]
fn drag_select_narrows_to_the_box() {
    let mut view = daily_view();
    assert!(
        view.handle(Gesture::DragSelect {
            from: 0.75,
            to: 0.25,
        })
        .unwrap()
    );
    let w = view.window();
    assert!((w.x_min - 2.0).abs() < 1e-9);
    assert!((w.x_max - 6.0).abs() < 1e-9);
    // y is untouched.
    assert_eq!(w.y_max, view.interaction().unwrap().default_window().y_max);
}

#[test]
fn static_chart_rejects_controls() {
    let labels = vec!["2024-01-01".to_string(), "2024-01-02".to_string()];
    let spec = ChartSpec::for_metric(
        "stars_chart",
        MetricKind::Cumulative,
        "GitHub stars",
        vec![Dataset::new(
            "Stars",
            TimeSeries::new(labels, vec![1.0, 2.0]).unwrap(),
            DatasetStyle::palette(0),
        )],
        InteractionProfile::None,
    )
    .unwrap();
    let mut view = ChartView::new(spec, ChartContext::new(SvgSurface::new("stars_chart", 300, 200)))
        .unwrap();
    assert!(view.toggle_wheel_zoom().is_err());
    assert!(view.reset_zoom().is_err());
    assert!(
        !view
            .handle(Gesture::Pinch {
                scale: 2.0,
                anchor: 0.5,
            })
            .unwrap()
    );
    assert_eq!(view.surface().draw_count(), 1);
}
