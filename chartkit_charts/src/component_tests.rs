// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end render cycles of the heatmap and line chart.

use std::sync::{Arc, Mutex};

use chartkit_core::{Mark, MarkPayload, MountPoint};
use kurbo::{PathEl, Point, Rect, Size};
use peniko::Brush;
use serde_json::{Value, json};

use crate::heatmap::layers::{
    CELLS, X_AXIS_LABEL, X_GUIDE_LINES, Y_AXIS, Y_AXIS_LABEL, Y_GUIDE_LINES,
};
use crate::linechart::layers::LINE;
use crate::{
    Axis, ChartError, ColorMap, Heatmap, HeatmapOptions, Linechart, LinechartOptions, Record,
    records_from_json,
};

fn rows(value: Value) -> Vec<Record> {
    records_from_json(value)
}

fn color_map() -> ColorMap {
    ColorMap::from_css([(0.0, "blue"), (10.0, "red")]).unwrap()
}

/// A 400x300 heatmap plot.
fn heatmap() -> Heatmap {
    Heatmap::new(MountPoint::new(480.0, 384.0))
}

/// A 200x100 line chart plot.
fn linechart() -> Linechart {
    Linechart::new(MountPoint::new(264.0, 164.0))
}

fn fill_alpha(mark: &Mark) -> Option<f32> {
    match &mark.payload {
        MarkPayload::Rect(r) => match &r.fill {
            Some(Brush::Solid(c)) => Some(c.components[3]),
            _ => None,
        },
        _ => None,
    }
}

fn texts(marks: Vec<(chartkit_core::MarkId, &Mark)>) -> Vec<String> {
    marks
        .into_iter()
        .filter_map(|(_, m)| match &m.payload {
            MarkPayload::Text(t) => Some(t.text.clone()),
            _ => None,
        })
        .collect()
}

fn grid(n: usize) -> Vec<Record> {
    rows(Value::Array(
        (0..n)
            .map(|i| json!({ "x": i % 3, "y": i / 3, "v": i }))
            .collect(),
    ))
}

#[test]
fn heatmap_two_cell_scenario() {
    let mut chart = heatmap();
    let data = rows(json!([{ "x": 0, "y": 0, "v": 0 }, { "x": 1, "y": 1, "v": 10 }]));
    let diffs = chart
        .render(&data, "x", "y", "v", 1.0, 1.0, HeatmapOptions::new(color_map()))
        .unwrap();

    let cells = chart.scene().marks_with_class("chart-cell");
    assert_eq!(cells.len(), 2, "one cell per record");
    let alphas: Vec<Option<f32>> = cells.iter().map(|(_, m)| fill_alpha(m)).collect();
    assert_eq!(alphas, vec![Some(0.0), Some(0.75)], "min is clear, max is 0.75");

    assert_eq!(
        chart.legend_scene().marks_with_class("chart-colorScaleBlock").len(),
        2,
        "one legend block per color map entry"
    );
    assert_eq!(
        texts(chart.legend_scene().marks_with_class("chart-colorScaleLabel")),
        vec!["0", "6 - 10"]
    );
    assert_eq!(chart.x_scale().map(|s| s.domain()), Some((0.0, 1.0)));
    assert_eq!(chart.y_scale().map(|s| s.domain()), Some((0.0, 1.0)));
    assert!(diffs.chart.iter().all(|d| d.is_enter()), "first render only enters");
    assert_eq!(diffs.legend.len(), 4, "two blocks and two labels");
}

#[test]
fn heatmap_rerender_is_stable() {
    let mut chart = heatmap();
    let data = grid(9);
    chart
        .render(&data, "x", "y", "v", 1.0, 1.0, HeatmapOptions::new(color_map()))
        .unwrap();
    let marks = chart.scene().len();

    let diffs = chart
        .render(&data, "x", "y", "v", 1.0, 1.0, HeatmapOptions::new(color_map()))
        .unwrap();
    assert_eq!(chart.scene().len(), marks, "no marks leak across renders");
    assert!(
        diffs
            .chart
            .iter()
            .all(|d| d.layer() == X_AXIS_LABEL || d.layer() == Y_AXIS_LABEL),
        "only the rebuilt axis labels change: {:?}",
        diffs.chart.iter().map(|d| d.layer()).collect::<Vec<_>>()
    );
    assert!(diffs.legend.is_empty(), "legend is unchanged");
}

#[test]
fn heatmap_shrinking_data_removes_cells() {
    let mut chart = heatmap();
    let opts = || HeatmapOptions::new(color_map()).with_x_domain(0.0, 3.0).with_y_domain(0.0, 3.0);
    chart.render(&grid(5), "x", "y", "v", 1.0, 1.0, opts()).unwrap();
    let diffs = chart.render(&grid(2), "x", "y", "v", 1.0, 1.0, opts()).unwrap();

    let cell_exits = diffs
        .chart
        .iter()
        .filter(|d| d.layer() == CELLS && d.is_exit())
        .count();
    assert_eq!(cell_exits, 3, "three stale cells exit");
    assert_eq!(chart.scene().bound_len(CELLS), 2);
    assert_eq!(chart.scene().marks_with_class("chart-cell").len(), 2);
}

#[test]
fn heatmap_cell_size_is_one_floored_interval() {
    let mut chart = heatmap();
    let opts = HeatmapOptions::new(color_map())
        .with_x_domain(0.0, 3.0)
        .with_y_domain(0.0, 7.0);
    chart.render(&grid(6), "x", "y", "v", 1.0, 1.0, opts).unwrap();
    assert_eq!(chart.cell_size(), Size::new(133.0, 42.0), "400/3 and 300/7, floored");

    for (_, mark) in chart.scene().marks_with_class("chart-cell") {
        let MarkPayload::Rect(r) = &mark.payload else {
            panic!("cells are rects");
        };
        let size = r.rect.size();
        assert!(
            (size.width - 133.0).abs() < 1e-9 && (size.height - 42.0).abs() < 1e-9,
            "every cell shares the size, got {size:?}"
        );
        assert_eq!(r.stroke, None, "no outline by default");
        assert_eq!(r.stroke_width, 2.0);
    }
}

#[test]
fn heatmap_single_row_and_column_stay_visible() {
    let mut chart = heatmap();
    let data = rows(json!([
        { "x": 0, "y": 0, "v": 1 },
        { "x": 1, "y": 0, "v": 2 },
        { "x": 2, "y": 0, "v": 3 },
    ]));
    chart
        .render(&data, "x", "y", "v", 1.0, 1.0, HeatmapOptions::new(color_map()))
        .unwrap();
    assert_eq!(
        chart.y_scale().map(|s| s.domain()),
        Some((-1.0, 0.0)),
        "a single row spans one interval"
    );
    assert_eq!(chart.cell_size(), Size::new(200.0, 300.0));
    for (_, mark) in chart.scene().marks_with_class("chart-cell") {
        let MarkPayload::Rect(r) = &mark.payload else {
            panic!("cells are rects");
        };
        assert_eq!((r.rect.y0, r.rect.y1), (0.0, 300.0), "the row fills the plot");
    }

    let mut single = heatmap();
    let data = rows(json!([{ "x": 4, "y": 9, "v": 1 }]));
    single
        .render(&data, "x", "y", "v", 2.0, 1.0, HeatmapOptions::new(color_map()))
        .unwrap();
    assert_eq!(single.x_scale().map(|s| s.domain()), Some((4.0, 6.0)));
    assert_eq!(single.cell_size(), Size::new(400.0, 300.0));
    let cells = single.scene().marks_with_class("chart-cell");
    assert_eq!(
        cells[0].1.payload.bounds(),
        Some(Rect::new(0.0, 0.0, 400.0, 300.0)),
        "one record covers the whole plot"
    );
}

#[test]
fn heatmap_domains_and_heat_follow_the_filtered_rows() {
    let mut chart = heatmap();
    let opts = HeatmapOptions::new(color_map()).with_filter_data_function(|rows| {
        rows.iter()
            .filter(|r| crate::field_f64(r, "v").is_some_and(|v| (2.0..=4.0).contains(&v)))
            .cloned()
            .collect()
    });
    // Keeps (2,0,v2), (0,1,v3) and (1,1,v4) of the 3x2 grid.
    chart.render(&grid(6), "x", "y", "v", 1.0, 1.0, opts).unwrap();

    assert_eq!(chart.x_scale().map(|s| s.domain()), Some((0.0, 2.0)));
    assert_eq!(chart.y_scale().map(|s| s.domain()), Some((0.0, 1.0)));
    let alphas: Vec<Option<f32>> = chart
        .scene()
        .marks_with_class("chart-cell")
        .iter()
        .map(|(_, m)| fill_alpha(m))
        .collect();
    assert_eq!(
        alphas,
        vec![Some(0.0), Some(0.375), Some(0.75)],
        "the filtered minimum is clear and the filtered maximum is 0.75"
    );
}

#[test]
fn heatmap_y_side_options() {
    let mut chart = heatmap();
    let opts = HeatmapOptions::new(color_map())
        .with_x_domain(0.0, 3.0)
        .with_y_domain(0.0, 6.0)
        .with_y_guide_lines(vec![1.0, 2.0])
        .with_y_tick_values(vec![0.0, 2.0, 4.0])
        .with_y_tick_label_function(|v| format!("row {v}"));
    chart.render(&grid(6), "x", "y", "v", 1.0, 1.0, opts).unwrap();
    assert_eq!(chart.cell_size().height, 50.0, "300 / 6");

    let xs = *chart.x_scale().unwrap();
    let guides = chart.scene().layer_marks(Y_GUIDE_LINES);
    assert_eq!(guides.len(), 2);
    for ((_, mark), value) in guides.iter().zip([1.0, 2.0]) {
        assert!(mark.has_class("yGuideLine") && mark.has_class("guideLine"));
        let bounds = mark.payload.bounds().unwrap();
        let x = xs.map(value);
        assert!(
            (bounds.x0 - x).abs() < 1e-9 && (bounds.x1 - x).abs() < 1e-9,
            "vertical line at the x position of {value}, got {bounds:?}"
        );
        assert_eq!((bounds.y0, bounds.y1), (0.0, 300.0), "spans the plot height");
    }

    let labels = chart.scene().layer_marks(Y_AXIS);
    assert_eq!(texts(labels.clone()), vec!["row 0", "row 2", "row 4"]);
    for (_, mark) in labels {
        if let MarkPayload::Text(t) = &mark.payload {
            assert_eq!(t.dy, 25.0, "tick labels sit half a cell lower");
        }
    }
}

#[test]
fn heatmap_requires_a_color_map_and_leaves_state_alone() {
    let mut chart = heatmap();
    let err = chart
        .render(&grid(3), "x", "y", "v", 1.0, 1.0, HeatmapOptions::default())
        .unwrap_err();
    assert_eq!(err, ChartError::MissingColorMap);
    assert!(chart.scene().is_empty(), "nothing was drawn");
    assert!(chart.layout().is_none(), "nothing was measured");
    assert!(!chart.mount().has_class("chart-heatmap"), "mount untouched");
}

#[test]
fn heatmap_errors_on_empty_data_without_domains() {
    let mut chart = heatmap();
    let err = chart
        .render(&[], "x", "y", "v", 1.0, 1.0, HeatmapOptions::new(color_map()))
        .unwrap_err();
    assert_eq!(
        err,
        ChartError::EmptyDomain {
            axis: Axis::X,
            field: "x".into()
        }
    );

    let opts = HeatmapOptions::new(color_map())
        .with_x_domain(0.0, 10.0)
        .with_y_domain(0.0, 10.0);
    chart.render(&[], "x", "y", "v", 1.0, 1.0, opts).unwrap();
    assert!(chart.scene().marks_with_class("chart-cell").is_empty());
    assert_eq!(chart.legend_scene().marks_with_class("chart-colorScaleBlock").len(), 2);
}

#[test]
fn heatmap_rejects_bad_intervals() {
    let mut chart = heatmap();
    let err = chart
        .render(&grid(3), "x", "y", "v", 1.0, 0.0, HeatmapOptions::new(color_map()))
        .unwrap_err();
    assert_eq!(
        err,
        ChartError::InvalidInterval {
            axis: Axis::Y,
            size: 0.0
        }
    );
}

#[test]
fn heatmap_strict_and_lenient_missing_values() {
    let data = rows(json!([{ "x": 0, "y": 0, "v": 1 }, { "x": 1, "y": 1 }]));

    let mut strict = heatmap();
    let err = strict
        .render(
            &data,
            "x",
            "y",
            "v",
            1.0,
            1.0,
            HeatmapOptions::new(color_map()).with_strict(true),
        )
        .unwrap_err();
    assert_eq!(
        err,
        ChartError::MissingField {
            row: 1,
            field: "v".into()
        }
    );

    let mut lenient = heatmap();
    lenient
        .render(&data, "x", "y", "v", 1.0, 1.0, HeatmapOptions::new(color_map()))
        .unwrap();
    let cells = lenient.scene().marks_with_class("chart-cell");
    assert_eq!(cells.len(), 2, "degraded records still get a cell");
    assert_eq!(fill_alpha(cells[1].1), None, "missing value means no fill");
}

#[test]
fn heatmap_custom_color_stroke_and_filter() {
    let mut chart = heatmap();
    let opts = HeatmapOptions::new(color_map())
        .with_filter_data_function(|rows| {
            rows.iter()
                .filter(|r| crate::field_f64(r, "v").is_some_and(|v| v > 0.0))
                .cloned()
                .collect()
        })
        .with_color(|_| Some(peniko::color::palette::css::GREEN))
        .with_stroke_function(|_| Some(peniko::color::palette::css::BLACK));
    chart.render(&grid(4), "x", "y", "v", 1.0, 1.0, opts).unwrap();

    assert_eq!(chart.records().len(), 3, "record v=0 is filtered out");
    for (_, mark) in chart.scene().marks_with_class("chart-cell") {
        let MarkPayload::Rect(r) = &mark.payload else {
            panic!("cells are rects");
        };
        assert_eq!(r.fill, Some(Brush::Solid(peniko::color::palette::css::GREEN)));
        assert_eq!(r.stroke, Some(Brush::Solid(peniko::color::palette::css::BLACK)));
    }
}

#[test]
fn heatmap_guide_lines_are_keyed_by_value() {
    let mut chart = heatmap();
    let opts = |lines: Option<Vec<f64>>| {
        let mut o = HeatmapOptions::new(color_map())
            .with_x_domain(0.0, 4.0)
            .with_y_domain(0.0, 4.0);
        o.x_guide_lines = lines;
        o
    };
    chart
        .render(&grid(3), "x", "y", "v", 1.0, 1.0, opts(Some(vec![1.0, 2.0])))
        .unwrap();
    assert_eq!(chart.scene().marks_with_class("xGuideLine").len(), 2);
    assert_eq!(chart.scene().marks_with_class("guideLine").len(), 2);

    let diffs = chart
        .render(&grid(3), "x", "y", "v", 1.0, 1.0, opts(Some(vec![2.0])))
        .unwrap();
    let guide_diffs: Vec<_> = diffs
        .chart
        .iter()
        .filter(|d| d.layer() == X_GUIDE_LINES)
        .collect();
    assert_eq!(guide_diffs.len(), 1, "line 2 is untouched");
    assert!(guide_diffs[0].is_exit(), "line 1 is removed");

    chart.render(&grid(3), "x", "y", "v", 1.0, 1.0, opts(None)).unwrap();
    assert!(chart.scene().marks_with_class("guideLine").is_empty(), "no option, no lines");
}

#[test]
fn heatmap_axis_labels_and_legend_annotation() {
    let mut chart = heatmap();
    let opts = || {
        HeatmapOptions::new(color_map())
            .with_x_axis_label("Hour")
            .with_y_axis_label("Day")
            .with_legend_annotation("= Eating")
    };
    chart.render(&grid(3), "x", "y", "v", 1.0, 1.0, opts()).unwrap();
    assert_eq!(texts(chart.scene().layer_marks(X_AXIS_LABEL)), vec!["Hour"]);
    assert_eq!(texts(chart.scene().marks_with_class("chart-yAxisLabel")), vec!["Day"]);
    assert_eq!(
        texts(chart.legend_scene().marks_with_class("chart-colorScaleSpecialModifier")),
        vec!["= Eating"]
    );
    assert_eq!(chart.legend_size(), Size::new(2.0 * 36.0 + 130.0, 48.0));

    let diffs = chart.render(&grid(3), "x", "y", "v", 1.0, 1.0, opts()).unwrap();
    let label_diffs: Vec<_> = diffs
        .chart
        .iter()
        .filter(|d| d.layer() == X_AXIS_LABEL)
        .collect();
    assert_eq!(
        label_diffs.iter().filter(|d| d.is_exit()).count(),
        label_diffs.iter().filter(|d| d.is_enter()).count(),
        "labels are recreated, not accumulated"
    );
    assert_eq!(chart.scene().layer_marks(X_AXIS_LABEL).len(), 2, "box and text");
}

#[test]
fn heatmap_click_reports_the_hit_record() {
    let clicked = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&clicked);
    let mut chart = heatmap();
    let data = rows(json!([{ "x": 0, "y": 0, "v": 1 }, { "x": 1, "y": 1, "v": 2 }]));
    let opts = HeatmapOptions::new(color_map())
        .with_x_domain(0.0, 4.0)
        .with_y_domain(0.0, 4.0)
        .with_on_cell_click(move |i, r| {
            sink.lock().unwrap().push((i, crate::field_f64(r, "v")));
        });
    chart.render(&data, "x", "y", "v", 1.0, 1.0, opts).unwrap();

    // Cell 1 spans x 100..200 and y 225..300 in plot space; the plot sits at (40, 20).
    assert_eq!(chart.click(Point::new(150.0, 250.0)), Some(1));
    assert_eq!(chart.click(Point::new(5.0, 5.0)), None, "margins hit nothing");
    assert_eq!(*clicked.lock().unwrap(), vec![(1, Some(2.0))]);
}

#[test]
fn heatmap_measures_the_mount_once() {
    let mut chart = heatmap();
    chart
        .render(&grid(3), "x", "y", "v", 1.0, 1.0, HeatmapOptions::new(color_map()))
        .unwrap();
    assert!(chart.mount().has_class("chart-heatmap"));
    assert_eq!(chart.mount().style("width"), Some("480px"));
    assert_eq!(chart.mount().style("height"), Some("324px"));
    let plot = chart.layout().map(|l| l.plot);

    chart.mount_mut().set_bounding_box(1000.0, 1000.0);
    chart
        .render(&grid(3), "x", "y", "v", 1.0, 1.0, HeatmapOptions::new(color_map()))
        .unwrap();
    assert_eq!(chart.layout().map(|l| l.plot), plot, "later renders keep the first size");
    assert_eq!(chart.mount().style("width"), Some("480px"));
}

#[test]
fn heatmap_too_small_mount_is_an_error() {
    let mut chart = Heatmap::new(MountPoint::new(60.0, 60.0));
    assert!(matches!(
        chart.render(&grid(3), "x", "y", "v", 1.0, 1.0, HeatmapOptions::new(color_map())),
        Err(ChartError::MountTooSmall { .. })
    ));
}

#[test]
fn heatmap_options_from_json() {
    let opts: HeatmapOptions = serde_json::from_value(json!({
        "colorMap": { "0": "blue", "5": "orange", "10": "red" },
        "xTickValues": [0, 1, 2],
    }))
    .unwrap();
    let mut chart = heatmap();
    chart.render(&grid(6), "x", "y", "v", 1.0, 1.0, opts).unwrap();
    assert_eq!(
        chart.legend_scene().marks_with_class("chart-colorScaleBlock").len(),
        3
    );
    let x_ticks = texts(
        chart
            .scene()
            .layer_marks(crate::heatmap::layers::X_AXIS),
    );
    assert_eq!(x_ticks, vec!["0", "1", "2"]);
}

#[test]
fn linechart_three_point_scenario() {
    let mut chart = linechart();
    let data = rows(json!([{ "x": 0, "y": 0 }, { "x": 1, "y": 5 }, { "x": 2, "y": 2 }]));
    chart.render(&data, "x", "y", LinechartOptions::default()).unwrap();

    assert_eq!(chart.scene().marks_with_class("chart-linePath").len(), 1);
    let path = chart.path().expect("line is drawn");
    assert_eq!(path.elements().len(), 3, "a move and two curves");
    assert_eq!(chart.x_scale().map(|s| s.domain()), Some((0.0, 2.0)));
    assert_eq!(chart.y_scale().map(|s| s.domain()), Some((0.0, 5.0)));
    assert!(chart.mount().has_class("chart-linechart"));
    assert_eq!(chart.mount().style("width"), Some("264px"));
}

#[test]
fn linechart_keeps_one_path_across_renders() {
    let mut chart = linechart();
    let data = rows(json!([{ "x": 0, "y": 0 }, { "x": 1, "y": 5 }, { "x": 2, "y": 2 }]));
    chart.render(&data, "x", "y", LinechartOptions::default()).unwrap();
    let marks = chart.scene().len();

    let again = chart.render(&data, "x", "y", LinechartOptions::default()).unwrap();
    assert!(again.is_empty(), "identical data changes nothing");
    assert_eq!(chart.scene().len(), marks);

    let fewer = rows(json!([{ "x": 0, "y": 1 }, { "x": 2, "y": 4 }]));
    let diffs = chart
        .render(
            &fewer,
            "x",
            "y",
            LinechartOptions::default().with_y_domain(0.0, 5.0),
        )
        .unwrap();
    let line: Vec<_> = diffs.iter().filter(|d| d.layer() == LINE).collect();
    assert_eq!(line.len(), 1, "the path is replaced in place");
    assert!(line[0].is_update());
    assert_eq!(chart.scene().marks_with_class("chart-linePath").len(), 1);
    assert!(
        matches!(chart.path().map(|p| p.elements()[1]), Some(PathEl::LineTo(_))),
        "two points make a straight segment"
    );
}

#[test]
fn linechart_draws_in_x_order() {
    let mut chart = linechart();
    let data = rows(json!([{ "x": 2, "y": 2 }, { "x": 0, "y": 0 }, { "x": 1, "y": 5 }]));
    chart.render(&data, "x", "y", LinechartOptions::default()).unwrap();
    let first = chart.path().map(|p| p.elements()[0]);
    assert_eq!(
        first,
        Some(PathEl::MoveTo(Point::new(0.0, 100.0))),
        "the leftmost point starts the line"
    );
}

#[test]
fn linechart_missing_values() {
    let data = rows(json!([{ "x": 0, "y": 0 }, { "x": 1 }, { "x": 2, "y": 2 }]));
    let mut strict = linechart();
    assert_eq!(
        strict.render(&data, "x", "y", LinechartOptions::default().with_strict(true)),
        Err(ChartError::MissingField {
            row: 1,
            field: "y".into()
        })
    );
    assert!(strict.scene().is_empty());

    let mut lenient = linechart();
    lenient.render(&data, "x", "y", LinechartOptions::default()).unwrap();
    assert_eq!(
        lenient.path().map(|p| p.elements().len()),
        Some(2),
        "the incomplete record is skipped"
    );
}

#[test]
fn linechart_domains_ignore_skipped_records() {
    let mut chart = linechart();
    let data = rows(json!([{ "x": 0, "y": 0 }, { "y": 100 }, { "x": 2, "y": 2 }]));
    chart.render(&data, "x", "y", LinechartOptions::default()).unwrap();
    assert_eq!(chart.x_scale().map(|s| s.domain()), Some((0.0, 2.0)));
    assert_eq!(
        chart.y_scale().map(|s| s.domain()),
        Some((0.0, 2.0)),
        "the record without x does not stretch the y axis"
    );
}

#[test]
fn linechart_x_tick_overrides() {
    let mut chart = linechart();
    let data = rows(json!([{ "x": 0, "y": 0 }, { "x": 10, "y": 1 }]));
    let opts = LinechartOptions::default()
        .with_x_tick_values(vec![0.0, 5.0, 10.0])
        .with_x_tick_label_function(|v| format!("{v}h"));
    chart.render(&data, "x", "y", opts).unwrap();
    assert_eq!(
        texts(chart.scene().layer_marks(crate::linechart::layers::X_AXIS)),
        vec!["0h", "5h", "10h"]
    );
}
