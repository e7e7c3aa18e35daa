// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders both chart components twice (to exercise the update cycle) and writes
//! `heatmap.html` and `linechart.html`.
//!
//! Set `RUST_LOG=debug` to see per-render diff summaries.

use std::error::Error;

use chartkit_charts::{
    ColorMap, Heatmap, HeatmapDiffs, HeatmapOptions, Linechart, LinechartOptions, Record,
    records_from_json,
};
use chartkit_core::{MarkDiff, MountPoint, Scene};
use chartkit_svg::{SvgScene, mount_html};
use kurbo::Point;
use serde_json::json;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let heatmap = heatmap_demo()?;
    std::fs::write("heatmap.html", page("Heatmap", &heatmap))?;
    log::info!("wrote heatmap.html");

    let linechart = linechart_demo()?;
    std::fs::write("linechart.html", page("Line chart", &linechart))?;
    log::info!("wrote linechart.html");
    Ok(())
}

/// Weekly activity: hour of day against day of week.
fn activity(seed: u32) -> Vec<Record> {
    let mut rows = Vec::new();
    for day in 0..7_u32 {
        for hour in (0..24_u32).step_by(2) {
            let minutes = (day * 7 + hour * 3 + seed * 5) % 23;
            rows.push(json!({ "hour": hour, "day": day, "minutes": minutes }));
        }
    }
    records_from_json(serde_json::Value::Array(rows))
}

fn heatmap_demo() -> Result<String, Box<dyn Error>> {
    let options: HeatmapOptions = serde_json::from_value(json!({
        "colorMap": { "0": "#ffffff", "5": "#ffe0b2", "10": "#ffb74d", "20": "#e65100" },
        "xTickValues": [0, 6, 12, 18],
        "yGuideLines": [2, 5],
        "xAxisLabel": "Hour of day",
        "yAxisLabel": "Day",
    }))?;
    let options = options
        .with_legend_annotation("= Eating")
        .with_x_tick_label_function(|v| format!("{v}h"))
        .with_on_cell_click(|index, record| log::info!("clicked cell {index}: {record:?}"));

    let mut chart = Heatmap::new(MountPoint::new(640.0, 384.0));
    let mut chart_svg = SvgScene::new();
    let mut legend_svg = SvgScene::new();

    let first = chart.render(
        &activity(0),
        "hour",
        "day",
        "minutes",
        2.0,
        1.0,
        options.clone(),
    )?;
    apply(&mut chart_svg, &mut legend_svg, &chart, &first);
    // Fewer rows on the second pass: the extra cells exit.
    let mut rows = activity(1);
    rows.truncate(rows.len() - 12);
    let second = chart.render(&rows, "hour", "day", "minutes", 2.0, 1.0, options)?;
    apply(&mut chart_svg, &mut legend_svg, &chart, &second);
    log::info!(
        "heatmap: {} diffs on first render, {} on second",
        first.len(),
        second.len()
    );

    if let Some(index) = chart.click(Point::new(60.0, 30.0)) {
        log::info!("hit record {index}");
    }

    let Some(layout) = chart.layout() else {
        return Err("heatmap was not laid out".into());
    };
    let outer = layout.outer_size();
    let legend = chart.legend_size();
    let legend_svg = legend_svg.to_svg_string(
        legend.width + 4.0,
        legend.height + 4.0,
        "chart-heatmapColorScaleContainer",
    );
    let children = [
        chart_svg.to_svg_string(outer.width, outer.height, "chart-heatmap"),
        format!("<div class=\"chart-legendPanel\">\n{legend_svg}</div>\n"),
    ];
    Ok(mount_html(chart.mount(), &children))
}

fn apply(
    chart_svg: &mut SvgScene,
    legend_svg: &mut SvgScene,
    chart: &Heatmap,
    diffs: &HeatmapDiffs,
) {
    sync(chart_svg, chart.scene(), &diffs.chart);
    sync(legend_svg, chart.legend_scene(), &diffs.legend);
}

fn sync(svg: &mut SvgScene, scene: &Scene, diffs: &[MarkDiff]) {
    svg.sync_layers(scene.layers());
    svg.apply_diffs(diffs);
}

fn linechart_demo() -> Result<String, Box<dyn Error>> {
    let mut chart = Linechart::new(MountPoint::new(640.0, 320.0));
    let mut svg = SvgScene::new();
    let options = LinechartOptions::default()
        .with_x_tick_values(vec![0.0, 6.0, 12.0, 18.0, 24.0])
        .with_x_tick_label_function(|v| format!("{v}h"));

    let samples = |phase: f64| {
        let rows: Vec<serde_json::Value> = (0..=24_u32)
            .rev()
            .map(|h| {
                let t = f64::from(h);
                json!({ "t": t, "load": 50.0 + 30.0 * ((t + phase) / 4.0).sin() })
            })
            .collect();
        records_from_json(serde_json::Value::Array(rows))
    };

    for phase in [0.0, 2.0] {
        let diffs = chart.render(&samples(phase), "t", "load", options.clone())?;
        sync(&mut svg, chart.scene(), &diffs);
        log::info!("linechart: {} diffs", diffs.len());
    }

    let Some(layout) = chart.layout() else {
        return Err("line chart was not laid out".into());
    };
    let outer = layout.outer_size();
    let children = [svg.to_svg_string(outer.width, outer.height, "chart-linechartSVG")];
    Ok(mount_html(chart.mount(), &children))
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title>\n\
         <style>body {{ font-family: sans-serif; }} svg {{ overflow: visible; }}</style>\n\
         </head>\n<body>\n<h1>{title}</h1>\n{body}</body>\n</html>\n"
    )
}
