//! PNG scaling charts: runtime vs threads and actual vs ideal speedup.

use crate::Result;
use crate::results::ResultTable;

use plotters::coord::Shift;
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;
use std::path::Path;

pub const COMBINED_FILE: &str = "performance_analysis.png";
pub const RUNTIME_FILE: &str = "runtime.png";
pub const SPEEDUP_FILE: &str = "speedup.png";

const DPI: f64 = 300.0;
const COMBINED_SIZE_IN: (f64, f64) = (15.0, 6.0);
const SINGLE_SIZE_IN: (f64, f64) = (10.0, 6.0);

const RUNTIME_COLOR: RGBColor = RGBColor(0x2E, 0x86, 0xAB);
const SPEEDUP_COLOR: RGBColor = RGBColor(0xA2, 0x3B, 0x72);
const IDEAL_COLOR: RGBColor = RGBColor(0xC7, 0x3E, 0x1D);

const FONT: &str = "sans-serif";

/// Sizes in typographic points; converted to pixels at `DPI`.
#[derive(Debug, Clone, Copy)]
struct PanelStyle {
    title_pt: f64,
    axis_pt: f64,
    tick_pt: f64,
    legend_pt: f64,
    annotation_pt: f64,
    line_pt: f64,
    ideal_line_pt: f64,
    marker_pt: f64,
    label_offset_pt: f64,
}

const COMBINED_STYLE: PanelStyle = PanelStyle {
    title_pt: 14.0,
    axis_pt: 12.0,
    tick_pt: 10.0,
    legend_pt: 10.0,
    annotation_pt: 10.0,
    line_pt: 2.0,
    ideal_line_pt: 1.5,
    marker_pt: 8.0,
    label_offset_pt: 10.0,
};

const SINGLE_STYLE: PanelStyle = PanelStyle {
    title_pt: 16.0,
    axis_pt: 14.0,
    tick_pt: 10.0,
    legend_pt: 12.0,
    annotation_pt: 10.0,
    line_pt: 3.0,
    ideal_line_pt: 2.0,
    marker_pt: 10.0,
    label_offset_pt: 15.0,
};

fn px_f(pt: f64) -> f64 {
    pt * DPI / 72.0
}

fn px(pt: f64) -> u32 {
    px_f(pt).round() as u32
}

fn canvas((w, h): (f64, f64)) -> (u32, u32) {
    ((w * DPI).round() as u32, (h * DPI).round() as u32)
}

/// Distinct thread counts, ascending. These are the only x ticks drawn.
pub fn thread_ticks(table: &ResultTable) -> Vec<f64> {
    let mut threads: Vec<u32> = table.iter().map(|r| r.threads).collect();
    threads.sort_unstable();
    threads.dedup();
    threads.into_iter().map(f64::from).collect()
}

/// Tick span plus a 5% margin on each side.
pub fn x_range(ticks: &[f64]) -> Range<f64> {
    match (ticks.first(), ticks.last()) {
        (Some(&lo), Some(&hi)) if hi > lo => {
            let pad = (hi - lo) * 0.05;
            (lo - pad)..(hi + pad)
        }
        (Some(&only), _) => (only - 1.0)..(only + 1.0),
        _ => 0.0..1.0,
    }
}

/// Zero up to the largest value, with headroom for the point labels.
pub fn y_range(max: f64) -> Range<f64> {
    if max.is_finite() && max > 0.0 {
        0.0..max * 1.15
    } else {
        0.0..1.0
    }
}

pub fn runtime_label(runtime_s: f64) -> String {
    format!("{:.2}s", runtime_s)
}

pub fn speedup_label(speedup: f64) -> String {
    format!("{:.1}x", speedup)
}

/// X axis over the thread counts whose only key points are the measured counts.
#[derive(Clone)]
pub struct ThreadAxis {
    coord: RangedCoordf64,
    ticks: Vec<f64>,
}

impl ThreadAxis {
    pub fn new(ticks: &[f64]) -> Self {
        Self {
            coord: x_range(ticks).into(),
            ticks: ticks.to_vec(),
        }
    }
}

impl Ranged for ThreadAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.coord.map(value, limit)
    }

    // Every tick is bold; no light grid lines in between.
    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        if hint.weight().allow_light_points() {
            Vec::new()
        } else {
            self.ticks.clone()
        }
    }

    fn range(&self) -> Range<f64> {
        self.coord.range()
    }
}

struct Titles {
    runtime: String,
    speedup: String,
}

impl Titles {
    fn combined(workload: &str) -> Self {
        Self {
            runtime: format!("Runtime vs Number of Threads ({})", workload),
            speedup: format!("Speedup vs Number of Threads ({})", workload),
        }
    }

    fn standalone(workload: &str) -> Self {
        Self {
            runtime: format!("Runtime Performance: {}", workload),
            speedup: format!("Speedup Analysis: {}", workload),
        }
    }
}

/// Runtime and speedup panels side by side.
pub fn render_combined(table: &ResultTable, workload: &str, path: &Path) -> Result<()> {
    let titles = Titles::combined(workload);
    let root = BitMapBackend::new(path, canvas(COMBINED_SIZE_IN)).into_drawing_area();
    root.fill(&WHITE)?;

    let (width, _) = root.dim_in_pixel();
    let (left, right) = root.split_horizontally(width / 2);
    draw_runtime_panel(&left, table, &titles.runtime, &COMBINED_STYLE)?;
    draw_speedup_panel(&right, table, &titles.speedup, &COMBINED_STYLE)?;

    root.present()?;
    Ok(())
}

pub fn render_runtime(table: &ResultTable, workload: &str, path: &Path) -> Result<()> {
    let titles = Titles::standalone(workload);
    let root = BitMapBackend::new(path, canvas(SINGLE_SIZE_IN)).into_drawing_area();
    root.fill(&WHITE)?;
    draw_runtime_panel(&root, table, &titles.runtime, &SINGLE_STYLE)?;
    root.present()?;
    Ok(())
}

pub fn render_speedup(table: &ResultTable, workload: &str, path: &Path) -> Result<()> {
    let titles = Titles::standalone(workload);
    let root = BitMapBackend::new(path, canvas(SINGLE_SIZE_IN)).into_drawing_area();
    root.fill(&WHITE)?;
    draw_speedup_panel(&root, table, &titles.speedup, &SINGLE_STYLE)?;
    root.present()?;
    Ok(())
}

fn draw_runtime_panel<DB>(
    area: &DrawingArea<DB, Shift>,
    table: &ResultTable,
    title: &str,
    style: &PanelStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let ticks = thread_ticks(table);
    let points: Vec<(f64, f64)> = table
        .iter()
        .map(|r| (f64::from(r.threads), r.runtime_s))
        .collect();
    let y_max = points.iter().map(|p| p.1).fold(0.0_f64, f64::max);

    let mut chart = ChartBuilder::on(area)
        .caption(
            title,
            (FONT, px_f(style.title_pt), FontStyle::Bold).into_font(),
        )
        .margin(px(8.0))
        .x_label_area_size(px(style.axis_pt * 3.0))
        .y_label_area_size(px(style.axis_pt * 4.5))
        .build_cartesian_2d(ThreadAxis::new(&ticks), y_range(y_max))?;

    chart
        .configure_mesh()
        .x_labels(ticks.len().max(1))
        .x_label_formatter(&|x| format!("{}", x.round() as i64))
        .x_desc("Number of Threads")
        .y_desc("Runtime (seconds)")
        .label_style((FONT, px_f(style.tick_pt)).into_font())
        .axis_desc_style((FONT, px_f(style.axis_pt)).into_font())
        .bold_line_style(BLACK.mix(0.3))
        .light_line_style(WHITE.mix(0.0))
        .draw()?;

    let line_width = px(style.line_pt);
    chart.draw_series(LineSeries::new(
        points.clone(),
        RUNTIME_COLOR.stroke_width(line_width),
    ))?;
    chart.draw_series(PointSeries::of_element(
        points.clone(),
        px(style.marker_pt / 2.0),
        RUNTIME_COLOR.filled(),
        &|coord, size, st| EmptyElement::at(coord) + Circle::new((0, 0), size, st),
    ))?;

    let label_style = (FONT, px_f(style.annotation_pt))
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    let offset = px(style.label_offset_pt) as i32;
    chart.draw_series(points.iter().map(|&(x, y)| {
        EmptyElement::at((x, y)) + Text::new(runtime_label(y), (0, -offset), label_style.clone())
    }))?;

    Ok(())
}

fn draw_speedup_panel<DB>(
    area: &DrawingArea<DB, Shift>,
    table: &ResultTable,
    title: &str,
    style: &PanelStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let ticks = thread_ticks(table);
    let actual: Vec<(f64, f64)> = table
        .iter()
        .map(|r| (f64::from(r.threads), r.speedup))
        .collect();
    // Ideal scaling: speedup equals the thread count.
    let ideal: Vec<(f64, f64)> = table
        .iter()
        .map(|r| (f64::from(r.threads), f64::from(r.threads)))
        .collect();
    let y_max = actual
        .iter()
        .chain(ideal.iter())
        .map(|p| p.1)
        .fold(0.0_f64, f64::max);

    let mut chart = ChartBuilder::on(area)
        .caption(
            title,
            (FONT, px_f(style.title_pt), FontStyle::Bold).into_font(),
        )
        .margin(px(8.0))
        .x_label_area_size(px(style.axis_pt * 3.0))
        .y_label_area_size(px(style.axis_pt * 4.0))
        .build_cartesian_2d(ThreadAxis::new(&ticks), y_range(y_max))?;

    chart
        .configure_mesh()
        .x_labels(ticks.len().max(1))
        .x_label_formatter(&|x| format!("{}", x.round() as i64))
        .x_desc("Number of Threads")
        .y_desc("Speedup")
        .label_style((FONT, px_f(style.tick_pt)).into_font())
        .axis_desc_style((FONT, px_f(style.axis_pt)).into_font())
        .bold_line_style(BLACK.mix(0.3))
        .light_line_style(WHITE.mix(0.0))
        .draw()?;

    let line_width = px(style.line_pt);
    chart
        .draw_series(LineSeries::new(
            actual.clone(),
            SPEEDUP_COLOR.stroke_width(line_width),
        ))?
        .label("Actual Speedup")
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], SPEEDUP_COLOR.stroke_width(line_width))
        });
    chart.draw_series(PointSeries::of_element(
        actual.clone(),
        px(style.marker_pt / 2.0),
        SPEEDUP_COLOR.filled(),
        &|coord, size, st| EmptyElement::at(coord) + Circle::new((0, 0), size, st),
    ))?;

    let ideal_style = IDEAL_COLOR.mix(0.7).stroke_width(px(style.ideal_line_pt));
    chart
        .draw_series(DashedLineSeries::new(
            ideal,
            px(style.ideal_line_pt * 4.0),
            px(style.ideal_line_pt * 2.0),
            ideal_style,
        ))?
        .label("Ideal Speedup")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], ideal_style));

    let label_style = (FONT, px_f(style.annotation_pt))
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    let offset = px(style.label_offset_pt) as i32;
    chart.draw_series(actual.iter().map(|&(x, y)| {
        EmptyElement::at((x, y)) + Text::new(speedup_label(y), (0, -offset), label_style.clone())
    }))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font((FONT, px_f(style.legend_pt)).into_font())
        .draw()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::ResultRow;
    use pretty_assertions::assert_eq;

    #[test]
    fn ticks_are_the_distinct_thread_counts() {
        let table = ResultTable::new(vec![
            ResultRow::new(4, 2.9, 3.45),
            ResultRow::new(1, 10.0, 1.0),
            ResultRow::new(2, 5.2, 1.92),
            ResultRow::new(2, 5.3, 1.88),
        ]);
        assert_eq!(thread_ticks(&table), vec![1.0, 2.0, 4.0]);
    }

    #[test]
    fn axis_key_points_are_exactly_the_ticks() {
        let ticks = vec![1.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0];
        let axis = ThreadAxis::new(&ticks);
        assert_eq!(axis.key_points(ticks.len()), ticks);
        assert_eq!(axis.key_points(3usize), ticks);
        assert_eq!(axis.range(), 0.25..16.75);
        assert!(axis.map(&1.0, (0, 1000)) < axis.map(&2.0, (0, 1000)));
    }

    #[test]
    fn x_range_pads_both_ends() {
        assert_eq!(x_range(&[1.0, 2.0, 4.0, 16.0]), 0.25..16.75);
        assert_eq!(x_range(&[8.0]), 7.0..9.0);
        assert_eq!(x_range(&[]), 0.0..1.0);
    }

    #[test]
    fn y_range_leaves_headroom_for_labels() {
        let r = y_range(10.0);
        assert_eq!(r.start, 0.0);
        assert!((r.end - 11.5).abs() < 1e-9);
        assert_eq!(y_range(f64::NAN), 0.0..1.0);
        assert_eq!(y_range(0.0), 0.0..1.0);
    }

    #[test]
    fn point_labels() {
        assert_eq!(runtime_label(2.9), "2.90s");
        assert_eq!(runtime_label(10.0), "10.00s");
        assert_eq!(speedup_label(3.45), "3.5x");
        assert_eq!(speedup_label(1.92), "1.9x");
    }

    #[test]
    fn canvas_is_sized_at_print_resolution() {
        assert_eq!(canvas(COMBINED_SIZE_IN), (4500, 1800));
        assert_eq!(canvas(SINGLE_SIZE_IN), (3000, 1800));
        assert_eq!(px(8.0), 33);
    }
}
