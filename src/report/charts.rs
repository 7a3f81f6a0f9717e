//! Vector chart drawing for the PDF report. Both charts are drawn directly
//! onto the page layer, so report generation never touches the filesystem.

use crate::core::load_curve::CurvePoint;
use crate::core::units::TRANSITION_SEASON_TEMPERATURE;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    Color, IndirectFontRef, Line, LineDashPattern, Mm, PdfLayerReference, Point, Polygon, Rgb,
};
use std::f64::consts::PI;

const ARC_SEGMENTS_PER_TURN: usize = 96;

pub(crate) const COLOR_BUILDING: (f64, f64, f64) = (1.0, 0.294, 0.294);
pub(crate) const COLOR_HOT_WATER: (f64, f64, f64) = (0.545, 0.0, 0.0);
pub(crate) const COLOR_SURCHARGE: (f64, f64, f64) = (0.235, 0.235, 0.231);
pub(crate) const COLOR_BRAND_BLUE: (f64, f64, f64) = (0.212, 0.663, 0.882);
const COLOR_GRID: (f64, f64, f64) = (0.8, 0.8, 0.8);
const COLOR_BACKUP: (f64, f64, f64) = (0.8, 0.1, 0.1);
const COLOR_TRANSITION: (f64, f64, f64) = (0.0, 0.5, 0.0);

pub(crate) fn rgb((r, g, b): (f64, f64, f64)) -> Color {
    Color::Rgb(Rgb::new(r as f32, g as f32, b as f32, None))
}

pub(crate) struct PieSlice {
    pub label: &'static str,
    pub value: f64,
    pub color: (f64, f64, f64),
}

/// Breakdown pie. Slices below 0.05 kW are dropped, mirroring the on-screen
/// chart, so a zero hot-water addend does not leave an empty sliver.
pub(crate) fn draw_pie_chart(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    center: (f64, f64),
    radius: f64,
    slices: &[PieSlice],
) {
    let shown: Vec<&PieSlice> = slices.iter().filter(|slice| slice.value > 0.05).collect();
    let total: f64 = shown.iter().map(|slice| slice.value).sum();
    if total <= 0. {
        return;
    }

    // Start at twelve o'clock, sweep clockwise.
    let mut angle = PI / 2.;
    for slice in &shown {
        let sweep = slice.value / total * 2. * PI;
        let end = angle - sweep;
        let segments = ((sweep / (2. * PI)) * ARC_SEGMENTS_PER_TURN as f64).ceil() as usize;
        let segments = segments.max(2);

        let mut ring = vec![(point(center.0, center.1), false)];
        for i in 0..=segments {
            let theta = angle - sweep * i as f64 / segments as f64;
            ring.push((
                point(center.0 + radius * theta.cos(), center.1 + radius * theta.sin()),
                false,
            ));
        }
        layer.set_fill_color(rgb(slice.color));
        layer.add_polygon(Polygon {
            rings: vec![ring],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });

        let mid = angle - sweep / 2.;
        let label_r = radius + 4.;
        layer.set_fill_color(rgb(COLOR_SURCHARGE));
        layer.use_text(
            format!("{} ({:.0}%)", slice.label, slice.value / total * 100.),
            7.0,
            Mm((center.0 + label_r * mid.cos() - 6.) as f32),
            Mm((center.1 + label_r * mid.sin()) as f32),
            font,
        );

        angle = end;
    }
}

/// Page-space frame of the load-curve chart, in mm.
pub(crate) struct ChartFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Load curve with the bivalence point, the transition-season marker and the
/// hot-water base load, cold end on the left.
pub(crate) fn draw_load_curve(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    frame: &ChartFrame,
    points: &[CurvePoint],
    hot_water_kw: f64,
    bivalence_temperature: f64,
) {
    let Some(first) = points.first() else {
        return;
    };
    let t_min = first.temperature;
    let t_max = points.last().map(|p| p.temperature).unwrap_or(t_min + 1.);
    let load_max = points
        .iter()
        .map(|p| p.load_kw)
        .fold(f64::MIN, f64::max)
        .max(1e-9)
        * 1.1;

    let to_x = |t: f64| frame.x + (t - t_min) / (t_max - t_min) * frame.width;
    let to_y = |kw: f64| frame.y + (kw / load_max) * frame.height;

    // Axes
    layer.set_outline_color(rgb(COLOR_SURCHARGE));
    layer.set_outline_thickness(0.4);
    stroke(layer, vec![
        (frame.x, frame.y + frame.height),
        (frame.x, frame.y),
        (frame.x + frame.width, frame.y),
    ]);

    // Temperature gridlines every 5°C with tick labels
    layer.set_outline_color(rgb(COLOR_GRID));
    layer.set_outline_thickness(0.2);
    layer.set_fill_color(rgb(COLOR_SURCHARGE));
    let mut tick = (t_min / 5.).ceil() * 5.;
    while tick <= t_max {
        stroke(layer, vec![(to_x(tick), frame.y), (to_x(tick), frame.y + frame.height)]);
        layer.use_text(
            format!("{tick:.0}"),
            6.0,
            Mm((to_x(tick) - 1.5) as f32),
            Mm((frame.y - 3.5) as f32),
            font,
        );
        tick += 5.;
    }
    layer.use_text(
        "Outdoor temperature (°C)",
        7.0,
        Mm((frame.x + frame.width / 2. - 14.) as f32),
        Mm((frame.y - 7.5) as f32),
        font,
    );
    layer.use_text(
        "kW",
        7.0,
        Mm((frame.x - 6.) as f32),
        Mm((frame.y + frame.height + 1.) as f32),
        font,
    );

    // Backup operating region below the bivalence point
    if bivalence_temperature > t_min {
        let backup: Vec<(Point, bool)> = points
            .iter()
            .filter(|p| p.temperature <= bivalence_temperature)
            .map(|p| (point(to_x(p.temperature), to_y(p.load_kw)), false))
            .chain([
                (point(to_x(bivalence_temperature), frame.y), false),
                (point(frame.x, frame.y), false),
            ])
            .collect();
        if backup.len() > 3 {
            layer.set_fill_color(rgb((1.0, 0.85, 0.85)));
            layer.add_polygon(Polygon {
                rings: vec![backup],
                mode: PaintMode::Fill,
                winding_order: WindingOrder::NonZero,
            });
        }
    }

    // Hot-water base load
    if hot_water_kw > 0.05 {
        layer.set_outline_color(rgb(COLOR_HOT_WATER));
        layer.set_outline_thickness(0.3);
        dashed(layer, 1);
        stroke(layer, vec![
            (frame.x, to_y(hot_water_kw)),
            (frame.x + frame.width, to_y(hot_water_kw)),
        ]);
        solid(layer);
        layer.set_fill_color(rgb(COLOR_HOT_WATER));
        layer.use_text(
            format!("Hot water ({hot_water_kw:.2} kW)"),
            6.0,
            Mm((frame.x + frame.width - 28.) as f32),
            Mm((to_y(hot_water_kw) + 1.) as f32),
            font,
        );
    }

    // Bivalence point
    layer.set_outline_color(rgb(COLOR_BACKUP));
    layer.set_outline_thickness(0.4);
    dashed(layer, 2);
    stroke(layer, vec![
        (to_x(bivalence_temperature), frame.y),
        (to_x(bivalence_temperature), frame.y + frame.height),
    ]);
    solid(layer);
    layer.set_fill_color(rgb(COLOR_BACKUP));
    layer.use_text(
        format!("Bivalence ({bivalence_temperature:.0}°C)"),
        6.0,
        Mm((to_x(bivalence_temperature) + 1.) as f32),
        Mm((frame.y + frame.height - 2.) as f32),
        font,
    );

    // Transition season marker
    layer.set_outline_color(rgb(COLOR_TRANSITION));
    layer.set_outline_thickness(0.3);
    dashed(layer, 1);
    stroke(layer, vec![
        (to_x(TRANSITION_SEASON_TEMPERATURE), frame.y),
        (to_x(TRANSITION_SEASON_TEMPERATURE), frame.y + frame.height),
    ]);
    solid(layer);
    layer.set_fill_color(rgb(COLOR_TRANSITION));
    layer.use_text(
        "Transition (+7°C)",
        6.0,
        Mm((to_x(TRANSITION_SEASON_TEMPERATURE) + 1.) as f32),
        Mm((frame.y + frame.height - 5.) as f32),
        font,
    );

    // The curve itself
    layer.set_outline_color(rgb(COLOR_BRAND_BLUE));
    layer.set_outline_thickness(0.8);
    stroke(
        layer,
        points
            .iter()
            .map(|p| (to_x(p.temperature), to_y(p.load_kw)))
            .collect(),
    );
}

pub(crate) fn fill_rect(layer: &PdfLayerReference, x: f64, y: f64, width: f64, height: f64) {
    layer.add_polygon(Polygon {
        rings: vec![vec![
            (point(x, y), false),
            (point(x + width, y), false),
            (point(x + width, y + height), false),
            (point(x, y + height), false),
        ]],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
}

pub(crate) fn stroke_line(layer: &PdfLayerReference, from: (f64, f64), to: (f64, f64)) {
    stroke(layer, vec![from, to]);
}

fn stroke(layer: &PdfLayerReference, points_mm: Vec<(f64, f64)>) {
    layer.add_line(Line {
        points: points_mm
            .into_iter()
            .map(|(x, y)| (point(x, y), false))
            .collect(),
        is_closed: false,
    });
}

fn dashed(layer: &PdfLayerReference, dash: i64) {
    layer.set_line_dash_pattern(LineDashPattern {
        dash_1: Some(dash),
        ..Default::default()
    });
}

fn solid(layer: &PdfLayerReference) {
    layer.set_line_dash_pattern(LineDashPattern::default());
}

fn point(x: f64, y: f64) -> Point {
    Point::new(Mm(x as f32), Mm(y as f32))
}
