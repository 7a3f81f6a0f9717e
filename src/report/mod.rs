//! PDF summary report mirroring the on-screen results: header band,
//! highlighted total, itemized load table, breakdown and load-curve charts,
//! system parameters and the advisory lists.

mod charts;

use crate::core::advisory::{Advisory, Severity};
use crate::core::load_curve::{sample_curve, CurveView};
use crate::core::load_model::LoadBreakdown;
use crate::input::SizingInput;
use anyhow::Context;
use charts::{
    draw_load_curve, draw_pie_chart, fill_rect, rgb, stroke_line, ChartFrame, PieSlice,
    COLOR_BRAND_BLUE, COLOR_BUILDING, COLOR_HOT_WATER, COLOR_SURCHARGE,
};
use chrono::NaiveDate;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use std::path::Path;
use tracing::warn;

const PAGE_WIDTH: f64 = 210.;
const PAGE_HEIGHT: f64 = 297.;
const MARGIN: f64 = 10.;
const HEADER_HEIGHT: f64 = 40.;

const COLOR_TEXT: (f64, f64, f64) = (0.235, 0.235, 0.231);
const COLOR_MUTED: (f64, f64, f64) = (0.4, 0.4, 0.4);
const COLOR_FOOTER: (f64, f64, f64) = (0.59, 0.59, 0.59);
const COLOR_INFO: (f64, f64, f64) = (0.0, 0.39, 0.0);
const COLOR_WARNING: (f64, f64, f64) = (0.78, 0.59, 0.0);
const COLOR_CRITICAL: (f64, f64, f64) = (0.78, 0.0, 0.0);

const DISCLAIMER: &str = "NOTE: This calculation is a rough sizing estimate based on the user's \
input and remains the intellectual property of its author. It serves as orientation only and \
does not replace a detailed heat load calculation per DIN EN 12831. All figures without \
guarantee. Detailed professional planning is required.";

/// Download filename for the report: `Auslegung_<project>_<YYYY-MM-DD>.pdf`.
pub fn report_file_name(project: &str, date: NaiveDate) -> String {
    let project = project.trim();
    let project = if project.is_empty() { "Unbenannt" } else { project };
    format!(
        "Auslegung_{}_{}.pdf",
        project.replace(' ', "_"),
        date.format("%Y-%m-%d")
    )
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

/// Renders the one-page summary report and returns the PDF bytes. A missing
/// or unreadable font asset falls back to the builtin Helvetica faces.
pub fn render_report(
    input: &SizingInput,
    breakdown: &LoadBreakdown,
    advisories: &[Advisory],
    date: NaiveDate,
    font_path: Option<&Path>,
) -> anyhow::Result<Vec<u8>> {
    let curve = sample_curve(breakdown, input.design_temperature, CurveView::Report)?;

    let (doc, page, layer) = PdfDocument::new(
        "Wärmepumpen-Auslegung",
        Mm(PAGE_WIDTH as f32),
        Mm(PAGE_HEIGHT as f32),
        "report",
    );
    let layer = doc.get_page(page).get_layer(layer);

    let fonts = match font_path.and_then(|path| match std::fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            warn!("Report font {} not usable ({e}), falling back to Helvetica", path.display());
            None
        }
    }) {
        Some(bytes) => {
            // The custom face carries all weights in one file, like the
            // original asset did.
            let face = doc
                .add_external_font(&bytes[..])
                .context("embedding report font")?;
            Fonts {
                regular: face.clone(),
                bold: face.clone(),
                italic: face,
            }
        }
        None => Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
            italic: doc.add_builtin_font(BuiltinFont::HelveticaOblique)?,
        },
    };

    draw_header(&layer, &fonts);
    draw_footer(&layer, &fonts);

    let mut y = PAGE_HEIGHT - HEADER_HEIGHT - 15.;

    // Project and meta line
    layer.set_fill_color(rgb(COLOR_TEXT));
    layer.use_text(
        format!("Projekt: {}", input.project_or_placeholder()),
        14.0,
        Mm(MARGIN as f32),
        Mm(y as f32),
        &fonts.bold,
    );
    y -= 6.;
    let mut meta = format!("Date: {}", date.format("%d.%m.%Y"));
    if !input.editor_name().is_empty() {
        meta.push_str(&format!("  |  Editor: {}", input.editor_name()));
    }
    if let Some(company) = input.company() {
        meta.push_str(&format!("  |  Company: {company}"));
    }
    layer.set_fill_color(rgb(COLOR_MUTED));
    layer.use_text(meta, 10.0, Mm(MARGIN as f32), Mm(y as f32), &fonts.regular);
    y -= 10.;

    // Highlight box with the recommended capacity
    layer.set_fill_color(rgb((0.94, 0.94, 0.94)));
    fill_rect(&layer, MARGIN, y - 20., PAGE_WIDTH - 2. * MARGIN, 25.);
    layer.set_fill_color(rgb(COLOR_TEXT));
    text_centered(
        &layer,
        &fonts.bold,
        "Recommended heating capacity (per sizing parameters):",
        12.0,
        y - 4.,
    );
    layer.set_fill_color(rgb(COLOR_BRAND_BLUE));
    text_centered(
        &layer,
        &fonts.bold,
        &format!("{:.2} kW", breakdown.total_kw),
        24.0,
        y - 16.,
    );
    y -= 30.;

    // Itemized load table
    layer.set_fill_color(rgb(COLOR_TEXT));
    layer.use_text("Itemized load breakdown:", 11.0, Mm(MARGIN as f32), Mm(y as f32), &fonts.bold);
    y -= 7.;
    layer.use_text(
        format!(
            "Building: {} m²  |  {}  |  specific load {} W/m²",
            input.floor_area_m2, input.insulation_standard, input.specific_load_w_per_m2
        ),
        10.0,
        Mm(MARGIN as f32),
        Mm(y as f32),
        &fonts.regular,
    );
    text_right(
        &layer,
        &fonts.bold,
        &format!("{:.2} kW", breakdown.building_base_kw),
        10.0,
        y,
    );
    y -= 6.;
    layer.use_text(
        format!(
            "Blocked-time/night-setback surcharge ({} h/day blocked)",
            input.blocked_hours
        ),
        10.0,
        Mm(MARGIN as f32),
        Mm(y as f32),
        &fonts.regular,
    );
    text_right(
        &layer,
        &fonts.bold,
        &format!("+ {:.2} kW", breakdown.blocked_time_surcharge_kw),
        10.0,
        y,
    );
    y -= 6.;
    layer.use_text("Domestic hot water surcharge", 10.0, Mm(MARGIN as f32), Mm(y as f32), &fonts.regular);
    text_right(
        &layer,
        &fonts.bold,
        &format!("+ {:.2} kW", breakdown.hot_water_kw),
        10.0,
        y,
    );
    y -= 3.;
    layer.set_outline_color(rgb((0.78, 0.78, 0.78)));
    layer.set_outline_thickness(0.3);
    stroke_line(&layer, (MARGIN, y), (PAGE_WIDTH - MARGIN, y));
    y -= 8.;

    // Charts, side by side
    let chart_top = y;
    draw_pie_chart(
        &layer,
        &fonts.regular,
        (50., chart_top - 32.),
        24.,
        &[
            PieSlice {
                label: "Building",
                value: breakdown.building_base_kw,
                color: COLOR_BUILDING,
            },
            PieSlice {
                label: "Hot water",
                value: breakdown.hot_water_kw,
                color: COLOR_HOT_WATER,
            },
            PieSlice {
                label: "Blocked time",
                value: breakdown.blocked_time_surcharge_kw,
                color: COLOR_SURCHARGE,
            },
        ],
    );
    draw_load_curve(
        &layer,
        &fonts.regular,
        &ChartFrame {
            x: 115.,
            y: chart_top - 58.,
            width: 80.,
            height: 52.,
        },
        &curve,
        breakdown.hot_water_kw,
        input.bivalence_temperature,
    );
    y = chart_top - 70.;

    // System parameters
    layer.set_fill_color(rgb(COLOR_TEXT));
    layer.use_text("System parameters:", 11.0, Mm(MARGIN as f32), Mm(y as f32), &fonts.bold);
    y -= 6.;
    for (label, value) in [
        (
            "Design outdoor temperature:",
            format!("{} °C", input.design_temperature),
        ),
        (
            "Max. flow temperature:",
            format!("{} °C", input.flow_temperature),
        ),
        ("Heat distribution:", input.heat_distribution.to_string()),
        (
            "Bivalence / backup:",
            format!(
                "{} from {} °C ({} h runtime, factor {:.2})",
                input.backup_mode.backup_source(),
                input.bivalence_temperature,
                breakdown.runtime_hours,
                breakdown.blocked_time_factor
            ),
        ),
    ] {
        layer.use_text(label, 10.0, Mm(MARGIN as f32), Mm(y as f32), &fonts.regular);
        layer.use_text(value, 10.0, Mm((MARGIN + 55.) as f32), Mm(y as f32), &fonts.regular);
        y -= 5.5;
    }
    y -= 4.;

    // Advisories, grouped by severity in evaluation order
    if !advisories.is_empty() {
        layer.set_fill_color(rgb(COLOR_TEXT));
        layer.use_text("Notes & recommendations:", 11.0, Mm(MARGIN as f32), Mm(y as f32), &fonts.bold);
        y -= 6.;
        for (severity, prefix, color) in [
            (Severity::Info, "INFO", COLOR_INFO),
            (Severity::Warning, "WARNING", COLOR_WARNING),
            (Severity::Critical, "CRITICAL", COLOR_CRITICAL),
        ] {
            for advisory in advisories.iter().filter(|a| a.severity == severity) {
                layer.set_fill_color(rgb(color));
                for line in wrap_text(&format!("{prefix}: {}", advisory.message()), 110) {
                    layer.use_text(line, 9.0, Mm(MARGIN as f32), Mm(y as f32), &fonts.regular);
                    y -= 4.5;
                }
            }
        }
    }

    doc.save_to_bytes().context("serializing report PDF")
}

fn draw_header(layer: &PdfLayerReference, fonts: &Fonts) {
    layer.set_fill_color(rgb(COLOR_BRAND_BLUE));
    fill_rect(layer, 0., PAGE_HEIGHT - HEADER_HEIGHT, PAGE_WIDTH, HEADER_HEIGHT);

    layer.set_fill_color(rgb((1., 1., 1.)));
    layer.use_text(
        "°coolsulting",
        26.0,
        Mm(MARGIN as f32),
        Mm((PAGE_HEIGHT - 20.) as f32),
        &fonts.bold,
    );
    text_right(layer, &fonts.bold, "Wärmepumpen-Auslegung", 20.0, PAGE_HEIGHT - 18.);
    text_right(
        layer,
        &fonts.regular,
        "Modul 1: Heizlast-Berechnung",
        12.0,
        PAGE_HEIGHT - 25.,
    );
    text_right(
        layer,
        &fonts.italic,
        &format!("App Version: {}", env!("CARGO_PKG_VERSION")),
        10.0,
        PAGE_HEIGHT - 30.,
    );
}

fn draw_footer(layer: &PdfLayerReference, fonts: &Fonts) {
    layer.set_fill_color(rgb(COLOR_FOOTER));
    text_centered(layer, &fonts.italic, "Page 1", 8.0, 22.);
    for (i, line) in wrap_text(DISCLAIMER, 120).into_iter().enumerate() {
        text_centered(layer, &fonts.regular, &line, 7.0, 18. - i as f64 * 3.);
    }
}

// Builtin fonts carry no metrics we can query, so centering and right
// alignment estimate the advance width from the glyph count.
fn approx_width_mm(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * 0.5 * 0.352_778
}

fn text_centered(layer: &PdfLayerReference, font: &IndirectFontRef, text: &str, size: f64, y: f64) {
    let x = (PAGE_WIDTH - approx_width_mm(text, size)) / 2.;
    layer.use_text(text, size as f32, Mm(x.max(MARGIN) as f32), Mm(y as f32), font);
}

fn text_right(layer: &PdfLayerReference, font: &IndirectFontRef, text: &str, size: f64, y: f64) {
    let x = PAGE_WIDTH - MARGIN - approx_width_mm(text, size);
    layer.use_text(text, size as f32, Mm(x.max(MARGIN) as f32), Mm(y as f32), font);
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = vec![];
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + word.chars().count() + 1 > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
