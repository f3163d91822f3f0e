use crate::error::ReportError;
use crate::kpi::kpi_lines;
use analytics::MetricsSnapshot;
use charts::{standard_figures, ChartArtifacts};
use image::DynamicImage;
use normalizer::NormalizedDataset;
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference,
};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 20.0;
const MARGIN_TOP: f32 = 20.0;
const MARGIN_BOTTOM: f32 = 15.0;
const LINE_HEIGHT: f32 = 6.5;
const MM_PER_INCH: f32 = 25.4;
/// 450pt, the chart width used on the page.
const IMAGE_WIDTH_MM: f32 = 158.75;

/// Settings for a generated report.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub title: String,
    /// Rendered chart size in pixels.
    pub chart_size: (u32, u32),
    pub histogram_bins: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "TradeTrack - Performance Report".to_string(),
            chart_size: (900, 500),
            histogram_bins: 30,
        }
    }
}

fn pdf_err<E: std::fmt::Display>(e: E) -> ReportError {
    ReportError::Pdf(e.to_string())
}

/// Tracks the write position and starts a new page when content would run
/// into the bottom margin.
struct PageCursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
    pages: usize,
}

impl PageCursor<'_> {
    fn ensure_space(&mut self, height: f32) {
        if self.y - height < MARGIN_BOTTOM {
            self.pages += 1;
            let (page, layer) = self.doc.add_page(
                Mm(PAGE_WIDTH),
                Mm(PAGE_HEIGHT),
                format!("Page {}", self.pages),
            );
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN_TOP;
        }
    }

    fn text(&mut self, text: &str, size: f32, font: &IndirectFontRef) {
        self.ensure_space(LINE_HEIGHT);
        self.layer.use_text(text, size, Mm(MARGIN_LEFT), Mm(self.y), font);
        self.y -= LINE_HEIGHT;
    }

    fn gap(&mut self, height: f32) {
        self.y -= height;
    }
}

/// Lays out the KPI summary followed by each chart image.
#[derive(Debug, Clone)]
pub struct PdfReport {
    title: String,
}

impl PdfReport {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
        }
    }

    /// Builds the PDF in memory.
    ///
    /// Chart images that cannot be read back (for example because the file is
    /// already gone) are skipped with a warning.
    pub fn render(
        &self,
        snapshot: &MetricsSnapshot,
        charts: &ChartArtifacts,
    ) -> Result<Vec<u8>, ReportError> {
        let (doc, page, layer) =
            PdfDocument::new(&self.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Page 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_err)?;

        let mut cursor = PageCursor {
            doc: &doc,
            layer: doc.get_page(page).get_layer(layer),
            y: PAGE_HEIGHT - MARGIN_TOP,
            pages: 1,
        };

        cursor.text(&self.title, 18.0, &bold);
        cursor.gap(4.0);
        cursor.text("Key Metrics", 13.0, &bold);
        for line in kpi_lines(snapshot) {
            cursor.text(&format!("{}: {}", line.label, line.value), 11.0, &regular);
        }

        let mut embedded = 0usize;
        for chart in charts.iter() {
            let decoded = match image::open(chart.path()) {
                Ok(img) => img,
                Err(e) => {
                    tracing::warn!(error = ?e, kind = ?chart.kind, "Chart image unavailable; skipping");
                    continue;
                }
            };
            let buffer = decoded.to_rgb8();
            let (width_px, height_px) = buffer.dimensions();
            let rgb = DynamicImage::ImageRgb8(buffer);
            let dpi = width_px as f32 * MM_PER_INCH / IMAGE_WIDTH_MM;
            let height_mm = height_px as f32 * MM_PER_INCH / dpi;

            cursor.gap(4.0);
            cursor.ensure_space(LINE_HEIGHT + height_mm);
            cursor.text(&chart.title, 12.0, &bold);

            let bottom = cursor.y - height_mm;
            Image::from_dynamic_image(&rgb).add_to_layer(
                cursor.layer.clone(),
                ImageTransform {
                    translate_x: Some(Mm(MARGIN_LEFT)),
                    translate_y: Some(Mm(bottom)),
                    dpi: Some(dpi),
                    ..Default::default()
                },
            );
            cursor.y = bottom;
            embedded += 1;
        }

        let pages = cursor.pages;
        let bytes = doc.save_to_bytes().map_err(pdf_err)?;
        tracing::info!(pages, charts = embedded, bytes = bytes.len(), "Assembled PDF report");
        Ok(bytes)
    }
}

/// Builds the figures, renders them to temporary images, assembles the PDF and
/// removes the images again. The images are removed whether or not assembly
/// succeeds.
pub fn generate_report(
    dataset: &NormalizedDataset,
    snapshot: &MetricsSnapshot,
    options: &ReportOptions,
) -> Result<Vec<u8>, ReportError> {
    let figures = standard_figures(dataset, snapshot, options.histogram_bins);
    let artifacts = ChartArtifacts::render(&figures, options.chart_size);

    let result = PdfReport::new(&options.title).render(snapshot, &artifacts);

    let removed = artifacts.cleanup();
    tracing::debug!(removed, "Cleaned up chart images");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::AnalyticsEngine;
    use core_types::{CellValue, RawRecordSet};

    fn analyzed(columns: &[&str], rows: Vec<Vec<&str>>) -> (NormalizedDataset, MetricsSnapshot) {
        let raw = RawRecordSet::from_rows(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.into_iter()
                .map(|r| r.into_iter().map(CellValue::from).collect())
                .collect(),
        )
        .unwrap();
        let data = normalizer::process(raw).unwrap();
        let snapshot = AnalyticsEngine::new().calculate(&data).unwrap();
        (data, snapshot)
    }

    #[test]
    fn kpi_only_report_is_a_pdf() {
        let bytes = PdfReport::new("Test")
            .render(&MetricsSnapshot::new(), &ChartArtifacts::default())
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn full_report_embeds_charts() {
        let (data, snap) = analyzed(
            &["date", "symbol", "pnl", "rr"],
            vec![
                vec!["2024-01-02", "ES", "10", "2"],
                vec!["2024-01-09", "NQ", "-5", "1.5"],
                vec!["2024-02-01", "ES", "20", "3"],
                vec!["2024-03-04", "CL", "-5", ""],
            ],
        );
        let options = ReportOptions {
            chart_size: (300, 180),
            ..ReportOptions::default()
        };
        let with_charts = generate_report(&data, &snap, &options).unwrap();
        let without = PdfReport::new(&options.title)
            .render(&snap, &ChartArtifacts::default())
            .unwrap();

        assert!(with_charts.starts_with(b"%PDF"));
        assert!(with_charts.len() > without.len());
    }

    #[test]
    fn vanished_chart_files_are_skipped() {
        let (data, snap) = analyzed(&["pnl"], vec![vec!["1"], vec!["-1"]]);
        let artifacts = ChartArtifacts::render(&standard_figures(&data, &snap, 10), (200, 120));
        for a in artifacts.iter() {
            std::fs::remove_file(a.path()).unwrap();
        }
        let bytes = PdfReport::new("Gone").render(&snap, &artifacts).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(artifacts.cleanup(), 0);
    }
}
