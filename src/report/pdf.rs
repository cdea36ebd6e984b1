//! PDF rendering
//!
//! A4 pages, built-in Helvetica, simple top-down line layout with automatic
//! page breaks. Long titles and URLs are truncated so rows stay on one line.

use crate::report::{Issue, LanguageReport, ReportError, ReportSet};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocumentReference, PdfLayerReference};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 18.0;

const TITLE_LIMIT: usize = 60;
const URL_LIMIT: usize = 80;
const DETAIL_LIMIT: usize = 90;

/// Line-oriented writer over a growing PDF document
struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// Current baseline, in mm from the page bottom
    y: f32,
}

impl PdfWriter {
    fn new(title: &str) -> Result<Self, ReportError> {
        let (doc, page, layer) =
            printpdf::PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT - MARGIN,
        })
    }

    fn line(&mut self, text: &str, size: f32, bold: bool) {
        let advance = size * 0.55;
        if self.y - advance < MARGIN {
            let (page, layer) =
                self.doc
                    .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }

        let font = if bold { &self.bold } else { &self.regular };
        self.layer
            .use_text(text, size, Mm(MARGIN), Mm(self.y), font);
        self.y -= advance;
    }

    fn heading(&mut self, text: &str) {
        self.line(text, 16.0, true);
        self.gap();
    }

    fn subheading(&mut self, text: &str) {
        self.line(text, 12.0, true);
    }

    fn body(&mut self, text: &str) {
        self.line(text, 10.0, false);
    }

    fn gap(&mut self) {
        self.y -= 3.0;
    }

    fn save(self, path: &Path) -> Result<(), ReportError> {
        let file = File::create(path)?;
        self.doc.save(&mut BufWriter::new(file))?;
        Ok(())
    }
}

/// Renders the report for a single language version
pub(crate) fn render_language(
    set: &ReportSet,
    report: &LanguageReport,
    path: &Path,
) -> Result<(), ReportError> {
    let mut writer = PdfWriter::new(&format!("Link Analysis ({})", report.label))?;

    writer.heading("Link Analysis Report");
    write_run_header(&mut writer, set);
    writer.body(&format!(
        "Language: {} ({})",
        report.label, report.code
    ));
    writer.body(&format!("Links checked: {}", report.links_checked));
    writer.body(&format!("Issues found: {}", report.issues.len()));
    writer.gap();

    write_issues(&mut writer, &report.issues);
    writer.save(path)
}

/// Renders the combined report covering every language in the run
pub(crate) fn render_combined(set: &ReportSet, path: &Path) -> Result<(), ReportError> {
    let mut writer = PdfWriter::new("Link Analysis (combined)")?;

    writer.heading("Link Analysis Report (All Languages)");
    write_run_header(&mut writer, set);
    writer.body(&format!("Languages: {}", set.languages.len()));
    writer.body(&format!("Links checked: {}", set.total_checked()));
    writer.body(&format!("Issues found: {}", set.total_issues()));
    writer.gap();

    for language in &set.languages {
        writer.subheading(&format!(
            "{} ({}): {} issues",
            language.label,
            language.code,
            language.issues.len()
        ));
        write_issues(&mut writer, &language.issues);
        writer.gap();
    }

    writer.save(path)
}

fn write_run_header(writer: &mut PdfWriter, set: &ReportSet) {
    writer.body(&format!("Site: {}", truncate(&set.site_url, URL_LIMIT)));
    writer.body(&format!(
        "Generated: {}",
        set.generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    if !set.site_goal.is_empty() {
        writer.body(&format!("Site goal: {}", truncate(&set.site_goal, DETAIL_LIMIT)));
    }
}

fn write_issues(writer: &mut PdfWriter, issues: &[Issue]) {
    if issues.is_empty() {
        writer.body("No issues found.");
        return;
    }

    for (index, issue) in issues.iter().enumerate() {
        writer.body(&format!(
            "{}. [{}] {}",
            index + 1,
            issue.kind,
            truncate(&issue.title, TITLE_LIMIT)
        ));
        writer.body(&format!("    {}", truncate(&issue.url, URL_LIMIT)));
        if !issue.detail.is_empty() {
            writer.body(&format!("    {}", truncate(&issue.detail, DETAIL_LIMIT)));
        }
    }
}

/// Char-safe truncation with an ellipsis marker
fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let kept: String = text.chars().take(limit.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
