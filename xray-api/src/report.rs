//! PDF risk report
//!
//! Renders a single A4 page: title, subtitle, a client/date line and,
//! when a non-zero score is supplied, the transparency score.
//!
//! Text uses the PDF base-14 Helvetica faces with WinAnsiEncoding, so no font
//! files are embedded. Content streams are written uncompressed.

use chrono::{Local, NaiveDate};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use xray_common::{Error, Result};

/// Suggested download name for the rendered report
pub const REPORT_FILENAME: &str = "CapX100_Risk_Report.pdf";

pub const REPORT_TITLE: &str = "Portfolio X-Ray Pro™";
pub const REPORT_SUBTITLE: &str = "Risk Analytics Report";

/// Score printed by the report endpoint unless configured otherwise
pub const FIXED_TRANSPARENCY_SCORE: f64 = 96.0;

/// Placeholder for a missing client name
const MISSING_CLIENT: &str = "—";

// A4 in PostScript points
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN_LEFT: i64 = 72;
const MARGIN_TOP: i64 = 72;

/// Values the report knows how to print
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportData {
    pub client: Option<String>,
    pub advisor: Option<String>,
    pub batch_id: Option<String>,
    /// Report date as given by the caller; today when absent or blank
    pub as_of: Option<String>,
    /// Printed only when present and non-zero
    pub transparency_score: Option<f64>,
}

/// Font resource names registered on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Regular,
    Bold,
}

impl Face {
    fn resource_name(self) -> &'static [u8] {
        match self {
            Face::Regular => b"F1",
            Face::Bold => b"F2",
        }
    }
}

/// One laid-out line of text
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub face: Face,
    pub size: i64,
    /// Vertical space taken above the baseline
    pub leading: i64,
    pub text: String,
}

impl ReportLine {
    fn new(face: Face, size: i64, leading: i64, text: impl Into<String>) -> Self {
        Self {
            face,
            size,
            leading,
            text: text.into(),
        }
    }
}

/// Format a score the way it is printed, e.g. `96` or `96.7`
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.0}", score)
    } else {
        format!("{}", score)
    }
}

/// Lay out the report text for `data`, dating it `today` when `as_of` is unset
pub fn report_lines(data: &ReportData, today: NaiveDate) -> Vec<ReportLine> {
    let client = data.client.as_deref().unwrap_or(MISSING_CLIENT);
    let date = match data.as_of.as_deref().map(str::trim) {
        Some(as_of) if !as_of.is_empty() => as_of.to_string(),
        _ => today.format("%Y-%m-%d").to_string(),
    };

    let mut lines = vec![
        ReportLine::new(Face::Bold, 24, 24, REPORT_TITLE),
        ReportLine::new(Face::Bold, 16, 30, REPORT_SUBTITLE),
        // Spacer before the body
        ReportLine::new(Face::Regular, 11, 32, format!("Client: {} • Date: {}", client, date)),
    ];

    if let Some(score) = data.transparency_score.filter(|s| *s != 0.0) {
        lines.push(ReportLine::new(
            Face::Bold,
            16,
            30,
            format!("Transparency Score™: {}%", format_score(score)),
        ));
    }

    lines
}

/// Render the report as PDF bytes, dated today when `as_of` is unset
pub fn build_pdf(data: &ReportData) -> Result<Vec<u8>> {
    build_pdf_on(data, Local::now().date_naive())
}

/// Render the report as PDF bytes with an explicit fallback date
pub fn build_pdf_on(data: &ReportData, today: NaiveDate) -> Result<Vec<u8>> {
    let lines = report_lines(data, today);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = add_font(&mut doc, "Helvetica");
    let bold_id = add_font(&mut doc, "Helvetica-Bold");
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let content = Content {
        operations: text_operations(&lines),
    };
    let encoded = content
        .encode()
        .map_err(|e| Error::Pdf(format!("Failed to encode page content: {}", e)))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![Object::Reference(page_id)],
        "Count" => Object::Integer(1),
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(PAGE_WIDTH),
            Object::Integer(PAGE_HEIGHT),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(document_info(data));
    doc.trailer.set("Info", info_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf)
        .map_err(|e| Error::Pdf(format!("Failed to write PDF: {}", e)))?;
    Ok(buf)
}

fn add_font(doc: &mut Document, base_font: &str) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => Object::Name(base_font.as_bytes().to_vec()),
        "Encoding" => "WinAnsiEncoding",
    })
}

/// Top-down text placement starting below the top margin
fn text_operations(lines: &[ReportLine]) -> Vec<Operation> {
    let mut operations = Vec::with_capacity(lines.len() * 5);
    let mut y = PAGE_HEIGHT - MARGIN_TOP;

    for line in lines {
        y -= line.leading;
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![
                Object::Name(line.face.resource_name().to_vec()),
                Object::Integer(line.size),
            ],
        ));
        operations.push(Operation::new(
            "Td",
            vec![Object::Integer(MARGIN_LEFT), Object::Integer(y)],
        ));
        operations.push(Operation::new("Tj", vec![pdf_text(&line.text)]));
        operations.push(Operation::new("ET", vec![]));
    }

    operations
}

fn document_info(data: &ReportData) -> lopdf::Dictionary {
    let mut info = dictionary! {
        "Title" => pdf_text("Portfolio X-Ray Pro Risk Report"),
        "Producer" => pdf_text(concat!("xray-api ", env!("CARGO_PKG_VERSION"))),
    };
    if let Some(advisor) = data.advisor.as_deref() {
        info.set("Author", pdf_text(advisor));
    }
    if let Some(batch_id) = data.batch_id.as_deref() {
        info.set("Subject", pdf_text(&format!("Batch {}", batch_id)));
    }
    info
}

fn pdf_text(text: &str) -> Object {
    Object::String(encode_win_ansi(text), StringFormat::Literal)
}

/// Encode text for a WinAnsiEncoding font, replacing unmappable characters with `?`
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}
