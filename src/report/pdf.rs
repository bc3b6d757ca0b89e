/// PDF writer for security reports
///
/// Builds the document directly with lopdf: A4 pages, base-14 Courier fonts,
/// a fixed number of lines per page and a footer with page numbers.
use super::layout::{build_report_lines, LineStyle, ReportLine, REPORT_TITLE};
use super::ReportGenerator;
use crate::config::ReportSettings;
use crate::errors::ReportError;
use crate::logger::{self, LogTag};
use crate::utils::{sanitize_file_component, to_printable_ascii};
use chrono::{DateTime, Local};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// A4 in points
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN_X: i64 = 50;
const MARGIN_TOP: i64 = 60;
const MARGIN_BOTTOM: i64 = 60;
const FOOTER_Y: i64 = 30;

const BODY_FONT_SIZE: i64 = 9;
const HEADING_FONT_SIZE: i64 = 10;
const TITLE_FONT_SIZE: i64 = 14;

const FONT_REGULAR: &str = "F1";
const FONT_BOLD: &str = "F2";

/// Longest token label used in a file name
const MAX_NAME_IN_FILE: usize = 32;
/// Longest token label in the document title and page footer
const MAX_LABEL_IN_TITLE: usize = 40;

pub struct PdfReportGenerator {
    settings: ReportSettings,
    /// Fixed timestamp for file names and the report body, mainly for tests
    fixed_time: Option<DateTime<Local>>,
}

impl PdfReportGenerator {
    pub fn new(settings: ReportSettings) -> Self {
        Self {
            settings,
            fixed_time: None,
        }
    }

    pub fn with_fixed_time(mut self, time: DateTime<Local>) -> Self {
        self.fixed_time = Some(time);
        self
    }

    fn now(&self) -> DateTime<Local> {
        self.fixed_time.unwrap_or_else(Local::now)
    }

    /// `<prefix>_<label>_<YYYYMMDD_HHMMSS>.pdf`, label from symbol, name or address
    pub fn file_name(&self, fields: &Map<String, Value>, time: &DateTime<Local>) -> String {
        let label = ["symbol", "name", "address"]
            .iter()
            .filter_map(|key| fields.get(*key).and_then(Value::as_str))
            .find(|value| !value.trim().is_empty())
            .unwrap_or("token");

        format!(
            "{}_{}_{}.pdf",
            sanitize_file_component(&self.settings.file_prefix, MAX_NAME_IN_FILE),
            sanitize_file_component(label, MAX_NAME_IN_FILE),
            time.format("%Y%m%d_%H%M%S")
        )
    }

    /// `SPL Token Security Report - <label>`, label cut to fit the footer line
    pub fn report_title(fields: &Map<String, Value>) -> String {
        let label = ["symbol", "name", "address"]
            .iter()
            .filter_map(|key| fields.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .find(|value| !value.is_empty());

        match label {
            Some(label) if label.chars().count() > MAX_LABEL_IN_TITLE => {
                let head: String = label.chars().take(MAX_LABEL_IN_TITLE - 3).collect();
                format!("{} - {}...", REPORT_TITLE, head)
            }
            Some(label) => format!("{} - {}", REPORT_TITLE, label),
            None => REPORT_TITLE.to_string(),
        }
    }

    /// Append `_2`, `_3`, ... until the name is free
    fn unique_path(dir: &Path, file_name: &str) -> PathBuf {
        let candidate = dir.join(file_name);
        if !candidate.exists() {
            return candidate;
        }

        let stem = file_name.trim_end_matches(".pdf");
        (2..)
            .map(|n| dir.join(format!("{}_{}.pdf", stem, n)))
            .find(|path| !path.exists())
            .unwrap_or(candidate)
    }

    fn prepare_directory(dir: &Path) -> Result<(), ReportError> {
        if dir.exists() {
            if !dir.is_dir() {
                return Err(ReportError::NotADirectory(dir.to_path_buf()));
            }
            return Ok(());
        }

        fs::create_dir_all(dir).map_err(|source| ReportError::CreateDirectory {
            path: dir.to_path_buf(),
            source,
        })?;
        logger::info(
            LogTag::Pdf,
            &format!("Created output directory {}", dir.display()),
        );
        Ok(())
    }

    /// Render lines into a PDF document
    pub fn render(&self, lines: &[ReportLine], title: &str) -> Result<Document, ReportError> {
        let lines_per_page = self.settings.lines_per_page.max(1);
        let usable_height = PAGE_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        let leading = (usable_height / lines_per_page as i64).max(1);

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                FONT_REGULAR => regular_id,
                FONT_BOLD => bold_id,
            },
        });

        let chunks: Vec<&[ReportLine]> = if lines.is_empty() {
            vec![lines]
        } else {
            lines.chunks(lines_per_page).collect()
        };
        let page_count = chunks.len();

        let mut page_ids: Vec<ObjectId> = Vec::with_capacity(page_count);
        for (index, chunk) in chunks.iter().enumerate() {
            let mut operations = Vec::new();
            let mut y = PAGE_HEIGHT - MARGIN_TOP;
            for line in chunk.iter() {
                if line.style != LineStyle::Blank {
                    push_text(&mut operations, line, MARGIN_X, y);
                }
                y -= leading;
            }

            let footer = ReportLine {
                style: LineStyle::Body,
                text: to_printable_ascii(&format!(
                    "{} - Page {}/{}",
                    title,
                    index + 1,
                    page_count
                )),
            };
            push_text(&mut operations, &footer, MARGIN_X, FOOTER_Y);

            let content = Content { operations };
            let encoded = content
                .encode()
                .map_err(|e| ReportError::Encode(e.to_string()))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            page_ids.push(page_id);
        }

        let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(page_count as i64),
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
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(to_printable_ascii(title)),
            "Producer" => Object::string_literal(format!("spl-report {}", env!("CARGO_PKG_VERSION"))),
            "CreationDate" => Object::string_literal(self.now().format("D:%Y%m%d%H%M%S").to_string()),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        Ok(doc)
    }
}

fn push_text(operations: &mut Vec<Operation>, line: &ReportLine, x: i64, y: i64) {
    let (font, size) = match line.style {
        LineStyle::Title => (FONT_BOLD, TITLE_FONT_SIZE),
        LineStyle::Heading => (FONT_BOLD, HEADING_FONT_SIZE),
        LineStyle::Body | LineStyle::Blank => (FONT_REGULAR, BODY_FONT_SIZE),
    };

    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new(
        "Tf",
        vec![Object::Name(font.as_bytes().to_vec()), Object::Integer(size)],
    ));
    operations.push(Operation::new(
        "Td",
        vec![Object::Integer(x), Object::Integer(y)],
    ));
    operations.push(Operation::new(
        "Tj",
        vec![Object::string_literal(line.text.clone())],
    ));
    operations.push(Operation::new("ET", vec![]));
}

impl ReportGenerator for PdfReportGenerator {
    fn create_pdf(
        &self,
        fields: &Map<String, Value>,
        output_dir: &Path,
    ) -> Result<PathBuf, ReportError> {
        Self::prepare_directory(output_dir)?;

        let now = self.now();
        let lines = build_report_lines(
            fields,
            &self.settings,
            &now.format("%Y-%m-%d %H:%M:%S %Z").to_string(),
        );

        let title = Self::report_title(fields);
        let mut doc = self.render(&lines, &title)?;
        let path = Self::unique_path(output_dir, &self.file_name(fields, &now));

        logger::debug(
            LogTag::Pdf,
            &format!("Writing {} line(s) to {}", lines.len(), path.display()),
        );

        doc.save(&path).map_err(|e| ReportError::Write {
            path: path.clone(),
            message: e.to_string(),
        })?;

        logger::info(LogTag::Pdf, &format!("Report written to {}", path.display()));
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_generator(settings: ReportSettings) -> PdfReportGenerator {
        let time = Local.with_ymd_and_hms(2026, 10, 16, 9, 30, 5).unwrap();
        PdfReportGenerator::new(settings).with_fixed_time(time)
    }

    fn sample_fields() -> Map<String, Value> {
        json!({
            "name": "XYZ",
            "symbol": "XYZ/USD",
            "risk": "low",
            "reviewer_name": "SPL-AUTOMATION",
            "confirmation_status": "Confirmed"
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn test_file_name_uses_sanitized_symbol() {
        let generator = fixed_generator(ReportSettings::default());
        let time = generator.now();
        assert_eq!(
            generator.file_name(&sample_fields(), &time),
            "spl_security_report_XYZ_USD_20261016_093005.pdf"
        );

        let empty = Map::new();
        assert_eq!(
            generator.file_name(&empty, &time),
            "spl_security_report_token_20261016_093005.pdf"
        );
    }

    #[test]
    fn test_create_pdf_writes_readable_document() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/reports");
        let generator = fixed_generator(ReportSettings::default());

        let path = generator.create_pdf(&sample_fields(), &out).unwrap();

        assert!(path.starts_with(&out));
        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("(SPL Token Security Report)"));
        assert!(text.contains("(Reviewer: SPL-AUTOMATION)"));
        assert!(text.contains("(Confirmation status: Confirmed)"));
        assert!(text.contains("(risk: low)"));

        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_second_report_gets_unique_name() {
        let dir = tempfile::tempdir().unwrap();
        let generator = fixed_generator(ReportSettings::default());

        let first = generator.create_pdf(&sample_fields(), dir.path()).unwrap();
        let second = generator.create_pdf(&sample_fields(), dir.path()).unwrap();

        assert_ne!(first, second);
        assert!(second
            .to_string_lossy()
            .ends_with("spl_security_report_XYZ_USD_20261016_093005_2.pdf"));
    }

    #[test]
    fn test_long_report_spans_pages() {
        let settings = ReportSettings {
            lines_per_page: 10,
            ..ReportSettings::default()
        };
        let generator = fixed_generator(settings);
        let mut fields = sample_fields();
        for i in 0..30 {
            fields.insert(format!("extra_{}", i), json!(i));
        }
        let dir = tempfile::tempdir().unwrap();

        let path = generator.create_pdf(&fields, dir.path()).unwrap();

        let doc = Document::load(&path).unwrap();
        assert!(doc.get_pages().len() >= 4);
        let text = String::from_utf8_lossy(&fs::read(&path).unwrap()).to_string();
        assert!(text.contains("Page 1/"));
    }

    #[test]
    fn test_long_label_keeps_footer_on_page() {
        let mut fields = Map::new();
        fields.insert("name".to_string(), json!("Very Long Token Name ".repeat(10)));

        let title = PdfReportGenerator::report_title(&fields);

        assert!(title.ends_with("..."));
        assert_eq!(
            title.chars().count(),
            REPORT_TITLE.len() + " - ".len() + MAX_LABEL_IN_TITLE
        );
        // Courier glyphs are 0.6 em wide
        let footer = format!("{} - Page 999/999", title);
        let footer_width = footer.chars().count() as i64 * BODY_FONT_SIZE * 6 / 10;
        assert!(footer_width <= PAGE_WIDTH - 2 * MARGIN_X);

        assert_eq!(
            PdfReportGenerator::report_title(&sample_fields()),
            "SPL Token Security Report - XYZ/USD"
        );
        assert_eq!(PdfReportGenerator::report_title(&Map::new()), REPORT_TITLE);
    }

    #[test]
    fn test_output_path_that_is_a_file_fails() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let generator = fixed_generator(ReportSettings::default());

        let err = generator.create_pdf(&sample_fields(), file.path()).unwrap_err();

        assert!(matches!(err, ReportError::NotADirectory(_)));
    }
}
