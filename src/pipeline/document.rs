//! Document summarizer
//!
//! Pure Rust text extraction: PDF via pdf-extract, DOCX via docx-rs, anything
//! else treated as plain text. The result carries the total extracted
//! character count and a bounded preview; the preview length is a constant,
//! not a per-call knob, so the context injected into the model prompt stays
//! bounded.

use super::summary::DocumentSummary;
use std::path::Path;

/// Characters of extracted text kept in the preview.
const PREVIEW_CHARS: usize = 4000;

/// Summarize a stored document. The extension decides the extractor.
pub fn summarize(path: &Path, data: &[u8]) -> Result<DocumentSummary, String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase());

    let text = match ext.as_deref() {
        Some("pdf") => extract_pdf(data)?,
        Some("docx") => extract_docx(data)?,
        // .txt and anything routed here without a dedicated extractor
        _ => String::from_utf8_lossy(data).into_owned(),
    };

    let text = clean_text(&text);
    if text.is_empty() {
        return Err("Document contains no extractable text".to_string());
    }

    let char_count = text.chars().count();
    let preview: String = text.chars().take(PREVIEW_CHARS).collect();

    tracing::debug!(
        "[Document] Extracted {} chars from {} (preview {} chars)",
        char_count,
        path.display(),
        preview.chars().count()
    );

    Ok(DocumentSummary {
        char_count,
        preview,
    })
}

/// Extract text from PDF bytes.
///
/// Wrapped in catch_unwind: pdf-extract (and its font parsing) can panic on
/// malformed glyph tables, and a panic must not cross the summarizer
/// boundary.
fn extract_pdf(data: &[u8]) -> Result<String, String> {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(data)
    })) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(format!("PDF extraction failed: {}", e)),
        Err(_) => Err("PDF extraction panicked - likely contains malformed fonts".to_string()),
    }
}

/// Extract text from DOCX bytes, walking paragraphs and tables.
fn extract_docx(data: &[u8]) -> Result<String, String> {
    let doc = docx_rs::read_docx(data).map_err(|e| format!("Failed to parse DOCX: {}", e))?;

    let mut text = String::new();
    for child in doc.document.children {
        collect_docx_text(&child, &mut text);
    }
    Ok(text)
}

fn collect_docx_text(element: &docx_rs::DocumentChild, output: &mut String) {
    match element {
        docx_rs::DocumentChild::Paragraph(para) => {
            for child in &para.children {
                match child {
                    docx_rs::ParagraphChild::Run(run) => collect_run_text(run, output),
                    docx_rs::ParagraphChild::Hyperlink(link) => {
                        for inner in &link.children {
                            if let docx_rs::ParagraphChild::Run(run) = inner {
                                collect_run_text(run, output);
                            }
                        }
                    }
                    _ => {}
                }
            }
            output.push('\n');
        }
        docx_rs::DocumentChild::Table(table) => {
            for row in &table.rows {
                let docx_rs::TableChild::TableRow(tr) = row;
                for cell in &tr.cells {
                    let docx_rs::TableRowChild::TableCell(tc) = cell;
                    for content in &tc.children {
                        if let docx_rs::TableCellContent::Paragraph(para) = content {
                            for child in &para.children {
                                if let docx_rs::ParagraphChild::Run(run) = child {
                                    collect_run_text(run, output);
                                }
                            }
                            output.push_str(" | ");
                        }
                    }
                }
                output.push('\n');
            }
        }
        _ => {}
    }
}

fn collect_run_text(run: &docx_rs::Run, output: &mut String) {
    for child in &run.children {
        if let docx_rs::RunChild::Text(text) = child {
            output.push_str(&text.text);
        }
    }
}

/// Drop blank lines and surrounding whitespace.
fn clean_text(text: &str) -> String {
    text.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_plain_text_summary() {
        let data = b"Quarterly report.\nRevenue is up.\n";
        let summary = summarize(&PathBuf::from("report.txt"), data).unwrap();

        assert!(summary.preview.contains("Quarterly report."));
        assert_eq!(summary.char_count, summary.preview.chars().count());
    }

    #[test]
    fn test_preview_is_bounded() {
        let data = "word ".repeat(5000);
        let summary = summarize(&PathBuf::from("big.txt"), data.as_bytes()).unwrap();

        assert!(summary.preview.chars().count() <= PREVIEW_CHARS);
        assert!(summary.char_count > PREVIEW_CHARS);
    }

    #[test]
    fn test_empty_pdf_is_an_error() {
        let err = summarize(&PathBuf::from("fake.pdf"), b"").unwrap_err();
        assert!(!err.is_empty());
    }

    #[test]
    fn test_garbage_docx_is_an_error() {
        let err = summarize(&PathBuf::from("fake.docx"), b"not a docx").unwrap_err();
        assert!(!err.is_empty());
    }

    #[test]
    fn test_whitespace_only_text_is_an_error() {
        let err = summarize(&PathBuf::from("blank.txt"), b"  \n\n   \n").unwrap_err();
        assert!(err.contains("no extractable text"));
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  a  \n\n b \n \n"), "a\nb");
    }
}
