//! Best-effort text extraction from uploaded RFP/PWS files.
//!
//! PDF and DOCX get real extraction; everything else is decoded as lossy
//! UTF-8. Unsupported or unreadable content yields an empty string —
//! extraction never fails once the bytes are in hand.

use docx_rs::{DocumentChild, ParagraphChild, RunChild};

/// Extracts plain text from an uploaded file, dispatching on the filename
/// extension the way the upload form does.
pub fn extract_text(filename: &str, data: &[u8]) -> String {
    let lower = filename.to_lowercase();

    if lower.ends_with(".pdf") {
        return pdf_extract::extract_text_from_mem(data).unwrap_or_default();
    }
    if lower.ends_with(".docx") {
        return extract_docx_text(data);
    }

    String::from_utf8_lossy(data).into_owned()
}

/// Walks the document body and joins paragraph text with newlines,
/// mirroring what a flat read of the document gives a human.
fn extract_docx_text(data: &[u8]) -> String {
    let docx = match docx_rs::read_docx(data) {
        Ok(d) => d,
        Err(_) => return String::new(),
    };

    let mut lines: Vec<String> = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            let mut line = String::new();
            for pc in &paragraph.children {
                if let ParagraphChild::Run(run) = pc {
                    for rc in &run.children {
                        if let RunChild::Text(text) = rc {
                            line.push_str(&text.text);
                        }
                    }
                }
            }
            lines.push(line);
        }
    }
    lines.join("\n")
}
