//! Renders an instruction sequence into a .docx artifact.
//!
//! Degrade paths, by design silent:
//! - missing/unreadable template → start from an empty default document;
//! - no named list style available → bullets use a manual `•` prefix.

use std::io::Cursor;

use anyhow::anyhow;
use docx_rs::{AlignmentType, BreakType, Docx, Paragraph, Run, Table, TableCell, TableRow};

use crate::errors::AppError;
use crate::schedule::ScheduleRow;

use super::instructions::{DocInstruction, CHECK_MARK};

/// Builds the binary document from an instruction sequence. The optional
/// template is the pre-existing company letterhead document.
pub fn render_docx(
    instructions: &[DocInstruction],
    template_path: Option<&str>,
) -> Result<Vec<u8>, AppError> {
    let mut docx = load_template(template_path);

    for instruction in instructions {
        docx = match instruction {
            DocInstruction::Paragraph {
                text,
                bold,
                centered,
            } => docx.add_paragraph(build_paragraph(text, *bold, *centered)),
            DocInstruction::Bullet(text) => {
                docx.add_paragraph(build_paragraph(&format!("• {text}"), false, false))
            }
            DocInstruction::PageBreak => docx.add_paragraph(
                Paragraph::new().add_run(Run::new().add_break(BreakType::Page)),
            ),
            DocInstruction::ScheduleTable(rows) => docx.add_table(build_schedule_table(rows)),
        };
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| AppError::Internal(anyhow!("failed to pack .docx: {e}")))?;
    Ok(buffer.into_inner())
}

fn load_template(template_path: Option<&str>) -> Docx {
    let Some(path) = template_path else {
        return Docx::new();
    };
    match std::fs::read(path) {
        Ok(bytes) => docx_rs::read_docx(&bytes).unwrap_or_else(|e| {
            tracing::warn!("template '{path}' unreadable ({e}), using empty document");
            Docx::new()
        }),
        Err(e) => {
            tracing::warn!("template '{path}' missing ({e}), using empty document");
            Docx::new()
        }
    }
}

fn build_paragraph(text: &str, bold: bool, centered: bool) -> Paragraph {
    // Embedded newlines become soft line breaks within the paragraph.
    let mut run = Run::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(line);
    }
    if bold {
        run = run.bold();
    }

    let mut paragraph = Paragraph::new().add_run(run);
    if centered {
        paragraph = paragraph.align(AlignmentType::Center);
    }
    paragraph
}

fn text_cell(text: &str, bold: bool) -> TableCell {
    let mut run = Run::new().add_text(text);
    if bold {
        run = run.bold();
    }
    TableCell::new().add_paragraph(Paragraph::new().add_run(run))
}

fn frequency_mark(flag: bool) -> &'static str {
    if flag {
        CHECK_MARK
    } else {
        ""
    }
}

fn build_schedule_table(rows: &[ScheduleRow]) -> Table {
    let mut table_rows = vec![TableRow::new(vec![
        text_cell("Task", true),
        text_cell("Daily", true),
        text_cell("Weekly", true),
        text_cell("Monthly", true),
    ])];

    for row in rows {
        table_rows.push(TableRow::new(vec![
            text_cell(&row.task, false),
            text_cell(frequency_mark(row.daily), false),
            text_cell(frequency_mark(row.weekly), false),
            text_cell(frequency_mark(row.monthly), false),
        ]));
    }

    Table::new(table_rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_instructions() -> Vec<DocInstruction> {
        vec![
            DocInstruction::Paragraph {
                text: "CLEANING SERVICE AGREEMENT".to_string(),
                bold: true,
                centered: true,
            },
            DocInstruction::Bullet("100 Main St".to_string()),
            DocInstruction::PageBreak,
            DocInstruction::ScheduleTable(vec![ScheduleRow::new(
                "Empty trash",
                true,
                false,
                false,
            )]),
        ]
    }

    #[test]
    fn test_render_produces_docx_zip() {
        let bytes = render_docx(&sample_instructions(), None).unwrap();
        // .docx is a zip archive: PK magic.
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_missing_template_falls_back_silently() {
        let bytes =
            render_docx(&sample_instructions(), Some("/nonexistent/template.docx")).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_render_empty_sequence_still_valid() {
        let bytes = render_docx(&[], None).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_frequency_mark() {
        assert_eq!(frequency_mark(true), CHECK_MARK);
        assert_eq!(frequency_mark(false), "");
    }
}
