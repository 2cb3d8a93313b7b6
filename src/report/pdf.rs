use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

use super::format::pdf_safe;
use super::{Report, ReportError};

/// A4 [mm]
const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 15.0;
/// 11pt 본문 기준 한 줄 최대 글자 수 (Helvetica 평균 폭 근사)
const WRAP_COLUMNS: usize = 90;
const PT_TO_MM: f32 = 0.3528;

#[derive(Clone, Copy)]
enum Align {
    Left,
    Center,
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

/// 위에서 아래로 줄을 쌓고, 하단 여백에 닿으면 새 페이지를 연다.
struct PageCursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
    pages: usize,
}

impl<'a> PageCursor<'a> {
    fn new(doc: &'a PdfDocumentReference, layer: PdfLayerReference) -> Self {
        Self {
            doc,
            layer,
            y: PAGE_H - MARGIN,
            pages: 1,
        }
    }

    fn new_page(&mut self) {
        self.pages += 1;
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_W), Mm(PAGE_H), format!("Page {}", self.pages));
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_H - MARGIN;
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn line(&mut self, text: &str, size: f32, height: f32, font: &IndirectFontRef, align: Align) {
        if self.y - height < MARGIN {
            self.new_page();
        }
        self.y -= height;
        let text = pdf_safe(text);
        let x = match align {
            Align::Left => MARGIN,
            Align::Center => {
                // 평균 글자 폭 0.5em으로 근사
                let width = text.chars().count() as f32 * size * 0.5 * PT_TO_MM;
                ((PAGE_W - width) / 2.0).max(MARGIN)
            }
        };
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }
}

/// 보고서를 두 페이지 PDF로 저장한다: 1쪽 입력/결과, 2쪽 계산 방법.
pub fn write_report(report: &Report, path: &Path) -> Result<(), ReportError> {
    let title = pdf_safe(&report.title);
    let (doc, page1, layer1) =
        PdfDocument::new(title.as_str(), Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_err)?,
        italic: doc.add_builtin_font(BuiltinFont::HelveticaOblique).map_err(pdf_err)?,
    };

    let layer = doc.get_page(page1).get_layer(layer1);
    let mut cursor = PageCursor::new(&doc, layer);

    cursor.line(&report.title, 16.0, 10.0, &fonts.bold, Align::Center);
    cursor.gap(8.0);
    cursor.line(&report.site_line, 14.0, 10.0, &fonts.italic, Align::Center);
    cursor.gap(10.0);

    cursor.line(&report.inputs_heading, 12.0, 10.0, &fonts.bold, Align::Left);
    for l in &report.inputs {
        let text = format!("- {} : {}", l.label, l.value);
        cursor.line(&text, 11.0, 8.0, &fonts.regular, Align::Left);
    }

    cursor.gap(5.0);
    cursor.line(&report.results_heading, 12.0, 10.0, &fonts.bold, Align::Left);
    for l in &report.results {
        let text = format!("- {} : {}", l.label, l.value);
        cursor.line(&text, 11.0, 8.0, &fonts.regular, Align::Left);
    }

    cursor.new_page();
    cursor.line(&report.methodology_title, 14.0, 10.0, &fonts.bold, Align::Center);
    cursor.gap(8.0);
    for paragraph in report.methodology.lines() {
        if paragraph.trim().is_empty() {
            cursor.gap(4.0);
            continue;
        }
        for wrapped in wrap_text(paragraph, WRAP_COLUMNS) {
            cursor.line(&wrapped, 11.0, 8.0, &fonts.regular, Align::Left);
        }
    }

    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file)).map_err(pdf_err)?;
    Ok(())
}

fn pdf_err<E: std::fmt::Debug>(e: E) -> ReportError {
    ReportError::Pdf(format!("{e:?}"))
}

/// 단어 단위 줄바꿈. 앞쪽 들여쓰기는 이어지는 줄에도 유지한다.
fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let indent: String = text.chars().take_while(|c| *c == ' ').collect();
    let mut lines = Vec::new();
    let mut current = indent.clone();
    for word in text.split_whitespace() {
        let used = current.chars().count();
        if used > indent.len() && used + 1 + word.chars().count() > columns {
            lines.push(std::mem::replace(&mut current, indent.clone()));
        }
        if current.chars().count() > indent.len() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if current.chars().count() > indent.len() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::wrap_text;

    #[test]
    fn wrap_keeps_indent_and_width() {
        let lines = wrap_text("   aaa bbb ccc ddd", 10);
        assert_eq!(lines, vec!["   aaa bbb", "   ccc ddd"]);
    }

    #[test]
    fn short_line_is_untouched() {
        assert_eq!(wrap_text("CNA = x - y", 90), vec!["CNA = x - y"]);
    }
}
