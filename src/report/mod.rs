//! 결과 보고 계층. 계산 결과와 입력값을 표시용 문자열로 정리하고
//! 텍스트/PDF로 내보낸다. 계산 자체는 하지 않는다.

pub mod format;
pub mod pdf;

use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::exemption::{SimulationInput, SimulationResult};
use crate::form::FieldId;
use crate::i18n::{keys, Language, Translator};

pub use format::{format_currency, format_percent_label, group_thousands, pdf_safe};

/// 기본 PDF 파일 이름.
pub const DEFAULT_REPORT_FILE: &str = "simulation_exoneration.pdf";

const METHODOLOGY_FR: &str = include_str!("../../assets/methodology_fr.txt");
const METHODOLOGY_EN: &str = include_str!("../../assets/methodology_en.txt");

/// 보고서 생성/저장 오류.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF 생성 오류: {0}")]
    Pdf(String),
}

/// 계산 방법 설명문. 언어별 고정 문서이며 계산 결과와 무관하다.
pub fn methodology(lang: Language) -> &'static str {
    match lang {
        Language::Fr => METHODOLOGY_FR,
        Language::En => METHODOLOGY_EN,
    }
}

/// 라벨 + 표시 값 한 줄.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub label: String,
    pub value: String,
}

impl ReportLine {
    fn new(label: String, value: String) -> Self {
        Self { label, value }
    }
}

/// 입력 필드 값을 표시용으로 바꾼다. 금액은 통화 형식, 나머지는 그대로.
pub fn format_input_value(field: FieldId, value: f64) -> String {
    match field {
        FieldId::LandValue
        | FieldId::InitialCost
        | FieldId::AnnualMaintenance
        | FieldId::Decommissioning
        | FieldId::TotalSubsidies => format_currency(value),
        FieldId::StudyDuration => format!("{value:.0}"),
        _ => value.to_string(),
    }
}

/// 결과 다섯 항목을 표시용 줄로 만든다. GUI/CLI 결과 화면에서도 쓴다.
pub fn result_lines(
    result: &SimulationResult,
    threshold_percent: f64,
    tr: &Translator,
) -> Vec<ReportLine> {
    vec![
        ReportLine::new(
            tr.t(keys::RESULT_REVENUE),
            format_currency(result.discounted_revenue),
        ),
        ReportLine::new(tr.t(keys::RESULT_COST), format_currency(result.discounted_cost)),
        ReportLine::new(tr.t(keys::RESULT_CNA), format_currency(result.net_present_cost)),
        ReportLine::new(
            tr.tf(
                keys::RESULT_THRESHOLD,
                &[("pct", format_percent_label(threshold_percent))],
            ),
            format_currency(result.exemption_threshold_value),
        ),
        ReportLine::new(tr.t(keys::RESULT_EXEMPT), tr.yes_no(result.is_exempt)),
    ]
}

/// 내보내기용 보고서 내용.
#[derive(Debug, Clone)]
pub struct Report {
    pub title: String,
    pub site_name: String,
    pub site_line: String,
    pub inputs_heading: String,
    pub inputs: Vec<ReportLine>,
    pub results_heading: String,
    pub results: Vec<ReportLine>,
    pub methodology_title: String,
    pub methodology: &'static str,
}

impl Report {
    pub fn new(input: &SimulationInput, result: &SimulationResult, tr: &Translator) -> Self {
        let inputs = FieldId::ALL
            .into_iter()
            .map(|f| {
                ReportLine::new(
                    tr.t(f.report_label_key()),
                    format_input_value(f, f.value_of(input)),
                )
            })
            .collect();
        Self {
            title: tr.t(keys::REPORT_TITLE),
            site_name: input.site_name.clone(),
            site_line: tr.tf(keys::REPORT_SITE, &[("site", input.site_name.clone())]),
            inputs_heading: tr.t(keys::REPORT_INPUTS),
            inputs,
            results_heading: tr.t(keys::REPORT_RESULTS),
            results: result_lines(result, input.exemption_threshold_percent, tr),
            methodology_title: tr.t(keys::REPORT_METHODOLOGY),
            methodology: methodology(tr.language()),
        }
    }

    /// 터미널 출력용 텍스트.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        out.push_str(&self.site_line);
        out.push_str("\n\n");
        push_section(&mut out, &self.inputs_heading, &self.inputs);
        out.push('\n');
        push_section(&mut out, &self.results_heading, &self.results);
        out
    }

    /// 방법론 페이지까지 포함한 전체 텍스트.
    pub fn to_text_with_methodology(&self) -> String {
        format!(
            "{}\n{}\n\n{}",
            self.to_text(),
            self.methodology_title,
            self.methodology.trim_end()
        )
    }

    /// PDF로 저장한다.
    pub fn write_pdf(&self, path: &Path) -> Result<(), ReportError> {
        pdf::write_report(self, path)?;
        info!(path = %path.display(), "PDF 보고서 저장");
        Ok(())
    }
}

fn push_section(out: &mut String, heading: &str, lines: &[ReportLine]) {
    out.push_str(heading);
    out.push('\n');
    for line in lines {
        out.push_str(&format!("- {} : {}\n", line.label, line.value));
    }
}
