use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::config::{Config, ConfigError};
use crate::exemption::{self, ExemptionError, SimulationInput, SimulationResult};
use crate::form::FormError;
use crate::i18n::{keys, Translator};
use crate::report::{Report, ReportError};
use crate::ui_cli;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    #[error("입력 파일 파싱 오류: {0}")]
    InputFile(#[from] toml::de::Error),
    #[error("입력 폼 오류: {0}")]
    Form(#[from] FormError),
    #[error("계산 오류: {0}")]
    Exemption(#[from] ExemptionError),
    #[error("보고서 오류: {0}")]
    Report(#[from] ReportError),
}

/// 입력 하나를 계산하고 보고서 내용을 만든다.
pub fn evaluate(
    input: &SimulationInput,
    tr: &Translator,
) -> Result<(SimulationResult, Report), AppError> {
    let result = exemption::compute(input)?;
    info!(
        site = %input.site_name,
        cna = result.net_present_cost,
        threshold = result.exemption_threshold_value,
        exempt = result.is_exempt,
        "면제 판정"
    );
    let report = Report::new(input, &result, tr);
    Ok((result, report))
}

/// TOML 입력 파일을 읽어 한 번 계산한다. `pdf`가 주어지면 PDF도 저장한다.
pub fn run_batch(
    input_path: &Path,
    pdf: Option<&Path>,
    tr: &Translator,
) -> Result<Report, AppError> {
    let content = fs::read_to_string(input_path)?;
    let input: SimulationInput = toml::from_str(&content)?;
    if input.site_name.trim().is_empty() {
        return Err(FormError::MissingSiteName.into());
    }
    let (_, report) = evaluate(&input, tr)?;
    println!("{}", report.to_text_with_methodology());
    if let Some(path) = pdf {
        report.write_pdf(path)?;
        println!("{}", tr.tf(keys::REPORT_SAVED, &[("path", path.display().to_string())]));
    }
    Ok(report)
}

/// 대화형 CLI 루프를 실행한다.
pub fn run_interactive(config: &Config, tr: &Translator) -> Result<(), AppError> {
    ui_cli::print_banner(tr);
    loop {
        let form = ui_cli::collect_form(tr, &config.defaults)?;
        match form.build_input() {
            Ok(input) => {
                let (result, report) = evaluate(&input, tr)?;
                ui_cli::print_results(tr, &report, result.is_exempt);
                ui_cli::offer_pdf_export(tr, &report, &config.report_path)?;
            }
            Err(FormError::MissingSiteName) => {
                warn!("사이트 이름 없이 계산 요청");
                println!("{}", tr.t(keys::FORM_WARN_SITE_NAME));
            }
            Err(FormError::Unverified(fields)) => {
                warn!(count = fields.len(), "검증되지 않은 입력");
                println!("{}", tr.t(keys::FORM_WARN_UNVERIFIED));
                for f in fields {
                    println!("  - {}", tr.t(f.label_key()));
                }
            }
        }
        if !ui_cli::read_yes_no(&tr.t(keys::PROMPT_AGAIN))? {
            break;
        }
    }
    println!("{}", tr.t(keys::APP_EXIT));
    Ok(())
}
