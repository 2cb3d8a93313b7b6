use std::io::{self, Write};
use std::path::Path;

use crate::app::AppError;
use crate::form::{FieldId, FieldKind, FormDefaults, FormState};
use crate::i18n::{keys, Translator};
use crate::report::Report;

/// 제목과 안내문을 출력한다.
pub fn print_banner(tr: &Translator) {
    println!("\n=== {} ===", tr.t(keys::APP_TITLE));
    println!("{}", tr.t(keys::APP_INTRO));
}

/// 사이트 이름과 각 필드 값, 필드별 검증 여부를 차례로 입력받는다.
pub fn collect_form(tr: &Translator, defaults: &FormDefaults) -> Result<FormState, AppError> {
    let mut form = FormState::from_defaults(defaults);
    println!("\n-- {} --", tr.t(keys::FORM_HEADING));
    form.site_name = read_line(&tr.t(keys::PROMPT_SITE_NAME))?.trim().to_string();

    for field in FieldId::ALL {
        if let FieldKind::Slider { min, max, .. } = field.kind() {
            let hint = field.hint_key().map(|k| tr.t(k)).unwrap_or_default();
            println!(
                "{}",
                tr.tf(
                    keys::CLI_RANGE,
                    &[
                        ("min", min.to_string()),
                        ("max", max.to_string()),
                        ("hint", hint)
                    ]
                )
            );
        }
        let current = form.value(field);
        let prompt = tr.tf(
            keys::PROMPT_VALUE,
            &[("label", tr.t(field.label_key())), ("default", current.to_string())],
        );
        let entered = read_f64_or(&prompt, current, tr)?;
        let stored = form.set_value(field, entered);
        if stored != entered {
            println!("{}", tr.tf(keys::CLI_CLAMPED, &[("value", stored.to_string())]));
        }
        let verified = read_yes_no(&tr.t(keys::PROMPT_CONFIRM))?;
        form.set_verified(field, verified);
    }
    Ok(form)
}

/// 결과 다섯 항목과 안내 문구를 출력한다.
pub fn print_results(tr: &Translator, report: &Report, is_exempt: bool) {
    println!("\n-- {} --", tr.t(keys::RESULTS_HEADING));
    for line in &report.results {
        println!("{}: {}", line.label, line.value);
    }
    if is_exempt {
        println!("\n{}", tr.t(keys::RESULT_ADVICE));
    }
}

/// PDF 저장 여부를 묻고 저장한다.
pub fn offer_pdf_export(
    tr: &Translator,
    report: &Report,
    default_path: &str,
) -> Result<(), AppError> {
    if !read_yes_no(&tr.t(keys::PROMPT_EXPORT_PDF))? {
        return Ok(());
    }
    let prompt = tr.tf(keys::PROMPT_PDF_PATH, &[("default", default_path.to_string())]);
    let entered = read_line(&prompt)?;
    let path = match entered.trim() {
        "" => default_path,
        p => p,
    };
    report.write_pdf(Path::new(path))?;
    println!("{}", tr.tf(keys::REPORT_SAVED, &[("path", path.to_string())]));
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

/// 숫자를 입력받는다. 빈 입력이면 기본값을 쓴다.
fn read_f64_or(prompt: &str, default: f64, tr: &Translator) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(default);
        }
        // 프랑스식 소수점 쉼표 허용
        match s.replace(',', ".").parse::<f64>() {
            Ok(v) if v.is_finite() => return Ok(v),
            _ => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

/// o/oui/y/yes 를 참으로 본다. 그 외(빈 입력 포함)는 거짓.
pub fn read_yes_no(prompt: &str) -> Result<bool, AppError> {
    let s = read_line(prompt)?;
    Ok(parse_yes_no(&s))
}

fn parse_yes_no(s: &str) -> bool {
    matches!(s.trim().to_lowercase().as_str(), "o" | "oui" | "y" | "yes")
}
