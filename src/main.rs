use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pv_canopy_exemption::{app, config, i18n, telemetry};
use tracing::error;

/// 주차장 태양광 차양 구조물의 CNA 기반 면제 여부를 계산한다.
#[derive(Parser, Debug)]
#[command(name = "pv_exemption_cli", version, about)]
struct Args {
    /// 언어 코드 (auto, fr, fr-fr, en, en-us)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,

    /// 설정 파일 경로
    #[arg(long, default_value = config::CONFIG_FILE)]
    config: PathBuf,

    /// TOML 입력 파일. 지정하면 대화형 입력 없이 한 번 계산한다.
    #[arg(long)]
    input: Option<PathBuf>,

    /// PDF 보고서 저장 경로 (--input 과 함께 사용)
    #[arg(long, requires = "input")]
    pdf: Option<PathBuf>,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    telemetry::init_tracing("warn");
    let args = Args::parse();
    match try_run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "실행 실패");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(args: &Args) -> Result<(), app::AppError> {
    let cfg = config::load_or_create(&args.config)?;
    let lang = i18n::resolve_language(&args.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    match &args.input {
        Some(input) => app::run_batch(input, args.pdf.as_deref(), &tr).map(|_| ()),
        None => app::run_interactive(&cfg, &tr),
    }
}
