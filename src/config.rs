use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::form::FormDefaults;
use crate::report::DEFAULT_REPORT_FILE;

/// 기본 설정 파일 경로.
pub const CONFIG_FILE: &str = "config.toml";

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드 (auto / fr-fr / en-us)
    pub language: String,
    /// 사용자 언어팩 디렉터리
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_pack_dir: Option<String>,
    /// PDF 보고서 저장 경로
    pub report_path: String,
    /// 폼 기본값
    pub defaults: FormDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            language_pack_dir: None,
            report_path: DEFAULT_REPORT_FILE.to_string(),
            defaults: FormDefaults::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_create(Path::new(CONFIG_FILE))
}

/// 지정 경로의 설정을 로드한다. 파일이 없으면 기본 설정을 저장하고 돌려준다.
pub fn load_or_create(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        info!(path = %path.display(), "기본 설정 파일 생성");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Path::new(CONFIG_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("pv_exemption_{}_{name}", std::process::id()))
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let path = temp_path("created.toml");
        let _ = fs::remove_file(&path);
        let cfg = load_or_create(&path).expect("create");
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
        let reloaded = load_or_create(&path).expect("reload");
        assert_eq!(reloaded, cfg);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg: Config = toml::from_str(
            "language = \"en-us\"\n[defaults]\nstudy_duration_years = 25\n",
        )
        .expect("parse");
        assert_eq!(cfg.language, "en-us");
        assert_eq!(cfg.report_path, DEFAULT_REPORT_FILE);
        assert_eq!(cfg.defaults.study_duration_years, 25);
        assert_eq!(cfg.defaults.land_value, 300_000.0);
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let path = temp_path("broken.toml");
        fs::write(&path, "language = [").expect("write");
        let err = load_or_create(&path).expect_err("must fail");
        assert!(matches!(err, ConfigError::Parse(_)));
        let _ = fs::remove_file(&path);
    }
}
