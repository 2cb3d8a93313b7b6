//! 핵심 계산 로직을 라이브러리로 분리하여 CLI 뿐 아니라 GUI에서도 같은 계산을 쓴다.

pub mod app;
pub mod config;
pub mod exemption;
pub mod form;
pub mod i18n;
pub mod report;
pub mod telemetry;
pub mod ui_cli;
