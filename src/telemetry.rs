use tracing_subscriber::EnvFilter;

/// 로그 구독자를 초기화한다. `RUST_LOG`가 없으면 `default_filter`를 쓴다.
///
/// 대화형 출력과 섞이지 않도록 stderr로 내보낸다.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    // 테스트 등에서 두 번 불려도 무시한다.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
