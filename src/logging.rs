use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG`가 없으면 `default_filter`로 전역 로거를 설정한다. 로그는 stderr 로 보낸다.
pub fn init_logger(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // 테스트 등에서 두 번 호출되어도 무시한다
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}

/// CLI 기본 필터. 대화형 출력과 섞이지 않도록 평소에는 경고만 보인다.
pub fn cli_filter(verbose: bool) -> &'static str {
    if verbose {
        "psychro_toolbox=debug,info"
    } else {
        "psychro_toolbox=warn"
    }
}

/// GUI 기본 필터.
pub fn gui_filter(verbose: bool) -> &'static str {
    if verbose {
        "psychro_toolbox=debug,info"
    } else {
        "psychro_toolbox=info"
    }
}
