use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "KISAN_AI_LOG";

/// Picks the first filter that parses: `KISAN_AI_LOG`, then `RUST_LOG`, then
/// the component default.
fn filter_directives(component: &str, app_log: Option<&str>, rust_log: Option<&str>) -> String {
    [app_log, rust_log]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty() && EnvFilter::try_new(value).is_ok())
        .map(str::to_string)
        .unwrap_or_else(|| format!("info,kisan_ai=debug,{component}=debug"))
}

pub fn init_tracing(component: &str) {
    let app_log = std::env::var(LOG_ENV).ok();
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directives = filter_directives(component, app_log.as_deref(), rust_log.as_deref());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
