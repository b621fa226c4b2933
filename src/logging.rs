use tracing_subscriber::EnvFilter;

/// All workspace crate targets that should receive log output.
const CRATE_TARGETS: &[&str] = &[
    "tankcast",
    "tankcast_calendar",
    "tankcast_decompose",
    "tankcast_evaluate",
    "tankcast_forecast",
    "tankcast_io",
    "tankcast_sarimax",
    "tankcast_stats",
];

/// Targets logged at `info` even without `-v`: per-column metrics and
/// progress.
const ALWAYS_INFO: &[&str] = &["tankcast", "tankcast_forecast"];

/// Initialize tracing based on CLI verbosity level.
///
/// Mapping:
/// - 0 (none) -> warn, info for the binary and the forecast pipeline
/// - 1 (-v)   -> info
/// - 2 (-vv)  -> debug
/// - 3+ (-vvv)-> trace
///
/// Logs go to stderr so JSON on stdout stays clean. `RUST_LOG` overrides
/// the CLI flag if set.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn default_filter(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    CRATE_TARGETS
        .iter()
        .map(|t| {
            let level = if verbosity == 0 && ALWAYS_INFO.contains(t) {
                "info"
            } else {
                level
            };
            format!("{t}={level}")
        })
        .collect::<Vec<_>>()
        .join(",")
}
