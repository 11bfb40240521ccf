//! Verbosity to log level mapping

/// Map the `-v` count to a tracing filter directive
///
/// No flag only shows errors; each `v` lowers the threshold one level.
#[must_use]
pub const fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    }
}
