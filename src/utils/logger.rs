use chrono::Local;
use eyre::Result;
use fern::Dispatch;
use log::LevelFilter;

/// Sets up the application logger.
///
/// Logs go to stderr so command output on stdout stays machine readable.
/// The level comes from `RUST_LOG` (a plain level such as `debug`), or from
/// `verbose` when the variable is missing or unparsable.
///
/// # Errors
/// * If a global logger is already installed
pub fn setup_logger(verbose: bool) -> Result<()> {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(default_level);

    Dispatch::new()
        .level(level)
        // RPC plumbing is chatty at debug level
        .level_for("alloy_transport_http", LevelFilter::Warn)
        .level_for("alloy_rpc_client", LevelFilter::Warn)
        .level_for("hyper_util", LevelFilter::Warn)
        .level_for("reqwest", LevelFilter::Warn)
        .chain(std::io::stderr())
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                message
            ));
        })
        .apply()?;
    Ok(())
}
