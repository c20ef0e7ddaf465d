use super::*;

/// Sends JSON formatted events to `path`. The terminal belongs to the UI, so
/// without a log file nothing is recorded.
pub(crate) fn init(path: &Path) -> Result {
  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)
    .with_context(|| format!("could not open log file {}", path.display()))?;

  let filter = EnvFilter::try_from_env("COMMENTOR_LOG")
    .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE));

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::fmt::layer()
        .json()
        .with_writer(Mutex::new(file))
        .with_target(false)
        .with_current_span(false)
        .with_span_list(false),
    )
    .with(filter)
    .try_init()
    .context("could not install log subscriber")?;

  Ok(())
}
