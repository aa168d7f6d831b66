//! gitstamp: bake git provenance into a build and report it at runtime

mod app;

fn main() -> eyre::Result<()> {
    // Initialize logging; stdout is reserved for `show` output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let phase: app::Phase = std::env::args()
        .nth(1)
        .as_deref()
        .unwrap_or("show")
        .parse()?;

    let config = app::resolve_config(|key| std::env::var(key).ok());
    tracing::info!(?phase, root = %config.repo_root.display(), "Starting gitstamp");

    app::run(phase, &config)
}
