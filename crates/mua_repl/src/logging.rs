use std::{io, sync::Once};

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber, writing to stderr.
///
/// Uses `filter` when given, else `MUA_LOG`, else `RUST_LOG`. With none of
/// them set nothing is installed and logging stays off.
pub fn init_tracing(filter: Option<&str>) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let directives = match filter {
            Some(directives) => directives.to_owned(),
            None => match std::env::var("MUA_LOG").or_else(|_| std::env::var("RUST_LOG")) {
                Ok(directives) => directives,
                Err(_) => return,
            },
        };

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::new(directives))
            .init();
    });
}
