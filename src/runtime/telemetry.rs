/// Initializes the tracing/logging infrastructure.
///
/// This sets up structured logging using the `tracing` crate with:
/// - **Environment-based filtering**: Controlled via `RUST_LOG` environment variable
/// - **Compact formatting**: Spans shown inline, module paths hidden
///
/// Safe to call more than once (e.g. from several tests); only the first call
/// installs the subscriber.
///
/// # Environment Variables
///
/// - `RUST_LOG=info` - Registered scenarios, sign-in/sign-out, suite results
/// - `RUST_LOG=debug` - Resolution details and collaborator calls
/// - `RUST_LOG=crud_test_bot=debug` - Debug only for this crate
///
/// # Example
///
/// ```ignore
/// setup_tracing();
/// tracing::info!("Suite started");
/// ```
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
