//! Hello-world entry point: prints the greeting and exits.

use tracing_subscriber::EnvFilter;

fn main() {
    // Log to stderr so stdout carries nothing but the greeting.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    hello_world::run();
}
