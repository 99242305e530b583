//! Tracing bootstrap for shells that bring no subscriber of their own.

/// Install the default fmt subscriber. Call once at shell startup;
/// respects `RUST_LOG` filtering.
pub fn init() {
    tracing_subscriber::fmt::init();
}
