//! Basic logging with context values.

use scrublog::prelude::*;

fn main() {
    let logger = Logger::new();

    logger.info("service started");
    scrublog::info!(logger, "listening on port {}", 8080);

    // `with` returns a new logger; the original keeps its own snapshot.
    let request_logger = logger
        .with("user", String::from("alice"))
        .with("attempt", 3);
    request_logger.warn("login throttled");

    // Below the default info level: discarded before any work happens.
    logger.debug("this line is never emitted");
}
