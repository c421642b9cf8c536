//! Deferred delivery through the bounded queue.

use scrublog::prelude::*;

fn main() {
    let logger = Logger::builder()
        .emitter(JsonEmitter::new())
        .async_mode(128)
        .build()
        .expect("valid configuration");

    for job in 0..10 {
        scrublog::info!(logger, "processing job {}", job);
    }

    // Blocks until the queue is drained. The logger must not be used
    // afterwards: flushing twice or logging after a flush panics.
    logger.flush();
}
