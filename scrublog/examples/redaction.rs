//! Masking sensitive fields with the filter chain.

use scrublog::prelude::*;

#[derive(Clone, Redact, serde::Serialize)]
struct SignupRequest {
    email: String,
    #[redact(tag = "secure")]
    password: String,
    phone: String,
}

fn main() {
    let logger = Logger::builder()
        .filter(TagFilter::new())
        .filter(PatternFilter::phone_number())
        .filter(FieldFilter::new("session_token"))
        .emitter(ConsoleEmitter::new().with_colors(false))
        .build()
        .expect("valid configuration");

    let request = SignupRequest {
        email: "alice@example.com".into(),
        password: "hunter2".into(),
        phone: "090-1234-5678".into(),
    };

    // The password is masked by tag, the phone number by pattern and the
    // token by field name; the caller's `request` is left untouched.
    logger
        .with("request", request)
        .with("session_token", String::from("tok-123456"))
        .info("signup received");
}
