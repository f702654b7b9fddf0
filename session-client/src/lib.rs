//! Client-side session utilities
//!
//! The local mirror of the authentication subsystem:
//! - Token payload inspection and expiry detection (a pure parse, never
//!   a verification; the server re-verifies every protected request)
//! - Best-effort attempt throttling for repeated submissions
//! - Classification of opaque failure payloads into the shared error
//!   taxonomy with user-facing messages
//!
//! Everything here shapes UX only. None of it is a security boundary.

pub mod classifier;
pub mod throttle;
pub mod token;

pub use classifier::classify;
pub use classifier::user_friendly_message;
pub use classifier::ClassifiedError;
pub use classifier::ErrorKind;
pub use classifier::FailurePayload;
pub use throttle::AttemptThrottle;
pub use throttle::ThrottlePolicy;
pub use throttle::ThrottleStatus;
pub use token::SessionUser;
pub use token::TokenDecodeError;
pub use token::TokenPayload;
