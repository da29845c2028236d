//! Local stand-ins for third-party services, used by integration tests and
//! during development.

pub mod resend;
