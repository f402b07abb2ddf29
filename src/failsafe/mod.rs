//! Failsafe mechanisms for remote NLP services

mod retry;

pub use retry::{RetryPolicy, with_retry};
