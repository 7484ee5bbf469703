//! Submission client for the trip-tracking REST API.
//!
//! Every failure is normalized into a [`SubmitError`] whose
//! [`user_message`](SubmitError::user_message) is what the form shows.

mod client;
mod error;

pub use client::{HttpSubmitter, Submitter};
pub use error::SubmitError;
