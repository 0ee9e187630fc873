//! Submission flow: owns the page state and drives one analysis at a time.

pub mod controller;

pub use controller::{SubmissionController, SubmitError};
