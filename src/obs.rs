//! Optional observability helpers for the handler.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit a `silent_bearer.handler` span per authorization (with a `stage`
//!   field) plus debug events describing the effective silent request and default registrations.
//! - Enable `metrics` to increment the `silent_bearer_acquisition_total` counter for every
//!   attempt/success/failure, labeled by `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each silent acquisition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AcquisitionOutcome {
	/// Entry to [`TokenHandler::authorize`](crate::handler::TokenHandler::authorize).
	Attempt,
	/// A usable token was attached.
	Success,
	/// The request was rejected before forwarding.
	Failure,
}
impl AcquisitionOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			AcquisitionOutcome::Attempt => "attempt",
			AcquisitionOutcome::Success => "success",
			AcquisitionOutcome::Failure => "failure",
		}
	}
}
impl Display for AcquisitionOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
