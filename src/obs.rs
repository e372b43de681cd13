//! Optional observability helpers for token exchanges.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oauth2_revolut.exchange` with the `grant`
//!   and `stage` (call site) fields, plus debug events when error responses are normalized.
//! - Enable `metrics` to increment the `oauth2_revolut_exchange_total` counter for every
//!   attempt/success/failure, labeled by `grant` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each token exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExchangeOutcome {
	/// Entry to an exchange.
	Attempt,
	/// Token issued.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl ExchangeOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ExchangeOutcome::Attempt => "attempt",
			ExchangeOutcome::Success => "success",
			ExchangeOutcome::Failure => "failure",
		}
	}
}
impl Display for ExchangeOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
