// self
use crate::{obs::ExchangeOutcome, provider::GrantType};

/// Records an exchange outcome via the global metrics recorder (when enabled).
pub fn record_exchange_outcome(grant: GrantType, outcome: ExchangeOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth2_revolut_exchange_total",
			"grant" => grant.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (grant, outcome);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_exchange_outcome_noop_without_recorder() {
		record_exchange_outcome(GrantType::AuthorizationCode, ExchangeOutcome::Failure);
		record_exchange_outcome(GrantType::RefreshToken, ExchangeOutcome::Success);
	}
}
