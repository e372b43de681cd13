// self
use crate::{_prelude::*, provider::GrantType};

/// Future type returned by [`ExchangeSpan::instrument`]; instrumented only when tracing is on.
#[cfg(feature = "tracing")]
pub type InstrumentedExchange<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedExchange<F> = F;

/// Span wrapping a single token exchange.
#[derive(Clone, Debug)]
pub struct ExchangeSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl ExchangeSpan {
	/// Creates a new span tagged with the grant and the calling stage.
	pub fn new(grant: GrantType, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::info_span!("oauth2_revolut.exchange", grant = grant.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (grant, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedExchange<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a debug event describing how an error response was normalized.
pub(crate) fn trace_normalized_error(status: u16, code: i64, message: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(status, code, message, "normalized token endpoint error");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (status, code, message);
	}
}
