// self
use crate::{_prelude::*, request::TokenRequest};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type Instrumented<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type Instrumented<F> = F;

/// Span wrapper used around handler stages.
#[derive(Clone, Debug)]
pub struct HandlerSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl HandlerSpan {
	/// Creates a new span tagged with the provided stage.
	pub fn new(stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("silent_bearer.handler", stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = stage;

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> Instrumented<Fut>
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

/// Emits a debug event describing the effective silent request. Tokens are never logged.
pub fn log_silent_request(request: &TokenRequest) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(
			scopes = %request.scopes,
			account = request.account.as_ref().map(|account| account.home_account_id.as_ref()),
			redirect_uri = request.redirect_uri.as_deref(),
			force_refresh = request.force_refresh,
			"Acquiring token silently."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = request;
	}
}

/// Emits a debug event when the default registration is stored.
pub fn log_default_registered(replaced: bool) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(replaced, "Registered default token handler configuration.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = replaced;
	}
}
