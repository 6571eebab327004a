//! Identity client contract consumed by the handler.
//!
//! The handler never talks to an identity provider itself. Token caching, silent renewal and
//! hidden-refresh flows all live behind [`IdentityClient`]; the handler only picks an account,
//! builds the request, and awaits a single silent acquisition.

pub mod fixed;

pub use fixed::StaticIdentityClient;

// self
use crate::{
	_prelude::*,
	auth::{Account, AuthenticationResult},
	request::TokenRequest,
};

type BoxError = Box<dyn StdError + Send + Sync>;

/// Boxed future returned by [`IdentityClient::acquire_token_silent`].
pub type IdentityFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, IdentityError>> + 'a + Send>>;

/// Identity library capabilities the handler depends on.
pub trait IdentityClient
where
	Self: Send + Sync,
{
	/// Acquires a token without user interaction.
	///
	/// `Ok(None)` means the client completed without producing a token; the handler treats that
	/// as a fatal acquisition failure.
	fn acquire_token_silent(
		&self,
		request: TokenRequest,
	) -> IdentityFuture<'_, Option<AuthenticationResult>>;

	/// Returns every account currently cached by the client.
	fn all_accounts(&self) -> Vec<Account>;
}

/// Failures reported by an [`IdentityClient`]; the handler propagates them untouched.
#[derive(Debug, ThisError)]
pub enum IdentityError {
	/// The cached session cannot be renewed silently.
	#[error("Interaction is required to acquire a token: {reason}.")]
	InteractionRequired {
		/// Provider- or client-supplied reason string.
		reason: String,
	},
	/// The identity provider rejected the silent request.
	#[error("Identity provider rejected the request ({code}): {message}.")]
	Provider {
		/// Provider error code.
		code: String,
		/// Provider-supplied description.
		message: String,
	},
	/// Network failure while reaching the identity provider.
	#[error("Network error occurred while contacting the identity provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl IdentityError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
