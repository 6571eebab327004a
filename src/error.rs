//! Handler-level error types shared across token acquisition, configuration, and identity clients.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; retrying will not help.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Silent acquisition completed without a usable token.
	#[error(transparent)]
	Acquisition(#[from] AcquisitionError),
	/// Failure reported by the identity client, surfaced as-is.
	#[error(transparent)]
	Identity(#[from] crate::identity::IdentityError),
}
impl Error {
	/// Returns `true` when the error stems from missing or invalid configuration.
	pub fn is_config(&self) -> bool {
		matches!(self, Self::Config(_))
	}
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Neither the handler nor the default registration supplies an identity client.
	#[error("Identity client is missing from both the default registration and the handler.")]
	MissingIdentityClient,
	/// Token request template could not be deserialized.
	#[error("Token request template is invalid at `{path}`.")]
	InvalidTemplate {
		/// JSON path of the offending field.
		path: String,
		/// Structured parsing failure.
		#[source]
		source: serde_json::Error,
	},
	/// Request scopes cannot be normalized.
	#[error("Requested scopes are invalid.")]
	InvalidScope(#[from] crate::auth::ScopeValidationError),
	/// Account identifier failed validation.
	#[error("Account identifier is invalid.")]
	InvalidIdentifier(#[from] crate::auth::IdentifierError),
}
impl From<serde_path_to_error::Error<serde_json::Error>> for ConfigError {
	fn from(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
		let path = e.path().to_string();

		Self::InvalidTemplate { path, source: e.into_inner() }
	}
}

/// Silent acquisition outcomes that cannot authorize a request.
#[derive(Debug, ThisError)]
pub enum AcquisitionError {
	/// The identity client returned no result.
	#[error("Unable to exchange a valid token with the authorization server.")]
	NoToken,
	/// The result carries no access token at all.
	#[error("Token result is missing an access token.")]
	MissingAccessToken,
	/// The access token contains bytes that are not valid in an HTTP header.
	#[error("Access token cannot be encoded as an HTTP header value.")]
	InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),
}
