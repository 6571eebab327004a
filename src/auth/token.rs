//! Silent acquisition results and the redacted secret wrapper they carry.

// crates.io
use http::header::{HeaderValue, InvalidHeaderValue};
// self
use crate::{
	_prelude::*,
	auth::{Account, ScopeSet},
};

/// Redacted token secret wrapper keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Formats the secret as a sensitive `Bearer <token>` header value.
	pub fn bearer_header(&self) -> Result<HeaderValue, InvalidHeaderValue> {
		let mut value = HeaderValue::try_from(format!("Bearer {}", self.0))?;

		value.set_sensitive(true);

		Ok(value)
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Outcome of a silent token acquisition as reported by the identity client.
///
/// The handler only relies on [`access_token`](Self::access_token); the remaining fields are
/// carried through so callers inspecting [`TokenHandler::token`](crate::handler::TokenHandler::token)
/// see what the identity client returned.
#[derive(Clone, Default)]
pub struct AuthenticationResult {
	/// Access token to present to the resource server.
	pub access_token: Option<TokenSecret>,
	/// Id token issued alongside the access token, if any.
	pub id_token: Option<TokenSecret>,
	/// Scopes the access token was granted for.
	pub scopes: ScopeSet,
	/// Account the token belongs to.
	pub account: Option<Account>,
	/// Expiry instant of the access token.
	pub expires_on: Option<OffsetDateTime>,
	/// Whether the identity client served the token from its cache.
	pub from_cache: bool,
}
impl AuthenticationResult {
	/// Creates a result carrying the provided access token.
	pub fn bearer(access_token: impl Into<String>) -> Self {
		Self { access_token: Some(TokenSecret::new(access_token)), ..Default::default() }
	}

	/// Returns the access token when the identity client supplied one, even an empty one.
	pub fn usable_access_token(&self) -> Option<&TokenSecret> {
		self.access_token.as_ref()
	}

	/// Sets the granted scopes.
	pub fn with_scopes(mut self, scopes: ScopeSet) -> Self {
		self.scopes = scopes;

		self
	}

	/// Sets the owning account.
	pub fn with_account(mut self, account: Account) -> Self {
		self.account = Some(account);

		self
	}

	/// Sets the expiry instant.
	pub fn with_expires_on(mut self, instant: OffsetDateTime) -> Self {
		self.expires_on = Some(instant);

		self
	}

	/// Marks the result as served from the identity client's cache.
	pub fn cached(mut self) -> Self {
		self.from_cache = true;

		self
	}
}
impl Debug for AuthenticationResult {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthenticationResult")
			.field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
			.field("id_token", &self.id_token.as_ref().map(|_| "<redacted>"))
			.field("scopes", &self.scopes)
			.field("account", &self.account.as_ref().map(|account| &account.home_account_id))
			.field("expires_on", &self.expires_on)
			.field("from_cache", &self.from_cache)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn secrets_redact_and_format_bearer_headers() {
		let secret = TokenSecret::new("super-secret");

		assert_eq!(format!("{secret:?}"), "TokenSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");

		let header = secret.bearer_header().expect("Printable tokens should form a header.");

		assert_eq!(header, "Bearer super-secret");
		assert!(header.is_sensitive());
		assert!(TokenSecret::new("line\nbreak").bearer_header().is_err());
	}

	#[test]
	fn only_absent_access_tokens_are_unusable() {
		assert!(AuthenticationResult::bearer("T").usable_access_token().is_some());
		assert_eq!(
			AuthenticationResult::bearer("").usable_access_token().map(TokenSecret::expose),
			Some("")
		);
		assert!(AuthenticationResult::default().usable_access_token().is_none());
	}

	#[test]
	fn debug_output_hides_tokens() {
		let result = AuthenticationResult::bearer("visible?")
			.with_expires_on(macros::datetime!(2025-01-01 00:00 UTC))
			.cached();
		let rendered = format!("{result:?}");

		assert!(!rendered.contains("visible?"));
		assert!(rendered.contains("from_cache: true"));
	}
}
