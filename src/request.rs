//! Silent token request templates and the working copies derived from them.
//!
//! A [`TokenRequest`] is supplied once per handler (and optionally once more as the default
//! registration's template). Every acquisition clones it and fills in the blanks, so the stored
//! configuration is never mutated. `Option` fields track whether a key was supplied at all:
//! `None` means absent, `Some(String::new())` means explicitly set to an empty value.

// self
use crate::{
	_prelude::*,
	auth::{Account, ScopeSet},
	error::ConfigError,
};

/// Options forwarded to the identity client's silent acquisition call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenRequest {
	/// Scopes the access token must carry.
	pub scopes: ScopeSet,
	/// Account to acquire the token for; resolved from the cache when absent.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub account: Option<Account>,
	/// Redirect URI used by the identity client's hidden refresh.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub redirect_uri: Option<String>,
	/// Authority overriding the one configured on the identity client.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub authority: Option<Url>,
	/// Claims challenge to satisfy.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub claims: Option<String>,
	/// Correlation identifier propagated to the identity provider.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub correlation_id: Option<String>,
	/// Skips the identity client's cache lookup.
	#[serde(skip_serializing_if = "std::ops::Not::not")]
	pub force_refresh: bool,
	/// Additional query parameters for the authorization endpoint.
	#[serde(skip_serializing_if = "BTreeMap::is_empty")]
	pub extra_query_parameters: BTreeMap<String, String>,
}
impl TokenRequest {
	/// Creates a template requesting the provided scopes.
	pub fn new(scopes: ScopeSet) -> Self {
		Self { scopes, ..Default::default() }
	}

	/// Parses a template from JSON, reporting the path of the first invalid field.
	pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
		let mut de = serde_json::Deserializer::from_str(json);

		Ok(serde_path_to_error::deserialize(&mut de)?)
	}

	/// Converts an already parsed JSON value into a template.
	pub fn from_json_value(value: serde_json::Value) -> Result<Self, ConfigError> {
		Ok(serde_path_to_error::deserialize(value)?)
	}

	/// Pins the account.
	pub fn with_account(mut self, account: Account) -> Self {
		self.account = Some(account);

		self
	}

	/// Sets the redirect URI. An empty string is kept as an explicit value.
	pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
		self.redirect_uri = Some(redirect_uri.into());

		self
	}

	/// Overrides the authority.
	pub fn with_authority(mut self, authority: Url) -> Self {
		self.authority = Some(authority);

		self
	}

	/// Sets the claims challenge.
	pub fn with_claims(mut self, claims: impl Into<String>) -> Self {
		self.claims = Some(claims.into());

		self
	}

	/// Sets the correlation identifier.
	pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
		self.correlation_id = Some(correlation_id.into());

		self
	}

	/// Forces the identity client to bypass its cache.
	pub fn with_force_refresh(mut self, force_refresh: bool) -> Self {
		self.force_refresh = force_refresh;

		self
	}

	/// Adds an extra query parameter.
	pub fn with_extra_query_parameter(
		mut self,
		key: impl Into<String>,
		value: impl Into<String>,
	) -> Self {
		self.extra_query_parameters.insert(key.into(), value.into());

		self
	}

	/// Copies the fallback redirect URI when this request does not carry one.
	///
	/// Only the presence of the key is checked; an explicit empty value stays untouched.
	pub(crate) fn inherit_redirect_uri(&mut self, fallback: Option<&TokenRequest>) {
		if self.redirect_uri.is_some() {
			return;
		}
		if let Some(redirect_uri) = fallback.and_then(|template| template.redirect_uri.as_ref()) {
			self.redirect_uri = Some(redirect_uri.clone());
		}
	}
}
