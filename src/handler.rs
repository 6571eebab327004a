//! Token-injecting request handler.
//!
//! [`TokenHandler`] sits in a chain of request handlers. For every request it clears the last
//! acquired token, acquires a fresh one through an [`IdentityClient`], writes
//! `Authorization: Bearer <token>` into a new header map, and forwards the request to the next
//! handler. The next handler's result is returned untouched, errors included.
//!
//! Configuration precedence:
//!
//! - the identity client bound to the handler wins over the default registration's client;
//! - the template's own `account` wins over account selection, and the selector (when supplied)
//!   wins over the first cached account;
//! - the template's own `redirect_uri` (even an empty one) wins over the default template's.

#[cfg(feature = "reqwest")] mod middleware;

// crates.io
use http::{Request, header::AUTHORIZATION};
// self
use crate::{
	_prelude::*,
	auth::{Account, AccountSelector, AuthenticationResult},
	error::{AcquisitionError, ConfigError},
	identity::IdentityClient,
	obs::{self, AcquisitionOutcome, HandlerSpan},
	registry::{DefaultRegistration, HandlerRegistry},
	request::TokenRequest,
};

/// Request handler that authorizes outgoing requests with silently acquired bearer tokens.
///
/// The default registration is captured once, when the handler is built. Handlers are meant to
/// be shared (`Arc<TokenHandler>`); concurrent invocations only race on the value reported by
/// [`token`](Self::token), never on the header each request receives.
pub struct TokenHandler {
	template: TokenRequest,
	identity_client: Option<Arc<dyn IdentityClient>>,
	account_selector: Option<AccountSelector>,
	defaults: DefaultRegistration,
	token: Mutex<Option<AuthenticationResult>>,
}
impl TokenHandler {
	/// Creates a handler that falls back to the process-wide default registration.
	pub fn new(
		template: TokenRequest,
		identity_client: Option<Arc<dyn IdentityClient>>,
		account_selector: Option<AccountSelector>,
	) -> Self {
		TokenHandlerBuilder { template, identity_client, account_selector, registry: None }.build()
	}

	/// Returns a builder seeded with the provided template.
	pub fn builder(template: TokenRequest) -> TokenHandlerBuilder {
		TokenHandlerBuilder::new(template)
	}

	/// Template supplied at construction.
	pub fn template(&self) -> &TokenRequest {
		&self.template
	}

	/// Default registration captured at construction.
	pub fn defaults(&self) -> &DefaultRegistration {
		&self.defaults
	}

	/// Most recently acquired result, or `None` when the last acquisition did not complete.
	pub fn token(&self) -> Option<AuthenticationResult> {
		self.token.lock().clone()
	}

	/// Acquires a fresh token and returns a copy of `headers` carrying it.
	///
	/// `headers` itself is left untouched; any existing `Authorization` header is replaced in the
	/// returned map.
	pub async fn authorize(&self, headers: &HeaderMap) -> Result<HeaderMap> {
		let span = HandlerSpan::new("authorize");

		obs::record_acquisition_outcome(AcquisitionOutcome::Attempt);

		let result = span
			.instrument(async move {
				*self.token.lock() = None;

				let acquired = self.acquire_token().await?;

				*self.token.lock() = Some(acquired.clone());

				let access_token =
					acquired.usable_access_token().ok_or(AcquisitionError::MissingAccessToken)?;
				let value = access_token.bearer_header().map_err(AcquisitionError::from)?;
				let mut authorized = headers.clone();

				authorized.insert(AUTHORIZATION, value);

				Ok::<_, Error>(authorized)
			})
			.await;

		match &result {
			Ok(_) => obs::record_acquisition_outcome(AcquisitionOutcome::Success),
			Err(_) => obs::record_acquisition_outcome(AcquisitionOutcome::Failure),
		}

		result
	}

	/// Authorizes `request` and forwards it to `next`, returning `next`'s result unchanged.
	///
	/// `next` is never called when no valid token could be acquired.
	pub async fn invoke<B, F, Fut, T, E>(&self, request: Request<B>, next: F) -> Result<T, E>
	where
		F: FnOnce(Request<B>) -> Fut,
		Fut: Future<Output = Result<T, E>>,
		E: From<Error>,
	{
		let (mut parts, body) = request.into_parts();

		parts.headers = self.authorize(&parts.headers).await?;

		next(Request::from_parts(parts, body)).await
	}

	fn resolve_identity_client(&self) -> Result<&Arc<dyn IdentityClient>> {
		self.identity_client
			.as_ref()
			.or(self.defaults.identity_client.as_ref())
			.ok_or_else(|| ConfigError::MissingIdentityClient.into())
	}

	async fn acquire_token(&self) -> Result<AuthenticationResult> {
		let client = self.resolve_identity_client()?;
		let mut request = self.template.clone();

		if request.account.is_none() {
			request.account = self.select_account(client.as_ref());
		}

		request.inherit_redirect_uri(self.defaults.template.as_ref());
		obs::log_silent_request(&request);

		client.acquire_token_silent(request).await?.ok_or_else(|| AcquisitionError::NoToken.into())
	}

	fn select_account(&self, client: &dyn IdentityClient) -> Option<Account> {
		let accounts = client.all_accounts();

		match &self.account_selector {
			Some(selector) => selector(accounts.as_slice()),
			None => accounts.into_iter().next(),
		}
	}
}
impl Debug for TokenHandler {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenHandler")
			.field("template", &self.template)
			.field("identity_client_set", &self.identity_client.is_some())
			.field("account_selector_set", &self.account_selector.is_some())
			.field("defaults", &self.defaults)
			.finish()
	}
}

/// Builder for [`TokenHandler`] values.
pub struct TokenHandlerBuilder {
	template: TokenRequest,
	identity_client: Option<Arc<dyn IdentityClient>>,
	account_selector: Option<AccountSelector>,
	registry: Option<HandlerRegistry>,
}
impl TokenHandlerBuilder {
	/// Creates a builder seeded with the provided template.
	pub fn new(template: TokenRequest) -> Self {
		Self { template, identity_client: None, account_selector: None, registry: None }
	}

	/// Binds an identity client to the handler.
	pub fn identity_client(mut self, identity_client: Arc<dyn IdentityClient>) -> Self {
		self.identity_client = Some(identity_client);

		self
	}

	/// Sets the account selector.
	pub fn account_selector(mut self, selector: AccountSelector) -> Self {
		self.account_selector = Some(selector);

		self
	}

	/// Sets the account selector from a closure.
	pub fn select_account_with<F>(self, selector: F) -> Self
	where
		F: 'static + Send + Sync + Fn(&[Account]) -> Option<Account>,
	{
		self.account_selector(Arc::new(selector))
	}

	/// Reads defaults from `registry` instead of the process-wide registry.
	pub fn registry(mut self, registry: HandlerRegistry) -> Self {
		self.registry = Some(registry);

		self
	}

	/// Snapshots the default registration and builds the handler.
	pub fn build(self) -> TokenHandler {
		let defaults = match &self.registry {
			Some(registry) => registry.default_registration(),
			None => HandlerRegistry::global().default_registration(),
		}
		.unwrap_or_default();

		TokenHandler {
			template: self.template,
			identity_client: self.identity_client,
			account_selector: self.account_selector,
			defaults,
			token: Mutex::new(None),
		}
	}
}
impl Debug for TokenHandlerBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenHandlerBuilder")
			.field("template", &self.template)
			.field("identity_client_set", &self.identity_client.is_some())
			.field("account_selector_set", &self.account_selector.is_some())
			.field("registry", &self.registry)
			.finish()
	}
}
