//! In-process [`IdentityClient`] for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::{Account, AuthenticationResult},
	identity::{IdentityClient, IdentityError, IdentityFuture},
	request::TokenRequest,
};

type Responder = Arc<
	dyn Fn(&TokenRequest) -> Result<Option<AuthenticationResult>, IdentityError> + Send + Sync,
>;

/// Identity client that answers from a fixed account list and a caller-supplied responder.
///
/// Every silent request it receives is recorded so tests can assert on the effective request the
/// handler produced.
#[derive(Clone)]
pub struct StaticIdentityClient {
	accounts: Arc<RwLock<Vec<Account>>>,
	responder: Responder,
	requests: Arc<Mutex<Vec<TokenRequest>>>,
}
impl StaticIdentityClient {
	/// Creates a client that runs `responder` for every silent request.
	pub fn responding<F>(responder: F) -> Self
	where
		F: 'static
			+ Send
			+ Sync
			+ Fn(&TokenRequest) -> Result<Option<AuthenticationResult>, IdentityError>,
	{
		Self {
			accounts: Default::default(),
			responder: Arc::new(responder),
			requests: Default::default(),
		}
	}

	/// Creates a client that always issues the provided access token.
	pub fn issuing(access_token: impl Into<String>) -> Self {
		let access_token = access_token.into();

		Self::responding(move |request| {
			let mut result = AuthenticationResult::bearer(access_token.clone())
				.with_scopes(request.scopes.clone());

			result.account = request.account.clone();

			Ok(Some(result))
		})
	}

	/// Creates a client whose silent call completes without a token.
	pub fn empty() -> Self {
		Self::responding(|_| Ok(None))
	}

	/// Replaces the cached account list.
	pub fn with_accounts(self, accounts: impl IntoIterator<Item = Account>) -> Self {
		*self.accounts.write() = accounts.into_iter().collect();

		self
	}

	/// Adds an account to the cache.
	pub fn add_account(&self, account: Account) {
		self.accounts.write().push(account);
	}

	/// Returns every silent request received so far, oldest first.
	pub fn requests(&self) -> Vec<TokenRequest> {
		self.requests.lock().clone()
	}

	/// Returns the most recent silent request.
	pub fn last_request(&self) -> Option<TokenRequest> {
		self.requests.lock().last().cloned()
	}

	/// Number of silent requests received so far.
	pub fn call_count(&self) -> usize {
		self.requests.lock().len()
	}
}
impl IdentityClient for StaticIdentityClient {
	fn acquire_token_silent(
		&self,
		request: TokenRequest,
	) -> IdentityFuture<'_, Option<AuthenticationResult>> {
		let outcome = (self.responder)(&request);

		self.requests.lock().push(request);

		Box::pin(async move { outcome })
	}

	fn all_accounts(&self) -> Vec<Account> {
		self.accounts.read().clone()
	}
}
impl Debug for StaticIdentityClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StaticIdentityClient")
			.field("accounts", &self.accounts.read().len())
			.field("requests", &self.requests.lock().len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::auth::{HomeAccountId, ScopeSet, TenantId};

	fn account() -> Account {
		Account::new(
			HomeAccountId::new("uid.utid").expect("Home account fixture should be valid."),
			TenantId::new("utid").expect("Tenant fixture should be valid."),
			"user@contoso.com",
		)
	}

	#[tokio::test]
	async fn issuing_client_echoes_request_details() {
		let client = StaticIdentityClient::issuing("T").with_accounts([account()]);
		let scopes = ScopeSet::new(["User.Read"]).expect("Scope fixture should be valid.");
		let request = TokenRequest::new(scopes.clone()).with_account(account());
		let result = client
			.acquire_token_silent(request.clone())
			.await
			.expect("Static client should not fail.")
			.expect("Issuing client should return a token.");

		assert_eq!(result.access_token.as_ref().map(|token| token.expose()), Some("T"));
		assert_eq!(result.scopes, scopes);
		assert_eq!(result.account, Some(account()));
		assert_eq!(client.requests(), vec![request]);
		assert_eq!(client.all_accounts(), vec![account()]);
	}

	#[tokio::test]
	async fn responder_errors_are_returned_and_requests_recorded() {
		let client = StaticIdentityClient::responding(|_| {
			Err(IdentityError::InteractionRequired { reason: "login_required".into() })
		});
		let err = client
			.acquire_token_silent(TokenRequest::default())
			.await
			.expect_err("Responder error should surface.");

		assert!(matches!(err, IdentityError::InteractionRequired { .. }));
		assert_eq!(client.call_count(), 1);
		assert!(client.all_accounts().is_empty());
	}

	#[test]
	fn accounts_added_later_are_visible_through_clones() {
		let client = StaticIdentityClient::issuing("T");
		let shared = client.clone();

		client.add_account(account());

		assert_eq!(shared.all_accounts(), vec![account()]);
	}
}
