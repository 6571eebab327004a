//! Registers a process-wide default identity client and lets a handler built without one pick it
//! up.
//!
//! 1. Register a [`StaticIdentityClient`] together with a template carrying the redirect URI.
//! 2. Build a [`TokenHandler`] with only its own scopes.
//! 3. Authorize a header map and wrap a reqwest client with the handler.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
// self
use silent_bearer::{
	auth::{Account, HomeAccountId, ScopeSet, TenantId},
	handler::TokenHandler,
	http::{HeaderMap, HeaderValue, header::ACCEPT},
	identity::StaticIdentityClient,
	registry,
	request::TokenRequest,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let account = Account::new(
		HomeAccountId::new("00000000-0000-0000-0000-000000000001.contoso")?,
		TenantId::new("contoso")?,
		"alice@contoso.com",
	)
	.with_name("Alice");
	let identity = StaticIdentityClient::issuing("demo-access-token").with_accounts([account]);

	registry::register_default(
		Arc::new(identity.clone()),
		TokenRequest::new(ScopeSet::new(["User.Read"])?)
			.with_redirect_uri("https://app.contoso.com/auth"),
	);

	let handler = Arc::new(TokenHandler::new(
		TokenRequest::new(ScopeSet::new(["api://orders/.default"])?),
		None,
		None,
	));
	let mut headers = HeaderMap::new();

	headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

	let authorized = handler.authorize(&headers).await?;

	println!("Authorized headers: {authorized:?}.");
	println!("Silent request sent to the identity client: {:?}.", identity.last_request());
	println!("Last acquired token: {:?}.", handler.token());

	let _client = Arc::clone(&handler).client(reqwest::Client::new());

	println!("Requests sent through the wrapped client carry the same header.");

	Ok(())
}
