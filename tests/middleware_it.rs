// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
// self
use silent_bearer::{
	auth::{Account, AuthenticationResult, HomeAccountId, ScopeSet, TenantId},
	error::{AcquisitionError, ConfigError, Error},
	handler::TokenHandler,
	identity::StaticIdentityClient,
	registry::HandlerRegistry,
	reqwest_middleware,
	request::TokenRequest,
};

fn template() -> TokenRequest {
	TokenRequest::new(
		ScopeSet::new(["api://orders/.default"])
			.expect("Scope set should be valid for middleware tests."),
	)
}

fn account(home: &str) -> Account {
	Account::new(
		HomeAccountId::new(home).expect("Home account identifier should be valid."),
		TenantId::new("contoso").expect("Tenant identifier should be valid."),
		format!("{home}@contoso.com"),
	)
}

fn handler(client: &StaticIdentityClient) -> Arc<TokenHandler> {
	Arc::new(
		TokenHandler::builder(template())
			.identity_client(Arc::new(client.clone()))
			.registry(HandlerRegistry::new())
			.build(),
	)
}

fn expect_crate_error(err: reqwest_middleware::Error) -> Error {
	match err {
		reqwest_middleware::Error::Middleware(inner) => inner
			.downcast::<Error>()
			.expect("Middleware failures should carry the crate error."),
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn bearer_token_reaches_the_server_with_existing_headers() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/orders")
				.header("authorization", "Bearer access-1")
				.header("accept", "application/json");
			then.status(200).body("[]");
		})
		.await;
	let identity = StaticIdentityClient::issuing("access-1").with_accounts([account("a")]);
	let token_handler = handler(&identity);
	let client = Arc::clone(&token_handler).client(reqwest::Client::new());
	let response = client
		.get(server.url("/orders"))
		.header("accept", "application/json")
		.send()
		.await
		.expect("Authorized request should be forwarded.");

	assert_eq!(response.status().as_u16(), 200);

	mock.assert_async().await;

	let sent = identity.last_request().expect("Silent request should be recorded.");

	assert_eq!(sent.account, Some(account("a")));
	assert_eq!(
		token_handler.token().and_then(|token| token.access_token).map(|t| t.expose().to_owned()),
		Some("access-1".to_owned())
	);
}

#[tokio::test]
async fn caller_authorization_header_is_overwritten() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/orders").header("authorization", "Bearer fresh");
			then.status(201);
		})
		.await;
	let client = handler(&StaticIdentityClient::issuing("fresh")).client(reqwest::Client::new());
	let response = client
		.post(server.url("/orders"))
		.header("authorization", "Bearer stale")
		.body("{}")
		.send()
		.await
		.expect("Authorized request should be forwarded.");

	assert_eq!(response.status().as_u16(), 201);

	mock.assert_async().await;
}

#[tokio::test]
async fn empty_acquisition_never_reaches_the_server() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.path("/orders");
			then.status(200);
		})
		.await;
	let token_handler = handler(&StaticIdentityClient::empty());
	let client = Arc::clone(&token_handler).client(reqwest::Client::new());
	let err = client
		.get(server.url("/orders"))
		.send()
		.await
		.expect_err("Requests without a token must not be forwarded.");

	assert!(matches!(expect_crate_error(err), Error::Acquisition(AcquisitionError::NoToken)));
	assert!(token_handler.token().is_none());

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn result_without_access_token_never_reaches_the_server() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.path("/orders");
			then.status(200);
		})
		.await;
	let identity =
		StaticIdentityClient::responding(|_| Ok(Some(AuthenticationResult::default().cached())));
	let client = handler(&identity).client(reqwest::Client::new());
	let err = client
		.get(server.url("/orders"))
		.send()
		.await
		.expect_err("Requests without an access token must not be forwarded.");

	assert!(matches!(
		expect_crate_error(err),
		Error::Acquisition(AcquisitionError::MissingAccessToken)
	));

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn missing_identity_client_is_reported_as_configuration_error() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.path("/orders");
			then.status(200);
		})
		.await;
	let token_handler =
		Arc::new(TokenHandler::builder(template()).registry(HandlerRegistry::new()).build());
	let client = token_handler.client(reqwest::Client::new());
	let err = client
		.get(server.url("/orders"))
		.send()
		.await
		.expect_err("Unconfigured handler must fail.");
	let err = expect_crate_error(err);

	assert!(err.is_config());
	assert!(matches!(err, Error::Config(ConfigError::MissingIdentityClient)));

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn downstream_failures_pass_through_untouched() {
	let client = handler(&StaticIdentityClient::issuing("access-1")).client(reqwest::Client::new());
	let err = client
		.get("http://127.0.0.1:1/unreachable")
		.send()
		.await
		.expect_err("Unreachable server should fail.");

	match err {
		reqwest_middleware::Error::Reqwest(inner) => assert!(inner.is_connect()),
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn downstream_error_statuses_are_returned_as_responses() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/orders").header("authorization", "Bearer access-1");
			then.status(503).body("maintenance");
		})
		.await;
	let client = handler(&StaticIdentityClient::issuing("access-1")).client(reqwest::Client::new());
	let response =
		client.get(server.url("/orders")).send().await.expect("Error statuses are not errors.");

	assert_eq!(response.status().as_u16(), 503);
	assert_eq!(response.text().await.expect("Body should be readable."), "maintenance");

	mock.assert_async().await;
}
