//! [`reqwest_middleware`] integration: a [`TokenHandler`] is a middleware stage in a
//! `ClientWithMiddleware` chain.

// crates.io
use http::Extensions;
use reqwest::{Client as ReqwestClient, Request, Response};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, Middleware, Next};
// self
use crate::{_prelude::*, handler::TokenHandler};

impl TokenHandler {
	/// Wraps `client` so every request it sends passes through this handler.
	pub fn client(self: Arc<Self>, client: ReqwestClient) -> ClientWithMiddleware {
		ClientBuilder::new(client).with_arc(self).build()
	}
}

#[async_trait::async_trait]
impl Middleware for TokenHandler {
	/// Crate errors surface as [`reqwest_middleware::Error::Middleware`] and can be downcast back
	/// to [`Error`]; errors from later stages are returned as they are.
	async fn handle(
		&self,
		mut req: Request,
		extensions: &mut Extensions,
		next: Next<'_>,
	) -> reqwest_middleware::Result<Response> {
		let headers =
			self.authorize(req.headers()).await.map_err(reqwest_middleware::Error::middleware)?;

		*req.headers_mut() = headers;

		next.run(req, extensions).await
	}
}
