//! Default registration shared by handlers built without their own identity client.
//!
//! Applications can build a [`HandlerRegistry`] at startup and hand it to
//! [`TokenHandlerBuilder::registry`](crate::handler::TokenHandlerBuilder::registry). Call sites
//! that do not thread a registry through fall back to the process-wide one behind
//! [`register_default`] and [`default_registration`].
//!
//! Handlers snapshot the registration when they are built. Re-registering replaces the stored
//! value (last write wins) for handlers built afterwards only.

// std
use std::sync::OnceLock;
// self
use crate::{_prelude::*, identity::IdentityClient, obs, request::TokenRequest};

/// Fallback identity client and token request template.
#[derive(Clone, Default)]
pub struct DefaultRegistration {
	/// Identity client used by handlers that were built without one.
	pub identity_client: Option<Arc<dyn IdentityClient>>,
	/// Template whose redirect URI fills in requests that omit one.
	pub template: Option<TokenRequest>,
}
impl DefaultRegistration {
	/// Creates an empty registration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the fallback identity client.
	pub fn with_identity_client(mut self, identity_client: Arc<dyn IdentityClient>) -> Self {
		self.identity_client = Some(identity_client);

		self
	}

	/// Sets the fallback template.
	pub fn with_template(mut self, template: TokenRequest) -> Self {
		self.template = Some(template);

		self
	}
}
impl Debug for DefaultRegistration {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("DefaultRegistration")
			.field("identity_client_set", &self.identity_client.is_some())
			.field("template", &self.template)
			.finish()
	}
}

/// Shared slot holding the current [`DefaultRegistration`].
///
/// Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct HandlerRegistry(Arc<RwLock<Option<DefaultRegistration>>>);
impl HandlerRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the process-wide registry.
	pub fn global() -> &'static HandlerRegistry {
		static GLOBAL: OnceLock<HandlerRegistry> = OnceLock::new();

		GLOBAL.get_or_init(HandlerRegistry::default)
	}

	/// Stores `registration`, replacing any previous one.
	pub fn register(&self, registration: DefaultRegistration) {
		let replaced = self.0.write().replace(registration).is_some();

		obs::log_default_registered(replaced);
	}

	/// Stores the identity client and template as the default registration.
	pub fn register_default(
		&self,
		identity_client: Arc<dyn IdentityClient>,
		template: TokenRequest,
	) {
		self.register(
			DefaultRegistration::new().with_identity_client(identity_client).with_template(template),
		);
	}

	/// Returns the current registration, if any.
	pub fn default_registration(&self) -> Option<DefaultRegistration> {
		self.0.read().clone()
	}
}

/// Registers the process-wide default identity client and template.
pub fn register_default(identity_client: Arc<dyn IdentityClient>, template: TokenRequest) {
	HandlerRegistry::global().register_default(identity_client, template);
}

/// Returns the process-wide default registration, if any.
pub fn default_registration() -> Option<DefaultRegistration> {
	HandlerRegistry::global().default_registration()
}
