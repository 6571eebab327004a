//! Cached accounts and helpers for picking one out of the identity client's cache.

// self
use crate::{
	_prelude::*,
	auth::{HomeAccountId, TenantId},
};

/// Picks the account used for a silent request out of every cached account.
///
/// The return value is used verbatim, so `None` lets the identity client decide.
pub type AccountSelector = Arc<dyn Fn(&[Account]) -> Option<Account> + Send + Sync>;

/// Account record cached by the identity client after an interactive sign-in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
	/// Identifier stable across tenants.
	pub home_account_id: HomeAccountId,
	/// Tenant that issued the account's tokens.
	pub tenant_id: TenantId,
	/// Sign-in name, usually an email address or UPN.
	pub username: String,
	/// Authority host the account was signed in against.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub environment: Option<String>,
	/// Object identifier inside the issuing tenant.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub local_account_id: Option<String>,
	/// Display name from the id token.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
}
impl Account {
	/// Creates an account with the required identifiers.
	pub fn new(
		home_account_id: HomeAccountId,
		tenant_id: TenantId,
		username: impl Into<String>,
	) -> Self {
		Self {
			home_account_id,
			tenant_id,
			username: username.into(),
			environment: None,
			local_account_id: None,
			name: None,
		}
	}

	/// Sets the authority host.
	pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
		self.environment = Some(environment.into());

		self
	}

	/// Sets the tenant-local object identifier.
	pub fn with_local_account_id(mut self, id: impl Into<String>) -> Self {
		self.local_account_id = Some(id.into());

		self
	}

	/// Sets the display name.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());

		self
	}
}

/// Selector that returns the first account whose username matches, ignoring ASCII case.
pub fn select_by_username(username: impl Into<String>) -> AccountSelector {
	let username = username.into();

	Arc::new(move |accounts: &[Account]| {
		accounts.iter().find(|account| account.username.eq_ignore_ascii_case(&username)).cloned()
	})
}

/// Selector that returns the account with the given home account identifier.
pub fn select_by_home_account_id(id: HomeAccountId) -> AccountSelector {
	Arc::new(move |accounts: &[Account]| {
		accounts.iter().find(|account| account.home_account_id == id).cloned()
	})
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn account(home: &str, username: &str) -> Account {
		Account::new(
			HomeAccountId::new(home).expect("Home account fixture should be valid."),
			TenantId::new("contoso").expect("Tenant fixture should be valid."),
			username,
		)
	}

	#[test]
	fn username_selector_ignores_case() {
		let accounts =
			[account("a.contoso", "alice@contoso.com"), account("b.contoso", "bob@contoso.com")];
		let selector = select_by_username("BOB@contoso.com");

		assert_eq!(selector(accounts.as_slice()), Some(accounts[1].clone()));
		assert_eq!(select_by_username("carol@contoso.com")(accounts.as_slice()), None);
	}

	#[test]
	fn home_id_selector_matches_exactly() {
		let accounts =
			[account("a.contoso", "alice@contoso.com"), account("b.contoso", "bob@contoso.com")];
		let selector = select_by_home_account_id(id_of("a.contoso"));

		assert_eq!(selector(accounts.as_slice()), Some(accounts[0].clone()));
		assert_eq!(select_by_home_account_id(id_of("c.contoso"))(accounts.as_slice()), None);
	}

	#[test]
	fn accounts_use_camel_case_keys() {
		let json = concat!(
			"{\"homeAccountId\":\"a.contoso\",\"tenantId\":\"contoso\",",
			"\"username\":\"alice@contoso.com\",\"name\":\"Alice\"}"
		);
		let parsed: Account = serde_json::from_str(json).expect("Account should deserialize.");

		assert_eq!(parsed, account("a.contoso", "alice@contoso.com").with_name("Alice"));
		assert!(parsed.environment.is_none());

		let full = parsed.with_environment("login.contoso.com").with_local_account_id("a");
		let value = serde_json::to_value(&full).expect("Account should serialize.");

		assert_eq!(value["environment"], "login.contoso.com");
		assert_eq!(value["localAccountId"], "a");
	}

	#[test]
	fn accounts_without_a_tenant_deserialize() {
		let json = "{\"homeAccountId\":\"uid\",\"tenantId\":\"\",\"username\":\"adfs\\\\alice\"}";
		let parsed: Account = serde_json::from_str(json).expect("Account should deserialize.");

		assert_eq!(parsed.tenant_id.as_str(), "");
		assert_eq!(parsed.username, "adfs\\alice");
	}

	fn id_of(value: &str) -> HomeAccountId {
		HomeAccountId::new(value).expect("Home account fixture should be valid.")
	}
}
