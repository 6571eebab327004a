//! Identifiers carried by cached identity-provider accounts.
//!
//! Both are opaque strings issued by the provider. Home account ids key the cache and must be
//! non-empty; tenant ids may be empty for accounts signed in against authorities without a
//! tenant (personal accounts, ADFS).

// std
use std::borrow::Borrow;
// self
use crate::_prelude::*;

macro_rules! account_id {
	($(#[$meta:meta])* $name:ident, $kind:literal, $check:ident) => {
		$(#[$meta])*
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Validates and wraps the provided identifier.
			pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
				let value = value.into();

				$check($kind, &value)?;

				Ok(Self(value))
			}

			/// Returns the identifier as a string slice.
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				Self::new(value)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({:?})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
	};
}

/// Error returned when an account identifier is malformed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty where a value is required.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (home account, tenant).
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier (home account, tenant).
		kind: &'static str,
	},
}

account_id! {
	/// Identifier of a cached account, stable across tenants (usually `<object>.<tenant>`).
	HomeAccountId, "HomeAccount", check_required
}
account_id! {
	/// Directory (tenant) that issued an account's tokens; empty when the authority has none.
	TenantId, "Tenant", check_opaque
}

fn check_required(kind: &'static str, value: &str) -> Result<(), IdentifierError> {
	if value.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}

	check_opaque(kind, value)
}

fn check_opaque(kind: &'static str, value: &str) -> Result<(), IdentifierError> {
	if value.chars().any(char::is_whitespace) {
		Err(IdentifierError::ContainsWhitespace { kind })
	} else {
		Ok(())
	}
}
