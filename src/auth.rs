//! Identity-domain identifiers, cached accounts, scope sets, and authentication results.

pub mod account;
pub mod id;
pub mod scope;
pub mod token;

pub use account::*;
pub use id::*;
pub use scope::*;
pub use token::*;
