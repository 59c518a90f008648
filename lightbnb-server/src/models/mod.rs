//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod email;
pub mod user;
pub mod money;
pub mod rating;
pub mod limit;
pub mod property;
pub mod query;

pub use validation::ValidationError;
pub use email::Email;
pub use user::{NewUser, Password, UserName};
pub use money::Cents;
pub use rating::Rating;
pub use limit::{Limit, LimitParams};
pub use property::{NewProperty, PropertyInput};
