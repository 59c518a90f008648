//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - One statement per operation, parameters bound positionally
//! - Aggregates (average rating) computed with JOIN + GROUP BY, no N+1
//! - Constraint violations mapped to typed errors, no check-then-insert

pub mod users;
pub mod properties;
pub mod reservations;

pub use users::{UserRepo, User, UserSummary};
pub use properties::{PropertyRepo, Property, PropertyListing};
pub use reservations::{ReservationRepo, GuestReservation};
