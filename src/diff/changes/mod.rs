//! Change computer implementations.
//!
//! One [`ChangeComputer`](super::ChangeComputer) per category: membership
//! (added/removed), versions and licenses.

mod components;
mod licenses;
mod versions;

pub use components::MembershipChangeComputer;
pub use licenses::LicenseChangeComputer;
pub use versions::VersionChangeComputer;
