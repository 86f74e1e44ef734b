//! Heuristic login-control resolution over a live page
//!
//! This module is the discovery half of the crate:
//! - [`driver`]: the `PageDriver` seam between the resolver and the browser
//! - [`score`]: per-role confidence scoring with a hard visibility gate
//! - [`selector`]: replayable selector synthesis (most-stable attribute first)
//! - [`resolver`]: the full-page scan producing [`DiscoveredSelectors`]

pub mod driver;
pub mod hints;
pub mod resolver;
pub mod score;
pub mod selector;

#[cfg(test)]
pub(crate) mod testutil;

pub use driver::{CdpPage, PageDriver};
pub use resolver::{resolve_login, DiscoveredSelectors, ResolutionSource, RoleMatch};
pub use score::{score, Role, DISQUALIFIED};
pub use selector::synthesize;
