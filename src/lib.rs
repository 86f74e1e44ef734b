//! # loginflow
//!
//! Turns free-text login instructions into replayable browser flows, driven
//! over the Chrome DevTools Protocol (CDP).
//!
//! ## Features
//!
//! - **Intent extraction**: parse a URL and credential pair out of a prompt
//!   like `go to https://example.com and login with "a@b.c" and password "x"`
//! - **Login-control resolution**: heuristic scoring of every input and
//!   button on a previously-unseen page to find the username field, password
//!   field, and submit control, with a structural fallback ladder
//! - **Selector synthesis**: minimal, stable selectors for the chosen
//!   elements so the flow can be replayed later
//! - **Fail-soft execution**: every step of a flow runs and is recorded; one
//!   broken step never aborts the run
//! - **Reports**: one JSON and one rendered HTML report per run, with saved
//!   or inline screenshots
//! - **HTTP server** (`server` feature): `POST /nl_to_flow`, `POST
//!   /run_flow`, `POST /close`
//!
//! The resolver does not guarantee correctness; it guarantees a
//! deterministic, explainable best-effort ranking. Scores are plain integers;
//! `-1` marks an element disqualified by the visibility gate.
//!
//! ## Compiling a flow
//!
//! ```rust,no_run
//! use loginflow::browser::{LaunchOptions, Session};
//! use loginflow::flow::compile;
//!
//! # fn main() -> loginflow::Result<()> {
//! let mut session = Session::new(LaunchOptions::default());
//! let compiled = compile(
//!     &mut session,
//!     r#"go to https://example.com and login with "a@b.c" and password "x""#,
//!     None,
//! )?;
//!
//! println!("username field: {:?}", compiled.discovered_selectors.username.selector);
//! println!("{} steps", compiled.flow.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Resolving login controls directly
//!
//! ```rust,no_run
//! use loginflow::browser::{LaunchOptions, Session};
//! use loginflow::dom::{resolve_login, CdpPage};
//!
//! # fn main() -> loginflow::Result<()> {
//! let mut session = Session::new(LaunchOptions::default());
//! session.navigate("https://example.com/login")?;
//!
//! let page = CdpPage::new(session.page()?);
//! let found = resolve_login(&page)?;
//! println!("password field: {:?} (score {})", found.password.selector, found.password.score);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`intent`]: instruction-to-value extraction (URL + quoted credentials)
//! - [`dom`]: candidate scoring, selector synthesis, and the login resolver
//! - [`flow`]: flow data model, compiler, and fail-soft executor
//! - [`browser`]: browser session lifecycle and launch configuration
//! - [`report`]: JSON/HTML report persistence
//! - [`error`]: error types and the crate result alias
//! - [`server`]: HTTP control surface (requires the `server` feature)

pub mod browser;
pub mod dom;
pub mod error;
pub mod flow;
pub mod intent;
pub mod report;

#[cfg(feature = "server")]
pub mod server;

pub use browser::{LaunchOptions, Session};
pub use dom::{resolve_login, CdpPage, DiscoveredSelectors, PageDriver, Role, RoleMatch};
pub use error::{FlowError, Result};
pub use flow::{compile, run_flow, ActionStep, CompiledFlow, RunReport};
pub use intent::{extract, ExtractedIntent};
