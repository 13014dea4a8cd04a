//! Client-side routing for Waypoint.
//!
//! This crate maps URL paths to a tree of route definitions, extracts
//! parameters, composes nested layouts, and keeps a shared current location
//! in sync with browser history and link clicks.
//!
//! ## Features
//!
//! - **Route patterns**: static segments, `:name`, `:name?` and trailing
//!   `*name` / `*` wildcards, with optional regex or predicate filters
//! - **Nested routes**: parents match a prefix and hand the rest to their
//!   children; parameters accumulate down the tree
//! - **Guards**: a before-guard that can veto navigation and an after-guard
//!   notified of every committed move, back/forward included
//! - **Link interception**: document clicks on in-app anchors become router
//!   navigations
//! - **Named routes**: reverse URL generation across nesting levels
//!
//! The browser is reached only through the [`HistoryBinding`] and
//! [`ClickSource`] traits. [`MemoryHistory`] and [`MemoryDocument`] implement
//! them in memory.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use waypoint_router::{MemoryHistory, Params, Router, RouterOutlet, route};
//!
//! let outlet = Arc::new(RouterOutlet::<String>::new());
//! let router = Router::builder()
//!     .route(
//!         route("/users", |_: &Params, child: Option<String>| {
//!             format!("users > {}", child.unwrap_or_default())
//!         })
//!         .child(route("/:id", |p: &Params, _: Option<String>| format!("user {}", p["id"]))),
//!     )
//!     .history(Arc::new(MemoryHistory::with_initial("/users/1")))
//!     .render_target(outlet.clone())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(outlet.current().as_deref(), Some("users > user 1"));
//!
//! router.push("/users/2").unwrap();
//! assert_eq!(outlet.current().as_deref(), Some("users > user 2"));
//! ```

pub mod config;
#[cfg(feature = "debug-hooks")]
pub mod devtools;
pub mod error;
pub mod history;
pub mod link;
pub mod location;
pub mod pattern;
pub mod render;
pub mod resolve;
pub mod route;
pub mod router;
pub mod store;

pub use config::RouterConfig;
#[cfg(feature = "debug-hooks")]
pub use devtools::Devtools;
pub use error::{HistoryError, PatternError, RenderError, RouterError};
pub use history::{
	HistoryBinding, HistoryEntry, ListenerId, MemoryHistory, NavigationType, PopStateCallback,
};
pub use link::{
	Anchor, ClickCallback, ClickEvent, ClickSource, IgnoreReason, LinkDecision, MemoryDocument,
	classify_click,
};
pub use location::Location;
pub use pattern::{MatchFilter, Matcher, Params, PathMatch, split_path};
pub use render::{RenderTarget, RouterOutlet};
pub use resolve::{Match, resolve};
pub use route::{RouteDefinition, RouteView, fallible_view_fn, route, route_fallible, view_fn};
pub use router::{
	AfterGuard, BeforeGuard, NavigateOptions, Navigation, Router, RouterBuilder,
};
pub use store::{LocationStore, SubscriptionId};

/// Re-export commonly used types.
pub mod prelude {
	pub use crate::{
		Anchor, ClickEvent, Location, MatchFilter, NavigateOptions, Navigation, Params,
		RouteDefinition, Router, RouterConfig, RouterError, RouterOutlet, route, route_fallible,
	};
}
