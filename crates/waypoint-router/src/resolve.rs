//! Nested route resolution.
//!
//! Resolution is a depth-first walk over the route tree in registration
//! order. There is no specificity ranking: the first route whose pattern
//! (and filters) accepts the path wins, so `/users/new` has to be registered
//! before `/users/:id`.
//!
//! A route that owns children may match a prefix of the path; the remainder
//! is resolved against its children with the parent's parameters inherited.
//! If no child accepts the remainder, the parent only matches when nothing
//! is left over.

use crate::config::RouterConfig;
use crate::pattern::{Params, split_path};
use crate::route::RouteDefinition;
use std::fmt;
use std::sync::Arc;

/// The outcome of resolving a concrete path.
pub struct Match<V: 'static> {
	route: Arc<RouteDefinition<V>>,
	ancestors: Vec<Arc<RouteDefinition<V>>>,
	params: Params,
	wildcard: Option<String>,
}

impl<V: 'static> Clone for Match<V> {
	fn clone(&self) -> Self {
		Self {
			route: Arc::clone(&self.route),
			ancestors: self.ancestors.clone(),
			params: self.params.clone(),
			wildcard: self.wildcard.clone(),
		}
	}
}

impl<V: 'static> fmt::Debug for Match<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Match")
			.field("route", &self.route.path())
			.field(
				"ancestors",
				&self.ancestors.iter().map(|r| r.path()).collect::<Vec<_>>(),
			)
			.field("params", &self.params)
			.field("wildcard", &self.wildcard)
			.finish()
	}
}

impl<V: 'static> Match<V> {
	/// The matched leaf route.
	pub fn route(&self) -> &Arc<RouteDefinition<V>> {
		&self.route
	}

	/// Ancestors of the leaf, outermost first.
	pub fn ancestors(&self) -> &[Arc<RouteDefinition<V>>] {
		&self.ancestors
	}

	/// Parameters accumulated from every level; leaf values win on collision.
	pub fn params(&self) -> &Params {
		&self.params
	}

	/// Consumes the match, returning its parameters.
	pub fn into_params(self) -> Params {
		self.params
	}

	/// Text captured by the leaf's trailing wildcard.
	pub fn wildcard(&self) -> Option<&str> {
		self.wildcard.as_deref()
	}

	/// Full pattern of the matched chain, e.g. `/users` + `/:id`.
	pub fn pattern(&self) -> String {
		let segments: Vec<&str> = self
			.ancestors
			.iter()
			.chain(std::iter::once(&self.route))
			.flat_map(|route| split_path(route.path()))
			.collect();
		format!("/{}", segments.join("/"))
	}
}

/// Resolves `path` against `routes`, starting from `inherited` parameters.
///
/// Returns `None` when no route accepts the path; that is an ordinary
/// outcome, not an error.
pub fn resolve<V: 'static>(
	path: &str,
	routes: &[Arc<RouteDefinition<V>>],
	inherited: &Params,
	config: &RouterConfig,
) -> Option<Match<V>> {
	let input = split_path(path);
	let mut ancestors = Vec::new();
	resolve_level(&input, routes, inherited, &mut ancestors, config)
}

fn resolve_level<V: 'static>(
	input: &[&str],
	routes: &[Arc<RouteDefinition<V>>],
	inherited: &Params,
	ancestors: &mut Vec<Arc<RouteDefinition<V>>>,
	config: &RouterConfig,
) -> Option<Match<V>> {
	for route in routes {
		let matcher = match route.compile(config) {
			Ok(matcher) => matcher,
			Err(err) => {
				tracing::warn!(pattern = route.path(), error = %err, "skipping route with invalid pattern");
				continue;
			}
		};

		let Some(found) = matcher.match_segments(input, route.has_children()) else {
			continue;
		};

		let mut params = inherited.clone();
		params.extend(found.params);
		let remaining = &input[found.consumed..];

		if route.has_children() {
			ancestors.push(Arc::clone(route));
			let child = resolve_level(remaining, route.children_routes(), &params, ancestors, config);
			ancestors.pop();
			if child.is_some() {
				return child;
			}
		}

		if remaining.is_empty() {
			return Some(Match {
				route: Arc::clone(route),
				ancestors: ancestors.clone(),
				params,
				wildcard: found.wildcard,
			});
		}
	}

	None
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::route::route;
	use rstest::rstest;

	type Routes = Vec<Arc<RouteDefinition<String>>>;

	fn leaf(path: &str) -> RouteDefinition<String> {
		let label = path.to_string();
		route(path, move |_: &Params, _: Option<String>| label.clone())
	}

	fn resolve_path(routes: &Routes, path: &str) -> Option<Match<String>> {
		resolve(path, routes, &Params::new(), &RouterConfig::default())
	}

	fn tree(routes: Vec<RouteDefinition<String>>) -> Routes {
		routes.into_iter().map(Arc::new).collect()
	}

	#[rstest]
	fn test_first_registered_wins() {
		// Arrange
		let routes = tree(vec![leaf("/users/new"), leaf("/users/:id")]);

		// Act
		let static_match = resolve_path(&routes, "/users/new").unwrap();
		let dynamic_match = resolve_path(&routes, "/users/42").unwrap();

		// Assert
		assert_eq!(static_match.route().path(), "/users/new");
		assert!(static_match.params().is_empty());
		assert_eq!(dynamic_match.route().path(), "/users/:id");
		assert_eq!(dynamic_match.params().get("id").map(String::as_str), Some("42"));
	}

	#[rstest]
	fn test_registration_order_is_not_reranked() {
		let routes = tree(vec![leaf("/users/:id"), leaf("/users/new")]);
		let found = resolve_path(&routes, "/users/new").unwrap();
		assert_eq!(found.route().path(), "/users/:id");
	}

	#[rstest]
	fn test_nested_parent_and_child() {
		let routes = tree(vec![leaf("/user").child(leaf("/profile"))]);

		let parent = resolve_path(&routes, "/user").unwrap();
		assert_eq!(parent.route().path(), "/user");
		assert!(parent.ancestors().is_empty());

		let child = resolve_path(&routes, "/user/profile").unwrap();
		assert_eq!(child.route().path(), "/profile");
		assert_eq!(child.ancestors().len(), 1);
		assert_eq!(child.pattern(), "/user/profile");
	}

	#[rstest]
	fn test_parent_params_are_inherited() {
		let routes = tree(vec![leaf("/users/:user_id").child(leaf("/posts/:post_id"))]);

		let found = resolve_path(&routes, "/users/7/posts/99").unwrap();

		assert_eq!(found.route().path(), "/posts/:post_id");
		assert_eq!(found.params().get("user_id").map(String::as_str), Some("7"));
		assert_eq!(found.params().get("post_id").map(String::as_str), Some("99"));
	}

	#[rstest]
	fn test_leaf_params_override_ancestors() {
		let routes = tree(vec![leaf("/org/:id").child(leaf("/team/:id"))]);
		let found = resolve_path(&routes, "/org/1/team/2").unwrap();
		assert_eq!(found.params().get("id").map(String::as_str), Some("2"));
	}

	#[rstest]
	fn test_unmatched_remainder_falls_through_to_sibling() {
		// Arrange: the first parent accepts the prefix but none of its children
		// accept "/settings", so resolution moves on to the next sibling.
		let routes = tree(vec![
			leaf("/account").child(leaf("/profile")),
			leaf("/account/settings"),
		]);

		// Act
		let found = resolve_path(&routes, "/account/settings").unwrap();

		// Assert
		assert_eq!(found.route().path(), "/account/settings");
		assert!(found.ancestors().is_empty());
	}

	#[rstest]
	fn test_optional_prefix_does_not_claim_static_sibling() {
		let routes = tree(vec![leaf("/:lang?/about"), leaf("/about")]);

		let found = resolve_path(&routes, "/about").unwrap();
		assert_eq!(found.route().path(), "/about");
		assert!(found.params().is_empty());

		let localized = resolve_path(&routes, "/de/about").unwrap();
		assert_eq!(localized.route().path(), "/:lang?/about");
		assert_eq!(localized.params().get("lang").map(String::as_str), Some("de"));
	}

	#[rstest]
	fn test_deeply_nested() {
		let routes = tree(vec![
			leaf("/")
				.child(leaf("/dashboard").child(leaf("/reports/:year?")))
				.child(leaf("/about")),
		]);

		let found = resolve_path(&routes, "/dashboard/reports/2024").unwrap();
		assert_eq!(found.route().path(), "/reports/:year?");
		assert_eq!(found.ancestors().len(), 2);
		assert_eq!(found.params().get("year").map(String::as_str), Some("2024"));

		let about = resolve_path(&routes, "/about").unwrap();
		assert_eq!(about.route().path(), "/about");

		let root = resolve_path(&routes, "/").unwrap();
		assert_eq!(root.route().path(), "/");
	}

	#[rstest]
	fn test_filter_rejection_falls_through() {
		let routes = tree(vec![
			leaf("/users/:id").filter("id", r"\d+"),
			leaf("/users/:slug"),
		]);

		let numeric = resolve_path(&routes, "/users/42").unwrap();
		assert_eq!(numeric.route().path(), "/users/:id");

		let named = resolve_path(&routes, "/users/abc").unwrap();
		assert_eq!(named.route().path(), "/users/:slug");
	}

	#[rstest]
	fn test_wildcard_capture_and_catch_all() {
		let routes = tree(vec![leaf("/files/*rest"), leaf("*")]);

		let files = resolve_path(&routes, "/files/a/b/c").unwrap();
		assert_eq!(files.route().path(), "/files/*rest");
		assert_eq!(files.wildcard(), Some("a/b/c"));
		assert_eq!(files.params().get("rest").map(String::as_str), Some("a/b/c"));

		let fallback = resolve_path(&routes, "/files").unwrap();
		assert_eq!(fallback.route().path(), "*");
		assert_eq!(fallback.wildcard(), Some("files"));
	}

	#[rstest]
	fn test_no_match() {
		let routes = tree(vec![leaf("/"), leaf("/users")]);
		assert!(resolve_path(&routes, "/missing").is_none());
	}

	#[rstest]
	fn test_inherited_params_seed_resolution() {
		let routes = tree(vec![leaf("/:page")]);
		let mut inherited = Params::new();
		inherited.insert("tenant".to_string(), "acme".to_string());

		let found = resolve("/home", &routes, &inherited, &RouterConfig::default()).unwrap();

		assert_eq!(found.params().get("tenant").map(String::as_str), Some("acme"));
		assert_eq!(found.params().get("page").map(String::as_str), Some("home"));
	}
}
