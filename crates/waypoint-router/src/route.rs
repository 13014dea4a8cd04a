//! Route definitions and route views.
//!
//! A [`RouteDefinition`] pairs a path pattern with a [`RouteView`], an
//! ordered list of child routes, and optional parameter filters. Routes are
//! assembled with the [`route`] builder and handed to the router, which
//! validates every pattern before the first navigation.
//!
//! ```
//! use waypoint_router::{Params, route};
//!
//! let users = route("/users", |_: &Params, outlet: Option<String>| {
//!     format!("<users>{}</users>", outlet.unwrap_or_default())
//! })
//! .child(route("/new", |_: &Params, _: Option<String>| "new".to_string()))
//! .child(
//!     route("/:id", |params: &Params, _: Option<String>| params["id"].clone())
//!         .filter("id", r"\d+"),
//! );
//! assert_eq!(users.children_routes().len(), 2);
//! ```

use crate::config::RouterConfig;
use crate::error::{PatternError, RenderError};
use crate::pattern::{MatchFilter, Matcher, Params};
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, OnceLock};

/// Produces a route's output from its parameters.
///
/// `outlet` carries the already-rendered output of the matched child route
/// when this route is an ancestor in a nested match, and is `None` for the
/// leaf.
pub trait RouteView<V>: Send + Sync {
	/// Renders the route.
	///
	/// # Errors
	///
	/// Returns [`RenderError`] when the view cannot produce usable output.
	/// The router logs the error and abandons the render pass.
	fn render(&self, params: &Params, outlet: Option<V>) -> Result<V, RenderError>;
}

/// View for an infallible closure.
struct ViewFn<F> {
	view: F,
}

impl<V, F> RouteView<V> for ViewFn<F>
where
	F: Fn(&Params, Option<V>) -> V + Send + Sync,
{
	fn render(&self, params: &Params, outlet: Option<V>) -> Result<V, RenderError> {
		Ok((self.view)(params, outlet))
	}
}

/// View for a closure that returns `Result<V, E>`.
struct FallibleViewFn<F, E> {
	view: F,
	_error: PhantomData<fn() -> E>,
}

impl<V, F, E> RouteView<V> for FallibleViewFn<F, E>
where
	F: Fn(&Params, Option<V>) -> Result<V, E> + Send + Sync,
	E: Into<RenderError>,
{
	fn render(&self, params: &Params, outlet: Option<V>) -> Result<V, RenderError> {
		(self.view)(params, outlet).map_err(Into::into)
	}
}

/// Wraps an infallible closure as a shared [`RouteView`].
pub fn view_fn<V, F>(view: F) -> Arc<dyn RouteView<V>>
where
	V: 'static,
	F: Fn(&Params, Option<V>) -> V + Send + Sync + 'static,
{
	Arc::new(ViewFn { view })
}

/// Wraps a fallible closure as a shared [`RouteView`].
pub fn fallible_view_fn<V, F, E>(view: F) -> Arc<dyn RouteView<V>>
where
	V: 'static,
	F: Fn(&Params, Option<V>) -> Result<V, E> + Send + Sync + 'static,
	E: Into<RenderError> + 'static,
{
	Arc::new(FallibleViewFn {
		view,
		_error: PhantomData,
	})
}

/// A node in the route tree.
pub struct RouteDefinition<V: 'static> {
	path: String,
	name: Option<String>,
	view: Arc<dyn RouteView<V>>,
	children: Vec<Arc<RouteDefinition<V>>>,
	filters: Vec<(String, MatchFilter)>,
	matcher: OnceLock<Matcher>,
}

/// Creates a route whose view always produces output.
pub fn route<V, F>(path: &str, view: F) -> RouteDefinition<V>
where
	V: 'static,
	F: Fn(&Params, Option<V>) -> V + Send + Sync + 'static,
{
	RouteDefinition::new(path, view_fn(view))
}

/// Creates a route whose view may fail.
pub fn route_fallible<V, F, E>(path: &str, view: F) -> RouteDefinition<V>
where
	V: 'static,
	F: Fn(&Params, Option<V>) -> Result<V, E> + Send + Sync + 'static,
	E: Into<RenderError> + 'static,
{
	RouteDefinition::new(path, fallible_view_fn(view))
}

impl<V: 'static> fmt::Debug for RouteDefinition<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouteDefinition")
			.field("path", &self.path)
			.field("name", &self.name)
			.field("children", &self.children)
			.field("filters", &self.filters)
			.field("compiled", &self.matcher.get().is_some())
			.finish()
	}
}

impl<V: 'static> RouteDefinition<V> {
	/// Creates a route from a pattern and a shared view.
	pub fn new(path: &str, view: Arc<dyn RouteView<V>>) -> Self {
		Self {
			path: path.to_string(),
			name: None,
			view,
			children: Vec::new(),
			filters: Vec::new(),
			matcher: OnceLock::new(),
		}
	}

	/// Names the route for reverse lookups.
	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Appends a child route.
	pub fn child(mut self, child: RouteDefinition<V>) -> Self {
		self.children.push(Arc::new(child));
		self
	}

	/// Appends several child routes, preserving their order.
	pub fn children<I>(mut self, children: I) -> Self
	where
		I: IntoIterator<Item = RouteDefinition<V>>,
	{
		self.children.extend(children.into_iter().map(Arc::new));
		self
	}

	/// Adds a filter that a captured parameter must satisfy.
	pub fn filter(mut self, param: impl Into<String>, filter: impl Into<MatchFilter>) -> Self {
		self.filters.push((param.into(), filter.into()));
		self
	}

	/// Returns the pattern as written.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns the route name.
	pub fn route_name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Returns the child routes in registration order.
	pub fn children_routes(&self) -> &[Arc<RouteDefinition<V>>] {
		&self.children
	}

	/// Returns whether this route owns children.
	pub fn has_children(&self) -> bool {
		!self.children.is_empty()
	}

	/// Renders this route's view.
	pub fn render(&self, params: &Params, outlet: Option<V>) -> Result<V, RenderError> {
		self.view.render(params, outlet)
	}

	/// Compiles the pattern on first use and memoizes the result.
	pub fn compile(&self, config: &RouterConfig) -> Result<&Matcher, PatternError> {
		if let Some(matcher) = self.matcher.get() {
			return Ok(matcher);
		}
		let matcher = Matcher::compile(&self.path, &self.filters, config)?;
		Ok(self.matcher.get_or_init(|| matcher))
	}

	/// Returns the compiled matcher if the route has been compiled.
	pub fn matcher(&self) -> Option<&Matcher> {
		self.matcher.get()
	}
}
