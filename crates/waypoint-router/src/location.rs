//! The parsed "where am I" value.

use crate::error::RouterError;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use url::Url;

/// An immutable snapshot of the application's position.
///
/// `search` and `hash` are stored without their leading `?` / `#`. The
/// `query` map is derived from `search` at construction and keeps the first
/// value seen for each key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
	pathname: String,
	search: String,
	hash: String,
	state: Value,
	query: HashMap<String, String>,
}

impl Default for Location {
	fn default() -> Self {
		Self::new("/", "", "")
	}
}

impl Location {
	/// Creates a location from its parts.
	///
	/// A missing leading `/` is added to `pathname`; a leading `?` on `search`
	/// or `#` on `hash` is stripped.
	pub fn new(pathname: &str, search: &str, hash: &str) -> Self {
		let pathname = if pathname.starts_with('/') {
			pathname.to_string()
		} else {
			format!("/{}", pathname)
		};
		let search = search.strip_prefix('?').unwrap_or(search).to_string();
		let hash = hash.strip_prefix('#').unwrap_or(hash).to_string();
		let query = parse_query(&search);

		Self {
			pathname,
			search,
			hash,
			state: Value::Null,
			query,
		}
	}

	/// Parses a `path?search#hash` string.
	///
	/// ```
	/// use waypoint_router::Location;
	///
	/// let location = Location::parse("/users?page=2&page=3#top");
	/// assert_eq!(location.pathname(), "/users");
	/// assert_eq!(location.query_param("page"), Some("2"));
	/// assert_eq!(location.hash(), "top");
	/// ```
	pub fn parse(href: &str) -> Self {
		let (rest, hash) = href.split_once('#').unwrap_or((href, ""));
		let (pathname, search) = rest.split_once('?').unwrap_or((rest, ""));
		Self::new(pathname, search, hash)
	}

	/// Builds a location from the path, query and fragment of a URL.
	pub fn from_url(url: &Url) -> Self {
		Self::new(url.path(), url.query().unwrap_or(""), url.fragment().unwrap_or(""))
	}

	/// Returns a copy carrying the given history state.
	pub fn with_state(mut self, state: Value) -> Self {
		self.state = state;
		self
	}

	/// The path, always starting with `/`.
	pub fn pathname(&self) -> &str {
		&self.pathname
	}

	/// The raw query string without the leading `?`.
	pub fn search(&self) -> &str {
		&self.search
	}

	/// The fragment without the leading `#`.
	pub fn hash(&self) -> &str {
		&self.hash
	}

	/// Application state attached through history.
	pub fn state(&self) -> &Value {
		&self.state
	}

	/// Query parameters, first value per key.
	pub fn query(&self) -> &HashMap<String, String> {
		&self.query
	}

	/// Looks up a single query parameter.
	pub fn query_param(&self, key: &str) -> Option<&str> {
		self.query.get(key).map(String::as_str)
	}

	/// Reassembles `path?search#hash`.
	pub fn href(&self) -> String {
		let mut href = self.pathname.clone();
		if !self.search.is_empty() {
			href.push('?');
			href.push_str(&self.search);
		}
		if !self.hash.is_empty() {
			href.push('#');
			href.push_str(&self.hash);
		}
		href
	}

	/// Resolves a navigation target against this location.
	///
	/// Absolute paths are parsed as-is. Anything else (`./edit`, `../list`,
	/// `?page=2`, `#section`, `settings`) is resolved the way a browser
	/// resolves an anchor's `href` against the current document URL.
	///
	/// Targets that land on a different origin than `base` are refused.
	pub(crate) fn resolve(&self, to: &str, base: &Url) -> Result<Self, RouterError> {
		if to.starts_with('/') && !to.starts_with("//") {
			return Ok(Self::parse(to));
		}
		let unresolvable =
			|err: url::ParseError| RouterError::NavigationFailed(format!("cannot resolve '{}': {}", to, err));
		let current = base.join(&self.href()).map_err(unresolvable)?;
		let target = current.join(to).map_err(unresolvable)?;
		if target.origin() != base.origin() {
			return Err(RouterError::NavigationFailed(format!(
				"'{}' is outside origin {}",
				to,
				base.origin().ascii_serialization()
			)));
		}
		Ok(Self::from_url(&target))
	}
}

impl fmt::Display for Location {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.href())
	}
}

fn parse_query(search: &str) -> HashMap<String, String> {
	let mut query = HashMap::new();
	for (key, value) in url::form_urlencoded::parse(search.as_bytes()) {
		query
			.entry(key.into_owned())
			.or_insert_with(|| value.into_owned());
	}
	query
}
