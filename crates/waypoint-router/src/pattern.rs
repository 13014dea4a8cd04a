//! Route pattern compilation and segment matching.
//!
//! Patterns are split on `/` and compared segment by segment; no combined
//! regular expression is ever built. Supported segments:
//!
//! - `users` - static, compared verbatim
//! - `:id` - captures one non-empty segment
//! - `:year?` - captures one segment when present, otherwise skipped
//! - `*rest` - final segment, captures one or more remaining segments
//!   joined by `/`
//! - `*` - final segment, catch-all for zero or more remaining segments
//!
//! An optional segment takes the next input segment whenever one is left and
//! is skipped only once the input has run out. A skip is never retried, so
//! matching is a single left-to-right pass.

use crate::config::RouterConfig;
use crate::error::PatternError;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Parameters captured by a match.
pub type Params = HashMap<String, String>;

/// Maximum allowed size for a compiled filter regex (in bytes).
const MAX_FILTER_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// Splits a path into its non-empty `/`-separated segments.
///
/// `/` and the empty string both yield no segments.
pub fn split_path(path: &str) -> Vec<&str> {
	path.split('/').filter(|s| !s.is_empty()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
	Static(String),
	Named(String),
	Optional(String),
	Wildcard(Option<String>),
}

/// A validation filter attached to a captured parameter.
#[derive(Clone)]
pub enum MatchFilter {
	/// Regex that must match the whole parameter value.
	Regex(String),
	/// Predicate invoked with the parameter value.
	Predicate(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl MatchFilter {
	/// Creates a regex filter.
	pub fn regex(pattern: impl Into<String>) -> Self {
		Self::Regex(pattern.into())
	}

	/// Creates a predicate filter.
	pub fn predicate<F>(predicate: F) -> Self
	where
		F: Fn(&str) -> bool + Send + Sync + 'static,
	{
		Self::Predicate(Arc::new(predicate))
	}
}

impl From<&str> for MatchFilter {
	fn from(pattern: &str) -> Self {
		Self::regex(pattern)
	}
}

impl From<String> for MatchFilter {
	fn from(pattern: String) -> Self {
		Self::regex(pattern)
	}
}

impl fmt::Debug for MatchFilter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Regex(pattern) => f.debug_tuple("Regex").field(pattern).finish(),
			Self::Predicate(_) => f.write_str("Predicate(..)"),
		}
	}
}

#[derive(Clone)]
enum CompiledFilter {
	Regex(Regex),
	Predicate(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl CompiledFilter {
	fn accepts(&self, value: &str) -> bool {
		match self {
			Self::Regex(regex) => regex.is_match(value),
			Self::Predicate(predicate) => predicate(value),
		}
	}
}

/// Result of matching input segments against one pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
	/// Captured parameters. Skipped optionals are absent.
	pub params: Params,
	/// Number of input segments the pattern consumed.
	pub consumed: usize,
	/// Text captured by a trailing wildcard, if the pattern has one.
	pub wildcard: Option<String>,
}

/// A compiled route pattern.
#[derive(Clone)]
pub struct Matcher {
	pattern: String,
	segments: Vec<Segment>,
	filters: Vec<(String, CompiledFilter)>,
	decode: bool,
}

impl fmt::Debug for Matcher {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Matcher")
			.field("pattern", &self.pattern)
			.field("segments", &self.segments)
			.field(
				"filters",
				&self.filters.iter().map(|(name, _)| name).collect::<Vec<_>>(),
			)
			.finish()
	}
}

impl PartialEq for Matcher {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern
	}
}

impl fmt::Display for Matcher {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.pattern)
	}
}

impl Matcher {
	/// Compiles a pattern with no filters and the default limits.
	///
	/// # Examples
	///
	/// ```
	/// use waypoint_router::Matcher;
	///
	/// let matcher = Matcher::new("/users/:id").unwrap();
	/// let params = matcher.matches("/users/42").unwrap();
	/// assert_eq!(params.get("id").map(String::as_str), Some("42"));
	/// ```
	pub fn new(pattern: &str) -> Result<Self, PatternError> {
		Self::compile(pattern, &[], &RouterConfig::default())
	}

	/// Compiles a pattern together with its parameter filters.
	///
	/// # Errors
	///
	/// Returns a [`PatternError`] if the pattern exceeds the configured
	/// limits, has a wildcard before its last segment, declares an empty,
	/// invalid or duplicated parameter name, or if a filter refers to an
	/// unknown parameter or is not a valid regex.
	pub fn compile(
		pattern: &str,
		filters: &[(String, MatchFilter)],
		config: &RouterConfig,
	) -> Result<Self, PatternError> {
		if pattern.len() > config.max_pattern_length() {
			return Err(PatternError::TooLong {
				length: pattern.len(),
				max: config.max_pattern_length(),
			});
		}

		let raw_segments = split_path(pattern);
		if raw_segments.len() > config.max_pattern_segments() {
			return Err(PatternError::TooManySegments {
				count: raw_segments.len(),
				max: config.max_pattern_segments(),
			});
		}

		let mut segments = Vec::with_capacity(raw_segments.len());
		let mut names = HashSet::new();
		let last = raw_segments.len().saturating_sub(1);

		for (index, raw) in raw_segments.iter().enumerate() {
			let segment = parse_segment(raw)?;
			if matches!(segment, Segment::Wildcard(_)) && index != last {
				return Err(PatternError::WildcardNotLast {
					segment: raw.to_string(),
				});
			}
			let name = match &segment {
				Segment::Named(name) | Segment::Optional(name) => Some(name),
				Segment::Wildcard(name) => name.as_ref(),
				Segment::Static(_) => None,
			};
			if let Some(name) = name {
				if !names.insert(name.clone()) {
					return Err(PatternError::DuplicateParameter { name: name.clone() });
				}
			}
			segments.push(segment);
		}

		let mut compiled = Vec::with_capacity(filters.len());
		for (name, filter) in filters {
			if !names.contains(name) {
				return Err(PatternError::UnknownFilterParameter { name: name.clone() });
			}
			let filter = match filter {
				MatchFilter::Regex(source) => {
					let regex = regex::RegexBuilder::new(&format!("^(?:{})$", source))
						.size_limit(MAX_FILTER_REGEX_SIZE)
						.build()
						.map_err(|e| PatternError::InvalidFilter {
							name: name.clone(),
							message: e.to_string(),
						})?;
					CompiledFilter::Regex(regex)
				}
				MatchFilter::Predicate(predicate) => CompiledFilter::Predicate(Arc::clone(predicate)),
			};
			compiled.push((name.clone(), filter));
		}

		Ok(Self {
			pattern: pattern.to_string(),
			segments,
			filters: compiled,
			decode: config.decode_params(),
		})
	}

	/// Returns the original pattern string.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Returns the parameter names in declaration order.
	pub fn param_names(&self) -> Vec<&str> {
		self.segments
			.iter()
			.filter_map(|segment| match segment {
				Segment::Named(name) | Segment::Optional(name) => Some(name.as_str()),
				Segment::Wildcard(name) => name.as_deref(),
				Segment::Static(_) => None,
			})
			.collect()
	}

	/// Returns whether the pattern ends in a wildcard.
	pub fn has_wildcard(&self) -> bool {
		matches!(self.segments.last(), Some(Segment::Wildcard(_)))
	}

	/// Returns whether the pattern consists only of static segments.
	pub fn is_static(&self) -> bool {
		self.segments
			.iter()
			.all(|segment| matches!(segment, Segment::Static(_)))
	}

	/// Matches a whole path, requiring every input segment to be consumed.
	pub fn matches(&self, path: &str) -> Option<Params> {
		self.match_segments(&split_path(path), false)
			.map(|found| found.params)
	}

	/// Checks if this pattern would match the given path.
	pub fn is_match(&self, path: &str) -> bool {
		self.matches(path).is_some()
	}

	/// Matches pre-split input segments.
	///
	/// With `allow_prefix`, input segments left over after the pattern is
	/// exhausted do not fail the match; [`PathMatch::consumed`] tells the
	/// caller where the remainder starts.
	pub fn match_segments(&self, input: &[&str], allow_prefix: bool) -> Option<PathMatch> {
		let mut captured = Vec::new();
		let mut consumed = 0;
		let mut wildcard = None;

		for segment in &self.segments {
			match segment {
				Segment::Static(text) => {
					if input.get(consumed) != Some(&text.as_str()) {
						return None;
					}
					consumed += 1;
				}
				Segment::Named(name) => {
					let value = input.get(consumed)?;
					captured.push((name.clone(), self.decode(value)));
					consumed += 1;
				}
				Segment::Optional(name) => {
					if let Some(value) = input.get(consumed) {
						captured.push((name.clone(), self.decode(value)));
						consumed += 1;
					}
				}
				Segment::Wildcard(name) => {
					let rest = &input[consumed..];
					if rest.is_empty() && name.is_some() {
						return None;
					}
					let joined = rest
						.iter()
						.map(|segment| self.decode(segment))
						.collect::<Vec<_>>()
						.join("/");
					if let Some(name) = name {
						captured.push((name.clone(), joined.clone()));
					}
					consumed = input.len();
					wildcard = Some(joined);
				}
			}
		}

		if consumed < input.len() && !allow_prefix {
			return None;
		}
		if !self.accepts(&captured) {
			return None;
		}

		Some(PathMatch {
			params: captured.into_iter().collect(),
			consumed,
			wildcard,
		})
	}

	fn accepts(&self, captured: &[(String, String)]) -> bool {
		self.filters.iter().all(|(name, filter)| {
			captured
				.iter()
				.find(|(key, _)| key == name)
				.is_none_or(|(_, value)| filter.accepts(value))
		})
	}

	fn decode(&self, raw: &str) -> String {
		if !self.decode {
			return raw.to_string();
		}
		urlencoding::decode(raw)
			.map(|decoded| decoded.into_owned())
			.unwrap_or_else(|_| raw.to_string())
	}

	/// Appends this pattern's segments, filled from `params`, to `out`.
	///
	/// Returns the name of the first required parameter that is missing.
	pub(crate) fn reverse_into(&self, params: &Params, out: &mut Vec<String>) -> Result<(), String> {
		for segment in &self.segments {
			match segment {
				Segment::Static(text) => out.push(text.clone()),
				Segment::Named(name) => match params.get(name) {
					Some(value) if !value.is_empty() => {
						out.push(urlencoding::encode(value).into_owned())
					}
					_ => return Err(name.clone()),
				},
				Segment::Optional(name) => {
					if let Some(value) = params.get(name).filter(|v| !v.is_empty()) {
						out.push(urlencoding::encode(value).into_owned());
					}
				}
				Segment::Wildcard(Some(name)) => match params.get(name) {
					Some(value) if !value.is_empty() => out.extend(
						split_path(value)
							.into_iter()
							.map(|part| urlencoding::encode(part).into_owned()),
					),
					_ => return Err(name.clone()),
				},
				Segment::Wildcard(None) => {}
			}
		}
		Ok(())
	}

	/// Generates a path from this pattern with the given parameters.
	pub fn reverse(&self, params: &Params) -> Option<String> {
		let mut segments = Vec::new();
		self.reverse_into(params, &mut segments).ok()?;
		Some(format!("/{}", segments.join("/")))
	}
}

fn parse_segment(raw: &str) -> Result<Segment, PatternError> {
	if let Some(rest) = raw.strip_prefix(':') {
		let (name, optional) = match rest.strip_suffix('?') {
			Some(name) => (name, true),
			None => (rest, false),
		};
		let name = validate_name(name, raw)?;
		return Ok(if optional {
			Segment::Optional(name)
		} else {
			Segment::Named(name)
		});
	}

	if let Some(rest) = raw.strip_prefix('*') {
		if rest.ends_with('?') {
			return Err(PatternError::OptionalWildcard {
				segment: raw.to_string(),
			});
		}
		if rest.is_empty() {
			return Ok(Segment::Wildcard(None));
		}
		return Ok(Segment::Wildcard(Some(validate_name(rest, raw)?)));
	}

	Ok(Segment::Static(raw.to_string()))
}

fn validate_name(name: &str, raw: &str) -> Result<String, PatternError> {
	if name.is_empty() {
		return Err(PatternError::EmptyParameterName {
			segment: raw.to_string(),
		});
	}
	if !name
		.chars()
		.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
	{
		return Err(PatternError::InvalidParameterName {
			name: name.to_string(),
		});
	}
	Ok(name.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn params(pairs: &[(&str, &str)]) -> Params {
		pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect()
	}

	#[rstest]
	#[case("/")]
	#[case("/users")]
	#[case("/users/new")]
	#[case("/api/v1.0/status")]
	fn test_static_pattern_matches_itself(#[case] pattern: &str) {
		let matcher = Matcher::new(pattern).unwrap();
		assert!(matcher.is_static());
		assert_eq!(matcher.matches(pattern), Some(Params::new()));
	}

	#[rstest]
	fn test_trailing_slash_is_ignored() {
		let matcher = Matcher::new("/users/").unwrap();
		assert!(matcher.is_match("/users"));
		assert!(matcher.is_match("/users/"));
		assert!(!matcher.is_match("/users/42"));
	}

	#[rstest]
	fn test_named_params() {
		let matcher = Matcher::new("/:x/:y").unwrap();
		assert_eq!(matcher.matches("/a/b"), Some(params(&[("x", "a"), ("y", "b")])));
		assert_eq!(matcher.matches("/a"), None);
		assert_eq!(matcher.matches("/a/b/c"), None);
	}

	#[rstest]
	fn test_static_segments_are_literal() {
		let matcher = Matcher::new("/api/v1.0").unwrap();
		assert!(matcher.is_match("/api/v1.0"));
		assert!(!matcher.is_match("/api/v1X0"));
	}

	#[rstest]
	#[case("/files/a/b/c", Some("a/b/c"))]
	#[case("/files/a", Some("a"))]
	#[case("/files", None)]
	#[case("/files/", None)]
	fn test_named_wildcard(#[case] input: &str, #[case] expected: Option<&str>) {
		let matcher = Matcher::new("/files/*rest").unwrap();
		let found = matcher.matches(input);
		assert_eq!(
			found.as_ref().and_then(|p| p.get("rest")).map(String::as_str),
			expected
		);
	}

	#[rstest]
	#[case("/")]
	#[case("/anything")]
	#[case("/deeply/nested/path")]
	fn test_bare_wildcard_is_catch_all(#[case] input: &str) {
		let matcher = Matcher::new("*").unwrap();
		let found = matcher.match_segments(&split_path(input), false).unwrap();
		assert!(found.params.is_empty());
		assert_eq!(found.consumed, split_path(input).len());
		assert_eq!(found.wildcard.as_deref(), Some(input.trim_start_matches('/')));
	}

	#[rstest]
	#[case("/archive", &[])]
	#[case("/archive/2023", &[("year", "2023")])]
	#[case("/archive/2023/08", &[("year", "2023"), ("month", "08")])]
	fn test_optional_segments(#[case] input: &str, #[case] expected: &[(&str, &str)]) {
		let matcher = Matcher::new("/archive/:year?/:month?").unwrap();
		assert_eq!(matcher.matches(input), Some(params(expected)));
	}

	#[rstest]
	fn test_optional_segment_consumes_when_input_remains() {
		// Arrange
		let matcher = Matcher::new("/:lang?/about").unwrap();

		// Act & Assert
		assert_eq!(matcher.matches("/fr/about"), Some(params(&[("lang", "fr")])));
		assert_eq!(matcher.matches("/about"), None);
		assert_eq!(matcher.matches("/fr/contact"), None);
	}

	#[rstest]
	fn test_many_optionals_match_in_linear_time() {
		// Arrange: 22 optionals ahead of a static segment that never matches
		let pattern = format!(
			"{}/end",
			(0..22).map(|i| format!("/:o{}?", i)).collect::<String>()
		);
		let matcher = Matcher::new(&pattern).unwrap();
		let input = format!("/{}", vec!["x"; 22].join("/"));

		// Act
		let started = std::time::Instant::now();
		let found = matcher.matches(&input);

		// Assert
		assert_eq!(found, None);
		assert!(started.elapsed() < std::time::Duration::from_millis(50));
	}

	#[rstest]
	fn test_prefix_match_reports_consumed() {
		let matcher = Matcher::new("/users/:id").unwrap();
		let input = split_path("/users/42/posts/7");

		assert!(matcher.match_segments(&input, false).is_none());

		let found = matcher.match_segments(&input, true).unwrap();
		assert_eq!(found.consumed, 2);
		assert_eq!(found.params, params(&[("id", "42")]));
	}

	#[rstest]
	fn test_regex_filter_rejects_match() {
		// Arrange
		let filters = vec![("id".to_string(), MatchFilter::regex(r"^\d+$"))];
		let matcher = Matcher::compile("/users/:id", &filters, &RouterConfig::default()).unwrap();

		// Act & Assert
		assert!(matcher.is_match("/users/42"));
		assert!(!matcher.is_match("/users/abc"));
	}

	#[rstest]
	fn test_regex_filter_is_whole_string() {
		let filters = vec![("id".to_string(), MatchFilter::regex(r"\d+"))];
		let matcher = Matcher::compile("/users/:id", &filters, &RouterConfig::default()).unwrap();
		assert!(!matcher.is_match("/users/42abc"));
	}

	#[rstest]
	fn test_predicate_filter() {
		let filters = vec![(
			"slug".to_string(),
			MatchFilter::predicate(|value| value.len() <= 5),
		)];
		let matcher = Matcher::compile("/posts/:slug", &filters, &RouterConfig::default()).unwrap();
		assert!(matcher.is_match("/posts/hello"));
		assert!(!matcher.is_match("/posts/hello-world"));
	}

	#[rstest]
	fn test_filter_on_optional_rejects_route() {
		// Arrange
		let filters = vec![("year".to_string(), MatchFilter::regex(r"\d{4}"))];
		let matcher =
			Matcher::compile("/archive/:year?/:slug?", &filters, &RouterConfig::default()).unwrap();

		// Act & Assert: a skipped optional is not filtered
		assert!(matcher.is_match("/archive"));
		assert!(matcher.is_match("/archive/2023/launch"));
		// a rejected value is not retried as the next optional
		assert!(!matcher.is_match("/archive/latest"));
	}

	#[rstest]
	fn test_params_are_percent_decoded() {
		let matcher = Matcher::new("/tags/:tag").unwrap();
		assert_eq!(
			matcher.matches("/tags/rust%20lang"),
			Some(params(&[("tag", "rust lang")]))
		);
	}

	#[rstest]
	fn test_decoding_can_be_disabled() {
		let config = RouterConfig::default().with_decode_params(false);
		let matcher = Matcher::compile("/tags/:tag", &[], &config).unwrap();
		assert_eq!(
			matcher.matches("/tags/rust%20lang"),
			Some(params(&[("tag", "rust%20lang")]))
		);
	}

	#[rstest]
	#[case("/files/*rest/tail", PatternError::WildcardNotLast { segment: "*rest".to_string() })]
	#[case("/users/:", PatternError::EmptyParameterName { segment: ":".to_string() })]
	#[case("/users/:?", PatternError::EmptyParameterName { segment: ":?".to_string() })]
	#[case("/a/:id/b/:id", PatternError::DuplicateParameter { name: "id".to_string() })]
	#[case("/files/*rest?", PatternError::OptionalWildcard { segment: "*rest?".to_string() })]
	#[case("/users/:id.json", PatternError::InvalidParameterName { name: "id.json".to_string() })]
	fn test_malformed_patterns(#[case] pattern: &str, #[case] expected: PatternError) {
		assert_eq!(Matcher::new(pattern).unwrap_err(), expected);
	}

	#[rstest]
	fn test_pattern_rejects_excessive_length() {
		// Arrange: a pattern exceeding 1024 bytes
		let long_pattern = "/".to_string() + &"a".repeat(1025);

		// Act
		let result = Matcher::new(&long_pattern);

		// Assert
		assert!(matches!(result, Err(PatternError::TooLong { length: 1026, max: 1024 })));
	}

	#[rstest]
	fn test_pattern_rejects_excessive_segments() {
		let segments: Vec<&str> = (0..35).map(|_| "seg").collect();
		let pattern = format!("/{}/", segments.join("/"));

		let result = Matcher::new(&pattern);

		assert!(matches!(
			result,
			Err(PatternError::TooManySegments { count: 35, max: 32 })
		));
	}

	#[rstest]
	fn test_filter_for_unknown_parameter() {
		let filters = vec![("slug".to_string(), MatchFilter::regex("[a-z]+"))];
		let result = Matcher::compile("/users/:id", &filters, &RouterConfig::default());
		assert_eq!(
			result.unwrap_err(),
			PatternError::UnknownFilterParameter {
				name: "slug".to_string()
			}
		);
	}

	#[rstest]
	fn test_invalid_filter_regex() {
		let filters = vec![("id".to_string(), MatchFilter::regex("(unclosed"))];
		let result = Matcher::compile("/users/:id", &filters, &RouterConfig::default());
		assert!(matches!(result, Err(PatternError::InvalidFilter { name, .. }) if name == "id"));
	}

	#[rstest]
	fn test_param_names_in_order() {
		let matcher = Matcher::new("/a/:x/b/:y?/*z").unwrap();
		assert_eq!(matcher.param_names(), vec!["x", "y", "z"]);
		assert!(matcher.has_wildcard());
	}

	#[rstest]
	fn test_reverse() {
		let matcher = Matcher::new("/users/:id/archive/:year?/*rest").unwrap();

		assert_eq!(
			matcher.reverse(&params(&[("id", "42"), ("rest", "a/b")])),
			Some("/users/42/archive/a/b".to_string())
		);
		assert_eq!(
			matcher.reverse(&params(&[("id", "42"), ("year", "2023"), ("rest", "x")])),
			Some("/users/42/archive/2023/x".to_string())
		);
		assert_eq!(matcher.reverse(&params(&[("rest", "x")])), None);
	}

	#[rstest]
	fn test_reverse_encodes_values() {
		let matcher = Matcher::new("/tags/:tag").unwrap();
		assert_eq!(
			matcher.reverse(&params(&[("tag", "rust lang")])),
			Some("/tags/rust%20lang".to_string())
		);
	}

	#[rstest]
	fn test_pattern_display_and_equality() {
		let p1 = Matcher::new("/users/:id").unwrap();
		let p2 = Matcher::new("/users/:id").unwrap();
		let p3 = Matcher::new("/users/:user_id").unwrap();

		assert_eq!(p1.to_string(), "/users/:id");
		assert_eq!(p1, p2);
		assert_ne!(p1, p3);
	}
}
