//! Error types for client-side routing.
//!
//! Only configuration problems (malformed route patterns, bad filters,
//! duplicate route names) are fail-fast. Unmatched paths and guard vetoes
//! are ordinary outcomes and never surface as errors.

use thiserror::Error;

/// A route pattern that cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
	/// A wildcard segment appears before the end of the pattern.
	#[error("wildcard segment '{segment}' must be the last segment of the pattern")]
	WildcardNotLast {
		/// The offending segment.
		segment: String,
	},
	/// A `:` or `:?` segment without a name.
	#[error("parameter segment '{segment}' has an empty name")]
	EmptyParameterName {
		/// The offending segment.
		segment: String,
	},
	/// A parameter name containing characters outside `[A-Za-z0-9_-]`.
	#[error("parameter name '{name}' contains invalid characters")]
	InvalidParameterName {
		/// The offending name.
		name: String,
	},
	/// The same parameter name is captured twice in one pattern.
	#[error("parameter '{name}' is declared more than once")]
	DuplicateParameter {
		/// The duplicated name.
		name: String,
	},
	/// Wildcards cannot be optional (`*rest?`).
	#[error("wildcard segment '{segment}' cannot be optional")]
	OptionalWildcard {
		/// The offending segment.
		segment: String,
	},
	/// Pattern exceeds the configured maximum length.
	#[error("pattern length {length} exceeds maximum allowed length of {max} bytes")]
	TooLong {
		/// Pattern length in bytes.
		length: usize,
		/// Configured maximum.
		max: usize,
	},
	/// Pattern exceeds the configured maximum number of segments.
	#[error("pattern has {count} path segments, exceeding maximum of {max}")]
	TooManySegments {
		/// Number of segments.
		count: usize,
		/// Configured maximum.
		max: usize,
	},
	/// A filter was registered for a parameter the pattern never captures.
	#[error("filter registered for unknown parameter '{name}'")]
	UnknownFilterParameter {
		/// The parameter name the filter refers to.
		name: String,
	},
	/// A string filter is not a valid regular expression.
	#[error("filter for parameter '{name}' is not a valid regex: {message}")]
	InvalidFilter {
		/// The parameter name the filter refers to.
		name: String,
		/// Message reported by the regex compiler.
		message: String,
	},
}

/// Error type for router operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
	/// A registered route pattern failed to compile.
	#[error("invalid route pattern '{pattern}': {source}")]
	InvalidPattern {
		/// The pattern as written at registration.
		pattern: String,
		/// Why it was rejected.
		#[source]
		source: PatternError,
	},
	/// Two routes were registered under the same name.
	#[error("route name '{0}' is registered more than once")]
	DuplicateRouteName(String),
	/// Invalid route name.
	#[error("invalid route name: {0}")]
	InvalidRouteName(String),
	/// Missing parameter for reverse URL.
	#[error("missing parameter for route '{0}'")]
	MissingParameter(String),
	/// Navigation failed.
	#[error("navigation failed: {0}")]
	NavigationFailed(String),
	/// Navigations raised from subscribers or guards kept chaining.
	#[error("navigation aborted after {limit} chained navigations")]
	NavigationLoop {
		/// The configured limit that was exceeded.
		limit: usize,
	},
	/// The router has been disposed.
	#[error("router has been disposed")]
	Disposed,
}

/// Error returned by a history binding that refuses an entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
	/// The binding has no room for more entries.
	#[error("history quota exceeded ({limit} entries)")]
	QuotaExceeded {
		/// Maximum number of entries the binding accepts.
		limit: usize,
	},
	/// The binding rejected the entry for another reason.
	#[error("history entry rejected: {0}")]
	Rejected(String),
}

/// A route view that could not produce usable output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RenderError {
	message: String,
}

impl RenderError {
	/// Creates a render error with the given message.
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}

	/// Returns the error message.
	pub fn message(&self) -> &str {
		&self.message
	}
}

impl From<String> for RenderError {
	fn from(message: String) -> Self {
		Self::new(message)
	}
}

impl From<&str> for RenderError {
	fn from(message: &str) -> Self {
		Self::new(message)
	}
}
