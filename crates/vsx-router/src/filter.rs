//! Compiled filters.
//!
//! A [`Filter`] carries up to three hooks, one per evaluation point:
//!
//! - query options, before a `query` is dispatched
//! - search options, before a `search` is dispatched
//! - a single extension, after a registry has answered
//!
//! A missing hook is reported as `None` so the router can tell "this filter
//! has nothing to say about this call" apart from "this filter rejects it".

use regex::{Regex, RegexBuilder};
use std::fmt;
use vsx_registry::{Extension, QueryOptions, SearchOptions};

type QueryHook = Box<dyn Fn(&QueryOptions) -> bool + Send + Sync>;
type SearchHook = Box<dyn Fn(&SearchOptions) -> bool + Send + Sync>;
type ExtensionHook = Box<dyn Fn(&Extension) -> bool + Send + Sync>;

/// A predicate with optional per-stage hooks.
#[derive(Default)]
pub struct Filter {
    query_options: Option<QueryHook>,
    search_options: Option<SearchHook>,
    extension: Option<ExtensionHook>,
}

impl Filter {
    /// A filter with no hooks at all.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_query_options(
        mut self,
        hook: impl Fn(&QueryOptions) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.query_options = Some(Box::new(hook));
        self
    }

    pub fn on_search_options(
        mut self,
        hook: impl Fn(&SearchOptions) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.search_options = Some(Box::new(hook));
        self
    }

    pub fn on_extension(mut self, hook: impl Fn(&Extension) -> bool + Send + Sync + 'static) -> Self {
        self.extension = Some(Box::new(hook));
        self
    }

    /// Verdict for query options, `None` if the filter has no query hook.
    pub fn filter_query_options(&self, options: &QueryOptions) -> Option<bool> {
        self.query_options.as_ref().map(|hook| hook(options))
    }

    /// Verdict for search options, `None` if the filter has no search hook.
    pub fn filter_search_options(&self, options: &SearchOptions) -> Option<bool> {
        self.search_options.as_ref().map(|hook| hook(options))
    }

    /// Verdict for a fetched extension, `None` if the filter has no extension hook.
    pub fn filter_extension(&self, extension: &Extension) -> Option<bool> {
        self.extension.as_ref().map(|hook| hook(extension))
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("query_options", &self.query_options.is_some())
            .field("search_options", &self.search_options.is_some())
            .field("extension", &self.extension.is_some())
            .finish()
    }
}

/// Case-insensitive regular expression shared by the pattern-based filters.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    regex: Regex,
}

impl PatternMatcher {
    pub fn new(source: &str) -> std::result::Result<Self, regex::Error> {
        let regex = RegexBuilder::new(source).case_insensitive(true).build()?;
        Ok(Self { regex })
    }

    /// Absent values never match.
    pub fn test(&self, value: Option<&str>) -> bool {
        value.is_some_and(|value| self.regex.is_match(value))
    }
}

/// Passes requests whose text mentions the pattern.
///
/// Search options match on `query` or `category`; query options match on any
/// field that is set. Options that set none of these fields never match.
pub fn request_contains(matcher: PatternMatcher) -> Filter {
    let search = matcher.clone();
    Filter::new()
        .on_search_options(move |options| {
            search.test(options.query.as_deref()) || search.test(options.category.as_deref())
        })
        .on_query_options(move |options| options.values().any(|value| matcher.test(Some(value))))
}

/// Passes extensions whose `namespace.name` id matches the pattern.
pub fn extension_id_matches(matcher: PatternMatcher) -> Filter {
    Filter::new().on_extension(move |extension| matcher.test(Some(&extension.id())))
}
