//! Filter rules and the rule compiler.
//!
//! A [`FilterRule`] looks at one filter entry, claims the condition keys it
//! understands and turns them into a [`Filter`]. The [`RuleCompiler`] runs
//! every registered rule over an entry and refuses entries that still hold
//! unclaimed keys, so a misspelled condition fails loudly instead of being
//! ignored.

use crate::config::{RuleConfig, USE_KEY};
use crate::error::{Error, Result};
use crate::filter::{Filter, PatternMatcher, extension_id_matches, request_contains};
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Condition key of the built-in request rule.
pub const REQUEST_CONTAINS: &str = "ifRequestContains";

/// Condition key of the built-in result rule.
pub const EXTENSION_ID_MATCHES: &str = "ifExtensionIdMatches";

/// Compiles the condition keys it recognizes into a [`Filter`].
///
/// When a filter is produced, the rule removes the keys it consumed from
/// `remaining`. When the values are missing or of the wrong shape it returns
/// `Ok(None)` and leaves `remaining` alone, so the key ends up reported as an
/// unknown condition.
pub trait FilterRule: Send + Sync {
    fn build(
        &self,
        conditions: &RuleConfig,
        remaining: &mut BTreeSet<String>,
    ) -> Result<Option<Filter>>;
}

type ConditionFactory = dyn Fn(&Value) -> Result<Option<Filter>> + Send + Sync;

/// A rule driven by a single condition key.
#[derive(Clone)]
pub struct ConditionRule {
    key: &'static str,
    factory: Arc<ConditionFactory>,
}

impl ConditionRule {
    pub fn new(
        key: &'static str,
        factory: impl Fn(&Value) -> Result<Option<Filter>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            key,
            factory: Arc::new(factory),
        }
    }

    /// `ifRequestContains: <pattern>`
    pub fn request_contains() -> Self {
        Self::new(REQUEST_CONTAINS, |value| {
            pattern(REQUEST_CONTAINS, value).map(|matcher| matcher.map(request_contains))
        })
    }

    /// `ifExtensionIdMatches: <pattern>`
    pub fn extension_id_matches() -> Self {
        Self::new(EXTENSION_ID_MATCHES, |value| {
            pattern(EXTENSION_ID_MATCHES, value).map(|matcher| matcher.map(extension_id_matches))
        })
    }
}

impl FilterRule for ConditionRule {
    fn build(
        &self,
        conditions: &RuleConfig,
        remaining: &mut BTreeSet<String>,
    ) -> Result<Option<Filter>> {
        let Some(value) = conditions.get(self.key) else {
            return Ok(None);
        };
        let filter = (self.factory)(value)?;
        if filter.is_some() {
            remaining.remove(self.key);
        }
        Ok(filter)
    }
}

/// Non-string values decline; strings must be valid patterns.
fn pattern(key: &str, value: &Value) -> Result<Option<PatternMatcher>> {
    let Value::String(source) = value else {
        return Ok(None);
    };
    PatternMatcher::new(source)
        .map(Some)
        .map_err(|source| Error::InvalidPattern {
            key: key.to_string(),
            source,
        })
}

/// Rules registered for each filter stage, in evaluation order.
#[derive(Clone, Default)]
pub struct RouterRules {
    pub requests: Vec<Arc<dyn FilterRule>>,
    pub results: Vec<Arc<dyn FilterRule>>,
}

impl RouterRules {
    /// No rules at all; every condition is unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// `ifRequestContains` for requests and `ifExtensionIdMatches` for results.
    pub fn builtin() -> Self {
        Self::new()
            .with_request_rule(ConditionRule::request_contains())
            .with_result_rule(ConditionRule::extension_id_matches())
    }

    pub fn with_request_rule(mut self, rule: impl FilterRule + 'static) -> Self {
        self.requests.push(Arc::new(rule));
        self
    }

    pub fn with_result_rule(mut self, rule: impl FilterRule + 'static) -> Self {
        self.results.push(Arc::new(rule));
        self
    }
}

/// Runs a list of rules over filter entries.
pub struct RuleCompiler<'a> {
    rules: &'a [Arc<dyn FilterRule>],
}

impl<'a> RuleCompiler<'a> {
    pub fn new(rules: &'a [Arc<dyn FilterRule>]) -> Self {
        Self { rules }
    }

    /// Compile one entry into the filters its conditions describe.
    ///
    /// Every rule sees the full entry; filters come back in rule order. Each
    /// condition key other than `use` must be claimed by exactly one rule.
    pub fn compile(&self, conditions: &RuleConfig) -> Result<Vec<Filter>> {
        let keys: BTreeSet<String> = conditions
            .keys()
            .filter(|key| key.as_str() != USE_KEY)
            .cloned()
            .collect();

        let mut claimed = BTreeSet::new();
        let mut filters = Vec::new();

        for rule in self.rules {
            let mut remaining = keys.clone();
            let Some(filter) = rule.build(conditions, &mut remaining)? else {
                continue;
            };
            for key in keys.difference(&remaining) {
                if !claimed.insert(key.clone()) {
                    return Err(Error::ConditionClaimedTwice { key: key.clone() });
                }
            }
            filters.push(filter);
        }

        let unknown: Vec<String> = keys.difference(&claimed).cloned().collect();
        if !unknown.is_empty() {
            return Err(Error::UnknownConditions { keys: unknown });
        }
        Ok(filters)
    }
}
