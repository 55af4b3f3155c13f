//! Endpoint descriptors and query construction
//!
//! Each API operation is described by a constant [`Endpoint`] (verb, path,
//! identifier policy). The operations themselves only gather their options
//! into a [`Query`]; resolving identifiers, validating them and assembling
//! the final URL happens here, once, for all endpoints.

use crate::error::{BetaSeriesError, Result};
use crate::transport::HttpMethod;
use url::Url;

/// How an endpoint picks the identifier it sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IdPolicy {
    /// No show identifier involved.
    None,
    /// Local ID if positive, else TheTVDB ID if positive.
    LocalOrTvdb,
    /// Like `LocalOrTvdb`, falling back to a non-empty IMDb ID.
    LocalTvdbOrImdb,
    /// Exactly one of local ID / TheTVDB ID may be positive.
    Exclusive,
}

/// Static description of one API operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Endpoint {
    pub method: HttpMethod,
    pub path: &'static str,
    pub ids: IdPolicy,
}

impl Endpoint {
    pub const fn new(method: HttpMethod, path: &'static str, ids: IdPolicy) -> Self {
        Self { method, path, ids }
    }

    /// Resolves `lookup` per this endpoint's policy and writes the chosen
    /// identifier first into a fresh query.
    pub fn query_for(&self, lookup: &ShowLookup) -> Result<Query> {
        let mut query = Query::new();
        match self.ids {
            IdPolicy::None => {}
            IdPolicy::LocalOrTvdb => {
                if lookup.id > 0 {
                    query.set("id", lookup.id);
                } else if lookup.thetvdb_id > 0 {
                    query.set("thetvdb_id", lookup.thetvdb_id);
                } else {
                    return Err(BetaSeriesError::IdNotSet);
                }
            }
            IdPolicy::LocalTvdbOrImdb => {
                if lookup.id > 0 {
                    query.set("id", lookup.id);
                } else if lookup.thetvdb_id > 0 {
                    query.set("thetvdb_id", lookup.thetvdb_id);
                } else if !lookup.imdb_id.is_empty() {
                    query.set("imdb_id", &lookup.imdb_id);
                } else {
                    return Err(BetaSeriesError::IdNotSet);
                }
            }
            IdPolicy::Exclusive => match (lookup.id > 0, lookup.thetvdb_id > 0) {
                (true, true) => return Err(BetaSeriesError::NoSingleIdUsed),
                (true, false) => {
                    query.set("id", lookup.id);
                }
                (false, true) => {
                    query.set("thetvdb_id", lookup.thetvdb_id);
                }
                (false, false) => return Err(BetaSeriesError::IdNotSet),
            },
        }
        Ok(query)
    }

    /// Joins this endpoint's path onto `base` and appends `query`.
    pub fn url(&self, base: &Url, query: &Query) -> Url {
        let mut url = base.clone();
        url.set_path(&format!("{}{}", base.path().trim_end_matches('/'), self.path));
        if query.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut()
                .clear()
                .extend_pairs(query.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        url
    }
}

/// Identifies a show by any of the keys the service accepts.
///
/// Non-positive numbers and an empty IMDb ID count as "not set". Which key is
/// actually sent depends on the endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowLookup {
    /// BetaSeries' own show ID
    pub id: i64,
    /// TheTVDB cross-reference ID
    pub thetvdb_id: i64,
    /// IMDb cross-reference ID, e.g. `tt0411008`
    pub imdb_id: String,
}

impl ShowLookup {
    /// Builds a lookup from all three identifiers at once.
    pub fn new(id: i64, thetvdb_id: i64, imdb_id: impl Into<String>) -> Self {
        Self {
            id,
            thetvdb_id,
            imdb_id: imdb_id.into(),
        }
    }

    /// Looks the show up by its BetaSeries ID.
    pub fn by_id(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Looks the show up by its TheTVDB ID.
    pub fn by_thetvdb_id(thetvdb_id: i64) -> Self {
        Self {
            thetvdb_id,
            ..Self::default()
        }
    }

    /// Looks the show up by its IMDb ID.
    pub fn by_imdb_id(imdb_id: impl Into<String>) -> Self {
        Self {
            imdb_id: imdb_id.into(),
            ..Self::default()
        }
    }
}

/// Ordered list of query parameters.
///
/// Parameters are emitted in insertion order; setting a key twice replaces
/// the earlier value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set(&mut self, key: &str, value: impl ToString) -> &mut Self {
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key.to_string(), value)),
        }
        self
    }

    /// Adds the value only when it is strictly positive.
    pub fn positive(&mut self, key: &str, value: Option<i64>) -> &mut Self {
        if let Some(v) = value.filter(|v| *v > 0) {
            self.set(key, v);
        }
        self
    }

    /// Adds the value when present and not negative; zero is sent as is.
    pub fn non_negative(&mut self, key: &str, value: Option<i64>) -> &mut Self {
        if let Some(v) = value.filter(|v| *v >= 0) {
            self.set(key, v);
        }
        self
    }

    /// Adds the value unless it is empty.
    pub fn non_empty(&mut self, key: &str, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.set(key, value);
        }
        self
    }

    /// Adds `key=true` when `enabled`; nothing otherwise.
    pub fn flag(&mut self, key: &str, enabled: bool) -> &mut Self {
        if enabled {
            self.set(key, "true");
        }
        self
    }

    /// Adds `value` if it is one of `allowed`, `default` otherwise.
    pub fn choice(&mut self, key: &str, value: &str, allowed: &[&str], default: &str) -> &mut Self {
        if allowed.contains(&value) {
            self.set(key, value)
        } else {
            self.set(key, default)
        }
    }
}
