// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Regex lookup over a [`SearchIndex`].

use regex::{Regex, RegexBuilder};
use thiserror::Error;
use tracing::warn;

use crate::model::{NodeId, SearchIndex, SearchRecord};

/// Attribute names a [`SearchRecord`] answers to.
pub const SEARCHABLE_ATTRIBUTES: [&str; 2] = ["name", "description"];

/// Search failure.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The query is not a valid regular expression.
    #[error("invalid search pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// Query as typed.
        pattern: String,
        /// Regex compile error.
        #[source]
        source: regex::Error,
    },
}

/// Ids of records where any requested attribute matches `query`.
///
/// The query is used as a case-insensitive, unanchored regex with no escaping.
/// An empty query matches nothing. Results keep index order.
pub fn search<S: AsRef<str>>(
    index: &SearchIndex,
    query: &str,
    attributes: &[S],
) -> Result<Vec<NodeId>, SearchError> {
    if query.is_empty() {
        return Ok(Vec::new());
    }
    let re = compile(query)?;
    Ok(index
        .records()
        .iter()
        .filter(|record| matches_any(record, &re, attributes))
        .map(|record| record.id)
        .collect())
}

fn compile(query: &str) -> Result<Regex, SearchError> {
    RegexBuilder::new(query)
        .case_insensitive(true)
        .build()
        .map_err(|source| {
            warn!(pattern = query, "rejected search pattern");
            SearchError::InvalidPattern {
                pattern: query.to_owned(),
                source,
            }
        })
}

fn matches_any<S: AsRef<str>>(record: &SearchRecord, re: &Regex, attributes: &[S]) -> bool {
    attributes
        .iter()
        .filter_map(|attr| record.attribute(attr.as_ref()))
        .any(|text| re.is_match(text))
}

impl SearchIndex {
    /// See [`search`].
    pub fn search<S: AsRef<str>>(
        &self,
        query: &str,
        attributes: &[S],
    ) -> Result<Vec<NodeId>, SearchError> {
        search(self, query, attributes)
    }
}
