//! Typed `$ref` pointers from the ESPN core API.

use serde::{Deserialize, Deserializer};
use std::fmt;
use url::Url;

use crate::espn::fetcher::ReferenceFetcher;

/// A pointer-style payload fragment: `{"$ref": "<url>"}`.
///
/// The URL is both the thing to dereference and, through its trailing path
/// segment, the identity of the object it points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    url: Url,
}

impl Reference {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        Url::parse(raw).map(Self::new)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Identifier of the referenced object: the final path segment, query dropped.
    ///
    /// `.../athletes/12345?lang=en` yields `"12345"`. Returned verbatim, never
    /// parsed as a number, so leading zeros survive.
    pub fn id(&self) -> &str {
        self.url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
    }

    /// Dereference this pointer, logging and swallowing any failure.
    pub async fn resolve<T>(&self, fetcher: &ReferenceFetcher) -> Option<T>
    where
        T: serde::de::DeserializeOwned,
    {
        fetcher.fetch(&self.url).await
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

impl<'de> Deserialize<'de> for Reference {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(rename = "$ref")]
            url: String,
        }

        let raw = Raw::deserialize(deserializer)?;
        Reference::parse(&raw.url).map_err(|e| {
            serde::de::Error::custom(format_args!("invalid $ref url {:?}: {e}", raw.url))
        })
    }
}

/// Identifier carried by a raw reference string, for payloads whose `$ref`
/// is not a well-formed URL.
///
/// Mirrors [`Reference::id`]: last `/` segment, anything after `?` dropped.
pub fn id_from_raw(raw: &str) -> &str {
    let last = raw.rsplit('/').next().unwrap_or_default();
    last.split(['?', '#']).next().unwrap_or_default()
}
