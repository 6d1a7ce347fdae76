//! Site dictionary: the two-level `site → code → weight` JSON document.
//!
//! ```json
//! { "SARA-MATRIX_VHIMEM": { "1201": 12, "1305": 3 }, "BNL": { "404": 1 } }
//! ```
//!
//! The dictionary is loaded once; a run then looks up a single site and hands
//! its [`CodeWeightMap`] to the distribution builder.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::distribution::CodeWeightMap;

/// Errors from loading the dictionary or looking up a site.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse site dictionary: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("site not found: {site} (available: {})", available.join(", "))]
    SiteNotFound { site: String, available: Vec<String> },
}

/// All sites and their code weights, ordered by site name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteDictionary {
    sites: BTreeMap<String, CodeWeightMap>,
}

impl SiteDictionary {
    pub fn from_json_str(json: &str) -> Result<Self, SiteError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SiteError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SiteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Code weights for one site.
    pub fn site(&self, name: &str) -> Result<&CodeWeightMap, SiteError> {
        self.sites.get(name).ok_or_else(|| SiteError::SiteNotFound {
            site: name.to_string(),
            available: self.sites.keys().cloned().collect(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sites.contains_key(name)
    }

    /// Site names in ascending order.
    pub fn site_names(&self) -> impl Iterator<Item = &str> {
        self.sites.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn insert(&mut self, site: impl Into<String>, codes: CodeWeightMap) {
        self.sites.insert(site.into(), codes);
    }
}

impl FromIterator<(String, CodeWeightMap)> for SiteDictionary {
    fn from_iter<T: IntoIterator<Item = (String, CodeWeightMap)>>(iter: T) -> Self {
        Self {
            sites: iter.into_iter().collect(),
        }
    }
}
