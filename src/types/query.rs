//! Lookup references and cache key construction.

use serde::{Deserialize, Serialize};

/// Which upstream resource a search hit or lookup refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    Release,
    Master,
    /// Caller did not say; the lookup tries both resource kinds.
    #[default]
    #[serde(other)]
    Unknown,
}

impl ResultType {
    /// Parse a caller-supplied type string; anything else is unknown.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "release" => ResultType::Release,
            "master" => ResultType::Master,
            _ => ResultType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResultType::Release => "release",
            ResultType::Master => "master",
            ResultType::Unknown => "",
        }
    }
}

/// Identifies a release-detail lookup: release id, master id, or both,
/// with an optional hint about which kind the ids refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReleaseRef {
    pub id: Option<u64>,
    pub master_id: Option<u64>,
    pub result_type: ResultType,
}

impl ReleaseRef {
    /// Reference a specific release by id.
    pub fn release(id: u64) -> Self {
        Self {
            id: Some(id),
            master_id: None,
            result_type: ResultType::Release,
        }
    }

    /// Reference a master by id.
    pub fn master(master_id: u64) -> Self {
        Self {
            id: None,
            master_id: Some(master_id),
            result_type: ResultType::Master,
        }
    }

    /// Whether the reference carries no id at all.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.master_id.is_none()
    }

    /// Cache key for detail lookups.
    pub fn cache_key(&self) -> String {
        format!(
            "id:{}|master:{}|type:{}",
            fmt_id(self.id),
            fmt_id(self.master_id),
            self.result_type.as_str(),
        )
    }

    /// Cache key for artist-name lookups (type hint irrelevant there).
    pub fn artist_cache_key(&self) -> String {
        format!("id:{}|master:{}", fmt_id(self.id), fmt_id(self.master_id))
    }
}

fn fmt_id(id: Option<u64>) -> String {
    id.map(|v| v.to_string()).unwrap_or_default()
}
