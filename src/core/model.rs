//! Profile record model and the immutable in-memory store.
//!
//! Records arrive from the remote API as camelCase JSON. Every attribute a
//! profile page may lack is an `Option` — scraped data is ragged and a
//! missing field must never abort deserialization of the whole batch.

use indexmap::IndexSet;
use serde::Deserialize;

/// One impersonation-profile entry as returned by the API.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Opaque identifier, unique within a fetch batch.
    #[serde(default)]
    pub id: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub url: Option<String>,
    /// Categorical label: which monitored term surfaced this profile.
    pub search_term: Option<String>,
    /// Profile type (e.g. "personal", "page").
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Platform the profile was found on.
    pub source: Option<String>,
    /// ISO-8601 timestamp of first discovery.
    pub created_at: Option<String>,
    #[serde(rename = "screenshotURL")]
    pub screenshot_url: Option<String>,
    pub last_screenshot: Option<String>,
}

/// Payload shape of the profile endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemsResponse {
    pub items: Vec<Profile>,
}

/// Fixed ordered sequence of profiles, immutable once loaded.
///
/// Derived views (filtered list, page window, aggregates) are recomputed
/// from this store; nothing mutates it after construction.
#[derive(Debug, Default)]
pub struct ProfileStore {
    profiles: Vec<Profile>,
}

impl ProfileStore {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Distinct search terms in first-occurrence order, blanks skipped.
    /// Feeds the term-picker checkbox modal.
    pub fn distinct_search_terms(&self) -> Vec<String> {
        let set: IndexSet<&str> = self
            .profiles
            .iter()
            .filter_map(|p| p.search_term.as_deref())
            .filter(|t| !t.is_empty())
            .collect();
        set.into_iter().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(term: Option<&str>) -> Profile {
        Profile {
            search_term: term.map(str::to_string),
            ..Profile::default()
        }
    }

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "id": "p-1",
            "name": "Alice Example",
            "bio": "Definitely the real one",
            "url": "https://example.com/alice",
            "searchTerm": "alice",
            "type": "personal",
            "source": "friendster",
            "createdAt": "2024-01-01T00:00:00Z",
            "screenshotURL": "https://cdn.example.com/shots/p-1.png",
            "lastScreenshot": "2024-01-05T09:30:00Z"
        }"#;
        let p: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, "p-1");
        assert_eq!(p.search_term.as_deref(), Some("alice"));
        assert_eq!(p.kind.as_deref(), Some("personal"));
        assert_eq!(p.created_at.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(
            p.screenshot_url.as_deref(),
            Some("https://cdn.example.com/shots/p-1.png")
        );
        assert_eq!(p.last_screenshot.as_deref(), Some("2024-01-05T09:30:00Z"));
    }

    #[test]
    fn test_deserialize_sparse_record() {
        // Everything but the URL missing — must not error.
        let p: Profile = serde_json::from_str(r#"{"url": "https://x.test"}"#).unwrap();
        assert!(p.name.is_none());
        assert!(p.search_term.is_none());
        assert!(p.created_at.is_none());
        assert_eq!(p.id, "");
    }

    #[test]
    fn test_items_response() {
        let json = r#"{"items": [{"id": "a"}, {"id": "b"}]}"#;
        let resp: ItemsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.items.len(), 2);
        assert_eq!(resp.items[1].id, "b");
    }

    #[test]
    fn test_distinct_terms_first_occurrence_order() {
        let store = ProfileStore::new(vec![
            profile(Some("bob")),
            profile(Some("alice")),
            profile(Some("bob")),
            profile(None),
            profile(Some("")),
            profile(Some("carol")),
        ]);
        assert_eq!(store.distinct_search_terms(), vec!["bob", "alice", "carol"]);
    }

    #[test]
    fn test_empty_store() {
        let store = ProfileStore::default();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.distinct_search_terms().is_empty());
    }
}
