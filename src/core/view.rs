//! Filter/Sort engine for the profile table.
//!
//! Pure functions: the full record sequence plus the current criteria and
//! sort key produce an ordered subsequence. Nothing here mutates the store;
//! the table view recomputes this on every criteria or sort change.

use super::model::Profile;

// ── Filter criteria ────────────────────────────────────────────────────────

/// Per-field constraints narrowing the visible record set.
///
/// Fields combine conjunctively (AND). Within `search_terms` the selected
/// terms combine disjunctively (OR), each matched case-insensitively as a
/// substring of the record's search term. An empty constraint is inactive
/// and imposes no restriction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub search_terms: Vec<String>,
    pub name: String,
    pub bio: String,
    pub url: String,
    pub created_at: String,
}

impl FilterCriteria {
    /// Whether any constraint is active.
    pub fn is_active(&self) -> bool {
        !self.search_terms.is_empty()
            || !self.name.is_empty()
            || !self.bio.is_empty()
            || !self.url.is_empty()
            || !self.created_at.is_empty()
    }

    /// Toggle a term in the selected set.
    pub fn toggle_term(&mut self, term: &str) {
        if let Some(pos) = self.search_terms.iter().position(|t| t == term) {
            self.search_terms.remove(pos);
        } else {
            self.search_terms.push(term.to_string());
        }
    }

    /// Whether a single profile satisfies every active constraint.
    ///
    /// A record missing a field on a constrained dimension is excluded:
    /// a substring can never match an absent value.
    pub fn matches(&self, profile: &Profile) -> bool {
        let term_ok = self.search_terms.is_empty()
            || self
                .search_terms
                .iter()
                .any(|t| contains_ci(profile.search_term.as_deref(), t));

        term_ok
            && field_ok(profile.name.as_deref(), &self.name)
            && field_ok(profile.bio.as_deref(), &self.bio)
            && field_ok(profile.url.as_deref(), &self.url)
            && field_ok(profile.created_at.as_deref(), &self.created_at)
    }
}

fn field_ok(value: Option<&str>, constraint: &str) -> bool {
    constraint.is_empty() || contains_ci(value, constraint)
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    match haystack {
        Some(h) => h.to_lowercase().contains(&needle.to_lowercase()),
        None => false,
    }
}

// ── Sort key ───────────────────────────────────────────────────────────────

/// Sortable table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    SearchTerm,
    Name,
    Bio,
    Url,
    CreatedAt,
}

impl SortField {
    pub const ALL: [SortField; 5] = [
        SortField::SearchTerm,
        SortField::Name,
        SortField::Bio,
        SortField::Url,
        SortField::CreatedAt,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortField::SearchTerm => "Search Term",
            SortField::Name => "Name",
            SortField::Bio => "Bio",
            SortField::Url => "URL",
            SortField::CreatedAt => "Found",
        }
    }

    fn value(self, profile: &Profile) -> Option<&str> {
        match self {
            SortField::SearchTerm => profile.search_term.as_deref(),
            SortField::Name => profile.name.as_deref(),
            SortField::Bio => profile.bio.as_deref(),
            SortField::Url => profile.url.as_deref(),
            SortField::CreatedAt => profile.created_at.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortOrder::Asc => "↑",
            SortOrder::Desc => "↓",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub order: SortOrder,
}

// ── Engine ─────────────────────────────────────────────────────────────────

/// Filter then stable-sort the record sequence.
///
/// String lexical comparison throughout; ISO-8601 timestamps therefore sort
/// chronologically. Records missing the sort field compare equal to
/// everything: they keep their positions while the remaining records sort
/// stably around them. With no sort key the filter order (which preserves
/// input order) is returned as-is.
pub fn apply<'a>(
    profiles: &'a [Profile],
    criteria: &FilterCriteria,
    sort: Option<SortKey>,
) -> Vec<&'a Profile> {
    let filtered: Vec<&Profile> = profiles.iter().filter(|p| criteria.matches(p)).collect();

    match sort {
        Some(key) => sort_rows(filtered, key),
        None => filtered,
    }
}

/// Stable sort that leaves rows without the sort field in place.
///
/// A comparator treating `None` as equal to everything is not a total
/// order, so the keyed rows are sorted separately and written back into
/// the slots the keyed rows originally occupied.
fn sort_rows<'a>(rows: Vec<&'a Profile>, key: SortKey) -> Vec<&'a Profile> {
    let mut keyed: Vec<&Profile> = rows
        .iter()
        .copied()
        .filter(|p| key.field.value(p).is_some())
        .collect();

    keyed.sort_by(|a, b| {
        let av = key.field.value(a).unwrap_or("");
        let bv = key.field.value(b).unwrap_or("");
        match key.order {
            SortOrder::Asc => av.cmp(bv),
            SortOrder::Desc => bv.cmp(av),
        }
    });

    let mut keyed = keyed.into_iter();
    rows.iter()
        .map(|&row| {
            if key.field.value(row).is_some() {
                keyed.next().unwrap_or(row)
            } else {
                row
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(term: &str, name: &str, created: &str) -> Profile {
        Profile {
            search_term: Some(term.to_string()),
            name: Some(name.to_string()),
            created_at: Some(created.to_string()),
            ..Profile::default()
        }
    }

    fn fixture() -> Vec<Profile> {
        vec![
            profile("alice", "Alice A", "2024-01-01T00:00:00Z"),
            profile("bob", "Bob B", "2024-01-01T12:00:00Z"),
            profile("alice", "Alice C", "2024-01-02T00:00:00Z"),
        ]
    }

    #[test]
    fn test_no_criteria_passes_everything() {
        let profiles = fixture();
        let out = apply(&profiles, &FilterCriteria::default(), None);
        assert_eq!(out.len(), 3);
        // Input order preserved.
        assert_eq!(out[0].name.as_deref(), Some("Alice A"));
        assert_eq!(out[2].name.as_deref(), Some("Alice C"));
    }

    #[test]
    fn test_output_is_subsequence_satisfying_criteria() {
        let profiles = fixture();
        let criteria = FilterCriteria {
            search_terms: vec!["alice".to_string()],
            ..FilterCriteria::default()
        };
        let out = apply(&profiles, &criteria, None);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|p| criteria.matches(p)));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let profiles = fixture();
        let criteria = FilterCriteria {
            name: "alice".to_string(),
            ..FilterCriteria::default()
        };
        let once: Vec<Profile> = apply(&profiles, &criteria, None)
            .into_iter()
            .cloned()
            .collect();
        let twice = apply(&once, &criteria, None);
        assert_eq!(twice.len(), once.len());
    }

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let profiles = fixture();
        let criteria = FilterCriteria {
            name: "ALICE".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(apply(&profiles, &criteria, None).len(), 2);
    }

    #[test]
    fn test_term_filter_or_semantics() {
        let profiles = fixture();
        let criteria = FilterCriteria {
            search_terms: vec!["alice".to_string(), "bob".to_string()],
            ..FilterCriteria::default()
        };
        assert_eq!(apply(&profiles, &criteria, None).len(), 3);
    }

    #[test]
    fn test_fields_combine_conjunctively() {
        let profiles = fixture();
        let criteria = FilterCriteria {
            search_terms: vec!["alice".to_string()],
            created_at: "2024-01-02".to_string(),
            ..FilterCriteria::default()
        };
        let out = apply(&profiles, &criteria, None);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name.as_deref(), Some("Alice C"));
    }

    #[test]
    fn test_missing_field_excluded_when_constrained() {
        let mut profiles = fixture();
        profiles.push(Profile::default()); // no name at all
        let criteria = FilterCriteria {
            name: "a".to_string(),
            ..FilterCriteria::default()
        };
        let out = apply(&profiles, &criteria, None);
        assert!(out.iter().all(|p| p.name.is_some()));
    }

    #[test]
    fn test_toggle_term() {
        let mut criteria = FilterCriteria::default();
        criteria.toggle_term("alice");
        assert_eq!(criteria.search_terms, vec!["alice"]);
        criteria.toggle_term("alice");
        assert!(criteria.search_terms.is_empty());
    }

    #[test]
    fn test_sort_created_at_desc_scenario() {
        // term=alice filtered, then sorted by createdAt descending
        let profiles = fixture();
        let criteria = FilterCriteria {
            search_terms: vec!["alice".to_string()],
            ..FilterCriteria::default()
        };
        let out = apply(
            &profiles,
            &criteria,
            Some(SortKey {
                field: SortField::CreatedAt,
                order: SortOrder::Desc,
            }),
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].created_at.as_deref(), Some("2024-01-02T00:00:00Z"));
        assert_eq!(out[1].created_at.as_deref(), Some("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let profiles = vec![
            profile("alice", "First", "2024-01-01T00:00:00Z"),
            profile("alice", "Second", "2024-01-01T00:00:00Z"),
        ];
        let out = apply(
            &profiles,
            &FilterCriteria::default(),
            Some(SortKey {
                field: SortField::CreatedAt,
                order: SortOrder::Asc,
            }),
        );
        assert_eq!(out[0].name.as_deref(), Some("First"));
        assert_eq!(out[1].name.as_deref(), Some("Second"));
    }

    #[test]
    fn test_missing_sort_values_keep_input_order() {
        let mut a = profile("x", "Has Date", "2024-06-01T00:00:00Z");
        a.created_at = None;
        let mut b = profile("y", "Also None", "unused");
        b.created_at = None;
        let c = profile("z", "Dated", "2020-01-01T00:00:00Z");
        let profiles = vec![a, b, c];
        let out = apply(
            &profiles,
            &FilterCriteria::default(),
            Some(SortKey {
                field: SortField::CreatedAt,
                order: SortOrder::Asc,
            }),
        );
        // None compares equal to everything: nothing moves.
        assert_eq!(out[0].name.as_deref(), Some("Has Date"));
        assert_eq!(out[1].name.as_deref(), Some("Also None"));
        assert_eq!(out[2].name.as_deref(), Some("Dated"));
    }

    #[test]
    fn test_empty_input_empty_output() {
        let out = apply(
            &[],
            &FilterCriteria::default(),
            Some(SortKey {
                field: SortField::Name,
                order: SortOrder::Asc,
            }),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_sort_order_toggle() {
        assert_eq!(SortOrder::Asc.toggled(), SortOrder::Desc);
        assert_eq!(SortOrder::Desc.toggled(), SortOrder::Asc);
    }
}
