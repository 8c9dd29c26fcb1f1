use crate::store::Issue;

const VIEWER_ALIAS: &str = "@me";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    State,
    Label,
    Author,
    Assignee,
    Repo,
}

impl FilterKey {
    fn parse(key: &str) -> Option<Self> {
        match key {
            "state" => Some(Self::State),
            "label" => Some(Self::Label),
            "author" => Some(Self::Author),
            "assignee" => Some(Self::Assignee),
            "repo" => Some(Self::Repo),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// Substring looked up in title, body, assignee, labels and source key.
    Term(String),
    Field { key: FilterKey, value: String },
    /// Unrecognised `key:value`; matches everything.
    Unknown { key: String, value: String },
}

/// Clauses are AND-ed in order. Values are stored lowercased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    clauses: Vec<Clause>,
}

impl FilterQuery {
    #[cfg(test)]
    pub fn parse(raw: &str) -> Self {
        Self::parse_with_viewer(raw, None)
    }

    /// Whitespace-separated clauses, expanding `@me` to `viewer` when one is known.
    pub fn parse_with_viewer(raw: &str, viewer: Option<&str>) -> Self {
        let clauses = raw
            .split_whitespace()
            .map(|token| parse_token(token, viewer))
            .collect();
        Self { clauses }
    }

    /// The whole trimmed text as one case-insensitive substring.
    pub fn search(raw: &str) -> Self {
        let term = raw.trim().to_lowercase();
        if term.is_empty() {
            return Self::default();
        }
        Self {
            clauses: vec![Clause::Term(term)],
        }
    }

    #[cfg(test)]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

fn parse_token(token: &str, viewer: Option<&str>) -> Clause {
    let token = token.to_lowercase();
    let Some((key, value)) = token.split_once(':') else {
        return Clause::Term(token);
    };
    match FilterKey::parse(key) {
        Some(key @ (FilterKey::Author | FilterKey::Assignee)) => Clause::Field {
            key,
            value: login_value(value, viewer),
        },
        Some(key) => Clause::Field {
            key,
            value: value.to_string(),
        },
        None => Clause::Unknown {
            key: key.to_string(),
            value: value.to_string(),
        },
    }
}

fn login_value(value: &str, viewer: Option<&str>) -> String {
    if value == VIEWER_ALIAS
        && let Some(viewer) = viewer
    {
        return viewer.to_lowercase();
    }
    value.strip_prefix('@').unwrap_or(value).to_string()
}

pub fn matches(issue: &Issue, query: &FilterQuery) -> bool {
    query
        .clauses
        .iter()
        .all(|clause| clause_matches(issue, clause))
}

fn clause_matches(issue: &Issue, clause: &Clause) -> bool {
    match clause {
        Clause::Term(term) => term_matches(issue, term),
        Clause::Field { key, value } => field_matches(issue, *key, value),
        Clause::Unknown { .. } => true,
    }
}

fn term_matches(issue: &Issue, term: &str) -> bool {
    contains(issue.title.as_str(), term)
        || issue
            .body
            .as_deref()
            .is_some_and(|body| contains(body, term))
        || issue
            .assignee
            .as_deref()
            .is_some_and(|assignee| contains(assignee, term))
        || issue.labels.iter().any(|label| contains(label, term))
        || contains(issue.source_key.as_str(), term)
}

fn field_matches(issue: &Issue, key: FilterKey, value: &str) -> bool {
    match key {
        FilterKey::State => contains(issue.state.as_str(), value),
        FilterKey::Label => issue.labels.iter().any(|label| contains(label, value)),
        FilterKey::Author | FilterKey::Assignee => issue
            .assignee
            .as_deref()
            .is_some_and(|assignee| contains(assignee, value)),
        FilterKey::Repo => contains(issue.source_key.as_str(), value),
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Indices of `issues` matching both queries, in their original order.
pub fn filter_indices(issues: &[Issue], search: &FilterQuery, filter: &FilterQuery) -> Vec<usize> {
    issues
        .iter()
        .enumerate()
        .filter(|(_, issue)| matches(issue, search) && matches(issue, filter))
        .map(|(index, _)| index)
        .collect()
}
