//! Typed list filter built from query parameters.
//!
//! # Matching
//! - `owner`, `body`: case-sensitive substring containment.
//! - `category`: exact, case-sensitive equality.
//! - `status`: boolean equality; `true` or `false`, any case.
//!
//! Supplied constraints are ANDed. A blank value is treated as absent and
//! unknown keys are ignored.

use bson::{doc, Document};

use crate::error::ApiError;
use crate::http::{first_value, QueryParams};
use crate::types::{Todo, BODY_KEY, CATEGORY_KEY, OWNER_KEY, STATUS_KEY};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub owner: Option<String>,
    pub category: Option<String>,
    pub body: Option<String>,
    pub status: Option<bool>,
}

impl TodoFilter {
    /// Validate the query map into a filter.
    ///
    /// # Errors
    /// `ApiError::BadRequest` when `status` is not a recognised boolean.
    pub fn from_query(params: &QueryParams) -> Result<Self, ApiError> {
        let status = match text(params, STATUS_KEY) {
            Some(raw) => Some(parse_status(&raw)?),
            None => None,
        };
        Ok(Self {
            owner: text(params, OWNER_KEY),
            category: text(params, CATEGORY_KEY),
            body: text(params, BODY_KEY),
            status,
        })
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        self.owner.as_deref().map_or(true, |owner| todo.owner.contains(owner))
            && self.category.as_deref().map_or(true, |category| todo.category == category)
            && self.body.as_deref().map_or(true, |body| todo.body.contains(body))
            && self.status.map_or(true, |status| todo.status == status)
    }

    /// The equivalent conjunctive MongoDB query.
    pub fn to_document(&self) -> Document {
        let mut query = Document::new();
        if let Some(owner) = &self.owner {
            query.insert(OWNER_KEY, doc! { "$regex": regex::escape(owner) });
        }
        if let Some(category) = &self.category {
            query.insert(CATEGORY_KEY, category.as_str());
        }
        if let Some(body) = &self.body {
            query.insert(BODY_KEY, doc! { "$regex": regex::escape(body) });
        }
        if let Some(status) = self.status {
            query.insert(STATUS_KEY, status);
        }
        query
    }
}

fn text(params: &QueryParams, key: &str) -> Option<String> {
    first_value(params, key)
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

fn parse_status(raw: &str) -> Result<bool, ApiError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ApiError::BadRequest(format!(
            "the requested status `{raw}` is not a boolean"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NewTodo, TodoId};

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        let mut params = QueryParams::new();
        for (key, value) in pairs {
            params
                .entry(key.to_string())
                .or_default()
                .push(value.to_string());
        }
        params
    }

    fn todo(owner: &str, category: &str, body: &str, status: bool) -> Todo {
        NewTodo::new(owner, category, body, status).with_id(TodoId::new())
    }

    #[test]
    fn empty_query_is_empty_filter() {
        let filter = TodoFilter::from_query(&QueryParams::new()).unwrap();
        assert!(filter.is_empty());
        assert!(filter.matches(&todo("Harold", "board games", "monopoly", false)));
    }

    #[test]
    fn status_accepts_booleans_in_any_case() {
        for (raw, expected) in [
            ("true", true),
            ("TRUE", true),
            ("false", false),
            ("False", false),
        ] {
            let filter = TodoFilter::from_query(&params(&[("status", raw)])).unwrap();
            assert_eq!(filter.status, Some(expected), "{raw}");
        }
    }

    #[test]
    fn status_rejects_non_boolean() {
        let err = TodoFilter::from_query(&params(&[("status", "maybe")])).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn status_rejects_completion_words() {
        for raw in ["complete", "incomplete", "yes", "1"] {
            let err = TodoFilter::from_query(&params(&[("status", raw)])).unwrap_err();
            assert!(matches!(err, ApiError::BadRequest(_)), "{raw}");
        }
    }

    #[test]
    fn blank_values_and_unknown_keys_are_ignored() {
        let filter = TodoFilter::from_query(&params(&[
            ("owner", ""),
            ("status", "  "),
            ("limit", "7"),
        ]))
        .unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn first_value_wins() {
        let filter =
            TodoFilter::from_query(&params(&[("owner", "Jason"), ("owner", "Bryan")])).unwrap();
        assert_eq!(filter.owner.as_deref(), Some("Jason"));
    }

    #[test]
    fn owner_and_body_match_substrings() {
        let quest = todo("Jason", "video games", "finish quest", true);
        let filter = TodoFilter {
            owner: Some("aso".into()),
            body: Some("quest".into()),
            ..TodoFilter::default()
        };
        assert!(filter.matches(&quest));

        let filter = TodoFilter {
            owner: Some("jason".into()),
            ..TodoFilter::default()
        };
        assert!(!filter.matches(&quest));
    }

    #[test]
    fn category_matches_exactly() {
        let quest = todo("Jason", "video games", "finish quest", true);
        let exact = TodoFilter {
            category: Some("video games".into()),
            ..TodoFilter::default()
        };
        let partial = TodoFilter {
            category: Some("games".into()),
            ..TodoFilter::default()
        };
        assert!(exact.matches(&quest));
        assert!(!partial.matches(&quest));
    }

    #[test]
    fn constraints_are_anded() {
        let quest = todo("Jason", "video games", "finish quest", true);
        let filter = TodoFilter {
            owner: Some("Jason".into()),
            status: Some(false),
            ..TodoFilter::default()
        };
        assert!(!filter.matches(&quest));
    }

    #[test]
    fn query_document_escapes_substrings() {
        let filter = TodoFilter {
            owner: Some("J.son".into()),
            category: Some("video games".into()),
            body: Some("finish (quest)?".into()),
            status: Some(true),
        };
        let expected = doc! {
            "owner": { "$regex": "J\\.son" },
            "category": "video games",
            "body": { "$regex": "finish \\(quest\\)\\?" },
            "status": true,
        };
        assert_eq!(filter.to_document(), expected);
    }

    #[test]
    fn empty_filter_is_empty_query() {
        assert!(TodoFilter::default().to_document().is_empty());
    }
}
