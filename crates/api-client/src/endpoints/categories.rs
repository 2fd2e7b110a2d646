//! Categories API endpoints
//!
//! GET /rest/v1/categories?select=*&order=name

use super::id_string;
use crate::client::{ProfinderClient, Service};
use crate::error::ApiResult;
use profinder_search::{Category, CategoryId};
use serde::Deserialize;

/// Categories API interface
#[derive(Clone)]
pub struct CategoriesApi {
    client: ProfinderClient,
}

impl CategoriesApi {
    pub(crate) fn new(client: ProfinderClient) -> Self {
        Self { client }
    }

    /// All categories ordered by name
    pub async fn list(&self) -> ApiResult<Vec<CategoryRow>> {
        self.client
            .get(Service::Store, "rest/v1/categories", &[("select", "*"), ("order", "name")])
            .await
    }
}

/// A `categories` row
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRow {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(row.id),
            name: row.name,
            description: row.description,
            icon: row.icon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_rows() {
        let rows: Vec<CategoryRow> = serde_json::from_str(
            r#"[
                {"id": 1, "name": "Cleaning", "icon": "broom"},
                {"id": "c-2", "name": "Plumbing", "description": null}
            ]"#,
        )
        .unwrap();
        let categories: Vec<Category> = rows.into_iter().map(Category::from).collect();

        assert_eq!(categories[0].id.as_str(), "1");
        assert_eq!(categories[0].icon.as_deref(), Some("broom"));
        assert_eq!(categories[1].id.as_str(), "c-2");
        assert!(categories[1].description.is_none());
    }

    #[test]
    fn test_category_id_must_be_text_or_integer() {
        for id in ["null", "1.5", "true", r#"{"uuid": "c-1"}"#] {
            let json = format!(r#"{{"id": {id}, "name": "Cleaning"}}"#);
            assert!(serde_json::from_str::<CategoryRow>(&json).is_err(), "accepted id {id}");
        }
    }
}
