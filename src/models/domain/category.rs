use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub in_use: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Category {
    pub fn new(name: &str) -> Self {
        Category {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            in_use: true,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_creation() {
        let category = Category::new("Programming");
        assert_eq!(category.name, "Programming");
        assert!(category.in_use);
        assert!(!category.id.is_empty());
    }
}
