//! Employee data models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Multi-valued course field, stored as a JSON array string in TEXT.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseList(pub Vec<String>);

impl CourseList {
    /// Encode for storage.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }
}

impl TryFrom<String> for CourseList {
    type Error = serde_json::Error;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        serde_json::from_str(&raw).map(CourseList)
    }
}

/// Employee entity from database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub designation: String,
    pub gender: String,
    #[sqlx(try_from = "String")]
    pub course: CourseList,
    pub image: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields for creating an employee. All text fields are required.
#[derive(Debug, Clone, Default)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub designation: String,
    pub gender: String,
    pub course: Vec<String>,
    pub image: Option<String>,
}

/// Partial update; only provided fields change.
#[derive(Debug, Clone, Default)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub designation: Option<String>,
    pub gender: Option<String>,
    pub course: Option<Vec<String>>,
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_list_round_trip() {
        let list = CourseList(vec!["MCA".to_string(), "BCA".to_string()]);
        let json = list.to_json();
        assert_eq!(json, r#"["MCA","BCA"]"#);
        assert_eq!(CourseList::try_from(json).unwrap(), list);
    }

    #[test]
    fn test_course_list_rejects_malformed_storage() {
        assert!(CourseList::try_from("not json".to_string()).is_err());
    }

    #[test]
    fn test_course_list_serializes_transparent() {
        let list = CourseList(vec!["MCA".to_string()]);
        assert_eq!(serde_json::to_string(&list).unwrap(), r#"["MCA"]"#);
    }
}
