use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Department {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_time: DateTime<Utc>,
    pub updated_time: DateTime<Utc>,
}

impl Department {
    /// A reference carrying only the id, as stored on an employee row
    /// before enrichment resolves the full record.
    pub fn reference(id: impl Into<String>) -> Self {
        Department {
            id: id.into(),
            name: String::new(),
            description: String::new(),
            created_time: DateTime::<Utc>::UNIX_EPOCH,
            updated_time: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct NewDepartment {
    /// Caller-supplied id; generated at write time when absent.
    pub id: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct UpdateDepartment {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Query filter for department fetch. A non-empty `ids` set switches to
/// exact-match mode and disables keyword, cursor and num entirely.
#[derive(Debug, Clone, Default)]
pub struct DepartmentFilter {
    pub ids: Vec<String>,
    pub keyword: String,
    pub num: i64,
    pub cursor: String,
}
