// ============================================================================
// Student Record
// ============================================================================
//
// The wire form uses lowercase field names. The capitalized names emitted by
// older clients (`ID`, `Name`, `Age`, `Grade`) are accepted on input only.

use serde::{Deserialize, Deserializer, Serialize};

/// A single student record as stored and served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Caller-supplied identifier. Numeric JSON ids are accepted and kept as text.
    #[serde(alias = "ID", deserialize_with = "deserialize_student_id")]
    pub id: String,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Age")]
    pub age: i32,
    #[serde(alias = "Grade")]
    pub grade: String,
}

impl Student {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        age: i32,
        grade: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age,
            grade: grade.into(),
        }
    }

    /// Return a copy of this record addressed by `id`.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStudentId {
    Text(String),
    Number(u64),
}

impl RawStudentId {
    fn into_string(self) -> String {
        match self {
            RawStudentId::Text(id) => id,
            RawStudentId::Number(id) => id.to_string(),
        }
    }
}

/// Accept either `"id": "7"` or `"id": 7`.
pub(crate) fn deserialize_student_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawStudentId::deserialize(deserializer).map(RawStudentId::into_string)
}

/// Like [`deserialize_student_id`], for bodies where the id may be omitted.
pub(crate) fn deserialize_optional_student_id<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawStudentId>::deserialize(deserializer)?.map(RawStudentId::into_string))
}
