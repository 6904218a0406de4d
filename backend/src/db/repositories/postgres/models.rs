use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::students;
use crate::models::Student;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)] // Bookkeeping timestamps are not part of the API
pub struct StudentRow {
    pub id: String,
    pub name: String,
    pub age: i32,
    pub grade: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Student {
            id: row.id,
            name: row.name,
            age: row.age,
            grade: row.grade,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = students)]
pub struct NewStudentRow {
    pub id: String,
    pub name: String,
    pub age: i32,
    pub grade: String,
}

impl From<Student> for NewStudentRow {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            name: student.name,
            age: student.age,
            grade: student.grade,
        }
    }
}

/// Full replacement of the mutable columns. The primary key never changes.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = students)]
pub struct StudentChangeset {
    pub name: String,
    pub age: i32,
    pub grade: String,
    pub updated_at: DateTime<Utc>,
}

impl From<Student> for StudentChangeset {
    fn from(student: Student) -> Self {
        Self {
            name: student.name,
            age: student.age,
            grade: student.grade,
            updated_at: Utc::now(),
        }
    }
}
