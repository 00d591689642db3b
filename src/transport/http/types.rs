use crate::app::student_service::StudentService;
use crate::domain::student::{Address, Student};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub students: StudentService,
}

/// Returned by `POST /students`: the new roll number as a string.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct StudentId {
    pub id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct StudentSummary {
    pub name: String,
    pub age: i64,
}

impl From<Student> for StudentSummary {
    fn from(s: Student) -> Self {
        Self {
            name: s.name,
            age: s.age,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct StudentList {
    pub data: Vec<StudentSummary>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct StudentDetail {
    pub name: String,
    pub age: i64,
    pub address: Address,
}

impl From<Student> for StudentDetail {
    fn from(s: Student) -> Self {
        Self {
            name: s.name,
            age: s.age,
            address: s.address,
        }
    }
}

/// Query parameters for `GET /students`.
///
/// Both are read as raw strings so that an empty value (`?age=`) means "not given".
#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListStudentsQuery {
    /// To apply filter of country. If not given or empty, this filter is not applied.
    pub country: Option<String>,
    /// Only records which have age greater than or equal to the provided age are returned.
    /// Must be greater than 0. If not given or empty, this filter is not applied.
    #[param(value_type = Option<i64>, minimum = 1)]
    pub age: Option<String>,
}

/// Body returned by `PATCH /students/{id}` when nothing was modified.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct UpdateMessage {
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// An empty JSON object (`{}`).
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct EmptyResponse {}
