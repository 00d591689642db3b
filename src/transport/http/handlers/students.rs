use crate::app::student_service::UpdateOutcome;
use crate::domain::student::{Address, Student, StudentFilter, StudentPatch};
use crate::errors::{ApiError, ErrorResponse};
use crate::transport::http::handlers::common::{json_422, parse_min_age, parse_roll_number, query_422};
use crate::transport::http::types::{
    AppState, EmptyResponse, ListStudentsQuery, StudentDetail, StudentId, StudentList,
    StudentSummary, UpdateMessage,
};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use utoipa::ToSchema;

/// Documents the fields accepted by `PATCH /students/{id}`. The handler itself reads
/// a free-form field map and validates it against the mutable-field allow-list.
#[derive(Deserialize, Debug, ToSchema)]
#[allow(dead_code)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub address: Option<Address>,
}

/// Create a student.
///
/// All fields are mandatory and required while creating the student in the system.
#[utoipa::path(
    post,
    path = "/students",
    tag = "students",
    request_body = Student,
    responses(
        (status = 200, description = "Student created", body = StudentId),
        (status = 422, description = "Invalid JSON body", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_student_handler(
    State(state): State<AppState>,
    request: Result<Json<Student>, JsonRejection>,
) -> Result<Json<StudentId>, ApiError> {
    let Json(student) = request.map_err(|e| {
        json_422(
            e,
            "{\"name\": string, \"age\": integer, \"address\": {\"city\": string, \"country\": string}}",
        )
    })?;

    let roll_number = state.students.create(student).await?;
    Ok(Json(StudentId {
        id: roll_number.to_string(),
    }))
}

/// List students.
///
/// You can apply filters on this API by passing the query parameters listed below.
#[utoipa::path(
    get,
    path = "/students",
    tag = "students",
    params(ListStudentsQuery),
    responses(
        (status = 200, description = "Matching students", body = StudentList),
        (status = 422, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_students_handler(
    State(state): State<AppState>,
    query: Result<Query<ListStudentsQuery>, QueryRejection>,
) -> Result<Json<StudentList>, ApiError> {
    let Query(query) = query.map_err(query_422)?;
    let min_age = parse_min_age(query.age.as_deref())?;
    let filter = StudentFilter::new(query.country, min_age);

    let students = state.students.list(&filter).await?;
    Ok(Json(StudentList {
        data: students.into_iter().map(StudentSummary::from).collect(),
    }))
}

/// Fetch a student by ID.
#[utoipa::path(
    get,
    path = "/student/{id}",
    tag = "students",
    params(
        ("id" = String, Path, description = "The ID of the student previously created")
    ),
    responses(
        (status = 200, description = "Student found", body = StudentDetail),
        (status = 404, description = "No student with this ID", body = ErrorResponse),
        (status = 422, description = "ID is not an integer", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn fetch_student_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StudentDetail>, ApiError> {
    let roll_number = parse_roll_number(&id)?;
    match state.students.fetch(roll_number).await? {
        Some(student) => Ok(Json(StudentDetail::from(student))),
        None => Err(ApiError::NotFound { id }),
    }
}

/// Update a student.
///
/// Not all fields need to be sent; only the fields that are sent are updated.
#[utoipa::path(
    patch,
    path = "/students/{id}",
    tag = "students",
    params(
        ("id" = String, Path, description = "The ID of the student to update")
    ),
    request_body(
        content = StudentUpdate,
        description = "JSON payload containing the updated fields"
    ),
    responses(
        (status = 204, description = "Exactly one student was modified"),
        (status = 200, description = "Student not found or no changes provided", body = UpdateMessage),
        (status = 422, description = "Invalid JSON body or field", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_student_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<HashMap<String, JsonValue>>, JsonRejection>,
) -> Result<Response, ApiError> {
    let roll_number = parse_roll_number(&id)?;
    let Json(fields) = request.map_err(|e| json_422(e, "a JSON object of fields to update"))?;
    let patch = StudentPatch::from_fields(fields)?;

    match state.students.update(roll_number, &patch).await? {
        UpdateOutcome::Modified => Ok(StatusCode::NO_CONTENT.into_response()),
        UpdateOutcome::Unchanged => Ok(Json(UpdateMessage {
            message: format!("Student with ID {} not found or no changes provided", id),
        })
        .into_response()),
    }
}

/// Delete a student. Succeeds whether or not the student existed.
#[utoipa::path(
    delete,
    path = "/students/{id}",
    tag = "students",
    params(
        ("id" = String, Path, description = "The ID of the student to delete")
    ),
    responses(
        (status = 200, description = "Student deleted (or was not present)", body = EmptyResponse),
        (status = 422, description = "ID is not an integer", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_student_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EmptyResponse>, ApiError> {
    let roll_number = parse_roll_number(&id)?;
    state.students.delete(roll_number).await?;
    Ok(Json(EmptyResponse {}))
}
