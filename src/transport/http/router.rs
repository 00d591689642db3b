use crate::domain::student::{Address, Student};
use crate::errors::ErrorResponse;
use crate::transport::http::handlers::{health, students};
use crate::transport::http::types::{
    EmptyResponse, HealthResponse, StudentDetail, StudentId, StudentList, StudentSummary,
    UpdateMessage,
};
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        students::create_student_handler,
        students::list_students_handler,
        students::fetch_student_handler,
        students::update_student_handler,
        students::delete_student_handler
    ),
    components(schemas(
        Address,
        Student,
        StudentId,
        StudentSummary,
        StudentList,
        StudentDetail,
        students::StudentUpdate,
        UpdateMessage,
        EmptyResponse,
        HealthResponse,
        ErrorResponse
    )),
    tags(
        (name = "students", description = "Create, list, fetch, update and delete student records")
    )
)]
#[allow(dead_code)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/students",
            post(students::create_student_handler).get(students::list_students_handler),
        )
        .route("/student/:id", get(students::fetch_student_handler))
        .route(
            "/students/:id",
            axum::routing::patch(students::update_student_handler)
                .delete(students::delete_student_handler),
        )
        .with_state(app_state)
}
