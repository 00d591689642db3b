//! End-to-end API tests: the router is served on an ephemeral port with the in-memory
//! store and driven over HTTP.

use reqwest::StatusCode;
use serde_json::{json, Value as JsonValue};
use student_records::{open_store, transport, Config, StudentService};

async fn spawn_server() -> Result<String, Box<dyn std::error::Error>> {
    let app_state = transport::http::AppState {
        students: StudentService::new(open_store(&Config::in_memory()).await?),
    };
    let router = transport::http::create_router(app_state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Ok(format!("http://127.0.0.1:{}", port))
}

async fn create(
    client: &reqwest::Client,
    base_url: &str,
    body: JsonValue,
) -> Result<String, Box<dyn std::error::Error>> {
    let resp = client
        .post(format!("{}/students", base_url))
        .json(&body)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: JsonValue = resp.json().await?;
    Ok(body["id"].as_str().ok_or("id is not a string")?.to_string())
}

fn student(name: &str, age: i64, city: &str, country: &str) -> JsonValue {
    json!({ "name": name, "age": age, "address": { "city": city, "country": country } })
}

#[tokio::test]
async fn create_then_filter_by_country_and_age() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();

    let id = create(&client, &base_url, student("Ann", 20, "X", "Peru")).await?;
    assert_eq!(id, "1");

    let resp = client
        .get(format!("{}/students?country=peru&age=18", base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: JsonValue = resp.json().await?;
    assert_eq!(body, json!({ "data": [ { "name": "Ann", "age": 20 } ] }));
    Ok(())
}

#[tokio::test]
async fn ids_are_prior_count_plus_one() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();

    for expected in 1..=3 {
        let id = create(&client, &base_url, student("S", 10 + expected, "C", "Chile")).await?;
        assert_eq!(id, expected.to_string());
    }
    Ok(())
}

#[tokio::test]
async fn fetch_returns_the_submitted_document() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();

    let submitted = student("Ann", 20, "Lima", "Peru");
    let id = create(&client, &base_url, submitted.clone()).await?;

    let resp = client.get(format!("{}/student/{}", base_url, id)).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: JsonValue = resp.json().await?;
    assert_eq!(body, submitted);

    let resp = client.get(format!("{}/student/99", base_url)).send().await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: JsonValue = resp.json().await?;
    assert_eq!(body["detail"], "Student with ID 99 not found");
    Ok(())
}

#[tokio::test]
async fn list_filters_are_exact_case_insensitive_and_inclusive() -> Result<(), Box<dyn std::error::Error>>
{
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();

    create(&client, &base_url, student("Ann", 18, "Lima", "Peru")).await?;
    create(&client, &base_url, student("Bea", 17, "Cusco", "PERU")).await?;
    create(&client, &base_url, student("Cid", 40, "Quito", "Ecuador")).await?;
    create(&client, &base_url, student("Dan", 25, "X", "Peruvia")).await?;

    let names = |body: &JsonValue| -> Vec<String> {
        body["data"]
            .as_array()
            .map(|a| {
                a.iter()
                    .filter_map(|s| s["name"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    };

    let body: JsonValue = client
        .get(format!("{}/students?country=pErU", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(names(&body), vec!["Ann", "Bea"]);

    let body: JsonValue = client
        .get(format!("{}/students?age=18", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(names(&body), vec!["Ann", "Cid", "Dan"]);

    // Empty values mean "not given".
    let body: JsonValue = client
        .get(format!("{}/students?country=&age=", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(names(&body).len(), 4);

    let resp = client.get(format!("{}/students?age=0", base_url)).send().await?;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[tokio::test]
async fn patch_overwrites_only_supplied_fields() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();

    let id = create(&client, &base_url, student("Ann", 20, "Lima", "Peru")).await?;

    let resp = client
        .patch(format!("{}/students/{}", base_url, id))
        .json(&json!({ "age": 21 }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(resp.text().await?.is_empty());

    let body: JsonValue = client
        .get(format!("{}/student/{}", base_url, id))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body, student("Ann", 21, "Lima", "Peru"));

    let resp = client
        .patch(format!("{}/students/{}", base_url, id))
        .json(&json!({ "address": { "city": "Quito", "country": "Ecuador" } }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let body: JsonValue = client
        .get(format!("{}/student/{}", base_url, id))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body, student("Ann", 21, "Quito", "Ecuador"));
    Ok(())
}

#[tokio::test]
async fn patch_without_effect_returns_a_message() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();

    let id = create(&client, &base_url, student("Ann", 20, "Lima", "Peru")).await?;

    let resp = client
        .patch(format!("{}/students/{}", base_url, id))
        .json(&json!({ "name": "Ann" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: JsonValue = resp.json().await?;
    assert_eq!(
        body,
        json!({ "message": format!("Student with ID {} not found or no changes provided", id) })
    );

    let resp = client
        .patch(format!("{}/students/77", base_url))
        .json(&json!({ "name": "Zoe" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: JsonValue = resp.json().await?;
    assert_eq!(
        body["message"],
        "Student with ID 77 not found or no changes provided"
    );
    Ok(())
}

#[tokio::test]
async fn patch_rejects_fields_outside_the_allow_list() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();

    let id = create(&client, &base_url, student("Ann", 20, "Lima", "Peru")).await?;

    let resp = client
        .patch(format!("{}/students/{}", base_url, id))
        .json(&json!({ "roll_number": 5 }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let resp = client
        .patch(format!("{}/students/{}", base_url, id))
        .json(&json!({ "age": "old" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Rejected patches leave the record alone.
    let body: JsonValue = client
        .get(format!("{}/student/{}", base_url, id))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body, student("Ann", 20, "Lima", "Peru"));
    Ok(())
}

#[tokio::test]
async fn delete_always_succeeds() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();

    let resp = client.delete(format!("{}/students/404", base_url)).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: JsonValue = resp.json().await?;
    assert_eq!(body, json!({}));

    let id = create(&client, &base_url, student("Ann", 20, "Lima", "Peru")).await?;
    let resp = client
        .delete(format!("{}/students/{}", base_url, id))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client.get(format!("{}/student/{}", base_url, id)).send().await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn malformed_input_is_a_validation_error() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();

    // Missing address.
    let resp = client
        .post(format!("{}/students", base_url))
        .json(&json!({ "name": "Ann", "age": 20 }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: JsonValue = resp.json().await?;
    assert!(body["detail"].as_str().unwrap_or_default().contains("Invalid JSON body"));

    // Wrong type for age.
    let resp = client
        .post(format!("{}/students", base_url))
        .json(&json!({ "name": "Ann", "age": "twenty", "address": { "city": "X", "country": "Y" } }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let resp = client.get(format!("{}/student/abc", base_url)).send().await?;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let resp = client.delete(format!("{}/students/abc", base_url)).send().await?;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[tokio::test]
async fn health_reports_ok() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_server().await?;
    let resp = reqwest::get(format!("{}/health", base_url)).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: JsonValue = resp.json().await?;
    assert_eq!(body, json!({ "status": "ok" }));
    Ok(())
}
