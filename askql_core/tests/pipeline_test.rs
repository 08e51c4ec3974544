use askql_core::presenter::NO_RESULTS;
use askql_core::{AppConfig, DatasetLoader, Executor, NLTranslator, Session, SessionState, STUDENTS};
use serde_json::json;
use std::io::{Cursor, Write};
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STUDENTS_CSV: &str = "\
Name,CGPA,Location,Email,Phone_Number,Preferred_Work_Location,Specialization_in_degree
Asha,9.1,Pune,asha@example.com,9876500001,Bangalore,Computer Science
Ravi,7.4,Delhi,ravi@example.com,9876500002,Delhi,Electronics
Meera,8.6,Chennai,meera@example.com,9876500003,Pune,Computer Science
Kabir,6.9,Mumbai,kabir@example.com,9876500004,Mumbai,Mechanical
";

fn loaded_store() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("students.db");
    let mut csv = NamedTempFile::new().unwrap();
    csv.write_all(STUDENTS_CSV.as_bytes()).unwrap();

    let loaded = DatasetLoader::new(&STUDENTS).load_file(&db, csv.path()).unwrap();
    assert_eq!(loaded, 4);
    (dir, db)
}

async fn generation_server(status: u16, body: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&server)
        .await;
    server
}

/// Runs a whole console session against `server`, off the async runtime.
async fn run_session(server: &MockServer, db: PathBuf, input: &'static str) -> (String, SessionState) {
    let config = AppConfig {
        database_path: db,
        endpoint: format!("{}/api/generate", server.uri()),
        ..AppConfig::default()
    };

    tokio::task::spawn_blocking(move || {
        let executor = Executor::open(&config.database_path).unwrap();
        let translator = NLTranslator::new(&config).unwrap();
        let mut session = Session::new(translator, executor);
        let mut out = Vec::new();
        session.run(Cursor::new(input), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), session.state())
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_question_to_table() {
    let (_dir, db) = loaded_store();
    let server = generation_server(
        200,
        json!({
            "response": "SELECT Name, CGPA FROM students WHERE CGPA > 8 ORDER BY CGPA DESC;\nThis query filters students by CGPA.",
            "done": true
        }),
    )
    .await;

    let (output, state) = run_session(&server, db, "Show all students with CGPA above 8\nexit\n").await;

    assert!(output.contains("[Generated SQL]: SELECT Name, CGPA FROM students WHERE CGPA > 8 ORDER BY CGPA DESC;"));
    assert!(output.contains("Name | CGPA\n"));
    assert!(output.contains("Asha | 9.1\nMeera | 8.6\n"));
    assert!(!output.contains("Ravi"));
    assert!(!output.contains("This query filters"));
    assert_eq!(state, SessionState::Terminated);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_service_error_keeps_session_alive() {
    let (_dir, db) = loaded_store();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("llama runner process has terminated"))
        .mount(&server)
        .await;

    let (output, state) = run_session(&server, db, "first question\nsecond question\nQUIT\n").await;

    assert_eq!(
        output
            .matches("[ERROR] Failed to get response from LLM: llama runner process has terminated")
            .count(),
        2
    );
    assert!(!output.contains("[Generated SQL]"));
    assert!(output.trim_end().ends_with("Goodbye!"));
    assert_eq!(state, SessionState::Terminated);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_column_prints_no_results() {
    let (_dir, db) = loaded_store();
    let server = generation_server(200, json!({ "response": "SELECT Age FROM students WHERE Age > 20;" })).await;

    let (output, _) = run_session(&server, db, "students older than 20\nexit\n").await;

    assert!(output.contains("[ERROR] SQL execution failed: no such column: Age"));
    assert!(output.contains(NO_RESULTS));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_destructive_generation_leaves_table_intact() {
    let (_dir, db) = loaded_store();
    let server = generation_server(200, json!({ "response": "DELETE FROM students;" })).await;

    let (output, _) = run_session(&server, db.clone(), "clear the table\nexit\n").await;
    assert!(output.contains("statement rejected"));

    let executor = Executor::open(&db).unwrap();
    let remaining = executor.execute("SELECT COUNT(*) FROM students;").unwrap();
    assert_eq!(remaining.rows[0].values[0].to_string(), "4");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_request_body_carries_prompt() {
    let (_dir, db) = loaded_store();
    let server = generation_server(200, json!({ "response": "SELECT COUNT(*) FROM students;" })).await;

    run_session(&server, db, "How many students are there?\nexit\n").await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["model"], "llama3");
    assert_eq!(body["stream"], false);
    let prompt = body["prompt"].as_str().unwrap();
    assert!(prompt.contains("\"How many students are there?\""));
    assert!(prompt.contains(&STUDENTS.describe_columns()));
}
