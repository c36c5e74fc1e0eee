use axum::http::StatusCode;
use axum::body::Body;
use http_body_util::BodyExt;
use tower::ServiceExt;
use serde_json::{json, Value};
use chrono::NaiveDate;
use tempfile::TempDir;
use houndsploit::db::Database;
use houndsploit::api::{build_router, AppState};
use houndsploit::errors::RetryConfig;
use houndsploit::models::{Exploit, Record, Shellcode};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn exploit(id: i64, description: &str, vuln_type: &str, platform: &str, day: NaiveDate, port: Option<u16>) -> Record {
    Record::Exploit(Exploit {
        id,
        file: format!("exploits/{}/{}/{}.txt", platform, vuln_type, id),
        description: description.into(),
        date: day,
        author: "researcher".into(),
        vuln_type: vuln_type.into(),
        platform: platform.into(),
        port,
    })
}

fn seed(db: &Database) {
    for record in [
        exploit(1, "WordPress Plugin SQL Injection", "webapps", "php", date(2019, 3, 1), None),
        exploit(2, "Apache Struts RCE", "remote", "linux", date(2017, 3, 7), Some(8080)),
        exploit(3, "Windows SMB Remote Code Execution", "remote", "windows", date(2017, 4, 14), Some(445)),
    ] {
        db.upsert_record(&record).unwrap();
    }
    db.upsert_record(&Record::Shellcode(Shellcode {
        id: 10,
        file: "shellcodes/linux/10.c".into(),
        description: "Linux x86 reverse shell".into(),
        date: date(2015, 6, 1),
        author: "sc".into(),
        vuln_type: "shellcode".into(),
        platform: "linux".into(),
        port: None,
    }))
    .unwrap();
}

fn create_test_state(artifacts: &TempDir) -> AppState {
    let db = Database::in_memory().unwrap();
    seed(&db);
    AppState {
        db,
        artifacts_dir: artifacts.path().to_path_buf(),
        retry: RetryConfig { max_retries: 2 },
    }
}

fn app(state: &AppState) -> axum::Router {
    build_router(state.clone())
}

fn make_request(method: &str, uri: &str, body: Option<Value>) -> axum::http::Request<Body> {
    let builder = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    match body {
        Some(b) => builder.body(Body::from(serde_json::to_string(&b).unwrap())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn response_json(response: axum::http::Response<Body>) -> Value {
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        panic!("Empty response body. Status: {}, Headers: {:?}", parts.status, parts.headers);
    }
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("JSON parse error: {}. Body: {:?}", e, String::from_utf8_lossy(&bytes)))
}

async fn call(state: &AppState, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let response = app(state).oneshot(make_request(method, uri, body)).await.unwrap();
    let status = response.status();
    (status, response_json(response).await)
}

fn ids(results: &Value) -> Vec<i64> {
    results.as_array().unwrap().iter().map(|r| r["id"].as_i64().unwrap()).collect()
}

#[tokio::test]
async fn test_health_endpoint() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);
    let (status, body) = call(&state, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "houndsploit");
}

#[tokio::test]
async fn test_simple_search_requires_text() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);
    let (status, body) = call(&state, "POST", "/api/search", Some(json!({"search_text": "   "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_simple_search_both_collections() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);
    let (status, body) = call(&state, "POST", "/api/search", Some(json!({"search_text": "linux"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["searched_item"], "linux");
    assert_eq!(body["suggested_search_text"], "");
    // File paths are part of the text fields
    assert_eq!(ids(&body["exploits_results"]), vec![2]);
    assert_eq!(body["n_shellcodes_results"], 1);
    assert_eq!(body["exploits_results"][0]["port"], "8080");
    assert!(body["shellcodes_results"][0].get("port").is_none());
}

#[tokio::test]
async fn test_simple_search_autoreplacement() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);
    let (status, _) = call(
        &state,
        "POST",
        "/api/suggestions",
        Some(json!({"searched": "wordpres", "suggestion": "wordpress", "autoreplacement": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&state, "POST", "/api/search", Some(json!({"search_text": "WordPres"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["searched_item"], "wordpress");
    assert_eq!(body["suggested_search_text"], "");
    assert_eq!(ids(&body["exploits_results"]), vec![1]);
}

#[tokio::test]
async fn test_simple_search_proposes_suggestion() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);
    call(
        &state,
        "POST",
        "/api/suggestions",
        Some(json!({"searched": "struts2", "suggestion": "struts", "autoreplacement": 0})),
    )
    .await;

    let (_, body) = call(&state, "POST", "/api/search", Some(json!({"search_text": "struts2"}))).await;
    assert_eq!(body["searched_item"], "struts2");
    assert_eq!(body["suggested_search_text"], "struts");
    assert_eq!(body["n_exploits_results"], 0);

    let (status, body) = call(&state, "GET", "/api/search/suggested/struts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["exploits_results"]), vec![2]);
}

#[tokio::test]
async fn test_advanced_and_with_empty_text_applies_filters() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);
    // types: All, remote, shellcode, webapps
    let (status, body) = call(&state, "POST", "/api/search/advanced", Some(json!({"operator": 0, "type": 1}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["exploits_results"]), vec![3, 2]);
    assert_eq!(body["n_shellcodes_results"], 0);
    assert_eq!(body["form"]["type"], 1);
}

#[tokio::test]
async fn test_advanced_or_with_empty_text_does_not_match_everything() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);
    let (status, body) = call(&state, "POST", "/api/search/advanced", Some(json!({"operator": 1, "type": 1}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["exploits_results"]), vec![3, 2]);
    assert_eq!(body["n_shellcodes_results"], 0);
}

#[tokio::test]
async fn test_advanced_or_without_constraints_matches_everything() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);
    let (_, body) = call(&state, "POST", "/api/search/advanced", Some(json!({"operator": 1}))).await;
    assert_eq!(body["n_exploits_results"], 3);
    assert_eq!(body["n_shellcodes_results"], 1);
}

#[tokio::test]
async fn test_advanced_or_unions_text_and_port() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);
    let (_, body) = call(
        &state,
        "POST",
        "/api/search/advanced",
        Some(json!({"search_text": "wordpress", "operator": 1, "port": 445})),
    )
    .await;
    assert_eq!(ids(&body["exploits_results"]), vec![1, 3]);
}

#[tokio::test]
async fn test_advanced_bad_date_range_echoes_form() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);
    let (status, body) = call(
        &state,
        "POST",
        "/api/search/advanced",
        Some(json!({"search_text": "apache", "start_date": "2020-01-01", "end_date": "2019-01-01"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["date_range_error"], "ERROR: Bad date range!");
    assert_eq!(body["form"]["search_text"], "apache");
    assert_eq!(body["form"]["start_date"], "2020-01-01");
}

#[tokio::test]
async fn test_advanced_out_of_range_index_is_rejected() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);
    let (status, body) = call(&state, "POST", "/api/search/advanced", Some(json!({"platform": 99}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("date_range_error").is_none());
    assert_eq!(body["form"]["platform"], 99);
}

#[tokio::test]
async fn test_advanced_stale_enumeration_version_is_rejected() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);
    let (_, filters) = call(&state, "GET", "/api/filters", None).await;
    let version = filters["types"]["version"].as_u64().unwrap();

    let (status, _) = call(
        &state,
        "POST",
        "/api/search/advanced",
        Some(json!({"type": 1, "type_version": version})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    state.db.upsert_record(&exploit(4, "New thing", "dos", "linux", date(2021, 1, 1), None)).unwrap();
    let (status, _) = call(
        &state,
        "POST",
        "/api/search/advanced",
        Some(json!({"type": 1, "type_version": version})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_advanced_suggested_link_roundtrip() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);
    call(
        &state,
        "POST",
        "/api/suggestions",
        Some(json!({"searched": "apach", "suggestion": "apache", "autoreplacement": 0})),
    )
    .await;

    let (_, body) = call(&state, "POST", "/api/search/advanced", Some(json!({"search_text": "apach", "type": 1}))).await;
    assert_eq!(body["suggested_search_text"], "apache");
    let link = body["relative_suggested_link"].as_str().unwrap().to_string();
    assert_eq!(link, "apache/0/1/0/_None_/None/None/None");

    let (status, body) = call(&state, "GET", &format!("/api/search/advanced/suggested/{}", link), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["exploits_results"]), vec![2]);
    assert_eq!(body["form"]["search_text"], "apache");
}

#[tokio::test]
async fn test_filters_endpoint() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);
    let (status, body) = call(&state, "GET", "/api/filters", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["operators"][1]["label"], "OR");
    assert_eq!(body["booleans"][1]["label"], "True");

    let labels: Vec<&str> = body["types"]["choices"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["All", "remote", "shellcode", "webapps"]);
    assert_eq!(body["platforms"]["choices"][0]["label"], "All");
    assert!(body["platforms"]["version"].is_u64());
}

#[tokio::test]
async fn test_suggestion_update_keeps_single_entry() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);
    let (_, first) = call(
        &state,
        "POST",
        "/api/suggestions",
        Some(json!({"searched": "Wordpres", "suggestion": "wordpress", "autoreplacement": 0})),
    )
    .await;
    let (status, second) = call(
        &state,
        "POST",
        "/api/suggestions",
        Some(json!({"searched": "wordpres", "suggestion": "WordPress", "autoreplacement": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["suggestion"]["id"], second["suggestion"]["id"]);
    assert_eq!(second["suggestion"]["suggestion"], "wordpress");
    assert_eq!(second["suggestion"]["autoreplacement"], true);

    let (_, list) = call(&state, "GET", "/api/suggestions", None).await;
    assert_eq!(list["total"], 1);
}

#[tokio::test]
async fn test_suggestion_rejects_bad_input() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);
    let (status, _) = call(
        &state,
        "POST",
        "/api/suggestions",
        Some(json!({"searched": "", "suggestion": "x", "autoreplacement": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &state,
        "POST",
        "/api/suggestions",
        Some(json!({"searched": "x", "suggestion": "y", "autoreplacement": 7})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_suggestion() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);
    let (_, added) = call(
        &state,
        "POST",
        "/api/suggestions",
        Some(json!({"searched": "smb", "suggestion": "samba", "autoreplacement": 0})),
    )
    .await;
    let id = added["suggestion"]["id"].as_i64().unwrap();

    let (status, body) = call(&state, "DELETE", &format!("/api/suggestions/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], true);
    assert_eq!(body["suggestions"].as_array().unwrap().len(), 0);

    let (status, body) = call(&state, "DELETE", &format!("/api/suggestions/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["suggestion_error"], "ERROR: The suggestion you want to delete does not exist!");
    assert!(body["suggestions"].is_array());
}

#[tokio::test]
async fn test_view_code_existing_artifact() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("exploits/linux/remote")).unwrap();
    std::fs::write(dir.path().join("exploits/linux/remote/2.txt"), "struts payload").unwrap();
    let state = create_test_state(&dir);

    let (status, body) = call(&state, "GET", "/api/exploits/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "struts payload");
    assert_eq!(body["file_name"], "Apache Struts RCE.txt");
    assert_eq!(body["file_path"], "/static/vulnerabilities/exploits/linux/remote/2.txt");
    assert_eq!(body["description"], "Apache Struts RCE");
}

#[tokio::test]
async fn test_view_code_missing_artifact() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);
    let (status, body) = call(&state, "GET", "/api/shellcodes/10", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Sorry! This file does not exist :(");
}

#[tokio::test]
async fn test_view_code_unknown_record() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);
    let (status, body) = call(&state, "GET", "/api/exploits/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_search_skips_corrupt_rows() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("catalog.db");
    let db = Database::new(db_path.to_str().unwrap()).unwrap();
    seed(&db);
    rusqlite::Connection::open(&db_path)
        .unwrap()
        .execute(
            "INSERT INTO searcher_exploit (id, file, description, date) VALUES (99, 'x', 'apache junk', 'not-a-date')",
            [],
        )
        .unwrap();
    let state = AppState {
        db,
        artifacts_dir: dir.path().to_path_buf(),
        retry: RetryConfig { max_retries: 2 },
    };

    let (status, body) = call(&state, "POST", "/api/search", Some(json!({"search_text": "apache"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["exploits_results"]), vec![2]);

    let (status, body) = call(&state, "POST", "/api/search/advanced", Some(json!({"search_text": "apache"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["exploits_results"]), vec![2]);

    let (status, _) = call(&state, "GET", "/api/filters", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_advanced_suggested_link_escapes_slashes() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);
    call(
        &state,
        "POST",
        "/api/suggestions",
        Some(json!({"searched": "smb", "suggestion": "smb/cifs", "autoreplacement": 0})),
    )
    .await;

    let (status, body) = call(
        &state,
        "POST",
        "/api/search/advanced",
        Some(json!({"search_text": "smb", "author": "a/b"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let link = body["relative_suggested_link"].as_str().unwrap().to_string();
    assert_eq!(link, "smb%2Fcifs/0/0/0/a%2Fb/None/None/None");

    let (status, body) = call(&state, "GET", &format!("/api/search/advanced/suggested/{}", link), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["form"]["search_text"], "smb/cifs");
    assert_eq!(body["form"]["author"], "a/b");
}
