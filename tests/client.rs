//
//  samplify
//  tests/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use mockito::{Matcher, Server};
use serde_json::json;
use tokio::net::TcpListener;

use samplify::api::line_items::{CreateLineItemCriteria, LineItemAction, LineItemState, UpdateLineItemCriteria};
use samplify::api::projects::{BuyProjectCriteria, CreateProjectCriteria, ProjectState, UpdateProjectCriteria};
use samplify::api::query::{QueryField, QueryOptions, SortDirection};
use samplify::{AccessToken, ClientOptions, Credentials, ErrorKind, SamplifyClient, SamplifyError};

const AUTH_PATH: &str = "/auth/v1/token/password";

fn options_for(server: &Server) -> ClientOptions {
    ClientOptions::default()
        .with_api_base_url(server.url())
        .with_auth_url(format!("{}{}", server.url(), AUTH_PATH))
}

/// Client holding a token that stays valid for the whole test.
fn authed_client(server: &Server) -> SamplifyClient {
    SamplifyClient::new(Credentials::new("client-id", "client-secret"), options_for(server))
        .unwrap()
        .with_access_token(AccessToken::new("held-token", Utc::now(), 1800))
}

fn project_body() -> String {
    json!({
        "data": {"extProjectId": "test", "title": "Samplify Client Test", "state": "PROVISIONED"}
    })
    .to_string()
}

fn line_item_body() -> String {
    json!({
        "data": {
            "extLineItemId": "test-lineitem-id",
            "title": "UK adults",
            "state": "PROVISIONED",
            "countryISOCode": "GB",
            "languageISOCode": "en"
        }
    })
    .to_string()
}

fn list_body() -> String {
    json!({"data": []}).to_string()
}

fn line_item_criteria() -> CreateLineItemCriteria {
    serde_json::from_value(json!({
        "extLineItemId": "test-lineitem-id",
        "title": "UK adults",
        "countryISOCode": "GB",
        "languageISOCode": "en",
        "indicativeIncidence": 20.0,
        "daysInField": 20,
        "lengthOfInterview": 10,
        "requiredCompletes": 200
    }))
    .unwrap()
}

#[tokio::test]
async fn test_every_resource_method_hits_its_path() {
    let mut server = Server::new_async().await;
    let bearer = "Bearer held-token";

    let routes: Vec<(&str, &str, String)> = vec![
        ("POST", "/projects", project_body()),
        ("PUT", "/projects/test", project_body()),
        (
            "POST",
            "/projects/test/buy",
            json!({"data": [{"extLineItemId": "test-lineitem-id", "state": "AWAITING_APPROVAL"}]}).to_string(),
        ),
        ("POST", "/projects/test/close", project_body()),
        ("GET", "/projects", list_body()),
        ("GET", "/projects/test", project_body()),
        (
            "GET",
            "/projects/test/report",
            json!({"data": {"extProjectId": "test", "state": "LAUNCHED", "completes": 12}}).to_string(),
        ),
        ("POST", "/projects/test/lineItems", line_item_body()),
        ("PUT", "/projects/test-prj-id/lineItems/test-lineitem-id", line_item_body()),
        (
            "POST",
            "/projects/test-prj-id/lineItems/test-lineitem-id/launch",
            json!({"data": {"extLineItemId": "test-lineitem-id", "state": "LAUNCHED"}}).to_string(),
        ),
        ("GET", "/projects/test/lineItems", list_body()),
        ("GET", "/projects/test-prj-id/lineItems/test-lineitem-id", line_item_body()),
        ("GET", "/projects/test/feasibility", list_body()),
        ("GET", "/countries", list_body()),
        ("GET", "/attributes/GB/en", list_body()),
        ("GET", "/categories/surveyTopics", list_body()),
    ];

    let mut mocks = Vec::new();
    for (method, path, body) in &routes {
        let mock = server
            .mock(*method, *path)
            .match_header("authorization", bearer)
            .with_status(200)
            .with_body(body)
            .expect(1)
            .create_async()
            .await;
        mocks.push(mock);
    }
    let auth = server.mock("POST", AUTH_PATH).expect(0).create_async().await;

    let client = authed_client(&server);

    let create: CreateProjectCriteria = serde_json::from_value(json!({
        "extProjectId": "test",
        "title": "Samplify Client Test",
        "category": {"surveyTopic": ["AUTOMOTIVE"]}
    }))
    .unwrap();
    client.create_project(&create).await.unwrap();

    let update = UpdateProjectCriteria {
        ext_project_id: "test".to_string(),
        title: Some("Renamed".to_string()),
        ..Default::default()
    };
    client.update_project(&update).await.unwrap();

    let buy = [BuyProjectCriteria {
        ext_line_item_id: "test-lineitem-id".to_string(),
        survey_url: "https://survey.example.com/live".to_string(),
        survey_test_url: "https://survey.example.com/test".to_string(),
    }];
    let bought = client.buy_project("test", &buy).await.unwrap();
    assert_eq!(bought.data[0].state, LineItemState::AwaitingApproval);

    client.close_project("test").await.unwrap();
    client.get_all_projects(None).await.unwrap();
    client.get_project_by("test").await.unwrap();

    let report = client.get_project_report("test").await.unwrap();
    assert_eq!(report.data.stats.completes, 12);

    client.add_line_item("test", &line_item_criteria()).await.unwrap();
    client
        .update_line_item("test-prj-id", "test-lineitem-id", &UpdateLineItemCriteria::default())
        .await
        .unwrap();

    let change = client
        .update_line_item_state("test-prj-id", "test-lineitem-id", LineItemAction::Launch)
        .await
        .unwrap();
    assert_eq!(change.data.state, LineItemState::Launched);

    client.get_all_line_items("test", None).await.unwrap();
    client.get_line_item_by("test-prj-id", "test-lineitem-id").await.unwrap();
    client.get_feasibility("test", None).await.unwrap();
    client.get_countries(None).await.unwrap();
    client.get_attributes("GB", "en", None).await.unwrap();
    client.get_survey_topics(None).await.unwrap();

    for mock in &mocks {
        mock.assert_async().await;
    }
    auth.assert_async().await;
}

#[tokio::test]
async fn test_request_bodies_are_json() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/projects/test/lineItems")
        .match_body(Matcher::PartialJson(json!({
            "extLineItemId": "test-lineitem-id",
            "countryISOCode": "GB",
            "languageISOCode": "en",
            "requiredCompletes": 200
        })))
        .with_status(201)
        .with_body(line_item_body())
        .create_async()
        .await;

    let client = authed_client(&server);
    let response = client.add_line_item("test", &line_item_criteria()).await.unwrap();

    assert_eq!(response.data.country_iso_code, "GB");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_query_strings_are_appended_verbatim() {
    let mut server = Server::new_async().await;

    let filters_only = server
        .mock("GET", "/projects?title=Samplify+Client+Test&state=PROVISIONED")
        .with_status(200)
        .with_body(list_body())
        .create_async()
        .await;
    let sorts_only = server
        .mock("GET", "/projects?sort=createdAt:asc,extProjectId:desc")
        .with_status(200)
        .with_body(list_body())
        .create_async()
        .await;
    let both = server
        .mock("GET", "/countries?isoCode=GB&sort=name:asc")
        .with_status(200)
        .with_body(list_body())
        .create_async()
        .await;

    let client = authed_client(&server);

    let options = QueryOptions::new()
        .filter(QueryField::Title, "Samplify Client Test")
        .filter(QueryField::State, ProjectState::Provisioned);
    client.get_all_projects(Some(&options)).await.unwrap();

    let options = QueryOptions::new()
        .sort(QueryField::CreatedAt, SortDirection::Asc)
        .sort(QueryField::ExtProjectId, SortDirection::Desc);
    client.get_all_projects(Some(&options)).await.unwrap();

    let options = QueryOptions::new()
        .filter(QueryField::IsoCode, "GB")
        .sort(QueryField::Name, SortDirection::Asc);
    client.get_countries(Some(&options)).await.unwrap();

    filters_only.assert_async().await;
    sorts_only.assert_async().await;
    both.assert_async().await;
}

#[tokio::test]
async fn test_expired_token_triggers_exactly_one_auth_call() {
    let mut server = Server::new_async().await;
    let auth = server
        .mock("POST", AUTH_PATH)
        .match_body(Matcher::Json(json!({
            "clientId": "client-id",
            "clientSecret": "client-secret",
            "grantType": "client_credentials"
        })))
        .with_status(200)
        .with_body(r#"{"accessToken": "fresh-token", "expiresIn": 1800}"#)
        .expect(1)
        .create_async()
        .await;
    let countries = server
        .mock("GET", "/countries")
        .match_header("authorization", "Bearer fresh-token")
        .with_status(200)
        .with_body(list_body())
        .expect(2)
        .create_async()
        .await;

    let client = SamplifyClient::new(Credentials::new("client-id", "client-secret"), options_for(&server))
        .unwrap()
        .with_access_token(AccessToken::new("stale-token", Utc::now() - Duration::hours(2), 1800));

    client.get_countries(None).await.unwrap();
    client.get_countries(None).await.unwrap();

    auth.assert_async().await;
    countries.assert_async().await;
    assert_eq!(client.access_token().await.unwrap().access_token, "fresh-token");
}

#[tokio::test]
async fn test_first_call_authenticates() {
    let mut server = Server::new_async().await;
    let auth = server
        .mock("POST", AUTH_PATH)
        .with_status(200)
        .with_body(r#"{"accessToken": "first-token", "expiresIn": 1800, "refreshToken": "r1"}"#)
        .expect(1)
        .create_async()
        .await;
    let _topics = server
        .mock("GET", "/categories/surveyTopics")
        .match_header("authorization", "Bearer first-token")
        .with_status(200)
        .with_body(json!({"data": [{"topic": "AUTOMOTIVE"}]}).to_string())
        .create_async()
        .await;

    let client =
        SamplifyClient::new(Credentials::new("client-id", "client-secret"), options_for(&server)).unwrap();
    assert!(client.access_token().await.is_none());

    let topics = client.get_survey_topics(None).await.unwrap();

    assert_eq!(topics.data[0].topic, "AUTOMOTIVE");
    let token = client.access_token().await.unwrap();
    assert_eq!(token.refresh_token.as_deref(), Some("r1"));
    auth.assert_async().await;
}

#[tokio::test]
async fn test_api_error_body_is_decoded() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/projects/missing")
        .with_status(404)
        .with_body(
            json!({
                "code": "NOT_FOUND",
                "message": "project not found",
                "requestId": "req-1",
                "errors": [{"field": "extProjectId", "message": "unknown id"}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = authed_client(&server);
    let err = client.get_project_by("missing").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status(), Some(404));
    match err {
        SamplifyError::Api(api) => {
            assert!(api.is_not_found());
            assert_eq!(api.code, "NOT_FOUND");
            assert_eq!(api.request_id.as_deref(), Some("req-1"));
            assert_eq!(api.field_errors[0].field.as_deref(), Some("extProjectId"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_undecodable_error_body_is_unexpected_response() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/countries")
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let client = authed_client(&server);
    let err = client.get_countries(None).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    match err {
        SamplifyError::UnexpectedResponse { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body, "Bad Gateway");
        }
        other => panic!("expected unexpected response, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rejected_credentials_skip_the_resource_call() {
    let mut server = Server::new_async().await;
    let _auth = server
        .mock("POST", AUTH_PATH)
        .with_status(401)
        .with_body("invalid client credentials")
        .create_async()
        .await;
    let resource = server.mock("GET", "/projects").expect(0).create_async().await;

    let client =
        SamplifyClient::new(Credentials::new("client-id", "wrong"), options_for(&server)).unwrap();
    let err = client.get_all_projects(None).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Authentication);
    match err {
        SamplifyError::AuthRejected { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "invalid client credentials");
        }
        other => panic!("expected rejected credentials, got {other:?}"),
    }
    assert!(client.access_token().await.is_none());
    resource.assert_async().await;
}

#[tokio::test]
async fn test_undecodable_token_response_is_authentication_error() {
    let mut server = Server::new_async().await;
    let _auth = server
        .mock("POST", AUTH_PATH)
        .with_status(200)
        .with_body(r#"{"token": "missing fields"}"#)
        .create_async()
        .await;

    let client =
        SamplifyClient::new(Credentials::new("client-id", "client-secret"), options_for(&server)).unwrap();
    let err = client.authenticate().await.unwrap_err();

    assert!(matches!(err, SamplifyError::AuthDecode(_)));
    assert_eq!(err.kind(), ErrorKind::Authentication);
}

/// Accepts connections and never answers them.
async fn silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            open.push(socket);
        }
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_resource_call_times_out_as_transport_error() {
    let url = silent_server().await;
    let options = ClientOptions::default()
        .with_api_base_url(url.clone())
        .with_auth_url(format!("{}{}", url, AUTH_PATH))
        .with_timeout(StdDuration::from_millis(200));
    let client = SamplifyClient::new(Credentials::new("client-id", "client-secret"), options)
        .unwrap()
        .with_access_token(AccessToken::new("held-token", Utc::now(), 1800));

    let err = client.get_countries(None).await.unwrap_err();

    assert!(matches!(err, SamplifyError::Network(_)));
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_auth_call_times_out_and_keeps_held_token() {
    let url = silent_server().await;
    let options = ClientOptions::default()
        .with_api_base_url(url.clone())
        .with_auth_url(format!("{}{}", url, AUTH_PATH))
        .with_timeout(StdDuration::from_millis(200));
    let stale = AccessToken::new("stale-token", Utc::now() - Duration::hours(2), 1800);
    let client = SamplifyClient::new(Credentials::new("client-id", "client-secret"), options)
        .unwrap()
        .with_access_token(stale.clone());

    let err = client.get_countries(None).await.unwrap_err();

    assert!(matches!(err, SamplifyError::AuthTransport(_)));
    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert!(err.is_timeout());
    assert_eq!(client.access_token().await, Some(stale));
}
