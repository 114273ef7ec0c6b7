// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tg_core::CommitRef;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE_JSON: &str = r###"[
  {
    "artifacts_expire_at": "2023-03-12T19:59:33.250Z",
    "commit": { "id": "2121212121212121212121212121212121212121" },
    "id": 12345678,
    "name": "jobA",
    "ref": "main",
    "status": "success",
    "web_url": "https://gitlab.localhost/grp/proj/-/jobs/12345678"
  },
  {
    "artifacts_expire_at": null,
    "commit": { "id": "3333333333333333333333333333333333333333" },
    "id": 12345679,
    "name": "jobA",
    "ref": "topic",
    "status": "success",
    "web_url": "https://gitlab.localhost/grp/proj/-/jobs/12345679"
  }
]"###;

#[tokio::test]
async fn fetches_a_page_of_successful_jobs() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects/123/jobs"))
        .and(query_param("scope", "success"))
        .and(query_param("per_page", "100"))
        .and(query_param("page", "2"))
        .and(header("PRIVATE-TOKEN", "tok"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PAGE_JSON, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let client = GitlabJobsClient::new(format!("{}/projects/123/jobs", server.uri()), "tok");
    let jobs = client.successful_jobs(2).await.unwrap();

    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].id, 12345678);
    assert_eq!(jobs[0].job_ref, "main");
    assert_eq!(jobs[0].commit, CommitRef { id: "2121212121212121212121212121212121212121".into() });
    assert_eq!(jobs[1].artifacts_expire_at, None);
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects/123/jobs"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = GitlabJobsClient::new(format!("{}/projects/123/jobs", server.uri()), "tok");
    let err = client.successful_jobs(1).await.unwrap_err();
    assert!(matches!(err, ApiError::Status(403)));
}

#[tokio::test]
async fn unreachable_server_is_an_error() {
    let client = GitlabJobsClient::new("http://127.0.0.1:1/projects/123/jobs", "tok");
    let err = client.successful_jobs(1).await.unwrap_err();
    assert!(matches!(err, ApiError::Request(_)));
}

#[tokio::test]
async fn fake_serves_pages_in_order() {
    let fake = FakeJobsApi::new();
    fake.push_page(vec![job(1)]);
    fake.push_page(vec![job(2)]);

    assert_eq!(fake.successful_jobs(1).await.unwrap()[0].id, 1);
    assert_eq!(fake.successful_jobs(2).await.unwrap()[0].id, 2);
    assert!(fake.successful_jobs(3).await.unwrap().is_empty());
    assert_eq!(fake.fetched_pages(), vec![1, 2, 3]);
}

fn job(id: u64) -> tg_core::JobRecord {
    tg_core::JobRecord {
        id,
        name: "jobA".to_string(),
        job_ref: "main".to_string(),
        status: "success".to_string(),
        commit: CommitRef { id: format!("c{id}") },
        artifacts_expire_at: None,
        web_url: String::new(),
    }
}
