// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn deserializes_api_payload() {
    let json = r###"[
        {
            "artifacts_expire_at": "2023-03-12T19:59:33.250Z",
            "commit": { "id": "2121212121212121212121212121212121212121" },
            "id": 12345678,
            "name": "jobA",
            "ref": "main",
            "status": "success",
            "web_url": "https://gitlab.localhost/grp/proj/-/jobs/12345678"
        }
    ]"###;
    let jobs: Vec<JobRecord> = serde_json::from_str(json).unwrap();
    assert_eq!(
        jobs,
        vec![JobRecord {
            id: 12345678,
            name: "jobA".to_string(),
            job_ref: "main".to_string(),
            status: "success".to_string(),
            commit: CommitRef { id: "2121212121212121212121212121212121212121".to_string() },
            artifacts_expire_at: Some("2023-03-12T19:59:33.250Z".to_string()),
            web_url: "https://gitlab.localhost/grp/proj/-/jobs/12345678".to_string(),
        }]
    );
}

#[test]
fn optional_fields_default() {
    let json = r###"{
        "id": 1,
        "name": "jobA",
        "ref": "main",
        "status": "success",
        "commit": { "id": "abc" }
    }"###;
    let job: JobRecord = serde_json::from_str(json).unwrap();
    assert_eq!(job.artifacts_expire_at, None);
    assert_eq!(job.web_url, "");
}
