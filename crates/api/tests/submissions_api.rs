//! Tests for visitor submissions (contact messages and job applications)
//! and their admin inboxes.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, patch_json_auth, post_json, post_multipart, MultipartBody};
use serde_json::json;
use siliconedge_db::repositories::{ApplicationRepo, ContactRepo};

const PDF: &[u8] = b"%PDF-1.4\n% test resume\n";

fn application_form() -> MultipartBody {
    MultipartBody::new()
        .text("name", "Ana Rao")
        .text("email", "ana@x.com")
        .text("phone", "+91 98450 12345")
        .text("message", "Five years of UVM.")
        .text("job_title", "DV Engineer")
}

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

#[tokio::test]
async fn contact_submission_stores_exactly_one_message() {
    let test = common::build_test_app();
    let mut events = test.events.subscribe();

    let body = json!({
        "name": "Jane",
        "subject": "Inquiry",
        "email": "jane@x.com",
        "phone": "",
        "message": "Hello",
    });
    let response = post_json(test.app(), "/api/v1/contact", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(
        json["message"],
        "Thank you for contacting us! We will get back to you soon."
    );
    assert_eq!(json["data"]["name"], "Jane");
    assert_eq!(json["data"]["processed"], false);
    assert!(json["data"]["created_at"].is_string());

    let stored = ContactRepo::list(test.store.as_ref(), None).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].subject, "Inquiry");
    assert_eq!(stored[0].phone, "");

    let event = events.try_recv().expect("an event should be published");
    assert_eq!(event.event_type, "contact.received");
    assert_eq!(event.source_id.as_deref(), Some(stored[0].id.as_str()));
    assert_eq!(event.payload["email"], "jane@x.com");
}

#[tokio::test]
async fn invalid_contact_is_rejected_and_not_stored() {
    let test = common::build_test_app();
    let body = json!({
        "name": "Jane",
        "subject": "Inquiry",
        "email": "not-an-email",
        "message": "Hello",
    });

    let response = post_json(test.app(), "/api/v1/contact", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    assert_eq!(ContactRepo::count(test.store.as_ref()).await.unwrap(), 0);
}

#[tokio::test]
async fn inquiries_can_be_marked_processed_and_filtered() {
    let test = common::build_test_app();
    let token = common::admin_token(&test).await;

    for name in ["Jane", "Raj"] {
        let body = json!({
            "name": name,
            "subject": "Quote",
            "email": "x@y.com",
            "message": "Need a DFT team.",
        });
        post_json(test.app(), "/api/v1/contact", body).await;
    }

    let json = body_json(get_auth(test.app(), "/api/v1/admin/inquiries", &token).await).await;
    let newest = json["data"][0].clone();
    assert_eq!(newest["name"], "Raj");

    let id = newest["id"].as_str().unwrap();
    let response = patch_json_auth(
        test.app(),
        &format!("/api/v1/admin/inquiries/{id}"),
        json!({ "processed": true }),
        &token,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["processed"], true);

    let json = body_json(
        get_auth(test.app(), "/api/v1/admin/inquiries?processed=false", &token).await,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["name"], "Jane");

    let response = delete_auth(
        test.app(),
        &format!("/api/v1/admin/inquiries/{id}?confirm=true"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(ContactRepo::count(test.store.as_ref()).await.unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

#[tokio::test]
async fn application_uploads_resume_and_stores_record() {
    let test = common::build_test_app();
    let mut events = test.events.subscribe();

    let form = application_form().file("resume", "Ana CV.pdf", "application/pdf", PDF);
    let response = post_multipart(test.app(), "/api/v1/applications", form, None).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Your application has been submitted successfully.");
    let resume_url = json["data"]["resume_url"].as_str().unwrap();
    assert!(resume_url.starts_with("/files/resumes/"), "{resume_url}");
    assert!(resume_url.ends_with("_Ana_CV.pdf"), "{resume_url}");
    assert_eq!(json["data"]["processed"], false);

    let files = test.uploaded_files("resumes");
    assert_eq!(files.len(), 1);
    assert!(resume_url.ends_with(&files[0]));

    assert_eq!(ApplicationRepo::count(test.store.as_ref()).await.unwrap(), 1);
    let event = events.try_recv().expect("an event should be published");
    assert_eq!(event.event_type, "application.received");
    assert_eq!(event.payload["job_title"], "DV Engineer");
}

#[tokio::test]
async fn uploaded_resume_is_served_under_files() {
    let test = common::build_test_app();
    let form = application_form().file("resume", "cv.pdf", "application/pdf", PDF);
    let json = body_json(post_multipart(test.app(), "/api/v1/applications", form, None).await).await;
    let resume_url = json["data"]["resume_url"].as_str().unwrap().to_string();

    let response = common::get(test.app(), &resume_url).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn application_without_resume_is_rejected() {
    let test = common::build_test_app();
    let response = post_multipart(test.app(), "/api/v1/applications", application_form(), None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Missing required 'resume' file"
    );
    assert_eq!(ApplicationRepo::count(test.store.as_ref()).await.unwrap(), 0);
}

#[tokio::test]
async fn application_rejects_unsupported_file_type() {
    let test = common::build_test_app();
    let form = application_form().file("resume", "cv.exe", "application/octet-stream", b"MZ");

    let response = post_multipart(test.app(), "/api/v1/applications", form, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(test.uploaded_files("resumes").is_empty());
}

#[tokio::test]
async fn failed_store_write_removes_uploaded_resume() {
    let test = common::build_test_app();
    test.store.fail_inserts(true);

    let form = application_form().file("resume", "cv.pdf", "application/pdf", PDF);
    let response = post_multipart(test.app(), "/api/v1/applications", form, None).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(test.uploaded_files("resumes").is_empty());
    assert_eq!(ApplicationRepo::count(test.store.as_ref()).await.unwrap(), 0);
}

#[tokio::test]
async fn applications_can_be_processed_and_deleted() {
    let test = common::build_test_app();
    let token = common::admin_token(&test).await;
    let form = application_form().file("resume", "cv.pdf", "application/pdf", PDF);
    post_multipart(test.app(), "/api/v1/applications", form, None).await;

    let json = body_json(get_auth(test.app(), "/api/v1/admin/applications", &token).await).await;
    let id = json["data"][0]["id"].as_str().unwrap().to_string();

    let response = patch_json_auth(
        test.app(),
        &format!("/api/v1/admin/applications/{id}"),
        json!({ "processed": true }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ApplicationRepo::count_unprocessed(test.store.as_ref()).await.unwrap(), 0);

    let response = delete_auth(test.app(), &format!("/api/v1/admin/applications/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = delete_auth(
        test.app(),
        &format!("/api/v1/admin/applications/{id}?confirm=true"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(ApplicationRepo::count(test.store.as_ref()).await.unwrap(), 0);
}
