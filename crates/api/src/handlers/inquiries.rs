//! Handlers for contact messages: the public Contact form and the admin inbox.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use siliconedge_core::error::CoreError;
use siliconedge_core::validation;
use siliconedge_db::models::contact::{
    ContactMessage, CreateContactMessage, UpdateContactMessage,
};
use siliconedge_db::repositories::ContactRepo;
use siliconedge_events::bus::CONTACT_RECEIVED;
use siliconedge_events::SiteEvent;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{ConfirmParams, ProcessedFilter};
use crate::response::{DataResponse, Submitted};
use crate::state::AppState;
use crate::write::with_write_timeout;

/// Confirmation returned after a contact message is stored.
pub const CONTACT_CONFIRMATION: &str = "Thank you for contacting us! We will get back to you soon.";

/// POST /api/v1/contact
///
/// Stores the message (unprocessed, server timestamp) and notifies the inbox.
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(input): Json<CreateContactMessage>,
) -> AppResult<(StatusCode, Json<Submitted<ContactMessage>>)> {
    validation::contact(
        &input.name,
        &input.subject,
        &input.email,
        &input.phone,
        &input.message,
    )?;
    let input = CreateContactMessage {
        name: input.name.trim().to_string(),
        subject: input.subject.trim().to_string(),
        email: input.email.trim().to_string(),
        phone: input.phone.trim().to_string(),
        message: input.message.trim().to_string(),
    };

    let store = state.store.clone();
    let message = with_write_timeout(state.write_timeout(), "Sending message", async move {
        ContactRepo::create(store.as_ref(), &input).await
    })
    .await?;

    tracing::info!(contact_id = %message.id, "Contact message received");
    state.event_bus.publish(
        SiteEvent::new(CONTACT_RECEIVED)
            .with_source(message.id.clone())
            .with_payload(json!({
                "name": message.name,
                "email": message.email,
                "phone": message.phone,
                "subject": message.subject,
                "message": message.message,
            })),
    );

    Ok((
        StatusCode::CREATED,
        Json(Submitted {
            data: message,
            message: CONTACT_CONFIRMATION,
        }),
    ))
}

/// GET /api/v1/admin/inquiries?processed=
pub async fn list_inquiries(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(filter): Query<ProcessedFilter>,
) -> AppResult<Json<DataResponse<Vec<ContactMessage>>>> {
    let data = ContactRepo::list(state.store.as_ref(), filter.processed).await?;
    Ok(Json(DataResponse { data }))
}

/// PATCH /api/v1/admin/inquiries/{id}
pub async fn update_inquiry(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateContactMessage>,
) -> AppResult<Json<DataResponse<ContactMessage>>> {
    let store = state.store.clone();
    let target = id.clone();
    let updated = with_write_timeout(state.write_timeout(), "Updating message", async move {
        ContactRepo::update(store.as_ref(), &target, &input).await
    })
    .await?
    .ok_or_else(|| CoreError::not_found("ContactMessage", &id))?;

    tracing::info!(
        contact_id = %id,
        processed = updated.processed,
        user_id = %admin.user_id,
        "Contact message updated"
    );
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/admin/inquiries/{id}?confirm=true
pub async fn delete_inquiry(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(confirm): Query<ConfirmParams>,
) -> AppResult<StatusCode> {
    confirm.require("a message")?;

    let store = state.store.clone();
    let target = id.clone();
    let deleted = with_write_timeout(state.write_timeout(), "Deleting message", async move {
        ContactRepo::delete(store.as_ref(), &target).await
    })
    .await?;

    if !deleted {
        return Err(CoreError::not_found("ContactMessage", &id).into());
    }
    tracing::info!(contact_id = %id, user_id = %admin.user_id, "Contact message deleted");
    Ok(StatusCode::NO_CONTENT)
}
