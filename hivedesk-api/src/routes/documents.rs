/// Document endpoints
///
/// # Endpoints
///
/// - `GET /:name/:role/documents` - HR sees all documents, an employee only
///   their own; both paginated
/// - `POST /:name/:role/documents/upload` - Multipart upload; metadata is
///   recorded only after the blob write succeeds
/// - `POST /:name/:role/documents/:document_id/verify` - HR review decision

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use hivedesk_shared::{
    auth::{authorization::authorize, middleware::CurrentUser},
    models::{
        document::{CreateDocument, Document, DocumentType, VerificationStatus},
        task::Task,
        user::Role,
    },
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    pagination::{PageParams, Paginated},
    storage::DocumentStorage,
};

/// Upload acknowledgement
#[derive(Debug, Serialize)]
pub struct DocumentUploadResponse {
    /// Human-readable outcome
    pub message: String,

    /// ID of the recorded document
    pub document_id: Uuid,
}

/// Verification decision payload
#[derive(Debug, Deserialize)]
pub struct VerifyDocumentRequest {
    /// "approved" or "rejected"; "pending" is not a decision
    pub decision: VerificationStatus,
}

/// Lists documents for the target identity
pub async fn list_documents(
    State(state): State<AppState>,
    Path((name, role)): Path<(String, String)>,
    Query(params): Query<PageParams>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Paginated<Document>>> {
    authorize(&user, &name, &role, None)?;

    let (items, total) = match user.role {
        Role::Hr => {
            let total = Document::count_all(&state.db).await?;
            let items = Document::list_all(&state.db, params.limit(), params.offset()).await?;
            (items, total)
        }
        Role::Employee => {
            let total = Document::count_by_employee(&state.db, user.id).await?;
            let items =
                Document::list_by_employee(&state.db, user.id, params.limit(), params.offset())
                    .await?;
            (items, total)
        }
    };

    Ok(Json(Paginated::new(items, total, &params)))
}

/// Uploads a document for the authenticated principal
///
/// Multipart fields:
///
/// - `file` (required): the blob, with filename and content type
/// - `document_type` (required): one of the closed document-type set,
///   matched case-insensitively
/// - `task_id` (optional): the task this upload satisfies
///
/// The blob is written to storage first; the metadata row is only created
/// once the write succeeded, so a storage fault leaves no dangling record.
pub async fn upload_document(
    State(state): State<AppState>,
    Path((name, role)): Path<(String, String)>,
    CurrentUser(user): CurrentUser,
    mut multipart: Multipart,
) -> ApiResult<Json<DocumentUploadResponse>> {
    authorize(&user, &name, &role, None)?;

    let mut file_bytes: Option<Vec<u8>> = None;
    let mut original_filename: Option<String> = None;
    let mut mime_type: Option<String> = None;
    let mut document_type_raw: Option<String> = None;
    let mut task_id_raw: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string());
        match field_name.as_deref() {
            Some("file") => {
                original_filename = field.file_name().map(|s| s.to_string());
                mime_type = field.content_type().map(|s| s.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;
                file_bytes = Some(bytes.to_vec());
            }
            Some("document_type") => {
                document_type_raw = Some(field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read document_type: {}", e))
                })?);
            }
            Some("task_id") => {
                task_id_raw = Some(field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read task_id: {}", e))
                })?);
            }
            _ => {}
        }
    }

    let file_bytes =
        file_bytes.ok_or_else(|| ApiError::validation("file", "File field is required"))?;
    let original_filename = original_filename
        .ok_or_else(|| ApiError::validation("file", "Uploaded file must have a filename"))?;

    let document_type_raw = document_type_raw
        .ok_or_else(|| ApiError::validation("document_type", "Document type is required"))?;
    let document_type = DocumentType::parse(&document_type_raw)
        .ok_or_else(|| ApiError::validation("document_type", "Invalid document type"))?;

    let task_id = match task_id_raw.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => {
            let id = raw
                .parse::<Uuid>()
                .map_err(|_| ApiError::validation("task_id", "Invalid task id"))?;
            Task::find_by_id(&state.db, id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;
            Some(id)
        }
        None => None,
    };

    let storage_ref = DocumentStorage::storage_ref(user.id, document_type, &original_filename);
    let path = state.storage.save(&storage_ref, &file_bytes).await?;

    let document = Document::create(
        &state.db,
        CreateDocument {
            employee_id: user.id,
            document_type,
            original_filename,
            file_path: path.to_string_lossy().into_owned(),
            file_size: file_bytes.len() as i64,
            mime_type,
            task_id,
        },
    )
    .await?;

    Ok(Json(DocumentUploadResponse {
        message: "Document uploaded successfully".to_string(),
        document_id: document.id,
    }))
}

/// Records an HR verification decision on a pending document
///
/// The decision must be `approved` or `rejected`. A document that has
/// already been reviewed is never touched again: `verified_at` is set once.
pub async fn verify_document(
    State(state): State<AppState>,
    Path((name, role, document_id)): Path<(String, String, Uuid)>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<VerifyDocumentRequest>,
) -> ApiResult<Json<Document>> {
    authorize(&user, &name, &role, Some(Role::Hr))?;

    if !req.decision.is_decision() {
        return Err(ApiError::validation(
            "decision",
            "Decision must be approved or rejected",
        ));
    }

    match Document::verify(&state.db, document_id, req.decision).await? {
        Some(document) => Ok(Json(document)),
        None => {
            // Distinguish a missing document from one already reviewed
            match Document::find_by_id(&state.db, document_id).await? {
                Some(_) => Err(ApiError::Conflict("Document already verified".to_string())),
                None => Err(ApiError::NotFound("Document not found".to_string())),
            }
        }
    }
}
