/// Uploaded document metadata and verification state
///
/// The blob itself lives in document storage; this model only records
/// metadata and the storage reference. Verification is HR-controlled and
/// one-shot: a document moves out of `pending` exactly once.
///
/// # State Machine
///
/// ```text
/// pending → approved
///         → rejected
/// ```
///
/// # Schema
///
/// ```sql
/// CREATE TYPE verification_status AS ENUM ('pending', 'approved', 'rejected');
/// CREATE TYPE document_type AS ENUM (
///     'id_proof', 'resume', 'contract', 'certificate', 'tax_form', 'other'
/// );
///
/// CREATE TABLE documents (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     employee_id UUID NOT NULL REFERENCES users(id),
///     document_type document_type NOT NULL,
///     original_filename VARCHAR(512) NOT NULL,
///     file_path VARCHAR(1024) NOT NULL,
///     file_size BIGINT NOT NULL,
///     mime_type VARCHAR(255),
///     task_id UUID REFERENCES tasks(id) ON DELETE SET NULL,
///     verification_status verification_status NOT NULL DEFAULT 'pending',
///     uploaded_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     verified_at TIMESTAMPTZ
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Closed set of accepted document kinds
///
/// Upload requests carry the kind as a string; parsing is case-insensitive
/// and anything outside this set is a validation error, never coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "document_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Government-issued identification
    IdProof,

    /// Resume / CV
    Resume,

    /// Signed employment contract
    Contract,

    /// Professional certificate
    Certificate,

    /// Tax paperwork
    TaxForm,

    /// Anything else HR asked for
    Other,
}

impl DocumentType {
    /// Converts the document type to its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::IdProof => "id_proof",
            DocumentType::Resume => "resume",
            DocumentType::Contract => "contract",
            DocumentType::Certificate => "certificate",
            DocumentType::TaxForm => "tax_form",
            DocumentType::Other => "other",
        }
    }

    /// Parses a document type case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "id_proof" => Some(DocumentType::IdProof),
            "resume" => Some(DocumentType::Resume),
            "contract" => Some(DocumentType::Contract),
            "certificate" => Some(DocumentType::Certificate),
            "tax_form" => Some(DocumentType::TaxForm),
            "other" => Some(DocumentType::Other),
            _ => None,
        }
    }
}

/// HR approval state of an uploaded document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "verification_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    /// Awaiting HR review
    Pending,

    /// Accepted by HR
    Approved,

    /// Rejected by HR
    Rejected,
}

impl VerificationStatus {
    /// Converts status to its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Approved => "approved",
            VerificationStatus::Rejected => "rejected",
        }
    }

    /// Whether this status is a valid verification decision
    ///
    /// Only `approved` and `rejected` can be the outcome of a review;
    /// `pending` is the starting state, not a decision.
    pub fn is_decision(&self) -> bool {
        matches!(self, VerificationStatus::Approved | VerificationStatus::Rejected)
    }
}

/// Uploaded document metadata
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Document {
    /// Unique document ID
    pub id: Uuid,

    /// Owning employee
    pub employee_id: Uuid,

    /// Kind of document
    pub document_type: DocumentType,

    /// Filename as uploaded by the employee
    pub original_filename: String,

    /// Storage reference, namespaced by employee and type
    pub file_path: String,

    /// Size in bytes
    pub file_size: i64,

    /// MIME type reported at upload, if any
    pub mime_type: Option<String>,

    /// Task this upload satisfies, if the employee linked one
    pub task_id: Option<Uuid>,

    /// HR review state
    pub verification_status: VerificationStatus,

    /// When the document was uploaded
    pub uploaded_at: DateTime<Utc>,

    /// When HR reviewed it; set once and never changed
    pub verified_at: Option<DateTime<Utc>>,
}

/// Input for recording a new upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocument {
    /// Owning employee
    pub employee_id: Uuid,

    /// Kind of document
    pub document_type: DocumentType,

    /// Filename as uploaded
    pub original_filename: String,

    /// Storage reference the blob was written under
    pub file_path: String,

    /// Size in bytes
    pub file_size: i64,

    /// MIME type, if the client sent one
    pub mime_type: Option<String>,

    /// Task this upload satisfies, if any
    pub task_id: Option<Uuid>,
}

impl Document {
    /// Records an upload; the document starts pending review
    pub async fn create(pool: &PgPool, data: CreateDocument) -> Result<Self, sqlx::Error> {
        let document = sqlx::query_as::<_, Document>(
            r#"
            INSERT INTO documents (employee_id, document_type, original_filename, file_path,
                                   file_size, mime_type, task_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, employee_id, document_type, original_filename, file_path, file_size,
                      mime_type, task_id, verification_status, uploaded_at, verified_at
            "#,
        )
        .bind(data.employee_id)
        .bind(data.document_type)
        .bind(data.original_filename)
        .bind(data.file_path)
        .bind(data.file_size)
        .bind(data.mime_type)
        .bind(data.task_id)
        .fetch_one(pool)
        .await?;

        Ok(document)
    }

    /// Finds a document by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let document = sqlx::query_as::<_, Document>(
            r#"
            SELECT id, employee_id, document_type, original_filename, file_path, file_size,
                   mime_type, task_id, verification_status, uploaded_at, verified_at
            FROM documents
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(document)
    }

    /// Records an HR verification decision
    ///
    /// Only a document still in `pending` is touched; once `verified_at` is
    /// set the row never changes again, so re-review returns `None`.
    pub async fn verify(
        pool: &PgPool,
        id: Uuid,
        decision: VerificationStatus,
    ) -> Result<Option<Self>, sqlx::Error> {
        let document = sqlx::query_as::<_, Document>(
            r#"
            UPDATE documents
            SET verification_status = $2,
                verified_at = NOW()
            WHERE id = $1 AND verification_status = 'pending'
            RETURNING id, employee_id, document_type, original_filename, file_path, file_size,
                      mime_type, task_id, verification_status, uploaded_at, verified_at
            "#,
        )
        .bind(id)
        .bind(decision)
        .fetch_optional(pool)
        .await?;

        Ok(document)
    }

    /// Lists all documents with pagination, newest upload first
    pub async fn list_all(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Self>, sqlx::Error> {
        let documents = sqlx::query_as::<_, Document>(
            r#"
            SELECT id, employee_id, document_type, original_filename, file_path, file_size,
                   mime_type, task_id, verification_status, uploaded_at, verified_at
            FROM documents
            ORDER BY uploaded_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(documents)
    }

    /// Lists one employee's documents with pagination, newest upload first
    pub async fn list_by_employee(
        pool: &PgPool,
        employee_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let documents = sqlx::query_as::<_, Document>(
            r#"
            SELECT id, employee_id, document_type, original_filename, file_path, file_size,
                   mime_type, task_id, verification_status, uploaded_at, verified_at
            FROM documents
            WHERE employee_id = $1
            ORDER BY uploaded_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(employee_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(documents)
    }

    /// Lists all of one employee's documents, for the HR manage view
    pub async fn list_all_by_employee(
        pool: &PgPool,
        employee_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let documents = sqlx::query_as::<_, Document>(
            r#"
            SELECT id, employee_id, document_type, original_filename, file_path, file_size,
                   mime_type, task_id, verification_status, uploaded_at, verified_at
            FROM documents
            WHERE employee_id = $1
            ORDER BY uploaded_at DESC
            "#,
        )
        .bind(employee_id)
        .fetch_all(pool)
        .await?;

        Ok(documents)
    }

    /// Counts all documents
    pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM documents")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Counts one employee's documents
    pub async fn count_by_employee(pool: &PgPool, employee_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM documents WHERE employee_id = $1")
                .bind(employee_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }

    /// Counts documents still awaiting review
    pub async fn count_pending(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM documents WHERE verification_status = 'pending'",
        )
        .fetch_one(pool)
        .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_parse_case_insensitive() {
        assert_eq!(DocumentType::parse("id_proof"), Some(DocumentType::IdProof));
        assert_eq!(DocumentType::parse("ID_PROOF"), Some(DocumentType::IdProof));
        assert_eq!(DocumentType::parse("Resume"), Some(DocumentType::Resume));
        assert_eq!(DocumentType::parse("CONTRACT"), Some(DocumentType::Contract));
        assert_eq!(DocumentType::parse("tax_form"), Some(DocumentType::TaxForm));
    }

    #[test]
    fn test_document_type_parse_rejects_unknown() {
        assert_eq!(DocumentType::parse("passport"), None);
        assert_eq!(DocumentType::parse("id-proof"), None);
        assert_eq!(DocumentType::parse(""), None);
    }

    #[test]
    fn test_document_type_round_trip() {
        for ty in [
            DocumentType::IdProof,
            DocumentType::Resume,
            DocumentType::Contract,
            DocumentType::Certificate,
            DocumentType::TaxForm,
            DocumentType::Other,
        ] {
            assert_eq!(DocumentType::parse(ty.as_str()), Some(ty));
        }
    }

    #[test]
    fn test_verification_decision() {
        assert!(!VerificationStatus::Pending.is_decision());
        assert!(VerificationStatus::Approved.is_decision());
        assert!(VerificationStatus::Rejected.is_decision());
    }
}
