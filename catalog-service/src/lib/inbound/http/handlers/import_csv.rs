use axum::extract::Multipart;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::MessageKey;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportCsvResponseData {
    pub imported: usize,
    pub ids: Vec<String>,
}

pub async fn import_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<ApiSuccess<ImportCsvResponseData>, ApiError> {
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation("file", e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::validation("file", e.to_string()))?;
            file = Some((filename, bytes.to_vec()));
            break;
        }
    }

    let (filename, data) =
        file.ok_or_else(|| ApiError::validation("file", "Missing multipart field 'file'"))?;

    // Weak extension check, by name only; rejected before any parsing.
    if !filename.to_lowercase().ends_with(".csv") {
        tracing::warn!(filename = %filename, "CSV import rejected, not a .csv file");
        return Err(ApiError::FileMustBeCsv);
    }

    let report = state
        .book_service
        .import_books(&data)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageKey::CsvImported,
        ImportCsvResponseData {
            imported: report.imported,
            ids: report.ids.iter().map(|id| id.to_string()).collect(),
        },
    ))
}
