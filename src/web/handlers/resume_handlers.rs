// src/web/handlers/resume_handlers.rs
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, warn};

use crate::resume::{catalog, preview, render, to_html, Document, ExportFormat, TemplateInfo};
use crate::types::{ResumeData, TemplateType};
use crate::web::types::*;

/// A missing template falls back to the form default; an unknown one is rejected.
pub fn parse_template(value: Option<&str>, session_id: Option<String>) -> Result<TemplateType, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(TemplateType::from_query(None)),
        Some(id) => id.parse().map_err(|_| {
            warn!("Rejected unknown template: {}", id);
            StandardErrorResponse::new(
                format!("Unknown template '{}'", id),
                "UNKNOWN_TEMPLATE".to_string(),
                vec![format!(
                    "Use one of: {}",
                    TemplateType::ALL.map(|t| t.id()).join(", ")
                )],
                session_id,
            )
            .with_status(Status::BadRequest)
        }),
    }
}

pub async fn get_templates_handler() -> Json<DataResponse<Vec<TemplateInfo>>> {
    let templates = catalog();
    Json(DataResponse::success(
        format!("{} templates available", templates.len()),
        templates,
        None,
    ))
}

pub async fn preview_template_handler(id: &str) -> Result<RawHtml<String>, ApiError> {
    let template: TemplateType = id.parse().map_err(|_| {
        StandardErrorResponse::new(
            format!("Template '{}' not found", id),
            "TEMPLATE_NOT_FOUND".to_string(),
            vec!["GET /api/templates lists the available templates".to_string()],
            None,
        )
        .with_status(Status::NotFound)
    })?;
    Ok(RawHtml(to_html(&preview(template))))
}

pub async fn layout_handler(
    request: Json<StandardRequest<LayoutRequest>>,
) -> Result<Json<DataResponse<Document>>, ApiError> {
    let session_id = request.session_id();
    let template = parse_template(request.data.template.as_deref(), session_id.clone())?;
    let document = render(&request.data.resume, template);

    info!(
        "Laid out {} sections for {} template",
        document.sections.len(),
        template
    );

    Ok(Json(DataResponse::success(
        format!("Resume laid out with {} template", template),
        document,
        session_id,
    )))
}

pub async fn render_html_handler(
    request: Json<StandardRequest<LayoutRequest>>,
) -> Result<RawHtml<String>, ApiError> {
    let template = parse_template(request.data.template.as_deref(), request.session_id())?;
    Ok(RawHtml(to_html(&render(&request.data.resume, template))))
}

pub async fn export_handler(
    request: Json<StandardRequest<ExportRequest>>,
    state: &State<AppState>,
) -> Result<FileResponse, ApiError> {
    let session_id = request.session_id();
    let template = parse_template(request.data.template.as_deref(), session_id.clone())?;

    let format: ExportFormat = match request.data.format.as_deref() {
        None => ExportFormat::Pdf,
        Some(value) => value.parse().map_err(|e: anyhow::Error| {
            StandardErrorResponse::new(
                e.to_string(),
                "UNSUPPORTED_FORMAT".to_string(),
                vec!["Use one of: pdf, html, text".to_string()],
                session_id.clone(),
            )
            .with_status(Status::BadRequest)
        })?,
    };

    let document = render(&request.data.resume, template);
    match state.exporter.export(&document, format).await {
        Ok(artifact) => Ok(artifact.into()),
        Err(e) => {
            error!("Export failed: {}", e);
            Err(StandardErrorResponse::new(
                e.user_message().to_string(),
                e.error_code().to_string(),
                vec![
                    "Try again in a few moments".to_string(),
                    "HTML export works without the PDF converter".to_string(),
                ],
                session_id,
            )
            .with_status(Status::InternalServerError))
        }
    }
}

pub async fn prefill_handler(
    request: Json<StandardRequest<PrefillRequest>>,
) -> Json<DataResponse<ResumeData>> {
    let session_id = request.session_id();
    let data = ResumeData::from_profile_metadata(&request.data.metadata, request.data.email.as_deref());
    Json(DataResponse::success(
        "Resume pre-filled from profile".to_string(),
        data,
        session_id,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_template_defaults_and_rejects() {
        assert_eq!(parse_template(None, None).unwrap(), TemplateType::Modern);
        assert_eq!(parse_template(Some(" "), None).unwrap(), TemplateType::Modern);
        assert_eq!(parse_template(Some("tech"), None).unwrap(), TemplateType::Tech);

        let (status, body) = parse_template(Some("fancy"), Some("s1".to_string())).unwrap_err();
        assert_eq!(status, Status::BadRequest);
        assert_eq!(body.error_code, "UNKNOWN_TEMPLATE");
        assert_eq!(body.session_id.as_deref(), Some("s1"));
    }
}
