use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header,
};
use tracing::debug;

use crate::core::error::AppError;
use crate::core::extractor::AppJson;
use crate::features::issues::dtos::{CreateIssueDto, IssueImage};

/// Issue submission read from either a JSON body or a multipart form
#[derive(Debug)]
pub struct IssueSubmission {
    pub dto: CreateIssueDto,
    pub image: Option<IssueImage>,
}

impl<S> FromRequest<S> for IssueSubmission
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            return match AppJson::<CreateIssueDto>::from_request(req, state).await {
                Ok(AppJson(dto)) => Ok(Self { dto, image: None }),
                Err(rejection) => Err(rejection.into()),
            };
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid multipart form: {}", e)))?;

        read_form(&mut multipart).await
    }
}

async fn read_form(multipart: &mut Multipart) -> Result<IssueSubmission, AppError> {
    let mut dto = CreateIssueDto::default();
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == "image" {
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let data = field.bytes().await.map_err(|e| {
                AppError::BadRequest(format!("Failed to read image data: {}", e))
            })?;

            // Browsers send an empty part when no file was picked
            if !data.is_empty() {
                image = Some(IssueImage {
                    data: data.to_vec(),
                    content_type,
                });
            }
            continue;
        }

        let text = field.text().await.map_err(|e| {
            AppError::BadRequest(format!("Failed to read field '{}': {}", field_name, e))
        })?;

        match field_name.as_str() {
            "title" => dto.title = Some(text),
            "description" => dto.description = Some(text),
            "latitude" => dto.latitude = parse_coordinate("Latitude", &text)?,
            "longitude" => dto.longitude = parse_coordinate("Longitude", &text)?,
            "image_url" => dto.image_url = Some(text),
            _ => debug!("Ignoring unknown field: {}", field_name),
        }
    }

    Ok(IssueSubmission { dto, image })
}

/// Blank means absent; anything else must be a finite number
fn parse_coordinate(name: &str, raw: &str) -> Result<Option<f64>, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or_else(|| AppError::Validation(format!("{} must be a number", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("Latitude", " 45.74 ").unwrap(), Some(45.74));
        assert_eq!(parse_coordinate("Latitude", "0").unwrap(), Some(0.0));
        assert_eq!(parse_coordinate("Latitude", "  ").unwrap(), None);
        for raw in ["east", "NaN", "inf", "-infinity"] {
            assert!(matches!(
                parse_coordinate("Longitude", raw),
                Err(AppError::Validation(_))
            ));
        }
    }
}
