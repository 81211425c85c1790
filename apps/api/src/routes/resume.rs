use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::doc::ResumeDoc;
use crate::seed;
use crate::state::AppState;
use crate::store::{loader, writer};
use crate::update::path::{parse_path, PathInput};
use crate::update::plan::build_plan;

/// GET /api/v1/resume
/// Returns the default (oldest) résumé, seeding the fixture on first read.
pub async fn handle_get_default(
    State(state): State<AppState>,
) -> Result<Json<ResumeDoc>, AppError> {
    let id = match loader::default_resume_id(&state.db).await? {
        Some(id) => id,
        None => {
            info!("No résumé found; seeding the default fixture");
            seed::seed_default(&state.db).await?
        }
    };
    let record = loader::load_resume(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Résumé {id} not found")))?;
    Ok(Json(record.into_doc()))
}

/// GET /api/v1/resume/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeDoc>, AppError> {
    let record = loader::load_resume(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Résumé {id} not found")))?;
    Ok(Json(record.into_doc()))
}

#[derive(Deserialize)]
pub struct PatchRequest {
    pub path: PathInput,
    // An explicit JSON null must stay distinguishable from an absent key:
    // null clears nullable fields, absent is a caller error.
    #[serde(default, deserialize_with = "value_present")]
    pub value: Option<Value>,
}

fn value_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// PATCH /api/v1/resume/:id
/// Body `{path, value}`: resolves the path against the current record,
/// applies the resulting plan, and returns the reloaded document.
pub async fn handle_patch_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<PatchRequest>,
) -> Result<Json<ResumeDoc>, AppError> {
    let value = req
        .value
        .ok_or_else(|| AppError::Validation("missing 'value' in patch body".to_string()))?;
    let segments = parse_path(&req.path)?;

    let record = loader::load_resume(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Résumé {id} not found")))?;

    let plan = build_plan(&record, &segments, value)?;
    writer::apply_plan(&state.db, id, &plan).await?;

    let reloaded = loader::load_resume(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Résumé {id} not found")))?;
    Ok(Json(reloaded.into_doc()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::update::path::Segment;
    use serde_json::json;

    #[test]
    fn test_patch_body_with_dotted_path() {
        let req: PatchRequest =
            serde_json::from_value(json!({"path": "work.0.title", "value": "Staff Engineer"}))
                .unwrap();
        assert_eq!(
            parse_path(&req.path).unwrap(),
            vec![
                Segment::Field("work".into()),
                Segment::Index(0),
                Segment::Field("title".into()),
            ]
        );
        assert_eq!(req.value, Some(json!("Staff Engineer")));
    }

    #[test]
    fn test_patch_body_with_segment_array_path() {
        let req: PatchRequest =
            serde_json::from_value(json!({"path": ["skills", 2], "value": "Kubernetes"})).unwrap();
        assert_eq!(
            parse_path(&req.path).unwrap(),
            vec![Segment::Field("skills".into()), Segment::Index(2)]
        );
    }

    #[test]
    fn test_patch_body_null_value_is_present() {
        let req: PatchRequest =
            serde_json::from_value(json!({"path": "avatarUrl", "value": null})).unwrap();
        assert_eq!(req.value, Some(Value::Null));
    }

    #[test]
    fn test_patch_body_absent_value_is_missing() {
        let req: PatchRequest = serde_json::from_value(json!({"path": "avatarUrl"})).unwrap();
        assert_eq!(req.value, None);
    }
}
