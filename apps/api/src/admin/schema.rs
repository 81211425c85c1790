use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::AppError;

/// How a column renders in the admin edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Text,
    LongText,
    Url,
    Number,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub required: bool,
    /// Shown in the list view (long text stays edit-only).
    pub in_list: bool,
}

/// One entity exposed by the admin panel. The column list drives both the
/// generated SQL and the client-side form rendering.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EntitySpec {
    pub name: &'static str,
    pub table: &'static str,
    /// Foreign-key column pointing at the parent, if any.
    pub parent: Option<&'static str>,
    /// Whether rows carry a `position` column for index addressing.
    pub positioned: bool,
    pub columns: &'static [ColumnSpec],
}

const fn col(name: &'static str, kind: ColumnKind, required: bool, in_list: bool) -> ColumnSpec {
    ColumnSpec {
        name,
        kind,
        required,
        in_list,
    }
}

pub const ENTITIES: &[EntitySpec] = &[
    EntitySpec {
        name: "resume",
        table: "resumes",
        parent: None,
        positioned: false,
        columns: &[
            col("name", ColumnKind::Text, true, true),
            col("initials", ColumnKind::Text, true, true),
            col("location", ColumnKind::Text, true, true),
            col("location_link", ColumnKind::Url, false, false),
            col("about", ColumnKind::LongText, true, false),
            col("summary", ColumnKind::LongText, true, false),
            col("avatar_url", ColumnKind::Url, false, false),
            col("personal_website_url", ColumnKind::Url, false, false),
        ],
    },
    EntitySpec {
        name: "contact",
        table: "contacts",
        parent: Some("resume_id"),
        positioned: false,
        columns: &[
            col("email", ColumnKind::Text, true, true),
            col("tel", ColumnKind::Text, true, true),
        ],
    },
    EntitySpec {
        name: "social",
        table: "socials",
        parent: Some("contact_id"),
        positioned: true,
        columns: &[
            col("name", ColumnKind::Text, true, true),
            col("url", ColumnKind::Url, true, true),
        ],
    },
    EntitySpec {
        name: "education",
        table: "education",
        parent: Some("resume_id"),
        positioned: true,
        columns: &[
            col("school", ColumnKind::Text, true, true),
            col("degree", ColumnKind::Text, true, true),
            col("start_date", ColumnKind::Text, true, false),
            col("end_date", ColumnKind::Text, true, false),
        ],
    },
    EntitySpec {
        name: "work",
        table: "work",
        parent: Some("resume_id"),
        positioned: true,
        columns: &[
            col("company", ColumnKind::Text, true, true),
            col("link", ColumnKind::Url, false, false),
            col("title", ColumnKind::Text, true, true),
            col("start_date", ColumnKind::Text, true, false),
            col("end_date", ColumnKind::Text, false, false),
            col("description", ColumnKind::LongText, true, false),
        ],
    },
    EntitySpec {
        name: "work_badge",
        table: "work_badges",
        parent: Some("work_id"),
        positioned: true,
        columns: &[col("label", ColumnKind::Text, true, true)],
    },
    EntitySpec {
        name: "work_task",
        table: "work_tasks",
        parent: Some("work_id"),
        positioned: true,
        columns: &[col("task", ColumnKind::LongText, true, true)],
    },
    EntitySpec {
        name: "skill",
        table: "skills",
        parent: Some("resume_id"),
        positioned: true,
        columns: &[col("label", ColumnKind::Text, true, true)],
    },
    EntitySpec {
        name: "project",
        table: "projects",
        parent: Some("resume_id"),
        positioned: true,
        columns: &[
            col("title", ColumnKind::Text, true, true),
            col("description", ColumnKind::LongText, true, false),
        ],
    },
    EntitySpec {
        name: "project_tech",
        table: "project_tech",
        parent: Some("project_id"),
        positioned: true,
        columns: &[col("label", ColumnKind::Text, true, true)],
    },
    EntitySpec {
        name: "project_link",
        table: "project_links",
        parent: Some("project_id"),
        positioned: false,
        columns: &[
            col("label", ColumnKind::Text, true, true),
            col("href", ColumnKind::Url, true, true),
        ],
    },
];

pub fn find_entity(name: &str) -> Option<&'static EntitySpec> {
    ENTITIES.iter().find(|e| e.name == name)
}

/// Validates an admin payload against the entity's column config.
/// With `partial` set (updates), absent columns are skipped; present values
/// are still checked against their kind.
pub fn validate_payload(
    spec: &EntitySpec,
    payload: &Map<String, Value>,
    partial: bool,
) -> Result<(), AppError> {
    for column in spec.columns {
        let value = payload.get(column.name);
        match value {
            None | Some(Value::Null) => {
                let absent_ok = partial && value.is_none();
                if column.required && !absent_ok {
                    return Err(AppError::Validation(format!(
                        "field '{}' is required",
                        column.name
                    )));
                }
            }
            Some(value) => check_value(column, value)?,
        }
    }
    Ok(())
}

fn check_value(column: &ColumnSpec, value: &Value) -> Result<(), AppError> {
    match column.kind {
        ColumnKind::Text | ColumnKind::LongText => {
            let Some(s) = value.as_str() else {
                return Err(AppError::Validation(format!(
                    "field '{}' must be a string",
                    column.name
                )));
            };
            if column.required && s.trim().is_empty() {
                return Err(AppError::Validation(format!(
                    "field '{}' must not be empty",
                    column.name
                )));
            }
        }
        ColumnKind::Url => {
            let Some(s) = value.as_str() else {
                return Err(AppError::Validation(format!(
                    "field '{}' must be a URL string",
                    column.name
                )));
            };
            let well_formed = (s.starts_with("http://") || s.starts_with("https://"))
                && !s.contains(char::is_whitespace);
            if !well_formed {
                return Err(AppError::Validation(format!(
                    "field '{}' must be an http(s) URL",
                    column.name
                )));
            }
        }
        ColumnKind::Number => {
            if value.as_i64().is_none() {
                return Err(AppError::Validation(format!(
                    "field '{}' must be an integer",
                    column.name
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_every_entity_name_is_unique() {
        let mut names: Vec<_> = ENTITIES.iter().map(|e| e.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ENTITIES.len());
    }

    #[test]
    fn test_find_entity_by_name() {
        assert_eq!(find_entity("work").unwrap().table, "work");
        assert!(find_entity("passwords").is_none());
    }

    #[test]
    fn test_create_requires_all_required_fields() {
        let spec = find_entity("education").unwrap();
        let err = validate_payload(spec, &payload(json!({"school": "KTH"})), false).unwrap_err();
        let AppError::Validation(msg) = err else {
            panic!("expected a validation error");
        };
        assert!(msg.contains("degree"));
    }

    #[test]
    fn test_partial_update_skips_absent_fields() {
        let spec = find_entity("education").unwrap();
        assert!(validate_payload(spec, &payload(json!({"school": "KTH"})), true).is_ok());
    }

    #[test]
    fn test_required_field_rejects_null_even_on_update() {
        let spec = find_entity("education").unwrap();
        assert!(validate_payload(spec, &payload(json!({"school": null})), true).is_err());
    }

    #[test]
    fn test_optional_field_accepts_null() {
        let spec = find_entity("work").unwrap();
        assert!(validate_payload(spec, &payload(json!({"end_date": null})), true).is_ok());
    }

    #[test]
    fn test_url_kind_rejects_non_http() {
        let spec = find_entity("social").unwrap();
        let bad = payload(json!({"name": "GitHub", "url": "ftp://example.com"}));
        assert!(validate_payload(spec, &bad, false).is_err());
        let spaced = payload(json!({"name": "GitHub", "url": "https://exa mple.com"}));
        assert!(validate_payload(spec, &spaced, false).is_err());
        let good = payload(json!({"name": "GitHub", "url": "https://github.com/x"}));
        assert!(validate_payload(spec, &good, false).is_ok());
    }

    #[test]
    fn test_required_text_rejects_blank() {
        let spec = find_entity("skill").unwrap();
        assert!(validate_payload(spec, &payload(json!({"label": "  "})), false).is_err());
    }

    #[test]
    fn test_text_kind_rejects_numbers() {
        let spec = find_entity("skill").unwrap();
        assert!(validate_payload(spec, &payload(json!({"label": 42})), false).is_err());
    }
}
