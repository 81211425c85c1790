use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::doc::{
    ContactDoc, EducationDoc, ProjectDoc, ProjectLinkDoc, SocialDoc, WorkDoc,
};
use crate::store::loader::ResumeRecord;
use crate::update::path::Segment;
use crate::update::text::coerce_plain_text;

/// One resolved mutation against the relational schema.
///
/// Collection and entity replaces execute as delete-then-recreate with no
/// surrounding transaction; a failure between the two steps leaves the
/// deleted state behind. This matches the original editing semantics.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdatePlan {
    SetResumeField {
        column: &'static str,
        value: Option<String>,
    },
    ReplaceContact(ContactDoc),
    SetContactField {
        contact_id: Uuid,
        column: &'static str,
        value: String,
    },
    ReplaceSocials {
        contact_id: Uuid,
        socials: Vec<SocialDoc>,
    },
    ReplaceEducation(Vec<EducationDoc>),
    ReplaceEducationEntry {
        id: Uuid,
        position: i32,
        entry: EducationDoc,
    },
    SetEducationField {
        id: Uuid,
        column: &'static str,
        value: String,
    },
    ReplaceWork(Vec<WorkDoc>),
    ReplaceWorkEntry {
        id: Uuid,
        position: i32,
        entry: WorkDoc,
    },
    SetWorkField {
        id: Uuid,
        column: &'static str,
        value: Option<String>,
    },
    ReplaceWorkBadges {
        work_id: Uuid,
        badges: Vec<String>,
    },
    ReplaceWorkTasks {
        work_id: Uuid,
        tasks: Vec<String>,
    },
    ReplaceSkills(Vec<String>),
    ReplaceSkillEntry {
        id: Uuid,
        position: i32,
        label: String,
    },
    ReplaceProjects(Vec<ProjectDoc>),
    ReplaceProjectEntry {
        id: Uuid,
        position: i32,
        entry: ProjectDoc,
    },
    SetProjectField {
        id: Uuid,
        column: &'static str,
        value: String,
    },
    ReplaceProjectTech {
        project_id: Uuid,
        tech: Vec<String>,
    },
    SetProjectLink {
        project_id: Uuid,
        link: Option<ProjectLinkDoc>,
    },
}

/// (document field, column, nullable)
const RESUME_FIELDS: &[(&str, &str, bool)] = &[
    ("name", "name", false),
    ("initials", "initials", false),
    ("location", "location", false),
    ("locationLink", "location_link", true),
    ("about", "about", false),
    ("summary", "summary", false),
    ("avatarUrl", "avatar_url", true),
    ("personalWebsiteUrl", "personal_website_url", true),
];

const CONTACT_FIELDS: &[(&str, &str)] = &[("email", "email"), ("tel", "tel")];

const EDUCATION_FIELDS: &[(&str, &str)] = &[
    ("school", "school"),
    ("degree", "degree"),
    ("start", "start_date"),
    ("end", "end_date"),
];

const WORK_FIELDS: &[(&str, &str, bool)] = &[
    ("company", "company", false),
    ("link", "link", true),
    ("title", "title", false),
    ("start", "start_date", false),
    ("end", "end_date", true),
    ("description", "description", false),
];

const PROJECT_FIELDS: &[(&str, &str)] = &[("title", "title"), ("description", "description")];

/// Resolves a parsed path and value against the loaded record.
/// All index resolution and field dispatch happens here; the writer only
/// executes whatever plan comes out.
pub fn build_plan(
    record: &ResumeRecord,
    path: &[Segment],
    value: Value,
) -> Result<UpdatePlan, AppError> {
    let Some(first) = path.first() else {
        return Err(AppError::Validation("update path is empty".to_string()));
    };
    let Segment::Field(root) = first else {
        return Err(AppError::Validation(
            "update path must start with a field name".to_string(),
        ));
    };
    let rest = &path[1..];

    match root.as_str() {
        "contact" => contact_plan(record, rest, value),
        "education" => education_plan(record, rest, value),
        "work" => work_plan(record, rest, value),
        "skills" => skills_plan(record, rest, value),
        "projects" => projects_plan(record, rest, value),
        other => {
            let &(_, column, nullable) = RESUME_FIELDS
                .iter()
                .find(|(field, _, _)| *field == other)
                .ok_or_else(|| AppError::Validation(format!("unknown résumé field '{other}'")))?;
            if !rest.is_empty() {
                return Err(AppError::Validation(format!(
                    "'{other}' does not support nested updates"
                )));
            }
            Ok(UpdatePlan::SetResumeField {
                column,
                value: scalar_value(value, nullable, other)?,
            })
        }
    }
}

fn contact_plan(
    record: &ResumeRecord,
    rest: &[Segment],
    value: Value,
) -> Result<UpdatePlan, AppError> {
    if rest.is_empty() {
        return Ok(UpdatePlan::ReplaceContact(from_value(value, "contact")?));
    }
    let Segment::Field(field) = &rest[0] else {
        return Err(AppError::Validation(
            "contact is not addressable by index".to_string(),
        ));
    };
    let contact_id = record
        .contact
        .as_ref()
        .map(|c| c.row.id)
        .ok_or_else(|| AppError::Validation("résumé has no contact record".to_string()))?;

    match field.as_str() {
        "social" => {
            if rest.len() > 1 {
                return Err(AppError::Validation(
                    "social links are replaced as a whole list".to_string(),
                ));
            }
            Ok(UpdatePlan::ReplaceSocials {
                contact_id,
                socials: from_value(value, "social links")?,
            })
        }
        other => {
            let &(_, column) = CONTACT_FIELDS
                .iter()
                .find(|(field, _)| *field == other)
                .ok_or_else(|| AppError::Validation(format!("unknown contact field '{other}'")))?;
            if rest.len() > 1 {
                return Err(AppError::Validation(format!(
                    "'contact.{other}' does not support nested updates"
                )));
            }
            let value = scalar_value(value, false, other)?
                .ok_or_else(|| AppError::Validation(format!("contact field '{other}' cannot be null")))?;
            Ok(UpdatePlan::SetContactField {
                contact_id,
                column,
                value,
            })
        }
    }
}

fn education_plan(
    record: &ResumeRecord,
    rest: &[Segment],
    value: Value,
) -> Result<UpdatePlan, AppError> {
    if rest.is_empty() {
        return Ok(UpdatePlan::ReplaceEducation(from_value(value, "education")?));
    }
    let index = expect_index(&rest[0], "education")?;
    let row = record.education.get(index).ok_or_else(|| {
        out_of_bounds("education", index, record.education.len())
    })?;

    match rest.len() {
        1 => Ok(UpdatePlan::ReplaceEducationEntry {
            id: row.id,
            position: row.position,
            entry: from_value(value, "education entry")?,
        }),
        2 => {
            let field = expect_field(&rest[1], "education")?;
            let &(_, column) = EDUCATION_FIELDS
                .iter()
                .find(|(f, _)| *f == field)
                .ok_or_else(|| {
                    AppError::Validation(format!("unknown education field '{field}'"))
                })?;
            let value = scalar_value(value, false, field)?.ok_or_else(|| {
                AppError::Validation(format!("education field '{field}' cannot be null"))
            })?;
            Ok(UpdatePlan::SetEducationField {
                id: row.id,
                column,
                value,
            })
        }
        _ => Err(AppError::Validation(
            "education paths go at most two levels deep".to_string(),
        )),
    }
}

fn work_plan(record: &ResumeRecord, rest: &[Segment], value: Value) -> Result<UpdatePlan, AppError> {
    if rest.is_empty() {
        return Ok(UpdatePlan::ReplaceWork(from_value(value, "work")?));
    }
    let index = expect_index(&rest[0], "work")?;
    let entry = record
        .work
        .get(index)
        .ok_or_else(|| out_of_bounds("work", index, record.work.len()))?;

    match rest.len() {
        1 => Ok(UpdatePlan::ReplaceWorkEntry {
            id: entry.row.id,
            position: entry.row.position,
            entry: from_value(value, "work entry")?,
        }),
        2 => {
            let field = expect_field(&rest[1], "work")?;
            match field {
                "badges" => Ok(UpdatePlan::ReplaceWorkBadges {
                    work_id: entry.row.id,
                    badges: string_list(value, "badges")?,
                }),
                "tasks" => Ok(UpdatePlan::ReplaceWorkTasks {
                    work_id: entry.row.id,
                    tasks: string_list(value, "tasks")?,
                }),
                other => {
                    let &(_, column, nullable) = WORK_FIELDS
                        .iter()
                        .find(|(f, _, _)| *f == other)
                        .ok_or_else(|| {
                            AppError::Validation(format!("unknown work field '{other}'"))
                        })?;
                    let value = if column == "description" {
                        if value.is_null() {
                            return Err(AppError::Validation(
                                "work field 'description' cannot be null".to_string(),
                            ));
                        }
                        Some(coerce_plain_text(&value))
                    } else {
                        scalar_value(value, nullable, other)?
                    };
                    Ok(UpdatePlan::SetWorkField {
                        id: entry.row.id,
                        column,
                        value,
                    })
                }
            }
        }
        _ => Err(AppError::Validation(
            "work paths go at most two levels deep".to_string(),
        )),
    }
}

fn skills_plan(
    record: &ResumeRecord,
    rest: &[Segment],
    value: Value,
) -> Result<UpdatePlan, AppError> {
    if rest.is_empty() {
        return Ok(UpdatePlan::ReplaceSkills(string_list(value, "skills")?));
    }
    if rest.len() > 1 {
        return Err(AppError::Validation(
            "skills are flat; paths go at most one level deep".to_string(),
        ));
    }
    let index = expect_index(&rest[0], "skills")?;
    let row = record
        .skills
        .get(index)
        .ok_or_else(|| out_of_bounds("skills", index, record.skills.len()))?;
    let label = match value {
        Value::String(s) => s,
        other => {
            return Err(AppError::Validation(format!(
                "a skill must be a string, got {}",
                type_name(&other)
            )))
        }
    };
    Ok(UpdatePlan::ReplaceSkillEntry {
        id: row.id,
        position: row.position,
        label,
    })
}

fn projects_plan(
    record: &ResumeRecord,
    rest: &[Segment],
    value: Value,
) -> Result<UpdatePlan, AppError> {
    if rest.is_empty() {
        return Ok(UpdatePlan::ReplaceProjects(from_value(value, "projects")?));
    }
    let index = expect_index(&rest[0], "projects")?;
    let entry = record
        .projects
        .get(index)
        .ok_or_else(|| out_of_bounds("projects", index, record.projects.len()))?;

    match rest.len() {
        1 => Ok(UpdatePlan::ReplaceProjectEntry {
            id: entry.row.id,
            position: entry.row.position,
            entry: from_value(value, "project entry")?,
        }),
        2 => {
            let field = expect_field(&rest[1], "projects")?;
            match field {
                "techStack" => Ok(UpdatePlan::ReplaceProjectTech {
                    project_id: entry.row.id,
                    tech: string_list(value, "techStack")?,
                }),
                "link" => {
                    let link = if value.is_null() {
                        None
                    } else {
                        Some(from_value(value, "project link")?)
                    };
                    Ok(UpdatePlan::SetProjectLink {
                        project_id: entry.row.id,
                        link,
                    })
                }
                other => {
                    let &(_, column) = PROJECT_FIELDS
                        .iter()
                        .find(|(f, _)| *f == other)
                        .ok_or_else(|| {
                            AppError::Validation(format!("unknown project field '{other}'"))
                        })?;
                    let value = scalar_value(value, false, other)?.ok_or_else(|| {
                        AppError::Validation(format!("project field '{other}' cannot be null"))
                    })?;
                    Ok(UpdatePlan::SetProjectField {
                        id: entry.row.id,
                        column,
                        value,
                    })
                }
            }
        }
        _ => Err(AppError::Validation(
            "project paths go at most two levels deep".to_string(),
        )),
    }
}

fn expect_index(segment: &Segment, collection: &str) -> Result<usize, AppError> {
    match segment {
        Segment::Index(i) => Ok(*i),
        Segment::Field(f) => Err(AppError::Validation(format!(
            "expected a numeric index into '{collection}', got '{f}'"
        ))),
    }
}

fn expect_field<'a>(segment: &'a Segment, collection: &str) -> Result<&'a str, AppError> {
    match segment {
        Segment::Field(f) => Ok(f.as_str()),
        Segment::Index(i) => Err(AppError::Validation(format!(
            "expected a field name after the {collection} index, got '{i}'"
        ))),
    }
}

fn out_of_bounds(collection: &str, index: usize, len: usize) -> AppError {
    AppError::Validation(format!(
        "{collection} index {index} is out of bounds (length {len})"
    ))
}

fn scalar_value(value: Value, nullable: bool, field: &str) -> Result<Option<String>, AppError> {
    match value {
        Value::Null if nullable => Ok(None),
        Value::String(s) => Ok(Some(s)),
        other => Err(AppError::Validation(format!(
            "field '{field}' expects a string, got {}",
            type_name(&other)
        ))),
    }
}

fn string_list(value: Value, what: &str) -> Result<Vec<String>, AppError> {
    let Value::Array(items) = value else {
        return Err(AppError::Validation(format!(
            "'{what}' expects an array of strings"
        )));
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Ok(s),
            other => Err(AppError::Validation(format!(
                "'{what}' entries must be strings, got {}",
                type_name(&other)
            ))),
        })
        .collect()
}

fn from_value<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, AppError> {
    serde_json::from_value(value)
        .map_err(|e| AppError::Validation(format!("invalid {what} payload: {e}")))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
