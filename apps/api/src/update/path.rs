use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;

/// Patch paths arrive either dotted (`"work.2.tasks"`) or as a JSON array
/// of segments (`["work", 2, "tasks"]`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PathInput {
    Dotted(String),
    Segments(Vec<Value>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Field(String),
    Index(usize),
}

pub fn parse_path(input: &PathInput) -> Result<Vec<Segment>, AppError> {
    let segments: Vec<Segment> = match input {
        PathInput::Dotted(raw) => raw
            .split('.')
            .map(|s| {
                if s.is_empty() {
                    Err(AppError::Validation(
                        "path contains an empty segment".to_string(),
                    ))
                } else {
                    Ok(segment_from_str(s))
                }
            })
            .collect::<Result<_, _>>()?,
        PathInput::Segments(values) => values
            .iter()
            .map(segment_from_value)
            .collect::<Result<_, _>>()?,
    };

    if segments.is_empty() {
        return Err(AppError::Validation("update path is empty".to_string()));
    }
    Ok(segments)
}

fn segment_from_str(s: &str) -> Segment {
    match s.parse::<usize>() {
        Ok(index) => Segment::Index(index),
        Err(_) => Segment::Field(s.to_string()),
    }
}

fn segment_from_value(value: &Value) -> Result<Segment, AppError> {
    match value {
        Value::String(s) => Ok(segment_from_str(s)),
        Value::Number(n) => n
            .as_u64()
            .map(|i| Segment::Index(i as usize))
            .ok_or_else(|| {
                AppError::Validation("array indices must be non-negative integers".to_string())
            }),
        _ => Err(AppError::Validation(
            "path segments must be strings or numbers".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dotted(raw: &str) -> Vec<Segment> {
        parse_path(&PathInput::Dotted(raw.to_string())).unwrap()
    }

    #[test]
    fn test_single_field() {
        assert_eq!(dotted("summary"), vec![Segment::Field("summary".into())]);
    }

    #[test]
    fn test_nested_with_index() {
        assert_eq!(
            dotted("work.2.tasks"),
            vec![
                Segment::Field("work".into()),
                Segment::Index(2),
                Segment::Field("tasks".into()),
            ]
        );
    }

    #[test]
    fn test_empty_dotted_path_rejected() {
        assert!(parse_path(&PathInput::Dotted(String::new())).is_err());
    }

    #[test]
    fn test_empty_segment_rejected() {
        assert!(parse_path(&PathInput::Dotted("work..0".to_string())).is_err());
        assert!(parse_path(&PathInput::Dotted(".summary".to_string())).is_err());
        assert!(parse_path(&PathInput::Dotted("work.0.".to_string())).is_err());
    }

    #[test]
    fn test_segment_array_mixed_types() {
        let input: PathInput =
            serde_json::from_value(json!(["projects", 1, "techStack"])).unwrap();
        assert_eq!(
            parse_path(&input).unwrap(),
            vec![
                Segment::Field("projects".into()),
                Segment::Index(1),
                Segment::Field("techStack".into()),
            ]
        );
    }

    #[test]
    fn test_segment_array_rejects_objects() {
        let input: PathInput = serde_json::from_value(json!([{"bad": true}])).unwrap();
        assert!(parse_path(&input).is_err());
    }

    #[test]
    fn test_numeric_string_is_an_index() {
        assert_eq!(
            dotted("skills.3"),
            vec![Segment::Field("skills".into()), Segment::Index(3)]
        );
    }
}
