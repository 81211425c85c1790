use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Flattens a value that may carry rich content into a plain string.
///
/// Editors send job descriptions either as a bare string or as a tree of
/// block nodes (`{"content": [...]}` / `{"children": [...]}`) whose leaves
/// carry a `"text"` field. Blocks join with newlines, inline leaves join
/// without a separator.
pub fn coerce_plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(coerce_plain_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Object(map) => {
            if let Some(Value::String(text)) = map.get("text") {
                return text.clone();
            }
            let children = map.get("content").or_else(|| map.get("children"));
            match children {
                Some(Value::Array(items)) => {
                    items.iter().map(coerce_plain_text).collect::<String>()
                }
                Some(other) => coerce_plain_text(other),
                None => String::new(),
            }
        }
    }
}

/// Serde adapter so document fields can coerce during deserialization.
pub fn plain_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_plain_text(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_string_passes_through() {
        assert_eq!(coerce_plain_text(&json!("Shipped the billing service")), "Shipped the billing service");
    }

    #[test]
    fn test_array_of_strings_joins_with_newlines() {
        let v = json!(["First paragraph", "Second paragraph"]);
        assert_eq!(coerce_plain_text(&v), "First paragraph\nSecond paragraph");
    }

    #[test]
    fn test_rich_blocks_flatten_to_paragraphs() {
        let v = json!([
            { "type": "paragraph", "content": [ { "text": "Led the " }, { "text": "platform team" } ] },
            { "type": "paragraph", "content": [ { "text": "Cut costs by 30%" } ] }
        ]);
        assert_eq!(coerce_plain_text(&v), "Led the platform team\nCut costs by 30%");
    }

    #[test]
    fn test_slate_style_children() {
        let v = json!({ "children": [ { "text": "Built internal tooling" } ] });
        assert_eq!(coerce_plain_text(&v), "Built internal tooling");
    }

    #[test]
    fn test_empty_blocks_are_dropped() {
        let v = json!(["Kept line", "", { "content": [] }]);
        assert_eq!(coerce_plain_text(&v), "Kept line");
    }

    #[test]
    fn test_null_becomes_empty_string() {
        assert_eq!(coerce_plain_text(&json!(null)), "");
    }

    #[test]
    fn test_work_doc_deserializes_rich_description() {
        let doc: crate::models::doc::WorkDoc = serde_json::from_value(json!({
            "company": "Northwind",
            "title": "Engineer",
            "start": "2020",
            "description": [
                { "content": [ { "text": "Owned the ingestion pipeline" } ] }
            ]
        }))
        .unwrap();
        assert_eq!(doc.description, "Owned the ingestion pipeline");
    }
}
