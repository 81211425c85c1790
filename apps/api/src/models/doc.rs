use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The nested résumé document served to clients.
///
/// Child collections are ordered by their `position` column and addressed by
/// positional index in patch paths. Deleting an entry renumbers everything
/// after it; indices are not stable identifiers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDoc {
    pub id: Uuid,
    pub name: String,
    pub initials: String,
    pub location: String,
    pub location_link: Option<String>,
    pub about: String,
    pub summary: String,
    pub avatar_url: Option<String>,
    pub personal_website_url: Option<String>,
    pub contact: Option<ContactDoc>,
    pub education: Vec<EducationDoc>,
    pub work: Vec<WorkDoc>,
    pub skills: Vec<String>,
    pub projects: Vec<ProjectDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactDoc {
    pub email: String,
    pub tel: String,
    #[serde(default)]
    pub social: Vec<SocialDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialDoc {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationDoc {
    pub school: String,
    pub degree: String,
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkDoc {
    pub company: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub badges: Vec<String>,
    pub title: String,
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
    // Descriptions may arrive as rich-content trees; flatten to plain text.
    #[serde(deserialize_with = "crate::update::text::plain_text")]
    pub description: String,
    #[serde(default)]
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDoc {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub link: Option<ProjectLinkDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectLinkDoc {
    pub label: String,
    pub href: String,
}
