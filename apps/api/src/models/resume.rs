#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub name: String,
    pub initials: String,
    pub location: String,
    pub location_link: Option<String>,
    pub about: String,
    pub summary: String,
    pub avatar_url: Option<String>,
    pub personal_website_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContactRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub email: String,
    pub tel: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SocialRow {
    pub id: Uuid,
    pub contact_id: Uuid,
    pub position: i32,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EducationRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub position: i32,
    pub school: String,
    pub degree: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub position: i32,
    pub company: String,
    pub link: Option<String>,
    pub title: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkBadgeRow {
    pub id: Uuid,
    pub work_id: Uuid,
    pub position: i32,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkTaskRow {
    pub id: Uuid,
    pub work_id: Uuid,
    pub position: i32,
    pub task: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub position: i32,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub position: i32,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectTechRow {
    pub id: Uuid,
    pub project_id: Uuid,
    pub position: i32,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectLinkRow {
    pub id: Uuid,
    pub project_id: Uuid,
    pub label: String,
    pub href: String,
}
