use sqlx::PgPool;
use uuid::Uuid;

use crate::models::doc::{
    ContactDoc, EducationDoc, ProjectDoc, ProjectLinkDoc, ResumeDoc, SocialDoc, WorkDoc,
};
use crate::models::resume::{
    ContactRow, EducationRow, ProjectLinkRow, ProjectRow, ProjectTechRow, ResumeRow, SkillRow,
    SocialRow, WorkBadgeRow, WorkRow, WorkTaskRow,
};

/// A résumé with all of its child rows, in `position` order.
/// The update planner resolves positional indices against this record.
#[derive(Debug, Clone)]
pub struct ResumeRecord {
    pub resume: ResumeRow,
    pub contact: Option<ContactRecord>,
    pub education: Vec<EducationRow>,
    pub work: Vec<WorkRecord>,
    pub skills: Vec<SkillRow>,
    pub projects: Vec<ProjectRecord>,
}

#[derive(Debug, Clone)]
pub struct ContactRecord {
    pub row: ContactRow,
    pub socials: Vec<SocialRow>,
}

#[derive(Debug, Clone)]
pub struct WorkRecord {
    pub row: WorkRow,
    pub badges: Vec<WorkBadgeRow>,
    pub tasks: Vec<WorkTaskRow>,
}

#[derive(Debug, Clone)]
pub struct ProjectRecord {
    pub row: ProjectRow,
    pub tech: Vec<ProjectTechRow>,
    pub link: Option<ProjectLinkRow>,
}

/// Returns the id of the oldest résumé, if any exists.
pub async fn default_resume_id(pool: &PgPool) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar("SELECT id FROM resumes ORDER BY created_at ASC LIMIT 1")
        .fetch_optional(pool)
        .await
}

/// Loads a résumé and all child collections. Child queries run sequentially;
/// each collection is ordered by its `position` column.
pub async fn load_resume(pool: &PgPool, id: Uuid) -> Result<Option<ResumeRecord>, sqlx::Error> {
    let Some(resume) = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
    else {
        return Ok(None);
    };

    let contact_row =
        sqlx::query_as::<_, ContactRow>("SELECT * FROM contacts WHERE resume_id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    let contact = match contact_row {
        Some(row) => {
            let socials = sqlx::query_as::<_, SocialRow>(
                "SELECT * FROM socials WHERE contact_id = $1 ORDER BY position",
            )
            .bind(row.id)
            .fetch_all(pool)
            .await?;
            Some(ContactRecord { row, socials })
        }
        None => None,
    };

    let education = sqlx::query_as::<_, EducationRow>(
        "SELECT * FROM education WHERE resume_id = $1 ORDER BY position",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let work_rows =
        sqlx::query_as::<_, WorkRow>("SELECT * FROM work WHERE resume_id = $1 ORDER BY position")
            .bind(id)
            .fetch_all(pool)
            .await?;
    let mut work = Vec::with_capacity(work_rows.len());
    for row in work_rows {
        let badges = sqlx::query_as::<_, WorkBadgeRow>(
            "SELECT * FROM work_badges WHERE work_id = $1 ORDER BY position",
        )
        .bind(row.id)
        .fetch_all(pool)
        .await?;
        let tasks = sqlx::query_as::<_, WorkTaskRow>(
            "SELECT * FROM work_tasks WHERE work_id = $1 ORDER BY position",
        )
        .bind(row.id)
        .fetch_all(pool)
        .await?;
        work.push(WorkRecord { row, badges, tasks });
    }

    let skills = sqlx::query_as::<_, SkillRow>(
        "SELECT * FROM skills WHERE resume_id = $1 ORDER BY position",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let project_rows = sqlx::query_as::<_, ProjectRow>(
        "SELECT * FROM projects WHERE resume_id = $1 ORDER BY position",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;
    let mut projects = Vec::with_capacity(project_rows.len());
    for row in project_rows {
        let tech = sqlx::query_as::<_, ProjectTechRow>(
            "SELECT * FROM project_tech WHERE project_id = $1 ORDER BY position",
        )
        .bind(row.id)
        .fetch_all(pool)
        .await?;
        let link = sqlx::query_as::<_, ProjectLinkRow>(
            "SELECT * FROM project_links WHERE project_id = $1",
        )
        .bind(row.id)
        .fetch_optional(pool)
        .await?;
        projects.push(ProjectRecord { row, tech, link });
    }

    Ok(Some(ResumeRecord {
        resume,
        contact,
        education,
        work,
        skills,
        projects,
    }))
}

impl ResumeRecord {
    /// Flattens the relational record into the nested client document.
    pub fn into_doc(self) -> ResumeDoc {
        ResumeDoc {
            id: self.resume.id,
            name: self.resume.name,
            initials: self.resume.initials,
            location: self.resume.location,
            location_link: self.resume.location_link,
            about: self.resume.about,
            summary: self.resume.summary,
            avatar_url: self.resume.avatar_url,
            personal_website_url: self.resume.personal_website_url,
            contact: self.contact.map(|c| ContactDoc {
                email: c.row.email,
                tel: c.row.tel,
                social: c
                    .socials
                    .into_iter()
                    .map(|s| SocialDoc {
                        name: s.name,
                        url: s.url,
                    })
                    .collect(),
            }),
            education: self
                .education
                .into_iter()
                .map(|e| EducationDoc {
                    school: e.school,
                    degree: e.degree,
                    start: e.start_date,
                    end: e.end_date,
                })
                .collect(),
            work: self.work.into_iter().map(WorkRecord::into_doc).collect(),
            skills: self.skills.into_iter().map(|s| s.label).collect(),
            projects: self
                .projects
                .into_iter()
                .map(ProjectRecord::into_doc)
                .collect(),
        }
    }
}

impl WorkRecord {
    pub fn into_doc(self) -> WorkDoc {
        WorkDoc {
            company: self.row.company,
            link: self.row.link,
            badges: self.badges.into_iter().map(|b| b.label).collect(),
            title: self.row.title,
            start: self.row.start_date,
            end: self.row.end_date,
            description: self.row.description,
            tasks: self.tasks.into_iter().map(|t| t.task).collect(),
        }
    }
}

impl ProjectRecord {
    pub fn into_doc(self) -> ProjectDoc {
        ProjectDoc {
            title: self.row.title,
            description: self.row.description,
            tech_stack: self.tech.into_iter().map(|t| t.label).collect(),
            link: self.link.map(|l| ProjectLinkDoc {
                label: l.label,
                href: l.href,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record_fixture() -> ResumeRecord {
        let resume_id = Uuid::new_v4();
        let contact_id = Uuid::new_v4();
        let work_id = Uuid::new_v4();
        let project_id = Uuid::new_v4();
        ResumeRecord {
            resume: ResumeRow {
                id: resume_id,
                name: "Ada Example".into(),
                initials: "AE".into(),
                location: "Lisbon, Portugal".into(),
                location_link: Some("https://maps.example.com/lisbon".into()),
                about: "Backend engineer".into(),
                summary: "Ten years of plumbing".into(),
                avatar_url: None,
                personal_website_url: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            contact: Some(ContactRecord {
                row: ContactRow {
                    id: contact_id,
                    resume_id,
                    email: "ada@example.com".into(),
                    tel: "+351000000000".into(),
                },
                socials: vec![SocialRow {
                    id: Uuid::new_v4(),
                    contact_id,
                    position: 0,
                    name: "GitHub".into(),
                    url: "https://github.com/ada".into(),
                }],
            }),
            education: vec![],
            work: vec![WorkRecord {
                row: WorkRow {
                    id: work_id,
                    resume_id,
                    position: 0,
                    company: "Northwind".into(),
                    link: None,
                    title: "Engineer".into(),
                    start_date: "2020".into(),
                    end_date: None,
                    description: "Did things".into(),
                },
                badges: vec![WorkBadgeRow {
                    id: Uuid::new_v4(),
                    work_id,
                    position: 0,
                    label: "Remote".into(),
                }],
                tasks: vec![WorkTaskRow {
                    id: Uuid::new_v4(),
                    work_id,
                    position: 0,
                    task: "Ran the pipeline".into(),
                }],
            }],
            skills: vec![SkillRow {
                id: Uuid::new_v4(),
                resume_id,
                position: 0,
                label: "Rust".into(),
            }],
            projects: vec![ProjectRecord {
                row: ProjectRow {
                    id: project_id,
                    resume_id,
                    position: 0,
                    title: "Side thing".into(),
                    description: "A tool".into(),
                },
                tech: vec![ProjectTechRow {
                    id: Uuid::new_v4(),
                    project_id,
                    position: 0,
                    label: "Rust".into(),
                }],
                link: None,
            }],
        }
    }

    #[test]
    fn test_into_doc_flattens_children() {
        let doc = record_fixture().into_doc();
        assert_eq!(doc.skills, vec!["Rust".to_string()]);
        assert_eq!(doc.work[0].badges, vec!["Remote".to_string()]);
        assert_eq!(doc.work[0].tasks, vec!["Ran the pipeline".to_string()]);
        assert_eq!(doc.projects[0].tech_stack, vec!["Rust".to_string()]);
        assert!(doc.projects[0].link.is_none());
    }

    #[test]
    fn test_doc_serializes_camel_case() {
        let doc = record_fixture().into_doc();
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("locationLink").is_some());
        assert!(json.get("personalWebsiteUrl").is_some());
        assert!(json.get("location_link").is_none());
        assert_eq!(json["contact"]["social"][0]["name"], "GitHub");
        assert!(json["projects"][0].get("techStack").is_some());
    }
}
