use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::doc::{
    ContactDoc, EducationDoc, ProjectDoc, ProjectLinkDoc, ResumeDoc, SocialDoc, WorkDoc,
};
use crate::store::writer;

/// Inserts the fixture résumé into an empty database and returns its id.
pub async fn seed_default(pool: &PgPool) -> Result<Uuid, sqlx::Error> {
    let doc = default_fixture();
    writer::insert_resume(pool, &doc).await?;
    info!("Seeded default résumé {}", doc.id);
    Ok(doc.id)
}

/// The static fixture used to populate a fresh install.
pub fn default_fixture() -> ResumeDoc {
    ResumeDoc {
        id: Uuid::new_v4(),
        name: "Maya Lindqvist".to_string(),
        initials: "ML".to_string(),
        location: "Stockholm, Sweden, CET".to_string(),
        location_link: Some("https://www.google.com/maps/place/Stockholm".to_string()),
        about: "Backend engineer focused on data-heavy web services and developer tooling."
            .to_string(),
        summary: "Eight years building and operating web backends, from early-stage prototypes \
                  to services handling millions of requests a day. Comfortable owning a feature \
                  from schema design through deployment and on-call."
            .to_string(),
        avatar_url: Some("https://avatars.example.com/maya.png".to_string()),
        personal_website_url: Some("https://mayalindqvist.dev".to_string()),
        contact: Some(ContactDoc {
            email: "maya@mayalindqvist.dev".to_string(),
            tel: "+46701234567".to_string(),
            social: vec![
                SocialDoc {
                    name: "GitHub".to_string(),
                    url: "https://github.com/mlindqvist".to_string(),
                },
                SocialDoc {
                    name: "LinkedIn".to_string(),
                    url: "https://www.linkedin.com/in/mayalindqvist".to_string(),
                },
                SocialDoc {
                    name: "X".to_string(),
                    url: "https://x.com/mlindqvist".to_string(),
                },
            ],
        }),
        education: vec![EducationDoc {
            school: "KTH Royal Institute of Technology".to_string(),
            degree: "MSc in Computer Science".to_string(),
            start: "2012".to_string(),
            end: "2017".to_string(),
        }],
        work: vec![
            WorkDoc {
                company: "Fjordline Analytics".to_string(),
                link: Some("https://fjordline.example.com".to_string()),
                badges: vec!["Remote".to_string()],
                title: "Senior Backend Engineer".to_string(),
                start: "2021".to_string(),
                end: None,
                description: "Own the ingestion platform that turns customer event streams \
                              into queryable datasets."
                    .to_string(),
                tasks: vec![
                    "Designed the partitioned event store that cut query latency from \
                     minutes to seconds"
                        .to_string(),
                    "Led the migration of 40+ ETL jobs to a single declarative pipeline"
                        .to_string(),
                    "Run the team's on-call rotation and incident reviews".to_string(),
                ],
            },
            WorkDoc {
                company: "Kanalhuset".to_string(),
                link: Some("https://kanalhuset.example.com".to_string()),
                badges: vec!["Hybrid".to_string()],
                title: "Backend Engineer".to_string(),
                start: "2018".to_string(),
                end: Some("2021".to_string()),
                description: "Built booking and payment services for a marketplace with \
                              300k monthly users."
                    .to_string(),
                tasks: vec![
                    "Introduced idempotent payment processing, eliminating double-charge \
                     incidents"
                        .to_string(),
                    "Rewrote the availability search, halving response times".to_string(),
                ],
            },
            WorkDoc {
                company: "Startbana".to_string(),
                link: None,
                badges: vec![],
                title: "Software Engineer".to_string(),
                start: "2017".to_string(),
                end: Some("2018".to_string()),
                description: "First engineering hire at a logistics startup; built the \
                              initial product end to end."
                    .to_string(),
                tasks: vec!["Shipped the first version of the dispatch API".to_string()],
            },
        ],
        skills: vec![
            "Rust".to_string(),
            "TypeScript".to_string(),
            "PostgreSQL".to_string(),
            "Kubernetes".to_string(),
            "Kafka".to_string(),
            "gRPC".to_string(),
            "Terraform".to_string(),
            "Observability".to_string(),
        ],
        projects: vec![
            ProjectDoc {
                title: "tidvis".to_string(),
                description: "A terminal dashboard for visualizing time-series data from \
                              local CSV files."
                    .to_string(),
                tech_stack: vec!["Rust".to_string(), "ratatui".to_string()],
                link: Some(ProjectLinkDoc {
                    label: "github.com/mlindqvist/tidvis".to_string(),
                    href: "https://github.com/mlindqvist/tidvis".to_string(),
                }),
            },
            ProjectDoc {
                title: "skiftbyte".to_string(),
                description: "Shift-scheduling web app used by two local cafés.".to_string(),
                tech_stack: vec![
                    "TypeScript".to_string(),
                    "React".to_string(),
                    "PostgreSQL".to_string(),
                ],
                link: Some(ProjectLinkDoc {
                    label: "skiftbyte.se".to_string(),
                    href: "https://skiftbyte.example.se".to_string(),
                }),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_has_contact_and_socials() {
        let doc = default_fixture();
        let contact = doc.contact.expect("fixture must include a contact");
        assert!(!contact.social.is_empty());
    }

    #[test]
    fn test_fixture_work_entries_carry_children() {
        let doc = default_fixture();
        assert!(doc.work.len() >= 2);
        assert!(doc.work.iter().all(|w| !w.description.is_empty()));
        assert!(doc.work.iter().any(|w| !w.badges.is_empty()));
        assert!(doc.work.iter().any(|w| !w.tasks.is_empty()));
    }

    #[test]
    fn test_fixture_has_open_ended_current_role() {
        let doc = default_fixture();
        assert!(doc.work[0].end.is_none());
    }

    #[test]
    fn test_fixture_projects_and_skills_populated() {
        let doc = default_fixture();
        assert!(!doc.skills.is_empty());
        assert!(!doc.projects.is_empty());
        assert!(doc.projects.iter().all(|p| !p.tech_stack.is_empty()));
    }
}
