use sqlx::PgPool;
use uuid::Uuid;

use crate::models::doc::{
    ContactDoc, EducationDoc, ProjectDoc, ProjectLinkDoc, ResumeDoc, SocialDoc, WorkDoc,
};
use crate::update::plan::UpdatePlan;

/// Executes one resolved update against the schema.
///
/// Replace operations run delete-then-recreate as separate statements with
/// no wrapping transaction, so a failure between the two leaves the deleted
/// state behind. Column names in the plan come from the planner's fixed
/// field tables, never from client input.
pub async fn apply_plan(
    pool: &PgPool,
    resume_id: Uuid,
    plan: &UpdatePlan,
) -> Result<(), sqlx::Error> {
    match plan {
        UpdatePlan::SetResumeField { column, value } => {
            sqlx::query(&format!("UPDATE resumes SET {column} = $1 WHERE id = $2"))
                .bind(value)
                .bind(resume_id)
                .execute(pool)
                .await?;
        }
        UpdatePlan::ReplaceContact(contact) => {
            sqlx::query("DELETE FROM contacts WHERE resume_id = $1")
                .bind(resume_id)
                .execute(pool)
                .await?;
            insert_contact(pool, resume_id, contact).await?;
        }
        UpdatePlan::SetContactField {
            contact_id,
            column,
            value,
        } => {
            sqlx::query(&format!("UPDATE contacts SET {column} = $1 WHERE id = $2"))
                .bind(value)
                .bind(contact_id)
                .execute(pool)
                .await?;
        }
        UpdatePlan::ReplaceSocials {
            contact_id,
            socials,
        } => {
            sqlx::query("DELETE FROM socials WHERE contact_id = $1")
                .bind(contact_id)
                .execute(pool)
                .await?;
            insert_socials(pool, *contact_id, socials).await?;
        }
        UpdatePlan::ReplaceEducation(entries) => {
            sqlx::query("DELETE FROM education WHERE resume_id = $1")
                .bind(resume_id)
                .execute(pool)
                .await?;
            for (position, entry) in entries.iter().enumerate() {
                insert_education_entry(pool, resume_id, position as i32, entry).await?;
            }
        }
        UpdatePlan::ReplaceEducationEntry {
            id,
            position,
            entry,
        } => {
            sqlx::query("DELETE FROM education WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await?;
            insert_education_entry(pool, resume_id, *position, entry).await?;
        }
        UpdatePlan::SetEducationField { id, column, value } => {
            sqlx::query(&format!("UPDATE education SET {column} = $1 WHERE id = $2"))
                .bind(value)
                .bind(id)
                .execute(pool)
                .await?;
        }
        UpdatePlan::ReplaceWork(entries) => {
            sqlx::query("DELETE FROM work WHERE resume_id = $1")
                .bind(resume_id)
                .execute(pool)
                .await?;
            for (position, entry) in entries.iter().enumerate() {
                insert_work_entry(pool, resume_id, position as i32, entry).await?;
            }
        }
        UpdatePlan::ReplaceWorkEntry {
            id,
            position,
            entry,
        } => {
            sqlx::query("DELETE FROM work WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await?;
            insert_work_entry(pool, resume_id, *position, entry).await?;
        }
        UpdatePlan::SetWorkField { id, column, value } => {
            sqlx::query(&format!("UPDATE work SET {column} = $1 WHERE id = $2"))
                .bind(value)
                .bind(id)
                .execute(pool)
                .await?;
        }
        UpdatePlan::ReplaceWorkBadges { work_id, badges } => {
            sqlx::query("DELETE FROM work_badges WHERE work_id = $1")
                .bind(work_id)
                .execute(pool)
                .await?;
            insert_work_badges(pool, *work_id, badges).await?;
        }
        UpdatePlan::ReplaceWorkTasks { work_id, tasks } => {
            sqlx::query("DELETE FROM work_tasks WHERE work_id = $1")
                .bind(work_id)
                .execute(pool)
                .await?;
            insert_work_tasks(pool, *work_id, tasks).await?;
        }
        UpdatePlan::ReplaceSkills(skills) => {
            sqlx::query("DELETE FROM skills WHERE resume_id = $1")
                .bind(resume_id)
                .execute(pool)
                .await?;
            for (position, label) in skills.iter().enumerate() {
                insert_skill(pool, resume_id, position as i32, label).await?;
            }
        }
        UpdatePlan::ReplaceSkillEntry {
            id,
            position,
            label,
        } => {
            sqlx::query("DELETE FROM skills WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await?;
            insert_skill(pool, resume_id, *position, label).await?;
        }
        UpdatePlan::ReplaceProjects(entries) => {
            sqlx::query("DELETE FROM projects WHERE resume_id = $1")
                .bind(resume_id)
                .execute(pool)
                .await?;
            for (position, entry) in entries.iter().enumerate() {
                insert_project_entry(pool, resume_id, position as i32, entry).await?;
            }
        }
        UpdatePlan::ReplaceProjectEntry {
            id,
            position,
            entry,
        } => {
            sqlx::query("DELETE FROM projects WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await?;
            insert_project_entry(pool, resume_id, *position, entry).await?;
        }
        UpdatePlan::SetProjectField { id, column, value } => {
            sqlx::query(&format!("UPDATE projects SET {column} = $1 WHERE id = $2"))
                .bind(value)
                .bind(id)
                .execute(pool)
                .await?;
        }
        UpdatePlan::ReplaceProjectTech { project_id, tech } => {
            sqlx::query("DELETE FROM project_tech WHERE project_id = $1")
                .bind(project_id)
                .execute(pool)
                .await?;
            insert_project_tech(pool, *project_id, tech).await?;
        }
        UpdatePlan::SetProjectLink { project_id, link } => {
            sqlx::query("DELETE FROM project_links WHERE project_id = $1")
                .bind(project_id)
                .execute(pool)
                .await?;
            if let Some(link) = link {
                insert_project_link(pool, *project_id, link).await?;
            }
        }
    }

    touch_resume(pool, resume_id).await
}

async fn touch_resume(pool: &PgPool, resume_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE resumes SET updated_at = now() WHERE id = $1")
        .bind(resume_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Inserts a complete résumé document, children included. Used by seeding.
pub async fn insert_resume(pool: &PgPool, doc: &ResumeDoc) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO resumes
            (id, name, initials, location, location_link, about, summary,
             avatar_url, personal_website_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(doc.id)
    .bind(&doc.name)
    .bind(&doc.initials)
    .bind(&doc.location)
    .bind(&doc.location_link)
    .bind(&doc.about)
    .bind(&doc.summary)
    .bind(&doc.avatar_url)
    .bind(&doc.personal_website_url)
    .execute(pool)
    .await?;

    if let Some(contact) = &doc.contact {
        insert_contact(pool, doc.id, contact).await?;
    }
    for (position, entry) in doc.education.iter().enumerate() {
        insert_education_entry(pool, doc.id, position as i32, entry).await?;
    }
    for (position, entry) in doc.work.iter().enumerate() {
        insert_work_entry(pool, doc.id, position as i32, entry).await?;
    }
    for (position, label) in doc.skills.iter().enumerate() {
        insert_skill(pool, doc.id, position as i32, label).await?;
    }
    for (position, entry) in doc.projects.iter().enumerate() {
        insert_project_entry(pool, doc.id, position as i32, entry).await?;
    }
    Ok(())
}

async fn insert_contact(
    pool: &PgPool,
    resume_id: Uuid,
    contact: &ContactDoc,
) -> Result<(), sqlx::Error> {
    let contact_id = Uuid::new_v4();
    sqlx::query("INSERT INTO contacts (id, resume_id, email, tel) VALUES ($1, $2, $3, $4)")
        .bind(contact_id)
        .bind(resume_id)
        .bind(&contact.email)
        .bind(&contact.tel)
        .execute(pool)
        .await?;
    insert_socials(pool, contact_id, &contact.social).await
}

async fn insert_socials(
    pool: &PgPool,
    contact_id: Uuid,
    socials: &[SocialDoc],
) -> Result<(), sqlx::Error> {
    for (position, social) in socials.iter().enumerate() {
        sqlx::query(
            "INSERT INTO socials (id, contact_id, position, name, url) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(Uuid::new_v4())
        .bind(contact_id)
        .bind(position as i32)
        .bind(&social.name)
        .bind(&social.url)
        .execute(pool)
        .await?;
    }
    Ok(())
}

async fn insert_education_entry(
    pool: &PgPool,
    resume_id: Uuid,
    position: i32,
    entry: &EducationDoc,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO education (id, resume_id, position, school, degree, start_date, end_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(resume_id)
    .bind(position)
    .bind(&entry.school)
    .bind(&entry.degree)
    .bind(&entry.start)
    .bind(&entry.end)
    .execute(pool)
    .await?;
    Ok(())
}

async fn insert_work_entry(
    pool: &PgPool,
    resume_id: Uuid,
    position: i32,
    entry: &WorkDoc,
) -> Result<(), sqlx::Error> {
    let work_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO work
            (id, resume_id, position, company, link, title, start_date, end_date, description)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(work_id)
    .bind(resume_id)
    .bind(position)
    .bind(&entry.company)
    .bind(&entry.link)
    .bind(&entry.title)
    .bind(&entry.start)
    .bind(&entry.end)
    .bind(&entry.description)
    .execute(pool)
    .await?;

    insert_work_badges(pool, work_id, &entry.badges).await?;
    insert_work_tasks(pool, work_id, &entry.tasks).await
}

async fn insert_work_badges(
    pool: &PgPool,
    work_id: Uuid,
    badges: &[String],
) -> Result<(), sqlx::Error> {
    for (position, label) in badges.iter().enumerate() {
        sqlx::query(
            "INSERT INTO work_badges (id, work_id, position, label) VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(work_id)
        .bind(position as i32)
        .bind(label)
        .execute(pool)
        .await?;
    }
    Ok(())
}

async fn insert_work_tasks(
    pool: &PgPool,
    work_id: Uuid,
    tasks: &[String],
) -> Result<(), sqlx::Error> {
    for (position, task) in tasks.iter().enumerate() {
        sqlx::query("INSERT INTO work_tasks (id, work_id, position, task) VALUES ($1, $2, $3, $4)")
            .bind(Uuid::new_v4())
            .bind(work_id)
            .bind(position as i32)
            .bind(task)
            .execute(pool)
            .await?;
    }
    Ok(())
}

async fn insert_skill(
    pool: &PgPool,
    resume_id: Uuid,
    position: i32,
    label: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO skills (id, resume_id, position, label) VALUES ($1, $2, $3, $4)")
        .bind(Uuid::new_v4())
        .bind(resume_id)
        .bind(position)
        .bind(label)
        .execute(pool)
        .await?;
    Ok(())
}

async fn insert_project_entry(
    pool: &PgPool,
    resume_id: Uuid,
    position: i32,
    entry: &ProjectDoc,
) -> Result<(), sqlx::Error> {
    let project_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO projects (id, resume_id, position, title, description)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(project_id)
    .bind(resume_id)
    .bind(position)
    .bind(&entry.title)
    .bind(&entry.description)
    .execute(pool)
    .await?;

    insert_project_tech(pool, project_id, &entry.tech_stack).await?;
    if let Some(link) = &entry.link {
        insert_project_link(pool, project_id, link).await?;
    }
    Ok(())
}

async fn insert_project_tech(
    pool: &PgPool,
    project_id: Uuid,
    tech: &[String],
) -> Result<(), sqlx::Error> {
    for (position, label) in tech.iter().enumerate() {
        sqlx::query(
            "INSERT INTO project_tech (id, project_id, position, label) VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(project_id)
        .bind(position as i32)
        .bind(label)
        .execute(pool)
        .await?;
    }
    Ok(())
}

async fn insert_project_link(
    pool: &PgPool,
    project_id: Uuid,
    link: &ProjectLinkDoc,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO project_links (id, project_id, label, href) VALUES ($1, $2, $3, $4)")
        .bind(Uuid::new_v4())
        .bind(project_id)
        .bind(&link.label)
        .bind(&link.href)
        .execute(pool)
        .await?;
    Ok(())
}
