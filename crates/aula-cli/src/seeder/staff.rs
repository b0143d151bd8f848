//! Staff users with their principal, preceptor and professor records.

use std::time::Instant;

use aula_models::StaffRole;
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::models::{SEED_EMAIL_DOMAIN, StaffSeed};

/// Generates staff members for one role. Emails are unique per role and
/// index.
pub fn generate_staff(role: StaffRole, count: usize) -> Vec<StaffSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let email = format!(
                "{}.{}+{}{}@{}",
                first_name.to_lowercase(),
                last_name.to_lowercase().replace(' ', ""),
                role.as_str(),
                idx,
                SEED_EMAIL_DOMAIN
            );

            StaffSeed {
                first_name,
                last_name,
                email,
            }
        })
        .collect()
}

fn role_table(role: StaffRole) -> &'static str {
    match role {
        StaffRole::Principal => "principals",
        StaffRole::Preceptor => "preceptors",
        StaffRole::Professor => "professors",
    }
}

/// Seeds staff users and their role records. Returns the role record IDs.
pub async fn seed_staff(
    db: &PgPool,
    role: StaffRole,
    count: usize,
    password_hash: &str,
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("👥 Seeding {} {}s...", count, role.as_str());

    let members = generate_staff(role, count);
    let mut tx = db.begin().await?;

    let mut record_ids = Vec::with_capacity(members.len());
    // 2 params per user, 3 per role record
    const BATCH_SIZE: usize = 1000;
    for chunk in members.chunks(BATCH_SIZE) {
        let user_ids = insert_staff_users_chunk(&mut tx, chunk, password_hash).await?;
        let ids = insert_role_records_chunk(&mut tx, role, &user_ids, chunk).await?;
        record_ids.extend(ids);
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} {}s in {:?}",
        record_ids.len(),
        role.as_str(),
        start_time.elapsed()
    );

    Ok(record_ids)
}

async fn insert_staff_users_chunk(
    tx: &mut Transaction<'_, Postgres>,
    members: &[StaffSeed],
    password_hash: &str,
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    if members.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders: Vec<String> = (0..members.len())
        .map(|i| format!("(${}, ${}, TRUE)", i * 2 + 1, i * 2 + 2))
        .collect();
    let query = format!(
        "INSERT INTO users (email, password, is_staff) VALUES {} RETURNING id",
        placeholders.join(", ")
    );

    let mut q = sqlx::query_scalar(&query);
    for member in members {
        q = q.bind(&member.email).bind(password_hash);
    }

    Ok(q.fetch_all(&mut **tx).await?)
}

async fn insert_role_records_chunk(
    tx: &mut Transaction<'_, Postgres>,
    role: StaffRole,
    user_ids: &[Uuid],
    members: &[StaffSeed],
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    if user_ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders: Vec<String> = (0..user_ids.len())
        .map(|i| format!("(${}, ${}, ${})", i * 3 + 1, i * 3 + 2, i * 3 + 3))
        .collect();
    let query = format!(
        "INSERT INTO {} (user_id, first_name, last_name) VALUES {} RETURNING id",
        role_table(role),
        placeholders.join(", ")
    );

    let mut q = sqlx::query_scalar(&query);
    for (user_id, member) in user_ids.iter().zip(members) {
        q = q
            .bind(user_id)
            .bind(&member.first_name)
            .bind(&member.last_name);
    }

    Ok(q.fetch_all(&mut **tx).await?)
}

/// Gives each professor two subjects, walking the subject list round-robin.
pub async fn assign_subjects(
    db: &PgPool,
    professor_ids: &[Uuid],
    subject_ids: &[Uuid],
) -> Result<(), Box<dyn std::error::Error>> {
    if professor_ids.is_empty() || subject_ids.is_empty() {
        return Ok(());
    }

    let mut professors = Vec::with_capacity(professor_ids.len() * 2);
    let mut subjects = Vec::with_capacity(professor_ids.len() * 2);
    for (i, &professor_id) in professor_ids.iter().enumerate() {
        for offset in 0..2 {
            professors.push(professor_id);
            subjects.push(subject_ids[(i * 2 + offset) % subject_ids.len()]);
        }
    }

    sqlx::query(
        "INSERT INTO professor_subjects (professor_id, subject_id) \
         SELECT * FROM UNNEST($1::uuid[], $2::uuid[]) ON CONFLICT DO NOTHING",
    )
    .bind(&professors)
    .bind(&subjects)
    .execute(db)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_emails_are_unique_and_seeded() {
        let staff = generate_staff(StaffRole::Professor, 40);
        let mut emails: Vec<&str> = staff.iter().map(|s| s.email.as_str()).collect();
        emails.sort();
        emails.dedup();

        assert_eq!(emails.len(), 40);
        assert!(
            staff
                .iter()
                .all(|s| s.email.ends_with(SEED_EMAIL_DOMAIN) && s.email.contains("+professor"))
        );
    }
}
