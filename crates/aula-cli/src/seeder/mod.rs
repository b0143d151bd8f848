//! Database seeding with fake school data.
//!
//! Rows are generated in parallel with `rayon` and inserted in multi-row
//! batches inside one transaction per table.

pub mod models;
pub mod records;
pub mod staff;

use std::time::Instant;

use aula_core::hash_password;
use aula_db::{Repository, SoftDeletable};
use aula_models::{
    AcademicHistory, Category, Comment, Course, CourseHistory, Grade, Phone, Presence, StaffRole,
    Student, Subject,
};
use sqlx::PgPool;

pub use models::{SEED_EMAIL_DOMAIN, SeedConfig, StaffCounts};

/// Password of every seeded staff user.
pub const SEED_PASSWORD: &str = "password123";

pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🌱 Seeding database...\n");

    let password_hash = hash_password(SEED_PASSWORD).map_err(|e| e.error)?;

    let course_ids = records::seed_courses(db, config.courses).await?;
    let subject_ids = records::seed_subjects(db, config.subjects).await?;
    records::seed_categories(db, config.categories).await?;
    records::seed_students(db, config.students, &course_ids).await?;

    staff::seed_staff(db, StaffRole::Principal, config.staff.principals, &password_hash).await?;
    staff::seed_staff(db, StaffRole::Preceptor, config.staff.preceptors, &password_hash).await?;
    let professor_ids =
        staff::seed_staff(db, StaffRole::Professor, config.staff.professors, &password_hash)
            .await?;
    staff::assign_subjects(db, &professor_ids, &subject_ids).await?;

    println!("\n✅ Seeding completed in {:?}", start_time.elapsed());
    println!("   Staff users log in with password: {}", SEED_PASSWORD);
    Ok(())
}

async fn clear_table<T: SoftDeletable>(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let removed = Repository::<T>::all_objects(db)
        .hard_delete_all()
        .await
        .map_err(|e| e.error)?;
    println!("   ✓ {}: {} rows", T::TABLE, removed);
    Ok(())
}

/// Removes every school record, dead rows included, and the seeded staff
/// users. Users created outside the seeder are kept.
pub async fn clear_all(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    println!("🧹 Clearing seeded data...");

    clear_table::<Presence>(db).await?;
    clear_table::<Grade>(db).await?;
    clear_table::<AcademicHistory>(db).await?;
    clear_table::<CourseHistory>(db).await?;
    clear_table::<Phone>(db).await?;
    clear_table::<Comment>(db).await?;
    clear_table::<Category>(db).await?;
    clear_table::<Student>(db).await?;
    clear_table::<Course>(db).await?;
    clear_table::<Subject>(db).await?;

    // Role records and professor subjects cascade from the user rows
    let result = sqlx::query("DELETE FROM users WHERE email LIKE $1")
        .bind(format!("%@{}", SEED_EMAIL_DOMAIN))
        .execute(db)
        .await?;
    println!("   ✓ seeded users: {} rows", result.rows_affected());

    println!("✅ Seeded data cleared");
    Ok(())
}
