//! Students, courses, subjects and categories.

use std::time::Instant;

use aula_models::{Division, Shift, Year};
use chrono::NaiveDate;
use fake::Fake;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::CellNumber;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::models::{CategorySeed, CourseSeed, StudentSeed};

const SUBJECT_NAMES: &[&str] = &[
    "Matemática",
    "Lengua",
    "Historia",
    "Geografía",
    "Biología",
    "Física",
    "Química",
    "Inglés",
    "Educación Física",
    "Música",
    "Plástica",
    "Informática",
];

const CATEGORY_NAMES: &[&str] = &["Conducta", "Tardanza", "Rendimiento", "Salud", "Felicitación"];

/// Generates students in parallel. Birthdays fall between 2005 and 2015.
pub fn generate_students(count: usize) -> Vec<StudentSeed> {
    (0..count)
        .into_par_iter()
        .map(|_| {
            let year: i32 = (2005..2016).fake();
            let month: u32 = (1..13).fake();
            let day: u32 = (1..29).fake();

            StudentSeed {
                first_name: FirstName().fake(),
                last_name: LastName().fake(),
                birthday: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
                phone: CellNumber().fake(),
            }
        })
        .collect()
}

/// The first `count` year/division/shift triples, in declaration order.
pub fn generate_courses(count: usize) -> Vec<CourseSeed> {
    Shift::ALL
        .iter()
        .flat_map(|&shift| {
            Year::ALL.iter().flat_map(move |&year| {
                Division::ALL.iter().map(move |&division| CourseSeed {
                    year,
                    division,
                    shift,
                })
            })
        })
        .take(count)
        .collect()
}

/// Subject names cycle through a fixed list and get a numeric suffix once
/// the list runs out.
pub fn generate_subjects(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let base = SUBJECT_NAMES[i % SUBJECT_NAMES.len()];
            match i / SUBJECT_NAMES.len() {
                0 => base.to_string(),
                round => format!("{} {}", base, round + 1),
            }
        })
        .collect()
}

pub fn generate_categories(count: usize) -> Vec<CategorySeed> {
    (0..count)
        .map(|i| {
            let base = CATEGORY_NAMES[i % CATEGORY_NAMES.len()];
            let name = match i / CATEGORY_NAMES.len() {
                0 => base.to_string(),
                round => format!("{} {}", base, round + 1),
            };
            CategorySeed {
                name,
                description: Sentence(4..10).fake(),
            }
        })
        .collect()
}

/// Seeds students with one phone each, enrolled round-robin in `course_ids`.
pub async fn seed_students(
    db: &PgPool,
    count: usize,
    course_ids: &[Uuid],
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🎓 Seeding {} students...", count);

    let students = generate_students(count);

    let mut tx = db.begin().await?;
    // 3 params per student
    const BATCH_SIZE: usize = 1000;

    let mut student_ids = Vec::with_capacity(students.len());
    for chunk in students.chunks(BATCH_SIZE) {
        let ids = insert_students_chunk(&mut tx, chunk).await?;
        insert_phones_chunk(&mut tx, &ids, chunk).await?;
        student_ids.extend(ids);
    }

    if !course_ids.is_empty() {
        for chunk in student_ids.chunks(BATCH_SIZE) {
            let enrollments: Vec<(Uuid, Uuid)> = chunk
                .iter()
                .enumerate()
                .map(|(i, &student_id)| (course_ids[i % course_ids.len()], student_id))
                .collect();
            insert_enrollments_chunk(&mut tx, &enrollments).await?;
        }
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} students in {:?}",
        student_ids.len(),
        start_time.elapsed()
    );

    Ok(student_ids)
}

async fn insert_students_chunk(
    tx: &mut Transaction<'_, Postgres>,
    students: &[StudentSeed],
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    if students.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders: Vec<String> = (0..students.len())
        .map(|i| format!("(${}, ${}, ${})", i * 3 + 1, i * 3 + 2, i * 3 + 3))
        .collect();
    let query = format!(
        "INSERT INTO students (first_name, last_name, birthday) VALUES {} RETURNING id",
        placeholders.join(", ")
    );

    let mut q = sqlx::query_scalar(&query);
    for student in students {
        q = q
            .bind(&student.first_name)
            .bind(&student.last_name)
            .bind(student.birthday);
    }

    Ok(q.fetch_all(&mut **tx).await?)
}

async fn insert_phones_chunk(
    tx: &mut Transaction<'_, Postgres>,
    student_ids: &[Uuid],
    students: &[StudentSeed],
) -> Result<(), Box<dyn std::error::Error>> {
    if student_ids.is_empty() {
        return Ok(());
    }

    let placeholders: Vec<String> = (0..student_ids.len())
        .map(|i| format!("(${}, ${})", i * 2 + 1, i * 2 + 2))
        .collect();
    let query = format!(
        "INSERT INTO phones (number, student_id) VALUES {}",
        placeholders.join(", ")
    );

    let mut q = sqlx::query(&query);
    for (student_id, student) in student_ids.iter().zip(students) {
        q = q.bind(&student.phone).bind(student_id);
    }

    q.execute(&mut **tx).await?;
    Ok(())
}

async fn insert_enrollments_chunk(
    tx: &mut Transaction<'_, Postgres>,
    enrollments: &[(Uuid, Uuid)],
) -> Result<(), Box<dyn std::error::Error>> {
    if enrollments.is_empty() {
        return Ok(());
    }

    let placeholders: Vec<String> = (0..enrollments.len())
        .map(|i| format!("(${}, ${})", i * 2 + 1, i * 2 + 2))
        .collect();
    let query = format!(
        "INSERT INTO course_histories (course_id, student_id) VALUES {}",
        placeholders.join(", ")
    );

    let mut q = sqlx::query(&query);
    for (course_id, student_id) in enrollments {
        q = q.bind(course_id).bind(student_id);
    }

    q.execute(&mut **tx).await?;
    Ok(())
}

/// Seeds courses, skipping triples that already exist among alive courses.
pub async fn seed_courses(
    db: &PgPool,
    count: usize,
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let courses = generate_courses(count);
    println!("🏫 Seeding {} courses...", courses.len());

    let mut ids = Vec::with_capacity(courses.len());
    for course in &courses {
        let id: Option<Uuid> = sqlx::query_scalar(
            "INSERT INTO courses (year, division, shift) VALUES ($1, $2, $3) \
             ON CONFLICT DO NOTHING RETURNING id",
        )
        .bind(course.year)
        .bind(course.division)
        .bind(course.shift)
        .fetch_optional(db)
        .await?;
        ids.extend(id);
    }

    println!(
        "   ✓ Inserted {} courses in {:?}",
        ids.len(),
        start_time.elapsed()
    );
    Ok(ids)
}

pub async fn seed_subjects(
    db: &PgPool,
    count: usize,
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("📚 Seeding {} subjects...", count);

    let names = generate_subjects(count);
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> =
        sqlx::query_scalar("INSERT INTO subjects (name) SELECT * FROM UNNEST($1::text[]) RETURNING id")
            .bind(&names)
            .fetch_all(db)
            .await?;

    println!(
        "   ✓ Inserted {} subjects in {:?}",
        ids.len(),
        start_time.elapsed()
    );
    Ok(ids)
}

pub async fn seed_categories(
    db: &PgPool,
    count: usize,
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🏷️  Seeding {} categories...", count);

    let categories = generate_categories(count);
    if categories.is_empty() {
        return Ok(Vec::new());
    }

    let names: Vec<String> = categories.iter().map(|c| c.name.clone()).collect();
    let descriptions: Vec<String> = categories.iter().map(|c| c.description.clone()).collect();

    let ids: Vec<Uuid> = sqlx::query_scalar(
        "INSERT INTO categories (name, description) \
         SELECT * FROM UNNEST($1::text[], $2::text[]) RETURNING id",
    )
    .bind(&names)
    .bind(&descriptions)
    .fetch_all(db)
    .await?;

    println!(
        "   ✓ Inserted {} categories in {:?}",
        ids.len(),
        start_time.elapsed()
    );
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_courses_are_distinct() {
        let courses = generate_courses(12);
        assert_eq!(courses.len(), 12);

        let mut triples: Vec<_> = courses
            .iter()
            .map(|c| (c.year, c.division, c.shift))
            .collect();
        triples.sort_by_key(|(y, d, s)| (y.code(), d.code(), s.code()));
        triples.dedup();
        assert_eq!(triples.len(), 12);
    }

    #[test]
    fn test_generate_courses_is_capped() {
        let all = Year::ALL.len() * Division::ALL.len() * Shift::ALL.len();
        assert_eq!(generate_courses(10_000).len(), all);
    }

    #[test]
    fn test_generate_subjects_suffixes_repeats() {
        let subjects = generate_subjects(SUBJECT_NAMES.len() + 1);
        assert_eq!(subjects[0], "Matemática");
        assert_eq!(subjects[SUBJECT_NAMES.len()], "Matemática 2");
    }

    #[test]
    fn test_generate_students_birthdays_in_range() {
        for student in generate_students(50) {
            let year = chrono::Datelike::year(&student.birthday);
            assert!((2005..2016).contains(&year));
            assert!(!student.first_name.is_empty());
        }
    }
}
