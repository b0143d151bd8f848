mod common;

use aula::aula_db::Repository;
use aula::aula_models::{CourseHistory, Phone, User};
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{
    TEST_PASSWORD, create_staff_user, create_superuser, create_via_api, generate_unique_email,
    get_auth_token, id_of, send, setup_test_app, token_for,
};
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

async fn create_student(pool: &PgPool, token: &str) -> Value {
    create_via_api(
        pool,
        token,
        "/api/students",
        json!({ "first_name": "Ana", "last_name": "Paz", "birthday": "2010-03-14" }),
    )
    .await
}

async fn hard_delete(pool: &PgPool, token: &str, uri: &str) {
    let (status, body) = send(
        setup_test_app(pool.clone()),
        "DELETE",
        &format!("{}?hard=true", uri),
        Some(token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT, "hard delete failed: {}", body);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_requires_birthday(pool: PgPool) {
    let staff = create_staff_user(&pool).await;
    let token = token_for(&pool, &staff).await;

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/students",
        Some(&token),
        Some(json!({ "first_name": "Ana", "last_name": "Paz" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "birthday is required");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_hard_deleting_student_cascades(pool: PgPool) {
    let admin = create_superuser(&pool).await;
    let token = token_for(&pool, &admin).await;
    let student = create_student(&pool, &token).await;
    let student_id = id_of(&student);

    create_via_api(
        &pool,
        &token,
        "/api/phones",
        json!({ "number": "+54 11 5555-0000", "student_id": student_id }),
    )
    .await;
    create_via_api(
        &pool,
        &token,
        "/api/course-histories",
        json!({ "student_id": student_id }),
    )
    .await;

    let (status, phones) = send(
        setup_test_app(pool.clone()),
        "GET",
        &format!("/api/students/{}/phones", student_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(phones.as_array().unwrap().len(), 1);

    hard_delete(&pool, &token, &format!("/api/students/{}", student_id)).await;

    let phones = Repository::<Phone>::all_objects(&pool).count().await.unwrap();
    let histories = Repository::<CourseHistory>::all_objects(&pool)
        .count()
        .await
        .unwrap();
    assert_eq!(phones, 0);
    assert_eq!(histories, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_soft_deleting_student_does_not_cascade(pool: PgPool) {
    let staff = create_staff_user(&pool).await;
    let token = token_for(&pool, &staff).await;
    let student = create_student(&pool, &token).await;
    let phone = create_via_api(
        &pool,
        &token,
        "/api/phones",
        json!({ "number": "4444-1234", "student_id": student["id"] }),
    )
    .await;

    let (status, _) = send(
        setup_test_app(pool.clone()),
        "DELETE",
        &format!("/api/students/{}", id_of(&student)),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "GET",
        &format!("/api/phones/{}", id_of(&phone)),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["deleted_at"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_hard_deleting_course_nullifies_histories(pool: PgPool) {
    let admin = create_superuser(&pool).await;
    let token = token_for(&pool, &admin).await;
    let student = create_student(&pool, &token).await;
    let course = create_via_api(&pool, &token, "/api/courses", json!({ "year": "FIF" })).await;
    let subject = create_via_api(&pool, &token, "/api/subjects", json!({ "name": "Biología" })).await;

    let history = create_via_api(
        &pool,
        &token,
        "/api/course-histories",
        json!({ "course_id": course["id"], "student_id": student["id"] }),
    )
    .await;
    let academic = create_via_api(
        &pool,
        &token,
        "/api/academic-histories",
        json!({ "course_id": course["id"], "subject_id": subject["id"], "cycle": 2024 }),
    )
    .await;

    hard_delete(&pool, &token, &format!("/api/courses/{}", id_of(&course))).await;

    let (_, history) = send(
        setup_test_app(pool.clone()),
        "GET",
        &format!("/api/course-histories/{}", id_of(&history)),
        Some(&token),
        None,
    )
    .await;
    assert!(history["course_id"].is_null());
    assert_eq!(history["student_id"], student["id"]);

    let (_, academic) = send(
        setup_test_app(pool.clone()),
        "GET",
        &format!("/api/academic-histories/{}", id_of(&academic)),
        Some(&token),
        None,
    )
    .await;
    assert!(academic["course_id"].is_null());
    assert_eq!(academic["subject_id"], subject["id"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_hard_deleting_subject_and_staff_nullifies_references(pool: PgPool) {
    let admin = create_superuser(&pool).await;
    let token = token_for(&pool, &admin).await;
    let student = create_student(&pool, &token).await;
    let subject = create_via_api(&pool, &token, "/api/subjects", json!({ "name": "Geografía" })).await;
    let professor = create_via_api(
        &pool,
        &token,
        "/api/professors",
        json!({
            "email": generate_unique_email(),
            "password": TEST_PASSWORD,
            "first_name": "Elena",
            "last_name": "Vera",
            "subject_ids": [subject["id"]]
        }),
    )
    .await;
    let preceptor = create_via_api(
        &pool,
        &token,
        "/api/preceptors",
        json!({
            "email": generate_unique_email(),
            "password": TEST_PASSWORD,
            "first_name": "Raúl",
            "last_name": "Díaz"
        }),
    )
    .await;

    let grade = create_via_api(
        &pool,
        &token,
        "/api/grades",
        json!({
            "professor_id": professor["id"],
            "student_id": student["id"],
            "subject_id": subject["id"],
            "grade": "9"
        }),
    )
    .await;
    let academic = create_via_api(
        &pool,
        &token,
        "/api/academic-histories",
        json!({ "subject_id": subject["id"], "cycle": 2025 }),
    )
    .await;
    let presence = create_via_api(
        &pool,
        &token,
        "/api/presences",
        json!({ "preceptor_id": preceptor["id"], "presence": true }),
    )
    .await;

    hard_delete(&pool, &token, &format!("/api/subjects/{}", id_of(&subject))).await;
    hard_delete(&pool, &token, &format!("/api/professors/{}", id_of(&professor))).await;
    hard_delete(&pool, &token, &format!("/api/preceptors/{}", id_of(&preceptor))).await;

    let (status, grade) = send(
        setup_test_app(pool.clone()),
        "GET",
        &format!("/api/grades/{}", id_of(&grade)),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(grade["subject_id"].is_null());
    assert!(grade["professor_id"].is_null());
    assert_eq!(grade["student_id"], student["id"]);
    assert_eq!(grade["grade"], "9");

    let (status, academic) = send(
        setup_test_app(pool.clone()),
        "GET",
        &format!("/api/academic-histories/{}", id_of(&academic)),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(academic["subject_id"].is_null());
    assert_eq!(academic["cycle"], 2025);

    let (status, presence) = send(
        setup_test_app(pool.clone()),
        "GET",
        &format!("/api/presences/{}", id_of(&presence)),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(presence["preceptor_id"].is_null());
    assert_eq!(presence["presence"], true);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_grade_values(pool: PgPool) {
    let admin = create_superuser(&pool).await;
    let token = token_for(&pool, &admin).await;
    let student = create_student(&pool, &token).await;

    let grade = create_via_api(
        &pool,
        &token,
        "/api/grades",
        json!({ "student_id": student["id"], "grade": "7" }),
    )
    .await;
    assert_eq!(grade["grade"], "7");

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/grades",
        Some(&token),
        Some(json!({ "student_id": student["id"], "grade": "11" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("'11'"));

    // Removing the student keeps the grade with no student
    hard_delete(&pool, &token, &format!("/api/students/{}", id_of(&student))).await;
    let (_, grade) = send(
        setup_test_app(pool.clone()),
        "GET",
        &format!("/api/grades/{}", id_of(&grade)),
        Some(&token),
        None,
    )
    .await;
    assert!(grade["student_id"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_has_one_presence(pool: PgPool) {
    let staff = create_staff_user(&pool).await;
    let token = token_for(&pool, &staff).await;
    let student = create_student(&pool, &token).await;

    let presence = create_via_api(
        &pool,
        &token,
        "/api/presences",
        json!({ "student_id": student["id"] }),
    )
    .await;
    assert!(presence["presence"].is_null());
    assert!(presence["date"].is_string());

    let (status, _) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/presences",
        Some(&token),
        Some(json!({ "student_id": student["id"], "presence": true })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "PUT",
        &format!("/api/presences/{}", id_of(&presence)),
        Some(&token),
        Some(json!({ "presence": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["presence"], true);

    // An explicit null puts the mark back to unknown
    let (status, body) = send(
        setup_test_app(pool.clone()),
        "PUT",
        &format!("/api/presences/{}", id_of(&presence)),
        Some(&token),
        Some(json!({ "presence": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["presence"].is_null());
    assert_eq!(body["student_id"], student["id"]);

    // Omitted fields are left alone
    let (_, body) = send(
        setup_test_app(pool.clone()),
        "PUT",
        &format!("/api/presences/{}", id_of(&presence)),
        Some(&token),
        Some(json!({ "presence": false })),
    )
    .await;
    assert_eq!(body["presence"], false);
    assert_eq!(body["student_id"], student["id"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_can_clear_references(pool: PgPool) {
    let staff = create_staff_user(&pool).await;
    let token = token_for(&pool, &staff).await;
    let student = create_student(&pool, &token).await;
    let course = create_via_api(&pool, &token, "/api/courses", json!({ "year": "SEC" })).await;
    let subject = create_via_api(&pool, &token, "/api/subjects", json!({ "name": "Lengua" })).await;

    let history = create_via_api(
        &pool,
        &token,
        "/api/course-histories",
        json!({ "course_id": course["id"], "student_id": student["id"] }),
    )
    .await;
    let (status, body) = send(
        setup_test_app(pool.clone()),
        "PUT",
        &format!("/api/course-histories/{}", id_of(&history)),
        Some(&token),
        Some(json!({ "course_id": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["course_id"].is_null());

    let grade = create_via_api(
        &pool,
        &token,
        "/api/grades",
        json!({ "student_id": student["id"], "subject_id": subject["id"], "grade": "8" }),
    )
    .await;
    let (status, body) = send(
        setup_test_app(pool.clone()),
        "PUT",
        &format!("/api/grades/{}", id_of(&grade)),
        Some(&token),
        Some(json!({ "subject_id": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["subject_id"].is_null());
    assert_eq!(body["student_id"], student["id"]);
    assert_eq!(body["grade"], "8");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_comment_with_categories(pool: PgPool) {
    let staff = create_staff_user(&pool).await;
    let token = token_for(&pool, &staff).await;
    let student = create_student(&pool, &token).await;
    let conduct = create_via_api(
        &pool,
        &token,
        "/api/categories",
        json!({ "name": "Conducta", "description": "Comportamiento en clase" }),
    )
    .await;
    let health = create_via_api(
        &pool,
        &token,
        "/api/categories",
        json!({ "name": "Salud", "description": "" }),
    )
    .await;

    let comment = create_via_api(
        &pool,
        &token,
        "/api/comments",
        json!({
            "student_id": student["id"],
            "description": "Llegó tarde",
            "category_ids": [conduct["id"], health["id"], conduct["id"]]
        }),
    )
    .await;
    assert_eq!(comment["author_id"], staff.id().to_string());
    assert_eq!(comment["category_ids"].as_array().unwrap().len(), 2);

    let (status, categories) = send(
        setup_test_app(pool.clone()),
        "GET",
        &format!("/api/comments/{}/categories", id_of(&comment)),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = categories
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Conducta", "Salud"]);

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "PUT",
        &format!("/api/comments/{}", id_of(&comment)),
        Some(&token),
        Some(json!({ "category_ids": [health["id"]] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category_ids"], json!([health["id"]]));
    assert_eq!(body["description"], "Llegó tarde");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_comment_with_unknown_category_is_rolled_back(pool: PgPool) {
    let staff = create_staff_user(&pool).await;
    let token = token_for(&pool, &staff).await;
    let student = create_student(&pool, &token).await;

    let (status, _) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/comments",
        Some(&token),
        Some(json!({
            "student_id": student["id"],
            "description": "Sin categoría válida",
            "category_ids": [Uuid::new_v4()]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_comment_form_redirects_to_student_comments(pool: PgPool) {
    let staff = create_staff_user(&pool).await;
    let token = token_for(&pool, &staff).await;
    let student = create_student(&pool, &token).await;
    let category = create_via_api(
        &pool,
        &token,
        "/api/categories",
        json!({ "name": "Tardanza", "description": "" }),
    )
    .await;
    let student_id = id_of(&student);

    let form = format!(
        "student_id={}&description=Lleg%C3%B3+tarde&categories={}",
        student_id,
        id_of(&category)
    );
    let request = Request::builder()
        .method("POST")
        .uri("/api/comments/form")
        .header("authorization", format!("Bearer {}", token))
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form))
        .unwrap();

    let response = setup_test_app(pool.clone()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        format!("/api/students/{}/comments", student_id).as_str()
    );

    let (_, comments) = send(
        setup_test_app(pool.clone()),
        "GET",
        &format!("/api/students/{}/comments", student_id),
        Some(&token),
        None,
    )
    .await;
    let comments = comments.as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["description"], "Llegó tarde");
    assert_eq!(comments[0]["author_id"], staff.id().to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_comment_form_rejects_bad_categories(pool: PgPool) {
    let staff = create_staff_user(&pool).await;
    let token = token_for(&pool, &staff).await;
    let student = create_student(&pool, &token).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/comments/form")
        .header("authorization", format!("Bearer {}", token))
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "student_id={}&description=x&categories=abc",
            id_of(&student)
        )))
        .unwrap();

    let response = setup_test_app(pool.clone()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_principal_creates_staff_user(pool: PgPool) {
    let staff = create_staff_user(&pool).await;
    let token = token_for(&pool, &staff).await;
    let email = generate_unique_email();

    let principal = create_via_api(
        &pool,
        &token,
        "/api/principals",
        json!({
            "email": email,
            "password": TEST_PASSWORD,
            "first_name": "Marta",
            "last_name": "Gómez"
        }),
    )
    .await;

    let user_id: Uuid = principal["user_id"].as_str().unwrap().parse().unwrap();
    let user: User = sqlx::query_as(
        "SELECT id, email, is_staff, is_active, is_superuser, date_joined, last_login \
         FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(user.email, email);
    assert!(user.is_staff);
    assert!(!user.is_superuser);

    // The new principal can log in and use staff endpoints
    let principal_token = get_auth_token(setup_test_app(pool.clone()), &email, TEST_PASSWORD).await;
    let (status, _) = send(
        setup_test_app(pool.clone()),
        "GET",
        "/api/principals",
        Some(&principal_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_failed_staff_creation_leaves_no_user(pool: PgPool) {
    let staff = create_staff_user(&pool).await;
    let token = token_for(&pool, &staff).await;

    let (status, _) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/professors",
        Some(&token),
        Some(json!({
            "email": "prof@school.edu",
            "password": TEST_PASSWORD,
            "first_name": "Luis",
            "last_name": "Sosa",
            "subject_ids": [Uuid::new_v4()]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = 'prof@school.edu')")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(!exists);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_professor_subjects(pool: PgPool) {
    let staff = create_staff_user(&pool).await;
    let token = token_for(&pool, &staff).await;
    let math = create_via_api(&pool, &token, "/api/subjects", json!({ "name": "Matemática" })).await;
    let art = create_via_api(&pool, &token, "/api/subjects", json!({ "name": "Arte" })).await;

    let professor = create_via_api(
        &pool,
        &token,
        "/api/professors",
        json!({
            "email": generate_unique_email(),
            "password": TEST_PASSWORD,
            "first_name": "Luis",
            "last_name": "Sosa",
            "subject_ids": [math["id"]]
        }),
    )
    .await;
    assert_eq!(professor["subjects"][0]["name"], "Matemática");

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "PUT",
        &format!("/api/professors/{}/subjects", id_of(&professor)),
        Some(&token),
        Some(json!({ "subject_ids": [math["id"], art["id"]] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subjects"].as_array().unwrap().len(), 2);

    let (status, subjects) = send(
        setup_test_app(pool.clone()),
        "GET",
        &format!("/api/professors/{}/subjects", id_of(&professor)),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(subjects[0]["name"], "Arte");
    assert_eq!(subjects[1]["name"], "Matemática");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_removing_user_removes_role_record(pool: PgPool) {
    let staff = create_staff_user(&pool).await;
    let token = token_for(&pool, &staff).await;
    let preceptor = create_via_api(
        &pool,
        &token,
        "/api/preceptors",
        json!({
            "email": generate_unique_email(),
            "password": TEST_PASSWORD,
            "first_name": "Juan",
            "last_name": "Ríos"
        }),
    )
    .await;
    let user_id: Uuid = preceptor["user_id"].as_str().unwrap().parse().unwrap();

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();

    let (status, _) = send(
        setup_test_app(pool.clone()),
        "GET",
        &format!("/api/preceptors/{}?include_deleted=true", id_of(&preceptor)),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
