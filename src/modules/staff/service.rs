use sqlx::{PgConnection, PgPool};
use tracing::instrument;
use uuid::Uuid;

use aula_core::AppError;
use aula_db::{Repository, SoftDeletable, map_db_error};
use aula_models::{
    CreateProfessorDto, CreateStaffMemberDto, ExtraFields, Preceptor, Principal, Professor,
    ProfessorWithSubjects, SetProfessorSubjectsDto, StaffRole, Subject, UpdateStaffMemberDto,
    UserKind,
};

use crate::modules::users::UserService;

/// A role record owning one user identity.
pub trait StaffRecord: SoftDeletable {
    const ROLE: StaffRole;
}

impl StaffRecord for Principal {
    const ROLE: StaffRole = StaffRole::Principal;
}

impl StaffRecord for Preceptor {
    const ROLE: StaffRole = StaffRole::Preceptor;
}

impl StaffRecord for Professor {
    const ROLE: StaffRole = StaffRole::Professor;
}

pub struct StaffService;

impl StaffService {
    #[instrument(skip(db, dto), fields(role = T::ROLE.as_str(), email = %dto.email))]
    pub async fn create_member<T: StaffRecord>(
        db: &PgPool,
        dto: &CreateStaffMemberDto,
    ) -> Result<T, AppError> {
        let mut tx = db.begin().await.map_err(map_db_error)?;
        let member = Self::insert_member::<T>(&mut tx, dto).await?;
        tx.commit().await.map_err(map_db_error)?;
        Ok(member)
    }

    async fn insert_member<T: StaffRecord>(
        conn: &mut PgConnection,
        dto: &CreateStaffMemberDto,
    ) -> Result<T, AppError> {
        let user = UserService::insert(
            &mut *conn,
            &dto.email,
            &dto.password,
            ExtraFields::staff(),
            UserKind::Staff,
        )
        .await?;

        let sql = format!(
            "INSERT INTO {} (user_id, first_name, last_name) VALUES ($1, $2, $3) RETURNING {}",
            T::TABLE,
            T::COLUMNS
        );
        let member = sqlx::query_as::<_, T>(&sql)
            .bind(user.id)
            .bind(dto.first_name.trim())
            .bind(dto.last_name.trim())
            .fetch_one(&mut *conn)
            .await
            .map_err(map_db_error)?;

        tracing::info!(
            role = T::ROLE.as_str(),
            member_id = %member.id(),
            user_id = %user.id,
            "Staff member created"
        );
        Ok(member)
    }

    #[instrument(skip(db), fields(role = T::ROLE.as_str()))]
    pub async fn update_member<T: StaffRecord>(
        db: &PgPool,
        id: Uuid,
        dto: UpdateStaffMemberDto,
    ) -> Result<T, AppError> {
        let sql = format!(
            "UPDATE {} SET first_name = COALESCE($2, first_name), \
             last_name = COALESCE($3, last_name), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {}",
            T::TABLE,
            T::COLUMNS
        );
        sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .bind(dto.first_name.as_deref().map(str::trim))
            .bind(dto.last_name.as_deref().map(str::trim))
            .fetch_optional(db)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("{} not found", T::ENTITY)))
    }

    /// Creates the professor and links its subjects in the same transaction.
    #[instrument(skip(db, dto), fields(email = %dto.member.email))]
    pub async fn create_professor(
        db: &PgPool,
        dto: &CreateProfessorDto,
    ) -> Result<ProfessorWithSubjects, AppError> {
        let mut tx = db.begin().await.map_err(map_db_error)?;
        let professor = Self::insert_member::<Professor>(&mut tx, &dto.member).await?;
        Self::link_subjects(&mut tx, professor.id, &dto.subject_ids).await?;
        let subjects = Self::subjects_of(&mut tx, professor.id).await?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(ProfessorWithSubjects {
            professor,
            subjects,
        })
    }

    /// Alive subjects taught by an alive professor, by name.
    #[instrument(skip(db))]
    pub async fn get_subjects(db: &PgPool, professor_id: Uuid) -> Result<Vec<Subject>, AppError> {
        Repository::<Professor>::objects(db).get(professor_id).await?;
        let mut conn = db.acquire().await.map_err(map_db_error)?;
        Self::subjects_of(&mut conn, professor_id).await
    }

    /// Replaces the subject set of an alive professor.
    #[instrument(skip(db))]
    pub async fn set_subjects(
        db: &PgPool,
        professor_id: Uuid,
        dto: SetProfessorSubjectsDto,
    ) -> Result<ProfessorWithSubjects, AppError> {
        let professor = Repository::<Professor>::objects(db).get(professor_id).await?;

        let mut tx = db.begin().await.map_err(map_db_error)?;
        sqlx::query("DELETE FROM professor_subjects WHERE professor_id = $1")
            .bind(professor_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        Self::link_subjects(&mut tx, professor_id, &dto.subject_ids).await?;
        let subjects = Self::subjects_of(&mut tx, professor_id).await?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(ProfessorWithSubjects {
            professor,
            subjects,
        })
    }

    async fn link_subjects(
        conn: &mut PgConnection,
        professor_id: Uuid,
        subject_ids: &[Uuid],
    ) -> Result<(), AppError> {
        for subject_id in subject_ids {
            sqlx::query(
                "INSERT INTO professor_subjects (professor_id, subject_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(professor_id)
            .bind(subject_id)
            .execute(&mut *conn)
            .await
            .map_err(map_db_error)?;
        }
        Ok(())
    }

    async fn subjects_of(
        conn: &mut PgConnection,
        professor_id: Uuid,
    ) -> Result<Vec<Subject>, AppError> {
        let sql = format!(
            "SELECT {} FROM subjects \
             WHERE deleted_at IS NULL \
             AND id IN (SELECT subject_id FROM professor_subjects WHERE professor_id = $1) \
             ORDER BY name",
            Subject::COLUMNS
        );
        sqlx::query_as::<_, Subject>(&sql)
            .bind(professor_id)
            .fetch_all(&mut *conn)
            .await
            .map_err(map_db_error)
    }
}
