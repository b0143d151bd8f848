//! Listing, detail, soft/hard deletion and restore handlers shared by every
//! soft-deletable entity.
//!
//! Each feature module expands [`soft_delete_handlers!`] for its row type and
//! adds its own create/update handlers next to them.

pub mod model;

pub use model::{DeleteQuery, ListQuery, ScopeQuery};

/// Generates `list_records`, `get_record`, `delete_record` and
/// `restore_record` for a [`aula_db::SoftDeletable`] row type.
///
/// All four require a staff token; hard deletion also requires a superuser.
macro_rules! soft_delete_handlers {
    (
        $row:ident,
        tag = $tag:tt,
        list = $list_path:tt,
        item = $item_path:tt,
        restore = $restore_path:tt
    ) => {
        /// List records. Dead rows appear with `include_deleted=true`.
        #[utoipa::path(
            get,
            path = $list_path,
            params($crate::modules::admin::ListQuery),
            responses(
                (status = 200, description = "Paginated records", body = aula_models::Paginated<$row>),
                (status = 401, description = "Unauthorized"),
                (status = 403, description = "Staff access required")
            ),
            tag = $tag,
            security(("bearer_auth" = []))
        )]
        #[tracing::instrument(skip(state))]
        pub async fn list_records(
            axum::extract::State(state): axum::extract::State<$crate::state::AppState>,
            _staff: $crate::middleware::auth::RequireStaff,
            axum::extract::Query(query): axum::extract::Query<$crate::modules::admin::ListQuery>,
        ) -> Result<axum::Json<aula_models::Paginated<$row>>, aula_core::AppError> {
            let (data, meta) = query
                .repository::<$row>(&state.db)
                .fetch_page(&query.pagination)
                .await?;
            Ok(axum::Json(aula_models::Paginated::new(data, meta)))
        }

        #[utoipa::path(
            get,
            path = $item_path,
            params(
                ("id" = uuid::Uuid, Path, description = "Record ID"),
                $crate::modules::admin::ScopeQuery
            ),
            responses(
                (status = 200, description = "Record", body = $row),
                (status = 401, description = "Unauthorized"),
                (status = 403, description = "Staff access required"),
                (status = 404, description = "Not found")
            ),
            tag = $tag,
            security(("bearer_auth" = []))
        )]
        #[tracing::instrument(skip(state))]
        pub async fn get_record(
            axum::extract::State(state): axum::extract::State<$crate::state::AppState>,
            _staff: $crate::middleware::auth::RequireStaff,
            axum::extract::Path(id): axum::extract::Path<uuid::Uuid>,
            axum::extract::Query(scope): axum::extract::Query<$crate::modules::admin::ScopeQuery>,
        ) -> Result<axum::Json<$row>, aula_core::AppError> {
            let record = scope.repository::<$row>(&state.db).get(id).await?;
            Ok(axum::Json(record))
        }

        /// Soft-delete a record, or remove it with `hard=true` (superuser only).
        #[utoipa::path(
            delete,
            path = $item_path,
            params(
                ("id" = uuid::Uuid, Path, description = "Record ID"),
                $crate::modules::admin::DeleteQuery
            ),
            responses(
                (status = 204, description = "Deleted"),
                (status = 401, description = "Unauthorized"),
                (status = 403, description = "Staff or superuser access required"),
                (status = 404, description = "Not found"),
                (status = 409, description = "Still referenced")
            ),
            tag = $tag,
            security(("bearer_auth" = []))
        )]
        #[tracing::instrument(skip(state))]
        pub async fn delete_record(
            axum::extract::State(state): axum::extract::State<$crate::state::AppState>,
            $crate::middleware::auth::RequireStaff(auth_user): $crate::middleware::auth::RequireStaff,
            axum::extract::Path(id): axum::extract::Path<uuid::Uuid>,
            axum::extract::Query(query): axum::extract::Query<$crate::modules::admin::DeleteQuery>,
        ) -> Result<axum::http::StatusCode, aula_core::AppError> {
            $crate::modules::admin::model::delete_with::<$row>(&state.db, &auth_user, id, &query)
                .await?;
            Ok(axum::http::StatusCode::NO_CONTENT)
        }

        #[utoipa::path(
            post,
            path = $restore_path,
            params(("id" = uuid::Uuid, Path, description = "Record ID")),
            responses(
                (status = 200, description = "Restored record", body = $row),
                (status = 401, description = "Unauthorized"),
                (status = 403, description = "Staff access required"),
                (status = 404, description = "Not found")
            ),
            tag = $tag,
            security(("bearer_auth" = []))
        )]
        #[tracing::instrument(skip(state))]
        pub async fn restore_record(
            axum::extract::State(state): axum::extract::State<$crate::state::AppState>,
            _staff: $crate::middleware::auth::RequireStaff,
            axum::extract::Path(id): axum::extract::Path<uuid::Uuid>,
        ) -> Result<axum::Json<$row>, aula_core::AppError> {
            let record = aula_db::Repository::<$row>::all_objects(&state.db)
                .restore(id)
                .await?;
            $crate::metrics::track_record_restored(<$row as aula_db::SoftDeletable>::TABLE);
            Ok(axum::Json(record))
        }
    };
}

pub(crate) use soft_delete_handlers;
