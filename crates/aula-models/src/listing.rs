use serde::Serialize;
use utoipa::ToSchema;

use aula_core::PaginationMeta;

/// Envelope returned by every listing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, meta: PaginationMeta) -> Self {
        Self { data, meta }
    }
}
