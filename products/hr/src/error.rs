use platform_api::ApiError;
use sea_orm::DbErr;
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },
    /// Storage failure, tagged with the operation path that hit it.
    #[error("employee_repo: {op}")]
    Storage {
        op: String,
        #[source]
        source: DbErr,
    },
}

impl RepoError {
    pub fn employee_not_found(id: i32) -> Self {
        Self::NotFound {
            entity: "employee",
            id,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RepoError::NotFound { .. })
    }

    /// Prefix the operation path with an enclosing operation name.
    pub fn within(self, outer: &str) -> Self {
        match self {
            RepoError::Storage { op, source } => RepoError::Storage {
                op: format!("{outer}: {op}"),
                source,
            },
            other => other,
        }
    }
}

/// Tags raw `DbErr`s with the operation that produced them.
pub(crate) trait StorageContext<T> {
    fn op(self, op: &str) -> RepoResult<T>;
}

impl<T> StorageContext<T> for Result<T, DbErr> {
    fn op(self, op: &str) -> RepoResult<T> {
        self.map_err(|source| RepoError::Storage {
            op: op.to_string(),
            source,
        })
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { .. } => ApiError::NotFound(value.to_string()),
            RepoError::Storage { .. } => ApiError::internal(value.into()),
        }
    }
}
