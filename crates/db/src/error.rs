use skylane_core::error::CoreError;

/// Error type returned by the repository layer.
///
/// Repositories raise [`CoreError`] for domain failures they can detect
/// themselves (a referenced record that does not exist, an empty connect
/// set) and pass raw [`sqlx::Error`] through for everything else. The
/// HTTP layer classifies both into responses.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Convenience alias for repository return values.
pub type RepoResult<T> = Result<T, RepoError>;
