pub mod assignments;
pub mod auth;
pub mod employees;
pub mod requests;
pub mod shared;
pub mod slots;

use crate::auth::Claims;
use crate::error::AppError;

/// Admin-gated operations call this before touching a repository.
pub fn require_admin(claims: &Claims) -> Result<(), AppError> {
    if claims.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden("Admin access required".to_string()))
    }
}
