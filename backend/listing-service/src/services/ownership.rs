//! Ownership guard.
//!
//! Destructive operations (listing delete, comment delete) are restricted to
//! the identity that created the resource. Liking and commenting carry no
//! ownership restriction.
use uuid::Uuid;

use crate::error::{AppError, Result};

/// Allow the operation only when the acting identity owns the resource.
pub fn authorize_owner(owner_id: Uuid, acting_id: Uuid) -> Result<()> {
    if owner_id == acting_id {
        Ok(())
    } else {
        Err(AppError::NotOwner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_is_allowed() {
        let id = Uuid::new_v4();
        assert!(authorize_owner(id, id).is_ok());
    }

    #[test]
    fn test_non_owner_is_rejected() {
        let err = authorize_owner(Uuid::new_v4(), Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::NotOwner));
    }
}
