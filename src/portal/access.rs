//! Role checks for portal actions.
//!
//! Roles are free-form strings owned by the backend's profile table, so
//! admin detection is lenient about letter case and accepts coordinator
//! roles (`Coordenador`, `Coordenação`, ...).

use super::{DocumentItem, User};
use crate::error::{PortalError, Result};

/// Whether the user may manage courses, lessons and every document.
pub fn is_admin(user: &User) -> bool {
    let role = user.role.as_str().trim().to_lowercase();
    role == "admin" || role.contains("coorden")
}

/// Admins may delete any document; everyone else only their own uploads.
pub fn can_delete_document(user: &User, doc: &DocumentItem) -> bool {
    is_admin(user) || doc.uploader_id.as_deref() == Some(user.id.as_str())
}

/// Fail with [`PortalError::Forbidden`] unless the user is an admin.
pub fn require_admin(user: &User, action: &str) -> Result<()> {
    if is_admin(user) {
        Ok(())
    } else {
        Err(PortalError::Forbidden(format!(
            "{action} requires an admin or coordinator role"
        )))
    }
}
