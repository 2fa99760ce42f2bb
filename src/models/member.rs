//! Member model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

use super::enums::MemberStatus;

/// Registered borrower
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub joined_at: DateTime<Utc>,
    pub status: MemberStatus,
}

impl Member {
    pub fn validate(&self) -> AppResult<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::Validation("member id is required".into()));
        }

        if self.name.trim().is_empty() {
            return Err(AppError::Validation("member name is required".into()));
        }

        Ok(())
    }

    pub fn can_borrow(&self) -> bool {
        self.status == MemberStatus::Active
    }
}

/// Register member request; `joined_at` is stamped by the service clock
#[derive(Debug, Clone, Default)]
pub struct RegisterMember {
    pub id: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Update member request; status changes go through `set_status`
#[derive(Debug, Clone)]
pub struct UpdateMember {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}
