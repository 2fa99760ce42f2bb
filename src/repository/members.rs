//! JSON-backed member repository

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::{AppError, AppResult},
    models::Member,
};

use super::{store::JsonStore, MemberRepository};

pub struct JsonMemberRepository {
    store: Arc<JsonStore>,
}

impl JsonMemberRepository {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MemberRepository for JsonMemberRepository {
    async fn save(&self, member: Member) -> AppResult<()> {
        member.validate()?;

        let mut state = self.store.state.write().await;
        state.members.insert(member.id.clone(), member);
        self.store.persist(&state).await
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Member> {
        let state = self.store.state.read().await;
        state
            .members
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("member {id}")))
    }

    async fn list(&self) -> AppResult<Vec<Member>> {
        let state = self.store.state.read().await;
        Ok(state.members.values().cloned().collect())
    }
}
