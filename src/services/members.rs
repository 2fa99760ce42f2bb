//! Membership service

use std::sync::Arc;

use crate::{
    clock::Clock,
    error::{AppError, AppResult},
    id::IdGenerator,
    models::{Member, MemberStatus, RegisterMember, UpdateMember},
    repository::MemberRepository,
};

#[derive(Clone)]
pub struct MembersService {
    members: Arc<dyn MemberRepository>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl MembersService {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { members, ids, clock }
    }

    /// Register a member: join date comes from the injected clock, status
    /// defaults to active.
    pub async fn register(&self, input: RegisterMember) -> AppResult<Member> {
        let id = match input.id.filter(|id| !id.trim().is_empty()) {
            Some(id) => id,
            None => self.ids.new_id(),
        };

        match self.members.get_by_id(&id).await {
            Ok(_) => return Err(AppError::DuplicateId(id)),
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err),
        }

        let member = Member {
            id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            joined_at: self.clock.now(),
            status: MemberStatus::Active,
        };

        member.validate()?;
        self.members.save(member.clone()).await?;

        Ok(member)
    }

    /// Update contact details; status changes go through `set_status`.
    pub async fn update(&self, input: UpdateMember) -> AppResult<Member> {
        let mut member = self.members.get_by_id(&input.id).await?;

        member.name = input.name;
        member.email = input.email;
        member.phone = input.phone;

        member.validate()?;
        self.members.save(member.clone()).await?;

        Ok(member)
    }

    pub async fn set_status(&self, id: &str, status: MemberStatus) -> AppResult<Member> {
        let mut member = self.members.get_by_id(id).await?;

        member.status = status;
        member.validate()?;
        self.members.save(member.clone()).await?;

        Ok(member)
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Member> {
        self.members.get_by_id(id).await
    }

    pub async fn list(&self) -> AppResult<Vec<Member>> {
        self.members.list().await
    }
}
