//! In-memory repositories for service tests
//!
//! One `MemoryStore` implements every repository trait over a single
//! mutex-guarded state, so multi-row writes are atomic the same way the
//! PostgreSQL transaction is. Delete rules follow the schema: cascades where
//! the schema cascades, `StillReferenced` where it restricts.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use campus_common::{BootstrapConfig, JwtService};
use campus_core::traits::{
    CommentRepository, EventRepository, RatingRepository, RepoResult, RsoRepository,
    UniversityRepository, UserRepository,
};
use campus_core::{
    Comment, DomainError, Event, EventStatus, EventType, Location, Principal, Rating, Rso, RsoCreationPlan,
    RsoMembership, RsoStatus, RsoSummary, Snowflake, SnowflakeGenerator, University, User,
    UserRole,
};
use chrono::Utc;
use parking_lot::Mutex;

use super::context::{ServiceContext, ServiceContextBuilder};

pub const TEST_SECRET: &str = "service-test-secret-that-is-long-enough";
pub const BOOTSTRAP_EMAIL: &str = "root@campus.edu";

#[derive(Default)]
struct State {
    users: HashMap<Snowflake, (User, String)>,
    universities: HashMap<Snowflake, University>,
    rsos: HashMap<Snowflake, Rso>,
    memberships: Vec<RsoMembership>,
    events: HashMap<Snowflake, Event>,
    comments: HashMap<Snowflake, Comment>,
    ratings: Vec<Rating>,
}

impl State {
    fn summary(&self, rso: &Rso) -> RsoSummary {
        let member_count = self
            .memberships
            .iter()
            .filter(|m| m.rso_id == rso.id)
            .count() as i64;
        RsoSummary {
            rso: rso.clone(),
            member_count,
        }
    }

    fn is_member(&self, rso_id: Snowflake, user_id: Snowflake) -> bool {
        self.memberships
            .iter()
            .any(|m| m.rso_id == rso_id && m.student_id == user_id)
    }

    fn remove_event(&mut self, id: Snowflake) {
        self.events.remove(&id);
        self.comments.retain(|_, c| c.event_id != id);
        self.ratings.retain(|r| r.event_id != id);
    }

    fn sorted_by_name(&self, rsos: impl Iterator<Item = Rso>) -> Vec<RsoSummary> {
        let mut summaries: Vec<RsoSummary> = rsos.map(|rso| self.summary(&rso)).collect();
        summaries.sort_by(|a, b| a.rso.name.cmp(&b.rso.name).then(a.rso.id.cmp(&b.rso.id)));
        summaries
    }
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Role as currently stored
    pub fn role_of(&self, id: Snowflake) -> Option<UserRole> {
        self.state.lock().users.get(&id).map(|(user, _)| user.role)
    }

    pub fn rso_count(&self) -> usize {
        self.state.lock().rsos.len()
    }

    pub fn membership_count(&self) -> usize {
        self.state.lock().memberships.len()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.state.lock().users.get(&id).map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .state
            .lock()
            .users
            .values()
            .find(|(u, _)| u.email == email)
            .map(|(u, _)| u.clone()))
    }

    async fn find_by_emails(&self, emails: &[String]) -> RepoResult<Vec<User>> {
        Ok(self
            .state
            .lock()
            .users
            .values()
            .filter(|(u, _)| emails.contains(&u.email))
            .map(|(u, _)| u.clone())
            .collect())
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.users.values().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        state
            .users
            .insert(user.id, (user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        Ok(self.state.lock().users.get(&id).map(|(_, h)| h.clone()))
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock();
        if !state.users.contains_key(&id) {
            return Err(DomainError::UserNotFound(id));
        }
        let referenced = state.rsos.values().any(|r| r.admin_id == id)
            || state.events.values().any(|e| e.created_by == id);
        if referenced {
            return Err(DomainError::StillReferenced("user"));
        }
        state.users.remove(&id);
        state.memberships.retain(|m| m.student_id != id);
        state.comments.retain(|_, c| c.user_id != id);
        state.ratings.retain(|r| r.user_id != id);
        Ok(())
    }
}

#[async_trait]
impl UniversityRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<University>> {
        Ok(self.state.lock().universities.get(&id).cloned())
    }

    async fn list(&self) -> RepoResult<Vec<University>> {
        let mut all: Vec<University> = self.state.lock().universities.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn create(&self, university: &University) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.universities.values().any(|u| u.name == university.name) {
            return Err(DomainError::UniversityNameTaken);
        }
        state.universities.insert(university.id, university.clone());
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock();
        if !state.universities.contains_key(&id) {
            return Err(DomainError::UniversityNotFound(id));
        }
        let referenced = state.users.values().any(|(u, _)| u.university_id == Some(id))
            || state.rsos.values().any(|r| r.university_id == id)
            || state.events.values().any(|e| e.university_id == Some(id));
        if referenced {
            return Err(DomainError::StillReferenced("university"));
        }
        state.universities.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl RsoRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Rso>> {
        Ok(self.state.lock().rsos.get(&id).cloned())
    }

    async fn find_summary(&self, id: Snowflake) -> RepoResult<Option<RsoSummary>> {
        let state = self.state.lock();
        Ok(state.rsos.get(&id).map(|rso| state.summary(rso)))
    }

    async fn create_with_members(&self, plan: &RsoCreationPlan) -> RepoResult<()> {
        let mut state = self.state.lock();
        state.rsos.insert(plan.rso.id, plan.rso.clone());
        for &member in &plan.member_ids {
            state
                .memberships
                .push(RsoMembership::new(plan.rso.id, member));
        }
        if let Some(change) = plan.role_change {
            if let Some((user, _)) = state.users.get_mut(&change.user_id) {
                user.promote(change.new_role);
            }
        }
        Ok(())
    }

    async fn update(&self, rso: &Rso) -> RepoResult<()> {
        let mut state = self.state.lock();
        let stored = state
            .rsos
            .get_mut(&rso.id)
            .ok_or(DomainError::RsoNotFound(rso.id))?;
        stored.name.clone_from(&rso.name);
        stored.updated_at = rso.updated_at;
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.rsos.remove(&id).is_none() {
            return Err(DomainError::RsoNotFound(id));
        }
        state.memberships.retain(|m| m.rso_id != id);
        let owned: Vec<Snowflake> = state
            .events
            .values()
            .filter(|e| e.rso_id == Some(id))
            .map(|e| e.id)
            .collect();
        for event_id in owned {
            state.remove_event(event_id);
        }
        Ok(())
    }

    async fn is_member(&self, rso_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        Ok(self.state.lock().is_member(rso_id, user_id))
    }

    async fn add_member(&self, membership: &RsoMembership) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.is_member(membership.rso_id, membership.student_id) {
            return Err(DomainError::AlreadyMember);
        }
        state.memberships.push(membership.clone());
        Ok(())
    }

    async fn member_rso_ids(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        Ok(self
            .state
            .lock()
            .memberships
            .iter()
            .filter(|m| m.student_id == user_id)
            .map(|m| m.rso_id)
            .collect())
    }

    async fn list_administered(&self, admin_id: Snowflake) -> RepoResult<Vec<RsoSummary>> {
        let state = self.state.lock();
        let rsos = state.rsos.values().filter(|r| r.admin_id == admin_id).cloned();
        Ok(state.sorted_by_name(rsos))
    }

    async fn list_for_member(&self, user_id: Snowflake) -> RepoResult<Vec<RsoSummary>> {
        let state = self.state.lock();
        let rsos = state
            .rsos
            .values()
            .filter(|r| state.is_member(r.id, user_id))
            .cloned();
        let mut summaries = state.sorted_by_name(rsos);
        summaries.sort_by_key(|s| s.rso.status != RsoStatus::Active);
        Ok(summaries)
    }

    async fn list_joinable(
        &self,
        user_id: Snowflake,
        university_id: Snowflake,
    ) -> RepoResult<Vec<RsoSummary>> {
        let state = self.state.lock();
        let rsos = state
            .rsos
            .values()
            .filter(|r| r.university_id == university_id && !state.is_member(r.id, user_id))
            .cloned();
        Ok(state.sorted_by_name(rsos))
    }
}

#[async_trait]
impl EventRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Event>> {
        Ok(self.state.lock().events.get(&id).cloned())
    }

    async fn create(&self, event: &Event) -> RepoResult<()> {
        self.state.lock().events.insert(event.id, event.clone());
        Ok(())
    }

    async fn update(&self, event: &Event) -> RepoResult<()> {
        let mut state = self.state.lock();
        let stored = state
            .events
            .get_mut(&event.id)
            .ok_or(DomainError::EventNotFound(event.id))?;
        // Type, scope and status are not writable through update.
        *stored = Event {
            event_type: stored.event_type,
            rso_id: stored.rso_id,
            university_id: stored.university_id,
            created_by: stored.created_by,
            status: stored.status,
            created_at: stored.created_at,
            ..event.clone()
        };
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock();
        if !state.events.contains_key(&id) {
            return Err(DomainError::EventNotFound(id));
        }
        state.remove_event(id);
        Ok(())
    }

    async fn find_visible_candidates(
        &self,
        _university_id: Option<Snowflake>,
        _rso_ids: &[Snowflake],
    ) -> RepoResult<Vec<Event>> {
        // Hand back everything so the pure filter does all the work.
        Ok(self.state.lock().events.values().cloned().collect())
    }

    async fn find_pending_public(&self) -> RepoResult<Vec<Event>> {
        Ok(self
            .state
            .lock()
            .events
            .values()
            .filter(|e| e.is_pending_public())
            .cloned()
            .collect())
    }

    async fn transition_status(
        &self,
        id: Snowflake,
        from: EventStatus,
        to: EventStatus,
    ) -> RepoResult<bool> {
        let mut state = self.state.lock();
        match state.events.get_mut(&id) {
            Some(event) if event.status == from => {
                event.status = to;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        Ok(self.state.lock().comments.get(&id).cloned())
    }

    async fn list_by_event(&self, event_id: Snowflake) -> RepoResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .state
            .lock()
            .comments
            .values()
            .filter(|c| c.event_id == event_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(comments)
    }

    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        self.state.lock().comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn update(&self, comment: &Comment) -> RepoResult<()> {
        let mut state = self.state.lock();
        let stored = state
            .comments
            .get_mut(&comment.id)
            .ok_or(DomainError::CommentNotFound(comment.id))?;
        stored.content.clone_from(&comment.content);
        stored.updated_at = comment.updated_at;
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.state
            .lock()
            .comments
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::CommentNotFound(id))
    }
}

#[async_trait]
impl RatingRepository for MemoryStore {
    async fn find(&self, event_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Rating>> {
        Ok(self
            .state
            .lock()
            .ratings
            .iter()
            .find(|r| r.event_id == event_id && r.user_id == user_id)
            .cloned())
    }

    async fn list_by_event(&self, event_id: Snowflake) -> RepoResult<Vec<Rating>> {
        Ok(self
            .state
            .lock()
            .ratings
            .iter()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn create(&self, rating: &Rating) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state
            .ratings
            .iter()
            .any(|r| r.event_id == rating.event_id && r.user_id == rating.user_id)
        {
            return Err(DomainError::AlreadyRated);
        }
        state.ratings.push(rating.clone());
        Ok(())
    }

    async fn update(&self, rating: &Rating) -> RepoResult<()> {
        let mut state = self.state.lock();
        let stored = state
            .ratings
            .iter_mut()
            .find(|r| r.event_id == rating.event_id && r.user_id == rating.user_id)
            .ok_or(DomainError::RatingNotFound)?;
        stored.rating = rating.rating;
        Ok(())
    }

    async fn delete(&self, event_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock();
        let before = state.ratings.len();
        state
            .ratings
            .retain(|r| !(r.event_id == event_id && r.user_id == user_id));
        if state.ratings.len() == before {
            return Err(DomainError::RatingNotFound);
        }
        Ok(())
    }
}

/// A context wired to one fresh store
pub struct Fixture {
    pub ctx: ServiceContext,
    pub store: Arc<MemoryStore>,
    ids: SnowflakeGenerator,
}

impl Fixture {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let ctx = ServiceContextBuilder::new()
            .user_repo(store.clone())
            .university_repo(store.clone())
            .rso_repo(store.clone())
            .event_repo(store.clone())
            .comment_repo(store.clone())
            .rating_repo(store.clone())
            .jwt_service(Arc::new(JwtService::new(TEST_SECRET, 3600)))
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
            .bootstrap(BootstrapConfig {
                super_admin_email: Some(BOOTSTRAP_EMAIL.to_string()),
            })
            .build()
            .unwrap();
        Self {
            ctx,
            store,
            ids: SnowflakeGenerator::new(2),
        }
    }

    pub async fn university(&self, name: &str) -> Snowflake {
        let university = University::new(self.ids.generate(), name.to_string());
        UniversityRepository::create(self.store.as_ref(), &university)
            .await
            .unwrap();
        university.id
    }

    /// Insert a user directly, bypassing registration
    pub async fn user(&self, email: &str, role: UserRole, university_id: Option<Snowflake>) -> Principal {
        let local = email.split('@').next().unwrap_or(email);
        let mut user = User::new(self.ids.generate(), local.to_string(), email, university_id);
        user.promote(role);
        UserRepository::create(self.store.as_ref(), &user, "unused-hash")
            .await
            .unwrap();
        Principal::from_user(&user)
    }

    /// Insert an approved public event created by `creator`
    pub async fn event(&self, creator: &Principal, university_id: Snowflake) -> Snowflake {
        self.event_with(creator, university_id, EventType::Public, EventStatus::Approved)
            .await
    }

    pub async fn event_with(
        &self,
        creator: &Principal,
        university_id: Snowflake,
        event_type: EventType,
        status: EventStatus,
    ) -> Snowflake {
        let now = Utc::now();
        let event = Event {
            id: self.ids.generate(),
            name: "Open Mic".to_string(),
            description: None,
            date_time: now,
            location: Location {
                name: "Student Union".to_string(),
                latitude: 28.6016,
                longitude: -81.2005,
            },
            contact_phone: None,
            contact_email: None,
            event_type,
            rso_id: None,
            university_id: Some(university_id),
            created_by: creator.id,
            status,
            created_at: now,
            updated_at: now,
        };
        EventRepository::create(self.store.as_ref(), &event)
            .await
            .unwrap();
        event.id
    }
}
