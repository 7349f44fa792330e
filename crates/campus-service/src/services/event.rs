//! Event service
//!
//! Creation scoping, visibility, editing and moderation of events.

use campus_core::visibility::{self, ViewerScope};
use campus_core::{
    Action, DomainError, Event, EventStatus, EventType, Location, NewEventScope, Principal,
    Snowflake, Target,
};
use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::dto::{CreateEventRequest, EventResponse, LocationRequest, UpdateEventRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::policy::PolicyService;

fn to_location(location: LocationRequest) -> Location {
    Location {
        name: location.name,
        latitude: location.latitude,
        longitude: location.longitude,
    }
}

/// Event service
pub struct EventService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EventService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create an event.
    ///
    /// RSO events take their RSO's university and may only be created by
    /// that RSO's admin. Private events need a university the creator
    /// belongs to. Public events default to the creator's university, must
    /// end up with one, and start pending; everything else starts approved.
    #[instrument(skip(self, principal, request), fields(user_id = %principal.id, event_type = %request.event_type))]
    pub async fn create_event(
        &self,
        principal: &Principal,
        request: CreateEventRequest,
    ) -> ServiceResult<EventResponse> {
        let scope = self.resolve_scope(principal, &request).await?;

        PolicyService::ensure(principal, Action::CreateEvent, Target::NewEvent(scope))?;

        if let Some(university_id) = scope.university_id {
            self.ctx
                .university_repo()
                .find_by_id(university_id)
                .await?
                .ok_or(DomainError::UniversityNotFound(university_id))?;
        }

        let now = Utc::now();
        let event = Event {
            id: self.ctx.generate_id(),
            name: request.name.trim().to_string(),
            description: request.description,
            date_time: request.date_time,
            location: to_location(request.location),
            contact_phone: request.contact_phone,
            contact_email: request.contact_email,
            event_type: request.event_type,
            rso_id: request.rso_id,
            university_id: scope.university_id,
            created_by: principal.id,
            status: request.event_type.initial_status(),
            created_at: now,
            updated_at: now,
        };

        self.ctx.event_repo().create(&event).await?;

        info!(
            event_id = %event.id,
            status = %event.status,
            "Event created"
        );
        Ok(EventResponse::from(event))
    }

    /// Validate the type/scope combination and work out the effective scope
    async fn resolve_scope(
        &self,
        principal: &Principal,
        request: &CreateEventRequest,
    ) -> ServiceResult<NewEventScope> {
        match request.event_type {
            EventType::Rso => {
                let rso_id = request
                    .rso_id
                    .ok_or_else(|| ServiceError::validation("rso_id is required for RSO events"))?;
                let rso = self
                    .ctx
                    .rso_repo()
                    .find_by_id(rso_id)
                    .await?
                    .ok_or(DomainError::RsoNotFound(rso_id))?;
                if request.university_id.is_some_and(|id| id != rso.university_id) {
                    return Err(ServiceError::validation(
                        "An RSO event belongs to its RSO's university",
                    ));
                }
                Ok(NewEventScope {
                    event_type: EventType::Rso,
                    university_id: Some(rso.university_id),
                    rso_admin_id: Some(rso.admin_id),
                })
            }
            EventType::Private | EventType::Public if request.rso_id.is_some() => Err(
                ServiceError::validation("rso_id is only allowed for RSO events"),
            ),
            EventType::Private => {
                let university_id = request.university_id.ok_or_else(|| {
                    ServiceError::validation("university_id is required for private events")
                })?;
                Ok(NewEventScope {
                    event_type: EventType::Private,
                    university_id: Some(university_id),
                    rso_admin_id: None,
                })
            }
            EventType::Public => {
                let university_id = request
                    .university_id
                    .or(principal.university_id)
                    .ok_or_else(|| {
                        ServiceError::validation("university_id is required for public events")
                    })?;
                Ok(NewEventScope {
                    event_type: EventType::Public,
                    university_id: Some(university_id),
                    rso_admin_id: None,
                })
            }
        }
    }

    /// Fetch one event.
    ///
    /// Events the principal may not see are reported as missing.
    #[instrument(skip(self, principal), fields(user_id = %principal.id))]
    pub async fn get_event(
        &self,
        principal: &Principal,
        event_id: Snowflake,
    ) -> ServiceResult<EventResponse> {
        let event = self.find_readable(principal, event_id).await?;
        Ok(EventResponse::from(event))
    }

    /// Load an event the principal may read, or report it as missing.
    ///
    /// Comments and ratings go through this too, so an event hidden from
    /// `get_event` cannot be reached through its sub-resources.
    pub(crate) async fn find_readable(
        &self,
        principal: &Principal,
        event_id: Snowflake,
    ) -> ServiceResult<Event> {
        let event = self.find_event(event_id).await?;

        let scope = self.viewer_scope(principal, &event).await?;
        let readable = visibility::is_visible(&scope, &event)
            || PolicyService::check(principal, Action::ViewEvent, Target::Event(&event))
                .is_allowed();
        if !readable {
            return Err(DomainError::EventNotFound(event_id).into());
        }
        Ok(event)
    }

    /// Edit descriptive fields. Type, scope and status never change here.
    #[instrument(skip(self, principal, request), fields(user_id = %principal.id))]
    pub async fn update_event(
        &self,
        principal: &Principal,
        event_id: Snowflake,
        request: UpdateEventRequest,
    ) -> ServiceResult<EventResponse> {
        let mut event = self.find_event(event_id).await?;

        PolicyService::ensure(principal, Action::UpdateEvent, Target::Event(&event))?;

        if let Some(name) = request.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(ServiceError::validation("Event name cannot be blank"));
            }
            event.name = name.to_string();
        }
        if let Some(description) = request.description {
            event.description = Some(description);
        }
        if let Some(date_time) = request.date_time {
            event.date_time = date_time;
        }
        if let Some(location) = request.location {
            event.location = to_location(location);
        }
        if let Some(phone) = request.contact_phone {
            event.contact_phone = Some(phone);
        }
        if let Some(email) = request.contact_email {
            event.contact_email = Some(email);
        }
        event.updated_at = Utc::now();

        self.ctx.event_repo().update(&event).await?;

        info!(event_id = %event.id, "Event updated");
        Ok(EventResponse::from(event))
    }

    #[instrument(skip(self, principal), fields(user_id = %principal.id))]
    pub async fn delete_event(&self, principal: &Principal, event_id: Snowflake) -> ServiceResult<()> {
        let event = self.find_event(event_id).await?;

        PolicyService::ensure(principal, Action::DeleteEvent, Target::Event(&event))?;

        self.ctx.event_repo().delete(event_id).await?;

        info!(event_id = %event_id, "Event deleted");
        Ok(())
    }

    /// Every approved event the principal can see, soonest first
    #[instrument(skip(self, principal), fields(user_id = %principal.id))]
    pub async fn visible_events(&self, principal: &Principal) -> ServiceResult<Vec<EventResponse>> {
        let rso_ids = self.ctx.rso_repo().member_rso_ids(principal.id).await?;
        let candidates = self
            .ctx
            .event_repo()
            .find_visible_candidates(principal.university_id, &rso_ids)
            .await?;

        let scope = ViewerScope::new(principal, rso_ids);
        let events = visibility::visible_events(&scope, candidates);
        Ok(events.into_iter().map(EventResponse::from).collect())
    }

    /// Public events awaiting review
    #[instrument(skip(self, principal), fields(user_id = %principal.id))]
    pub async fn pending_public_events(
        &self,
        principal: &Principal,
    ) -> ServiceResult<Vec<EventResponse>> {
        PolicyService::ensure(principal, Action::ViewPendingEvents, Target::None)?;

        let candidates = self.ctx.event_repo().find_pending_public().await?;
        let events = visibility::pending_public_events(candidates);
        Ok(events.into_iter().map(EventResponse::from).collect())
    }

    /// Approve or reject a pending event.
    ///
    /// The transition is conditional on the event still being pending, so of
    /// two concurrent reviewers exactly one succeeds and the other gets
    /// `EventNotPending`.
    #[instrument(skip(self, principal), fields(user_id = %principal.id))]
    pub async fn set_event_status(
        &self,
        principal: &Principal,
        event_id: Snowflake,
        status: EventStatus,
    ) -> ServiceResult<EventResponse> {
        if status == EventStatus::Pending {
            return Err(ServiceError::validation(
                "Status must be either approved or rejected",
            ));
        }

        PolicyService::ensure(principal, Action::ReviewEvent, Target::None)?;

        let moved = self
            .ctx
            .event_repo()
            .transition_status(event_id, EventStatus::Pending, status)
            .await?;

        let event = self.find_event(event_id).await?;
        if !moved {
            warn!(event_id = %event_id, current = %event.status, "Review of non-pending event");
            return Err(DomainError::EventNotPending {
                current: event.status,
            }
            .into());
        }

        info!(event_id = %event_id, status = %status, reviewer_id = %principal.id, "Event reviewed");
        Ok(EventResponse::from(event))
    }

    async fn find_event(&self, event_id: Snowflake) -> ServiceResult<Event> {
        self.ctx
            .event_repo()
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| DomainError::EventNotFound(event_id).into())
    }

    /// Memberships are only loaded when the event is an RSO event
    async fn viewer_scope(&self, principal: &Principal, event: &Event) -> ServiceResult<ViewerScope> {
        let rso_ids = match event.rso_id {
            Some(rso_id) if self.ctx.rso_repo().is_member(rso_id, principal.id).await? => {
                vec![rso_id]
            }
            _ => Vec::new(),
        };
        Ok(ViewerScope::new(principal, rso_ids))
    }
}
