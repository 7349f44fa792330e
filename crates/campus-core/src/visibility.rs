//! Event visibility
//!
//! An approved event is visible to a viewer when it is an RSO event of an RSO
//! the viewer belongs to, or a public/private event of the viewer's
//! university. Nothing pending or rejected is ever visible here; moderators
//! read those through the pending queue instead.

use std::collections::HashSet;

use crate::entities::{Event, EventStatus, EventType};
use crate::policy::Principal;
use crate::value_objects::Snowflake;

/// Everything visibility depends on, loaded fresh for each request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerScope {
    pub university_id: Option<Snowflake>,
    pub rso_ids: HashSet<Snowflake>,
}

impl ViewerScope {
    pub fn new(principal: &Principal, rso_ids: impl IntoIterator<Item = Snowflake>) -> Self {
        Self {
            university_id: principal.university_id,
            rso_ids: rso_ids.into_iter().collect(),
        }
    }

    fn is_home(&self, university_id: Option<Snowflake>) -> bool {
        self.university_id.is_some() && self.university_id == university_id
    }
}

pub fn is_visible(scope: &ViewerScope, event: &Event) -> bool {
    if event.status != EventStatus::Approved {
        return false;
    }
    match event.event_type {
        EventType::Rso => event.rso_id.is_some_and(|id| scope.rso_ids.contains(&id)),
        EventType::Public | EventType::Private => scope.is_home(event.university_id),
    }
}

/// Soonest first, ties broken by id
pub fn sort_events(events: &mut [Event]) {
    events.sort_by(|a, b| a.date_time.cmp(&b.date_time).then(a.id.cmp(&b.id)));
}

/// Keep only what `scope` may see, in display order
pub fn visible_events(scope: &ViewerScope, candidates: Vec<Event>) -> Vec<Event> {
    let mut events: Vec<Event> = candidates
        .into_iter()
        .filter(|event| is_visible(scope, event))
        .collect();
    sort_events(&mut events);
    events
}

/// The moderation queue: public events awaiting review, in display order
pub fn pending_public_events(candidates: Vec<Event>) -> Vec<Event> {
    let mut events: Vec<Event> = candidates
        .into_iter()
        .filter(Event::is_pending_public)
        .collect();
    sort_events(&mut events);
    events
}
