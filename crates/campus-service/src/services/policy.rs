//! Policy service
//!
//! Thin gate over [`campus_core::authorize`]: every guarded service call goes
//! through `ensure`, which logs denials and turns them into `Forbidden`.

use campus_core::{authorize, Action, Decision, Principal, Target};
use tracing::{debug, warn};

use super::error::ServiceResult;

/// Policy service for access control
pub struct PolicyService;

impl PolicyService {
    /// Decide without failing
    pub fn check(principal: &Principal, action: Action, target: Target<'_>) -> Decision {
        authorize(principal, action, target)
    }

    /// Fail with `Forbidden` unless `principal` may perform `action` on `target`
    pub fn ensure(principal: &Principal, action: Action, target: Target<'_>) -> ServiceResult<()> {
        let decision = authorize(principal, action, target);
        match decision {
            Decision::Allow => {
                debug!(user_id = %principal.id, ?action, "Authorized");
            }
            Decision::Deny(reason) => {
                warn!(
                    user_id = %principal.id,
                    role = %principal.role,
                    ?action,
                    ?reason,
                    "Authorization denied"
                );
            }
        }
        decision.into_result().map_err(Into::into)
    }
}
