//! Authorization guards: coarse role checks, instance-level ownership
//! checks, and the role/resource/action permission matrix.
//!
//! Every decision here is a pure function of the principal and the loaded
//! resource. Nothing is cached across requests - principal and resource
//! state can change between calls, so each mutating request recomputes
//! its decision from scratch.

use crate::auth::principal::{Principal, Role};
use crate::error::AppError;

/// How a principal must be related to a resource instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// The resource's primary ownership reference must match
    Owner,
    /// The resource's assignment reference must match (e.g. a guide
    /// assigned to feedback they did not create)
    Assignee,
    /// Either reference may match
    OwnerOrAssignee,
}

/// Resource types for type-level permission checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Safari,
    Vehicle,
    Booking,
    Feedback,
    Notification,
    Profile,
    User,
}

/// Actions a role may take on a resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    List,
    Approve,
    Respond,
}

/// A resource with an owning principal and an optional second principal
/// granted restricted access via an explicit assignment reference.
pub trait Owned {
    /// Primary ownership reference. `None` means the resource is not
    /// addressed to a single principal (e.g. a role-addressed
    /// notification) and only an admin may touch it.
    fn owner_id(&self) -> Option<i32>;

    fn assignee_id(&self) -> Option<i32> {
        None
    }
}

/// Coarse role check: allow iff the principal's role is in the allowed set.
///
/// There is no admin special case at this layer - call sites that should
/// admit admins list `Role::Admin` explicitly. The unconditional admin
/// override lives in [`authorize_ownership`] only, so the convention is
/// the same at every call site.
pub fn authorize(principal: &Principal, allowed: &[Role]) -> Result<(), AppError> {
    if allowed.contains(&principal.role) {
        return Ok(());
    }

    let allowed_names: Vec<&str> = allowed.iter().map(|r| r.as_str()).collect();
    Err(AppError::Forbidden(format!(
        "role '{}' is not permitted here (requires one of: {})",
        principal.role.as_str(),
        allowed_names.join(", ")
    )))
}

/// Instance-level ownership check against a loaded resource.
///
/// Admins always pass. Everyone else must match the id reference(s) the
/// relation implies. The caller is responsible for having already turned
/// a missing resource into `NotFound` - by the time this runs, existence
/// is established, so a mismatch is `Forbidden` for every resource type.
pub fn authorize_ownership<R: Owned>(
    principal: &Principal,
    resource: &R,
    relation: Relation,
) -> Result<(), AppError> {
    if principal.role == Role::Admin {
        return Ok(());
    }

    let owner_match = resource.owner_id() == Some(principal.id);
    let assignee_match = resource.assignee_id() == Some(principal.id);

    let allowed = match relation {
        Relation::Owner => owner_match,
        Relation::Assignee => assignee_match,
        Relation::OwnerOrAssignee => owner_match || assignee_match,
    };

    if allowed {
        Ok(())
    } else {
        let relation_name = match relation {
            Relation::Owner => "owner",
            Relation::Assignee => "assignee",
            Relation::OwnerOrAssignee => "owner or assignee",
        };
        Err(AppError::Forbidden(format!(
            "principal is not the {} of this resource",
            relation_name
        )))
    }
}

/// Static permission matrix for actions not tied to a loaded instance
/// (listing, creation). Once a concrete resource is loaded,
/// [`authorize_ownership`] takes precedence.
///
/// Unknown combinations deny - the matrix fails closed.
pub fn permitted(role: Role, resource: ResourceType, action: Action) -> bool {
    use Action::*;
    use ResourceType::*;

    if role == Role::Admin {
        return true;
    }

    match (role, resource) {
        // Customers book and review; the catalog is readable.
        (Role::User, Booking) => matches!(action, Create | Read | Update | Delete | List),
        (Role::User, Feedback) => matches!(action, Create | Read | Update | Delete | List),
        (Role::User, Safari | Vehicle) => matches!(action, Read | List),

        // Guides manage safari listings and respond to assigned feedback.
        (Role::Guide, Safari) => matches!(action, Create | Read | Update | Delete | List),
        (Role::Guide, Feedback) => matches!(action, Read | List | Respond),
        (Role::Guide, Vehicle) => matches!(action, Read | List),

        // Vehicle owners manage fleets.
        (Role::VehicleOwner, Vehicle) => matches!(action, Create | Read | Update | Delete | List),
        (Role::VehicleOwner, Safari) => matches!(action, Read | List),

        // Every authenticated principal manages its own profile and
        // notification feed; instance access still goes through the
        // ownership guard.
        (_, Profile) => matches!(action, Read | Update | Delete),
        (_, Notification) => matches!(action, Read | Update | List),

        // User administration, listing approval, and anything not named
        // above: deny.
        _ => false,
    }
}
