//! Scene personnel: typed person identifiers and resource sets.
//!
//! Actor and crew assignments arrive from clients as loosely-typed JSON
//! lists. They are parsed once at the HTTP boundary by [`parse_person_ids`]
//! and flow through the rest of the system as [`PersonId`] values, so the
//! conflict detector never sees a malformed identifier.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum number of people that can be assigned to one scene per role.
pub const MAX_ASSIGNED_PERSONNEL: usize = 500;

// ---------------------------------------------------------------------------
// Person identifier
// ---------------------------------------------------------------------------

/// A company-scoped user assigned to a scene as cast or crew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub DbId);

impl PersonId {
    pub fn get(self) -> DbId {
        self.0
    }
}

impl From<DbId> for PersonId {
    fn from(id: DbId) -> Self {
        Self(id)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Resource set
// ---------------------------------------------------------------------------

/// The de-duplicated union of a scene's actors and crew.
///
/// Backed by a `BTreeSet` so iteration (and therefore any list built from
/// it) is always in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceSet(BTreeSet<PersonId>);

impl ResourceSet {
    /// Build a resource set from a scene's actor and crew lists.
    pub fn from_assignments(actors: &[PersonId], crew: &[PersonId]) -> Self {
        actors.iter().chain(crew.iter()).copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, person: PersonId) -> bool {
        self.0.contains(&person)
    }

    pub fn iter(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.0.iter().copied()
    }

    /// Consume the set into an ascending list of ids.
    pub fn into_vec(self) -> Vec<PersonId> {
        self.0.into_iter().collect()
    }
}

impl FromIterator<PersonId> for ResourceSet {
    fn from_iter<I: IntoIterator<Item = PersonId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// People needed by both scenes: `(actors_a ∪ crew_a) ∩ (actors_b ∪ crew_b)`.
///
/// Empty when either side has nobody assigned.
pub fn shared_resources(a: &ResourceSet, b: &ResourceSet) -> ResourceSet {
    if a.is_empty() || b.is_empty() {
        return ResourceSet::default();
    }
    a.0.intersection(&b.0).copied().collect()
}

// ---------------------------------------------------------------------------
// Boundary parsing
// ---------------------------------------------------------------------------

/// Remove duplicate ids, keeping the first occurrence of each.
pub fn dedupe_person_ids(ids: &[PersonId]) -> Vec<PersonId> {
    let mut seen = BTreeSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Parse a loosely-typed assignment list into typed person ids.
///
/// Accepts `null` (no one assigned) or an array whose elements are positive
/// integers or strings holding a positive integer (`[4, "7", " 9 "]`).
/// Duplicates are dropped. `field` names the input in error messages.
pub fn parse_person_ids(field: &str, value: &Value) -> Result<Vec<PersonId>, CoreError> {
    let items = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        other => {
            return Err(CoreError::Validation(format!(
                "{field} must be a list of person ids, got {other}"
            )))
        }
    };

    if items.len() > MAX_ASSIGNED_PERSONNEL {
        return Err(CoreError::Validation(format!(
            "{field} may contain at most {MAX_ASSIGNED_PERSONNEL} people, got {}",
            items.len()
        )));
    }

    let mut ids = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let parsed = match item {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<DbId>().ok(),
            _ => None,
        };
        match parsed {
            Some(id) if id > 0 => ids.push(PersonId(id)),
            _ => {
                return Err(CoreError::Validation(format!(
                    "{field}[{index}] must be a positive person id, got {item}"
                )))
            }
        }
    }

    Ok(dedupe_person_ids(&ids))
}
