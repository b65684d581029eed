//! The persisted team: at most six characters, unique by name, written through on every change.

use shared::{
    domain::{Character, TEAM_CAPACITY},
    error::{ErrorCode, RosterError},
};
use storage::KeyValueStore;
use tracing::{error, info, warn};

pub const TEAM_STORAGE_KEY: &str = "team";

pub struct RosterStore<S: KeyValueStore> {
    members: Vec<Character>,
    store: S,
}

impl<S: KeyValueStore> RosterStore<S> {
    /// Restore the team from `store`. Absent or unreadable state yields an empty team.
    ///
    /// A persisted team that had to be deduplicated or truncated is written back
    /// once, so storage matches what is held in memory.
    pub fn open(store: S) -> Self {
        let (members, repaired) = match store.get(TEAM_STORAGE_KEY) {
            Ok(Some(raw)) => decode_members(&raw),
            Ok(None) => (Vec::new(), false),
            Err(err) => {
                warn!("roster: could not read persisted team, starting empty: {err:#}");
                (Vec::new(), false)
            }
        };

        let mut roster = Self {
            members: Vec::new(),
            store,
        };
        if repaired {
            if let Err(err) = roster.commit(members.clone()) {
                warn!("roster: repaired team not written back: {err}");
            }
        }
        roster.members = members;
        info!(members = roster.members.len(), "roster: opened");
        roster
    }

    pub fn members(&self) -> &[Character] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= TEAM_CAPACITY
    }

    pub fn free_slots(&self) -> usize {
        TEAM_CAPACITY.saturating_sub(self.members.len())
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.members.iter().any(|member| member.name == name)
    }

    /// Append `candidate`. Membership is keyed by `name`, not by id.
    pub fn add(&mut self, candidate: Character) -> Result<(), RosterError> {
        if self.contains_name(&candidate.name) {
            return Err(RosterError::AlreadyPresent {
                name: candidate.name,
            });
        }
        if self.is_full() {
            return Err(RosterError::Full {
                capacity: TEAM_CAPACITY,
            });
        }

        let name = candidate.name.clone();
        let mut next = self.members.clone();
        next.push(candidate);
        self.commit(next)?;
        info!(name = %name, members = self.members.len(), "roster: added");
        Ok(())
    }

    /// Drop every member called `name`; returns how many were removed.
    pub fn remove(&mut self, name: &str) -> Result<usize, RosterError> {
        let next: Vec<Character> = self
            .members
            .iter()
            .filter(|member| member.name != name)
            .cloned()
            .collect();
        let removed = self.members.len() - next.len();
        if removed == 0 {
            return Ok(0);
        }

        self.commit(next)?;
        info!(name, removed, members = self.members.len(), "roster: removed");
        Ok(removed)
    }

    pub fn clear(&mut self) -> Result<(), RosterError> {
        self.commit(Vec::new())?;
        info!("roster: cleared");
        Ok(())
    }

    // Storage is written before the in-memory team changes, so both stay in step on failure.
    fn commit(&mut self, next: Vec<Character>) -> Result<(), RosterError> {
        let serialized = serde_json::to_string(&next).map_err(|err| RosterError::Storage {
            message: err.to_string(),
        })?;
        if let Err(err) = self.store.set(TEAM_STORAGE_KEY, &serialized) {
            error!("roster: failed to persist team: {err:#}");
            return Err(RosterError::Storage {
                message: format!("{err:#}"),
            });
        }
        self.members = next;
        Ok(())
    }
}

/// Decoded members, and whether they differ from what was persisted.
fn decode_members(raw: &str) -> (Vec<Character>, bool) {
    if raw.trim().is_empty() {
        return (Vec::new(), false);
    }
    match serde_json::from_str::<Vec<Character>>(raw) {
        Ok(decoded) => {
            let total = decoded.len();
            let mut members: Vec<Character> = Vec::with_capacity(TEAM_CAPACITY);
            for candidate in decoded {
                if members.len() == TEAM_CAPACITY {
                    break;
                }
                if !members.iter().any(|member| member.name == candidate.name) {
                    members.push(candidate);
                }
            }
            let repaired = members.len() != total;
            if repaired {
                warn!(
                    code = ?ErrorCode::MalformedPersistedState,
                    kept = members.len(),
                    total,
                    "roster: dropped duplicate or overflow entries from persisted team"
                );
            }
            (members, repaired)
        }
        Err(err) => {
            warn!(
                code = ?ErrorCode::MalformedPersistedState,
                "roster: persisted team is malformed, starting empty: {err}"
            );
            (Vec::new(), false)
        }
    }
}

#[cfg(test)]
#[path = "tests/roster_tests.rs"]
mod tests;
