//! Explicit state holder for one running app: catalog, team, and the transient slots
//! (picker selection, highlighted overlay, notification).

use shared::{
    domain::{CatalogOption, Character, TEAM_CAPACITY},
    error::RosterError,
};
use storage::KeyValueStore;
use tracing::debug;

use crate::roster::RosterStore;

/// Monotonic id attached to each detail request so late responses can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestGeneration(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay<'a> {
    Hidden,
    Shown(&'a Character),
}

pub struct TeamSession<S: KeyValueStore> {
    catalog: Vec<Character>,
    roster: RosterStore<S>,
    selected: Option<Character>,
    highlighted: Option<Character>,
    notification: Option<String>,
    latest_detail_request: RequestGeneration,
}

impl<S: KeyValueStore> TeamSession<S> {
    pub fn new(roster: RosterStore<S>) -> Self {
        Self {
            catalog: Vec::new(),
            roster,
            selected: None,
            highlighted: None,
            notification: None,
            latest_detail_request: RequestGeneration(0),
        }
    }

    pub fn catalog(&self) -> &[Character] {
        &self.catalog
    }

    pub fn replace_catalog(&mut self, characters: Vec<Character>) {
        debug!(characters = characters.len(), "session: catalog replaced");
        self.catalog = characters;
    }

    /// Picker entries whose label contains `filter`, ignoring case.
    pub fn catalog_options(&self, filter: &str) -> Vec<CatalogOption> {
        let needle = filter.trim().to_lowercase();
        self.catalog
            .iter()
            .filter(|c| needle.is_empty() || c.name.to_lowercase().contains(&needle))
            .map(Character::picker_option)
            .collect()
    }

    pub fn roster(&self) -> &RosterStore<S> {
        &self.roster
    }

    pub fn team(&self) -> &[Character] {
        self.roster.members()
    }

    pub fn empty_slots(&self) -> usize {
        TEAM_CAPACITY.saturating_sub(self.roster.len())
    }

    /// The picker accepts new selections only while the team has room.
    pub fn picker_enabled(&self) -> bool {
        !self.roster.is_full()
    }

    pub fn selected(&self) -> Option<&Character> {
        self.selected.as_ref()
    }

    pub fn highlighted(&self) -> Option<&Character> {
        self.highlighted.as_ref()
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    pub fn overlay(&self) -> Overlay<'_> {
        match &self.highlighted {
            Some(character) => Overlay::Shown(character),
            None => Overlay::Hidden,
        }
    }

    pub fn begin_detail_request(&mut self) -> RequestGeneration {
        self.latest_detail_request = RequestGeneration(self.latest_detail_request.0 + 1);
        self.latest_detail_request
    }

    pub fn is_latest_detail_request(&self, generation: RequestGeneration) -> bool {
        generation == self.latest_detail_request
    }

    /// Store a fetched record as the selection unless a newer request was issued since.
    pub fn apply_detail(&mut self, generation: RequestGeneration, character: Character) -> bool {
        if !self.is_latest_detail_request(generation) {
            debug!(
                stale = generation.0,
                latest = self.latest_detail_request.0,
                name = %character.name,
                "session: discarding stale detail response"
            );
            return false;
        }
        self.selected = Some(character);
        true
    }

    pub fn highlight(&mut self, character: Character) {
        self.highlighted = Some(character);
    }

    pub fn dismiss_overlay(&mut self) {
        self.highlighted = None;
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Move the selection onto the team. Returns `Ok(false)` when nothing is selected.
    ///
    /// A rejection keeps the selection and raises a notification.
    pub fn add_selected(&mut self) -> Result<bool, RosterError> {
        let Some(candidate) = self.selected.clone() else {
            return Ok(false);
        };

        match self.roster.add(candidate) {
            Ok(()) => {
                self.selected = None;
                self.notification = None;
                Ok(true)
            }
            Err(err) => {
                self.notification = Some(err.notification());
                Err(err)
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Result<usize, RosterError> {
        self.roster.remove(name).inspect_err(|err| {
            self.notification = Some(err.notification());
        })
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
