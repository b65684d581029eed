use client_core::{RosterStore, TeamSession};
use shared::domain::{Character, CharacterId, Place};
use storage::MemoryStore;

use crate::controller::reducer::AppModel;

pub(crate) fn sample_character(id: i64, name: &str) -> Character {
    Character {
        id: CharacterId(id),
        name: name.to_string(),
        species: "Human".to_string(),
        status: "Alive".to_string(),
        gender: "Female".to_string(),
        image: format!("https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"),
        origin: Place {
            name: "Earth (Replacement Dimension)".to_string(),
            url: String::new(),
        },
        location: None,
        url: format!("https://rickandmortyapi.com/api/character/{id}"),
        episode: Vec::new(),
    }
}

pub(crate) fn memory_model() -> AppModel<MemoryStore> {
    AppModel::new(TeamSession::new(RosterStore::open(MemoryStore::new())))
}
