use shared::domain::{Character, CharacterId, Place};

pub(crate) fn sample_character(id: i64, name: &str) -> Character {
    Character {
        id: CharacterId(id),
        name: name.to_string(),
        species: "Human".to_string(),
        status: "Alive".to_string(),
        gender: "Male".to_string(),
        image: format!("https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"),
        origin: Place {
            name: "Earth (C-137)".to_string(),
            url: String::new(),
        },
        location: None,
        url: format!("https://rickandmortyapi.com/api/character/{id}"),
        episode: Vec::new(),
    }
}
