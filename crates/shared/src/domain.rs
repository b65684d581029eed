use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);
    };
}

id_newtype!(CharacterId);

/// Maximum number of characters a team can hold.
pub const TEAM_CAPACITY: usize = 6;

/// A named place reference (`origin`, `location`) as served by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
}

/// One catalog member. Values are cloned into every slot that holds them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub species: String,
    pub status: String,
    pub gender: String,
    pub image: String,
    pub origin: Place,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Place>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub episode: Vec<String>,
}

impl Character {
    pub fn picker_option(&self) -> CatalogOption {
        CatalogOption {
            label: self.name.clone(),
            value: self.url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
}

/// One page of the paginated catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub info: PageInfo,
    pub results: Vec<Character>,
}

/// A picker entry: labeled by name, valued by the record's lookup URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOption {
    pub label: String,
    pub value: String,
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
