use serde::Deserialize;

/// An elected council member. Read-only here; speeches reference it by id.
#[derive(Debug, Clone, Deserialize)]
pub struct Councillor {
    pub id: String,
    pub name: String,
}
