use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier assigned by the registry. Always positive.
pub type PetId = u64;

/// A single pet record.
///
/// Serialized as `{"id": .., "name": .., "type": ..}`; `type` is a keyword in
/// Rust so the field is called `kind` here. `name` and `type` hold whatever
/// truthy JSON value the client sent and are echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    pub name: Value,
    #[serde(rename = "type")]
    pub kind: Value,
}

/// Checked input for the create operation. The id is assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPet {
    pub name: Value,
    pub kind: Value,
}

impl NewPet {
    #[must_use]
    pub fn new(name: impl Into<Value>, kind: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}

/// Records every registry starts with.
#[must_use]
pub fn seed_pets() -> Vec<Pet> {
    vec![
        Pet {
            id: 1,
            name: Value::from("Fluffy"),
            kind: Value::from("Cat"),
        },
        Pet {
            id: 2,
            name: Value::from("Rex"),
            kind: Value::from("Dog"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_kind_as_type() {
        let pet = Pet {
            id: 1,
            name: "Fluffy".into(),
            kind: "Cat".into(),
        };
        assert_eq!(
            serde_json::to_value(&pet).unwrap(),
            json!({ "id": 1, "name": "Fluffy", "type": "Cat" })
        );
    }

    #[test]
    fn seeds_are_fluffy_then_rex() {
        let seeds = seed_pets();
        assert_eq!(seeds.len(), 2);
        assert_eq!((seeds[0].id, seeds[0].name.as_str()), (1, Some("Fluffy")));
        assert_eq!((seeds[1].id, seeds[1].kind.as_str()), (2, Some("Dog")));
    }

    #[test]
    fn non_string_fields_serialize_as_given() {
        let pet = Pet {
            id: 3,
            name: json!(5),
            kind: json!(true),
        };
        assert_eq!(
            serde_json::to_value(&pet).unwrap(),
            json!({ "id": 3, "name": 5, "type": true })
        );
    }
}
