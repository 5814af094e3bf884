use parking_lot::Mutex;
use tracing::info;

use super::model::{seed_pets, NewPet, Pet, PetId};

/// The in-memory, insertion-ordered pet collection.
///
/// One instance is built at startup and shared with the handlers through an
/// `Arc`. Handlers run on several coroutine worker threads, so every access
/// goes through the mutex; `create` reads the size and appends inside a single
/// critical section.
#[derive(Debug)]
pub struct PetRegistry {
    pets: Mutex<Vec<Pet>>,
}

impl Default for PetRegistry {
    fn default() -> Self {
        Self::seeded()
    }
}

impl PetRegistry {
    /// Registry holding the two seed records.
    #[must_use]
    pub fn seeded() -> Self {
        Self::with_pets(seed_pets())
    }

    #[must_use]
    pub fn with_pets(pets: Vec<Pet>) -> Self {
        Self {
            pets: Mutex::new(pets),
        }
    }

    /// Snapshot of every record in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<Pet> {
        self.pets.lock().clone()
    }

    /// First record, in collection order, whose id equals `id`.
    #[must_use]
    pub fn find(&self, id: PetId) -> Option<Pet> {
        self.pets.lock().iter().find(|p| p.id == id).cloned()
    }

    /// Append a new record with `id = len + 1`.
    ///
    /// The id is derived from the current size, not from the largest id in
    /// use. Collisions are impossible only while records are never removed.
    pub fn create(&self, new_pet: NewPet) -> Pet {
        let mut pets = self.pets.lock();
        let pet = Pet {
            id: pets.len() as PetId + 1,
            name: new_pet.name,
            kind: new_pet.kind,
        };
        pets.push(pet.clone());
        info!(
            pet_id = pet.id,
            pet_name = %pet.name,
            pet_type = %pet.kind,
            total_pets = pets.len(),
            "Pet created"
        );
        pet
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pets.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pets.lock().is_empty()
    }
}
