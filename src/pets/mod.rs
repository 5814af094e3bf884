//! # Pets
//!
//! The domain: the [`Pet`] record, the [`PetRegistry`] that owns the
//! collection, input parsing rules, and the handlers wired into the
//! dispatcher.

pub mod handlers;
pub mod input;
mod model;
mod registry;

pub use handlers::{add_pet, get_pet, list_pets, pet_handlers, register_all, PetHandler};
pub use model::{seed_pets, NewPet, Pet, PetId};
pub use registry::PetRegistry;
