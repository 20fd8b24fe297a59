// Copyright 2025 Cowboy AI, LLC.

//! Entity types with identity

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::time::SystemTime;
use uuid::Uuid;

/// A generic entity with a typed ID
///
/// Entities are domain objects with identity that persists across time.
///
/// # Examples
///
/// ```rust
/// use cim_odometer::{Entity, EntityId, VehicleMarker};
///
/// let vehicle = Entity::<VehicleMarker>::new();
/// assert!(!vehicle.id.as_uuid().is_nil());
///
/// let id = EntityId::<VehicleMarker>::new();
/// let vehicle = Entity::with_id(id);
/// assert_eq!(vehicle.id, id);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity<T> {
    /// The unique identifier for this entity
    pub id: EntityId<T>,
    /// When this entity was created
    pub created_at: SystemTime,
}

impl<T> Entity<T> {
    /// Create a new entity with a generated ID
    pub fn new() -> Self {
        Self::with_id(EntityId::new())
    }

    /// Create an entity with a specific ID
    pub fn with_id(id: EntityId<T>) -> Self {
        Self {
            id,
            created_at: SystemTime::now(),
        }
    }
}

impl<T> Default for Entity<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A typed entity ID using phantom types for type safety
///
/// The phantom type parameter keeps IDs for different entity types from
/// being mixed up at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId<T> {
    id: Uuid,
    #[serde(skip)]
    _phantom: PhantomData<T>,
}

impl<T> EntityId<T> {
    /// Create a new random entity ID
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Create an entity ID from a UUID
    pub fn from_uuid(id: Uuid) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.id
    }
}

impl<T> fmt::Display for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<T> Default for EntityId<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<EntityId<T>> for Uuid {
    fn from(id: EntityId<T>) -> Self {
        id.id
    }
}

// Schema is the bare UUID; the marker only exists at compile time.
impl<T> JsonSchema for EntityId<T> {
    fn schema_name() -> String {
        "EntityId".to_string()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        Uuid::json_schema(gen)
    }
}

/// Marker for vehicle entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleMarker;
