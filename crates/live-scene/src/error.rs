use live_core::{EntityId, LiveError};
use live_entity::EntityError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene configuration error: {0}")]
    Config(String),

    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    #[error("entity {entity}: {source}")]
    Entity {
        entity: EntityId,
        source: EntityError,
    },

    #[error(transparent)]
    Core(#[from] LiveError),
}

impl SceneError {
    pub(crate) fn entity(entity: EntityId) -> impl FnOnce(EntityError) -> SceneError {
        move |source| SceneError::Entity { entity, source }
    }
}

pub type SceneResult<T> = Result<T, SceneError>;
