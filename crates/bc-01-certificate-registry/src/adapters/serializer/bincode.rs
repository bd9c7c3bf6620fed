use crate::domain::errors::RegistryError;
use crate::ports::outbound::StateSerializer;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Default row serializer using bincode.
#[derive(Debug, Default, Clone, Copy)]
pub struct BincodeStateSerializer;

impl StateSerializer for BincodeStateSerializer {
    fn serialize<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, RegistryError> {
        bincode::serialize(value).map_err(|e| RegistryError::Serialization {
            message: e.to_string(),
        })
    }

    fn deserialize<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, RegistryError> {
        bincode::deserialize(data).map_err(|e| RegistryError::Serialization {
            message: e.to_string(),
        })
    }
}
