//! Serializer Adapters
//!
//! Implementations of the `StateSerializer` trait.

mod bincode;

pub use self::bincode::BincodeStateSerializer;
