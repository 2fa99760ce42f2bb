//! Identifier generation port

use uuid::Uuid;

pub trait IdGenerator: Send + Sync {
    /// Produce an identifier that is empirically unique for the lifetime of
    /// the data set.
    fn new_id(&self) -> String;
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn new_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
