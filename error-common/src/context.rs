use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Error context information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorContext {
    pub encounter_id: Option<Uuid>,
    pub field: Option<String>,
    pub additional: HashMap<String, String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }
    
    pub fn with_encounter(mut self, encounter_id: Uuid) -> Self {
        self.encounter_id = Some(encounter_id);
        self
    }
    
    pub fn with_field<S: Into<String>>(mut self, field: S) -> Self {
        self.field = Some(field.into());
        self
    }
    
    pub fn add_context<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.additional.insert(key.into(), value.into());
        self
    }
}
