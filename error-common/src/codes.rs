// Stable error codes surfaced to intake collaborators

pub mod validation {
    pub const OUT_OF_RANGE: &str = "VALIDATION_1001";
    pub const MISSING_REQUIRED_FIELD: &str = "VALIDATION_1002";
    pub const INVALID_IDENTIFIER: &str = "VALIDATION_1003";
}

pub mod discriminator {
    pub const INCOMPLETE_ANSWERS: &str = "DISCRIMINATOR_2001";
    pub const UNKNOWN_ID: &str = "DISCRIMINATOR_2002";
}

pub mod system {
    pub const CONFIGURATION: &str = "SYSTEM_9001";
    pub const INTERNAL: &str = "SYSTEM_9002";
}
