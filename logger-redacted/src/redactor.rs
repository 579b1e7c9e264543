use regex::Regex;
use lazy_static::lazy_static;
use sha2::{Sha256, Digest};
use base64::{Engine as _, engine::general_purpose};

use crate::config::LoggerConfig;

lazy_static! {
    static ref SA_ID_REGEX: Regex = Regex::new(r"\b\d{13}\b").unwrap();
    static ref PHONE_REGEX: Regex = Regex::new(r"(?:\+27[\s-]?|\b0)\d{2}[\s-]?\d{3}[\s-]?\d{4}\b").unwrap();
    static ref EMAIL_REGEX: Regex = Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap();
}

/// PII redaction configuration
#[derive(Debug, Clone)]
pub struct RedactionConfig {
    pub redact_sa_ids: bool,
    pub redact_phones: bool,
    pub redact_emails: bool,
    pub hash_for_correlation: bool,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            redact_sa_ids: true,
            redact_phones: true,
            redact_emails: true,
            hash_for_correlation: true,
        }
    }
}

impl From<&LoggerConfig> for RedactionConfig {
    fn from(config: &LoggerConfig) -> Self {
        let enabled = config.redaction_enabled;
        Self {
            redact_sa_ids: enabled,
            redact_phones: enabled,
            redact_emails: enabled,
            hash_for_correlation: true,
        }
    }
}

/// PII redactor for log messages
#[derive(Debug, Clone, Default)]
pub struct PiiRedactor {
    config: RedactionConfig,
}

impl PiiRedactor {
    pub fn new(config: RedactionConfig) -> Self {
        Self { config }
    }
    
    pub fn redact(&self, text: &str) -> String {
        let mut result = text.to_string();
        
        // ID numbers first so their digits are gone before the phone pattern runs
        if self.config.redact_sa_ids {
            result = self.redact_sa_ids(&result);
        }
        
        if self.config.redact_phones {
            result = self.redact_phones(&result);
        }
        
        if self.config.redact_emails {
            result = self.redact_emails(&result);
        }
        
        result
    }
    
    fn redact_sa_ids(&self, text: &str) -> String {
        SA_ID_REGEX.replace_all(text, |caps: &regex::Captures| {
            if self.config.hash_for_correlation {
                format!("ID[{}]", self.hash_value(&caps[0]))
            } else {
                format!("*********{}", last_four(&caps[0]))
            }
        }).to_string()
    }
    
    fn redact_phones(&self, text: &str) -> String {
        PHONE_REGEX.replace_all(text, |caps: &regex::Captures| {
            if self.config.hash_for_correlation {
                format!("PHONE[{}]", self.hash_value(&caps[0]))
            } else {
                "*** *** ****".to_string()
            }
        }).to_string()
    }
    
    fn redact_emails(&self, text: &str) -> String {
        EMAIL_REGEX.replace_all(text, |caps: &regex::Captures| {
            let email = &caps[0];
            if self.config.hash_for_correlation {
                format!("EMAIL[{}]", self.hash_value(email))
            } else {
                match email.split_once('@') {
                    Some((local, domain)) => format!(
                        "{}***@{}***",
                        local.chars().next().unwrap_or('*'),
                        domain.chars().next().unwrap_or('*'),
                    ),
                    None => "***@***".to_string(),
                }
            }
        }).to_string()
    }
    
    fn hash_value(&self, value: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(value.as_bytes());
        let result = hasher.finalize();
        general_purpose::STANDARD.encode(&result[..8]) // Use first 8 bytes for shorter hash
    }
}

/// Display form for a health id: only the last four characters survive.
pub fn mask_health_id(health_id: &str) -> String {
    format!("…{}", last_four(health_id))
}

fn last_four(value: &str) -> String {
    let skip = value.chars().count().saturating_sub(4);
    value.chars().skip(skip).collect()
}
