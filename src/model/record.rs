//! Locally saved inquiries
//!
//! When a configured endpoint rejects a submission, the payload is kept on
//! disk so nothing the visitor typed is lost.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::PathBuf;

/// One inquiry that could not be delivered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InquiryRecord {
    pub timestamp: DateTime<Local>,
    pub fields: BTreeMap<String, String>,
}

impl InquiryRecord {
    pub fn new(fields: BTreeMap<String, String>) -> Self {
        Self {
            timestamp: Local::now(),
            fields,
        }
    }
}

/// Wrapper for persisting saved inquiries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InquiryLog {
    pub entries: Vec<InquiryRecord>,
}

impl InquiryLog {
    fn log_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".folio-tui"))
    }

    fn log_path() -> Option<PathBuf> {
        Self::log_dir().map(|dir| dir.join("inquiries.json"))
    }

    pub fn load() -> Vec<InquiryRecord> {
        let log_path = match Self::log_path() {
            Some(p) => p,
            None => return Vec::new(),
        };

        if !log_path.exists() {
            return Vec::new();
        }

        let contents = match fs::read_to_string(&log_path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_str::<InquiryLog>(&contents) {
            Ok(log) => log.entries,
            Err(_) => Vec::new(),
        }
    }

    pub fn save(entries: &[InquiryRecord]) -> Result<(), String> {
        let log_dir = Self::log_dir().ok_or("Could not determine home directory")?;

        if !log_dir.exists() {
            fs::create_dir_all(&log_dir)
                .map_err(|e| format!("Failed to create data directory: {}", e))?;
        }

        let log_path = Self::log_path().ok_or("Could not determine inquiry log path")?;

        let log = InquiryLog {
            entries: entries.to_vec(),
        };

        let json = serde_json::to_string_pretty(&log)
            .map_err(|e| format!("Failed to serialize inquiries: {}", e))?;

        fs::write(&log_path, json).map_err(|e| format!("Failed to write inquiry log: {}", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_round_trips() {
        let mut fields = BTreeMap::new();
        fields.insert("full_name".to_string(), "Jo".to_string());
        fields.insert("services".to_string(), "Web application".to_string());

        let record = InquiryRecord::new(fields);
        let json = serde_json::to_string(&record).unwrap();
        let back: InquiryRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.fields.get("full_name").map(String::as_str), Some("Jo"));
    }
}
