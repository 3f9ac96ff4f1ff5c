//! Contact loading from CSV.
//!
//! The first column of every non-blank row is a destination. There is no header
//! row. Blank rows and rows with an empty first field are skipped.

use crate::domain::NormalizationPolicy;
use crate::error::ContactLoadError;
use crate::models::ContactList;
use std::io::Read;
use tracing::{debug, error, info, warn};

/// Reads contact lists and applies the configured normalization policy.
#[derive(Debug, Clone, Default)]
pub struct ContactLoader {
    policy: NormalizationPolicy,
}

impl ContactLoader {
    pub fn new(policy: NormalizationPolicy) -> Self {
        Self { policy }
    }

    /// Load contacts from an in-memory CSV upload.
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<ContactList, ContactLoadError> {
        self.load(bytes)
    }

    /// Load contacts from a CSV stream, preserving row order.
    ///
    /// An empty stream yields an empty list. Unreadable or malformed input is an
    /// error rather than a partial or empty list.
    pub fn load<R: Read>(&self, reader: R) -> Result<ContactList, ContactLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut contacts = ContactList::empty();

        for record in csv_reader.records() {
            let record = record.map_err(|e| {
                let err = Self::map_csv_error(e);
                error!(error = %err, loaded = contacts.len(), "Error loading contacts");
                err
            })?;

            let Some(candidate) = record.get(0) else {
                continue;
            };

            if candidate.trim().is_empty() {
                continue;
            }

            // Non-empty candidates always normalize successfully
            let Ok(phone) = self.policy.apply(candidate) else {
                continue;
            };

            if !phone.looks_dialable() {
                warn!(
                    contact = %phone,
                    line = record.position().map(|p| p.line()).unwrap_or(0),
                    "Contact does not look like a phone number; the provider will decide"
                );
            }

            debug!(contact = %phone, "Loaded contact");
            contacts.push(phone);
        }

        info!(count = contacts.len(), "Successfully loaded contacts");
        Ok(contacts)
    }

    fn map_csv_error(error: csv::Error) -> ContactLoadError {
        let line = error.position().map(|p| p.line()).unwrap_or(0);
        let message = error.to_string();

        match error.into_kind() {
            csv::ErrorKind::Io(io) => ContactLoadError::Io(io),
            _ => ContactLoadError::Malformed { line, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn load(input: &str) -> Vec<String> {
        ContactLoader::default()
            .load_bytes(input.as_bytes())
            .unwrap()
            .as_strings()
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_blank_row_skipped_and_domestic_number_prefixed() {
        assert_eq!(
            load("+15551234567\n5559876543\n\n"),
            vec!["+15551234567", "+15559876543"]
        );
    }

    #[test]
    fn test_first_column_only() {
        assert_eq!(
            load("5551111111,Alice,VIP\n+447700900123,Bob\n"),
            vec!["+15551111111", "+447700900123"]
        );
    }

    #[test]
    fn test_rows_with_empty_first_field_skipped() {
        assert_eq!(
            load(",Alice\n   ,Bob\n5552222222\n"),
            vec!["+15552222222"]
        );
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        assert_eq!(
            load("5553333333\n5551111111\n5553333333\r\n"),
            vec!["+15553333333", "+15551111111", "+15553333333"]
        );
    }

    #[test]
    fn test_non_dialable_entries_are_kept() {
        assert_eq!(load("not-a-number\n"), vec!["+1not-a-number"]);
    }

    #[test]
    fn test_disabled_policy_passes_raw_values() {
        let loader = ContactLoader::new(NormalizationPolicy::Disabled);
        let contacts = loader.load_bytes(b"5559876543\n +15551234567\n").unwrap();
        assert_eq!(contacts.as_strings(), vec!["5559876543", " +15551234567"]);
    }

    #[test]
    fn test_empty_input_is_empty_list() {
        let contacts = ContactLoader::default().load_bytes(b"").unwrap();
        assert!(contacts.is_empty());

        let contacts = ContactLoader::default().load_bytes(b"\n\n\n").unwrap();
        assert!(contacts.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let result = ContactLoader::default().load_bytes(b"5551111111\n\xff\xfe\n");
        assert!(matches!(result, Err(ContactLoadError::Malformed { .. })));
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "upload interrupted"))
        }
    }

    #[test]
    fn test_unreadable_stream_is_io_error() {
        let result = ContactLoader::default().load(FailingReader);
        assert!(matches!(result, Err(ContactLoadError::Io(_))));
    }
}
