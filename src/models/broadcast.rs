//! Broadcast models: contact lists, requests and reports.

use super::call::CallResult;
use crate::domain::{MessageUrl, PhoneNumber};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Ordered destinations for one broadcast. Row order is dispatch order and
/// duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContactList(Vec<PhoneNumber>);

impl ContactList {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, contact: PhoneNumber) {
        self.0.push(contact);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PhoneNumber> {
        self.0.iter()
    }

    /// The numbers as plain strings, in order.
    pub fn as_strings(&self) -> Vec<&str> {
        self.0.iter().map(PhoneNumber::as_str).collect()
    }
}

impl<'a> IntoIterator for &'a ContactList {
    type Item = &'a PhoneNumber;
    type IntoIter = std::slice::Iter<'a, PhoneNumber>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<PhoneNumber> for ContactList {
    fn from_iter<I: IntoIterator<Item = PhoneNumber>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Everything one broadcast run consumes.
#[derive(Debug, Clone)]
pub struct BroadcastRequest {
    /// Caller-ID number provisioned with the provider
    pub from: PhoneNumber,

    /// Message reference played when each call connects
    pub message_url: MessageUrl,

    /// Destinations, in dispatch order
    pub contacts: ContactList,
}

/// Results of one broadcast run, one entry per contact in input order.
#[derive(Debug, Clone, Serialize)]
pub struct BroadcastReport {
    pub from: PhoneNumber,
    pub message_url: MessageUrl,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub placed: usize,
    pub failed: usize,
    pub results: Vec<CallResult>,
}

impl BroadcastReport {
    /// Build a report, deriving the placed/failed counts from the results.
    pub fn new(
        request: &BroadcastRequest,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        results: Vec<CallResult>,
    ) -> Self {
        let placed = results.iter().filter(|r| r.is_placed()).count();
        let failed = results.len() - placed;

        Self {
            from: request.from.clone(),
            message_url: request.message_url.clone(),
            started_at,
            finished_at,
            placed,
            failed,
            results,
        }
    }

    /// Number of contacts attempted.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn placed_count(&self) -> usize {
        self.placed
    }

    pub fn failed_count(&self) -> usize {
        self.failed
    }

    /// Plain-text summary returned by the upload form endpoint.
    pub fn summary(&self) -> String {
        format!("Broadcast sent successfully to {} contacts.", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::call::Call;

    fn phone(s: &str) -> PhoneNumber {
        PhoneNumber::new(s).unwrap()
    }

    fn request(contacts: &[&str]) -> BroadcastRequest {
        BroadcastRequest {
            from: phone("+15550000000"),
            message_url: MessageUrl::parse("https://example.com/twiml.xml").unwrap(),
            contacts: contacts.iter().map(|c| phone(c)).collect(),
        }
    }

    #[test]
    fn test_contact_list_keeps_order_and_duplicates() {
        let list: ContactList = ["+1", "+2", "+1"].iter().map(|c| phone(c)).collect();
        assert_eq!(list.len(), 3);
        assert_eq!(list.as_strings(), vec!["+1", "+2", "+1"]);
        assert!(ContactList::empty().is_empty());
    }

    #[test]
    fn test_report_counts() {
        let req = request(&["+15551111111", "+15552222222", "+15553333333"]);
        let call = Call {
            sid: "CA1".to_string(),
            status: "queued".to_string(),
            ..Default::default()
        };
        let results = vec![
            CallResult::placed(&phone("+15551111111"), &call),
            CallResult::failed(&phone("+15552222222"), "Rate limit exceeded"),
            CallResult::placed(&phone("+15553333333"), &call),
        ];

        let now = Utc::now();
        let report = BroadcastReport::new(&req, now, now, results);

        assert_eq!(report.len(), 3);
        assert_eq!(report.placed_count(), 2);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.summary(), "Broadcast sent successfully to 3 contacts.");
    }

    #[test]
    fn test_report_serialization_shape() {
        let req = request(&[]);
        let now = Utc::now();
        let report = BroadcastReport::new(&req, now, now, Vec::new());

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["from"], "+15550000000");
        assert_eq!(value["message_url"], "https://example.com/twiml.xml");
        assert_eq!(value["placed"], 0);
        assert!(value["results"].as_array().unwrap().is_empty());
    }
}
