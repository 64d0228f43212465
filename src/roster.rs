use crate::data::student::StudentRecord;
use uuid::Uuid;

/// The client-side view of the student table, seeded from one initial fetch
/// and mutated in place after each successful gateway call. Kept in
/// `created_at`-descending order by prepending new records; nothing is
/// re-sorted or re-fetched.
#[derive(Debug, Default)]
pub struct Roster {
    records: Vec<StudentRecord>,
}

impl Roster {
    #[must_use]
    pub const fn new(records: Vec<StudentRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&StudentRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Prepends a freshly inserted record. Trusts the gateway's generated id
    /// to be new, so no dedup check.
    pub fn insert_at_front(&mut self, record: StudentRecord) {
        self.records.insert(0, record);
    }

    /// Replaces the record with the same id in place. Returns false (and
    /// changes nothing) if no record has that id.
    pub fn replace(&mut self, id: Uuid, record: StudentRecord) -> bool {
        match self.records.iter_mut().find(|existing| existing.id == id) {
            Some(existing) => {
                *existing = record;
                true
            }
            None => false,
        }
    }

    /// Removes the record with the given id. Idempotent: returns false if the
    /// id is already absent.
    pub fn remove_by_id(&mut self, id: Uuid) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        self.records.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::student::StudentStatus;
    use chrono::{NaiveDate, Utc};

    fn record(first_name: &str) -> StudentRecord {
        StudentRecord {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            first_name: first_name.to_owned(),
            last_name: "Lovelace".to_owned(),
            email: format!("{}@example.com", first_name.to_lowercase()),
            phone: None,
            date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            enrollment_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            grade_level: "Freshman".to_owned(),
            major: None,
            gpa: None,
            address: None,
            city: None,
            state: None,
            zip_code: None,
            emergency_contact_name: None,
            emergency_contact_phone: None,
            status: StudentStatus::Active,
        }
    }

    #[test]
    fn insert_at_front_prepends() {
        let mut roster = Roster::new(vec![record("Ada")]);
        let grace = record("Grace");
        let grace_id = grace.id;

        roster.insert_at_front(grace);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.records()[0].id, grace_id);
    }

    #[test]
    fn replace_updates_in_place_and_keeps_order() {
        let ada = record("Ada");
        let grace = record("Grace");
        let ada_id = ada.id;
        let mut roster = Roster::new(vec![grace.clone(), ada.clone()]);

        let mut updated = ada;
        updated.first_name = "Augusta".to_owned();
        assert!(roster.replace(ada_id, updated));

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.records()[0].id, grace.id);
        assert_eq!(roster.records()[0].first_name, "Grace");
        assert_eq!(roster.records()[1].first_name, "Augusta");
    }

    #[test]
    fn replace_missing_id_is_a_deterministic_noop() {
        let ada = record("Ada");
        let mut roster = Roster::new(vec![ada.clone()]);

        assert!(!roster.replace(Uuid::new_v4(), record("Grace")));
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.records()[0].first_name, "Ada");
    }

    #[test]
    fn remove_by_id_is_idempotent() {
        let ada = record("Ada");
        let ada_id = ada.id;
        let mut roster = Roster::new(vec![ada, record("Grace")]);

        assert!(roster.remove_by_id(ada_id));
        assert_eq!(roster.len(), 1);

        assert!(!roster.remove_by_id(ada_id));
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.records()[0].first_name, "Grace");
    }
}
