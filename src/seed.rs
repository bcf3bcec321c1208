//! Seed rows and the column schema the table view binds to.

use chrono::NaiveDate;

use std::sync::atomic::{AtomicU32, Ordering};

use crate::collections::ObservableList;
use crate::models::{Person, PersonId};

static PERSON_SEQUENCE: AtomicU32 = AtomicU32::new(0);

const SEED_PEOPLE: [(&str, &str, (i32, u32, u32)); 3] = [
    ("Ashwin", "Sharan", (2012, 10, 11)),
    ("Advik", "Sharan", (2012, 10, 11)),
    ("Layne", "Estes", (2011, 12, 16)),
];

/// Mints the next process-wide id. The first id handed out is 1.
///
/// Returns `None` once `u32::MAX` has been handed out; the sequence never
/// wraps back to the unassigned value.
pub fn next_person_id() -> Option<PersonId> {
    mint(&PERSON_SEQUENCE)
}

fn mint(sequence: &AtomicU32) -> Option<PersonId> {
    sequence
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| last.checked_add(1))
        .ok()
        .map(|last| PersonId(last + 1))
}

/// Builds the seed population, each with a freshly minted id.
pub fn seed_people() -> Vec<Person> {
    SEED_PEOPLE
        .iter()
        .map(|&(first_name, last_name, (year, month, day))| {
            let mut person =
                Person::new(first_name, last_name, NaiveDate::from_ymd_opt(year, month, day));
            match next_person_id() {
                Some(id) => person.set_person_id(id),
                None => tracing::warn!(%person, "Person id sequence exhausted"),
            }
            person
        })
        .collect()
}

pub fn person_list() -> ObservableList<Person> {
    seed_people().into_iter().collect()
}

/// Read-only projections shown by the table. Edits go through the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    FirstName,
    LastName,
    BirthDate,
}

impl Column {
    pub fn title(self) -> &'static str {
        match self {
            Self::Id => "Id",
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::BirthDate => "Birth Date",
        }
    }

    /// Name of the `Person` attribute this column reads.
    pub fn property(self) -> &'static str {
        match self {
            Self::Id => "personId",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::BirthDate => "birthDate",
        }
    }

    pub fn cell(self, person: &Person) -> String {
        match self {
            Self::Id => person.person_id().to_string(),
            Self::FirstName => person.first_name().unwrap_or_default().to_string(),
            Self::LastName => person.last_name().unwrap_or_default().to_string(),
            Self::BirthDate => person
                .birth_date()
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

pub fn columns() -> [Column; 4] {
    [Column::Id, Column::FirstName, Column::LastName, Column::BirthDate]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::thread;

    use super::*;

    #[test]
    fn seed_list_has_three_distinct_ids() {
        let list = person_list();
        let ids: HashSet<_> = list.iter().map(Person::person_id).collect();

        assert_eq!(list.len(), 3);
        assert_eq!(ids.len(), 3);
        assert!(ids.iter().all(|id| id.is_assigned()));
    }

    #[test]
    fn successive_calls_mint_new_ids() {
        let first = person_list();
        let second = person_list();
        let ids: HashSet<_> = first
            .iter()
            .chain(second.iter())
            .map(Person::person_id)
            .collect();

        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn ids_increase_within_a_call() {
        let people = seed_people();
        assert!(people.windows(2).all(|pair| pair[0].person_id() < pair[1].person_id()));
    }

    #[test]
    fn concurrent_minting_never_repeats() {
        let ids: Vec<PersonId> = thread::scope(|scope| {
            let workers: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        (0..250)
                            .map(|_| next_person_id().expect("sequence not exhausted"))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            workers
                .into_iter()
                .flat_map(|worker| worker.join().expect("worker finished"))
                .collect()
        });

        let distinct: HashSet<_> = ids.iter().copied().collect();
        assert_eq!(distinct.len(), 8 * 250);
        assert!(!distinct.contains(&PersonId::UNASSIGNED));
    }

    #[test]
    fn sequence_stops_at_the_ceiling() {
        let sequence = AtomicU32::new(u32::MAX - 1);

        assert_eq!(mint(&sequence), Some(PersonId(u32::MAX)));
        assert_eq!(mint(&sequence), None);
        assert_eq!(sequence.load(Ordering::Relaxed), u32::MAX);
    }

    #[test]
    fn seed_records_are_valid() {
        for person in seed_people() {
            let mut errors = Vec::new();
            assert!(person.is_valid_person(&mut errors), "{person}: {errors:?}");
        }
    }

    #[test]
    fn columns_project_person_attributes() {
        let mut person = Person::new("Ada", "Lovelace", NaiveDate::from_ymd_opt(1815, 12, 10));
        person.set_person_id(PersonId(9));

        let cells: Vec<_> = columns().iter().map(|column| column.cell(&person)).collect();
        assert_eq!(cells, vec!["9", "Ada", "Lovelace", "1815-12-10"]);

        let properties: Vec<_> = columns().iter().map(|column| column.property()).collect();
        assert_eq!(properties, vec!["personId", "firstName", "lastName", "birthDate"]);
    }

    #[test]
    fn absent_attributes_render_empty() {
        assert_eq!(Column::BirthDate.cell(&Person::default()), "");
        assert_eq!(Column::FirstName.cell(&Person::default()), "");
    }
}
