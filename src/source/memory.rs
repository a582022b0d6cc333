//! In-memory data source with a seeded, deterministic dataset.
//!
//! Stands in for a backend API: rows live in memory, fetches sort and
//! slice on demand, and an optional artificial latency makes the
//! incremental-fetch behavior observable in the TUI.

use crate::model::{Applicant, ColumnId, FetchError, Page, RowId, SortDirection, SortSpec, Status};
use crate::source::DataSource;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;
use std::time::Duration;

const FIRST_NAMES: &[&str] = &[
    "Ama", "Kofi", "Esi", "Kwame", "Akosua", "Yaw", "Abena", "Kojo", "Efua", "Kwesi", "Adwoa",
    "Fiifi", "Araba", "Ekow", "Maame", "Paa",
];

const LAST_NAMES: &[&str] = &[
    "Mensah", "Owusu", "Boateng", "Asante", "Osei", "Agyeman", "Appiah", "Darko", "Acheampong",
    "Frimpong", "Amoah", "Addo",
];

const CITIES: &[&str] = &[
    "Accra",
    "Kumasi",
    "Tamale",
    "Takoradi",
    "Cape Coast",
    "Ho",
    "Bolgatanga",
    "Wa",
    "Koforidua",
    "Sunyani",
];

const STATUSES: &[Status] = &[Status::Pending, Status::Accepted, Status::Rejected];

/// In-memory backend holding a generated applicant dataset.
///
/// Constructed explicitly per run or per test; two sources built with the
/// same `(count, seed)` hold identical rows.
pub struct MemorySource {
    rows: Vec<Applicant>,
    latency: Option<Duration>,
}

impl MemorySource {
    /// Generate `count` applicants from the given RNG seed.
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let base = NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date");
        let rows = (0..count)
            .map(|index| {
                let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
                let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
                let days_ago: i64 = rng.gen_range(0..1095);
                Applicant {
                    id: RowId::new(index as u64 + 1),
                    name: format!("{first} {last}"),
                    age: rng.gen_range(18..=58),
                    visits: rng.gen_range(0..1000),
                    city: CITIES[rng.gen_range(0..CITIES.len())].to_string(),
                    email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
                    status: STATUSES[rng.gen_range(0..STATUSES.len())],
                    applied_at: base - chrono::Duration::days(days_ago),
                }
            })
            .collect();
        Self { rows, latency: None }
    }

    /// Add a fixed artificial latency to every fetch.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = if latency.is_zero() {
            None
        } else {
            Some(latency)
        };
        self
    }

    /// Number of rows in the backing dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn compare(column: &ColumnId, a: &Applicant, b: &Applicant) -> Ordering {
        match column.as_str() {
            "name" => a.name.cmp(&b.name),
            "age" => a.age.cmp(&b.age),
            "visits" => a.visits.cmp(&b.visits),
            "city" => a.city.cmp(&b.city),
            "email" => a.email.cmp(&b.email),
            "status" => a.status.cmp(&b.status),
            "applied_at" => a.applied_at.cmp(&b.applied_at),
            // Unknown sort keys leave dataset order untouched.
            _ => Ordering::Equal,
        }
    }
}

impl DataSource for MemorySource {
    fn fetch_page(
        &mut self,
        offset: usize,
        page_size: usize,
        sort: Option<&SortSpec>,
    ) -> Result<Page, FetchError> {
        if let Some(latency) = self.latency {
            std::thread::sleep(latency);
        }

        let total = self.rows.len();
        if offset >= total && total != 0 {
            return Err(FetchError::OutOfRange { offset, total });
        }

        let mut ordered = self.rows.clone();
        if let Some(spec) = sort {
            ordered.sort_by(|a, b| Self::compare(&spec.column, a, b));
            if spec.direction == SortDirection::Descending {
                ordered.reverse();
            }
        }

        let end = (offset + page_size).min(total);
        Ok(Page {
            rows: ordered[offset.min(total)..end].to_vec(),
            total_row_count: total,
        })
    }
}
