//! Maps equivalent first-year course codes onto one canonical course
//!
//! Some first-year courses were renumbered over the years, so the same
//! material appears under several codes. Each group in the equivalence table
//! lists its canonical code first; every other code in the group is folded
//! onto it.

use std::collections::HashMap;

/// First-year equivalence groups, canonical code first
pub const FIRST_YEAR_COURSES: &[&[&str]] = &[
    &["CSC111", "CSC110"],
    &["CSC115", "CSC160"],
    &["ELEC199"],
    &["ENGL135", "ENGL115"],
    &["MATH100"],
    &["MATH101"],
    &["MATH110", "MATH133"],
    &["MECH141", "ENGR141"],
    &["PHYS122"],
    &["PHYS125"],
    &["CHEM150"],
    &["ENGR110"],
    &["ENGR120"],
];

/// Normalizes catalog course ids to canonical course ids
#[derive(Debug, Clone)]
pub struct CourseNormalizer {
    /// Canonical courses present in the catalog, in table order
    canonical: Vec<(i64, String)>,
    /// Catalog id => index into `canonical`
    by_cid: HashMap<i64, usize>,
}

impl CourseNormalizer {
    /// Build a normalizer from the course catalog
    ///
    /// # Arguments
    /// * `catalog` - `(cid, code)` pairs, where `code` is department and number
    ///   concatenated (e.g., `"CSC110"`)
    /// * `groups` - Equivalence groups, canonical code first
    ///
    /// A group whose canonical code is missing from the catalog maps nothing.
    #[must_use]
    pub fn new(catalog: &[(i64, String)], groups: &[&[&str]]) -> Self {
        let cid_of: HashMap<&str, i64> = catalog
            .iter()
            .map(|(cid, code)| (code.as_str(), *cid))
            .collect();

        let mut canonical = Vec::new();
        let mut by_cid = HashMap::new();

        for group in groups {
            let Some((&name, _)) = group.split_first() else {
                continue;
            };
            let Some(&canonical_cid) = cid_of.get(name) else {
                continue;
            };
            let index = canonical.len();
            canonical.push((canonical_cid, name.to_string()));

            for (cid, code) in catalog {
                if group.contains(&code.as_str()) {
                    by_cid.insert(*cid, index);
                }
            }
        }

        Self { canonical, by_cid }
    }

    /// Build a normalizer using [`FIRST_YEAR_COURSES`]
    #[must_use]
    pub fn first_year(catalog: &[(i64, String)]) -> Self {
        Self::new(catalog, FIRST_YEAR_COURSES)
    }

    /// Canonical id and code for a catalog id, or `None` if it is not tracked
    #[must_use]
    pub fn normalize(&self, cid: i64) -> Option<(i64, &str)> {
        self.by_cid.get(&cid).map(|&index| {
            let (canonical_cid, name) = &self.canonical[index];
            (*canonical_cid, name.as_str())
        })
    }

    /// Canonical id for a catalog id
    #[must_use]
    pub fn normalized_cid(&self, cid: i64) -> Option<i64> {
        self.normalize(cid).map(|(canonical_cid, _)| canonical_cid)
    }

    /// Every canonical course present in the catalog, in table order
    #[must_use]
    pub fn canonical_courses(&self) -> &[(i64, String)] {
        &self.canonical
    }
}
