//! Filter and search composition for listing pages.
//!
//! Every listing page holds the full record list in memory and narrows it
//! with a fixed sequence of predicates. Each active criterion narrows the
//! current working sequence; inactive criteria (blank input, the `All`
//! sentinel, unparseable numbers) are skipped. Input order is preserved and
//! nothing is re-sorted.

use std::collections::BTreeSet;

use crate::entities::{CourseInstitution, KosHomestay, Location, Searchable};

/// Sentinel option meaning "criterion inactive".
pub const ALL: &str = "All";

// ---------------------------------------------------------------------------
// Criterion primitives
// ---------------------------------------------------------------------------

/// A single-choice categorical selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Blank input and `All` both mean inactive.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == ALL {
            Self::All
        } else {
            Self::Only(raw.to_string())
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Only(_))
    }

    /// Exact string equality; always true when inactive.
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Only(value) => value,
        }
    }
}

/// Case-insensitive substring search over name, description, and address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm(Option<String>);

impl SearchTerm {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            Self(None)
        } else {
            Self(Some(raw.to_lowercase()))
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.0.is_some()
    }

    /// True when any searchable field contains the term.
    #[must_use]
    pub fn matches<T: Searchable>(&self, record: &T) -> bool {
        let Some(term) = &self.0 else {
            return true;
        };
        [record.name(), record.description(), record.address()]
            .iter()
            .any(|field| field.to_lowercase().contains(term.as_str()))
    }
}

/// One side of an inclusive price range.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceBound(Option<f64>);

impl PriceBound {
    /// Non-numeric or non-finite input disables the bound.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self(raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
    }

    #[must_use]
    pub const fn value(self) -> Option<f64> {
        self.0
    }

    #[must_use]
    pub const fn is_active(self) -> bool {
        self.0.is_some()
    }
}

impl From<f64> for PriceBound {
    fn from(value: f64) -> Self {
        Self(Some(value).filter(|v| v.is_finite()))
    }
}

/// Preset price band from the kos filter panel.
///
/// `<500000` is exclusive, `500000-1000000` inclusive on both ends,
/// `>1000000` exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum PriceBucket {
    #[default]
    Any,
    Below(f64),
    Between(f64, f64),
    Above(f64),
}

impl PriceBucket {
    /// Unrecognised input parses to [`PriceBucket::Any`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let number = |s: &str| s.trim().parse::<f64>().ok().filter(|v| v.is_finite());

        if let Some(rest) = raw.strip_prefix('<') {
            return number(rest).map_or(Self::Any, Self::Below);
        }
        if let Some(rest) = raw.strip_prefix('>') {
            return number(rest).map_or(Self::Any, Self::Above);
        }
        match raw.split_once('-') {
            Some((low, high)) => match (number(low), number(high)) {
                (Some(low), Some(high)) if low <= high => Self::Between(low, high),
                _ => Self::Any,
            },
            None => Self::Any,
        }
    }

    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Any)
    }

    #[must_use]
    pub fn contains(self, price: f64) -> bool {
        match self {
            Self::Any => true,
            Self::Below(limit) => price < limit,
            Self::Between(low, high) => (low..=high).contains(&price),
            Self::Above(limit) => price > limit,
        }
    }
}

// ---------------------------------------------------------------------------
// Narrowing pipeline
// ---------------------------------------------------------------------------

/// Sequential predicate narrowing over borrowed records.
#[derive(Debug)]
pub struct Narrowing<'a, T> {
    items: Vec<&'a T>,
}

impl<'a, T> Narrowing<'a, T> {
    #[must_use]
    pub fn new(items: &'a [T]) -> Self {
        Self {
            items: items.iter().collect(),
        }
    }

    /// Keep only records matching `keep`, but only when `active`.
    #[must_use]
    pub fn narrow_if(mut self, active: bool, keep: impl Fn(&T) -> bool) -> Self {
        if active {
            self.items.retain(|item| keep(item));
        }
        self
    }

    #[must_use]
    pub fn finish(self) -> Vec<&'a T> {
        self.items
    }
}

/// Criteria applied by a listing page.
pub trait Criteria<T> {
    /// True when no criterion would narrow anything.
    fn is_inactive(&self) -> bool;

    /// Filtered subsequence of `items`, input order preserved.
    fn apply<'a>(&self, items: &'a [T]) -> Vec<&'a T>;
}

// ---------------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------------

/// Filter state of the courses page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseCriteria {
    pub search: SearchTerm,
    /// Matches when the course offers exactly this program.
    pub program: Selection,
    pub price_range: Selection,
    pub verified_only: bool,
}

impl Criteria<CourseInstitution> for CourseCriteria {
    fn is_inactive(&self) -> bool {
        !self.search.is_active()
            && !self.program.is_active()
            && !self.price_range.is_active()
            && !self.verified_only
    }

    fn apply<'a>(&self, items: &'a [CourseInstitution]) -> Vec<&'a CourseInstitution> {
        Narrowing::new(items)
            .narrow_if(self.search.is_active(), |c| self.search.matches(c))
            .narrow_if(self.program.is_active(), |c| {
                c.programs.iter().any(|p| self.program.matches(p))
            })
            .narrow_if(self.price_range.is_active(), |c| {
                self.price_range.matches(&c.price_range)
            })
            .narrow_if(self.verified_only, |c| c.is_verified)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Kos / homestay
// ---------------------------------------------------------------------------

/// Filter state of the kos/homestay page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KosCriteria {
    pub search: SearchTerm,
    /// `kos` or `homestay`.
    pub kind: Selection,
    /// Records without a gender preference drop out while this is active.
    pub gender: Selection,
    pub min_price: PriceBound,
    pub max_price: PriceBound,
    pub price_bucket: PriceBucket,
    /// Every listed facility must be present.
    pub facilities: Vec<String>,
    pub verified_only: bool,
}

impl Criteria<KosHomestay> for KosCriteria {
    fn is_inactive(&self) -> bool {
        !self.search.is_active()
            && !self.kind.is_active()
            && !self.gender.is_active()
            && !self.min_price.is_active()
            && !self.max_price.is_active()
            && !self.price_bucket.is_active()
            && self.facilities.is_empty()
            && !self.verified_only
    }

    fn apply<'a>(&self, items: &'a [KosHomestay]) -> Vec<&'a KosHomestay> {
        let min = self.min_price.value();
        let max = self.max_price.value();

        Narrowing::new(items)
            .narrow_if(self.search.is_active(), |k| self.search.matches(k))
            .narrow_if(self.kind.is_active(), |k| self.kind.matches(k.kind.as_str()))
            .narrow_if(self.gender.is_active(), |k| {
                k.gender_preference
                    .is_some_and(|g| self.gender.matches(g.as_str()))
            })
            .narrow_if(min.is_some(), |k| min.is_some_and(|m| k.price_per_month >= m))
            .narrow_if(max.is_some(), |k| max.is_some_and(|m| k.price_per_month <= m))
            .narrow_if(self.price_bucket.is_active(), |k| {
                self.price_bucket.contains(k.price_per_month)
            })
            .narrow_if(!self.facilities.is_empty(), |k| {
                self.facilities.iter().all(|f| k.facilities.contains(f))
            })
            .narrow_if(self.verified_only, |k| k.is_verified)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

/// Filter state of the locations page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationCriteria {
    pub search: SearchTerm,
    pub category: Selection,
}

impl Criteria<Location> for LocationCriteria {
    fn is_inactive(&self) -> bool {
        !self.search.is_active() && !self.category.is_active()
    }

    fn apply<'a>(&self, items: &'a [Location]) -> Vec<&'a Location> {
        Narrowing::new(items)
            .narrow_if(self.search.is_active(), |l| self.search.matches(l))
            .narrow_if(self.category.is_active(), |l| {
                self.category.matches(l.category.as_str())
            })
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Available options
// ---------------------------------------------------------------------------

/// `All` followed by the sorted distinct non-blank values.
#[must_use]
pub fn available_options<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    std::iter::once(ALL.to_string())
        .chain(distinct_sorted(values))
        .collect()
}

/// Sorted distinct non-blank values, without the sentinel.
#[must_use]
pub fn distinct_sorted<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| v.as_ref().trim().to_string())
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[must_use]
pub fn program_options(courses: &[CourseInstitution]) -> Vec<String> {
    available_options(courses.iter().flat_map(|c| c.programs.iter()))
}

#[must_use]
pub fn price_range_options(courses: &[CourseInstitution]) -> Vec<String> {
    available_options(courses.iter().map(|c| c.price_range.as_str()))
}

#[must_use]
pub fn kos_type_options(listings: &[KosHomestay]) -> Vec<String> {
    available_options(listings.iter().map(|k| k.kind.as_str()))
}

/// Only genders actually set on some listing are offered.
#[must_use]
pub fn gender_options(listings: &[KosHomestay]) -> Vec<String> {
    available_options(
        listings
            .iter()
            .filter_map(|k| k.gender_preference.map(|g| g.as_str())),
    )
}

/// Facilities are multi-select, so no sentinel.
#[must_use]
pub fn facility_options(listings: &[KosHomestay]) -> Vec<String> {
    distinct_sorted(listings.iter().flat_map(|k| k.facilities.iter()))
}

#[must_use]
pub fn category_options(locations: &[Location]) -> Vec<String> {
    available_options(locations.iter().map(|l| l.category.as_str()))
}

// ---------------------------------------------------------------------------
// Query-string construction
// ---------------------------------------------------------------------------

fn truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl CourseCriteria {
    /// Build from `key=value` pairs: `search`, `program`, `priceRange`, `verified`.
    /// Unknown keys are ignored.
    #[must_use]
    pub fn from_pairs<'p>(pairs: impl IntoIterator<Item = (&'p str, &'p str)>) -> Self {
        let mut criteria = Self::default();
        for (key, value) in pairs {
            match key {
                "search" => criteria.search = SearchTerm::parse(value),
                "program" => criteria.program = Selection::parse(value),
                "priceRange" => criteria.price_range = Selection::parse(value),
                "verified" => criteria.verified_only = truthy(value),
                _ => {}
            }
        }
        criteria
    }
}

impl KosCriteria {
    /// Build from `key=value` pairs: `search`, `type`, `gender`, `minPrice`,
    /// `maxPrice`, `price`, `facility` (repeatable or comma separated),
    /// `verified`. Unknown keys are ignored.
    #[must_use]
    pub fn from_pairs<'p>(pairs: impl IntoIterator<Item = (&'p str, &'p str)>) -> Self {
        let mut criteria = Self::default();
        for (key, value) in pairs {
            match key {
                "search" => criteria.search = SearchTerm::parse(value),
                "type" => criteria.kind = Selection::parse(value),
                "gender" => criteria.gender = Selection::parse(value),
                "minPrice" => criteria.min_price = PriceBound::parse(value),
                "maxPrice" => criteria.max_price = PriceBound::parse(value),
                "price" => criteria.price_bucket = PriceBucket::parse(value),
                "facility" | "facilities" => criteria.facilities.extend(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|f| !f.is_empty())
                        .map(String::from),
                ),
                "verified" => criteria.verified_only = truthy(value),
                _ => {}
            }
        }
        criteria
    }
}

impl LocationCriteria {
    /// Build from `key=value` pairs: `search`, `category`.
    #[must_use]
    pub fn from_pairs<'p>(pairs: impl IntoIterator<Item = (&'p str, &'p str)>) -> Self {
        let mut criteria = Self::default();
        for (key, value) in pairs {
            match key {
                "search" => criteria.search = SearchTerm::parse(value),
                "category" => criteria.category = Selection::parse(value),
                _ => {}
            }
        }
        criteria
    }
}
