//! Case-insensitive substring search over small in-memory lists.
//!
//! Every list on the site (vacancies, case studies, the header search box) is
//! filtered the same way: an item matches when any of its searchable fields
//! contains the query as a case-insensitive substring. There is no indexing
//! or ranking; the result is the matching subsequence in input order.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Searchable
// ---------------------------------------------------------------------------

/// An item that exposes text fields (title, category, keywords) to search.
pub trait Searchable {
    /// The fields checked for a substring match.
    fn search_fields(&self) -> Vec<&str>;
}

/// What a blank (empty or whitespace-only) query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyQuery {
    /// Return every item. Used by list pages with a filter box.
    All,
    /// Return nothing. Used by the header search, which stays closed until
    /// the visitor types something.
    None,
}

/// Whether `item` matches `query` (case-insensitive substring, query trimmed).
///
/// A blank query matches everything; callers decide what a blank query means
/// for their list via [`EmptyQuery`].
pub fn matches<T: Searchable + ?Sized>(item: &T, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Filter `items` down to the subsequence matching `query`.
///
/// # Examples
///
/// ```
/// use siliconedge_core::search::{filter, site_index, EmptyQuery};
///
/// let index = site_index();
/// let hits = filter(index, "VERIFICATION", EmptyQuery::None);
/// assert!(hits.iter().all(|e| e.title.to_lowercase().contains("verification")
///     || e.category.to_lowercase().contains("verification")
///     || e.keywords.iter().any(|k| k.contains("verification"))));
/// assert!(filter(index, "   ", EmptyQuery::None).is_empty());
/// ```
pub fn filter<'a, T: Searchable>(items: &'a [T], query: &str, empty: EmptyQuery) -> Vec<&'a T> {
    if query.trim().is_empty() {
        return match empty {
            EmptyQuery::All => items.iter().collect(),
            EmptyQuery::None => Vec::new(),
        };
    }
    items.iter().filter(|item| matches(*item, query)).collect()
}

/// Owned variant of [`filter`] for callers that hand the result to a
/// serializer.
pub fn filter_owned<T: Searchable + Clone>(items: &[T], query: &str, empty: EmptyQuery) -> Vec<T> {
    filter(items, query, empty).into_iter().cloned().collect()
}

// ---------------------------------------------------------------------------
// Site index
// ---------------------------------------------------------------------------

/// One entry of the static site search index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteEntry {
    pub title: &'static str,
    pub category: &'static str,
    pub keywords: &'static [&'static str],
    /// Public route the entry links to.
    pub path: &'static str,
}

impl Searchable for SiteEntry {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(2 + self.keywords.len());
        fields.push(self.title);
        fields.push(self.category);
        fields.extend(self.keywords.iter().copied());
        fields
    }
}

const SITE_INDEX: &[SiteEntry] = &[
    SiteEntry {
        title: "Home",
        category: "Page",
        keywords: &["semiconductor", "chip design", "services"],
        path: "/",
    },
    SiteEntry {
        title: "RTL Design",
        category: "Expertise",
        keywords: &["verilog", "systemverilog", "vhdl", "microarchitecture"],
        path: "/expertise",
    },
    SiteEntry {
        title: "Design Verification",
        category: "Expertise",
        keywords: &["uvm", "verification", "coverage", "testbench", "formal"],
        path: "/expertise",
    },
    SiteEntry {
        title: "Physical Design",
        category: "Expertise",
        keywords: &["place and route", "timing closure", "sta", "floorplan"],
        path: "/expertise",
    },
    SiteEntry {
        title: "Design for Test",
        category: "Expertise",
        keywords: &["dft", "scan", "atpg", "mbist", "jtag"],
        path: "/expertise",
    },
    SiteEntry {
        title: "Analog & Mixed Signal",
        category: "Expertise",
        keywords: &["ams", "layout", "pll", "adc", "serdes"],
        path: "/expertise",
    },
    SiteEntry {
        title: "FPGA Prototyping",
        category: "Expertise",
        keywords: &["fpga", "emulation", "prototype", "bring-up"],
        path: "/expertise",
    },
    SiteEntry {
        title: "Case Studies",
        category: "Page",
        keywords: &["projects", "customers", "tapeout", "success stories"],
        path: "/casestudy",
    },
    SiteEntry {
        title: "Careers",
        category: "Page",
        keywords: &["jobs", "vacancies", "openings", "apply", "hiring"],
        path: "/careers",
    },
    SiteEntry {
        title: "About Us",
        category: "Page",
        keywords: &["company", "team", "mission", "history"],
        path: "/about",
    },
    SiteEntry {
        title: "Contact",
        category: "Page",
        keywords: &["email", "phone", "address", "inquiry", "get in touch"],
        path: "/contact",
    },
];

/// The static site search index (pages and expertise areas).
pub fn site_index() -> &'static [SiteEntry] {
    SITE_INDEX
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
