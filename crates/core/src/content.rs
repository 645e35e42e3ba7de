//! Site route table and static marketing content.
//!
//! The public pages and the admin panel are addressed by the paths below.
//! Admin pages other than login and register need an authenticated session;
//! [`resolve_route`] tells the front end (and the API's route endpoint) which
//! is which.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

/// Which audience a route belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteArea {
    Public,
    Admin,
}

/// One entry of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SiteRoute {
    pub path: &'static str,
    /// Stable page identifier used by the front end.
    pub page: &'static str,
    pub area: RouteArea,
    pub requires_auth: bool,
}

const fn public(path: &'static str, page: &'static str) -> SiteRoute {
    SiteRoute {
        path,
        page,
        area: RouteArea::Public,
        requires_auth: false,
    }
}

const fn admin(path: &'static str, page: &'static str, requires_auth: bool) -> SiteRoute {
    SiteRoute {
        path,
        page,
        area: RouteArea::Admin,
        requires_auth,
    }
}

const ROUTES: &[SiteRoute] = &[
    public("/", "home"),
    public("/expertise", "expertise"),
    public("/casestudy", "case-studies"),
    public("/careers", "careers"),
    public("/about", "about"),
    public("/contact", "contact"),
    admin("/admin/login", "admin-login", false),
    admin("/admin/register", "admin-register", false),
    admin("/admin/dashboard", "admin-dashboard", true),
    admin("/admin/vacancies", "admin-vacancies", true),
    admin("/admin/case-studies", "admin-case-studies", true),
    admin("/admin/applications", "admin-applications", true),
    admin("/admin/inquiries", "admin-inquiries", true),
    admin("/admin/layout", "admin-layout", true),
    admin("/admin/settings", "admin-settings", true),
];

/// The full route table in display order.
pub fn routes() -> &'static [SiteRoute] {
    ROUTES
}

/// Look up the route for `path`.
///
/// A single trailing slash is ignored (except for the root) and a `#`
/// fragment prefix from hash routing is accepted.
///
/// ```
/// use siliconedge_core::content::resolve_route;
/// assert_eq!(resolve_route("/careers/").map(|r| r.page), Some("careers"));
/// assert_eq!(resolve_route("#/admin/layout").map(|r| r.requires_auth), Some(true));
/// assert!(resolve_route("/nope").is_none());
/// ```
pub fn resolve_route(path: &str) -> Option<&'static SiteRoute> {
    let path = path.trim().trim_start_matches('#');
    let path = if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    };
    ROUTES.iter().find(|r| r.path == path)
}

// ---------------------------------------------------------------------------
// Page content
// ---------------------------------------------------------------------------

/// A titled block of copy on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Section {
    pub heading: &'static str,
    pub body: &'static str,
}

/// Static copy for a public page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageContent {
    pub slug: &'static str,
    pub headline: &'static str,
    pub summary: &'static str,
    pub sections: &'static [Section],
}

/// An engineering service line shown on the Expertise page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpertiseArea {
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
}

const EXPERTISE: &[ExpertiseArea] = &[
    ExpertiseArea {
        slug: "rtl-design",
        title: "RTL Design",
        summary: "Microarchitecture and synthesizable RTL for SoC subsystems and IP blocks.",
    },
    ExpertiseArea {
        slug: "verification",
        title: "Design Verification",
        summary: "UVM testbenches, coverage closure and formal property checking.",
    },
    ExpertiseArea {
        slug: "physical-design",
        title: "Physical Design",
        summary: "Floorplanning, place and route, and timing closure down to advanced nodes.",
    },
    ExpertiseArea {
        slug: "dft",
        title: "Design for Test",
        summary: "Scan insertion, ATPG, memory BIST and boundary scan.",
    },
    ExpertiseArea {
        slug: "analog-mixed-signal",
        title: "Analog & Mixed Signal",
        summary: "Custom layout and verification for PLLs, data converters and SerDes.",
    },
    ExpertiseArea {
        slug: "fpga-prototyping",
        title: "FPGA Prototyping",
        summary: "Pre-silicon prototyping, emulation and lab bring-up.",
    },
];

/// Service lines shown on the Expertise page.
pub fn expertise_areas() -> &'static [ExpertiseArea] {
    EXPERTISE
}

const PAGES: &[PageContent] = &[
    PageContent {
        slug: "home",
        headline: "Silicon, engineered end to end",
        summary: "Design services from specification to tapeout for fabless and system companies.",
        sections: &[
            Section {
                heading: "What we do",
                body: "RTL, verification, physical design and DFT teams that plug into your flow.",
            },
            Section {
                heading: "How we work",
                body: "Dedicated pods or turnkey delivery, with weekly milestones and shared dashboards.",
            },
        ],
    },
    PageContent {
        slug: "expertise",
        headline: "Expertise",
        summary: "Front-end to back-end semiconductor design capability under one roof.",
        sections: &[Section {
            heading: "Service lines",
            body: "RTL design, verification, physical design, DFT, analog and mixed signal, FPGA prototyping.",
        }],
    },
    PageContent {
        slug: "case-studies",
        headline: "Case Studies",
        summary: "Selected engagements across networking, mobile, automotive and AI silicon.",
        sections: &[],
    },
    PageContent {
        slug: "careers",
        headline: "Careers",
        summary: "Join engineers who have taken dozens of chips to production.",
        sections: &[Section {
            heading: "Applying",
            body: "Pick an opening, attach your résumé and tell us about your best tapeout.",
        }],
    },
    PageContent {
        slug: "about",
        headline: "About Us",
        summary: "An engineering-led design services company.",
        sections: &[
            Section {
                heading: "Mission",
                body: "Shorten the path from architecture to working silicon.",
            },
            Section {
                heading: "Team",
                body: "Design, verification and implementation engineers across three design centres.",
            },
        ],
    },
    PageContent {
        slug: "contact",
        headline: "Contact",
        summary: "Tell us about your project and we will get back within two working days.",
        sections: &[],
    },
];

/// Static copy for the public page with `slug`.
pub fn page(slug: &str) -> Option<&'static PageContent> {
    PAGES.iter().find(|p| p.slug == slug)
}

/// Every public page.
pub fn pages() -> &'static [PageContent] {
    PAGES
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
