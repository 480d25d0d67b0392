//! Ordered host remapping rules keyed on the page's `host` parameter.

lazy_static! {
    /// Evaluated in order, first match wins. The QA rule has to stay ahead
    /// of the generic `.adobeprojectm.com` one.
    pub static ref HOST_RULES: Vec<HostRule> = vec![
        HostRule::new(
            HostMatch::Exact("spark.adobe.com"),
            "commerce.adobe.com",
            vec![Replacement::with_page_host("spark.adobe.com")],
        ),
        HostRule::new(
            HostMatch::Contains("qa.adobeprojectm.com"),
            "commerce.adobe.com",
            vec![Replacement::with_page_host("spark.adobe.com")],
        ),
        HostRule::new(
            HostMatch::Contains(".adobeprojectm.com"),
            "commerce-stg.adobe.com",
            vec![
                Replacement::literal("adminconsole.adobe.com", "stage.adminconsole.adobe.com"),
                Replacement::with_page_host("spark.adobe.com"),
            ],
        ),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostMatch {
    Exact(&'static str),
    Contains(&'static str),
}

impl HostMatch {
    pub fn matches(&self, host: &str) -> bool {
        match self {
            HostMatch::Exact(s) => host == *s,
            HostMatch::Contains(s) => host.contains(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ReplaceWith {
    Literal(&'static str),
    PageHost,
}

/// Replaces the first occurrence of `from` in the return URL.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Replacement {
    from: &'static str,
    to: ReplaceWith,
}

impl Replacement {
    pub const fn literal(from: &'static str, to: &'static str) -> Self {
        Self {
            from,
            to: ReplaceWith::Literal(to),
        }
    }

    pub const fn with_page_host(from: &'static str) -> Self {
        Self {
            from,
            to: ReplaceWith::PageHost,
        }
    }

    pub fn apply(&self, s: &str, page_host: &str) -> String {
        let to = match self.to {
            ReplaceWith::Literal(to) => to,
            ReplaceWith::PageHost => page_host,
        };
        s.replacen(self.from, to, 1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HostRule {
    matcher: HostMatch,
    hostname: &'static str,
    replacements: Vec<Replacement>,
}

impl HostRule {
    fn new(matcher: HostMatch, hostname: &'static str, replacements: Vec<Replacement>) -> Self {
        Self {
            matcher,
            hostname,
            replacements,
        }
    }

    pub fn first_match(page_host: &str) -> Option<&'static HostRule> {
        HOST_RULES.iter().find(|rule| rule.matcher.matches(page_host))
    }

    /// Checkout hostname this rule assigns.
    pub const fn hostname(&self) -> &'static str {
        self.hostname
    }

    /// Runs every replacement over the return URL, in order.
    pub fn rewrite_return_url(&self, r_url: &str, page_host: &str) -> String {
        self.replacements
            .iter()
            .fold(r_url.to_string(), |acc, r| r.apply(&acc, page_host))
    }
}
