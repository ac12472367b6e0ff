//! Explicit cookie jar for the session
//!
//! The remote side recognizes a browser by a fixed set of cookie names, so
//! the jar is an explicit name → value map rather than an opaque client
//! store: resets must restore the documented baseline, and the CSRF cookie
//! must be readable by name after every response.

use std::collections::BTreeMap;

/// Baseline cookie set expected by the platform. Present (possibly
/// empty-valued) after every reset.
pub const BASELINE_COOKIES: [(&str, &str); 7] = [
    ("sessionid", ""),
    ("mid", ""),
    ("ig_pr", "1"),
    ("ig_vw", "1920"),
    ("csrftoken", ""),
    ("s_network", ""),
    ("ds_user_id", ""),
];

/// Name of the anti-forgery cookie issued by the server
pub const CSRF_COOKIE: &str = "csrftoken";

/// Cookie jar holding the session's name → value pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: BTreeMap<String, String>,
}

impl CookieJar {
    /// Create an empty jar
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a jar pre-populated with the baseline cookie set
    pub fn with_baseline() -> Self {
        let mut jar = Self::new();
        jar.reset_to_baseline();
        jar
    }

    /// Restore the baseline cookies, overwriting their current values.
    /// Cookies outside the baseline set are left untouched.
    pub fn reset_to_baseline(&mut self) {
        for (name, value) in BASELINE_COOKIES {
            self.cookies.insert(name.to_string(), value.to_string());
        }
    }

    /// Insert or replace a cookie
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    /// Look up a cookie value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Iterate over the cookie names currently in the jar
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cookies.keys().map(String::as_str)
    }

    /// Number of cookies in the jar
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Whether the jar holds no cookies
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Absorb Set-Cookie values from a response into the jar
    pub fn update_from_response(&mut self, response: &reqwest::Response) {
        for cookie in response.cookies() {
            self.insert(cookie.name().to_string(), cookie.value().to_string());
        }
    }

    /// Serialize the jar into a Cookie header value
    pub fn header_value(&self) -> String {
        self.cookies
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
