//! Allowed-method sets for routes

use hyper::Method;

/// The methods a route answers. HEAD follows GET; OPTIONS is always allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSet {
    get: bool,
    post: bool,
}

impl MethodSet {
    pub const GET: Self = Self { get: true, post: false };
    pub const POST: Self = Self { get: false, post: true };
    pub const GET_POST: Self = Self { get: true, post: true };

    pub fn allows(self, method: &Method) -> bool {
        match *method {
            Method::GET | Method::HEAD => self.get,
            Method::POST => self.post,
            Method::OPTIONS => true,
            _ => false,
        }
    }

    /// Value for the `Allow` header
    pub const fn allow_header(self) -> &'static str {
        match (self.get, self.post) {
            (true, true) => "GET, HEAD, POST, OPTIONS",
            (true, false) => "GET, HEAD, OPTIONS",
            (false, true) => "POST, OPTIONS",
            (false, false) => "OPTIONS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_only() {
        assert!(MethodSet::GET.allows(&Method::GET));
        assert!(MethodSet::GET.allows(&Method::HEAD));
        assert!(MethodSet::GET.allows(&Method::OPTIONS));
        assert!(!MethodSet::GET.allows(&Method::POST));
        assert!(!MethodSet::GET.allows(&Method::DELETE));
    }

    #[test]
    fn test_post_only() {
        assert!(MethodSet::POST.allows(&Method::POST));
        assert!(!MethodSet::POST.allows(&Method::GET));
        assert!(!MethodSet::POST.allows(&Method::HEAD));
        assert_eq!(MethodSet::POST.allow_header(), "POST, OPTIONS");
    }

    #[test]
    fn test_get_post() {
        assert!(MethodSet::GET_POST.allows(&Method::GET));
        assert!(MethodSet::GET_POST.allows(&Method::POST));
        assert!(!MethodSet::GET_POST.allows(&Method::PUT));
        assert_eq!(MethodSet::GET_POST.allow_header(), "GET, HEAD, POST, OPTIONS");
    }
}
