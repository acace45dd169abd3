//! Dashboard page views
//!
//! Each page is an askama template that extends `base.html`. Pages take no
//! parameters: the only variables are the title and the active nav path.

use askama::Template;

/// One of the dashboard's HTML views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Competitors,
    Keywords,
    Sitemaps,
    Content,
    RankTracker,
}

impl Page {
    pub const ALL: [Self; 6] = [
        Self::Dashboard,
        Self::Competitors,
        Self::Keywords,
        Self::Sitemaps,
        Self::Content,
        Self::RankTracker,
    ];

    /// Look up the page served at `path`
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.path() == path)
    }

    pub const fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Competitors => "/competitors",
            Self::Keywords => "/keywords",
            Self::Sitemaps => "/sitemaps",
            Self::Content => "/content",
            Self::RankTracker => "/rank-tracker",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Competitors => "Competitor Finder",
            Self::Keywords => "Keyword Scraper",
            Self::Sitemaps => "Sitemap Analyzer",
            Self::Content => "Content Generator",
            Self::RankTracker => "Rank Tracker",
        }
    }

    /// Render the page to a complete HTML document
    pub fn render(self) -> Result<String, crate::Error> {
        let view = PageView {
            title: self.title(),
            path: self.path(),
        };
        let html = match self {
            Self::Dashboard => DashboardTemplate { view }.render()?,
            Self::Competitors => CompetitorsTemplate { view }.render()?,
            Self::Keywords => KeywordsTemplate { view }.render()?,
            Self::Sitemaps => SitemapsTemplate { view }.render()?,
            Self::Content => ContentTemplate { view }.render()?,
            Self::RankTracker => RankTrackerTemplate { view }.render()?,
        };
        Ok(html)
    }
}

/// Variables shared by every page template
struct PageView {
    title: &'static str,
    path: &'static str,
}

impl PageView {
    /// CSS class for a nav link, `active` when it points at this page
    fn nav_class(&self, href: &str) -> &'static str {
        if self.path == href {
            "nav-link active"
        } else {
            "nav-link"
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    view: PageView,
}

#[derive(Template)]
#[template(path = "competitors.html")]
struct CompetitorsTemplate {
    view: PageView,
}

#[derive(Template)]
#[template(path = "keywords.html")]
struct KeywordsTemplate {
    view: PageView,
}

#[derive(Template)]
#[template(path = "sitemaps.html")]
struct SitemapsTemplate {
    view: PageView,
}

#[derive(Template)]
#[template(path = "content.html")]
struct ContentTemplate {
    view: PageView,
}

#[derive(Template)]
#[template(path = "rank_tracker.html")]
struct RankTrackerTemplate {
    view: PageView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(Page::from_path("/"), Some(Page::Dashboard));
        assert_eq!(Page::from_path("/rank-tracker"), Some(Page::RankTracker));
        assert_eq!(Page::from_path("/rank_tracker"), None);
        assert_eq!(Page::from_path("/competitors/"), None);
    }

    #[test]
    fn test_every_page_renders_its_title() {
        for page in Page::ALL {
            let html = page.render().unwrap();
            assert!(html.starts_with("<!DOCTYPE html>"), "{page:?}");
            assert!(
                html.contains(&format!("<title>{} | SEO Dashboard</title>", page.title())),
                "{page:?} missing title"
            );
            assert!(html.contains(&format!("<h1>{}</h1>", page.title())));
        }
    }

    #[test]
    fn test_active_nav_link() {
        let html = Page::Keywords.render().unwrap();
        assert!(html.contains(r#"<a class="nav-link active" href="/keywords">"#));
        assert!(html.contains(r#"<a class="nav-link" href="/competitors">"#));
    }

    #[test]
    fn test_sidebar_toggle_and_quick_start() {
        for page in Page::ALL {
            let html = page.render().unwrap();
            assert!(html.contains(r#"id="sidebarCollapse""#), "{page:?}");
            assert!(html.contains(r#"<nav class="sidebar" id="sidebar">"#), "{page:?}");
        }

        let html = Page::Dashboard.render().unwrap();
        assert!(html.contains(r#"<dialog id="quickStartWizard">"#));
        for step in 1..=3 {
            assert!(html.contains(&format!(r#"id="wizard-step-{step}""#)));
        }
        assert!(!Page::Keywords.render().unwrap().contains("quickStartWizard"));
    }
}
