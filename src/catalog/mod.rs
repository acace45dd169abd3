//! Mock data catalog
//!
//! Every JSON endpoint answers from this fixed set of payloads. The catalog is
//! built once when the server starts and only ever read afterwards.

mod types;

pub use types::{
    Ack, Competitor, CompetitorType, ContentDraft, Keyword, KeywordPositions, Opportunity,
    PageType, RankingDataset, Sitemap, SitemapPage,
};

use std::collections::BTreeMap;

pub const COMPETITORS_ACK: Ack = Ack::success("Competitor data processed");
pub const KEYWORDS_ACK: Ack = Ack::success("Keyword data processed");
pub const SITEMAPS_ACK: Ack = Ack::success("Sitemap data processed");

const TRACKED_KEYWORDS: [&str; 3] = ["seo tools", "competitor analysis", "keyword research"];

/// All canned payloads
#[derive(Debug, Clone)]
pub struct Catalog {
    pub competitors: Vec<Competitor>,
    pub keywords: Vec<Keyword>,
    pub sitemap: Sitemap,
    pub content: ContentDraft,
    pub rankings: RankingDataset,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            competitors: competitors(),
            keywords: keywords(),
            sitemap: sitemap(),
            content: content_draft(),
            rankings: rankings(),
        }
    }
}

fn competitor(domain: &str, traffic: u64, overlap: u8, da: u32, kind: CompetitorType) -> Competitor {
    Competitor {
        da,
        domain: domain.to_string(),
        overlap,
        traffic,
        kind,
    }
}

fn competitors() -> Vec<Competitor> {
    vec![
        competitor("competitor1.com", 250_000, 65, 45, CompetitorType::Seo),
        competitor("competitor2.com", 180_000, 42, 38, CompetitorType::Product),
        competitor("competitor3.com", 320_000, 78, 52, CompetitorType::Seo),
    ]
}

fn keyword(keyword: &str, volume: u64, difficulty: u8, cpc: f64, opportunity: Opportunity) -> Keyword {
    Keyword {
        cpc,
        difficulty,
        keyword: keyword.to_string(),
        opportunity,
        volume,
    }
}

fn keywords() -> Vec<Keyword> {
    vec![
        keyword(TRACKED_KEYWORDS[0], 12_000, 67, 15.20, Opportunity::Medium),
        keyword(TRACKED_KEYWORDS[1], 8_500, 45, 12.75, Opportunity::High),
        keyword(TRACKED_KEYWORDS[2], 22_000, 72, 18.50, Opportunity::Medium),
    ]
}

fn sitemap_page(url: &str, kind: PageType, depth: u32, title: &str) -> SitemapPage {
    SitemapPage {
        depth,
        title: title.to_string(),
        kind,
        url: url.to_string(),
    }
}

fn sitemap() -> Sitemap {
    Sitemap {
        domain: "competitor1.com".to_string(),
        pages: vec![
            sitemap_page("/home", PageType::Home, 1, "Home Page"),
            sitemap_page("/products", PageType::Category, 1, "Products"),
            sitemap_page("/blog", PageType::Blog, 1, "Blog"),
            sitemap_page("/blog/seo-tips", PageType::Post, 2, "SEO Tips"),
        ],
    }
}

fn content_draft() -> ContentDraft {
    ContentDraft {
        content: "This is a placeholder for AI-generated content. In production, this would be \
                  actual content generated based on the input parameters."
            .to_string(),
        outline: [
            "Introduction to SEO Competitor Analysis",
            "Why Competitor Analysis Matters",
            "Step-by-Step Guide to Analyzing Competitors",
            "Tools for Effective Competitor Research",
            "Actionable Insights from Competitor Data",
        ]
        .iter()
        .map(ToString::to_string)
        .collect(),
        seo_score: 85,
        title: "How to Analyze Your SEO Competitors".to_string(),
    }
}

fn site_positions(series: [[u32; 4]; 3]) -> KeywordPositions {
    TRACKED_KEYWORDS
        .iter()
        .zip(series)
        .map(|(kw, positions)| ((*kw).to_string(), positions.to_vec()))
        .collect()
}

fn rankings() -> RankingDataset {
    let mut rankings = BTreeMap::new();
    rankings.insert(
        "your-site.com".to_string(),
        site_positions([[12, 8, 5, 3], [15, 12, 10, 7], [20, 18, 15, 10]]),
    );
    rankings.insert(
        "competitor1.com".to_string(),
        site_positions([[3, 4, 4, 5], [5, 6, 8, 9], [7, 8, 9, 12]]),
    );

    RankingDataset {
        dates: ["2023-01-01", "2023-02-01", "2023-03-01", "2023-04-01"]
            .iter()
            .map(ToString::to_string)
            .collect(),
        keywords: TRACKED_KEYWORDS.iter().map(ToString::to_string).collect(),
        rankings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_competitors() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.competitors.len(), 3);
        assert!(catalog.competitors.iter().all(|c| c.overlap <= 100));
        assert_eq!(catalog.competitors[1].kind, CompetitorType::Product);
    }

    #[test]
    fn test_keywords() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.keywords.len(), 3);
        assert!(catalog.keywords.iter().all(|k| k.difficulty <= 100));
        assert_eq!(catalog.keywords[1].opportunity, Opportunity::High);
    }

    #[test]
    fn test_sitemap_pages_keep_declaration_order() {
        let sitemap = Catalog::builtin().sitemap;
        let urls: Vec<&str> = sitemap.pages.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(urls, ["/home", "/products", "/blog", "/blog/seo-tips"]);
        assert!(sitemap.pages.iter().all(|p| p.depth >= 1));
    }

    #[test]
    fn test_rankings_align_with_dates() {
        let rankings = Catalog::builtin().rankings;
        assert_eq!(rankings.dates.len(), 4);
        assert_eq!(rankings.rankings.len(), 2);
        for per_keyword in rankings.rankings.values() {
            assert_eq!(per_keyword.len(), rankings.keywords.len());
            for positions in per_keyword.values() {
                assert_eq!(positions.len(), rankings.dates.len());
            }
        }
        assert_eq!(rankings.rankings["your-site.com"]["seo tools"], vec![12, 8, 5, 3]);
    }

    #[test]
    fn test_serialized_keys_are_sorted() {
        let catalog = Catalog::builtin();
        let json = serde_json::to_string(&catalog.competitors[0]).unwrap();
        assert_eq!(
            json,
            r#"{"da":45,"domain":"competitor1.com","overlap":65,"traffic":250000,"type":"seo"}"#
        );

        let json = serde_json::to_string(&catalog.keywords[0]).unwrap();
        assert_eq!(
            json,
            r#"{"cpc":15.2,"difficulty":67,"keyword":"seo tools","opportunity":"medium","volume":12000}"#
        );

        let json = serde_json::to_string(&COMPETITORS_ACK).unwrap();
        assert_eq!(json, r#"{"message":"Competitor data processed","status":"success"}"#);
    }

    #[test]
    fn test_content_draft() {
        let draft = Catalog::builtin().content;
        assert_eq!(draft.outline.len(), 5);
        assert_eq!(draft.seo_score, 85);
        assert!(draft.content.starts_with("This is a placeholder"));
    }
}
