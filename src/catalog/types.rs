//! Payload types served by the JSON endpoints
//!
//! Fields are declared in alphabetical order and maps are `BTreeMap`s so the
//! serialized key order is stable and sorted.

use serde::Serialize;
use std::collections::BTreeMap;

/// Competitor classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetitorType {
    Seo,
    Product,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Competitor {
    /// Domain authority
    pub da: u32,
    pub domain: String,
    /// Keyword overlap, percent
    pub overlap: u8,
    /// Monthly organic visits
    pub traffic: u64,
    #[serde(rename = "type")]
    pub kind: CompetitorType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Opportunity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyword {
    /// Cost per click, USD
    pub cpc: f64,
    /// Ranking difficulty, 0-100
    pub difficulty: u8,
    pub keyword: String,
    pub opportunity: Opportunity,
    /// Monthly search volume
    pub volume: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    Home,
    Category,
    Blog,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SitemapPage {
    /// Link depth from the root, starting at 1
    pub depth: u32,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: PageType,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sitemap {
    pub domain: String,
    pub pages: Vec<SitemapPage>,
}

/// Generated article draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentDraft {
    pub content: String,
    pub outline: Vec<String>,
    pub seo_score: u8,
    pub title: String,
}

/// Positions per keyword, aligned with `RankingDataset::dates`
pub type KeywordPositions = BTreeMap<String, Vec<u32>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingDataset {
    pub dates: Vec<String>,
    pub keywords: Vec<String>,
    /// site -> keyword -> positions
    pub rankings: BTreeMap<String, KeywordPositions>,
}

/// Reply to a POST on a listing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ack {
    pub message: &'static str,
    pub status: &'static str,
}

impl Ack {
    pub const fn success(message: &'static str) -> Self {
        Self {
            message,
            status: "success",
        }
    }
}
