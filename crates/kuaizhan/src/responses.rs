//! Kuaizhan API result shapes.
//!
//! Every struct defaults missing fields, so a partial payload still decodes.

use serde::{Deserialize, Serialize};

/// Traffic counters for a site, from GET /v1/tbk/getSitePvUv.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteTraffic {
    pub site_id: String,
    pub pv_count: String,
    pub uv_count: String,
}

/// Result of GET /v1/tbk/shortUrlRevert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevertedShortUrl {
    /// True if the short link was issued by Kuaizhan.
    pub is_kz_link: bool,
    pub origin_link: String,
}

/// A page of a site, from GET /v1/tbk/getPageName.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Page {
    pub page_id: u64,
    pub title: String,
}

/// Site details, from POST /v1/tbk/createSite and /v1/tbk/getSiteInfo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Site {
    #[serde(rename = "siteId")]
    pub id: String,
    #[serde(rename = "pageId")]
    pub page_id: String,
    #[serde(rename = "siteDomain")]
    pub domain: String,
    #[serde(rename = "siteStatus")]
    pub status: String,
    #[serde(rename = "packageName")]
    pub package_name: String,
    #[serde(rename = "packageRemainingDays")]
    pub package_remaining_days: u64,
}

// Single-field `data` objects.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct DomainData {
    pub domain: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ShortUrlData {
    pub short_url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct UrlData {
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct DomainBanData {
    #[serde(rename = "isBannedWX")]
    pub is_banned_wx: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct LinkData {
    pub link: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct SiteIdsData {
    pub site_ids: Vec<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct PageIdsData {
    pub page_ids: Vec<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct PageIdData {
    pub page_id: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct CountData {
    pub count: u64,
}
