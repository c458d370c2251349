//! Kuaizhan API operations.
//!
//! Each method maps its arguments onto a parameter set, sends it through
//! [`KuaizhanClient::send_form`] or [`KuaizhanClient::send_query`], and decodes
//! the payload. Payload mismatches follow the client's [`PayloadDecoding`] mode.
//!
//! [`PayloadDecoding`]: crate::PayloadDecoding

use crate::client::KuaizhanClient;
use crate::error::KuaizhanError;
use crate::responses::{
    CountData, DomainBanData, DomainData, LinkData, Page, PageIdData, PageIdsData,
    RevertedShortUrl, ShortUrlData, Site, SiteIdsData, SiteTraffic, UrlData,
};
use auth::Params;

/// `urlType` sent when none is given.
pub const DEFAULT_SHORT_URL_TYPE: &str = "default";

/// Page template sent when none is given.
pub const DEFAULT_PAGE_TEMPLATE: &str = "WHITE";

/// Site type sent when none is given.
pub const DEFAULT_SITE_TYPE: &str = "FAST";

/// Endpoint paths, relative to the base URL.
pub mod paths {
    pub const GET_DOMAIN: &str = "/v1/tbk/getDomain";
    pub const GET_SITE_PV_UV: &str = "/v1/tbk/getSitePvUv";
    pub const CHANGE_DOMAIN: &str = "/v1/tbk/changeDomain";
    pub const CHANGE_DOMAIN_HTTPS_FORWARD: &str = "/v1/tbk/changeDomainHttpsForward";
    pub const GEN_KZ_SHORT_URL: &str = "/v1/tbk/genKzShortUrl";
    pub const GEN_SHORT_URL: &str = "/v1/tbk/genShortUrl";
    pub const SHORT_URL_REVERT: &str = "/v1/tbk/shortUrlRevert";
    pub const MODIFY_PAGE_JS: &str = "/v1/tbk/modifyPageJs";
    pub const PUBLISH_PAGE: &str = "/v1/tbk/publishPage";
    pub const CHECK_DOMAIN_BAN: &str = "/v1/tbk/checkDomainBan";
    pub const GEN_PROMOTE_LINK: &str = "/v1/tbk/genPromoteLink";
    pub const GET_SITE_IDS: &str = "/v1/tbk/getSiteIds";
    pub const GET_PAGE_IDS: &str = "/v1/tbk/getPageIds";
    pub const GET_PAGE_NAME: &str = "/v1/tbk/getPageName";
    pub const CREATE_SITE_PAGE: &str = "/v1/tbk/createSitePage";
    pub const DELETE_SITE_PAGE: &str = "/v1/tbk/deleteSitePage";
    pub const CREATE_SITE: &str = "/v1/tbk/createSite";
    pub const PUBLISH_SITE: &str = "/v1/tbk/publishSite";
    pub const UPDATE_SITE_SETTING: &str = "/v1/tbk/updateSiteSetting";
    pub const GET_SITE_INFO: &str = "/v1/tbk/getSiteInfo";
    pub const GET_SITE_BAN_COUNT: &str = "/v1/tbk/getSiteBanCount";
    pub const AGENT_CHANGE_DOMAIN: &str = "/v1/agent/changeDomain";
}

/// How [`KuaizhanClient::tbk_site_info`] identifies the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteLookup {
    /// By site ID.
    Id(String),
    /// By bound domain.
    Domain(String),
}

fn params<const N: usize>(pairs: [(&str, &str); N]) -> Params {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}

fn bool_param(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

impl KuaizhanClient {
    // ========================================================================
    // Domains
    // ========================================================================

    /// Get the domain bound to a site.
    ///
    /// POST /v1/tbk/getDomain
    pub async fn tbk_domain(&self, site_id: &str) -> Result<String, KuaizhanError> {
        let data: DomainData = self
            .form_as(paths::GET_DOMAIN, &params([("siteId", site_id)]))
            .await?;
        Ok(data.domain)
    }

    /// Get page/visitor counters for the site behind a domain.
    ///
    /// GET /v1/tbk/getSitePvUv
    pub async fn tbk_site_traffic(&self, domain: &str) -> Result<SiteTraffic, KuaizhanError> {
        self.query_as(paths::GET_SITE_PV_UV, &params([("domain", domain)]))
            .await
    }

    /// Bind a new domain to a site.
    ///
    /// POST /v1/tbk/changeDomain
    pub async fn tbk_change_domain(
        &self,
        site_id: &str,
        domain: &str,
        https_forward: bool,
    ) -> Result<(), KuaizhanError> {
        let params = params([
            ("siteId", site_id),
            ("domain", domain),
            ("httpsForward", bool_param(https_forward)),
        ]);
        self.send_form(paths::CHANGE_DOMAIN, &params).await?;

        tracing::info!(site_id = %site_id, domain = %domain, "Domain changed");
        Ok(())
    }

    /// Turn HTTPS forwarding on or off for a site's domain.
    ///
    /// POST /v1/tbk/changeDomainHttpsForward
    pub async fn tbk_change_domain_https_forward(
        &self,
        site_id: &str,
        domain: &str,
        https_forward: bool,
    ) -> Result<(), KuaizhanError> {
        let params = params([
            ("siteId", site_id),
            ("domain", domain),
            ("httpsForward", bool_param(https_forward)),
        ]);
        self.send_form(paths::CHANGE_DOMAIN_HTTPS_FORWARD, &params)
            .await?;
        Ok(())
    }

    /// Check whether WeChat has banned a domain.
    ///
    /// POST /v1/tbk/checkDomainBan
    pub async fn tbk_check_domain_ban(&self, domain: &str) -> Result<bool, KuaizhanError> {
        let data: DomainBanData = self
            .form_as(paths::CHECK_DOMAIN_BAN, &params([("domain", domain)]))
            .await?;
        Ok(data.is_banned_wx)
    }

    /// Change a customer's domain through the agent API.
    ///
    /// POST /v1/agent/changeDomain
    pub async fn agent_change_domain(
        &self,
        site_id: &str,
        domain: &str,
    ) -> Result<(), KuaizhanError> {
        let params = params([("siteId", site_id), ("domain", domain)]);
        self.send_form(paths::AGENT_CHANGE_DOMAIN, &params).await?;

        tracing::info!(site_id = %site_id, domain = %domain, "Agent domain changed");
        Ok(())
    }

    // ========================================================================
    // Links
    // ========================================================================

    /// Shorten a URL with the Kuaizhan shortener.
    ///
    /// POST /v1/tbk/genKzShortUrl
    pub async fn tbk_gen_kz_short_url(&self, long_url: &str) -> Result<String, KuaizhanError> {
        let data: ShortUrlData = self
            .form_as(paths::GEN_KZ_SHORT_URL, &params([("url", long_url)]))
            .await?;
        Ok(data.short_url)
    }

    /// Shorten a URL with a third-party shortener.
    ///
    /// POST /v1/tbk/genShortUrl
    ///
    /// An empty `url_type` is sent as `default`.
    pub async fn tbk_gen_short_url(
        &self,
        long_url: &str,
        url_type: &str,
    ) -> Result<String, KuaizhanError> {
        let params = params([
            ("url", long_url),
            ("urlType", or_default(url_type, DEFAULT_SHORT_URL_TYPE)),
        ]);
        let data: ShortUrlData = self.form_as(paths::GEN_SHORT_URL, &params).await?;
        Ok(data.short_url)
    }

    /// Resolve a short link back to its original URL.
    ///
    /// GET /v1/tbk/shortUrlRevert
    pub async fn tbk_revert_short_url(
        &self,
        short_url: &str,
    ) -> Result<RevertedShortUrl, KuaizhanError> {
        self.query_as(paths::SHORT_URL_REVERT, &params([("url", short_url)]))
            .await
    }

    /// Create a promotion link from a Taobao password code.
    ///
    /// POST /v1/tbk/genPromoteLink
    pub async fn tbk_gen_promote_link(
        &self,
        site_id: &str,
        code: &str,
        image_url: &str,
    ) -> Result<String, KuaizhanError> {
        let params = params([("siteId", site_id), ("tkl", code), ("image", image_url)]);
        let data: LinkData = self.form_as(paths::GEN_PROMOTE_LINK, &params).await?;
        Ok(data.link)
    }

    // ========================================================================
    // Pages
    // ========================================================================

    /// Replace a page's JavaScript.
    ///
    /// POST /v1/tbk/modifyPageJs
    pub async fn tbk_modify_page_js(
        &self,
        site_id: &str,
        page_id: &str,
        content: &str,
        is_encrypted: bool,
    ) -> Result<(), KuaizhanError> {
        let params = params([
            ("siteId", site_id),
            ("pageId", page_id),
            ("content", content),
            ("isEncryptContent", bool_param(is_encrypted)),
        ]);
        self.send_form(paths::MODIFY_PAGE_JS, &params).await?;
        Ok(())
    }

    /// Publish a page and return its URL.
    ///
    /// POST /v1/tbk/publishPage
    pub async fn tbk_publish_page(
        &self,
        site_id: &str,
        page_id: &str,
    ) -> Result<String, KuaizhanError> {
        let params = params([("siteId", site_id), ("pageId", page_id)]);
        let data: UrlData = self.form_as(paths::PUBLISH_PAGE, &params).await?;

        tracing::info!(site_id = %site_id, page_id = %page_id, url = %data.url, "Page published");
        Ok(data.url)
    }

    /// List the page IDs of a site.
    ///
    /// POST /v1/tbk/getPageIds
    pub async fn tbk_page_ids(&self, site_id: &str) -> Result<Vec<u64>, KuaizhanError> {
        let data: PageIdsData = self
            .form_as(paths::GET_PAGE_IDS, &params([("siteId", site_id)]))
            .await?;
        Ok(data.page_ids)
    }

    /// List the pages of a site with their titles.
    ///
    /// GET /v1/tbk/getPageName
    ///
    /// `data` is a bare array here, not an object.
    pub async fn tbk_page_names(&self, site_id: &str) -> Result<Vec<Page>, KuaizhanError> {
        self.query_as(paths::GET_PAGE_NAME, &params([("siteId", site_id)]))
            .await
    }

    /// Create a page on a fast site and return its ID.
    ///
    /// POST /v1/tbk/createSitePage
    ///
    /// An empty `template` is sent as `WHITE`.
    pub async fn tbk_create_site_page(
        &self,
        site_id: &str,
        template: &str,
    ) -> Result<u64, KuaizhanError> {
        let params = params([
            ("siteId", site_id),
            ("tpl", or_default(template, DEFAULT_PAGE_TEMPLATE)),
        ]);
        let data: PageIdData = self.form_as(paths::CREATE_SITE_PAGE, &params).await?;
        Ok(data.page_id)
    }

    /// Delete a page.
    ///
    /// POST /v1/tbk/deleteSitePage
    pub async fn tbk_delete_site_page(&self, page_id: &str) -> Result<(), KuaizhanError> {
        self.send_form(paths::DELETE_SITE_PAGE, &params([("pageId", page_id)]))
            .await?;

        tracing::info!(page_id = %page_id, "Page deleted");
        Ok(())
    }

    // ========================================================================
    // Sites
    // ========================================================================

    /// List the IDs of every site on the account.
    ///
    /// POST /v1/tbk/getSiteIds
    pub async fn tbk_site_ids(&self) -> Result<Vec<u64>, KuaizhanError> {
        let data: SiteIdsData = self.form_as(paths::GET_SITE_IDS, &Params::new()).await?;
        Ok(data.site_ids)
    }

    /// Create a site.
    ///
    /// POST /v1/tbk/createSite
    ///
    /// An empty `site_type` is sent as `FAST`.
    pub async fn tbk_create_site(
        &self,
        name: &str,
        domain: &str,
        site_type: &str,
    ) -> Result<Site, KuaizhanError> {
        let params = params([
            ("siteName", name),
            ("domain", domain),
            ("siteType", or_default(site_type, DEFAULT_SITE_TYPE)),
        ]);
        let site: Site = self.form_as(paths::CREATE_SITE, &params).await?;

        tracing::info!(site_id = %site.id, domain = %site.domain, "Site created");
        Ok(site)
    }

    /// Publish a site and return its URL.
    ///
    /// POST /v1/tbk/publishSite
    pub async fn tbk_publish_site(&self, site_id: &str) -> Result<String, KuaizhanError> {
        let data: UrlData = self
            .form_as(paths::PUBLISH_SITE, &params([("siteId", site_id)]))
            .await?;
        Ok(data.url)
    }

    /// Rename a site.
    ///
    /// POST /v1/tbk/updateSiteSetting
    pub async fn tbk_update_site_setting(
        &self,
        site_id: &str,
        site_name: &str,
    ) -> Result<(), KuaizhanError> {
        let params = params([("siteId", site_id), ("siteName", site_name)]);
        self.send_form(paths::UPDATE_SITE_SETTING, &params).await?;
        Ok(())
    }

    /// Get a site's details by ID or by domain.
    ///
    /// POST /v1/tbk/getSiteInfo
    ///
    /// An empty lookup value sends no lookup field at all.
    pub async fn tbk_site_info(&self, lookup: &SiteLookup) -> Result<Site, KuaizhanError> {
        let mut params = Params::new();
        match lookup {
            SiteLookup::Id(id) if !id.is_empty() => {
                params.insert("siteId".into(), id.clone());
            }
            SiteLookup::Domain(domain) if !domain.is_empty() => {
                params.insert("siteDomain".into(), domain.clone());
            }
            _ => {}
        }
        self.form_as(paths::GET_SITE_INFO, &params).await
    }

    /// Number of times a site was banned this month.
    ///
    /// POST /v1/tbk/getSiteBanCount
    pub async fn tbk_site_ban_count(&self, site_id: &str) -> Result<u64, KuaizhanError> {
        let data: CountData = self
            .form_as(paths::GET_SITE_BAN_COUNT, &params([("siteId", site_id)]))
            .await?;
        Ok(data.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_helper() {
        let p = params([("siteId", "1"), ("tpl", "")]);
        assert_eq!(p.get("siteId").unwrap(), "1");
        assert_eq!(p.get("tpl").unwrap(), "");
    }

    #[test]
    fn test_or_default() {
        assert_eq!(or_default("", DEFAULT_PAGE_TEMPLATE), "WHITE");
        assert_eq!(or_default("RED", DEFAULT_PAGE_TEMPLATE), "RED");
        assert_eq!(or_default("", DEFAULT_SITE_TYPE), "FAST");
        assert_eq!(or_default("", DEFAULT_SHORT_URL_TYPE), "default");
    }

    #[test]
    fn test_bool_param() {
        assert_eq!(bool_param(true), "true");
        assert_eq!(bool_param(false), "false");
    }
}
