use clap::{Parser, Subcommand};
use kuaizhan::{
    ApiCredentials, Endpoint, KuaizhanClient, KuaizhanError, PayloadDecoding, SiteLookup,
    TransportConfig,
};
use serde_json::{json, Value};
use tracing::info;

/// Query and manage Kuaizhan sites from the command line.
///
/// Credentials are read from KUAIZHAN_APP_KEY and KUAIZHAN_APP_SECRET
/// (a `.env` file is honored).
#[derive(Parser, Debug)]
#[command(name = "kz", author, version, about)]
struct Cli {
    /// Trace every request and response body
    #[arg(long, global = true)]
    debug: bool,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    insecure: bool,

    /// Fail when a payload does not match the expected shape
    #[arg(long, global = true)]
    strict: bool,

    /// Base URL, or "production"
    #[arg(long, global = true, env = "KUAIZHAN_ENDPOINT")]
    endpoint: Option<Endpoint>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the domain bound to a site
    Domain { site_id: String },
    /// Show page and visitor counts for a domain
    Traffic { domain: String },
    /// Shorten a URL
    ShortUrl {
        url: String,
        /// Use the Kuaizhan shortener instead of a third-party one
        #[arg(long)]
        kz: bool,
        /// Third-party shortener type
        #[arg(long, default_value = "")]
        url_type: String,
    },
    /// Resolve a short link
    Revert { short_url: String },
    /// List site IDs on the account
    SiteIds,
    /// List page IDs of a site
    PageIds { site_id: String },
    /// List pages of a site with their titles
    Pages { site_id: String },
    /// Show site details
    SiteInfo {
        /// Look up by site ID
        #[arg(long, conflicts_with = "domain", required_unless_present = "domain")]
        id: Option<String>,
        /// Look up by bound domain
        #[arg(long)]
        domain: Option<String>,
    },
    /// Show how often a site was banned this month
    BanCount { site_id: String },
    /// Check whether WeChat has banned a domain
    CheckBan { domain: String },
    /// Publish a site
    PublishSite { site_id: String },
}

impl Cli {
    fn client(&self) -> Result<KuaizhanClient, KuaizhanError> {
        let credentials = ApiCredentials::from_env()?;
        let transport = TransportConfig::from_env();
        let transport = if self.insecure {
            transport.with_accept_invalid_certs(true)
        } else {
            transport
        };
        let decoding = if self.strict {
            PayloadDecoding::Strict
        } else {
            PayloadDecoding::Lenient
        };

        KuaizhanClient::builder(credentials)
            .endpoint(self.endpoint.clone().unwrap_or_default())
            .transport(transport)
            .debug(self.debug)
            .payload_decoding(decoding)
            .build()
    }
}

async fn run(client: &KuaizhanClient, command: Command) -> Result<Value, KuaizhanError> {
    let value = match command {
        Command::Domain { site_id } => {
            let domain = client.tbk_domain(&site_id).await?;
            json!({ "domain": domain })
        }
        Command::Traffic { domain } => to_json(client.tbk_site_traffic(&domain).await?)?,
        Command::ShortUrl { url, kz, url_type } => {
            let short = if kz {
                client.tbk_gen_kz_short_url(&url).await?
            } else {
                client.tbk_gen_short_url(&url, &url_type).await?
            };
            json!({ "shortUrl": short })
        }
        Command::Revert { short_url } => to_json(client.tbk_revert_short_url(&short_url).await?)?,
        Command::SiteIds => {
            let ids = client.tbk_site_ids().await?;
            json!({ "siteIds": ids })
        }
        Command::PageIds { site_id } => {
            let ids = client.tbk_page_ids(&site_id).await?;
            json!({ "pageIds": ids })
        }
        Command::Pages { site_id } => to_json(client.tbk_page_names(&site_id).await?)?,
        Command::SiteInfo { id, domain } => {
            let lookup = match (id, domain) {
                (Some(id), _) => SiteLookup::Id(id),
                (None, Some(domain)) => SiteLookup::Domain(domain),
                (None, None) => SiteLookup::Id(String::new()),
            };
            to_json(client.tbk_site_info(&lookup).await?)?
        }
        Command::BanCount { site_id } => {
            let count = client.tbk_site_ban_count(&site_id).await?;
            json!({ "count": count })
        }
        Command::CheckBan { domain } => {
            let banned = client.tbk_check_domain_ban(&domain).await?;
            json!({ "isBannedWX": banned })
        }
        Command::PublishSite { site_id } => {
            let url = client.tbk_publish_site(&site_id).await?;
            json!({ "url": url })
        }
    };
    Ok(value)
}

fn to_json<T: serde::Serialize>(value: T) -> Result<Value, KuaizhanError> {
    serde_json::to_value(value).map_err(KuaizhanError::Decode)
}

#[tokio::main]
async fn main() {
    common::init_logging();

    let cli = Cli::parse();

    let client = match cli.client() {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create client");
            std::process::exit(2);
        }
    };

    info!(endpoint = %client.endpoint(), "Using Kuaizhan endpoint");

    match run(&client, cli.command).await {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                tracing::error!(error = %e, "Failed to render result");
                std::process::exit(1);
            }
        },
        Err(e) => {
            tracing::error!(error = %e, "Request failed");
            std::process::exit(1);
        }
    }
}
