//! MCP (Model Context Protocol) tool surface
//!
//! Exposes the two scraping operations over MCP. Both tools return a single
//! text payload: a pretty-printed JSON array of listing records, a formatted
//! multi-section summary, or a plain-text error sentence. Callers distinguish
//! success from failure by parsing the text; nothing that happens inside a
//! tool call is fatal to the server.

use rmcp::{
    ErrorData as McpError, ServiceExt,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    transport::stdio,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::warn;

use crate::fetcher::PageFetcher;
use crate::pagination::scrape_search;
use crate::query::{DateKind, SearchQuery, normalize_date};
use crate::site::Site;
use crate::summary::summarize_listing;

/// Returned when a search produced zero deduplicated records
pub const NO_LISTINGS_MESSAGE: &str =
    "No listings found for the given criteria, or the scraper was blocked.";

/// Arguments for the `search_listings` tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchListingsArgs {
    /// Location name, in English (e.g. "Hong Kong")
    pub place: String,
    /// Check-in date in YYYY-MM-DD format
    pub checkin_date: String,
    /// Check-out date in YYYY-MM-DD format
    pub checkout_date: String,
    /// Number of adults (default: 1)
    pub adults: Option<u32>,
    /// Number of children (default: 0)
    pub children: Option<u32>,
    /// Number of infants (default: 0)
    pub infants: Option<u32>,
    /// Number of pets (default: 0)
    pub pets: Option<u32>,
    /// Maximum price per night (default: 1000)
    pub price_max: Option<u32>,
    /// Maximum number of result pages to scrape (default: 3)
    pub max_pages: Option<usize>,
}

/// Arguments for the `summarize_listing` tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SummarizeListingArgs {
    /// Listing URL, optionally carrying check_in/check_out/guests/adults
    /// query parameters used as display context
    pub url: String,
    /// Number of fetch attempts before giving up (default: 3)
    pub max_retries: Option<u32>,
}

/// MCP server exposing the listing-scrape tools
#[derive(Clone)]
pub struct StayScrapeServer {
    tool_router: ToolRouter<Self>,
    fetcher: PageFetcher,
    site: Site,
}

fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

#[tool_router]
impl StayScrapeServer {
    /// Build a server against the production site
    pub fn new() -> Result<Self, McpError> {
        Self::with_site(Site::default())
    }

    /// Build a server against an arbitrary site base (used by tests)
    pub fn with_site(site: Site) -> Result<Self, McpError> {
        Ok(Self {
            tool_router: Self::tool_router(),
            fetcher: PageFetcher::new()
                .map_err(|e| McpError::internal_error(e.to_string(), None))?,
            site,
        })
    }

    #[tool(
        description = "Scrape travel listings for a place and date range. Returns a pretty-printed JSON array of listing records with price, host, rating, coordinates, room counts, amenities and location, or a plain-text message when nothing was found."
    )]
    pub async fn search_listings(
        &self,
        params: Parameters<SearchListingsArgs>,
    ) -> Result<CallToolResult, McpError> {
        let args = params.0;

        let checkin = match normalize_date(&args.checkin_date, DateKind::CheckIn) {
            Ok(date) => date,
            Err(message) => return Ok(text_result(message)),
        };
        let checkout = match normalize_date(&args.checkout_date, DateKind::CheckOut) {
            Ok(date) => date,
            Err(message) => return Ok(text_result(message)),
        };

        let query = SearchQuery {
            place: args.place,
            checkin,
            checkout,
            adults: args.adults.unwrap_or(1),
            children: args.children.unwrap_or(0),
            infants: args.infants.unwrap_or(0),
            pets: args.pets.unwrap_or(0),
            price_max: args.price_max.unwrap_or(1000),
            max_pages: args.max_pages.unwrap_or(3),
        };

        let records = scrape_search(&self.fetcher, &self.site, &query).await;
        if records.is_empty() {
            warn!("No listings found for the given criteria, or the scraper was blocked.");
            return Ok(text_result(NO_LISTINGS_MESSAGE));
        }

        // serde_json leaves non-ASCII characters unescaped, matching the
        // output contract.
        let json = serde_json::to_string_pretty(&records)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(text_result(json))
    }

    #[tool(
        description = "Scrape one listing URL and return a structured text summary of its description, location, host, ratings, house rules, prices and images."
    )]
    pub async fn summarize_listing(
        &self,
        params: Parameters<SummarizeListingArgs>,
    ) -> Result<CallToolResult, McpError> {
        let args = params.0;
        let max_retries = args.max_retries.unwrap_or(3);
        let summary = summarize_listing(&self.fetcher, &args.url, max_retries).await;
        Ok(text_result(summary))
    }
}

#[tool_handler]
impl rmcp::ServerHandler for StayScrapeServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Travel-listing scraper. search_listings walks paginated search results and \
                 enriches each listing from its detail page; summarize_listing renders one \
                 listing page as a text summary. Results are best-effort: blocked or \
                 malformed pages degrade to partial records, not errors."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Serve the tools over stdio until the client disconnects
pub async fn serve_stdio() -> Result<(), McpError> {
    let server = StayScrapeServer::new()?;
    let running = server
        .serve(stdio())
        .await
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    running
        .waiting()
        .await
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(())
}
