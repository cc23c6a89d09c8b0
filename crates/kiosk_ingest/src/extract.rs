use async_trait::async_trait;
use kiosk_core::{ArticleExtractor, Error, Result};
use scraper::{Html, Selector};
use tracing::debug;

/// Sub-headings shorter than this are treated as decoration.
const MIN_HEADING_LEN: usize = 5;
/// Paragraphs at or below this length are assumed to be boilerplate
/// (nav links, captions, ads) and dropped. This floor is the sole
/// noise filter.
const MIN_PARAGRAPH_LEN: usize = 50;

/// A realistic browser user agent reduces the odds of being blocked by the
/// scraped sites. Best effort only.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Reduces an article page to its headline, qualifying sub-headings and
/// qualifying paragraphs, joined by single spaces.
pub struct HttpExtractor {
    client: reqwest::Client,
}

impl HttpExtractor {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ArticleExtractor for HttpExtractor {
    async fn extract(&self, url: &str) -> Result<String> {
        // `send` does not fail on HTTP status codes; without this check an
        // error page's own markup would pass for article content.
        let html = self
            .client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let text = extract_content(&html);
        if text.is_empty() {
            return Err(Error::Extraction(format!("no content at {}", url)));
        }
        debug!(url, chars = text.len(), "extracted article");
        Ok(text)
    }
}

/// Applies the extraction policy to raw HTML. Pure; the document is parsed
/// and dropped before any await point.
pub fn extract_content(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut blocks: Vec<String> = Vec::new();

    let headline = document
        .select(&Selector::parse("h1").unwrap())
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();
    if !headline.is_empty() {
        blocks.push(headline);
    }

    for el in document.select(&Selector::parse("h2, h3").unwrap()) {
        let text = el.text().collect::<String>().trim().to_string();
        if text.chars().count() > MIN_HEADING_LEN {
            blocks.push(text);
        }
    }

    for el in document.select(&Selector::parse("p").unwrap()) {
        let text = el.text().collect::<String>().trim().to_string();
        if text.chars().count() > MIN_PARAGRAPH_LEN {
            blocks.push(text);
        }
    }

    blocks.join(" ")
}
