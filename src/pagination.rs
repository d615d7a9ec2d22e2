//! Page-by-page collection of paginated Harvest listings.

use serde_json::Value;

use crate::error::Result;
use crate::response::HarvestResponse;

/// Maximum pages to fetch when walking every page (safety limit).
pub const MAX_PAGES: u32 = 1000;

/// Which pages of a paginated listing to fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Pages 1, 2, 3, ... until an empty page.
    #[default]
    All,
    /// Exactly these pages, in order, stopping early at an empty page.
    Pages(Vec<u32>),
}

impl PageSelection {
    /// The page numbers to request, in order.
    pub fn numbers(&self) -> Box<dyn Iterator<Item = u32> + Send + '_> {
        match self {
            PageSelection::All => Box::new(1..=MAX_PAGES),
            PageSelection::Pages(pages) => Box::new(pages.iter().copied()),
        }
    }
}

impl From<Vec<u32>> for PageSelection {
    fn from(pages: Vec<u32>) -> Self {
        PageSelection::Pages(pages)
    }
}

/// Accumulates the records of consecutive pages.
#[derive(Debug, Default)]
pub struct PageCollector {
    items: Vec<Value>,
    pages: u32,
}

/// What to do after feeding a page to the collector.
#[derive(Debug)]
pub enum PageStep {
    /// Request the next page.
    Continue,
    /// Stop; the listing is complete.
    Done,
    /// Stop and hand this response to the caller unchanged.
    Verbatim(HarvestResponse),
}

impl PageCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one page.
    ///
    /// A page that is not a non-empty JSON array ends the listing. If it is
    /// the very first page and not an array at all, the response itself is
    /// returned so callers can inspect it (e.g. an authentication failure).
    pub fn push(&mut self, response: HarvestResponse) -> PageStep {
        let is_array = response.items().is_some();
        match response {
            HarvestResponse::Json {
                body: Value::Array(items),
                ..
            } if !items.is_empty() => {
                self.items.extend(items);
                self.pages += 1;
                PageStep::Continue
            }
            other if self.pages == 0 && !is_array => PageStep::Verbatim(other),
            _ => PageStep::Done,
        }
    }

    /// Number of non-empty pages collected so far.
    pub fn pages(&self) -> u32 {
        self.pages
    }

    /// All collected records as one JSON array response.
    pub fn finish(self, status: u16) -> HarvestResponse {
        HarvestResponse::Json {
            status,
            body: Value::Array(self.items),
        }
    }
}

/// Fetch pages with `fetch` until the selection is exhausted or a page ends
/// the listing.
pub async fn collect_pages<F, Fut>(selection: &PageSelection, mut fetch: F) -> Result<HarvestResponse>
where
    F: FnMut(u32) -> Fut,
    Fut: std::future::Future<Output = Result<HarvestResponse>>,
{
    let mut collector = PageCollector::new();
    let mut status = 200;
    let mut exhausted = true;

    for page in selection.numbers() {
        let response = fetch(page).await?;
        status = response.status();
        match collector.push(response) {
            PageStep::Continue => {}
            PageStep::Done => {
                exhausted = false;
                break;
            }
            PageStep::Verbatim(response) => return Ok(response),
        }
    }

    if exhausted && *selection == PageSelection::All {
        tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
    }
    tracing::debug!(pages = collector.pages(), "collected paginated listing");

    Ok(collector.finish(status))
}
