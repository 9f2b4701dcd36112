//! Collection pagination.

use paddock_core::{Collection, Record};
use paddock_extract::Request;
use std::fmt;
use std::sync::Arc;

/// Default offset query parameter.
pub const DEFAULT_OFFSET_PARAM: &str = "offset";
/// Default results-per-page query parameter.
pub const DEFAULT_RESULTS_PARAM: &str = "results";
/// Default page size.
pub const DEFAULT_RESULTS: usize = 25;
/// Default page size ceiling.
pub const DEFAULT_MAX_RESULTS: usize = 50;

/// How a resource slices collections into pages.
///
/// # Example
///
/// ```rust
/// use paddock_core::RecordSet;
/// use paddock_extract::Request;
/// use paddock_resource::PageConfig;
///
/// let config = PageConfig::new().with_default_results(10).with_max_results(20);
/// let request = Request::builder().uri("/books/?offset=5&results=100").build();
///
/// let (page, echo) = config.select(&request, &RecordSet::new());
/// assert_eq!(page.offset(), 5);
/// assert_eq!(page.results(), 20);
/// assert!(page.is_empty());
/// assert_eq!(echo[1], ("results".to_string(), "20".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageConfig {
    offset_param: String,
    results_param: String,
    default_results: usize,
    max_results: usize,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            offset_param: DEFAULT_OFFSET_PARAM.to_string(),
            results_param: DEFAULT_RESULTS_PARAM.to_string(),
            default_results: DEFAULT_RESULTS,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl PageConfig {
    /// Creates the default configuration: `offset`, `results`, 25 per page, at most 50.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the offset query parameter name.
    #[must_use]
    pub fn with_offset_param(mut self, name: impl Into<String>) -> Self {
        self.offset_param = name.into();
        self
    }

    /// Sets the results-per-page query parameter name.
    #[must_use]
    pub fn with_results_param(mut self, name: impl Into<String>) -> Self {
        self.results_param = name.into();
        self
    }

    /// Sets the page size used when the request does not choose one.
    #[must_use]
    pub fn with_default_results(mut self, results: usize) -> Self {
        self.default_results = results;
        self
    }

    /// Sets the page size ceiling.
    #[must_use]
    pub fn with_max_results(mut self, results: usize) -> Self {
        self.max_results = results;
        self
    }

    /// Returns the offset query parameter name.
    #[must_use]
    pub fn offset_param(&self) -> &str {
        &self.offset_param
    }

    /// Returns the results query parameter name.
    #[must_use]
    pub fn results_param(&self) -> &str {
        &self.results_param
    }

    /// Returns the default page size.
    #[must_use]
    pub fn default_results(&self) -> usize {
        self.default_results
    }

    /// Returns the page size ceiling.
    #[must_use]
    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Selects the page a request asks for.
    ///
    /// Unparsable or negative values fall back to the defaults, a page size
    /// of zero uses the default and sizes above the ceiling are clamped. The
    /// second value holds the effective offset and page size, keyed by their
    /// parameter names.
    pub fn select(
        &self,
        request: &Request,
        collection: &dyn Collection,
    ) -> (Page, Vec<(String, String)>) {
        let offset = parse_count(request.query(&self.offset_param)).unwrap_or(0);
        let results = match parse_count(request.query(&self.results_param)) {
            None | Some(0) => self.default_results,
            Some(results) => results.min(self.max_results),
        };

        let records = collection.slice(offset, offset.saturating_add(results));
        let page = Page {
            records,
            offset,
            results,
            offset_param: self.offset_param.clone(),
            results_param: self.results_param.clone(),
        };
        let echo = vec![
            (self.offset_param.clone(), offset.to_string()),
            (self.results_param.clone(), results.to_string()),
        ];
        (page, echo)
    }
}

fn parse_count(value: Option<&str>) -> Option<usize> {
    value.and_then(|v| v.trim().parse().ok())
}

/// One page of a collection.
#[derive(Clone)]
pub struct Page {
    records: Vec<Arc<dyn Record>>,
    offset: usize,
    results: usize,
    offset_param: String,
    results_param: String,
}

impl Page {
    /// Returns the records on this page.
    #[must_use]
    pub fn records(&self) -> &[Arc<dyn Record>] {
        &self.records
    }

    /// Returns the effective offset.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the effective page size.
    #[must_use]
    pub fn results(&self) -> usize {
        self.results
    }

    /// Returns the number of records on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the page holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the offset query parameter name.
    #[must_use]
    pub fn offset_param(&self) -> &str {
        &self.offset_param
    }

    /// Returns the results query parameter name.
    #[must_use]
    pub fn results_param(&self) -> &str {
        &self.results_param
    }

    /// Offset of the following page, if the collection extends past this one.
    #[must_use]
    pub fn next_offset(&self, total: usize) -> Option<usize> {
        let next = self.offset.saturating_add(self.results);
        (next < total).then_some(next)
    }

    /// Offset of the preceding page, if this one does not start at zero.
    #[must_use]
    pub fn previous_offset(&self) -> Option<usize> {
        (self.offset > 0).then(|| self.offset.saturating_sub(self.results))
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("offset", &self.offset)
            .field("results", &self.results)
            .field("len", &self.records.len())
            .finish()
    }
}
