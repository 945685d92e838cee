//! Generic list synchronizer: one canonical collection per resource plus a
//! derived, filtered view.
//!
//! The collection is replaced wholesale on every reload; the view is fully
//! recomputed whenever the collection, search text, or status filter
//! changes. Reloads carry a monotonic sequence number so a slow response
//! can never overwrite a newer one.

/// Filter predicates a resource record must answer.
///
/// `matches_query` receives the needle already lowercased and non-empty;
/// implementations compare against their designated text fields, also
/// lowercased. `matches_status` is only consulted when the filter is not
/// [`StatusFilter::All`].
pub trait ListRecord: Clone {
    fn id(&self) -> &str;
    fn matches_query(&self, needle: &str) -> bool;
    fn matches_status(&self, status: &str) -> bool;
}

/// Status selector: `All` bypasses the status predicate entirely.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(String),
}

impl StatusFilter {
    /// Parse a selector value, treating `"all"` as the bypass.
    pub fn from_value(value: &str) -> Self {
        if value == "all" {
            StatusFilter::All
        } else {
            StatusFilter::Only(value.to_string())
        }
    }
}

/// Ticket identifying one in-flight reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug)]
pub struct Synchronizer<R: ListRecord> {
    records: Vec<R>,
    view: Vec<R>,
    query: String,
    status: StatusFilter,
    loading: bool,
    issued: u64,
}

impl<R: ListRecord> Default for Synchronizer<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ListRecord> Synchronizer<R> {
    /// Starts in the loading state so a first render shows a spinner
    /// rather than an empty list.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            view: Vec::new(),
            query: String::new(),
            status: StatusFilter::All,
            loading: true,
            issued: 0,
        }
    }

    /// Register a new reload. Later tickets always win over earlier ones.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        self.loading = true;
        LoadTicket(self.issued)
    }

    /// Apply a reload response. Returns false (and changes nothing) when a
    /// newer reload was issued after this one; the stale response is
    /// discarded.
    pub fn finish_load(&mut self, ticket: LoadTicket, rows: Vec<R>) -> bool {
        if ticket.0 != self.issued {
            return false;
        }
        self.records = rows;
        self.loading = false;
        self.refilter();
        true
    }

    /// Record a reload failure. The collection is left untouched; the
    /// loading flag clears only for the latest ticket so an older failure
    /// cannot hide a newer in-flight request.
    pub fn fail_load(&mut self, ticket: LoadTicket) {
        if ticket.0 == self.issued {
            self.loading = false;
        }
    }

    /// Update the free-text search. Setting the same value again is a
    /// no-op; otherwise the view recomputes synchronously.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.query {
            return;
        }
        self.query = query;
        self.refilter();
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        if status == self.status {
            return;
        }
        self.status = status;
        self.refilter();
    }

    /// The filtered, ordered subsequence currently visible.
    pub fn view(&self) -> &[R] {
        &self.view
    }

    /// The full server-confirmed collection.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn status_filter(&self) -> &StatusFilter {
        &self.status
    }

    fn refilter(&mut self) {
        let needle = self.query.trim().to_lowercase();
        self.view = self
            .records
            .iter()
            .filter(|record| {
                let by_query = needle.is_empty() || record.matches_query(&needle);
                let by_status = match &self.status {
                    StatusFilter::All => true,
                    StatusFilter::Only(status) => record.matches_status(status),
                };
                by_query && by_status
            })
            .cloned()
            .collect();
    }
}
