//! Cursor over the pages of one annotation store search session.
//!
//! The store is known to occasionally drop the `next` link from a page that
//! is not the last one. A page with records but no link is therefore read a
//! second time before the cursor concludes the results are exhausted.

use std::collections::VecDeque;
use std::sync::Arc;

use futures::Stream;
use tracing::{debug, info, trace};

use annotation_indexer_repository::{AnnotationStore, ResultPage, SearchSession, StoreError};
use annotation_indexer_shared::{Query, Record};

/// Token of the first page of every session.
pub const FIRST_PAGE: &str = "0";

/// Lazily yields the records of one search session, page by page.
///
/// # Example
///
/// ```ignore
/// let mut cursor = PagedResultCursor::open(store, &query).await?;
/// while let Some(record) = cursor.next().await? {
///     // ...
/// }
/// ```
pub struct PagedResultCursor {
    store: Arc<dyn AnnotationStore>,
    session: SearchSession,
    /// Token of the next page to read; `None` once the results are exhausted.
    next_page: Option<String>,
    buffer: VecDeque<Record>,
    hits: Option<u64>,
    forced_first_page: bool,
}

impl PagedResultCursor {
    /// Open a search session for `query`. No page is read yet.
    pub async fn open(store: Arc<dyn AnnotationStore>, query: &Query) -> Result<Self, StoreError> {
        let session = store.open_search(query).await?;
        debug!(search_id = %session.id, "Opened result cursor");

        Ok(Self {
            store,
            session,
            next_page: Some(FIRST_PAGE.to_string()),
            buffer: VecDeque::new(),
            hits: None,
            forced_first_page: false,
        })
    }

    /// The next record, or `None` once the results are exhausted.
    ///
    /// Records are yielded in store order; pages are only read when the
    /// records of the previous page have been consumed.
    pub async fn next(&mut self) -> Result<Option<Record>, StoreError> {
        loop {
            if let Some(record) = self.buffer.pop_front() {
                return Ok(Some(record));
            }

            let Some(token) = self.next_page.take() else {
                return Ok(None);
            };
            self.read_page(&token).await?;
        }
    }

    /// Read the page at `token`, buffering its records and deciding which page
    /// comes next.
    async fn read_page(&mut self, token: &str) -> Result<(), StoreError> {
        let mut page = self.store.read_page(&self.session, token).await?;

        if !page.has_next() {
            if page.is_empty() {
                trace!(search_id = %self.session.id, page = %token, "Reached end of results");
                return Ok(());
            }
            page = self.confirm_last_page(token, page).await?;
        }

        self.next_page = page.next_page();
        if page.has_next() && self.next_page.is_none() {
            debug!(
                search_id = %self.session.id,
                next = ?page.next,
                "Continuation link lacks a page parameter, stopping after this page"
            );
        }

        self.buffer.extend(page.take_items());
        Ok(())
    }

    /// A page with records but no continuation link may be truncated. Read
    /// it once more: an identical record count means it really is the last
    /// page, otherwise the second answer replaces the first.
    async fn confirm_last_page(
        &self,
        token: &str,
        page: ResultPage,
    ) -> Result<ResultPage, StoreError> {
        let retried = self.store.read_page(&self.session, token).await?;

        if retried.len() == page.len() {
            trace!(
                search_id = %self.session.id,
                page = %token,
                items = page.len(),
                "Confirmed last page"
            );
            return Ok(page);
        }

        info!(
            search_id = %self.session.id,
            page = %token,
            first = page.len(),
            retried = retried.len(),
            has_next = retried.has_next(),
            "Recovered from a page without continuation link"
        );
        Ok(retried)
    }

    /// Total number of hits of the session, when the store can tell.
    ///
    /// Some stores only compute the count once a page has been requested, so
    /// an unknown count triggers one read of the first page followed by a
    /// second lookup. The result is cached.
    pub async fn hits(&mut self) -> Result<Option<u64>, StoreError> {
        if self.hits.is_none() {
            self.hits = self.store.read_session_info(&self.session).await?.hits;
        }

        if self.hits.is_none() && !self.forced_first_page {
            self.forced_first_page = true;
            debug!(search_id = %self.session.id, "Hit count unknown, requesting first page");
            self.store.read_page(&self.session, FIRST_PAGE).await?;
            self.hits = self.store.read_session_info(&self.session).await?.hits;
        }

        Ok(self.hits)
    }

    /// Turn the cursor into a stream of records.
    pub fn into_stream(self) -> impl Stream<Item = Result<Record, StoreError>> + Send {
        let mut cursor = self;
        async_stream::try_stream! {
            while let Some(record) = cursor.next().await? {
                yield record;
            }
        }
    }
}
