//! The transaction fetch coordinator.
//!
//! [TransactionFetcher] owns everything the transaction list view needs:
//! the accumulated result list, the in-flight fetch intent, the last error,
//! and the next-page cursor. Consumers read snapshots and invoke triggers;
//! no external mutation path exists.
//!
//! Overlapping fetches are resolved with a request generation number: every
//! issued fetch is tagged at issue time, and a completion is applied only
//! if its generation is still the latest issued. A response that arrives
//! for superseded parameters is discarded without touching any state.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::sync::Notify;

use crate::{
    client::TransactionSource,
    debounce::Debouncer,
    pagination::{PageQuery, SORT_NEWEST_FIRST},
    transaction::{Transaction, TransactionType},
};

/// The number of transactions requested per page.
pub const PAGE_SIZE: u32 = 10;

/// How long merchant search input must be quiet before a fetch fires.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// The kind of network operation a [TransactionFetcher] has in flight.
///
/// Idle is represented as the absence of a state (`None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    /// Loading page 1 for the current filters, replacing the list.
    InitialFetch,
    /// Loading the next page, appending to the list.
    FetchMore,
    /// Reloading page 1 after an explicit refresh, replacing the list.
    Refreshing,
}

/// The filters fetches are issued with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchParams {
    /// Only fetch transactions of this type. `None` fetches all types.
    pub type_filter: Option<TransactionType>,
    /// Only fetch transactions whose merchant contains this substring.
    pub merchant: Option<String>,
}

struct FetcherState {
    params: FetchParams,
    transactions: Vec<Transaction>,
    fetch_state: Option<FetchState>,
    error: Option<String>,
    next_page: Option<u32>,
    generation: u64,
}

/// Coordinates paginated transaction fetches against a [TransactionSource].
///
/// Cloning is cheap and yields a handle to the same shared state, which is
/// how the debounce timer and the fire-and-forget triggers keep working
/// after the original handle moves on.
#[derive(Clone)]
pub struct TransactionFetcher {
    source: Arc<dyn TransactionSource>,
    state: Arc<Mutex<FetcherState>>,
    debouncer: Debouncer,
    notify: Arc<Notify>,
}

impl TransactionFetcher {
    /// Create a fetcher and start loading the first page.
    ///
    /// The loading state is [FetchState::InitialFetch] from the moment of
    /// construction. The first fetch is issued immediately, unless a
    /// merchant filter was supplied, in which case it is debounced like any
    /// other search input.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(source: Arc<dyn TransactionSource>, params: FetchParams) -> Self {
        let debounce_first_fetch = params.merchant.is_some();

        let fetcher = Self {
            source,
            state: Arc::new(Mutex::new(FetcherState {
                params,
                transactions: Vec::new(),
                fetch_state: Some(FetchState::InitialFetch),
                error: None,
                next_page: None,
                generation: 0,
            })),
            debouncer: Debouncer::new(DEBOUNCE_DELAY),
            notify: Arc::new(Notify::new()),
        };

        if debounce_first_fetch {
            fetcher.search_with_debounce();
        } else {
            let task = fetcher.clone();
            tokio::spawn(async move {
                task.fetch_page(1, FetchState::InitialFetch).await;
            });
        }

        fetcher
    }

    /// A snapshot of the accumulated result list.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.lock_state().transactions.clone()
    }

    /// The operation currently in flight, or `None` when idle.
    pub fn fetch_state(&self) -> Option<FetchState> {
        self.lock_state().fetch_state
    }

    /// The message of the most recent failed fetch, cleared whenever a new
    /// fetch starts.
    pub fn error(&self) -> Option<String> {
        self.lock_state().error.clone()
    }

    /// Whether a next-page cursor exists, i.e. whether [Self::load_more]
    /// would do anything.
    pub fn has_next_page(&self) -> bool {
        self.lock_state().next_page.is_some()
    }

    /// Fetch the page behind the next-page cursor and append it to the
    /// list.
    ///
    /// Guarded: this is a no-op while another fetch is in flight (no
    /// duplicate concurrent page fetches) and when no cursor is present
    /// (no fetching past the last page).
    pub async fn load_more(&self) {
        let next_page = {
            let state = self.lock_state();
            match (state.fetch_state, state.next_page) {
                (None, Some(page)) => page,
                _ => return,
            }
        };

        self.fetch_page(next_page, FetchState::FetchMore).await;
    }

    /// Clear the cursor and reload page 1, replacing the list on success.
    ///
    /// Unlike [Self::load_more] this is not blocked by an in-flight fetch;
    /// the refresh supersedes it and the older response is discarded on
    /// arrival.
    pub async fn refresh(&self) {
        self.lock_state().next_page = None;
        self.fetch_page(1, FetchState::Refreshing).await;
    }

    /// Clear the cursor and schedule a debounced fetch of page 1 with the
    /// current filters.
    ///
    /// Repeated calls within the debounce window supersede each other;
    /// only the last one fires.
    pub fn search_with_debounce(&self) {
        self.lock_state().next_page = None;

        let task = self.clone();
        self.debouncer.call(async move {
            task.fetch_page(1, FetchState::InitialFetch).await;
        });
    }

    /// Replace the type filter, then immediately reload page 1.
    ///
    /// Filter taps are deliberate, so unlike merchant text they are not
    /// debounced.
    pub fn set_type_filter(&self, type_filter: Option<TransactionType>) {
        {
            let mut state = self.lock_state();
            state.params.type_filter = type_filter;
            state.next_page = None;
            state.fetch_state = Some(FetchState::InitialFetch);
        }

        let task = self.clone();
        tokio::spawn(async move {
            task.fetch_page(1, FetchState::InitialFetch).await;
        });
    }

    /// Replace the merchant search text and schedule a debounced fetch.
    ///
    /// `None` clears the search; an empty string is passed through to the
    /// API as an empty substring match.
    pub fn set_merchant(&self, merchant: Option<String>) {
        self.lock_state().params.merchant = merchant;
        self.search_with_debounce();
    }

    /// Fetch `page` with the given intent, immediately and undebounced.
    ///
    /// This is the single code path every trigger funnels through, and is
    /// public for retry-from-error flows. The intent is set and the
    /// previous error cleared before the request is issued, so a loading
    /// affordance can show right away. On success a [FetchState::FetchMore]
    /// response is appended and any other intent replaces the list; on
    /// failure the message is stored and the list is left untouched. Either
    /// way the fetcher returns to idle, unless the fetch was superseded
    /// while in flight, in which case the completion is discarded outright.
    pub async fn fetch_page(&self, page: u32, intent: FetchState) {
        let (generation, query) = {
            let mut state = self.lock_state();
            state.generation += 1;
            state.fetch_state = Some(intent);
            state.error = None;

            let query = PageQuery {
                page,
                per_page: PAGE_SIZE,
                sort: SORT_NEWEST_FIRST,
                type_filter: state.params.type_filter,
                merchant: state.params.merchant.clone(),
            };

            (state.generation, query)
        };
        self.notify.notify_waiters();

        let result = self.source.get_transactions(&query).await;

        {
            let mut state = self.lock_state();
            if state.generation != generation {
                tracing::debug!("discarding stale response for page {page}");
                return;
            }

            match result {
                Ok(response) => {
                    if intent == FetchState::FetchMore {
                        state.transactions.extend(response.data);
                    } else {
                        state.transactions = response.data;
                    }
                    state.next_page = response.next;
                }
                Err(error) => {
                    tracing::warn!("fetch for page {page} failed: {error}");
                    state.error = Some(format!("fetch failed: {error}"));
                }
            }

            state.fetch_state = None;
        }
        self.notify.notify_waiters();
    }

    /// Wait until no fetch is in flight.
    ///
    /// This is the completion signal consumers use to re-read snapshots
    /// after a trigger. Returns immediately when already idle.
    pub async fn wait_until_idle(&self) {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.lock_state().fetch_state.is_none() {
                return;
            }

            notified.await;
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, FetcherState> {
        // A poisoned lock means a panic while holding it; the state itself
        // is still usable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
