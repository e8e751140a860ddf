//! Auto-iteration over paginated service operations
//!
//! A generated cmdlet for a paginated API hands its request, the service, and
//! its output pipeline to an [`AutoIterator`]. Without an explicit starting
//! token, limit, or `-NoAutoIteration` the iterator keeps calling the service
//! until the continuation token runs out. When the caller controls paging
//! exactly one page is fetched and the server's token is returned untouched so
//! the next invocation can resume from it.

use crate::RuntimeError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Boxed error returned by a service call
pub type ServiceError = Box<dyn std::error::Error + Send + Sync>;

/// Request members the iterator drives between calls
pub trait PaginatedRequest {
    fn set_next_token(&mut self, token: Option<String>);

    /// Requests without a page-size member ignore this
    fn set_page_size(&mut self, _size: Option<usize>) {}
}

/// One page of results as returned by the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Continuation token exactly as the service returned it
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_token: Option<&str>) -> Self {
        Self {
            items,
            next_token: next_token.map(str::to_string),
        }
    }

    fn is_last(&self) -> bool {
        self.next_token.as_deref().map_or(true, str::is_empty)
    }
}

/// One network round trip of a paginated operation
pub trait PageService {
    type Request: PaginatedRequest;
    type Item;

    fn fetch_page(&mut self, request: &Self::Request) -> Result<Page<Self::Item>, ServiceError>;
}

/// Output channels of the invoking cmdlet
pub trait PipelineSink<T> {
    fn write_object(&mut self, item: T);

    fn write_error(&mut self, record: ErrorRecord);

    fn write_progress(&mut self, _progress: ProgressRecord) {}
}

/// Non-terminating error written to the pipeline's error channel
#[derive(Debug)]
pub struct ErrorRecord {
    pub error_id: String,
    pub error: RuntimeError,
}

impl ErrorRecord {
    fn page_fetch(page: usize, source: ServiceError) -> Self {
        Self {
            error_id: "PageFetchFailed".to_string(),
            error: RuntimeError::PageFetch { page, source },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    pub activity: String,
    pub status: String,
    pub pages_fetched: usize,
    pub items_emitted: usize,
}

/// Cooperative cancellation, observed between pages
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Paging parameters as bound on one cmdlet invocation
#[derive(Debug, Clone, Default)]
pub struct AutoIterationOptions {
    /// Explicitly bound starting token
    pub start_token: Option<String>,
    /// Explicitly bound limit on emitted items
    pub emit_limit: Option<usize>,
    /// `-NoAutoIteration` switch
    pub no_auto_iteration: bool,
    /// Largest page size the service accepts
    pub page_size_cap: Option<usize>,
    pub cancellation: Option<CancellationFlag>,
}

impl AutoIterationOptions {
    pub fn with_start_token(mut self, token: &str) -> Self {
        self.start_token = Some(token.to_string());
        self
    }

    pub fn with_emit_limit(mut self, limit: usize) -> Self {
        self.emit_limit = Some(limit);
        self
    }

    pub fn with_page_size_cap(mut self, cap: usize) -> Self {
        self.page_size_cap = Some(cap);
        self
    }

    pub fn with_cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancellation = Some(flag);
        self
    }

    /// Binding a token, a limit, or `-NoAutoIteration` disables
    /// auto-continuation
    pub fn user_controls_paging(&self) -> bool {
        self.start_token.is_some() || self.emit_limit.is_some() || self.no_auto_iteration
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationFlag::is_cancelled)
    }
}

/// Why iteration stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationState {
    /// The service returned no further token
    Exhausted,
    /// The emit limit was reached
    LimitReached,
    /// One page was fetched on behalf of a caller that controls paging
    UserControlled,
    Cancelled,
    /// A fetch failed and the error was written to the pipeline
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationSummary {
    pub state: IterationState,
    pub pages_fetched: usize,
    pub items_emitted: usize,
    /// Token returned by the last successful fetch, verbatim
    pub next_token: Option<String>,
}

pub struct AutoIterator<S: PageService> {
    service: S,
    options: AutoIterationOptions,
    activity: String,
}

impl<S: PageService> AutoIterator<S> {
    pub fn new(service: S, options: AutoIterationOptions) -> Self {
        Self {
            service,
            options,
            activity: "Retrieving results".to_string(),
        }
    }

    /// Activity text shown in progress records
    pub fn activity(mut self, activity: &str) -> Self {
        self.activity = activity.to_string();
        self
    }

    pub fn into_service(self) -> S {
        self.service
    }

    /// Drive `request` through the service, streaming each page to `sink`
    pub fn run(
        &mut self,
        mut request: S::Request,
        sink: &mut dyn PipelineSink<S::Item>,
    ) -> IterationSummary {
        let user_paging = self.options.user_controls_paging();
        let limit = self.options.emit_limit;
        let mut token = self.options.start_token.clone();
        let mut summary = IterationSummary {
            state: IterationState::Exhausted,
            pages_fetched: 0,
            items_emitted: 0,
            next_token: None,
        };

        loop {
            if self.options.is_cancelled() {
                summary.state = IterationState::Cancelled;
                return summary;
            }

            request.set_next_token(token.take());
            request.set_page_size(self.page_size(summary.items_emitted));

            let page = match self.service.fetch_page(&request) {
                Ok(page) => page,
                Err(source) => {
                    sink.write_error(ErrorRecord::page_fetch(summary.pages_fetched + 1, source));
                    summary.state = IterationState::Failed;
                    return summary;
                }
            };
            summary.pages_fetched += 1;

            let is_last = page.is_last();
            for item in page.items {
                if limit.is_some_and(|l| summary.items_emitted >= l) {
                    break;
                }
                sink.write_object(item);
                summary.items_emitted += 1;
            }
            summary.next_token = page.next_token;

            if !user_paging {
                sink.write_progress(ProgressRecord {
                    activity: self.activity.clone(),
                    status: format!("Retrieved {} records", summary.items_emitted),
                    pages_fetched: summary.pages_fetched,
                    items_emitted: summary.items_emitted,
                });
            }

            summary.state = if is_last {
                IterationState::Exhausted
            } else if limit.is_some_and(|l| summary.items_emitted >= l) {
                IterationState::LimitReached
            } else if user_paging {
                IterationState::UserControlled
            } else {
                token = summary.next_token.clone();
                continue;
            };
            return summary;
        }
    }

    /// Page size for the next call: what remains of the limit, bounded by the
    /// service cap
    fn page_size(&self, emitted: usize) -> Option<usize> {
        let remaining = self
            .options
            .emit_limit
            .map(|limit| limit.saturating_sub(emitted));
        match (remaining, self.options.page_size_cap) {
            (Some(remaining), Some(cap)) => Some(remaining.min(cap)),
            (Some(remaining), None) => Some(remaining),
            (None, cap) => cap,
        }
    }
}
