use crate::api::client::DocmostClient;
use crate::api::request::ApiRequest;
use crate::error::ApiError;
use crate::utils::data::extract_items;
use futures::stream::{self, Stream, TryStreamExt};
use log::debug;
use serde_json::Value;
use std::collections::VecDeque;

/// Page size used when the caller does not pick one; matches the server
/// default.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Cursor over a paginated list endpoint.
///
/// Pages are fetched on demand: page 1 on the first pull, each following
/// page only once the previous one is fully consumed. Dropping the cursor
/// cancels the remaining pages; re-listing requires a new cursor (there is
/// no rewind).
pub struct Paginator<'a> {
    client: &'a DocmostClient,
    template: ApiRequest,
    page_size: usize,
    max_items: Option<usize>,
    items_key: String,
    page: u64,
    buffer: VecDeque<Value>,
    yielded: usize,
    done: bool,
}

impl<'a> Paginator<'a> {
    pub fn new(client: &'a DocmostClient, template: ApiRequest, page_size: usize) -> Self {
        Paginator {
            client,
            template,
            page_size,
            max_items: None,
            items_key: "items".to_string(),
            page: 1,
            buffer: VecDeque::new(),
            yielded: 0,
            done: false,
        }
    }

    /// Stop after yielding `limit` items, truncating the final page.
    pub fn with_max_items(mut self, limit: Option<usize>) -> Self {
        self.max_items = limit;
        self
    }

    /// Key the endpoint lists items under when it is not `items`
    /// (`spaces`, `members`, ...).
    pub fn with_items_key(mut self, key: impl Into<String>) -> Self {
        self.items_key = key.into();
        self
    }

    /// Next item in server-provided order. `Ok(None)` once the listing is
    /// exhausted; the first failed page fetch ends the cursor.
    pub async fn try_next(&mut self) -> Result<Option<Value>, ApiError> {
        if self.reached_limit() {
            return Ok(None);
        }
        if self.buffer.is_empty() {
            if self.done {
                return Ok(None);
            }
            self.fetch_page().await?;
        }

        match self.buffer.pop_front() {
            Some(item) => {
                self.yielded += 1;
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    /// Adapt the cursor to a `Stream`. Stops at the first error, like the
    /// cursor itself.
    pub fn into_stream(self) -> impl Stream<Item = Result<Value, ApiError>> + 'a {
        stream::try_unfold(self, |mut paginator| async move {
            let item = paginator.try_next().await?;
            Ok(item.map(|item| (item, paginator)))
        })
    }

    /// Drain every remaining page into a single list.
    pub async fn collect_remaining(self) -> Result<Vec<Value>, ApiError> {
        self.into_stream().try_collect().await
    }

    fn reached_limit(&self) -> bool {
        self.max_items.is_some_and(|limit| self.yielded >= limit)
    }

    async fn fetch_page(&mut self) -> Result<(), ApiError> {
        let request = self.page_request();
        let payload = match self.client.execute(&request).await {
            Ok(payload) => payload,
            Err(error) => {
                self.done = true;
                return Err(error);
            }
        };

        let items = extract_items(&payload, &self.items_key)
            .cloned()
            .unwrap_or_default();
        debug!("page {} returned {} item(s)", self.page, items.len());

        self.done = !has_more(&payload, items.len(), self.page_size);
        self.page += 1;
        self.buffer.extend(items);
        Ok(())
    }

    /// The API carries the cursor in the request body, not the query
    /// string.
    fn page_request(&self) -> ApiRequest {
        self.template.clone().with_paging(self.page, self.page_size)
    }
}

/// The server reports `meta.hasNextPage`; when the field is missing, a full
/// page means there may be more.
fn has_more(payload: &Value, fetched: usize, page_size: usize) -> bool {
    match payload
        .pointer("/meta/hasNextPage")
        .and_then(Value::as_bool)
    {
        Some(flag) => flag,
        None => page_size > 0 && fetched == page_size,
    }
}
