//! Catalog filter controller
//!
//! One task owns the criteria, the product list and the fetch state, and
//! handles one event at a time: a batch of view commands, the price
//! debounce deadline, or a fetch completion.
//!
//! Commands sent together through [`CatalogHandle::batch`] are applied as
//! one turn, so a burst that ends where it started issues no fetch on any
//! runtime flavor.
//!
//! Every fetch carries a sequence number. Only the completion matching the
//! latest issued sequence is applied; superseded requests may still finish
//! but their results are dropped.

use std::sync::Arc;

use rust_decimal::Decimal;
use shared::{Category, ProductQuery, ProductSummary};
use shop_client::config::DEFAULT_PRODUCT_LIMIT;
use shop_client::{CatalogApi, ClientError, ClientResult};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use crate::criteria::{FilterCriteria, PriceBound, SortDirection, SortKey, SortOption};
use crate::debounce::{PRICE_DEBOUNCE, PriceDebouncer};
use crate::error::{CatalogError, CatalogResult};
use crate::state::{CatalogView, FETCH_FAILED_MESSAGE, FetchState};

#[derive(Debug, Clone, PartialEq)]
enum Command {
    SetCategory(Option<String>),
    ToggleSize(String),
    ToggleColor(String),
    SetPriceBound(PriceBound, Option<Decimal>),
    SetSort(SortKey, SortDirection),
    ClearAll,
    Retry,
    RefreshCategories,
}

enum Completion {
    Products {
        seq: u64,
        result: ClientResult<Vec<ProductSummary>>,
    },
    Categories {
        seq: u64,
        result: ClientResult<Vec<Category>>,
    },
}

/// Mount-time settings
#[derive(Debug, Clone)]
pub struct MountOptions {
    /// `category` from the incoming page URL, read once
    pub deep_link_category: Option<String>,
    /// `limit` sent with every listing request
    pub product_limit: u32,
    pub price_debounce: Duration,
}

impl Default for MountOptions {
    fn default() -> Self {
        Self {
            deep_link_category: None,
            product_limit: DEFAULT_PRODUCT_LIMIT,
            price_debounce: PRICE_DEBOUNCE,
        }
    }
}

impl MountOptions {
    pub fn with_deep_link(mut self, category: impl Into<String>) -> Self {
        self.deep_link_category = Some(category.into());
        self
    }

    pub fn with_product_limit(mut self, limit: u32) -> Self {
        self.product_limit = limit;
        self
    }
}

pub struct CatalogController {
    api: Arc<dyn CatalogApi>,
    limit: u32,
    criteria: FilterCriteria,
    price: PriceDebouncer,
    products: Vec<ProductSummary>,
    categories: Vec<Category>,
    fetch_state: FetchState,
    last_query: Option<ProductQuery>,
    fetch_count: u64,
    fetch_seq: u64,
    category_seq: u64,
    completions: mpsc::UnboundedSender<Completion>,
    view_tx: watch::Sender<CatalogView>,
    shutdown: CancellationToken,
}

impl CatalogController {
    /// Spawn the controller task and issue the initial fetch.
    ///
    /// Must be called from within a Tokio runtime. Separate handle calls
    /// are only merged into one turn when the controller has not woken in
    /// between, which a multi-threaded runtime does not promise; send
    /// commands that belong together through [`CatalogHandle::batch`].
    pub fn mount(api: Arc<dyn CatalogApi>, options: MountOptions) -> CatalogHandle {
        let criteria = FilterCriteria::with_category(options.deep_link_category);
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(CatalogView {
            criteria: criteria.clone(),
            ..CatalogView::default()
        });
        let shutdown = CancellationToken::new();

        let controller = Self {
            api,
            limit: options.product_limit,
            criteria,
            price: PriceDebouncer::new(options.price_debounce),
            products: Vec::new(),
            categories: Vec::new(),
            fetch_state: FetchState::Idle,
            last_query: None,
            fetch_count: 0,
            fetch_seq: 0,
            category_seq: 0,
            completions: completion_tx,
            view_tx,
            shutdown: shutdown.clone(),
        };
        let task = tokio::spawn(controller.run(command_rx, completion_rx));

        CatalogHandle {
            commands: command_tx,
            view: view_rx,
            shutdown,
            task,
        }
    }

    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Vec<Command>>,
        mut completions: mpsc::UnboundedReceiver<Completion>,
    ) {
        tracing::info!(category = ?self.criteria.category, "Catalog controller mounted");

        self.load_categories();
        self.sync(true);
        self.publish();

        loop {
            let deadline = self.price.deadline();

            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Catalog controller shutting down");
                    break;
                }

                _ = maybe_sleep_until(deadline) => {
                    if let Some(range) = self.price.take_if_due(Instant::now()) {
                        tracing::debug!(min = ?range.min, max = ?range.max, "Price filter settled");
                        self.criteria.set_price_range(range);
                    }
                    self.sync(false);
                }

                batch = commands.recv() => {
                    let Some(batch) = batch else {
                        tracing::info!("All catalog handles dropped, controller stopping");
                        break;
                    };
                    // Drain whatever is already queued so one turn yields one fetch
                    let mut force = self.apply_all(batch);
                    while let Ok(batch) = commands.try_recv() {
                        force |= self.apply_all(batch);
                    }
                    self.sync(force);
                }

                Some(completion) = completions.recv() => {
                    self.complete(completion);
                }
            }

            self.publish();
        }
    }

    fn apply_all(&mut self, batch: Vec<Command>) -> bool {
        batch
            .into_iter()
            .fold(false, |force, command| self.apply(command) | force)
    }

    /// Returns whether the command forces a fetch regardless of criteria
    fn apply(&mut self, command: Command) -> bool {
        tracing::trace!(?command, "Catalog command");
        match command {
            Command::SetCategory(category) => self.criteria.set_category(category),
            Command::ToggleSize(size) => {
                self.criteria.toggle_size(&size);
            }
            Command::ToggleColor(color) => {
                self.criteria.toggle_color(&color);
            }
            Command::SetPriceBound(bound, value) => self.price.edit(bound, value, Instant::now()),
            Command::SetSort(key, direction) => self.criteria.set_sort(key, direction),
            Command::ClearAll => {
                self.criteria.clear_all();
                self.price.reset();
                return true;
            }
            Command::Retry => return true,
            Command::RefreshCategories => self.load_categories(),
        }
        false
    }

    /// Issue a fetch if the effective criteria moved away from the last query
    fn sync(&mut self, force: bool) {
        let query = self.criteria.to_query(self.limit);
        if force || self.last_query.as_ref() != Some(&query) {
            self.issue_fetch(query);
        }
    }

    fn issue_fetch(&mut self, query: ProductQuery) {
        self.fetch_seq += 1;
        self.fetch_count += 1;
        self.fetch_state = FetchState::Loading;
        self.last_query = Some(query.clone());

        let seq = self.fetch_seq;
        tracing::info!(seq, params = ?query.to_pairs(), "Fetching products");

        let api = Arc::clone(&self.api);
        let completions = self.completions.clone();
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = shutdown.cancelled() => {}
                result = api.list_products(&query) => {
                    let _ = completions.send(Completion::Products { seq, result });
                }
            }
        });
    }

    fn load_categories(&mut self) {
        self.category_seq += 1;
        let seq = self.category_seq;

        let api = Arc::clone(&self.api);
        let completions = self.completions.clone();
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = shutdown.cancelled() => {}
                result = api.list_categories() => {
                    let _ = completions.send(Completion::Categories { seq, result });
                }
            }
        });
    }

    fn complete(&mut self, completion: Completion) {
        match completion {
            Completion::Products { seq, result } => {
                if seq != self.fetch_seq {
                    tracing::debug!(seq, latest = self.fetch_seq, "Discarding stale product response");
                    return;
                }
                match result {
                    Ok(products) => {
                        tracing::info!(seq, count = products.len(), "Products loaded");
                        self.products = products;
                        self.fetch_state = FetchState::Idle;
                    }
                    Err(e) => {
                        tracing::warn!(seq, transport = e.is_transport(), "Product fetch failed: {e}");
                        // Previously displayed products stay on screen
                        self.fetch_state = FetchState::Error(failure_message(&e));
                    }
                }
            }
            Completion::Categories { seq, result } => {
                if seq != self.category_seq {
                    return;
                }
                match result {
                    Ok(categories) => {
                        tracing::debug!(count = categories.len(), "Categories loaded");
                        self.categories = categories;
                    }
                    Err(e) => tracing::warn!("Failed to load categories: {e}"),
                }
            }
        }
    }

    fn publish(&self) {
        let view = CatalogView {
            criteria: self.criteria.clone(),
            price_input: self.price.live().clone(),
            products: self.products.clone(),
            categories: self.categories.clone(),
            fetch_state: self.fetch_state.clone(),
            last_query: self.last_query.clone(),
            fetch_count: self.fetch_count,
        };
        self.view_tx.send_if_modified(|current| {
            if *current == view {
                false
            } else {
                *current = view;
                true
            }
        });
    }
}

/// Resolves at `deadline`, or never when there is none
async fn maybe_sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn failure_message(err: &ClientError) -> String {
    match err {
        ClientError::Api { message } => message.clone(),
        _ => FETCH_FAILED_MESSAGE.to_string(),
    }
}

/// Commands applied by the controller in a single turn
#[derive(Debug, Default)]
pub struct CommandBatch {
    commands: Vec<Command>,
}

impl CommandBatch {
    pub fn set_category(&mut self, category: Option<String>) -> &mut Self {
        self.push(Command::SetCategory(category))
    }

    pub fn toggle_size(&mut self, size: impl Into<String>) -> &mut Self {
        self.push(Command::ToggleSize(size.into()))
    }

    pub fn toggle_color(&mut self, color: impl Into<String>) -> &mut Self {
        self.push(Command::ToggleColor(color.into()))
    }

    pub fn set_price_bound(&mut self, bound: PriceBound, value: Option<Decimal>) -> &mut Self {
        self.push(Command::SetPriceBound(bound, value))
    }

    pub fn set_sort(&mut self, key: SortKey, direction: SortDirection) -> &mut Self {
        self.push(Command::SetSort(key, direction))
    }

    pub fn set_sort_option(&mut self, option: SortOption) -> &mut Self {
        let (key, direction) = option.pair();
        self.set_sort(key, direction)
    }

    pub fn clear_all(&mut self) -> &mut Self {
        self.push(Command::ClearAll)
    }

    pub fn retry(&mut self) -> &mut Self {
        self.push(Command::Retry)
    }

    pub fn refresh_categories(&mut self) -> &mut Self {
        self.push(Command::RefreshCategories)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn push(&mut self, command: Command) -> &mut Self {
        self.commands.push(command);
        self
    }
}

/// View-side handle to a mounted controller
///
/// Every operation only enqueues a command; none waits for I/O.
#[derive(Debug)]
pub struct CatalogHandle {
    commands: mpsc::UnboundedSender<Vec<Command>>,
    view: watch::Receiver<CatalogView>,
    shutdown: CancellationToken,
    task: JoinHandle<()>,
}

impl CatalogHandle {
    fn send(&self, command: Command) -> CatalogResult<()> {
        self.commands
            .send(vec![command])
            .map_err(|_| CatalogError::Closed)
    }

    /// Send several commands as one turn: criteria are compared, and at
    /// most one fetch issued, only after the whole batch is applied.
    ///
    /// ```ignore
    /// handle.batch(|b| {
    ///     b.toggle_size("M").toggle_color("red");
    /// })?;
    /// ```
    pub fn batch(&self, build: impl FnOnce(&mut CommandBatch)) -> CatalogResult<()> {
        let mut batch = CommandBatch::default();
        build(&mut batch);
        if batch.is_empty() {
            return Ok(());
        }
        self.commands
            .send(batch.commands)
            .map_err(|_| CatalogError::Closed)
    }

    /// `None` shows every category
    pub fn set_category(&self, category: Option<String>) -> CatalogResult<()> {
        self.send(Command::SetCategory(category))
    }

    pub fn toggle_size(&self, size: impl Into<String>) -> CatalogResult<()> {
        self.send(Command::ToggleSize(size.into()))
    }

    pub fn toggle_color(&self, color: impl Into<String>) -> CatalogResult<()> {
        self.send(Command::ToggleColor(color.into()))
    }

    /// Takes effect after the debounce window passes without another edit
    pub fn set_price_bound(&self, bound: PriceBound, value: Option<Decimal>) -> CatalogResult<()> {
        self.send(Command::SetPriceBound(bound, value))
    }

    pub fn set_sort(&self, key: SortKey, direction: SortDirection) -> CatalogResult<()> {
        self.send(Command::SetSort(key, direction))
    }

    pub fn set_sort_option(&self, option: SortOption) -> CatalogResult<()> {
        let (key, direction) = option.pair();
        self.set_sort(key, direction)
    }

    /// Reset every filter; always issues exactly one fetch
    pub fn clear_all(&self) -> CatalogResult<()> {
        self.send(Command::ClearAll)
    }

    /// Re-issue the last query
    pub fn retry(&self) -> CatalogResult<()> {
        self.send(Command::Retry)
    }

    pub fn refresh_categories(&self) -> CatalogResult<()> {
        self.send(Command::RefreshCategories)
    }

    /// Current snapshot
    pub fn view(&self) -> CatalogView {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CatalogView> {
        self.view.clone()
    }

    /// Stop the controller and wait for it to finish
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        if let Err(e) = self.task.await {
            tracing::error!("Catalog controller task failed: {e}");
        }
    }
}
