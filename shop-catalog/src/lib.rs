//! Shop Catalog - product listing filter controller
//!
//! Owns the listing page's filter criteria, debounces price input and keeps
//! the displayed products in step with the most recently issued query.
//!
//! # 模块
//!
//! - [`criteria`] - 过滤条件与排序选项 (纯状态转换)
//! - [`debounce`] - 价格输入防抖
//! - [`controller`] - 控制器任务与句柄
//! - [`state`] - 视图快照与加载状态

pub mod config;
pub mod controller;
pub mod criteria;
pub mod debounce;
pub mod error;
pub mod logger;
pub mod repl;
pub mod state;

pub use config::Config;
pub use controller::{CatalogController, CatalogHandle, CommandBatch, MountOptions};
pub use criteria::{FilterCriteria, PriceBound, PriceRange, SortDirection, SortKey, SortOption};
pub use debounce::{PRICE_DEBOUNCE, PriceDebouncer};
pub use error::{CatalogError, CatalogResult};
pub use state::{CatalogView, FetchState};
