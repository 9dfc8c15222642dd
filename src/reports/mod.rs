//! Reports module for the expense tracker
//!
//! Totals by category, by day, by week and by month, plus a whole-list
//! spending summary. All of it is recomputed from the current expense list
//! on every call.

pub mod summary;
pub mod totals;

pub use summary::{CategorySpending, SpendingSummary};
pub use totals::{
    category_totals, filter_by_date_range, month_bounds, total_by_category, total_by_day,
    total_for_month, total_for_week, total_overall, WEEK_SPAN_DAYS,
};
