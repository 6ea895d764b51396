//! # Data Module
//!
//! Scraped record collections and month-window selection of reviews.

mod store;
mod window;

pub use store::{Price, Product, RecordStore, Review, Testimonial};
pub use window::{filter_reviews, parse_month, year_month, TimeWindow, WindowSelection, MONTH_NAMES};
