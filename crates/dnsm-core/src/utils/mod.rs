//! Utility functions for date and string formatting.

pub mod format;

pub use format::{
    format_datetime_to_minute, format_datetime_to_second, format_timestamp_to_minute,
    format_timestamp_to_second, truncate,
};
