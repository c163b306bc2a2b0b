//! Row types mapped from SQL result sets.

pub mod detection;
