//! Weather text decoding

pub mod condition;

pub use condition::{
    CONDITION_UNAVAILABLE, IconCategory, METAR_UNAVAILABLE, extract_condition, icon_category,
    normalize_raw_code,
};
