#![forbid(unsafe_code)]

pub const TAG_OWF: &str = "pebble.owf";
pub const TAG_SEED: &str = "pebble.seed";
