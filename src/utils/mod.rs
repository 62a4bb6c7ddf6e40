pub(crate) mod date;

pub(crate) use date::{format_date, parse_publish_date};
