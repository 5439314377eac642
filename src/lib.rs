pub mod aggregate;
pub mod config;
pub mod discover;
pub mod metric;
pub mod plot;
pub mod sweep;
pub mod trace;

#[cfg(test)]
mod test;
