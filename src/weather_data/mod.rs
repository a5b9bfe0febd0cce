pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod http_cache;
pub mod retry;
pub mod writer;

#[cfg(test)]
pub(crate) mod test_server;
