mod request;

pub use self::request::{FetchedPage, HttpFetcher};
