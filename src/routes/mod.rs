pub mod crawl_route;
pub mod default_route;
