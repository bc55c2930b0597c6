pub mod pages;

pub use pages::parse_page_list;
