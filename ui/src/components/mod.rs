pub mod article_filters;
pub mod header;
pub mod mai_search;
pub mod pagination_controls;

pub use article_filters::ArticleFilters;
pub use header::Header;
pub use mai_search::MaiSearch;
pub use pagination_controls::PaginationControls;
