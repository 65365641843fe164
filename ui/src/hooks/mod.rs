pub mod use_article_stats;
pub mod use_articles;
pub mod use_authentication;
pub mod use_browser_detection;
pub mod use_fetch;
pub mod use_screen_size;
pub mod use_users;

pub use bindings::FetchState;
pub use use_article_stats::use_article_stats;
pub use use_articles::{ArticlesHookReturn, use_articles};
pub use use_authentication::use_authentication;
pub use use_browser_detection::use_browser_detection;
pub use use_fetch::{FetchHookReturn, use_fetch};
pub use use_screen_size::use_screen_size;
pub use use_users::{UsersHookReturn, use_users};
