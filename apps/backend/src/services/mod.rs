pub mod categories;
pub mod users;
pub mod wechat_auth;
