pub mod favorite_categories;
pub mod wechat_users;
