pub mod categories_sea;
pub mod users_sea;
