pub mod api_keys;
pub mod auth;
pub mod coupons;
pub mod docs;
pub mod documents;
pub mod marketplace;
pub mod packages;
pub mod payments;
pub mod policies;
pub mod public;
pub mod quotes;
pub mod subscriptions;
pub mod support;
pub mod system;
pub mod users;
