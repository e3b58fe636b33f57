pub mod api_key;
pub mod auth;
pub mod coupon;
pub mod docs;
pub mod footer;
pub mod marketplace;
pub mod package;
pub mod payment;
pub mod policy;
pub mod pricing;
pub mod quote;
pub mod subscription;
pub mod support;
pub mod system;
pub mod user;
