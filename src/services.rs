pub mod api_key_service;
pub mod auth;
pub mod coupon_service;
pub mod docs_service;
pub mod document_service;
pub mod footer_service;
pub mod marketplace_service;
pub mod package_service;
pub mod payment_service;
pub mod policy_service;
pub mod pricing_service;
pub mod promotion_engine;
pub mod quote_service;
pub mod subscription_service;
pub mod support_service;
pub mod system_service;
pub mod user_service;
