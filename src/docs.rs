// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::session,

        // --- Site público ---
        handlers::public::list_plans,
        handlers::public::list_addons,
        handlers::public::pricing_settings,
        handlers::public::estimate,
        handlers::public::request_quote,
        handlers::public::track_package,
        handlers::public::footer_config,

        // --- Docs ---
        handlers::docs::list_articles,
        handlers::docs::get_article,
        handlers::docs::create_article,
        handlers::docs::update_article,
        handlers::docs::delete_article,

        // --- Users ---
        handlers::users::list_users,
        handlers::users::user_stats,
        handlers::users::get_user,
        handlers::users::create_user,
        handlers::users::update_user,
        handlers::users::toggle_user_active,
        handlers::users::delete_user,
        handlers::users::get_me,
        handlers::users::get_preferences,
        handlers::users::set_preferences,

        // --- Packages ---
        handlers::packages::list_packages,
        handlers::packages::package_stats,
        handlers::packages::get_package,
        handlers::packages::create_package,
        handlers::packages::update_package,
        handlers::documents::shipping_label_pdf,

        // --- Coupons ---
        handlers::coupons::list_coupons,
        handlers::coupons::coupon_stats,
        handlers::coupons::get_coupon,
        handlers::coupons::create_coupon,
        handlers::coupons::update_coupon,
        handlers::coupons::toggle_coupon,
        handlers::coupons::delete_coupon,
        handlers::coupons::validate_coupon,
        handlers::coupons::redeem_coupon,

        // --- Policies ---
        handlers::policies::list_policies,
        handlers::policies::policy_stats,
        handlers::policies::get_policy,
        handlers::policies::create_policy,
        handlers::policies::update_policy,
        handlers::policies::archive_policy,
        handlers::policies::acknowledge_policy,

        // --- Payments ---
        handlers::payments::list_providers,
        handlers::payments::payment_stats,
        handlers::payments::get_provider,
        handlers::payments::update_credentials,
        handlers::payments::test_connection,
        handlers::payments::toggle_provider,

        // --- Quotes ---
        handlers::quotes::list_quotes,
        handlers::quotes::quote_stats,
        handlers::quotes::get_quote,
        handlers::quotes::respond_quote,
        handlers::quotes::decide_quote,

        // --- Subscriptions ---
        handlers::subscriptions::list_subscriptions,
        handlers::subscriptions::subscription_stats,
        handlers::subscriptions::get_subscription,
        handlers::subscriptions::change_plan,
        handlers::subscriptions::cancel_subscription,
        handlers::subscriptions::reactivate_subscription,

        // --- API Keys ---
        handlers::api_keys::list_api_keys,
        handlers::api_keys::create_api_key,
        handlers::api_keys::revoke_api_key,
        handlers::api_keys::delete_api_key,
        handlers::api_keys::test_api,

        // --- System ---
        handlers::system::get_settings,
        handlers::system::update_settings,
        handlers::system::run_backup,
        handlers::system::database_overview,
        handlers::system::replace_footer,

        // --- Support ---
        handlers::support::list_tickets,
        handlers::support::get_ticket,
        handlers::support::update_ticket,
        handlers::support::support_analytics,

        // --- Marketplace ---
        handlers::marketplace::list_requests,
        handlers::marketplace::marketplace_stats,
        handlers::marketplace::get_request,
        handlers::marketplace::create_request,
        handlers::marketplace::award_bid,
        handlers::marketplace::close_request,
        handlers::marketplace::place_bid,
        handlers::marketplace::withdraw_bid,
    ),
    components(
        schemas(
            crate::common::notice::Notice,

            // --- Auth ---
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::SessionUser,
            models::auth::SessionStatus,
            models::auth::SessionResponse,

            // --- Users ---
            models::user::Role,
            models::user::User,
            models::user::UserForm,
            models::user::CreateUserPayload,
            models::user::RoleCount,
            models::user::UserStats,
            models::user::UserPreferences,

            // --- Packages ---
            models::package::TransportMode,
            models::package::PackageStatus,
            models::package::PaymentStatus,
            models::package::Dimensions,
            models::package::Package,
            models::package::PackageForm,
            models::package::CreatePackagePayload,
            models::package::StatusCount,
            models::package::PackageStats,
            models::package::TrackingInfo,

            // --- Pricing ---
            models::pricing::Plan,
            models::pricing::Addon,
            models::pricing::ModeRate,
            models::pricing::PricingSettings,
            models::pricing::EstimateRequest,
            models::pricing::Estimate,

            // --- Coupons ---
            models::coupon::DiscountType,
            models::coupon::CouponStatus,
            models::coupon::Coupon,
            models::coupon::CouponForm,
            models::coupon::CouponView,
            models::coupon::CouponStats,
            models::coupon::OrderContext,
            models::coupon::Redemption,
            models::coupon::CouponRejection,
            models::coupon::Discount,

            // --- Policies ---
            models::policy::PolicyCategory,
            models::policy::PolicyStatus,
            models::policy::ComplianceStatus,
            models::policy::RiskLevel,
            models::policy::Policy,
            models::policy::PolicyForm,
            models::policy::PolicyStats,

            // --- Payments ---
            models::payment::PaymentEnvironment,
            models::payment::PaymentProviderView,
            models::payment::CredentialsForm,
            models::payment::ConnectionTestResult,
            models::payment::PaymentStats,

            // --- Quotes ---
            models::quote::QuoteStatus,
            models::quote::QuoteRequest,
            models::quote::CreateQuotePayload,
            models::quote::RespondQuotePayload,
            models::quote::QuoteDecision,
            models::quote::DecideQuotePayload,
            models::quote::QuoteStats,

            // --- Subscriptions ---
            models::subscription::SubscriptionStatus,
            models::subscription::BillingCycle,
            models::subscription::Subscription,
            models::subscription::ChangePlanForm,
            models::subscription::SubscriptionStats,

            // --- API Keys ---
            models::api_key::ApiKey,
            models::api_key::CreateApiKeyPayload,
            models::api_key::CreatedApiKey,
            models::api_key::ApiTestResponse,

            // --- System ---
            models::system::BackupFrequency,
            models::system::DatabaseSettings,
            models::system::SystemSettings,
            models::system::StoreCount,
            models::system::DatabaseOverview,
            models::footer::FooterLink,
            models::footer::FooterSection,
            models::footer::SocialLink,
            models::footer::FooterContact,
            models::footer::FooterConfig,

            // --- Support ---
            models::support::TicketCategory,
            models::support::TicketPriority,
            models::support::TicketStatus,
            models::support::Ticket,
            models::support::UpdateTicketPayload,
            models::support::SupportAnalytics,

            // --- Marketplace ---
            models::marketplace::ServiceCategory,
            models::marketplace::RequestStatus,
            models::marketplace::BidStatus,
            models::marketplace::Bid,
            models::marketplace::ServiceRequest,
            models::marketplace::CreateServiceRequestPayload,
            models::marketplace::PlaceBidPayload,
            models::marketplace::MarketplaceStats,

            // --- Docs ---
            models::docs::DocArticle,
            models::docs::DocArticleForm,
        )
    ),
    tags(
        (name = "Auth", description = "Login e estado da sessão"),
        (name = "Public", description = "Site vitrine, simulador de frete e rastreio"),
        (name = "Docs", description = "Central de documentação"),
        (name = "Users", description = "Usuários, papéis e preferências"),
        (name = "Packages", description = "Colis e etiquetas de envio"),
        (name = "Coupons", description = "Cupons promocionais"),
        (name = "Policies", description = "Políticas e conformidade"),
        (name = "Payments", description = "Provedores de pagamento"),
        (name = "Quotes", description = "Pedidos de cotação"),
        (name = "Subscriptions", description = "Assinaturas SaaS das empresas"),
        (name = "API Keys", description = "Chaves de integração"),
        (name = "System", description = "Configurações da plataforma"),
        (name = "Support", description = "Tickets de suporte"),
        (name = "Marketplace", description = "Pedidos de serviço e lances")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
