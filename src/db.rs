pub mod seed;
pub mod store;
pub use store::{Record, ResourceStore, TenantScope};

use crate::models::{
    api_key::ApiKey,
    coupon::{Coupon, Redemption},
    docs::DocArticle,
    marketplace::ServiceRequest,
    package::Package,
    payment::PaymentProvider,
    policy::Policy,
    pricing::{Addon, Plan},
    quote::QuoteRequest,
    subscription::Subscription,
    support::Ticket,
    user::User,
};

// Todas as "tabelas" em memória do processo. Clonar compartilha os mesmos dados.
#[derive(Clone, Default)]
pub struct Stores {
    pub users: ResourceStore<User>,
    pub packages: ResourceStore<Package>,
    pub coupons: ResourceStore<Coupon>,
    pub policies: ResourceStore<Policy>,
    pub payment_providers: ResourceStore<PaymentProvider>,
    pub plans: ResourceStore<Plan>,
    pub addons: ResourceStore<Addon>,
    pub quotes: ResourceStore<QuoteRequest>,
    pub subscriptions: ResourceStore<Subscription>,
    pub api_keys: ResourceStore<ApiKey>,
    pub tickets: ResourceStore<Ticket>,
    pub service_requests: ResourceStore<ServiceRequest>,
    pub articles: ResourceStore<DocArticle>,
    pub redemptions: ResourceStore<Redemption>,
}

impl Stores {
    /// Quantidade de registros em cada store, na ordem exibida pela tela de sistema.
    pub fn counts(&self) -> Result<Vec<(&'static str, usize)>, crate::common::error::AppError> {
        Ok(vec![
            ("users", self.users.len()?),
            ("packages", self.packages.len()?),
            ("coupons", self.coupons.len()?),
            ("policies", self.policies.len()?),
            ("payment_providers", self.payment_providers.len()?),
            ("plans", self.plans.len()?),
            ("addons", self.addons.len()?),
            ("quotes", self.quotes.len()?),
            ("subscriptions", self.subscriptions.len()?),
            ("api_keys", self.api_keys.len()?),
            ("tickets", self.tickets.len()?),
            ("service_requests", self.service_requests.len()?),
            ("articles", self.articles.len()?),
            ("redemptions", self.redemptions.len()?),
        ])
    }
}
