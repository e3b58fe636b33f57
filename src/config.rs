// src/config.rs

use std::{env, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;

use crate::{
    common::{
        clock::{Clock, SystemClock},
        i18n::I18nStore,
    },
    db::{
        seed::{self, SeedSecrets},
        Stores,
    },
    services::{
        api_key_service::ApiKeyService,
        auth::AuthService,
        coupon_service::CouponService,
        docs_service::DocsService,
        document_service::DocumentService,
        footer_service::FooterService,
        marketplace_service::MarketplaceService,
        package_service::PackageService,
        payment_service::{PaymentService, SimulatedCheck},
        policy_service::PolicyService,
        pricing_service::PricingService,
        quote_service::QuoteService,
        subscription_service::SubscriptionService,
        support_service::SupportService,
        system_service::SystemService,
        user_service::UserService,
    },
};

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub bind_addr: String,
    pub seed_mock_data: bool,
    pub bcrypt_cost: u32,
    pub simulated_latency: Duration,
    pub font_dir: PathBuf,
    pub token_ttl: chrono::Duration,
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} tem um valor inválido: {}", name, raw)),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        Ok(Self {
            jwt_secret,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            seed_mock_data: parse_var("SEED_MOCK_DATA", true)?,
            bcrypt_cost: parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            simulated_latency: Duration::from_millis(parse_var("SIMULATED_LATENCY_MS", 800u64)?),
            font_dir: PathBuf::from(env::var("FONT_DIR").unwrap_or_else(|_| "./fonts".to_string())),
            token_ttl: chrono::Duration::hours(parse_var("TOKEN_TTL_HOURS", 168i64)?),
        })
    }

    /// Configuração rápida para testes: bcrypt barato e sem latência simulada.
    pub fn for_tests() -> Self {
        Self {
            jwt_secret: "test-secret".to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            seed_mock_data: true,
            bcrypt_cost: 4,
            simulated_latency: Duration::ZERO,
            font_dir: PathBuf::from("./fonts"),
            token_ttl: chrono::Duration::hours(1),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub clock: Arc<dyn Clock>,
    pub i18n_store: &'static I18nStore,
    pub stores: Stores,

    pub auth_service: AuthService,
    pub user_service: UserService,
    pub package_service: PackageService,
    pub document_service: DocumentService,
    pub coupon_service: CouponService,
    pub policy_service: PolicyService,
    pub payment_service: PaymentService,
    pub pricing_service: PricingService,
    pub quote_service: QuoteService,
    pub subscription_service: SubscriptionService,
    pub api_key_service: ApiKeyService,
    pub footer_service: FooterService,
    pub system_service: SystemService,
    pub support_service: SupportService,
    pub marketplace_service: MarketplaceService,
    pub docs_service: DocsService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock)).await
    }

    pub async fn with_clock(config: Config, clock: Arc<dyn Clock>) -> anyhow::Result<Self> {
        let now = clock.now();

        // Hash das credenciais de demonstração fora do runtime async
        let cost = config.bcrypt_cost;
        let secrets = tokio::task::spawn_blocking(move || -> Result<SeedSecrets, bcrypt::BcryptError> {
            Ok(SeedSecrets {
                password_hash: bcrypt::hash(seed::DEMO_PASSWORD, cost)?,
                api_key_hash: bcrypt::hash(seed::DEMO_API_KEY, cost)?,
            })
        })
        .await
        .context("Falha na task de hashing do seed")??;

        let stores = if config.seed_mock_data {
            seed::mock(now, &secrets)
        } else {
            seed::bootstrap(now, &secrets)
        };
        tracing::info!(
            "✅ Stores em memória prontos ({} usuários, {} colis)",
            stores.users.len()?,
            stores.packages.len()?
        );

        let i18n_store = I18nStore::global();

        // --- Monta o gráfico de dependências ---
        let pricing_service = PricingService::new(stores.plans.clone(), stores.addons.clone(), seed::pricing_settings());

        let auth_service = AuthService::new(
            stores.users.clone(),
            config.jwt_secret.clone(),
            config.token_ttl,
            clock.clone(),
        );
        let user_service = UserService::new(stores.users.clone(), config.bcrypt_cost, clock.clone());
        let package_service = PackageService::new(stores.packages.clone(), clock.clone());
        let document_service = DocumentService::new(config.font_dir.clone());
        let coupon_service = CouponService::new(
            stores.coupons.clone(),
            stores.redemptions.clone(),
            i18n_store,
            clock.clone(),
        );
        let policy_service = PolicyService::new(stores.policies.clone(), clock.clone());
        let payment_service = PaymentService::new(
            stores.payment_providers.clone(),
            Arc::new(SimulatedCheck::new(config.simulated_latency)),
            clock.clone(),
        );
        let quote_service = QuoteService::new(stores.quotes.clone(), pricing_service.clone(), clock.clone());
        let subscription_service = SubscriptionService::new(
            stores.subscriptions.clone(),
            stores.plans.clone(),
            stores.addons.clone(),
            clock.clone(),
        );
        let api_key_service = ApiKeyService::new(stores.api_keys.clone(), config.bcrypt_cost, clock.clone());
        let footer_service = FooterService::new(seed::footer_config(now), clock.clone());
        let system_service = SystemService::new(
            seed::system_settings(now),
            stores.clone(),
            config.simulated_latency,
            clock.clone(),
        );
        let support_service = SupportService::new(stores.tickets.clone(), clock.clone());
        let marketplace_service = MarketplaceService::new(stores.service_requests.clone(), clock.clone());
        let docs_service = DocsService::new(stores.articles.clone(), clock.clone());

        Ok(Self {
            config: Arc::new(config),
            clock,
            i18n_store,
            stores,
            auth_service,
            user_service,
            package_service,
            document_service,
            coupon_service,
            policy_service,
            payment_service,
            pricing_service,
            quote_service,
            subscription_service,
            api_key_service,
            footer_service,
            system_service,
            support_service,
            marketplace_service,
            docs_service,
        })
    }
}
