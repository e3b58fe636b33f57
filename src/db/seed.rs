// src/db/seed.rs

//! Dados fictícios carregados na inicialização (não há banco de dados).

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    db::{ResourceStore, Stores},
    models::{
        api_key::ApiKey,
        coupon::{Coupon, DiscountType},
        docs::DocArticle,
        footer::{FooterConfig, FooterContact, FooterLink, FooterSection, SocialLink},
        marketplace::{Bid, BidStatus, RequestStatus, ServiceCategory, ServiceRequest},
        package::{Dimensions, Package, PackageStatus, PaymentStatus, TransportMode},
        payment::{PaymentEnvironment, PaymentProvider},
        policy::{ComplianceStatus, Policy, PolicyCategory, PolicyStatus, RiskLevel},
        pricing::{Addon, ModeRate, Plan, PricingSettings},
        quote::{QuoteRequest, QuoteStatus},
        subscription::{BillingCycle, Subscription, SubscriptionStatus},
        support::{Ticket, TicketCategory, TicketPriority, TicketStatus},
        system::{BackupFrequency, DatabaseSettings, SystemSettings},
        user::{Role, User},
    },
};

pub const SINO_AFRICA_CARGO: Uuid = Uuid::from_u128(0x5a1e_0000_0000_4000_8000_0000_0000_0001);
pub const DAKAR_LINK: Uuid = Uuid::from_u128(0x5a1e_0000_0000_4000_8000_0000_0000_0002);

pub const SUPER_ADMIN_ID: Uuid = Uuid::from_u128(0x05e2_0000_0000_4000_8000_0000_0000_0001);
pub const AGENT_ID: Uuid = Uuid::from_u128(0x05e2_0000_0000_4000_8000_0000_0000_0003);
pub const AFFILIATE_ID: Uuid = Uuid::from_u128(0x05e2_0000_0000_4000_8000_0000_0000_0005);

pub const PLAN_STARTER: Uuid = Uuid::from_u128(0x91a0_0000_0000_4000_8000_0000_0000_0001);
pub const PLAN_BUSINESS: Uuid = Uuid::from_u128(0x91a0_0000_0000_4000_8000_0000_0000_0002);
pub const PLAN_ENTERPRISE: Uuid = Uuid::from_u128(0x91a0_0000_0000_4000_8000_0000_0000_0003);

/// Senha de todas as contas de demonstração.
pub const DEMO_PASSWORD: &str = "password123";
/// Chave de API de demonstração (a API só guarda o hash).
pub const DEMO_API_KEY: &str = "ck_live_demo5f2c9a7e41b84d0c";

/// Hashes calculados fora daqui (bcrypt é lento e roda numa task bloqueante).
pub struct SeedSecrets {
    pub password_hash: String,
    pub api_key_hash: String,
}

fn money(units: i64, cents: u32) -> Decimal {
    Decimal::new(units * 100 + cents as i64, 2)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// Só o superadministrador e o catálogo (usado com SEED_MOCK_DATA=false).
pub fn bootstrap(now: DateTime<Utc>, secrets: &SeedSecrets) -> Stores {
    Stores {
        users: ResourceStore::seeded(vec![user(
            SUPER_ADMIN_ID,
            "superadmin@cargo-admin.test",
            "Awa Diallo",
            Role::SuperAdmin,
            None,
            true,
            now,
            secrets,
        )]),
        plans: ResourceStore::seeded(plans()),
        addons: ResourceStore::seeded(addons()),
        ..Stores::default()
    }
}

pub fn mock(now: DateTime<Utc>, secrets: &SeedSecrets) -> Stores {
    Stores {
        users: ResourceStore::seeded(users(now, secrets)),
        packages: ResourceStore::seeded(packages(now)),
        coupons: ResourceStore::seeded(coupons(now)),
        policies: ResourceStore::seeded(policies(now)),
        payment_providers: ResourceStore::seeded(payment_providers(now)),
        plans: ResourceStore::seeded(plans()),
        addons: ResourceStore::seeded(addons()),
        quotes: ResourceStore::seeded(quotes(now)),
        subscriptions: ResourceStore::seeded(subscriptions(now)),
        api_keys: ResourceStore::seeded(api_keys(now, secrets)),
        tickets: ResourceStore::seeded(tickets(now)),
        service_requests: ResourceStore::seeded(service_requests(now)),
        articles: ResourceStore::seeded(articles(now)),
        redemptions: ResourceStore::default(),
    }
}

// =============================================================================
//  USUÁRIOS
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn user(
    id: Uuid,
    email: &str,
    name: &str,
    role: Role,
    company_id: Option<Uuid>,
    is_active: bool,
    now: DateTime<Utc>,
    secrets: &SeedSecrets,
) -> User {
    User {
        id,
        email: email.to_string(),
        name: name.to_string(),
        role,
        is_active,
        company_id,
        password_hash: secrets.password_hash.clone(),
        created_at: now - Duration::days(120),
        updated_at: now - Duration::days(3),
    }
}

fn users(now: DateTime<Utc>, secrets: &SeedSecrets) -> Vec<User> {
    let id = |n: u128| Uuid::from_u128(0x05e2_0000_0000_4000_8000_0000_0000_0000 + n);
    vec![
        user(SUPER_ADMIN_ID, "superadmin@cargo-admin.test", "Awa Diallo", Role::SuperAdmin, None, true, now, secrets),
        user(id(2), "admin@sinoafrica.test", "Chen Wei", Role::Admin, Some(SINO_AFRICA_CARGO), true, now, secrets),
        user(AGENT_ID, "agent@sinoafrica.test", "Moussa Traoré", Role::Agent, Some(SINO_AFRICA_CARGO), true, now, secrets),
        user(id(4), "client@sinoafrica.test", "Fatou Ndiaye", Role::Client, Some(SINO_AFRICA_CARGO), true, now, secrets),
        user(AFFILIATE_ID, "affiliate@sinoafrica.test", "Kwame Mensah", Role::Affiliate, Some(SINO_AFRICA_CARGO), true, now, secrets),
        user(id(6), "admin@dakarlink.test", "Ibrahima Sow", Role::Admin, Some(DAKAR_LINK), true, now, secrets),
        user(id(7), "client@dakarlink.test", "Aminata Ba", Role::Client, Some(DAKAR_LINK), true, now, secrets),
        user(id(8), "former.agent@sinoafrica.test", "Li Na", Role::Agent, Some(SINO_AFRICA_CARGO), false, now, secrets),
    ]
}

// =============================================================================
//  COLIS
// =============================================================================

fn packages(now: DateTime<Utc>) -> Vec<Package> {
    #[allow(clippy::too_many_arguments)]
    fn package(
        n: u128,
        company: Uuid,
        pin: &str,
        description: &str,
        weight: Decimal,
        dims: (f64, f64, f64),
        mode: TransportMode,
        status: PackageStatus,
        price: Decimal,
        payment: PaymentStatus,
        client: &str,
        age_days: i64,
        now: DateTime<Utc>,
    ) -> Package {
        Package {
            id: Uuid::from_u128(0xba6e_0000_0000_4000_8000_0000_0000_0000 + n),
            company_id: Some(company),
            tracking_pin: pin.to_string(),
            description: description.to_string(),
            weight_kg: weight,
            dimensions: Dimensions { length_cm: dims.0, width_cm: dims.1, height_cm: dims.2 },
            transport_mode: mode,
            status,
            price,
            payment_status: payment,
            client_name: client.to_string(),
            created_at: now - Duration::days(age_days),
            updated_at: now - Duration::days(age_days / 2),
        }
    }

    use PackageStatus::*;
    use PaymentStatus::*;
    use TransportMode::*;
    vec![
        package(1, SINO_AFRICA_CARGO, "CA-7K2M9QXA", "Téléphones Xiaomi (carton de 20)", money(18, 50), (60.0, 40.0, 35.0), Aerial, InTransit, money(231, 25), Paid, "Fatou Ndiaye", 12, now),
        package(2, SINO_AFRICA_CARGO, "CA-3HT8LW2P", "Pièces détachées moto", money(145, 0), (120.0, 80.0, 70.0), Maritime, Planned, money(380, 0), Pending, "Boutique Keur Massar", 4, now),
        package(3, SINO_AFRICA_CARGO, "CA-9PZR4DN6", "Tissus wax (3 rouleaux)", money(32, 0), (90.0, 45.0, 45.0), AerialExpress, Arrived, money(576, 0), Partial, "Mariam Coulibaly", 20, now),
        package(4, SINO_AFRICA_CARGO, "CA-5VXE2B8J", "Panneaux solaires 200W", money(410, 0), (170.0, 110.0, 60.0), MaritimeExpress, InTransit, money(1250, 0), Paid, "Energie Plus SARL", 30, now),
        package(5, SINO_AFRICA_CARGO, "CA-8QWM6T1C", "Cosmétiques", money(7, 20), (40.0, 30.0, 20.0), Aerial, Collected, money(90, 0), Paid, "Fatou Ndiaye", 45, now),
        package(6, DAKAR_LINK, "CA-2LGD7Y4R", "Ordinateurs portables reconditionnés", money(26, 0), (70.0, 50.0, 40.0), AerialExpress, Planned, money(468, 0), Pending, "Aminata Ba", 2, now),
        package(7, DAKAR_LINK, "CA-6FNC3K9H", "Machine à coudre industrielle", money(95, 0), (100.0, 70.0, 90.0), Maritime, Arrived, money(310, 0), Partial, "Atelier Médina", 60, now),
    ]
}

// =============================================================================
//  CUPONS
// =============================================================================

fn coupons(now: DateTime<Utc>) -> Vec<Coupon> {
    let base = |n: u128, code: &str, description: &str, discount_type: DiscountType, value: Decimal| Coupon {
        id: Uuid::from_u128(0xc009_0000_0000_4000_8000_0000_0000_0000 + n),
        code: code.to_string(),
        description: description.to_string(),
        discount_type,
        value,
        usage_count: 0,
        usage_limit: None,
        min_order_amount: None,
        max_discount: None,
        valid_from: now - Duration::days(30),
        valid_to: now + Duration::days(365),
        transport_modes: Vec::new(),
        first_time_only: false,
        is_active: true,
        created_at: now - Duration::days(30),
    };

    vec![
        Coupon {
            usage_count: 245,
            usage_limit: Some(1000),
            min_order_amount: Some(money(50, 0)),
            ..base(1, "WELCOME10", "10 % sur la première expédition", DiscountType::Percentage, money(10, 0))
        },
        Coupon {
            usage_count: 88,
            usage_limit: Some(500),
            valid_from: now - Duration::days(90),
            valid_to: now - Duration::days(10),
            ..base(2, "FRET25", "25 USD de remise sur le fret maritime", DiscountType::Fixed, money(25, 0))
        },
        Coupon {
            usage_count: 12,
            transport_modes: vec![TransportMode::Aerial, TransportMode::AerialExpress],
            first_time_only: true,
            max_discount: Some(money(40, 0)),
            ..base(3, "AIRFREE", "Livraison offerte en aérien", DiscountType::FreeShipping, Decimal::ZERO)
        },
        Coupon {
            valid_from: now + Duration::days(30),
            valid_to: now + Duration::days(60),
            max_discount: Some(money(100, 0)),
            ..base(4, "TABASKI15", "15 % pendant la Tabaski", DiscountType::Percentage, money(15, 0))
        },
        Coupon {
            usage_count: 100,
            usage_limit: Some(100),
            ..base(5, "FLASH50", "50 USD, 100 premiers clients", DiscountType::Fixed, money(50, 0))
        },
        Coupon { is_active: false, ..base(6, "VIP20", "Clients VIP", DiscountType::Percentage, money(20, 0)) },
    ]
}

// =============================================================================
//  POLÍTICAS DE RH
// =============================================================================

fn policies(now: DateTime<Utc>) -> Vec<Policy> {
    #[allow(clippy::too_many_arguments)]
    fn policy(
        n: u128,
        company: Uuid,
        title: &str,
        category: PolicyCategory,
        status: PolicyStatus,
        compliance: ComplianceStatus,
        risk_level: RiskLevel,
        acknowledged: u32,
        employees: u32,
        effective: NaiveDate,
        review: NaiveDate,
        now: DateTime<Utc>,
    ) -> Policy {
        Policy {
            id: Uuid::from_u128(0x9011_0000_0000_4000_8000_0000_0000_0000 + n),
            company_id: Some(company),
            title: title.to_string(),
            category,
            description: format!("{} applicable à tous les employés.", title),
            version: "1.0".to_string(),
            status,
            compliance,
            risk_level,
            acknowledged_count: acknowledged,
            employee_count: employees,
            effective_date: effective,
            next_review: review,
            updated_at: now - Duration::days(15),
        }
    }

    let today = now.date_naive();
    vec![
        policy(1, SINO_AFRICA_CARGO, "Code de conduite", PolicyCategory::Conduct, PolicyStatus::Active, ComplianceStatus::Compliant, RiskLevel::Low, 42, 45, date(2025, 1, 1), today + Duration::days(120), now),
        policy(2, SINO_AFRICA_CARGO, "Sécurité en entrepôt", PolicyCategory::Safety, PolicyStatus::Active, ComplianceStatus::Partial, RiskLevel::High, 30, 45, date(2025, 3, 15), today - Duration::days(10), now),
        policy(3, SINO_AFRICA_CARGO, "Protection des données clients", PolicyCategory::Privacy, PolicyStatus::Review, ComplianceStatus::Pending, RiskLevel::Critical, 12, 45, date(2025, 6, 1), today + Duration::days(30), now),
        policy(4, SINO_AFRICA_CARGO, "Congés et absences", PolicyCategory::Leave, PolicyStatus::Draft, ComplianceStatus::Pending, RiskLevel::Low, 0, 45, date(2026, 1, 1), today + Duration::days(365), now),
        policy(5, DAKAR_LINK, "Politique de rémunération", PolicyCategory::Compensation, PolicyStatus::Active, ComplianceStatus::NonCompliant, RiskLevel::Medium, 8, 14, date(2024, 9, 1), today - Duration::days(40), now),
        policy(6, DAKAR_LINK, "Accès aux systèmes", PolicyCategory::Security, PolicyStatus::Archived, ComplianceStatus::Compliant, RiskLevel::High, 14, 14, date(2023, 1, 1), date(2024, 1, 1), now),
    ]
}

// =============================================================================
//  AGREGADORES DE PAGAMENTO
// =============================================================================

fn payment_providers(now: DateTime<Utc>) -> Vec<PaymentProvider> {
    let provider = |n: u128, name: &str, kind: &str| PaymentProvider {
        id: Uuid::from_u128(0x9a70_0000_0000_4000_8000_0000_0000_0000 + n),
        name: name.to_string(),
        kind: kind.to_string(),
        api_key: String::new(),
        secret_key: String::new(),
        merchant_id: String::new(),
        webhook_url: format!("https://api.cargo-admin.test/webhooks/{}", kind),
        environment: PaymentEnvironment::Sandbox,
        is_connected: false,
        is_active: false,
        last_tested_at: None,
        updated_at: now - Duration::days(7),
    };

    vec![
        PaymentProvider {
            api_key: "pk_test_cinetpay_48f1a2".into(),
            secret_key: "sk_test_cinetpay_93ab77".into(),
            merchant_id: "CP-104522".into(),
            is_connected: true,
            is_active: true,
            last_tested_at: Some(now - Duration::days(1)),
            ..provider(1, "CinetPay", "cinetpay")
        },
        PaymentProvider {
            api_key: "FLWPUBK_TEST-7c1d".into(),
            secret_key: "FLWSECK_TEST-b2e9".into(),
            merchant_id: "FLW-88231".into(),
            ..provider(2, "Flutterwave", "flutterwave")
        },
        provider(3, "Paystack", "paystack"),
        PaymentProvider {
            api_key: "om_live_key_5521".into(),
            secret_key: "om_live_secret_0098".into(),
            merchant_id: "OM-SN-2231".into(),
            environment: PaymentEnvironment::Production,
            is_connected: true,
            is_active: false,
            last_tested_at: Some(now - Duration::days(20)),
            ..provider(4, "Orange Money", "orange-money")
        },
    ]
}

// =============================================================================
//  CATÁLOGO E PREÇOS
// =============================================================================

pub fn plans() -> Vec<Plan> {
    let features = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    vec![
        Plan {
            id: PLAN_STARTER,
            slug: "starter".into(),
            name: "Starter".into(),
            monthly_price: money(29, 0),
            yearly_price: money(290, 0),
            max_users: Some(3),
            max_packages_per_month: Some(200),
            features: features(&["Suivi des colis", "Étiquettes PDF", "Support par e-mail"]),
            is_popular: false,
        },
        Plan {
            id: PLAN_BUSINESS,
            slug: "business".into(),
            name: "Business".into(),
            monthly_price: money(79, 0),
            yearly_price: money(790, 0),
            max_users: Some(15),
            max_packages_per_month: Some(2000),
            features: features(&["Tout Starter", "Codes promo", "Devis en ligne", "Support prioritaire"]),
            is_popular: true,
        },
        Plan {
            id: PLAN_ENTERPRISE,
            slug: "enterprise".into(),
            name: "Enterprise".into(),
            monthly_price: money(199, 0),
            yearly_price: money(1990, 0),
            max_users: None,
            max_packages_per_month: None,
            features: features(&["Tout Business", "API", "Marketplace", "Gestionnaire de compte dédié"]),
            is_popular: false,
        },
    ]
}

pub fn addons() -> Vec<Addon> {
    let addon = |n: u128, slug: &str, name: &str, description: &str, price: Decimal| Addon {
        id: Uuid::from_u128(0xadd0_0000_0000_4000_8000_0000_0000_0000 + n),
        slug: slug.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        monthly_price: price,
    };
    vec![
        addon(1, "sms", "Notifications SMS", "SMS de suivi envoyés aux destinataires", money(15, 0)),
        addon(2, "whatsapp", "WhatsApp Business", "Notifications de suivi via WhatsApp", money(19, 0)),
        addon(3, "extra-storage", "Stockage étendu", "Archivage des documents douaniers", money(9, 0)),
    ]
}

pub fn pricing_settings() -> PricingSettings {
    let rate = |mode: TransportMode, per_kg: Decimal, per_m3: Decimal, days: &str| ModeRate {
        transport_mode: mode,
        per_kg,
        per_cubic_meter: per_m3,
        transit_days: days.to_string(),
    };
    PricingSettings {
        currency: "USD".into(),
        volumetric_divisor: Decimal::from(6000),
        minimum_charge: money(25, 0),
        yearly_discount_percent: Decimal::from(17),
        rates: vec![
            rate(TransportMode::Aerial, money(12, 50), Decimal::ZERO, "7-12"),
            rate(TransportMode::AerialExpress, money(18, 0), Decimal::ZERO, "3-5"),
            rate(TransportMode::Maritime, Decimal::ZERO, money(280, 0), "45-60"),
            rate(TransportMode::MaritimeExpress, Decimal::ZERO, money(420, 0), "30-40"),
        ],
    }
}

// =============================================================================
//  COTAÇÕES
// =============================================================================

fn quotes(now: DateTime<Utc>) -> Vec<QuoteRequest> {
    #[allow(clippy::too_many_arguments)]
    fn quote(
        n: u128,
        company: Option<Uuid>,
        client: &str,
        email: &str,
        route: (&str, &str),
        mode: TransportMode,
        weight: Decimal,
        volume: Decimal,
        status: QuoteStatus,
        prices: (Option<Decimal>, Option<Decimal>),
        age_days: i64,
        now: DateTime<Utc>,
    ) -> QuoteRequest {
        let created_at = now - Duration::days(age_days);
        QuoteRequest {
            id: Uuid::from_u128(0x9007_0000_0000_4000_8000_0000_0000_0000 + n),
            company_id: company,
            reference: format!("QT-{}-{:04}", created_at.format("%Y"), n),
            client_name: client.to_string(),
            client_email: email.to_string(),
            client_phone: None,
            origin: route.0.to_string(),
            destination: route.1.to_string(),
            transport_mode: mode,
            weight_kg: weight,
            volume_m3: volume,
            description: String::new(),
            status,
            suggested_price: prices.0,
            quoted_price: prices.1,
            quoted_by: prices.1.map(|_| AGENT_ID),
            quoted_at: prices.1.map(|_| created_at + Duration::hours(5)),
            created_at,
        }
    }

    use QuoteStatus::*;
    use TransportMode::*;
    vec![
        quote(1, Some(SINO_AFRICA_CARGO), "Oumar Kane", "oumar.kane@example.sn", ("Guangzhou", "Dakar"), Aerial, money(45, 0), money(0, 12), Pending, (Some(money(562, 50)), None), 1, now),
        quote(2, Some(SINO_AFRICA_CARGO), "Nadia Bello", "nadia@lagos-imports.ng", ("Shenzhen", "Lagos"), Maritime, money(800, 0), money(3, 50), Quoted, (Some(money(980, 0)), Some(money(950, 0))), 6, now),
        quote(3, Some(SINO_AFRICA_CARGO), "Koffi Yao", "koffi.yao@example.ci", ("Yiwu", "Abidjan"), MaritimeExpress, money(300, 0), money(1, 20), Accepted, (Some(money(504, 0)), Some(money(520, 0))), 15, now),
        quote(4, Some(DAKAR_LINK), "Seynabou Fall", "seynabou@example.sn", ("Guangzhou", "Dakar"), AerialExpress, money(12, 0), money(0, 5), Rejected, (Some(money(216, 0)), Some(money(240, 0))), 25, now),
        quote(5, None, "Jean-Paul Mbarga", "jp.mbarga@example.cm", ("Shanghai", "Douala"), Maritime, money(1500, 0), money(6, 0), Pending, (Some(money(1680, 0)), None), 0, now),
    ]
}

// =============================================================================
//  ASSINATURAS
// =============================================================================

fn subscriptions(now: DateTime<Utc>) -> Vec<Subscription> {
    let id = |n: u128| Uuid::from_u128(0x50b5_0000_0000_4000_8000_0000_0000_0000 + n);
    vec![
        Subscription {
            id: id(1),
            company_id: Some(SINO_AFRICA_CARGO),
            company_name: "Sino-Africa Cargo".into(),
            plan_id: PLAN_BUSINESS,
            plan_name: "Business".into(),
            status: SubscriptionStatus::Active,
            billing_cycle: BillingCycle::Monthly,
            amount: money(94, 0),
            addons: vec!["sms".into()],
            started_at: now - Duration::days(200),
            renews_at: now + Duration::days(12),
            cancelled_at: None,
        },
        Subscription {
            id: id(2),
            company_id: Some(DAKAR_LINK),
            company_name: "Dakar Link Logistics".into(),
            plan_id: PLAN_STARTER,
            plan_name: "Starter".into(),
            status: SubscriptionStatus::Trialing,
            billing_cycle: BillingCycle::Monthly,
            amount: money(29, 0),
            addons: Vec::new(),
            started_at: now - Duration::days(5),
            renews_at: now + Duration::days(9),
            cancelled_at: None,
        },
        Subscription {
            id: id(3),
            company_id: Some(Uuid::from_u128(0x5a1e_0000_0000_4000_8000_0000_0000_0003)),
            company_name: "Lomé Express Fret".into(),
            plan_id: PLAN_ENTERPRISE,
            plan_name: "Enterprise".into(),
            status: SubscriptionStatus::Active,
            billing_cycle: BillingCycle::Yearly,
            amount: money(1990, 0),
            addons: Vec::new(),
            started_at: now - Duration::days(400),
            renews_at: now + Duration::days(330),
            cancelled_at: None,
        },
        Subscription {
            id: id(4),
            company_id: Some(Uuid::from_u128(0x5a1e_0000_0000_4000_8000_0000_0000_0004)),
            company_name: "Kinshasa Cargo Services".into(),
            plan_id: PLAN_STARTER,
            plan_name: "Starter".into(),
            status: SubscriptionStatus::PastDue,
            billing_cycle: BillingCycle::Monthly,
            amount: money(29, 0),
            addons: Vec::new(),
            started_at: now - Duration::days(90),
            renews_at: now - Duration::days(3),
            cancelled_at: None,
        },
        Subscription {
            id: id(5),
            company_id: Some(Uuid::from_u128(0x5a1e_0000_0000_4000_8000_0000_0000_0005)),
            company_name: "Accra Freight Hub".into(),
            plan_id: PLAN_BUSINESS,
            plan_name: "Business".into(),
            status: SubscriptionStatus::Cancelled,
            billing_cycle: BillingCycle::Monthly,
            amount: money(79, 0),
            addons: Vec::new(),
            started_at: now - Duration::days(300),
            renews_at: now - Duration::days(30),
            cancelled_at: Some(now - Duration::days(30)),
        },
    ]
}

// =============================================================================
//  CHAVES DE API
// =============================================================================

fn api_keys(now: DateTime<Utc>, secrets: &SeedSecrets) -> Vec<ApiKey> {
    vec![ApiKey {
        id: Uuid::from_u128(0xa91c_0000_0000_4000_8000_0000_0000_0001),
        company_id: None,
        name: "Intégration site vitrine".into(),
        prefix: DEMO_API_KEY.chars().take(crate::models::api_key::VISIBLE_PREFIX_LEN).collect(),
        key_hash: secrets.api_key_hash.clone(),
        scopes: vec!["tracking:read".into(), "quotes:write".into()],
        is_active: true,
        created_by: SUPER_ADMIN_ID,
        created_at: now - Duration::days(60),
        last_used_at: Some(now - Duration::hours(6)),
    }]
}

// =============================================================================
//  SUPORTE
// =============================================================================

fn tickets(now: DateTime<Utc>) -> Vec<Ticket> {
    #[allow(clippy::too_many_arguments)]
    fn ticket(
        n: u128,
        company: Uuid,
        subject: &str,
        customer: &str,
        category: TicketCategory,
        priority: TicketPriority,
        status: TicketStatus,
        agent: Option<&str>,
        hours: (i64, Option<i64>, Option<i64>),
        satisfaction: Option<u8>,
        now: DateTime<Utc>,
    ) -> Ticket {
        let created_at = now - Duration::hours(hours.0);
        Ticket {
            id: Uuid::from_u128(0x71c4_0000_0000_4000_8000_0000_0000_0000 + n),
            company_id: Some(company),
            reference: format!("TK-{:05}", 1000 + n),
            subject: subject.to_string(),
            customer_name: customer.to_string(),
            category,
            priority,
            status,
            assigned_agent: agent.map(str::to_string),
            created_at,
            first_response_at: hours.1.map(|h| created_at + Duration::hours(h)),
            resolved_at: hours.2.map(|h| created_at + Duration::hours(h)),
            satisfaction,
        }
    }

    use TicketCategory::*;
    use TicketPriority::*;
    use TicketStatus::*;
    vec![
        ticket(1, SINO_AFRICA_CARGO, "Colis bloqué en douane à Dakar", "Fatou Ndiaye", Shipping, Urgent, InProgress, Some("Moussa Traoré"), (20, Some(1), None), None, now),
        ticket(2, SINO_AFRICA_CARGO, "Facture en double", "Energie Plus SARL", Billing, Medium, Resolved, Some("Moussa Traoré"), (72, Some(3), Some(26)), Some(5), now),
        ticket(3, SINO_AFRICA_CARGO, "Impossible d'imprimer l'étiquette", "Boutique Keur Massar", Technical, High, Open, None, (4, None, None), None, now),
        ticket(4, SINO_AFRICA_CARGO, "Changer l'adresse e-mail du compte", "Mariam Coulibaly", Account, Low, Closed, Some("Moussa Traoré"), (200, Some(6), Some(30)), Some(4), now),
        ticket(5, DAKAR_LINK, "Retard de livraison maritime", "Atelier Médina", Shipping, High, Resolved, Some("Ibrahima Sow"), (150, Some(2), Some(48)), Some(3), now),
        ticket(6, DAKAR_LINK, "Question sur les tarifs express", "Aminata Ba", Other, Low, Open, None, (10, None, None), None, now),
    ]
}

// =============================================================================
//  MARKETPLACE
// =============================================================================

fn service_requests(now: DateTime<Utc>) -> Vec<ServiceRequest> {
    let bid = |n: u128, provider: Uuid, name: &str, amount: Decimal, days: u32, status: BidStatus| Bid {
        id: Uuid::from_u128(0xb1d0_0000_0000_4000_8000_0000_0000_0000 + n),
        provider_id: provider,
        provider_name: name.to_string(),
        amount,
        delivery_days: days,
        message: String::new(),
        status,
        submitted_at: now - Duration::days(2),
    };
    let request_id = |n: u128| Uuid::from_u128(0x5e40_0000_0000_4000_8000_0000_0000_0000 + n);
    let other_provider = Uuid::from_u128(0x05e2_0000_0000_4000_8000_0000_0000_0099);

    vec![
        ServiceRequest {
            id: request_id(1),
            company_id: Some(SINO_AFRICA_CARGO),
            requester_id: Uuid::from_u128(0x05e2_0000_0000_4000_8000_0000_0000_0004),
            title: "Dédouanement de 2 conteneurs 40 pieds".into(),
            description: "Port autonome de Dakar, documents prêts.".into(),
            category: ServiceCategory::Customs,
            origin: "Port de Dakar".into(),
            destination: "Dakar".into(),
            budget: money(1800, 0),
            deadline: now + Duration::days(10),
            status: RequestStatus::Open,
            bids: vec![
                bid(1, AGENT_ID, "Moussa Traoré", money(1650, 0), 5, BidStatus::Pending),
                bid(2, other_provider, "Transit Rapide SN", money(1500, 0), 7, BidStatus::Pending),
            ],
            awarded_bid_id: None,
            created_at: now - Duration::days(3),
        },
        ServiceRequest {
            id: request_id(2),
            company_id: Some(DAKAR_LINK),
            requester_id: Uuid::from_u128(0x05e2_0000_0000_4000_8000_0000_0000_0007),
            title: "Livraison dernier kilomètre Thiès".into(),
            description: "15 colis à livrer sous 48 h.".into(),
            category: ServiceCategory::LastMile,
            origin: "Dakar".into(),
            destination: "Thiès".into(),
            budget: money(300, 0),
            deadline: now + Duration::days(4),
            status: RequestStatus::Awarded,
            bids: vec![
                bid(3, AFFILIATE_ID, "Kwame Mensah", money(240, 0), 2, BidStatus::Accepted),
                bid(4, other_provider, "Transit Rapide SN", money(280, 0), 2, BidStatus::Rejected),
            ],
            awarded_bid_id: Some(Uuid::from_u128(0xb1d0_0000_0000_4000_8000_0000_0000_0003)),
            created_at: now - Duration::days(6),
        },
        ServiceRequest {
            id: request_id(3),
            company_id: Some(SINO_AFRICA_CARGO),
            requester_id: Uuid::from_u128(0x05e2_0000_0000_4000_8000_0000_0000_0002),
            title: "Entreposage 30 jours à Guangzhou".into(),
            description: "Palettes de textile, 20 m³.".into(),
            category: ServiceCategory::Warehousing,
            origin: "Guangzhou".into(),
            destination: "Guangzhou".into(),
            budget: money(900, 0),
            deadline: now + Duration::days(20),
            status: RequestStatus::Open,
            bids: Vec::new(),
            awarded_bid_id: None,
            created_at: now - Duration::days(1),
        },
    ]
}

// =============================================================================
//  DOCUMENTAÇÃO
// =============================================================================

fn articles(now: DateTime<Utc>) -> Vec<DocArticle> {
    let article = |n: u128, slug: &str, title: &str, section: &str, content: &str, published: bool| DocArticle {
        id: Uuid::from_u128(0xd0c5_0000_0000_4000_8000_0000_0000_0000 + n),
        slug: slug.to_string(),
        title: title.to_string(),
        section: section.to_string(),
        content: content.to_string(),
        published,
        updated_at: now - Duration::days(n as i64),
    };
    vec![
        article(1, "premiers-pas", "Premiers pas", "Démarrage", "Créez votre compte, invitez votre équipe et enregistrez votre premier colis.", true),
        article(2, "suivi-colis", "Suivre un colis", "Colis", "Chaque colis reçoit un code PIN de suivi imprimé sur l'étiquette.", true),
        article(3, "api-authentification", "Authentification API", "API", "Envoyez votre clé dans l'en-tête X-Api-Key.", true),
        article(4, "marketplace-encheres", "Enchères sur la marketplace", "Marketplace", "Brouillon : règles d'attribution des offres.", false),
    ]
}

// =============================================================================
//  CONFIGURAÇÕES ÚNICAS
// =============================================================================

pub fn footer_config(now: DateTime<Utc>) -> FooterConfig {
    let link = |label: &str, href: &str| FooterLink { label: label.to_string(), href: href.to_string() };
    FooterConfig {
        company_name: "Cargo Admin".into(),
        tagline: "Votre pont logistique entre la Chine et l'Afrique".into(),
        sections: vec![
            FooterSection {
                title: "Services".into(),
                links: vec![link("Fret aérien", "/services/aerien"), link("Fret maritime", "/services/maritime")],
            },
            FooterSection {
                title: "Entreprise".into(),
                links: vec![link("Tarifs", "/tarifs"), link("Documentation", "/docs"), link("Contact", "/contact")],
            },
        ],
        social_links: vec![
            SocialLink { platform: "facebook".into(), url: "https://facebook.com/cargoadmin".into() },
            SocialLink { platform: "linkedin".into(), url: "https://linkedin.com/company/cargoadmin".into() },
        ],
        contact: FooterContact {
            email: "contact@cargo-admin.test".into(),
            phone: "+221 33 800 00 00".into(),
            address: "Route de l'Aéroport, Dakar, Sénégal".into(),
        },
        copyright: format!("© {} Cargo Admin. Tous droits réservés.", now.format("%Y")),
        updated_at: Some(now - Duration::days(14)),
    }
}

pub fn system_settings(now: DateTime<Utc>) -> SystemSettings {
    SystemSettings {
        platform_name: "Cargo Admin".into(),
        support_email: "support@cargo-admin.test".into(),
        default_currency: "USD".into(),
        default_language: "fr".into(),
        maintenance_mode: false,
        registration_open: true,
        max_upload_mb: 20,
        database: DatabaseSettings {
            backup_enabled: true,
            backup_frequency: BackupFrequency::Daily,
            retention_days: 30,
            last_backup_at: Some(now - Duration::hours(18)),
        },
    }
}
