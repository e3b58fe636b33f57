// src/common/notice.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// Feedback estruturado para o frontend (substitui os `alert()` das telas).
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum Notice {
    Success { message: String },
    Failure { kind: String, message: String },
}

impl Notice {
    pub fn success(locale: &Locale, i18n: &I18nStore, key: &str) -> Self {
        Notice::Success { message: i18n.translate(&locale.0, key) }
    }

    pub fn failure(locale: &Locale, i18n: &I18nStore, kind: &str, key: &str) -> Self {
        Notice::Failure { kind: kind.to_string(), message: i18n.translate(&locale.0, key) }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Notice::Success { .. })
    }
}

/// Resposta padrão de mutações: o dado resultante + a notificação a exibir.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResponse<T: Serialize> {
    pub data: T,
    pub notice: Notice,
}

impl<T: Serialize> ActionResponse<T> {
    pub fn new(data: T, notice: Notice) -> Self {
        Self { data, notice }
    }
}
