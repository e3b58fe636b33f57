// src/common/i18n.rs

use std::{collections::HashMap, sync::LazyLock};

pub const DEFAULT_LANG: &str = "fr";

// Catálogo: (chave, fr, en, pt)
const CATALOG: &[(&str, &str, &str, &str)] = &[
    // --- Erros ---
    ("error.validation", "Un ou plusieurs champs sont invalides.", "One or more fields are invalid.", "Um ou mais campos são inválidos."),
    ("error.required_field", "Le champ '{field}' est obligatoire.", "The field '{field}' is required.", "O campo '{field}' é obrigatório."),
    ("error.email_exists", "Cet e-mail est déjà utilisé.", "This e-mail is already in use.", "Este e-mail já está em uso."),
    ("error.invalid_credentials", "E-mail ou mot de passe invalide.", "Invalid e-mail or password.", "E-mail ou senha inválidos."),
    ("error.invalid_token", "Jeton d'authentification invalide ou absent.", "Missing or invalid authentication token.", "Token de autenticação inválido ou ausente."),
    ("error.user_not_found", "Utilisateur introuvable.", "User not found.", "Usuário não encontrado."),
    ("error.unauthenticated", "Veuillez vous connecter.", "Please sign in.", "Faça login para continuar."),
    ("error.access_denied", "Accès refusé à l'écran '{screen}'.", "Access denied to the '{screen}' screen.", "Acesso negado à tela '{screen}'."),
    ("error.outside_company", "Cette ressource appartient à une autre entreprise.", "This resource belongs to another company.", "Este recurso pertence a outra empresa."),
    ("error.not_found", "{resource} introuvable", "{resource} not found", "{resource} não encontrado"),
    ("error.internal", "Une erreur inattendue est survenue.", "An unexpected error occurred.", "Ocorreu um erro inesperado."),
    // --- Validação (códigos sem mensagem própria) ---
    ("validation.email", "Adresse e-mail invalide.", "Invalid e-mail address.", "E-mail inválido."),
    ("validation.length", "Longueur invalide.", "Invalid length.", "Tamanho inválido."),
    ("validation.range", "Valeur hors limites.", "Value out of range.", "Valor fora do intervalo."),
    ("validation.url", "URL invalide.", "Invalid URL.", "URL inválida."),
    // --- Status de cupom ---
    ("coupon.status.ACTIVE", "Actif", "Active", "Ativo"),
    ("coupon.status.EXPIRED", "Expiré", "Expired", "Expirado"),
    ("coupon.status.EXHAUSTED", "Épuisé", "Exhausted", "Esgotado"),
    ("coupon.status.SCHEDULED", "Programmé", "Scheduled", "Agendado"),
    ("coupon.status.INACTIVE", "Inactif", "Inactive", "Inativo"),
    // --- Recusas do motor de promoções ---
    ("coupon.rejected.inactive", "Ce code promo est désactivé.", "This coupon is disabled.", "Este cupom está desativado."),
    ("coupon.rejected.not_yet_valid", "Ce code promo n'est pas encore valide.", "This coupon is not valid yet.", "Este cupom ainda não é válido."),
    ("coupon.rejected.expired", "Ce code promo a expiré.", "This coupon has expired.", "Este cupom expirou."),
    ("coupon.rejected.usage_limit", "Ce code promo a atteint sa limite d'utilisation.", "This coupon reached its usage limit.", "Este cupom atingiu o limite de uso."),
    ("coupon.rejected.minimum", "Montant minimum de commande non atteint.", "Minimum order amount not reached.", "Valor mínimo do pedido não atingido."),
    ("coupon.rejected.transport_mode", "Ce code promo ne s'applique pas à ce mode de transport.", "This coupon does not apply to this transport mode.", "Este cupom não se aplica a este modo de transporte."),
    ("coupon.rejected.first_order", "Réservé à la première commande.", "First order only.", "Válido apenas para o primeiro pedido."),
    // --- Notificações ---
    ("notice.created", "Créé avec succès.", "Created successfully.", "Criado com sucesso."),
    ("notice.updated", "Modifications enregistrées.", "Changes saved.", "Alterações salvas."),
    ("notice.deleted", "Supprimé avec succès.", "Deleted successfully.", "Excluído com sucesso."),
    ("notice.activated", "Activé.", "Activated.", "Ativado."),
    ("notice.deactivated", "Désactivé.", "Deactivated.", "Desativado."),
    ("notice.connection_ok", "Connexion réussie.", "Connection succeeded.", "Conexão bem-sucedida."),
    ("notice.connection_failed", "Échec de la connexion : identifiants incomplets.", "Connection failed: incomplete credentials.", "Falha na conexão: credenciais incompletas."),
    ("notice.backup_done", "Sauvegarde terminée.", "Backup completed.", "Backup concluído."),
    ("notice.bid_placed", "Offre envoyée.", "Bid submitted.", "Lance enviado."),
    ("notice.bid_awarded", "Offre attribuée.", "Bid awarded.", "Lance vencedor definido."),
];

pub struct I18nStore {
    messages: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

static GLOBAL: LazyLock<I18nStore> = LazyLock::new(I18nStore::new);

impl I18nStore {
    pub fn new() -> Self {
        let mut messages: HashMap<&'static str, HashMap<&'static str, &'static str>> = HashMap::new();
        for &(key, fr, en, pt) in CATALOG {
            messages.entry("fr").or_default().insert(key, fr);
            messages.entry("en").or_default().insert(key, en);
            messages.entry("pt").or_default().insert(key, pt);
        }
        Self { messages }
    }

    /// Instância compartilhada, para quem não tem acesso ao AppState.
    pub fn global() -> &'static I18nStore {
        &GLOBAL
    }

    // Idioma desconhecido cai no padrão; chave desconhecida volta como está.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.messages
            .get(lang)
            .or_else(|| self.messages.get(DEFAULT_LANG))
            .and_then(|table| table.get(key))
            .map(|m| m.to_string())
            .unwrap_or_else(|| key.to_string())
    }

    pub fn format(&self, lang: &str, key: &str, params: &[(&str, &str)]) -> String {
        params
            .iter()
            .fold(self.translate(lang, key), |acc, (name, value)| {
                acc.replace(&format!("{{{}}}", name), value)
            })
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_french_for_unknown_language() {
        let store = I18nStore::new();
        assert_eq!(store.translate("de", "coupon.status.EXPIRED"), "Expiré");
        assert_eq!(store.translate("en", "coupon.status.EXPIRED"), "Expired");
    }

    #[test]
    fn unknown_key_is_returned_verbatim() {
        let store = I18nStore::new();
        assert_eq!(store.translate("fr", "nope.key"), "nope.key");
    }

    #[test]
    fn format_replaces_placeholders() {
        let store = I18nStore::new();
        let msg = store.format("en", "error.access_denied", &[("screen", "packages")]);
        assert_eq!(msg, "Access denied to the 'packages' screen.");
    }
}
