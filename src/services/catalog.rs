//! Static catalogs: selectable AI models and subscription plans.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use serde::Serialize;

use crate::types::{AiModel, Capability, Provider};

/// The models offered in the selector. The first entry is the default selection.
#[must_use]
pub fn default_models() -> Vec<AiModel> {
    vec![
        AiModel {
            id: "1".to_owned(),
            name: "GPT-4 Turbo".to_owned(),
            provider: Provider::OpenAI,
            capabilities: vec![Capability::Summarization, Capability::Chat, Capability::Grammar],
            description: "Advanced language model with strong capabilities across all tasks.".to_owned(),
        },
        AiModel {
            id: "2".to_owned(),
            name: "Claude 3 Opus".to_owned(),
            provider: Provider::Anthropic,
            capabilities: vec![Capability::Summarization, Capability::Chat],
            description: "Excellent for nuanced understanding and detailed responses.".to_owned(),
        },
    ]
}

/// Find a catalog model by id or by case-insensitive name.
#[must_use]
pub fn find_model<'a>(models: &'a [AiModel], key: &str) -> Option<&'a AiModel> {
    let key = key.trim();
    models
        .iter()
        .find(|m| m.id == key)
        .or_else(|| models.iter().find(|m| m.name.eq_ignore_ascii_case(key)))
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlan {
    pub name: &'static str,
    pub price: &'static str,
    pub features: Vec<&'static str>,
    /// The plan every account starts on.
    pub current: bool,
    pub best_value: bool,
}

#[must_use]
pub fn subscription_plans() -> Vec<SubscriptionPlan> {
    vec![
        SubscriptionPlan {
            name: "Free Tier",
            price: "$0/month",
            features: vec!["Access to GPT-4o and Claude 3 Opus", "Standard voice model", "1000 tokens per day"],
            current: true,
            best_value: false,
        },
        SubscriptionPlan {
            name: "Pro Upgrade",
            price: "$5/month",
            features: vec![
                "Everything in free",
                "Access to GPT-4o and Claude 3 Opus",
                "Enhanced access",
                "5000 tokens per day",
            ],
            current: false,
            best_value: false,
        },
        SubscriptionPlan {
            name: "Pro+ Upgrade",
            price: "$10/month",
            features: vec!["Everything in Pro", "Premium features", "Full access", "10000 tokens per day"],
            current: false,
            best_value: true,
        },
    ]
}
