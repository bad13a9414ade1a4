// src/handlers/plans.rs

use std::fmt::Write as _;

use crate::{
    cli::PlanAction,
    common::{error::AppError, i18n::MessageKey},
    config::AppState,
    forms::{ModuleGroup, PlanBuilder},
    handlers::{notice, resources},
    models::{
        common::ListQuery,
        feature::{Feature, FeaturesListParams},
        module::{Module, ModulesListParams},
        plan::Plan,
        pricing::format_money,
    },
};

// O catálogo cabe numa página
const CATALOG_LIMIT: u32 = 1000;

pub async fn run(state: &AppState, action: PlanAction) -> Result<(), AppError> {
    match action {
        PlanAction::Crud(action) => resources::run(&state.plans, action, state.locale).await,
        PlanAction::Summary { id } => {
            let plan = state.plans.get_by_id(&id).await?;
            let (features, modules) = load_catalog(state).await?;
            println!("{}", render_summary(&plan, &features, &modules));
            Ok(())
        }
        PlanAction::Toggle { id, features, modules } => toggle(state, id, &features, &modules).await,
    }
}

async fn toggle(state: &AppState, id: i64, feature_ids: &[i64], module_ids: &[i64]) -> Result<(), AppError> {
    if feature_ids.is_empty() && module_ids.is_empty() {
        return Err(AppError::InvalidInput("Informe ao menos uma --feature ou --module".into()));
    }

    let plan = state.plans.get_by_id(&id).await?;
    let (features, modules) = load_catalog(state).await?;

    let mut builder = PlanBuilder::from_plan(&plan);
    for module_id in module_ids {
        builder.toggle_module(Some(*module_id), &features);
    }
    for feature_id in feature_ids {
        let selected = builder.toggle_feature(*feature_id);
        tracing::debug!("Feature {} {}", feature_id, if selected { "adicionada" } else { "removida" });
    }
    builder.validate()?;

    let updated = state.plans.update(&id, &builder.to_update()).await?;
    notice(state.locale.message(MessageKey::Updated));
    println!("{}", render_summary(&updated, &features, &modules));
    Ok(())
}

async fn load_catalog(state: &AppState) -> Result<(Vec<Feature>, Vec<Module>), AppError> {
    let query = ListQuery {
        page: Some(1),
        limit: Some(CATALOG_LIMIT),
        q: None,
    };
    let features = state
        .features
        .get_all(&FeaturesListParams::from(query.clone()))
        .await?
        .results;
    let modules = state
        .modules
        .get_all(&ModulesListParams::from(query))
        .await?
        .results;
    Ok((features, modules))
}

fn limit_label(limit: Option<i64>) -> String {
    limit.map(|l| l.to_string()).unwrap_or_else(|| "ilimitado".into())
}

/// Texto do resumo: features do catálogo por módulo ([x] = no plano) e os
/// totais por moeda das features habilitadas.
pub fn render_summary(plan: &Plan, features: &[Feature], modules: &[Module]) -> String {
    let builder = PlanBuilder::from_plan(plan);
    let groups: Vec<ModuleGroup> = PlanBuilder::group_by_module(features, modules);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Plano #{} {} ({:?}, {}{})",
        plan.id,
        plan.name,
        plan.billing_period,
        if plan.is_active { "ativo" } else { "inativo" },
        if plan.is_public { ", público" } else { "" },
    );
    let _ = writeln!(
        out,
        "Limites: operações {}, clientes {}, usuários {}, armazenamento {}",
        limit_label(plan.max_operations),
        limit_label(plan.max_clients),
        limit_label(plan.max_users),
        limit_label(plan.max_storage),
    );

    for group in &groups {
        let selected = group.features.iter().filter(|f| builder.is_selected(f.id)).count();
        let _ = writeln!(out, "\n[{}] {}/{}", group.title(), selected, group.features.len());

        for feature in &group.features {
            let Some(config) = builder.config(feature.id) else {
                let _ = writeln!(out, "  [ ] {} ({})", feature.name, feature.key);
                continue;
            };
            let prices: Vec<String> = config
                .prices
                .iter()
                .map(|p| {
                    let marker = if p.is_default { "*" } else { "" };
                    format!("{}{}", format_money(p.currency, p.price), marker)
                })
                .collect();
            let _ = writeln!(
                out,
                "  [{}] {} ({}) limite {} / {:?} | {}",
                if config.is_enabled { "x" } else { "-" },
                feature.name,
                feature.key,
                limit_label(config.operation_limit),
                config.reset_period,
                prices.join(", "),
            );
        }
    }

    // Features do plano que não aparecem no catálogo ativo
    let unknown: Vec<String> = builder
        .configs()
        .iter()
        .filter(|c| !features.iter().any(|f| f.id == c.feature_id && f.is_active))
        .map(|c| c.feature_id.to_string())
        .collect();
    if !unknown.is_empty() {
        let _ = writeln!(out, "\nFora do catálogo ativo: {}", unknown.join(", "));
    }

    let _ = writeln!(out, "\nTotais:");
    let totals = builder.totals();
    if totals.is_empty() {
        let _ = writeln!(out, "  (nenhum)");
    }
    for (currency, amount) in totals {
        let _ = writeln!(out, "  {}", format_money(currency, amount));
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::Meta;
    use crate::models::plan::PlanFeatureConfig;
    use crate::models::pricing::{BillingPeriod, Currency, Price};
    use rust_decimal::Decimal;

    fn feature(id: i64, module_id: Option<i64>, name: &str) -> Feature {
        Feature {
            id,
            key: name.to_uppercase(),
            name: name.into(),
            description: None,
            category: None,
            module_id,
            is_active: true,
            sort_order: 0,
            meta: Meta::default(),
            prices: vec![],
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn summary_marks_selected_features_and_sums_prices() {
        let mut config = PlanFeatureConfig::with_defaults(1);
        config.prices = vec![Price {
            currency: Currency::Brl,
            price: Decimal::new(4990, 2),
            is_default: true,
        }];
        let plan = Plan {
            id: 7,
            name: "Pro".into(),
            description: None,
            billing_period: BillingPeriod::Monthly,
            is_active: true,
            is_public: true,
            sort_order: 0,
            max_operations: None,
            max_clients: Some(50),
            max_users: None,
            max_storage: None,
            features: vec![config],
            created_at: None,
            updated_at: None,
        };
        let features = vec![feature(1, None, "Leads"), feature(2, None, "Relatórios")];

        let text = render_summary(&plan, &features, &[]);

        assert!(text.contains("[x] Leads"));
        assert!(text.contains("[ ] Relatórios"));
        assert!(text.contains("clientes 50"));
        assert!(text.contains("R$ 49,90"));
    }
}
