// src/forms/plan_builder.rs

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use validator::{Validate, ValidationErrors};

use crate::common::error::AppError;
use crate::models::feature::Feature;
use crate::models::module::Module;
use crate::models::plan::{CreatePlanPayload, Plan, PlanFeatureConfig, UpdatePlanPayload};
use crate::models::pricing::{BillingPeriod, Currency, Price, ResetPeriod};

/// Limites do plano; `None` significa ilimitado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ceiling {
    Operations,
    Clients,
    Users,
    Storage,
}

/// Features ativas de um módulo. `module: None` é o grupo "sem módulo".
#[derive(Debug, Clone)]
pub struct ModuleGroup<'a> {
    pub module: Option<&'a Module>,
    pub features: Vec<&'a Feature>,
}

impl ModuleGroup<'_> {
    pub fn feature_ids(&self) -> Vec<i64> {
        self.features.iter().map(|f| f.id).collect()
    }

    pub fn title(&self) -> &str {
        self.module.map(|m| m.name.as_str()).unwrap_or("Sem módulo")
    }
}

// ---
// Rascunho do plano em edição
// ---
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanBuilder {
    draft: CreatePlanPayload,
}

impl PlanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Carrega um plano existente para edição.
    pub fn from_plan(plan: &Plan) -> Self {
        Self {
            draft: CreatePlanPayload {
                name: plan.name.clone(),
                description: plan.description.clone(),
                billing_period: plan.billing_period,
                is_active: plan.is_active,
                is_public: plan.is_public,
                sort_order: plan.sort_order,
                max_operations: plan.max_operations,
                max_clients: plan.max_clients,
                max_users: plan.max_users,
                max_storage: plan.max_storage,
                features: plan.features.clone(),
            },
        }
    }

    pub fn draft(&self) -> &CreatePlanPayload {
        &self.draft
    }

    // --- campos do plano ---

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.draft.description = description.filter(|d| !d.trim().is_empty());
    }

    pub fn set_billing_period(&mut self, period: BillingPeriod) {
        self.draft.billing_period = period;
    }

    pub fn set_active(&mut self, active: bool) {
        self.draft.is_active = active;
    }

    pub fn set_public(&mut self, public: bool) {
        self.draft.is_public = public;
    }

    pub fn set_sort_order(&mut self, order: i32) {
        self.draft.sort_order = order;
    }

    pub fn set_ceiling(&mut self, ceiling: Ceiling, value: Option<i64>) {
        let slot = match ceiling {
            Ceiling::Operations => &mut self.draft.max_operations,
            Ceiling::Clients => &mut self.draft.max_clients,
            Ceiling::Users => &mut self.draft.max_users,
            Ceiling::Storage => &mut self.draft.max_storage,
        };
        *slot = value;
    }

    // --- seleção de features ---

    pub fn configs(&self) -> &[PlanFeatureConfig] {
        &self.draft.features
    }

    pub fn config(&self, feature_id: i64) -> Option<&PlanFeatureConfig> {
        self.draft.features.iter().find(|c| c.feature_id == feature_id)
    }

    pub fn is_selected(&self, feature_id: i64) -> bool {
        self.config(feature_id).is_some()
    }

    fn config_mut(&mut self, feature_id: i64) -> Result<&mut PlanFeatureConfig, AppError> {
        self.draft
            .features
            .iter_mut()
            .find(|c| c.feature_id == feature_id)
            .ok_or_else(|| AppError::InvalidInput(format!("Feature {} não está no plano", feature_id)))
    }

    /// Adiciona a configuração padrão ou remove a existente.
    /// Retorna `true` se a feature ficou selecionada.
    pub fn toggle_feature(&mut self, feature_id: i64) -> bool {
        if self.is_selected(feature_id) {
            self.draft.features.retain(|c| c.feature_id != feature_id);
            false
        } else {
            self.draft.features.push(PlanFeatureConfig::with_defaults(feature_id));
            true
        }
    }

    pub fn is_fully_selected(&self, feature_ids: &[i64]) -> bool {
        !feature_ids.is_empty() && feature_ids.iter().all(|id| self.is_selected(*id))
    }

    /// Alterna um grupo inteiro de uma vez: se todas já estão no plano saem
    /// todas, senão entram as que faltam.
    pub fn toggle_group(&mut self, feature_ids: &[i64]) -> bool {
        if self.is_fully_selected(feature_ids) {
            self.draft.features.retain(|c| !feature_ids.contains(&c.feature_id));
            return false;
        }

        let missing: Vec<PlanFeatureConfig> = feature_ids
            .iter()
            .filter(|id| !self.is_selected(**id))
            .map(|id| PlanFeatureConfig::with_defaults(*id))
            .collect();
        self.draft.features.extend(missing);
        !feature_ids.is_empty()
    }

    /// Alterna as features ativas de um módulo (`None` = features sem módulo).
    pub fn toggle_module(&mut self, module_id: Option<i64>, features: &[Feature]) -> bool {
        let ids: Vec<i64> = features
            .iter()
            .filter(|f| f.is_active && f.module_id == module_id)
            .map(|f| f.id)
            .collect();
        self.toggle_group(&ids)
    }

    /// Agrupa as features ativas por módulo, na ordem dos módulos recebidos.
    /// Features sem módulo (ou de módulo desconhecido) vão para o último grupo.
    pub fn group_by_module<'a>(features: &'a [Feature], modules: &'a [Module]) -> Vec<ModuleGroup<'a>> {
        let mut active: Vec<&Feature> = features.iter().filter(|f| f.is_active).collect();
        active.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.name.cmp(&b.name)));

        let mut groups: Vec<ModuleGroup<'a>> = modules
            .iter()
            .map(|module| ModuleGroup {
                module: Some(module),
                features: active
                    .iter()
                    .copied()
                    .filter(|f| f.module_id == Some(module.id))
                    .collect(),
            })
            .collect();

        let ungrouped: Vec<&Feature> = active
            .iter()
            .copied()
            .filter(|f| match f.module_id {
                None => true,
                Some(id) => !modules.iter().any(|m| m.id == id),
            })
            .collect();
        groups.push(ModuleGroup {
            module: None,
            features: ungrouped,
        });

        groups.retain(|g| !g.features.is_empty());
        groups
    }

    // --- configuração por feature ---

    pub fn set_enabled(&mut self, feature_id: i64, enabled: bool) -> Result<(), AppError> {
        self.config_mut(feature_id)?.is_enabled = enabled;
        Ok(())
    }

    pub fn set_operation_limit(&mut self, feature_id: i64, limit: Option<i64>) -> Result<(), AppError> {
        self.config_mut(feature_id)?.operation_limit = limit;
        Ok(())
    }

    pub fn set_reset_period(&mut self, feature_id: i64, period: ResetPeriod) -> Result<(), AppError> {
        self.config_mut(feature_id)?.reset_period = period;
        Ok(())
    }

    // --- preços ---

    /// Nova linha de preço na primeira moeda ainda não usada (BRL se todas já
    /// estão). A linha nasce como padrão, a não ser que a moeda já tenha um.
    pub fn add_price(&mut self, feature_id: i64) -> Result<usize, AppError> {
        let config = self.config_mut(feature_id)?;
        let currency = Currency::ALL
            .into_iter()
            .find(|c| !config.prices.iter().any(|p| p.currency == *c))
            .unwrap_or(Currency::Brl);
        let has_default = config.prices.iter().any(|p| p.currency == currency && p.is_default);

        let mut prices = config.prices.clone();
        prices.push(Price {
            currency,
            price: Decimal::ZERO,
            is_default: !has_default,
        });
        config.prices = prices;
        Ok(config.prices.len() - 1)
    }

    pub fn remove_price(&mut self, feature_id: i64, index: usize) -> Result<Price, AppError> {
        let config = self.config_mut(feature_id)?;
        let removed = *price_at(&config.prices, index)?;
        config.prices = config
            .prices
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, p)| *p)
            .collect();
        Ok(removed)
    }

    pub fn set_price(&mut self, feature_id: i64, index: usize, value: Decimal) -> Result<(), AppError> {
        let config = self.config_mut(feature_id)?;
        price_at(&config.prices, index)?;
        config.prices = rebuild(&config.prices, |i, p| {
            if i == index { Price { price: value, ..*p } } else { *p }
        });
        Ok(())
    }

    /// Troca a moeda da linha. Se a linha é padrão, os outros padrões da nova
    /// moeda são desmarcados.
    pub fn set_currency(&mut self, feature_id: i64, index: usize, currency: Currency) -> Result<(), AppError> {
        let config = self.config_mut(feature_id)?;
        let is_default = price_at(&config.prices, index)?.is_default;
        config.prices = rebuild(&config.prices, |i, p| {
            if i == index {
                Price { currency, ..*p }
            } else if is_default && p.currency == currency {
                Price { is_default: false, ..*p }
            } else {
                *p
            }
        });
        Ok(())
    }

    /// Marca/desmarca o preço padrão. Marcar desmarca as outras linhas da
    /// mesma moeda; moedas diferentes não se afetam.
    pub fn set_default(&mut self, feature_id: i64, index: usize, flag: bool) -> Result<(), AppError> {
        let config = self.config_mut(feature_id)?;
        let currency = price_at(&config.prices, index)?.currency;
        config.prices = rebuild(&config.prices, |i, p| {
            if i == index {
                Price { is_default: flag, ..*p }
            } else if flag && p.currency == currency {
                Price { is_default: false, ..*p }
            } else {
                *p
            }
        });
        Ok(())
    }

    /// Soma, por moeda, de todas as linhas de preço das features habilitadas.
    pub fn totals(&self) -> BTreeMap<Currency, Decimal> {
        let mut totals = BTreeMap::new();
        for config in self.draft.features.iter().filter(|c| c.is_enabled) {
            for price in &config.prices {
                *totals.entry(price.currency).or_insert(Decimal::ZERO) += price.price;
            }
        }
        totals
    }

    // --- saída ---

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.draft.validate()
    }

    pub fn to_create(&self) -> CreatePlanPayload {
        self.draft.clone()
    }

    pub fn to_update(&self) -> UpdatePlanPayload {
        self.draft.clone().into()
    }
}

fn price_at(prices: &[Price], index: usize) -> Result<&Price, AppError> {
    prices
        .get(index)
        .ok_or_else(|| AppError::InvalidInput(format!("Preço {} não existe", index)))
}

// Sempre um Vec novo; as linhas antigas não são alteradas no lugar
fn rebuild(prices: &[Price], f: impl Fn(usize, &Price) -> Price) -> Vec<Price> {
    prices.iter().enumerate().map(|(i, p)| f(i, p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::Meta;
    use rust_decimal::Decimal;

    fn feature(id: i64, module_id: Option<i64>, sort_order: i32, name: &str) -> Feature {
        Feature {
            id,
            key: format!("F_{}", id),
            name: name.into(),
            description: None,
            category: None,
            module_id,
            is_active: true,
            sort_order,
            meta: Meta::default(),
            prices: vec![],
            created_at: None,
            updated_at: None,
        }
    }

    fn module(id: i64, name: &str) -> Module {
        Module {
            id,
            key: format!("M_{}", id),
            name: name.into(),
            description: None,
            meta: Meta::default(),
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn toggling_twice_restores_the_selection() {
        let mut builder = PlanBuilder::new();
        builder.toggle_feature(1);
        let before = builder.configs().to_vec();

        assert!(builder.toggle_feature(7));
        assert!(!builder.toggle_feature(7));
        assert_eq!(builder.configs(), before.as_slice());
    }

    #[test]
    fn toggled_feature_gets_default_configuration() {
        let mut builder = PlanBuilder::new();
        builder.toggle_feature(3);

        let config = builder.config(3).unwrap();
        assert!(config.is_enabled);
        assert_eq!(config.operation_limit, None);
        assert_eq!(config.reset_period, ResetPeriod::Lifetime);
        assert_eq!(config.prices, vec![Price::default_in(Currency::Brl)]);
    }

    #[test]
    fn defaults_in_different_currencies_coexist() {
        let mut builder = PlanBuilder::new();
        builder.toggle_feature(1);
        let usd = builder.add_price(1).unwrap();
        builder.set_default(1, usd, true).unwrap();

        let prices = &builder.config(1).unwrap().prices;
        assert_eq!(prices[0].currency, Currency::Brl);
        assert_eq!(prices[1].currency, Currency::Usd);
        assert!(prices[0].is_default);
        assert!(prices[1].is_default);
    }

    #[test]
    fn setting_default_unsets_same_currency() {
        let mut builder = PlanBuilder::new();
        builder.toggle_feature(1);
        let second = builder.add_price(1).unwrap();
        builder.set_default(1, second, false).unwrap();
        builder.set_currency(1, second, Currency::Brl).unwrap();
        assert!(builder.config(1).unwrap().prices[0].is_default);

        builder.set_default(1, second, true).unwrap();

        let prices = &builder.config(1).unwrap().prices;
        assert!(!prices[0].is_default);
        assert!(prices[1].is_default);
    }

    #[test]
    fn fifth_price_falls_back_to_brl_and_can_take_the_default() {
        let mut builder = PlanBuilder::new();
        builder.toggle_feature(1);
        for _ in 0..4 {
            builder.add_price(1).unwrap();
        }
        let fifth = 4;
        {
            let prices = &builder.config(1).unwrap().prices;
            assert_eq!(prices[fifth].currency, Currency::Brl);
            assert!(!prices[fifth].is_default);
        }

        builder.set_default(1, fifth, true).unwrap();

        let prices = &builder.config(1).unwrap().prices;
        assert!(!prices[0].is_default);
        assert!(prices[fifth].is_default);
        assert_eq!(prices.iter().filter(|p| p.currency == Currency::Brl && p.is_default).count(), 1);
    }

    #[test]
    fn add_price_walks_the_currency_order() {
        let mut builder = PlanBuilder::new();
        builder.toggle_feature(1);
        for _ in 0..4 {
            builder.add_price(1).unwrap();
        }

        let prices = &builder.config(1).unwrap().prices;
        let currencies: Vec<_> = prices.iter().map(|p| p.currency).collect();
        assert_eq!(
            currencies,
            vec![Currency::Brl, Currency::Usd, Currency::Eur, Currency::Gbp, Currency::Brl]
        );
        // BRL já tinha padrão
        assert!(!prices[4].is_default);
    }

    #[test]
    fn toggle_group_adds_missing_then_removes_all() {
        let mut builder = PlanBuilder::new();
        builder.toggle_feature(2);

        assert!(builder.toggle_group(&[1, 2, 3]));
        assert!(builder.is_fully_selected(&[1, 2, 3]));
        assert_eq!(builder.configs().len(), 3);

        assert!(!builder.toggle_group(&[1, 2, 3]));
        assert!(builder.configs().is_empty());
    }

    #[test]
    fn groups_by_module_with_ungrouped_last() {
        let modules = vec![module(10, "CRM"), module(20, "Financeiro")];
        let mut inactive = feature(5, Some(10), 0, "Oculta");
        inactive.is_active = false;
        let features = vec![
            feature(1, Some(10), 2, "Contatos"),
            feature(2, Some(10), 1, "Leads"),
            feature(3, None, 0, "Relatórios"),
            inactive,
        ];

        let groups = PlanBuilder::group_by_module(&features, &modules);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].title(), "CRM");
        assert_eq!(groups[0].feature_ids(), vec![2, 1]);
        assert!(groups[1].module.is_none());
        assert_eq!(groups[1].feature_ids(), vec![3]);
    }

    #[test]
    fn totals_skip_disabled_features() {
        let mut builder = PlanBuilder::new();
        builder.toggle_feature(1);
        builder.toggle_feature(2);
        builder.set_price(1, 0, Decimal::new(4990, 2)).unwrap();
        builder.set_price(2, 0, Decimal::new(1000, 2)).unwrap();
        let usd = builder.add_price(2).unwrap();
        builder.set_price(2, usd, Decimal::new(5, 0)).unwrap();

        let totals = builder.totals();
        assert_eq!(totals[&Currency::Brl], Decimal::new(5990, 2));
        assert_eq!(totals[&Currency::Usd], Decimal::new(5, 0));

        builder.set_enabled(2, false).unwrap();
        let totals = builder.totals();
        assert_eq!(totals[&Currency::Brl], Decimal::new(4990, 2));
        assert!(!totals.contains_key(&Currency::Usd));
    }

    #[test]
    fn validation_rejects_negative_values() {
        let mut builder = PlanBuilder::new();
        builder.set_name("Pro");
        builder.toggle_feature(1);
        assert!(builder.validate().is_ok());

        builder.set_price(1, 0, Decimal::new(-1, 0)).unwrap();
        assert!(builder.validate().is_err());

        builder.set_price(1, 0, Decimal::ZERO).unwrap();
        builder.set_operation_limit(1, Some(-5)).unwrap();
        assert!(builder.validate().is_err());
    }

    #[test]
    fn unknown_feature_or_row_is_an_error() {
        let mut builder = PlanBuilder::new();
        assert!(builder.add_price(9).is_err());
        builder.toggle_feature(9);
        assert!(builder.remove_price(9, 4).is_err());
        assert!(builder.remove_price(9, 0).is_ok());
        assert!(builder.config(9).unwrap().prices.is_empty());
    }

    #[test]
    fn update_payload_carries_unlimited_ceilings_as_null() {
        let mut builder = PlanBuilder::new();
        builder.set_name("Pro");
        builder.set_ceiling(Ceiling::Users, Some(5));
        builder.toggle_feature(1);

        let update = builder.to_update();
        assert_eq!(update.max_users, Some(Some(5)));
        assert_eq!(update.max_storage, Some(None));
    }
}
