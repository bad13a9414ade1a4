// src/forms/translations.rs

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::common::error::AppError;
use crate::models::common::Meta;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleOption {
    pub value: &'static str,
    pub label: &'static str,
}

// Sugestões, na ordem em que são oferecidas. Outros locales são aceitos.
pub const COMMON_LOCALES: [LocaleOption; 9] = [
    LocaleOption { value: "pt-BR", label: "Português (Brasil)" },
    LocaleOption { value: "en-US", label: "English (US)" },
    LocaleOption { value: "en-UK", label: "English (UK)" },
    LocaleOption { value: "es-ES", label: "Español (España)" },
    LocaleOption { value: "fr-FR", label: "Français" },
    LocaleOption { value: "de-DE", label: "Deutsch" },
    LocaleOption { value: "it-IT", label: "Italiano" },
    LocaleOption { value: "ja-JP", label: "日本語" },
    LocaleOption { value: "zh-CN", label: "中文 (简体)" },
];

/// Rótulo amigável; locales fora da lista voltam como estão.
pub fn locale_label(value: &str) -> &str {
    COMMON_LOCALES
        .iter()
        .find(|l| l.value == value)
        .map(|l| l.label)
        .unwrap_or(value)
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct TranslationRow {
    #[validate(custom(function = "not_blank", message = "Idioma é obrigatório"))]
    pub locale: String,
    #[validate(custom(function = "not_blank", message = "Tradução é obrigatória"))]
    pub value: String,
}

/// Linhas editáveis `(locale, valor)` que viram `meta.translations`.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
#[validate(schema(function = "unique_locales"))]
pub struct TranslationForm {
    #[validate(nested)]
    rows: Vec<TranslationRow>,
}

fn unique_locales(form: &TranslationForm) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for row in &form.rows {
        let locale = row.locale.trim();
        if !locale.is_empty() && !seen.insert(locale) {
            let mut err = ValidationError::new("duplicate_locale");
            err.message = Some(format!("Idioma repetido: {}", locale).into());
            return Err(err);
        }
    }
    Ok(())
}

impl TranslationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(translations: &BTreeMap<String, String>) -> Self {
        let rows = translations
            .iter()
            .map(|(locale, value)| TranslationRow {
                locale: locale.clone(),
                value: value.clone(),
            })
            .collect();
        Self { rows }
    }

    pub fn from_meta(meta: &Meta) -> Self {
        Self::from_map(&meta.translations)
    }

    pub fn rows(&self) -> &[TranslationRow] {
        &self.rows
    }

    fn used_locales(&self, except: Option<usize>) -> HashSet<&str> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != except)
            .map(|(_, r)| r.locale.as_str())
            .filter(|l| !l.is_empty())
            .collect()
    }

    /// Nova linha com o primeiro locale comum ainda livre; se todos já
    /// estiverem em uso, a linha começa com locale vazio.
    pub fn add_row(&mut self) -> usize {
        let used = self.used_locales(None);
        let locale = COMMON_LOCALES
            .iter()
            .find(|l| !used.contains(l.value))
            .map(|l| l.value.to_string())
            .unwrap_or_default();

        self.rows.push(TranslationRow {
            locale,
            value: String::new(),
        });
        self.rows.len() - 1
    }

    fn row_mut(&mut self, index: usize) -> Result<&mut TranslationRow, AppError> {
        self.rows
            .get_mut(index)
            .ok_or_else(|| AppError::InvalidInput(format!("Tradução {} não existe", index)))
    }

    pub fn set_locale(&mut self, index: usize, locale: &str) -> Result<(), AppError> {
        self.row_mut(index)?.locale = locale.to_string();
        Ok(())
    }

    pub fn set_value(&mut self, index: usize, value: &str) -> Result<(), AppError> {
        self.row_mut(index)?.value = value.to_string();
        Ok(())
    }

    pub fn remove_row(&mut self, index: usize) -> Result<TranslationRow, AppError> {
        if index >= self.rows.len() {
            return Err(AppError::InvalidInput(format!("Tradução {} não existe", index)));
        }
        Ok(self.rows.remove(index))
    }

    /// Locales comuns que a linha `index` ainda pode escolher.
    pub fn available_locales(&self, index: usize) -> Vec<LocaleOption> {
        let used = self.used_locales(Some(index));
        COMMON_LOCALES
            .iter()
            .filter(|l| !used.contains(l.value))
            .copied()
            .collect()
    }

    /// Mapa final, com espaços removidos e linhas incompletas descartadas.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.rows
            .iter()
            .map(|r| (r.locale.trim(), r.value.trim()))
            .filter(|(l, v)| !l.is_empty() && !v.is_empty())
            .map(|(l, v)| (l.to_string(), v.to_string()))
            .collect()
    }

    /// Substitui as traduções de `meta`, preservando as outras chaves.
    pub fn apply_to(&self, meta: &mut Meta) {
        meta.translations = self.to_map();
    }
}

/// Regra usada pelos payloads com `meta`: nenhum locale vazio, nenhum texto em branco.
pub fn validate_translations(meta: &Meta) -> Result<(), ValidationError> {
    for (locale, value) in &meta.translations {
        if locale.trim().is_empty() || value.trim().is_empty() {
            let mut err = ValidationError::new("translation");
            err.message = Some("Traduções precisam de idioma e texto".into());
            return Err(err);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_row_picks_first_unused_common_locale() {
        let mut form = TranslationForm::new();
        form.add_row();
        form.add_row();
        assert_eq!(form.rows()[0].locale, "pt-BR");
        assert_eq!(form.rows()[1].locale, "en-US");

        form.set_locale(0, "es-ES").unwrap();
        let idx = form.add_row();
        assert_eq!(form.rows()[idx].locale, "pt-BR");
    }

    #[test]
    fn add_row_leaves_locale_empty_when_all_common_are_used() {
        let mut form = TranslationForm::new();
        for _ in COMMON_LOCALES {
            form.add_row();
        }
        let idx = form.add_row();
        assert_eq!(form.rows()[idx].locale, "");
        assert_eq!(form.rows().len(), COMMON_LOCALES.len() + 1);
    }

    #[test]
    fn available_locales_excludes_other_rows_only() {
        let mut form = TranslationForm::new();
        form.add_row();
        form.add_row();

        let for_first: Vec<_> = form.available_locales(0).iter().map(|l| l.value).collect();
        assert!(for_first.contains(&"pt-BR"));
        assert!(!for_first.contains(&"en-US"));
    }

    #[test]
    fn validate_flags_blank_values_and_duplicates() {
        let mut form = TranslationForm::new();
        form.add_row();
        assert!(form.validate().is_err());

        form.set_value(0, "Exportar").unwrap();
        assert!(form.validate().is_ok());

        form.add_row();
        form.set_locale(1, "pt-BR").unwrap();
        form.set_value(1, "Outra").unwrap();
        assert!(form.validate().is_err());
    }

    #[test]
    fn to_map_trims_and_drops_incomplete_rows() {
        let mut form = TranslationForm::new();
        form.add_row();
        form.set_value(0, "  Exportar ").unwrap();
        form.add_row();

        let map = form.to_map();
        assert_eq!(map.len(), 1);
        assert_eq!(map["pt-BR"], "Exportar");
    }

    #[test]
    fn apply_keeps_other_meta_keys() {
        let mut meta = Meta::default();
        meta.extra.insert("icon".into(), serde_json::json!("chart"));

        let mut form = TranslationForm::from_meta(&meta);
        form.add_row();
        form.set_value(0, "Relatórios").unwrap();
        form.apply_to(&mut meta);

        assert_eq!(meta.translations["pt-BR"], "Relatórios");
        assert_eq!(meta.extra["icon"], "chart");
    }

    #[test]
    fn labels_fall_back_to_the_code() {
        assert_eq!(locale_label("de-DE"), "Deutsch");
        assert_eq!(locale_label("pt-PT"), "pt-PT");
    }

    #[test]
    fn remove_out_of_range_is_an_error() {
        assert!(TranslationForm::new().remove_row(3).is_err());
    }
}
