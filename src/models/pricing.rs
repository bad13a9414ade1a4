// src/models/pricing.rs

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Brl,
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    /// Ordem usada pelo Plan Builder ao sugerir a próxima moeda.
    pub const ALL: [Currency; 4] = [Currency::Brl, Currency::Usd, Currency::Eur, Currency::Gbp];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Brl => "BRL",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Brl => "R$",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("moeda desconhecida: {}", s))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResetPeriod {
    Monthly,
    Yearly,
    #[default]
    Lifetime,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BillingPeriod {
    #[default]
    Monthly,
    Yearly,
}

/// Um preço numa moeda. `is_default` marca o preço canônico daquela moeda.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub currency: Currency,
    #[validate(custom(function = "validate_non_negative"))]
    pub price: Decimal,
    #[serde(default)]
    pub is_default: bool,
}

impl Price {
    pub fn default_in(currency: Currency) -> Self {
        Self {
            currency,
            price: Decimal::ZERO,
            is_default: true,
        }
    }
}

pub fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut err = ValidationError::new("negative_price");
        err.message = Some("Preço deve ser maior ou igual a 0".into());
        return Err(err);
    }
    Ok(())
}

/// Formata no padrão do painel: "R$ 1.234,50" para BRL, "$ 1,234.50" para as demais.
pub fn format_money(currency: Currency, amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let raw = format!("{:.2}", rounded);
    let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));
    let (negative, digits) = match int_part.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, int_part),
    };
    let (thousands, decimal) = match currency {
        Currency::Brl | Currency::Eur => ('.', ','),
        Currency::Usd | Currency::Gbp => (',', '.'),
    };

    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(thousands);
        }
        grouped.push(ch);
    }

    format!(
        "{} {}{}{}{}",
        currency.symbol(),
        if negative { "-" } else { "" },
        grouped,
        decimal,
        frac_part
    )
}
