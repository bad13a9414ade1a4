// src/services/accounts.rs

use validator::ValidationErrors;

use crate::models::account::{
    Account, AccountsListParams, CreateAccountPayload, UpdateAccountPayload,
};
use crate::services::resource::{Resource, ResourceService};

pub struct Accounts;

impl Resource for Accounts {
    type Id = String;
    type Entity = Account;
    type Create = CreateAccountPayload;
    type Update = UpdateAccountPayload;
    type ListParams = AccountsListParams;

    fn path() -> &'static str {
        "/api/accounts"
    }

    fn singular() -> &'static str {
        "account"
    }

    fn plural() -> &'static str {
        "accounts"
    }

    fn id_of(entity: &Account) -> String {
        entity.id.clone()
    }

    fn display_name(entity: &Account) -> String {
        entity.name.clone()
    }

    // Senha obrigatória quando não há dono existente
    fn validate_create(payload: &CreateAccountPayload) -> Result<(), ValidationErrors> {
        payload.validate_form()
    }
}

pub type AccountService = ResourceService<Accounts>;
