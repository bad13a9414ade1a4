// src/handlers/resources.rs

use std::path::Path;

use serde_json::{json, Value};
use validator::Validate;

use crate::{
    cli::{ListArgs, PayloadArgs, ResourceAction},
    common::{
        error::AppError,
        i18n::{Locale, MessageKey},
    },
    forms::TranslationForm,
    handlers::{confirm, notice, print_json},
    models::common::Meta,
    pages::{FormPage, ListPage},
    services::{Resource, ResourceService},
};

/// CRUD genérico da linha de comando, igual para todos os recursos.
pub async fn run<R: Resource>(
    service: &ResourceService<R>,
    action: ResourceAction,
    locale: Locale,
) -> Result<(), AppError> {
    match action {
        ResourceAction::List(args) => list(service, args).await,
        ResourceAction::Get { id } => {
            let mut form = FormPage::edit(service.clone(), ResourceService::<R>::parse_id(&id)?);
            match form.load().await? {
                Some(entity) => print_json(entity),
                None => Ok(()),
            }
        }
        ResourceAction::Create(args) => {
            let values = read_payload::<R>(&args).await?;
            let entity = FormPage::create(service.clone()).submit(values).await?;
            notice(locale.message(MessageKey::Created));
            print_json(&entity)
        }
        ResourceAction::Update { id, payload } => {
            let id = ResourceService::<R>::parse_id(&id)?;
            let values = read_payload::<R>(&payload).await?;
            let entity = FormPage::edit(service.clone(), id).submit(values).await?;
            notice(locale.message(MessageKey::Updated));
            print_json(&entity)
        }
        ResourceAction::Delete { id, yes } => delete(service, &id, yes, locale).await,
    }
}

async fn list<R: Resource>(service: &ResourceService<R>, args: ListArgs) -> Result<(), AppError> {
    let mut page = ListPage::new(service.clone());
    if let Some(limit) = args.limit {
        page = page.with_limit(limit);
    }
    if let Some(q) = &args.q {
        page.set_search(q);
    }
    if let Some(n) = args.page {
        page.go_to_page(n);
    }

    page.fetch().await?;
    print_json(&json!({
        "results": page.items(),
        "total": page.total(),
        "page": page.page(),
        "limit": page.limit(),
        "totalPages": page.total_pages(),
    }))
}

async fn delete<R: Resource>(
    service: &ResourceService<R>,
    raw_id: &str,
    yes: bool,
    locale: Locale,
) -> Result<(), AppError> {
    let id = ResourceService::<R>::parse_id(raw_id)?;

    if !yes {
        let entity = service.get_by_id(&id).await?;
        let question = format!("{} \"{}\"?", locale.message(MessageKey::ConfirmDelete), R::display_name(&entity));
        if !confirm(&question).await? {
            tracing::info!("Exclusão cancelada");
            return Ok(());
        }
    }

    let mut page = ListPage::new(service.clone());
    page.request_delete(id);
    page.confirm_delete().await?;

    notice(locale.message(MessageKey::Deleted));
    Ok(())
}

async fn read_payload<R: Resource>(args: &PayloadArgs) -> Result<Value, AppError> {
    let mut values = read_json_file(&args.file).await?;
    apply_translations::<R>(&mut values, &args.translations)?;
    Ok(values)
}

async fn read_json_file(path: &Path) -> Result<Value, AppError> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

/// Mescla as traduções da linha de comando em `meta.translations`.
///
/// `LOCALE=TEXTO` substitui/insere aquele locale; `TEXTO` sozinho ocupa o
/// próximo idioma comum livre.
pub fn apply_translations<R: Resource>(values: &mut Value, translations: &[String]) -> Result<(), AppError> {
    if translations.is_empty() {
        return Ok(());
    }
    if !R::has_translations() {
        return Err(AppError::InvalidInput(format!("{} não aceitam traduções", R::plural())));
    }

    let object = values
        .as_object_mut()
        .ok_or_else(|| AppError::InvalidInput("O payload deve ser um objeto JSON".into()))?;

    let mut meta: Meta = match object.get("meta") {
        Some(raw) if !raw.is_null() => serde_json::from_value(raw.clone())?,
        _ => Meta::default(),
    };

    let mut form = TranslationForm::from_meta(&meta);
    for entry in translations {
        match entry.split_once('=') {
            Some((locale, text)) => {
                let locale = locale.trim();
                let index = match form.rows().iter().position(|r| r.locale == locale) {
                    Some(index) => index,
                    None => {
                        let index = form.add_row();
                        form.set_locale(index, locale)?;
                        index
                    }
                };
                form.set_value(index, text)?;
            }
            None => {
                let index = form.add_row();
                form.set_value(index, entry)?;
            }
        }
    }

    form.validate()?;
    form.apply_to(&mut meta);
    object.insert("meta".into(), serde_json::to_value(&meta)?);
    Ok(())
}
