use axum::{
    extract::{rejection::FormRejection, Extension, Path, Query},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use std::sync::Arc;
use tracing::{info, warn};

use super::models::{ItemDetailQuery, ItemFormData, ITEM_OBJECT_NAME};
use super::views::{self, FormView};
use crate::common::{ApiError, AppState, ValidationResult};

// ============================================================================
// Read Handlers
// ============================================================================

/// GET /items - List all items
pub async fn list_items(Extension(state): Extension<Arc<AppState>>) -> Html<String> {
    let items = state.items.find_all().await;
    Html(views::items_page(&items))
}

/// GET /items/:id - Item detail, with a saved banner after `?status=true`
pub async fn get_item(
    Extension(state): Extension<Arc<AppState>>,
    Path(item_id): Path<u64>,
    Query(query): Query<ItemDetailQuery>,
) -> Result<Html<String>, ApiError> {
    let item = state
        .items
        .find_by_id(item_id)
        .await
        .ok_or_else(|| ApiError::item_not_found(item_id))?;

    Ok(Html(views::item_page(&item, query.status.unwrap_or(false))))
}

// ============================================================================
// Create Handlers
// ============================================================================

/// GET /items/add - Empty add form
pub async fn add_form(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
) -> Html<String> {
    let locale = state.messages.resolve_locale(&headers);
    let form = ItemFormData::default();
    let errors = ValidationResult::new(ITEM_OBJECT_NAME);

    Html(views::add_form_page(&FormView {
        form: &form,
        errors: &errors,
        messages: &state.messages,
        locale: &locale,
    }))
}

/// POST /items/add - Bind, validate, then save and redirect or redisplay the form
pub async fn add_item(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    form: Result<Form<ItemFormData>, FormRejection>,
) -> Result<Response, ApiError> {
    let Form(form) = form.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let (item, mut result) = form.bind();
    result.merge(state.item_validators.validate(&item));

    if result.has_errors() {
        info!(errors = %result, "Item form rejected");
        let locale = state.messages.resolve_locale(&headers);
        let page = views::add_form_page(&FormView {
            form: &form,
            errors: &result,
            messages: &state.messages,
            locale: &locale,
        });
        return Ok(Html(page).into_response());
    }

    let saved = state.items.save(item).await;
    let item_id = saved.id.unwrap_or_default();
    info!(item_id = item_id, "Item saved");

    Ok(Redirect::to(&format!("/items/{}?status=true", item_id)).into_response())
}

// ============================================================================
// Edit Handlers
// ============================================================================

/// GET /items/:id/edit - Edit form pre-filled from the stored item
pub async fn edit_form(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    Path(item_id): Path<u64>,
) -> Result<Html<String>, ApiError> {
    let item = state
        .items
        .find_by_id(item_id)
        .await
        .ok_or_else(|| ApiError::item_not_found(item_id))?;

    let locale = state.messages.resolve_locale(&headers);
    let form = ItemFormData::from_item(&item);
    let errors = ValidationResult::new(ITEM_OBJECT_NAME);

    Ok(Html(views::edit_form_page(
        item_id,
        &FormView {
            form: &form,
            errors: &errors,
            messages: &state.messages,
            locale: &locale,
        },
    )))
}

/// POST /items/:id/edit - Update the item and redirect to its detail page.
///
/// Only binding errors block the update; the item rules run here only when
/// `VALIDATE_ON_EDIT` is enabled.
pub async fn edit_item(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    Path(item_id): Path<u64>,
    form: Result<Form<ItemFormData>, FormRejection>,
) -> Result<Response, ApiError> {
    let Form(form) = form.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    if state.items.find_by_id(item_id).await.is_none() {
        return Err(ApiError::item_not_found(item_id));
    }

    let (item, mut result) = form.bind();
    if state.config.validate_on_edit {
        result.merge(state.item_validators.validate(&item));
    }

    if result.has_errors() {
        info!(item_id = item_id, errors = %result, "Item edit rejected");
        let locale = state.messages.resolve_locale(&headers);
        let page = views::edit_form_page(
            item_id,
            &FormView {
                form: &form,
                errors: &result,
                messages: &state.messages,
                locale: &locale,
            },
        );
        return Ok(Html(page).into_response());
    }

    match state.items.update(item_id, &item).await {
        Some(_) => {
            info!(item_id = item_id, "Item updated");
            Ok(Redirect::to(&format!("/items/{}", item_id)).into_response())
        }
        None => {
            warn!(item_id = item_id, "Item removed before update");
            Err(ApiError::item_not_found(item_id))
        }
    }
}
