// src/items/views.rs
//! Server-rendered HTML pages for items

use super::models::{Item, ItemFormData};
use crate::common::{MessageSource, ValidationResult};

/// Everything a form page needs to redisplay input and attach errors
pub struct FormView<'a> {
    pub form: &'a ItemFormData,
    pub errors: &'a ValidationResult,
    pub messages: &'a MessageSource,
    pub locale: &'a str,
}

impl FormView<'_> {
    /// Submitted value for `field`, preferring the value recorded by an error
    fn value(&self, field: &str, submitted: &Option<String>) -> String {
        self.errors
            .rejected_value(field)
            .map(str::to_string)
            .or_else(|| submitted.clone())
            .unwrap_or_default()
    }

    fn global_errors(&self) -> String {
        let messages: Vec<String> = self
            .errors
            .global_errors()
            .map(|e| {
                format!(
                    r#"<p class="field-error">{}</p>"#,
                    escape_html(&self.messages.message(e, self.locale))
                )
            })
            .collect();

        if messages.is_empty() {
            String::new()
        } else {
            format!(r#"<div class="global-errors">{}</div>"#, messages.join(""))
        }
    }

    fn field(&self, field: &str, label: &str, submitted: &Option<String>) -> String {
        let has_errors = self.errors.has_field_errors(field);
        let messages: Vec<String> = self
            .errors
            .field_errors(field)
            .map(|e| escape_html(&self.messages.message(e, self.locale)))
            .collect();

        let error_block = if has_errors {
            format!(r#"<div class="field-error">{}</div>"#, messages.join("<br>"))
        } else {
            String::new()
        };

        format!(
            r#"<div>
                <label for="{field}">{label}</label>
                <input type="text" id="{field}" name="{field}" class="{class}" value="{value}" placeholder="{label}">
                {error_block}
            </div>"#,
            field = field,
            label = label,
            class = if has_errors { "form-control field-error" } else { "form-control" },
            value = escape_html(&self.value(field, submitted)),
            error_block = error_block,
        )
    }

    fn fields(&self) -> String {
        [
            self.field("itemName", "Item name", &self.form.item_name),
            self.field("price", "Price", &self.form.price),
            self.field("quantity", "Quantity", &self.form.quantity),
        ]
        .join("\n")
    }
}

pub fn items_page(items: &[Item]) -> String {
    let rows: Vec<String> = items
        .iter()
        .map(|item| {
            let id = item.id.unwrap_or_default();
            format!(
                r#"<tr><td><a href="/items/{id}">{id}</a></td><td><a href="/items/{id}">{name}</a></td><td>{price}</td><td>{quantity}</td></tr>"#,
                id = id,
                name = escape_html(item.item_name.as_deref().unwrap_or("")),
                price = display_number(item.price),
                quantity = display_number(item.quantity),
            )
        })
        .collect();

    layout(
        "Items",
        &format!(
            r#"<h2>Items</h2>
            <p><button onclick="location.href='/items/add'" type="button">Add item</button></p>
            <table>
                <thead><tr><th>ID</th><th>Item name</th><th>Price</th><th>Quantity</th></tr></thead>
                <tbody>{}</tbody>
            </table>"#,
            rows.join("\n")
        ),
    )
}

pub fn item_page(item: &Item, saved: bool) -> String {
    let id = item.id.unwrap_or_default();
    let banner = if saved {
        r#"<h2 class="status">Item saved</h2>"#
    } else {
        ""
    };

    layout(
        "Item",
        &format!(
            r#"<h2>Item</h2>
            {banner}
            <dl>
                <dt>ID</dt><dd id="itemId">{id}</dd>
                <dt>Item name</dt><dd id="itemName">{name}</dd>
                <dt>Price</dt><dd id="price">{price}</dd>
                <dt>Quantity</dt><dd id="quantity">{quantity}</dd>
            </dl>
            <p>
                <button onclick="location.href='/items/{id}/edit'" type="button">Edit</button>
                <button onclick="location.href='/items'" type="button">List</button>
            </p>"#,
            banner = banner,
            id = id,
            name = escape_html(item.item_name.as_deref().unwrap_or("")),
            price = display_number(item.price),
            quantity = display_number(item.quantity),
        ),
    )
}

pub fn add_form_page(view: &FormView<'_>) -> String {
    layout(
        "Add item",
        &format!(
            r#"<h2>Add item</h2>
            <form action="/items/add" method="post">
                {global}
                {fields}
                <button type="submit">Save</button>
                <button onclick="location.href='/items'" type="button">Cancel</button>
            </form>"#,
            global = view.global_errors(),
            fields = view.fields(),
        ),
    )
}

pub fn edit_form_page(item_id: u64, view: &FormView<'_>) -> String {
    layout(
        "Edit item",
        &format!(
            r#"<h2>Edit item</h2>
            <form action="/items/{id}/edit" method="post">
                {global}
                <div>
                    <label for="id">ID</label>
                    <input type="text" id="id" name="id" class="form-control" value="{id}" readonly>
                </div>
                {fields}
                <button type="submit">Save</button>
                <button onclick="location.href='/items/{id}'" type="button">Cancel</button>
            </form>"#,
            id = item_id,
            global = view.global_errors(),
            fields = view.fields(),
        ),
    )
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>
        body {{ font-family: Arial, sans-serif; max-width: 560px; margin: 40px auto; }}
        .field-error {{ border-color: #dc3545; color: #dc3545; }}
        .status {{ color: #198754; }}
    </style>
</head>
<body>
{body}
</body>
</html>"#,
        title = escape_html(title),
        body = body,
    )
}

fn display_number(value: Option<i32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
