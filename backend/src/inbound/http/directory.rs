//! Directory page handlers.
//!
//! ```text
//! GET  /        list every contact
//! POST /        search by name or phone
//! GET  /add     add form
//! POST /add     add a contact (admin password required)
//! GET  /remove  remove form
//! POST /remove  remove a contact (admin password required)
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};

use crate::domain::ports::{SearchRequest, SearchType};
use crate::inbound::http::error::{html_error, html_ok};
use crate::inbound::http::forms::{AddContactForm, RemoveContactForm, SearchForm};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{self, IndexView};

fn redirect_home() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish()
}

/// Full listing with an empty search form.
#[get("/")]
pub async fn list_contacts(state: web::Data<HttpState>) -> HttpResponse {
    match state.query.list_contacts().await {
        Ok(listing) => html_ok(views::index_page(&IndexView {
            contacts: &listing.contacts,
            total_count: listing.total_count,
            query: "",
            search_type: SearchType::Name,
            show_full_list: true,
        })),
        Err(err) => html_error(&err, views::error_page(err.message())),
    }
}

/// Search results, echoing the submitted query and search type.
#[post("/")]
pub async fn search_contacts(
    state: web::Data<HttpState>,
    form: web::Form<SearchForm>,
) -> HttpResponse {
    let request = SearchRequest::from(form.into_inner());
    match state.query.search_contacts(&request).await {
        Ok(listing) => html_ok(views::index_page(&IndexView {
            contacts: &listing.contacts,
            total_count: listing.total_count,
            query: &request.query,
            search_type: request.search_type,
            show_full_list: false,
        })),
        Err(err) => html_error(&err, views::error_page(err.message())),
    }
}

/// Empty add form.
#[get("/add")]
pub async fn add_form() -> HttpResponse {
    html_ok(views::add_page(None, "", ""))
}

/// Add a contact, or re-render the form with the reason it was refused.
#[post("/add")]
pub async fn add_contact(
    state: web::Data<HttpState>,
    form: web::Form<AddContactForm>,
) -> HttpResponse {
    let form = form.into_inner();
    let phone = form.phone.clone();
    let name = form.name.clone();
    match state.command.add_contact(form.into()).await {
        Ok(_) => redirect_home(),
        Err(err) => html_error(&err, views::add_page(Some(err.message()), &phone, &name)),
    }
}

/// Empty remove form.
#[get("/remove")]
pub async fn remove_form() -> HttpResponse {
    html_ok(views::remove_page(None, ""))
}

/// Remove a contact, or re-render the form with the reason it was refused.
#[post("/remove")]
pub async fn remove_contact(
    state: web::Data<HttpState>,
    form: web::Form<RemoveContactForm>,
) -> HttpResponse {
    let form = form.into_inner();
    let phone = form.phone.clone();
    match state.command.remove_contact(form.into()).await {
        Ok(_) => redirect_home(),
        Err(err) => html_error(&err, views::remove_page(Some(err.message()), &phone)),
    }
}

#[cfg(test)]
#[path = "directory_tests.rs"]
mod tests;
