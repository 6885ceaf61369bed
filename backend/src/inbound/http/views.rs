//! Server-side HTML rendering for the directory pages.
//!
//! Pages are assembled as strings; every piece of user-supplied text goes
//! through [`escape_html`] before it is written.

use crate::domain::ports::SearchType;
use crate::domain::{Contact, NAME_MAX, PHONE_MAX};

const STYLE: &str = "body{font-family:sans-serif;max-width:40rem;margin:2rem auto;padding:0 1rem}\
table{border-collapse:collapse;width:100%}td,th{border-bottom:1px solid #ddd;padding:.4rem;text-align:left}\
.error{color:#a40000;font-weight:bold}nav a{margin-right:1rem}";

/// Escape text for inclusion in HTML element content or quoted attributes.
///
/// # Examples
/// ```
/// use contact_directory::inbound::http::views::escape_html;
///
/// assert_eq!(escape_html("<b>\"Tom\" & 'Jerry'</b>"),
///     "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
/// ```
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn page(title: &str, content: &str) -> String {
    let escaped_title = escape_html(title);
    let mut html = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{escaped_title}</title>\n<style>{STYLE}</style>\n"));
    html.push_str("</head>\n<body>\n");
    html.push_str("<nav><a href=\"/\">Directory</a><a href=\"/add\">Add</a><a href=\"/remove\">Remove</a></nav>\n");
    html.push_str(&format!("<h1>{escaped_title}</h1>\n"));
    html.push_str(content);
    html.push_str("</body>\n</html>\n");
    html
}

fn error_block(error: Option<&str>) -> String {
    error.map_or_else(String::new, |message| {
        format!("<p class=\"error\">{}</p>\n", escape_html(message))
    })
}

fn radio(value: SearchType, selected: SearchType, label: &str) -> String {
    let checked = if value == selected { " checked" } else { "" };
    format!(
        "<label><input type=\"radio\" name=\"search_type\" value=\"{}\"{checked}> {label}</label>",
        value.as_form_value()
    )
}

fn password_field() -> &'static str {
    "<p><label>Admin password <input type=\"password\" name=\"admin_pass\" required></label></p>\n"
}

fn phone_field(phone: &str) -> String {
    format!(
        "<p><label>Phone <input type=\"text\" name=\"phone\" maxlength=\"{PHONE_MAX}\" value=\"{}\" required></label></p>\n",
        escape_html(phone)
    )
}

/// Data shown on the index page.
#[derive(Debug, Clone, Copy)]
pub struct IndexView<'a> {
    pub contacts: &'a [Contact],
    pub total_count: u64,
    pub query: &'a str,
    pub search_type: SearchType,
    /// `true` for the unfiltered listing, `false` for search results.
    pub show_full_list: bool,
}

/// Render the listing and search page.
pub fn index_page(view: &IndexView<'_>) -> String {
    let query = escape_html(view.query);
    let mut html = String::from("<form method=\"post\" action=\"/\">\n");
    html.push_str(&format!(
        "<input type=\"text\" name=\"query\" value=\"{query}\" placeholder=\"Search\">\n"
    ));
    html.push_str(&radio(SearchType::Name, view.search_type, "Name"));
    html.push_str(&radio(SearchType::Phone, view.search_type, "Phone"));
    html.push_str("\n<button type=\"submit\">Search</button>\n</form>\n");

    html.push_str(&format!(
        "<p>Total contacts: <strong id=\"total-count\">{}</strong></p>\n",
        view.total_count
    ));

    if view.show_full_list {
        html.push_str("<h2>All contacts</h2>\n");
    } else {
        html.push_str(&format!("<h2>Results for &quot;{query}&quot;</h2>\n"));
    }

    if view.contacts.is_empty() {
        html.push_str("<p class=\"empty\">No contacts found.</p>\n");
    } else {
        html.push_str("<table>\n<thead><tr><th>Name</th><th>Phone</th></tr></thead>\n<tbody>\n");
        for contact in view.contacts {
            html.push_str(&format!(
                "<tr class=\"contact\"><td>{}</td><td>{}</td></tr>\n",
                escape_html(contact.name().as_ref()),
                escape_html(contact.phone().as_ref())
            ));
        }
        html.push_str("</tbody>\n</table>\n");
    }

    page("Contact Directory", &html)
}

/// Render a bare page carrying only an error message.
pub fn error_page(message: &str) -> String {
    page("Contact Directory", &error_block(Some(message)))
}

/// Render the add form, keeping previously submitted values.
pub fn add_page(error: Option<&str>, phone: &str, name: &str) -> String {
    let mut html = error_block(error);
    html.push_str("<form method=\"post\" action=\"/add\">\n");
    html.push_str(password_field());
    html.push_str(&phone_field(phone));
    html.push_str(&format!(
        "<p><label>Name <input type=\"text\" name=\"name\" maxlength=\"{NAME_MAX}\" value=\"{}\" required></label></p>\n",
        escape_html(name)
    ));
    html.push_str("<button type=\"submit\">Add contact</button>\n</form>\n");
    page("Add Contact", &html)
}

/// Render the remove form, keeping the previously submitted phone.
pub fn remove_page(error: Option<&str>, phone: &str) -> String {
    let mut html = error_block(error);
    html.push_str("<form method=\"post\" action=\"/remove\">\n");
    html.push_str(password_field());
    html.push_str(&phone_field(phone));
    html.push_str("<button type=\"submit\">Remove contact</button>\n</form>\n");
    page("Remove Contact", &html)
}
