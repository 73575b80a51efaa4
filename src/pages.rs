//! Server-rendered pages: home, login, registration, dashboards.
//!
//! Markup is assembled with `format!`; every user-sourced value goes
//! through [`escape_html`] first. Form failures re-render the page
//! with the message inline instead of answering JSON.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;

use crate::{
    api::session::{expired_session_cookie, session_cookie, SessionUser},
    error::{AppError, AppResult},
    models::{Book, BorrowedBook, RegisterUser},
};

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{} | Lectern</title>\n</head>\n<body>\n{}\n</body>\n</html>",
        escape_html(title),
        body
    ))
}

fn error_banner(error: Option<&str>) -> String {
    match error {
        Some(message) => format!("<p class=\"error\">{}</p>\n", escape_html(message)),
        None => String::new(),
    }
}

fn book_rows(books: &[Book]) -> String {
    books
        .iter()
        .map(|book| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                book.id,
                escape_html(&book.title),
                escape_html(&book.author),
                book.published_date,
                book.copies
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Home page
pub async fn home() -> Html<String> {
    layout(
        "Welcome",
        "<h1>Lectern</h1>\n\
         <p>A small library catalog.</p>\n\
         <ul>\n\
         <li><a href=\"/login/\">Log in</a></li>\n\
         <li><a href=\"/register/\">Register</a></li>\n\
         </ul>",
    )
}

fn login_page(error: Option<&str>) -> Html<String> {
    let body = format!(
        "<h1>Log in</h1>\n{}\
         <form method=\"post\" action=\"/login/\">\n\
         <label>Username <input type=\"text\" name=\"username\" required></label>\n\
         <label>Password <input type=\"password\" name=\"password\" required></label>\n\
         <button type=\"submit\">Log in</button>\n\
         </form>\n\
         <p>No account? <a href=\"/register/\">Register</a></p>",
        error_banner(error)
    );
    layout("Log in", &body)
}

fn register_page(error: Option<&str>) -> Html<String> {
    let body = format!(
        "<h1>Register</h1>\n{}\
         <form method=\"post\" action=\"/register/\">\n\
         <label>Username <input type=\"text\" name=\"username\" required></label>\n\
         <label>Email <input type=\"email\" name=\"email\" required></label>\n\
         <label>Password <input type=\"password\" name=\"password1\" required></label>\n\
         <label>Confirm password <input type=\"password\" name=\"password2\" required></label>\n\
         <button type=\"submit\">Register</button>\n\
         </form>\n\
         <p>Already registered? <a href=\"/login/\">Log in</a></p>",
        error_banner(error)
    );
    layout("Register", &body)
}

/// Login form
pub async fn login_form() -> Html<String> {
    login_page(None)
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Handle a login submission. Staff land on the admin dashboard,
/// members on theirs; bad credentials re-render the form.
pub async fn login(
    State(state): State<crate::AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    match state
        .services
        .accounts
        .authenticate(&form.username, &form.password)
        .await
    {
        Ok(user) => {
            let jar = jar.add(session_cookie(user.id));
            let target = if user.is_staff {
                "/admin-dashboard/"
            } else {
                "/user-dashboard/"
            };
            Ok((jar, Redirect::to(target)).into_response())
        }
        Err(AppError::Authentication(message)) => Ok(login_page(Some(&message)).into_response()),
        Err(e) => Err(e),
    }
}

/// Registration form
pub async fn register_form() -> Html<String> {
    register_page(None)
}

/// Handle a registration submission, then send the new member to the
/// login page.
pub async fn register(
    State(state): State<crate::AppState>,
    Form(form): Form<RegisterUser>,
) -> AppResult<Response> {
    match state.services.accounts.register(form).await {
        Ok(_) => Ok(Redirect::to("/login/").into_response()),
        Err(AppError::Validation(message)) | Err(AppError::Conflict(message)) => {
            Ok(register_page(Some(&message)).into_response())
        }
        Err(e) => Err(e),
    }
}

/// Clear the session and go back to the login page
pub async fn logout(jar: SignedCookieJar) -> (SignedCookieJar, Redirect) {
    (jar.remove(expired_session_cookie()), Redirect::to("/login/"))
}

/// Admin dashboard: the whole catalog
pub async fn admin_dashboard(
    State(state): State<crate::AppState>,
    SessionUser(user): SessionUser,
) -> AppResult<Html<String>> {
    let books = state.services.catalog.list_books().await?;

    let body = format!(
        "<h1>Admin dashboard</h1>\n\
         <p>Signed in as {} | <a href=\"/logout/\">Log out</a></p>\n\
         <h2>Catalog</h2>\n\
         <table>\n\
         <tr><th>ID</th><th>Title</th><th>Author</th><th>Published</th><th>Copies available</th></tr>\n\
         {}\n\
         </table>",
        escape_html(&user.username),
        book_rows(&books)
    );

    Ok(layout("Admin dashboard", &body))
}

fn borrowed_rows(borrowed: &[BorrowedBook]) -> String {
    borrowed
        .iter()
        .map(|b| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&b.title),
                escape_html(&b.author),
                b.borrowed_date.format("%Y-%m-%d")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Member dashboard: available books plus the member's outstanding
/// borrows
pub async fn user_dashboard(
    State(state): State<crate::AppState>,
    SessionUser(user): SessionUser,
) -> AppResult<Html<String>> {
    let available = state.services.catalog.available_books().await?;
    let borrowed = state.services.lending.borrowed_by_user(user.id).await?;

    let body = format!(
        "<h1>My library</h1>\n\
         <p>Signed in as {} | <a href=\"/logout/\">Log out</a></p>\n\
         <h2>Available books</h2>\n\
         <table>\n\
         <tr><th>ID</th><th>Title</th><th>Author</th><th>Published</th><th>Copies available</th></tr>\n\
         {}\n\
         </table>\n\
         <h2>My borrowed books</h2>\n\
         <table>\n\
         <tr><th>Title</th><th>Author</th><th>Borrowed on</th></tr>\n\
         {}\n\
         </table>",
        escape_html(&user.username),
        book_rows(&available),
        borrowed_rows(&borrowed)
    );

    Ok(layout("My library", &body))
}
