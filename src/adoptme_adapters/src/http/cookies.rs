use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};

/// Names of the two session cookies.
#[derive(Debug, Clone)]
pub struct SessionCookies {
    pub session: String,
    pub unprotected: String,
}

// Create a session cookie holding `token` that expires with it
pub fn create_session_cookie(name: &str, token: String, max_age_seconds: i64) -> Cookie<'static> {
    Cookie::build((name.to_owned(), token))
        .path("/") // apply cookie to all URLs on the server
        .http_only(true) // prevent JavaScript from accessing the cookie
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age_seconds))
        .build()
}

pub fn extract_token<'a>(jar: &'a CookieJar, cookie_name: &str) -> Option<&'a str> {
    jar.get(cookie_name).map(|cookie| cookie.value())
}
