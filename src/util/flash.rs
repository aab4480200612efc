use axum_extra::extract::cookie::{Cookie, SignedCookieJar};

const FLASH_COOKIE: &str = "flash";

/// Queues a one-shot notification message for the next rendered page.
///
/// The message rides in a signed cookie so it survives exactly one redirect;
/// the jar must be returned as part of the response for the cookie to be set.
pub fn flash(jar: SignedCookieJar, message: impl Into<String>) -> SignedCookieJar {
    let mut cookie = Cookie::new(FLASH_COOKIE, message.into());
    cookie.set_path("/");
    jar.add(cookie)
}

/// Consumes any pending flash message.
///
/// Returns the jar with the cookie removed, so rendering the page also clears
/// the message. A message is therefore shown at most once.
pub fn take_flash(jar: SignedCookieJar) -> (SignedCookieJar, Vec<String>) {
    match jar.get(FLASH_COOKIE) {
        Some(cookie) => {
            let message = cookie.value().to_string();
            let mut removal = Cookie::from(FLASH_COOKIE);
            removal.set_path("/");
            (jar.remove(removal), vec![message])
        }
        None => (jar, vec![]),
    }
}
