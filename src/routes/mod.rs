use actix_web::http::{header, StatusCode};
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder};

use crate::store::{Flash, Session, StoreError};

pub mod list;
pub mod todo;

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponseBuilder::new(StatusCode::SEE_OTHER)
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}

/// The delete forms submit over XHR; those requests get a bare 204 instead
/// of a redirect.
pub fn is_ajax(req: &HttpRequest) -> bool {
    req.headers()
        .get("X-Requested-With")
        .map_or(false, |value| value.as_bytes() == b"XMLHttpRequest")
}

/// Missing list/todo ids all recover the same way: flash the message and
/// send the user back to the index.
pub fn not_found_redirect(session: &mut Session, error: StoreError) -> HttpResponse {
    session.set_flash(Flash::Error(error.to_string()));
    redirect("/lists")
}
