use actix_web::cookie::Cookie;
use actix_web::{HttpRequest, HttpResponse};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "todo_session";

/// Session id resolved from the request cookie, or freshly minted when the
/// cookie is missing or unparseable.
pub struct SessionId {
    id: Uuid,
    fresh: bool,
}

impl SessionId {
    pub fn obtain(req: &HttpRequest) -> Self {
        match req
            .cookie(SESSION_COOKIE)
            .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
        {
            Some(id) => Self { id, fresh: false },
            None => Self {
                id: Uuid::new_v4(),
                fresh: true,
            },
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Attaches the session cookie to the response when this request minted
    /// a new id.
    pub fn respond(&self, mut response: HttpResponse) -> HttpResponse {
        if self.fresh {
            let cookie = Cookie::build(SESSION_COOKIE, self.id.to_string())
                .path("/")
                .http_only(true)
                .finish();
            let _ = response.add_cookie(&cookie);
        }
        response
    }
}
