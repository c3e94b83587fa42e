use actix_web::{
    http::StatusCode,
    web::{self, ServiceConfig},
    HttpRequest, HttpResponseBuilder, Responder,
};
use serde::Deserialize;

use crate::session::SessionId;
use crate::store::{Flash, SessionStore, StoreError};
use crate::views::ListPage;

#[derive(Deserialize)]
struct TodoFormData {
    todo: String,
}

async fn post_todo(
    req: HttpRequest,
    id: web::Path<u64>,
    form: web::Form<TodoFormData>,
    store: web::Data<SessionStore>,
) -> impl Responder {
    let sid = SessionId::obtain(&req);
    let id = id.into_inner();
    let name = form.into_inner().todo.trim().to_string();
    let sessions_mutex = store.get_sessions();
    let mut sessions = sessions_mutex.lock().unwrap();
    let session = sessions.entry(sid.id()).or_default();

    match session.add_todo(id, &name) {
        Ok(_) => {
            session.set_flash(Flash::Success("The todo was added.".to_string()));
            sid.respond(super::redirect(&format!("/list/{}", id)))
        }
        Err(StoreError::Validation(message)) => match session.find_list(id) {
            Some(list) => {
                let page = ListPage::new(list, None, Some(message));
                sid.respond(HttpResponseBuilder::new(StatusCode::UNPROCESSABLE_ENTITY).json(page))
            }
            None => sid.respond(super::not_found_redirect(session, StoreError::ListNotFound(id))),
        },
        Err(error) => sid.respond(super::not_found_redirect(session, error)),
    }
}

#[derive(Deserialize)]
struct ToggleFormData {
    completed: bool,
}

async fn toggle_todo(
    req: HttpRequest,
    path: web::Path<(u64, u64)>,
    form: web::Form<ToggleFormData>,
    store: web::Data<SessionStore>,
) -> impl Responder {
    let sid = SessionId::obtain(&req);
    let (list_id, todo_id) = path.into_inner();
    let completed = form.into_inner().completed;
    let sessions_mutex = store.get_sessions();
    let mut sessions = sessions_mutex.lock().unwrap();
    let session = sessions.entry(sid.id()).or_default();

    match session.toggle_todo(list_id, todo_id, completed) {
        Ok(()) => {
            session.set_flash(Flash::Success("The todo has been updated.".to_string()));
            sid.respond(super::redirect(&format!("/list/{}", list_id)))
        }
        Err(error) => sid.respond(super::not_found_redirect(session, error)),
    }
}

async fn delete_todo(
    req: HttpRequest,
    path: web::Path<(u64, u64)>,
    store: web::Data<SessionStore>,
) -> impl Responder {
    let sid = SessionId::obtain(&req);
    let (list_id, todo_id) = path.into_inner();
    let sessions_mutex = store.get_sessions();
    let mut sessions = sessions_mutex.lock().unwrap();
    let session = sessions.entry(sid.id()).or_default();

    match session.delete_todo(list_id, todo_id) {
        Ok(_) if super::is_ajax(&req) => {
            sid.respond(HttpResponseBuilder::new(StatusCode::NO_CONTENT).finish())
        }
        Ok(_) => {
            session.set_flash(Flash::Success("The todo has been deleted.".to_string()));
            sid.respond(super::redirect(&format!("/list/{}", list_id)))
        }
        Err(error) => sid.respond(super::not_found_redirect(session, error)),
    }
}

pub fn configure_routes(config: &mut ServiceConfig) {
    config.route("/{id}/todos", web::post().to(post_todo));
    config.route("/{id}/todo/{todo_id}", web::post().to(toggle_todo));
    config.route("/{id}/todo/{todo_id}/delete", web::post().to(delete_todo));
}
