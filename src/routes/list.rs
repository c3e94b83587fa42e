use actix_web::{
    http::StatusCode,
    web::{self, ServiceConfig},
    HttpRequest, HttpResponseBuilder, Responder,
};
use serde::Deserialize;

use crate::session::SessionId;
use crate::store::{Flash, SessionStore, StoreError};
use crate::views::{EditListForm, ListPage, ListsPage, NewListForm};

async fn get_lists(req: HttpRequest, store: web::Data<SessionStore>) -> impl Responder {
    let sid = SessionId::obtain(&req);
    let sessions_mutex = store.get_sessions();
    let mut sessions = sessions_mutex.lock().unwrap();
    let session = sessions.entry(sid.id()).or_default();

    let flash = session.take_flash();
    let page = ListsPage::new(session.lists(), flash);
    sid.respond(HttpResponseBuilder::new(StatusCode::OK).json(page))
}

async fn new_list_form() -> impl Responder {
    let form = NewListForm {
        list_name: "",
        error: None,
    };
    HttpResponseBuilder::new(StatusCode::OK).json(form)
}

#[derive(Deserialize)]
struct ListNameFormData {
    list_name: String,
}

async fn post_lists(
    req: HttpRequest,
    form: web::Form<ListNameFormData>,
    store: web::Data<SessionStore>,
) -> impl Responder {
    let sid = SessionId::obtain(&req);
    let name = form.into_inner().list_name.trim().to_string();
    let sessions_mutex = store.get_sessions();
    let mut sessions = sessions_mutex.lock().unwrap();
    let session = sessions.entry(sid.id()).or_default();

    match session.create_list(&name) {
        Ok(_) => {
            session.set_flash(Flash::Success("The list has been created.".to_string()));
            sid.respond(super::redirect("/lists"))
        }
        Err(StoreError::Validation(message)) => {
            let form = NewListForm {
                list_name: &name,
                error: Some(message),
            };
            sid.respond(HttpResponseBuilder::new(StatusCode::UNPROCESSABLE_ENTITY).json(form))
        }
        Err(error) => sid.respond(super::not_found_redirect(session, error)),
    }
}

async fn get_list(
    req: HttpRequest,
    id: web::Path<u64>,
    store: web::Data<SessionStore>,
) -> impl Responder {
    let sid = SessionId::obtain(&req);
    let id = id.into_inner();
    let sessions_mutex = store.get_sessions();
    let mut sessions = sessions_mutex.lock().unwrap();
    let session = sessions.entry(sid.id()).or_default();

    let flash = session.take_flash();
    match session.find_list(id) {
        Some(list) => {
            let page = ListPage::new(list, flash, None);
            sid.respond(HttpResponseBuilder::new(StatusCode::OK).json(page))
        }
        None => sid.respond(super::not_found_redirect(session, StoreError::ListNotFound(id))),
    }
}

async fn rename_list(
    req: HttpRequest,
    id: web::Path<u64>,
    form: web::Form<ListNameFormData>,
    store: web::Data<SessionStore>,
) -> impl Responder {
    let sid = SessionId::obtain(&req);
    let id = id.into_inner();
    let name = form.into_inner().list_name.trim().to_string();
    let sessions_mutex = store.get_sessions();
    let mut sessions = sessions_mutex.lock().unwrap();
    let session = sessions.entry(sid.id()).or_default();

    match session.rename_list(id, &name) {
        Ok(()) => {
            session.set_flash(Flash::Success("The list has been updated.".to_string()));
            sid.respond(super::redirect(&format!("/list/{}", id)))
        }
        Err(StoreError::Validation(message)) => {
            let form = EditListForm {
                id,
                list_name: &name,
                error: Some(message),
            };
            sid.respond(HttpResponseBuilder::new(StatusCode::UNPROCESSABLE_ENTITY).json(form))
        }
        Err(error) => sid.respond(super::not_found_redirect(session, error)),
    }
}

async fn edit_list_form(
    req: HttpRequest,
    id: web::Path<u64>,
    store: web::Data<SessionStore>,
) -> impl Responder {
    let sid = SessionId::obtain(&req);
    let id = id.into_inner();
    let sessions_mutex = store.get_sessions();
    let mut sessions = sessions_mutex.lock().unwrap();
    let session = sessions.entry(sid.id()).or_default();

    match session.find_list(id) {
        Some(list) => {
            let form = EditListForm {
                id,
                list_name: &list.name,
                error: None,
            };
            sid.respond(HttpResponseBuilder::new(StatusCode::OK).json(form))
        }
        None => sid.respond(super::not_found_redirect(session, StoreError::ListNotFound(id))),
    }
}

async fn delete_list(
    req: HttpRequest,
    id: web::Path<u64>,
    store: web::Data<SessionStore>,
) -> impl Responder {
    let sid = SessionId::obtain(&req);
    let id = id.into_inner();
    let sessions_mutex = store.get_sessions();
    let mut sessions = sessions_mutex.lock().unwrap();
    let session = sessions.entry(sid.id()).or_default();

    match session.delete_list(id) {
        Ok(_) if super::is_ajax(&req) => {
            sid.respond(HttpResponseBuilder::new(StatusCode::NO_CONTENT).finish())
        }
        Ok(_) => {
            session.set_flash(Flash::Success("The list has been deleted.".to_string()));
            sid.respond(super::redirect("/lists"))
        }
        Err(error) => sid.respond(super::not_found_redirect(session, error)),
    }
}

async fn complete_all(
    req: HttpRequest,
    id: web::Path<u64>,
    store: web::Data<SessionStore>,
) -> impl Responder {
    let sid = SessionId::obtain(&req);
    let id = id.into_inner();
    let sessions_mutex = store.get_sessions();
    let mut sessions = sessions_mutex.lock().unwrap();
    let session = sessions.entry(sid.id()).or_default();

    match session.complete_all(id) {
        Ok(()) => {
            session.set_flash(Flash::Success("All todos have been completed.".to_string()));
            sid.respond(super::redirect(&format!("/list/{}", id)))
        }
        Err(StoreError::Validation(message)) => {
            session.set_flash(Flash::Error(message));
            sid.respond(super::redirect(&format!("/list/{}", id)))
        }
        Err(error) => sid.respond(super::not_found_redirect(session, error)),
    }
}

pub fn configure_collection_routes(config: &mut ServiceConfig) {
    config.route("", web::get().to(get_lists));
    config.route("/new", web::get().to(new_list_form));
    config.route("", web::post().to(post_lists));
}

pub fn configure_item_routes(config: &mut ServiceConfig) {
    config.route("/{id}", web::get().to(get_list));
    config.route("/{id}", web::post().to(rename_list));
    config.route("/{id}/edit", web::get().to(edit_list_form));
    config.route("/{id}/delete", web::post().to(delete_list));
    config.route("/{id}/complete_all", web::post().to(complete_all));
}
