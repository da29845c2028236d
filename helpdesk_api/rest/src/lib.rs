use std::{net::IpAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use helpdesk_core_contact_contracts::ContactFeatureService;
use helpdesk_core_form_contracts::FormFeatureService;
use helpdesk_di::Build;
use helpdesk_templates_contracts::TemplateService;
use tokio::net::TcpListener;
use tracing::info;

mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone, Build)]
pub struct RestServer<Contact, Form, Template> {
    contact: Contact,
    form: Form,
    template: Template,
}

impl<Contact, Form, Template> RestServer<Contact, Form, Template>
where
    Contact: ContactFeatureService,
    Form: FormFeatureService,
    Template: TemplateService,
{
    pub async fn serve(self, host: IpAddr, port: u16) -> anyhow::Result<()> {
        let router = self.router();

        let listener = TcpListener::bind((host, port))
            .await
            .with_context(|| format!("Failed to bind to {host}:{port}"))?;
        info!("Listening on http://{host}:{port}/");

        axum::serve(listener, router)
            .await
            .context("Failed to start HTTP server")
    }

    fn router(self) -> Router<()> {
        let router = Router::new()
            .merge(routes::health::router())
            .merge(routes::contact::router(self.contact.into()))
            .merge(routes::support::router(Arc::new(routes::support::SupportState {
                form: self.form,
                template: self.template,
            })));

        // the last layer added runs first
        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}
