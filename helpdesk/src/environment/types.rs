use helpdesk_core_contact_impl::ContactFeatureServiceImpl;
use helpdesk_core_form_impl::FormFeatureServiceImpl;
use helpdesk_email_impl::EmailServiceImpl;
use helpdesk_templates_impl::TemplateServiceImpl;

// API
pub type RestServer = helpdesk_api_rest::RestServer<Contact, Form, Template>;

// Core
pub type Contact = ContactFeatureServiceImpl<Template, Email>;
pub type Form = FormFeatureServiceImpl<Contact>;

// Templates
pub type Template = TemplateServiceImpl;

// Email
pub type Email = EmailServiceImpl;
