use serde::Serialize;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateService: Send + Sync + 'static {
    /// Render the given template.
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<String>;
}

#[cfg(feature = "mock")]
impl MockTemplateService {
    pub fn with_render<T: Template + Send + PartialEq + std::fmt::Debug + 'static>(
        mut self,
        template: T,
        result: String,
    ) -> Self {
        self.expect_render()
            .once()
            .with(mockall::predicate::eq(template))
            .return_once(|_| Ok(result));
        self
    }

    pub fn with_render_error<T: Template + Send + PartialEq + std::fmt::Debug + 'static>(
        mut self,
        template: T,
    ) -> Self {
        self.expect_render()
            .once()
            .with(mockall::predicate::eq(template))
            .return_once(|_| Err(anyhow::anyhow!("failed to render template")));
        self
    }
}

/// A template file together with the data it is rendered with.
///
/// Templates whose name ends in `.html` are rendered with HTML escaping of all
/// interpolated values.
pub trait Template: Serialize {
    const NAME: &'static str;
    const TEMPLATE: &'static str;
}

macro_rules! templates {
    ($( $ident:ident ( $path:literal ), )* ) => {
        $(
            impl Template for $ident {
                const NAME: &'static str = $path;
                const TEMPLATE: &'static str = include_str!(concat!("../templates/", $path));
            }
        )*

        pub const TEMPLATES: &[(&str, &str)] = &[
            $( ($ident::NAME, $ident::TEMPLATE) ),*
        ];
    };
}

templates! {
    ContactMessageTemplate("contact_message.html"),
    SupportPageTemplate("support_page.html"),
}

/// Body of the email sent to the admin inbox for every contact form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessageTemplate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
}

/// The public support page containing the contact form.
///
/// The page disables its inputs itself as soon as the form is submitted, so
/// they stay disabled until the response with the result has been rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportPageTemplate {
    pub fields: Vec<SupportPageField>,
    /// One of `idle`, `success` or `error`.
    pub status: String,
    pub notifications: Vec<SupportPageNotification>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportPageField {
    pub name: String,
    pub label: String,
    pub input_type: String,
    pub placeholder: String,
    pub value: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportPageNotification {
    /// One of `success` or `error`.
    pub level: String,
    pub message: String,
    pub duration_ms: Option<u64>,
}
