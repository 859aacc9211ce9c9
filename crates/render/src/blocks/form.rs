use std::sync::Arc;

use tracing::{debug, warn};

use crate::document::Node;
use crate::escape::html_escape;
use crate::forms::{CsrfTokenSource, FieldKind, FormDefinition, FormField, FormRepository};
use crate::registry::NodeRenderer;
use crate::renderer::RenderContext;

const INPUT_CLASSES: &str = "bg-white border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5";

/// `formBlock`: an embedded, submittable form built from a stored form
/// definition referenced by `attrs.formId`.
///
/// Renders nothing when the form is missing or inactive, or when either
/// collaborator fails. The rest of the document is unaffected.
pub struct FormBlock {
    forms: Arc<dyn FormRepository>,
    csrf: Arc<dyn CsrfTokenSource>,
}

impl FormBlock {
    pub fn new(forms: Arc<dyn FormRepository>, csrf: Arc<dyn CsrfTokenSource>) -> Self {
        Self { forms, csrf }
    }
}

impl NodeRenderer for FormBlock {
    fn render(&self, node: &Node, ctx: &mut RenderContext<'_>) -> String {
        let attrs = node.attrs();
        let Some(form_id) = attrs.text("formId").filter(|id| !id.trim().is_empty()) else {
            return String::new();
        };
        let form_id = form_id.trim();

        let form = match self.forms.find_form(form_id) {
            Ok(Some(form)) if form.is_active() => form,
            Ok(Some(_)) => {
                debug!(form_id, "form is not active; block skipped");
                return String::new();
            }
            Ok(None) => {
                debug!(form_id, "form not found; block skipped");
                return String::new();
            }
            Err(e) => {
                warn!(form_id, error = %e, "form lookup failed; block skipped");
                return String::new();
            }
        };

        let token = match self.csrf.current_token() {
            Ok(token) => token,
            Err(e) => {
                warn!(form_id, error = %e, "CSRF token unavailable; form block skipped");
                return String::new();
            }
        };

        render_form(&form, &token, &ctx.config().form_action_base)
    }
}

fn render_form(form: &FormDefinition, token: &str, action_base: &str) -> String {
    let slug = html_escape(&form.slug);
    let action = format!("{}/{slug}/submit", html_escape(action_base));

    let mut html = format!(
        "<form action=\"{action}\" method=\"POST\" \
         class=\"cerne-form space-y-4 my-8 p-6 bg-gray-50 rounded-lg border border-gray-200\" \
         data-slug=\"{slug}\">"
    );
    html.push_str(&format!(
        "<input type=\"hidden\" name=\"csrf_token\" value=\"{}\">",
        html_escape(token)
    ));
    html.push_str("<div class=\"form-message hidden p-4 mb-4 text-sm rounded-lg\" role=\"alert\"></div>");

    for field in &form.fields {
        html.push_str(&render_field(field));
    }

    let submit_label = html_escape(form.settings.submit_label.as_deref().unwrap_or("Submit"));
    html.push_str(
        "<button type=\"submit\" class=\"text-white bg-blue-700 hover:bg-blue-800 focus:ring-4 \
         focus:outline-none focus:ring-blue-300 font-medium rounded-lg text-sm w-full sm:w-auto \
         px-5 py-2.5 text-center disabled:opacity-50 disabled:cursor-not-allowed\">",
    );
    html.push_str(&format!("<span class=\"submit-text\">{submit_label}</span>"));
    html.push_str("<span class=\"loading-spinner hidden ml-2 animate-spin\">⟳</span>");
    html.push_str("</button>");
    html.push_str("</form>");
    html
}

fn render_field(field: &FormField) -> String {
    let name = html_escape(&field.name);
    let label = html_escape(&field.label);
    let placeholder = html_escape(field.placeholder.as_deref().unwrap_or(""));
    let required = if field.required { " required" } else { "" };
    let required_star = if field.required {
        " <span class=\"text-red-500\">*</span>"
    } else {
        ""
    };

    let mut html = String::from("<div class=\"form-group\">");

    if field.kind != FieldKind::Checkbox {
        html.push_str(&format!(
            "<label for=\"field_{name}\" class=\"block mb-2 text-sm font-medium text-gray-900\">{label}{required_star}</label>"
        ));
    }

    match &field.kind {
        FieldKind::Textarea => html.push_str(&format!(
            "<textarea id=\"field_{name}\" name=\"{name}\" rows=\"4\" \
             class=\"block p-2.5 w-full text-sm text-gray-900 bg-white rounded-lg border border-gray-300 \
             focus:ring-blue-500 focus:border-blue-500\" placeholder=\"{placeholder}\"{required}></textarea>"
        )),
        FieldKind::Select => {
            html.push_str(&format!(
                "<select id=\"field_{name}\" name=\"{name}\" class=\"{INPUT_CLASSES}\"{required}>"
            ));
            html.push_str("<option value=\"\">Select an option</option>");
            for option in field.options.values() {
                let option = html_escape(option);
                html.push_str(&format!("<option value=\"{option}\">{option}</option>"));
            }
            html.push_str("</select>");
        }
        FieldKind::Checkbox => {
            html.push_str("<div class=\"flex items-center\">");
            html.push_str(&format!(
                "<input id=\"field_{name}\" type=\"checkbox\" name=\"{name}\" \
                 class=\"w-4 h-4 text-blue-600 bg-gray-100 border-gray-300 rounded focus:ring-blue-500 focus:ring-2\"{required}>"
            ));
            html.push_str(&format!(
                "<label for=\"field_{name}\" class=\"ms-2 text-sm font-medium text-gray-900\">{label}{required_star}</label>"
            ));
            html.push_str("</div>");
        }
        FieldKind::Input(_) => html.push_str(&format!(
            "<input type=\"{}\" id=\"field_{name}\" name=\"{name}\" class=\"{INPUT_CLASSES}\" \
             placeholder=\"{placeholder}\"{required}>",
            field.kind.input_type()
        )),
    }

    html.push_str("</div>");
    html
}
