//! # Shell Rendering
//!
//! Wraps an exported [`Page`] in an HTML document that loads the amis SDK and
//! embeds the page with `amis.embed`.
//!
//! Templates are looked up by name through an [`envelope::Shell`]. The
//! templates shipped with the crate are compiled in and served by
//! [`bundled_shell`]; callers with their own templates build a `Shell` over a
//! [`envelope::DirSource`] (see [`crate::AmisConfig::shell`]) and use
//! [`Page::render_with`].
//!
//! ## Template Context
//!
//! | Key | Value |
//! |-----|-------|
//! | `AmisSchemaJson` | the page as compact JSON, with `</` written as `<\/` |
//! | `locale` | [`RenderOptions::locale`] with `_` replaced by `-` (`zh_CN` → `zh-CN`) |
//! | `cdn`, `pkg` | where the SDK is loaded from (`{{ cdn }}/{{ pkg }}/sdk/sdk.js`) |
//! | `site_title`, `site_icon` | document title and favicon |
//! | `theme` | amis theme name |
//!
//! Values are inserted verbatim; templates are never auto-escaped.

use crate::error::Result;
use crate::nodes::Page;
use crate::schema::Schema;
use envelope::{Shell, StaticSource};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static BUNDLED: &[(&str, &str)] = &[("page.html", include_str!("templates/page.html"))];

static BUNDLED_SHELL: Lazy<Shell> = Lazy::new(|| Shell::new(StaticSource::new(BUNDLED)));

/// The process-wide shell over the bundled templates.
pub fn bundled_shell() -> &'static Shell {
    &BUNDLED_SHELL
}

/// Presentation parameters for [`Page::render`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Template name; [`Page::DEFAULT_TEMPLATE`] when unset or empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Underscore form, e.g. `zh_CN` or `en_US`.
    pub locale: String,
    pub cdn: String,
    /// Package reference appended to `cdn`, e.g. `amis@1.10.2`.
    pub pkg: String,
    pub site_title: String,
    pub site_icon: String,
    pub theme: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            template: None,
            locale: "zh_CN".to_string(),
            cdn: "https://unpkg.com".to_string(),
            pkg: "amis@1.10.2".to_string(),
            site_title: "Amis".to_string(),
            site_icon: String::new(),
            theme: "cxd".to_string(),
        }
    }
}

impl RenderOptions {
    pub fn template(mut self, name: impl Into<String>) -> Self {
        self.template = Some(name.into());
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn cdn(mut self, cdn: impl Into<String>) -> Self {
        self.cdn = cdn.into();
        self
    }

    pub fn pkg(mut self, pkg: impl Into<String>) -> Self {
        self.pkg = pkg.into();
        self
    }

    pub fn site_title(mut self, title: impl Into<String>) -> Self {
        self.site_title = title.into();
        self
    }

    pub fn site_icon(mut self, icon: impl Into<String>) -> Self {
        self.site_icon = icon.into();
        self
    }

    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    /// The template to render, falling back to the page default.
    pub fn template_name(&self) -> &str {
        match self.template.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => Page::DEFAULT_TEMPLATE,
        }
    }
}

/// Context handed to shell templates.
#[derive(Serialize)]
struct ShellData<'a> {
    #[serde(rename = "AmisSchemaJson")]
    schema_json: String,
    locale: String,
    cdn: &'a str,
    pkg: &'a str,
    site_title: &'a str,
    site_icon: &'a str,
    theme: &'a str,
}

/// Makes JSON text safe to embed inside a `<script>` element.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

pub(crate) fn render_page(page: &Page, shell: &Shell, options: &RenderOptions) -> Result<String> {
    let template = options.template_name();
    let data = ShellData {
        schema_json: script_safe(&page.to_text()?),
        locale: options.locale.replace('_', "-"),
        cdn: &options.cdn,
        pkg: &options.pkg,
        site_title: &options.site_title,
        site_icon: &options.site_icon,
        theme: &options.theme,
    };
    tracing::debug!(template, shell = shell.origin(), locale = %data.locale, "rendering page");
    Ok(shell.render(template, &data)?)
}
