//! HTML template rendering.
//!
//! Wraps a [`tera::Tera`] instance preloaded with the built-in page
//! templates. A site can override any of them by dropping a file with the
//! same name into its templates directory.

use std::{fs, path::Path};

use brewdex_core::{config::SiteConfig, Record};
use tera::{Context, Tera};
use thiserror::Error;
use tracing::debug;

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// IO error while loading template overrides.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Template compilation or rendering error.
    #[error("template error: {0}")]
    Tera(#[from] tera::Error),
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Name of the product page template.
pub const PRODUCT_TEMPLATE: &str = "product.html";

/// Name of the index page template.
pub const INDEX_TEMPLATE: &str = "index.html";

/// Compiled template set.
#[derive(Debug)]
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Create a template set with the built-in templates only.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates([
            (PRODUCT_TEMPLATE, DEFAULT_PRODUCT_TEMPLATE),
            (INDEX_TEMPLATE, DEFAULT_INDEX_TEMPLATE),
        ])?;
        Ok(Self { tera })
    }

    /// Create a template set, overriding built-ins from `dir`.
    ///
    /// Every `.html` file directly under `dir` replaces the built-in of the
    /// same name or registers a new template. A missing directory keeps the
    /// built-ins.
    pub fn with_dir(dir: &Path) -> Result<Self> {
        let mut templates = Self::new()?;

        if !dir.is_dir() {
            debug!(dir = %dir.display(), "no templates directory, using built-ins");
            return Ok(templates);
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("html") {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            let content = fs::read_to_string(&path)?;
            templates.tera.add_raw_template(name, &content)?;
            debug!(template = name, "loaded template override");
        }

        Ok(templates)
    }

    /// Render the page for a single product.
    pub fn render_product(&self, site: &SiteConfig, record: &Record) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("item", record);
        Ok(self.tera.render(PRODUCT_TEMPLATE, &context)?)
    }

    /// Render the index page listing every product.
    pub fn render_index(
        &self,
        site: &SiteConfig,
        records: &[Record],
        contributors: &[String],
    ) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("products", records);
        context.insert("contributors", contributors);
        Ok(self.tera.render(INDEX_TEMPLATE, &context)?)
    }
}

/// Built-in product page template.
pub const DEFAULT_PRODUCT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ item.brand }} {{ item.product }} ({{ item.packaging }}) - {{ site.title }}</title>
    <link rel="canonical" href="{{ site.base_url }}/products/{{ item.derived.slug }}">
    {% if site.description %}<meta name="description" content="{{ site.description }}">{% endif %}
</head>
<body>
    <header>
        <nav><a href="/">{{ site.title }}</a></nav>
    </header>
    <main>
        <article>
            <h1>{{ item.brand }} {{ item.product }} ({{ item.packaging }})</h1>
            <dl>
                <dt>Size</dt><dd>{{ item.derived.size }} ml</dd>
                <dt>Caffeine</dt><dd>{{ item.caffeine }} mg / 100 ml ({{ item.derived.caffeine_total }} mg total)</dd>
                <dt>Sugar</dt><dd>{{ item.derived.sugar_total }} g total</dd>
                <dt>Average price</dt><dd>{{ item.derived.average_price }}</dd>
                <dt>Price per 100 ml</dt><dd>{{ item.derived.price_per_100ml }}</dd>
                <dt>Price per mg caffeine</dt><dd>{{ item.derived.price_per_mg_caffeine }}</dd>
                {% if item.derived.sugar_total != "0" %}
                <dt>Sugar per mg caffeine</dt><dd>{{ item.derived.sugar_per_mg_caffeine }}</dd>
                <dt>Caffeine per g sugar</dt><dd>{{ item.derived.caffeine_per_g_sugar }}</dd>
                {% endif %}
            </dl>
            <h2>Stores</h2>
            <table>
                <thead>
                    <tr><th>Store</th><th>Price</th><th>Unit price</th><th>Checked</th></tr>
                </thead>
                <tbody>
                    {% for store in item.derived.stores %}
                    <tr>
                        <td>{% if store.url %}<a href="{{ store.url }}" rel="nofollow">{{ store.name | default(value=store.url) }}</a>{% else %}{{ store.name | default(value="unknown") }}{% endif %}</td>
                        <td>{{ store.price }}</td>
                        <td>{{ store.unit_price }}</td>
                        <td><time datetime="{{ store.date }}">{{ store.date }}</time></td>
                    </tr>
                    {% endfor %}
                </tbody>
            </table>
            <p>Last updated <time datetime="{{ item.derived.newest_update }}">{{ item.derived.newest_update }}</time>.</p>
            <p>Data file: {{ item.filename }}</p>
        </article>
    </main>
    <footer>
        <p>Generated {{ now() | date(format="%Y-%m-%d") }}.</p>
    </footer>
</body>
</html>"#;

/// Built-in index page template.
pub const DEFAULT_INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ site.title }}</title>
    <link rel="canonical" href="{{ site.base_url }}/">
    {% if site.description %}<meta name="description" content="{{ site.description }}">{% endif %}
    <link rel="alternate" type="application/rss+xml" title="{{ site.title }}" href="/feed.xml">
</head>
<body>
    <header>
        <h1>{{ site.title }}</h1>
        {% if site.description %}<p>{{ site.description }}</p>{% endif %}
    </header>
    <main>
        <table>
            <thead>
                <tr>
                    <th>Product</th>
                    <th>Size</th>
                    <th>Avg. price</th>
                    <th>Per 100 ml</th>
                    <th>Per mg caffeine</th>
                    <th>Updated</th>
                </tr>
            </thead>
            <tbody>
                {% for item in products %}
                <tr>
                    <td><a href="/products/{{ item.derived.slug }}">{{ item.brand }} {{ item.product }} ({{ item.packaging }})</a></td>
                    <td>{{ item.derived.size }} ml</td>
                    <td>{{ item.derived.average_price }}</td>
                    <td>{{ item.derived.price_per_100ml }}</td>
                    <td>{{ item.derived.price_per_mg_caffeine }}</td>
                    <td><time datetime="{{ item.derived.newest_update }}">{{ item.derived.newest_update }}</time></td>
                </tr>
                {% endfor %}
            </tbody>
        </table>
        {% if contributors %}
        <section>
            <h2>Contributors</h2>
            <ul>
                {% for name in contributors %}<li>{{ name }}</li>{% endfor %}
            </ul>
        </section>
        {% endif %}
    </main>
    <footer>
        <p>Generated {{ now() | date(format="%Y-%m-%d") }}.</p>
    </footer>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use std::path::Path;

    use brewdex_core::Product;
    use tempfile::TempDir;

    use super::*;

    fn test_site() -> SiteConfig {
        SiteConfig {
            title: "Testlab".to_string(),
            base_url: "https://example.com".to_string(),
            description: Some("Price comparison".to_string()),
            author: None,
            contributors_file: None,
        }
    }

    fn test_record() -> Record {
        let yaml = r"
brand: Acme
product: Boost
packaging: Can
size: 250
caffeine: 32
stores:
  - name: Cornershop
    url: https://shop.example.com/boost
    price: 2.0
    amount: 1
    date: 2023-01-01
";
        let product = Product::from_yaml(yaml, Path::new("acme_boost.yml")).unwrap();
        Record::new(product, Path::new("acme_boost.yml")).unwrap()
    }

    #[test]
    fn test_render_product_page() {
        let templates = Templates::new().unwrap();
        let html = templates.render_product(&test_site(), &test_record()).unwrap();

        assert!(html.contains("<h1>Acme Boost (Can)</h1>"));
        // Integral sizes render without the float's trailing ".0".
        assert!(html.contains("250 ml"));
        assert!(!html.contains("250.0"));
        assert!(html.contains("Cornershop"));
        assert!(html.contains("2.00"));
        assert!(html.contains("https://example.com/products/acme_boost_can_250.html"));
        // Sugar-free products hide the sugar ratio rows.
        assert!(!html.contains("Sugar per mg caffeine"));
    }

    #[test]
    fn test_render_index_page() {
        let templates = Templates::new().unwrap();
        let records = vec![test_record()];
        let html = templates
            .render_index(&test_site(), &records, &["alice".to_string()])
            .unwrap();

        assert!(html.contains("<title>Testlab</title>"));
        assert!(html.contains("/products/acme_boost_can_250.html"));
        assert!(html.contains("250 ml"));
        assert!(html.contains("<li>alice</li>"));
    }

    #[test]
    fn test_index_without_contributors() {
        let templates = Templates::new().unwrap();
        let html = templates.render_index(&test_site(), &[], &[]).unwrap();

        assert!(!html.contains("Contributors"));
    }

    #[test]
    fn test_template_override_from_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("index.html"),
            "custom {{ site.title }} with {{ products | length }} products",
        )
        .unwrap();

        let templates = Templates::with_dir(dir.path()).unwrap();
        let html = templates.render_index(&test_site(), &[], &[]).unwrap();

        assert_eq!(html, "custom Testlab with 0 products");
    }

    #[test]
    fn test_missing_dir_keeps_builtins() {
        let templates = Templates::with_dir(Path::new("does/not/exist")).unwrap();
        let html = templates
            .render_product(&test_site(), &test_record())
            .unwrap();
        assert!(html.contains("Acme Boost"));
    }
}
