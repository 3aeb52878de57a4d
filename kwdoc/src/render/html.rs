//! HTML renderer: standalone page with a keyword sidebar, search box and
//! light/dark theme toggle.

use crate::render::Renderer;
use crate::toc::keyword_anchor;
use anyhow::Result;
use kwdoc_core::markup::inline::escape_html;
use kwdoc_core::{KeywordSignature, LibraryDocument};

pub struct HtmlRenderer;

const STYLE: &str = r#"<style>
body { --bg: #1e1e1e; --fg: #d4d4d4; --panel: #252526; --border: #3c3c3c; --accent: #4ec9b0;
  margin: 0; font-family: system-ui, sans-serif; background: var(--bg); color: var(--fg); }
body[data-theme=light] { --bg: #ffffff; --fg: #1f2328; --panel: #f6f8fa; --border: #d0d7de;
  --accent: #0969da; }
a { color: var(--accent); text-decoration: none; }
.container { display: flex; min-height: 100vh; }
.sidebar { width: 18em; padding: 1em; background: var(--panel);
  border-right: 1px solid var(--border);
  position: sticky; top: 0; height: 100vh; overflow-y: auto; box-sizing: border-box; }
.main-content { flex: 1; padding: 1em 2em; max-width: 60em; }
.search-input { width: 100%; padding: 0.4em; box-sizing: border-box;
  background: var(--bg); color: var(--fg);
  border: 1px solid var(--border); border-radius: 4px; }
.keyword-list { list-style: none; padding: 0; }
.keyword-list li.hidden { display: none; }
.keyword-container { border: 1px solid var(--border); border-radius: 6px; margin: 1em 0;
  padding: 0 1em 1em; }
.arg-name, .arg-type, code { font-family: ui-monospace, monospace; }
.code-block pre { background: #1e1e1e; color: #d4d4d4; padding: 1em; border-radius: 5px;
  overflow-x: auto; }
.doc-table { border-collapse: collapse; }
.doc-table th, .doc-table td { border: 1px solid var(--border); padding: 0.3em 0.6em; }
.theme-toggle { position: fixed; top: 1em; right: 1em; padding: 0.4em 0.8em; cursor: pointer;
  background: var(--panel); color: var(--fg); border: 1px solid var(--border); border-radius: 4px; }
</style>
"#;

const SCRIPT: &str = r#"<script>
function toggleTheme() {
  const body = document.body;
  const next = body.getAttribute('data-theme') === 'light' ? 'dark' : 'light';
  body.setAttribute('data-theme', next);
  const label = next === 'light' ? 'Dark Mode' : 'Light Mode';
  document.getElementById('theme-toggle').textContent = label;
  localStorage.setItem('theme', next);
}

function searchKeywords() {
  const term = document.getElementById('keyword-search').value.toLowerCase().trim();
  const list = document.getElementById('keyword-list');
  let visible = 0;
  list.querySelectorAll('li:not(.no-results)').forEach(function (item) {
    const match = item.textContent.toLowerCase().includes(term);
    item.classList.toggle('hidden', !match);
    if (match) visible++;
  });
  let empty = list.querySelector('.no-results');
  if (visible === 0 && term !== '') {
    if (!empty) {
      empty = document.createElement('li');
      empty.className = 'no-results';
      empty.textContent = 'No keywords found';
      list.appendChild(empty);
    }
  } else if (empty) {
    empty.remove();
  }
}

document.addEventListener('DOMContentLoaded', function () {
  const saved = localStorage.getItem('theme');
  if (saved) {
    document.body.setAttribute('data-theme', saved);
    const label = saved === 'light' ? 'Dark Mode' : 'Light Mode';
    document.getElementById('theme-toggle').textContent = label;
  }
  const search = document.getElementById('keyword-search');
  search.addEventListener('input', searchKeywords);
  search.addEventListener('keyup', function (e) {
    if (e.key === 'Escape') {
      search.value = '';
      searchKeywords();
      search.blur();
    }
  });
});
</script>
"#;

impl Renderer for HtmlRenderer {
    fn render(&self, doc: &LibraryDocument) -> Result<String> {
        let mut out = String::new();

        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        out.push_str(&format!("<title>{}</title>\n", escape_html(&doc.name)));
        out.push_str(STYLE);
        out.push_str("</head>\n<body data-theme=\"dark\">\n");
        out.push_str(concat!(
            "<button id=\"theme-toggle\" class=\"theme-toggle\" onclick=\"toggleTheme()\">",
            "Light Mode</button>\n",
        ));

        // Sidebar
        out.push_str("<div class=\"container\">\n<div class=\"sidebar\">\n");
        out.push_str(&format!("<h1>{}</h1>\n", escape_html(&doc.name)));
        out.push_str(&format!(
            "<div class=\"version\">Version: {}</div>\n",
            escape_html(&doc.version)
        ));
        out.push_str(&format!(
            "<div class=\"scope\">Scope: {}</div>\n",
            escape_html(&doc.scope)
        ));
        out.push_str(concat!(
            "<div class=\"search-container\">",
            "<input type=\"text\" id=\"keyword-search\" class=\"search-input\" ",
            "placeholder=\"Search keywords...\"></div>\n",
        ));
        out.push_str("<h3>Keywords</h3>\n<ul class=\"keyword-list\" id=\"keyword-list\">\n");
        for kw in &doc.keywords {
            out.push_str(&format!(
                "  <li><a href=\"#{}\">{}</a></li>\n",
                escape_html(&keyword_anchor(&kw.name)),
                escape_html(&kw.name)
            ));
        }
        out.push_str("</ul>\n</div>\n");

        // Main content
        out.push_str("<div class=\"main-content\">\n");
        if !doc.description.is_empty() {
            out.push_str("<h2>Introduction</h2>\n");
            out.push_str(&format!(
                "<div class=\"intro-content\">{}</div>\n",
                doc.description
            ));
        }
        out.push_str("<h2 id=\"keywords\">Keywords</h2>\n<div class=\"keywords\">\n");
        for kw in &doc.keywords {
            out.push_str(&render_keyword_html(kw));
        }
        out.push_str("</div>\n</div>\n</div>\n");

        out.push_str(SCRIPT);
        out.push_str("</body>\n</html>\n");
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "html"
    }
}

fn render_keyword_html(kw: &KeywordSignature) -> String {
    let mut out = String::new();
    let anchor = escape_html(&keyword_anchor(&kw.name));
    let name = escape_html(&kw.name);

    out.push_str(&format!("<div class=\"keyword-container\" id=\"{anchor}\">\n"));
    out.push_str(&format!(
        "<h2><a class=\"kw-name\" href=\"#{anchor}\">{name}</a></h2>\n"
    ));

    if !kw.parameters.is_empty() {
        out.push_str("<div class=\"args\">\n<h4>Arguments</h4>\n<ul class=\"arguments-list\">\n");
        for param in &kw.parameters {
            out.push_str(&format!(
                "  <li><span class=\"arg-name\">{}</span></li>\n",
                escape_html(&param.to_string())
            ));
        }
        out.push_str("</ul>\n</div>\n");
    }

    if kw.return_type != "None" {
        out.push_str("<div class=\"return-type\">\n<h4>Return Type</h4>\n");
        out.push_str(&format!(
            "<span class=\"arg-type\">{}</span>\n</div>\n",
            escape_html(&kw.return_type)
        ));
    }

    // Descriptions are rendered HTML already.
    if !kw.description.is_empty() {
        out.push_str("<div class=\"kw-docs\">\n<h4>Documentation</h4>\n");
        out.push_str("<div class=\"kwdoc doc\">\n");
        out.push_str(&kw.description);
        out.push_str("\n</div>\n</div>\n");
    }

    out.push_str("</div>\n");
    out
}
