//! Shared page shell: head, stylesheet, top navigation and view states.

use super::escape;
use crate::config::APP_NAME;
use crate::view::ViewState;

/// Top-level sections, in navigation-bar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Home,
    Pressure,
    Map,
    Stats,
    Risk,
    Apl,
    Guide,
    About,
}

impl Section {
    pub const NAV: [Section; 7] = [
        Section::Pressure,
        Section::Map,
        Section::Stats,
        Section::Risk,
        Section::Apl,
        Section::Guide,
        Section::About,
    ];

    pub fn href(&self) -> &'static str {
        match self {
            Section::Home => "/",
            Section::Pressure => "/carte",
            Section::Map => "/map",
            Section::Stats => "/statistiques",
            Section::Risk => "/zones-risque",
            Section::Apl => "/apl",
            Section::Guide => "/guide",
            Section::About => "/propos",
        }
    }

    pub fn nav_label(&self) -> &'static str {
        match self {
            Section::Home => "Déserts Médicaux",
            Section::Pressure => "Carte (Ratio passages/médecin)",
            Section::Map => "Carte APL (Accessibilité)",
            Section::Stats => "Statistiques nationales",
            Section::Risk => "Zones à risque (démographie médicale)",
            Section::Apl => "Tableau APL",
            Section::Guide => "Guide soignants",
            Section::About => "À propos",
        }
    }
}

const STYLESHEET: &str = r#"
*,*::before,*::after{box-sizing:border-box}
body{margin:0;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;color:#1e293b;background:linear-gradient(135deg,#3b82f6,#22d3ee 50%,#1e3a8a);min-height:100vh}
nav{position:sticky;top:0;z-index:20;background:rgba(30,58,138,.85);display:flex;flex-wrap:wrap;align-items:center;justify-content:space-between;padding:12px 16px;gap:12px}
nav .brand{font-size:1.25rem;font-weight:700;color:#a5f3fc;text-decoration:none}
nav .links a{color:#dbeafe;text-decoration:none;font-weight:500;margin-left:20px}
nav .links a.active,nav .links a:hover{color:#67e8f9}
main{max-width:1024px;margin:0 auto;padding:40px 16px;display:flex;flex-direction:column;gap:24px}
h1,h2{text-align:center;color:#ecfeff;margin:0}
.intro{background:rgba(255,255,255,.7);border-radius:8px;padding:16px;color:#1e3a8a;text-align:center;max-width:768px;margin:0 auto}
.panel{background:rgba(255,255,255,.85);border-radius:12px;padding:24px;box-shadow:0 4px 24px rgba(0,0,0,.08);overflow-x:auto}
.state{background:rgba(255,255,255,.85);border-radius:12px;padding:32px;text-align:center;font-size:1.25rem;font-weight:700}
.state.error{color:#b91c1c}
.hint{text-align:center;color:#1e40af}
table{width:100%;border-collapse:collapse}
th{background:#cffafe;color:#1e3a8a;text-align:left;padding:8px 12px}
td{padding:8px 12px;border-bottom:1px solid #bfdbfe}
td.num,th.num{text-align:right}
a.row-link{color:inherit;text-decoration:none;display:block}
.toolbar{display:flex;flex-wrap:wrap;justify-content:space-between;align-items:center;gap:12px;margin-bottom:16px}
.btn{display:inline-block;padding:4px 12px;border:2px solid #06b6d4;border-radius:6px;background:rgba(255,255,255,.8);color:#1e3a8a;font-weight:700;text-decoration:none}
.btn.active{background:#a5f3fc}
.swatch{display:inline-block;border-radius:6px;padding:4px 12px;font-size:.75rem;font-weight:600;color:#1e293b}
.detail{background:#fff;border-radius:16px;padding:32px;max-width:420px;margin:0 auto;text-align:center;box-shadow:0 8px 32px rgba(0,0,0,.15)}
.detail dl{display:grid;grid-template-columns:auto auto;gap:8px 16px;text-align:left;margin:16px 0}
.detail dt{color:#1e40af}
.detail dd{margin:0;font-weight:600}
"#;

/// Wrap `body` in the full document with navigation.
pub fn page(title: &str, active: Section, body: &str) -> String {
    let links: String = Section::NAV
        .iter()
        .map(|s| {
            let class = if *s == active { r#" class="active""# } else { "" };
            format!(r#"<a href="{}"{class}>{}</a>"#, s.href(), s.nav_label())
        })
        .collect();

    format!(
        r##"<!DOCTYPE html>
<html lang="fr">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · {app}</title>
<style>{css}</style>
</head>
<body>
<nav>
  <a href="/" class="brand">{brand}</a>
  <div class="links">{links}</div>
</nav>
<main>
{body}
</main>
</body>
</html>"##,
        title = escape(title),
        app = APP_NAME,
        css = STYLESHEET,
        brand = Section::Home.nav_label(),
    )
}

/// Body for a view in any state. Only `Ready` carries rows.
pub fn state_body<T>(state: &ViewState<T>, ready: impl FnOnce(&T) -> String) -> String {
    match state {
        ViewState::Loading => r#"<div class="state">Chargement...</div>"#.to_string(),
        ViewState::Error(message) => {
            format!(r#"<div class="state error">{}</div>"#, escape(message))
        }
        ViewState::Ready(data) => ready(data),
    }
}

/// A page heading followed by its explanatory paragraph.
pub fn heading(title: &str, intro: &str) -> String {
    format!(
        r#"<h2>{}</h2>
<p class="intro">{intro}</p>"#,
        escape(title)
    )
}

/// Page for a department code the dataset does not contain.
pub fn not_found_page(section: Section, code: &str) -> String {
    let body = format!(
        r#"<div class="state">Aucune donnée pour le département « {} ».</div>
<p class="hint"><a class="btn" href="{}">Retour</a></p>"#,
        escape(code),
        section.href()
    );
    page("Département introuvable", section, &body)
}
