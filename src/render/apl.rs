//! APL table (sortable, colour-coded) and per-department detail.

use super::layout::{heading, page, state_body, Section};
use super::{escape, plain};
use crate::color::APL_SCALE;
use crate::dashboard::{AplRow, AplTable};
use crate::view::{SortOrder, ViewState};

const TITLE: &str = "Accessibilité potentielle localisée (APL) par département";

pub const APL_INTRO: &str = "L'Accessibilité Potentielle Localisée (APL) mesure la facilité d'accès aux médecins généralistes pour chaque département. Elle est calculée selon la méthode HMEP, prenant en compte la répartition géographique des médecins et de la population. Un APL élevé indique une meilleure accessibilité aux soins.";

fn sort_button(label: &str, order: SortOrder, current: SortOrder) -> String {
    let href = match order.as_query() {
        Some(q) => format!("/apl?sort={q}"),
        None => "/apl".to_string(),
    };
    let class = if order == current { "btn active" } else { "btn" };
    format!(r#"<a class="{class}" href="{href}">{label}</a>"#)
}

fn toolbar(table: &AplTable, current: SortOrder) -> String {
    let (high, low) = table.legend();
    format!(
        r#"<div class="toolbar">
  <div><b>Trier par APL :</b> {desc} {asc} {off}</div>
  <div><span style="font-size:.75rem">Légende :</span>
    <span class="swatch" style="background:{high}">APL élevé (bon)</span>
    <span class="swatch" style="background:{low}">APL faible (mauvais)</span>
  </div>
</div>"#,
        desc = sort_button("Plus élevé", SortOrder::Descending, current),
        asc = sort_button("Plus faible", SortOrder::Ascending, current),
        off = sort_button("Désactiver le tri", SortOrder::Unordered, current),
    )
}

fn table_row(row: &AplRow) -> String {
    let href = format!("/apl/{}", escape(row.code.as_str()));
    format!(
        r#"<tr style="background:{color}" title="Voir le détail du département">
<td><a class="row-link" href="{href}">{code}</a></td>
<td><a class="row-link" href="{href}">{label}</a></td>
<td>{year}</td>
<td><b>{apl}</b></td>
</tr>"#,
        color = row.color,
        code = escape(row.code.as_str()),
        label = escape(&row.label),
        year = escape(row.year.as_deref().unwrap_or("")),
        apl = plain(row.apl),
    )
}

fn table_body(table: &AplTable, order: SortOrder) -> String {
    let rows: String = table.rows.iter().map(table_row).collect();
    format!(
        r#"<div class="panel">
{toolbar}
<table>
<thead><tr><th>Code</th><th>Département</th><th>Année</th><th>APL MG/HMEP</th></tr></thead>
<tbody>
{rows}
</tbody>
</table>
<p class="hint">Cliquez sur une ligne pour voir le détail du département.</p>
</div>"#,
        toolbar = toolbar(table, order),
    )
}

/// `state` must already be sorted by `order`.
pub fn render_apl_page(state: &ViewState<AplTable>, order: SortOrder) -> String {
    let body = format!(
        "{}\n{}",
        heading(TITLE, APL_INTRO),
        state_body(state, |table| table_body(table, order))
    );
    page("Tableau APL", Section::Apl, &body)
}

pub fn render_apl_detail(row: &AplRow) -> String {
    let body = format!(
        r#"<div class="detail" style="border-top:8px solid {color}">
  <h3>{label}</h3>
  <dl>
    <dt>Code :</dt><dd>{code}</dd>
    <dt>Année :</dt><dd>{year}</dd>
    <dt>APL MG/HMEP :</dt><dd>{apl}</dd>
  </dl>
  <p>L'APL mesure l'accessibilité potentielle localisée aux médecins généralistes pour ce département.</p>
  <a class="btn" href="/apl">&larr; Retour au tableau</a>
</div>"#,
        color = row.color,
        label = escape(&row.label),
        code = escape(row.code.as_str()),
        year = escape(row.year.as_deref().unwrap_or("")),
        apl = plain(row.apl),
    );
    page(&row.label, Section::Apl, &body)
}

/// Gradient bar with its two ends labelled, shared with the choropleth.
pub fn gradient_legend() -> String {
    format!(
        r#"<div style="display:inline-block;text-align:left">
  <div>Légende couleur :</div>
  <div style="height:20px;width:200px;margin-top:5px;background:{}"></div>
  <div style="display:flex;justify-content:space-between"><span>APL faible</span><span>APL élevé</span></div>
</div>"#,
        APL_SCALE.css_linear_gradient()
    )
}
