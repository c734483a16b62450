//! Emergency-visits per doctor, one coloured card per department.

use super::layout::{heading, page, state_body, Section};
use super::{count, escape, fixed};
use crate::dashboard::{Colored, PressureGrid};
use crate::merge::PressureView;
use crate::view::ViewState;

const TITLE: &str = "Carte des Départements - Ratio Passages/Médecins";

const INTRO: &str = "Le <b>ratio passages/médecin</b> correspond au nombre de passages journaliers aux urgences rapporté à l'effectif de médecins dans chaque département. Il permet d'identifier la pression exercée sur les médecins par la demande de soins.";

const GRID_STYLE: &str = "display:grid;grid-template-columns:repeat(auto-fill,minmax(110px,1fr));gap:8px";

fn cell(cell: &Colored<PressureView>) -> String {
    let view = &cell.item;
    let label = escape(&view.label);
    format!(
        r#"<a href="/carte/{code}" title="{label}" style="background:{color};color:#1e293b;border-radius:8px;padding:8px;height:80px;text-decoration:none;display:flex;flex-direction:column;align-items:center;justify-content:center;text-align:center;font-size:.8rem">
<b>{label}</b><span>Ratio: {ratio}</span></a>"#,
        code = escape(view.code.as_str()),
        color = cell.color,
        ratio = fixed(view.ratio, 3),
    )
}

fn grid_body(grid: &PressureGrid) -> String {
    let cells: String = grid.cells.iter().map(cell).collect();
    format!(
        r#"<div class="panel"><div style="{GRID_STYLE}">
{cells}
</div></div>
<p class="hint">Cliquez sur un département pour voir les détails.<br>Le ratio = passages journaliers / effectif médecins</p>"#
    )
}

pub fn render_pressure_page(state: &ViewState<PressureGrid>) -> String {
    let body = format!(
        "{}\n{}",
        heading(TITLE, INTRO),
        state_body(state, grid_body)
    );
    page("Ratio passages/médecin", Section::Pressure, &body)
}

pub fn render_pressure_detail(cell: &Colored<PressureView>) -> String {
    let view = &cell.item;
    let body = format!(
        r#"<div class="detail" style="border-top:8px solid {color}">
  <h3>{label}</h3>
  <dl>
    <dt>Médecins :</dt><dd>{doctors}</dd>
    <dt>Passages journaliers :</dt><dd>{visits}</dd>
    <dt>Ratio passages/médecin :</dt><dd>{ratio}</dd>
  </dl>
  <a class="btn" href="/carte">&larr; Retour à la carte</a>
</div>"#,
        color = cell.color,
        label = escape(&view.label),
        doctors = count(view.doctor_count),
        visits = fixed(view.daily_visits, 1),
        ratio = fixed(view.ratio, 3),
    );
    page(&view.label, Section::Pressure, &body)
}
