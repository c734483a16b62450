//! National statistics: headline figures plus bar chart or table.

use super::layout::{heading, page, state_body, Section};
use super::{count, escape, fixed, plain, thousands};
use crate::stats::StatsOverview;
use crate::view::ViewState;

const TITLE: &str = "Statistiques Nationales";

const INTRO: &str = "Cette page présente l'effectif total de médecins et la densité (nombre de médecins pour 100 000 habitants) par spécialité et par département. Ces indicateurs permettent d'évaluer la répartition des professionnels de santé sur le territoire.";

/// Which rendition of the per-department data is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsLayout {
    #[default]
    Bars,
    Table,
}

impl StatsLayout {
    /// `?vue=tableau` selects the table; anything else the bar chart.
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("tableau") => StatsLayout::Table,
            _ => StatsLayout::Bars,
        }
    }
}

fn tile(value: &str, label: &str) -> String {
    format!(
        r#"<div style="background:rgba(30,58,138,.8);color:#fff;border-radius:12px;padding:24px 32px;text-align:center;min-width:180px">
<div style="font-size:1.5rem;font-weight:700">{value}</div><div style="color:#bfdbfe">{label}</div></div>"#
    )
}

fn headline(overview: &StatsOverview) -> String {
    let a = &overview.averages;
    let tiles = [
        tile(&thousands(overview.total_doctors), "Effectif total"),
        tile(&fixed(a.overall, 1), "Densité moyenne (ensemble)"),
        tile(&fixed(a.generalists, 1), "Densité moyenne (généralistes)"),
        tile(&fixed(a.specialists, 1), "Densité moyenne (spécialistes)"),
        tile(&fixed(a.dentists, 1), "Densité moyenne (chir. dent.)"),
        tile(&fixed(a.pharmacists, 1), "Densité moyenne (pharmaciens)"),
    ]
    .concat();
    format!(r#"<div style="display:flex;flex-wrap:wrap;gap:24px;justify-content:center">{tiles}</div>"#)
}

fn toggle(current: StatsLayout) -> String {
    let class = |layout: StatsLayout| if layout == current { "btn active" } else { "btn" };
    format!(
        r#"<p class="hint"><a class="{}" href="/statistiques">Graphique</a> <a class="{}" href="/statistiques?vue=tableau">Tableau</a></p>"#,
        class(StatsLayout::Bars),
        class(StatsLayout::Table),
    )
}

fn bars(overview: &StatsOverview) -> String {
    let rows: String = overview
        .bars()
        .iter()
        .map(|bar| {
            format!(
                r#"<div class="bar" style="display:flex;align-items:center;gap:8px;margin-bottom:6px" title="{share}">
<span style="width:160px;overflow:hidden;text-overflow:ellipsis;white-space:nowrap">{label}</span>
<div style="flex:1;background:#bfdbfe;border-radius:4px;height:20px;position:relative">
<div style="background:#06b6d4;height:20px;border-radius:4px;width:{width:.2}%"></div>
<span style="position:absolute;right:8px;top:0;font-size:.75rem;font-weight:700;line-height:20px">{doctors}</span>
</div></div>"#,
                share = bar.share_percent.map_or_else(String::new, |p| format!("{p:.1}% de l'effectif national")),
                label = escape(&bar.label),
                width = bar.width_percent,
                doctors = bar.doctors,
            )
        })
        .collect();
    format!(r#"<div class="panel"><h3>Effectif par département</h3>{rows}</div>"#)
}

fn table(overview: &StatsOverview) -> String {
    let rows: String = overview
        .departments
        .iter()
        .map(|s| {
            format!(
                r#"<tr><td>{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td></tr>"#,
                escape(&s.label),
                count(s.doctor_count),
                plain(s.density_overall),
                plain(s.density_generalists),
                plain(s.density_specialists),
                plain(s.density_dentists),
                plain(s.density_pharmacists),
            )
        })
        .collect();
    format!(
        r#"<div class="panel"><h3>Données détaillées par département</h3>
<table>
<thead><tr><th>Département</th><th class="num">Effectif</th><th class="num">Densité (ensemble)</th><th class="num">Densité (généralistes)</th><th class="num">Densité (spécialistes)</th><th class="num">Densité (chir. dent.)</th><th class="num">Densité (pharmaciens)</th></tr></thead>
<tbody>
{rows}
</tbody>
</table></div>"#
    )
}

pub fn render_stats_page(state: &ViewState<StatsOverview>, layout: StatsLayout) -> String {
    let content = state_body(state, |overview| {
        let detail = match layout {
            StatsLayout::Bars => bars(overview),
            StatsLayout::Table => table(overview),
        };
        format!("{}\n{}\n{}", headline(overview), toggle(layout), detail)
    });
    let body = format!("{}\n{}", heading(TITLE, INTRO), content);
    page("Statistiques nationales", Section::Stats, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DepartmentStats;
    use crate::view::GENERIC_ERROR_MESSAGE;
    use serde_json::json;

    fn overview() -> StatsOverview {
        let rows: Vec<DepartmentStats> = serde_json::from_value(json!([
            { "id": 1, "departement": "Ain", "effectif": 400, "densite_ensemble": 200.0,
              "densite_generalistes": 100.0, "densite_specialistes": 90.5,
              "densite_chir_dent": 50.0, "densite_pharma": 100.0 },
            { "id": 75, "departement": "Paris", "effectif": 12000, "densite_ensemble": 600.0,
              "densite_generalistes": 300.0, "densite_specialistes": 280.25,
              "densite_chir_dent": 80.0, "densite_pharma": 120.0 },
            { "id": 101, "departement": "France entière", "effectif": 99999, "densite_ensemble": 1.0 }
        ]))
        .unwrap();
        StatsOverview::build(rows)
    }

    #[test]
    fn layout_query_parsing() {
        assert_eq!(StatsLayout::from_query(Some("tableau")), StatsLayout::Table);
        assert_eq!(StatsLayout::from_query(Some("barres")), StatsLayout::Bars);
        assert_eq!(StatsLayout::from_query(None), StatsLayout::Bars);
    }

    #[test]
    fn headline_totals_exclude_aggregates() {
        let html = render_stats_page(&ViewState::Ready(overview()), StatsLayout::Bars);
        assert!(html.contains(">12 400<"));
        assert!(html.contains(">400.0<"));
        assert!(html.contains(">185.4<"));
        assert!(!html.contains("France entière"));
    }

    #[test]
    fn bar_chart_is_default() {
        let html = render_stats_page(&ViewState::Ready(overview()), StatsLayout::Bars);
        assert!(html.contains("Effectif par département"));
        assert!(!html.contains("<tbody>"));
        assert_eq!(html.matches(r#"class="bar""#).count(), 2);
        assert!(html.contains("width:100.00%"));
        let paris = html.find(">Paris<").unwrap();
        let ain = html.find(">Ain<").unwrap();
        assert!(paris < ain);
    }

    #[test]
    fn table_lists_every_department() {
        let html = render_stats_page(&ViewState::Ready(overview()), StatsLayout::Table);
        assert!(html.contains("Données détaillées par département"));
        assert!(html.contains(r#"<td class="num">280.25</td>"#));
        assert!(html.contains(r#"<a class="btn active" href="/statistiques?vue=tableau">"#));
    }

    #[test]
    fn error_state_has_no_figures() {
        let state: ViewState<StatsOverview> = ViewState::Error(GENERIC_ERROR_MESSAGE.into());
        let html = render_stats_page(&state, StatsLayout::Table);
        assert!(html.contains(GENERIC_ERROR_MESSAGE));
        assert!(!html.contains("Effectif total"));
    }
}
