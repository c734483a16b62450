//! Demographic risk cards, ranked by descending risk.

use super::layout::{heading, page, state_body, Section};
use super::{count, escape, percent};
use crate::dashboard::{RiskBoard, RiskCard};
use crate::metrics::RiskTier;
use crate::view::ViewState;

const TITLE: &str = "Zones à Risque - Médecins Retraités & +55 ans";

const INTRO: &str = "Les indicateurs présentés ici identifient les départements à risque de désertification médicale, en fonction de la <b>part de médecins proches de la retraite</b> ou déjà retraités mais actifs. Le <b>ratio retraités actifs/médecins</b> et la <b>part de médecins de plus de 55 ans</b> permettent d'anticiper les zones où l'offre médicale pourrait diminuer prochainement.";

/// Card background per tier.
fn tier_background(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::Low => "linear-gradient(135deg,#a5f3fc,#bfdbfe)",
        RiskTier::Moderate => "linear-gradient(135deg,#fef08a,#fdba74)",
        RiskTier::High => "linear-gradient(135deg,#fb923c,#ef4444)",
    }
}

fn card(card: &RiskCard) -> String {
    let v = &card.view;
    format!(
        r#"<a href="/zones-risque/{code}" class="risk-card tier-{tier}" style="background:{background};border:4px solid #67e8f9;border-radius:16px;padding:24px;color:#1e3a8a;text-decoration:none;position:relative;display:block">
<span style="position:absolute;top:8px;left:16px;font-size:.75rem">#{rank}</span>
<h3>{label}</h3>
<div>Retraités actifs : <b>{retirees}</b></div>
<div>Omnipraticiens +55 ans : <b>{generalists}</b></div>
<div>Spécialistes +55 ans : <b>{specialists}</b></div>
<div>Total médecins : <b>{doctors}</b></div>
<div>Ratio retraités actifs / médecins : <b>{retiree_ratio}</b></div>
<div>Part +55 ans : <b>{over55}</b></div>
<div style="font-size:.75rem;margin-top:8px">{tier_label} · Code: {code}</div>
</a>"#,
        code = escape(v.code.as_str()),
        tier = v.tier.as_str(),
        background = tier_background(v.tier),
        rank = card.rank,
        label = escape(&v.label),
        retirees = count(v.active_retirees),
        generalists = count(v.generalists_over55),
        specialists = count(v.specialists_over55),
        doctors = count(v.total_doctors),
        retiree_ratio = percent(v.retiree_ratio),
        over55 = percent(v.over55_share),
        tier_label = v.tier.label(),
    )
}

fn board_body(board: &RiskBoard) -> String {
    let cards: String = board.cards.iter().map(card).collect();
    format!(
        r#"<div style="display:grid;grid-template-columns:repeat(auto-fill,minmax(280px,1fr));gap:24px">
{cards}
</div>"#
    )
}

pub fn render_risk_page(state: &ViewState<RiskBoard>) -> String {
    let body = format!(
        "{}\n{}",
        heading(TITLE, INTRO),
        state_body(state, board_body)
    );
    page("Zones à risque", Section::Risk, &body)
}

pub fn render_risk_detail(card: &RiskCard) -> String {
    let v = &card.view;
    let body = format!(
        r#"<div class="detail" style="background:{background}">
  <h3>{label}</h3>
  <dl>
    <dt>Médecins retraités actifs</dt><dd>{retirees}</dd>
    <dt>Omnipraticiens +55 ans</dt><dd>{generalists}</dd>
    <dt>Spécialistes +55 ans</dt><dd>{specialists}</dd>
    <dt>Médecins au total</dt><dd>{doctors}</dd>
    <dt>Ratio retraités actifs / médecins</dt><dd>{retiree_ratio}</dd>
    <dt>Part +55 ans</dt><dd>{over55}</dd>
    <dt>Niveau</dt><dd>{tier_label} (#{rank})</dd>
  </dl>
  <p>Code département : <b>{code}</b></p>
  <a class="btn" href="/zones-risque">&larr; Retour aux zones</a>
</div>"#,
        background = tier_background(v.tier),
        label = escape(&v.label),
        retirees = count(v.active_retirees),
        generalists = count(v.generalists_over55),
        specialists = count(v.specialists_over55),
        doctors = count(v.total_doctors),
        retiree_ratio = percent(v.retiree_ratio),
        over55 = percent(v.over55_share),
        tier_label = v.tier.label(),
        rank = card.rank,
        code = escape(v.code.as_str()),
    );
    page(&v.label, Section::Risk, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::merge_risk;
    use crate::models::{DoctorsRecord, Over55Record, RetireesRecord};
    use crate::view::GENERIC_ERROR_MESSAGE;

    fn board() -> RiskBoard {
        let retirees = vec![
            RetireesRecord { code: "01".into(), label: "Ain".into(), active_retirees: Some(2) },
            RetireesRecord { code: "23".into(), label: "Creuse".into(), active_retirees: Some(20) },
            RetireesRecord { code: "976".into(), label: "Mayotte".into(), active_retirees: None },
        ];
        let over55 = vec![
            Over55Record { code: "01".into(), label: String::new(), generalists: Some(3), specialists: Some(1) },
            Over55Record { code: "23".into(), label: String::new(), generalists: Some(30), specialists: Some(20) },
        ];
        let doctors = vec![
            DoctorsRecord { code: "01".into(), label: "Ain".into(), doctor_count: Some(20) },
            DoctorsRecord { code: "23".into(), label: "Creuse".into(), doctor_count: Some(100) },
        ];
        RiskBoard::build(merge_risk(&retirees, &over55, &doctors))
    }

    #[test]
    fn cards_are_ranked_and_formatted() {
        let html = render_risk_page(&ViewState::Ready(board()));
        let creuse = html.find("<h3>Creuse</h3>").unwrap();
        let ain = html.find("<h3>Ain</h3>").unwrap();
        let mayotte = html.find("<h3>Mayotte</h3>").unwrap();
        assert!(creuse < ain && ain < mayotte);

        assert!(html.contains("Ratio retraités actifs / médecins : <b>20.0%</b>"));
        assert!(html.contains("Part +55 ans : <b>50.0%</b>"));
        assert!(html.contains(">#1</span>"));
        assert!(html.contains(">#3</span>"));
    }

    #[test]
    fn tiers_drive_styling() {
        let html = render_risk_page(&ViewState::Ready(board()));
        assert!(html.contains("tier-high"));
        assert!(html.contains("tier-moderate"));
        assert!(html.contains("tier-low"));
        assert!(html.contains("Risque élevé"));
    }

    #[test]
    fn missing_figures_show_na() {
        let html = render_risk_page(&ViewState::Ready(board()));
        assert!(html.contains("Total médecins : <b>N/A</b>"));
        assert!(html.contains("Part +55 ans : <b>N/A</b>"));
    }

    #[test]
    fn error_state_has_no_cards() {
        let state: ViewState<RiskBoard> = ViewState::Error(GENERIC_ERROR_MESSAGE.into());
        let html = render_risk_page(&state);
        assert!(html.contains(GENERIC_ERROR_MESSAGE));
        assert!(!html.contains("risk-card"));
    }

    #[test]
    fn detail_includes_rank_and_code() {
        let board = board();
        let html = render_risk_detail(&board.cards[0]);
        assert!(html.contains("Risque élevé (#1)"));
        assert!(html.contains("Code département : <b>23</b>"));
    }
}
