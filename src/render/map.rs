//! APL choropleth drawn as inline SVG.

use super::apl::{gradient_legend, APL_INTRO};
use super::layout::{page, state_body, Section};
use super::{escape, plain};
use crate::dashboard::{AplMap, MapRegion};
use crate::models::geo::{Projection, Ring};
use crate::view::ViewState;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 640.0;

/// SVG path data for every ring, in viewport coordinates.
pub fn path_data(rings: &[&Ring], projection: &Projection) -> String {
    let mut d = String::new();
    for ring in rings {
        let mut points = ring
            .iter()
            .filter_map(|p| match (p.first(), p.get(1)) {
                (Some(&lon), Some(&lat)) if lon.is_finite() && lat.is_finite() => {
                    Some(projection.project(lon, lat))
                }
                _ => None,
            })
            .peekable();
        if points.peek().is_none() {
            continue;
        }
        for (i, (x, y)) in points.enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            d.push_str(&format!("{cmd}{x:.1},{y:.1}"));
        }
        d.push('Z');
    }
    d
}

fn region(region: &MapRegion, projection: &Projection) -> String {
    let rings = region.geometry.rings();
    let year = region
        .year
        .as_ref()
        .map_or_else(String::new, |year| format!("\nAnnée: {year}"));
    let tooltip = format!("{}\nAPL MG/HMEP: {}{year}", region.name, plain(region.apl));
    format!(
        r##"<path d="{d}" fill="{fill}" fill-opacity="0.7" stroke="#fff" stroke-width="1" stroke-dasharray="3" data-code="{code}"><title>{title}</title></path>"##,
        d = path_data(&rings, projection),
        fill = region.color,
        code = escape(region.code.as_str()),
        title = escape(&tooltip),
    )
}

fn map_body(map: &AplMap) -> String {
    let all_rings: Vec<&Ring> = map
        .regions
        .iter()
        .flat_map(|r| r.geometry.rings())
        .collect();

    let Some(projection) = Projection::fit(all_rings.iter().copied(), WIDTH, HEIGHT) else {
        return r#"<div class="state">Aucune donnée géographique disponible.</div>"#.to_string();
    };

    let paths: String = map.regions.iter().map(|r| region(r, &projection)).collect();
    format!(
        r#"<div class="panel" style="text-align:center">
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}" width="100%" style="max-width:{WIDTH}px" role="img" aria-label="APL par département">
{paths}
</svg>
{legend}
</div>"#,
        legend = gradient_legend(),
    )
}

pub fn render_map_page(state: &ViewState<AplMap>) -> String {
    let body = format!(
        r#"<h2>APL par département</h2>
<p class="intro">{APL_INTRO}</p>
{}"#,
        state_body(state, map_body)
    );
    page("Carte APL", Section::Map, &body)
}
