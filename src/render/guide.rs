//! Static guide for practitioners settling in under-served areas.

use super::layout::{page, Section};

struct Resource {
    href: &'static str,
    label: &'static str,
}

const RESOURCES: [Resource; 4] = [
    Resource { href: "https://sante.gouv.fr/", label: "Ministère de la Santé" },
    Resource { href: "https://www.ameli.fr", label: "Assurance Maladie" },
    Resource { href: "https://www.ars.sante.fr", label: "Agences Régionales de Santé (ARS)" },
    Resource {
        href: "https://www.conseil-national.medecin.fr/",
        label: "Ordre National des Médecins",
    },
];

fn list(tag: &str, items: &[&str]) -> String {
    let items: String = items.iter().map(|i| format!("<li>{i}</li>")).collect();
    format!("<{tag}>{items}</{tag}>")
}

pub fn render_guide() -> String {
    let why = list(
        "ul",
        &[
            "Répondre à un besoin de santé publique et améliorer l'accès aux soins.",
            "Bénéficier d'un cadre de vie attractif et d'une patientèle fidèle.",
            "Profiter d'aides financières et d'un accompagnement personnalisé.",
        ],
    );
    let aids = list(
        "ul",
        &[
            "<b>Contrats d'aide à l'installation</b> (CAIM, CESP, etc.)",
            "<b>Exonérations fiscales</b> et sociales",
            "<b>Primes à l'installation</b> et subventions régionales",
            "<b>Accompagnement par les ARS</b> et collectivités locales",
            "<b>Dispositifs de télémédecine</b> et d'exercice coordonné",
        ],
    );
    let steps = list(
        "ol",
        &[
            "Identifier les zones sous-dotées via la carte interactive du site ou les ARS.",
            "Prendre contact avec l'ARS et les collectivités locales.",
            "Constituer un dossier d'installation (diplômes, projet, etc.).",
            "Choisir un mode d'exercice (libéral, salarié, maison de santé, etc.).",
            "Déposer les demandes d'aides et suivre les démarches administratives.",
        ],
    );
    let resources: String = RESOURCES
        .iter()
        .map(|r| {
            format!(
                r#"<li><a href="{}" target="_blank" rel="noopener noreferrer">{}</a></li>"#,
                r.href, r.label
            )
        })
        .collect();
    let advice = list(
        "ul",
        &[
            "Visiter la zone et rencontrer les acteurs locaux (élus, professionnels, habitants).",
            "Évaluer le potentiel de patientèle et les besoins spécifiques du territoire.",
            "Se renseigner sur les possibilités d'exercice coordonné (MSP, CPTS, etc.).",
            "Anticiper les besoins logistiques (logement, locaux, matériel).",
            "Se faire accompagner par des structures spécialisées (ARS, URPS, Ordre, etc.).",
        ],
    );

    let body = format!(
        r#"<h2>Guide pratique pour les soignants en zones sous-dotées</h2>
<p class="intro">Vous êtes professionnel de santé et souhaitez vous installer dans une zone sous-dotée ? Ce guide vous accompagne à chaque étape, de la réflexion à l'installation, et vous informe sur les aides, démarches et ressources disponibles.</p>
<div class="panel">
  <h3>1. Pourquoi s'installer en zone sous-dotée ?</h3>{why}
  <h3>2. Les aides et dispositifs existants</h3>{aids}
  <h3>3. Démarches à suivre</h3>{steps}
  <h3>4. Ressources utiles</h3><ul>{resources}</ul>
  <h3>5. Conseils pratiques</h3>{advice}
</div>
<p class="hint"><b>Pour toute question ou accompagnement personnalisé, contactez votre ARS ou l'Ordre des Médecins de votre région.</b></p>"#
    );

    page("Guide soignants", Section::Guide, &body)
}
