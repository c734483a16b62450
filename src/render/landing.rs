use super::layout::{page, Section};

pub fn render_landing(section: Section) -> String {
    let body = r#"<div class="detail" style="background:rgba(30,58,138,.75);color:#dbeafe;max-width:560px">
  <h1>Déserts Médicaux en France</h1>
  <p style="font-size:1.125rem;line-height:1.6">
    Découvrez la réalité des déserts médicaux en France à travers une expérience interactive et visuelle.<br>
    Ce projet met en lumière les zones sous-dotées en professionnels de santé, leurs impacts, et les enjeux pour l'accès aux soins.
  </p>
</div>"#;
    let title = if section == Section::About { "À propos" } else { "Accueil" };
    page(title, section, body)
}
