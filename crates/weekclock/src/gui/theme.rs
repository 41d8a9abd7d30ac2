use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;
use radial::Style;

/// The clock style with the backdrop and text colors taken from the GTK theme.
pub fn style_from_context(context: &gtk::StyleContext) -> Style {
    let base = Style::default();
    let background = base
        .background
        .map(|bg| lookup_color(context, "theme_bg_color", bg, Some(0.92)));
    Style {
        background,
        hour_text: lookup_color(
            context,
            "theme_fg_color",
            base.hour_text,
            Some(base.hour_text.alpha),
        ),
        day_text: lookup_color(
            context,
            "theme_fg_color",
            base.day_text,
            Some(base.day_text.alpha),
        ),
        ..base
    }
}

fn lookup_color(
    context: &gtk::StyleContext,
    name: &str,
    fallback: Srgba<f64>,
    alpha_override: Option<f64>,
) -> Srgba<f64> {
    context
        .lookup_color(name)
        .map(|c| {
            let (r, g, b, a) = (
                c.red() as f64,
                c.green() as f64,
                c.blue() as f64,
                c.alpha() as f64,
            );
            Srgba::new(r, g, b, alpha_override.unwrap_or(a))
        })
        .unwrap_or(fallback)
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.weekclock-window, .weekclock-drawing-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
