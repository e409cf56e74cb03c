use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use comfy_table::{Cell, Table};
use serde_json::json;
use showreel_catalog::{CatalogService, Content};

pub fn run_recommend(
    service: &CatalogService,
    user: u32,
    genre: Option<String>,
    min_year: Option<u32>,
    min_rating: Option<f64>,
    output: &Output,
) -> Result<()> {
    let picks = match (genre, min_year, min_rating) {
        (Some(genre), _, _) => service.recommend_by_genre(user, &genre),
        (None, Some(year), Some(rating)) => service.recommend_by_year_and_rating(user, year, rating),
        _ => service.recommend(user),
    };

    let picks = match picks {
        Ok(picks) => picks,
        Err(e) => {
            output.error(e.to_string());
            return Err(color_eyre::eyre::eyre!(e));
        }
    };

    match output.format() {
        OutputFormat::Human => {
            if picks.is_empty() {
                output.warn("Nothing left to recommend for this user.");
                return Ok(());
            }
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            table.set_header(vec![
                Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Genre"),
                Cell::new("Year"),
                Cell::new("Rating"),
                Cell::new("Kind"),
            ]);
            for content in &picks {
                table.add_row(vec![
                    Cell::new(content.title()),
                    Cell::new(content.genre()),
                    Cell::new(content.year()),
                    Cell::new(format!("{:.1}", content.rating())),
                    Cell::new(if content.is_series() { "series" } else { "movie" }),
                ]);
            }
            if !output.is_quiet() {
                println!("{table}");
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let items: Vec<_> = picks.iter().map(|c| content_json(c)).collect();
            output.json(&json!({ "user": user, "recommendations": items }));
        }
    }
    Ok(())
}

fn content_json(content: &Content) -> serde_json::Value {
    json!({
        "id": content.id(),
        "title": content.title(),
        "genre": content.genre(),
        "year": content.year(),
        "rating": content.rating(),
        "series": content.is_series(),
    })
}
