use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use comfy_table::{Cell, Table};
use serde_json::json;
use showreel_catalog::CatalogService;

fn styled_table() -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

pub fn run_top(service: &CatalogService, count: usize, output: &Output) -> Result<()> {
    let top = service.top_watched(count);

    match output.format() {
        OutputFormat::Human => {
            if top.is_empty() {
                output.warn("No content has been played yet.");
                return Ok(());
            }
            let mut table = styled_table();
            table.set_header(vec![
                Cell::new("#").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Genre"),
                Cell::new("Rating"),
                Cell::new("Plays"),
            ]);
            for (rank, content) in top.iter().enumerate() {
                table.add_row(vec![
                    Cell::new(rank + 1),
                    Cell::new(content.title()),
                    Cell::new(content.genre()),
                    Cell::new(format!("{:.1}", content.rating())),
                    Cell::new(service.play_count(content.id())),
                ]);
            }
            if !output.is_quiet() {
                println!("{table}");
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let items: Vec<_> = top
                .iter()
                .map(|content| {
                    json!({
                        "id": content.id(),
                        "title": content.title(),
                        "genre": content.genre(),
                        "rating": content.rating(),
                        "plays": service.play_count(content.id()),
                    })
                })
                .collect();
            output.json(&json!({ "top_watched": items }));
        }
    }
    Ok(())
}

pub fn run_revenue(service: &CatalogService, output: &Output) -> Result<()> {
    let revenue = service.plan_wise_revenue();
    // HashMap iteration order is arbitrary; present alphabetically.
    let mut rows: Vec<_> = revenue.into_iter().collect();
    rows.sort_by(|a, b| a.0.cmp(&b.0));

    match output.format() {
        OutputFormat::Human => {
            if rows.is_empty() {
                output.warn("No plan has any subscribers yet.");
                return Ok(());
            }
            let mut table = styled_table();
            table.set_header(vec![
                Cell::new("Plan").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Monthly revenue"),
            ]);
            let mut total = 0.0;
            for (plan, amount) in &rows {
                table.add_row(vec![Cell::new(plan), Cell::new(format!("{amount:.2}"))]);
                total += amount;
            }
            table.add_row(vec![
                Cell::new("Total").add_attribute(comfy_table::Attribute::Bold),
                Cell::new(format!("{total:.2}")),
            ]);
            if !output.is_quiet() {
                println!("{table}");
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let items: Vec<_> = rows
                .iter()
                .map(|(plan, amount)| json!({ "plan": plan, "revenue": amount }))
                .collect();
            output.json(&json!({ "plan_revenue": items }));
        }
    }
    Ok(())
}
