use crate::commands::{recommend, report};
use crate::output::Output;
use color_eyre::Result;
use showreel_catalog::{CatalogService, Content, Plan, PlayOutcome, Quality, User};

/// Walks through the whole surface once: subscriptions (including the guard
/// rejections), resume and explicit-episode playback, rating updates, and
/// the analytics reports.
pub fn run_demo(output: &Output) -> Result<()> {
    let mut service = build_demo_catalog()?;

    output.info("-- Subscriptions --");
    service.subscribe(1, 1)?;
    output.success("Alice subscribed to Premium");

    if let Err(e) = service.subscribe(1, 1) {
        output.warn(format!("Rejected: {e}"));
    }

    service.subscribe(2, 2)?;
    output.success("Bob subscribed to Basic");

    service.deactivate_user(2)?;
    if let Err(e) = service.change_plan(2, 1) {
        output.warn(format!("Rejected: {e}"));
    }
    service.activate_user(2)?;
    service.change_plan(2, 1)?;
    output.success("Bob reactivated and moved to Premium");

    output.info("");
    output.info("-- Playback --");
    for _ in 0..2 {
        if let PlayOutcome::Episode(ep) = service.play_content(1, 100)? {
            output.success(format!("Alice resumed Mystery Mansion: episode {ep}"));
        }
    }
    service.play_episode(1, 100, 5)?;
    output.success("Alice jumped straight to episode 5 (uncounted explicit play)");
    output.info(format!(
        "Mystery Mansion play count: {} (explicit plays don't count)",
        service.play_count(100)
    ));

    service.play_content(2, 101)?;
    service.play_content(1, 101)?;
    output.success("Night Train played by Bob and Alice");

    output.info("");
    output.info("-- Ratings --");
    service.rate_content(100, 8.5)?;
    let mean = service.rate_content(100, 9.0)?;
    output.success(format!("Mystery Mansion now rated {mean:.2}"));
    if let Err(e) = service.rate_content(100, 11.0) {
        output.warn(format!("Rejected: {e}"));
    }

    service.add_to_watchlist(2, 100)?;
    output.success("Mystery Mansion added to Bob's watchlist");

    output.info("");
    output.info("-- Top watched --");
    report::run_top(&service, 3, output)?;

    output.info("-- Revenue --");
    report::run_revenue(&service, output)?;

    output.info("-- Recommendations for Bob --");
    recommend::run_recommend(&service, 2, None, None, None, output)?;

    Ok(())
}

fn build_demo_catalog() -> Result<CatalogService> {
    let mut service = CatalogService::new();

    service.add_plan(Plan::new(1, "Premium", 799.0, 4, Quality::UltraHd)?);
    service.add_plan(Plan::new(2, "Basic", 199.0, 1, Quality::Sd)?);

    service.add_user(User::new(1, "Alice", "alice@example.com"));
    service.add_user(User::new(2, "Bob", "bob@example.com"));

    service.add_content(Content::series(
        100,
        "Mystery Mansion",
        "Mystery",
        2021,
        8,
        42,
        "L. Okafor",
    )?);
    let mut night_train = Content::movie(101, "Night Train", "Thriller", 2019, 112, "R. Iyer", true);
    night_train.rate(8.0)?;
    service.add_content(night_train);
    let mut moonlight = Content::movie(102, "Paper Moonlight", "Comedy", 2023, 97, "T. Vance", false);
    moonlight.rate(7.5)?;
    service.add_content(moonlight);

    Ok(service)
}
