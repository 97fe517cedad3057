//! Sizzle - headless demo
//!
//! Plays every built-in recipe in idle mode against a hand-driven clock and
//! logs the step scores. Set `RUST_LOG=info` (or `debug`) to see progress.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use sizzle::clock::{Clock, ManualClock};
    use sizzle::render::{DrawList, NullAssets};
    use sizzle::{App, Settings};

    /// Simulated time allowed per recipe before it is abandoned
    const RECIPE_BUDGET_MS: u64 = 30 * 60 * 1000;

    env_logger::init();
    log::info!("Sizzle (headless) starting...");

    let settings = Settings::load_from("sizzle.json");
    let mut app = App::new(settings, ManualClock::new(0), NullAssets);
    app.set_idle_mode(true);

    let tick_ms = app.settings().tick_ms();
    let mut canvas = DrawList::new();
    let count = app.levels().recipes().len();
    for index in 0..count {
        app.select_recipe(index);
        let started = app.clock().now_ms();

        while !app.levels().is_recipe_complete() {
            if app.clock().now_ms() - started > RECIPE_BUDGET_MS {
                log::warn!("Recipe {} ran out of time, abandoning", index);
                app.abandon();
                break;
            }
            app.clock().advance(tick_ms);
            canvas.clear();
            app.frame(&[], &mut canvas);
        }

        if let Some(recipe) = app.levels().current_recipe() {
            let scores: Vec<String> = app
                .levels()
                .results()
                .iter()
                .map(|r| format!("{} {}", r.action.label(), r.score))
                .collect();
            println!("{}: {}", recipe.name, scores.join(", "));
        }
    }

    log::info!("Played {} recipes in {:.1}s of game time", count, app.clock().now_ms() as f64 / 1000.0);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless demo on the web target
}
