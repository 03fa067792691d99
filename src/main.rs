//! ComponentAI
//!
//! Describe a UI component, get a self-contained HTML snippet with a live
//! preview.
//!
//! This is the main entry point for the Dioxus Desktop application.

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .pretty()
        .init();

    println!();
    println!("╔═══════════════════════════════════════════════════════════╗");
    println!("║                                                           ║");
    println!("║   ComponentAI v{:<43}║", componentai_ui::VERSION);
    println!("║   Describe a component, get HTML with a live preview      ║");
    println!("║                                                           ║");
    println!("╚═══════════════════════════════════════════════════════════╝");
    println!();

    componentai_ui::launch();
}
