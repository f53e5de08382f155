//! Simulated Example - a phone rotating and a browser window resizing
//!
//! Drives the detector with a simulated window and virtual time:
//! - A phone rotating between portrait and landscape
//! - A resize burst collapsing into one recomputation
//! - Reduced-functionality vs full-ladder classification of wide screens
//!
//! Run with: cargo run --example simulated

use std::rc::Rc;

use spark_device::prelude::*;

fn main() {
    println!("=== spark-device Simulated Example ===\n");

    // -------------------------------------------------------------------------
    // Phone
    // -------------------------------------------------------------------------

    let phone = Rc::new(SimulatedWindow::new(390, 844));
    phone.set_touch_points(5);
    phone.set_user_agent("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)");

    let scheduler = Rc::new(ManualScheduler::new());
    let ctx = DetectionContext::new(Rc::new(StaticSniffer::mobile()), scheduler.clone())
        .with_window(phone.clone());
    let detection = use_device_type_detection(ctx);

    println!("Phone:");
    println!("  initial:      {}", detection.device_type());
    phone.rotate();
    println!("  rotated:      {}", detection.device_type());
    phone.rotate();
    println!("  rotated back: {}", detection.device_type());

    // -------------------------------------------------------------------------
    // Resize burst
    // -------------------------------------------------------------------------

    let browser = Rc::new(SimulatedWindow::new(1280, 800));
    let ctx = DetectionContext::new(Rc::new(StaticSniffer::desktop()), scheduler.clone())
        .with_window(browser.clone())
        .with_config(DetectionConfig::full_ladder());
    let desktop = use_device_type_detection(ctx);

    println!("\nBrowser (full ladder):");
    println!("  initial: {} (generation {})", desktop.device_type(), desktop.generation());

    for width in (1300..=2000).step_by(100) {
        browser.resize_to(width, 900);
        scheduler.advance_ms(20);
    }
    println!("  mid-burst: {} (generation {})", desktop.device_type(), desktop.generation());

    scheduler.advance_ms(150);
    println!("  settled:   {} (generation {})", desktop.device_type(), desktop.generation());

    // -------------------------------------------------------------------------
    // Reduced functionality
    // -------------------------------------------------------------------------

    let tv = Rc::new(SimulatedWindow::new(3840, 2160));
    for (name, config) in [
        ("reduced", DetectionConfig::default()),
        ("full ladder", DetectionConfig::full_ladder()),
    ] {
        let ctx = DetectionContext::new(Rc::new(StaticSniffer::desktop()), scheduler.clone())
            .with_window(tv.clone())
            .with_config(config);
        let detection = use_device_type_detection(ctx);
        println!("\n4K screen ({}): {}", name, detection.device_type());
    }
}
