//! CLI smoke probe.
//!
//! # Responsibility
//! - Verify `quote_garden_core` links and opens the configured store.
//! - Print today's quote the same way the new-tab page picks it.

use quote_garden_core::{open_host_store, today_key, CoreConfig, QuoteService};

fn main() {
    let config = CoreConfig::from_env();
    if let Some(log_dir) = config.log_dir.as_deref() {
        if let Err(err) = quote_garden_core::init_logging(config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let store = open_host_store(&config.store_path);
    let service = QuoteService::new(&store);
    let day = today_key();

    println!("quote_garden_core version={}", quote_garden_core::core_version());
    println!(
        "store={} fallback={}",
        config.store_path.display(),
        store.is_fallback()
    );
    println!(
        "quotes total={} user={}",
        service.all_quotes().len(),
        service.user_quotes().len()
    );
    match service.daily_quote_for(&day) {
        Ok(quote) => println!("{day}: {}", quote.share_text()),
        Err(err) => {
            log::error!("event=daily_quote module=cli status=error error={err}");
            eprintln!("{day}: {err}");
        }
    }
}
